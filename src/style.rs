//! Recursive reclassification and repaint of icon subtrees.
//!
//! Each element is matched against an ordered rule table; the first matching
//! rule rewrites its paint attributes and tags it with one semantic class
//! marker (`bg`, `bg-item`, `fg`, or `no-fill`). Styling always operates on
//! a deep clone, so the shared sheet is never mutated and the same document
//! can be reused across icons.
//!
//! Re-styling an already-styled element is not guaranteed to be a no-op:
//! a stroked element gains `fill-opacity="0"` on the first pass, which a
//! second pass would classify differently. Callers style fresh clones only.

use crate::error::IconError;
use crate::tree::Element;

/// Substring marking an element as a clickable hit region.
pub const CLICKABLE_MARKER: &str = "-clickable";
/// Suffix marking a group whose children repaint in the background color.
pub const INVERT_SUFFIX: &str = "-invert";

/// Default foreground color.
pub const DEFAULT_FG: &str = "white";
/// Default background color.
pub const DEFAULT_BG: &str = "darkgreen";
/// Default center-preserving enlargement applied to hit-region graphics.
pub const DEFAULT_HIT_REGION_SCALE: f64 = 1.2;

const OPAQUE: &str = "1";
const TRANSPARENT: &str = "0";

/// Paint attributes scrubbed when an upstream producer stringified an
/// undefined value into them.
const SCRUBBED_ATTRS: &[&str] = &["fill", "stroke", "fill-opacity", "stroke-opacity", "opacity"];

/// Foreground/background color pair, validated once per run and shared
/// read-only by every styling pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub fg: String,
    pub bg: String,
}

impl Palette {
    pub fn new(fg: impl Into<String>, bg: impl Into<String>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_FG, DEFAULT_BG)
    }
}

/// Styling knobs that are configuration, not engine behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleOptions {
    /// Scale factor applied to a hit region about its own center.
    pub hit_region_scale: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            hit_region_scale: DEFAULT_HIT_REGION_SCALE,
        }
    }
}

/// Semantic classification of one element, in rule-priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleRule {
    /// Id contains `-clickable`: enlarged, background-filled, `bg-item`.
    HitRegion,
    /// Id ends with `-invert`: children repainted in background, `bg`.
    InvertGroup,
    /// `text` element (and descendant `tspan`s): foreground fill, `fg`.
    Text,
    /// `path` with no `fill` attribute: explicit `none`, `no-fill`.
    UnfilledPath,
    /// Any element with a non-`none` `fill`: foreground fill, `fg`.
    Filled,
    /// Any remaining element with a `stroke`: foreground stroke, `fg`.
    Stroked,
}

/// Ordered classification table; the first matching predicate wins.
const RULES: &[(StyleRule, fn(&Element) -> bool)] = &[
    (StyleRule::HitRegion, is_hit_region),
    (StyleRule::InvertGroup, is_invert_group),
    (StyleRule::Text, is_text),
    (StyleRule::UnfilledPath, is_unfilled_path),
    (StyleRule::Filled, is_filled),
    (StyleRule::Stroked, is_stroked),
];

fn is_hit_region(el: &Element) -> bool {
    el.id().is_some_and(|id| id.contains(CLICKABLE_MARKER))
}

fn is_invert_group(el: &Element) -> bool {
    el.id().is_some_and(|id| id.ends_with(INVERT_SUFFIX))
}

fn is_text(el: &Element) -> bool {
    el.name() == "text"
}

fn is_unfilled_path(el: &Element) -> bool {
    el.name() == "path" && !el.has_attr("fill")
}

fn is_filled(el: &Element) -> bool {
    el.attr("fill").is_some_and(|fill| fill != "none")
}

fn is_stroked(el: &Element) -> bool {
    el.has_attr("stroke")
}

/// Classify one element against the rule table.
///
/// `None` means no rule matches and the element passes through unchanged
/// (rule 7). Classification never inspects children.
pub fn classify(el: &Element) -> Option<StyleRule> {
    RULES
        .iter()
        .find(|(_, matches)| matches(el))
        .map(|(rule, _)| *rule)
}

/// Style a deep clone of `node` and return it; the source is untouched.
///
/// Children of `g` containers are styled individually before the group's
/// own rule fires, so an inversion group deliberately overrides the
/// foreground paint its children just received.
///
/// The only failure mode is a hit region whose geometry does not parse as
/// finite numbers.
pub fn style(
    node: &Element,
    palette: &Palette,
    options: &StyleOptions,
) -> Result<Element, IconError> {
    let mut clone = node.clone();
    style_in_place(&mut clone, palette, options)?;
    Ok(clone)
}

fn style_in_place(
    el: &mut Element,
    palette: &Palette,
    options: &StyleOptions,
) -> Result<(), IconError> {
    if el.name() == "g" {
        for child in el.child_elements_mut() {
            style_in_place(child, palette, options)?;
        }
    }
    if let Some(rule) = classify(el) {
        apply(rule, el, palette, options)?;
    }
    scrub_undefined(el);
    Ok(())
}

fn apply(
    rule: StyleRule,
    el: &mut Element,
    palette: &Palette,
    options: &StyleOptions,
) -> Result<(), IconError> {
    match rule {
        StyleRule::HitRegion => {
            enlarge_about_center(el, options.hit_region_scale)?;
            paint_fill(el, &palette.bg);
            el.remove_attr("opacity");
            tag_class(el, "bg-item");
        }
        StyleRule::InvertGroup => {
            for child in el.child_elements_mut() {
                invert_child(child, &palette.bg);
            }
            tag_class(el, "bg");
        }
        StyleRule::Text => {
            paint_fill(el, &palette.fg);
            tag_class(el, "fg");
            repaint_tspans(el, &palette.fg);
        }
        StyleRule::UnfilledPath => {
            el.set_attr("fill", "none");
            el.set_attr("fill-opacity", TRANSPARENT);
            tag_class(el, "no-fill");
        }
        StyleRule::Filled => {
            paint_fill(el, &palette.fg);
            tag_class(el, "fg");
        }
        StyleRule::Stroked => {
            paint_stroke(el, &palette.fg);
            tag_class(el, "fg");
        }
    }
    Ok(())
}

/// Grow the rectangle by `scale` while keeping its center fixed.
fn enlarge_about_center(el: &mut Element, scale: f64) -> Result<(), IconError> {
    let icon = owning_icon_id(el);
    let x = finite_attr(el, "x", &icon)?;
    let y = finite_attr(el, "y", &icon)?;
    let width = finite_attr(el, "width", &icon)?;
    let height = finite_attr(el, "height", &icon)?;

    let new_width = width * scale;
    let new_height = height * scale;
    el.set_attr("width", new_width.to_string());
    el.set_attr("height", new_height.to_string());
    el.set_attr("x", (x - (new_width - width) / 2.0).to_string());
    el.set_attr("y", (y - (new_height - height) / 2.0).to_string());
    Ok(())
}

/// Icon id owning a hit region: the element's id up to the clickable marker.
fn owning_icon_id(el: &Element) -> String {
    let id = el.id().unwrap_or_default();
    match id.find(CLICKABLE_MARKER) {
        Some(pos) => id[..pos].to_owned(),
        None => id.to_owned(),
    }
}

/// Read `attr` as a finite number, reporting failures against `icon` so the
/// error names the icon being exported, not the internal element.
pub(crate) fn finite_attr(el: &Element, attr: &'static str, icon: &str) -> Result<f64, IconError> {
    let err = || IconError::InvalidBoundingBox {
        icon: icon.to_owned(),
        attr,
    };
    let value = el.attr(attr).ok_or_else(err)?;
    let number: f64 = value.trim().parse().map_err(|_| err())?;
    if !number.is_finite() {
        return Err(err());
    }
    Ok(number)
}

/// Repaint a direct child of an inversion group in the background color.
fn invert_child(child: &mut Element, bg: &str) {
    if child.attr("fill").is_some_and(|fill| fill != "none") {
        paint_fill(child, bg);
    } else if child.has_attr("stroke") {
        paint_stroke(child, bg);
    }
    child.remove_attr("opacity");
}

fn repaint_tspans(el: &mut Element, fg: &str) {
    for child in el.child_elements_mut() {
        if child.name() == "tspan" {
            paint_fill(child, fg);
            tag_class(child, "fg");
        }
        repaint_tspans(child, fg);
    }
}

fn paint_fill(el: &mut Element, color: &str) {
    el.set_attr("fill", color);
    el.remove_attr("stroke");
    el.set_attr("fill-opacity", OPAQUE);
    el.remove_attr("stroke-opacity");
}

/// Stroke repaint leaves `fill` absent rather than writing `fill="none"`;
/// downstream consumers rely on the distinction, so it is preserved.
fn paint_stroke(el: &mut Element, color: &str) {
    el.set_attr("stroke", color);
    el.remove_attr("fill");
    el.set_attr("stroke-opacity", OPAQUE);
    el.set_attr("fill-opacity", TRANSPARENT);
}

/// Append a semantic class only if it is not already present.
fn tag_class(el: &mut Element, class: &str) {
    let existing = el.attr("class").unwrap_or_default();
    if existing.split_whitespace().any(|c| c == class) {
        return;
    }
    let tagged = if existing.is_empty() {
        class.to_owned()
    } else {
        format!("{existing} {class}")
    };
    el.set_attr("class", tagged);
}

/// Drop paint attributes whose literal value is the string `"undefined"`.
fn scrub_undefined(el: &mut Element) {
    for attr in SCRUBBED_ATTRS {
        if el.attr(attr) == Some("undefined") {
            el.remove_attr(attr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_document;

    fn styled(markup: &str) -> Element {
        let el = parse_document(markup).unwrap();
        style(&el, &Palette::default(), &StyleOptions::default()).unwrap()
    }

    // -- classification priority ---

    #[test]
    fn test_classify_first_match_wins() {
        let el = parse_document(r##"<text id="go-clickable" fill="#000"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::HitRegion));

        let el = parse_document(r##"<text id="label-invert" fill="#000"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::InvertGroup));

        let el = parse_document(r##"<text fill="#000" stroke="#111"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::Text));

        let el = parse_document(r##"<path stroke="#111" d="M0 0"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::UnfilledPath));

        let el = parse_document(r##"<rect fill="#000" stroke="#111"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::Filled));

        let el = parse_document(r##"<rect fill="none" stroke="#111"/>"##).unwrap();
        assert_eq!(classify(&el), Some(StyleRule::Stroked));

        let el = parse_document(r#"<rect fill="none"/>"#).unwrap();
        assert_eq!(classify(&el), None);
    }

    // -- rule 1: hit region ---

    #[test]
    fn test_hit_region_scaled_about_center() {
        // Center (35, 35) is fixed: 5 + 60/2 == 10 + 50/2.
        let out = styled(r#"<rect id="home-clickable" x="10" y="10" width="50" height="50"/>"#);
        assert_eq!(out.attr("x"), Some("5"));
        assert_eq!(out.attr("y"), Some("5"));
        assert_eq!(out.attr("width"), Some("60"));
        assert_eq!(out.attr("height"), Some("60"));
        assert_eq!(out.attr("fill"), Some(DEFAULT_BG));
        assert_eq!(out.attr("fill-opacity"), Some("1"));
        assert!(!out.has_attr("stroke"));
        assert!(!out.has_attr("stroke-opacity"));
        assert!(!out.has_attr("opacity"));
        assert_eq!(out.attr("class"), Some("bg-item"));
    }

    #[test]
    fn test_hit_region_scale_is_configurable() {
        let el =
            parse_document(r#"<rect id="a-clickable" x="0" y="0" width="10" height="10"/>"#)
                .unwrap();
        let options = StyleOptions {
            hit_region_scale: 2.0,
        };
        let out = style(&el, &Palette::default(), &options).unwrap();
        assert_eq!(out.attr("width"), Some("20"));
        assert_eq!(out.attr("x"), Some("-5"));
    }

    #[test]
    fn test_hit_region_bad_geometry_is_fatal() {
        let el = parse_document(r#"<rect id="a-clickable" x="0" y="0" width="wide"/>"#).unwrap();
        let err = style(&el, &Palette::default(), &StyleOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IconError::InvalidBoundingBox { attr: "width", .. }
        ));
    }

    #[test]
    fn test_bad_geometry_error_names_owning_icon() {
        // A hit region styled as icon content reports the icon id, not the
        // rect's own id.
        let el = parse_document(
            r#"<g><rect id="pin-clickable" x="0" y="0" width="wide" height="1"/></g>"#,
        )
        .unwrap();
        let err = style(&el, &Palette::default(), &StyleOptions::default()).unwrap_err();
        match err {
            IconError::InvalidBoundingBox { icon, attr } => {
                assert_eq!(icon, "pin");
                assert_eq!(attr, "width");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // -- rule 2: inversion group ---

    #[test]
    fn test_invert_group_repaints_children_with_background() {
        let out = styled(
            r##"<g id="moon-invert">
                 <circle fill="#123" r="4"/>
                 <path stroke="#456" d="M0 0" opacity="0.5"/>
               </g>"##,
        );
        assert_eq!(out.attr("class"), Some("bg"));

        let children: Vec<&Element> = out.child_elements().collect();
        let filled = children[0];
        assert_eq!(filled.attr("fill"), Some(DEFAULT_BG));
        assert_eq!(filled.attr("fill-opacity"), Some("1"));
        assert!(!filled.has_attr("stroke"));
        assert!(!filled.has_attr("stroke-opacity"));

        let stroked = children[1];
        assert_eq!(stroked.attr("stroke"), Some(DEFAULT_BG));
        assert_eq!(stroked.attr("stroke-opacity"), Some("1"));
        assert_eq!(stroked.attr("fill-opacity"), Some("0"));
        assert!(!stroked.has_attr("fill"));
        assert!(!stroked.has_attr("opacity"));
    }

    // -- rule 3: text ---

    #[test]
    fn test_text_and_tspans_take_foreground() {
        let out = styled(
            r##"<text stroke="#000"><tspan stroke="#000">Hi</tspan><tspan>yo</tspan></text>"##,
        );
        assert_eq!(out.attr("fill"), Some(DEFAULT_FG));
        assert!(!out.has_attr("stroke"));
        assert_eq!(out.attr("class"), Some("fg"));
        for tspan in out.child_elements() {
            assert_eq!(tspan.attr("fill"), Some(DEFAULT_FG));
            assert_eq!(tspan.attr("fill-opacity"), Some("1"));
            assert!(!tspan.has_attr("stroke"));
            assert_eq!(tspan.attr("class"), Some("fg"));
        }
    }

    // -- rules 4-6 ---

    #[test]
    fn test_path_without_fill_marked_no_fill() {
        let out = styled(r#"<path d="M0 0h4"/>"#);
        assert_eq!(out.attr("fill"), Some("none"));
        assert_eq!(out.attr("fill-opacity"), Some("0"));
        assert_eq!(out.attr("class"), Some("no-fill"));
    }

    #[test]
    fn test_filled_element_takes_foreground() {
        let out = styled(r##"<rect fill="#abc" stroke="#def" stroke-opacity="0.4"/>"##);
        assert_eq!(out.attr("fill"), Some(DEFAULT_FG));
        assert_eq!(out.attr("fill-opacity"), Some("1"));
        assert!(!out.has_attr("stroke"));
        assert!(!out.has_attr("stroke-opacity"));
        assert_eq!(out.attr("class"), Some("fg"));
    }

    #[test]
    fn test_stroked_element_keeps_fill_absent() {
        let out = styled(r##"<circle stroke="#abc" r="3"/>"##);
        assert_eq!(out.attr("stroke"), Some(DEFAULT_FG));
        assert_eq!(out.attr("stroke-opacity"), Some("1"));
        assert_eq!(out.attr("fill-opacity"), Some("0"));
        assert!(!out.has_attr("fill"));
        assert_eq!(out.attr("class"), Some("fg"));
    }

    #[test]
    fn test_unmatched_element_passes_through() {
        let el = parse_document(r#"<rect x="1" fill="none"/>"#).unwrap();
        let out = style(&el, &Palette::default(), &StyleOptions::default()).unwrap();
        assert_eq!(out, el);
    }

    // -- recursion, scrub, class handling ---

    #[test]
    fn test_group_recursion_styles_children_individually() {
        let out = styled(r##"<g><path d="M0 0"/><rect fill="#000"/></g>"##);
        let children: Vec<&Element> = out.child_elements().collect();
        assert_eq!(children[0].attr("class"), Some("no-fill"));
        assert_eq!(children[1].attr("class"), Some("fg"));
        assert!(!out.has_attr("class"));
    }

    #[test]
    fn test_undefined_paint_values_scrubbed() {
        let out = styled(r#"<rect fill="none" opacity="undefined" stroke-opacity="undefined"/>"#);
        assert!(!out.has_attr("opacity"));
        assert!(!out.has_attr("stroke-opacity"));
        assert_eq!(out.attr("fill"), Some("none"));
    }

    #[test]
    fn test_class_tagging_deduplicates() {
        let out = styled(r##"<rect class="shadow fg" fill="#000"/>"##);
        assert_eq!(out.attr("class"), Some("shadow fg"));
    }

    #[test]
    fn test_source_tree_never_mutated() {
        let el = parse_document(r##"<rect fill="#000"/>"##).unwrap();
        let before = el.clone();
        let _ = style(&el, &Palette::default(), &StyleOptions::default()).unwrap();
        assert_eq!(el, before);
    }
}
