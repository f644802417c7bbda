//! Per-icon output document assembly.
//!
//! For one icon id: look up the hit region to derive the crop window, style
//! the icon's content elements, and wrap both into a standalone SVG document.

use crate::error::IconError;
use crate::style::{self, Palette, StyleOptions};
use crate::tree::Element;

/// Fixed opening of every output document; the crop window is spliced into
/// the root tag as a `viewBox` attribute.
pub const SVG_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\">";
/// Fixed closing tag of every output document.
pub const SVG_FOOTER: &str = "</svg>";

/// Identifier of the hit region associated with `icon_id`.
pub fn hit_region_id(icon_id: &str) -> String {
    format!("{icon_id}{}", style::CLICKABLE_MARKER)
}

/// Axis-aligned viewport assigned to one icon's output document.
///
/// Taken verbatim from the hit region's geometry; the cosmetic enlargement
/// the styler applies to the displayed hit-region graphic does not feed
/// back into the crop window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropWindow {
    /// Read the window from a hit-region element.
    ///
    /// All four of `x`, `y`, `width`, `height` must be present and parse as
    /// finite numbers; anything else is fatal for the run.
    pub fn from_hit_region(region: &Element, icon_id: &str) -> Result<Self, IconError> {
        Ok(Self {
            x: style::finite_attr(region, "x", icon_id)?,
            y: style::finite_attr(region, "y", icon_id)?,
            width: style::finite_attr(region, "width", icon_id)?,
            height: style::finite_attr(region, "height", icon_id)?,
        })
    }

    /// Space-separated `viewBox` value.
    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Assemble the standalone output document for one icon.
///
/// The crop window and the styled content are independent computations;
/// neither mutates shared state, so per-icon assembly is safe to fan out
/// across icons as long as the sheet stays read-only.
pub fn assemble(
    icon_id: &str,
    doc: &Element,
    palette: &Palette,
    options: &StyleOptions,
) -> Result<String, IconError> {
    let region = doc
        .find_by_id(&hit_region_id(icon_id))
        .ok_or_else(|| IconError::MissingHitRegion {
            icon: icon_id.to_owned(),
        })?;
    let window = CropWindow::from_hit_region(region, icon_id)?;

    let mut parts = Vec::new();
    if let Some(icon) = doc.find_by_id(icon_id) {
        for child in icon.child_elements() {
            let styled = style::style(child, palette, options)?;
            parts.push(styled.to_xml()?);
        }
    }

    let open = SVG_HEADER.strip_suffix('>').unwrap_or(SVG_HEADER);
    Ok(format!(
        "{open} viewBox=\"{}\">\n{}\n{SVG_FOOTER}",
        window.view_box(),
        parts.join("\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_document;

    const SHEET: &str = r##"<svg>
      <rect id="home-clickable" x="0" y="0" width="10" height="10"/>
      <g id="id-icon-collection">
        <g id="home"><path fill="#000" d="M1 1h8v8z"/></g>
      </g>
    </svg>"##;

    #[test]
    fn test_assemble_home_icon_end_to_end() {
        let doc = parse_document(SHEET).unwrap();
        let out = assemble(
            "home",
            &doc,
            &Palette::new("white", "darkgreen"),
            &StyleOptions::default(),
        )
        .unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(out.contains("viewBox=\"0 0 10 10\""));
        assert!(out.contains(r#"fill="white""#));
        assert!(out.contains(r#"class="fg""#));
        assert!(out.ends_with(SVG_FOOTER));
    }

    #[test]
    fn test_crop_window_unscaled_even_though_graphic_grows() {
        // The clickable rect inside the icon content is enlarged for
        // display, but the viewBox keeps the sheet's original numbers.
        let doc = parse_document(
            r#"<svg>
                 <g id="id-icon-collection">
                   <g id="pin">
                     <rect id="pin-clickable" x="10" y="10" width="50" height="50"/>
                   </g>
                 </g>
               </svg>"#,
        )
        .unwrap();
        let out = assemble(
            "pin",
            &doc,
            &Palette::default(),
            &StyleOptions::default(),
        )
        .unwrap();
        assert!(out.contains("viewBox=\"10 10 50 50\""));
        assert!(out.contains(r#"width="60""#));
        assert!(out.contains(r#"x="5""#));
    }

    #[test]
    fn test_missing_hit_region_names_the_icon() {
        let doc = parse_document(r#"<svg><g id="id-icon-collection"><g id="a"/></g></svg>"#)
            .unwrap();
        let err =
            assemble("a", &doc, &Palette::default(), &StyleOptions::default()).unwrap_err();
        assert!(matches!(err, IconError::MissingHitRegion { icon } if icon == "a"));
    }

    #[test]
    fn test_invalid_bounding_box_names_icon_and_attribute() {
        let doc = parse_document(
            r#"<svg><rect id="a-clickable" x="0" y="0" width="10"/><g id="a"/></svg>"#,
        )
        .unwrap();
        let err =
            assemble("a", &doc, &Palette::default(), &StyleOptions::default()).unwrap_err();
        match err {
            IconError::InvalidBoundingBox { icon, attr } => {
                assert_eq!(icon, "a");
                assert_eq!(attr, "height");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let doc = parse_document(
            r#"<svg><rect id="a-clickable" x="NaN" y="0" width="1" height="1"/></svg>"#,
        )
        .unwrap();
        let err =
            assemble("a", &doc, &Palette::default(), &StyleOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IconError::InvalidBoundingBox { attr: "x", .. }
        ));
    }
}
