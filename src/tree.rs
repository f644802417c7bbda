//! Owned element tree over the composite sheet.
//!
//! The engine consumes and produces an abstract tree rather than raw markup:
//! elements with a tag name, an ordered attribute list, and ordered children.
//! Parsing and serialization go through `quick-xml`'s streaming reader and
//! writer; attribute order is preserved on round-trip so diffs against the
//! source sheet stay readable.

use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::IconError;

/// A child of an [`Element`]: either a nested element or character data.
///
/// Text is stored in serialized (escaped) form so it can be written back
/// verbatim without re-escaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One element of the composite sheet.
///
/// Attribute values are stored unescaped; escaping is applied when the
/// element is serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present, regardless of its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }

    /// Set an attribute, replacing an existing one in place so that
    /// attribute order stays stable.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    /// Ordered attribute list.
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Ordered child list, elements and text interleaved.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append character data, escaping it for serialization.
    pub fn push_text(&mut self, text: &str) {
        self.children.push(Node::Text(escape(text).into_owned()));
    }

    /// Direct element children, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Mutable direct element children, in document order.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Depth-first search (self included) for the first element whose `id`
    /// attribute equals `id`, in document order.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    /// Serialize this element (and its subtree) to markup text.
    pub fn to_xml(&self) -> Result<String, IconError> {
        let mut writer = Writer::new(Vec::with_capacity(256));
        write_element(self, &mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| IconError::parse(format!("serialized element is not UTF-8: {e}")))
    }
}

fn write_element(el: &Element, writer: &mut Writer<Vec<u8>>) -> Result<(), IconError> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| IconError::parse(format!("write failed: {e}")));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| IconError::parse(format!("write failed: {e}")))?;
    for child in &el.children {
        match child {
            Node::Element(nested) => write_element(nested, writer)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::from_escaped(text.as_str())))
                .map_err(|e| IconError::parse(format!("write failed: {e}")))?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name.as_str())))
        .map_err(|e| IconError::parse(format!("write failed: {e}")))
}

/// An open element plus any whitespace-only text run seen since its last
/// child. The run is kept only if real character data (or an entity
/// reference) follows before the next element boundary, so indentation
/// between elements is dropped while spacing inside mixed content survives.
struct Frame {
    el: Element,
    pending_ws: String,
}

/// Parse raw sheet text into an element tree rooted at the document element.
///
/// Processing instructions, comments, and the doctype are dropped.
/// Entity references in character data are kept in their `&name;` form.
pub fn parse_document(text: &str) -> Result<Element, IconError> {
    let mut reader = Reader::from_reader(text.as_bytes());

    let mut buf = Vec::with_capacity(64);
    let mut stack: Vec<Frame> = Vec::with_capacity(8);
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let el = element_from_start(&reader, &e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.pending_ws.clear();
                }
                stack.push(Frame {
                    el,
                    pending_ws: String::new(),
                });
            }
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&reader, &e)?;
                attach(&mut stack, &mut root, el);
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    return Err(IconError::parse("unbalanced closing tag"));
                };
                attach(&mut stack, &mut root, frame.el);
            }
            Ok(Event::Text(t)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = reader
                        .decoder()
                        .decode(t.as_ref())
                        .map_err(|e| IconError::parse(format!("bad text encoding: {e}")))?;
                    if raw.trim().is_empty() {
                        parent.pending_ws.push_str(raw.as_ref());
                    } else {
                        flush_ws(parent);
                        parent.el.children.push(Node::Text(raw.into_owned()));
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(parent) = stack.last_mut() {
                    let name = reader
                        .decoder()
                        .decode(e.as_ref())
                        .map_err(|e| IconError::parse(format!("bad reference encoding: {e}")))?;
                    flush_ws(parent);
                    parent.el.children.push(Node::Text(format!("&{name};")));
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = reader
                        .decoder()
                        .decode(t.as_ref())
                        .map_err(|e| IconError::parse(format!("bad text encoding: {e}")))?;
                    flush_ws(parent);
                    parent
                        .el
                        .children
                        .push(Node::Text(escape(raw.as_ref()).into_owned()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(IconError::parse(format!("{e}"))),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(IconError::parse("unclosed element at end of document"));
    }
    root.ok_or_else(|| IconError::parse("document has no root element"))
}

fn flush_ws(frame: &mut Frame) {
    if !frame.pending_ws.is_empty() {
        let ws = std::mem::take(&mut frame.pending_ws);
        frame.el.children.push(Node::Text(ws));
    }
}

fn attach(stack: &mut Vec<Frame>, root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => {
            parent.pending_ws.clear();
            parent.el.children.push(Node::Element(el));
        }
        // First completed top-level element becomes the document root.
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

fn element_from_start<R>(reader: &Reader<R>, e: &BytesStart<'_>) -> Result<Element, IconError> {
    let name = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|err| IconError::parse(format!("bad tag name encoding: {err}")))?
        .into_owned();
    let mut el = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| IconError::parse(format!("bad attribute: {err}")))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|err| IconError::parse(format!("bad attribute encoding: {err}")))?
            .into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|err| IconError::parse(format!("bad attribute value: {err}")))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}
