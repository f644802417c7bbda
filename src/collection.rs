//! Icon enumeration over the composite sheet.

use crate::error::IconError;
use crate::tree::Element;

/// Reserved identifier of the element grouping all icon definitions.
pub const COLLECTION_ID: &str = "id-icon-collection";

/// Enumerate icon ids from the sheet's collection marker.
///
/// Every direct child of the `id-icon-collection` element that carries an
/// `id` attribute counts as one icon definition. Ids are returned in
/// document order; that order drives export and preview order downstream.
pub fn index_icons(doc: &Element) -> Result<Vec<String>, IconError> {
    let collection = doc.find_by_id(COLLECTION_ID).ok_or(IconError::NotFound)?;
    let ids: Vec<String> = collection
        .child_elements()
        .filter_map(Element::id)
        .map(str::to_owned)
        .collect();
    if ids.is_empty() {
        return Err(IconError::EmptyCollection);
    }
    Ok(ids)
}
