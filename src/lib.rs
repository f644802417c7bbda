//! Extract standalone, recolored icons from a composite SVG sheet.
//!
//! A sheet carries every icon of a set in one document: icon definitions
//! live under a `g` element with the reserved id `id-icon-collection`, and
//! each icon `foo` is paired with a `foo-clickable` rectangle whose
//! geometry doubles as the icon's crop window. The engine enumerates the
//! icons, reclassifies and repaints each icon's subtree against a
//! foreground/background palette, and assembles one self-contained SVG
//! document per icon.
//!
//! # Usage
//!
//! ```rust
//! use icon_sheet::{assemble, index_icons, parse_document, Palette, StyleOptions};
//!
//! # fn main() -> Result<(), icon_sheet::IconError> {
//! let sheet = r##"<svg xmlns="http://www.w3.org/2000/svg">
//!   <rect id="home-clickable" x="0" y="0" width="10" height="10"/>
//!   <g id="id-icon-collection">
//!     <g id="home"><path fill="#000" d="M1 1h8v8z"/></g>
//!   </g>
//! </svg>"##;
//!
//! let doc = parse_document(sheet)?;
//! let icons = index_icons(&doc)?;
//! let out = assemble(&icons[0], &doc, &Palette::default(), &StyleOptions::default())?;
//! assert!(out.contains("viewBox=\"0 0 10 10\""));
//! # Ok(())
//! # }
//! ```
//!
//! The [`export`] module adds the filesystem boundary: directory reset,
//! per-icon file writes, and an HTML preview gallery.

pub mod assemble;
pub mod collection;
pub mod color;
pub mod error;
pub mod export;
pub mod style;
pub mod tree;

pub use assemble::{assemble, hit_region_id, CropWindow, SVG_FOOTER, SVG_HEADER};
pub use collection::{index_icons, COLLECTION_ID};
pub use color::{is_color, to_rgba, validate_colors};
pub use error::IconError;
pub use export::{run_export, ExportConfig, OutputFormat};
pub use style::{classify, style, Palette, StyleOptions, StyleRule};
pub use tree::{parse_document, Element, Node};
