//! In-memory composite sheets shared across the integration suite.

/// A small but representative sheet: a plain filled icon, a text icon with
/// an inversion group, and a stroke-only icon, each with a hit region.
pub const FULL_SHEET: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <rect id="home-clickable" x="0" y="0" width="10" height="10"/>
  <rect id="label-clickable" x="20" y="0" width="40" height="20"/>
  <rect id="compass-clickable" x="10" y="10" width="50" height="50"/>
  <g id="id-icon-collection">
    <g id="home">
      <path fill="#000" d="M1 1h8v8z"/>
    </g>
    <g id="label">
      <g id="label-invert">
        <rect fill="#fff" x="21" y="1" width="38" height="18"/>
        <path stroke="#333" d="M22 2h36"/>
      </g>
      <text x="24" y="12" fill="#000"><tspan>OK</tspan></text>
    </g>
    <g id="compass">
      <circle stroke="#888" cx="35" cy="35" r="20"/>
    </g>
  </g>
</svg>"##;

/// Sheet whose first icon in document order has no hit region.
pub const SHEET_MISSING_HIT_REGION: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="second-clickable" x="0" y="0" width="5" height="5"/>
  <g id="id-icon-collection">
    <g id="first"><path fill="#000" d="M0 0h1"/></g>
    <g id="second"><path fill="#000" d="M0 0h1"/></g>
  </g>
</svg>"##;

/// Sheet with a hit region whose geometry does not parse.
pub const SHEET_BAD_BOUNDING_BOX: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <rect id="only-clickable" x="zero" y="0" width="5" height="5"/>
  <g id="id-icon-collection">
    <g id="only"><path fill="#000" d="M0 0h1"/></g>
  </g>
</svg>"##;
