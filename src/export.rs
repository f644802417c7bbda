//! Batch export driver: filesystem boundary around the extraction engine.
//!
//! Reads the composite sheet, enumerates icons, assembles one output
//! document per icon in enumeration order, and writes the results plus an
//! HTML preview gallery into a freshly reset output directory. Any failure
//! aborts the whole run; icons are never exported partially.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::assemble;
use crate::collection::index_icons;
use crate::error::IconError;
use crate::style::{Palette, StyleOptions};
use crate::tree::parse_document;

/// Default composite sheet location.
pub const DEFAULT_INPUT: &str = "graphics/icons-opt.svg";
/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "out";

/// Output format for one exported icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    /// Accepted but not implemented; exporting warns and writes nothing.
    Png,
    /// Accepted but not implemented; exporting warns and writes nothing.
    Jpg,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

/// One export run's configuration.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    /// Path to the composite sheet.
    pub input: PathBuf,
    /// Output directory; removed and recreated at the start of a run.
    pub out_dir: PathBuf,
    /// Validated foreground/background pair shared by every icon.
    pub palette: Palette,
    /// Styling knobs (hit-region scale).
    pub style: StyleOptions,
    /// Formats to emit per icon.
    pub formats: Vec<OutputFormat>,
    /// Whether to generate the `index.html` preview gallery.
    pub preview: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            palette: Palette::default(),
            style: StyleOptions::default(),
            formats: vec![OutputFormat::Svg],
            preview: true,
        }
    }
}

/// Run the full pipeline and return the exported icon ids in sheet order.
pub fn run_export(config: &ExportConfig) -> Result<Vec<String>, IconError> {
    let text = fs::read_to_string(&config.input)
        .map_err(|e| IconError::io(config.input.clone(), e))?;
    let doc = parse_document(&text)?;
    let icon_ids = index_icons(&doc)?;

    reset_out_dir(&config.out_dir)?;
    log::info!("found {} icons to process", icon_ids.len());

    for icon_id in &icon_ids {
        log::info!("exporting {icon_id}");
        let document = assemble(icon_id, &doc, &config.palette, &config.style)?;
        write_outputs(config, icon_id, &document)?;
    }

    if config.preview {
        write_preview(&config.out_dir, &icon_ids)?;
    }
    Ok(icon_ids)
}

fn reset_out_dir(dir: &Path) -> Result<(), IconError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| IconError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))
}

fn write_outputs(config: &ExportConfig, icon_id: &str, document: &str) -> Result<(), IconError> {
    for format in &config.formats {
        let path = config
            .out_dir
            .join(format!("{icon_id}.{}", format.extension()));
        match format {
            OutputFormat::Svg => {
                fs::write(&path, document).map_err(|e| IconError::io(path.clone(), e))?;
            }
            OutputFormat::Png | OutputFormat::Jpg => {
                log::warn!(
                    "{} export is not implemented, skipping {icon_id}",
                    format.extension()
                );
            }
        }
    }
    Ok(())
}

const PREVIEW_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Icon Preview</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      margin: 20px;
    }
    .icon-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(150px, 1fr));
      gap: 20px;
    }
    .icon-container {
      text-align: center;
      padding: 10px;
      border: 1px solid #ddd;
      border-radius: 4px;
    }
    .icon-name {
      margin-bottom: 10px;
      font-weight: bold;
    }
    .icon-image svg {
      width: 100%;
      height: auto;
      max-width: 100px;
    }
  </style>
</head>
<body>
  <h1>Icon Preview</h1>
  <div class="icon-grid">
"#;

const PREVIEW_TAIL: &str = r#"  </div>
</body>
</html>
"#;

/// Write an `index.html` gallery wrapping the produced documents.
///
/// Reads the exported files back rather than reusing in-memory content, so
/// the preview always reflects what actually landed on disk.
fn write_preview(out_dir: &Path, icon_ids: &[String]) -> Result<(), IconError> {
    let mut html = String::from(PREVIEW_HEAD);
    for icon_id in icon_ids {
        let path = out_dir.join(format!("{icon_id}.svg"));
        let svg = fs::read_to_string(&path).map_err(|e| IconError::io(path.clone(), e))?;
        html.push_str("    <div class=\"icon-container\">\n");
        html.push_str(&format!("      <div class=\"icon-name\">{icon_id}</div>\n"));
        html.push_str(&format!("      <div class=\"icon-image\">{svg}</div>\n"));
        html.push_str("    </div>\n");
    }
    html.push_str(PREVIEW_TAIL);

    let path = out_dir.join("index.html");
    fs::write(&path, html).map_err(|e| IconError::io(path.clone(), e))?;
    log::info!("generated preview at {}", path.display());
    Ok(())
}
