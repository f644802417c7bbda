//! Error types for the extraction pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by the extraction engine and the export driver.
///
/// Every variant is fatal to the run: the pipeline aborts at the first
/// failure and produces no further output documents. There is no
/// partial-success mode.
#[derive(Debug)]
pub enum IconError {
    /// The composite sheet could not be parsed into an element tree.
    Parse { message: String },
    /// The icon collection marker is absent from the sheet.
    NotFound,
    /// The collection marker exists but none of its children carry an id.
    EmptyCollection,
    /// No `{icon}-clickable` element exists for an enumerated icon.
    MissingHitRegion { icon: String },
    /// A hit region is missing one of x/y/width/height, or the value does
    /// not parse as a finite number.
    InvalidBoundingBox { icon: String, attr: &'static str },
    /// Filesystem failure while reading the sheet or writing outputs.
    Io { path: PathBuf, source: io::Error },
}

impl IconError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        IconError::Parse {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconError::Parse { message } => {
                write!(f, "failed to parse composite sheet: {message}")
            }
            IconError::NotFound => write!(
                f,
                "icon collection marker `{}` not found in sheet",
                crate::collection::COLLECTION_ID
            ),
            IconError::EmptyCollection => {
                write!(f, "icon collection has no identified children")
            }
            IconError::MissingHitRegion { icon } => {
                write!(f, "clickable area not found [icon={icon}]")
            }
            IconError::InvalidBoundingBox { icon, attr } => {
                write!(f, "hit region bounding box is not finite [icon={icon}] [attr={attr}]")
            }
            IconError::Io { path, source } => write!(f, "{source} [path={}]", path.display()),
        }
    }
}

impl std::error::Error for IconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IconError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
