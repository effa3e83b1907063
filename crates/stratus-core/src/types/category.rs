//! Content-type categories and the listing filter derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Content types classified as `document`.
pub const DOCUMENT_CONTENT_TYPES: [&str; 5] = [
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// The category assigned to a stored file based on its content type.
///
/// Classification is pure and total; every content-type string maps to
/// exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Any `image/*` content type.
    Image,
    /// Exactly `application/pdf`.
    Pdf,
    /// Office and plain-text document types.
    Document,
    /// Everything else.
    Other,
}

impl FileCategory {
    /// Classify a content-type string. Rules are checked in order and the
    /// first match wins: `image/` prefix (ASCII case-insensitive), then the
    /// exact PDF type, then the document allow-list, else [`Self::Other`].
    pub fn of(content_type: &str) -> Self {
        if content_type
            .get(..6)
            .is_some_and(|p| p.eq_ignore_ascii_case("image/"))
        {
            return Self::Image;
        }
        if content_type == "application/pdf" {
            return Self::Pdf;
        }
        if DOCUMENT_CONTENT_TYPES.contains(&content_type) {
            return Self::Document;
        }
        Self::Other
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
            Self::Document => write!(f, "document"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Filter value accepted by listing and search operations.
///
/// `All` is the wildcard: it matches every file but is never the result of
/// classifying a content type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFilter {
    /// Match every file.
    #[default]
    All,
    /// Match files classified as [`FileCategory::Image`].
    Image,
    /// Match files classified as [`FileCategory::Pdf`].
    Pdf,
    /// Match files classified as [`FileCategory::Document`].
    Document,
    /// Match files classified as [`FileCategory::Other`].
    Other,
}

impl FileFilter {
    /// The category this filter selects, or `None` for the wildcard.
    pub fn category(&self) -> Option<FileCategory> {
        match self {
            Self::All => None,
            Self::Image => Some(FileCategory::Image),
            Self::Pdf => Some(FileCategory::Pdf),
            Self::Document => Some(FileCategory::Document),
            Self::Other => Some(FileCategory::Other),
        }
    }

    /// Whether this is the match-everything filter.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a file with the given content type passes this filter.
    pub fn matches(&self, content_type: &str) -> bool {
        match self.category() {
            None => true,
            Some(category) => FileCategory::of(content_type) == category,
        }
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            None => write!(f, "all"),
            Some(category) => category.fmt(f),
        }
    }
}

impl FromStr for FileFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "image" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            "document" => Ok(Self::Document),
            "other" => Ok(Self::Other),
            _ => Err(AppError::validation(format!("Unknown file filter: {s}"))),
        }
    }
}
