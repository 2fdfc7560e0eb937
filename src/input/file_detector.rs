//! File type detection

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Text),
            _ => None,
        }
    }

    /// Infer the format of a file from its extension, if supported
    pub fn detect(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Like `detect`, but an unsupported extension is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::detect(path).ok_or_else(|| {
            ScreenerError::UnsupportedFormat(format!(
                "{} (supported: {})",
                path.display(),
                Self::supported_extensions().join(", ")
            ))
        })
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &["pdf", "docx", "txt"]
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Text => write!(f, "txt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_supported_formats_case_insensitively() {
        assert_eq!(DocumentFormat::detect(Path::new("cv.PDF")), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::detect(Path::new("a/b/cv.docx")), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::detect(Path::new("cv.txt")), Some(DocumentFormat::Text));
    }

    #[test]
    fn test_rejects_unsupported_formats() {
        assert_eq!(DocumentFormat::detect(Path::new("cv.doc")), None);
        assert_eq!(DocumentFormat::detect(Path::new("cv.md")), None);
        assert_eq!(DocumentFormat::detect(Path::new("README")), None);
    }

    #[test]
    fn test_from_path_names_supported_extensions() {
        assert_eq!(DocumentFormat::from_path(Path::new("cv.docx")).unwrap(), DocumentFormat::Docx);

        let err = DocumentFormat::from_path(Path::new("cv.doc")).unwrap_err();
        assert!(matches!(err, ScreenerError::UnsupportedFormat(_)));
        assert_eq!(err.to_string(), "File format not supported: cv.doc (supported: pdf, docx, txt)");
    }
}
