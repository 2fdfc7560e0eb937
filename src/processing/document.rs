//! Document structures shared by the ranking pipeline

use crate::input::file_detector::DocumentFormat;
use serde::{Deserialize, Serialize};

/// A stored file after text extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub format: DocumentFormat,
    pub text: String,
    /// Set when extraction failed and `text` is empty as a result
    pub failure: Option<String>,
}

/// A document that could not be read or scored cleanly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub filename: String,
    pub reason: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, format: DocumentFormat, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            format,
            text: text.into(),
            failure: None,
        }
    }

    /// An empty document standing in for one whose extraction failed
    pub fn failed(filename: impl Into<String>, format: DocumentFormat, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            format,
            text: String::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn as_failure(&self) -> Option<DocumentFailure> {
        self.failure.as_ref().map(|reason| DocumentFailure {
            filename: self.filename.clone(),
            reason: reason.clone(),
        })
    }
}
