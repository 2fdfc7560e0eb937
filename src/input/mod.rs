//! Input processing module
//! Handles file detection, text extraction, and document collection

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
