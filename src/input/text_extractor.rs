//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentFormat;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Extract text with the extractor matching `format`, flattened onto one line
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => PdfExtractor.extract(path)?,
        DocumentFormat::Docx => DocxExtractor.extract(path)?,
        DocumentFormat::Text => PlainTextExtractor.extract(path)?,
    };
    Ok(flatten_lines(&text))
}

/// Replace line breaks with spaces so the tokenizer sees a single line
pub fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(ScreenerError::PdfExtraction(format!(
                "'{}' is an empty file",
                path.display()
            )));
        }

        // pdf-extract panics on some malformed documents
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .map_err(|_| {
                ScreenerError::PdfExtraction(format!("PDF parser aborted on '{}'", path.display()))
            })?
            .map_err(|e| {
                ScreenerError::PdfExtraction(format!(
                    "Failed to extract text from PDF '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let text = pages
            .iter()
            .map(|page| page.trim())
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")?
            .read_to_string(&mut xml)?;

        self.paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    /// Collect the text of each `w:p` paragraph in a WordprocessingML body
    pub fn paragraphs(&self, xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ScreenerError::DocxExtraction(format!("Malformed document.xml: {}", e)))?;

            match event {
                Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:tab" => current.push('\t'),
                    b"w:br" | b"w:cr" => current.push('\n'),
                    _ => {}
                },
                Event::Text(e) if in_text_run => {
                    let text = e
                        .unescape()
                        .map_err(|e| ScreenerError::DocxExtraction(e.to_string()))?;
                    current.push_str(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }
        Ok(paragraphs)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        // Undecodable byte sequences are dropped
        let mut content = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            content.push_str(chunk.valid());
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_drops_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        fs::write(&path, b"caf\xffe rust\ndeveloper").unwrap();

        let text = extract_text(&path, DocumentFormat::Text).unwrap();
        assert_eq!(text, "cafe rust developer");
    }

    #[test]
    fn test_flatten_lines() {
        assert_eq!(flatten_lines("a\r\nb\nc\rd"), "a b c d");
    }

    #[test]
    fn test_empty_pdf_is_an_extraction_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        fs::write(&path, b"").unwrap();

        let result = extract_text(&path, DocumentFormat::Pdf);
        assert!(matches!(result, Err(ScreenerError::PdfExtraction(_))));
    }

    #[test]
    fn test_garbage_pdf_is_an_error_not_a_panic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.pdf");
        fs::write(&path, b"definitely not a pdf document").unwrap();

        assert!(extract_text(&path, DocumentFormat::Pdf).is_err());
    }

    #[test]
    fn test_docx_paragraphs() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Backend engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Rust </w:t></w:r><w:r><w:tab/><w:t>&amp; Go</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let paragraphs = DocxExtractor.paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Backend engineer".to_string(), "Rust \t& Go".to_string()]);
    }

    #[test]
    fn test_docx_that_is_not_a_zip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.docx");
        fs::write(&path, b"plain bytes").unwrap();

        let result = extract_text(&path, DocumentFormat::Docx);
        assert!(matches!(result, Err(ScreenerError::DocxExtraction(_))));
    }
}
