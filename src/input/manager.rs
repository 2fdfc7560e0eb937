//! Input manager for locating and reading stored documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{extract_text, flatten_lines, PlainTextExtractor, TextExtractor};
use crate::processing::document::Document;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads resumes and job descriptions by path; never changes the working directory
pub struct InputManager {
    resumes_dir: PathBuf,
    jobs_dir: PathBuf,
    recursive: bool,
}

impl InputManager {
    pub fn new(resumes_dir: impl Into<PathBuf>, jobs_dir: impl Into<PathBuf>) -> Self {
        Self {
            resumes_dir: resumes_dir.into(),
            jobs_dir: jobs_dir.into(),
            recursive: true,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.paths.resumes_dir.clone(), config.paths.jobs_dir.clone())
            .with_recursion(config.paths.recursive)
    }

    pub fn with_recursion(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn resumes_dir(&self) -> &Path {
        &self.resumes_dir
    }

    pub fn jobs_dir(&self) -> &Path {
        &self.jobs_dir
    }

    /// Enumerate supported resume files under the resume root, in name order
    pub fn collect_resumes(&self) -> Result<Vec<PathBuf>> {
        if !self.resumes_dir.is_dir() {
            return Err(ScreenerError::MissingFile(format!(
                "Resume directory does not exist: {}",
                self.resumes_dir.display()
            )));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.resumes_dir)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.into_path();
            if DocumentFormat::detect(&path).is_some() {
                paths.push(path);
            } else {
                debug!("Skipping unsupported file: {}", path.display());
            }
        }

        info!("Found {} resumes in {}", paths.len(), self.resumes_dir.display());
        Ok(paths)
    }

    /// List the `.txt` job descriptions available in the jobs directory
    pub fn list_job_descriptions(&self) -> Result<Vec<String>> {
        if !self.jobs_dir.is_dir() {
            return Err(ScreenerError::MissingFile(format!(
                "Job description directory does not exist: {}",
                self.jobs_dir.display()
            )));
        }

        let mut names: Vec<String> = std::fs::read_dir(&self.jobs_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && DocumentFormat::detect(path) == Some(DocumentFormat::Text))
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .collect();

        names.sort();
        Ok(names)
    }

    /// Resolve a job description given as a path or as a filename in the jobs directory
    pub fn resolve_job_description(&self, job: &Path) -> Result<PathBuf> {
        if job.is_file() {
            return Ok(job.to_path_buf());
        }

        let candidate = self.jobs_dir.join(job);
        if !job.is_absolute() && candidate.is_file() {
            return Ok(candidate);
        }

        Err(ScreenerError::MissingFile(format!(
            "Job description file not found: {}",
            job.display()
        )))
    }

    /// Read a job description as plain text
    pub fn load_job_description(&self, job: &Path) -> Result<Document> {
        let path = self.resolve_job_description(job)?;
        info!("Reading job description: {}", path.display());

        let text = flatten_lines(&PlainTextExtractor.extract(&path)?);
        Ok(Document::new(file_name(&path), DocumentFormat::Text, text))
    }

    /// Extract every resume; failures become empty documents carrying the reason
    pub fn load_resumes(&self, paths: &[PathBuf]) -> Vec<Document> {
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            let format = match DocumentFormat::from_path(path) {
                Ok(format) => format,
                Err(e) => {
                    warn!("Skipping resume: {}", e);
                    continue;
                }
            };

            let filename = self.display_name(path);
            debug!("Extracting {} resume: {}", format, path.display());

            let document = match extract_text(path, format) {
                Ok(text) => {
                    let document = Document::new(filename, format, text);
                    debug!("{}: {} words", document.filename, document.word_count());
                    document
                }
                Err(e) => {
                    warn!("Could not read resume {}: {}", path.display(), e);
                    Document::failed(filename, format, e.to_string())
                }
            };
            documents.push(document);
        }

        documents
    }

    /// Name a resume by its path relative to the resume root, with `/` separators
    pub fn display_name(&self, path: &Path) -> String {
        match path.strip_prefix(&self.resumes_dir) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => file_name(path),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, InputManager) {
        let temp_dir = TempDir::new().unwrap();
        let resumes = temp_dir.path().join("resumes");
        let jobs = temp_dir.path().join("jobs");
        fs::create_dir_all(resumes.join("nested")).unwrap();
        fs::create_dir_all(&jobs).unwrap();

        fs::write(resumes.join("b.txt"), "Graphic designer").unwrap();
        fs::write(resumes.join("a.txt"), "Backend engineer").unwrap();
        fs::write(resumes.join("notes.md"), "ignored").unwrap();
        fs::write(resumes.join("nested").join("c.txt"), "Data scientist").unwrap();
        fs::write(jobs.join("backend.txt"), "Senior backend engineer\nRust").unwrap();
        fs::write(jobs.join("design.txt"), "Designer").unwrap();
        fs::write(jobs.join("readme.pdf"), "").unwrap();

        let manager = InputManager::new(resumes, jobs);
        (temp_dir, manager)
    }

    #[test]
    fn test_collect_resumes_skips_unsupported_and_recurses() {
        let (_temp_dir, manager) = setup();

        let paths = manager.collect_resumes().unwrap();
        let names: Vec<String> = paths.iter().map(|p| manager.display_name(p)).collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "nested/c.txt"]);
    }

    #[test]
    fn test_collect_resumes_without_recursion() {
        let (_temp_dir, manager) = setup();
        let manager = manager.with_recursion(false);

        let paths = manager.collect_resumes().unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_list_job_descriptions() {
        let (_temp_dir, manager) = setup();
        assert_eq!(
            manager.list_job_descriptions().unwrap(),
            vec!["backend.txt".to_string(), "design.txt".to_string()]
        );
    }

    #[test]
    fn test_job_description_resolved_by_filename() {
        let (_temp_dir, manager) = setup();

        let job = manager.load_job_description(Path::new("backend.txt")).unwrap();
        assert_eq!(job.filename, "backend.txt");
        assert_eq!(job.text, "Senior backend engineer Rust");
    }

    #[test]
    fn test_missing_job_description() {
        let (_temp_dir, manager) = setup();

        let result = manager.load_job_description(Path::new("nope.txt"));
        assert!(matches!(result, Err(ScreenerError::MissingFile(_))));
    }

    #[test]
    fn test_load_resumes_recovers_from_failures() {
        let (temp_dir, manager) = setup();
        let broken = temp_dir.path().join("resumes").join("broken.pdf");
        fs::write(&broken, b"").unwrap();

        let paths = vec![
            temp_dir.path().join("resumes").join("a.txt"),
            broken,
            temp_dir.path().join("resumes").join("notes.md"),
        ];
        let documents = manager.load_resumes(&paths);

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].text, "Backend engineer");
        assert!(documents[1].is_failed());
        assert!(documents[1].text.is_empty());
    }
}
