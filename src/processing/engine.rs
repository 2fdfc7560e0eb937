//! Ranking pipeline: extraction, term counting, vectorization, scoring

use crate::config::{Config, VectorizerStrategy};
use crate::error::{Result, ScreenerError};
use crate::input::manager::InputManager;
use crate::output::report::{assemble, RankingReport, ScoredResult};
use crate::processing::document::{Document, DocumentFailure};
use crate::processing::ranker::Ranker;
use crate::processing::text_processor::{TermBag, TextProcessor};
use crate::processing::vectorizer::{vectorizer_for, TermVector, Vectorizer};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Stateless between requests; every call rebuilds vocabulary and vectors
pub struct ScreeningEngine {
    input: InputManager,
    processor: TextProcessor,
    vectorizer: Box<dyn Vectorizer + Send + Sync>,
    ranker: Ranker,
}

impl ScreeningEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            input: InputManager::from_config(config),
            processor: TextProcessor::new().with_summary(config.ranking.summary_sentences),
            vectorizer: vectorizer_for(config.ranking.strategy),
            ranker: Ranker::new(config.ranking.zero_score_policy),
        })
    }

    pub fn with_vectorizer(mut self, vectorizer: Box<dyn Vectorizer + Send + Sync>) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn strategy(&self) -> &'static str {
        self.vectorizer.name()
    }

    /// Rank resumes against a job description; errors yield an empty report
    pub fn rank_resumes(&self, job_path: &Path, resume_paths: &[PathBuf]) -> RankingReport {
        match self.try_rank_resumes(job_path, resume_paths) {
            Ok(report) => report,
            Err(e) => {
                error!("Ranking against {} aborted: {}", job_path.display(), e);
                self.aborted_report(job_path, &e)
            }
        }
    }

    fn aborted_report(&self, job_path: &Path, error: &ScreenerError) -> RankingReport {
        let mut report =
            RankingReport::aborted(job_path.display().to_string(), self.strategy(), error.to_string());
        report.summary_sentences = self.processor.summary_sentences();
        report
    }

    /// Rank every supported resume under the configured resume directory
    pub fn rank_directory(&self, job_path: &Path) -> RankingReport {
        match self.input.collect_resumes() {
            Ok(paths) => self.rank_resumes(job_path, &paths),
            Err(e) => {
                error!("Could not enumerate resumes: {}", e);
                self.aborted_report(job_path, &e)
            }
        }
    }

    pub fn try_rank_resumes(&self, job_path: &Path, resume_paths: &[PathBuf]) -> Result<RankingReport> {
        let job = self.input.load_job_description(job_path)?;
        let resumes = self.input.load_resumes(resume_paths);
        self.rank_documents(&job, &resumes)
    }

    /// Core ranking over already-extracted documents
    pub fn rank_documents(&self, job: &Document, resumes: &[Document]) -> Result<RankingReport> {
        let start_time = Instant::now();
        info!(
            "Ranking {} resumes against {} using {}",
            resumes.len(),
            job.filename,
            self.strategy()
        );

        let job_bag = self.processor.term_bag(&job.text);
        if job_bag.is_empty() {
            return Err(ScreenerError::EmptyQuery(job.filename.clone()));
        }

        let mut corpus: Vec<TermBag> = Vec::with_capacity(resumes.len() + 1);
        corpus.push(job_bag);
        for resume in resumes {
            let bag = self.processor.term_bag(&resume.text);
            debug!("{}: {} terms, {} distinct", resume.filename, bag.total(), bag.len());
            corpus.push(bag);
        }

        let mut vectors = self.vectorizer.vectorize(&corpus).into_iter();
        let query = vectors
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ScreenerError::EmptyQuery(job.filename.clone()))?;

        let resume_vectors: Vec<(String, TermVector)> = resumes
            .iter()
            .map(|resume| {
                let vector = vectors.next().unwrap_or_default();
                (resume.filename.clone(), vector)
            })
            .collect();

        let scored = self.ranker.score(&query, &resume_vectors);

        let mut failures: Vec<DocumentFailure> = resumes.iter().filter_map(Document::as_failure).collect();
        for candidate in &scored {
            if let Some(reason) = &candidate.failure {
                warn!("Resume {} scored at the bottom: {}", candidate.filename, reason);
                failures.push(DocumentFailure {
                    filename: candidate.filename.clone(),
                    reason: reason.clone(),
                });
            }
        }

        let results = assemble(self.ranker.rank(scored));
        info!(
            "Ranked {} of {} resumes in {}ms",
            results.len(),
            resumes.len(),
            start_time.elapsed().as_millis()
        );

        let mut report = RankingReport::new(job.filename.clone(), self.strategy());
        report.summary_sentences = self.processor.summary_sentences();
        report.resumes_considered = resumes.len();
        report.results = results;
        report.failures = failures;
        Ok(report)
    }
}

/// Rank the same resumes against several job descriptions, one blocking task each
pub async fn rank_each_job(
    engine: Arc<ScreeningEngine>,
    jobs: Vec<PathBuf>,
    resume_paths: Vec<PathBuf>,
) -> Result<Vec<RankingReport>> {
    let resume_paths = Arc::new(resume_paths);
    let mut handles = Vec::with_capacity(jobs.len());

    for job in jobs {
        let engine = Arc::clone(&engine);
        let resume_paths = Arc::clone(&resume_paths);
        handles.push(tokio::task::spawn_blocking(move || {
            engine.rank_resumes(&job, &resume_paths)
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await?);
    }
    Ok(reports)
}

/// Rank resumes with the default configuration and return only the ordered records
pub fn rank_resumes(job_path: &Path, resume_paths: &[PathBuf]) -> Vec<ScoredResult> {
    rank_resumes_with(&Config::default(), job_path, resume_paths)
}

pub fn rank_resumes_with(config: &Config, job_path: &Path, resume_paths: &[PathBuf]) -> Vec<ScoredResult> {
    match ScreeningEngine::new(config) {
        Ok(engine) => engine.rank_resumes(job_path, resume_paths).results,
        Err(e) => {
            error!("Invalid ranking configuration: {}", e);
            Vec::new()
        }
    }
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        let config = Config::default();
        Self {
            input: InputManager::from_config(&config),
            processor: TextProcessor::new(),
            vectorizer: vectorizer_for(VectorizerStrategy::TfIdf),
            ranker: Ranker::new(config.ranking.zero_score_policy),
        }
    }
}
