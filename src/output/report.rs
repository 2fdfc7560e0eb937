//! Public result records handed to the presentation layer

use crate::processing::document::DocumentFailure;
use crate::processing::ranker::RankedCandidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// 1-based position after sorting
    pub rank: usize,
    pub filename: String,
    /// Similarity as a percentage in [0, 100], two decimals
    pub score: f64,
}

/// Outcome of one ranking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub job_description: String,
    pub strategy: String,
    pub summary_sentences: Option<usize>,
    pub generated_at: DateTime<Utc>,
    pub resumes_considered: usize,
    pub results: Vec<ScoredResult>,
    /// Resumes that could not be read or compared; they still appear in `results`
    pub failures: Vec<DocumentFailure>,
    /// Set when the whole request was aborted; `results` is then empty
    pub error: Option<String>,
}

/// Convert a cosine similarity into a percentage rounded to two decimals
pub fn to_percentage(similarity: f64) -> f64 {
    let clamped = if similarity.is_finite() { similarity.clamp(0.0, 1.0) } else { 0.0 };
    (clamped * 100.0 * 100.0).round() / 100.0
}

/// Package ranked candidates into public records, preserving rank order
pub fn assemble(ranked: Vec<RankedCandidate>) -> Vec<ScoredResult> {
    ranked
        .into_iter()
        .map(|candidate| ScoredResult {
            rank: candidate.rank,
            filename: candidate.filename,
            score: to_percentage(candidate.similarity),
        })
        .collect()
}

impl RankingReport {
    pub fn new(job_description: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            job_description: job_description.into(),
            strategy: strategy.into(),
            summary_sentences: None,
            generated_at: Utc::now(),
            resumes_considered: 0,
            results: Vec::new(),
            failures: Vec::new(),
            error: None,
        }
    }

    /// A report for a request that produced no results
    pub fn aborted(job_description: impl Into<String>, strategy: impl Into<String>, error: impl Into<String>) -> Self {
        let mut report = Self::new(job_description, strategy);
        report.error = Some(error.into());
        report
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn top(&self) -> Option<&ScoredResult> {
        self.results.first()
    }
}
