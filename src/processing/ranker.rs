//! Cosine similarity scoring and rank assignment

use crate::config::ZeroScorePolicy;
use crate::error::ScreenerError;
use crate::processing::vectorizer::TermVector;
use log::warn;

/// Score given to a resume whose vector could not be compared
pub const FAILED_SIMILARITY: f64 = -1.0;

/// Cosine similarity; zero when either vector has no magnitude
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let magnitude = a.magnitude() * b.magnitude();
    if magnitude == 0.0 {
        return 0.0;
    }
    a.dot(b) / magnitude
}

/// A resume scored against the job description, before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub filename: String,
    pub similarity: f64,
    /// Why the similarity could not be computed, if it could not
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub rank: usize,
    pub filename: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    policy: ZeroScorePolicy,
}

impl Ranker {
    pub fn new(policy: ZeroScorePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ZeroScorePolicy {
        self.policy
    }

    /// Score every resume vector against the query, in input order
    pub fn score(&self, query: &TermVector, resumes: &[(String, TermVector)]) -> Vec<ScoredCandidate> {
        resumes
            .iter()
            .map(|(filename, vector)| {
                let similarity = cosine_similarity(query, vector);
                if similarity.is_finite() && vector.is_finite() {
                    ScoredCandidate {
                        filename: filename.clone(),
                        similarity,
                        failure: None,
                    }
                } else {
                    let reason = ScreenerError::Vectorization(format!(
                        "similarity for {} is not a finite number",
                        filename
                    ));
                    warn!("{}", reason);
                    ScoredCandidate {
                        filename: filename.clone(),
                        similarity: FAILED_SIMILARITY,
                        failure: Some(reason.to_string()),
                    }
                }
            })
            .collect()
    }

    /// Sort by descending similarity, keeping input order for ties, then number from 1
    pub fn rank(&self, mut candidates: Vec<ScoredCandidate>) -> Vec<RankedCandidate> {
        candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        candidates
            .into_iter()
            .filter(|c| match self.policy {
                ZeroScorePolicy::Keep => true,
                ZeroScorePolicy::Drop => c.similarity > 0.0,
            })
            .enumerate()
            .map(|(idx, c)| RankedCandidate {
                rank: idx + 1,
                filename: c.filename,
                similarity: c.similarity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> TermVector {
        let mut v = TermVector::new();
        for (term, weight) in entries {
            v.insert(*term, *weight);
        }
        v
    }

    fn candidate(filename: &str, similarity: f64) -> ScoredCandidate {
        ScoredCandidate {
            filename: filename.to_string(),
            similarity,
            failure: None,
        }
    }

    #[test]
    fn test_identical_vectors_have_similarity_one() {
        let v = vector(&[("rust", 2.0), ("backend", 1.0)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_vectors_have_similarity_zero() {
        let a = vector(&[("rust", 1.0)]);
        let b = vector(&[("photoshop", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_magnitude_is_zero_not_nan() {
        let a = vector(&[("rust", 1.0)]);
        let empty = TermVector::new();
        assert_eq!(cosine_similarity(&a, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = vector(&[("rust", 3.0), ("go", 1.0), ("sql", 2.0)]);
        let b = vector(&[("rust", 1.0), ("sql", 5.0)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_non_finite_vector_gets_lowest_score() {
        let query = vector(&[("rust", 1.0)]);
        let resumes = vec![
            ("ok.txt".to_string(), vector(&[("rust", 1.0)])),
            ("bad.txt".to_string(), vector(&[("rust", f64::INFINITY)])),
        ];

        let scored = Ranker::new(ZeroScorePolicy::Keep).score(&query, &resumes);
        assert!(scored[0].failure.is_none());
        assert_eq!(scored[1].similarity, FAILED_SIMILARITY);
        assert_eq!(
            scored[1].failure.as_deref(),
            Some("Vectorization error: similarity for bad.txt is not a finite number")
        );
    }

    #[test]
    fn test_rank_is_descending_dense_and_stable() {
        let ranked = Ranker::new(ZeroScorePolicy::Keep).rank(vec![
            candidate("a", 0.2),
            candidate("b", 0.9),
            candidate("c", 0.2),
            candidate("d", 0.0),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.filename.as_str()).collect();
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_drop_policy_removes_non_positive_scores_before_ranking() {
        let ranked = Ranker::new(ZeroScorePolicy::Drop).rank(vec![
            candidate("zero", 0.0),
            candidate("good", 0.5),
            candidate("failed", FAILED_SIMILARITY),
            candidate("fair", 0.1),
        ]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].filename, "good");
        assert_eq!(ranked[1].rank, 2);
    }
}
