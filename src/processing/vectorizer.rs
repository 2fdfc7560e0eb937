//! Term vectors and the interchangeable vectorization strategies
//!
//! Every strategy maps one request's corpus of term bags into vectors that
//! share a single term space, so any two of them can be compared with
//! cosine similarity. Nothing is kept between calls.

use crate::config::VectorizerStrategy;
use crate::processing::text_processor::{is_stop_word, TermBag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse vector keyed by term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>, weight: f64) {
        self.weights.insert(term.into(), weight);
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(term, &weight)| (term.as_str(), weight))
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        // Terms absent from either side contribute nothing
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(term, &weight)| large.weights.get(term).map(|&other| weight * other))
            .sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.weights.values().all(|w| w.is_finite())
    }
}

/// A strategy that turns a corpus of term bags into comparable vectors
pub trait Vectorizer {
    fn name(&self) -> &'static str;

    /// Returns one vector per input bag, in the same order
    fn vectorize(&self, corpus: &[TermBag]) -> Vec<TermVector>;
}

/// Build the vectorizer for a configured strategy
pub fn vectorizer_for(strategy: VectorizerStrategy) -> Box<dyn Vectorizer + Send + Sync> {
    match strategy {
        VectorizerStrategy::TfIdf => Box::new(TfIdfVectorizer),
        VectorizerStrategy::Count => Box::new(CountVectorizer),
    }
}

/// Each bag's raw counts are used directly as its vector
#[derive(Debug, Clone, Copy, Default)]
pub struct CountVectorizer;

impl Vectorizer for CountVectorizer {
    fn name(&self) -> &'static str {
        "count"
    }

    fn vectorize(&self, corpus: &[TermBag]) -> Vec<TermVector> {
        corpus
            .iter()
            .map(|bag| {
                let mut vector = TermVector::new();
                for (term, count) in bag.iter() {
                    vector.insert(term, f64::from(count));
                }
                vector
            })
            .collect()
    }
}

/// Distinct terms of one corpus with their document frequencies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    document_frequency: BTreeMap<String, usize>,
    documents: usize,
}

impl Vocabulary {
    /// Union of all non-stop-word terms across the corpus
    pub fn build(corpus: &[TermBag]) -> Self {
        let mut document_frequency = BTreeMap::new();
        for bag in corpus {
            for term in bag.terms().filter(|term| !is_stop_word(term)) {
                *document_frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            document_frequency,
            documents: corpus.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency: ln((1 + n) / (1 + df)) + 1
    pub fn idf(&self, term: &str) -> Option<f64> {
        let df = self.document_frequency(term);
        if df == 0 {
            return None;
        }
        let n = self.documents as f64;
        Some(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
    }
}

/// Term counts weighted by IDF over the request's own corpus
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer;

impl Vectorizer for TfIdfVectorizer {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn vectorize(&self, corpus: &[TermBag]) -> Vec<TermVector> {
        let vocabulary = Vocabulary::build(corpus);

        corpus
            .iter()
            .map(|bag| {
                let mut vector = TermVector::new();
                for (term, count) in bag.iter() {
                    if let Some(idf) = vocabulary.idf(term) {
                        vector.insert(term, f64::from(count) * idf);
                    }
                }
                vector
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(terms: &[&str]) -> TermBag {
        terms.iter().copied().collect()
    }

    #[test]
    fn test_count_vectors_mirror_bags() {
        let vectors = CountVectorizer.vectorize(&[bag(&["rust", "rust", "go"])]);

        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].weight("rust"), 2.0);
        assert_eq!(vectors[0].weight("go"), 1.0);
    }

    #[test]
    fn test_vocabulary_is_union_of_corpus_terms() {
        let corpus = vec![bag(&["rust", "backend"]), bag(&["rust", "design"]), bag(&[])];
        let vocabulary = Vocabulary::build(&corpus);

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.document_frequency("rust"), 2);
        assert_eq!(vocabulary.document_frequency("design"), 1);
        assert!(vocabulary.idf("missing").is_none());
    }

    #[test]
    fn test_idf_favours_rare_terms() {
        let corpus = vec![bag(&["rust", "backend"]), bag(&["rust"]), bag(&["rust"])];
        let vocabulary = Vocabulary::build(&corpus);

        // Term in every document keeps the floor weight of 1
        assert!((vocabulary.idf("rust").unwrap() - 1.0).abs() < 1e-12);
        let expected = (4.0f64 / 2.0).ln() + 1.0;
        assert!((vocabulary.idf("backend").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tfidf_ignores_stop_words_in_raw_bags() {
        let corpus = vec![bag(&["the", "engineer"]), bag(&["the", "engineer"])];
        let vectors = TfIdfVectorizer.vectorize(&corpus);

        assert_eq!(vectors[0].weight("the"), 0.0);
        assert_eq!(vectors[0].len(), 1);
    }

    #[test]
    fn test_dot_and_magnitude() {
        let mut a = TermVector::new();
        a.insert("x", 3.0);
        a.insert("y", 4.0);
        let mut b = TermVector::new();
        b.insert("x", 1.0);
        b.insert("z", 5.0);

        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.dot(&b), 3.0);
        assert_eq!(b.dot(&a), 3.0);
    }

    #[test]
    fn test_strategy_lookup() {
        assert_eq!(vectorizer_for(VectorizerStrategy::TfIdf).name(), "tfidf");
        assert_eq!(vectorizer_for(VectorizerStrategy::Count).name(), "count");
    }
}
