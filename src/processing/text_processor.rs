//! Text normalization, tokenization, and term counting

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
        "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him",
        "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its",
        "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who",
        "whom", "this", "that", "that'll", "these", "those", "am", "is", "are", "was",
        "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did",
        "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
        "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should",
        "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't",
        "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
        "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
        "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
        "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't", "english",
    ]
    .into_iter()
    .collect()
});

/// Returns true for common English function words and contractions
pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(term)
}

/// Per-document multiset of normalized terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBag {
    counts: BTreeMap<String, u32>,
}

impl TermBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, term: impl Into<String>) {
        *self.counts.entry(term.into()).or_insert(0) += 1;
    }

    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of term occurrences
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }
}

impl<S: Into<String>> FromIterator<S> for TermBag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut bag = TermBag::new();
        for term in iter {
            bag.add(term);
        }
        bag
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextProcessor {
    /// Keep only this many leading sentences before tokenizing
    summary_sentences: Option<usize>,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, max_sentences: Option<usize>) -> Self {
        self.summary_sentences = max_sentences;
        self
    }

    pub fn summary_sentences(&self) -> Option<usize> {
        self.summary_sentences
    }

    /// Lowercase and split into word tokens, dropping stop words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        WORD_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    /// Count the surviving terms of a document, summarizing first if configured
    pub fn term_bag(&self, text: &str) -> TermBag {
        match self.summary_sentences {
            Some(max_sentences) => self.tokenize(&summarize(text, max_sentences)).into_iter().collect(),
            None => self.tokenize(text).into_iter().collect(),
        }
    }
}

/// Keep the first `max_sentences` sentences, splitting naively on ". "
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let flattened = text.replace('\n', " ");
    flattened
        .split(". ")
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust programming: the language is AWESOME, isn't it?");

        assert_eq!(tokens, vec!["rust", "programming", "language", "awesome"]);
    }

    #[test]
    fn test_underscores_and_digits_stay_in_tokens() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("snake_case C99 k8s");

        assert_eq!(tokens, vec!["snake_case", "c99", "k8s"]);
    }

    #[test]
    fn test_term_bag_counts() {
        let processor = TextProcessor::new();
        let bag = processor.term_bag("Rust rust RUST and Go");

        assert_eq!(bag.count("rust"), 3);
        assert_eq!(bag.count("go"), 1);
        assert_eq!(bag.count("and"), 0);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.total(), 4);
    }

    #[test]
    fn test_empty_and_stop_word_only_text() {
        let processor = TextProcessor::new();

        assert!(processor.term_bag("").is_empty());
        assert!(processor.term_bag("the a an is").is_empty());
    }

    #[test]
    fn test_language_name_is_a_stop_word() {
        let processor = TextProcessor::new();

        assert!(is_stop_word("english"));
        assert_eq!(processor.tokenize("Fluent English speaker"), vec!["fluent", "speaker"]);
    }

    #[test]
    fn test_summarize_keeps_leading_sentences() {
        let text = "Senior engineer. Rust and Go. Kubernetes experience. Remote friendly";

        assert_eq!(summarize(text, 2), "Senior engineer. Rust and Go");
        assert_eq!(summarize(text, 10), text);
    }

    #[test]
    fn test_summary_bounds_term_bag() {
        let processor = TextProcessor::new().with_summary(Some(1));
        let bag = processor.term_bag("Backend engineer. Photoshop expert");

        assert_eq!(bag.count("backend"), 1);
        assert_eq!(bag.count("photoshop"), 0);
    }
}
