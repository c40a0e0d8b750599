//! Sentiment scoring for collected mentions
//!
//! Classifies single texts and aggregates lists into summary statistics.
//! Scores come from a lexicon polarity model; classification uses fixed
//! thresholds applied identically to single texts and averaged scores.

mod lexicon;

pub use lexicon::Lexicon;

use crate::types::{SentimentDistribution, SentimentLabel, SentimentSummary};
use once_cell::sync::Lazy;
use regex::Regex;

/// Scores above this classify as positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores below this classify as negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());

/// Sentiment of a single text
#[derive(Debug, Clone)]
pub struct SentimentResult {
    /// Polarity in [-1, 1]
    pub score: f64,
    /// Subjectivity in [0, 1]
    pub confidence: f64,
    pub label: SentimentLabel,
}

pub struct SentimentAnalyzer {
    model: Lexicon,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            model: Lexicon::new(),
        }
    }

    /// Strip URLs, @-mentions and #-tags, and collapse whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let text = URL_RE.replace_all(text, "");
        let text = MENTION_RE.replace_all(&text, "");
        let text = HASHTAG_RE.replace_all(&text, "");

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Score a single text
    ///
    /// Blank input short-circuits to a zero-valued neutral result without
    /// touching the model.
    pub fn analyze_text(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult {
                score: 0.0,
                confidence: 0.0,
                label: SentimentLabel::Neutral,
            };
        }

        let cleaned = self.clean_text(text);
        let (polarity, subjectivity) = self.model.assess(&cleaned);

        SentimentResult {
            score: polarity,
            confidence: subjectivity,
            label: classify(polarity),
        }
    }

    /// Score each text, preserving order
    pub fn analyze_batch<T: AsRef<str>>(&self, texts: &[T]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze_text(t.as_ref())).collect()
    }

    /// Aggregate sentiment over a list of texts
    ///
    /// Empty input yields a zero-valued neutral summary with no
    /// distribution, so nothing divides by zero.
    pub fn overall_sentiment<T: AsRef<str>>(&self, texts: &[T]) -> SentimentSummary {
        if texts.is_empty() {
            return SentimentSummary {
                score: 0.0,
                confidence: 0.0,
                label: SentimentLabel::Neutral,
                positive_count: 0,
                negative_count: 0,
                neutral_count: 0,
                total_count: 0,
                distribution: None,
            };
        }

        let results = self.analyze_batch(texts);
        let total = results.len();

        let positive_count = results
            .iter()
            .filter(|r| r.label == SentimentLabel::Positive)
            .count();
        let negative_count = results
            .iter()
            .filter(|r| r.label == SentimentLabel::Negative)
            .count();
        let neutral_count = results
            .iter()
            .filter(|r| r.label == SentimentLabel::Neutral)
            .count();

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / total as f64;
        let avg_confidence = results.iter().map(|r| r.confidence).sum::<f64>() / total as f64;

        SentimentSummary {
            score: round3(avg_score),
            confidence: round3(avg_confidence),
            label: classify(avg_score),
            positive_count,
            negative_count,
            neutral_count,
            total_count: total,
            distribution: Some(SentimentDistribution {
                positive: round1(positive_count as f64 / total as f64 * 100.0),
                negative: round1(negative_count as f64 / total as f64 * 100.0),
                neutral: round1(neutral_count as f64 / total as f64 * 100.0),
            }),
        }
    }

    /// Aggregate each named group independently
    pub fn compare_sentiments<'a, T: AsRef<str>>(
        &self,
        datasets: &[(&'a str, &[T])],
    ) -> Vec<(&'a str, SentimentSummary)> {
        datasets
            .iter()
            .map(|(name, texts)| (*name, self.overall_sentiment(texts)))
            .collect()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
