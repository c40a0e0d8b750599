//! Core data model for trend aggregation
//!
//! Everything here is plain data: mentions collected from the platforms,
//! sentiment summaries derived from them, and the per-keyword trend report.
//! Reports are built fresh for every analysis and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a mention was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Web,
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Web => "web",
            Platform::Unknown => "unknown",
        }
    }

    /// Title-case name for report rendering
    pub fn title(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Web => "Web",
            Platform::Unknown => "Unknown",
        }
    }
}

/// A single normalized unit of text collected for a keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    /// Raw text of the mention
    pub text: String,
    /// Source identifier ("twitter" or the scraped URL)
    pub source: String,
    /// Canonical link to the mention, when one exists
    pub url: Option<String>,
    /// When the mention was published (social) or fetched (web)
    pub timestamp: Option<DateTime<Utc>>,
    /// Likes + reposts for social mentions; absent for web
    pub engagement: Option<u64>,
    pub platform: Platform,
}

/// Coarse three-way classification of a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

/// Per-label percentage distribution of a scored text set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Aggregated sentiment over a set of texts
///
/// `score` and `confidence` are unweighted means rounded to 3 decimals.
/// `distribution` is absent when the input set was empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean polarity in [-1, 1]
    pub score: f64,
    /// Mean subjectivity in [0, 1]
    pub confidence: f64,
    pub label: SentimentLabel,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<SentimentDistribution>,
}

/// Volume-threshold trend tag (not a temporal derivative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Stable,
    Falling,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Stable => "stable",
            TrendDirection::Falling => "falling",
        }
    }
}

/// Full analysis result for one keyword
///
/// Invariant: `total_mentions == twitter_mentions + web_mentions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub keyword: String,
    pub timeframe: String,
    pub total_mentions: usize,
    pub twitter_mentions: usize,
    pub web_mentions: usize,
    pub overall_sentiment: SentimentSummary,
    pub twitter_sentiment: SentimentSummary,
    pub web_sentiment: SentimentSummary,
    /// Top source identifiers by mention count, at most 5
    pub top_sources: Vec<String>,
    /// First few mentions per platform, at most 6 total
    pub sample_mentions: Vec<Mention>,
    pub trend_direction: TrendDirection,
    pub analysis_timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serialization() {
        assert_eq!(serde_json::to_string(&Platform::Twitter).unwrap(), "\"twitter\"");
        assert_eq!(serde_json::to_string(&Platform::Web).unwrap(), "\"web\"");
        assert_eq!(serde_json::to_string(&Platform::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&SentimentLabel::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&SentimentLabel::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn test_trend_direction_serialization() {
        assert_eq!(serde_json::to_string(&TrendDirection::Rising).unwrap(), "\"rising\"");
        assert_eq!(serde_json::to_string(&TrendDirection::Falling).unwrap(), "\"falling\"");
    }

    #[test]
    fn test_platform_titles() {
        assert_eq!(Platform::Twitter.title(), "Twitter");
        assert_eq!(Platform::Web.title(), "Web");
    }
}
