//! Trend aggregation
//!
//! Combines collected mentions, sentiment summaries and a volume-threshold
//! heuristic into one report per keyword. Keyword comparisons run strictly
//! sequentially with fixed pacing so the external APIs are never hammered.

use crate::collector::MentionCollector;
use crate::error::Result;
use crate::sentiment::SentimentAnalyzer;
use crate::types::{Mention, TrendDirection, TrendReport};
use chrono::Utc;
use std::time::Duration;

/// Combined volume above this reads as rising
const RISING_VOLUME: usize = 50;
/// Combined volume above this reads as stable
const STABLE_VOLUME: usize = 10;
/// Sources reported per keyword
const TOP_SOURCE_COUNT: usize = 5;
/// Sample mentions taken from each platform
const SAMPLES_PER_PLATFORM: usize = 3;
/// Sample mentions reported in total
const MAX_SAMPLES: usize = 6;
/// Pause between compared keywords
const COMPARE_DELAY: Duration = Duration::from_secs(2);

/// Aggregates mentions and sentiment into per-keyword trend reports
pub struct TrendAnalyzer {
    collector: MentionCollector,
    sentiment: SentimentAnalyzer,
    max_tweets_per_search: usize,
}

impl TrendAnalyzer {
    pub fn new(
        collector: MentionCollector,
        sentiment: SentimentAnalyzer,
        max_tweets_per_search: usize,
    ) -> Self {
        Self {
            collector,
            sentiment,
            max_tweets_per_search,
        }
    }

    /// Build a full trend report for one keyword
    pub async fn analyze_trend(&self, keyword: &str, timeframe: &str) -> Result<TrendReport> {
        tracing::info!(keyword, timeframe, "analyzing trend");

        let twitter_data = self
            .collector
            .fetch_social(keyword, self.max_tweets_per_search)
            .await;
        let web_data = self.collector.fetch_web(keyword, None).await;

        tracing::info!(
            keyword,
            twitter = twitter_data.len(),
            web = web_data.len(),
            "collected mentions"
        );

        let twitter_texts: Vec<&str> = twitter_data.iter().map(|m| m.text.as_str()).collect();
        let web_texts: Vec<&str> = web_data.iter().map(|m| m.text.as_str()).collect();
        let all_texts: Vec<&str> = twitter_texts
            .iter()
            .chain(web_texts.iter())
            .copied()
            .collect();

        let twitter_sentiment = self.sentiment.overall_sentiment(&twitter_texts);
        let web_sentiment = self.sentiment.overall_sentiment(&web_texts);
        let overall_sentiment = self.sentiment.overall_sentiment(&all_texts);

        let total_mentions = twitter_data.len() + web_data.len();
        let trend_direction = trend_direction(total_mentions);
        let top_sources = top_sources(twitter_data.iter().chain(web_data.iter()));

        let sample_mentions: Vec<Mention> = twitter_data
            .iter()
            .take(SAMPLES_PER_PLATFORM)
            .chain(web_data.iter().take(SAMPLES_PER_PLATFORM))
            .take(MAX_SAMPLES)
            .cloned()
            .collect();

        Ok(TrendReport {
            keyword: keyword.to_string(),
            timeframe: timeframe.to_string(),
            total_mentions,
            twitter_mentions: twitter_data.len(),
            web_mentions: web_data.len(),
            overall_sentiment,
            twitter_sentiment,
            web_sentiment,
            top_sources,
            sample_mentions,
            trend_direction,
            analysis_timestamp: Utc::now(),
        })
    }

    /// Analyze several keywords one after another
    ///
    /// Deliberately serialized with a fixed pause between keywords. A
    /// keyword that fails is logged and left out; the comparison itself
    /// never aborts. The returned pairs preserve input order.
    pub async fn compare_trends(
        &self,
        keywords: &[String],
        timeframe: &str,
    ) -> Vec<(String, TrendReport)> {
        let mut results = Vec::new();

        for keyword in keywords {
            match self.analyze_trend(keyword, timeframe).await {
                Ok(report) => results.push((keyword.clone(), report)),
                Err(e) => {
                    tracing::error!(keyword, error = %e, "analysis failed, omitting keyword");
                }
            }
            tokio::time::sleep(COMPARE_DELAY).await;
        }

        results
    }

    /// Curated trending topics per category
    pub fn trending_topics(&self, category: &str, limit: usize) -> Vec<&'static str> {
        let topics: &[&str] = match category {
            "tech" => &[
                "AI",
                "ChatGPT",
                "Tesla",
                "Apple",
                "Google",
                "Microsoft",
                "OpenAI",
                "Blockchain",
            ],
            "finance" => &[
                "Bitcoin",
                "Stock market",
                "Fed rates",
                "Inflation",
                "Tesla stock",
                "AI stocks",
            ],
            _ => &[
                "Climate change",
                "Economy",
                "Politics",
                "Sports",
                "Entertainment",
                "Health",
                "Education",
            ],
        };

        topics.iter().take(limit).copied().collect()
    }
}

/// Trend tag from combined mention volume alone
fn trend_direction(total_volume: usize) -> TrendDirection {
    if total_volume > RISING_VOLUME {
        TrendDirection::Rising
    } else if total_volume > STABLE_VOLUME {
        TrendDirection::Stable
    } else {
        TrendDirection::Falling
    }
}

/// Rank sources by mention count, first-seen order breaking ties
fn top_sources<'a>(mentions: impl Iterator<Item = &'a Mention>) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for mention in mentions {
        match counts.iter().position(|(source, _)| *source == mention.source) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((&mention.source, 1)),
        }
    }

    // Stable sort keeps first-seen order within equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_SOURCE_COUNT)
        .map(|(source, _)| source.to_string())
        .collect()
}
