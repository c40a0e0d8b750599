//! Mention collection from social search and web scraping
//!
//! Two independent fetch paths, never interleaved: a paginated recent
//! search against the social API and a sequential scrape-and-filter pass
//! over directory sources. Both degrade to empty results when their
//! credential is missing and keep partial results on provider errors.

pub mod scrape;
pub mod twitter;

#[cfg(test)]
mod tests;

pub use scrape::{FirecrawlClient, PageScraper};
pub use twitter::{SocialApi, TwitterSearch};

use crate::config::Config;
use crate::error::Result;
use crate::sources;
use crate::types::{Mention, Platform};
use chrono::{DateTime, Utc};
use std::time::Duration;
use twitter::Tweet;

/// Per-page ceiling imposed by the search API
const MAX_PAGE_SIZE: usize = 100;
/// Smallest page the search API accepts
const MIN_PAGE_SIZE: usize = 10;
/// Directory sources scraped when no explicit list is given
const DEFAULT_SOURCE_COUNT: usize = 5;
/// Mentions kept per scraped source
const SENTENCES_PER_SOURCE: usize = 3;
/// Matching sentences extracted per page before trimming
const MAX_KEYWORD_SENTENCES: usize = 5;
/// Politeness pause after every scrape request
const PER_SOURCE_DELAY: Duration = Duration::from_secs(1);

/// Fetches raw mentions for a keyword from both platforms
pub struct MentionCollector {
    social: Option<Box<dyn SocialApi>>,
    scraper: Option<Box<dyn PageScraper>>,
}

impl MentionCollector {
    /// Build clients for whichever credentials are configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let social: Option<Box<dyn SocialApi>> = match &config.twitter.bearer_token {
            Some(token) => Some(Box::new(TwitterSearch::new(token.clone())?)),
            None => None,
        };
        let scraper: Option<Box<dyn PageScraper>> = match &config.firecrawl.api_key {
            Some(key) => Some(Box::new(FirecrawlClient::new(key.clone())?)),
            None => None,
        };

        Ok(Self { social, scraper })
    }

    pub fn with_clients(
        social: Option<Box<dyn SocialApi>>,
        scraper: Option<Box<dyn PageScraper>>,
    ) -> Self {
        Self { social, scraper }
    }

    /// Collect recent English-language posts mentioning the keyword
    ///
    /// Pages through the recent-search API until `max_results` mentions are
    /// collected or results run out. A failed page logs and returns what
    /// was collected so far.
    pub async fn fetch_social(&self, keyword: &str, max_results: usize) -> Vec<Mention> {
        let Some(social) = &self.social else {
            tracing::warn!("twitter client not configured, skipping social fetch");
            return Vec::new();
        };

        let query = format!("{keyword} -is:retweet lang:en");
        let mut mentions: Vec<Mention> = Vec::new();
        let mut next_token: Option<String> = None;

        while mentions.len() < max_results {
            let page_size = (max_results - mentions.len()).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

            match social.search_page(&query, page_size, next_token.take()).await {
                Ok(page) => {
                    for tweet in page.tweets {
                        if mentions.len() >= max_results {
                            break;
                        }
                        mentions.push(tweet_to_mention(tweet));
                    }
                    match page.next_token {
                        Some(token) => next_token = Some(token),
                        None => break,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        keyword,
                        collected = mentions.len(),
                        error = %e,
                        "social search failed, keeping partial results"
                    );
                    break;
                }
            }
        }

        mentions
    }

    /// Scrape directory sources and keep sentences mentioning the keyword
    ///
    /// Sources default to the top directory picks for the keyword. Each
    /// source is scraped sequentially with a fixed pause after every
    /// request; a failed source is logged and skipped.
    pub async fn fetch_web(&self, keyword: &str, sources: Option<&[&str]>) -> Vec<Mention> {
        let Some(scraper) = &self.scraper else {
            tracing::warn!("firecrawl client not configured, skipping web fetch");
            return Vec::new();
        };

        let source_urls: Vec<&str> = match sources {
            Some(list) => list.to_vec(),
            None => sources::for_keyword(keyword)
                .into_iter()
                .take(DEFAULT_SOURCE_COUNT)
                .collect(),
        };

        let keyword_lower = keyword.to_lowercase();
        let mut mentions = Vec::new();

        for source_url in source_urls {
            match scraper.scrape_markdown(source_url).await {
                Ok(Some(content)) => {
                    if content.to_lowercase().contains(&keyword_lower) {
                        let fetched_at = Utc::now();
                        for sentence in keyword_sentences(&content, keyword, MAX_KEYWORD_SENTENCES)
                            .into_iter()
                            .take(SENTENCES_PER_SOURCE)
                        {
                            mentions.push(Mention {
                                text: sentence,
                                source: source_url.to_string(),
                                url: Some(source_url.to_string()),
                                timestamp: Some(fetched_at),
                                engagement: None,
                                platform: Platform::Web,
                            });
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(source = source_url, error = %e, "scrape failed, skipping source");
                }
            }

            tokio::time::sleep(PER_SOURCE_DELAY).await;
        }

        mentions
    }
}

fn tweet_to_mention(tweet: Tweet) -> Mention {
    let engagement = tweet
        .public_metrics
        .map(|m| m.like_count + m.retweet_count)
        .unwrap_or(0);
    let timestamp = tweet
        .created_at
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc));

    Mention {
        url: Some(format!("https://twitter.com/i/status/{}", tweet.id)),
        text: tweet.text,
        source: "twitter".to_string(),
        timestamp,
        engagement: Some(engagement),
        platform: Platform::Twitter,
    }
}

/// Extract sentences that mention the keyword and carry enough text
///
/// Newlines are flattened first, then the content splits on sentence
/// boundaries. Kept sentences get their trailing period back.
fn keyword_sentences(content: &str, keyword: &str, max_sentences: usize) -> Vec<String> {
    let flattened = content.replace('\n', " ");
    let keyword_lower = keyword.to_lowercase();
    let mut sentences = Vec::new();

    for part in flattened.split(". ") {
        let part = part.trim();
        if part.chars().count() > 20 && part.to_lowercase().contains(&keyword_lower) {
            let mut sentence = part.to_string();
            if !sentence.ends_with('.') {
                sentence.push('.');
            }
            sentences.push(sentence);

            if sentences.len() >= max_sentences {
                break;
            }
        }
    }

    sentences
}
