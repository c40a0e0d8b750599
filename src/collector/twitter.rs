//! Recent-search client for the Twitter API v2

use crate::error::{Result, TrendError};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// One page of recent-search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub tweets: Vec<Tweet>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: Option<String>,
    pub public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
}

#[derive(Debug, Deserialize)]
struct RecentSearchResponse {
    data: Option<Vec<Tweet>>,
    meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
struct SearchMeta {
    next_token: Option<String>,
}

/// Paged social search, one call per result page
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialApi: Send + Sync {
    async fn search_page(
        &self,
        query: &str,
        page_size: usize,
        next_token: Option<String>,
    ) -> Result<SearchPage>;
}

/// Twitter API v2 client
pub struct TwitterSearch {
    http: reqwest::Client,
    bearer_token: String,
}

impl TwitterSearch {
    pub fn new(bearer_token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, bearer_token })
    }
}

#[async_trait]
impl SocialApi for TwitterSearch {
    async fn search_page(
        &self,
        query: &str,
        page_size: usize,
        next_token: Option<String>,
    ) -> Result<SearchPage> {
        loop {
            let mut request = self
                .http
                .get(RECENT_SEARCH_URL)
                .bearer_auth(&self.bearer_token)
                .query(&[
                    ("query", query),
                    ("max_results", &page_size.to_string()),
                    ("tweet.fields", "created_at,public_metrics"),
                ]);
            if let Some(token) = next_token.as_deref() {
                request = request.query(&[("next_token", token)]);
            }

            let response = request.send().await?;

            // The provider tells us when the window resets; wait it out
            // rather than failing the fetch.
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let wait_secs = reset_wait_secs(response.headers());
                tracing::warn!(wait_secs, "recent search rate limited, waiting for reset");
                tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                continue;
            }

            if !response.status().is_success() {
                return Err(TrendError::Api(format!(
                    "recent search returned {}",
                    response.status()
                )));
            }

            let body: RecentSearchResponse = response.json().await?;
            return Ok(SearchPage {
                tweets: body.data.unwrap_or_default(),
                next_token: body.meta.and_then(|m| m.next_token),
            });
        }
    }
}

fn reset_wait_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .map(|reset| (reset - Utc::now().timestamp()).max(1) as u64)
        .unwrap_or(60)
}
