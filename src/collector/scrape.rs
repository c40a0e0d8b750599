//! Main-content scrape client (Firecrawl API)

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SCRAPE_URL: &str = "https://api.firecrawl.dev/v0/scrape";

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
    #[serde(rename = "onlyMainContent")]
    only_main_content: bool,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
}

/// Fetches a page's main content as markdown
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// `Ok(None)` means the page yielded nothing usable; errors are
    /// transport or decoding failures.
    async fn scrape_markdown(&self, url: &str) -> Result<Option<String>>;
}

pub struct FirecrawlClient {
    http: reqwest::Client,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl PageScraper for FirecrawlClient {
    async fn scrape_markdown(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .http
            .post(SCRAPE_URL)
            .bearer_auth(&self.api_key)
            .json(&ScrapeRequest {
                url,
                formats: ["markdown"],
                only_main_content: true,
            })
            .send()
            .await?;

        // Only a 200 with a successful payload counts; anything else is
        // simply not usable, not an error.
        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }

        let body: ScrapeResponse = response.json().await?;
        if !body.success {
            return Ok(None);
        }

        Ok(body
            .data
            .and_then(|d| d.markdown)
            .filter(|md| !md.is_empty()))
    }
}
