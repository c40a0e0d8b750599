//! Unit tests for the mention collector

#[cfg(test)]
mod tests {
    use super::super::scrape::MockPageScraper;
    use super::super::twitter::{MockSocialApi, PublicMetrics, SearchPage, Tweet};
    use super::super::*;
    use crate::error::TrendError;

    fn tweet(id: &str, text: &str, likes: u64, retweets: u64) -> Tweet {
        Tweet {
            id: id.to_string(),
            text: text.to_string(),
            created_at: Some("2025-05-01T10:00:00.000Z".to_string()),
            public_metrics: Some(PublicMetrics {
                like_count: likes,
                retweet_count: retweets,
            }),
        }
    }

    #[tokio::test]
    async fn test_fetch_social_without_client_is_empty() {
        let collector = MentionCollector::with_clients(None, None);
        let mentions = collector.fetch_social("rust", 100).await;
        assert!(mentions.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_social_paginates_and_normalizes() {
        let mut mock = MockSocialApi::new();
        mock.expect_search_page()
            .withf(|query, _, token| query == "rust -is:retweet lang:en" && token.is_none())
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    tweets: vec![tweet("1", "rust is great", 3, 2), tweet("2", "more rust", 0, 0)],
                    next_token: Some("page2".to_string()),
                })
            });
        mock.expect_search_page()
            .withf(|_, _, token| token.as_deref() == Some("page2"))
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    tweets: vec![tweet("3", "rust again", 1, 0)],
                    next_token: None,
                })
            });

        let collector = MentionCollector::with_clients(Some(Box::new(mock)), None);
        let mentions = collector.fetch_social("rust", 50).await;

        assert_eq!(mentions.len(), 3);
        assert!(mentions.iter().all(|m| m.platform == Platform::Twitter));
        assert!(mentions.iter().all(|m| m.source == "twitter"));
        assert_eq!(mentions[0].engagement, Some(5));
        assert_eq!(mentions[1].engagement, Some(0));
        assert_eq!(
            mentions[0].url.as_deref(),
            Some("https://twitter.com/i/status/1")
        );
        assert!(mentions[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn test_fetch_social_keeps_partial_results_on_error() {
        let mut mock = MockSocialApi::new();
        mock.expect_search_page()
            .withf(|_, _, token| token.is_none())
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    tweets: vec![tweet("1", "first page", 0, 0), tweet("2", "still first", 0, 0)],
                    next_token: Some("page2".to_string()),
                })
            });
        mock.expect_search_page()
            .withf(|_, _, token| token.is_some())
            .times(1)
            .returning(|_, _, _| Err(TrendError::Api("recent search returned 503".to_string())));

        let collector = MentionCollector::with_clients(Some(Box::new(mock)), None);
        let mentions = collector.fetch_social("outage", 50).await;

        assert_eq!(mentions.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_social_respects_max_results() {
        let mut mock = MockSocialApi::new();
        mock.expect_search_page().times(1).returning(|_, _, _| {
            Ok(SearchPage {
                tweets: (0..10)
                    .map(|i| tweet(&i.to_string(), "packed page", 0, 0))
                    .collect(),
                next_token: Some("more".to_string()),
            })
        });

        let collector = MentionCollector::with_clients(Some(Box::new(mock)), None);
        let mentions = collector.fetch_social("busy", 3).await;

        assert_eq!(mentions.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_social_missing_metrics_means_zero_engagement() {
        let mut mock = MockSocialApi::new();
        mock.expect_search_page().times(1).returning(|_, _, _| {
            Ok(SearchPage {
                tweets: vec![Tweet {
                    id: "9".to_string(),
                    text: "bare tweet".to_string(),
                    created_at: None,
                    public_metrics: None,
                }],
                next_token: None,
            })
        });

        let collector = MentionCollector::with_clients(Some(Box::new(mock)), None);
        let mentions = collector.fetch_social("bare", 10).await;

        assert_eq!(mentions[0].engagement, Some(0));
        assert!(mentions[0].timestamp.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_web_without_client_is_empty() {
        let collector = MentionCollector::with_clients(None, None);
        let mentions = collector.fetch_web("rust", None).await;
        assert!(mentions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_web_extracts_keyword_sentences() {
        let mut mock = MockPageScraper::new();
        mock.expect_scrape_markdown()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(|_| {
                Ok(Some(
                    "Rust adoption keeps growing across the industry. \
                     Unrelated sentence about other things entirely. \
                     Teams report that Rust services are easier to operate. \
                     Rust tooling also continues to improve every release. \
                     One more long sentence praising Rust for good measure here."
                        .to_string(),
                ))
            });

        let collector = MentionCollector::with_clients(None, Some(Box::new(mock)));
        let mentions = collector
            .fetch_web("rust", Some(&["https://example.com/a"]))
            .await;

        // 4 matching sentences in the page, capped at 3 per source
        assert_eq!(mentions.len(), 3);
        assert!(mentions.iter().all(|m| m.platform == Platform::Web));
        assert!(mentions.iter().all(|m| m.source == "https://example.com/a"));
        assert!(mentions.iter().all(|m| m.timestamp.is_some()));
        assert!(mentions.iter().all(|m| m.engagement.is_none()));
        assert!(mentions.iter().all(|m| m.text.ends_with('.')));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_web_skips_failed_source_and_continues() {
        let mut mock = MockPageScraper::new();
        mock.expect_scrape_markdown()
            .withf(|url| url == "https://down.example.com")
            .times(1)
            .returning(|_| Err(TrendError::Api("connection refused".to_string())));
        mock.expect_scrape_markdown()
            .withf(|url| url == "https://up.example.com")
            .times(1)
            .returning(|_| {
                Ok(Some(
                    "The solar project broke ground this week after delays.".to_string(),
                ))
            });

        let collector = MentionCollector::with_clients(None, Some(Box::new(mock)));
        let mentions = collector
            .fetch_web(
                "solar",
                Some(&["https://down.example.com", "https://up.example.com"]),
            )
            .await;

        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].source, "https://up.example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_web_ignores_pages_without_keyword() {
        let mut mock = MockPageScraper::new();
        mock.expect_scrape_markdown()
            .times(1)
            .returning(|_| Ok(Some("A long page about something else entirely.".to_string())));

        let collector = MentionCollector::with_clients(None, Some(Box::new(mock)));
        let mentions = collector
            .fetch_web("quantum", Some(&["https://example.com"]))
            .await;

        assert!(mentions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_web_ignores_unusable_pages() {
        let mut mock = MockPageScraper::new();
        mock.expect_scrape_markdown().times(1).returning(|_| Ok(None));

        let collector = MentionCollector::with_clients(None, Some(Box::new(mock)));
        let mentions = collector
            .fetch_web("anything", Some(&["https://example.com"]))
            .await;

        assert!(mentions.is_empty());
    }

    #[test]
    fn test_keyword_sentences_filters_and_repunctuates() {
        let content = "Rust hits 1.80 today\nwith new features. Short rust. \
                       This is a much longer sentence about Rust tooling";
        let sentences = keyword_sentences(content, "rust", 5);

        // newline flattened, short sentence dropped, period re-appended
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Rust hits 1.80 today with new features.");
        assert_eq!(sentences[1], "This is a much longer sentence about Rust tooling.");
    }

    #[test]
    fn test_keyword_sentences_case_insensitive() {
        let content = "RUST has taken over systems programming lately. Nothing else here matters.";
        let sentences = keyword_sentences(content, "rust", 5);
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_keyword_sentences_respects_limit() {
        let content = "A reasonably long sentence mentioning widgets here. ".repeat(10);
        let sentences = keyword_sentences(&content, "widgets", 5);
        assert_eq!(sentences.len(), 5);
    }

    #[test]
    fn test_keyword_sentences_none_matching() {
        assert!(keyword_sentences("Nothing relevant in this text at all.", "rust", 5).is_empty());
    }
}
