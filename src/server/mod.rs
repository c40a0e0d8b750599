//! Tool dispatch surface
//!
//! Stateless request/response: a tool name plus a flat argument object in,
//! rendered text out. Missing required arguments come back as plain
//! user-facing messages; anything else that fails downstream is caught here
//! and reported as a text error naming the tool. Nothing propagates raw.

use crate::analyzer::TrendAnalyzer;
use crate::error::{Result, TrendError};
use crate::types::{SentimentSummary, TrendReport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Keywords accepted per comparison
const MAX_COMPARE_KEYWORDS: usize = 5;
/// Sample mentions rendered in an analysis report
const REPORT_SAMPLE_COUNT: usize = 3;
/// Characters of sample text shown before truncation
const SAMPLE_TEXT_LEN: usize = 100;

#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Routes tool calls to the aggregator and renders the results
pub struct ToolDispatcher {
    analyzer: TrendAnalyzer,
    default_timeframe: String,
}

impl ToolDispatcher {
    pub fn new(analyzer: TrendAnalyzer, default_timeframe: String) -> Self {
        Self {
            analyzer,
            default_timeframe,
        }
    }

    /// Execute a named tool, always producing user-facing text
    pub async fn dispatch(&self, tool: &str, args: &Value) -> String {
        let result = match tool {
            "track_trend" => self.track_trend(args).await,
            "analyze_trend" => self.analyze_trend(args).await,
            "compare_trends" => self.compare_trends(args).await,
            "get_trending_topics" => self.trending_topics(args),
            "sentiment_breakdown" => self.sentiment_breakdown(args).await,
            other => Err(TrendError::UnknownTool(other.to_string())),
        };

        match result {
            Ok(text) => text,
            Err(e @ TrendError::MissingArgument(_)) => format!("Error: {e}"),
            Err(e) => format!("Error executing {tool}: {e}"),
        }
    }

    async fn track_trend(&self, args: &Value) -> Result<String> {
        let keyword = required_str(args, "keyword")?;
        let timeframe = self.timeframe(args);

        let report = self.analyzer.analyze_trend(keyword, timeframe).await?;

        let response = json!({
            "status": "success",
            "message": format!("Started tracking '{keyword}'"),
            "data": {
                "keyword": report.keyword,
                "timeframe": report.timeframe,
                "total_mentions": report.total_mentions,
                "twitter_mentions": report.twitter_mentions,
                "web_mentions": report.web_mentions,
                "overall_sentiment": report.overall_sentiment.label,
                "sentiment_score": report.overall_sentiment.score,
                "trend_direction": report.trend_direction,
                "top_sources": report.top_sources.iter().take(3).collect::<Vec<_>>(),
                "analysis_time": report.analysis_timestamp.to_rfc3339(),
            }
        });

        Ok(serde_json::to_string_pretty(&response)?)
    }

    async fn analyze_trend(&self, args: &Value) -> Result<String> {
        let keyword = required_str(args, "keyword")?;
        let timeframe = self.timeframe(args);

        let report = self.analyzer.analyze_trend(keyword, timeframe).await?;
        Ok(render_analysis(&report))
    }

    async fn compare_trends(&self, args: &Value) -> Result<String> {
        let mut keywords = keyword_list(args)?;
        keywords.truncate(MAX_COMPARE_KEYWORDS);
        let timeframe = self.timeframe(args);

        let results = self.analyzer.compare_trends(&keywords, timeframe).await;
        Ok(render_comparison(&results, timeframe))
    }

    fn trending_topics(&self, args: &Value) -> Result<String> {
        let category = args
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or("general");
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .unwrap_or(10) as usize;

        let topics = self.analyzer.trending_topics(category, limit);

        let mut report = format!("# Trending Topics: {}\n\n", title_case(category));
        for (i, topic) in topics.iter().enumerate() {
            report.push_str(&format!("{}. {topic}\n", i + 1));
        }
        report.push_str(&format!("\n*{} topics found*", topics.len()));

        Ok(report)
    }

    async fn sentiment_breakdown(&self, args: &Value) -> Result<String> {
        let keyword = required_str(args, "keyword")?;
        let source_type = args
            .get("source_type")
            .and_then(Value::as_str)
            .unwrap_or("both");

        let report = self
            .analyzer
            .analyze_trend(keyword, &self.default_timeframe)
            .await?;

        let mut out = format!("# Sentiment Analysis: {keyword}\n\n");

        if matches!(source_type, "both" | "twitter") {
            out.push_str(&render_platform_sentiment(
                "Twitter",
                &report.twitter_sentiment,
            ));
        }
        if matches!(source_type, "both" | "web") {
            out.push_str(&render_platform_sentiment("Web", &report.web_sentiment));
        }
        if source_type == "both" {
            let overall = &report.overall_sentiment;
            out.push_str("## Combined Sentiment\n");
            out.push_str(&format!(
                "- **Overall**: {} ({:.3})\n",
                overall.label.as_str(),
                overall.score
            ));
            out.push_str(&format!("- **Total Mentions**: {}\n", overall.total_count));
        }

        Ok(out)
    }

    fn timeframe<'a>(&'a self, args: &'a Value) -> &'a str {
        args.get("timeframe")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_timeframe)
    }
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| TrendError::MissingArgument(key.to_string()))
}

fn keyword_list(args: &Value) -> Result<Vec<String>> {
    let keywords: Vec<String> = args
        .get("keywords")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if keywords.is_empty() {
        return Err(TrendError::MissingArgument("keywords list".to_string()));
    }
    Ok(keywords)
}

fn render_analysis(report: &TrendReport) -> String {
    let dist = distribution(&report.overall_sentiment);

    let top_sources = report
        .top_sources
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    let samples = report
        .sample_mentions
        .iter()
        .take(REPORT_SAMPLE_COUNT)
        .map(|m| {
            let text: String = m.text.chars().take(SAMPLE_TEXT_LEN).collect();
            format!("**{}**: {text}...", m.platform.title())
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Trend Analysis: {keyword}\n\
         \n\
         ## Summary\n\
         - **Total Mentions**: {total}\n\
         - **Twitter**: {twitter} mentions\n\
         - **Web Sources**: {web} mentions\n\
         - **Trend Direction**: {direction}\n\
         \n\
         ## Sentiment Analysis\n\
         ### Overall: {label} ({score:.3})\n\
         - Positive: {pos}%\n\
         - Negative: {neg}%\n\
         - Neutral: {neu}%\n\
         \n\
         ### Platform Breakdown:\n\
         **Twitter Sentiment**: {tw_label} ({tw_score:.3})\n\
         **Web Sentiment**: {web_label} ({web_score:.3})\n\
         \n\
         ## Top Sources\n\
         {top_sources}\n\
         \n\
         ## Sample Mentions\n\
         {samples}\n\
         \n\
         ---\n\
         *Analysis completed at {timestamp}*\n",
        keyword = report.keyword,
        total = report.total_mentions,
        twitter = report.twitter_mentions,
        web = report.web_mentions,
        direction = report.trend_direction.as_str().to_uppercase(),
        label = report.overall_sentiment.label.as_str().to_uppercase(),
        score = report.overall_sentiment.score,
        pos = dist.0,
        neg = dist.1,
        neu = dist.2,
        tw_label = report.twitter_sentiment.label.as_str(),
        tw_score = report.twitter_sentiment.score,
        web_label = report.web_sentiment.label.as_str(),
        web_score = report.web_sentiment.score,
        timestamp = report.analysis_timestamp.to_rfc3339(),
    )
}

fn render_comparison(results: &[(String, TrendReport)], timeframe: &str) -> String {
    let mut report = format!("# Trend Comparison ({timeframe})\n\n");

    report.push_str("## Summary\n");
    report.push_str("| Keyword | Mentions | Sentiment | Direction |\n");
    report.push_str("|---------|----------|-----------|----------|\n");
    for (keyword, data) in results {
        report.push_str(&format!(
            "| {keyword} | {} | {} | {} |\n",
            data.total_mentions,
            data.overall_sentiment.label.as_str(),
            data.trend_direction.as_str(),
        ));
    }

    report.push_str("\n## Detailed Analysis\n");
    for (keyword, data) in results {
        let dist = distribution(&data.overall_sentiment);
        report.push_str(&format!("\n### {keyword}\n"));
        report.push_str(&format!(
            "- **Volume**: {} total ({} Twitter, {} Web)\n",
            data.total_mentions, data.twitter_mentions, data.web_mentions
        ));
        report.push_str(&format!(
            "- **Sentiment**: {} ({:.3})\n",
            data.overall_sentiment.label.as_str(),
            data.overall_sentiment.score
        ));
        report.push_str(&format!(
            "- **Distribution**: {}% positive, {}% negative\n",
            dist.0, dist.1
        ));
    }

    report
}

fn render_platform_sentiment(platform: &str, summary: &SentimentSummary) -> String {
    let dist = distribution(summary);
    format!(
        "## {platform} Sentiment\n\
         - **Overall**: {} ({:.3})\n\
         - **Mentions**: {}\n\
         - **Distribution**: {}% positive, {}% negative, {}% neutral\n\n",
        summary.label.as_str(),
        summary.score,
        summary.total_count,
        dist.0,
        dist.1,
        dist.2,
    )
}

fn distribution(summary: &SentimentSummary) -> (f64, f64, f64) {
    summary
        .distribution
        .map(|d| (d.positive, d.negative, d.neutral))
        .unwrap_or((0.0, 0.0, 0.0))
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The five tools this surface exposes, with their input schemas
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "track_trend",
            description: "Start tracking a keyword/topic across Twitter and web sources",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "The keyword or phrase to track"
                    },
                    "timeframe": {
                        "type": "string",
                        "description": "Analysis timeframe (1h, 6h, 24h, 7d)",
                        "default": "24h"
                    }
                },
                "required": ["keyword"]
            }),
        },
        ToolDefinition {
            name: "analyze_trend",
            description: "Get comprehensive trend analysis for a keyword",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "The keyword to analyze"
                    },
                    "timeframe": {
                        "type": "string",
                        "description": "Analysis timeframe (1h, 6h, 24h, 7d)",
                        "default": "24h"
                    }
                },
                "required": ["keyword"]
            }),
        },
        ToolDefinition {
            name: "compare_trends",
            description: "Compare sentiment and volume across multiple keywords",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Keywords to compare (max 5)"
                    },
                    "timeframe": {
                        "type": "string",
                        "description": "Comparison timeframe",
                        "default": "24h"
                    }
                },
                "required": ["keywords"]
            }),
        },
        ToolDefinition {
            name: "get_trending_topics",
            description: "Discover currently trending topics by category",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Category to focus on (tech, finance, general)",
                        "default": "general"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Number of trends to return",
                        "default": 10
                    }
                }
            }),
        },
        ToolDefinition {
            name: "sentiment_breakdown",
            description: "Get detailed sentiment analysis for a keyword",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "Keyword to analyze sentiment for"
                    },
                    "source_type": {
                        "type": "string",
                        "enum": ["twitter", "web", "both"],
                        "description": "Which sources to analyze",
                        "default": "both"
                    }
                },
                "required": ["keyword"]
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct ToolRequest {
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    arguments: Value,
    #[serde(default)]
    list_tools: bool,
}

/// Serve tool calls over stdin/stdout, one JSON object per line
///
/// Requests look like `{"tool": "analyze_trend", "arguments": {...}}`;
/// `{"list_tools": true}` answers with the tool definitions. Responses are
/// `{"content": "..."}` lines; malformed requests get an `{"error": ...}`
/// line rather than closing the stream.
pub async fn run_stdio(dispatcher: &ToolDispatcher) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) if request.list_tools => json!({"tools": tool_definitions()}),
            Ok(request) => match request.tool {
                Some(tool) => {
                    let content = dispatcher.dispatch(&tool, &request.arguments).await;
                    json!({"content": content})
                }
                None => json!({"error": "missing tool name"}),
            },
            Err(e) => json!({"error": format!("invalid request: {e}")}),
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    Ok(())
}
