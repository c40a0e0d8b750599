//! Trendwatch
//!
//! Keyword trend aggregation across Twitter and web sources.

use clap::{Parser, Subcommand};
use serde_json::json;
use trendwatch::{
    analyzer::TrendAnalyzer,
    collector::MentionCollector,
    config::Config,
    sentiment::SentimentAnalyzer,
    server::{run_stdio, tool_definitions, ToolDispatcher},
    sources,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trendwatch")]
#[command(about = "Keyword trend aggregation and sentiment analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "trendwatch.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tool calls over stdin/stdout
    Serve,
    /// Analyze a keyword and print the report
    Analyze {
        /// Keyword to analyze
        keyword: String,
        /// Analysis timeframe (1h, 6h, 24h, 7d)
        #[arg(short, long)]
        timeframe: Option<String>,
    },
    /// Compare several keywords
    Compare {
        /// Keywords to compare (max 5)
        keywords: Vec<String>,
        #[arg(short, long)]
        timeframe: Option<String>,
    },
    /// List curated trending topics
    Trending {
        /// Category to focus on (tech, finance, general)
        #[arg(short, long, default_value = "general")]
        category: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Detailed sentiment breakdown for a keyword
    Sentiment {
        keyword: String,
        /// Which sources to analyze (twitter, web, both)
        #[arg(short, long, default_value = "both")]
        source_type: String,
    },
    /// Show the source directory for a category
    Sources {
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// List the exposed tools and their schemas
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Analyze { keyword, timeframe } => {
            run_tool(
                config,
                "analyze_trend",
                json!({"keyword": keyword, "timeframe": timeframe}),
            )
            .await
        }
        Commands::Compare { keywords, timeframe } => {
            run_tool(
                config,
                "compare_trends",
                json!({"keywords": keywords, "timeframe": timeframe}),
            )
            .await
        }
        Commands::Trending { category, limit } => {
            run_tool(
                config,
                "get_trending_topics",
                json!({"category": category, "limit": limit}),
            )
            .await
        }
        Commands::Sentiment {
            keyword,
            source_type,
        } => {
            run_tool(
                config,
                "sentiment_breakdown",
                json!({"keyword": keyword, "source_type": source_type}),
            )
            .await
        }
        Commands::Sources { category } => show_sources(&category),
        Commands::Tools => show_tools(),
    }
}

fn build_dispatcher(config: &Config) -> anyhow::Result<ToolDispatcher> {
    let collector = MentionCollector::from_config(config)?;
    let analyzer = TrendAnalyzer::new(
        collector,
        SentimentAnalyzer::new(),
        config.limits.max_tweets_per_search,
    );
    Ok(ToolDispatcher::new(
        analyzer,
        config.limits.default_timeframe.clone(),
    ))
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let missing = config.validate();
    if !missing.is_empty() {
        anyhow::bail!(
            "missing configuration: {} (check your .env or config file)",
            missing.join(", ")
        );
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting trendwatch server");

    let dispatcher = build_dispatcher(&config)?;
    run_stdio(&dispatcher).await?;
    Ok(())
}

async fn run_tool(config: Config, tool: &str, args: serde_json::Value) -> anyhow::Result<()> {
    for name in config.validate() {
        tracing::warn!(credential = name, "credential not configured, results will be partial");
    }

    let dispatcher = build_dispatcher(&config)?;
    println!("{}", dispatcher.dispatch(tool, &args).await);
    Ok(())
}

fn show_sources(category: &str) -> anyhow::Result<()> {
    println!("Sources for '{category}':\n");
    for url in sources::by_category(category) {
        println!("  {url}");
    }
    println!("\nDefault scan set:");
    for url in sources::DEFAULT_SOURCES {
        println!("  {url}");
    }
    Ok(())
}

fn show_tools() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&tool_definitions())?);
    Ok(())
}
