//! Static directory of web sources to scrape, grouped by category

use once_cell::sync::Lazy;

pub const TECH_SOURCES: &[&str] = &[
    "https://techcrunch.com",
    "https://www.theverge.com",
    "https://arstechnica.com",
    "https://www.wired.com",
    "https://venturebeat.com",
    "https://www.businessinsider.com/tech",
];

pub const NEWS_SOURCES: &[&str] = &[
    "https://www.reuters.com",
    "https://www.bbc.com/news",
    "https://www.cnn.com",
    "https://www.npr.org",
    "https://apnews.com",
];

pub const DISCUSSION_SOURCES: &[&str] = &[
    "https://news.ycombinator.com",
    "https://www.reddit.com/r/technology",
    "https://www.reddit.com/r/worldnews",
    "https://medium.com",
    "https://dev.to",
];

pub const FINANCE_SOURCES: &[&str] = &[
    "https://www.bloomberg.com",
    "https://finance.yahoo.com",
    "https://www.marketwatch.com",
    "https://www.cnbc.com",
    "https://www.fool.com",
];

pub const CULTURE_SOURCES: &[&str] = &[
    "https://www.buzzfeednews.com",
    "https://mashable.com",
    "https://gizmodo.com",
    "https://lifehacker.com",
];

/// Most reliable sources for a quick scan
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://news.ycombinator.com",
    "https://techcrunch.com",
    "https://www.reuters.com",
    "https://www.reddit.com/r/technology",
    "https://www.bloomberg.com",
];

static ALL_SOURCES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    [
        TECH_SOURCES,
        NEWS_SOURCES,
        DISCUSSION_SOURCES,
        FINANCE_SOURCES,
        CULTURE_SOURCES,
    ]
    .concat()
});

const TECH_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "crypto",
    "bitcoin",
    "blockchain",
    "startup",
    "tech",
    "software",
    "app",
    "saas",
    "api",
    "programming",
    "coding",
    "developer",
    "github",
    "open source",
];

const FINANCE_KEYWORDS: &[&str] = &[
    "stock",
    "market",
    "trading",
    "investment",
    "economy",
    "inflation",
    "fed",
    "interest rate",
    "earnings",
    "ipo",
    "revenue",
    "profit",
];

const NEWS_KEYWORDS: &[&str] = &[
    "politics",
    "election",
    "government",
    "policy",
    "law",
    "court",
    "climate",
    "health",
    "covid",
    "war",
    "international",
];

/// Look up sources by category name, case-insensitively
///
/// Unknown categories fall back to the full list.
pub fn by_category(category: &str) -> &'static [&'static str] {
    match category.to_lowercase().as_str() {
        "tech" => TECH_SOURCES,
        "news" => NEWS_SOURCES,
        "discussion" => DISCUSSION_SOURCES,
        "finance" => FINANCE_SOURCES,
        "culture" => CULTURE_SOURCES,
        _ => &ALL_SOURCES,
    }
}

/// Pick the sources most likely to mention a keyword
///
/// Substring classification against fixed keyword sets, tech before finance
/// before news; heuristic and approximate on purpose.
pub fn for_keyword(keyword: &str) -> Vec<&'static str> {
    let keyword_lower = keyword.to_lowercase();
    let matches = |set: &[&str]| set.iter().any(|kw| keyword_lower.contains(kw));

    if matches(TECH_KEYWORDS) {
        [TECH_SOURCES, &DISCUSSION_SOURCES[..2]].concat()
    } else if matches(FINANCE_KEYWORDS) {
        [FINANCE_SOURCES, &NEWS_SOURCES[..3]].concat()
    } else if matches(NEWS_KEYWORDS) {
        [NEWS_SOURCES, &DISCUSSION_SOURCES[..1]].concat()
    } else {
        // General keyword: a fixed mix across categories
        [
            &TECH_SOURCES[..2],
            &NEWS_SOURCES[..3],
            &DISCUSSION_SOURCES[..2],
            &FINANCE_SOURCES[..1],
        ]
        .concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_category_case_insensitive() {
        assert_eq!(by_category("TECH"), by_category("tech"));
        assert_eq!(by_category("Finance"), FINANCE_SOURCES);
    }

    #[test]
    fn test_by_category_unknown_falls_back_to_all() {
        let all = by_category("bogus");
        let expected: Vec<&str> = [
            TECH_SOURCES,
            NEWS_SOURCES,
            DISCUSSION_SOURCES,
            FINANCE_SOURCES,
            CULTURE_SOURCES,
        ]
        .concat();
        assert_eq!(all, expected.as_slice());
        assert_eq!(by_category("all"), expected.as_slice());
    }

    #[test]
    fn test_for_keyword_tech() {
        let sources = for_keyword("AI regulation");
        assert_eq!(sources.len(), 8);
        assert!(sources.contains(&"https://techcrunch.com"));
        assert!(sources.contains(&"https://news.ycombinator.com"));
    }

    #[test]
    fn test_for_keyword_finance() {
        let sources = for_keyword("stock buybacks");
        assert_eq!(sources.len(), 8);
        assert!(sources.contains(&"https://www.bloomberg.com"));
        assert!(sources.contains(&"https://www.reuters.com"));
    }

    #[test]
    fn test_for_keyword_news() {
        let sources = for_keyword("climate summit");
        assert_eq!(sources.len(), 6);
        assert!(sources.contains(&"https://www.bbc.com/news"));
        assert!(sources.contains(&"https://news.ycombinator.com"));
    }

    #[test]
    fn test_for_keyword_priority_order() {
        // "AI stocks" matches both tech and finance sets; tech wins
        let sources = for_keyword("AI stocks");
        assert!(sources.contains(&"https://techcrunch.com"));
        assert!(!sources.contains(&"https://www.bloomberg.com"));
    }

    #[test]
    fn test_for_keyword_general_mix() {
        let sources = for_keyword("gardening");
        assert_eq!(sources.len(), 8);
        assert!(sources.contains(&"https://techcrunch.com"));
        assert!(sources.contains(&"https://www.reuters.com"));
        assert!(sources.contains(&"https://www.bloomberg.com"));
    }

    #[test]
    fn test_default_sources() {
        assert_eq!(DEFAULT_SOURCES.len(), 5);
    }
}
