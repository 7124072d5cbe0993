use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::config::NewsConfig;
use crate::types::RawArticle;

// Social platforms and aggregators of user content, never news outlets
const NON_NEWS_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "tiktok.com",
    "youtube.com",
    "reddit.com",
    "linkedin.com",
    "pinterest.com",
    "threads.net",
    "quora.com",
    "t.co",
];

lazy_static! {
    static ref JUNK_TITLE: Regex =
        Regex::new(r"(?i)\b(?:404|error|page not found|access denied)\b").unwrap();
}

/// Why an article failed the quality gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityRejection {
    Language(String),
    TitleLength(usize),
    Stale,
    FutureDated,
    NonNewsDomain(String),
    JunkTitle,
}

impl fmt::Display for QualityRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityRejection::Language(lang) => write!(f, "non-English language '{}'", lang),
            QualityRejection::TitleLength(len) => write!(f, "title length {} out of range", len),
            QualityRejection::Stale => write!(f, "outside freshness window"),
            QualityRejection::FutureDated => write!(f, "published in the future"),
            QualityRejection::NonNewsDomain(domain) => write!(f, "non-news domain {}", domain),
            QualityRejection::JunkTitle => write!(f, "junk title"),
        }
    }
}

/// Freshness, language, title-shape and domain checks
#[derive(Debug, Clone)]
pub struct QualityGate {
    freshness: Duration,
    min_title_chars: usize,
    max_title_chars: usize,
}

impl QualityGate {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            freshness: Duration::days(config.freshness_days),
            min_title_chars: config.min_title_chars,
            max_title_chars: config.max_title_chars,
        }
    }

    pub fn check(&self, article: &RawArticle, now: DateTime<Utc>) -> Result<(), QualityRejection> {
        if !is_english(&article.language) {
            return Err(QualityRejection::Language(article.language.clone()));
        }

        let title_len = article.title.trim().chars().count();
        if title_len < self.min_title_chars || title_len > self.max_title_chars {
            return Err(QualityRejection::TitleLength(title_len));
        }

        if article.published < now - self.freshness {
            return Err(QualityRejection::Stale);
        }
        // One day of slack for provider clock and timezone errors
        if article.published > now + Duration::days(1) {
            return Err(QualityRejection::FutureDated);
        }

        if is_non_news_domain(&article.source_domain) {
            return Err(QualityRejection::NonNewsDomain(article.source_domain.clone()));
        }

        if JUNK_TITLE.is_match(&article.title) {
            return Err(QualityRejection::JunkTitle);
        }

        Ok(())
    }
}

/// Accepts "en" and regional variants such as "en-US" or "en_GB"
pub fn is_english(tag: &str) -> bool {
    let tag = tag.trim().to_lowercase();
    tag == "en" || tag == "eng" || tag.starts_with("en-") || tag.starts_with("en_")
}

/// Matches listed domains and any of their subdomains
pub fn is_non_news_domain(domain: &str) -> bool {
    let domain = domain.trim().to_lowercase();
    NON_NEWS_DOMAINS
        .iter()
        .any(|blocked| domain == *blocked || domain.ends_with(&format!(".{}", blocked)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_article;

    fn gate() -> QualityGate {
        QualityGate::new(&NewsConfig::default())
    }

    #[test]
    fn test_accepts_ordinary_news() {
        let article = raw_article("https://a.com/1", "Senator Ossoff backs farm bill", 5, "a.com");
        assert_eq!(gate().check(&article, Utc::now()), Ok(()));
    }

    #[test]
    fn test_language() {
        let mut article = raw_article("https://a.com/1", "Senator Ossoff backs farm bill", 5, "a.com");
        article.language = "en-GB".to_string();
        assert!(gate().check(&article, Utc::now()).is_ok());
        article.language = "es".to_string();
        assert_eq!(
            gate().check(&article, Utc::now()),
            Err(QualityRejection::Language("es".to_string()))
        );
    }

    #[test]
    fn test_title_bounds() {
        let short = raw_article("https://a.com/1", "Ossoff", 5, "a.com");
        assert_eq!(gate().check(&short, Utc::now()), Err(QualityRejection::TitleLength(6)));

        let long = raw_article("https://a.com/2", &"Ossoff ".repeat(50), 5, "a.com");
        assert!(matches!(
            gate().check(&long, Utc::now()),
            Err(QualityRejection::TitleLength(_))
        ));
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let stale = raw_article("https://a.com/1", "Senator Ossoff backs farm bill", 91 * 24, "a.com");
        assert_eq!(gate().check(&stale, now), Err(QualityRejection::Stale));

        let edge = raw_article("https://a.com/2", "Senator Ossoff backs farm bill", 89 * 24, "a.com");
        assert!(gate().check(&edge, now).is_ok());

        let future = raw_article("https://a.com/3", "Senator Ossoff backs farm bill", -72, "a.com");
        assert_eq!(gate().check(&future, now), Err(QualityRejection::FutureDated));
    }

    #[test]
    fn test_non_news_domains() {
        let social = raw_article("https://m.facebook.com/p/1", "Senator Ossoff backs farm bill", 5, "m.facebook.com");
        assert!(matches!(
            gate().check(&social, Utc::now()),
            Err(QualityRejection::NonNewsDomain(_))
        ));
        assert!(!is_non_news_domain("box.com"));
        assert!(is_non_news_domain("X.com"));
    }

    #[test]
    fn test_junk_titles() {
        for title in ["404 - Page Not Found", "Error loading article text", "Access Denied | Example"] {
            let article = raw_article("https://a.com/1", title, 5, "a.com");
            assert_eq!(gate().check(&article, Utc::now()), Err(QualityRejection::JunkTitle), "{}", title);
        }
        let fine = raw_article("https://a.com/1", "Terrorism bill clears Senate", 5, "a.com");
        assert!(gate().check(&fine, Utc::now()).is_ok());
    }
}
