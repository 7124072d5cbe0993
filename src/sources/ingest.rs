//! Boundary normalization: loosely shaped provider items become strict
//! `RawArticle` values or are rejected here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use url::Url;
use whatlang::{detect as detect_language, Lang};

use super::types::ProviderItem;
use crate::types::RawArticle;
use crate::TARGET_FETCH;

/// Language tag recorded when neither the provider nor detection can tell
pub const UNKNOWN_LANGUAGE: &str = "und";

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = Url::parse(url) {
        (parsed.scheme() == "http" || parsed.scheme() == "https") && parsed.host_str().is_some()
    } else {
        false
    }
}

/// Parse a date string in various formats
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    // Try RFC3339
    if let Ok(date) = DateTime::parse_from_rfc3339(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try RFC2822
    if let Ok(date) = DateTime::parse_from_rfc2822(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try ISO 8601 with a numeric offset
    if let Ok(date) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(date.with_timezone(&Utc));
    }

    // Offset-less formats are taken as UTC
    for format in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(date.and_utc());
        }
    }

    for format in &["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
            return date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        }
    }

    None
}

/// Hosts whose news links are click-tracking redirects carrying the article
/// address in a `url` query parameter
const REDIRECT_HOSTS: &[&str] = &["bing.com"];

/// Article address wrapped in a provider click-tracking link, e.g.
/// `https://www.bing.com/news/apiclick.aspx?url=https%3a%2f%2fwww.wsav.com%2f...`
pub fn redirect_target(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if !REDIRECT_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{}", h)))
    {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(k, _)| k.eq_ignore_ascii_case("url"))
        .map(|(_, v)| v.trim().to_string())
        .filter(|target| is_valid_url(target))
}

/// Host of a URL, lower-cased, without a leading "www."
pub fn domain_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Comparable form of an article URL: no fragment, no tracking parameters,
/// no trailing slash.
pub fn canonical_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url.trim()) else {
        return url.trim().to_string();
    };
    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !k.starts_with("utm_") && k != "fbclid" && k != "gclid")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    let mut canonical = parsed.to_string();
    if let Some(stripped) = canonical.strip_prefix("https://www.") {
        canonical = format!("https://{}", stripped);
    } else if let Some(stripped) = canonical.strip_prefix("http://www.") {
        canonical = format!("http://{}", stripped);
    }
    canonical = canonical.replacen("http://", "https://", 1);
    canonical.trim_end_matches('/').to_string()
}

/// ISO 639-1 style tag for the language of `text`, or [`UNKNOWN_LANGUAGE`]
pub fn detect_language_tag(text: &str) -> String {
    match detect_language(text) {
        Some(info) if info.lang() == Lang::Eng => "en".to_string(),
        Some(info) => info.lang().code().to_string(),
        None => UNKNOWN_LANGUAGE.to_string(),
    }
}

/// Strip markup and collapse whitespace in provider-supplied snippets
pub fn clean_text(text: &str) -> String {
    HTML_TAG
        .replace_all(text, " ")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ProviderItem {
    /// Validate and normalize into a `RawArticle`. Items without a usable URL,
    /// title or timestamp are rejected.
    pub fn into_raw_article(self) -> Option<RawArticle> {
        let url = self.url.map(|u| u.trim().to_string())?;
        if !is_valid_url(&url) {
            debug!(target: TARGET_FETCH, "Rejecting item with invalid URL: {}", url);
            return None;
        }
        let url = redirect_target(&url).unwrap_or(url);

        let title = clean_text(self.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            debug!(target: TARGET_FETCH, "Rejecting item without title: {}", url);
            return None;
        }

        let Some(published) = self.published.as_deref().and_then(parse_date) else {
            debug!(target: TARGET_FETCH, "Rejecting item without parseable date: {}", url);
            return None;
        };

        let source_domain = self
            .source_url
            .as_deref()
            .filter(|s| is_valid_url(s))
            .and_then(domain_from_url)
            .or_else(|| domain_from_url(&url))?;

        let language = self
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| detect_language_tag(&title));

        let summary = self
            .summary
            .map(|s| clean_text(&s))
            .filter(|s| !s.is_empty());

        Some(RawArticle {
            url,
            title,
            published,
            source_domain,
            language,
            image_url: self.image_url.filter(|u| is_valid_url(u)),
            summary,
        })
    }
}

/// True when an article handed over by a provider is still well formed
pub fn is_well_formed(article: &RawArticle) -> bool {
    is_valid_url(&article.url)
        && !article.title.trim().is_empty()
        && !article.source_domain.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item() -> ProviderItem {
        ProviderItem {
            url: Some("https://www.postandcourier.com/politics/story.html".to_string()),
            title: Some("  Senator   Graham <b>unveils</b> farm bill ".to_string()),
            published: Some("Tue, 14 Oct 2025 10:30:00 GMT".to_string()),
            source_url: None,
            language: Some("en-US".to_string()),
            image_url: Some("not a url".to_string()),
            summary: Some("<p>The South Carolina senator&nbsp;said</p>".to_string()),
        }
    }

    #[test]
    fn test_into_raw_article() {
        let article = item().into_raw_article().unwrap();
        assert_eq!(article.title, "Senator Graham unveils farm bill");
        assert_eq!(article.source_domain, "postandcourier.com");
        assert_eq!(article.language, "en-us");
        assert_eq!(article.image_url, None);
        assert_eq!(
            article.summary.as_deref(),
            Some("The South Carolina senator said")
        );
        assert_eq!(
            article.published,
            Utc.with_ymd_and_hms(2025, 10, 14, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_source_url_overrides_domain() {
        let mut redirect = item();
        redirect.url = Some("https://news.google.com/rss/articles/CBMi123".to_string());
        redirect.source_url = Some("https://www.thestate.com".to_string());
        assert_eq!(
            redirect.into_raw_article().unwrap().source_domain,
            "thestate.com"
        );
    }

    #[test]
    fn test_click_tracking_link_unwrapped() {
        let mut bing = item();
        bing.url = Some(
            "https://www.bing.com/news/apiclick.aspx?ref=FexRss&aid=&tid=abc&url=https%3a%2f%2fwww.wsav.com%2fnews%2fgraham-farm-bill%2f&c=123"
                .to_string(),
        );
        let article = bing.into_raw_article().unwrap();
        assert_eq!(article.url, "https://www.wsav.com/news/graham-farm-bill/");
        assert_eq!(article.source_domain, "wsav.com");

        assert_eq!(
            redirect_target("https://example.com/share?url=https%3A%2F%2Fother.com%2Fa"),
            None
        );
        assert_eq!(
            redirect_target("https://www.bing.com/news/apiclick.aspx?url=javascript%3Aalert(1)"),
            None
        );
    }

    #[test]
    fn test_malformed_items_rejected() {
        let mut no_url = item();
        no_url.url = None;
        assert!(no_url.into_raw_article().is_none());

        let mut bad_url = item();
        bad_url.url = Some("ftp://example.com/file".to_string());
        assert!(bad_url.into_raw_article().is_none());

        let mut no_title = item();
        no_title.title = Some("<br/>  ".to_string());
        assert!(no_title.into_raw_article().is_none());

        let mut bad_date = item();
        bad_date.published = Some("last Tuesday".to_string());
        assert!(bad_date.into_raw_article().is_none());
    }

    #[test]
    fn test_language_detected_when_missing() {
        let mut unlabelled = item();
        unlabelled.language = None;
        unlabelled.title = Some(
            "The senator announced a new bill to expand rural broadband access across the state"
                .to_string(),
        );
        assert_eq!(unlabelled.into_raw_article().unwrap().language, "en");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
        assert_eq!(parse_date("2025-01-15T08:00:00Z"), Some(expected));
        assert_eq!(parse_date("2025-01-15T10:00:00+02:00"), Some(expected));
        assert_eq!(parse_date("2025-01-15 08:00:00"), Some(expected));
        assert_eq!(
            parse_date("2025-01-15"),
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("http://www.Example.com/a/b/?utm_source=x&id=3#top"),
            "https://example.com/a/b/?id=3"
        );
        assert_eq!(
            canonical_url("https://example.com/a/b/"),
            "https://example.com/a/b"
        );
        assert_eq!(
            canonical_url("https://example.com/a/b?utm_medium=rss"),
            "https://example.com/a/b"
        );
    }
}
