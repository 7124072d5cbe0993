//! News-search providers that answer queries with an RSS or Atom feed.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use feed_rs::model::Feed;
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::header;
use std::io::Cursor;
use tokio::time::{timeout, Duration};
use tracing::debug;
use url::Url;

use super::types::ProviderItem;
use super::SourceClient;
use crate::types::RawArticle;
use crate::TARGET_FETCH;

pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search?hl=en-US&gl=US&ceid=US:en";
pub const BING_NEWS_SEARCH: &str = "https://www.bing.com/news/search?format=rss";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Queries a search endpoint that returns a feed; the search term is passed
/// as the `q` parameter.
pub struct RssSearchClient {
    id: String,
    base_url: Url,
    client: reqwest::Client,
    request_timeout: Duration,
}

impl RssSearchClient {
    pub fn new(id: &str, base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow!("Invalid search URL {}: {}", base_url, e))?;
        let client = reqwest::Client::builder()
            .gzip(true)
            .redirect(reqwest::redirect::Policy::default())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            id: id.to_string(),
            base_url,
            client,
            request_timeout,
        })
    }

    /// Google News first, then Bing News
    pub fn default_chain(request_timeout: Duration) -> Result<Vec<Self>> {
        Ok(vec![
            Self::new("google_news_rss", GOOGLE_NEWS_SEARCH, request_timeout)?,
            Self::new("bing_news_rss", BING_NEWS_SEARCH, request_timeout)?,
        ])
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

#[async_trait]
impl SourceClient for RssSearchClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<RawArticle>> {
        let url = self.search_url(query);
        debug!(target: TARGET_FETCH, "{}: requesting {}", self.id, url);

        let response = timeout(
            self.request_timeout,
            self.client
                .get(url.clone())
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, "application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9")
                .send(),
        )
        .await
        .map_err(|_| anyhow!("Request to {} timed out after {} seconds", url, self.request_timeout.as_secs()))??;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error {} from {}", response.status(), url));
        }

        let body = response.bytes().await?;
        parse_search_feed(&body, max_results)
            .map_err(|e| anyhow!("Failed to parse feed from {}: {}", url, e))
    }
}

/// Parse a search response body into validated articles
pub fn parse_search_feed(body: &[u8], max_results: usize) -> Result<Vec<RawArticle>> {
    let feed = parser::parse(Cursor::new(body))?;
    let sources = match item_source_urls(body) {
        Ok(sources) => sources,
        Err(e) => {
            debug!(target: TARGET_FETCH, "Ignoring item sources: {}", e);
            Vec::new()
        }
    };
    Ok(feed_to_articles(feed, &sources, max_results))
}

/// The `url` attribute of each RSS `<item>`'s `<source>` element, in document
/// order. feed-rs does not expose it, and aggregator item links all point at
/// the aggregator's own host.
pub fn item_source_urls(body: &[u8]) -> Result<Vec<Option<String>>> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut sources: Vec<Option<String>> = Vec::new();
    let mut in_item = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"item" => {
                in_item = true;
                sources.push(None);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"item" => sources.push(None),
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if in_item && e.local_name().as_ref() == b"source" =>
            {
                if let Some(slot) = sources.last_mut().filter(|slot| slot.is_none()) {
                    *slot = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.local_name().as_ref() == b"url")
                        .and_then(|a| a.unescape_value().ok())
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty());
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"item" => in_item = false,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(anyhow!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
        buf.clear();
    }

    Ok(sources)
}

/// Map feed entries through boundary validation. `sources` holds the
/// publisher URL per entry, aligned by position; it is ignored when it does
/// not line up with the entries.
pub fn feed_to_articles(
    feed: Feed,
    sources: &[Option<String>],
    max_results: usize,
) -> Vec<RawArticle> {
    let feed_language = feed.language.clone();
    let aligned = sources.len() == feed.entries.len();

    feed.entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| ProviderItem {
            url: entry.links.first().map(|link| link.href.clone()),
            title: entry.title.map(|t| t.content),
            published: entry.published.or(entry.updated).map(|d| d.to_rfc3339()),
            source_url: aligned
                .then(|| sources[i].clone())
                .flatten()
                .or_else(|| entry.source.clone()),
            language: feed_language.clone(),
            image_url: entry
                .media
                .iter()
                .flat_map(|m| m.thumbnails.iter())
                .map(|t| t.image.uri.clone())
                .next(),
            summary: entry.summary.map(|s| s.content),
        })
        .filter_map(ProviderItem::into_raw_article)
        .take(max_results)
        .collect()
}
