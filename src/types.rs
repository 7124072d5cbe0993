//! Shared data model for the news pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NewsError;

/// Legislative chamber a subject sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chamber {
    Senate,
    House,
}

impl Chamber {
    /// Long-form title used in headlines ("Senator Smith")
    pub fn title(&self) -> &'static str {
        match self {
            Chamber::Senate => "Senator",
            Chamber::House => "Representative",
        }
    }

    /// Abbreviated title ("Sen. Smith")
    pub fn short_title(&self) -> &'static str {
        match self {
            Chamber::Senate => "Sen.",
            Chamber::House => "Rep.",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chamber::Senate => write!(f, "senate"),
            Chamber::House => write!(f, "house"),
        }
    }
}

impl FromStr for Chamber {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "senate" | "sen" | "senator" => Ok(Chamber::Senate),
            "house" | "rep" | "representative" => Ok(Chamber::House),
            other => Err(NewsError::InvalidRequest(format!(
                "unknown chamber '{}', expected senate or house",
                other
            ))),
        }
    }
}

/// The public figure whose coverage is being retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Two-letter postal code, upper case
    pub state: String,
    pub chamber: Chamber,
    pub district: Option<u32>,
    #[serde(default)]
    pub committees: Vec<String>,
}

impl Subject {
    pub fn new(
        id: &str,
        first_name: &str,
        last_name: &str,
        state: &str,
        chamber: Chamber,
    ) -> Self {
        Subject {
            id: id.to_string(),
            full_name: format!("{} {}", first_name.trim(), last_name.trim()),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            state: state.trim().to_uppercase(),
            chamber,
            district: None,
            committees: Vec::new(),
        }
    }

    pub fn with_district(mut self, district: u32) -> Self {
        self.district = Some(district);
        self
    }

    pub fn with_committees(mut self, committees: Vec<String>) -> Self {
        self.committees = committees;
        self
    }

    /// Numbered district of a House member. At-large seats (district 0)
    /// and senators have none.
    pub fn house_district(&self) -> Option<u32> {
        match self.chamber {
            Chamber::House => self.district.filter(|d| *d > 0),
            Chamber::Senate => None,
        }
    }

    /// House member elected statewide
    pub fn is_at_large(&self) -> bool {
        self.chamber == Chamber::House && self.district == Some(0)
    }
}

/// An article exactly as a provider returned it, after boundary validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub url: String,
    pub title: String,
    pub published: DateTime<Utc>,
    pub source_domain: String,
    pub language: String,
    pub image_url: Option<String>,
    pub summary: Option<String>,
}

/// An article that passed the relevance filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateArticle {
    #[serde(flatten)]
    pub article: RawArticle,
    pub passed_quality: bool,
    pub passed_disambiguation: bool,
}

impl CandidateArticle {
    pub fn url(&self) -> &str {
        &self.article.url
    }

    pub fn title(&self) -> &str {
        &self.article.title
    }

    pub fn domain(&self) -> &str {
        &self.article.source_domain
    }

    pub fn published(&self) -> DateTime<Utc> {
        self.article.published
    }
}

/// Geographic relevance bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelevanceTier::High => write!(f, "high"),
            RelevanceTier::Medium => write!(f, "medium"),
            RelevanceTier::Low => write!(f, "low"),
        }
    }
}

/// Output of the local impact scorer for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalImpact {
    pub score: u32,
    pub tier: RelevanceTier,
    pub factors: Vec<String>,
}

/// Display-oriented view of the cluster an article leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub related_count: usize,
    pub related_urls: Vec<String>,
    pub sources: Vec<String>,
    pub category: String,
    pub importance: f64,
}

/// Final per-article shape returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub candidate: CandidateArticle,
    pub local_impact_score: u32,
    pub relevance_tier: RelevanceTier,
    pub factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterSummary>,
}

impl ScoredArticle {
    pub fn url(&self) -> &str {
        self.candidate.url()
    }

    pub fn domain(&self) -> &str {
        self.candidate.domain()
    }

    pub fn published(&self) -> DateTime<Utc> {
        self.candidate.published()
    }
}

/// Whether the pipeline found anything to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Ok,
    NoData,
}

/// One page of news for a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub articles: Vec<ScoredArticle>,
    pub total_count: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub search_terms: Vec<String>,
    pub data_source: Option<String>,
    pub status: ResultStatus,
    pub message: String,
    pub generated_at: DateTime<Utc>,
}
