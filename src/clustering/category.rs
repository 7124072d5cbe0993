use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::similarity::title_tokens;

/// Coarse story type assigned to a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryCategory {
    Legislation,
    Election,
    Committee,
    Oversight,
    Budget,
    General,
}

impl fmt::Display for StoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoryCategory::Legislation => "legislation",
            StoryCategory::Election => "election",
            StoryCategory::Committee => "committee",
            StoryCategory::Oversight => "oversight",
            StoryCategory::Budget => "budget",
            StoryCategory::General => "general",
        };
        write!(f, "{}", name)
    }
}

// Earlier entries win ties
const CATEGORY_KEYWORDS: &[(StoryCategory, &[&str])] = &[
    (
        StoryCategory::Legislation,
        &[
            "bill", "act", "legislation", "law", "amendment", "introduces", "sponsors",
            "cosponsor", "passes", "vote", "votes", "veto", "resolution",
        ],
    ),
    (
        StoryCategory::Election,
        &[
            "election", "campaign", "primary", "reelection", "poll", "ballot", "candidate",
            "challenger", "race", "endorsement", "endorses", "fundraising", "midterm",
        ],
    ),
    (
        StoryCategory::Committee,
        &[
            "committee", "subcommittee", "hearing", "testify", "testimony", "markup", "chairman",
            "chairwoman", "nomination", "confirmation",
        ],
    ),
    (
        StoryCategory::Oversight,
        &[
            "investigation", "probe", "oversight", "inquiry", "subpoena", "audit", "watchdog",
            "demands", "letter", "accountability",
        ],
    ),
    (
        StoryCategory::Budget,
        &[
            "budget", "funding", "appropriations", "spending", "deficit", "tax", "taxes",
            "shutdown", "earmark", "grant",
        ],
    ),
];

lazy_static! {
    // Stemmed keyword -> categories it votes for
    static ref KEYWORD_INDEX: HashMap<String, Vec<StoryCategory>> = {
        let stemmer = Stemmer::create(Algorithm::English);
        let mut index: HashMap<String, Vec<StoryCategory>> = HashMap::new();
        for (category, keywords) in CATEGORY_KEYWORDS {
            for keyword in *keywords {
                let entry = index.entry(stemmer.stem(keyword).to_string()).or_default();
                if !entry.contains(category) {
                    entry.push(*category);
                }
            }
        }
        index
    };
}

/// Keyword vote over member titles; no keyword hits means `General`
pub fn categorize<'a, I>(titles: I) -> StoryCategory
where
    I: IntoIterator<Item = &'a str>,
{
    let mut votes: HashMap<StoryCategory, usize> = HashMap::new();
    for title in titles {
        for token in title_tokens(title) {
            if let Some(categories) = KEYWORD_INDEX.get(&token) {
                for category in categories {
                    *votes.entry(*category).or_default() += 1;
                }
            }
        }
    }

    let mut best = StoryCategory::General;
    let mut best_votes = 0;
    for (category, _) in CATEGORY_KEYWORDS {
        let count = votes.get(category).copied().unwrap_or(0);
        if count > best_votes {
            best = *category;
            best_votes = count;
        }
    }
    best
}
