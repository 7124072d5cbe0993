//! Reference name tables used to decide how aggressively a subject's name
//! must be disambiguated, plus known nickname aliases.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

// Frequent US given names. A subject with one of these needs full-name or
// titled searches to avoid coverage of unrelated people.
const COMMON_FIRST_NAMES: &[&str] = &[
    "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
    "charles", "christopher", "daniel", "matthew", "anthony", "mark", "donald", "steven", "paul",
    "andrew", "joshua", "kenneth", "kevin", "brian", "george", "timothy", "ronald", "edward",
    "jason", "jeffrey", "ryan", "jacob", "gary", "nicholas", "eric", "jonathan", "stephen",
    "larry", "justin", "scott", "brandon", "benjamin", "samuel", "gregory", "frank", "alexander",
    "raymond", "patrick", "jack", "dennis", "jerry", "tim", "mike", "bill", "bob", "jim", "tom",
    "joe", "dan", "chris", "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara",
    "susan", "jessica", "sarah", "karen", "nancy", "lisa", "betty", "margaret", "sandra",
    "ashley", "kimberly", "emily", "donna", "michelle", "dorothy", "carol", "amanda", "melissa",
    "deborah", "stephanie", "rebecca", "sharon", "laura", "cynthia", "kathleen", "amy",
    "angela", "anna", "maria", "katie",
];

// Frequent US surnames, plus surnames that double as common words or given
// names ("Young", "King", "James").
const COMMON_LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen", "king", "wright",
    "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson", "baker", "hall",
    "rivera", "campbell", "mitchell", "carter", "roberts", "james", "collins", "stewart",
    "morris", "murphy", "cook", "rogers", "reed", "bell", "kelly", "wood", "price", "rose",
    "long", "gray", "ross", "hunt", "black", "rice", "stone", "banks", "wells", "cole", "hayes",
    "ford", "hart", "cruz", "paul", "kennedy", "graham", "mann", "lucas", "booker", "warren",
];

lazy_static! {
    static ref FIRST_NAMES: HashSet<&'static str> = COMMON_FIRST_NAMES.iter().copied().collect();
    static ref LAST_NAMES: HashSet<&'static str> = COMMON_LAST_NAMES.iter().copied().collect();

    // Formal name -> names the press actually uses
    static ref NAME_ALIASES: HashMap<&'static str, Vec<&'static str>> = {
        let mut map = HashMap::new();
        map.insert("bernard sanders", vec!["Bernie Sanders"]);
        map.insert("charles schumer", vec!["Chuck Schumer"]);
        map.insert("charles grassley", vec!["Chuck Grassley"]);
        map.insert("robert casey", vec!["Bob Casey"]);
        map.insert("robert menendez", vec!["Bob Menendez"]);
        map.insert("mitchell mcconnell", vec!["Mitch McConnell"]);
        map.insert("addison mcconnell", vec!["Mitch McConnell"]);
        map.insert("james risch", vec!["Jim Risch"]);
        map.insert("james banks", vec!["Jim Banks"]);
        map.insert("james jordan", vec!["Jim Jordan"]);
        map.insert("rafael cruz", vec!["Ted Cruz"]);
        map.insert("alexandria ocasio-cortez", vec!["AOC", "Ocasio-Cortez"]);
        map.insert("william cassidy", vec!["Bill Cassidy"]);
        map.insert("william hagerty", vec!["Bill Hagerty"]);
        map.insert("timothy scott", vec!["Tim Scott"]);
        map.insert("timothy kaine", vec!["Tim Kaine"]);
        map.insert("richard durbin", vec!["Dick Durbin"]);
        map.insert("richard blumenthal", vec!["Dick Blumenthal"]);
        map.insert("thomas tillis", vec!["Thom Tillis"]);
        map.insert("edward markey", vec!["Ed Markey"]);
        map.insert("christopher murphy", vec!["Chris Murphy"]);
        map.insert("christopher coons", vec!["Chris Coons"]);
        map.insert("michael lee", vec!["Mike Lee"]);
        map.insert("michael johnson", vec!["Mike Johnson"]);
        map
    };
}

/// Words that carry no topical signal in a committee name
pub const GENERIC_COMMITTEE_WORDS: &[&str] = &[
    "committee", "subcommittee", "select", "special", "joint", "permanent", "standing", "house",
    "senate", "united", "states", "the", "on", "of", "and", "for", "to", "in", "&",
];

/// Decides whether a first or last name is frequent enough that bare-name
/// search is unreliable.
#[derive(Debug, Clone, Default)]
pub struct CommonNames {
    extra: HashSet<String>,
}

impl CommonNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds configured names on top of the built-in reference lists
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty()),
        );
        self
    }

    pub fn is_common_first(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        FIRST_NAMES.contains(name.as_str()) || self.extra.contains(&name)
    }

    pub fn is_common_last(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        LAST_NAMES.contains(name.as_str()) || self.extra.contains(&name)
    }

    /// True when either half of the name needs disambiguation
    pub fn is_common(&self, first: &str, last: &str) -> bool {
        self.is_common_first(first) || self.is_common_last(last)
    }
}

/// Known nicknames and alternate forms for a full name
pub fn aliases_for(full_name: &str) -> Vec<&'static str> {
    NAME_ALIASES
        .get(full_name.trim().to_lowercase().as_str())
        .cloned()
        .unwrap_or_default()
}
