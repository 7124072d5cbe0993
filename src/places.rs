//! State names and district city tables.
//!
//! A small built-in table covers a handful of districts. Deployments extend it
//! with a JSON file named by `PLACES_JSON_PATH`, shaped as
//! `{ "SC": { "1": ["Charleston"], "statewide": ["Columbia"] } }`.

use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const PLACES_JSON_PATH_ENV: &str = "PLACES_JSON_PATH";

/// Key used for cities that matter to the whole state (and to senators)
pub const STATEWIDE: &str = "statewide";

const STATE_NAMES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
    ("PR", "Puerto Rico"),
];

/// Postal codes that are also ordinary English words in headlines
pub const AMBIGUOUS_STATE_CODES: &[&str] = &[
    "IN", "OR", "ME", "OK", "HI", "OH", "AS", "DE", "PA", "LA", "MA", "CO", "ID",
];

lazy_static! {
    static ref STATES: HashMap<&'static str, &'static str> = STATE_NAMES.iter().copied().collect();

    static ref BUILTIN_CITIES: BTreeMap<String, BTreeMap<String, Vec<String>>> = {
        let mut places = BTreeMap::new();
        let mut insert = |state: &str, district: &str, cities: &[&str]| {
            places
                .entry(state.to_string())
                .or_insert_with(BTreeMap::new)
                .insert(
                    district.to_string(),
                    cities.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
                );
        };
        insert("SC", "1", &["Charleston", "Mount Pleasant", "Hilton Head", "Beaufort"]);
        insert("SC", "2", &["Columbia", "Aiken", "Lexington"]);
        insert("SC", STATEWIDE, &["Columbia", "Charleston", "Greenville"]);
        insert("MI", "10", &["Sterling Heights", "Macomb", "Port Huron"]);
        insert("MI", STATEWIDE, &["Detroit", "Lansing", "Grand Rapids"]);
        insert("GA", STATEWIDE, &["Atlanta", "Savannah", "Augusta"]);
        insert("TX", "2", &["Houston", "Kingwood", "Humble"]);
        insert("TX", STATEWIDE, &["Austin", "Houston", "Dallas", "San Antonio"]);
        insert("NY", "14", &["Bronx", "Queens"]);
        insert("NY", STATEWIDE, &["Albany", "New York City", "Buffalo"]);
        places
    };
}

/// Full state name for a postal code ("SC" -> "South Carolina")
pub fn state_name(code: &str) -> Option<&'static str> {
    STATES.get(code.trim().to_uppercase().as_str()).copied()
}

/// City lookup keyed by state code, then district number or [`STATEWIDE`]
#[derive(Debug, Clone)]
pub struct DistrictPlaces {
    cities: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Default for DistrictPlaces {
    fn default() -> Self {
        Self {
            cities: BUILTIN_CITIES.clone(),
        }
    }
}

impl DistrictPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table merged with the file named by `PLACES_JSON_PATH`, if set.
    /// A missing or malformed file is logged and ignored.
    pub fn from_env() -> Self {
        let mut places = Self::default();
        if let Ok(path) = env::var(PLACES_JSON_PATH_ENV) {
            match load_places_file(&path) {
                Ok(extra) => places.merge(extra),
                Err(err) => warn!("Ignoring places file {}: {}", path, err),
            }
        }
        places
    }

    /// Adds or replaces district entries
    pub fn merge(&mut self, extra: BTreeMap<String, BTreeMap<String, Vec<String>>>) {
        for (state, districts) in extra {
            let entry = self.cities.entry(state.to_uppercase()).or_default();
            for (district, cities) in districts {
                entry.insert(district, cities);
            }
        }
    }

    /// Cities for a district; `None` (senators, at-large) yields the statewide list
    pub fn cities_for(&self, state: &str, district: Option<u32>) -> &[String] {
        let Some(districts) = self.cities.get(&state.to_uppercase()) else {
            return &[];
        };
        let key = district.map_or_else(|| STATEWIDE.to_string(), |d| d.to_string());
        districts
            .get(&key)
            .map(|cities| cities.as_slice())
            .unwrap_or(&[])
    }
}

/// Loads a places JSON file into `state -> district -> cities`.
pub fn load_places_file(
    json_path: &str,
) -> Result<BTreeMap<String, BTreeMap<String, Vec<String>>>, String> {
    if !Path::new(json_path).exists() {
        return Err(format!(
            "The specified places file does not exist: {}",
            json_path
        ));
    }

    let json_data = fs::read_to_string(json_path)
        .map_err(|err| format!("Failed to read the places file: {}", err))?;

    parse_places_json(&json_data)
}

fn parse_places_json(
    json_data: &str,
) -> Result<BTreeMap<String, BTreeMap<String, Vec<String>>>, String> {
    let places_data: Value = serde_json::from_str(json_data)
        .map_err(|err| format!("Failed to parse places file: {}", err))?;

    let mut hierarchy = BTreeMap::new();

    let Value::Object(states) = places_data else {
        return Err("Places file must be a JSON object keyed by state".to_string());
    };

    for (state, state_value) in states {
        let mut districts_map = BTreeMap::new();
        if let Value::Object(districts) = state_value {
            for (district, cities_value) in districts {
                if let Value::Array(cities) = cities_value {
                    let cities: Vec<String> = cities
                        .iter()
                        .filter_map(|c| c.as_str())
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect();
                    districts_map.insert(district, cities);
                }
            }
        }
        debug!("Loaded {} district entries for {}", districts_map.len(), state);
        hierarchy.insert(state.to_uppercase(), districts_map);
    }

    Ok(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_name() {
        assert_eq!(state_name("sc"), Some("South Carolina"));
        assert_eq!(state_name("NY"), Some("New York"));
        assert_eq!(state_name("ZZ"), None);
    }

    #[test]
    fn test_cities_for() {
        let places = DistrictPlaces::new();
        assert!(places
            .cities_for("SC", Some(1))
            .contains(&"Charleston".to_string()));
        assert!(places.cities_for("sc", None).contains(&"Greenville".to_string()));
        assert!(places.cities_for("SC", Some(7)).is_empty());
        assert!(places.cities_for("WY", None).is_empty());
    }

    #[test]
    fn test_parse_and_merge() {
        let extra = parse_places_json(
            r#"{"wy": {"statewide": ["Cheyenne", " ", 7]}, "SC": {"7": ["Myrtle Beach"]}}"#,
        )
        .unwrap();
        let mut places = DistrictPlaces::new();
        places.merge(extra);
        assert_eq!(places.cities_for("WY", None), &["Cheyenne".to_string()]);
        assert_eq!(places.cities_for("SC", Some(7)), &["Myrtle Beach".to_string()]);
        assert!(!places.cities_for("SC", Some(1)).is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_places_json("[1, 2]").is_err());
        assert!(parse_places_json("not json").is_err());
        assert!(load_places_file("/nonexistent/places.json").is_err());
    }
}
