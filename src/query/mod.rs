//! Disambiguated search-term generation.

pub mod generator;
pub mod names;

pub use generator::{committee_topic, QueryGenerator};
pub use names::{aliases_for, CommonNames};
