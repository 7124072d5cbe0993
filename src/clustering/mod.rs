// Module declarations
pub mod category;
pub mod engine;
pub mod significance;
pub mod similarity;
pub mod types;

pub use category::{categorize, StoryCategory};
pub use engine::{newest_first, ClusteringEngine};
pub use significance::cluster_importance;
pub use similarity::cluster_title_similarity;
pub use types::{ClusteringOutcome, StoryCluster};

/// Default minimum similarity for two titles to describe the same event
pub const MIN_CLUSTER_SIMILARITY: f64 = 0.60;
