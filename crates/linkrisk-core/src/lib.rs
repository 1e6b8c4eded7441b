pub mod data;
pub mod engine;
pub mod output;
pub mod parse;
pub mod policy;
pub mod rules;
pub mod verdict;

pub use engine::{score_url, score_url_with};
pub use policy::{ConfigError, ScoringConfig, Thresholds};
pub use verdict::{DetectorId, RiskLevel, RiskResult};
