use crate::parse::StructuredUrl;
use crate::policy::ScoringConfig;
use crate::rules::finding;
use crate::verdict::{DetectorId, Finding};

pub const MAX_PATH_LEN: usize = 80;
pub const MAX_QUERY_PARAMS: usize = 8;
pub const MAX_QUERY_LEN: usize = 120;

pub fn check_long_path(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if url.path().chars().count() <= MAX_PATH_LEN {
        return None;
    }
    Some(finding(
        DetectorId::LongPath,
        config,
        "Very long path (possible obfuscation)",
    ))
}

/// Counts parameters by occurrence: `a=1&a=2` is two.
pub fn check_many_params(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if url.query_pairs().len() <= MAX_QUERY_PARAMS {
        return None;
    }
    Some(finding(
        DetectorId::ManyParams,
        config,
        "Many query parameters",
    ))
}

/// Measures the re-encoded query, independent of the parameter count.
pub fn check_long_query(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if url.query_string().chars().count() <= MAX_QUERY_LEN {
        return None;
    }
    Some(finding(
        DetectorId::LongQuery,
        config,
        "Very long query string",
    ))
}
