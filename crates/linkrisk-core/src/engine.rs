use crate::parse::StructuredUrl;
use crate::policy::ScoringConfig;
use crate::rules;
use crate::verdict::{Finding, RiskResult};

/// Highest score a result can carry.
pub const MAX_SCORE: u8 = 100;

/// Score a URL against the built-in configuration.
pub fn score_url(raw: &str) -> RiskResult {
    score_url_with(raw, ScoringConfig::builtin())
}

/// Score a URL against an injected configuration.
///
/// Never fails: input that does not parse yields the maximal-risk result
/// without running any detector.
pub fn score_url_with(raw: &str, config: &ScoringConfig) -> RiskResult {
    let url = match StructuredUrl::parse(raw) {
        Ok(url) => url,
        Err(err) => {
            tracing::debug!(error = %err, "unparseable URL scored as maximal risk");
            return RiskResult::invalid(raw);
        }
    };

    let findings = rules::check(&url, config);
    aggregate(raw, &url, findings, config)
}

/// Fold findings into a result: weights summed and clamped, reasons kept in order.
fn aggregate(
    raw: &str,
    url: &StructuredUrl,
    findings: Vec<Finding>,
    config: &ScoringConfig,
) -> RiskResult {
    let total: u32 = findings.iter().map(|f| f.weight).sum();
    let score = total.min(u32::from(MAX_SCORE)) as u8;
    let level = config.thresholds().level_for(score);
    let reasons = findings.into_iter().map(|f| f.reason).collect();

    RiskResult {
        url: raw.to_string(),
        hostname: url.host().to_string(),
        score,
        level,
        reasons,
    }
}
