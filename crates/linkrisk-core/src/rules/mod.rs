pub mod hostname;
pub mod path;
pub mod transport;

use crate::parse::StructuredUrl;
use crate::policy::ScoringConfig;
use crate::verdict::{DetectorId, Finding};

/// A detector inspects one URL and optionally contributes a finding.
pub type Detector = fn(&StructuredUrl, &ScoringConfig) -> Option<Finding>;

/// Every detector, in evaluation order. Reason order in results follows this table.
pub const DETECTORS: &[(DetectorId, Detector)] = &[
    (DetectorId::NotHttps, transport::check_protocol),
    (DetectorId::IpHost, hostname::check_ip_host),
    (DetectorId::Punycode, hostname::check_homograph),
    (DetectorId::Shortener, transport::check_shortener),
    (DetectorId::ManySubdomains, hostname::check_subdomain_depth),
    (DetectorId::UnusualPort, transport::check_unusual_port),
    (DetectorId::LongPath, path::check_long_path),
    (DetectorId::ManyParams, path::check_many_params),
    (DetectorId::LongQuery, path::check_long_query),
    (DetectorId::LooksLikeBrand, hostname::check_lookalike_brand),
];

/// Run all detectors against a parsed URL.
pub fn check(url: &StructuredUrl, config: &ScoringConfig) -> Vec<Finding> {
    DETECTORS
        .iter()
        .filter_map(|(id, detector)| {
            let finding = detector(url, config)?;
            tracing::debug!(detector = %id, weight = finding.weight, "detector fired");
            Some(finding)
        })
        .collect()
}

/// Build a finding carrying the configured weight for `detector`.
pub(crate) fn finding(
    detector: DetectorId,
    config: &ScoringConfig,
    reason: impl Into<String>,
) -> Finding {
    Finding {
        detector,
        weight: config.weight(detector),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_evaluation_order() {
        let ids: Vec<DetectorId> = DETECTORS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, DetectorId::ALL.to_vec());
    }

    #[test]
    fn test_each_detector_reports_its_own_id() {
        let params: Vec<String> = (0..12).map(|i| format!("key{i}=value{i}")).collect();
        let raw = format!(
            "http://sub.deep.mail.example.com:8080/{}?{}",
            "p".repeat(90),
            params.join("&")
        );
        let url = StructuredUrl::parse(&raw).unwrap();
        let config = ScoringConfig::builtin();
        let mut fired = 0;
        for (id, detector) in DETECTORS {
            if let Some(finding) = detector(&url, config) {
                assert_eq!(finding.detector, *id);
                assert_eq!(finding.weight, config.weight(*id));
                fired += 1;
            }
        }
        assert_eq!(fired, 6);
    }

    #[test]
    fn test_clean_url_has_no_findings() {
        let url = StructuredUrl::parse("https://example.com/").unwrap();
        assert!(check(&url, ScoringConfig::builtin()).is_empty());
    }
}
