use crate::parse::StructuredUrl;
use crate::policy::ScoringConfig;
use crate::rules::finding;
use crate::verdict::{DetectorId, Finding};

/// Anything other than `https` travels unencrypted or is not a web link at all.
pub fn check_protocol(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if url.scheme() == "https" {
        return None;
    }
    Some(finding(
        DetectorId::NotHttps,
        config,
        "Not HTTPS (connection not encrypted)",
    ))
}

pub fn check_shortener(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if !config.is_shortener(url.host()) {
        return None;
    }
    Some(finding(
        DetectorId::Shortener,
        config,
        "URL shortener (destination hidden)",
    ))
}

/// Flags an explicit port unless it is the conventional one for the scheme.
pub fn check_unusual_port(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    let port = url.port()?;
    if is_default_port(url.scheme(), port) {
        return None;
    }
    Some(finding(
        DetectorId::UnusualPort,
        config,
        format!("Unusual port ({port})"),
    ))
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    matches!((scheme, port), ("https", 443) | ("http", 80))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> StructuredUrl {
        StructuredUrl::parse(raw).unwrap()
    }

    #[test]
    fn test_https_not_flagged() {
        assert!(check_protocol(&parse("https://example.com/"), ScoringConfig::builtin()).is_none());
    }

    #[test]
    fn test_http_flagged() {
        let f = check_protocol(&parse("http://example.com/"), ScoringConfig::builtin()).unwrap();
        assert_eq!(f.detector, DetectorId::NotHttps);
        assert_eq!(f.weight, 40);
        assert_eq!(f.reason, "Not HTTPS (connection not encrypted)");
    }

    #[test]
    fn test_other_schemes_flagged() {
        for raw in ["ftp://example.com/", "mailto:a@example.com", "data:text/plain,hi"] {
            assert!(
                check_protocol(&parse(raw), ScoringConfig::builtin()).is_some(),
                "{raw} should be flagged"
            );
        }
    }

    #[test]
    fn test_shortener_exact_host() {
        let cfg = ScoringConfig::builtin();
        assert!(check_shortener(&parse("https://bit.ly/abc"), cfg).is_some());
        assert!(check_shortener(&parse("https://BIT.LY/abc"), cfg).is_some());
        assert!(check_shortener(&parse("https://www.bit.ly/abc"), cfg).is_none());
        assert!(check_shortener(&parse("https://notbit.ly/abc"), cfg).is_none());
    }

    #[test]
    fn test_unusual_port_reason_includes_port() {
        let f = check_unusual_port(&parse("https://example.com:8443/"), ScoringConfig::builtin())
            .unwrap();
        assert_eq!(f.reason, "Unusual port (8443)");
    }

    #[test]
    fn test_default_ports_not_flagged() {
        let cfg = ScoringConfig::builtin();
        assert!(check_unusual_port(&parse("https://example.com:443/"), cfg).is_none());
        assert!(check_unusual_port(&parse("http://example.com:80/"), cfg).is_none());
        assert!(check_unusual_port(&parse("https://example.com/"), cfg).is_none());
    }

    #[test]
    fn test_cross_scheme_default_port_flagged() {
        let cfg = ScoringConfig::builtin();
        assert!(check_unusual_port(&parse("https://example.com:80/"), cfg).is_some());
        assert!(check_unusual_port(&parse("http://example.com:443/"), cfg).is_some());
    }

    #[test]
    fn test_port_zero_flagged() {
        let f = check_unusual_port(&parse("http://example.com:0/"), ScoringConfig::builtin())
            .unwrap();
        assert_eq!(f.reason, "Unusual port (0)");
    }

    #[test]
    fn test_non_web_scheme_port_flagged() {
        let f = check_unusual_port(&parse("ftp://example.com:2121/"), ScoringConfig::builtin());
        assert!(f.is_some());
    }
}
