use once_cell::sync::Lazy;
use regex::Regex;

use crate::data;
use crate::parse::StructuredUrl;
use crate::policy::ScoringConfig;
use crate::rules::finding;
use crate::verdict::{DetectorId, Finding};

/// Dotted-quad shape only. Octet ranges are not checked, so `999.999.999.999` matches.
static IPV4_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,3}(?:\.[0-9]{1,3}){3}$").expect("ipv4 literal regex must compile")
});

/// Loose IPv4 dotted-decimal test.
pub fn is_ipv4_literal(host: &str) -> bool {
    IPV4_LITERAL_RE.is_match(host)
}

/// Non-ASCII code points, or an ACE (`xn--`) prefix at the start of the host.
pub fn has_homograph_risk(host: &str) -> bool {
    host.bytes().any(|b| b > 0x7F) || host.starts_with("xn--")
}

pub fn check_ip_host(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if !is_ipv4_literal(url.host()) {
        return None;
    }
    Some(finding(
        DetectorId::IpHost,
        config,
        "IP address used instead of domain",
    ))
}

pub fn check_homograph(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if !has_homograph_risk(url.host()) {
        return None;
    }
    Some(finding(
        DetectorId::Punycode,
        config,
        "Non-ASCII or punycode in domain (possible homograph)",
    ))
}

/// Counts labels beyond the last two; two or more extra labels fire.
/// IPv4 literals have octets, not labels.
pub fn check_subdomain_depth(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    if is_ipv4_literal(url.host()) {
        return None;
    }
    let sub_count = url.host_labels().len().saturating_sub(2);
    if sub_count < 2 {
        return None;
    }
    Some(finding(
        DetectorId::ManySubdomains,
        config,
        "Many subdomains (possible cloaking)",
    ))
}

/// Compare the registrable domain against the brand list.
///
/// Brands are scanned in order and the first decisive brand wins: an exact
/// match clears the domain, a single edit away flags it.
pub fn check_lookalike_brand(url: &StructuredUrl, config: &ScoringConfig) -> Option<Finding> {
    let candidate = data::registrable_domain(url.host());
    let brand = find_lookalike(&candidate, config.brands())?;
    tracing::debug!(candidate = %candidate, brand = %brand, "brand look-alike");
    Some(finding(
        DetectorId::LooksLikeBrand,
        config,
        "Domain looks like a high-value brand (possible typosquatting)",
    ))
}

/// Return the brand `candidate` imitates, if any.
pub fn find_lookalike<'a>(candidate: &str, brands: &'a [String]) -> Option<&'a str> {
    let candidate = candidate.to_lowercase();
    for brand in brands {
        if candidate == *brand {
            return None;
        }
        if levenshtein(&candidate, brand) <= 1 {
            return Some(brand.as_str());
        }
    }
    None
}

/// Classic edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let substitution = dp[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = substitution.min(dp[i - 1][j] + 1).min(dp[i][j - 1] + 1);
        }
    }
    dp[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> StructuredUrl {
        StructuredUrl::parse(raw).unwrap()
    }

    fn brands(list: &[&str]) -> Vec<String> {
        list.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_ipv4_literal() {
        assert!(is_ipv4_literal("192.168.1.1"));
        assert!(is_ipv4_literal("1.2.3.4"));
        assert!(!is_ipv4_literal("1.2.3"));
        assert!(!is_ipv4_literal("1.2.3.4.5"));
        assert!(!is_ipv4_literal("1234.1.1.1"));
        assert!(!is_ipv4_literal("example.com"));
        assert!(!is_ipv4_literal("[::1]"));
    }

    #[test]
    fn test_ipv4_literal_ignores_octet_range() {
        assert!(is_ipv4_literal("999.999.999.999"));
    }

    #[test]
    fn test_ipv4_literal_ascii_digits_only() {
        // Arabic-Indic digits are `\d` in Unicode regex mode.
        assert!(!is_ipv4_literal("\u{0661}.2.3.4"));
    }

    #[test]
    fn test_ip_host_fires_on_opaque_out_of_range_host() {
        let url = parse("foo://999.999.999.999/");
        assert!(check_ip_host(&url, ScoringConfig::builtin()).is_some());
    }

    #[test]
    fn test_ip_host_ignores_ipv6() {
        let url = parse("http://[::1]/");
        assert!(check_ip_host(&url, ScoringConfig::builtin()).is_none());
    }

    #[test]
    fn test_homograph_risk() {
        assert!(has_homograph_risk("xn--pple-43d.com"));
        assert!(has_homograph_risk("g\u{043e}ogle.com"));
        assert!(!has_homograph_risk("google.com"));
        assert!(!has_homograph_risk("www.xn--pple-43d.com"));
    }

    #[test]
    fn test_homograph_detector_on_idn() {
        let url = parse("https://\u{0430}pple.com/");
        let f = check_homograph(&url, ScoringConfig::builtin()).unwrap();
        assert_eq!(f.detector, DetectorId::Punycode);
        assert_eq!(f.weight, 40);
    }

    #[test]
    fn test_subdomain_depth() {
        let cfg = ScoringConfig::builtin();
        assert!(check_subdomain_depth(&parse("https://example.com/"), cfg).is_none());
        assert!(check_subdomain_depth(&parse("https://www.example.com/"), cfg).is_none());
        assert!(check_subdomain_depth(&parse("https://a.b.example.com/"), cfg).is_some());
        assert!(check_subdomain_depth(&parse("https://a.b.c.d.example.com/"), cfg).is_some());
        assert!(check_subdomain_depth(&parse("http://localhost/"), cfg).is_none());
    }

    #[test]
    fn test_subdomain_depth_skips_ip_octets() {
        let cfg = ScoringConfig::builtin();
        assert!(check_subdomain_depth(&parse("http://192.168.1.1/"), cfg).is_none());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("google.com", "google.com"), 0);
        assert_eq!(levenshtein("goggle.com", "google.com"), 1);
        assert_eq!(levenshtein("gogle.com", "google.com"), 1);
        assert_eq!(levenshtein("gooogle.com", "google.com"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("p\u{0430}ypal.com", "paypal.com"), 1);
    }

    #[test]
    fn test_find_lookalike_exact_match_clears() {
        let list = brands(&["google.com", "paypal.com"]);
        assert_eq!(find_lookalike("google.com", &list), None);
        assert_eq!(find_lookalike("GOOGLE.com", &list), None);
    }

    #[test]
    fn test_find_lookalike_one_edit() {
        let list = brands(&["google.com", "paypal.com"]);
        assert_eq!(find_lookalike("goggle.com", &list), Some("google.com"));
        assert_eq!(find_lookalike("paypa1.com", &list), Some("paypal.com"));
        assert_eq!(find_lookalike("paypall.com", &list), Some("paypal.com"));
    }

    #[test]
    fn test_find_lookalike_two_edits_ignored() {
        let list = brands(&["google.com"]);
        assert_eq!(find_lookalike("g00gle.com", &list), None);
    }

    #[test]
    fn test_find_lookalike_first_decisive_brand_wins() {
        // The earlier brand is one edit away, so the later exact match is never reached.
        let list = brands(&["abc.com", "abd.com"]);
        assert_eq!(find_lookalike("abd.com", &list), Some("abc.com"));
        // And an earlier exact match stops the scan before a near miss.
        let list = brands(&["abd.com", "abc.com"]);
        assert_eq!(find_lookalike("abd.com", &list), None);
    }

    #[test]
    fn test_lookalike_uses_registrable_domain() {
        let cfg = ScoringConfig::builtin();
        assert!(check_lookalike_brand(&parse("https://accounts.google.com/"), cfg).is_none());
        assert!(check_lookalike_brand(&parse("https://login.goggle.com/"), cfg).is_some());
        assert!(check_lookalike_brand(&parse("https://google.com.evil.example/"), cfg).is_none());
    }

    #[test]
    fn test_lookalike_on_short_host() {
        let cfg = ScoringConfig::builtin();
        assert!(check_lookalike_brand(&parse("http://localhost/"), cfg).is_none());
        assert!(check_lookalike_brand(&parse("mailto:x@example.com"), cfg).is_none());
    }
}
