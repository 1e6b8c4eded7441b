use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for each detector, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectorId {
    // Transport / hostname
    NotHttps,
    IpHost,
    Punycode,
    Shortener,
    ManySubdomains,
    UnusualPort,

    // Path / query
    LongPath,
    ManyParams,
    LongQuery,

    // Brand similarity
    LooksLikeBrand,
}

impl DetectorId {
    /// All detectors, in the order they are evaluated.
    pub const ALL: [DetectorId; 10] = [
        DetectorId::NotHttps,
        DetectorId::IpHost,
        DetectorId::Punycode,
        DetectorId::Shortener,
        DetectorId::ManySubdomains,
        DetectorId::UnusualPort,
        DetectorId::LongPath,
        DetectorId::ManyParams,
        DetectorId::LongQuery,
        DetectorId::LooksLikeBrand,
    ];

    /// Built-in weight for this detector.
    pub fn default_weight(self) -> u32 {
        match self {
            DetectorId::NotHttps => 40,
            DetectorId::IpHost => 45,
            DetectorId::Punycode => 40,
            DetectorId::Shortener => 20,
            DetectorId::ManySubdomains => 15,
            DetectorId::UnusualPort => 15,
            DetectorId::LongPath => 10,
            DetectorId::ManyParams => 10,
            DetectorId::LongQuery => 8,
            DetectorId::LooksLikeBrand => 60,
        }
    }
}

impl fmt::Display for DetectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{self:?}"));
        write!(f, "{s}")
    }
}

/// Discrete risk level derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn exit_code(self) -> i32 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::High => 1,
            RiskLevel::Medium => 2,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// One detector's contribution to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub detector: DetectorId,
    pub weight: u32,
    pub reason: String,
}

/// Hostname reported for input that could not be parsed.
pub const INVALID_HOSTNAME: &str = "(invalid)";

/// Reason reported for input that could not be parsed.
pub const INVALID_REASON: &str = "Invalid or malformed URL";

/// Complete risk assessment for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub url: String,
    pub hostname: String,
    pub score: u8,
    pub level: RiskLevel,
    pub reasons: Vec<String>,
}

impl RiskResult {
    /// Maximal-risk result for input that failed to parse.
    pub fn invalid(raw: &str) -> Self {
        let url = if raw.is_empty() {
            INVALID_HOSTNAME.to_string()
        } else {
            raw.to_string()
        };
        Self {
            url,
            hostname: INVALID_HOSTNAME.to_string(),
            score: 100,
            level: RiskLevel::High,
            reasons: vec![INVALID_REASON.to_string()],
        }
    }

    /// Whether this result came from the invalid-input path.
    pub fn is_invalid(&self) -> bool {
        self.hostname == INVALID_HOSTNAME
    }
}
