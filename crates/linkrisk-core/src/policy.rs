use etcetera::BaseStrategy;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::data;
use crate::verdict::{DetectorId, RiskLevel};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LINKRISK_CONFIG";

/// Largest weight a single detector may contribute.
pub const MAX_WEIGHT: u32 = 100;

/// Errors raised while building a scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("no weight configured for detector {0}")]
    MissingWeight(DetectorId),
    #[error("weight {weight} for detector {detector} exceeds {max}", max = MAX_WEIGHT)]
    WeightOutOfRange { detector: DetectorId, weight: u32 },
    #[error("threshold {name}={value} exceeds 100")]
    ThresholdOutOfRange { name: &'static str, value: u8 },
    #[error("medium threshold {medium} is above high threshold {high}")]
    ThresholdOrder { medium: u8, high: u8 },
    #[error("empty entry in {0} list")]
    EmptyListEntry(&'static str),
}

/// Score cut-offs for the discrete risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 75,
            medium: 40,
        }
    }
}

impl Thresholds {
    /// Map a clamped score to its level.
    pub fn level_for(&self, score: u8) -> RiskLevel {
        if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.high > 100 {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "high",
                value: self.high,
            });
        }
        if self.medium > 100 {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "medium",
                value: self.medium,
            });
        }
        if self.medium > self.high {
            return Err(ConfigError::ThresholdOrder {
                medium: self.medium,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Immutable scoring configuration shared by reference across callers.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    weights: HashMap<DetectorId, u32>,
    thresholds: Thresholds,
    brands: Vec<String>,
    shorteners: HashSet<String>,
}

/// On-disk YAML form. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Per-detector weight overrides, merged over the defaults.
    pub weights: HashMap<DetectorId, u32>,

    pub thresholds: Option<Thresholds>,

    /// Replaces the built-in brand list.
    pub brands: Option<Vec<String>>,

    /// Extends the brand list.
    pub additional_brands: Vec<String>,

    /// Replaces the built-in shortener list.
    pub shorteners: Option<Vec<String>>,

    /// Extends the shortener list.
    pub additional_shorteners: Vec<String>,
}

static BUILTIN: Lazy<ScoringConfig> = Lazy::new(|| ScoringConfig {
    weights: default_weights(),
    thresholds: Thresholds::default(),
    brands: data::builtin_brands().iter().map(|b| b.to_string()).collect(),
    shorteners: data::builtin_shorteners()
        .iter()
        .map(|s| s.to_string())
        .collect(),
});

fn default_weights() -> HashMap<DetectorId, u32> {
    DetectorId::ALL
        .iter()
        .map(|d| (*d, d.default_weight()))
        .collect()
}

impl ScoringConfig {
    /// The built-in configuration, constructed once per process.
    pub fn builtin() -> &'static ScoringConfig {
        &BUILTIN
    }

    /// Build and validate a configuration.
    ///
    /// Every detector needs a weight. List entries are trimmed and
    /// lowercased; brand order is kept and duplicates dropped.
    pub fn new(
        weights: HashMap<DetectorId, u32>,
        thresholds: Thresholds,
        brands: Vec<String>,
        shorteners: Vec<String>,
    ) -> Result<Self, ConfigError> {
        for detector in DetectorId::ALL {
            match weights.get(&detector) {
                None => return Err(ConfigError::MissingWeight(detector)),
                Some(&weight) if weight > MAX_WEIGHT => {
                    return Err(ConfigError::WeightOutOfRange { detector, weight })
                }
                Some(_) => {}
            }
        }
        thresholds.validate()?;

        let brands = normalize_list(brands, "brand")?;
        let shorteners = normalize_list(shorteners, "shortener")?
            .into_iter()
            .collect();

        Ok(Self {
            weights,
            thresholds,
            brands,
            shorteners,
        })
    }

    /// Apply a parsed config file on top of the built-in defaults.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let builtin = Self::builtin();

        let mut weights = builtin.weights.clone();
        weights.extend(file.weights);

        let thresholds = file.thresholds.unwrap_or(builtin.thresholds);

        let mut brands = file.brands.unwrap_or_else(|| builtin.brands.clone());
        brands.extend(file.additional_brands);

        let mut shorteners = file
            .shorteners
            .unwrap_or_else(|| builtin.sorted_shorteners());
        shorteners.extend(file.additional_shorteners);

        Self::new(weights, thresholds, brands, shorteners)
    }

    /// Load a YAML config file. Any failure is fatal to the caller.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_file(file)?;
        tracing::debug!(
            path = %path.display(),
            brands = config.brands.len(),
            shorteners = config.shorteners.len(),
            "loaded scoring config"
        );
        Ok(config)
    }

    /// Load the config named by `LINKRISK_CONFIG`, else the user config file,
    /// else fall back to the built-in configuration.
    pub fn discover() -> Result<Self, ConfigError> {
        match discover_config_path() {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("no config file found, using built-in scoring config");
                Ok(Self::builtin().clone())
            }
        }
    }

    /// Weight for a detector. Construction guarantees every detector has one.
    pub fn weight(&self, detector: DetectorId) -> u32 {
        self.weights.get(&detector).copied().unwrap_or(0)
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Brand domains in scan order.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn is_shortener(&self, host: &str) -> bool {
        self.shorteners.contains(host)
    }

    fn sorted_shorteners(&self) -> Vec<String> {
        let mut list: Vec<String> = self.shorteners.iter().cloned().collect();
        list.sort();
        list
    }

    /// Effective configuration as YAML, weights listed in evaluation order.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        #[derive(Serialize)]
        struct Ordered<'a> {
            weights: BTreeMap<DetectorId, u32>,
            thresholds: Thresholds,
            brands: &'a [String],
            shorteners: Vec<String>,
        }
        serde_yaml::to_string(&Ordered {
            weights: self.weights.iter().map(|(k, v)| (*k, *v)).collect(),
            thresholds: self.thresholds,
            brands: &self.brands,
            shorteners: self.sorted_shorteners(),
        })
    }
}

fn normalize_list(entries: Vec<String>, kind: &'static str) -> Result<Vec<String>, ConfigError> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim().to_lowercase();
        if entry.is_empty() {
            return Err(ConfigError::EmptyListEntry(kind));
        }
        if out.contains(&entry) {
            tracing::warn!(entry = %entry, "duplicate {kind} entry ignored");
            continue;
        }
        out.push(entry);
    }
    Ok(out)
}

/// Try both `.yaml` and `.yml` extensions in a directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    let yaml = dir.join("config.yaml");
    if yaml.exists() {
        return Some(yaml);
    }
    let yml = dir.join("config.yml");
    if yml.exists() {
        return Some(yml);
    }
    None
}

/// Resolve the config path: env override first, then the user config dir.
pub fn discover_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    config_dir().and_then(|dir| find_config_in_dir(&dir))
}

/// Get linkrisk data directory.
pub fn data_dir() -> Option<PathBuf> {
    let base = etcetera::choose_base_strategy().ok()?;
    Some(base.data_dir().join("linkrisk"))
}

/// Get linkrisk config directory.
pub fn config_dir() -> Option<PathBuf> {
    let base = etcetera::choose_base_strategy().ok()?;
    Some(base.config_dir().join("linkrisk"))
}
