//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main matcher settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Boost and threshold constants
    #[serde(default)]
    pub scoring: ScoringSettings,

    /// Cleaning and expansion limits
    #[serde(default)]
    pub normalizer: NormalizerSettings,

    /// Orchestrator behavior
    #[serde(default)]
    pub engine: EngineSettings,

    /// Optional YAML lexicon replacing the built-in tables
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

/// Scoring constants
///
/// The defaults are empirically chosen and are the values to tune.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub threshold: ThresholdSettings,
    #[serde(default)]
    pub boost: BoostSettings,
}

/// Adaptive threshold breakpoints
///
/// `gap > wide_gap` → `wide_threshold`, `gap > medium_gap` →
/// `medium_threshold`, `gap > narrow_gap` → `narrow_threshold`, otherwise
/// `default_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_wide_gap")]
    pub wide_gap: f32,
    #[serde(default = "default_wide_threshold")]
    pub wide_threshold: f32,
    #[serde(default = "default_medium_gap")]
    pub medium_gap: f32,
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f32,
    #[serde(default = "default_narrow_gap")]
    pub narrow_gap: f32,
    #[serde(default = "default_narrow_threshold")]
    pub narrow_threshold: f32,
    #[serde(default = "default_threshold")]
    pub default_threshold: f32,
}

fn default_wide_gap() -> f32 {
    30.0
}
fn default_wide_threshold() -> f32 {
    65.0
}
fn default_medium_gap() -> f32 {
    20.0
}
fn default_medium_threshold() -> f32 {
    75.0
}
fn default_narrow_gap() -> f32 {
    10.0
}
fn default_narrow_threshold() -> f32 {
    85.0
}
fn default_threshold() -> f32 {
    90.0
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            wide_gap: default_wide_gap(),
            wide_threshold: default_wide_threshold(),
            medium_gap: default_medium_gap(),
            medium_threshold: default_medium_threshold(),
            narrow_gap: default_narrow_gap(),
            narrow_threshold: default_narrow_threshold(),
            default_threshold: default_threshold(),
        }
    }
}

/// Secondary boost amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostSettings {
    /// Category keyword present in the query
    #[serde(default = "default_category_boost")]
    pub category: f32,
    /// Word counts within `close_word_gap`
    #[serde(default = "default_close_word_boost")]
    pub close_word_count: f32,
    #[serde(default = "default_close_word_gap")]
    pub close_word_gap: usize,
    /// Word counts within `near_word_gap`
    #[serde(default = "default_near_word_boost")]
    pub near_word_count: f32,
    #[serde(default = "default_near_word_gap")]
    pub near_word_gap: usize,
    /// Both sides carry Hindi script or markers
    #[serde(default = "default_two")]
    pub script: f32,
    /// Candidate tag appears in the query
    #[serde(default = "default_two")]
    pub tag: f32,
    /// Register words agree with difficulty
    #[serde(default = "default_two")]
    pub difficulty_match: f32,
    /// Neutral phrasing with a medium candidate
    #[serde(default = "default_neutral_boost")]
    pub difficulty_neutral: f32,
}

fn default_category_boost() -> f32 {
    5.0
}
fn default_close_word_boost() -> f32 {
    3.0
}
fn default_close_word_gap() -> usize {
    2
}
fn default_near_word_boost() -> f32 {
    1.0
}
fn default_near_word_gap() -> usize {
    5
}
fn default_two() -> f32 {
    2.0
}
fn default_neutral_boost() -> f32 {
    1.0
}

impl Default for BoostSettings {
    fn default() -> Self {
        Self {
            category: default_category_boost(),
            close_word_count: default_close_word_boost(),
            close_word_gap: default_close_word_gap(),
            near_word_count: default_near_word_boost(),
            near_word_gap: default_near_word_gap(),
            script: default_two(),
            tag: default_two(),
            difficulty_match: default_two(),
            difficulty_neutral: default_neutral_boost(),
        }
    }
}

/// Normalizer limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerSettings {
    /// Upper bound on generated query variants (original included)
    #[serde(default = "default_max_variants")]
    pub max_variants: usize,
    /// Passes of the cleaning chain before giving up on a fixpoint
    #[serde(default = "default_max_clean_passes")]
    pub max_clean_passes: usize,
}

fn default_max_variants() -> usize {
    16
}
fn default_max_clean_passes() -> usize {
    4
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            max_variants: default_max_variants(),
            max_clean_passes: default_max_clean_passes(),
        }
    }
}

/// Orchestrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Direct-match confidence needed to skip the pipeline
    #[serde(default = "default_direct_min")]
    pub direct_match_min_confidence: f32,
    /// Character similarity (0-1) for a near-exact direct match
    #[serde(default = "default_near_exact")]
    pub near_exact_similarity: f32,
    /// Alternates returned next to the top match
    #[serde(default = "default_max_alternates")]
    pub max_alternates: usize,
    /// Snapshot size from which candidates are scored in parallel
    #[serde(default = "default_parallel_min")]
    pub parallel_min_candidates: usize,
}

fn default_direct_min() -> f32 {
    90.0
}
fn default_near_exact() -> f32 {
    0.90
}
fn default_max_alternates() -> usize {
    2
}
fn default_parallel_min() -> usize {
    64
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            direct_match_min_confidence: default_direct_min(),
            near_exact_similarity: default_near_exact(),
            max_alternates: default_max_alternates(),
            parallel_min_candidates: default_parallel_min(),
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_thresholds()?;
        self.validate_boosts()?;
        self.validate_normalizer()?;
        self.validate_engine()?;
        Ok(())
    }

    fn validate_thresholds(&self) -> Result<(), ConfigError> {
        let t = &self.scoring.threshold;

        for (field, value) in [
            ("scoring.threshold.wide_threshold", t.wide_threshold),
            ("scoring.threshold.medium_threshold", t.medium_threshold),
            ("scoring.threshold.narrow_threshold", t.narrow_threshold),
            ("scoring.threshold.default_threshold", t.default_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, format!("Must be between 0 and 100, got {}", value)));
            }
        }

        if !(t.wide_gap > t.medium_gap && t.medium_gap > t.narrow_gap && t.narrow_gap >= 0.0) {
            return Err(invalid(
                "scoring.threshold",
                format!(
                    "Gaps must satisfy wide > medium > narrow >= 0, got {} / {} / {}",
                    t.wide_gap, t.medium_gap, t.narrow_gap
                ),
            ));
        }

        // A smaller gap must never lower the bar
        if !(t.wide_threshold <= t.medium_threshold
            && t.medium_threshold <= t.narrow_threshold
            && t.narrow_threshold <= t.default_threshold)
        {
            return Err(invalid(
                "scoring.threshold",
                "Thresholds must be non-decreasing from wide to default",
            ));
        }

        Ok(())
    }

    fn validate_boosts(&self) -> Result<(), ConfigError> {
        let b = &self.scoring.boost;
        for (field, value) in [
            ("scoring.boost.category", b.category),
            ("scoring.boost.close_word_count", b.close_word_count),
            ("scoring.boost.near_word_count", b.near_word_count),
            ("scoring.boost.script", b.script),
            ("scoring.boost.tag", b.tag),
            ("scoring.boost.difficulty_match", b.difficulty_match),
            ("scoring.boost.difficulty_neutral", b.difficulty_neutral),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, format!("Must be between 0 and 100, got {}", value)));
            }
        }

        if b.close_word_gap > b.near_word_gap {
            return Err(invalid(
                "scoring.boost.close_word_gap",
                "Close word gap cannot exceed near word gap",
            ));
        }

        Ok(())
    }

    fn validate_normalizer(&self) -> Result<(), ConfigError> {
        if self.normalizer.max_variants == 0 {
            return Err(invalid("normalizer.max_variants", "Must be at least 1"));
        }
        if self.normalizer.max_clean_passes == 0 {
            return Err(invalid("normalizer.max_clean_passes", "Must be at least 1"));
        }
        Ok(())
    }

    fn validate_engine(&self) -> Result<(), ConfigError> {
        let e = &self.engine;
        if !(0.0..=100.0).contains(&e.direct_match_min_confidence) {
            return Err(invalid(
                "engine.direct_match_min_confidence",
                format!("Must be between 0 and 100, got {}", e.direct_match_min_confidence),
            ));
        }
        if !(e.near_exact_similarity > 0.0 && e.near_exact_similarity <= 1.0) {
            return Err(invalid(
                "engine.near_exact_similarity",
                format!("Must be in (0, 1], got {}", e.near_exact_similarity),
            ));
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Sources, later ones override earlier ones:
/// 1. `config/default.{yaml,toml,json}` (optional)
/// 2. `config_path` if given, else the file named by `QA_MATCH_CONFIG` (required if named)
/// 3. `QA_MATCH__*` environment variables
pub fn load_settings(config_path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    let explicit = config_path
        .map(str::to_string)
        .or_else(|| std::env::var("QA_MATCH_CONFIG").ok());
    if let Some(path) = explicit {
        if !std::path::Path::new(&path).exists() {
            return Err(ConfigError::FileNotFound(path));
        }
        builder = builder.add_source(File::with_name(&path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix("QA_MATCH")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        lexicon_path = ?settings.lexicon_path,
        max_variants = settings.normalizer.max_variants,
        "Loaded matcher settings"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.scoring.threshold.wide_threshold, 65.0);
        assert_eq!(settings.scoring.threshold.default_threshold, 90.0);
        assert_eq!(settings.scoring.boost.category, 5.0);
        assert_eq!(settings.engine.max_alternates, 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        let mut settings = Settings::default();
        settings.scoring.threshold.narrow_threshold = 95.0; // above default 90
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.scoring.threshold.medium_gap = 35.0; // above wide gap
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.scoring.threshold.wide_threshold = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_boost_validation() {
        let mut settings = Settings::default();
        settings.scoring.boost.tag = -2.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.scoring.boost.close_word_gap = 9;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_engine_validation() {
        let mut settings = Settings::default();
        settings.engine.near_exact_similarity = 0.0;
        assert!(settings.validate().is_err());

        settings.engine.near_exact_similarity = 0.95;
        settings.normalizer.max_variants = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "scoring:\n  boost:\n    category: 4.0\nengine:\n  max_alternates: 1\n"
        )
        .unwrap();

        let settings = load_settings(file.path().to_str()).unwrap();
        assert_eq!(settings.scoring.boost.category, 4.0);
        assert_eq!(settings.engine.max_alternates, 1);
        // Untouched sections keep defaults
        assert_eq!(settings.scoring.threshold.wide_gap, 30.0);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let result = load_settings(Some("/nonexistent/qa-match.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
