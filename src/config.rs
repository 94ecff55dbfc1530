//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Tunable constants of the similarity heuristic and the score aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity for a profile skill to count as covering a job skill
    pub match_threshold: f32,
    /// Match quality assigned to a non-identical match
    pub partial_match_quality: f32,
    pub containment_score: f32,
    /// Score for names shorter than three characters sharing a first character
    pub short_name_score: f32,
    pub default_similarity: f32,
    pub min_affix_len: usize,
    pub strength_importance: f32,
    pub strength_match_score: f32,
    /// Overall score reported when the profile yields no skills at all
    pub empty_profile_score: f32,
    /// Overall score reported when the job skills carry no importance
    pub undefined_score: f32,
    pub bands: RecommendationBands,
    pub canonicalize_aliases: bool,
}

/// Lower bounds (inclusive, as fractions) of the recommendation tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationBands {
    pub excellent: f32,
    pub good: f32,
    pub moderate: f32,
    pub weak: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub extra_vocabulary: Vec<String>,
    pub default_importance: f32,
    pub default_proficiency: f32,
    pub job_fallback_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.6,
            partial_match_quality: 0.7,
            containment_score: 0.9,
            short_name_score: 0.7,
            default_similarity: 0.1,
            min_affix_len: 3,
            strength_importance: 0.7,
            strength_match_score: 0.7,
            empty_profile_score: 0.3,
            undefined_score: 0.5,
            bands: RecommendationBands::default(),
            canonicalize_aliases: false,
        }
    }
}

impl Default for RecommendationBands {
    fn default() -> Self {
        Self {
            excellent: 0.85,
            good: 0.70,
            moderate: 0.50,
            weak: 0.30,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extra_vocabulary: Vec::new(),
            default_importance: 0.5,
            default_proficiency: 1.0,
            job_fallback_skills: ["communication", "teamwork", "problem solving", "professional"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-match")
            .join("config.toml")
    }

    /// Reject values that would break the [0,1] score contract.
    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        let unit_values = [
            ("matching.match_threshold", m.match_threshold),
            ("matching.partial_match_quality", m.partial_match_quality),
            ("matching.containment_score", m.containment_score),
            ("matching.short_name_score", m.short_name_score),
            ("matching.default_similarity", m.default_similarity),
            ("matching.strength_importance", m.strength_importance),
            ("matching.strength_match_score", m.strength_match_score),
            ("matching.empty_profile_score", m.empty_profile_score),
            ("matching.undefined_score", m.undefined_score),
            ("matching.bands.excellent", m.bands.excellent),
            ("matching.bands.good", m.bands.good),
            ("matching.bands.moderate", m.bands.moderate),
            ("matching.bands.weak", m.bands.weak),
            ("extraction.default_importance", self.extraction.default_importance),
            ("extraction.default_proficiency", self.extraction.default_proficiency),
        ];

        for (key, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(SkillMatchError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    key, value
                )));
            }
        }

        let b = &m.bands;
        if !(b.excellent >= b.good && b.good >= b.moderate && b.moderate >= b.weak) {
            return Err(SkillMatchError::Configuration(
                "recommendation bands must be descending: excellent >= good >= moderate >= weak".to_string(),
            ));
        }

        if self.extraction.job_fallback_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(SkillMatchError::Configuration(
                "extraction.job_fallback_skills must contain at least one skill".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = Config::default();
        assert_eq!(config.matching.match_threshold, 0.6);
        assert_eq!(config.matching.partial_match_quality, 0.7);
        assert_eq!(config.matching.containment_score, 0.9);
        assert_eq!(config.matching.empty_profile_score, 0.3);
        assert_eq!(config.matching.undefined_score, 0.5);
        assert_eq!(config.extraction.job_fallback_skills.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.matching.match_threshold = 0.75;
        config.extraction.extra_vocabulary.push("Bevy".to_string());
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[matching]\nmatch_threshold = 0.8\n\n[extraction]\n\n[output]\nformat = \"Json\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matching.match_threshold, 0.8);
        assert_eq!(loaded.matching.partial_match_quality, 0.7);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert!(loaded.output.color_output);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = Config::default();
        config.matching.match_threshold = 1.5;
        assert!(matches!(config.validate(), Err(SkillMatchError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_unordered_bands() {
        let mut config = Config::default();
        config.matching.bands.good = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_fallback() {
        let mut config = Config::default();
        config.extraction.job_fallback_skills = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }
}
