//! Importance-weighted matching of a profile skill set against a job skill set

use crate::config::{Config, ExtractionConfig, MatchingConfig, RecommendationBands};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skill_set::{Skill, SkillSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Compares one profile skill set with one job skill set.
///
/// Stateless after construction: the same inputs always give the same
/// [`MatchResult`]. Combined matching is done by the caller merging skill
/// sets before calling [`MatchEngine::match_skills`].
#[derive(Debug, Clone)]
pub struct MatchEngine {
    scorer: SimilarityScorer,
    config: MatchingConfig,
    default_importance: f32,
    default_proficiency: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Job skill name
    pub skill_name: String,
    /// Profile skill that covered it
    pub matched_skill: String,
    pub similarity: f32,
    pub importance: f32,
    pub proficiency: f32,
    /// 1.0 for an exact (case-insensitive) name match, the partial quality otherwise
    pub match_quality: f32,
    pub match_score: f32,
    pub weighted_score: f32,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub name: String,
    pub importance: f32,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTier {
    Excellent,
    Good,
    Moderate,
    Weak,
    Poor,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub profile_skill_count: usize,
    pub job_skill_count: usize,
    pub matched_skill_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Overall score (0.0 to 1.0)
    pub overall_score: f32,
    pub skill_matches: Vec<SkillMatch>,
    pub skills_missing: Vec<MissingSkill>,
    /// Well-covered, high-importance skills
    pub strengths: Vec<String>,
    pub recommendation: String,
    pub tier: RecommendationTier,
    pub details: MatchDetails,

    /// Contributing platforms, attached by combined matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_contributions: Option<BTreeMap<String, f32>>,
}

impl RecommendationTier {
    /// Pick the tier for a score in [0, 1]
    pub fn from_score(score: f32, bands: &RecommendationBands) -> Self {
        if score >= bands.excellent {
            RecommendationTier::Excellent
        } else if score >= bands.good {
            RecommendationTier::Good
        } else if score >= bands.moderate {
            RecommendationTier::Moderate
        } else if score >= bands.weak {
            RecommendationTier::Weak
        } else {
            RecommendationTier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::Excellent => "Excellent Match",
            RecommendationTier::Good => "Good Match",
            RecommendationTier::Moderate => "Moderate Match",
            RecommendationTier::Weak => "Weak Match",
            RecommendationTier::Poor => "Poor Match",
            RecommendationTier::InsufficientData => "Insufficient Data",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RecommendationTier::Excellent => {
                "This candidate has most of the required skills and would be an excellent fit for this position."
            }
            RecommendationTier::Good => {
                "This candidate has many of the required skills and would likely be a good fit with some training."
            }
            RecommendationTier::Moderate => {
                "This candidate has some of the required skills but may need significant training or may not be ideal for this specific role."
            }
            RecommendationTier::Weak => {
                "This candidate is missing many critical skills required for this position."
            }
            RecommendationTier::Poor => {
                "This candidate does not appear to have the necessary skills for this position."
            }
            RecommendationTier::InsufficientData => {
                "No skills could be identified in the profile, so the match score is only a placeholder."
            }
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl MatchResult {
    /// Overall score as a percentage
    pub fn percentage(&self) -> f32 {
        self.overall_score * 100.0
    }

    pub fn matched_names(&self) -> Vec<&str> {
        self.skill_matches.iter().map(|m| m.skill_name.as_str()).collect()
    }

    pub fn missing_names(&self) -> Vec<&str> {
        self.skills_missing.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn missing_required(&self) -> Vec<&MissingSkill> {
        self.skills_missing.iter().filter(|m| m.required).collect()
    }
}

impl MatchEngine {
    pub fn new(matching: &MatchingConfig, extraction: &ExtractionConfig) -> Self {
        Self {
            scorer: SimilarityScorer::new(matching),
            config: matching.clone(),
            default_importance: extraction.default_importance,
            default_proficiency: extraction.default_proficiency,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.matching, &config.extraction)
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Score `profile_skills` against `job_skills`.
    pub fn match_skills(&self, profile_skills: &SkillSet, job_skills: &SkillSet) -> MatchResult {
        if profile_skills.is_empty() {
            debug!("Profile has no skills; returning the insufficient-data result");
            return self.insufficient_data(job_skills);
        }

        let mut skill_matches = Vec::new();
        let mut skills_missing = Vec::new();
        let mut matched_importance = 0.0f32;
        let mut total_importance = 0.0f32;

        for job_skill in job_skills {
            let importance = job_skill.importance_or(self.default_importance);
            total_importance += importance;

            match self.best_candidate(job_skill, profile_skills) {
                Some((candidate, similarity)) if self.scorer.is_match(similarity) => {
                    let match_quality = if self.scorer.is_exact(&candidate.name, &job_skill.name) {
                        1.0
                    } else {
                        self.config.partial_match_quality
                    };
                    let proficiency = candidate.proficiency_or(self.default_proficiency);
                    let match_score = match_quality * proficiency;
                    let weighted_score = importance * match_score;
                    matched_importance += weighted_score;

                    debug!(
                        "'{}' matched by '{}' (similarity {:.2}, score {:.2})",
                        job_skill.name, candidate.name, similarity, match_score
                    );

                    skill_matches.push(SkillMatch {
                        skill_name: job_skill.name.clone(),
                        matched_skill: candidate.name.clone(),
                        similarity,
                        importance,
                        proficiency,
                        match_quality,
                        match_score,
                        weighted_score,
                        required: job_skill.required,
                    });
                }
                best => {
                    debug!(
                        "'{}' missing (best similarity {:.2})",
                        job_skill.name,
                        best.map(|(_, s)| s).unwrap_or(0.0)
                    );
                    skills_missing.push(missing(job_skill, importance));
                }
            }
        }

        let overall_score = if total_importance > 0.0 {
            let ratio = matched_importance / total_importance;
            if ratio.is_finite() {
                ratio.clamp(0.0, 1.0)
            } else {
                self.config.undefined_score
            }
        } else {
            self.config.undefined_score
        };

        let strengths = skill_matches
            .iter()
            .filter(|m| {
                m.importance >= self.config.strength_importance
                    && m.match_score >= self.config.strength_match_score
            })
            .map(|m| m.skill_name.clone())
            .collect();

        let tier = RecommendationTier::from_score(overall_score, &self.config.bands);
        let recommendation = recommendation_text(tier, &skills_missing);

        MatchResult {
            overall_score,
            details: MatchDetails {
                profile_skill_count: profile_skills.len(),
                job_skill_count: job_skills.len(),
                matched_skill_count: skill_matches.len(),
            },
            skill_matches,
            skills_missing,
            strengths,
            recommendation,
            tier,
            platforms: None,
            platform_contributions: None,
        }
    }

    /// Highest-similarity profile skill; the earliest one wins ties.
    fn best_candidate<'a>(&self, job_skill: &Skill, profile_skills: &'a SkillSet) -> Option<(&'a Skill, f32)> {
        let mut best: Option<(&Skill, f32)> = None;
        for candidate in profile_skills {
            let similarity = self.scorer.similarity(&candidate.name, &job_skill.name);
            if best.map_or(true, |(_, s)| similarity > s) {
                best = Some((candidate, similarity));
            }
        }
        best
    }

    fn insufficient_data(&self, job_skills: &SkillSet) -> MatchResult {
        let skills_missing: Vec<MissingSkill> = job_skills
            .iter()
            .map(|s| missing(s, s.importance_or(self.default_importance)))
            .collect();
        let tier = RecommendationTier::InsufficientData;

        MatchResult {
            overall_score: self.config.empty_profile_score,
            recommendation: recommendation_text(tier, &skills_missing),
            skill_matches: Vec::new(),
            strengths: Vec::new(),
            tier,
            details: MatchDetails {
                profile_skill_count: 0,
                job_skill_count: job_skills.len(),
                matched_skill_count: 0,
            },
            skills_missing,
            platforms: None,
            platform_contributions: None,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn missing(skill: &Skill, importance: f32) -> MissingSkill {
    MissingSkill {
        name: skill.name.clone(),
        importance,
        required: skill.required,
    }
}

/// Tier text plus a note naming missing required skills.
///
/// Missing required skills only affect this text, never the numeric score.
fn recommendation_text(tier: RecommendationTier, skills_missing: &[MissingSkill]) -> String {
    let mut text = format!("{}: {}", tier.label(), tier.message());

    let required: Vec<&str> = skills_missing
        .iter()
        .filter(|s| s.required)
        .map(|s| s.name.as_str())
        .collect();
    if !required.is_empty() {
        let noun = if required.len() == 1 { "skill" } else { "skills" };
        text.push_str(&format!(
            " Note: the candidate is missing {} required {}: {}.",
            required.len(),
            noun,
            required.join(", ")
        ));
    }

    text
}
