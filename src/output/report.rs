//! Report structures wrapping match results with context for presentation

use crate::processing::combined::RankedMatch;
use crate::processing::match_engine::MatchResult;
use crate::processing::record::{Job, Profile};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A single profile-versus-job match ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub job_title: String,

    /// Human-readable labels of the matched profiles
    pub profiles: Vec<String>,

    /// Overall score (0-100)
    pub overall_score_percentage: u8,

    pub result: MatchResult,

    pub metadata: ReportMetadata,
}

/// One profile ranked against several jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub profiles: Vec<String>,
    pub rankings: Vec<RankedMatch>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    pub matcher_version: String,

    /// Keyword vocabulary used for free-text extraction
    pub vocabulary_version: String,

    pub profile_files: Vec<String>,
    pub job_files: Vec<String>,

    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(
        profile_files: Vec<String>,
        job_files: Vec<String>,
        vocabulary_version: &str,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: SystemTime::now(),
            matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            vocabulary_version: vocabulary_version.to_string(),
            profile_files,
            job_files,
            processing_time_ms,
        }
    }
}

impl MatchReport {
    pub fn new(job: &Job, profiles: &[Profile], result: MatchResult, metadata: ReportMetadata) -> Self {
        Self {
            job_title: job.display_title(),
            profiles: profiles.iter().map(profile_label).collect(),
            overall_score_percentage: score_percentage(result.overall_score),
            result,
            metadata,
        }
    }
}

impl RankingReport {
    pub fn new(profiles: &[Profile], rankings: Vec<RankedMatch>, metadata: ReportMetadata) -> Self {
        Self {
            profiles: profiles.iter().map(profile_label).collect(),
            rankings,
            metadata,
        }
    }
}

/// "GitHub: octocat", falling back to the display name or the platform alone
pub fn profile_label(profile: &Profile) -> String {
    match profile.username.as_ref().or(profile.name.as_ref()) {
        Some(who) => format!("{}: {}", profile.platform, who),
        None => profile.platform.to_string(),
    }
}

/// Score in [0, 1] as a rounded percentage
pub fn score_percentage(score: f32) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
