//! Multi-profile matching and job ranking on top of the match engine

use crate::processing::match_engine::{MatchEngine, MatchResult};
use crate::processing::record::Platform;
use crate::processing::skill_set::SkillSet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One profile's skill set tagged with its source platform
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSkills {
    pub platform: Platform,
    pub skills: SkillSet,
}

impl PlatformSkills {
    pub fn new(platform: Platform, skills: SkillSet) -> Self {
        Self { platform, skills }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// 1-based position after sorting
    pub rank: usize,
    pub job_title: String,
    pub result: MatchResult,
}

/// Ordered union of several skill sets; earlier sets win on duplicate names.
pub fn combine_skill_sets<'a, I>(sets: I) -> SkillSet
where
    I: IntoIterator<Item = &'a SkillSet>,
{
    let mut combined = SkillSet::new();
    for set in sets {
        combined.merge(set);
    }
    combined
}

/// Share of a combined score attributed to a platform
pub fn platform_contribution(platform: Platform, score: f32) -> f32 {
    match platform {
        Platform::GitHub => (score * 0.5).min(0.6),
        Platform::LinkedIn => (score * 0.3).min(0.4),
        Platform::LeetCode => (score * 0.2).min(0.3),
        Platform::Codeforces | Platform::Unknown => 0.0,
    }
}

/// Match the merged skills of several profiles against one job.
///
/// The engine sees a single skill set; platforms and their contributions are
/// attached to the result afterwards.
pub fn match_combined(engine: &MatchEngine, profiles: &[PlatformSkills], job_skills: &SkillSet) -> MatchResult {
    let merged = combine_skill_sets(profiles.iter().map(|p| &p.skills));
    debug!(
        "Combined {} profile(s) into {} skill(s)",
        profiles.len(),
        merged.len()
    );

    let mut result = engine.match_skills(&merged, job_skills);

    let mut platforms: Vec<Platform> = Vec::new();
    for profile in profiles {
        if !platforms.contains(&profile.platform) {
            platforms.push(profile.platform);
        }
    }

    let contributions: BTreeMap<String, f32> = platforms
        .iter()
        .map(|p| (p.as_str().to_string(), platform_contribution(*p, result.overall_score)))
        .collect();

    result.platforms = Some(platforms.iter().map(|p| p.display_name().to_string()).collect());
    result.platform_contributions = Some(contributions);
    result
}

/// Score one profile against many jobs, best first. Equal scores keep input order.
pub fn rank_jobs(engine: &MatchEngine, profile_skills: &SkillSet, jobs: &[(String, SkillSet)]) -> Vec<RankedMatch> {
    let mut scored: Vec<(String, MatchResult)> = jobs
        .iter()
        .map(|(title, skills)| (title.clone(), engine.match_skills(profile_skills, skills)))
        .collect();

    scored.sort_by(|a, b| b.1.overall_score.total_cmp(&a.1.overall_score));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (job_title, result))| RankedMatch {
            rank: index + 1,
            job_title,
            result,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skill_set::Skill;

    fn job(names: &[&str]) -> SkillSet {
        names.iter().map(|n| Skill::named(*n).with_importance(0.5)).collect()
    }

    #[test]
    fn test_combined_profiles_cover_job() {
        let profiles = vec![
            PlatformSkills::new(Platform::GitHub, SkillSet::from_names(["Python"])),
            PlatformSkills::new(Platform::LinkedIn, SkillSet::from_names(["Docker"])),
        ];
        let result = match_combined(&MatchEngine::default(), &profiles, &job(&["Python", "Docker"]));

        assert_eq!(result.overall_score, 1.0);
        assert!(result.skills_missing.is_empty());
        assert_eq!(
            result.platforms,
            Some(vec!["GitHub".to_string(), "LinkedIn".to_string()])
        );

        let contributions = result.platform_contributions.unwrap();
        assert_eq!(contributions["github"], 0.5);
        assert_eq!(contributions["linkedin"], 0.3);
    }

    #[test]
    fn test_combined_equals_single_match_on_merged_set() {
        let engine = MatchEngine::default();
        let a = SkillSet::from_names(["Rust", "Go"]);
        let b = SkillSet::from_names(["go", "SQL"]);
        let j = job(&["Rust", "SQL", "Kotlin"]);

        let combined = match_combined(
            &engine,
            &[
                PlatformSkills::new(Platform::GitHub, a.clone()),
                PlatformSkills::new(Platform::GitHub, b.clone()),
            ],
            &j,
        );
        let single = engine.match_skills(&combine_skill_sets([&a, &b]), &j);

        assert_eq!(combined.overall_score, single.overall_score);
        assert_eq!(combined.platforms, Some(vec!["GitHub".to_string()]));
    }

    #[test]
    fn test_combine_keeps_first_spelling() {
        let a = SkillSet::from_names(["Rust"]);
        let b = SkillSet::from_names(["RUST", "Zig"]);
        assert_eq!(combine_skill_sets([&a, &b]).names(), vec!["Rust", "Zig"]);
    }

    #[test]
    fn test_platform_contribution_caps() {
        assert_eq!(platform_contribution(Platform::GitHub, 1.0), 0.5);
        assert_eq!(platform_contribution(Platform::LinkedIn, 0.5), 0.15);
        assert_eq!(platform_contribution(Platform::LeetCode, 1.0), 0.2);
        assert_eq!(platform_contribution(Platform::Codeforces, 1.0), 0.0);
    }

    #[test]
    fn test_rank_jobs_descending_and_stable() {
        let profile = SkillSet::from_names(["Rust", "Docker"]);
        let jobs = vec![
            ("Frontend".to_string(), job(&["React", "CSS"])),
            ("Systems A".to_string(), job(&["Rust"])),
            ("Platform".to_string(), job(&["Rust", "Terraform"])),
            ("Systems B".to_string(), job(&["Docker"])),
        ];

        let ranked = rank_jobs(&MatchEngine::default(), &profile, &jobs);
        let titles: Vec<&str> = ranked.iter().map(|r| r.job_title.as_str()).collect();

        assert_eq!(titles, vec!["Systems A", "Systems B", "Platform", "Frontend"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_rank_jobs_empty() {
        assert!(rank_jobs(&MatchEngine::default(), &SkillSet::new(), &[]).is_empty());
    }
}
