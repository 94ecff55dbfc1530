//! Skill set construction from canonical profile and job records.
//!
//! Each role has an ordered [`StrategyChain`]. A chain is a list of stages; the
//! strategies of a stage are unioned, and the first stage producing any skill
//! wins. Later stages are fallbacks and never run once an earlier one succeeds.

use crate::config::ExtractionConfig;
use crate::error::{Result, SkillMatchError};
use crate::processing::keyword_extractor::KeywordExtractor;
use crate::processing::record::{normalize_job, normalize_profile, Job, Platform, PlatformDetails, Profile};
use crate::processing::skill_set::{Skill, SkillSet};
use crate::processing::vocabulary::Vocabulary;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const GITHUB_DEFAULTS: &[&str] = &[
    "GitHub",
    "Git",
    "Version Control",
    "Programming",
    "Software Development",
    "Coding",
];
const LINKEDIN_DEFAULTS: &[&str] = &["LinkedIn", "Networking", "Professional", "Communication"];
const LEETCODE_DEFAULTS: &[&str] = &["LeetCode", "Algorithms", "Data Structures", "Problem Solving"];
const CODEFORCES_DEFAULTS: &[&str] = &[
    "Codeforces",
    "Competitive Programming",
    "Algorithms",
    "Problem Solving",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Profile,
    Job,
}

impl FromStr for Role {
    type Err = SkillMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "profile" => Ok(Role::Profile),
            "job" => Ok(Role::Job),
            other => Err(SkillMatchError::InvalidInput(format!(
                "Unknown role '{}', expected 'profile' or 'job'",
                other
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Profile => f.write_str("profile"),
            Role::Job => f.write_str("job"),
        }
    }
}

/// Shared, read-only inputs available to every strategy
pub struct ExtractionContext<'a> {
    pub extractor: &'a KeywordExtractor,
    pub config: &'a ExtractionConfig,
}

/// One way of deriving skills from a record
pub trait ExtractionStrategy<R>: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, record: &R, ctx: &ExtractionContext<'_>) -> Vec<Skill>;
}

pub struct StrategyChain<R> {
    stages: Vec<Vec<Box<dyn ExtractionStrategy<R>>>>,
}

impl<R> StrategyChain<R> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage whose strategies are unioned together
    pub fn stage(mut self, strategies: Vec<Box<dyn ExtractionStrategy<R>>>) -> Self {
        if !strategies.is_empty() {
            self.stages.push(strategies);
        }
        self
    }

    pub fn stage_names(&self) -> Vec<Vec<&'static str>> {
        self.stages
            .iter()
            .map(|stage| stage.iter().map(|s| s.name()).collect())
            .collect()
    }

    /// Run stages in order and return the first non-empty union.
    pub fn run(&self, record: &R, ctx: &ExtractionContext<'_>) -> SkillSet {
        for (index, stage) in self.stages.iter().enumerate() {
            let mut skills = SkillSet::new();
            for strategy in stage {
                let found = strategy.extract(record, ctx);
                debug!("Strategy '{}' produced {} skill(s)", strategy.name(), found.len());
                skills.extend(found);
            }

            if !skills.is_empty() {
                debug!("Stage {} yielded {} skill(s)", index + 1, skills.len());
                return skills;
            }
        }

        SkillSet::new()
    }
}

impl<R> Default for StrategyChain<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Skills listed explicitly on the profile
pub struct ExplicitProfileSkills;

impl ExtractionStrategy<Profile> for ExplicitProfileSkills {
    fn name(&self) -> &'static str {
        "explicit-skills"
    }

    fn extract(&self, profile: &Profile, _ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        profile.skills.clone()
    }
}

/// Repository languages and technologies verbatim; names and descriptions
/// through the keyword extractor.
pub struct RepositorySkills;

impl ExtractionStrategy<Profile> for RepositorySkills {
    fn name(&self) -> &'static str {
        "repositories"
    }

    fn extract(&self, profile: &Profile, ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        let mut skills = Vec::new();
        for repo in &profile.repositories {
            skills.extend(repo.languages.iter().chain(&repo.technologies).map(Skill::named));
            for text in repo.name.iter().chain(&repo.description) {
                skills.extend(ctx.extractor.extract_keywords(text).into_iter().map(Skill::named));
            }
        }
        skills
    }
}

/// Bio, about and experience text through the keyword extractor
pub struct FreeTextSkills;

impl ExtractionStrategy<Profile> for FreeTextSkills {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn extract(&self, profile: &Profile, ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        profile
            .texts
            .iter()
            .flat_map(|text| ctx.extractor.extract_keywords(text))
            .map(Skill::named)
            .collect()
    }
}

/// Submission languages and problem tags from coding platforms
pub struct PlatformActivitySkills;

impl ExtractionStrategy<Profile> for PlatformActivitySkills {
    fn name(&self) -> &'static str {
        "platform-activity"
    }

    fn extract(&self, profile: &Profile, _ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        profile.details.activity_skills().into_iter().map(Skill::named).collect()
    }
}

/// Generic skills implied by the platform itself, plus anything the
/// extractor recognises in the username or profile slug.
pub struct PlatformDefaults;

impl ExtractionStrategy<Profile> for PlatformDefaults {
    fn name(&self) -> &'static str {
        "platform-defaults"
    }

    fn extract(&self, profile: &Profile, ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        let username_hits = || {
            profile
                .username
                .as_deref()
                .map(|name| ctx.extractor.extract_keywords(name))
                .unwrap_or_default()
        };

        let names: Vec<String> = match (&profile.platform, &profile.details) {
            (_, PlatformDetails::LinkedIn { slug }) => {
                let mut names = to_strings(LINKEDIN_DEFAULTS);
                if let Some(slug) = slug {
                    names.extend(ctx.extractor.extract_keywords(slug));
                }
                names
            }
            (Platform::GitHub, _) => {
                let mut names = to_strings(GITHUB_DEFAULTS);
                names.extend(username_hits());
                names
            }
            (Platform::LinkedIn, _) => to_strings(LINKEDIN_DEFAULTS),
            (Platform::LeetCode, _) => to_strings(LEETCODE_DEFAULTS),
            (Platform::Codeforces, _) => to_strings(CODEFORCES_DEFAULTS),
            (Platform::Unknown, _) => {
                let hits = username_hits();
                if hits.is_empty() {
                    profile.username.iter().cloned().collect()
                } else {
                    hits
                }
            }
        };

        names.into_iter().map(Skill::named).collect()
    }
}

/// Skills listed explicitly on the job
pub struct ExplicitJobSkills;

impl ExtractionStrategy<Job> for ExplicitJobSkills {
    fn name(&self) -> &'static str {
        "explicit-skills"
    }

    fn extract(&self, job: &Job, _ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        job.skills.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Description,
    Title,
    Company,
}

/// Keywords from one free-text field of the job
pub struct JobTextKeywords(pub JobField);

impl ExtractionStrategy<Job> for JobTextKeywords {
    fn name(&self) -> &'static str {
        match self.0 {
            JobField::Description => "description-keywords",
            JobField::Title => "title-keywords",
            JobField::Company => "company-keywords",
        }
    }

    fn extract(&self, job: &Job, ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        let text = match self.0 {
            JobField::Description => &job.description,
            JobField::Title => &job.title,
            JobField::Company => &job.company,
        };

        text.as_deref()
            .map(|t| ctx.extractor.extract_keywords(t))
            .unwrap_or_default()
            .into_iter()
            .map(Skill::named)
            .collect()
    }
}

/// The configured generic skill list, so a job always has something to score
pub struct FallbackJobSkills;

impl ExtractionStrategy<Job> for FallbackJobSkills {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn extract(&self, job: &Job, ctx: &ExtractionContext<'_>) -> Vec<Skill> {
        warn!(
            "No skills found for '{}', using the generic fallback set",
            job.display_title()
        );
        ctx.config.job_fallback_skills.iter().map(Skill::named).collect()
    }
}

pub fn default_profile_chain() -> StrategyChain<Profile> {
    StrategyChain::new()
        .stage(vec![
            Box::new(ExplicitProfileSkills),
            Box::new(RepositorySkills),
            Box::new(FreeTextSkills),
            Box::new(PlatformActivitySkills),
        ])
        .stage(vec![Box::new(PlatformDefaults)])
}

pub fn default_job_chain() -> StrategyChain<Job> {
    StrategyChain::new()
        .stage(vec![Box::new(ExplicitJobSkills)])
        .stage(vec![Box::new(JobTextKeywords(JobField::Description))])
        .stage(vec![Box::new(JobTextKeywords(JobField::Title))])
        .stage(vec![Box::new(JobTextKeywords(JobField::Company))])
        .stage(vec![Box::new(FallbackJobSkills)])
}

/// Builds deduplicated skill sets for profiles and jobs
pub struct SkillSetBuilder {
    extractor: KeywordExtractor,
    config: ExtractionConfig,
    profile_chain: StrategyChain<Profile>,
    job_chain: StrategyChain<Job>,
}

impl SkillSetBuilder {
    /// Create a builder over the built-in vocabulary plus configured extra terms
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let vocabulary = Vocabulary::builtin().with_extra_terms(&config.extra_vocabulary);
        debug!(
            "Keyword vocabulary '{}' with {} terms",
            vocabulary.version(),
            vocabulary.len()
        );

        Ok(Self {
            extractor: KeywordExtractor::with_vocabulary(vocabulary)?,
            config: config.clone(),
            profile_chain: default_profile_chain(),
            job_chain: default_job_chain(),
        })
    }

    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_profile_chain(mut self, chain: StrategyChain<Profile>) -> Self {
        self.profile_chain = chain;
        self
    }

    pub fn with_job_chain(mut self, chain: StrategyChain<Job>) -> Self {
        self.job_chain = chain;
        self
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn profile_chain(&self) -> &StrategyChain<Profile> {
        &self.profile_chain
    }

    pub fn job_chain(&self) -> &StrategyChain<Job> {
        &self.job_chain
    }

    pub fn build_profile_skills(&self, profile: &Profile) -> SkillSet {
        let mut skills = self.profile_chain.run(profile, &self.context());
        let default_proficiency = self.config.default_proficiency;
        skills.update_each(|skill| {
            skill.proficiency.get_or_insert(default_proficiency);
        });
        skills
    }

    pub fn build_job_skills(&self, job: &Job) -> SkillSet {
        let mut skills = self.job_chain.run(job, &self.context());
        let default_importance = self.config.default_importance;
        skills.update_each(|skill| {
            skill.importance.get_or_insert(default_importance);
        });
        skills
    }

    /// Normalize a raw record and build its skill set for the given role.
    pub fn build(&self, record: &Value, role: Role) -> Result<SkillSet> {
        match role {
            Role::Profile => Ok(self.build_profile_skills(&normalize_profile(record)?)),
            Role::Job => Ok(self.build_job_skills(&normalize_job(record)?)),
        }
    }

    fn context(&self) -> ExtractionContext<'_> {
        ExtractionContext {
            extractor: &self.extractor,
            config: &self.config,
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
