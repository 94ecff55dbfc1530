//! Skill extraction, similarity scoring and matching

pub mod aliases;
pub mod combined;
pub mod keyword_extractor;
pub mod match_engine;
pub mod record;
pub mod similarity;
pub mod skill_builder;
pub mod skill_set;
pub mod vocabulary;

pub use combined::{combine_skill_sets, match_combined, rank_jobs, PlatformSkills, RankedMatch};
pub use keyword_extractor::KeywordExtractor;
pub use match_engine::{MatchEngine, MatchResult, RecommendationTier};
pub use record::{normalize_job, normalize_profile, Job, Platform, Profile};
pub use similarity::{similarity, SimilarityScorer};
pub use skill_builder::{Role, SkillSetBuilder};
pub use skill_set::{Skill, SkillSet};
pub use vocabulary::Vocabulary;
