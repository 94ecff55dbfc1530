//! Integration tests for the skill matcher

use serde_json::json;
use skill_match::config::{Config, OutputFormat};
use skill_match::input::InputManager;
use skill_match::output::formatter::ReportGenerator;
use skill_match::output::report::{MatchReport, ReportMetadata};
use skill_match::processing::{
    match_combined, rank_jobs, MatchEngine, Platform, PlatformSkills, RecommendationTier, Role, SkillSetBuilder,
};
use std::path::Path;

fn builder() -> SkillSetBuilder {
    SkillSetBuilder::new(&Config::default().extraction).unwrap()
}

fn metadata() -> ReportMetadata {
    ReportMetadata::new(vec!["profile.json".to_string()], vec!["job.json".to_string()], "builtin-1", 3)
}

#[tokio::test]
async fn test_load_github_profile() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/github_profile.json"))
        .await
        .unwrap();

    assert_eq!(profile.platform, Platform::GitHub);
    assert_eq!(profile.username.as_deref(), Some("octocat"));
    // The malformed repository entry is dropped
    assert_eq!(profile.repositories.len(), 1);

    let skills = builder().build_profile_skills(&profile);
    for name in ["Rust", "Python", "Docker", "Go", "Kubernetes"] {
        assert!(skills.contains(name), "missing {}", name);
    }
    assert!(!skills.contains("GitHub"), "platform defaults only apply when nothing else is found");
}

#[tokio::test]
async fn test_load_nested_linkedin_profile() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/linkedin_profile.json"))
        .await
        .unwrap();

    assert_eq!(profile.platform, Platform::LinkedIn);
    assert_eq!(profile.name.as_deref(), Some("Jane Doe"));

    let skills = builder().build_profile_skills(&profile);
    assert!(skills.contains("Kafka"));
}

#[tokio::test]
async fn test_load_toml_leetcode_profile() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/leetcode_profile.toml"))
        .await
        .unwrap();

    assert_eq!(profile.platform, Platform::LeetCode);
    let skills = builder().build_profile_skills(&profile);
    assert_eq!(skills.names(), vec!["Python3", "cpp"]);
}

#[tokio::test]
async fn test_job_without_skills_uses_description() {
    let mut manager = InputManager::new();
    let job = manager
        .load_job(Path::new("tests/fixtures/job_minimal.toml"))
        .await
        .unwrap();

    let skills = builder().build_job_skills(&job);
    assert_eq!(skills.names(), vec!["Kubernetes", "Terraform", "AWS"]);
    assert!(skills.iter().all(|s| s.importance == Some(0.5)));
}

#[tokio::test]
async fn test_single_profile_match() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/github_profile.json"))
        .await
        .unwrap();
    let job = manager
        .load_job(Path::new("tests/fixtures/job_backend.json"))
        .await
        .unwrap();

    let builder = builder();
    let engine = MatchEngine::default();
    let result = engine.match_skills(&builder.build_profile_skills(&profile), &builder.build_job_skills(&job));

    // Rust (1.0) and Docker (0.5) matched, Kafka (0.5) missing
    assert!((result.overall_score - 0.75).abs() < 1e-6);
    assert_eq!(result.tier, RecommendationTier::Good);
    assert_eq!(result.missing_names(), vec!["Kafka"]);
    assert_eq!(result.strengths, vec!["Rust".to_string()]);
    assert!(result.platforms.is_none());
}

#[tokio::test]
async fn test_combined_profiles_cover_the_gap() {
    let mut manager = InputManager::new();
    let github = manager
        .load_profile(Path::new("tests/fixtures/github_profile.json"))
        .await
        .unwrap();
    let linkedin = manager
        .load_profile(Path::new("tests/fixtures/linkedin_profile.json"))
        .await
        .unwrap();
    let job = manager
        .load_job(Path::new("tests/fixtures/job_backend.json"))
        .await
        .unwrap();

    let builder = builder();
    let engine = MatchEngine::default();
    let sets = vec![
        PlatformSkills::new(github.platform, builder.build_profile_skills(&github)),
        PlatformSkills::new(linkedin.platform, builder.build_profile_skills(&linkedin)),
    ];
    let result = match_combined(&engine, &sets, &builder.build_job_skills(&job));

    assert!((result.overall_score - 1.0).abs() < 1e-6);
    assert_eq!(result.tier, RecommendationTier::Excellent);
    assert!(result.skills_missing.is_empty());
    assert_eq!(
        result.platforms,
        Some(vec!["GitHub".to_string(), "LinkedIn".to_string()])
    );

    let contributions = result.platform_contributions.unwrap();
    assert!((contributions["github"] - 0.5).abs() < 1e-6);
    assert!((contributions["linkedin"] - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn test_rank_jobs_from_array_file() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/github_profile.json"))
        .await
        .unwrap();
    let jobs = manager.load_jobs(Path::new("tests/fixtures/jobs.json")).await.unwrap();
    assert_eq!(jobs.len(), 3);

    let builder = builder();
    let job_sets: Vec<_> = jobs
        .iter()
        .map(|job| (job.display_title(), builder.build_job_skills(job)))
        .collect();

    // "requirements" stands in for "skills"; a job with no text falls back
    assert_eq!(job_sets[0].1.names(), vec!["Kafka", "Spark"]);
    assert_eq!(job_sets[2].0, "Position at Initech");
    assert!(job_sets[2].1.contains("communication"));

    let rankings = rank_jobs(&MatchEngine::default(), &builder.build_profile_skills(&profile), &job_sets);
    assert_eq!(rankings.len(), 3);
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(rankings[0].job_title, "Rust Developer at Ferris Co");
    assert!((rankings[0].result.overall_score - 1.0).abs() < 1e-6);
    assert!(rankings
        .windows(2)
        .all(|pair| pair[0].result.overall_score >= pair[1].result.overall_score));
}

#[tokio::test]
async fn test_report_generation_end_to_end() {
    let mut manager = InputManager::new();
    let profile = manager
        .load_profile(Path::new("tests/fixtures/github_profile.json"))
        .await
        .unwrap();
    let job = manager
        .load_job(Path::new("tests/fixtures/job_backend.json"))
        .await
        .unwrap();

    let builder = builder();
    let result = MatchEngine::default().match_skills(&builder.build_profile_skills(&profile), &builder.build_job_skills(&job));
    let report = MatchReport::new(&job, std::slice::from_ref(&profile), result, metadata());
    assert_eq!(report.job_title, "Backend Engineer at Ferris Co");
    assert_eq!(report.overall_score_percentage, 75);

    let generator = ReportGenerator::with_options(false, true, true, true);

    let json_output = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["overall_score_percentage"], 75);
    assert_eq!(parsed["profiles"][0], "GitHub: octocat");

    let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("**Position:** Backend Engineer at Ferris Co"));
    assert!(markdown.contains("### Missing Skills"));
    assert!(markdown.contains("Kafka"));

    let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("75"));
    assert!(!console.contains("\u{1b}["), "colors are disabled");
}

#[test]
fn test_build_from_raw_records() {
    let builder = builder();

    // Unknown platform with nothing else: the username is mined for skills
    let skills = builder.build(&json!({ "username": "rust-dev" }), Role::Profile).unwrap();
    assert!(skills.contains("Rust"));

    let skills = builder.build(&json!({ "skills": "Rust, Go;SQL" }), Role::Job).unwrap();
    assert_eq!(skills.names(), vec!["Rust", "Go", "SQL"]);

    assert!(builder.build(&json!("just a string"), Role::Profile).is_err());
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/job_backend.json");

    let first = manager.load_record(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.load_record(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.load_record(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_record_that_is_not_an_object() {
    let mut manager = InputManager::new();
    let result = manager.load_profile(Path::new("tests/fixtures/not_an_object.json")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.load_record(Path::new("tests/fixtures/nonexistent.json")).await;
    assert!(result.is_err());
}
