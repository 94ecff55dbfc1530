//! skill-match: explainable matching of developer profiles against job requirements

use clap::Parser;
use log::{error, info};
use skill_match::cli::{self, Cli, Commands, ConfigAction};
use skill_match::config::{Config, OutputFormat};
use skill_match::error::{Result, SkillMatchError};
use skill_match::input::InputManager;
use skill_match::output::formatter::{save_report_to_file, ReportGenerator};
use skill_match::output::report::{MatchReport, RankingReport, ReportMetadata};
use skill_match::processing::record::Profile;
use skill_match::processing::{
    combine_skill_sets, match_combined, rank_jobs, MatchEngine, PlatformSkills, Role, SimilarityScorer,
    SkillSetBuilder,
};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

const RECORD_EXTENSIONS: &[&str] = &["json", "toml"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match {
            profile,
            job,
            detailed,
            output,
            save,
        } => {
            info!("Starting skill match analysis");
            validate_record_files(&profile)?;
            validate_record_files(std::slice::from_ref(&job))?;
            let output_format = resolve_output_format(output.as_deref(), &config)?;

            let started = Instant::now();
            let mut input_manager = InputManager::new();

            let mut profiles = Vec::new();
            for path in &profile {
                profiles.push(input_manager.load_profile(path).await?);
            }
            let job_record = input_manager.load_job(&job).await?;

            let builder = SkillSetBuilder::new(&config.extraction)?;
            let engine = MatchEngine::from_config(&config);
            let job_skills = builder.build_job_skills(&job_record);

            let result = match profiles.as_slice() {
                [single] => engine.match_skills(&builder.build_profile_skills(single), &job_skills),
                many => {
                    info!("Matching the combined skills of {} profiles", many.len());
                    let sets: Vec<PlatformSkills> = many
                        .iter()
                        .map(|p| PlatformSkills::new(p.platform, builder.build_profile_skills(p)))
                        .collect();
                    match_combined(&engine, &sets, &job_skills)
                }
            };

            let metadata = ReportMetadata::new(
                path_strings(&profile),
                path_strings(std::slice::from_ref(&job)),
                builder.extractor().vocabulary().version(),
                started.elapsed().as_millis() as u64,
            );
            let report = MatchReport::new(&job_record, &profiles, result, metadata);

            let generator = report_generator(&config, detailed, save.is_some());
            let content = generator.generate_report(&report, &output_format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Rank {
            profile,
            jobs,
            detailed,
            output,
            save,
        } => {
            info!("Ranking jobs");
            validate_record_files(&profile)?;
            validate_record_files(&jobs)?;
            let output_format = resolve_output_format(output.as_deref(), &config)?;

            let started = Instant::now();
            let mut input_manager = InputManager::new();

            let mut profiles: Vec<Profile> = Vec::new();
            for path in &profile {
                profiles.push(input_manager.load_profile(path).await?);
            }

            let builder = SkillSetBuilder::new(&config.extraction)?;
            let engine = MatchEngine::from_config(&config);

            let profile_sets: Vec<_> = profiles.iter().map(|p| builder.build_profile_skills(p)).collect();
            let profile_skills = combine_skill_sets(&profile_sets);

            let mut job_sets = Vec::new();
            for path in &jobs {
                for job in input_manager.load_jobs(path).await? {
                    job_sets.push((job.display_title(), builder.build_job_skills(&job)));
                }
            }
            if job_sets.is_empty() {
                return Err(SkillMatchError::InvalidInput("No jobs found to rank".to_string()));
            }

            let rankings = rank_jobs(&engine, &profile_skills, &job_sets);

            let metadata = ReportMetadata::new(
                path_strings(&profile),
                path_strings(&jobs),
                builder.extractor().vocabulary().version(),
                started.elapsed().as_millis() as u64,
            );
            let report = RankingReport::new(&profiles, rankings, metadata);

            let generator = report_generator(&config, detailed, save.is_some());
            let content = generator.generate_ranking(&report, &output_format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Skills { file, role, json } => {
            validate_record_files(std::slice::from_ref(&file))?;
            let role: Role = role.parse()?;

            let mut input_manager = InputManager::new();
            let record = input_manager.load_record(&file).await?;
            let builder = SkillSetBuilder::new(&config.extraction)?;
            let skills = builder.build(&record, role)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&skills)?);
            } else {
                println!("🧩 {} skill(s) extracted from {} ({})\n", skills.len(), file.display(), role);
                for skill in &skills {
                    let weight = match role {
                        Role::Profile => format!("proficiency {:.2}", skill.proficiency_or(config.extraction.default_proficiency)),
                        Role::Job => format!("importance {:.2}", skill.importance_or(config.extraction.default_importance)),
                    };
                    let required = if skill.required { ", required" } else { "" };
                    println!("  • {} ({}{})", skill.name, weight, required);
                }
            }
        }

        Commands::Similarity { first, second } => {
            let scorer = SimilarityScorer::new(&config.matching);
            let score = scorer.similarity(&first, &second);
            println!("🔍 '{}' vs '{}'", first, second);
            println!("Similarity: {:.3}", score);
            if scorer.is_match(score) {
                println!("✅ Counts as a match (threshold {:.2})", config.matching.match_threshold);
            } else {
                println!("❌ Below the match threshold ({:.2})", config.matching.match_threshold);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                match &config_path {
                    Some(path) => default_config.save_to(path)?,
                    None => default_config.save()?,
                }
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn validate_record_files(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        cli::validate_file_extension(path, RECORD_EXTENSIONS)
            .map_err(|e| SkillMatchError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

fn resolve_output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(SkillMatchError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn report_generator(config: &Config, detailed: bool, saving: bool) -> ReportGenerator {
    // No ANSI escapes in saved files
    let use_colors = config.output.color_output && !saving;
    ReportGenerator::with_options(
        use_colors,
        detailed || config.output.detailed,
        config.output.pretty_json,
        true,
    )
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn path_strings(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.to_string_lossy().to_string()).collect()
}
