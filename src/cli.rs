//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-match")]
#[command(about = "Explainable matching of developer skill sets against job requirements")]
#[command(long_about = "Extract skills from developer profiles and job postings (JSON or TOML) and score how well they match, with strengths, gaps and a recommendation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match one or more profiles against a job
    Match {
        /// Profile record (JSON, TOML); repeat to match the combined skills of several profiles
        #[arg(short, long, required = true)]
        profile: Vec<PathBuf>,

        /// Job record (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Output detailed per-skill scores
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank several jobs against one or more profiles
    Rank {
        /// Profile record; repeat to combine several profiles
        #[arg(short, long, required = true)]
        profile: Vec<PathBuf>,

        /// Job files, each holding one job or an array of jobs
        #[arg(short, long, required = true, num_args = 1..)]
        jobs: Vec<PathBuf>,

        /// Output detailed per-job breakdowns
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the skill set extracted from a record
    Skills {
        /// Record file (JSON, TOML)
        file: PathBuf,

        /// Record role: profile or job
        #[arg(short, long, default_value = "profile")]
        role: String,

        /// Print the skill set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score the similarity of two skill names
    Similarity {
        first: String,
        second: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
