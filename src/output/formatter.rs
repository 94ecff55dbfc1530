//! Output formatters for console, JSON and Markdown

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{score_percentage, MatchReport, RankingReport};
use crate::processing::match_engine::{MatchResult, RecommendationTier};
use colored::{Color, Colorize};
use std::path::Path;
use std::time::SystemTime;

/// Trait for formatting match and ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and storage
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_tier_badge(&self, tier: RecommendationTier) -> String {
        let (badge, color) = match tier {
            RecommendationTier::Excellent => ("EXCELLENT", Color::Green),
            RecommendationTier::Good => ("GOOD", Color::BrightGreen),
            RecommendationTier::Moderate => ("MODERATE", Color::Yellow),
            RecommendationTier::Weak => ("WEAK", Color::BrightRed),
            RecommendationTier::Poor => ("POOR", Color::Red),
            RecommendationTier::InsufficientData => ("NO DATA", Color::BrightBlack),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_result(&self, result: &MatchResult, output: &mut String) {
        if !result.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Key Strengths", 3));
            for strength in &result.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !result.skill_matches.is_empty() {
            output.push_str(&self.format_header("🔗 Matched Skills", 3));
            for m in &result.skill_matches {
                if self.detailed {
                    output.push_str(&format!(
                        "  • {} ← {} | similarity {:.2} | quality {:.2} | score {:.2} | weight {:.2}\n",
                        m.skill_name, m.matched_skill, m.similarity, m.match_quality, m.match_score, m.importance
                    ));
                } else if m.skill_name.eq_ignore_ascii_case(&m.matched_skill) {
                    output.push_str(&format!("  • {}\n", m.skill_name));
                } else {
                    output.push_str(&format!("  • {} (via {})\n", m.skill_name, m.matched_skill));
                }
            }
        }

        if !result.skills_missing.is_empty() {
            output.push_str(&self.format_header("🎯 Missing Skills", 3));
            for missing in &result.skills_missing {
                let marker = if missing.required {
                    format!(" {}", self.colorize("(required)", Color::Red))
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "  • {}{}\n",
                    self.colorize(&missing.name, Color::Yellow),
                    marker
                ));
            }
        }

        if let Some(contributions) = &result.platform_contributions {
            output.push_str(&self.format_header("🌐 Platform Contributions", 3));
            for (platform, share) in contributions {
                output.push_str(&format!("  • {}: {:.1}%\n", platform, share * 100.0));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!(
                "Profile skills: {} | Job skills: {} | Matched: {}\n",
                result.details.profile_skill_count,
                result.details.job_skill_count,
                result.details.matched_skill_count
            ));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 SKILL MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report.metadata.generated_at),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!("Position: {}\n", report.job_title));
        output.push_str(&format!("Profiles: {}\n", report.profiles.join(", ")));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            report.overall_score_percentage,
            self.format_tier_badge(report.result.tier)
        ));
        output.push_str(&format!(
            "Recommendation: {}\n",
            self.colorize(&report.result.recommendation, Color::Cyan)
        ));

        self.format_result(&report.result, &mut output);

        if self.detailed {
            output.push_str(&format!(
                "\nVocabulary: {} | skill-match v{}\n",
                report.metadata.vocabulary_version, report.metadata.matcher_version
            ));
        }

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🏆 JOB RANKING", 1));
        output.push_str(&format!("Profiles: {}\n", report.profiles.join(", ")));

        for entry in &report.rankings {
            output.push_str(&format!(
                "\n{:>3}. {} - {}% {}\n",
                entry.rank,
                entry.job_title,
                score_percentage(entry.result.overall_score),
                self.format_tier_badge(entry.result.tier)
            ));
            if self.detailed {
                self.format_result(&entry.result, &mut output);
            } else if !entry.result.skills_missing.is_empty() {
                let missing: Vec<&str> = entry.result.missing_names();
                output.push_str(&format!("     Missing: {}\n", missing.join(", ")));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn tier_badge(tier: RecommendationTier) -> &'static str {
        match tier {
            RecommendationTier::Excellent => "🟢 Excellent",
            RecommendationTier::Good => "🟡 Good",
            RecommendationTier::Moderate => "🟠 Moderate",
            RecommendationTier::Weak => "🔴 Weak",
            RecommendationTier::Poor => "🔴 Poor",
            RecommendationTier::InsufficientData => "⚪ Insufficient Data",
        }
    }

    fn format_result(result: &MatchResult, output: &mut String) {
        if !result.strengths.is_empty() {
            output.push_str("### ✅ Key Strengths\n\n");
            for strength in &result.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !result.skill_matches.is_empty() {
            output.push_str("### Matched Skills\n\n");
            output.push_str("| Job Skill | Profile Skill | Similarity | Quality | Score | Importance |\n");
            output.push_str("|-----------|---------------|------------|---------|-------|------------|\n");
            for m in &result.skill_matches {
                output.push_str(&format!(
                    "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
                    m.skill_name, m.matched_skill, m.similarity, m.match_quality, m.match_score, m.importance
                ));
            }
            output.push('\n');
        }

        if !result.skills_missing.is_empty() {
            output.push_str("### Missing Skills\n\n");
            for missing in &result.skills_missing {
                let required = if missing.required { " **(required)**" } else { "" };
                output.push_str(&format!(
                    "- {} (importance {:.2}){}\n",
                    missing.name, missing.importance, required
                ));
            }
            output.push('\n');
        }

        if let Some(contributions) = &result.platform_contributions {
            output.push_str("### Platform Contributions\n\n");
            output.push_str("| Platform | Contribution |\n");
            output.push_str("|----------|--------------|\n");
            for (platform, share) in contributions {
                output.push_str(&format!("| {} | {:.1}% |\n", platform, share * 100.0));
            }
            output.push('\n');
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Skill Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Vocabulary:** `{}`\n\n",
                format_timestamp(report.metadata.generated_at),
                report.metadata.processing_time_ms,
                report.metadata.vocabulary_version
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Position:** {}\n\n", report.job_title));
        output.push_str(&format!("**Profiles:** {}\n\n", report.profiles.join(", ")));
        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            report.overall_score_percentage,
            Self::tier_badge(report.result.tier)
        ));
        output.push_str(&format!("**Recommendation:** {}\n\n", report.result.recommendation));

        Self::format_result(&report.result, &mut output);

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🏆 Job Ranking\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n\n",
                format_timestamp(report.metadata.generated_at)
            ));
        }
        output.push_str(&format!("**Profiles:** {}\n\n", report.profiles.join(", ")));

        output.push_str("| Rank | Position | Score | Tier | Missing |\n");
        output.push_str("|------|----------|-------|------|---------|\n");
        for entry in &report.rankings {
            output.push_str(&format!(
                "| {} | {} | {}% | {} | {} |\n",
                entry.rank,
                entry.job_title,
                score_percentage(entry.result.overall_score),
                Self::tier_badge(entry.result.tier),
                entry.result.missing_names().join(", ")
            ));
        }
        output.push('\n');

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, config.pretty_json, true)
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_ranking(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn format_timestamp(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let stem = Path::new(base_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", stem, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", stem, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", stem, timestamp_suffix),
    }
}
