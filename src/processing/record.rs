//! Canonical profile and job records.
//!
//! Profile and job data arrive as loosely shaped JSON from several source
//! platforms. `normalize_profile` and `normalize_job` are the only places that
//! know about those shapes; everything downstream works on [`Profile`] and
//! [`Job`].

use crate::error::{Result, SkillMatchError};
use crate::processing::skill_set::{unit_value, Skill};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    GitHub,
    LinkedIn,
    LeetCode,
    Codeforces,
    #[default]
    Unknown,
}

impl Platform {
    /// Parse a platform tag; anything unrecognised is `Unknown`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "github" => Platform::GitHub,
            "linkedin" => Platform::LinkedIn,
            "leetcode" => Platform::LeetCode,
            "codeforces" => Platform::Codeforces,
            _ => Platform::Unknown,
        }
    }

    /// Guess the platform from a profile URL
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("github.com") {
            Platform::GitHub
        } else if url.contains("linkedin.com") {
            Platform::LinkedIn
        } else if url.contains("leetcode.com") || url.contains("leetcode.cn") {
            Platform::LeetCode
        } else if url.contains("codeforces.com") {
            Platform::Codeforces
        } else {
            Platform::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GitHub => "github",
            Platform::LinkedIn => "linkedin",
            Platform::LeetCode => "leetcode",
            Platform::Codeforces => "codeforces",
            Platform::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::GitHub => "GitHub",
            Platform::LinkedIn => "LinkedIn",
            Platform::LeetCode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Primary language plus any language breakdown
    pub languages: Vec<String>,
    pub technologies: Vec<String>,
}

/// Platform-specific activity that only some sources provide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformDetails {
    GitHub,
    LinkedIn {
        /// Readable form of the public profile slug ("jane-doe-rust" -> "jane doe rust")
        slug: Option<String>,
    },
    LeetCode {
        languages: Vec<String>,
    },
    Codeforces {
        languages: Vec<String>,
        problem_tags: Vec<String>,
    },
    #[default]
    Unknown,
}

impl PlatformDetails {
    /// Skill names demonstrated by platform activity (submission languages, problem tags)
    pub fn activity_skills(&self) -> Vec<String> {
        match self {
            PlatformDetails::LeetCode { languages } => languages.clone(),
            PlatformDetails::Codeforces {
                languages,
                problem_tags,
            } => languages.iter().chain(problem_tags).cloned().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub platform: Platform,
    pub username: Option<String>,
    pub name: Option<String>,
    pub profile_url: Option<String>,
    /// Explicitly listed skills
    pub skills: Vec<Skill>,
    pub repositories: Vec<Repository>,
    /// Free text: bio, about, headline, experience entries
    pub texts: Vec<String>,
    pub details: PlatformDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<Skill>,
}

impl Job {
    pub fn display_title(&self) -> String {
        match (&self.title, &self.company) {
            (Some(title), Some(company)) => format!("{} at {}", title, company),
            (Some(title), None) => title.clone(),
            (None, Some(company)) => format!("Position at {}", company),
            (None, None) => "Untitled position".to_string(),
        }
    }
}

/// Normalize a raw profile record.
///
/// Fields are looked up at the top level first, then under `data`. Only a
/// record that is not an object is rejected.
pub fn normalize_profile(record: &Value) -> Result<Profile> {
    if !record.is_object() {
        return Err(SkillMatchError::InvalidInput(
            "profile record must be a JSON object".to_string(),
        ));
    }

    let profile_url = first_text(record, &[&["profile_url"], &["url"], &["html_url"]]);
    let mut platform = text(record, &["platform"])
        .map(|tag| Platform::parse(&tag))
        .unwrap_or_default();
    if platform == Platform::Unknown {
        if let Some(url) = &profile_url {
            platform = Platform::from_url(url);
        }
    }

    let mut skills = lookup(record, &["skills"]).map(skill_entries).unwrap_or_default();
    if let Some(tags) = lookup(record, &["profile", "skillTags"]) {
        skills.extend(skill_entries(tags));
    }

    let mut repositories = Vec::new();
    for key in ["repositories", "repos", "projects"] {
        if let Some(Value::Array(entries)) = lookup(record, &[key]) {
            repositories.extend(entries.iter().filter_map(parse_repository));
        }
    }

    let details = match platform {
        Platform::GitHub => PlatformDetails::GitHub,
        Platform::LinkedIn => PlatformDetails::LinkedIn {
            slug: profile_url.as_deref().and_then(linkedin_slug),
        },
        Platform::LeetCode => PlatformDetails::LeetCode {
            languages: leetcode_languages(record),
        },
        Platform::Codeforces => {
            let (languages, problem_tags) = codeforces_activity(record);
            PlatformDetails::Codeforces {
                languages,
                problem_tags,
            }
        }
        Platform::Unknown => PlatformDetails::Unknown,
    };

    Ok(Profile {
        platform,
        username: first_text(record, &[&["username"], &["login"], &["handle"], &["profile", "username"]]),
        name: first_text(record, &[&["name"], &["profile", "realName"]]),
        profile_url,
        skills,
        repositories,
        texts: profile_texts(record),
        details,
    })
}

/// Normalize a raw job record. `requirements` is accepted in place of `skills`.
pub fn normalize_job(record: &Value) -> Result<Job> {
    if !record.is_object() {
        return Err(SkillMatchError::InvalidInput(
            "job record must be a JSON object".to_string(),
        ));
    }

    let skills = match lookup(record, &["skills"]).map(skill_entries) {
        Some(skills) if !skills.is_empty() => skills,
        _ => lookup(record, &["requirements"]).map(skill_entries).unwrap_or_default(),
    };

    let company = text(record, &["company"]).or_else(|| text(record, &["company", "name"]));

    Ok(Job {
        title: text(record, &["title"]),
        company,
        description: first_text(record, &[&["description"], &["summary"]]),
        location: text(record, &["location"]),
        skills,
    })
}

/// Parse one skill entry: a bare name, or an object with `name`/`skill` and
/// optional `importance`, `proficiency`, `level` and `required`.
pub fn parse_skill_entry(entry: &Value) -> Option<Skill> {
    match entry {
        Value::String(name) => non_blank(name).map(Skill::named),
        Value::Object(map) => {
            let name = map
                .get("name")
                .or_else(|| map.get("skill"))
                .and_then(Value::as_str)
                .and_then(non_blank)?;

            let mut skill = Skill::named(name);
            skill.importance = map.get("importance").and_then(Value::as_f64).and_then(unit_value);
            skill.proficiency = map
                .get("proficiency")
                .and_then(Value::as_f64)
                .and_then(unit_value)
                .or_else(|| map.get("level").and_then(Value::as_str).and_then(level_proficiency));
            skill.required = map.get("required").and_then(Value::as_bool).unwrap_or(false);
            Some(skill)
        }
        other => {
            debug!("Dropping malformed skill entry: {}", other);
            None
        }
    }
}

/// Map a textual skill level to a proficiency value
pub fn level_proficiency(level: &str) -> Option<f32> {
    match level.trim().to_lowercase().as_str() {
        "expert" | "advanced" => Some(1.0),
        "intermediate" => Some(0.7),
        "beginner" | "basic" => Some(0.4),
        _ => None,
    }
}

/// Readable slug of a LinkedIn profile URL: the path segment after `/in/`.
pub fn linkedin_slug(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/in/")?;
    let slug = rest.split(['/', '?', '#']).next()?;
    non_blank(&slug.replace(['-', '_'], " "))
}

fn skill_entries(value: &Value) -> Vec<Skill> {
    match value {
        Value::Array(entries) => entries.iter().filter_map(parse_skill_entry).collect(),
        Value::String(list) => split_list(list).into_iter().map(Skill::named).collect(),
        other => {
            debug!("Ignoring skills field of unexpected shape: {}", other);
            Vec::new()
        }
    }
}

fn parse_repository(entry: &Value) -> Option<Repository> {
    if !entry.is_object() {
        debug!("Dropping malformed repository entry: {}", entry);
        return None;
    }

    let mut languages = Vec::new();
    if let Some(language) = entry.get("language").and_then(Value::as_str).and_then(non_blank) {
        languages.push(language);
    }
    if let Some(breakdown) = entry.get("languages") {
        languages.extend(string_list(breakdown));
    }

    Some(Repository {
        name: entry.get("name").and_then(Value::as_str).and_then(non_blank),
        description: entry.get("description").and_then(Value::as_str).and_then(non_blank),
        languages,
        technologies: entry.get("technologies").map(string_list).unwrap_or_default(),
    })
}

const PROFILE_TEXT_PATHS: &[&[&str]] = &[
    &["bio"],
    &["about"],
    &["summary"],
    &["headline"],
    &["title"],
    &["profile", "aboutMe"],
];

fn profile_texts(record: &Value) -> Vec<String> {
    let mut texts: Vec<String> = PROFILE_TEXT_PATHS
        .iter()
        .filter_map(|path| text(record, path))
        .collect();

    if let Some(Value::Array(entries)) = lookup(record, &["experience"]) {
        for entry in entries {
            match entry {
                Value::String(s) => texts.extend(non_blank(s)),
                Value::Object(_) => {
                    for key in ["title", "description"] {
                        texts.extend(entry.get(key).and_then(Value::as_str).and_then(non_blank));
                    }
                }
                other => debug!("Dropping malformed experience entry: {}", other),
            }
        }
    }

    texts
}

fn leetcode_languages(record: &Value) -> Vec<String> {
    let mut languages = lookup(record, &["languages"]).map(string_list).unwrap_or_default();
    if let Some(Value::Array(submissions)) = lookup(record, &["recent_submissions"]) {
        languages.extend(
            submissions
                .iter()
                .filter_map(|s| s.get("lang").and_then(Value::as_str).and_then(non_blank)),
        );
    }
    languages
}

fn codeforces_activity(record: &Value) -> (Vec<String>, Vec<String>) {
    let mut languages = Vec::new();
    let mut tags = Vec::new();

    if let Some(Value::Array(submissions)) = lookup(record, &["submissions"]) {
        for submission in submissions {
            languages.extend(
                submission
                    .get("programmingLanguage")
                    .and_then(Value::as_str)
                    .and_then(non_blank),
            );
            if let Some(problem_tags) = submission.get("problem").and_then(|p| p.get("tags")) {
                tags.extend(string_list(problem_tags));
            }
        }
    }

    (languages, tags)
}

/// Names from an array of strings / `{name}` objects, a delimited string, or
/// the keys of a language breakdown map.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => non_blank(s),
                Value::Object(map) => map
                    .get("name")
                    .or_else(|| map.get("languageName"))
                    .and_then(Value::as_str)
                    .and_then(non_blank),
                _ => None,
            })
            .collect(),
        Value::String(list) => split_list(list),
        Value::Object(map) => map.keys().filter_map(|k| non_blank(k)).collect(),
        _ => Vec::new(),
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split([',', ';']).filter_map(non_blank).collect()
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn descend<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |value, key| value.get(*key))
        .filter(|value| !value.is_null())
}

fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    descend(record, path).or_else(|| record.get("data").and_then(|data| descend(data, path)))
}

fn text(record: &Value, path: &[&str]) -> Option<String> {
    lookup(record, path).and_then(Value::as_str).and_then(non_blank)
}

fn first_text(record: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| text(record, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_records_are_rejected() {
        assert!(matches!(normalize_profile(&Value::Null), Err(SkillMatchError::InvalidInput(_))));
        assert!(matches!(normalize_job(&json!(["Rust"])), Err(SkillMatchError::InvalidInput(_))));
        assert!(normalize_profile(&json!({})).is_ok());
    }

    #[test]
    fn test_platform_parsing_and_url_inference() {
        assert_eq!(Platform::parse("GitHub"), Platform::GitHub);
        assert_eq!(Platform::parse("myspace"), Platform::Unknown);
        assert_eq!(Platform::from_url("https://www.linkedin.com/in/jane"), Platform::LinkedIn);

        let profile = normalize_profile(&json!({"url": "https://codeforces.com/profile/tourist"})).unwrap();
        assert_eq!(profile.platform, Platform::Codeforces);
    }

    #[test]
    fn test_skill_entries_of_mixed_shape() {
        let profile = normalize_profile(&json!({
            "skills": [
                "Rust",
                {"name": "Go", "proficiency": 0.8},
                {"skill": "SQL", "level": "Intermediate"},
                {"name": "   "},
                42,
                null,
                ["nested"]
            ]
        }))
        .unwrap();

        let names: Vec<&str> = profile.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "SQL"]);
        assert_eq!(profile.skills[1].proficiency, Some(0.8));
        assert_eq!(profile.skills[2].proficiency, Some(0.7));
    }

    #[test]
    fn test_nested_data_fields() {
        let profile = normalize_profile(&json!({
            "platform": "github",
            "username": "octocat",
            "data": {
                "skills": ["Docker"],
                "bio": "Rust and Kubernetes",
                "repositories": [
                    {"name": "api-server", "language": "Go", "languages": {"Go": 1200, "Shell": 40}},
                    "not a repository"
                ]
            }
        }))
        .unwrap();

        assert_eq!(profile.username.as_deref(), Some("octocat"));
        assert_eq!(profile.skills[0].name, "Docker");
        assert_eq!(profile.texts, vec!["Rust and Kubernetes".to_string()]);
        assert_eq!(profile.repositories.len(), 1);
        assert_eq!(profile.repositories[0].languages[0], "Go");
        assert!(profile.repositories[0].languages.contains(&"Shell".to_string()));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let job = normalize_job(&json!({
            "skills": [
                {"name": "Rust", "importance": 3.0, "required": true},
                {"name": "C", "importance": -1}
            ]
        }))
        .unwrap();

        assert_eq!(job.skills[0].importance, Some(1.0));
        assert!(job.skills[0].required);
        assert_eq!(job.skills[1].importance, Some(0.0));
    }

    #[test]
    fn test_job_requirements_and_string_skills() {
        let job = normalize_job(&json!({"requirements": [{"skill": "Python"}]})).unwrap();
        assert_eq!(job.skills[0].name, "Python");

        let job = normalize_job(&json!({"skills": "Rust, Tokio; Serde"})).unwrap();
        assert_eq!(job.skills.len(), 3);
        assert_eq!(job.skills[2].name, "Serde");
    }

    #[test]
    fn test_job_company_object() {
        let job = normalize_job(&json!({"title": "Engineer", "company": {"name": "Acme"}})).unwrap();
        assert_eq!(job.company.as_deref(), Some("Acme"));
        assert_eq!(job.display_title(), "Engineer at Acme");
    }

    #[test]
    fn test_linkedin_slug() {
        assert_eq!(
            linkedin_slug("https://www.linkedin.com/in/jane-doe-rust/?trk=x").as_deref(),
            Some("jane doe rust")
        );
        assert_eq!(linkedin_slug("https://www.linkedin.com/company/acme"), None);
    }

    #[test]
    fn test_leetcode_and_codeforces_activity() {
        let leetcode = normalize_profile(&json!({
            "platform": "leetcode",
            "profile": {"skillTags": ["dynamic programming"], "aboutMe": "I like graphs"},
            "languages": [{"languageName": "C++"}],
            "recent_submissions": [{"lang": "python3"}]
        }))
        .unwrap();
        assert_eq!(leetcode.skills[0].name, "dynamic programming");
        assert!(leetcode.texts.contains(&"I like graphs".to_string()));
        assert_eq!(leetcode.details.activity_skills(), vec!["C++", "python3"]);

        let codeforces = normalize_profile(&json!({
            "platform": "codeforces",
            "submissions": [
                {"programmingLanguage": "GNU C++17", "problem": {"tags": ["greedy", "math"]}}
            ]
        }))
        .unwrap();
        assert_eq!(codeforces.details.activity_skills(), vec!["GNU C++17", "greedy", "math"]);
    }

    #[test]
    fn test_level_proficiency() {
        assert_eq!(level_proficiency("Expert"), Some(1.0));
        assert_eq!(level_proficiency("basic"), Some(0.4));
        assert_eq!(level_proficiency("guru"), None);
    }
}
