//! Skill entries and ordered, case-insensitively deduplicated skill sets

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,

    /// Job-side weight in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f32>,

    /// Profile-side strength in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<f32>,

    #[serde(default)]
    pub required: bool,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            importance: None,
            proficiency: None,
            required: false,
        }
    }

    pub fn with_importance(mut self, importance: f32) -> Self {
        self.importance = unit_value(importance as f64);
        self
    }

    pub fn with_proficiency(mut self, proficiency: f32) -> Self {
        self.proficiency = unit_value(proficiency as f64);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Case-insensitive identity of the skill
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    pub fn importance_or(&self, default: f32) -> f32 {
        self.importance.unwrap_or(default)
    }

    pub fn proficiency_or(&self, default: f32) -> f32 {
        self.proficiency.unwrap_or(default)
    }
}

/// Clamp a raw number into [0, 1]; non-finite numbers carry no information.
pub fn unit_value(value: f64) -> Option<f32> {
    if value.is_finite() {
        Some(value.clamp(0.0, 1.0) as f32)
    } else {
        None
    }
}

/// Skills in insertion order, unique by trimmed lower-cased name.
///
/// The first occurrence of a name wins; later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSet {
    skills: Vec<Skill>,
    keys: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Skill::named).collect()
    }

    /// Insert a skill; returns false when the name is blank or already present.
    pub fn insert(&mut self, mut skill: Skill) -> bool {
        let trimmed = skill.name.trim();
        if trimmed.is_empty() {
            return false;
        }
        if trimmed.len() != skill.name.len() {
            skill.name = trimmed.to_string();
        }

        if self.keys.insert(skill.key()) {
            self.skills.push(skill);
            true
        } else {
            false
        }
    }

    /// Append every skill of `other` not already present.
    pub fn merge(&mut self, other: &SkillSet) {
        for skill in &other.skills {
            self.insert(skill.clone());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name.trim().to_lowercase())
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        let key = name.trim().to_lowercase();
        self.skills.iter().find(|s| s.key() == key)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.skills.iter()
    }

    pub fn as_slice(&self) -> &[Skill] {
        &self.skills
    }

    pub fn names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }

    pub fn into_vec(self) -> Vec<Skill> {
        self.skills
    }

    /// Apply `f` to every skill; names are left untouched so keys stay valid.
    pub(crate) fn update_each(&mut self, mut f: impl FnMut(&mut Skill)) {
        for skill in &mut self.skills {
            let name = skill.name.clone();
            f(skill);
            skill.name = name;
        }
    }
}

impl Extend<Skill> for SkillSet {
    fn extend<T: IntoIterator<Item = Skill>>(&mut self, iter: T) {
        for skill in iter {
            self.insert(skill);
        }
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        let mut set = SkillSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a Skill;
    type IntoIter = std::slice::Iter<'a, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

impl Serialize for SkillSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.skills.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let skills = Vec::<Skill>::deserialize(deserializer)?;
        Ok(skills.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_dedup_keeps_first() {
        let mut set = SkillSet::new();
        assert!(set.insert(Skill::named("React").with_proficiency(0.4)));
        assert!(!set.insert(Skill::named("react")));
        assert!(!set.insert(Skill::named("  REACT ")));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("REACT").unwrap().proficiency, Some(0.4));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let mut set = SkillSet::new();
        assert!(!set.insert(Skill::named("")));
        assert!(!set.insert(Skill::named("   \t")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_names_are_trimmed() {
        let set = SkillSet::from_names(["  Docker  "]);
        assert_eq!(set.names(), vec!["Docker".to_string()]);
        assert!(set.contains("docker"));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let set = SkillSet::from_names(["Rust", "Go", "Python", "go"]);
        assert_eq!(set.names(), vec!["Rust", "Go", "Python"]);
    }

    #[test]
    fn test_merge_is_an_ordered_union() {
        let mut left = SkillSet::from_names(["Python", "SQL"]);
        let right = SkillSet::from_names(["sql", "Docker"]);
        left.merge(&right);
        assert_eq!(left.names(), vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_unit_value_clamps_and_rejects_non_finite() {
        assert_eq!(unit_value(1.7), Some(1.0));
        assert_eq!(unit_value(-0.2), Some(0.0));
        assert_eq!(unit_value(0.25), Some(0.25));
        assert_eq!(unit_value(f64::NAN), None);
        assert_eq!(unit_value(f64::INFINITY), None);
    }

    #[test]
    fn test_serde_round_trip_dedups() {
        let json = r#"[{"name":"Rust","proficiency":0.9},{"name":"rust"},{"name":"Go","required":true}]"#;
        let set: SkillSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("go").unwrap().required);

        let back = serde_json::to_value(&set).unwrap();
        assert_eq!(back[0]["name"], "Rust");
        assert!(back[0].get("importance").is_none());
    }
}
