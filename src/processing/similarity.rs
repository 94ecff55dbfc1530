//! Layered fuzzy similarity between two skill names

use crate::config::MatchingConfig;
use crate::processing::aliases::canonical_skill_name;

/// Scores skill-name pairs in [0, 1].
///
/// Rules, first applicable wins (on lower-cased, trimmed names):
/// 0. either name empty: 0
/// 1. equal: 1.0
/// 2. one contains the other: `containment_score`
/// 3. either shorter than three characters: `short_name_score` when the first
///    characters agree, else 0
/// 4. shared words (equal or nested): `common / max(words_a, words_b)`
/// 5. common prefix or suffix of at least `min_affix_len`:
///    `(prefix + suffix) / (len_a + len_b)`
/// 6. otherwise `default_similarity`
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    containment_score: f32,
    short_name_score: f32,
    default_similarity: f32,
    min_affix_len: usize,
    match_threshold: f32,
    canonicalize: bool,
}

impl SimilarityScorer {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            containment_score: config.containment_score,
            short_name_score: config.short_name_score,
            default_similarity: config.default_similarity,
            min_affix_len: config.min_affix_len,
            match_threshold: config.match_threshold,
            canonicalize: config.canonicalize_aliases,
        }
    }

    /// The comparison form of a skill name
    pub fn normalize(&self, name: &str) -> String {
        if self.canonicalize {
            canonical_skill_name(name)
        } else {
            name.trim().to_lowercase()
        }
    }

    /// True when both names have the same comparison form
    pub fn is_exact(&self, a: &str, b: &str) -> bool {
        let a = self.normalize(a);
        !a.is_empty() && a == self.normalize(b)
    }

    pub fn is_match(&self, similarity: f32) -> bool {
        similarity >= self.match_threshold
    }

    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        let a = self.normalize(a);
        let b = self.normalize(b);

        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }
        if a.contains(&b) || b.contains(&a) {
            return self.containment_score;
        }

        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();

        if a_chars.len() < 3 || b_chars.len() < 3 {
            return if a_chars[0] == b_chars[0] {
                self.short_name_score
            } else {
                0.0
            };
        }

        let words_a: Vec<&str> = a.split_whitespace().collect();
        let words_b: Vec<&str> = b.split_whitespace().collect();
        let common = words_a
            .iter()
            .filter(|wa| {
                words_b
                    .iter()
                    .any(|wb| wa == &wb || wa.contains(*wb) || wb.contains(**wa))
            })
            .count();
        if common > 0 {
            let longest = words_a.len().max(words_b.len());
            return (common as f32 / longest as f32).clamp(0.0, 1.0);
        }

        let prefix = a_chars
            .iter()
            .zip(&b_chars)
            .take_while(|(x, y)| x == y)
            .count();
        let room = a_chars.len().min(b_chars.len()) - prefix;
        let suffix = a_chars
            .iter()
            .rev()
            .zip(b_chars.iter().rev())
            .take(room)
            .take_while(|(x, y)| x == y)
            .count();

        if prefix >= self.min_affix_len || suffix >= self.min_affix_len {
            return ((prefix + suffix) as f32 / (a_chars.len() + b_chars.len()) as f32).clamp(0.0, 1.0);
        }

        self.default_similarity
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

/// Similarity with the default constants
pub fn similarity(a: &str, b: &str) -> f32 {
    SimilarityScorer::default().similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_identity() {
        for name in ["Rust", "node.js", "C#", "Machine Learning", "x"] {
            assert_eq!(similarity(name, name), 1.0, "{}", name);
        }
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(similarity("javascript", "JavaScript"), 1.0);
        assert_eq!(similarity("  Docker ", "docker"), 1.0);
    }

    #[test]
    fn test_containment() {
        assert_eq!(similarity("React", "React Native"), 0.9);
        assert_eq!(similarity("postgresql", "Postgres"), 0.9);
        assert!(similarity("sql", "PostgreSQL") >= 0.9);
    }

    #[test]
    fn test_short_names() {
        assert_eq!(similarity("Go", "Git"), 0.7);
        assert_eq!(similarity("C#", "Rust"), 0.0);
    }

    #[test]
    fn test_word_overlap() {
        assert!(approx(similarity("Machine Learning", "Deep Learning"), 0.5));
        assert!(approx(similarity("cloud computing platform", "cloud services"), 1.0 / 3.0));
    }

    #[test]
    fn test_prefix_and_suffix() {
        // shared suffix "script"
        assert!(approx(similarity("javascript", "typescript"), 6.0 / 20.0));
        // shared prefix "kube"
        assert!(approx(similarity("kubectl", "kubernetes"), 4.0 / 17.0));
    }

    #[test]
    fn test_default_low_score() {
        assert_eq!(similarity("kotlin", "haskell"), 0.1);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(similarity("", "Rust"), 0.0);
        assert_eq!(similarity("Rust", "   "), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_results_stay_in_unit_range() {
        let names = ["a", "ab", "abc", "react", "react native", "reactive", "java", "javascript", ""];
        for a in names {
            for b in names {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{} vs {} = {}", a, b, s);
            }
        }
    }

    #[test]
    fn test_alias_canonicalization_is_opt_in() {
        assert_eq!(similarity("k8s", "Kubernetes"), 0.1);

        let config = MatchingConfig {
            canonicalize_aliases: true,
            ..MatchingConfig::default()
        };
        let scorer = SimilarityScorer::new(&config);
        assert_eq!(scorer.similarity("JS", "JavaScript"), 1.0);
        assert!(scorer.is_exact("k8s", "Kubernetes"));
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let config = MatchingConfig {
            containment_score: 0.8,
            match_threshold: 0.85,
            ..MatchingConfig::default()
        };
        let scorer = SimilarityScorer::new(&config);
        assert_eq!(scorer.similarity("React", "React Native"), 0.8);
        assert!(!scorer.is_match(0.8));
        assert!(scorer.is_match(0.85));
    }
}
