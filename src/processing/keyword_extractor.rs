//! Keyword extraction from free text (bios, titles, descriptions, repository names)

use crate::error::{Result, SkillMatchError};
use crate::processing::vocabulary::Vocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::HashSet;

/// Characters that stay inside a token; everything else that is not
/// alphanumeric splits tokens.
const TOKEN_INNER_CHARS: &[char] = &['.', '-', '_', '+', '#'];
const TOKEN_EDGE_CHARS: &[char] = &['.', '-', '_'];

/// Finds skill-like keywords in text.
///
/// Two independent passes are unioned:
/// 1. vocabulary hits, matched case-insensitively on alphanumeric boundaries
///    and reported in the vocabulary's casing;
/// 2. tokens whose shape looks like a technology name (camelCase, PascalCase,
///    `name.ext`, `word-word`), reported lower-cased.
pub struct KeywordExtractor {
    vocabulary: Vocabulary,
    matcher: AhoCorasick,
    camel_case: Regex,
    pascal_case: Regex,
    file_extension: Regex,
    hyphenated: Regex,
}

impl KeywordExtractor {
    /// Create an extractor over the built-in vocabulary
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(Vocabulary::builtin())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(vocabulary.terms())
            .map_err(|e| SkillMatchError::Processing(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            vocabulary,
            matcher,
            camel_case: compile(r"^[a-z]+[A-Z][a-z]*")?,
            pascal_case: compile(r"^[A-Z][a-z]+[A-Z]")?,
            file_extension: compile(r"\.[a-z]{1,4}$")?,
            hyphenated: compile(r"^[a-z]+-[a-z]+$")?,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract the deduplicated union of vocabulary hits and shaped tokens.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text = normalize_unicode(text);
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for keyword in self
            .vocabulary_hits(&text)
            .into_iter()
            .chain(self.shaped_tokens(&text))
        {
            if seen.insert(keyword.to_lowercase()) {
                keywords.push(keyword);
            }
        }

        keywords
    }

    /// Vocabulary terms found in `text`, ordered by first occurrence.
    pub fn vocabulary_hits(&self, text: &str) -> Vec<String> {
        let mut hits: Vec<(usize, usize)> = self
            .matcher
            .find_overlapping_iter(text)
            .filter(|m| on_word_boundary(text, m.start(), m.end()))
            .map(|m| (m.start(), m.pattern().as_usize()))
            .collect();

        // Earlier first; at the same position the longer term first.
        hits.sort_by(|a, b| {
            a.0.cmp(&b.0).then_with(|| {
                let len_a = self.vocabulary.terms()[a.1].len();
                let len_b = self.vocabulary.terms()[b.1].len();
                len_b.cmp(&len_a)
            })
        });

        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|(_, id)| seen.insert(*id))
            .map(|(_, id)| self.vocabulary.terms()[id].clone())
            .collect()
    }

    /// Tokens matching one of the technology-name shape heuristics.
    pub fn shaped_tokens(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|token| self.is_shaped(token))
            .map(|token| token.to_lowercase())
            .collect()
    }

    fn is_shaped(&self, token: &str) -> bool {
        if self.camel_case.is_match(token)
            || self.pascal_case.is_match(token)
            || self.hyphenated.is_match(token)
        {
            return true;
        }

        // "e.g" must not pass as a file name: require a real stem.
        self.file_extension.is_match(token)
            && token
                .rfind('.')
                .map(|dot| token[..dot].chars().filter(|c| c.is_alphanumeric()).count() >= 2)
                .unwrap_or(false)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| SkillMatchError::Processing(format!("Invalid keyword pattern '{}': {}", pattern, e)))
}

/// Split text on delimiters, keeping `.`, `-`, `_`, `+` and `#` inside tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || TOKEN_INNER_CHARS.contains(&c)))
        .map(|token| token.trim_matches(TOKEN_EDGE_CHARS))
        .filter(|token| !token.is_empty())
        .collect()
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}

/// Normalize typographic punctuation to ASCII
fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'', // Smart quotes to regular quotes
            '\u{201C}' | '\u{201D}' => '"',  // Smart double quotes
            '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}
