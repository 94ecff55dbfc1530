//! Canonical spellings for common skill aliases

const PREFIXES: &[&str] = &[
    "knowledge of ",
    "experience with ",
    "proficiency in ",
    "skills in ",
    "understanding of ",
];

const SUFFIXES: &[&str] = &[
    " basics",
    " fundamentals",
    " framework",
    " library",
    " development",
    " programming",
    " language",
];

const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("postgres", "postgresql"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("golang", "go"),
    ("k8s", "kubernetes"),
];

/// Lower-case `name`, drop filler prefixes and suffixes, then map known aliases.
///
/// "Experience with ReactJS" and "react framework" both become "react".
pub fn canonical_skill_name(name: &str) -> String {
    let mut canonical = name.trim().to_lowercase();

    if let Some(rest) = PREFIXES.iter().find_map(|p| canonical.strip_prefix(p)) {
        canonical = rest.trim_start().to_string();
    }
    if let Some(rest) = SUFFIXES.iter().find_map(|s| canonical.strip_suffix(s)) {
        if !rest.trim().is_empty() {
            canonical = rest.trim_end().to_string();
        }
    }

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == canonical)
        .map(|(_, target)| target.to_string())
        .unwrap_or(canonical)
}
