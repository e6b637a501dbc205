//! Skill Matching: pluggable strategies that score a job skill against a portfolio tag.
//!
//! Job skills come out of an LLM as free text ("ReactJS", "react.js", "React"),
//! so every strategy works on normalized strings and reports a strength in `[0, 1]`.
//! `PortfolioStore` holds an `Arc<dyn SkillMatcher>` chosen once from config.

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Strength when every word of one side appears in the other without being equal.
const CONTAINMENT_STRENGTH: f32 = 0.6;
/// Jaro-Winkler similarity below this counts as no match.
const FUZZY_THRESHOLD: f64 = 0.85;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one normalized skill against one normalized portfolio tag.
/// Implement this to swap matching backends without touching the store or its callers.
pub trait SkillMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn strength(&self, skill: &str, tag: &str) -> f32;
}

/// Matcher selection, parsed from the `SKILL_MATCHER` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatcherKind {
    Exact,
    #[default]
    Keyword,
    Fuzzy,
}

#[derive(Debug, Error)]
#[error("unknown skill matcher '{0}'")]
pub struct UnknownMatcher(String);

impl FromStr for MatcherKind {
    type Err = UnknownMatcher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(MatcherKind::Exact),
            "keyword" | "token" => Ok(MatcherKind::Keyword),
            "fuzzy" => Ok(MatcherKind::Fuzzy),
            other => Err(UnknownMatcher(other.to_string())),
        }
    }
}

impl MatcherKind {
    pub fn build(self) -> Arc<dyn SkillMatcher> {
        match self {
            MatcherKind::Exact => Arc::new(ExactMatcher),
            MatcherKind::Keyword => Arc::new(KeywordMatcher),
            MatcherKind::Fuzzy => Arc::new(FuzzyMatcher),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases, trims and collapses inner whitespace.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Punctuation-free form used for vocabulary-tolerant comparison:
/// `"React.js"`, `"ReactJS"` and `"react"` all become `"react"`.
/// `+` and `#` survive so "C++" and "C#" stay distinct.
pub fn canonical(s: &str) -> String {
    let kept: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
        .collect();
    match kept.strip_suffix("js") {
        Some(stem) if stem.chars().count() >= 3 => stem.to_string(),
        _ => kept,
    }
}

/// Canonical word tokens. Dots stay inside a word so "node.js" is one token.
fn tokens(s: &str) -> Vec<String> {
    let mut out: Vec<String> = s
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(canonical)
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive exact equality only.
pub struct ExactMatcher;

impl SkillMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn strength(&self, skill: &str, tag: &str) -> f32 {
        if !skill.is_empty() && skill == tag {
            1.0
        } else {
            0.0
        }
    }
}

/// Default matcher.
///
/// 1. equal, or equal canonical forms → 1.0
/// 2. every word token of one side appears in the other ("react" in "react native") → 0.6
/// 3. otherwise Jaccard overlap of word tokens (0.0 when disjoint)
pub struct KeywordMatcher;

impl SkillMatcher for KeywordMatcher {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn strength(&self, skill: &str, tag: &str) -> f32 {
        if skill.is_empty() || tag.is_empty() {
            return 0.0;
        }
        if skill == tag {
            return 1.0;
        }

        let (a, b) = (canonical(skill), canonical(tag));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }

        // Whole tokens only: "java" must not match inside "javascript".
        let (ta, tb) = (tokens(skill), tokens(tag));
        let shared = ta.iter().filter(|t| tb.contains(t)).count();
        if shared == 0 {
            return 0.0;
        }
        if shared == ta.len().min(tb.len()) {
            return CONTAINMENT_STRENGTH;
        }
        let union = ta.len() + tb.len() - shared;
        shared as f32 / union as f32
    }
}

/// Jaro-Winkler similarity of canonical forms, floored at `FUZZY_THRESHOLD`.
pub struct FuzzyMatcher;

impl SkillMatcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn strength(&self, skill: &str, tag: &str) -> f32 {
        let (a, b) = (canonical(skill), canonical(tag));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let similarity = strsim::jaro_winkler(&a, &b);
        if similarity >= FUZZY_THRESHOLD {
            similarity as f32
        } else {
            0.0
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
