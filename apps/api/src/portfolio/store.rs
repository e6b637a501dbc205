//! Portfolio Store: the (tech stack → project link) table used to personalize emails.
//!
//! Rows are loaded once at startup and then only read. Queries rank rows by the
//! configured `SkillMatcher` and return at most `MAX_LINKS` distinct links.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::portfolio::matching::{normalize, SkillMatcher};

/// Maximum number of links returned per query.
pub const MAX_LINKS: usize = 2;

/// One portfolio entry: the technologies a project shows off and where to find it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub techstack: Vec<String>,
    pub link: String,
}

impl PortfolioRow {
    /// Builds a row from a comma-separated tech stack, e.g. `"React, Node.js, MongoDB"`.
    pub fn parse(techstack: &str, link: &str) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in techstack.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.to_string());
            }
        }
        Self {
            techstack: tags,
            link: link.trim().to_string(),
        }
    }
}

/// A link with the relevance score that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkMatch {
    pub link: String,
    pub score: f32,
}

/// CSV layout of the backing table: `Techstack,Links`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Techstack", alias = "techstack")]
    techstack: String,
    #[serde(rename = "Links", alias = "links", alias = "Link", alias = "link")]
    link: String,
}

#[derive(Debug, Clone)]
enum PortfolioSource {
    Csv(PathBuf),
    Rows(Vec<PortfolioRow>),
}

#[derive(Debug, Clone)]
struct IndexedRow {
    row: PortfolioRow,
    normalized_tags: Vec<String>,
}

pub struct PortfolioStore {
    source: PortfolioSource,
    matcher: Arc<dyn SkillMatcher>,
    index: Vec<IndexedRow>,
}

impl PortfolioStore {
    /// Store backed by a CSV file. Empty until `load()` is called.
    pub fn from_csv(path: impl Into<PathBuf>, matcher: Arc<dyn SkillMatcher>) -> Self {
        Self {
            source: PortfolioSource::Csv(path.into()),
            matcher,
            index: Vec::new(),
        }
    }

    /// Store backed by in-memory rows. Empty until `load()` is called.
    pub fn from_rows(rows: Vec<PortfolioRow>, matcher: Arc<dyn SkillMatcher>) -> Self {
        Self {
            source: PortfolioSource::Rows(rows),
            matcher,
            index: Vec::new(),
        }
    }

    /// Reads the backing table and rebuilds the index from scratch.
    /// Calling it again replaces the index; rows are never duplicated.
    pub fn load(&mut self) -> Result<usize, AppError> {
        let rows = match &self.source {
            PortfolioSource::Csv(path) => read_csv(path)?,
            PortfolioSource::Rows(rows) => rows.clone(),
        };

        self.index = rows
            .into_iter()
            .filter(|row| {
                if row.link.is_empty() {
                    warn!("Skipping portfolio row without a link: {:?}", row.techstack);
                    return false;
                }
                true
            })
            .map(|row| IndexedRow {
                normalized_tags: row.techstack.iter().map(|t| normalize(t)).collect(),
                row,
            })
            .collect();

        info!(
            "Portfolio loaded: {} rows (matcher: {})",
            self.index.len(),
            self.matcher.name()
        );
        Ok(self.index.len())
    }

    pub fn rows(&self) -> Vec<&PortfolioRow> {
        self.index.iter().map(|r| &r.row).collect()
    }

    pub fn matcher_name(&self) -> &'static str {
        self.matcher.name()
    }

    /// Up to `MAX_LINKS` links for `skills`, most relevant first.
    /// Empty skills, an unloaded store or no overlap all give an empty result.
    pub fn query_links(&self, skills: &[String]) -> Vec<String> {
        self.rank(skills).into_iter().map(|m| m.link).collect()
    }

    /// Like `query_links`, but keeps the scores.
    ///
    /// Row score = Σ over distinct skills of the best tag strength in that row.
    /// Ties keep table order; a link appears once, at its best rank.
    pub fn rank(&self, skills: &[String]) -> Vec<LinkMatch> {
        let mut query: Vec<String> = Vec::new();
        for skill in skills.iter().map(|s| normalize(s)).filter(|s| !s.is_empty()) {
            if !query.contains(&skill) {
                query.push(skill);
            }
        }
        if query.is_empty() || self.index.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&IndexedRow, f32)> = self
            .index
            .iter()
            .map(|row| (row, self.score_row(&query, row)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // stable: equal scores keep table order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut matches: Vec<LinkMatch> = Vec::new();
        for (row, score) in scored {
            if matches.iter().any(|m| m.link == row.row.link) {
                continue;
            }
            matches.push(LinkMatch {
                link: row.row.link.clone(),
                score,
            });
            if matches.len() == MAX_LINKS {
                break;
            }
        }
        matches
    }

    fn score_row(&self, query: &[String], row: &IndexedRow) -> f32 {
        query
            .iter()
            .map(|skill| {
                row.normalized_tags
                    .iter()
                    .map(|tag| self.matcher.strength(skill, tag))
                    .fold(0.0_f32, f32::max)
            })
            .sum()
    }
}

fn read_csv(path: &Path) -> Result<Vec<PortfolioRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Portfolio(format!("Cannot open {}: {e}", path.display())))?;

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, record)| {
            record
                .map(|r| PortfolioRow::parse(&r.techstack, &r.link))
                .map_err(|e| {
                    AppError::Portfolio(format!("{} row {}: {e}", path.display(), i + 1))
                })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::portfolio::matching::MatcherKind;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn loaded(rows: Vec<PortfolioRow>, kind: MatcherKind) -> PortfolioStore {
        let mut store = PortfolioStore::from_rows(rows, kind.build());
        store.load().unwrap();
        store
    }

    fn sample_rows() -> Vec<PortfolioRow> {
        vec![
            PortfolioRow::parse("React", "A"),
            PortfolioRow::parse("Django", "B"),
        ]
    }

    #[test]
    fn test_best_overlap_ranks_first() {
        let store = loaded(sample_rows(), MatcherKind::Keyword);
        let links = store.query_links(&skills(&["React", "Node"]));
        assert_eq!(links.first().map(String::as_str), Some("A"));
        assert!(!links.contains(&"B".to_string()), "zero-overlap row must be excluded");
    }

    #[test]
    fn test_empty_skills_returns_empty() {
        let store = loaded(sample_rows(), MatcherKind::Keyword);
        assert!(store.query_links(&[]).is_empty());
        assert!(store.query_links(&skills(&["", "   "])).is_empty());
    }

    #[test]
    fn test_unloaded_store_returns_empty() {
        let store = PortfolioStore::from_rows(sample_rows(), MatcherKind::Keyword.build());
        assert!(store.query_links(&skills(&["React"])).is_empty());
    }

    #[test]
    fn test_missing_csv_unloaded_still_queries_empty() {
        let store = PortfolioStore::from_csv("/nonexistent/portfolio.csv", MatcherKind::Exact.build());
        assert!(store.query_links(&skills(&["Rust"])).is_empty());
    }

    #[test]
    fn test_results_bounded_unique_and_ordered() {
        let rows = vec![
            PortfolioRow::parse("Python", "https://x/ml"),
            PortfolioRow::parse("React, Node.js, MongoDB", "https://x/mern"),
            PortfolioRow::parse("React, Node.js", "https://x/mern"),
            PortfolioRow::parse("React Native, Node.js", "https://x/mobile"),
            PortfolioRow::parse("React", "https://x/react"),
        ];
        let store = loaded(rows.clone(), MatcherKind::Keyword);
        let ranked = store.rank(&skills(&["React", "Node.js", "MongoDB"]));

        assert!(ranked.len() <= MAX_LINKS);
        assert_eq!(ranked[0].link, "https://x/mern");
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            assert_ne!(pair[0].link, pair[1].link);
        }
        for m in &ranked {
            assert!(rows.iter().any(|r| r.link == m.link));
        }
    }

    #[test]
    fn test_ties_keep_table_order() {
        let rows = vec![
            PortfolioRow::parse("Rust", "first"),
            PortfolioRow::parse("Rust", "second"),
            PortfolioRow::parse("Rust", "third"),
        ];
        let store = loaded(rows, MatcherKind::Exact);
        assert_eq!(store.query_links(&skills(&["rust"])), vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_skills_do_not_inflate_scores() {
        let rows = vec![
            PortfolioRow::parse("Java", "java"),
            PortfolioRow::parse("Go, Docker", "go"),
        ];
        let store = loaded(rows, MatcherKind::Exact);
        let ranked = store.rank(&skills(&["Java", "java", "JAVA", "Go", "Docker"]));
        assert_eq!(ranked[0].link, "go");
        assert!((ranked[1].score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reload_does_not_duplicate_rows() {
        let mut store = PortfolioStore::from_rows(sample_rows(), MatcherKind::Keyword.build());
        assert_eq!(store.load().unwrap(), 2);
        assert_eq!(store.load().unwrap(), 2);
        assert_eq!(store.rows().len(), 2);
    }

    #[test]
    fn test_vocabulary_mismatch_is_tolerated() {
        let store = loaded(vec![PortfolioRow::parse("React", "A")], MatcherKind::Keyword);
        assert_eq!(store.query_links(&skills(&["ReactJS"])), vec!["A"]);

        let exact = loaded(vec![PortfolioRow::parse("React", "A")], MatcherKind::Exact);
        assert!(exact.query_links(&skills(&["ReactJS"])).is_empty());
    }

    #[test]
    fn test_row_parse_trims_and_dedups_tags() {
        let row = PortfolioRow::parse(" React , react,  ,Node.js ", " https://x ");
        assert_eq!(row.techstack, vec!["React", "Node.js"]);
        assert_eq!(row.link, "https://x");
    }

    #[test]
    fn test_load_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Techstack,Links").unwrap();
        writeln!(file, "\"React, Node.js, MongoDB\",https://example.com/react-portfolio").unwrap();
        writeln!(file, "\"Python, Django, MySQL\",https://example.com/python-portfolio").unwrap();
        writeln!(file, "Rust,").unwrap();

        let mut store = PortfolioStore::from_csv(file.path(), MatcherKind::Keyword.build());
        assert_eq!(store.load().unwrap(), 2);
        assert_eq!(
            store.query_links(&skills(&["Django"])),
            vec!["https://example.com/python-portfolio"]
        );
    }

    #[test]
    fn test_shipped_portfolio_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/resource/portfolio.csv");
        let mut store = PortfolioStore::from_csv(path, MatcherKind::Keyword.build());
        assert_eq!(store.load().unwrap(), 20);
        assert_eq!(
            store.query_links(&skills(&["React", "Node.js", "MongoDB"]))[0],
            "https://example.com/react-portfolio"
        );
    }

    #[test]
    fn test_shipped_portfolio_keeps_java_and_javascript_apart() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/resource/portfolio.csv");
        let mut store = PortfolioStore::from_csv(path, MatcherKind::Keyword.build());
        store.load().unwrap();
        assert_eq!(
            store.query_links(&skills(&["JavaScript"])),
            vec!["https://example.com/full-stack-js-portfolio"]
        );
    }

    #[test]
    fn test_missing_csv_fails_load() {
        let mut store = PortfolioStore::from_csv("/nonexistent/portfolio.csv", MatcherKind::Keyword.build());
        assert!(matches!(store.load(), Err(AppError::Portfolio(_))));
    }
}
