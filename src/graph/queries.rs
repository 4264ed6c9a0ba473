// src/graph/queries.rs
//! Name lookups: substring search, exact matches, and id-or-name resolution.

use std::cmp::Ordering;

use log::warn;
use regex::{Regex, RegexBuilder};

use crate::error::{GraphError, Result};
use crate::graph::model::FandomGraph;
use crate::types::{Fandom, FandomId};

/// Options for [`find_by_name`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub case_insensitive: bool,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            limit: None,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }
}

/// Most popular first, ties by ascending id.
fn by_popularity(a: &&Fandom, b: &&Fandom) -> Ordering {
    b.popularity_count
        .cmp(&a.popularity_count)
        .then_with(|| a.id.cmp(&b.id))
}

/// Fandoms whose name contains `query`, most popular first, capped at
/// `options.limit`.
#[must_use]
pub fn find_by_name<'g>(
    graph: &'g FandomGraph,
    query: &str,
    options: &SearchOptions,
) -> Vec<&'g Fandom> {
    let matcher = NameMatcher::new(query, options.case_insensitive);
    let mut hits: Vec<&Fandom> = graph
        .nodes()
        .filter(|f| matcher.matches(&f.name))
        .collect();
    hits.sort_by(by_popularity);
    if let Some(limit) = options.limit {
        hits.truncate(limit);
    }
    hits
}

/// Fandoms named exactly `name`. Names are not unique across ids.
#[must_use]
pub fn find_by_exact_name<'g>(graph: &'g FandomGraph, name: &str) -> Vec<&'g Fandom> {
    let mut hits: Vec<&Fandom> = graph.nodes().filter(|f| f.name == name).collect();
    hits.sort_by(by_popularity);
    hits
}

/// Numeric input is tried as an id first, then exact names, then a
/// case-insensitive substring search. Blank input matches nothing.
///
/// # Errors
/// Returns `NodeNotFound` if nothing matches.
pub fn resolve(graph: &FandomGraph, query: &str) -> Result<FandomId> {
    let query = query.trim();
    if query.is_empty() {
        return Err(GraphError::NodeNotFound(query.to_string()));
    }
    if let Ok(id) = query.parse::<FandomId>() {
        if graph.contains(id) {
            return Ok(id);
        }
    }
    if let Some(hit) = find_by_exact_name(graph, query).first() {
        return Ok(hit.id);
    }
    find_by_name(graph, query, &SearchOptions::default().with_limit(1))
        .first()
        .map(|f| f.id)
        .ok_or_else(|| GraphError::NodeNotFound(query.to_string()))
}

enum NameMatcher {
    Pattern(Regex),
    Folded(String),
    Exact(String),
}

impl NameMatcher {
    fn new(query: &str, case_insensitive: bool) -> Self {
        if !case_insensitive {
            return Self::Exact(query.to_string());
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Self::Pattern(re),
            Err(e) => {
                warn!("Falling back to lowercase matching for {query:?}: {e}");
                Self::Folded(query.to_lowercase())
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(name),
            Self::Folded(q) => name.to_lowercase().contains(q.as_str()),
            Self::Exact(q) => name.contains(q.as_str()),
        }
    }
}
