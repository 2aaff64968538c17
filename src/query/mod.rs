use regex::Regex;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

use crate::errors::VisError;
use crate::graph::WorkingSet;

/// Query trait implemented by all selection steps.
///
/// Given an immutable reference to a `WorkingSet`, returns a result of type `R`.
pub trait Query<R> {
    fn run(&self, set: &WorkingSet) -> R;
}

/// Compile an optional pattern, treating an empty string as "not set".
///
/// # Errors
/// Returns `VisError::InvalidPattern` when the pattern is not a valid regex.
pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>, VisError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|source| VisError::InvalidPattern { pattern: p.to_string(), source }),
    }
}

/// Keep structs whose name passes `exclude` and then `include`.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl NameFilter {
    /// Build a filter from raw patterns.
    ///
    /// # Errors
    /// Returns `VisError::InvalidPattern` if either pattern fails to compile.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, VisError> {
        Ok(Self { include: compile_pattern(include)?, exclude: compile_pattern(exclude)? })
    }

    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|re| re.is_match(name)) {
            return false;
        }
        self.include.as_ref().map_or(true, |re| re.is_match(name))
    }
}

impl Query<WorkingSet> for NameFilter {
    fn run(&self, set: &WorkingSet) -> WorkingSet {
        let mut out = set.clone();
        out.retain(|info| self.accepts(&info.name));
        out
    }
}

/// The root struct and everything transitively referenced from it.
pub struct ReachableQuery {
    pub root: String,
}

impl ReachableQuery {
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self { root: root.to_string() }
    }
}

impl Query<Result<WorkingSet, VisError>> for ReachableQuery {
    fn run(&self, set: &WorkingSet) -> Result<WorkingSet, VisError> {
        let root = set.get(&self.root).ok_or_else(|| VisError::RootNotFound(self.root.clone()))?;

        // BFS; a struct is taken the first time it is reached
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::from([root]);
        let mut out = WorkingSet::new();
        while let Some(info) = queue.pop_front() {
            if !visited.insert(info.name.as_str()) {
                continue;
            }
            out.insert(info.clone());
            for child in info.references(set) {
                if !visited.contains(child) {
                    if let Some(next) = set.get(child) {
                        queue.push_back(next);
                    }
                }
            }
        }
        debug!(root = %self.root, selected = out.len(), "root selection");
        Ok(out)
    }
}

/// Name filters and optional root selection applied to a merged working set.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub filter: NameFilter,
    pub root: Option<String>,
}

impl Selection {
    /// Apply exclude, include, then root reachability.
    ///
    /// # Errors
    /// Returns `VisError::RootNotFound` if the root is absent after filtering.
    pub fn apply(&self, set: &WorkingSet) -> Result<WorkingSet, VisError> {
        let filtered = self.filter.run(set);
        debug!(before = set.len(), after = filtered.len(), "name filters applied");
        match self.root.as_deref() {
            Some(root) if !root.is_empty() => ReachableQuery::new(root).run(&filtered),
            _ => Ok(filtered),
        }
    }
}

/// Convenience wrapper over [`Selection`] taking raw patterns.
///
/// # Errors
/// Returns `VisError::InvalidPattern` for a bad pattern and `VisError::RootNotFound` for a missing root.
pub fn select(
    set: &WorkingSet,
    include: Option<&str>,
    exclude: Option<&str>,
    root: Option<&str>,
) -> Result<WorkingSet, VisError> {
    let selection =
        Selection { filter: NameFilter::new(include, exclude)?, root: root.map(str::to_string) };
    selection.apply(set)
}
