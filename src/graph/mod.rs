//! Struct model and working set.
//!
//! This module defines the data extracted from Go sources (`StructInfo`,
//! `FieldInfo`) and the `WorkingSet` that merges extraction results across
//! files. Relation inference over a finished working set lives in
//! [`relations`].
//!
//! You typically build a working set with `WorkingSet::from_structs` from an
//! `ExtractionReport`, narrow it with `crate::query::select`, and hand it to
//! a renderer in `crate::visualization`.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod relations;

pub use relations::{all_relations, relations_for, Relation, RelationMode};

/// Characters stripped from the front of a field type to find the struct it refers to.
const REFERENCE_DECORATIONS: &[char] = &['*', '[', ']'];

/// One declared field of a struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub comment: String,
}

impl FieldInfo {
    /// Build a field; an empty `name` (embedded field) falls back to the type text.
    #[must_use]
    pub fn new(name: &str, type_text: &str) -> Self {
        let name = if name.is_empty() { type_text } else { name };
        Self {
            name: name.to_string(),
            type_text: type_text.to_string(),
            tag: String::new(),
            comment: String::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// The type text with leading pointer/slice/array decoration removed.
    ///
    /// `*Foo`, `[]Foo` and `[]*Foo` all refer to `Foo`. Map, channel and
    /// qualified types are returned unchanged and so never match a local struct.
    #[must_use]
    pub fn referenced_type_name(&self) -> &str {
        self.type_text.trim_start_matches(REFERENCE_DECORATIONS)
    }
}

/// One declared struct type with its fields in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StructInfo {
    pub name: String,
    pub fields: Vec<FieldInfo>,
}

impl StructInfo {
    #[must_use]
    pub fn new(name: &str, fields: Vec<FieldInfo>) -> Self {
        Self { name: name.to_string(), fields }
    }

    /// Names of structs in `set` that this struct's fields refer to, in field order.
    pub fn references<'a>(&'a self, set: &'a WorkingSet) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .map(FieldInfo::referenced_type_name)
            .filter(move |name| set.contains(name))
    }
}

/// Name-keyed collection of structs under consideration.
///
/// Iteration is ordered by struct name so every rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    structs: BTreeMap<String, StructInfo>,
}

impl WorkingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge structs in order; a later struct replaces an earlier one with the same name.
    #[must_use]
    pub fn from_structs<I: IntoIterator<Item = StructInfo>>(structs: I) -> Self {
        let mut set = Self::new();
        set.extend(structs);
        set
    }

    /// Insert a struct, returning the one it replaced, if any.
    pub fn insert(&mut self, info: StructInfo) -> Option<StructInfo> {
        self.structs.insert(info.name.clone(), info)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StructInfo> {
        self.structs.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructInfo> {
        self.structs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structs.keys().map(String::as_str)
    }

    /// Keep only the structs for which `keep` returns true.
    pub fn retain<F: FnMut(&StructInfo) -> bool>(&mut self, mut keep: F) {
        self.structs.retain(|_, info| keep(info));
    }
}

impl Extend<StructInfo> for WorkingSet {
    fn extend<I: IntoIterator<Item = StructInfo>>(&mut self, iter: I) {
        for info in iter {
            if let Some(prev) = self.insert(info) {
                tracing::debug!(name = %prev.name, "struct redeclared; keeping the later declaration");
            }
        }
    }
}

impl FromIterator<StructInfo> for WorkingSet {
    fn from_iter<I: IntoIterator<Item = StructInfo>>(iter: I) -> Self {
        Self::from_structs(iter)
    }
}
