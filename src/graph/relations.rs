//! Has-a relation inference.
//!
//! A relation is inferred when a field's referenced type name names another
//! struct in the working set. Relations are computed from the final, filtered
//! set only, so a struct dropped by a filter never produces an edge.
use super::{StructInfo, WorkingSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How fields referencing the same struct are turned into relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationMode {
    /// One relation per distinct target, multiplicity = number of referencing fields.
    #[default]
    Count,
    /// One relation per referencing field.
    PerField,
}

/// Aggregation edge: `target` is part of `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub target: String,
    pub source: String,
    pub multiplicity: usize,
}

/// Relations originating from `info` against the structs in `set`.
#[must_use]
pub fn relations_for(info: &StructInfo, set: &WorkingSet, mode: RelationMode) -> Vec<Relation> {
    match mode {
        RelationMode::Count => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for target in info.references(set) {
                *counts.entry(target).or_insert(0) += 1;
            }
            counts
                .into_iter()
                .map(|(target, multiplicity)| Relation {
                    target: target.to_string(),
                    source: info.name.clone(),
                    multiplicity,
                })
                .collect()
        }
        RelationMode::PerField => info
            .references(set)
            .map(|target| Relation {
                target: target.to_string(),
                source: info.name.clone(),
                multiplicity: 1,
            })
            .collect(),
    }
}

/// Relations for every struct in `set`, in working-set order.
#[must_use]
pub fn all_relations(set: &WorkingSet, mode: RelationMode) -> Vec<Relation> {
    set.iter().flat_map(|info| relations_for(info, set, mode)).collect()
}
