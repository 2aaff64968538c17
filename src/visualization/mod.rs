use crate::errors::VisError;
use crate::graph::{all_relations, Relation, RelationMode, StructInfo, WorkingSet};
use serde::Serialize;
use std::fmt::Write as _;

pub mod tabular;

pub use tabular::{escape_csv, escape_tsv, parse_csv_block, CsvGenerator, TsvGenerator};

/// What the class blocks show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UmlOptions {
    /// List fields inside each class.
    pub fields: bool,
    pub comment: bool,
    pub tag: bool,
    /// Show comments and tags in a note next to the class instead of inline.
    pub note: bool,
}

/// Output format for a rendered working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    PlantUml,
    Csv,
    Tsv,
    Json,
}

#[derive(Debug, Default)]
pub struct UmlGenerator;

impl UmlGenerator {
    #[must_use]
    pub fn new() -> Self { Self {} }

    /// Class block for one struct; empty for a struct without fields.
    #[must_use]
    pub fn class_block(&self, info: &StructInfo, opts: UmlOptions) -> String {
        if info.fields.is_empty() {
            return String::new();
        }
        let mut s = String::new();
        let _ = writeln!(s, "class {} {{", info.name);
        if opts.fields {
            for field in &info.fields {
                let _ = write!(s, "{{field}} +{} <{}>", field.name, field.type_text);
                if !opts.note {
                    if opts.tag && !field.tag.is_empty() {
                        let _ = write!(s, " `{}`", field.tag);
                    }
                    if opts.comment && !field.comment.is_empty() {
                        let _ = write!(s, " {}", field.comment);
                    }
                }
                s.push('\n');
            }
        }
        s.push_str("}\n");

        if opts.fields && opts.note && (opts.comment || opts.tag) {
            let _ = writeln!(s, "note right of {}", info.name);
            for field in &info.fields {
                let _ = write!(s, "{}:", field.name);
                if opts.comment {
                    let _ = write!(s, " {}", field.comment);
                }
                if opts.tag {
                    let _ = write!(s, " `{}`", field.tag);
                }
                s.push('\n');
            }
            s.push_str("end note\n");
        }
        s
    }

    /// A single aggregation line, labelled with the multiplicity when above one.
    #[must_use]
    pub fn relation_line(&self, rel: &Relation) -> String {
        if rel.multiplicity > 1 {
            format!("{} \"{}\" --* {}\n", rel.target, rel.multiplicity, rel.source)
        } else {
            format!("{} --* {}\n", rel.target, rel.source)
        }
    }

    /// Full PlantUML document: every class block, then every relation.
    #[must_use]
    pub fn generate(&self, set: &WorkingSet, opts: UmlOptions, mode: RelationMode) -> String {
        let mut s = String::from("@startuml\nleft to right direction\n");
        for info in set.iter() {
            s.push_str(&self.class_block(info, opts));
        }
        // Relations come last so every class they name is already declared
        for rel in all_relations(set, mode) {
            s.push_str(&self.relation_line(&rel));
        }
        s.push_str("@enduml\n");
        s
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    structs: Vec<&'a StructInfo>,
    relations: Vec<Relation>,
}

/// Pretty-printed JSON with the selected structs and their relations.
///
/// # Errors
/// Returns `VisError::Json` if serialization fails.
pub fn generate_json(set: &WorkingSet, mode: RelationMode) -> Result<String, VisError> {
    let doc = JsonDocument { structs: set.iter().collect(), relations: all_relations(set, mode) };
    let mut out = serde_json::to_string_pretty(&doc).map_err(|e| VisError::Json(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Render `set` in `format`.
///
/// # Errors
/// Returns `VisError::Json` if JSON serialization fails; the text formats cannot fail.
pub fn render(
    set: &WorkingSet,
    format: OutputFormat,
    opts: UmlOptions,
    mode: RelationMode,
) -> Result<String, VisError> {
    match format {
        OutputFormat::PlantUml => Ok(UmlGenerator::new().generate(set, opts, mode)),
        OutputFormat::Csv => Ok(CsvGenerator::new().generate(set)),
        OutputFormat::Tsv => Ok(TsvGenerator::new().generate(set)),
        OutputFormat::Json => generate_json(set, mode),
    }
}
