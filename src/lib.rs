//! visgostruct — Go struct relations as PlantUML
//!
//! Extract struct declarations from Go sources and render the has-a
//! relations between them as a PlantUML class diagram, or list them as CSV,
//! TSV or JSON.
//!
//! # Pipeline
//! - `parser`: tree-sitter parse and struct extraction, files parsed in parallel
//! - `graph`: working set (last declaration wins) and relation inference
//! - `query`: include/exclude filters and root reachability
//! - `visualization`: PlantUML, CSV, TSV and JSON renderers
//!
//! # Quickstart (Library)
//! ```no_run
//! use visgostruct::graph::{RelationMode, WorkingSet};
//! use visgostruct::parser::extract_files;
//! use visgostruct::query::select;
//! use visgostruct::visualization::{UmlGenerator, UmlOptions};
//!
//! let report = extract_files(&["models.go"]);
//! let set = WorkingSet::from_structs(report.structs);
//! let selected = select(&set, None, Some("^internal"), Some("User")).expect("root present");
//! let opts = UmlOptions { fields: true, ..UmlOptions::default() };
//! print!("{}", UmlGenerator::new().generate(&selected, opts, RelationMode::Count));
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! visgostruct --fields --tag ./models
//! visgostruct --root User --csv user.go
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod query;
pub mod utils;
pub mod visualization;
