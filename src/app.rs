use crate::cli::Cli;
use crate::errors::VisError;
use crate::graph::{RelationMode, WorkingSet};
use crate::parser::extract_files;
use crate::query::{NameFilter, Selection};
use crate::utils::config::{self, Config};
use crate::utils::{file_walker, logging};
use crate::visualization::{render, OutputFormat, UmlOptions};
use clap::CommandFactory;
use clap_complete::generate;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Everything a run needs, after merging command-line flags over the config file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub paths: Vec<PathBuf>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub root: Option<String>,
    pub uml: UmlOptions,
    pub format: OutputFormat,
    pub relations: RelationMode,
    pub strict: bool,
    pub include_tests: bool,
}

impl Settings {
    /// Combine `cli` with an optional `config`. Flags win; boolean flags are OR-ed with the config.
    ///
    /// # Errors
    /// Returns `VisError::Config` for an unknown `format` or `relations` value in the config.
    pub fn resolve(cli: &Cli, config: Option<Config>) -> Result<Self, VisError> {
        let config = config.unwrap_or_default();
        let filter = config.filter.unwrap_or_default();
        let render = config.render.unwrap_or_default();
        let input = config.input.unwrap_or_default();

        let format = if cli.csv {
            OutputFormat::Csv
        } else if cli.tsv {
            OutputFormat::Tsv
        } else if cli.json {
            OutputFormat::Json
        } else {
            match render.format.as_deref() {
                None | Some("plantuml" | "uml") => OutputFormat::PlantUml,
                Some("csv") => OutputFormat::Csv,
                Some("tsv") => OutputFormat::Tsv,
                Some("json") => OutputFormat::Json,
                Some(other) => return Err(VisError::Config(format!("unknown format {other:?}"))),
            }
        };

        let relations = match cli.relations {
            Some(arg) => arg.into(),
            None => match render.relations.as_deref() {
                None | Some("count") => RelationMode::Count,
                Some("per-field") => RelationMode::PerField,
                Some(other) => {
                    return Err(VisError::Config(format!("unknown relations mode {other:?}")))
                }
            },
        };

        Ok(Self {
            paths: cli.paths.clone(),
            include: cli.include.clone().or(filter.include),
            exclude: cli.exclude.clone().or(filter.exclude),
            root: cli.root.clone().or(filter.root),
            uml: UmlOptions {
                fields: cli.fields || render.fields.unwrap_or(false),
                comment: cli.comment || render.comment.unwrap_or(false),
                tag: cli.tag || render.tag.unwrap_or(false),
                note: cli.note || render.note.unwrap_or(false),
            },
            format,
            relations,
            strict: cli.strict || input.strict.unwrap_or(false),
            include_tests: cli.include_tests || input.include_tests.unwrap_or(false),
        })
    }
}

/// Extract, select and render according to `settings`.
///
/// # Errors
/// Returns `VisError::InvalidPattern` for a bad include/exclude pattern, `VisError::Parse` for the
/// first failing file in strict mode, and `VisError::RootNotFound` when the root is not selected.
pub fn run(settings: &Settings) -> Result<String, VisError> {
    // Patterns are compiled before any file is touched
    let selection = Selection {
        filter: NameFilter::new(settings.include.as_deref(), settings.exclude.as_deref())?,
        root: settings.root.clone(),
    };

    let files = file_walker::expand_inputs(&settings.paths, settings.include_tests);
    let report = extract_files(&files);
    info!(
        files = report.files,
        structs = report.structs.len(),
        failures = report.failures.len(),
        "extraction finished"
    );
    if settings.strict && !report.is_clean() {
        if let Some((file, source)) = report.failures.into_iter().next() {
            return Err(VisError::Parse { file, source });
        }
    }

    let merged = WorkingSet::from_structs(report.structs);
    let selected = selection.apply(&merged)?;
    info!(selected = selected.len(), "rendering");
    render(&selected, settings.format, settings.uml, settings.relations)
}

fn load_config(cli: &Cli) -> Result<Option<Config>, VisError> {
    match cli.config.as_ref() {
        Some(path) => config::load_config_at(path).map(Some),
        None => {
            let cwd = std::env::current_dir()?;
            config::load_config_near(&cwd)
        }
    }
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = runtime failure, 2 = configuration failure).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = env!("CARGO_PKG_NAME");
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return 0;
    }

    logging::init(cli.verbose, cli.quiet);

    let output = load_config(&cli)
        .and_then(|config| Settings::resolve(&cli, config))
        .and_then(|settings| run(&settings));
    let output = match output {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return e.exit_code();
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        eprintln!("Failed to write output: {e}");
        return 1;
    }
    0
}
