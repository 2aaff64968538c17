pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::VisError;

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct FilterConfig {
        pub include: Option<String>,
        pub exclude: Option<String>,
        pub root: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct RenderConfig {
        pub fields: Option<bool>,
        pub comment: Option<bool>,
        pub tag: Option<bool>,
        pub note: Option<bool>,
        pub format: Option<String>,    // "plantuml" | "csv" | "tsv" | "json"
        pub relations: Option<String>, // "count" | "per-field"
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct InputConfig {
        pub strict: Option<bool>,
        pub include_tests: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    pub struct Config {
        pub filter: Option<FilterConfig>,
        pub render: Option<RenderConfig>,
        pub input: Option<InputConfig>,
    }

    pub const DEFAULT_CONFIG_NAME: &str = "visgostruct.toml";

    fn default_config_path(dir: &Path) -> PathBuf {
        dir.join(DEFAULT_CONFIG_NAME)
    }

    /// Load a config file.
    ///
    /// # Errors
    /// Returns `VisError::Config` when the file cannot be read or is not valid TOML for `Config`.
    pub fn load_config_at(path: &Path) -> Result<Config, VisError> {
        let data = fs::read_to_string(path)
            .map_err(|e| VisError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str::<Config>(&data)
            .map_err(|e| VisError::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Load `visgostruct.toml` from `dir` if it exists.
    ///
    /// # Errors
    /// Returns `VisError::Config` when the file exists but is unreadable or invalid.
    pub fn load_config_near(dir: &Path) -> Result<Option<Config>, VisError> {
        let path = default_config_path(dir);
        if path.exists() {
            load_config_at(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

pub mod file_walker {
    use std::path::{Path, PathBuf};

    fn is_go_source(path: &Path, include_tests: bool) -> bool {
        if path.extension() != Some(std::ffi::OsStr::new("go")) {
            return false;
        }
        include_tests
            || !path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with("_test.go"))
    }

    /// Discover Go source files under `root`, honoring `.gitignore`/`.ignore`, sorted by path.
    #[must_use]
    pub fn go_files(root: &Path, include_tests: bool) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let mut walker = ignore::WalkBuilder::new(root);
        // Global git excludes stay off so results do not depend on the user's machine
        walker
            .follow_links(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .ignore(true)
            .parents(true);
        for entry in walker.build().flatten() {
            if entry.file_type().is_some_and(|t| t.is_file())
                && is_go_source(entry.path(), include_tests)
            {
                out.push(entry.into_path());
            }
        }
        out.sort();
        out
    }

    /// Expand command-line paths: directories become their Go files, anything else is kept as given.
    #[must_use]
    pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P], include_tests: bool) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                let found = go_files(input, include_tests);
                tracing::debug!(dir = %input.display(), files = found.len(), "discovered Go files");
                out.extend(found);
            } else {
                out.push(input.to_path_buf());
            }
        }
        out
    }
}

pub mod logging {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    /// Environment variable consulted before `RUST_LOG`.
    pub const LOG_ENV: &str = "VISGOSTRUCT_LOG";

    /// Default filter directive for a verbosity count, or `error` when quiet.
    #[must_use]
    pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
        if quiet {
            return "error";
        }
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Install the stderr subscriber. Calling it again is a no-op.
    pub fn init(verbose: u8, quiet: bool) {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));
        let _ = fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init();
    }
}
