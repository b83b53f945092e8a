use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Result counts the dashboard offers for `search.max_results`.
pub const ALLOWED_MAX_RESULTS: [usize; 4] = [5, 10, 20, 50];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    /// JSON file holding an array of documents.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Seed the corpus with the built-in demonstration documents.
    #[serde(default = "default_include_demo")]
    pub include_demo: bool,
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_demo: true,
            directory: None,
        }
    }
}

fn default_include_demo() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_max_results() -> usize {
    10
}
fn default_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `synapsex=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Configuration used when no config file exists: demo corpus, defaults
    /// everywhere else.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Load the config at `path`, or `None` when the file does not exist.
///
/// Callers fall back to [`Config::minimal`] and report the fallback once
/// logging is set up.
pub fn try_load_config(path: &Path) -> Result<Option<Config>> {
    if path.exists() {
        load_config(path).map(Some)
    } else {
        Ok(None)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;

    // Relative corpus paths resolve against the config file's directory.
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(resolve_paths(config, base))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate search
    if !ALLOWED_MAX_RESULTS.contains(&config.search.max_results) {
        anyhow::bail!(
            "search.max_results must be one of 5, 10, 20, 50 (got {})",
            config.search.max_results
        );
    }

    if config.search.timeout_ms == 0 {
        anyhow::bail!("search.timeout_ms must be > 0");
    }

    // Validate corpus
    let corpus = &config.corpus;
    if !corpus.include_demo && corpus.path.is_none() && corpus.directory.is_none() {
        anyhow::bail!(
            "corpus has no source: set corpus.path, [corpus.directory], or include_demo = true"
        );
    }

    if let Some(dir) = &corpus.directory {
        if dir.include_globs.is_empty() {
            anyhow::bail!("corpus.directory.include_globs must not be empty");
        }
    }

    Ok(())
}

fn resolve_paths(mut config: Config, base: &Path) -> Config {
    if let Some(path) = config.corpus.path.take() {
        config.corpus.path = Some(resolve(base, path));
    }
    if let Some(dir) = config.corpus.directory.as_mut() {
        dir.root = resolve(base, std::mem::take(&mut dir.root));
    }
    config
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
