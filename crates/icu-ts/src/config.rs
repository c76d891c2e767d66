//! Configuration loading and management.

use crate::cli::Args;
use icu_catalog::{DEFAULT_IMPORT_PREFIX, PROVIDER_FILE};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the translation directory.
pub const CONFIG_FILE: &str = "icu-ts.json";

/// Contents of `icu-ts.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub languages: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub import_prefix: Option<String>,
    pub provider: Option<bool>,
    pub provider_file: Option<String>,
}

impl FileConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid configuration in {}", path.display()))
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the translation files.
    pub dir: PathBuf,
    /// Directory the generated modules go to.
    pub out_dir: PathBuf,
    /// Languages to compile, in order.
    pub languages: Vec<String>,
    /// Import prefix used by the provider module.
    pub import_prefix: String,
    /// Provider file name, or `None` when disabled.
    pub provider_file: Option<String>,
    /// Configuration file that was read, if any.
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from CLI arguments and the optional config file.
    pub fn load(args: &Args) -> Result<Self> {
        let dir = args.dir.clone();

        let config_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => Some(dir.join(CONFIG_FILE)).filter(|p| p.is_file()),
        };
        let file = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        // CLI flags win over the file; a relative `outDir` is relative to the translation directory.
        let out_dir = args
            .out_dir
            .clone()
            .or_else(|| file.out_dir.as_ref().map(|p| dir.join(p)))
            .unwrap_or_else(|| dir.clone());

        let languages = if !args.langs.is_empty() {
            args.langs.clone()
        } else if !file.languages.is_empty() {
            file.languages.clone()
        } else {
            discover_languages(&dir, config_path.as_deref())?
        };

        let import_prefix = args
            .import_prefix
            .clone()
            .or(file.import_prefix)
            .unwrap_or_else(|| DEFAULT_IMPORT_PREFIX.to_string());

        let provider_file = if args.no_provider || file.provider == Some(false) {
            None
        } else {
            Some(file.provider_file.unwrap_or_else(|| PROVIDER_FILE.to_string()))
        };

        Ok(Self {
            dir,
            out_dir,
            languages,
            import_prefix,
            provider_file,
            config_path,
        })
    }

    /// Translation file of `language`.
    pub fn input_path(&self, language: &str) -> PathBuf {
        self.dir.join(format!("{}.json", language.to_lowercase()))
    }

    /// Generated module of `language`.
    pub fn output_path(&self, language: &str) -> PathBuf {
        self.out_dir.join(format!("{}.ts", language.to_lowercase()))
    }

    /// Generated provider module, if enabled.
    pub fn provider_path(&self) -> Option<PathBuf> {
        self.provider_file.as_ref().map(|name| self.out_dir.join(name))
    }

    /// Check if a changed path should trigger a recompile.
    pub fn is_watched(&self, path: &Path) -> bool {
        path.extension().map(|e| e == "json").unwrap_or(false)
    }
}

/// Every `*.json` file directly inside `dir`, except the configuration file, sorted by name.
fn discover_languages(dir: &Path, config_path: Option<&Path>) -> Result<Vec<String>> {
    let mut languages = Vec::new();

    for entry in walkdir::WalkDir::new(dir).max_depth(1).follow_links(true) {
        let entry = entry
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }
        if path.file_name().map(|n| n == CONFIG_FILE).unwrap_or(false)
            || config_path.map(|c| c == path).unwrap_or(false)
        {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            languages.push(stem.to_string_lossy().to_string());
        }
    }

    languages.sort();
    Ok(languages)
}
