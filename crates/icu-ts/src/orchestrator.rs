//! Orchestrator for compiling translation files.

use crate::cli::Args;
use crate::config::Config;
use crate::output::OutputFormatter;
use icu_catalog::{emit_provider, Catalog};
use icu_pattern::Severity;
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Result of a compile run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Number of languages compiled.
    pub language_count: usize,
    /// Number of keys across all languages.
    pub key_count: usize,
    /// Number of warnings, including key-set mismatches.
    pub warning_count: usize,
    /// Number of hints.
    pub hint_count: usize,
    /// Number of files written.
    pub written_count: usize,
    /// Time taken.
    pub duration_ms: u64,
}

/// Orchestrator for running icu-ts.
pub struct Orchestrator {
    /// Configuration.
    config: Config,
    /// CLI arguments.
    args: Args,
    /// Output formatter.
    formatter: OutputFormatter,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::load(&args)?;
        let formatter = OutputFormatter::new(args.output);

        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "loaded configuration");
        }

        Ok(Self {
            config,
            args,
            formatter,
        })
    }

    /// Compile every language once.
    pub fn run_once(&self) -> Result<RunResult> {
        let start = Instant::now();

        if self.config.languages.is_empty() {
            tracing::warn!(dir = %self.config.dir.display(), "no translation files found");
        }

        let catalogs = self.compile_languages()?;

        let (mut warning_count, hint_count) = self.report_diagnostics(&catalogs);
        warning_count += self.report_key_mismatches(&catalogs);

        let written_count = if self.args.check {
            0
        } else {
            self.write_outputs(&catalogs)?
        };

        let result = RunResult {
            language_count: catalogs.len(),
            key_count: catalogs.iter().map(Catalog::len).sum(),
            warning_count,
            hint_count,
            written_count,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if self.args.timings {
            eprintln!("\nTiming: {}ms", result.duration_ms);
        }

        self.formatter.print_summary(&result);

        Ok(result)
    }

    /// Run in watch mode.
    pub fn run_watch_mode(&mut self) -> Result<()> {
        use notify::{Config as NotifyConfig, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::channel;
        use std::time::Duration;

        eprintln!("Starting watch mode...\n");

        if let Err(e) = self.run_once() {
            eprintln!("{:?}", e);
        }

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
        )
        .into_diagnostic()?;

        watcher
            .watch(&self.config.dir, RecursiveMode::NonRecursive)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to watch {}", self.config.dir.display()))?;

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    // Reads of our own inputs show up as access events.
                    let is_change = matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    );
                    if !is_change || !event.paths.iter().any(|p| self.config.is_watched(p)) {
                        continue;
                    }

                    if !self.args.preserve_watch_output {
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    eprintln!("Translation change detected. Recompiling...\n");

                    // Languages may have been added or removed.
                    match Config::load(&self.args) {
                        Ok(config) => self.config = config,
                        Err(e) => {
                            eprintln!("{:?}", e);
                            continue;
                        }
                    }
                    if let Err(e) = self.run_once() {
                        eprintln!("{:?}", e);
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    /// Load and compile all languages in parallel, keeping configuration order.
    fn compile_languages(&self) -> Result<Vec<Catalog>> {
        self.config
            .languages
            .par_iter()
            .map(|language| -> Result<Catalog> {
                let path = self.config.input_path(language);
                let catalog = Catalog::load(language.clone(), &path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to compile `{}` translations", language))?;

                tracing::info!(language = %language, keys = catalog.len(), "compiled translations");
                Ok(catalog)
            })
            .collect()
    }

    /// Print pattern diagnostics and return warning and hint counts.
    fn report_diagnostics(&self, catalogs: &[Catalog]) -> (usize, usize) {
        let mut warning_count = 0;
        let mut hint_count = 0;

        for catalog in catalogs {
            let file = self.config.input_path(&catalog.language);
            for (entry, diag) in catalog.diagnostics() {
                self.formatter.print_pattern_diagnostic(&file, entry, diag);
                match diag.severity {
                    Severity::Warning => warning_count += 1,
                    Severity::Hint => hint_count += 1,
                }
            }
        }

        (warning_count, hint_count)
    }

    /// Compare every language's keys with the first language and return the number of mismatches.
    fn report_key_mismatches(&self, catalogs: &[Catalog]) -> usize {
        let Some((reference, rest)) = catalogs.split_first() else {
            return 0;
        };

        let mut count = 0;
        for catalog in rest {
            let diff = catalog.key_diff(reference);
            if diff.is_empty() {
                continue;
            }

            tracing::warn!(
                language = %catalog.language,
                reference = %reference.language,
                missing = diff.missing.len(),
                extra = diff.extra.len(),
                "translation keys differ"
            );
            self.formatter.print_key_mismatch(
                &self.config.input_path(&catalog.language),
                &reference.language,
                &diff.missing,
                &diff.extra,
            );
            count += diff.missing.len() + diff.extra.len();
        }

        count
    }

    /// Write every language module and the provider module. Returns the number of files written.
    fn write_outputs(&self, catalogs: &[Catalog]) -> Result<usize> {
        std::fs::create_dir_all(&self.config.out_dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to create {}", self.config.out_dir.display()))?;

        let mut written = 0;
        for catalog in catalogs {
            let path = self.config.output_path(&catalog.language);
            write_file(&path, &catalog.emit_module())?;
            written += 1;
        }

        if let Some(path) = self.config.provider_path() {
            let languages: Vec<String> = catalogs.iter().map(|c| c.language.clone()).collect();
            write_file(&path, &emit_provider(&languages, &self.config.import_prefix))?;
            written += 1;
        }

        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
