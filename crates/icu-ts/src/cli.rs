//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Compile ICU-style translation files into typed TypeScript modules
#[derive(Parser, Debug, Clone)]
#[command(name = "icu-ts")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the `<lang>.json` translation files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Language to compile (repeatable; defaults to every JSON file in the directory)
    #[arg(short = 'l', long = "lang")]
    pub langs: Vec<String>,

    /// Directory the generated modules are written to (defaults to the translation directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Path to the configuration file (defaults to `<dir>/icu-ts.json`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Import prefix the provider module resolves language modules under
    #[arg(long)]
    pub import_prefix: Option<String>,

    /// Do not generate the React provider module
    #[arg(long)]
    pub no_provider: bool,

    /// Compile and report without writing any file
    #[arg(long)]
    pub check: bool,

    /// Fail on pattern warnings
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Run in watch mode
    #[arg(short, long)]
    pub watch: bool,

    /// Preserve watch output (don't clear screen)
    #[arg(long)]
    pub preserve_watch_output: bool,

    /// Show timing information
    #[arg(long)]
    pub timings: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// One JSON object per line
    Json,
    /// Colon-separated output
    Machine,
}

impl Args {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["icu-ts"]).unwrap();
        assert_eq!(args.dir, PathBuf::from("."));
        assert!(args.langs.is_empty());
        assert_eq!(args.output, OutputFormat::Human);
        assert!(!args.check && !args.strict && !args.no_provider);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_parse_repeated_languages() {
        let args = Args::try_parse_from([
            "icu-ts", "-d", "locales", "-l", "en", "--lang", "de", "-o", "out", "--output", "json", "-v",
        ])
        .unwrap();
        assert_eq!(args.dir, PathBuf::from("locales"));
        assert_eq!(args.langs, vec!["en".to_string(), "de".to_string()]);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.log_filter(), "debug");
    }
}
