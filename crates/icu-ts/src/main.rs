//! icu-ts - compile ICU-style translation files into typed TypeScript modules.

use clap::Parser;
use miette::Result;
use std::process::ExitCode;

mod cli;
mod config;
mod orchestrator;
mod output;

use cli::Args;
use orchestrator::Orchestrator;

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries diagnostics in the selected format.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let watch = args.watch;
    let strict = args.strict;

    let mut orchestrator = Orchestrator::new(args)?;

    if watch {
        orchestrator.run_watch_mode()?;
        Ok(ExitCode::SUCCESS)
    } else {
        let result = orchestrator.run_once()?;

        if strict && result.warning_count > 0 {
            Ok(ExitCode::from(1))
        } else {
            Ok(ExitCode::SUCCESS)
        }
    }
}
