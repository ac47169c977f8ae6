//! bosun: an interactive job-control shell.
//!
//! The loop owns the [`ShellContext`] and services the signal flags once
//! per iteration: first the SIGUSR2 timestamp request, then (if SIGCHLD
//! fired) a reaper drain, so termination notices land next to the prompt.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bosun_core::{dispatch, reaper, shutdown, Flow, ShellContext};

/// A job-control shell: pipelines, background jobs, and the builtins
/// `exit`, `cd`, `estatus`, `bglist`, and `fg`.
#[derive(Parser, Debug)]
#[command(name = "bosun", version, about = "A job-control shell", long_about = None)]
struct Cli {
    /// Maximum number of concurrent background jobs (unlimited if omitted).
    max_jobs: Option<NonZeroUsize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("BOSUN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    bosun_hal::signals::install()?;

    let mut ctx = ShellContext::new(cli.max_jobs);
    let config = Config::builder()
        .history_ignore_space(true)
        .history_ignore_dups(true)?
        .build();
    let mut editor = DefaultEditor::with_config(config)?;
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        service_signal_flags(&mut ctx)?;
        match editor.readline("bosun> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                service_signal_flags(&mut ctx)?;
                match bosun_parser::parse(&line) {
                    Ok(Some(job)) => {
                        tracing::debug!(?job, "parsed job");
                        match dispatch(job, &mut ctx) {
                            Ok(Flow::Continue) => {}
                            Ok(Flow::Exit) => break,
                            Err(err) if err.is_fatal() => {
                                eprintln!("bosun: {err}");
                                std::process::exit(1);
                            }
                            Err(err) => eprintln!("bosun: {err}"),
                        }
                    }
                    Ok(None) => {}
                    Err(err) => eprintln!("bosun: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            // EOF runs the same shutdown broadcast as `exit`, so no
            // background job outlives the shell untracked.
            Err(ReadlineError::Eof) => {
                shutdown(&mut ctx);
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history {
        let _ = editor.save_history(path);
    }
    Ok(())
}

/// Service both signal flags: print the SIGUSR2 timestamp and drain
/// terminated children if SIGCHLD fired since the last pass.
fn service_signal_flags(ctx: &mut ShellContext) -> Result<()> {
    if bosun_hal::signals::take_timestamp_requested() {
        eprintln!("{}", chrono::Local::now().format("%a %b %e %H:%M:%S %Y"));
    }
    if bosun_hal::signals::take_child_terminated() {
        reaper::drain(ctx)?;
    }
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bosun_history"))
}
