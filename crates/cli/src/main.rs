//! CPU pipeline simulator CLI.
//!
//! This binary drives the pipeline minigame from a terminal. It supports:
//! 1. **Interactive play:** A line-oriented prompt accepting `simulate <action>`,
//!    bare actions (`step`, `toggle`, `reset`, `status`, `explain`, `stop`) and `quit`.
//! 2. **Batch run:** `--run` steps to completion (or the cycle limit) and prints
//!    the final status followed by a statistics report.
//!
//! Logs go to stderr and honour `RUST_LOG`; status text goes to stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pipesim_core::common::ConfigError;
use pipesim_core::common::constants::MAX_KNOWLEDGE;
use pipesim_core::core::pipeline::StepOutcome;
use pipesim_core::sim::Knowledge;
use pipesim_core::sim::host::MSG_NEED_KNOWLEDGE;
use pipesim_core::{MinigameHost, PipelineState, SimConfig, render, stats};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-stepped 5-stage CPU pipeline simulator",
    long_about = "Step a small program through Fetch, Decode, Execute, Memory and Writeback,\nin pipelined or non-pipelined mode, and watch data and structural hazards.\n\nExamples:\n  pipesim\n  pipesim --run\n  pipesim --run --sequential --max-cycles 30\n  pipesim --config program.json"
)]
struct Cli {
    /// JSON configuration file (cycle limit, initial mode, program).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CPU architecture knowledge of the player (0-5).
    #[arg(
        short,
        long,
        default_value_t = MAX_KNOWLEDGE,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_KNOWLEDGE))
    )]
    knowledge: u8,

    /// Start in non-pipelined mode.
    #[arg(long)]
    sequential: bool,

    /// Override the cycle limit.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Step to the end without prompting and print statistics.
    #[arg(long)]
    run: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<SimConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };
    if cli.sequential {
        config.pipelined = false;
    }
    if let Some(max) = cli.max_cycles {
        config.max_cycles = max;
    }
    // Surface program errors before any output.
    let _ = config.build_program()?;
    Ok(config)
}

/// Steps a fresh state until it stops advancing, then prints status and statistics.
fn cmd_run(config: &SimConfig, knowledge: u8, out: &mut impl Write) -> Result<(), CliError> {
    if knowledge < config.knowledge_threshold {
        writeln!(out, "{MSG_NEED_KNOWLEDGE}")?;
        return Ok(());
    }

    let program = config.build_program().map_err(ConfigError::from)?;
    let mut state = PipelineState::with_config(program, config);
    let outcome = loop {
        match state.step() {
            StepOutcome::Advanced => {}
            other => break other,
        }
    };
    debug!(?outcome, cycles = state.cycle(), "batch run finished");

    writeln!(out, "{}", render::status(&state))?;
    writeln!(out)?;
    if state.is_completed() {
        writeln!(out, "{}", render::completion_summary(&state))?;
    } else {
        writeln!(
            out,
            "Cycle limit of {} reached before completion.",
            state.max_cycles()
        )?;
    }
    writeln!(out)?;
    write!(out, "{}", stats::report(&state))?;
    Ok(())
}

/// Interactive prompt over the minigame host.
fn cmd_repl(
    config: SimConfig,
    knowledge: u8,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut host = MinigameHost::new(config).map_err(ConfigError::from)?;
    let player = Knowledge { cpu: knowledge };

    writeln!(out, "{}", host.activate(&player))?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let reply = match words.next().map(str::to_ascii_lowercase).as_deref() {
            None => None,
            Some("quit" | "exit") => break,
            Some("simulate") => match words.next() {
                Some(target) if target.eq_ignore_ascii_case("cpu") => {
                    Some(host.activate(&player))
                }
                action => Some(host.handle(action)),
            },
            Some(action) => Some(host.handle(Some(action))),
        };
        if let Some(reply) = reply {
            writeln!(out, "{reply}")?;
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = if cli.run {
        cmd_run(&config, cli.knowledge, &mut out)
    } else {
        cmd_repl(config, cli.knowledge, io::stdin().lock(), &mut out)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
