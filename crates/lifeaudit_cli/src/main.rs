//! `lifeaudit` command-line front end.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and logging, and dispatch to
//!   `lifeaudit_core::AuditService`.
//! - Report every failure as a message; no failure aborts the process abnormally.

mod commands;
mod shell;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_entry_command, CliError, EntryCommand};
use lifeaudit_core::{
    default_log_level, init_logging, resolve_log_dir, AuditConfig, AuditProfile, AuditService,
    JsonEntryRepository,
};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "lifeaudit",
    version = lifeaudit_core::core_version(),
    about = "Record weekly life-audit entries, keep them in a JSON store, export them as CSV."
)]
struct Cli {
    /// JSON store file to operate on.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Built-in validation profile (overrides the config file's profile).
    #[arg(long, value_enum, global = true)]
    profile: Option<ProfileArg>,

    /// TOML file with profile overrides and seed domains.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rolling log files (falls back to LIFEAUDIT_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Entry(EntryCommand),
    /// Start an empty store file (replaces an existing file).
    NewStore {
        path: PathBuf,
    },
    /// Interactive session; in-memory unless --store is given.
    Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Every field required; statuses On Track / Needs Attention / Overdue.
    Strict,
    /// Domain and responsibility required; statuses Not Started / In Progress / Done.
    Persisted,
}

impl ProfileArg {
    fn profile(self) -> AuditProfile {
        match self {
            Self::Strict => AuditProfile::strict(),
            Self::Persisted => AuditProfile::persisted(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::NewStore { path } => {
            JsonEntryRepository::create(&path).map_err(lifeaudit_core::AuditError::from)?;
            println!("created empty store at {}", path.display());
            Ok(())
        }
        Command::Shell => shell::run_shell(cli.store.as_deref(), config),
        Command::Entry(command) => {
            let store = cli.store.as_deref().ok_or_else(|| {
                CliError::Usage(
                    "--store is required; use `lifeaudit shell` for an in-memory session"
                        .to_string(),
                )
            })?;
            let mut service = open_file_service(store, config)?;
            run_entry_command(&mut service, command)
        }
    }
}

pub(crate) fn open_file_service(
    store: &Path,
    config: AuditConfig,
) -> Result<AuditService<JsonEntryRepository>, CliError> {
    let repo = JsonEntryRepository::open(store).map_err(lifeaudit_core::AuditError::from)?;
    Ok(AuditService::new(repo, config))
}

fn resolve_config(cli: &Cli) -> Result<AuditConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::load(path)?,
        // The table-only variant is strict; the file-backed one is relaxed.
        None if cli.store.is_none() && matches!(cli.command, Command::Shell) => {
            AuditConfig::with_profile(AuditProfile::strict())
        }
        None => AuditConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.profile = profile.profile();
    }
    Ok(config)
}

fn start_logging(cli: &Cli) {
    let Some(dir) = resolve_log_dir(cli.log_dir.as_deref()) else {
        return;
    };
    let dir = if dir.is_absolute() {
        dir
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(dir),
            Err(err) => {
                eprintln!("warning: logging disabled: {err}");
                return;
            }
        }
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());

    match init_logging(level, &dir) {
        Ok(()) => info!("event=cli_start module=cli status=ok"),
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }
}
