//! Interactive session.
//!
//! Lines are split shell-style and parsed with the same clap definitions as
//! one-shot commands, plus `load`, `new` and `quit`.

use crate::commands::{run_entry_command, CliError, EntryCommand};
use clap::{Parser, Subcommand};
use lifeaudit_core::{
    AuditConfig, AuditService, JsonEntryRepository, MemoryEntryRepository,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const PROMPT: &str = "lifeaudit> ";

#[derive(Debug, Parser)]
#[command(name = "lifeaudit", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Entry(EntryCommand),
    /// Switch to an existing store file.
    Load { path: PathBuf },
    /// Switch to a new empty store file.
    New { path: PathBuf },
    /// Leave the session.
    #[command(alias = "exit")]
    Quit,
}

enum Session {
    Memory(AuditService<MemoryEntryRepository>),
    File(AuditService<JsonEntryRepository>),
}

impl Session {
    fn run(&mut self, command: EntryCommand) -> Result<(), CliError> {
        match self {
            Self::Memory(service) => run_entry_command(service, command),
            Self::File(service) => run_entry_command(service, command),
        }
    }

    fn switch(&mut self, path: &Path, create: bool) -> Result<(), CliError> {
        let Self::File(service) = self else {
            return Err(CliError::Usage(
                "this session has no backing store; start the shell with --store".to_string(),
            ));
        };
        if create {
            service.new_store(path)?;
            println!("switched to new store {}", service.store_path().display());
        } else {
            let count = service.load_store(path)?;
            println!("loaded {count} entries from {}", service.store_path().display());
        }
        Ok(())
    }
}

/// Runs the read-eval loop on stdin until EOF or `quit`.
pub(crate) fn run_shell(store: Option<&Path>, config: AuditConfig) -> Result<(), CliError> {
    let mut session = match store {
        Some(path) => Session::File(crate::open_file_service(path, config)?),
        None => Session::Memory(AuditService::new(MemoryEntryRepository::new(), config)),
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let Some(words) = shlex::split(line.trim()) else {
            eprintln!("error: unbalanced quotes");
            continue;
        };
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        let result = match parsed.command {
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Load { path } => session.switch(&path, false),
            ShellCommand::New { path } => session.switch(&path, true),
            ShellCommand::Entry(command) => session.run(command),
        };
        // Errors abort the action only; the session keeps going.
        if let Err(err) = result {
            eprintln!("error: {err}");
        }
    }
}
