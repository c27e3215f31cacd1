//! Entry subcommands shared by one-shot invocations and the shell.

use clap::{Args, Subcommand};
use lifeaudit_core::{
    AuditError, AuditService, ConfigError, EntryDraft, EntryField, EntryId, EntryRecord,
    EntryRepository,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub(crate) enum EntryCommand {
    /// Validate and store a new entry.
    Add(AddArgs),
    /// Print every stored entry.
    List,
    /// Delete entries by id; unknown ids are ignored.
    Delete {
        #[arg(required = true)]
        ids: Vec<EntryId>,
    },
    /// Write every entry to a CSV file.
    Export { path: PathBuf },
    /// Print the known domains in order.
    Domains,
}

/// Field values for `add`. Omitted choices fall back to the form defaults.
#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[arg(long)]
    domain: String,
    #[arg(long)]
    responsibility: String,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    actions: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Assigned date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    assigned: Option<String>,
    /// Due date (YYYY-MM-DD).
    #[arg(long)]
    due: Option<String>,
    /// Completed date (YYYY-MM-DD).
    #[arg(long)]
    completed: Option<String>,
}

impl AddArgs {
    fn into_draft(self, mut draft: EntryDraft) -> EntryDraft {
        draft.domain = self.domain;
        draft.responsibility = self.responsibility;
        let optional = [
            (EntryField::Status, self.status),
            (EntryField::Priority, self.priority),
            (EntryField::Actions, self.actions),
            (EntryField::Notes, self.notes),
            (EntryField::AssignedDate, self.assigned),
            (EntryField::DueDate, self.due),
            (EntryField::CompletedDate, self.completed),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                draft.set(field, value);
            }
        }
        draft
    }
}

/// Front-end failure.
#[derive(Debug)]
pub(crate) enum CliError {
    Audit(AuditError),
    Config(ConfigError),
    Usage(String),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audit(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Usage(message) => write!(f, "{message}"),
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Audit(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Usage(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<AuditError> for CliError {
    fn from(value: AuditError) -> Self {
        Self::Audit(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Runs one entry command against `service`, printing results to stdout.
pub(crate) fn run_entry_command<R: EntryRepository>(
    service: &mut AuditService<R>,
    command: EntryCommand,
) -> Result<(), CliError> {
    match command {
        EntryCommand::Add(args) => {
            let draft = args.into_draft(service.blank_draft());
            let record = service.add_entry(&draft)?;
            println!("added entry {}", record.id);
        }
        EntryCommand::List => print_records(&service.entries()),
        EntryCommand::Delete { ids } => {
            let removed = service.delete_entries(&ids)?;
            println!("deleted {removed} of {} requested entries", ids.len());
        }
        EntryCommand::Export { path } => {
            let rows = service.export(&path)?;
            println!("exported {rows} entries to {}", path.display());
        }
        EntryCommand::Domains => {
            for domain in service.known_domains() {
                println!("{domain}");
            }
        }
    }
    Ok(())
}

fn print_records(records: &[EntryRecord]) {
    if records.is_empty() {
        println!("no entries");
        return;
    }
    let header = EntryField::ALL.map(EntryField::display_name).join(" | ");
    println!("{:>4}  {header}", "Id");
    for record in records {
        println!("{:>4}  {}", record.id, record.entry.values().join(" | "));
    }
}
