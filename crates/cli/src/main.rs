use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use digicase::commands::{
    add_event_command, add_evidence_command, case_info_command, list_events_command,
    list_evidence_command, load_settings, new_case_command, print_all_command,
    print_event_command, print_evidence_command, CaseInput, EventInput, EvidenceInput,
};
use digicase::init_logging;

/// Case-management CLI for forensic investigators.
///
/// This CLI is a thin wrapper around `digicase-core` (exposed in code as
/// `digicase_core`). It collects field input, checks that required fields are
/// filled in, and hands records to the core for storage and rendering.
#[derive(Parser, Debug)]
#[command(
    name = "digicase",
    version,
    about = "Record investigative events and physical evidence for a case",
    long_about = None
)]
struct Cli {
    /// Settings file (JSON). Defaults to ./digicase.json when present.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Directory holding event_record.html and evidence_record.html.
    #[arg(long, global = true)]
    templates_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new case file.
    ///
    /// The `.digicase` extension is appended when `--out` has none.
    NewCase {
        /// Case reference (e.g., CR-2024-117).
        #[arg(long)]
        case_ref: String,

        /// Laboratory reference.
        #[arg(long)]
        lab_ref: String,

        /// Name of the investigator responsible for the case.
        #[arg(long)]
        investigator: String,

        /// Where to write the case file.
        #[arg(long)]
        out: String,

        /// Replace an existing file at `--out`.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Show metadata, record counts, and the file digest of a case.
    CaseInfo {
        /// Case file to inspect.
        #[arg(long)]
        case: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Log an event against a case.
    AddEvent {
        /// Case file to update.
        #[arg(long)]
        case: String,

        /// When work started.
        #[arg(long)]
        start: String,

        /// When work stopped.
        #[arg(long)]
        stop: String,

        /// What was done.
        #[arg(long)]
        comments: String,

        /// Unique identifier of the evidence item worked on.
        #[arg(long)]
        device: Option<String>,
    },

    /// Record a seized or accepted physical evidence item.
    AddEvidence {
        /// Case file to update.
        #[arg(long)]
        case: String,

        /// Unique identifier for the item.
        #[arg(long)]
        id: String,

        /// Short device description.
        #[arg(long)]
        description: String,

        /// Additional information about the item.
        #[arg(long)]
        info: String,

        /// When the item was seized.
        #[arg(long)]
        seized: String,
    },

    /// List the events of a case.
    ListEvents {
        #[arg(long)]
        case: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the physical evidence of a case.
    ListEvidence {
        #[arg(long)]
        case: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Render one event record as HTML.
    PrintEvent {
        #[arg(long)]
        case: String,

        /// Position of the event (see list-events).
        #[arg(long)]
        index: usize,

        /// Write HTML to this file instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },

    /// Render one evidence record as HTML.
    PrintEvidence {
        #[arg(long)]
        case: String,

        /// Position of the evidence item (see list-evidence).
        #[arg(long)]
        index: usize,

        /// Write HTML to this file instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },

    /// Render every record (events, then evidence) into one paged HTML document.
    PrintAll {
        #[arg(long)]
        case: String,

        /// Write HTML to this file instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.templates_dir.as_deref())?;
    let templates = settings.templates();
    let case_path = |case: &str| -> PathBuf { settings.resolve_case_path(Path::new(case)) };

    match cli.command {
        Command::NewCase { case_ref, lab_ref, investigator, out, force } => {
            let input = CaseInput {
                case_reference: case_ref,
                lab_reference: lab_ref,
                investigator,
            };
            new_case_command(&settings, input, &out, force)?
        }
        Command::CaseInfo { case, json } => case_info_command(&case_path(&case), json)?,
        Command::AddEvent { case, start, stop, comments, device } => {
            let input = EventInput { start_time: start, stop_time: stop, comments, device };
            add_event_command(&case_path(&case), input)?
        }
        Command::AddEvidence { case, id, description, info, seized } => {
            let input = EvidenceInput {
                unique_identifier: id,
                description,
                additional_information: info,
                seized_date: seized,
            };
            add_evidence_command(&case_path(&case), input)?
        }
        Command::ListEvents { case, json } => list_events_command(&case_path(&case), json)?,
        Command::ListEvidence { case, json } => list_evidence_command(&case_path(&case), json)?,
        Command::PrintEvent { case, index, out } => {
            print_event_command(&case_path(&case), index, &templates, out.as_deref().map(Path::new))?
        }
        Command::PrintEvidence { case, index, out } => print_evidence_command(
            &case_path(&case),
            index,
            &templates,
            out.as_deref().map(Path::new),
        )?,
        Command::PrintAll { case, out } => {
            print_all_command(&case_path(&case), &templates, out.as_deref().map(Path::new))?
        }
    }

    Ok(())
}
