use std::path::Path;

use anyhow::{bail, Context, Result};
use digicase_core::config::Settings;
use digicase_core::store::with_case_extension;
use serde::Serialize;

use crate::commands::{read_case_file, CaseInput};
use crate::sha256_file;

#[derive(Serialize)]
pub struct CaseInfoSnapshot {
    pub case_reference: String,
    pub lab_reference: String,
    pub investigator: String,
    pub path: String,
    pub format_version: u32,
    pub saved_at: Option<String>,
    pub sha256: String,
    pub events: usize,
    pub physical_evidence: usize,
    /// Indices of events whose device matches no evidence item.
    pub unlinked_events: Vec<usize>,
}

/// Create a case file from the given metadata.
///
/// The `.digicase` extension is added when `out` has none. An existing file
/// is only replaced with `force`.
pub fn new_case_command(
    settings: &Settings,
    input: CaseInput,
    out: &str,
    force: bool,
) -> Result<()> {
    let mut case = input.validate()?;
    let path = settings.resolve_case_path(&with_case_extension(out));

    if path.exists() && !force {
        bail!("Case file already exists: {} (use --force to overwrite)", path.display());
    }

    case.save_to(&path)
        .with_context(|| format!("Failed to write case file at {}", path.display()))?;
    tracing::info!(path = %path.display(), case = case.case_reference(), "case created");

    println!("Created case:");
    println!("  Case reference: {}", case.case_reference());
    println!("  Lab reference: {}", case.lab_reference());
    println!("  Investigator: {}", case.investigator());
    println!("  File: {}", path.display());
    Ok(())
}

/// Show metadata and record counts for a case file.
pub fn case_info_command(case_path: &Path, json: bool) -> Result<()> {
    let file = read_case_file(case_path)?;
    let case = &file.case;
    let sha256 = sha256_file(case_path)?;
    let unlinked_events: Vec<usize> = case
        .events()
        .iter()
        .enumerate()
        .filter(|(_, event)| !event.device_str().is_empty() && case.evidence_for(event).is_none())
        .map(|(idx, _)| idx)
        .collect();

    if json {
        let snapshot = CaseInfoSnapshot {
            case_reference: case.case_reference().to_string(),
            lab_reference: case.lab_reference().to_string(),
            investigator: case.investigator().to_string(),
            path: case_path.display().to_string(),
            format_version: file.format_version,
            saved_at: file.saved_at.clone(),
            sha256,
            events: case.events().len(),
            physical_evidence: case.physical_evidence().len(),
            unlinked_events,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Case: {}", case.case_reference());
    println!("=====");
    println!("Lab reference: {}", case.lab_reference());
    println!("Investigator: {}", case.investigator());
    println!("File: {}", case_path.display());
    println!("Format version: {}", file.format_version);
    println!("Saved at: {}", file.saved_at.as_deref().unwrap_or("(unknown)"));
    println!("SHA-256: {}", sha256);
    println!("Events: {}", case.events().len());
    println!("Physical evidence: {}", case.physical_evidence().len());
    if !unlinked_events.is_empty() {
        let list: Vec<String> = unlinked_events.iter().map(|i| i.to_string()).collect();
        println!("Events referencing unknown devices: {}", list.join(", "));
    }
    Ok(())
}
