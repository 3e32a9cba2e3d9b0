use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::commands::{open_case_file, save_case_file, EventInput, EvidenceInput};

#[derive(Serialize)]
pub struct EventListing<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub event: &'a digicase_core::Event,
    /// Whether `device` resolves to an evidence item in the case.
    pub device_linked: bool,
}

#[derive(Serialize)]
pub struct EvidenceListing<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub evidence: &'a digicase_core::Evidence,
}

/// Append an event to a case file.
///
/// Input is checked before the case is touched. A device that matches no
/// evidence item is accepted with a warning.
pub fn add_event_command(case_path: &Path, input: EventInput) -> Result<()> {
    let event = input.validate()?;
    let mut case = open_case_file(case_path)?;

    if let Some(device) = event.device.as_deref() {
        if case.evidence_by_identifier(device).is_none() {
            tracing::warn!(device, "event references a device that is not in this case's evidence");
        }
    }

    case.add_event(event);
    save_case_file(&case)?;
    tracing::info!(path = %case_path.display(), events = case.events().len(), "event added");

    println!("Added event #{} to case {}", case.events().len() - 1, case.case_reference());
    Ok(())
}

/// Append a physical evidence item to a case file.
pub fn add_evidence_command(case_path: &Path, input: EvidenceInput) -> Result<()> {
    let evidence = input.validate()?;
    let mut case = open_case_file(case_path)?;

    if case.evidence_by_identifier(&evidence.unique_identifier).is_some() {
        tracing::warn!(
            identifier = %evidence.unique_identifier,
            "evidence identifier is already used in this case"
        );
    }

    case.add_evidence(evidence);
    save_case_file(&case)?;
    tracing::info!(
        path = %case_path.display(),
        evidence = case.physical_evidence().len(),
        "evidence added"
    );

    println!(
        "Added evidence #{} to case {}",
        case.physical_evidence().len() - 1,
        case.case_reference()
    );
    Ok(())
}

/// List the events of a case in insertion order.
pub fn list_events_command(case_path: &Path, json: bool) -> Result<()> {
    let case = open_case_file(case_path)?;

    if json {
        let listing: Vec<EventListing> = case
            .events()
            .iter()
            .enumerate()
            .map(|(index, event)| EventListing {
                index,
                event,
                device_linked: case.evidence_for(event).is_some(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if case.events().is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    println!("Events:");
    for (idx, event) in case.events().iter().enumerate() {
        let device = event.device.as_deref().unwrap_or("(no device)");
        println!(
            "- [{}] {} -> {} [{}] {}",
            idx, event.start_time, event.stop_time, device, event.comments
        );
    }
    Ok(())
}

/// List the physical evidence of a case in insertion order.
pub fn list_evidence_command(case_path: &Path, json: bool) -> Result<()> {
    let case = open_case_file(case_path)?;

    if json {
        let listing: Vec<EvidenceListing> = case
            .physical_evidence()
            .iter()
            .enumerate()
            .map(|(index, evidence)| EvidenceListing { index, evidence })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if case.physical_evidence().is_empty() {
        println!("No physical evidence recorded.");
        return Ok(());
    }

    println!("Physical evidence:");
    for (idx, evidence) in case.physical_evidence().iter().enumerate() {
        println!(
            "- [{}] {} -- {} (seized {})",
            idx, evidence.unique_identifier, evidence.description, evidence.seized_date
        );
    }
    Ok(())
}
