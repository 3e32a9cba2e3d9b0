use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use digicase_core::render::{self, Templates};

use crate::commands::{open_case_file, write_output};

/// Render the event at `index` as HTML.
pub fn print_event_command(
    case_path: &Path,
    index: usize,
    templates: &Templates,
    out: Option<&Path>,
) -> Result<()> {
    let case = open_case_file(case_path)?;
    let event = case.events().get(index).ok_or_else(|| {
        anyhow!("No event at index {}; case has {} event(s)", index, case.events().len())
    })?;
    let html = case.event_to_html(event, templates).context("Failed to render event record")?;
    write_output(out, &html)
}

/// Render the evidence item at `index` as HTML.
pub fn print_evidence_command(
    case_path: &Path,
    index: usize,
    templates: &Templates,
    out: Option<&Path>,
) -> Result<()> {
    let case = open_case_file(case_path)?;
    let evidence = case.physical_evidence().get(index).ok_or_else(|| {
        anyhow!(
            "No evidence at index {}; case has {} evidence item(s)",
            index,
            case.physical_evidence().len()
        )
    })?;
    let html =
        case.evidence_to_html(evidence, templates).context("Failed to render evidence record")?;
    write_output(out, &html)
}

/// Render every record of the case into one paged HTML document.
pub fn print_all_command(case_path: &Path, templates: &Templates, out: Option<&Path>) -> Result<()> {
    let case = open_case_file(case_path)?;
    if case.events().is_empty() && case.physical_evidence().is_empty() {
        bail!("Case {} has no records to print", case.case_reference());
    }
    let pages = render::render_all(&case, templates).context("Failed to render case records")?;
    write_output(out, &render::join_pages(&pages))
}
