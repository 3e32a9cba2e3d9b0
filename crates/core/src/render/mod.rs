//! HTML record rendering.
//!
//! Each record kind has a template file containing `${Token}` placeholders.
//! Templates are read from disk on every call so edits take effect without a
//! restart.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{Case, Event, Evidence};

pub const EVENT_TEMPLATE_FILE: &str = "event_record.html";
pub const EVIDENCE_TEMPLATE_FILE: &str = "evidence_record.html";

pub const TOKEN_CASE_REF: &str = "${CaseRef}";
pub const TOKEN_LAB_REF: &str = "${LabRef}";
pub const TOKEN_ITEM_UUID: &str = "${ItemUUID}";
pub const TOKEN_START_DATE: &str = "${StartDate}";
pub const TOKEN_STOP_DATE: &str = "${StopDate}";
pub const TOKEN_COMMENTS: &str = "${Comments}";
pub const TOKEN_SEIZED_DATE: &str = "${SeizedDate}";
pub const TOKEN_ADDITIONAL_INFO: &str = "${AdditionalInfo}";
pub const TOKEN_DEVICE_DESC: &str = "${DeviceDesc}";
pub const TOKEN_INVESTIGATOR_NAME: &str = "${InvestigatorName}";

/// Inserted between pages by [`join_pages`].
pub const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>\n";

/// Error type for record rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file does not exist.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// The template exists but could not be read.
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// The two record kinds that have a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Event,
    Evidence,
}

impl TemplateKind {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Event => EVENT_TEMPLATE_FILE,
            TemplateKind::Evidence => EVIDENCE_TEMPLATE_FILE,
        }
    }
}

/// Location of the record templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: TemplateKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Read the template for `kind` from disk.
    pub fn load(&self, kind: TemplateKind) -> RenderResult<String> {
        let path = self.path_for(kind);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateNotFound { path }
            } else {
                RenderError::Io { path, source }
            }
        })
    }
}

/// Replace placeholder tokens in one left-to-right pass.
///
/// Every occurrence of a bound token is replaced. Unbound `${...}` sequences
/// are copied as-is, and substituted values are never scanned again.
pub fn substitute(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match bindings.iter().find(|(token, _)| candidate.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &candidate[token.len()..];
            }
            None => {
                out.push_str("${");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render an event record for `case`.
pub fn render_event(case: &Case, event: &Event, templates: &Templates) -> RenderResult<String> {
    let template = templates.load(TemplateKind::Event)?;
    Ok(substitute(
        &template,
        &[
            (TOKEN_CASE_REF, case.case_reference()),
            (TOKEN_ITEM_UUID, event.device_str()),
            (TOKEN_START_DATE, event.start_time.as_str()),
            (TOKEN_COMMENTS, event.comments.as_str()),
            (TOKEN_STOP_DATE, event.stop_time.as_str()),
            (TOKEN_INVESTIGATOR_NAME, case.investigator()),
        ],
    ))
}

/// Render an evidence record for `case`.
pub fn render_evidence(
    case: &Case,
    evidence: &Evidence,
    templates: &Templates,
) -> RenderResult<String> {
    let template = templates.load(TemplateKind::Evidence)?;
    Ok(substitute(
        &template,
        &[
            (TOKEN_CASE_REF, case.case_reference()),
            (TOKEN_LAB_REF, case.lab_reference()),
            (TOKEN_ITEM_UUID, evidence.unique_identifier.as_str()),
            (TOKEN_SEIZED_DATE, evidence.seized_date.as_str()),
            (TOKEN_ADDITIONAL_INFO, evidence.additional_information.as_str()),
            (TOKEN_DEVICE_DESC, evidence.description.as_str()),
            (TOKEN_INVESTIGATOR_NAME, case.investigator()),
        ],
    ))
}

/// Every record of the case as one page each: events first, then evidence.
pub fn render_all(case: &Case, templates: &Templates) -> RenderResult<Vec<String>> {
    let mut pages = Vec::with_capacity(case.events().len() + case.physical_evidence().len());
    for event in case.events() {
        pages.push(render_event(case, event, templates)?);
    }
    for evidence in case.physical_evidence() {
        pages.push(render_evidence(case, evidence, templates)?);
    }
    tracing::debug!(pages = pages.len(), "rendered case records");
    Ok(pages)
}

/// Concatenate pages with a page break between each pair (none trailing).
pub fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_replaces_every_occurrence() {
        let out = substitute("${A}-${A}", &[("${A}", "x")]);
        assert_eq!(out, "x-x");
    }

    #[test]
    fn substitute_keeps_unknown_tokens_and_stray_markers() {
        let out = substitute("${Nope} $ ${ ${A}", &[("${A}", "v")]);
        assert_eq!(out, "${Nope} $ ${ v");
    }

    #[test]
    fn substitute_does_not_rescan_values() {
        let out = substitute(
            "${CaseRef}|${Comments}",
            &[(TOKEN_CASE_REF, "${Comments}"), (TOKEN_COMMENTS, "done")],
        );
        assert_eq!(out, "${Comments}|done");
    }

    #[test]
    fn join_pages_has_no_trailing_break() {
        let joined = join_pages(&["a".to_string(), "b".to_string()]);
        assert_eq!(joined, format!("a{PAGE_BREAK}b"));
        assert_eq!(join_pages(&[]), "");
    }
}
