//! Presence checks for user-supplied record fields.
//!
//! Records are only constructed from fully filled-in input; a failed check
//! never produces a partial record.

use digicase_core::{Case, Event, Evidence};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("You must fill out all the fields! Missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check(fields: &[(&'static str, &str)]) -> Result<(), InputError> {
    let missing: Vec<&'static str> =
        fields.iter().filter(|(_, value)| is_blank(value)).map(|(name, _)| *name).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingFields(missing))
    }
}

/// Identifying metadata for a new case.
#[derive(Debug, Clone, Default)]
pub struct CaseInput {
    pub case_reference: String,
    pub lab_reference: String,
    pub investigator: String,
}

impl CaseInput {
    pub fn validate(self) -> Result<Case, InputError> {
        check(&[
            ("case reference", self.case_reference.as_str()),
            ("lab reference", self.lab_reference.as_str()),
            ("investigator", self.investigator.as_str()),
        ])?;
        Ok(Case::new(self.case_reference, self.lab_reference, self.investigator))
    }
}

/// Fields of the "add event" form.
#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub start_time: String,
    pub stop_time: String,
    pub comments: String,
    /// Selected evidence item, if any. Blank counts as no selection.
    pub device: Option<String>,
}

impl EventInput {
    pub fn validate(self) -> Result<Event, InputError> {
        check(&[
            ("start time", self.start_time.as_str()),
            ("stop time", self.stop_time.as_str()),
            ("comments", self.comments.as_str()),
        ])?;
        let device = self.device.filter(|d| !is_blank(d));
        Ok(Event::new(self.start_time, self.stop_time, self.comments).with_device(device))
    }
}

/// Fields of the "add physical evidence" form.
#[derive(Debug, Clone, Default)]
pub struct EvidenceInput {
    pub unique_identifier: String,
    pub description: String,
    pub additional_information: String,
    pub seized_date: String,
}

impl EvidenceInput {
    pub fn validate(self) -> Result<Evidence, InputError> {
        check(&[
            ("unique identifier", self.unique_identifier.as_str()),
            ("device description", self.description.as_str()),
            ("additional information", self.additional_information.as_str()),
            ("seized date", self.seized_date.as_str()),
        ])?;
        Ok(Evidence::new(
            self.unique_identifier,
            self.description,
            self.additional_information,
            self.seized_date,
        ))
    }
}
