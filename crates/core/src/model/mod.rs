//! Core data model for a forensic case: the case itself, the events an
//! investigator logs against it, and the physical evidence seized.
//!
//! Records are plain values. A `Case` owns both of its sequences and only
//! ever appends to them; there is no edit or delete API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::{self, RenderResult, Templates};
use crate::store::{self, StoreResult};

/// A logged span of investigative work.
///
/// No validation happens here; presence checks belong to whoever collects
/// the input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// When work on this event started (free-form timestamp text).
    pub start_time: String,
    /// When work on this event stopped (free-form timestamp text).
    pub stop_time: String,
    /// What the investigator did during this span.
    pub comments: String,
    /// Unique identifier of the evidence item this event concerns, if any.
    ///
    /// Expected, but not required, to match an `Evidence::unique_identifier`
    /// in the same case.
    pub device: Option<String>,
}

impl Event {
    pub fn new(
        start_time: impl Into<String>,
        stop_time: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            stop_time: stop_time.into(),
            comments: comments.into(),
            device: None,
        }
    }

    /// Builder-style helper to attach the device this event pertains to.
    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    /// Device identifier, or `""` when none is attached.
    pub fn device_str(&self) -> &str {
        self.device.as_deref().unwrap_or_default()
    }
}

/// A physical item seized or accepted during an investigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    /// Identifier for the item (e.g., an exhibit label). Not enforced unique.
    pub unique_identifier: String,
    /// Short device description (e.g., "Black Android phone").
    pub description: String,
    /// Free-text notes about the item.
    pub additional_information: String,
    /// When the item was seized (free-form timestamp text).
    pub seized_date: String,
}

impl Evidence {
    pub fn new(
        unique_identifier: impl Into<String>,
        description: impl Into<String>,
        additional_information: impl Into<String>,
        seized_date: impl Into<String>,
    ) -> Self {
        Self {
            unique_identifier: unique_identifier.into(),
            description: description.into(),
            additional_information: additional_information.into(),
            seized_date: seized_date.into(),
        }
    }
}

/// A single investigation: identifying metadata plus the ordered events and
/// evidence recorded against it.
///
/// The save location is session state. It is never written into the case
/// file; opening a file binds the returned case to that file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Case {
    case_reference: String,
    lab_reference: String,
    investigator: String,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    physical_evidence: Vec<Evidence>,
    #[serde(skip)]
    save_location: Option<PathBuf>,
}

impl Case {
    /// Start a fresh case with no records and no backing file.
    pub fn new(
        case_reference: impl Into<String>,
        lab_reference: impl Into<String>,
        investigator: impl Into<String>,
    ) -> Self {
        Self {
            case_reference: case_reference.into(),
            lab_reference: lab_reference.into(),
            investigator: investigator.into(),
            events: Vec::new(),
            physical_evidence: Vec::new(),
            save_location: None,
        }
    }

    pub fn case_reference(&self) -> &str {
        &self.case_reference
    }

    pub fn lab_reference(&self) -> &str {
        &self.lab_reference
    }

    pub fn investigator(&self) -> &str {
        &self.investigator
    }

    /// Events in the order they were added.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Evidence items in the order they were added.
    pub fn physical_evidence(&self) -> &[Evidence] {
        &self.physical_evidence
    }

    /// Where this case is saved, or `None` if it has never been saved or opened.
    pub fn save_location(&self) -> Option<&Path> {
        self.save_location.as_deref()
    }

    /// Bind the case to a file. Subsequent `save_to_disk` calls write there.
    pub fn set_save_location(&mut self, path: impl Into<PathBuf>) {
        self.save_location = Some(path.into());
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn add_evidence(&mut self, evidence: Evidence) {
        self.physical_evidence.push(evidence);
    }

    /// First evidence item carrying `identifier`.
    pub fn evidence_by_identifier(&self, identifier: &str) -> Option<&Evidence> {
        self.physical_evidence.iter().find(|e| e.unique_identifier == identifier)
    }

    /// The evidence item an event's device refers to, if it resolves.
    pub fn evidence_for(&self, event: &Event) -> Option<&Evidence> {
        match event.device.as_deref() {
            Some(device) if !device.is_empty() => self.evidence_by_identifier(device),
            _ => None,
        }
    }

    /// Events naming a device that matches no evidence item in this case.
    ///
    /// Events without a device are not considered unlinked.
    pub fn unlinked_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| !event.device_str().is_empty() && self.evidence_for(event).is_none())
            .collect()
    }

    /// Write the case to its bound location.
    ///
    /// Returns `Ok(false)` without touching the filesystem when no location
    /// is bound; the caller has to pick one first.
    pub fn save_to_disk(&self) -> StoreResult<bool> {
        match self.save_location.as_deref() {
            Some(path) => {
                store::save_case(self, path)?;
                Ok(true)
            }
            None => {
                tracing::debug!(case = %self.case_reference, "no save location bound; skipping save");
                Ok(false)
            }
        }
    }

    /// Bind the case to `path` and write it there.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) -> StoreResult<()> {
        self.set_save_location(path);
        self.save_to_disk().map(|_| ())
    }

    /// Read a case file; the returned case is bound to `path`.
    pub fn open_from_disk(path: impl AsRef<Path>) -> StoreResult<Case> {
        store::open_case(path.as_ref())
    }

    /// HTML record for one of this case's events.
    pub fn event_to_html(&self, event: &Event, templates: &Templates) -> RenderResult<String> {
        render::render_event(self, event, templates)
    }

    /// HTML record for one of this case's evidence items.
    pub fn evidence_to_html(
        &self,
        evidence: &Evidence,
        templates: &Templates,
    ) -> RenderResult<String> {
        render::render_evidence(self, evidence, templates)
    }
}
