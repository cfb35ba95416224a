//! UI-agnostic controller for one browsing session.
//!
//! `Session` owns the collection, the notification stack and the busy flag.
//! Every mutation ends with [`Session::refresh`], which rebuilds the preview
//! model and the control state the view renders from.

use crate::collection::{AddOutcome, ImageCollection};
use crate::convert::ConvertReport;
use crate::notify::{NotificationStack, Severity};
use crate::types::*;

pub const CONVERT_LABEL: &str = "Convert to PDF";
pub const CONVERTING_LABEL: &str = "Converting...";

/// Enabled state and labels of the action buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub convert_enabled: bool,
    pub clear_enabled: bool,
    pub convert_label: &'static str,
}

/// One tile in the preview area
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry {
    pub id: FileId,
    pub index: usize,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewModel {
    pub visible: bool,
    pub entries: Vec<PreviewEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Converting,
}

pub struct Session {
    collection: ImageCollection,
    notifications: NotificationStack,
    phase: Phase,
    controls: ControlState,
    preview: PreviewModel,
    revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self {
            collection: ImageCollection::new(),
            notifications: NotificationStack::new(),
            phase: Phase::Idle,
            controls: ControlState {
                convert_enabled: false,
                clear_enabled: false,
                convert_label: CONVERT_LABEL,
            },
            preview: PreviewModel::default(),
            revision: 0,
        };
        session.refresh();
        session
    }

    /// Add user-selected files.
    ///
    /// An empty selection is ignored. A selection without images raises an
    /// error notification and changes nothing. Otherwise the success message
    /// counts every image passed in, duplicates included.
    pub fn add_files(&mut self, candidates: Vec<SelectedFile>) -> Option<AddOutcome> {
        if candidates.is_empty() {
            return None;
        }

        match self.collection.add_files(candidates) {
            Ok(outcome) => {
                self.refresh();
                self.notify(
                    format!("{} image(s) added successfully", outcome.accepted),
                    Severity::Success,
                );
                Some(outcome)
            }
            Err(_) => {
                self.notify("Please select valid image files", Severity::Error);
                None
            }
        }
    }

    pub fn remove(&mut self, id: FileId) -> Option<SelectedFile> {
        let removed = self.collection.remove(id)?;
        self.refresh();
        Some(removed)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SelectedFile> {
        let removed = self.collection.remove_at(index)?;
        self.refresh();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.collection.clear();
        self.refresh();
        self.notify("All images cleared", Severity::Info);
    }

    pub fn move_up(&mut self, id: FileId) -> bool {
        let moved = self.collection.move_up(id);
        if moved {
            self.refresh();
        }
        moved
    }

    pub fn move_down(&mut self, id: FileId) -> bool {
        let moved = self.collection.move_down(id);
        if moved {
            self.refresh();
        }
        moved
    }

    /// Enter the busy state and hand out the files to convert.
    ///
    /// Returns `None` (and stays idle) when there is nothing to convert or a
    /// conversion is already running.
    pub fn start_conversion(&mut self) -> Option<Vec<SelectedFile>> {
        if self.collection.is_empty() || self.phase == Phase::Converting {
            return None;
        }
        self.phase = Phase::Converting;
        self.refresh();
        Some(self.collection.snapshot())
    }

    /// Leave the busy state and report the outcome.
    pub fn finish_conversion(&mut self, outcome: Result<Option<ConvertReport>>) {
        match outcome {
            Ok(report) => self.conversion_succeeded(report),
            Err(e) => self.conversion_failed(e),
        }
    }

    /// `None` means the run had nothing to convert and stays silent.
    pub fn conversion_succeeded(&mut self, report: Option<ConvertReport>) {
        self.phase = Phase::Idle;
        self.refresh();

        if let Some(report) = report {
            log::info!(
                "Created {} with {} page(s)",
                report.path.display(),
                report.page_count
            );
            self.notify("PDF created successfully!", Severity::Success);
        }
    }

    /// Used for failures reported across the worker channel as well.
    pub fn conversion_failed(&mut self, error: impl std::fmt::Display) {
        self.phase = Phase::Idle;
        self.refresh();
        self.notify(format!("Error creating PDF: {error}"), Severity::Error);
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.push(message, severity);
    }

    /// Rebuild the preview model and control state from the collection.
    fn refresh(&mut self) {
        let busy = self.phase == Phase::Converting;
        let has_files = !self.collection.is_empty();

        self.controls = ControlState {
            convert_enabled: has_files && !busy,
            clear_enabled: has_files,
            convert_label: if busy { CONVERTING_LABEL } else { CONVERT_LABEL },
        };

        self.preview = PreviewModel {
            visible: has_files,
            entries: self
                .collection
                .iter()
                .enumerate()
                .map(|(index, file)| PreviewEntry {
                    id: file.id,
                    index,
                    name: file.name.clone(),
                    size: file.size,
                    mime: file.mime.clone(),
                })
                .collect(),
        };

        self.revision += 1;
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn notifications(&self) -> &NotificationStack {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationStack {
        &mut self.notifications
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn preview(&self) -> &PreviewModel {
        &self.preview
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_converting(&self) -> bool {
        self.phase == Phase::Converting
    }

    /// Incremented by every refresh
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
