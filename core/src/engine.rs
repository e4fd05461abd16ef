//! Session façade: wires the form store, navigation controller, crisis
//! monitor and draft autosave together for one open flow.

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use crossterm::event::KeyEvent;
use reframe_protocol::DiaryEntry;
use reframe_protocol::FormOp;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::crisis::CrisisMonitor;
use crate::crisis::CrisisScan;
use crate::draft;
use crate::draft::DraftAutosave;
use crate::draft::DraftStore;
use crate::draft::FileDraftStore;
use crate::error::SubmitError;
use crate::flow::FlowController;
use crate::flow::FlowEvent;
use crate::format::render_summary;
use crate::progress;
use crate::sections::SectionId;
use crate::store::FormStore;
use crate::validation::ValidationIssue;
use crate::validation::validate_entry;

/// Callback that delivers the rendered summary to the chat collaborator.
/// The engine only learns success or failure; transport is not its concern.
pub type HandoffFn<'a> =
    Box<dyn FnOnce(&str) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> + 'a>;

pub struct FlowEngine {
    store: FormStore,
    controller: FlowController,
    monitor: CrisisMonitor,
    autosave: DraftAutosave,
    draft_store: FileDraftStore,
}

impl FlowEngine {
    /// Open a flow session: hydrate the persisted draft unless asked to
    /// start fresh, and start the autosave observer.
    pub fn open(config: &Config, start_fresh: bool) -> Self {
        let draft_store = FileDraftStore::new(config.home.clone());
        let store = if start_fresh {
            FormStore::new()
        } else {
            match draft::load_quietly(&config.home) {
                Some(found) => {
                    info!("resuming draft last modified {}", found.last_modified);
                    FormStore::with_entry(found.entry)
                }
                None => FormStore::new(),
            }
        };
        let autosave = DraftAutosave::spawn(
            draft_store.clone(),
            Duration::from_millis(config.autosave_debounce_ms),
        );
        Self {
            store,
            controller: FlowController::new(config.navigation),
            monitor: CrisisMonitor::new(config.crisis_scan_min_len),
            autosave,
            draft_store,
        }
    }

    pub fn entry(&self) -> &DiaryEntry {
        self.store.entry()
    }

    pub fn current_section(&self) -> SectionId {
        self.controller.current()
    }

    /// Apply one edit. Feeds the autosave debounce and re-runs the crisis
    /// scan; returns the scan the one time it first turns high-risk.
    pub async fn apply(&mut self, op: FormOp) -> Option<CrisisScan> {
        self.store.apply(op);
        if let Err(err) = self.autosave.update(self.store.snapshot()).await {
            warn!("autosave observer unavailable: {err}");
        }
        self.monitor.observe(&self.store.entry().free_text())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FlowEvent {
        self.controller.handle_key(key, self.store.entry())
    }

    pub fn next_section(&mut self) -> SectionId {
        self.controller.next()
    }

    pub fn prev_section(&mut self) -> SectionId {
        self.controller.prev()
    }

    pub fn jump_to(&mut self, target: SectionId) -> bool {
        self.controller.jump_to(target, self.store.entry())
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_entry(self.store.entry())
    }

    pub fn section_completion(&self, section: SectionId) -> u8 {
        progress::section_completion(section, self.store.entry())
    }

    pub fn overall_progress(&self) -> u8 {
        progress::overall_progress(self.store.entry())
    }

    /// Time of the last successful draft write in this session.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.autosave.last_saved().or(self.store.last_saved())
    }

    /// Force a draft write now instead of waiting out the debounce.
    pub async fn save_now(&mut self) {
        match self.autosave.flush().await {
            Ok(Some(stamp)) => self.store.mark_saved(stamp),
            Ok(None) => {}
            Err(err) => warn!("draft flush failed: {err}"),
        }
    }

    /// Validate, render and hand the summary off. Only a successful
    /// hand-off clears the draft and resets the store; any failure leaves
    /// the user's work in place for retry.
    pub async fn submit(&mut self, handoff: HandoffFn<'_>) -> Result<String, SubmitError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(SubmitError::Invalid(issues));
        }
        let summary = render_summary(self.store.entry());
        handoff(&summary).map_err(SubmitError::Handoff)?;

        // The flow is complete: cancel pending writes and clear the draft
        // synchronously so it cannot resurrect the finished entry.
        if let Err(err) = self.autosave.shutdown().await {
            warn!("autosave shutdown failed: {err}");
        }
        if let Err(err) = self.draft_store.delete() {
            warn!("failed to clear completed draft: {err}");
        }
        self.store.reset();
        Ok(summary)
    }

    /// Close without submitting: cancel any pending write and leave the
    /// last debounced draft on disk for the next open.
    pub async fn close(&mut self) {
        if let Err(err) = self.autosave.shutdown().await {
            warn!("autosave shutdown failed: {err}");
        }
    }
}
