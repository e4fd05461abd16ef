//! Core engine for the Reframe CBT diary flow.
//!
//! The engine is a single-writer, in-process state machine: a form state
//! store holds the [`reframe_protocol::DiaryEntry`] aggregate, pure
//! functions derive validation and progress from it on every read, a
//! navigation controller gates movement between sections, and a debounced
//! autosave task persists drafts to the Reframe home directory. Rendering,
//! authentication and the chat hand-off are collaborators owned by the
//! embedder.

mod config;
mod crisis;
mod draft;
mod engine;
mod error;
mod flow;
mod format;
mod progress;
mod sections;
mod store;
mod validation;

pub use config::Config;
pub use config::REFRAME_HOME_ENV;
pub use config::find_reframe_home;
pub use crisis::CrisisMonitor;
pub use crisis::CrisisScan;
pub use crisis::scan_free_text;
pub use draft::DRAFT_FILE_NAME;
pub use draft::DraftAutosave;
pub use draft::DraftFile;
pub use draft::DraftStore;
pub use draft::FileDraftStore;
pub use draft::clear_persisted_draft;
pub use draft::has_persisted_draft;
pub use draft::persisted_draft_timestamp;
pub use engine::FlowEngine;
pub use engine::HandoffFn;
pub use error::ReframeError;
pub use error::Result;
pub use error::SubmitError;
pub use flow::FlowController;
pub use flow::FlowEvent;
pub use flow::NavigationPolicy;
pub use format::render_summary;
pub use progress::overall_progress;
pub use progress::section_completion;
pub use sections::SECTIONS;
pub use sections::SectionId;
pub use sections::SectionInfo;
pub use sections::is_required;
pub use store::FormStore;
pub use validation::ValidationIssue;
pub use validation::is_section_valid;
pub use validation::validate_entry;
