//! Durable draft persistence.
//!
//! One fixed key (`draft.json` under the Reframe home) holds the JSON
//! serialization of the in-progress entry plus a `lastModified` stamp. A
//! missing or malformed file is "no draft": persistence failures degrade
//! the experience but never surface as errors to the flow.

mod autosave;

use std::fmt::Debug;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use reframe_protocol::DiaryEntry;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

pub use autosave::DraftAutosave;

pub const DRAFT_FILE_NAME: &str = "draft.json";

/// On-disk shape of a persisted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFile {
    pub last_modified: DateTime<Utc>,
    pub entry: DiaryEntry,
}

pub trait DraftStore: Debug + Send + Sync {
    /// `Ok(None)` when no draft exists. Corrupt drafts are logged, purged
    /// and reported as absent; they are never partially applied.
    fn load(&self) -> std::io::Result<Option<DraftFile>>;
    fn save(&self, draft: &DraftFile) -> std::io::Result<()>;
    /// Returns whether a draft file was actually removed.
    fn delete(&self) -> std::io::Result<bool>;
}

fn draft_path(home: &Path) -> PathBuf {
    home.join(DRAFT_FILE_NAME)
}

#[derive(Clone, Debug)]
pub struct FileDraftStore {
    home: PathBuf,
}

impl FileDraftStore {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    fn try_read(&self, path: &Path) -> std::io::Result<DraftFile> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let draft: DraftFile = serde_json::from_str(&contents)?;
        Ok(draft)
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> std::io::Result<Option<DraftFile>> {
        let path = draft_path(&self.home);
        match self.try_read(&path) {
            Ok(draft) => Ok(Some(draft)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof
                ) =>
            {
                // serde_json failures arrive as InvalidData (or
                // UnexpectedEof for a truncated file); purge the corrupt
                // file so the next open starts clean.
                warn!("discarding corrupt draft at {path:?}: {err}");
                let _ = std::fs::remove_file(&path);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn save(&self, draft: &DraftFile) -> std::io::Result<()> {
        let path = draft_path(&self.home);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json_data = serde_json::to_string_pretty(draft)?;
        let mut options = OpenOptions::new();
        options.truncate(true).write(true).create(true);
        #[cfg(unix)]
        {
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        file.write_all(json_data.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn delete(&self) -> std::io::Result<bool> {
        match std::fs::remove_file(draft_path(&self.home)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Query helper usable before any live session exists, e.g. to decide
/// whether to offer "continue where you left off".
pub fn has_persisted_draft(home: &Path) -> bool {
    load_quietly(home).is_some()
}

/// The `lastModified` stamp of the persisted draft: the time of the last
/// write, not of the entry's creation.
pub fn persisted_draft_timestamp(home: &Path) -> Option<DateTime<Utc>> {
    load_quietly(home).map(|d| d.last_modified)
}

pub fn clear_persisted_draft(home: &Path) -> bool {
    let store = FileDraftStore::new(home.to_path_buf());
    match store.delete() {
        Ok(removed) => removed,
        Err(err) => {
            warn!("failed to clear persisted draft: {err}");
            false
        }
    }
}

/// Read a draft, translating every failure into "no draft present".
pub(crate) fn load_quietly(home: &Path) -> Option<DraftFile> {
    let store = FileDraftStore::new(home.to_path_buf());
    match store.load() {
        Ok(draft) => draft,
        Err(err) => {
            warn!("failed to read persisted draft: {err}");
            None
        }
    }
}
