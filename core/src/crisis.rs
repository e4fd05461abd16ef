//! Crisis content scanning over the aggregate free text.
//!
//! This is a safety feature, not validation: a positive result surfaces a
//! supportive-resources alert exactly once per session and never blocks
//! navigation or submission.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;

/// Skip scanning until the aggregate text is longer than this, so sparse
/// early input does not trigger the patterns.
pub const DEFAULT_SCAN_MIN_LEN: usize = 10;

static CRISIS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bkill(?:ing)? myself\b",
        r"(?i)\bend(?:ing)? my life\b",
        r"(?i)\bsuicid(?:e|al)\b",
        r"(?i)\bself[- ]harm\b",
        r"(?i)\bhurt(?:ing)? myself\b",
        r"(?i)\bwant(?: to)? die\b",
        r"(?i)\bdon'?t want to (?:live|be alive|go on)\b",
        r"(?i)\bno reason to live\b",
        r"(?i)\bbetter off dead\b",
        r"(?i)\bend it all\b",
        r"(?i)\bcan'?t go on\b",
    ]
    .into_iter()
    .filter_map(|pattern| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!("skipping malformed crisis pattern {pattern:?}: {err}");
            None
        }
    })
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrisisScan {
    pub is_high_risk: bool,
    /// The phrases that matched, for the resource-presentation collaborator.
    pub matched: Vec<String>,
}

/// Pattern-match the concatenated free text. Pure with respect to the
/// session: callers decide when to run it and what to do with a positive.
pub fn scan_free_text(text: &str) -> CrisisScan {
    let mut matched = Vec::new();
    for pattern in CRISIS_PATTERNS.iter() {
        if let Some(found) = pattern.find(text) {
            matched.push(found.as_str().to_string());
        }
    }
    CrisisScan { is_high_risk: !matched.is_empty(), matched }
}

/// Per-session wrapper that applies the length threshold and latches the
/// alert so re-scanning on every keystroke cannot re-trigger it.
#[derive(Debug)]
pub struct CrisisMonitor {
    min_len: usize,
    alerted: bool,
}

impl CrisisMonitor {
    pub fn new(min_len: usize) -> Self {
        Self { min_len, alerted: false }
    }

    /// Returns a scan exactly once: the first time the text crosses the
    /// threshold and matches a high-risk pattern.
    pub fn observe(&mut self, text: &str) -> Option<CrisisScan> {
        if self.alerted || text.chars().count() <= self.min_len {
            return None;
        }
        let scan = scan_free_text(text);
        if scan.is_high_risk {
            self.alerted = true;
            warn!("crisis content detected; surfacing support resources once");
            Some(scan)
        } else {
            None
        }
    }

    pub fn has_alerted(&self) -> bool {
        self.alerted
    }
}

impl Default for CrisisMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_MIN_LEN)
    }
}
