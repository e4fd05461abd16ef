//! Navigation controller: a finite state machine over section ids.
//!
//! Two policies exist in the product: fully permissive review, and a gated
//! variant that blocks skipping ahead through unfinished required work
//! while always allowing review of earlier sections. The gated variant is
//! the default; config can select permissive.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use reframe_protocol::DiaryEntry;
use serde::Deserialize;
use serde::Serialize;

use crate::progress::section_completion;
use crate::sections::SectionId;

/// A section counts as passed for gating once it reaches this completion.
const GATING_PASS_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationPolicy {
    /// Any section is reachable at any time.
    Permissive,
    /// A jump target must already be passed, or at most one step ahead of
    /// the current section.
    #[default]
    Gated,
}

/// What a key press produced. `Ignored` keys should fall through to the
/// embedding view (e.g. the focused text field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Navigated(SectionId),
    Rejected(SectionId),
    CloseRequested,
    Ignored,
}

#[derive(Debug)]
pub struct FlowController {
    current: SectionId,
    policy: NavigationPolicy,
}

impl FlowController {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self { current: SectionId::Situation, policy }
    }

    pub fn current(&self) -> SectionId {
        self.current
    }

    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    /// One step forward; no-op at the last section.
    pub fn next(&mut self) -> SectionId {
        let idx = self.current.index();
        if let Some(section) = SectionId::ALL.get(idx + 1) {
            self.current = *section;
        }
        self.current
    }

    /// One step back; no-op at the first section.
    pub fn prev(&mut self) -> SectionId {
        let idx = self.current.index();
        if idx > 0 {
            self.current = SectionId::ALL[idx - 1];
        }
        self.current
    }

    /// Direct jump, subject to the active policy. Returns whether the jump
    /// was taken.
    pub fn jump_to(&mut self, target: SectionId, entry: &DiaryEntry) -> bool {
        if self.can_jump_to(target, entry) {
            self.current = target;
            true
        } else {
            false
        }
    }

    pub fn can_jump_to(&self, target: SectionId, entry: &DiaryEntry) -> bool {
        match self.policy {
            NavigationPolicy::Permissive => true,
            NavigationPolicy::Gated => {
                section_completion(target, entry) >= GATING_PASS_THRESHOLD
                    || target.index() <= self.current.index() + 1
            }
        }
    }

    /// Keyboard bindings for the flow: arrows step, 1-7 jump, Home/End jump
    /// to the ends, Esc asks the embedder to close. Everything else is left
    /// for the focused widget.
    pub fn handle_key(&mut self, key: KeyEvent, entry: &DiaryEntry) -> FlowEvent {
        match key.code {
            KeyCode::Left | KeyCode::Up => FlowEvent::Navigated(self.prev()),
            KeyCode::Right | KeyCode::Down => FlowEvent::Navigated(self.next()),
            KeyCode::Home => self.jump_event(SectionId::Situation, entry),
            KeyCode::End => self.jump_event(SectionId::Results, entry),
            KeyCode::Esc => FlowEvent::CloseRequested,
            KeyCode::Char(c @ '1'..='7') => {
                let digit = c as u8 - b'0';
                match SectionId::from_digit(digit) {
                    Some(target) => self.jump_event(target, entry),
                    None => FlowEvent::Ignored,
                }
            }
            _ => FlowEvent::Ignored,
        }
    }

    fn jump_event(&mut self, target: SectionId, entry: &DiaryEntry) -> FlowEvent {
        if self.jump_to(target, entry) {
            FlowEvent::Navigated(target)
        } else {
            FlowEvent::Rejected(target)
        }
    }
}
