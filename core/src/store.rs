//! In-memory form state store.
//!
//! Owns the diary entry for the active editing session. Mutations come in
//! as [`FormOp`] values; the store applies them structurally, tracks the
//! dirty flag, and leaves persistence to the autosave observer. `last_saved`
//! moves only when a persistence cycle reports success, not on keystrokes.

use chrono::DateTime;
use chrono::Utc;
use reframe_protocol::AdditionalQuestion;
use reframe_protocol::DiaryEntry;
use reframe_protocol::FormOp;
use reframe_protocol::OtherEmotion;
use reframe_protocol::RationalThought;
use reframe_protocol::ReflectionCategory;
use reframe_protocol::ReflectionQuestion;
use reframe_protocol::Thought;
use reframe_protocol::models::ADDITIONAL_QUESTIONS_MAX;
use tracing::debug;

#[derive(Debug, Default)]
pub struct FormStore {
    entry: DiaryEntry,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume an existing entry, e.g. one hydrated from a persisted draft.
    pub fn with_entry(entry: DiaryEntry) -> Self {
        Self { entry, dirty: false, last_saved: None }
    }

    pub fn entry(&self) -> &DiaryEntry {
        &self.entry
    }

    /// Clone of the current state for the autosave observer.
    pub fn snapshot(&self) -> DiaryEntry {
        self.entry.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Called by the persistence observer after a successful write.
    pub fn mark_saved(&mut self, at: DateTime<Utc>) {
        self.dirty = false;
        self.last_saved = Some(at);
    }

    /// Restore the empty default and clear dirty/saved state.
    pub fn reset(&mut self) {
        self.entry = DiaryEntry::default();
        self.dirty = false;
        self.last_saved = None;
    }

    /// Apply one mutation. Out-of-range scale values are stored as-is and
    /// left to validation; out-of-bounds indices are dropped with a debug
    /// log rather than panicking on a stale UI event.
    pub fn apply(&mut self, op: FormOp) {
        self.dirty = true;
        match op {
            FormOp::SetDate { date } => self.entry.date = date,
            FormOp::SetSituation { text } => self.entry.situation = text,
            FormOp::SetInitialEmotion { emotion, intensity } => {
                self.entry.initial_emotions.set(emotion, intensity);
            }
            FormOp::SetInitialOtherEmotion { name, intensity } => {
                self.entry.initial_emotions.other = Some(OtherEmotion { name, intensity });
            }
            FormOp::ClearInitialOtherEmotion => self.entry.initial_emotions.other = None,
            FormOp::SetFinalEmotion { emotion, intensity } => {
                self.entry.final_emotions.set(emotion, intensity);
            }
            FormOp::SetFinalOtherEmotion { name, intensity } => {
                self.entry.final_emotions.other = Some(OtherEmotion { name, intensity });
            }
            FormOp::ClearFinalOtherEmotion => self.entry.final_emotions.other = None,
            FormOp::AddAutomaticThought => {
                self.entry.automatic_thoughts.push(Thought::default());
            }
            FormOp::UpdateAutomaticThought { index, thought, credibility } => {
                match self.entry.automatic_thoughts.get_mut(index) {
                    Some(entry) => *entry = Thought { thought, credibility },
                    None => debug!("dropping update for missing automatic thought {index}"),
                }
            }
            FormOp::RemoveAutomaticThought { index } => {
                remove_in_order(&mut self.entry.automatic_thoughts, index);
            }
            FormOp::SetCoreBelief { text, credibility } => {
                self.entry.core_belief_text = text;
                self.entry.core_belief_credibility = credibility;
            }
            FormOp::SetConfirmingBehaviors { text } => self.entry.confirming_behaviors = text,
            FormOp::SetAvoidantBehaviors { text } => self.entry.avoidant_behaviors = text,
            FormOp::SetOverridingBehaviors { text } => self.entry.overriding_behaviors = text,
            FormOp::SetSchemaMode { mode, selected, intensity } => {
                match self.entry.schema_modes.iter_mut().find(|m| m.mode == mode) {
                    Some(state) => {
                        state.selected = selected;
                        state.intensity = intensity;
                    }
                    None => debug!("dropping update for mode {mode} missing from catalog"),
                }
            }
            FormOp::AnswerChallengeQuestion { index, answer } => {
                match self.entry.challenge_questions.get_mut(index) {
                    Some(question) => question.answer = answer,
                    None => debug!("dropping answer for missing challenge question {index}"),
                }
            }
            FormOp::AddAdditionalQuestion { question } => {
                if self.entry.additional_questions.len() >= ADDITIONAL_QUESTIONS_MAX {
                    debug!("additional question cap reached, ignoring add");
                } else {
                    self.entry
                        .additional_questions
                        .push(AdditionalQuestion { question, answer: String::new() });
                }
            }
            FormOp::UpdateAdditionalQuestion { index, question, answer } => {
                match self.entry.additional_questions.get_mut(index) {
                    Some(entry) => *entry = AdditionalQuestion { question, answer },
                    None => debug!("dropping update for missing additional question {index}"),
                }
            }
            FormOp::RemoveAdditionalQuestion { index } => {
                remove_in_order(&mut self.entry.additional_questions, index);
            }
            FormOp::AddRationalThought => {
                self.entry.rational_thoughts.push(RationalThought::default());
            }
            FormOp::UpdateRationalThought { index, thought, confidence } => {
                match self.entry.rational_thoughts.get_mut(index) {
                    Some(entry) => *entry = RationalThought { thought, confidence },
                    None => debug!("dropping update for missing rational thought {index}"),
                }
            }
            FormOp::RemoveRationalThought { index } => {
                remove_in_order(&mut self.entry.rational_thoughts, index);
            }
            FormOp::AddAlternativeResponse => {
                self.entry.alternative_responses.push(String::new());
            }
            FormOp::UpdateAlternativeResponse { index, response } => {
                match self.entry.alternative_responses.get_mut(index) {
                    Some(entry) => *entry = response,
                    None => debug!("dropping update for missing alternative response {index}"),
                }
            }
            FormOp::RemoveAlternativeResponse { index } => {
                remove_in_order(&mut self.entry.alternative_responses, index);
            }
            FormOp::SetReflectionEnabled { enabled } => {
                self.entry.schema_reflection.enabled = enabled;
            }
            FormOp::SetReflectionSelfAssessment { text } => {
                self.entry.schema_reflection.self_assessment = text;
            }
            FormOp::AnswerReflectionQuestion { index, answer } => {
                match self.entry.schema_reflection.questions.get_mut(index) {
                    Some(question) => question.answer = answer,
                    None => debug!("dropping answer for missing reflection question {index}"),
                }
            }
            FormOp::AddCustomReflectionQuestion { question } => {
                self.entry
                    .schema_reflection
                    .questions
                    .push(ReflectionQuestion {
                        question,
                        answer: String::new(),
                        category: ReflectionCategory::Custom,
                        is_required: None,
                    });
            }
            FormOp::RemoveReflectionQuestion { index } => {
                // Only user-authored questions may be deleted.
                let removable = self
                    .entry
                    .schema_reflection
                    .questions
                    .get(index)
                    .is_some_and(|q| matches!(q.category, ReflectionCategory::Custom));
                if removable {
                    self.entry.schema_reflection.questions.remove(index);
                } else {
                    debug!("refusing to remove non-custom reflection question {index}");
                }
            }
            FormOp::SetNewBehaviors { text } => self.entry.new_behaviors = text,
            FormOp::SetOriginalThoughtCredibility { credibility } => {
                self.entry.original_thought_credibility = credibility;
            }
        }
    }
}

fn remove_in_order<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        // Vec::remove keeps the order of the remaining elements.
        items.remove(index);
    } else {
        debug!("dropping removal of missing index {index}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reframe_protocol::EmotionKind;

    #[test]
    fn apply_marks_dirty_and_reset_clears() {
        let mut store = FormStore::new();
        assert!(!store.is_dirty());
        store.apply(FormOp::SetSituation { text: "a difficult meeting".to_string() });
        assert!(store.is_dirty());
        assert_eq!(store.entry().situation, "a difficult meeting");

        store.mark_saved(Utc::now());
        assert!(!store.is_dirty());
        assert!(store.last_saved().is_some());

        store.reset();
        assert_eq!(store.entry().situation, "");
        assert!(!store.is_dirty());
        assert_eq!(store.last_saved(), None);
    }

    #[test]
    fn removal_preserves_order_of_remaining_thoughts() {
        let mut store = FormStore::new();
        for text in ["first", "second", "third"] {
            store.apply(FormOp::AddAutomaticThought);
            let index = store.entry().automatic_thoughts.len() - 1;
            store.apply(FormOp::UpdateAutomaticThought {
                index,
                thought: text.to_string(),
                credibility: 5,
            });
        }
        store.apply(FormOp::RemoveAutomaticThought { index: 1 });
        let remaining: Vec<&str> = store
            .entry()
            .automatic_thoughts
            .iter()
            .map(|t| t.thought.as_str())
            .collect();
        assert_eq!(remaining, vec!["first", "third"]);
    }

    #[test]
    fn additional_questions_are_capped() {
        let mut store = FormStore::new();
        for i in 0..12 {
            store.apply(FormOp::AddAdditionalQuestion { question: format!("q{i}") });
        }
        assert_eq!(store.entry().additional_questions.len(), ADDITIONAL_QUESTIONS_MAX);
    }

    #[test]
    fn only_custom_reflection_questions_can_be_removed() {
        let mut store = FormStore::new();
        let seeded = store.entry().schema_reflection.questions.len();
        store.apply(FormOp::RemoveReflectionQuestion { index: 0 });
        assert_eq!(store.entry().schema_reflection.questions.len(), seeded);

        store.apply(FormOp::AddCustomReflectionQuestion {
            question: "What would rest look like?".to_string(),
        });
        store.apply(FormOp::RemoveReflectionQuestion { index: seeded });
        assert_eq!(store.entry().schema_reflection.questions.len(), seeded);
    }

    #[test]
    fn emotion_updates_route_to_the_right_set() {
        let mut store = FormStore::new();
        store.apply(FormOp::SetInitialEmotion { emotion: EmotionKind::Shame, intensity: 6 });
        store.apply(FormOp::SetFinalEmotion { emotion: EmotionKind::Shame, intensity: 2 });
        assert_eq!(store.entry().initial_emotions.shame, 6);
        assert_eq!(store.entry().final_emotions.shame, 2);
    }

    #[test]
    fn out_of_bounds_updates_are_ignored() {
        let mut store = FormStore::new();
        store.apply(FormOp::UpdateAutomaticThought {
            index: 3,
            thought: "stale".to_string(),
            credibility: 1,
        });
        assert!(store.entry().automatic_thoughts.is_empty());
    }
}
