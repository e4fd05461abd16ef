//! Derived completion percentages.
//!
//! The partial-credit constants are product decisions carried over from the
//! shipped flow; they are configuration, not derived weights, and the
//! reflection weighting in particular must stay reproducible.

use reframe_protocol::DiaryEntry;

use crate::sections::SectionId;
use crate::validation::is_section_valid;

/// Schema section credit for a named core belief with no mode selected yet.
const SCHEMA_BELIEF_ONLY: u8 = 75;
/// Results section credit for recorded final emotions with no new-behaviors
/// text.
const RESULTS_EMOTIONS_ONLY: u8 = 60;
/// Results section credit for new-behaviors text with no final emotions;
/// the complement of the emotions-only share.
const RESULTS_BEHAVIORS_ONLY: u8 = 40;
/// Reflection blend: answered questions carry 70%, the self-assessment 30%.
const REFLECTION_QUESTION_WEIGHT: f64 = 0.7;
const REFLECTION_ASSESSMENT_WEIGHT: f64 = 0.3;

/// Completion of one section, in `[0, 100]`.
pub fn section_completion(section: SectionId, entry: &DiaryEntry) -> u8 {
    match section {
        SectionId::Situation | SectionId::Emotions | SectionId::Thoughts | SectionId::Challenge => {
            if is_section_valid(section, entry) { 100 } else { 0 }
        }
        SectionId::Schema => schema_completion(entry),
        SectionId::Reflection => reflection_completion(entry),
        SectionId::Results => results_completion(entry),
    }
}

/// Overall progress: rounded mean over all seven sections.
pub fn overall_progress(entry: &DiaryEntry) -> u8 {
    let total: u32 = SectionId::ALL
        .iter()
        .map(|s| u32::from(section_completion(*s, entry)))
        .sum();
    let mean = f64::from(total) / SectionId::ALL.len() as f64;
    mean.round() as u8
}

fn schema_completion(entry: &DiaryEntry) -> u8 {
    if entry.core_belief_text.trim().is_empty() {
        return 0;
    }
    if entry.schema_modes.iter().any(|m| m.selected) {
        100
    } else {
        SCHEMA_BELIEF_ONLY
    }
}

fn results_completion(entry: &DiaryEntry) -> u8 {
    let emotions = entry.final_emotions.is_recorded();
    let behaviors = !entry.new_behaviors.trim().is_empty();
    match (emotions, behaviors) {
        (true, true) => 100,
        (true, false) => RESULTS_EMOTIONS_ONLY,
        (false, true) => RESULTS_BEHAVIORS_ONLY,
        (false, false) => 0,
    }
}

fn reflection_completion(entry: &DiaryEntry) -> u8 {
    let reflection = &entry.schema_reflection;
    if !reflection.enabled {
        return 0;
    }
    let total = reflection.questions.len();
    let question_progress = if total == 0 {
        // No questions to answer: the question share is considered done.
        100.0
    } else {
        let answered = reflection
            .questions
            .iter()
            .filter(|q| !q.answer.trim().is_empty())
            .count();
        answered as f64 / total as f64 * 100.0
    };
    let assessment_progress = if reflection.self_assessment.trim().is_empty() {
        0.0
    } else {
        100.0
    };
    (question_progress * REFLECTION_QUESTION_WEIGHT
        + assessment_progress * REFLECTION_ASSESSMENT_WEIGHT)
        .round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reframe_protocol::EmotionKind;
    use reframe_protocol::Thought;

    #[test]
    fn empty_entry_has_zero_progress_everywhere() {
        let entry = DiaryEntry::default();
        for section in SectionId::ALL {
            assert_eq!(section_completion(section, &entry), 0, "{section}");
        }
        assert_eq!(overall_progress(&entry), 0);
    }

    #[test]
    fn completion_stays_within_bounds() {
        let mut entry = DiaryEntry::default();
        entry.situation = "a long enough situation text".to_string();
        entry.initial_emotions.set(EmotionKind::Fear, 10);
        entry.final_emotions.set(EmotionKind::Joy, 10);
        entry
            .automatic_thoughts
            .push(Thought { thought: "thought".to_string(), credibility: 10 });
        entry.core_belief_text = "belief".to_string();
        entry.schema_modes[0].selected = true;
        entry.challenge_questions[0].answer = "answer".to_string();
        entry.schema_reflection.enabled = true;
        entry.new_behaviors = "speak up earlier".to_string();
        for section in SectionId::ALL {
            assert!(section_completion(section, &entry) <= 100, "{section}");
        }
        assert!(overall_progress(&entry) <= 100);
    }

    #[test]
    fn required_section_validity_implies_full_completion() {
        let mut entry = DiaryEntry::default();
        entry.situation = "I froze during the presentation and everyone stared".to_string();
        entry.initial_emotions.set(EmotionKind::Anxiety, 8);
        entry
            .automatic_thoughts
            .push(Thought { thought: "I'm going to fail".to_string(), credibility: 9 });
        entry.core_belief_text = "I am not competent".to_string();
        entry.schema_modes[1].selected = true;
        entry.challenge_questions[0].answer = "evidence".to_string();
        for info in crate::sections::SECTIONS {
            if crate::sections::is_required(info.id) && is_section_valid(info.id, &entry) {
                assert_eq!(section_completion(info.id, &entry), 100, "{}", info.id);
            }
        }
    }

    #[test]
    fn schema_partial_credit_for_belief_without_mode() {
        let mut entry = DiaryEntry::default();
        entry.core_belief_text = "I am not competent".to_string();
        assert_eq!(section_completion(SectionId::Schema, &entry), 75);
        entry.schema_modes[0].selected = true;
        assert_eq!(section_completion(SectionId::Schema, &entry), 100);
    }

    #[test]
    fn results_partial_credit_for_emotions_without_behaviors() {
        let mut entry = DiaryEntry::default();
        entry.final_emotions.set(EmotionKind::Joy, 4);
        assert_eq!(section_completion(SectionId::Results, &entry), 60);
        entry.new_behaviors = "take one question at a time".to_string();
        assert_eq!(section_completion(SectionId::Results, &entry), 100);
    }

    #[test]
    fn reflection_weighting_half_answered_with_assessment() {
        let mut entry = DiaryEntry::default();
        entry.schema_reflection.enabled = true;
        assert_eq!(entry.schema_reflection.questions.len(), 8);
        for question in entry.schema_reflection.questions.iter_mut().take(4) {
            question.answer = "yes, this fits".to_string();
        }
        entry.schema_reflection.self_assessment = "the abandonment schema was loud".to_string();
        // round(4/8 * 100 * 0.7 + 100 * 0.3) == 65
        assert_eq!(section_completion(SectionId::Reflection, &entry), 65);
    }

    #[test]
    fn reflection_disabled_scores_zero_even_with_answers() {
        let mut entry = DiaryEntry::default();
        entry.schema_reflection.self_assessment = "ignored while disabled".to_string();
        assert_eq!(section_completion(SectionId::Reflection, &entry), 0);
    }

    #[test]
    fn early_session_overall_progress() {
        let mut entry = DiaryEntry::default();
        entry.situation = "I froze during the presentation and everyone stared".to_string();
        entry.initial_emotions.set(EmotionKind::Anxiety, 8);
        entry
            .automatic_thoughts
            .push(Thought { thought: "I'm going to fail".to_string(), credibility: 9 });
        entry.core_belief_text = "I am not competent".to_string();
        entry.core_belief_credibility = 7;
        // Three sections complete, schema at partial credit:
        // round((100 + 100 + 100 + 75 + 0 + 0 + 0) / 7) == 54
        assert_eq!(overall_progress(&entry), 54);
    }
}
