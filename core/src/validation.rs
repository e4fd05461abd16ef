//! Pure validation predicates over the diary entry.
//!
//! Validation results are data, never errors: submit-time checks return a
//! list of issues keyed by dotted field path so the navigation layer can
//! map each one back to its section.

use reframe_protocol::DiaryEntry;
use reframe_protocol::models::SCALE_MAX;

use crate::sections::SectionId;

/// Minimum length (in characters, trimmed) for the situation description.
pub const SITUATION_MIN_LEN: usize = 10;

/// One failed predicate, surfaced inline next to the field it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub section: SectionId,
    /// Dotted path into the aggregate, e.g. `automaticThoughts.2.credibility`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(section: SectionId, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { section, field: field.into(), message: message.into() }
    }
}

/// Live gating predicate for a single section.
///
/// Stricter than submit-time validation for the schema section: gating
/// treats it as done only once a schema mode is selected, which keeps
/// validity aligned with 100% completion.
pub fn is_section_valid(section: SectionId, entry: &DiaryEntry) -> bool {
    match section {
        SectionId::Situation => entry.situation.trim().chars().count() >= SITUATION_MIN_LEN,
        SectionId::Emotions => entry.initial_emotions.is_recorded(),
        SectionId::Thoughts => entry
            .automatic_thoughts
            .iter()
            .any(|t| !t.thought.trim().is_empty()),
        SectionId::Schema => {
            !entry.core_belief_text.trim().is_empty()
                && entry.schema_modes.iter().any(|m| m.selected)
        }
        SectionId::Challenge => entry
            .challenge_questions
            .iter()
            .any(|q| !q.answer.trim().is_empty()),
        // Optional sections never gate.
        SectionId::Reflection | SectionId::Results => true,
    }
}

/// Submit-time validation across all required sections, in section order.
pub fn validate_entry(entry: &DiaryEntry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if entry.situation.trim().chars().count() < SITUATION_MIN_LEN {
        issues.push(ValidationIssue::new(
            SectionId::Situation,
            "situation",
            format!("describe the situation in at least {SITUATION_MIN_LEN} characters"),
        ));
    }

    if !entry.initial_emotions.is_recorded() {
        issues.push(ValidationIssue::new(
            SectionId::Emotions,
            "initialEmotions",
            "record at least one emotion, or name your own",
        ));
    }

    if !entry
        .automatic_thoughts
        .iter()
        .any(|t| !t.thought.trim().is_empty())
    {
        issues.push(ValidationIssue::new(
            SectionId::Thoughts,
            "automaticThoughts",
            "capture at least one automatic thought",
        ));
    }

    if entry.core_belief_text.trim().is_empty() {
        issues.push(ValidationIssue::new(
            SectionId::Schema,
            "coreBeliefText",
            "name the core belief behind the thoughts",
        ));
    }

    if !entry
        .challenge_questions
        .iter()
        .any(|q| !q.answer.trim().is_empty())
    {
        issues.push(ValidationIssue::new(
            SectionId::Challenge,
            "challengeQuestions",
            "answer at least one challenge question",
        ));
    }

    issues.extend(scale_range_issues(entry));
    issues
}

/// Out-of-range scales are reported, never silently clamped.
fn scale_range_issues(entry: &DiaryEntry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut check = |section: SectionId, field: String, value: u8| {
        if value > SCALE_MAX {
            issues.push(ValidationIssue::new(
                section,
                field,
                format!("value {value} is outside 0..={SCALE_MAX}"),
            ));
        }
    };

    for (prefix, section, set) in [
        ("initialEmotions", SectionId::Emotions, &entry.initial_emotions),
        ("finalEmotions", SectionId::Results, &entry.final_emotions),
    ] {
        for kind in reframe_protocol::EmotionKind::ALL {
            check(section, format!("{prefix}.{kind}"), set.get(kind));
        }
        if let Some(other) = &set.other {
            check(section, format!("{prefix}.other.intensity"), other.intensity);
        }
    }

    for (idx, thought) in entry.automatic_thoughts.iter().enumerate() {
        check(
            SectionId::Thoughts,
            format!("automaticThoughts.{idx}.credibility"),
            thought.credibility,
        );
    }
    check(
        SectionId::Schema,
        "coreBeliefCredibility".to_string(),
        entry.core_belief_credibility,
    );
    for (idx, mode) in entry.schema_modes.iter().enumerate() {
        if let Some(intensity) = mode.intensity {
            check(
                SectionId::Schema,
                format!("schemaModes.{idx}.intensity"),
                intensity,
            );
        }
    }
    for (idx, thought) in entry.rational_thoughts.iter().enumerate() {
        check(
            SectionId::Challenge,
            format!("rationalThoughts.{idx}.confidence"),
            thought.confidence,
        );
    }
    check(
        SectionId::Results,
        "originalThoughtCredibility".to_string(),
        entry.original_thought_credibility,
    );
    issues
}
