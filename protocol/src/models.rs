//! The diary entry aggregate and its component types.
//!
//! Field names serialize in camelCase so a persisted draft matches the
//! shape the web client wrote and reads back.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use uuid::Uuid;

/// Intensity, credibility and confidence scales all share the same range.
pub const SCALE_MAX: u8 = 10;

/// Upper bound on user-authored challenge questions.
pub const ADDITIONAL_QUESTIONS_MAX: usize = 10;

/// The fixed set of named emotion scales tracked before and after the
/// exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmotionKind {
    Fear,
    Anger,
    Sadness,
    Joy,
    Anxiety,
    Shame,
    Guilt,
}

impl EmotionKind {
    pub const ALL: [EmotionKind; 7] = [
        EmotionKind::Fear,
        EmotionKind::Anger,
        EmotionKind::Sadness,
        EmotionKind::Joy,
        EmotionKind::Anxiety,
        EmotionKind::Shame,
        EmotionKind::Guilt,
    ];
}

/// A user-named emotion outside the fixed catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherEmotion {
    pub name: String,
    pub intensity: u8,
}

/// One full set of emotion intensities, each in `[0, SCALE_MAX]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSet {
    #[serde(default)]
    pub fear: u8,
    #[serde(default)]
    pub anger: u8,
    #[serde(default)]
    pub sadness: u8,
    #[serde(default)]
    pub joy: u8,
    #[serde(default)]
    pub anxiety: u8,
    #[serde(default)]
    pub shame: u8,
    #[serde(default)]
    pub guilt: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<OtherEmotion>,
}

impl EmotionSet {
    pub fn get(&self, kind: EmotionKind) -> u8 {
        match kind {
            EmotionKind::Fear => self.fear,
            EmotionKind::Anger => self.anger,
            EmotionKind::Sadness => self.sadness,
            EmotionKind::Joy => self.joy,
            EmotionKind::Anxiety => self.anxiety,
            EmotionKind::Shame => self.shame,
            EmotionKind::Guilt => self.guilt,
        }
    }

    pub fn set(&mut self, kind: EmotionKind, intensity: u8) {
        match kind {
            EmotionKind::Fear => self.fear = intensity,
            EmotionKind::Anger => self.anger = intensity,
            EmotionKind::Sadness => self.sadness = intensity,
            EmotionKind::Joy => self.joy = intensity,
            EmotionKind::Anxiety => self.anxiety = intensity,
            EmotionKind::Shame => self.shame = intensity,
            EmotionKind::Guilt => self.guilt = intensity,
        }
    }

    /// True when at least one named scale is nonzero, or a named "other"
    /// emotion carries a nonzero intensity. All-zero is incomplete rather
    /// than invalid.
    pub fn is_recorded(&self) -> bool {
        EmotionKind::ALL.iter().any(|k| self.get(*k) > 0)
            || self
                .other
                .as_ref()
                .is_some_and(|o| !o.name.trim().is_empty() && o.intensity > 0)
    }
}

/// An automatic thought with how believable it felt in the moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub thought: String,
    #[serde(default)]
    pub credibility: u8,
}

/// Named emotional/behavioral states from schema therapy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "title_case")]
pub enum SchemaMode {
    VulnerableChild,
    AngryChild,
    ImpulsiveChild,
    PunitiveParent,
    DemandingParent,
    DetachedProtector,
    CompliantSurrenderer,
    Overcompensator,
    HealthyAdult,
    HappyChild,
}

impl SchemaMode {
    pub const ALL: [SchemaMode; 10] = [
        SchemaMode::VulnerableChild,
        SchemaMode::AngryChild,
        SchemaMode::ImpulsiveChild,
        SchemaMode::PunitiveParent,
        SchemaMode::DemandingParent,
        SchemaMode::DetachedProtector,
        SchemaMode::CompliantSurrenderer,
        SchemaMode::Overcompensator,
        SchemaMode::HealthyAdult,
        SchemaMode::HappyChild,
    ];
}

/// Selection state for one catalog mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModeState {
    pub mode: SchemaMode,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
}

/// A system-provided challenge prompt with the user's free-text answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// A question the user authored themselves. Both halves are mutable and the
/// list is capped at [`ADDITIONAL_QUESTIONS_MAX`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationalThought {
    pub thought: String,
    #[serde(default)]
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReflectionCategory {
    Childhood,
    Schemas,
    Coping,
    Modes,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: ReflectionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

/// The optional schema-reflection sub-flow. Disabled by default; enabling
/// it unlocks the scored question set plus a self-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReflection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub self_assessment: String,
    #[serde(default)]
    pub questions: Vec<ReflectionQuestion>,
}

impl Default for SchemaReflection {
    fn default() -> Self {
        Self {
            enabled: false,
            self_assessment: String::new(),
            questions: default_reflection_questions(),
        }
    }
}

/// Root aggregate for one diary session. Created empty when the flow opens
/// (or hydrated from a persisted draft), mutated through
/// [`crate::ops::FormOp`], and destroyed on submission or explicit reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub initial_emotions: EmotionSet,
    #[serde(default)]
    pub final_emotions: EmotionSet,
    #[serde(default)]
    pub automatic_thoughts: Vec<Thought>,
    #[serde(default)]
    pub core_belief_text: String,
    #[serde(default)]
    pub core_belief_credibility: u8,
    #[serde(default)]
    pub confirming_behaviors: String,
    #[serde(default)]
    pub avoidant_behaviors: String,
    #[serde(default)]
    pub overriding_behaviors: String,
    #[serde(default = "default_schema_modes")]
    pub schema_modes: Vec<SchemaModeState>,
    #[serde(default = "default_challenge_questions")]
    pub challenge_questions: Vec<ChallengeQuestion>,
    #[serde(default)]
    pub additional_questions: Vec<AdditionalQuestion>,
    #[serde(default)]
    pub rational_thoughts: Vec<RationalThought>,
    #[serde(default)]
    pub alternative_responses: Vec<String>,
    #[serde(default)]
    pub schema_reflection: SchemaReflection,
    #[serde(default)]
    pub new_behaviors: String,
    #[serde(default)]
    pub original_thought_credibility: u8,
}

impl Default for DiaryEntry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            situation: String::new(),
            initial_emotions: EmotionSet::default(),
            final_emotions: EmotionSet::default(),
            automatic_thoughts: Vec::new(),
            core_belief_text: String::new(),
            core_belief_credibility: 0,
            confirming_behaviors: String::new(),
            avoidant_behaviors: String::new(),
            overriding_behaviors: String::new(),
            schema_modes: default_schema_modes(),
            challenge_questions: default_challenge_questions(),
            additional_questions: Vec::new(),
            rational_thoughts: Vec::new(),
            alternative_responses: Vec::new(),
            schema_reflection: SchemaReflection::default(),
            new_behaviors: String::new(),
            original_thought_credibility: 0,
        }
    }
}

impl DiaryEntry {
    /// All free text the user has typed, concatenated for the crisis
    /// content scanner.
    pub fn free_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.situation, &self.core_belief_text];
        parts.extend(self.automatic_thoughts.iter().map(|t| t.thought.as_str()));
        parts.extend(self.challenge_questions.iter().map(|q| q.answer.as_str()));
        parts.extend(
            self.additional_questions
                .iter()
                .flat_map(|q| [q.question.as_str(), q.answer.as_str()]),
        );
        parts.extend(self.rational_thoughts.iter().map(|t| t.thought.as_str()));
        parts.extend(self.alternative_responses.iter().map(String::as_str));
        parts.push(&self.schema_reflection.self_assessment);
        parts.extend(
            self.schema_reflection
                .questions
                .iter()
                .map(|q| q.answer.as_str()),
        );
        parts.push(&self.new_behaviors);
        parts
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn default_schema_modes() -> Vec<SchemaModeState> {
    SchemaMode::ALL
        .into_iter()
        .map(|mode| SchemaModeState { mode, selected: false, intensity: None })
        .collect()
}

pub fn default_challenge_questions() -> Vec<ChallengeQuestion> {
    [
        "What evidence supports this thought?",
        "What evidence speaks against it?",
        "How would you respond to a friend who had this thought?",
        "What is the worst that could realistically happen, and could you cope with it?",
        "Is there an alternative explanation for what happened?",
        "Will this still matter in five years?",
    ]
    .into_iter()
    .map(|question| ChallengeQuestion { question: question.to_string(), answer: String::new() })
    .collect()
}

pub fn default_reflection_questions() -> Vec<ReflectionQuestion> {
    let questions: [(&str, ReflectionCategory); 8] = [
        (
            "Does this situation remind you of experiences from your childhood?",
            ReflectionCategory::Childhood,
        ),
        (
            "Which early messages about yourself does it echo?",
            ReflectionCategory::Childhood,
        ),
        (
            "Which of your schemas feels activated right now?",
            ReflectionCategory::Schemas,
        ),
        (
            "How does the schema distort what you noticed in the situation?",
            ReflectionCategory::Schemas,
        ),
        (
            "How did you try to protect yourself in the moment?",
            ReflectionCategory::Coping,
        ),
        (
            "What did that coping strategy cost you?",
            ReflectionCategory::Coping,
        ),
        (
            "Which mode was speaking when the thought appeared?",
            ReflectionCategory::Modes,
        ),
        (
            "What would your Healthy Adult say instead?",
            ReflectionCategory::Modes,
        ),
    ];
    questions
        .into_iter()
        .map(|(question, category)| ReflectionQuestion {
            question: question.to_string(),
            answer: String::new(),
            category,
            is_required: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emotion_set_all_zero_is_not_recorded() {
        let set = EmotionSet::default();
        assert!(!set.is_recorded());
    }

    #[test]
    fn emotion_set_other_requires_name_and_intensity() {
        let mut set = EmotionSet::default();
        set.other = Some(OtherEmotion { name: String::new(), intensity: 5 });
        assert!(!set.is_recorded());
        set.other = Some(OtherEmotion { name: "dread".to_string(), intensity: 0 });
        assert!(!set.is_recorded());
        set.other = Some(OtherEmotion { name: "dread".to_string(), intensity: 5 });
        assert!(set.is_recorded());
    }

    #[test]
    fn entry_deserializes_with_defaults_for_missing_fields() -> anyhow::Result<()> {
        let json = format!(
            r#"{{"id":"{}","date":"2025-03-01T12:00:00Z","situation":"short"}}"#,
            Uuid::nil()
        );
        let entry: DiaryEntry = serde_json::from_str(&json)?;
        assert_eq!(entry.situation, "short");
        assert_eq!(entry.schema_modes.len(), SchemaMode::ALL.len());
        assert_eq!(entry.challenge_questions.len(), 6);
        assert!(!entry.schema_reflection.enabled);
        assert_eq!(entry.schema_reflection.questions.len(), 8);
        Ok(())
    }

    #[test]
    fn free_text_skips_blank_fields() {
        let mut entry = DiaryEntry::default();
        entry.situation = "team meeting".to_string();
        entry
            .automatic_thoughts
            .push(Thought { thought: "they think I'm slow".to_string(), credibility: 6 });
        let text = entry.free_text();
        assert_eq!(text, "team meeting\nthey think I'm slow");
    }
}
