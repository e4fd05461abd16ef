//! Mutations accepted by the form state store.
//!
//! Every edit the embedding UI can make is one variant here, so a draft
//! replay, an undo log or a test can describe edits as data instead of
//! reaching into the aggregate.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::models::EmotionKind;
use crate::models::SchemaMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormOp {
    SetDate {
        date: DateTime<Utc>,
    },
    SetSituation {
        text: String,
    },
    SetInitialEmotion {
        emotion: EmotionKind,
        intensity: u8,
    },
    SetInitialOtherEmotion {
        name: String,
        intensity: u8,
    },
    ClearInitialOtherEmotion,
    SetFinalEmotion {
        emotion: EmotionKind,
        intensity: u8,
    },
    SetFinalOtherEmotion {
        name: String,
        intensity: u8,
    },
    ClearFinalOtherEmotion,
    AddAutomaticThought,
    UpdateAutomaticThought {
        index: usize,
        thought: String,
        credibility: u8,
    },
    RemoveAutomaticThought {
        index: usize,
    },
    SetCoreBelief {
        text: String,
        credibility: u8,
    },
    SetConfirmingBehaviors {
        text: String,
    },
    SetAvoidantBehaviors {
        text: String,
    },
    SetOverridingBehaviors {
        text: String,
    },
    SetSchemaMode {
        mode: SchemaMode,
        selected: bool,
        intensity: Option<u8>,
    },
    AnswerChallengeQuestion {
        index: usize,
        answer: String,
    },
    AddAdditionalQuestion {
        question: String,
    },
    UpdateAdditionalQuestion {
        index: usize,
        question: String,
        answer: String,
    },
    RemoveAdditionalQuestion {
        index: usize,
    },
    AddRationalThought,
    UpdateRationalThought {
        index: usize,
        thought: String,
        confidence: u8,
    },
    RemoveRationalThought {
        index: usize,
    },
    AddAlternativeResponse,
    UpdateAlternativeResponse {
        index: usize,
        response: String,
    },
    RemoveAlternativeResponse {
        index: usize,
    },
    SetReflectionEnabled {
        enabled: bool,
    },
    SetReflectionSelfAssessment {
        text: String,
    },
    AnswerReflectionQuestion {
        index: usize,
        answer: String,
    },
    AddCustomReflectionQuestion {
        question: String,
    },
    RemoveReflectionQuestion {
        index: usize,
    },
    SetNewBehaviors {
        text: String,
    },
    SetOriginalThoughtCredibility {
        credibility: u8,
    },
}
