//! The section catalog: the single source of truth consumed by the
//! navigation controller, the validator and the progress calculator.

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

/// One page of the multi-step flow, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectionId {
    Situation,
    Emotions,
    Thoughts,
    Schema,
    Challenge,
    Reflection,
    Results,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Situation,
        SectionId::Emotions,
        SectionId::Thoughts,
        SectionId::Schema,
        SectionId::Challenge,
        SectionId::Reflection,
        SectionId::Results,
    ];

    /// Zero-based position in the flow.
    pub fn index(self) -> usize {
        match self {
            SectionId::Situation => 0,
            SectionId::Emotions => 1,
            SectionId::Thoughts => 2,
            SectionId::Schema => 3,
            SectionId::Challenge => 4,
            SectionId::Reflection => 5,
            SectionId::Results => 6,
        }
    }

    /// Map the number-key row (1..=7) to a section for direct jumps.
    pub fn from_digit(digit: u8) -> Option<SectionId> {
        let idx = usize::from(digit.checked_sub(1)?);
        SectionId::ALL.get(idx).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Situation => "Situation",
            SectionId::Emotions => "Emotions",
            SectionId::Thoughts => "Automatic thoughts",
            SectionId::Schema => "Core belief & schema",
            SectionId::Challenge => "Challenge",
            SectionId::Reflection => "Schema reflection",
            SectionId::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    pub id: SectionId,
    /// Required sections must pass validation before submit; optional ones
    /// only contribute to progress.
    pub required: bool,
}

pub const SECTIONS: [SectionInfo; 7] = [
    SectionInfo { id: SectionId::Situation, required: true },
    SectionInfo { id: SectionId::Emotions, required: true },
    SectionInfo { id: SectionId::Thoughts, required: true },
    SectionInfo { id: SectionId::Schema, required: true },
    SectionInfo { id: SectionId::Challenge, required: true },
    SectionInfo { id: SectionId::Reflection, required: false },
    SectionInfo { id: SectionId::Results, required: false },
];

pub fn is_required(id: SectionId) -> bool {
    SECTIONS[id.index()].required
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_order_matches_indices() {
        for (idx, info) in SECTIONS.iter().enumerate() {
            assert_eq!(info.id.index(), idx);
            assert_eq!(SectionId::ALL[idx], info.id);
        }
    }

    #[test]
    fn digit_jumps_cover_the_whole_flow() {
        assert_eq!(SectionId::from_digit(1), Some(SectionId::Situation));
        assert_eq!(SectionId::from_digit(7), Some(SectionId::Results));
        assert_eq!(SectionId::from_digit(0), None);
        assert_eq!(SectionId::from_digit(8), None);
    }

    #[test]
    fn ids_serialize_as_stable_snake_case() {
        assert_eq!(SectionId::Reflection.to_string(), "reflection");
        assert_eq!(
            serde_json::to_string(&SectionId::Situation).unwrap_or_default(),
            "\"situation\""
        );
    }
}
