//! Types used to communicate between the diary flow engine and its
//! embedders.
//!
//! This crate deliberately contains only plain data definitions plus their
//! serde derives. Validation, progress, persistence and navigation live in
//! `reframe-core`; nothing here performs I/O.

pub mod models;
pub mod ops;

pub use models::AdditionalQuestion;
pub use models::ChallengeQuestion;
pub use models::DiaryEntry;
pub use models::EmotionKind;
pub use models::EmotionSet;
pub use models::OtherEmotion;
pub use models::RationalThought;
pub use models::ReflectionCategory;
pub use models::ReflectionQuestion;
pub use models::SchemaMode;
pub use models::SchemaModeState;
pub use models::SchemaReflection;
pub use models::Thought;
pub use ops::FormOp;
