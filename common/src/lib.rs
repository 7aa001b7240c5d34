//! Health AI Common Library
//!
//! CLIと他のフロントエンドで共有される型とユーティリティ

pub mod analysis;
pub mod chat;
pub mod condition;
pub mod confidence;
pub mod error;
pub mod notice;
pub mod prompts;
pub mod session;
pub mod upload;

pub use analysis::{AnalysisOutcome, AnalysisResult, Detection};
pub use chat::{ChatMessage, ChatParams, ChatTranscript, Sender};
pub use condition::{conditions, find_condition, lookup_condition, Category, ConditionRecord, FALLBACK_CONDITION};
pub use confidence::{parse_labeled_confidence, LabeledConfidence, DEFAULT_CONFIDENCE};
pub use error::{Error, Result};
pub use notice::Notice;
pub use prompts::{build_eye_prompt, NO_EYE_DETECTED};
pub use session::{AnalysisSession, AnalysisTicket, EyeSide};
pub use upload::{is_image_mime, validate_image, UploadCandidate, UploadError, UploadedImage};
