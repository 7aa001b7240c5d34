//! 外部推論サービスとの境界
//!
//! 能力ごとにバックエンドを1つに固定する:
//! - 皮膚: Gradio space（ラベル文字列またはLabel形式）
//! - 眼: Gemini generateContent（1枚または左右2枚）
//! - チャット: Gradio space

pub mod gemini;
pub mod gradio;
pub mod mental_health;
pub mod skin;

pub use gemini::GeminiEyeClassifier;
pub use gradio::{FileData, GradioClient};
pub use mental_health::GradioChatBackend;
pub use skin::{GradioSkinClassifier, SkinPrediction};

use crate::error::Result;
use async_trait::async_trait;
use health_ai_common::{ChatParams, Detection, UploadedImage};

/// 画像分類サービス
#[async_trait]
pub trait Classifier: Send + Sync {
    /// 画像を送信し、検出結果を返す（左右ペアの場合は左、右の順）
    async fn classify(&self, images: &[UploadedImage]) -> Result<Detection>;
}

/// 対話サービス
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// 返答テキストを返す（空文字の場合もある）
    async fn reply(&self, message: &str, system_prompt: &str, params: &ChatParams) -> Result<String>;
}
