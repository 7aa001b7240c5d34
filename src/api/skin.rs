//! 皮膚画像解析（Gradio space）
//!
//! モデルの出力は2通りある:
//! - 文字列: `"Melanoma (92.5%)"` のように信頼度が埋め込まれている場合がある
//! - Label形式: `{"label": ..., "confidences": [{"label": ..., "confidence": 0.92}]}`

use super::gradio::GradioClient;
use super::Classifier;
use crate::error::{HealthAiError, Result};
use async_trait::async_trait;
use health_ai_common::{parse_labeled_confidence, Detection, UploadedImage};
use serde::Deserialize;
use tracing::debug;

const PREDICT_API: &str = "predict";

/// 皮膚解析モデルの出力
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkinPrediction {
    Text(String),
    Label(LabelOutput),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelOutput {
    pub label: String,
    #[serde(default)]
    pub confidences: Vec<LabelConfidence>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelConfidence {
    pub label: String,
    /// 0.0〜1.0
    pub confidence: f32,
}

impl SkinPrediction {
    pub fn into_detection(self) -> Detection {
        match self {
            SkinPrediction::Text(text) => {
                let parsed = parse_labeled_confidence(&text);
                Detection::condition(parsed.name, Some(parsed.confidence))
            }
            SkinPrediction::Label(output) => {
                let confidence = output
                    .confidences
                    .iter()
                    .find(|c| c.label == output.label)
                    .map(|c| c.confidence * 100.0);
                Detection::condition(output.label, confidence)
            }
        }
    }
}

pub struct GradioSkinClassifier {
    client: GradioClient,
}

impl GradioSkinClassifier {
    pub fn new(client: GradioClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Classifier for GradioSkinClassifier {
    async fn classify(&self, images: &[UploadedImage]) -> Result<Detection> {
        let image = images
            .first()
            .ok_or_else(|| HealthAiError::ApiCall("no image to classify".into()))?;

        debug!(space = %self.client.base_url(), file = %image.file_name, "Skin analysis");

        let file = self.client.upload(image).await?;
        let data = self
            .client
            .predict(PREDICT_API, vec![serde_json::to_value(&file)?])
            .await?;

        let first = data
            .into_iter()
            .next()
            .ok_or_else(|| HealthAiError::ApiParse("skin model returned no data".into()))?;
        debug!(prediction = %first, "Skin model response");

        let prediction: SkinPrediction = serde_json::from_value(first)
            .map_err(|e| HealthAiError::ApiParse(format!("unexpected skin prediction: {}", e)))?;

        Ok(prediction.into_detection())
    }
}
