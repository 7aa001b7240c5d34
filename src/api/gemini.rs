//! Gemini API連携（眼画像解析）
//!
//! 眼画像を1枚または左右2枚送り、病名だけを返させる。
//! 「No eye detected」の判定はこのモジュールで1度だけ行い、
//! 以降は [`Detection::NotDetected`] として扱う。

use super::Classifier;
use crate::error::{HealthAiError, Result};
use async_trait::async_trait;
use health_ai_common::{build_eye_prompt, Detection, UploadedImage, NO_EYE_DETECTED};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// 最初の候補のテキスト部分を連結して返す
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

/// プロンプトと画像からリクエストを組み立てる
pub fn build_request(prompt: &str, images: &[UploadedImage]) -> GeminiRequest {
    let mut parts = vec![Part::Text {
        text: prompt.to_string(),
    }];

    for image in images {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.base64_data(),
            },
        });
    }

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig { temperature: 0.1 },
    }
}

/// 眼画像解析の返答を検出結果に変換する
pub fn interpret_eye_reply(text: &str) -> Result<Detection> {
    let label = text.trim();
    if label.is_empty() {
        return Err(HealthAiError::ApiParse("Gemini returned an empty reply".into()));
    }

    if label
        .to_lowercase()
        .contains(&NO_EYE_DETECTED.to_lowercase())
    {
        return Ok(Detection::NotDetected);
    }

    Ok(Detection::condition(label, None))
}

pub struct GeminiEyeClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiEyeClassifier {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(HealthAiError::MissingApiKey("Gemini APIキー"));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: GEMINI_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// モデル一覧のベースURLを差し替える（ローカルのテストサーバー等）
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    async fn generate(&self, request: &GeminiRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(
                "x-goog-api-key",
                HeaderValue::from_str(&self.api_key)
                    .map_err(|e| HealthAiError::Config(format!("APIキーが不正です: {}", e)))?,
            )
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let truncated: String = body.chars().take(200).collect();
            return Err(HealthAiError::ApiCall(format!(
                "Gemini API error {}: {}",
                status, truncated
            )));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        gemini_response
            .text()
            .ok_or_else(|| HealthAiError::ApiParse("Gemini response has no candidates".into()))
    }
}

#[async_trait]
impl Classifier for GeminiEyeClassifier {
    async fn classify(&self, images: &[UploadedImage]) -> Result<Detection> {
        let prompt = build_eye_prompt(images.len());
        let request = build_request(&prompt, images);

        debug!(model = %self.model, images = images.len(), "Gemini eye analysis");
        let text = self.generate(&request).await?;
        debug!(reply = %text.trim(), "Gemini response");

        interpret_eye_reply(&text)
    }
}
