//! メンタルヘルスチャット（Gradio space）

use super::gradio::GradioClient;
use super::ChatBackend;
use crate::error::{HealthAiError, Result};
use async_trait::async_trait;
use health_ai_common::ChatParams;
use serde_json::{json, Value};
use tracing::debug;

const CHAT_API: &str = "chat";

/// `/chat` のデータ配列: [message, system_message, max_tokens, temperature, top_p]
pub fn build_chat_data(message: &str, system_prompt: &str, params: &ChatParams) -> Vec<Value> {
    vec![
        json!(message),
        json!(system_prompt),
        json!(params.max_tokens),
        json!(params.temperature),
        json!(params.top_p),
    ]
}

/// データ配列の先頭を返答として取り出す（null/空は空文字）
pub fn extract_reply(data: Vec<Value>) -> Result<String> {
    match data.into_iter().next() {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(HealthAiError::ApiParse(format!(
            "unexpected chat reply: {}",
            other
        ))),
    }
}

pub struct GradioChatBackend {
    client: GradioClient,
}

impl GradioChatBackend {
    pub fn new(client: GradioClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatBackend for GradioChatBackend {
    async fn reply(&self, message: &str, system_prompt: &str, params: &ChatParams) -> Result<String> {
        debug!(space = %self.client.base_url(), chars = message.chars().count(), "Chat request");

        let data = self
            .client
            .predict(CHAT_API, build_chat_data(message, system_prompt, params))
            .await?;

        extract_reply(data)
    }
}
