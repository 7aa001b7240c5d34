//! Gradio space HTTP API クライアント
//!
//! 呼び出しは3段階:
//! 1. `POST /gradio_api/upload` で画像をアップロードしてサーバー側パスを得る
//! 2. `POST /gradio_api/call/{api}` で `event_id` を得る
//! 3. `GET /gradio_api/call/{api}/{event_id}` のイベントストリームから結果を読む

use crate::error::{HealthAiError, Result};
use health_ai_common::UploadedImage;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Gradioのファイル参照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    pub path: String,
    #[serde(default)]
    pub orig_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub meta: FileMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    #[serde(rename = "_type")]
    pub kind: String,
}

impl FileData {
    pub fn uploaded(path: String, image: &UploadedImage) -> Self {
        Self {
            path,
            orig_name: Some(image.file_name.clone()),
            mime_type: Some(image.mime_type.clone()),
            meta: FileMeta {
                kind: "gradio.FileData".into(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventId {
    event_id: String,
}

/// "owner/space" をspaceのURLに変換（http(s)で始まる場合はそのまま）
pub fn space_url(space: &str) -> String {
    if space.starts_with("http://") || space.starts_with("https://") {
        return space.trim_end_matches('/').to_string();
    }

    let host: String = space
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '_' | '.' => '-',
            other => other,
        })
        .collect();
    format!("https://{}.hf.space", host)
}

/// イベントストリームから `complete` イベントのデータ配列を取り出す
pub fn parse_event_stream(body: &str) -> Result<Vec<Value>> {
    let mut event = "";
    let mut completed = None;

    for line in body.lines() {
        if let Some(name) = line.strip_prefix("event:") {
            event = name.trim();
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();
            match event {
                "complete" => {
                    let values: Vec<Value> = serde_json::from_str(data).map_err(|e| {
                        HealthAiError::ApiParse(format!("Gradio complete data: {}", e))
                    })?;
                    completed = Some(values);
                }
                "error" => {
                    return Err(HealthAiError::ApiCall(format!("Gradio error: {}", data)));
                }
                _ => {}
            }
        }
    }

    completed.ok_or_else(|| HealthAiError::ApiParse("Gradio stream ended without a result".into()))
}

pub struct GradioClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GradioClient {
    pub fn new(space: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: space_url(space),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// 画像をアップロードしてファイル参照を返す
    pub async fn upload(&self, image: &UploadedImage) -> Result<FileData> {
        let url = format!("{}/gradio_api/upload", self.base_url);
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().part("files", part);

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        let paths: Vec<String> = response.json().await?;
        let path = paths
            .into_iter()
            .next()
            .ok_or_else(|| HealthAiError::ApiParse("Gradio upload returned no path".into()))?;

        debug!(%path, "Gradio upload");
        Ok(FileData::uploaded(path, image))
    }

    /// エンドポイントを呼び出してデータ配列を返す
    pub async fn predict(&self, api_name: &str, data: Vec<Value>) -> Result<Vec<Value>> {
        let api_name = api_name.trim_start_matches('/');
        let url = format!("{}/gradio_api/call/{}", self.base_url, api_name);

        let response = self
            .authorize(self.client.post(&url))
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let EventId { event_id } = response.json::<EventId>().await?;

        debug!(%api_name, %event_id, "Gradio call queued");

        let response = self
            .authorize(self.client.get(format!("{}/{}", url, event_id)))
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        parse_event_stream(&body)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let truncated: String = body.chars().take(200).collect();
    Err(HealthAiError::ApiCall(format!(
        "Gradio API error {}: {}",
        status, truncated
    )))
}
