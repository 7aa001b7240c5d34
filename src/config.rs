use crate::error::{HealthAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const HF_TOKEN_ENV: &str = "HF_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    /// Hugging Face のBearerトークン（Gradio space用）
    pub hf_token: Option<String>,
    pub gemini_model: String,
    pub skin_space: String,
    pub chat_space: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            hf_token: None,
            gemini_model: "gemini-2.0-flash".into(),
            skin_space: "pant-pragyan10/skin-disease-detection".into(),
            chat_space: "hrutikkharjul/Mental-health-chatbot".into(),
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HealthAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("health-ai").join("config.json"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn gemini_api_key(&self) -> Result<String> {
        // 環境変数を優先
        env_or(GEMINI_API_KEY_ENV, self.gemini_api_key.as_deref())
            .ok_or(HealthAiError::MissingApiKey("Gemini APIキー"))
    }

    /// Hugging Face トークン（未設定なら匿名でアクセス）
    pub fn hf_token(&self) -> Option<String> {
        env_or(HF_TOKEN_ENV, self.hf_token.as_deref())
    }

    // 保存は呼び出し側で `save` / `save_to` を行う

    pub fn set_gemini_api_key(&mut self, key: &str) {
        self.gemini_api_key = Some(key.trim().to_string());
    }

    pub fn set_hf_token(&mut self, token: &str) {
        self.hf_token = Some(token.trim().to_string());
    }

    pub fn clear_hf_token(&mut self) {
        self.hf_token = None;
    }
}

fn env_or(var: &str, fallback: Option<&str>) -> Option<String> {
    if let Ok(value) = std::env::var(var) {
        let value = value.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    fallback
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
