use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{0}が設定されていません。`health-ai config --help` を参照して設定してください")]
    MissingApiKey(&'static str),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Common(#[from] health_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, HealthAiError>;
