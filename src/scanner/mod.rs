//! 画像ファイルの読み込み
//!
//! 拡張子から宣言MIMEタイプを決め、検証前の候補として返す。
//! 画像かどうかの判定は `AnalysisSession` 側の検証に任せる。

use crate::error::{HealthAiError, Result};
use health_ai_common::UploadCandidate;
use std::path::Path;

const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// 拡張子からMIMEタイプを推定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension() else {
        return FALLBACK_MIME;
    };
    let ext = ext.to_string_lossy().to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

pub fn load_candidate(path: &Path) -> Result<UploadCandidate> {
    if !path.is_file() {
        return Err(HealthAiError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(UploadCandidate::new(file_name, mime_type_for(path), bytes))
}
