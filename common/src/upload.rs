//! アップロード画像の検証
//!
//! 宣言されたMIMEタイプが `image/` で始まるものだけを受け付ける。
//! 中身（マジックバイト）は見ないため、MIMEを偽った非画像ファイルは通過する。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use thiserror::Error;

/// 検証済みの画像
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Base64エンコードした画像データ
    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// プレビュー表示用のData URL（"data:image/jpeg;base64,..."）
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// バイト列はログに出さない
impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select an image file.")]
    NotAnImage { file_name: String, mime_type: String },
}

/// 選択されたが未検証のファイル
#[derive(Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn validate(self) -> std::result::Result<UploadedImage, UploadError> {
        if !is_image_mime(&self.mime_type) {
            return Err(UploadError::NotAnImage {
                file_name: self.file_name,
                mime_type: self.mime_type,
            });
        }

        Ok(UploadedImage {
            file_name: self.file_name,
            mime_type: self.mime_type,
            bytes: self.bytes,
        })
    }
}

impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIMEタイプが画像かどうか
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// 候補ファイルを検証して [`UploadedImage`] を作る
pub fn validate_image(
    file_name: impl Into<String>,
    mime_type: impl Into<String>,
    bytes: Vec<u8>,
) -> std::result::Result<UploadedImage, UploadError> {
    UploadCandidate::new(file_name, mime_type, bytes).validate()
}
