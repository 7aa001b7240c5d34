//! ユーザー向け通知メッセージ

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// MIMEタイプが画像ではない
    #[error("Please select an image file.")]
    NotAnImage,

    #[error("Please select an image first.")]
    SelectImage,

    /// 眼画像解析で画像が未選択
    #[error("Please select an eye image.")]
    SelectEyeImage,

    #[error("Please select both left and right eye images.")]
    SelectBothEyes,

    /// 単一画像の解析で右眼を指定した
    #[error("This analysis accepts a single image.")]
    SingleImageOnly,

    #[error("An analysis is already in progress.")]
    AnalysisInProgress,

    #[error("Analysis completed successfully!")]
    AnalysisCompleted,

    #[error("No eye detected in the image. Please upload a clearer eye image.")]
    NoEyeDetected,

    #[error("Analysis failed. Please try again.")]
    AnalysisFailed,
}

impl Notice {
    /// 成功通知以外はエラー扱い
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::AnalysisCompleted)
    }
}
