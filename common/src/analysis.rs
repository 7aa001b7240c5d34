//! 解析結果の型定義
//!
//! - Detection: 外部サービス境界で確定させるタグ付き結果
//! - AnalysisResult: 疾患情報テーブルで正規化した結果
//! - AnalysisOutcome: 1回の解析呼び出しの最終状態

use crate::condition::{find_condition, lookup_condition, Category};
use crate::error::Result;
use crate::notice::Notice;
use serde::{Deserialize, Serialize};

/// 分類器が返す結果
///
/// 「検出なし」は文字列ではなくこの型で表現し、下流で再解釈しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Detection {
    Condition {
        label: String,
        /// 信頼度（%）。返さないバックエンドもある
        #[serde(default)]
        confidence: Option<f32>,
    },
    NotDetected,
}

impl Detection {
    pub fn condition(label: impl Into<String>, confidence: Option<f32>) -> Self {
        Detection::Condition {
            label: label.into(),
            confidence,
        }
    }
}

/// 正規化済みの解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub condition: String,
    pub category: Category,
    pub description: String,
    pub symptoms: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// テーブルに登録済みの疾患か（false ならプレースホルダ情報）
    pub recognized: bool,
}

impl AnalysisResult {
    /// ラベルを疾患情報テーブルで解決する
    pub fn resolve(label: &str, category: Category, confidence: Option<f32>) -> Self {
        let record = lookup_condition(label, category);

        Self {
            condition: label.trim().to_string(),
            category,
            description: record.description.to_string(),
            symptoms: record.symptoms.iter().map(|s| s.to_string()).collect(),
            recommendations: record.recommendations.iter().map(|s| s.to_string()).collect(),
            confidence,
            recognized: find_condition(label, category).is_some(),
        }
    }
}

/// 解析1回分の最終状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AnalysisOutcome {
    Found(AnalysisResult),
    NotDetected,
    Failed { reason: String },
}

impl AnalysisOutcome {
    pub fn from_detection(
        detection: std::result::Result<Detection, String>,
        category: Category,
    ) -> Self {
        match detection {
            Ok(Detection::Condition { label, confidence }) => {
                AnalysisOutcome::Found(AnalysisResult::resolve(&label, category, confidence))
            }
            Ok(Detection::NotDetected) => AnalysisOutcome::NotDetected,
            Err(reason) => AnalysisOutcome::Failed { reason },
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    /// 結果に対応する通知
    pub fn notice(&self) -> Notice {
        match self {
            AnalysisOutcome::Found(_) => Notice::AnalysisCompleted,
            AnalysisOutcome::NotDetected => Notice::NoEyeDetected,
            AnalysisOutcome::Failed { .. } => Notice::AnalysisFailed,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
