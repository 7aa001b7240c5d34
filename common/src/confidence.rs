//! ラベル埋め込み信頼度のパーサー
//!
//! 一部のモデルは `"Melanoma (92.5%)"` のように信頼度をラベル文字列に埋め込んで返す。
//! 書式はモデル側の都合で変わりうるため、解釈はこのモジュールに閉じ込める。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// パターンに一致しない場合の信頼度（%）
pub const DEFAULT_CONFIDENCE: f32 = 90.0;

/// 疾患名と信頼度（%）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledConfidence {
    pub name: String,
    pub confidence: f32,
}

/// `"<name> (<number>%)"` 形式を分解する
///
/// 一致しなければ入力全体を名前とし、信頼度は [`DEFAULT_CONFIDENCE`]。
///
/// # Examples
/// ```
/// use health_ai_common::parse_labeled_confidence;
///
/// let parsed = parse_labeled_confidence("Melanoma (92.5%)");
/// assert_eq!(parsed.name, "Melanoma");
/// assert_eq!(parsed.confidence, 92.5);
/// ```
pub fn parse_labeled_confidence(text: &str) -> LabeledConfidence {
    lazy_static::lazy_static! {
        static ref LABEL_RE: Regex = Regex::new(r"(.+?)\s*\((\d+\.?\d*)%\)").unwrap();
    }

    let parsed = LABEL_RE.captures(text).and_then(|caps| {
        let name = caps.get(1)?.as_str();
        let confidence = caps.get(2)?.as_str().parse::<f32>().ok()?;
        Some((name, confidence))
    });

    match parsed {
        Some((name, confidence)) => LabeledConfidence {
            name: name.to_string(),
            confidence,
        },
        None => LabeledConfidence {
            name: text.to_string(),
            confidence: DEFAULT_CONFIDENCE,
        },
    }
}
