//! 解析セッションと分類器をつなぐ非同期ドライバ

use crate::api::Classifier;
use health_ai_common::{AnalysisOutcome, AnalysisSession, Notice};
use tracing::{debug, warn};

/// 1回分の解析を実行する
///
/// 画像が揃っていない等の場合は外部呼び出しをせずに通知を返す。
/// 外部呼び出しの失敗は `AnalysisOutcome::Failed` として返し、再試行はしない。
pub async fn run_analysis<C>(
    session: &mut AnalysisSession,
    classifier: &C,
) -> Result<AnalysisOutcome, Notice>
where
    C: Classifier + ?Sized,
{
    let ticket = session.begin()?;
    debug!(category = %ticket.category(), images = ticket.images().len(), "解析開始");

    let detection = classifier
        .classify(ticket.images())
        .await
        .map_err(|e| {
            warn!(error = %e, "解析に失敗");
            e.to_string()
        });

    // セッションを可変借用したままなので、ここで世代が変わることはない
    session
        .finish(ticket, detection)
        .cloned()
        .ok_or(Notice::AnalysisFailed)
}
