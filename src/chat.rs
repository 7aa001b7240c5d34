//! チャット送信
//!
//! ユーザーのメッセージを先に履歴へ追加し、返答（または定型文）を
//! 1件だけ追加する。

use crate::api::ChatBackend;
use health_ai_common::chat::{CHAT_APOLOGY, CHAT_EMPTY_REPLY, CHAT_SYSTEM_PROMPT};
use health_ai_common::{ChatMessage, ChatParams, ChatTranscript};
use tracing::{debug, warn};

/// メッセージを送信し、追加されたアシスタントのメッセージを返す
///
/// 空白のみの入力は無視して `None` を返す。
/// 返答は空文字の場合のみ定型文に置き換え、それ以外はそのまま追加する。
pub async fn send_message<'a, B>(
    transcript: &'a mut ChatTranscript,
    backend: &B,
    text: &str,
) -> Option<&'a ChatMessage>
where
    B: ChatBackend + ?Sized,
{
    if text.trim().is_empty() {
        return None;
    }

    transcript.push_user(text);

    let reply = match backend
        .reply(text, CHAT_SYSTEM_PROMPT, &ChatParams::default())
        .await
    {
        Ok(reply) if reply.is_empty() => {
            debug!("空の返答");
            CHAT_EMPTY_REPLY.to_string()
        }
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "チャット返答の取得に失敗");
            CHAT_APOLOGY.to_string()
        }
    };

    Some(transcript.push_assistant(reply))
}
