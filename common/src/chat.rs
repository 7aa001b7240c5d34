//! メンタルヘルスチャットの会話履歴
//!
//! 履歴は追加のみで、送信順に並ぶ。永続化はしない。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// ペルソナのシステムプロンプト
pub const CHAT_SYSTEM_PROMPT: &str =
    "You are Dr. Well Being, a mental health assistant. Provide supportive, empathetic responses.";

/// 会話開始時のアシスタントメッセージ
pub const CHAT_WELCOME: &str = "Hello! I'm your mental health assistant. I'm here to listen and provide support. How are you feeling today?";

/// 外部呼び出しが失敗したときの返答
pub const CHAT_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

/// 空の返答が返ってきたときの返答
pub const CHAT_EMPTY_REPLY: &str = "I'm having trouble understanding. Can you rephrase that?";

/// サンプリングパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// 表示用の時刻（HH:MM）
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    /// ウェルカムメッセージ入りの履歴
    pub fn new() -> Self {
        let mut transcript = Self::empty();
        transcript.push_assistant(CHAT_WELCOME);
        transcript
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 0,
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(Sender::User, text.into())
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(Sender::Assistant, text.into())
    }

    fn push(&mut self, sender: Sender, text: String) -> &ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: Local::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
