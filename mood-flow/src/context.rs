use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single entry of the conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Append-only conversation transcript.
///
/// Ids start at 1 and increase by one per appended message. Nothing is ever
/// edited or removed; a conversation is discarded by dropping the whole
/// context.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn push(&mut self, role: MessageRole, text: String) -> ChatMessage {
        let message = ChatMessage {
            id: self.messages.len() as u64 + 1,
            text,
            role,
            created_at: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Context shared by the tasks of one session.
///
/// Cloning is cheap and every clone observes the same data, so the
/// transcript can be read while a task is still running.
#[derive(Clone, Debug, Default)]
pub struct Context {
    data: Arc<DashMap<String, Value>>,
    transcript: Arc<RwLock<Transcript>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: impl Into<String>, value: impl Serialize) {
        self.set_sync(key, value);
    }

    /// Synchronous variant of [`Context::set`], usable from edge conditions
    pub fn set_sync(&self, key: impl Into<String>, value: impl Serialize) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.data.insert(key, value);
            }
            Err(e) => warn!(key = %key, "Dropping context value that failed to serialize: {}", e),
        }
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_sync(key)
    }

    pub fn get_sync<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.data.remove(key).map(|(_, v)| v)
    }

    pub async fn add_user_message(&self, text: String) -> ChatMessage {
        self.transcript.write().await.push(MessageRole::User, text)
    }

    pub async fn add_assistant_message(&self, text: String) -> ChatMessage {
        self.transcript
            .write()
            .await
            .push(MessageRole::Assistant, text)
    }

    pub async fn get_all_messages(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.messages().to_vec()
    }

    pub async fn get_last_messages(&self, n: usize) -> Vec<ChatMessage> {
        let transcript = self.transcript.read().await;
        let messages = transcript.messages();
        messages[messages.len().saturating_sub(n)..].to_vec()
    }

    pub async fn message_count(&self) -> usize {
        self.transcript.read().await.len()
    }
}
