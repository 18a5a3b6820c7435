use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// User messages carry plain text; bot messages carry the structured answer.
/// Serialized forms are a bare JSON string and `{"openai": ...}`, the same
/// shapes archives written under the `chatHistory` key have always used.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Answer { openai: String },
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Answer { .. } => None,
        }
    }

    pub fn as_answer(&self) -> Option<&str> {
        match self {
            Content::Text(_) => None,
            Content::Answer { openai } => Some(openai),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceExcerpt {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub content_excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SourceSet {
    #[serde(default)]
    pub openai: Vec<SourceExcerpt>,
}

/// Backends attach more fields to a matched feedback than we render; the
/// flattened map keeps them so an archive re-save loses nothing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    pub question_asked: String,
    #[serde(default)]
    pub helpful_feedback: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchedFeedback {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub payload: FeedbackPayload,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedbacks: Option<Vec<MatchedFeedback>>,
}

impl Message {
    pub fn user(text: String) -> Self {
        Message {
            role: Role::User,
            content: Content::Text(text),
            sources: None,
            feedbacks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    /// A persistable record of the exchange list as it stands right now.
    /// Title and timestamp are derived fields, recomputed on every save.
    pub fn snapshot(id: &str, messages: &[Message]) -> Self {
        Conversation {
            id: id.to_owned(),
            title: derive_title(id, messages),
            messages: messages.to_vec(),
            timestamp: Utc::now(),
        }
    }
}

const TITLE_LENGTH: usize = 20;

fn derive_title(id: &str, messages: &[Message]) -> String {
    match messages.first().and_then(|m| m.content.as_text()) {
        Some(text) => text.chars().take(TITLE_LENGTH).collect(),
        None => format!("Chat {id}"),
    }
}

/// Millisecond-timestamp conversation ids, matching the ids in archives
/// written before this client existed.
pub fn fresh_id() -> String {
    format!("{}", js_sys::Date::now() as u64)
}

/// Which main pane the sidebar has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Feedback,
}
