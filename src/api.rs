use crate::sanitize::clean;
use crate::state::{Content, MatchedFeedback, Message, Role, SourceExcerpt, SourceSet};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://stacbot-be.onrender.com/";

fn api_base() -> &'static str {
    option_env!("STACBOT_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

fn endpoint(path: &str) -> Result<url::Url, Error> {
    let base = url::Url::parse(api_base())?;
    Ok(base.join(path)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatFeedbackPayload<'a> {
    user_feedback: &'a str,
    previous_question: Option<&'a str>,
    previous_answer: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OfflineFeedbackPayload<'a> {
    question_asked: &'a str,
    answer_received: &'a str,
    helpful_feedback: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    openai_answer: Option<String>,
    #[serde(default)]
    openai_sources: Vec<SourceExcerpt>,
}

#[derive(Debug, Deserialize)]
struct ChatFeedbackReply {
    updated_answer: Option<String>,
    #[serde(default)]
    feedback_context_sources: Vec<SourceExcerpt>,
    #[serde(default)]
    matched_feedbacks: Vec<MatchedFeedback>,
}

#[derive(Debug, Deserialize)]
struct SaveFeedbackReply {
    #[serde(default)]
    status: String,
}

fn bot_message(
    answer: Option<String>,
    sources: Vec<SourceExcerpt>,
    feedbacks: Vec<MatchedFeedback>,
) -> Message {
    Message {
        role: Role::Bot,
        content: Content::Answer {
            openai: clean(answer.as_deref()),
        },
        sources: Some(SourceSet { openai: sources }),
        feedbacks: Some(feedbacks),
    }
}

impl ChatReply {
    fn into_message(self) -> Message {
        bot_message(self.openai_answer, self.openai_sources, Vec::new())
    }
}

impl ChatFeedbackReply {
    fn into_message(self) -> Message {
        bot_message(
            self.updated_answer,
            self.feedback_context_sources,
            self.matched_feedbacks,
        )
    }
}

/// Context sent with a follow-up: the conversation's *first* user message and
/// *first* bot answer, not the latest turn. The backend's feedback matching
/// is keyed on the opening question, so every follow-up references it.
pub fn follow_up_context(messages: &[Message]) -> (Option<&str>, Option<&str>) {
    let question = messages
        .iter()
        .find(|m| m.role == Role::User)
        .and_then(|m| m.content.as_text());
    let answer = messages
        .iter()
        .find(|m| m.role == Role::Bot)
        .and_then(|m| m.content.as_answer());
    (question, answer)
}

/// Sends `user_text` to the backend and returns the normalized bot reply.
/// A fresh conversation goes to `/chat`; anything with prior turns goes to
/// `/chat_feedback` carrying the first exchange as context.
pub async fn ask(conversation: &[Message], user_text: &str) -> Result<Message, Error> {
    let client = reqwest::Client::new();
    if conversation.is_empty() {
        let payload = ChatPayload { query: user_text };
        let res = client.post(endpoint("chat")?).json(&payload).send().await?;
        let res = res.error_for_status()?;
        let reply: ChatReply = res.json().await?;
        Ok(reply.into_message())
    } else {
        let (previous_question, previous_answer) = follow_up_context(conversation);
        let payload = ChatFeedbackPayload {
            user_feedback: user_text,
            previous_question,
            previous_answer,
        };
        let res = client
            .post(endpoint("chat_feedback")?)
            .json(&payload)
            .send()
            .await?;
        let res = res.error_for_status()?;
        let reply: ChatFeedbackReply = res.json().await?;
        Ok(reply.into_message())
    }
}

/// Persists an ad-hoc feedback record. `Ok(true)` means the backend reported
/// success; `Ok(false)` means it answered with anything else.
pub async fn save_offline_feedback(
    question: &str,
    answer: &str,
    feedback: &str,
) -> Result<bool, Error> {
    let payload = OfflineFeedbackPayload {
        question_asked: question,
        answer_received: answer,
        helpful_feedback: feedback,
    };
    let client = reqwest::Client::new();
    let res = client
        .post(endpoint("save_offline_feedback")?)
        .json(&payload)
        .send()
        .await?;
    let res = res.error_for_status()?;
    let reply: SaveFeedbackReply = res.json().await?;
    Ok(reply.status == "success")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::APOLOGY;
    use serde_json::json;

    #[test]
    fn endpoints_join_onto_the_base() {
        assert_eq!(
            endpoint("chat").unwrap().as_str(),
            "https://stacbot-be.onrender.com/chat"
        );
        assert_eq!(
            endpoint("chat_feedback").unwrap().as_str(),
            "https://stacbot-be.onrender.com/chat_feedback"
        );
        assert_eq!(
            endpoint("save_offline_feedback").unwrap().as_str(),
            "https://stacbot-be.onrender.com/save_offline_feedback"
        );
    }

    #[test]
    fn chat_payload_shape() {
        let payload = ChatPayload {
            query: "What is STAC?",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"query": "What is STAC?"})
        );
    }

    #[test]
    fn feedback_payload_serializes_missing_context_as_null() {
        let payload = ChatFeedbackPayload {
            user_feedback: "that wasn't helpful",
            previous_question: None,
            previous_answer: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "user_feedback": "that wasn't helpful",
                "previous_question": null,
                "previous_answer": null,
            })
        );
    }

    #[test]
    fn follow_up_context_uses_the_first_exchange() {
        let answer = |text: &str| Message {
            role: Role::Bot,
            content: Content::Answer {
                openai: text.to_owned(),
            },
            sources: None,
            feedbacks: None,
        };
        let messages = vec![
            Message::user("first question".to_owned()),
            answer("first answer"),
            Message::user("second question".to_owned()),
            answer("second answer"),
        ];
        let (question, answer) = follow_up_context(&messages);
        assert_eq!(question, Some("first question"));
        assert_eq!(answer, Some("first answer"));
    }

    #[test]
    fn follow_up_context_on_empty_conversation_is_absent() {
        assert_eq!(follow_up_context(&[]), (None, None));
    }

    #[test]
    fn chat_reply_maps_unknown_answers_to_the_apology() {
        let reply: ChatReply = serde_json::from_value(json!({
            "openai_answer": "I don't know",
            "openai_sources": [],
        }))
        .unwrap();
        let message = reply.into_message();
        assert_eq!(message.role, Role::Bot);
        assert_eq!(message.content.as_answer(), Some(APOLOGY));
        assert_eq!(message.sources.unwrap().openai.len(), 0);
        assert_eq!(message.feedbacks.unwrap().len(), 0);
    }

    #[test]
    fn chat_feedback_reply_carries_sources_and_matches() {
        let reply: ChatFeedbackReply = serde_json::from_value(json!({
            "updated_answer": "A better answer.",
            "feedback_context_sources": [
                {"source": "a.md", "content_excerpt": "..."}
            ],
            "matched_feedbacks": [
                {"score": 0.9, "payload": {"question_asked": "q", "helpful_feedback": "f"}}
            ],
        }))
        .unwrap();
        let message = reply.into_message();
        assert_eq!(message.content.as_answer(), Some("A better answer."));
        assert_eq!(message.sources.unwrap().openai[0].source, "a.md");
        assert_eq!(message.feedbacks.unwrap()[0].score, Some(0.9));
    }

    #[test]
    fn replies_tolerate_absent_fields() {
        let reply: ChatReply = serde_json::from_value(json!({})).unwrap();
        let message = reply.into_message();
        assert_eq!(message.content.as_answer(), Some(""));

        let reply: ChatFeedbackReply = serde_json::from_value(json!({
            "updated_answer": "ok",
        }))
        .unwrap();
        let message = reply.into_message();
        assert_eq!(message.feedbacks, Some(Vec::new()));
    }
}
