use gloo_net::http::Request;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::chat::error::ChatError;
use crate::chat::history::{ChatTurn, MessageContent, Role};
use crate::config::ChatSettings;

pub const SYSTEM_PROMPT: &str = r#"You are Captain AI, an expert flight instructor specializing in DGCA (Directorate General of Civil Aviation) subjects for Indian aviation training. You have extensive knowledge in:

1. Air Navigation - VOR, NDB, GPS, charts, flight planning
2. Aviation Meteorology - Weather patterns, METAR, TAF, turbulence
3. Technical General - Aircraft systems, instruments, performance
4. Air Regulations - DGCA rules, airspace, flight rules
5. Aircraft & Engines - Aerodynamics, propulsion, systems
6. Radio Telephony - Communication procedures, phraseology

Guidelines for responses:
- Be professional yet friendly, like a real flight instructor
- Provide accurate, detailed explanations suitable for CPL students
- Use aviation terminology correctly
- Include practical examples when helpful
- Break down complex concepts into digestible parts
- Always prioritize safety in your advice
- Reference DGCA regulations when applicable
- Keep responses concise but comprehensive for a popup chat interface

Always encourage safe flying practices and provide practical, actionable advice."#;

const IMAGE_ONLY_PROMPT: &str = "What is in this image?";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

impl From<Role> for WireRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => WireRole::User,
            Role::Assistant => WireRole::Assistant,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: WireContent,
}

impl From<&ChatTurn> for WireMessage {
    fn from(turn: &ChatTurn) -> Self {
        let content = match &turn.content {
            MessageContent::Text(text) => WireContent::Text(text.clone()),
            MessageContent::WithImage { text, image } => {
                let text = if text.trim().is_empty() {
                    IMAGE_ONLY_PROMPT.to_string()
                } else {
                    text.clone()
                };
                WireContent::Parts(vec![
                    ContentPart::Text { text },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url.clone(),
                        },
                    },
                ])
            }
        };
        WireMessage {
            role: turn.role.into(),
            content,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// System prompt first, then the given turns in order.
    pub fn new(settings: &ChatSettings, turns: &[ChatTurn]) -> Self {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(WireMessage {
            role: WireRole::System,
            content: WireContent::Text(SYSTEM_PROMPT.to_string()),
        });
        messages.extend(turns.iter().map(WireMessage::from));

        Self {
            model: settings.model.clone(),
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ReplyMessage {
    content: String,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    pub fn into_reply(self) -> Result<String, ChatError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ChatError::EmptyReply)
    }
}

pub fn parse_reply(body: &str) -> Result<String, ChatError> {
    serde_json::from_str::<ChatCompletionResponse>(body)
        .map_err(|e| ChatError::MalformedReply(e.to_string()))?
        .into_reply()
}

/// A failed status decides the error even when its body cannot be read.
pub fn settle_response(
    status: u16,
    ok: bool,
    body: Result<String, ChatError>,
) -> Result<String, ChatError> {
    if !ok {
        return Err(ChatError::from_status(status, body.unwrap_or_default()));
    }
    parse_reply(&body?)
}

/// Thin fetch wrapper around the chat-completion endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatClient {
    settings: ChatSettings,
}

impl ChatClient {
    pub fn new(settings: ChatSettings) -> Self {
        Self { settings }
    }

    pub async fn complete(&self, turns: Vec<ChatTurn>) -> Result<String, ChatError> {
        let body = ChatCompletionRequest::new(&self.settings, &turns);

        let mut request = Request::post(&self.settings.endpoint)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.settings.site_url)
            .header("X-Title", &self.settings.site_name);
        if let Some(key) = &self.settings.api_key {
            request = request.header("Authorization", &format!("Bearer {}", key));
        }

        let response = request
            .json(&body)
            .map_err(|e| ChatError::Encode(e.to_string()))?
            .send()
            .await?;

        let status = response.status();
        let ok = response.ok();
        if !ok {
            warn!("chat request failed with status {}", status);
        }
        let body = response.text().await.map_err(ChatError::from);
        if let Ok(text) = &body {
            info!("chat reply received ({} bytes)", text.len());
        }
        settle_response(status, ok, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::error::ErrorKind;
    use crate::chat::history::ImageRef;
    use serde_json::json;

    fn settings() -> ChatSettings {
        ChatSettings {
            endpoint: "/api/chat/completions".into(),
            api_key: None,
            model: "test-model".into(),
            temperature: 0.7,
            max_tokens: 2000,
            site_url: "https://example.test/".into(),
            site_name: "Test".into(),
        }
    }

    #[test]
    fn failed_status_wins_over_unreadable_body() {
        let unreadable = Err(ChatError::Network("body stream aborted".into()));
        let err = settle_response(503, false, unreadable).unwrap_err();
        assert_eq!(err, ChatError::from_status(503, ""));
        assert_eq!(err.kind(), ErrorKind::Server);

        let err = settle_response(429, false, Ok("slow down".into())).unwrap_err();
        assert_eq!(err, ChatError::from_status(429, "slow down"));
    }

    #[test]
    fn unreadable_body_on_success_is_a_network_error() {
        let err = settle_response(200, true, Err(ChatError::Network("reset".into()))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }

    #[test]
    fn request_starts_with_system_prompt() {
        let turns = vec![ChatTurn::user(MessageContent::Text("What is a METAR?".into()))];
        let request = ChatCompletionRequest::new(&settings(), &turns);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1], json!({"role": "user", "content": "What is a METAR?"}));
    }

    #[test]
    fn image_turn_serializes_as_parts() {
        let turn = ChatTurn::user(MessageContent::WithImage {
            text: String::new(),
            image: ImageRef {
                name: "chart.png".into(),
                data_url: "data:image/png;base64,AAAA".into(),
            },
        });
        let value = serde_json::to_value(WireMessage::from(&turn)).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is in this image?"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
                ]
            })
        );
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Cleared for takeoff."}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Cleared for takeoff.");
    }

    #[test]
    fn empty_choices_is_an_error() {
        assert_eq!(parse_reply(r#"{"choices":[]}"#), Err(ChatError::EmptyReply));
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(parse_reply("<html>"), Err(ChatError::MalformedReply(_))));
    }
}
