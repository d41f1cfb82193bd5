use chrono::{DateTime, Local};

use crate::chat::attachment::ImageAttachment;
use crate::chat::error::ChatError;
use crate::chat::history::{ChatTurn, Conversation, ImageRef, MessageContent, Role};

pub const WELCOME: &str = "Hello! I'm **Captain AI**, your DGCA ground school instructor. Ask me anything about navigation, meteorology, regulations or aircraft systems, or attach a chart or instrument photo.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendRejected {
    /// A reply is still outstanding.
    Busy,
    /// Nothing to send.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryBody {
    Text(String),
    Error(ChatError),
}

/// One rendered bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptEntry {
    pub id: usize,
    pub role: Role,
    pub body: EntryBody,
    pub image: Option<ImageRef>,
    pub sent_at: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn is_error(&self) -> bool {
        matches!(self.body, EntryBody::Error(_))
    }

    pub fn text(&self) -> String {
        match &self.body {
            EntryBody::Text(text) => text.clone(),
            EntryBody::Error(err) => err.user_message(),
        }
    }
}

/// The turns to send for one request: the recent history window, oldest
/// first, including the turn that was just added.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingTurn {
    pub window: Vec<ChatTurn>,
}

/// Conversation state behind the chat widget.
///
/// History is what goes upstream; the transcript is what the visitor sees.
/// Failed requests only ever add to the transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    history: Conversation,
    transcript: Vec<TranscriptEntry>,
    pending_image: Option<ImageAttachment>,
    in_flight: bool,
    next_id: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: Conversation::default(),
            transcript: Vec::new(),
            pending_image: None,
            in_flight: false,
            next_id: 0,
        }
    }

    /// A session whose transcript opens with the assistant's greeting. The
    /// greeting is display-only and never sent upstream.
    pub fn with_welcome() -> Self {
        let mut session = Self::new();
        session.record(Role::Assistant, EntryBody::Text(WELCOME.to_string()), None);
        session
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn pending_image(&self) -> Option<&ImageAttachment> {
        self.pending_image.as_ref()
    }

    /// Replaces any previously attached image.
    pub fn attach(&mut self, image: ImageAttachment) {
        self.pending_image = Some(image);
    }

    pub fn remove_image(&mut self) {
        self.pending_image = None;
    }

    pub fn can_send(&self, text: &str) -> bool {
        !self.in_flight && (!text.trim().is_empty() || self.pending_image.is_some())
    }

    pub fn begin_send(&mut self, text: &str) -> Result<OutgoingTurn, SendRejected> {
        if self.in_flight {
            return Err(SendRejected::Busy);
        }
        let text = text.trim();
        if text.is_empty() && self.pending_image.is_none() {
            return Err(SendRejected::Empty);
        }

        let image = self.pending_image.take().map(|img| img.image_ref());
        let content = match image.clone() {
            Some(image) => MessageContent::WithImage {
                text: text.to_string(),
                image,
            },
            None => MessageContent::Text(text.to_string()),
        };

        self.record(Role::User, EntryBody::Text(text.to_string()), image);
        self.history.push(ChatTurn::user(content));
        self.in_flight = true;

        Ok(OutgoingTurn {
            window: self.history.recent().to_vec(),
        })
    }

    pub fn complete(&mut self, result: Result<String, ChatError>) {
        self.in_flight = false;
        match result {
            Ok(reply) => {
                self.history.push(ChatTurn::assistant(reply.clone()));
                self.record(Role::Assistant, EntryBody::Text(reply), None);
            }
            Err(err) => {
                self.record(Role::Assistant, EntryBody::Error(err), None);
            }
        }
    }

    fn record(&mut self, role: Role, body: EntryBody, image: Option<ImageRef>) {
        self.next_id += 1;
        self.transcript.push(TranscriptEntry {
            id: self.next_id,
            role,
            body,
            image,
            sent_at: Local::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::error::ErrorKind;
    use crate::chat::history::CONTEXT_WINDOW;

    fn image() -> ImageAttachment {
        ImageAttachment {
            name: "vor.png".into(),
            mime: "image/png".into(),
            size: 2048,
            data_url: "data:image/png;base64,AAAA".into(),
        }
    }

    #[test]
    fn send_appends_user_turn_and_marks_busy() {
        let mut session = ChatSession::new();
        let outgoing = session.begin_send("  What is VOR?  ").unwrap();

        assert!(session.is_busy());
        assert_eq!(session.history().len(), 1);
        assert_eq!(outgoing.window.len(), 1);
        assert_eq!(outgoing.window[0].content.text(), "What is VOR?");
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn second_send_while_busy_is_rejected_without_effect() {
        let mut session = ChatSession::new();
        session.begin_send("first").unwrap();
        let before = session.clone();

        assert_eq!(session.begin_send("second"), Err(SendRejected::Busy));
        assert_eq!(session, before);
    }

    #[test]
    fn empty_text_without_image_is_rejected() {
        let mut session = ChatSession::new();
        assert_eq!(session.begin_send("   "), Err(SendRejected::Empty));
        assert!(!session.is_busy());
        assert!(session.history().is_empty());
    }

    #[test]
    fn image_alone_can_be_sent_and_is_cleared() {
        let mut session = ChatSession::new();
        session.attach(image());
        assert!(session.can_send(""));

        let outgoing = session.begin_send("").unwrap();
        assert!(session.pending_image().is_none());
        assert_eq!(
            outgoing.window[0].content.image().map(|i| i.name.as_str()),
            Some("vor.png")
        );
        assert!(session.transcript()[0].image.is_some());
    }

    #[test]
    fn attaching_twice_keeps_only_latest() {
        let mut session = ChatSession::new();
        session.attach(image());
        let mut other = image();
        other.name = "ndb.png".into();
        session.attach(other);
        assert_eq!(session.pending_image().map(|i| i.name.as_str()), Some("ndb.png"));
        session.remove_image();
        assert!(session.pending_image().is_none());
    }

    #[test]
    fn successful_reply_joins_history() {
        let mut session = ChatSession::new();
        session.begin_send("hi").unwrap();
        session.complete(Ok("Hello, cadet.".into()));

        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().last().map(|t| t.role), Some(Role::Assistant));
        assert_eq!(session.transcript().last().map(|e| e.text()), Some("Hello, cadet.".into()));
    }

    #[test]
    fn server_failure_renders_error_without_phantom_turn() {
        let mut session = ChatSession::new();
        session.begin_send("explain QNH").unwrap();
        session.complete(Err(ChatError::from_status(500, "internal")));

        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().last().map(|t| t.role), Some(Role::User));

        let last = session.transcript().last().unwrap();
        assert!(last.is_error());
        assert!(last.text().contains("temporarily unavailable"));
        match &last.body {
            EntryBody::Error(err) => assert_eq!(err.kind(), ErrorKind::Server),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn can_send_again_after_failure() {
        let mut session = ChatSession::new();
        session.begin_send("one").unwrap();
        session.complete(Err(ChatError::Network("offline".into())));
        assert!(session.begin_send("one again").is_ok());
    }

    #[test]
    fn outgoing_window_is_capped() {
        let mut session = ChatSession::new();
        for i in 0..6 {
            session.begin_send(&format!("q{i}")).unwrap();
            session.complete(Ok(format!("a{i}")));
        }
        let outgoing = session.begin_send("last").unwrap();
        assert_eq!(session.history().len(), 13);
        assert_eq!(outgoing.window.len(), CONTEXT_WINDOW);
        assert_eq!(outgoing.window.last().unwrap().content.text(), "last");
    }

    #[test]
    fn welcome_is_display_only() {
        let session = ChatSession::with_welcome();
        assert_eq!(session.transcript().len(), 1);
        assert!(session.history().is_empty());
    }
}
