/// Number of most recent turns sent upstream with every request.
pub const CONTEXT_WINDOW: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Image reference carried by a user turn.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRef {
    pub name: String,
    pub data_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MessageContent {
    Text(String),
    WithImage { text: String, image: ImageRef },
}

impl MessageContent {
    pub fn text(&self) -> &str {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::WithImage { text, .. } => text,
        }
    }

    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            MessageContent::Text(_) => None,
            MessageContent::WithImage { image, .. } => Some(image),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatTurn {
    pub fn user(content: MessageContent) -> Self {
        Self { role: Role::User, content }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Everything said so far in this page visit. Grows without bound; only
/// [`Conversation::recent`] is ever sent upstream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// The last `CONTEXT_WINDOW` turns, oldest first.
    pub fn recent(&self) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(CONTEXT_WINDOW);
        &self.turns[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Conversation {
        let mut convo = Conversation::default();
        for i in 0..n {
            convo.push(ChatTurn::user(MessageContent::Text(format!("q{i}"))));
        }
        convo
    }

    #[test]
    fn recent_returns_everything_when_short() {
        let convo = numbered(3);
        assert_eq!(convo.recent().len(), 3);
        assert_eq!(convo.recent()[0].content.text(), "q0");
    }

    #[test]
    fn recent_keeps_last_eight_in_order() {
        let convo = numbered(12);
        let window = convo.recent();
        assert_eq!(window.len(), CONTEXT_WINDOW);
        assert_eq!(window[0].content.text(), "q4");
        assert_eq!(window[7].content.text(), "q11");
        assert_eq!(convo.len(), 12);
    }

    #[test]
    fn image_content_exposes_both_parts() {
        let content = MessageContent::WithImage {
            text: "what gauge is this?".into(),
            image: ImageRef {
                name: "panel.png".into(),
                data_url: "data:image/png;base64,AAAA".into(),
            },
        };
        assert_eq!(content.text(), "what gauge is this?");
        assert_eq!(content.image().map(|i| i.name.as_str()), Some("panel.png"));
    }
}
