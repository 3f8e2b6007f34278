use chrono::{DateTime, Utc};
use std::fmt;

/// A chat user as reported by the platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Type of message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Command,
    Callback,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Command => "command",
            MessageType::Callback => "callback",
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    CallbackData(String),
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An incoming message or button press, platform-neutral.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<User>,
    pub content: Content,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        let message_type = match &content {
            Content::Text(_) => MessageType::Text,
            Content::Command { .. } => MessageType::Command,
            Content::CallbackData(_) => MessageType::Callback,
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: None,
            content,
            message_type,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(
        chat_id: impl Into<String>,
        name: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self::new(
            chat_id,
            Content::Command {
                name: name.into(),
                args,
            },
        )
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_drives_message_type() {
        let msg = Message::from_text("42", "hello");
        assert_eq!(msg.message_type, MessageType::Text);

        let msg = Message::from_command("42", "newgame", vec![]);
        assert_eq!(msg.message_type, MessageType::Command);
        assert!(msg.content.is_command());

        let msg = Message::new("42", Content::CallbackData("hit".to_string()));
        assert_eq!(msg.message_type, MessageType::Callback);
    }

    #[test]
    fn sender_display_prefers_username() {
        let user = User::new("7").with_username("dealer_fan");
        assert_eq!(user.display_name(), "dealer_fan");
        assert_eq!(User::new("7").display_name(), "7");
    }
}
