//! Message parser - Turns raw text and callbacks into structured messages

use crate::domain::entities::{Content, Message, User};

/// Parses incoming platform input into [`Message`] objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message; leading `/` (or the configured prefix) marks
    /// a command.
    pub fn parse(
        &self,
        chat_id: impl Into<String>,
        text: impl Into<String>,
        sender: Option<User>,
    ) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        if text.starts_with('/') || text.starts_with(&self.command_prefix) {
            return self.parse_command(chat_id, text, sender);
        }

        with_sender(Message::new(chat_id, Content::Text(text)), sender)
    }

    fn parse_command(&self, chat_id: String, text: String, sender: Option<User>) -> Message {
        let cmd_text = if let Some(stripped) = text.strip_prefix('/') {
            stripped
        } else {
            text.trim_start_matches(&self.command_prefix)
        };

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let args: Vec<String> = parts.map(|s| s.to_string()).collect();

        with_sender(Message::from_command(chat_id, name, args), sender)
    }

    /// Parse a callback query (inline button press)
    pub fn parse_callback(
        &self,
        chat_id: impl Into<String>,
        data: impl Into<String>,
        sender: Option<User>,
    ) -> Message {
        with_sender(
            Message::new(chat_id, Content::CallbackData(data.into())),
            sender,
        )
    }
}

fn with_sender(message: Message, sender: Option<User>) -> Message {
    match sender {
        Some(user) => message.with_sender(user),
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MessageType;

    #[test]
    fn slash_text_parses_as_command() {
        let parser = MessageParser::new("/");
        let msg = parser.parse("42", "/newgame", None);

        assert_eq!(msg.message_type, MessageType::Command);
        let Content::Command { name, args } = &msg.content else {
            panic!("expected command content");
        };
        assert_eq!(name, "newgame");
        assert!(args.is_empty());
    }

    #[test]
    fn command_arguments_are_split() {
        let parser = MessageParser::new("/");
        let msg = parser.parse("42", "/help newgame", None);

        let Content::Command { name, args } = &msg.content else {
            panic!("expected command content");
        };
        assert_eq!(name, "help");
        assert_eq!(args, &["newgame".to_string()]);
    }

    #[test]
    fn plain_text_stays_text() {
        let parser = MessageParser::new("/");
        let msg = parser.parse("42", "deal me in", None);
        assert_eq!(msg.message_type, MessageType::Text);
    }

    #[test]
    fn callback_carries_action_data() {
        let parser = MessageParser::new("/");
        let sender = User::new("7").with_username("player_one");
        let msg = parser.parse_callback("42", "hit", Some(sender));

        assert_eq!(msg.message_type, MessageType::Callback);
        assert_eq!(msg.content, Content::CallbackData("hit".to_string()));
        assert_eq!(msg.sender.unwrap().display_name(), "player_one");
    }
}
