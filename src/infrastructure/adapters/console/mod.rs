//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Console bot adapter for local play without a Telegram token
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "blackjack-bot".to_string(),
                username: "console".to_string(),
            },
        }
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok()?;
        Some(input.trim().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn send_photo(&self, _chat_id: &str, photo_url: &str) -> Result<String, BotError> {
        println!("  [Card] {}", photo_url);
        Ok("console_msg".to_string())
    }

    async fn send_with_keyboard(
        &self,
        _chat_id: &str,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        for row in buttons {
            let row_text: Vec<String> = row
                .iter()
                .map(|b| {
                    b.callback_data
                        .as_ref()
                        .map(|d| format!("{} (type '{}')", b.text, d))
                        .unwrap_or_else(|| b.text.clone())
                })
                .collect();
            println!("  [Buttons] {}", row_text.join(" | "));
        }
        Ok("console_msg".to_string())
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
