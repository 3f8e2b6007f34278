//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "blackjack-bot".to_string(),
                username: "blackjack_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: BotInfoResponse,
        }

        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: data.result.id.to_string(),
            name: data.result.first_name,
            username: data.result.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string(), "callback_query".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update]) -> i64 {
        updates.iter().map(|u| u.update_id + 1).max().unwrap_or(0)
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: String,
            description: String,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let commands = vec![
            Command {
                command: "start".to_string(),
                description: "Start the bot".to_string(),
            },
            Command {
                command: "newgame".to_string(),
                description: "Start a new Blackjack round".to_string(),
            },
            Command {
                command: "help".to_string(),
                description: "Show help message".to_string(),
            },
            Command {
                command: "version".to_string(),
                description: "Show bot version".to_string(),
            },
        ];

        let url = self.api_url("setMyCommands");
        let request = SetMyCommandsRequest { commands };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!(
                "Failed to register commands: {}",
                error
            )));
        }

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }
}

#[derive(Deserialize)]
struct SendResponse {
    result: MessageResult,
}

#[derive(Deserialize)]
struct MessageResult {
    message_id: i64,
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!(
            "Starting Telegram bot (token: {}...)",
            &self.token[..8.min(self.token.len())]
        );
        Ok(())
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
        }

        tracing::debug!("Sending to {}: {}", chat_id, text);

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: SendResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result.message_id.to_string())
    }

    async fn send_photo(&self, chat_id: &str, photo_url: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendPhotoRequest {
            chat_id: String,
            photo: String,
        }

        let url = self.api_url("sendPhoto");
        let request = SendPhotoRequest {
            chat_id: chat_id.to_string(),
            photo: photo_url.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: SendResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result.message_id.to_string())
    }

    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct InlineKeyboardButton {
            text: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            callback_data: Option<String>,
        }

        #[derive(Serialize)]
        struct ReplyMarkup {
            inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
        }

        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
            reply_markup: ReplyMarkup,
        }

        tracing::debug!("Sending with keyboard to {}: {}", chat_id, text);

        let inline_keyboard: Vec<Vec<InlineKeyboardButton>> = buttons
            .iter()
            .map(|row| {
                row.iter()
                    .map(|btn| InlineKeyboardButton {
                        text: btn.text.clone(),
                        callback_data: btn.callback_data.clone(),
                    })
                    .collect()
            })
            .collect();

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            reply_markup: ReplyMarkup { inline_keyboard },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: SendResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result.message_id.to_string())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest {
            callback_query_id: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<String>,
        }

        let url = self.api_url("answerCallbackQuery");
        let request = AnswerRequest {
            callback_query_id: callback_id.to_string(),
            text: text.map(|s| s.to_string()),
        };

        let _response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_offset_is_one_past_latest_update() {
        let updates = vec![
            Update {
                update_id: 10,
                message: None,
                callback_query: None,
            },
            Update {
                update_id: 12,
                message: None,
                callback_query: None,
            },
        ];
        assert_eq!(TelegramAdapter::get_next_offset(&updates), 13);
        assert_eq!(TelegramAdapter::get_next_offset(&[]), 0);
    }

    #[test]
    fn callback_update_deserializes() {
        let payload = r#"{
            "update_id": 5,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 7, "username": "player_one", "first_name": "P"},
                "message": {"message_id": 3, "from": null, "chat": {"id": 42}, "text": "Choose your move:"},
                "data": "hit"
            }
        }"#;

        let update: Update = serde_json::from_str(payload).unwrap();
        let cb = update.callback_query.unwrap();
        assert_eq!(cb.data.as_deref(), Some("hit"));
        assert_eq!(cb.message.unwrap().chat.id, 42);
    }
}
