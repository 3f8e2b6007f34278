//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub adapters: AdaptersConfig,
    pub card_source: CardSourceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
    pub poll_timeout_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

/// Remote deck service endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CardSourceConfig {
    pub api_base_url: String,
    pub image_base_url: String,
    pub deck_count: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "blackjack-bot".to_string(),
                prefix: "/".to_string(),
            },
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                    poll_timeout_seconds: 30,
                }),
                console: Some(ConsoleConfig { enabled: true }),
            },
            card_source: CardSourceConfig {
                api_base_url: "https://deckofcardsapi.com/api/deck".to_string(),
                image_base_url:
                    "https://raw.githubusercontent.com/crobertsbmw/deckofcards/master/static/img/"
                        .to_string(),
                deck_count: 1,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Build a config from environment variables only.
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            if let Some(ref mut tg) = config.adapters.telegram {
                tg.token = Some(token);
                tg.enabled = true;
            }
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Ok(url) = std::env::var("CARD_API_URL") {
            config.card_source.api_base_url = url;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.bot.name, "blackjack-bot");
        assert_eq!(parsed.card_source.deck_count, 1);
        assert!(parsed.adapters.console.unwrap().enabled);
    }

    #[test]
    fn kebab_case_keys_are_accepted() {
        let yaml = r#"
bot:
  name: table-seven
  prefix: "!"
adapters:
  telegram:
    enabled: true
    token: "123:abc"
    poll-timeout-seconds: 10
  console:
    enabled: false
card-source:
  api-base-url: "http://localhost:9000/api/deck"
  image-base-url: "http://localhost:9000/img/"
  deck-count: 6
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.card_source.deck_count, 6);
        let tg = config.adapters.telegram.unwrap();
        assert_eq!(tg.poll_timeout_seconds, 10);
        assert_eq!(tg.token.as_deref(), Some("123:abc"));
    }
}
