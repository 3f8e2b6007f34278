//! Deck of Cards API client - the remote card source
//!
//! Talks to deckofcardsapi.com: one GET to shuffle a fresh deck, one GET
//! per draw. Card images are served per card code from the image host.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::errors::GameError;
use crate::domain::entities::{Card, Rank, Suit};
use crate::domain::traits::{CardSource, DeckRef};
use crate::infrastructure::config::CardSourceConfig;

/// Card payload as returned by the API.
#[derive(Debug, Clone, Deserialize)]
struct ApiCard {
    code: String,
    value: String,
    suit: String,
}

#[derive(Debug, Deserialize)]
struct ShuffleResponse {
    success: bool,
    deck_id: String,
}

#[derive(Debug, Deserialize)]
struct DrawResponse {
    success: bool,
    #[serde(default)]
    cards: Vec<ApiCard>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the Deck of Cards API.
pub struct DeckOfCardsClient {
    client: Client,
    api_base: String,
    image_base: String,
    deck_count: u8,
}

impl DeckOfCardsClient {
    pub fn new(config: &CardSourceConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            image_base: config.image_base_url.clone(),
            deck_count: config.deck_count,
        }
    }

    /// Image URL for a card code ("AS" -> {image-base}AS.png).
    pub fn card_image_url(&self, code: &str) -> String {
        format!("{}{}.png", self.image_base, code)
    }
}

fn parse_card(raw: &ApiCard) -> Result<Card, GameError> {
    let rank = Rank::parse(&raw.value).ok_or_else(|| {
        GameError::SourceUnavailable(format!("unrecognized card value {:?}", raw.value))
    })?;
    let suit = Suit::parse(&raw.suit).ok_or_else(|| {
        GameError::SourceUnavailable(format!("unrecognized card suit {:?}", raw.suit))
    })?;
    Ok(Card::new(raw.code.clone(), rank, suit))
}

#[async_trait]
impl CardSource for DeckOfCardsClient {
    async fn new_deck(&self) -> Result<DeckRef, GameError> {
        let url = format!(
            "{}/new/shuffle/?deck_count={}",
            self.api_base, self.deck_count
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GameError::SourceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GameError::SourceUnavailable(format!(
                "card API error: {}",
                response.status()
            )));
        }

        let data: ShuffleResponse = response
            .json()
            .await
            .map_err(|e| GameError::SourceUnavailable(e.to_string()))?;

        if !data.success {
            return Err(GameError::SourceUnavailable(
                "card API refused to shuffle a deck".to_string(),
            ));
        }

        tracing::debug!("Shuffled new deck {}", data.deck_id);
        Ok(DeckRef::new(data.deck_id))
    }

    async fn draw(&self, deck: &DeckRef, count: u8) -> Result<Vec<Card>, GameError> {
        let url = format!("{}/{}/draw/?count={}", self.api_base, deck.as_str(), count);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GameError::SourceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GameError::SourceUnavailable(format!(
                "card API error: {}",
                response.status()
            )));
        }

        let data: DrawResponse = response
            .json()
            .await
            .map_err(|e| GameError::SourceUnavailable(e.to_string()))?;

        if !data.success {
            let reason = data
                .error
                .unwrap_or_else(|| format!("deck {} unknown to the card API", deck));
            return Err(GameError::InvalidDeckRef(reason));
        }

        data.cards.iter().map(parse_card).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DeckOfCardsClient {
        DeckOfCardsClient::new(&CardSourceConfig {
            api_base_url: "https://deckofcardsapi.com/api/deck/".to_string(),
            image_base_url: "https://img.example/cards/".to_string(),
            deck_count: 1,
        })
    }

    #[test]
    fn image_url_appends_code_and_extension() {
        assert_eq!(
            client().card_image_url("0H"),
            "https://img.example/cards/0H.png"
        );
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        assert_eq!(client().api_base, "https://deckofcardsapi.com/api/deck");
    }

    #[test]
    fn draw_payload_parses_into_domain_cards() {
        let payload = r#"{
            "success": true,
            "deck_id": "3p40paa87x90",
            "cards": [
                {"code": "AS", "image": "https://x/AS.png", "value": "ACE", "suit": "SPADES"},
                {"code": "0H", "image": "https://x/0H.png", "value": "10", "suit": "HEARTS"}
            ],
            "remaining": 50
        }"#;

        let response: DrawResponse = serde_json::from_str(payload).unwrap();
        assert!(response.success);

        let cards: Vec<Card> = response
            .cards
            .iter()
            .map(|c| parse_card(c).unwrap())
            .collect();
        assert_eq!(cards[0], Card::new("AS", Rank::Ace, Suit::Spades));
        assert_eq!(cards[1], Card::new("0H", Rank::Ten, Suit::Hearts));
    }

    #[test]
    fn failed_draw_payload_keeps_error_text() {
        let payload = r#"{
            "success": false,
            "error": "Deck ID does not exist."
        }"#;

        let response: DrawResponse = serde_json::from_str(payload).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Deck ID does not exist."));
        assert!(response.cards.is_empty());
    }

    #[test]
    fn unknown_value_is_rejected() {
        let raw = ApiCard {
            code: "XX".to_string(),
            value: "JOKER".to_string(),
            suit: "SPADES".to_string(),
        };
        let err = parse_card(&raw).unwrap_err();
        assert!(matches!(err, GameError::SourceUnavailable(msg) if msg.contains("JOKER")));
    }
}
