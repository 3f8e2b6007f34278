use crate::application::errors::GameError;
use crate::domain::entities::Card;
use async_trait::async_trait;
use std::fmt;

/// Opaque handle for a server-side shuffled deck. Only the card source
/// knows how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRef(String);

impl DeckRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeckRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CardSource trait - abstraction for the remote deck service
///
/// Draws are blocking round-trips; the session serializes its own actions
/// so no call overlaps another for the same deck.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Shuffle a fresh deck and return its reference.
    async fn new_deck(&self) -> Result<DeckRef, GameError>;

    /// Draw `count` cards from the deck, in order.
    async fn draw(&self, deck: &DeckRef, count: u8) -> Result<Vec<Card>, GameError>;
}
