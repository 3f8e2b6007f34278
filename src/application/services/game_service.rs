//! Game orchestration: one Blackjack session per chat.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::errors::GameError;
use crate::domain::entities::{GameSession, HitResult, RoundOutcome, RoundResult};
use crate::domain::traits::CardSource;

/// Callback payload for the "hit" button.
pub const ACTION_HIT: &str = "hit";
/// Callback payload for the "stand" button.
pub const ACTION_STAND: &str = "stand";

/// One option of a binary choice offered to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub data: String,
}

/// What the game asks the presentation channel to deliver. Adapters render
/// these; the service never touches a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message.
    Text(String),
    /// Card image addressed by the card's source code ("AS", "0H").
    CardImage(String),
    /// Prompt with inline buttons reported back as callback data.
    Choice {
        text: String,
        options: Vec<ChoiceOption>,
    },
}

/// Sessions keyed by chat id, one active round per chat.
///
/// The mutex serializes all mutation, so two actions can never interleave
/// against the same session. A `/newgame` replaces the chat's previous
/// session outright; nothing is archived.
pub struct GameService {
    source: Arc<dyn CardSource>,
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl GameService {
    pub fn new(source: Arc<dyn CardSource>) -> Self {
        Self {
            source,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a fresh round: new deck, two cards each, player to act.
    /// The chat's previous round is discarded only once the new deal
    /// has succeeded.
    pub async fn new_game(&self, chat_id: &str) -> Result<Vec<Reply>, GameError> {
        let deck = self.source.new_deck().await?;
        tracing::info!("New round for chat {} on deck {}", chat_id, deck);

        let mut session = GameSession::new(deck);
        session.deal_initial(self.source.as_ref()).await?;

        let mut replies = player_hand_replies(&session);
        replies.push(Reply::Text("Dealer shows:".to_string()));
        replies.push(Reply::CardImage(session.dealer().cards()[0].code.clone()));
        replies.push(Reply::Text(
            "The dealer's second card is face down.".to_string(),
        ));
        if session.player().is_blackjack() {
            replies.push(Reply::Text("Blackjack!".to_string()));
        }
        replies.push(choice_reply());

        let mut sessions = self.sessions.lock().await;
        sessions.insert(chat_id.to_string(), session);

        Ok(replies)
    }

    /// Draw one more card for the player.
    pub async fn hit(&self, chat_id: &str) -> Result<Vec<Reply>, GameError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(chat_id).ok_or_else(no_round)?;

        let result = session.hit(self.source.as_ref()).await?;
        let mut replies = player_hand_replies(session);

        match result {
            HitResult::Continue(_) => replies.push(choice_reply()),
            HitResult::Bust(score) => {
                tracing::info!("Chat {} busted at {}", chat_id, score);
                replies.push(Reply::Text(format!(
                    "Bust at {}! You lose. Send /newgame to play again.",
                    score
                )));
            }
        }

        Ok(replies)
    }

    /// End the player's turn: the dealer plays out and the round resolves.
    pub async fn stand(&self, chat_id: &str) -> Result<Vec<Reply>, GameError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(chat_id).ok_or_else(no_round)?;

        let result = session.stand(self.source.as_ref()).await?;
        tracing::info!(
            "Chat {} round resolved: {:?} ({} vs {})",
            chat_id,
            result.outcome,
            result.player_score,
            result.dealer_score
        );

        Ok(vec![
            Reply::Text(format!("Dealer's cards: {}", session.dealer().describe())),
            Reply::Text(outcome_text(&result)),
        ])
    }
}

fn no_round() -> GameError {
    GameError::InvalidAction("no round in progress, send /newgame to start one".to_string())
}

fn player_hand_replies(session: &GameSession) -> Vec<Reply> {
    let mut replies = vec![Reply::Text("Your cards:".to_string())];
    for card in session.player().cards() {
        replies.push(Reply::CardImage(card.code.clone()));
    }
    replies
}

fn choice_reply() -> Reply {
    Reply::Choice {
        text: "Choose your move:".to_string(),
        options: vec![
            ChoiceOption {
                label: "Hit".to_string(),
                data: ACTION_HIT.to_string(),
            },
            ChoiceOption {
                label: "Stand".to_string(),
                data: ACTION_STAND.to_string(),
            },
        ],
    }
}

fn outcome_text(result: &RoundResult) -> String {
    match result.outcome {
        RoundOutcome::PlayerWins if result.dealer_busted => format!(
            "Dealer busts at {}! You win. Send /newgame to play again.",
            result.dealer_score
        ),
        RoundOutcome::PlayerWins => format!(
            "You win, {} to {}! Send /newgame to play again.",
            result.player_score, result.dealer_score
        ),
        RoundOutcome::DealerWins => format!(
            "Dealer wins, {} to {}. Send /newgame to play again.",
            result.dealer_score, result.player_score
        ),
        RoundOutcome::Push => format!(
            "Push at {}. Send /newgame to play again.",
            result.player_score
        ),
    }
}
