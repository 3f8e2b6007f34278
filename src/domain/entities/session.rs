//! A single Blackjack round: two hands, an explicit phase, house rules.

use crate::application::errors::GameError;
use crate::domain::entities::Hand;
use crate::domain::traits::{CardSource, DeckRef};

/// Dealer stands on any total of 17 or more, soft or hard.
const DEALER_STAND_SCORE: u8 = 17;

/// Round phase. `Lost` and `Resolved` are terminal; only a fresh session
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    New,
    PlayerTurn,
    DealerTurn,
    Lost,
    Resolved,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Lost | Phase::Resolved)
    }
}

/// Result of resolving a round on stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    PlayerWins,
    DealerWins,
    Push,
}

/// Final state reported when the dealer has played out.
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub player_score: u8,
    pub dealer_score: u8,
    pub dealer_busted: bool,
}

/// What happened after a single player draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Player is still in the round with this score.
    Continue(u8),
    /// Player went over 21; the round is lost.
    Bust(u8),
}

/// One Blackjack round against the automated dealer.
///
/// Holds the opaque deck reference and both hands. All card draws go
/// through the [`CardSource`] seam; operations invoked outside their valid
/// phase fail with [`GameError::InvalidAction`] and leave the session
/// untouched. Terminal sessions stay readable for display.
#[derive(Debug)]
pub struct GameSession {
    deck: DeckRef,
    player: Hand,
    dealer: Hand,
    phase: Phase,
}

impl GameSession {
    pub fn new(deck: DeckRef) -> Self {
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::New,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn deck(&self) -> &DeckRef {
        &self.deck
    }

    /// Deal the opening hands: two cards to the player, then two to the
    /// dealer. The dealer's second card stays hidden from presentation
    /// until the round resolves.
    pub async fn deal_initial(&mut self, source: &dyn CardSource) -> Result<(), GameError> {
        if self.phase != Phase::New {
            return Err(GameError::InvalidAction(
                "the round has already been dealt".to_string(),
            ));
        }

        let cards = source.draw(&self.deck, 2).await?;
        self.player.extend(cards);
        let cards = source.draw(&self.deck, 2).await?;
        self.dealer.extend(cards);

        self.phase = Phase::PlayerTurn;
        tracing::debug!(
            "Dealt opening hands: player {}, dealer shows {}",
            self.player.score(),
            self.dealer.cards()[0]
        );
        Ok(())
    }

    /// Draw one card for the player. Busting ends the round immediately.
    pub async fn hit(&mut self, source: &dyn CardSource) -> Result<HitResult, GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::InvalidAction(
                "you can only hit during your turn".to_string(),
            ));
        }

        let cards = source.draw(&self.deck, 1).await?;
        self.player.extend(cards);

        let score = self.player.score();
        if score > 21 {
            self.phase = Phase::Lost;
            tracing::debug!("Player busted at {}", score);
            Ok(HitResult::Bust(score))
        } else {
            Ok(HitResult::Continue(score))
        }
    }

    /// End the player's turn and play out the dealer: draw while the
    /// dealer total is below 17, then resolve. Atomic from the player's
    /// perspective; no input is possible while the dealer draws.
    pub async fn stand(&mut self, source: &dyn CardSource) -> Result<RoundResult, GameError> {
        if self.phase != Phase::PlayerTurn {
            return Err(GameError::InvalidAction(
                "you can only stand during your turn".to_string(),
            ));
        }

        self.phase = Phase::DealerTurn;

        while self.dealer.score() < DEALER_STAND_SCORE {
            let cards = source.draw(&self.deck, 1).await?;
            self.dealer.extend(cards);
        }

        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let dealer_busted = dealer_score > 21;

        let outcome = if dealer_busted || player_score > dealer_score {
            RoundOutcome::PlayerWins
        } else if player_score < dealer_score {
            RoundOutcome::DealerWins
        } else {
            RoundOutcome::Push
        };

        self.phase = Phase::Resolved;
        tracing::debug!(
            "Round resolved: player {} vs dealer {} -> {:?}",
            player_score,
            dealer_score,
            outcome
        );

        Ok(RoundResult {
            outcome,
            player_score,
            dealer_score,
            dealer_busted,
        })
    }
}
