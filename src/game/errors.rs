//! Error types for hands, card notation and turn flow.

use thiserror::Error;

use super::{controller::TurnPhase, entities::Card};

/// A hand that breaks the single-deck invariant.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HandError {
    #[error("{0} appears more than once in the hand")]
    DuplicateCard(Card),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardParseError {
    #[error("malformed card: {0:?}")]
    Malformed(String),
    #[error("invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("invalid suit: {0:?}")]
    InvalidSuit(String),
}

/// Errors returned by turn operations on a game in progress.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("can't do that during the {actual} phase (expected {expected})")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("deck is empty")]
    EmptyDeck,
    #[error("discard pile is empty")]
    EmptyDiscardPile,
    #[error("{0} is not in your hand")]
    CardNotInHand(Card),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to (de)serialize game state: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for turn operations
pub type Result<T> = std::result::Result<T, GameError>;
