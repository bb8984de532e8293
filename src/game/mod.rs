//! Gin Rummy game logic.
//!
//! This module provides:
//! - Card, deck and meld types
//! - The gin validator (can a hand be fully melded?)
//! - Game configuration
//! - Turn flow for a two-player game exchanged as snapshots

pub mod config;
pub mod controller;
pub mod entities;
pub mod errors;
pub mod melds;
pub mod validator;

pub use config::GameConfig;
pub use controller::{GameObserver, GameState, GinGame, NoopObserver, TurnPhase};
pub use errors::{CardParseError, GameError, HandError};
pub use validator::{can_meld_all_cards, check_hand, find_gin_melds, try_can_meld_all_cards};
