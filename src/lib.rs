//! # Gin Rummy
//!
//! A Gin Rummy engine built around a single question: can every card in a
//! hand be arranged into melds with no deadwood?
//!
//! A meld is either a **run** (three or more consecutive ranks of one suit,
//! Ace low, no wrapping past King) or a **set** (three or four cards of one
//! rank in different suits). A hand with no deadwood is **gin** and wins
//! the game.
//!
//! ## Core Modules
//!
//! - [`game::entities`]: Suits, ranks, cards and the deck
//! - [`game::validator`]: Backtracking search for a full meld partition
//! - [`game::controller`]: Draw/discard turn flow that consults the validator
//!
//! ## Example
//!
//! ```
//! use gin_rummy::{Card, can_meld_all_cards};
//!
//! let hand: Vec<Card> = ["5h", "6h", "7h", "7s", "7d", "7c", "8c", "9c", "10c", "Jc"]
//!     .iter()
//!     .map(|card| card.parse().unwrap())
//!     .collect();
//! assert!(can_meld_all_cards(&hand));
//! ```

/// Core game logic: cards, melds, validation and turn flow.
pub mod game;
pub use game::{
    CardParseError, GameConfig, GameError, GameObserver, GameState, GinGame, HandError,
    NoopObserver, TurnPhase, can_meld_all_cards, check_hand,
    entities::{self, Card, Deck, Rank, Suit},
    find_gin_melds,
    melds::{self, Meld},
    try_can_meld_all_cards,
};
