//! Turn flow for a two-player game passed back and forth as snapshots.
//!
//! Each player holds a [`GinGame`]. The player whose turn it is draws, then
//! discards, and the game hands a [`GameState`] to its observer for delivery
//! to the other player, who loads it to begin their own turn. The validator
//! is consulted after every discard and every load.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    config::GameConfig,
    entities::{Card, Deck},
    errors::{GameError, Result},
    validator::can_meld_all_cards,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TurnPhase {
    /// Waiting to pick from the deck or the discard pile.
    Draw,
    /// Holding one extra card that must be discarded.
    Discard,
    /// Opponent's turn.
    Idle,
    /// Someone has gin. Nothing more can be played.
    GameEnd,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Draw => "draw",
            Self::Discard => "discard",
            Self::Idle => "idle",
            Self::GameEnd => "game end",
        };
        write!(f, "{repr}")
    }
}

/// Everything the next player needs to pick up the game. The sender is the
/// player who just finished a turn.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub deck: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub sender_hand: Vec<Card>,
    pub receiver_hand: Vec<Card>,
    pub sender_drew_from_deck: bool,
    pub index_sender_drew_to: Option<usize>,
    pub index_sender_discarded_from: Option<usize>,
}

impl GameState {
    /// Shuffles a fresh deck and deals `config.hand_size` cards to each
    /// player, alternating, then turns one card up onto the discard pile.
    pub fn deal<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let mut deck = Deck::default();
        deck.shuffle_with(rng);

        let mut sender_hand = Vec::with_capacity(config.hand_size + 1);
        let mut receiver_hand = Vec::with_capacity(config.hand_size + 1);
        for _ in 0..config.hand_size {
            sender_hand.push(deck.draw().ok_or(GameError::EmptyDeck)?);
            receiver_hand.push(deck.draw().ok_or(GameError::EmptyDeck)?);
        }
        let up_card = deck.draw().ok_or(GameError::EmptyDeck)?;

        Ok(Self {
            deck: deck.into_cards(),
            discard_pile: vec![up_card],
            sender_hand,
            receiver_hand,
            sender_drew_from_deck: false,
            index_sender_drew_to: None,
            index_sender_discarded_from: None,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Hooks for everything outside the turn logic (sound, win banners,
/// sending the snapshot to the other player).
pub trait GameObserver {
    /// A card landed on the discard pile.
    fn card_played(&mut self) {}

    fn game_ended(&mut self, _did_win: bool) {}

    /// The local player finished a turn; `state` should go to the opponent.
    fn turn_completed(&mut self, _state: &GameState) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// One player's view of the game.
#[derive(Debug)]
pub struct GinGame<O: GameObserver = NoopObserver> {
    player_hand: Vec<Card>,
    opponent_hand: Vec<Card>,
    deck: Vec<Card>,
    discard_pile: Vec<Card>,
    phase: TurnPhase,
    drew_from_deck: bool,
    index_drawn_to: Option<usize>,
    index_discarded_from: Option<usize>,
    player_has_won: bool,
    opponent_has_won: bool,
    last_loaded: Option<GameState>,
    observer: O,
}

impl Default for GinGame {
    fn default() -> Self {
        Self::new(NoopObserver)
    }
}

impl<O: GameObserver> GinGame<O> {
    /// An empty table waiting for its first [`GinGame::load_state`].
    #[must_use]
    pub fn new(observer: O) -> Self {
        Self {
            player_hand: Vec::new(),
            opponent_hand: Vec::new(),
            deck: Vec::new(),
            discard_pile: Vec::new(),
            phase: TurnPhase::Idle,
            drew_from_deck: false,
            index_drawn_to: None,
            index_discarded_from: None,
            player_has_won: false,
            opponent_has_won: false,
            last_loaded: None,
            observer,
        }
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn take_drawn_card(&mut self, card: Card, from_deck: bool) -> Card {
        self.player_hand.push(card);
        self.index_drawn_to = Some(self.player_hand.len() - 1);
        self.drew_from_deck = from_deck;
        self.phase = TurnPhase::Discard;
        debug!(
            "drew {card} from the {}",
            if from_deck { "deck" } else { "discard pile" }
        );
        card
    }

    pub fn draw_from_deck(&mut self) -> Result<Card> {
        self.expect_phase(TurnPhase::Draw)?;
        let card = self.deck.pop().ok_or(GameError::EmptyDeck)?;
        Ok(self.take_drawn_card(card, true))
    }

    pub fn draw_from_discard(&mut self) -> Result<Card> {
        self.expect_phase(TurnPhase::Draw)?;
        let card = self.discard_pile.pop().ok_or(GameError::EmptyDiscardPile)?;
        Ok(self.take_drawn_card(card, false))
    }

    /// Discards `card` to end the turn and checks the remaining hand for gin.
    /// Returns whether the player won. The resulting snapshot is handed to
    /// the observer either way.
    pub fn discard(&mut self, card: Card) -> Result<bool> {
        self.expect_phase(TurnPhase::Discard)?;
        let idx = self
            .player_hand
            .iter()
            .position(|held| *held == card)
            .ok_or(GameError::CardNotInHand(card))?;

        self.player_hand.remove(idx);
        self.index_discarded_from = Some(idx);
        self.discard_pile.push(card);
        self.observer.card_played();
        debug!("discarded {card}");

        self.player_has_won = can_meld_all_cards(&self.player_hand);
        if self.player_has_won {
            info!("gin with {} cards", self.player_hand.len());
            self.phase = TurnPhase::GameEnd;
            self.observer.game_ended(true);
        } else {
            self.phase = TurnPhase::Idle;
        }

        let state = self.snapshot();
        self.observer.turn_completed(&state);
        Ok(self.player_has_won)
    }

    /// Adopts a received snapshot. On the player's turn the receiver's hand
    /// is theirs; otherwise the snapshot is one the player sent and the
    /// sender's hand is theirs.
    ///
    /// A snapshot identical to the last one loaded, or to the one we would
    /// send ourselves, is a redelivery and is ignored. Returns whether the
    /// state was applied.
    pub fn load_state(&mut self, state: GameState, is_players_turn: bool) -> bool {
        if self.last_loaded.as_ref() == Some(&state) || state == self.snapshot() {
            debug!("ignoring snapshot already applied");
            return false;
        }
        self.last_loaded = Some(state.clone());

        self.deck = state.deck;
        self.discard_pile = state.discard_pile;
        if is_players_turn {
            self.player_hand = state.receiver_hand;
            self.opponent_hand = state.sender_hand;
        } else {
            self.player_hand = state.sender_hand;
            self.opponent_hand = state.receiver_hand;
        }
        self.index_drawn_to = None;
        self.index_discarded_from = None;

        self.check_win();
        if self.player_has_won || self.opponent_has_won {
            info!(
                "game over on load: {}",
                if self.player_has_won { "won" } else { "lost" }
            );
            self.phase = TurnPhase::GameEnd;
            self.observer.game_ended(self.player_has_won);
        } else if is_players_turn {
            self.phase = TurnPhase::Draw;
        } else {
            self.phase = TurnPhase::Idle;
        }
        true
    }

    /// Re-runs the validator on both hands.
    pub fn check_win(&mut self) {
        self.player_has_won = can_meld_all_cards(&self.player_hand);
        self.opponent_has_won = can_meld_all_cards(&self.opponent_hand);
    }

    /// The state as it should be sent to the opponent, with this player as
    /// the sender.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        GameState {
            deck: self.deck.clone(),
            discard_pile: self.discard_pile.clone(),
            sender_hand: self.player_hand.clone(),
            receiver_hand: self.opponent_hand.clone(),
            sender_drew_from_deck: self.drew_from_deck,
            index_sender_drew_to: self.index_drawn_to,
            index_sender_discarded_from: self.index_discarded_from,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    #[must_use]
    pub fn opponent_hand(&self) -> &[Card] {
        &self.opponent_hand
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    #[must_use]
    pub fn player_has_won(&self) -> bool {
        self.player_has_won
    }

    #[must_use]
    pub fn opponent_has_won(&self) -> bool {
        self.opponent_has_won
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }
}
