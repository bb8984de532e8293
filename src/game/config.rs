//! Game configuration.

use serde::{Deserialize, Serialize};

use super::entities::DECK_SIZE;

pub const DEFAULT_HAND_SIZE: usize = 10;

/// Largest hand that still leaves room for the other hand and the up-card.
pub const MAX_HAND_SIZE: usize = (DECK_SIZE - 1) / 2;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt to each player (the hand size held between turns).
    pub hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::ten_card()
    }
}

impl GameConfig {
    #[must_use]
    pub fn seven_card() -> Self {
        Self { hand_size: 7 }
    }

    #[must_use]
    pub fn ten_card() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.hand_size == 0 || self.hand_size > MAX_HAND_SIZE {
            return Err(format!("Hand size must be between 1 and {MAX_HAND_SIZE}"));
        }

        Ok(())
    }
}
