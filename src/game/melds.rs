use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

use super::entities::{Card, NUM_RANKS, Rank, Suit};

pub const MIN_MELD_LEN: usize = 3;
pub const MAX_SET_LEN: usize = 4;

/// A group of cards that scores as a unit.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Meld {
    /// `len` consecutive ranks of one suit, starting at `start`.
    Run { suit: Suit, start: Rank, len: usize },
    /// One rank across distinct suits.
    Set { rank: Rank, suits: Vec<Suit> },
}

impl Meld {
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        match self {
            Self::Run { suit, start, len } => Rank::ALL
                .iter()
                .skip(start.index())
                .take(*len)
                .map(|rank| Card::new(*rank, *suit))
                .collect(),
            Self::Set { rank, suits } => suits.iter().map(|suit| Card::new(*rank, *suit)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Run { len, .. } => *len,
            Self::Set { suits, .. } => suits.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs need three or more ranks that stay at or below King. Sets need
    /// three or four distinct suits.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Run { start, len, .. } => *len >= MIN_MELD_LEN && start.index() + len <= NUM_RANKS,
            Self::Set { suits, .. } => {
                let distinct: BTreeSet<_> = suits.iter().collect();
                distinct.len() == suits.len() && (MIN_MELD_LEN..=MAX_SET_LEN).contains(&suits.len())
            }
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Run { .. } => "run",
            Self::Set { .. } => "set",
        };
        let cards = self
            .cards()
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{kind}[{cards}]")
    }
}
