//! Gin detection.
//!
//! A hand is gin when every card belongs to some run or set with nothing
//! left over. The search works on a presence grid indexed by suit and rank.
//! At each level it picks the first remaining card in suit-major order (the
//! anchor), tries every meld that could contain it, and recurses on what is
//! left. Every full partition covers the anchor with exactly one meld, so
//! restricting each level to anchor-containing melds loses no solutions.

use log::{debug, trace};
use std::collections::HashSet;

use super::{
    entities::{Card, NUM_RANKS, NUM_SUITS, Rank, Suit},
    errors::HandError,
    melds::{MIN_MELD_LEN, Meld},
};

/// Scratch copy of the cards still waiting for a meld. Lives for a single
/// validation call and is restored in place on every backtrack.
#[derive(Debug)]
struct PresenceGrid {
    cells: [[bool; NUM_RANKS]; NUM_SUITS],
    remaining: usize,
}

impl PresenceGrid {
    fn from_hand(hand: &[Card]) -> Self {
        let mut cells = [[false; NUM_RANKS]; NUM_SUITS];
        for card in hand {
            cells[card.suit.index()][card.rank.index()] = true;
        }
        // Counted from the hand, not the grid. A duplicated card leaves the
        // two out of step and the search then reports no gin.
        Self {
            cells,
            remaining: hand.len(),
        }
    }

    fn has(&self, suit: Suit, rank_idx: usize) -> bool {
        self.cells[suit.index()][rank_idx]
    }

    /// First card still present, scanning suits then ranks in ascending order.
    fn anchor(&self) -> Option<Card> {
        Suit::ALL.into_iter().find_map(|suit| {
            self.cells[suit.index()]
                .iter()
                .position(|present| *present)
                .and_then(Rank::from_index)
                .map(|rank| Card::new(rank, suit))
        })
    }

    fn take(&mut self, meld: &Meld) {
        for card in meld.cards() {
            self.cells[card.suit.index()][card.rank.index()] = false;
        }
        self.remaining -= meld.len();
    }

    fn put_back(&mut self, meld: &Meld) {
        for card in meld.cards() {
            self.cells[card.suit.index()][card.rank.index()] = true;
        }
        self.remaining += meld.len();
    }

    /// Every run and set in the grid that contains `anchor`.
    ///
    /// Runs come first, ordered by start rank then length. Sets follow: with
    /// three suits on hand there is one set; with four there are the
    /// three-card sets that keep the anchor (dropping each other suit in
    /// turn) and then the full set.
    fn melds_containing(&self, anchor: Card) -> Vec<Meld> {
        let suit = anchor.suit;
        let pos = anchor.rank.index();
        let mut melds = Vec::new();

        for start in 0..=(NUM_RANKS - MIN_MELD_LEN) {
            for len in MIN_MELD_LEN..=(NUM_RANKS - start) {
                let end = start + len - 1;
                if pos < start || pos > end {
                    continue;
                }
                if !(start..=end).all(|idx| self.has(suit, idx)) {
                    continue;
                }
                if let Some(start) = Rank::from_index(start) {
                    melds.push(Meld::Run { suit, start, len });
                }
            }
        }

        let suits: Vec<Suit> = Suit::ALL
            .into_iter()
            .filter(|s| self.has(*s, pos))
            .collect();
        let rank = anchor.rank;
        match suits.len() {
            3 => melds.push(Meld::Set { rank, suits }),
            4 => {
                for excluded in suits.iter().filter(|s| **s != suit) {
                    let subset = suits.iter().copied().filter(|s| s != excluded).collect();
                    melds.push(Meld::Set {
                        rank,
                        suits: subset,
                    });
                }
                melds.push(Meld::Set { rank, suits });
            }
            _ => {}
        }

        melds
    }
}

/// Depth-first search for a full partition. `melds` holds the melds chosen
/// on the current branch and is left holding the witness on success.
fn search(grid: &mut PresenceGrid, melds: &mut Vec<Meld>) -> bool {
    if grid.remaining == 0 {
        return true;
    }

    let Some(anchor) = grid.anchor() else {
        // Cards remain on the count but none on the grid.
        return false;
    };

    for meld in grid.melds_containing(anchor) {
        trace!("depth {}: trying {meld} for {anchor}", melds.len());
        grid.take(&meld);
        melds.push(meld);
        if search(grid, melds) {
            return true;
        }
        if let Some(meld) = melds.pop() {
            grid.put_back(&meld);
        }
    }

    false
}

/// Returns one partition of `hand` into valid melds with no deadwood, or
/// `None` if there is none. Any partition found is a witness only; no
/// attempt is made to pick a best one.
///
/// The hand must not repeat a card. See [`check_hand`].
#[must_use]
pub fn find_gin_melds(hand: &[Card]) -> Option<Vec<Meld>> {
    let mut grid = PresenceGrid::from_hand(hand);
    let mut melds = Vec::with_capacity(hand.len() / MIN_MELD_LEN);
    let found = search(&mut grid, &mut melds);
    debug!(
        "validated {} card hand: {}",
        hand.len(),
        if found { "gin" } else { "not gin" }
    );
    found.then_some(melds)
}

/// Whether every card in `hand` can be arranged into runs of three or more
/// consecutive same-suit ranks and sets of three or four same-rank cards,
/// leaving no deadwood. An empty hand is trivially gin.
///
/// Card order doesn't matter. The hand is assumed to come from a single
/// deck; with a repeated card the answer is unspecified (but the call still
/// returns). Use [`try_can_meld_all_cards`] to have that checked.
#[must_use]
pub fn can_meld_all_cards(hand: &[Card]) -> bool {
    find_gin_melds(hand).is_some()
}

/// Rejects hands that hold the same card twice.
pub fn check_hand(hand: &[Card]) -> Result<(), HandError> {
    let mut seen = HashSet::with_capacity(hand.len());
    match hand.iter().find(|card| !seen.insert(**card)) {
        Some(card) => Err(HandError::DuplicateCard(*card)),
        None => Ok(()),
    }
}

/// [`can_meld_all_cards`] behind a [`check_hand`] guard.
pub fn try_can_meld_all_cards(hand: &[Card]) -> Result<bool, HandError> {
    check_hand(hand)?;
    Ok(can_meld_all_cards(hand))
}
