use crate::{CardKind, RngState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("expected {expected} cards for the wheel, got {actual}")]
    CardCount { expected: usize, actual: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(CardKind),
}

/// Shuffled card-to-slot assignment with a one-shot reveal flag per slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotBoard {
    cards: Vec<CardKind>,
    revealed: Vec<bool>,
}

impl SlotBoard {
    /// Shuffles `cards` over `slot_count` slots. Every card must be distinct
    /// and there must be exactly one per slot.
    pub fn assign(
        cards: &[CardKind],
        slot_count: usize,
        rng: &mut RngState,
    ) -> Result<Self, SlotError> {
        let mut cards = Self::checked(cards, slot_count)?;
        rng.shuffle(&mut cards);
        Ok(Self::unshuffled(cards))
    }

    /// Fixed assignment, slot `i` holds `cards[i]`.
    pub fn from_order(cards: &[CardKind], slot_count: usize) -> Result<Self, SlotError> {
        Self::checked(cards, slot_count).map(Self::unshuffled)
    }

    fn checked(cards: &[CardKind], slot_count: usize) -> Result<Vec<CardKind>, SlotError> {
        if cards.len() != slot_count {
            return Err(SlotError::CardCount {
                expected: slot_count,
                actual: cards.len(),
            });
        }
        for (idx, card) in cards.iter().enumerate() {
            if cards[..idx].contains(card) {
                return Err(SlotError::DuplicateCard(*card));
            }
        }
        Ok(cards.to_vec())
    }

    fn unshuffled(cards: Vec<CardKind>) -> Self {
        let revealed = vec![false; cards.len()];
        Self { cards, revealed }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_at(&self, slot: usize) -> Option<CardKind> {
        self.cards.get(slot).copied()
    }

    pub fn is_revealed(&self, slot: usize) -> bool {
        self.revealed.get(slot).copied().unwrap_or(false)
    }

    /// Marks `slot` revealed and hands back its card. Already revealed or
    /// out-of-range slots yield `None`.
    pub fn reveal(&mut self, slot: usize) -> Option<CardKind> {
        let flag = self.revealed.get_mut(slot)?;
        if *flag {
            return None;
        }
        *flag = true;
        self.cards.get(slot).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|flag| **flag).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|flag| *flag)
    }

    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn assignment_is_a_bijection() {
        for seed in 0..32 {
            let mut rng = RngState::from_seed(seed);
            let board = SlotBoard::assign(&CardKind::ALL, 8, &mut rng).expect("assign");
            let unique: HashSet<CardKind> = board.cards().iter().copied().collect();
            assert_eq!(board.len(), 8);
            assert_eq!(unique.len(), 8);
            assert_eq!(board.revealed_count(), 0);
        }
    }

    #[test]
    fn shuffle_varies_with_seed() {
        let orders: HashSet<Vec<CardKind>> = (0..16)
            .map(|seed| {
                let mut rng = RngState::from_seed(seed);
                SlotBoard::assign(&CardKind::ALL, 8, &mut rng)
                    .expect("assign")
                    .cards()
                    .to_vec()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn reveal_fires_once() {
        let mut board = SlotBoard::from_order(&CardKind::ALL, 8).expect("board");
        assert_eq!(board.reveal(3), Some(CardKind::Thief));
        assert_eq!(board.reveal(3), None);
        assert!(board.is_revealed(3));
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.reveal(99), None);
    }

    #[test]
    fn rejects_wrong_count_and_duplicates() {
        let mut rng = RngState::from_seed(1);
        assert_eq!(
            SlotBoard::assign(&CardKind::ALL[..7], 8, &mut rng),
            Err(SlotError::CardCount {
                expected: 8,
                actual: 7
            })
        );
        let mut doubled = CardKind::ALL;
        doubled[7] = CardKind::Guards;
        assert_eq!(
            SlotBoard::from_order(&doubled, 8),
            Err(SlotError::DuplicateCard(CardKind::Guards))
        );
    }

    #[test]
    fn all_revealed_after_every_slot() {
        let mut board = SlotBoard::from_order(&CardKind::ALL, 8).expect("board");
        for slot in 0..8 {
            assert!(!board.all_revealed());
            assert!(board.reveal(slot).is_some());
        }
        assert!(board.all_revealed());
    }
}
