use crate::StartingState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub gold: i64,
    pub multiplier: f64,
    pub noble_traitor_bonus: i64,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_start(&StartingState::default())
    }

    pub fn from_start(start: &StartingState) -> Self {
        Self {
            gold: start.gold,
            multiplier: start.multiplier,
            noble_traitor_bonus: start.noble_traitor_bonus,
        }
    }

    /// Gold granted by a gold-increasing effect with the given base amount.
    pub fn scaled_gain(&self, base: i64) -> i64 {
        (base as f64 * self.multiplier).floor() as i64 + self.noble_traitor_bonus
    }

    pub fn gold_label(&self) -> String {
        format!("Gold: {}", self.gold)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_purse() {
        let state = GameState::new();
        assert_eq!(state.gold, 500);
        assert_eq!(state.multiplier, 1.0);
        assert_eq!(state.noble_traitor_bonus, 0);
        assert_eq!(state.gold_label(), "Gold: 500");
    }

    #[test]
    fn scaled_gain_floors_before_adding_bonus() {
        let state = GameState {
            gold: 0,
            multiplier: 1.2,
            noble_traitor_bonus: 50,
        };
        assert_eq!(state.scaled_gain(80), 96 + 50);
        assert_eq!(state.scaled_gain(120), 144 + 50);
    }
}
