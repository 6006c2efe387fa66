use crate::{CardKind, GameState};
use serde::{Deserialize, Serialize};

/// One row of the card effect table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum CardEffect {
    /// `gold += floor(base * multiplier) + noble_traitor_bonus`
    GainGold { base: i64 },
    /// `multiplier *= factor`, kept for the rest of the session.
    ScaleMultiplier(f64),
    LoseGold(i64),
    /// Flat bonus added to every later gold gain.
    AddBonus(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectReport {
    pub card: CardKind,
    pub gold_delta: i64,
    pub description: String,
    pub before: GameState,
    pub after: GameState,
}

pub fn apply_effect(card: CardKind, state: &mut GameState) -> EffectReport {
    let before = *state;
    let name = card.display_name();
    let description = match card.effect() {
        CardEffect::GainGold { base } => {
            let increment = state.scaled_gain(base);
            state.gold += increment;
            format!(
                "{name} increased gold by {increment} (including Noble Traitor bonus: {})",
                state.noble_traitor_bonus
            )
        }
        CardEffect::ScaleMultiplier(factor) => {
            state.multiplier *= factor;
            format!(
                "{name} increased gold multiplier to {}",
                format_multiplier(state.multiplier)
            )
        }
        CardEffect::LoseGold(amount) => {
            state.gold -= amount;
            format!("{name} deducted {amount} gold, current gold: {}", state.gold)
        }
        CardEffect::AddBonus(amount) => {
            state.noble_traitor_bonus += amount;
            format!(
                "{name} activated, each gold-increasing card now adds {} more gold",
                state.noble_traitor_bonus
            )
        }
    };
    log::debug!("{}: {}", card.id(), description);
    EffectReport {
        card,
        gold_delta: state.gold - before.gold,
        description,
        before,
        after: *state,
    }
}

/// Pure variant of [`apply_effect`] for callers that keep states by value.
pub fn next_state(card: CardKind, state: GameState) -> (GameState, EffectReport) {
    let mut next = state;
    let report = apply_effect(card, &mut next);
    (next, report)
}

fn format_multiplier(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_uses_current_bonus_in_description() {
        let mut state = GameState {
            gold: 0,
            multiplier: 1.0,
            noble_traitor_bonus: 50,
        };
        let report = apply_effect(CardKind::Thief, &mut state);
        assert_eq!(report.gold_delta, 150);
        assert_eq!(
            report.description,
            "Thief increased gold by 150 (including Noble Traitor bonus: 50)"
        );
    }

    #[test]
    fn multiplier_description_is_rounded() {
        let mut state = GameState::new();
        let report = apply_effect(CardKind::GadgetUpgrade, &mut state);
        assert_eq!(report.gold_delta, 0);
        assert_eq!(
            report.description,
            "Gadget Upgrade increased gold multiplier to 1.2"
        );
    }

    #[test]
    fn losses_can_go_negative() {
        let mut state = GameState {
            gold: 20,
            multiplier: 1.0,
            noble_traitor_bonus: 0,
        };
        apply_effect(CardKind::GuildInfighting, &mut state);
        assert_eq!(state.gold, -10);
    }

    #[test]
    fn next_state_leaves_input_untouched() {
        let start = GameState::new();
        let (next, report) = next_state(CardKind::Guards, start);
        assert_eq!(start.gold, 500);
        assert_eq!(next.gold, 450);
        assert_eq!(report.after, next);
        assert_eq!(
            report.description,
            "Guards deducted 50 gold, current gold: 450"
        );
    }
}
