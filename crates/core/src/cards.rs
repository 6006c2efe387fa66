use crate::CardEffect;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Lockpicker,
    GadgetUpgrade,
    Guards,
    Thief,
    NobleTraitor,
    NobleParty,
    PatrolGuards,
    GuildInfighting,
}

impl CardKind {
    /// Every card, in catalog order.
    pub const ALL: [CardKind; 8] = [
        CardKind::Lockpicker,
        CardKind::GadgetUpgrade,
        CardKind::Guards,
        CardKind::Thief,
        CardKind::NobleTraitor,
        CardKind::NobleParty,
        CardKind::PatrolGuards,
        CardKind::GuildInfighting,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CardKind::Lockpicker => "lockpicker",
            CardKind::GadgetUpgrade => "gadget_upgrade",
            CardKind::Guards => "guards",
            CardKind::Thief => "thief",
            CardKind::NobleTraitor => "noble_traitor",
            CardKind::NobleParty => "noble_party",
            CardKind::PatrolGuards => "patrol_guards",
            CardKind::GuildInfighting => "guild_infighting",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|card| card.id() == normalized)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CardKind::Lockpicker => "Lockpicker",
            CardKind::GadgetUpgrade => "Gadget Upgrade",
            CardKind::Guards => "Guards",
            CardKind::Thief => "Thief",
            CardKind::NobleTraitor => "Noble Traitor",
            CardKind::NobleParty => "Noble Party",
            CardKind::PatrolGuards => "Patrol Guards",
            CardKind::GuildInfighting => "Guild Infighting",
        }
    }

    pub fn effect(self) -> CardEffect {
        match self {
            CardKind::Lockpicker => CardEffect::GainGold { base: 80 },
            CardKind::GadgetUpgrade => CardEffect::ScaleMultiplier(1.2),
            CardKind::Guards => CardEffect::LoseGold(50),
            CardKind::Thief => CardEffect::GainGold { base: 100 },
            CardKind::NobleTraitor => CardEffect::AddBonus(50),
            CardKind::NobleParty => CardEffect::GainGold { base: 120 },
            CardKind::PatrolGuards => CardEffect::LoseGold(50),
            CardKind::GuildInfighting => CardEffect::LoseGold(30),
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_round_trip_and_are_unique() {
        let ids: HashSet<&str> = CardKind::ALL.iter().map(|card| card.id()).collect();
        assert_eq!(ids.len(), CardKind::ALL.len());
        for card in CardKind::ALL {
            assert_eq!(CardKind::from_id(card.id()), Some(card));
        }
    }

    #[test]
    fn from_id_accepts_display_spelling() {
        assert_eq!(CardKind::from_id("Noble Party"), Some(CardKind::NobleParty));
        assert_eq!(CardKind::from_id("guild-infighting"), Some(CardKind::GuildInfighting));
        assert_eq!(CardKind::from_id("dragon"), None);
    }
}
