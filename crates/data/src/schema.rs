use serde::{Deserialize, Serialize};

pub use cardwheel_core::{CardKind, GameConfig, StartingState, WheelConfig};

/// One entry of `cards.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDef {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    pub kind: CardKind,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct Assets {
    pub config: GameConfig,
    pub catalog: Vec<CatalogCard>,
}

impl Assets {
    pub fn kinds(&self) -> Vec<CardKind> {
        self.catalog.iter().map(|card| card.kind).collect()
    }

    pub fn display_name(&self, kind: CardKind) -> &str {
        self.catalog
            .iter()
            .find(|card| card.kind == kind)
            .map(|card| card.display_name.as_str())
            .unwrap_or_else(|| kind.display_name())
    }
}
