use crate::schema::{Assets, CardDef, CatalogCard};
use cardwheel_core::{CardKind, ConfigError, GameConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const WHEEL_CONFIG_FILE: &str = "wheel.json";
pub const CARDS_FILE: &str = "cards.json";

/// Any problem with the asset directory. Always fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown card id {id:?} in {path}")]
    UnknownCard { path: PathBuf, id: String },
    #[error("card {id:?} listed twice in {path}")]
    DuplicateCard { path: PathBuf, id: String },
    #[error("{path} lists {actual} cards but the wheel has {expected} slots")]
    CardCount {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("invalid wheel config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reads `wheel.json`, falling back to the built-in defaults when absent.
pub fn load_game_config(dir: &Path) -> Result<GameConfig, AssetError> {
    let path = dir.join(WHEEL_CONFIG_FILE);
    let config: GameConfig = if path.exists() {
        load_json(&path)?
    } else {
        log::info!("{} not found, using default wheel", path.display());
        GameConfig::default()
    };
    config.validate()?;
    Ok(config)
}

pub fn load_catalog(dir: &Path, slot_count: usize) -> Result<Vec<CatalogCard>, AssetError> {
    let path = dir.join(CARDS_FILE);
    let defs: Vec<CardDef> = load_json(&path)?;
    let mut catalog: Vec<CatalogCard> = Vec::with_capacity(defs.len());
    for def in defs {
        let Some(kind) = CardKind::from_id(&def.id) else {
            return Err(AssetError::UnknownCard {
                path,
                id: def.id,
            });
        };
        if catalog.iter().any(|card| card.kind == kind) {
            return Err(AssetError::DuplicateCard {
                path,
                id: def.id,
            });
        }
        let display_name = def
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| kind.display_name().to_string());
        catalog.push(CatalogCard { kind, display_name });
    }
    if catalog.len() != slot_count {
        return Err(AssetError::CardCount {
            path,
            expected: slot_count,
            actual: catalog.len(),
        });
    }
    Ok(catalog)
}

pub fn load_assets(dir: &Path) -> Result<Assets, AssetError> {
    let config = load_game_config(dir)?;
    let catalog = load_catalog(dir, config.wheel.slot_count)?;
    log::debug!(
        "loaded {} cards from {}",
        catalog.len(),
        dir.join(CARDS_FILE).display()
    );
    Ok(Assets { config, catalog })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let raw = fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AssetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "cardwheel_data_test_{}_{}",
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).expect("write");
    }

    const FULL_CATALOG: &str = r#"[
  {"id":"lockpicker"},
  {"id":"gadget_upgrade","display_name":"Gadget Upgrade"},
  {"id":"guards"},
  {"id":"thief"},
  {"id":"noble_traitor"},
  {"id":"noble_party"},
  {"id":"patrol_guards"},
  {"id":"guild_infighting","display_name":"Guild Brawl"}
]"#;

    #[test]
    fn loads_catalog_with_default_config() {
        let dir = unique_temp_dir();
        write(&dir, CARDS_FILE, FULL_CATALOG);
        let assets = load_assets(&dir).expect("assets");
        assert_eq!(assets.config, GameConfig::default());
        assert_eq!(assets.kinds(), CardKind::ALL.to_vec());
        assert_eq!(assets.display_name(CardKind::GuildInfighting), "Guild Brawl");
        assert_eq!(assets.display_name(CardKind::Thief), "Thief");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn partial_wheel_config_keeps_defaults() {
        let dir = unique_temp_dir();
        write(&dir, WHEEL_CONFIG_FILE, r#"{"wheel":{"initial_speed":20.0}}"#);
        let config = load_game_config(&dir).expect("config");
        assert_eq!(config.wheel.initial_speed, 20.0);
        assert_eq!(config.wheel.deceleration, 0.3);
        assert_eq!(config.start.gold, 500);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_catalog_is_a_read_error() {
        let dir = unique_temp_dir();
        let err = load_assets(&dir).expect_err("missing cards");
        assert!(matches!(err, AssetError::Read { .. }));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_unknown_and_duplicate_cards() {
        let dir = unique_temp_dir();
        write(&dir, CARDS_FILE, r#"[{"id":"dragon"}]"#);
        assert!(matches!(
            load_catalog(&dir, 8),
            Err(AssetError::UnknownCard { ref id, .. }) if id == "dragon"
        ));
        write(&dir, CARDS_FILE, r#"[{"id":"thief"},{"id":"Thief"}]"#);
        assert!(matches!(
            load_catalog(&dir, 8),
            Err(AssetError::DuplicateCard { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_short_catalog_and_bad_config() {
        let dir = unique_temp_dir();
        write(&dir, CARDS_FILE, r#"[{"id":"thief"}]"#);
        assert!(matches!(
            load_catalog(&dir, 8),
            Err(AssetError::CardCount {
                expected: 8,
                actual: 1,
                ..
            })
        ));
        write(&dir, WHEEL_CONFIG_FILE, r#"{"wheel":{"deceleration":0.0}}"#);
        assert!(matches!(
            load_game_config(&dir),
            Err(AssetError::InvalidConfig(ConfigError::InvalidDeceleration(_)))
        ));
        write(&dir, WHEEL_CONFIG_FILE, r#"{"wheel":{"deceleration":1e-12}}"#);
        assert!(matches!(
            load_game_config(&dir),
            Err(AssetError::InvalidConfig(ConfigError::SpinTooLong(_)))
        ));
        write(&dir, WHEEL_CONFIG_FILE, "{ not json");
        assert!(matches!(
            load_game_config(&dir),
            Err(AssetError::Parse { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }
}
