use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SLOT_COUNT: usize = 8;
/// Longest spin a config may describe, in ticks (about half an hour at 60 fps).
pub const MAX_SPIN_TICKS: u32 = 100_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("slot count must be positive")]
    NoSlots,
    #[error("initial speed must be positive, got {0}")]
    InvalidSpeed(f64),
    #[error("deceleration must be positive, got {0}")]
    InvalidDeceleration(f64),
    #[error("wheel radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("pointer angle must be finite, got {0}")]
    InvalidPointerAngle(f64),
    #[error("spin would last {0:.0} ticks, limit is {max}", max = MAX_SPIN_TICKS)]
    SpinTooLong(f64),
    #[error("starting multiplier must be positive, got {0}")]
    InvalidMultiplier(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub slot_count: usize,
    /// Degrees per tick when a spin starts.
    pub initial_speed: f64,
    /// Degrees per tick removed after every tick.
    pub deceleration: f64,
    pub radius: f64,
    /// Screen angle of the fixed pointer, in degrees.
    pub pointer_angle: f64,
}

impl WheelConfig {
    pub fn slot_width(&self) -> f64 {
        360.0 / self.slot_count as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.initial_speed));
        }
        if !(self.deceleration.is_finite() && self.deceleration > 0.0) {
            return Err(ConfigError::InvalidDeceleration(self.deceleration));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.pointer_angle.is_finite() {
            return Err(ConfigError::InvalidPointerAngle(self.pointer_angle));
        }
        let ticks = self.initial_speed / self.deceleration;
        if !(ticks <= f64::from(MAX_SPIN_TICKS)) {
            return Err(ConfigError::SpinTooLong(ticks));
        }
        Ok(())
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            initial_speed: 15.0,
            deceleration: 0.3,
            radius: 200.0,
            pointer_angle: 180.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StartingState {
    pub gold: i64,
    pub multiplier: f64,
    pub noble_traitor_bonus: i64,
}

impl Default for StartingState {
    fn default() -> Self {
        Self {
            gold: 500,
            multiplier: 1.0,
            noble_traitor_bonus: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub wheel: WheelConfig,
    pub start: StartingState,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wheel.validate()?;
        if !(self.start.multiplier.is_finite() && self.start.multiplier > 0.0) {
            return Err(ConfigError::InvalidMultiplier(self.start.multiplier));
        }
        Ok(())
    }
}
