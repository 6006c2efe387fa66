//! Rotation, deceleration and slot selection for the prize wheel.
//!
//! Angles are in degrees. The wheel sprite rotates clockwise by `rotation`;
//! slot `i` sits at screen angle `i * width - rotation` and the pointer is
//! fixed at `pointer_angle` (180, the left side of the wheel, by default).

use crate::{ConfigError, WheelConfig};
use serde::{Deserialize, Serialize};

/// Speeds at or below this are treated as stopped.
pub const SPEED_EPSILON: f64 = 1e-9;
/// Angles are snapped to a millionth of a degree before sector lookup so
/// that exact boundaries do not flicker between neighbours.
const ANGLE_SNAP: f64 = 1e6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SpinTick {
    Idle,
    Spinning { speed: f64 },
    Stopped { slot: usize, rotation: f64 },
}

#[derive(Debug, Clone)]
pub struct Wheel {
    config: WheelConfig,
    rotation: f64,
    speed: f64,
    launch_speed: f64,
    ticks: u32,
}

impl Wheel {
    pub fn new(config: WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rotation: 0.0,
            speed: 0.0,
            launch_speed: 0.0,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_spinning(&self) -> bool {
        self.speed > 0.0
    }

    /// Launches a spin at the configured speed. Returns `false` while a spin
    /// is already running.
    pub fn start_spin(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.launch_speed = self.config.initial_speed;
        self.speed = self.launch_speed;
        self.ticks = 0;
        true
    }

    pub fn tick(&mut self) -> SpinTick {
        if !self.is_spinning() {
            return SpinTick::Idle;
        }
        self.rotation += self.speed;
        self.ticks = self.ticks.saturating_add(1);
        let next = speed_after(self.launch_speed, self.config.deceleration, self.ticks);
        if next <= SPEED_EPSILON {
            self.speed = 0.0;
            self.rotation = normalize_angle(self.rotation);
            let slot = slot_under_pointer(self.rotation, &self.config);
            log::debug!(
                "wheel stopped after {} ticks at {:.3} deg, slot {}",
                self.ticks,
                self.rotation,
                slot
            );
            return SpinTick::Stopped {
                slot,
                rotation: self.rotation,
            };
        }
        self.speed = next;
        SpinTick::Spinning { speed: next }
    }

    pub fn slot_under_pointer(&self) -> usize {
        slot_under_pointer(self.rotation, &self.config)
    }

    pub fn slot_position(&self, slot: usize, center: (f64, f64)) -> (f64, f64) {
        slot_position(slot, self.rotation, &self.config, center)
    }
}

fn speed_after(launch: f64, deceleration: f64, ticks: u32) -> f64 {
    launch - deceleration * f64::from(ticks)
}

/// Maps any angle into `[0, 360)`, snapped to [`ANGLE_SNAP`].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    let snapped = (wrapped * ANGLE_SNAP).round() / ANGLE_SNAP;
    if snapped >= 360.0 {
        0.0
    } else {
        snapped
    }
}

/// Sector lookup in pointer frame: slot `s` covers `[s * width, (s + 1) * width)`.
pub fn slot_at_angle(angle: f64, slot_count: usize) -> usize {
    let width = 360.0 / slot_count as f64;
    let angle = normalize_angle(angle);
    let sector = (angle / width).floor() as usize;
    sector % slot_count
}

/// Slot currently lined up with the pointer for a given wheel rotation.
pub fn slot_under_pointer(rotation: f64, config: &WheelConfig) -> usize {
    let half = config.slot_width() / 2.0;
    slot_at_angle(rotation + config.pointer_angle + half, config.slot_count)
}

/// Screen angle of a slot in degrees.
pub fn slot_screen_angle(slot: usize, rotation: f64, config: &WheelConfig) -> f64 {
    slot as f64 * config.slot_width() - rotation
}

pub fn slot_position(
    slot: usize,
    rotation: f64,
    config: &WheelConfig,
    center: (f64, f64),
) -> (f64, f64) {
    let theta = slot_screen_angle(slot, rotation, config).to_radians();
    (
        center.0 + config.radius * theta.cos(),
        center.1 + config.radius * theta.sin(),
    )
}

/// Number of ticks a full spin lasts. Saturates at `u32::MAX` for configs
/// that [`WheelConfig::validate`] would reject.
pub fn spin_ticks(config: &WheelConfig) -> u32 {
    let launch = config.initial_speed;
    let decel = config.deceleration;
    let estimate = ((launch - SPEED_EPSILON) / decel).ceil();
    if !(estimate < f64::from(u32::MAX)) {
        return u32::MAX;
    }
    let mut ticks = estimate.max(1.0) as u32;
    while ticks > 1 && speed_after(launch, decel, ticks - 1) <= SPEED_EPSILON {
        ticks -= 1;
    }
    while ticks < u32::MAX && speed_after(launch, decel, ticks) > SPEED_EPSILON {
        ticks += 1;
    }
    ticks
}

/// Total rotation a full spin adds to the wheel.
pub fn spin_distance(config: &WheelConfig) -> f64 {
    (0..spin_ticks(config))
        .map(|tick| speed_after(config.initial_speed, config.deceleration, tick))
        .sum()
}
