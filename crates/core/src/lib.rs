//! Core wheel logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod effects;
pub mod events;
pub mod rng;
pub mod session;
pub mod slots;
pub mod state;
pub mod wheel;

pub use cards::*;
pub use config::*;
pub use effects::*;
pub use events::*;
pub use rng::*;
pub use session::*;
pub use slots::*;
pub use state::*;
pub use wheel::*;
