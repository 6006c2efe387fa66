//! Asset loading and validation for the wheel.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
