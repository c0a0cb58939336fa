//! Domain models shared across the hazardfeed crates

pub mod coordinates;
pub mod status;

pub use coordinates::{format_float, Coordinates};
pub use status::UpdateStatus;
