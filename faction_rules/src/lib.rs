//! # Faction Rules
//!
//! The "World Bible" crate for Rogue City - the static alignment taxonomy,
//! faction definitions, relationship graph, and reaction scales. Everything
//! in this crate is read-only after construction and is shared by every
//! character; per-character state lives in `reputation_core`.

pub mod alignment;
pub mod config;
pub mod faction;
pub mod reaction;

pub use alignment::*;
pub use config::*;
pub use faction::*;
pub use reaction::*;
