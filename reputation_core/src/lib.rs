//! # Reputation Core
//!
//! The per-character faction reputation and alignment engine for Rogue City.
//! This crate interfaces with `faction_rules` (the static world bible) and
//! tracks everything that changes as one character plays:
//!
//! - **state**: current alignment plus accumulated drift pressure
//! - **ledger**: bounded faction and NPC standing scores with audit history
//! - **cascade**: one-hop propagation of reputation changes to related factions
//! - **decay**: time-based pull of faction standings back toward neutral
//! - **resolver**: pure reaction resolution for dialogue and pricing queries
//! - **snapshot**: the save-file shape that round-trips a character's standing
//!
//! ## Design Philosophy
//!
//! - **Nothing here is fatal**: scores saturate at their bounds, unknown ids
//!   degrade to no-ops, and malformed save data falls back to safe defaults.
//! - **Single writer**: each character's state is exclusively owned by that
//!   character's session; the shared rules are immutable and lock-free.

pub mod audit;
pub mod cascade;
pub mod character;
pub mod decay;
pub mod ledger;
pub mod resolver;
pub mod snapshot;
pub mod state;

pub use audit::*;
pub use cascade::*;
pub use character::*;
pub use ledger::*;
pub use resolver::*;
pub use snapshot::*;
pub use state::*;
