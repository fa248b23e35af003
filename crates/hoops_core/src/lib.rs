//! # hoops_core - Deterministic Basketball Match Simulation Engine
//!
//! This library provides a deterministic, turn-based basketball match
//! simulation engine with a JSON API for easy embedding in game frontends.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + rosters = same result)
//! - Dice-driven contested actions keyed on player position
//! - Full event log and box scores per match
//! - JSON API for easy integration

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{simulate_match, simulate_match_json, MatchRequest, RequestError};
pub use engine::{MatchEngine, MatchPlan};
pub use error::{MatchError, Result};

// Re-export core model types
pub use models::{
    EventType, MatchEvent, MatchSummary, Player, PlayerAttributes, PlayerStats, Position, Side,
    Team,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u32 = 1;
