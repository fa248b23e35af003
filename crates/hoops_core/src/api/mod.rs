//! JSON boundary for embedding callers.
//!
//! A caller hands in a [`MatchRequest`] (directly or as a JSON string) and
//! gets back a fully serialized [`MatchSummary`]. Nothing in here adds game
//! semantics; it is validation, versioning and serialization only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{MatchEngine, MatchPlan};
use crate::error::MatchError;
use crate::models::{MatchSummary, Team};
use crate::SCHEMA_VERSION;

/// Wire-format request for one match simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRequest {
    /// Request schema version; only [`SCHEMA_VERSION`] is accepted.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unsupported schema version {found}, this build speaks {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
    #[error(transparent)]
    Invalid(#[from] MatchError),
}

/// Simulate one match from an already-validated-shape request.
pub fn simulate_match(request: MatchRequest) -> Result<MatchSummary, RequestError> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(RequestError::UnsupportedSchema {
            found: request.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    let plan = MatchPlan {
        home_team: request.home_team,
        away_team: request.away_team,
        seed: request.seed,
    };
    let engine = MatchEngine::new(plan)?;
    Ok(engine.simulate())
}

/// Simulate one match from a JSON request string, returning the summary as
/// a JSON string.
pub fn simulate_match_json(request_json: &str) -> Result<String, RequestError> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let summary = simulate_match(request)?;
    Ok(serde_json::to_string(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Position};

    fn request_json(seed: u64) -> String {
        let players: Vec<Player> = Position::ALL
            .iter()
            .map(|&pos| Player::new(&format!("{} starter", pos.code()), pos, 3))
            .collect();
        let request = MatchRequest {
            schema_version: SCHEMA_VERSION,
            seed,
            home_team: Team::new("Home", players.clone()),
            away_team: Team::new("Away", players),
        };
        serde_json::to_string(&request).unwrap()
    }

    #[test]
    fn test_json_round_trip_produces_summary() {
        let out = simulate_match_json(&request_json(5)).unwrap();
        let summary: MatchSummary = serde_json::from_str(&out).unwrap();
        assert_eq!(summary.home_team, "Home");
        assert_eq!(summary.total_rounds, crate::engine::TOTAL_ROUNDS);
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let json = request_json(5).replace(
            &format!("\"schema_version\":{}", SCHEMA_VERSION),
            "\"schema_version\":999",
        );
        let err = simulate_match_json(&json).unwrap_err();
        assert!(matches!(err, RequestError::UnsupportedSchema { found: 999, .. }));
    }

    #[test]
    fn test_schema_version_defaults_when_absent() {
        let json = request_json(5).replacen(
            &format!("\"schema_version\":{},", SCHEMA_VERSION),
            "",
            1,
        );
        assert!(simulate_match_json(&json).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = simulate_match_json("{not json").unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson(_)));
    }

    #[test]
    fn test_rejects_invalid_roster() {
        let mut request: MatchRequest = serde_json::from_str(&request_json(5)).unwrap();
        request.home_team.players.pop();
        let err = simulate_match(request).unwrap_err();
        assert!(matches!(err, RequestError::Invalid(_)));
    }
}
