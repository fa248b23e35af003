use serde::{Deserialize, Serialize};

use super::{Player, Position};
use crate::error::MatchError;

/// Maximum roster size. Only the first five active players take the court.
pub const MAX_ROSTER: usize = 12;

/// Players on the court per side.
pub const COURT_PLAYERS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: &str, players: Vec<Player>) -> Self {
        Self { name: name.to_string(), players }
    }

    /// Check the roster is usable for a match: at most 12 players, at least
    /// five of them active, valid skill levels, and a starting five that
    /// covers every position exactly once (the court formation is keyed by
    /// position, one player per spot).
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.name.trim().is_empty() {
            return Err(MatchError::ValidationError("team name is empty".to_string()));
        }
        if self.players.len() > MAX_ROSTER {
            return Err(MatchError::InvalidRosterSize {
                expected: MAX_ROSTER,
                found: self.players.len(),
            });
        }
        for player in &self.players {
            if !(1..=5).contains(&player.skill_level) {
                return Err(MatchError::ValidationError(format!(
                    "skill level {} for {} out of range 1-5",
                    player.skill_level, player.name
                )));
            }
        }

        let starters = self.starting_five();
        if starters.len() < COURT_PLAYERS {
            return Err(MatchError::InvalidLineup(format!(
                "need {} active players, have {}",
                COURT_PLAYERS,
                starters.len()
            )));
        }
        for position in Position::ALL {
            let count = starters.iter().filter(|p| p.position == position).count();
            if count != 1 {
                return Err(MatchError::InvalidLineup(format!(
                    "starting five must have exactly one {}, found {}",
                    position.code(),
                    count
                )));
            }
        }
        Ok(())
    }

    /// The first five active roster entries, in roster order.
    pub fn starting_five(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.active).take(COURT_PLAYERS).collect()
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}

/// Which side of the match a team or event belongs to. Possession alternates
/// between the two as a sub-state of every round outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Side::Home)
    }
}
