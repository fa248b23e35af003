pub mod events;
pub mod match_result;
pub mod player;
pub mod team;

pub use events::{EventDetails, EventType, MatchEvent};
pub use match_result::{MatchSummary, PlayerStatLine, TeamTotals, TIE};
pub use player::{
    Player, PlayerAttributes, PlayerStats, Position, ResolvedAttributes, ShotLine, FOUL_LIMIT,
};
pub use team::{Side, Team, COURT_PLAYERS, MAX_ROSTER};
