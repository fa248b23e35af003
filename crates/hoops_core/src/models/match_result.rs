use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchEvent, PlayerStats, Position, ShotLine};

/// Reported when the match ends level after four quarters. There is no
/// overtime mechanism; a tie is a terminal result.
pub const TIE: &str = "TIE";

/// One player's line in the final box score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerStatLine {
    pub name: String,
    pub position: Position,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

impl PlayerStatLine {
    pub fn two_point_percentage(&self) -> f64 {
        self.stats.two_pt.percentage()
    }

    pub fn three_point_percentage(&self) -> f64 {
        self.stats.three_pt.percentage()
    }
}

/// Team-level totals aggregated from the player lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamTotals {
    pub points: u16,
    pub assists: u16,
    pub rebounds: u16,
    pub steals: u16,
    pub blocks: u16,
    pub fouls: u16,
    pub two_pt: ShotLine,
    pub three_pt: ShotLine,
}

impl TeamTotals {
    pub fn from_lines(lines: &[PlayerStatLine]) -> Self {
        let mut totals = TeamTotals::default();
        for line in lines {
            totals.points += line.stats.points;
            totals.assists += line.stats.assists;
            totals.rebounds += line.stats.rebounds;
            totals.steals += line.stats.steals;
            totals.blocks += line.stats.blocks;
            totals.fouls += line.stats.fouls as u16;
            totals.two_pt.made += line.stats.two_pt.made;
            totals.two_pt.attempted += line.stats.two_pt.attempted;
            totals.three_pt.made += line.stats.three_pt.made;
            totals.three_pt.attempted += line.stats.three_pt.attempted;
        }
        totals
    }

    /// Combined field-goal percentage across both shot types.
    pub fn field_goal_percentage(&self) -> f64 {
        let attempted = self.two_pt.attempted + self.three_pt.attempted;
        if attempted == 0 {
            return 0.0;
        }
        (self.two_pt.made + self.three_pt.made) as f64 / attempted as f64 * 100.0
    }
}

/// Full output of one simulated match: final score, winner, the ordered
/// event log, and both box scores. This is the entire boundary between the
/// core and presentation/persistence collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    /// Display form "H-A", e.g. "87-81".
    pub final_score: String,
    /// Winning team name, or [`TIE`].
    pub winner: String,
    pub total_rounds: u32,
    pub played_at: DateTime<Utc>,
    pub events: Vec<MatchEvent>,
    pub home_players: Vec<PlayerStatLine>,
    pub away_players: Vec<PlayerStatLine>,
    pub home_totals: TeamTotals,
    pub away_totals: TeamTotals,
}

impl MatchSummary {
    pub fn is_tie(&self) -> bool {
        self.winner == TIE
    }

    pub fn score_string(home: u16, away: u16) -> String {
        format!("{}-{}", home, away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerStats;

    fn line(name: &str, points: u16, rebounds: u16) -> PlayerStatLine {
        PlayerStatLine {
            name: name.to_string(),
            position: Position::SF,
            stats: PlayerStats { points, rebounds, ..Default::default() },
        }
    }

    #[test]
    fn test_totals_aggregate_player_lines() {
        let lines = vec![line("A", 12, 3), line("B", 8, 7)];
        let totals = TeamTotals::from_lines(&lines);
        assert_eq!(totals.points, 20);
        assert_eq!(totals.rebounds, 10);
    }

    #[test]
    fn test_field_goal_percentage_combines_splits() {
        let mut stats = PlayerStats::default();
        stats.record_two_point_attempt(true);
        stats.record_two_point_attempt(false);
        stats.record_three_point_attempt(true);
        stats.record_three_point_attempt(false);
        let totals = TeamTotals::from_lines(&[PlayerStatLine {
            name: "A".to_string(),
            position: Position::SG,
            stats,
        }]);
        assert_eq!(totals.field_goal_percentage(), 50.0);
    }

    #[test]
    fn test_empty_totals_have_zero_percentage() {
        assert_eq!(TeamTotals::default().field_goal_percentage(), 0.0);
    }

    #[test]
    fn test_score_string_format() {
        assert_eq!(MatchSummary::score_string(87, 81), "87-81");
    }
}
