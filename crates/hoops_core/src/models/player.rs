use serde::{Deserialize, Serialize};

/// Player descriptor for the match simulation engine.
///
/// This is what roster collaborators (team setup, league schedulers) hand to
/// the engine. Everything mutable during a match (coordinates, statistics,
/// foul-outs) lives in match-scoped state owned by the engine, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: Position,

    /// Coarse 1-5 rating used as the fallback source for every 1-99
    /// attribute that is not explicitly set.
    #[serde(default = "default_skill_level")]
    pub skill_level: u8,

    /// Explicit 1-99 attribute overrides. When absent, values derive from
    /// `skill_level` (see [`ResolvedAttributes::resolve`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<PlayerAttributes>,

    /// Eligible to take the court. Cleared when a player fouls out.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_skill_level() -> u8 {
    3
}

fn default_active() -> bool {
    true
}

impl Player {
    pub fn new(name: &str, position: Position, skill_level: u8) -> Self {
        Self {
            name: name.to_string(),
            position,
            skill_level: skill_level.clamp(1, 5),
            attributes: None,
            active: true,
        }
    }
}

/// The five basketball positions. Closed set; every dice table, movement
/// speed and selection weight in the engine is keyed on this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Position::PF | Position::C)
    }

    /// Court units covered per movement call. Point guards are the fastest,
    /// centers the slowest.
    pub fn movement_speed(&self) -> f32 {
        match self {
            Position::PG => 10.0,
            Position::SG => 8.0,
            Position::SF => 7.0,
            Position::PF => 6.0,
            Position::C => 5.0,
        }
    }

    /// Weight used when picking who brings the ball up. PG heaviest.
    pub fn carrier_weight(&self) -> u32 {
        match self {
            Position::PG => 40,
            Position::SG => 25,
            Position::SF => 15,
            Position::PF => 12,
            Position::C => 8,
        }
    }

    /// Chance to pull up for three from mid-range in the half court.
    pub fn three_point_tendency(&self) -> f64 {
        match self {
            Position::PG => 0.40,
            Position::SG => 0.40,
            Position::SF => 0.20,
            Position::PF => 0.05,
            Position::C => 0.0,
        }
    }

    /// Chance to pull up for three on a fast break. Guards shoot more
    /// threes in transition, big men go to the rim.
    pub fn fast_break_three_tendency(&self) -> f64 {
        match self {
            Position::PG => 0.50,
            Position::SG => 0.60,
            Position::SF => 0.30,
            Position::PF => 0.10,
            Position::C => 0.0,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

/// Explicit 1-99 attribute overrides for a player. Any field left `None`
/// falls back to a skill-level-derived value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shooting: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shooting_3pt: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter_defense: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebounding: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealing: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dribbling: Option<u8>,
}

/// Attribute values resolved once per match, merging explicit overrides with
/// skill-level-derived defaults. Resolvers read these directly so there is
/// no per-access fallback chain and no precedence ambiguity mid-match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolvedAttributes {
    pub shooting: u8,
    pub shooting_3pt: u8,
    pub defense: u8,
    pub perimeter_defense: u8,
    pub blocking: u8,
    pub rebounding: u8,
    pub passing: u8,
    pub stealing: u8,
    pub dribbling: u8,
}

/// Attribute points gained or lost per skill level away from the baseline
/// of 3. Also the unit for the fast-break "+3 skill levels" bonus.
pub const ATTRIBUTE_POINTS_PER_LEVEL: i32 = 10;

impl ResolvedAttributes {
    /// Merge explicit attributes with skill-level fallbacks.
    ///
    /// The fallback for each attribute is its baseline value (what an
    /// average skill-3 player has) shifted by 10 points per skill level,
    /// clamped to 1..=99.
    pub fn resolve(player: &Player) -> Self {
        let attrs = player.attributes.clone().unwrap_or_default();
        let level = player.skill_level.clamp(1, 5);
        let fall = |base: i32| -> u8 {
            (base + (level as i32 - 3) * ATTRIBUTE_POINTS_PER_LEVEL).clamp(1, 99) as u8
        };
        Self {
            shooting: attrs.shooting.unwrap_or_else(|| fall(50)),
            shooting_3pt: attrs.shooting_3pt.unwrap_or_else(|| fall(40)),
            defense: attrs.defense.unwrap_or_else(|| fall(50)),
            perimeter_defense: attrs.perimeter_defense.unwrap_or_else(|| fall(50)),
            blocking: attrs.blocking.unwrap_or_else(|| fall(30)),
            rebounding: attrs.rebounding.unwrap_or_else(|| fall(55)),
            passing: attrs.passing.unwrap_or_else(|| fall(60)),
            stealing: attrs.stealing.unwrap_or_else(|| fall(45)),
            dribbling: attrs.dribbling.unwrap_or_else(|| fall(60)),
        }
    }
}

/// A player fouls out (and is deactivated) at this many personal fouls.
pub const FOUL_LIMIT: u8 = 5;

/// Made/attempted split for one shot type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShotLine {
    pub made: u16,
    pub attempted: u16,
}

impl ShotLine {
    pub fn percentage(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.made as f64 / self.attempted as f64 * 100.0
    }
}

/// Running per-player box-score statistics. Zeroed at match start, mutated
/// only by the engine, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    pub points: u16,
    pub assists: u16,
    pub rebounds: u16,
    pub steals: u16,
    pub blocks: u16,
    pub fouls: u8,
    pub two_pt: ShotLine,
    pub three_pt: ShotLine,
}

impl PlayerStats {
    pub fn record_two_point_attempt(&mut self, made: bool) {
        self.two_pt.attempted += 1;
        if made {
            self.two_pt.made += 1;
            self.points += 2;
        }
    }

    pub fn record_three_point_attempt(&mut self, made: bool) {
        self.three_pt.attempted += 1;
        if made {
            self.three_pt.made += 1;
            self.points += 3;
        }
    }

    pub fn record_rebound(&mut self) {
        self.rebounds += 1;
    }

    pub fn record_steal(&mut self) {
        self.steals += 1;
    }

    pub fn record_block(&mut self) {
        self.blocks += 1;
    }

    pub fn record_assist(&mut self) {
        self.assists += 1;
    }

    /// Records a personal foul. Returns `true` when the player has just
    /// fouled out and must be deactivated.
    pub fn record_foul(&mut self) -> bool {
        self.fouls += 1;
        self.fouls >= FOUL_LIMIT
    }

    pub fn fouled_out(&self) -> bool {
        self.fouls >= FOUL_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_three_fallback_matches_baselines() {
        let player = Player::new("Ref", Position::SF, 3);
        let attrs = ResolvedAttributes::resolve(&player);
        assert_eq!(attrs.shooting, 50);
        assert_eq!(attrs.shooting_3pt, 40);
        assert_eq!(attrs.defense, 50);
        assert_eq!(attrs.perimeter_defense, 50);
        assert_eq!(attrs.blocking, 30);
        assert_eq!(attrs.rebounding, 55);
        assert_eq!(attrs.passing, 60);
        assert_eq!(attrs.stealing, 45);
        assert_eq!(attrs.dribbling, 60);
    }

    #[test]
    fn test_fallback_scales_with_skill_level() {
        let weak = ResolvedAttributes::resolve(&Player::new("W", Position::C, 1));
        let strong = ResolvedAttributes::resolve(&Player::new("S", Position::C, 5));
        assert_eq!(weak.shooting, 30);
        assert_eq!(strong.shooting, 70);
        // Blocking baseline is 30, so skill 1 clamps well above the floor.
        assert_eq!(weak.blocking, 10);
        assert_eq!(strong.blocking, 50);
    }

    #[test]
    fn test_explicit_attribute_wins_over_fallback() {
        let mut player = Player::new("Ace", Position::SG, 2);
        player.attributes = Some(PlayerAttributes {
            shooting_3pt: Some(92),
            ..Default::default()
        });
        let attrs = ResolvedAttributes::resolve(&player);
        assert_eq!(attrs.shooting_3pt, 92);
        // Untouched fields still fall back.
        assert_eq!(attrs.shooting, 40);
    }

    #[test]
    fn test_shot_recording_updates_points_and_splits() {
        let mut stats = PlayerStats::default();
        stats.record_two_point_attempt(true);
        stats.record_two_point_attempt(false);
        stats.record_three_point_attempt(true);
        assert_eq!(stats.points, 5);
        assert_eq!(stats.two_pt, ShotLine { made: 1, attempted: 2 });
        assert_eq!(stats.three_pt, ShotLine { made: 1, attempted: 1 });
        assert_eq!(stats.two_pt.percentage(), 50.0);
    }

    #[test]
    fn test_foul_out_at_limit() {
        let mut stats = PlayerStats::default();
        for _ in 0..FOUL_LIMIT - 1 {
            assert!(!stats.record_foul());
        }
        assert!(stats.record_foul());
        assert!(stats.fouled_out());
    }

    #[test]
    fn test_position_constants_are_ordered_by_role() {
        assert!(Position::PG.movement_speed() > Position::C.movement_speed());
        assert!(Position::PG.carrier_weight() > Position::C.carrier_weight());
        assert_eq!(Position::C.three_point_tendency(), 0.0);
        assert!(Position::SG.fast_break_three_tendency() > Position::PF.fast_break_three_tendency());
    }
}
