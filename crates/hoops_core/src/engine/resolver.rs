//! Contested action resolution.
//!
//! Pure layer between the dice/probability math and the stateful match
//! loop: every function takes the participants and an RNG and returns a
//! structured result. Nothing in here mutates player statistics; the match
//! engine applies results to state.
//!
//! Resolution order is fixed per action: position gate first (no randomness
//! consumed when the actor cannot perform the action), then dice, then the
//! percentage draw. Shots check the block chance before the made/miss draw;
//! a blocked attempt never rolls for the make.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::dice::{roll_for_action, ActionKind, DiceRoll};
use super::probability::{
    contest_scale, dribble_threshold, roll_d20, roll_success, success_percentage,
    threshold_success_percentage,
};
use crate::models::{Position, ResolvedAttributes};

/// Borrowed view of one participant in a contested action.
#[derive(Debug, Clone, Copy)]
pub struct ActorRef<'a> {
    pub name: &'a str,
    pub position: Position,
    pub attrs: &'a ResolvedAttributes,
}

/// Outcome of a 2-point or 3-point attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotResult {
    pub can_perform: bool,
    pub made: bool,
    pub blocked: bool,
    pub points: u8,
    pub success_percent: f64,
    pub dice: DiceRoll,
    pub shooter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ShotResult {
    fn not_performable(shooter: &ActorRef, kind: ActionKind) -> Self {
        Self {
            can_perform: false,
            made: false,
            blocked: false,
            points: 0,
            success_percent: 0.0,
            dice: DiceRoll::not_performable(),
            shooter: shooter.name.to_string(),
            blocker: None,
            reason: Some(format!("{} cannot perform {}", shooter.position.code(), kind.code())),
        }
    }
}

/// Which side came down with a contested rebound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReboundWinner {
    Offense,
    Defense,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReboundResult {
    pub winner: ReboundWinner,
    pub winner_name: String,
    pub offense_total: u32,
    pub defense_total: u32,
    pub offense_roll: DiceRoll,
    pub defense_roll: DiceRoll,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassResult {
    pub completed: bool,
    pub stolen: bool,
    /// An incomplete pass is a turnover even when not stolen outright.
    pub turnover: bool,
    pub success_percent: f64,
    pub steal_dice: DiceRoll,
    pub passer: String,
    pub receiver: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StealResult {
    pub can_perform: bool,
    pub stolen: bool,
    pub success_percent: f64,
    pub dice: DiceRoll,
    pub stealer: String,
    pub ball_handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockResult {
    pub can_perform: bool,
    pub blocked: bool,
    pub block_chance: f64,
    pub dice: DiceRoll,
    pub blocker: String,
    pub shooter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Outcome of a d20 dribble-vs-steal contest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DribbleResult {
    /// `true` when the ball handler keeps possession.
    pub success: bool,
    pub roll: i32,
    pub threshold: i32,
    pub success_percent: f64,
    pub dribble_skill: i32,
    pub steal_skill: i32,
    pub dribbler: String,
    pub defender: String,
}

/// Resolve a 2-point attempt: shooting vs interior defense, with a block
/// check (capped at 25%) before the made/miss draw.
pub fn resolve_two_point_attempt(
    rng: &mut impl Rng,
    shooter: &ActorRef,
    defender: &ActorRef,
) -> ShotResult {
    let dice = roll_for_action(rng, ActionKind::TwoPoint, shooter.position);
    if !dice.can_perform {
        return ShotResult::not_performable(shooter, ActionKind::TwoPoint);
    }

    let success_percent =
        success_percentage(shooter.attrs.shooting as f64, defender.attrs.defense as f64);

    let block_chance = (defender.attrs.blocking as f64 / 4.0).min(25.0);
    if roll_success(rng, block_chance) {
        return ShotResult {
            can_perform: true,
            made: false,
            blocked: true,
            points: 0,
            success_percent,
            dice,
            shooter: shooter.name.to_string(),
            blocker: Some(defender.name.to_string()),
            reason: None,
        };
    }

    let made = roll_success(rng, success_percent);
    ShotResult {
        can_perform: true,
        made,
        blocked: false,
        points: if made { 2 } else { 0 },
        success_percent,
        dice,
        shooter: shooter.name.to_string(),
        blocker: None,
        reason: None,
    }
}

/// Resolve a 3-point attempt: 3pt shooting vs perimeter defense. Threes are
/// much harder to block (capped at 10%). Centers and power forwards cannot
/// attempt them at all.
pub fn resolve_three_point_attempt(
    rng: &mut impl Rng,
    shooter: &ActorRef,
    defender: &ActorRef,
) -> ShotResult {
    let dice = roll_for_action(rng, ActionKind::ThreePoint, shooter.position);
    if !dice.can_perform {
        return ShotResult::not_performable(shooter, ActionKind::ThreePoint);
    }

    let success_percent = success_percentage(
        shooter.attrs.shooting_3pt as f64,
        defender.attrs.perimeter_defense as f64,
    );

    let block_chance = (defender.attrs.blocking as f64 / 10.0).min(10.0);
    if roll_success(rng, block_chance) {
        return ShotResult {
            can_perform: true,
            made: false,
            blocked: true,
            points: 0,
            success_percent,
            dice,
            shooter: shooter.name.to_string(),
            blocker: Some(defender.name.to_string()),
            reason: None,
        };
    }

    let made = roll_success(rng, success_percent);
    ShotResult {
        can_perform: true,
        made,
        blocked: false,
        points: if made { 3 } else { 0 },
        success_percent,
        dice,
        shooter: shooter.name.to_string(),
        blocker: None,
        reason: None,
    }
}

/// Resolve a rebound contest. Each side rolls its position dice (zero when
/// the position cannot rebound) plus a `skill/10` bonus; defense gets a
/// fixed +2 structural advantage and wins ties.
pub fn resolve_rebound_contest(
    rng: &mut impl Rng,
    offense: &ActorRef,
    defense: &ActorRef,
) -> ReboundResult {
    let offense_roll = roll_for_action(rng, ActionKind::Rebound, offense.position);
    let defense_roll = roll_for_action(rng, ActionKind::Rebound, defense.position);

    let offense_total = offense_roll.total + offense.attrs.rebounding as u32 / 10;
    let defense_total = defense_roll.total + defense.attrs.rebounding as u32 / 10 + 2;

    let defense_wins = defense_total >= offense_total;
    ReboundResult {
        winner: if defense_wins { ReboundWinner::Defense } else { ReboundWinner::Offense },
        winner_name: if defense_wins { defense.name } else { offense.name }.to_string(),
        offense_total,
        defense_total,
        offense_roll,
        defense_roll,
    }
}

/// Resolve a pass: passing skill vs stealing skill, with a dice-boosted
/// interception chance capped at 30%.
pub fn resolve_pass_attempt(
    rng: &mut impl Rng,
    passer: &ActorRef,
    receiver: &ActorRef,
    defender: &ActorRef,
) -> PassResult {
    let success_percent =
        success_percentage(passer.attrs.passing as f64, defender.attrs.stealing as f64);

    let steal_dice = roll_for_action(rng, ActionKind::Steal, defender.position);
    let steal_bonus = if steal_dice.can_perform { steal_dice.total as f64 } else { 0.0 };
    let steal_chance = ((100.0 - success_percent) / 3.0 + steal_bonus).min(30.0);

    if roll_success(rng, steal_chance) {
        return PassResult {
            completed: false,
            stolen: true,
            turnover: true,
            success_percent,
            steal_dice,
            passer: passer.name.to_string(),
            receiver: receiver.name.to_string(),
            stealer: Some(defender.name.to_string()),
        };
    }

    let completed = roll_success(rng, success_percent);
    PassResult {
        completed,
        stolen: false,
        turnover: !completed,
        success_percent,
        steal_dice,
        passer: passer.name.to_string(),
        receiver: receiver.name.to_string(),
        stealer: None,
    }
}

/// Resolve an active steal attempt: stealing vs dribbling with the steal
/// dice total added to the percentage (total clamped to 100). Only guards
/// have steal dice.
pub fn resolve_steal_attempt(
    rng: &mut impl Rng,
    defender: &ActorRef,
    ball_handler: &ActorRef,
) -> StealResult {
    let dice = roll_for_action(rng, ActionKind::Steal, defender.position);
    if !dice.can_perform {
        return StealResult {
            can_perform: false,
            stolen: false,
            success_percent: 0.0,
            dice,
            stealer: defender.name.to_string(),
            ball_handler: ball_handler.name.to_string(),
            reason: Some(format!("{} cannot attempt steals", defender.position.code())),
        };
    }

    let base =
        success_percentage(defender.attrs.stealing as f64, ball_handler.attrs.dribbling as f64);
    let success_percent = (base + dice.total as f64).min(100.0);
    let stolen = roll_success(rng, success_percent);
    StealResult {
        can_perform: true,
        stolen,
        success_percent,
        dice,
        stealer: defender.name.to_string(),
        ball_handler: ball_handler.name.to_string(),
        reason: None,
    }
}

/// Resolve an active block attempt: `15 + blocking/5` base plus twice the
/// dice total, capped at 50%. Only big men have block dice.
pub fn resolve_block_attempt(
    rng: &mut impl Rng,
    defender: &ActorRef,
    shooter: &ActorRef,
) -> BlockResult {
    let dice = roll_for_action(rng, ActionKind::Block, defender.position);
    if !dice.can_perform {
        return BlockResult {
            can_perform: false,
            blocked: false,
            block_chance: 0.0,
            dice,
            blocker: defender.name.to_string(),
            shooter: shooter.name.to_string(),
            reason: Some(format!("{} cannot attempt blocks", defender.position.code())),
        };
    }

    let base = 15.0 + defender.attrs.blocking as f64 / 5.0;
    let block_chance = (base + dice.total as f64 * 2.0).min(50.0);
    let blocked = roll_success(rng, block_chance);
    BlockResult {
        can_perform: true,
        blocked,
        block_chance,
        dice,
        blocker: defender.name.to_string(),
        shooter: shooter.name.to_string(),
        reason: None,
    }
}

/// Resolve a d20 dribble-vs-steal contest. The handler keeps the ball on
/// `roll >= threshold`; anything else is a turnover.
pub fn resolve_dribble_contest(
    rng: &mut impl Rng,
    dribbler: &ActorRef,
    defender: &ActorRef,
) -> DribbleResult {
    let dribble_skill = contest_scale(dribbler.attrs.dribbling);
    let steal_skill = contest_scale(defender.attrs.stealing);
    let threshold = dribble_threshold(dribble_skill, steal_skill);
    let roll = roll_d20(rng);
    DribbleResult {
        success: roll >= threshold,
        roll,
        threshold,
        success_percent: threshold_success_percentage(threshold),
        dribble_skill,
        steal_skill,
        dribbler: dribbler.name.to_string(),
        defender: defender.name.to_string(),
    }
}
