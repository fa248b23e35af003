//! Dice notation and the position-indexed dice tables.
//!
//! Every contested action rolls dice described by compact notation such as
//! `"2d6"` or `"1d4+1d6"`. Which dice a player rolls depends on position and
//! action kind; a missing table entry encodes "this position cannot perform
//! this action" and consumes no randomness at all.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Position;

/// The closed set of contested action kinds with a dice table entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    #[serde(rename = "2point")]
    TwoPoint,
    #[serde(rename = "3point")]
    ThreePoint,
    #[serde(rename = "rebound")]
    Rebound,
    #[serde(rename = "assist")]
    Assist,
    #[serde(rename = "steal")]
    Steal,
    #[serde(rename = "block")]
    Block,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::TwoPoint,
        ActionKind::ThreePoint,
        ActionKind::Rebound,
        ActionKind::Assist,
        ActionKind::Steal,
        ActionKind::Block,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ActionKind::TwoPoint => "2point",
            ActionKind::ThreePoint => "3point",
            ActionKind::Rebound => "rebound",
            ActionKind::Assist => "assist",
            ActionKind::Steal => "steal",
            ActionKind::Block => "block",
        }
    }
}

/// One `<quantity>d<sides>` term of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieTerm {
    pub quantity: u32,
    pub sides: u32,
}

/// A parsed dice expression: one or more terms joined by `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceExpr {
    terms: Vec<DieTerm>,
}

impl DiceExpr {
    /// Parse notation like `"2d6"` or `"1d4+1d6"`.
    pub fn parse(notation: &str) -> Result<Self, CoreError> {
        if notation.trim().is_empty() {
            return Err(CoreError::ParseError("empty dice notation".to_string()));
        }
        let mut terms = Vec::new();
        for part in notation.split('+') {
            let part = part.trim();
            let (quantity, sides) = part
                .split_once(['d', 'D'])
                .ok_or_else(|| CoreError::ParseError(format!("invalid dice term: {}", part)))?;
            let quantity: u32 = quantity
                .parse()
                .map_err(|_| CoreError::ParseError(format!("invalid die quantity: {}", part)))?;
            let sides: u32 = sides
                .parse()
                .map_err(|_| CoreError::ParseError(format!("invalid die sides: {}", part)))?;
            if quantity == 0 || sides == 0 {
                return Err(CoreError::ParseError(format!("degenerate dice term: {}", part)));
            }
            terms.push(DieTerm { quantity, sides });
        }
        Ok(Self { terms })
    }

    /// Total number of individual dice this expression rolls.
    pub fn die_count(&self) -> u32 {
        self.terms.iter().map(|t| t.quantity).sum()
    }

    pub fn terms(&self) -> &[DieTerm] {
        &self.terms
    }

    /// Roll every die, uniform in `[1, sides]` each.
    pub fn roll(&self, rng: &mut impl Rng) -> DiceRoll {
        let mut rolls = Vec::with_capacity(self.die_count() as usize);
        let mut total = 0;
        for term in &self.terms {
            for _ in 0..term.quantity {
                let roll = rng.gen_range(1..=term.sides);
                rolls.push(roll);
                total += roll;
            }
        }
        DiceRoll { rolls, total, notation: self.to_string(), can_perform: true }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}d{}", term.quantity, term.sides)?;
        }
        Ok(())
    }
}

/// Outcome of rolling one dice expression. `can_perform == false` encodes a
/// position that cannot perform the requested action: no dice were rolled
/// and no randomness was consumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceRoll {
    pub rolls: Vec<u32>,
    pub total: u32,
    pub notation: String,
    pub can_perform: bool,
}

impl DiceRoll {
    pub fn not_performable() -> Self {
        Self { rolls: Vec::new(), total: 0, notation: "none".to_string(), can_perform: false }
    }
}

/// The fixed position/action dice table. Design data, not user input:
/// centers and power forwards have no three-point entry, guards have no
/// rebound entry, and so on.
pub fn dice_for_action(kind: ActionKind, position: Position) -> Option<&'static str> {
    match kind {
        ActionKind::TwoPoint => Some(match position {
            Position::C => "2d6",
            Position::PF => "1d8",
            Position::SF | Position::SG | Position::PG => "1d4",
        }),
        ActionKind::ThreePoint => match position {
            Position::SG | Position::SF => Some("1d6"),
            Position::PG => Some("1d3"),
            Position::PF | Position::C => None,
        },
        ActionKind::Rebound => match position {
            Position::C => Some("3d6"),
            Position::PF => Some("2d6"),
            Position::SF => Some("1d6"),
            Position::SG | Position::PG => None,
        },
        ActionKind::Assist => match position {
            Position::PG => Some("1d10"),
            Position::SG => Some("1d6"),
            _ => None,
        },
        ActionKind::Steal => match position {
            Position::PG => Some("1d4+1d6"),
            Position::SG => Some("1d2+1d3"),
            _ => None,
        },
        ActionKind::Block => match position {
            Position::C => Some("1d8+1d10"),
            Position::PF => Some("1d4+1d5"),
            _ => None,
        },
    }
}

/// Roll the table dice for `(kind, position)`. Returns a not-performable
/// roll without touching the RNG when the table has no entry.
///
/// The table is internal design data, so a notation that fails to parse is
/// a programming error and aborts rather than surfacing as a runtime error.
pub fn roll_for_action(rng: &mut impl Rng, kind: ActionKind, position: Position) -> DiceRoll {
    match dice_for_action(kind, position) {
        None => DiceRoll::not_performable(),
        Some(notation) => DiceExpr::parse(notation)
            .unwrap_or_else(|e| panic!("dice table entry {:?}/{:?} invalid: {}", kind, position, e))
            .roll(rng),
    }
}
