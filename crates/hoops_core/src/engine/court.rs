//! Court grid and positioning.
//!
//! The court is a 50x30 cell grid holding at most one player per cell.
//! Players are addressed by track id: 0-4 are the home starting five, 5-9
//! the away five. The ball is either loose at a cell or attached to a
//! possessing player, in which case it follows every move.

use serde::{Deserialize, Serialize};

use crate::models::{Position, Side, COURT_PLAYERS};

pub const COURT_WIDTH: i32 = 50;
pub const COURT_HEIGHT: i32 = 30;

/// Maximum distance over which a pass is considered at all.
pub const PASSING_RANGE: f64 = 15.0;

/// A defender closer than this contests the ball handler.
pub const STEAL_WINDOW: f64 = 5.0;

pub type Coord = (i32, i32);

/// Half-court formation template, relative to the home side. The away
/// formation is the same template mirrored across the court's vertical
/// center line.
fn formation_slot(position: Position) -> Coord {
    match position {
        Position::PG => (5, 15),
        Position::SG => (10, 10),
        Position::SF => (10, 20),
        Position::PF => (20, 12),
        Position::C => (20, 18),
    }
}

/// Distance bucket for shot selection, measured to the attacked basket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShotRange {
    Close,
    Mid,
    Three,
}

impl ShotRange {
    pub fn from_distance(distance: f64) -> Self {
        if distance <= 8.0 {
            ShotRange::Close
        } else if distance <= 15.0 {
            ShotRange::Mid
        } else {
            ShotRange::Three
        }
    }
}

/// Serializable snapshot of the court for inspection and event detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourtState {
    pub width: i32,
    pub height: i32,
    pub players: Vec<Coord>,
    pub ball_position: Coord,
    pub ball_possession: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct Court {
    width: i32,
    height: i32,
    /// Row-major occupancy grid, `Some(track)` when a player stands there.
    cells: Vec<Option<u8>>,
    /// Current coordinates per track id.
    coords: Vec<Coord>,
    positions: Vec<Position>,
    /// Tracks that have left play (fouled out). Inactive players keep their
    /// cell but are skipped by opponent and passing queries.
    active: Vec<bool>,
    ball_position: Coord,
    ball_possession: Option<u8>,
}

impl Court {
    /// Build the court and place both starting fives in formation.
    /// `positions` holds the on-court position per track id, home five first.
    pub fn new(positions: Vec<Position>) -> Self {
        assert_eq!(positions.len(), COURT_PLAYERS * 2, "court needs ten players");
        let mut court = Self {
            width: COURT_WIDTH,
            height: COURT_HEIGHT,
            cells: vec![None; (COURT_WIDTH * COURT_HEIGHT) as usize],
            coords: vec![(0, 0); COURT_PLAYERS * 2],
            positions,
            active: vec![true; COURT_PLAYERS * 2],
            ball_position: (0, 0),
            ball_possession: None,
        };
        court.reset_formation();
        court
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Put everyone back on their formation spot and detach the ball.
    pub fn reset_formation(&mut self) {
        self.cells.fill(None);
        self.ball_possession = None;
        for track in 0..self.positions.len() as u8 {
            let (x, y) = formation_slot(self.positions[track as usize]);
            let coord = if Self::track_side(track).is_home() {
                (x, y)
            } else {
                (self.width - x, y)
            };
            self.place_player(track, coord);
        }
    }

    /// Side a track id belongs to.
    pub fn track_side(track: u8) -> Side {
        if (track as usize) < COURT_PLAYERS {
            Side::Home
        } else {
            Side::Away
        }
    }

    /// Track ids for one side, in formation order.
    pub fn side_tracks(side: Side) -> std::ops::Range<u8> {
        match side {
            Side::Home => 0..COURT_PLAYERS as u8,
            Side::Away => COURT_PLAYERS as u8..(COURT_PLAYERS * 2) as u8,
        }
    }

    pub fn coord(&self, track: u8) -> Coord {
        self.coords[track as usize]
    }

    pub fn ball_position(&self) -> Coord {
        self.ball_position
    }

    pub fn ball_possession(&self) -> Option<u8> {
        self.ball_possession
    }

    pub fn set_active(&mut self, track: u8, active: bool) {
        self.active[track as usize] = active;
    }

    pub fn is_active(&self, track: u8) -> bool {
        self.active[track as usize]
    }

    /// Hand the ball to a player. The ball now follows their moves.
    pub fn give_ball(&mut self, track: u8) {
        self.ball_possession = Some(track);
        self.ball_position = self.coord(track);
    }

    fn cell_index(&self, (x, y): Coord) -> usize {
        debug_assert!(self.in_bounds((x, y)));
        (y * self.width + x) as usize
    }

    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn occupant(&self, coord: Coord) -> Option<u8> {
        self.cells[self.cell_index(coord)]
    }

    /// Place a player on a cell. Coordinates must be in bounds and the cell
    /// free (or already theirs); both are programming errors otherwise.
    pub fn place_player(&mut self, track: u8, coord: Coord) {
        assert!(self.in_bounds(coord), "coordinate {:?} off court", coord);
        let idx = self.cell_index(coord);
        assert!(
            self.cells[idx].is_none() || self.cells[idx] == Some(track),
            "cell {:?} already occupied",
            coord
        );
        let old = self.coords[track as usize];
        if self.in_bounds(old) {
            let old_idx = self.cell_index(old);
            if self.cells[old_idx] == Some(track) {
                self.cells[old_idx] = None;
            }
        }
        self.cells[idx] = Some(track);
        self.coords[track as usize] = coord;
        if self.ball_possession == Some(track) {
            self.ball_position = coord;
        }
    }

    /// Move a player toward `target`, at most their position speed in cell
    /// steps, never through an occupied cell. Returns the final coordinate.
    pub fn move_player_toward(&mut self, track: u8, target: Coord) -> Coord {
        let speed = self.positions[track as usize].movement_speed() as i32;
        self.move_player_toward_with_speed(track, target, speed)
    }

    /// Like [`move_player_toward`](Self::move_player_toward) with an explicit
    /// step budget (fast breaks push harder than the half-court pace).
    pub fn move_player_toward_with_speed(
        &mut self,
        track: u8,
        target: Coord,
        speed: i32,
    ) -> Coord {
        let mut current = self.coord(track);
        for _ in 0..speed.max(0) {
            if current == target {
                break;
            }
            let step = (
                current.0 + (target.0 - current.0).signum(),
                current.1 + (target.1 - current.1).signum(),
            );
            if !self.in_bounds(step) || self.occupant(step).is_some() {
                break;
            }
            self.place_player(track, step);
            current = step;
        }
        current
    }

    pub fn distance_between(&self, a: u8, b: u8) -> f64 {
        let (ax, ay) = self.coord(a);
        let (bx, by) = self.coord(b);
        (((ax - bx).pow(2) + (ay - by).pow(2)) as f64).sqrt()
    }

    pub fn within(&self, a: u8, b: u8, max: f64) -> bool {
        self.distance_between(a, b) <= max
    }

    /// Closest active opposing player, ties broken by track order. Falls
    /// back over inactive opponents only if the whole side has fouled out.
    pub fn nearest_opponent(&self, track: u8) -> u8 {
        let opponents = Self::side_tracks(Self::track_side(track).other());
        let mut best = None;
        let mut best_distance = f64::MAX;
        for other in opponents.clone().filter(|&t| self.is_active(t)) {
            let distance = self.distance_between(track, other);
            if distance < best_distance {
                best_distance = distance;
                best = Some(other);
            }
        }
        best.unwrap_or(opponents.start)
    }

    /// Active teammates within passing range of `track`, nearest first. The
    /// sort is stable so equal distances keep formation order.
    pub fn passing_options(&self, track: u8) -> Vec<u8> {
        let mut options: Vec<u8> = Self::side_tracks(Self::track_side(track))
            .filter(|&mate| {
                mate != track && self.is_active(mate) && self.within(track, mate, PASSING_RANGE)
            })
            .collect();
        options.sort_by(|&a, &b| {
            self.distance_between(track, a)
                .partial_cmp(&self.distance_between(track, b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        options
    }

    /// The basket a side attacks. Home attacks the far basket.
    pub fn basket_for(&self, side: Side) -> Coord {
        match side {
            Side::Home => (self.width - 1, self.height / 2),
            Side::Away => (0, self.height / 2),
        }
    }

    pub fn distance_to_basket(&self, track: u8, attacking: Side) -> f64 {
        let (x, y) = self.coord(track);
        let (bx, by) = self.basket_for(attacking);
        (((x - bx).pow(2) + (y - by).pow(2)) as f64).sqrt()
    }

    pub fn shot_range(&self, track: u8, attacking: Side) -> ShotRange {
        ShotRange::from_distance(self.distance_to_basket(track, attacking))
    }

    pub fn snapshot(&self) -> CourtState {
        CourtState {
            width: self.width,
            height: self.height,
            players: self.coords.clone(),
            ball_position: self.ball_position,
            ball_possession: self.ball_possession,
        }
    }
}
