//! The possession/quarter/match state machine.
//!
//! A match is 4 quarters of 25 rounds. Each round the attacking side's ball
//! handler advances, survives (or not) a steal window, and finishes with a
//! shot, a pass, or a turnover; every observable outcome is appended to the
//! event log. All randomness flows through one seeded ChaCha8 stream, so a
//! `(seed, rosters)` pair fully determines the result.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::MatchError;
use crate::models::{
    EventDetails, EventType, MatchEvent, MatchSummary, PlayerStatLine, PlayerStats, Position,
    ResolvedAttributes, Side, Team, TeamTotals, TIE,
};

use super::court::{Court, CourtState, ShotRange, STEAL_WINDOW};
use super::dice::{roll_for_action, ActionKind};
use super::probability::roll_success;
use super::resolver::{
    resolve_dribble_contest, resolve_pass_attempt, resolve_rebound_contest,
    resolve_three_point_attempt, resolve_two_point_attempt, ActorRef, ReboundWinner, ShotResult,
};
use super::weighted::weighted_choice;

pub const ROUNDS_PER_QUARTER: u32 = 25;
pub const QUARTERS: u8 = 4;
pub const TOTAL_ROUNDS: u32 = ROUNDS_PER_QUARTER * QUARTERS as u32;

/// Chance that a defender inside the steal window forces a dribble contest.
const STEAL_WINDOW_CHANCE: f64 = 25.0;

/// Attribute boost a fast-break finisher gets, worth three skill levels.
const FAST_BREAK_BONUS: u8 = 30;

/// Extra step budget on the break.
const FAST_BREAK_SPEED: i32 = 14;

/// Chance that a defender who just lost a dribble contest reached in and
/// picked up a personal foul.
const REACH_IN_FOUL_CHANCE: f64 = 20.0;

const CLOSE_GAME_DIFF: u16 = 5;
const BLOWOUT_DIFF: u16 = 15;

/// Everything needed to simulate one match.
#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub home_team: Team,
    pub away_team: Team,
    pub seed: u64,
}

/// Match-scoped state for one on-court player. Attributes are resolved once
/// here; the roster `Player` is not consulted again during the match.
#[derive(Debug, Clone)]
struct MatchPlayer {
    name: String,
    position: Position,
    skill_level: u8,
    attrs: ResolvedAttributes,
    stats: PlayerStats,
    active: bool,
}

fn actor(players: &[MatchPlayer], track: u8) -> ActorRef<'_> {
    let p = &players[track as usize];
    ActorRef { name: &p.name, position: p.position, attrs: &p.attrs }
}

pub struct MatchEngine {
    rng: ChaCha8Rng,
    court: Court,
    /// Tracks 0-4 are the home starting five, 5-9 away.
    players: Vec<MatchPlayer>,
    home_name: String,
    away_name: String,
    home_score: u16,
    away_score: u16,
    round: u32,
    quarter: u8,
    possession: Side,
    events: Vec<MatchEvent>,
    seq: u32,
}

impl MatchEngine {
    pub fn new(plan: MatchPlan) -> Result<Self, MatchError> {
        plan.home_team.validate()?;
        plan.away_team.validate()?;

        let mut players = Vec::with_capacity(10);
        for roster in [&plan.home_team, &plan.away_team] {
            for player in roster.starting_five() {
                players.push(MatchPlayer {
                    name: player.name.clone(),
                    position: player.position,
                    skill_level: player.skill_level,
                    attrs: ResolvedAttributes::resolve(player),
                    stats: PlayerStats::default(),
                    active: true,
                });
            }
        }

        let court = Court::new(players.iter().map(|p| p.position).collect());
        let mut engine = Self {
            rng: ChaCha8Rng::seed_from_u64(plan.seed),
            court,
            players,
            home_name: plan.home_team.name.clone(),
            away_name: plan.away_team.name.clone(),
            home_score: 0,
            away_score: 0,
            round: 0,
            quarter: 1,
            possession: Side::Home,
            events: Vec::new(),
            seq: 0,
        };
        engine.inbound();
        Ok(engine)
    }

    /// Run the full match and consume the engine into a summary.
    pub fn simulate(mut self) -> MatchSummary {
        info!("match start: {} vs {}", self.home_name, self.away_name);
        self.push_event(
            EventType::MatchStart,
            format!("{} host {}", self.home_name, self.away_name),
            None,
        );

        for quarter in 1..=QUARTERS {
            self.quarter = quarter;
            // Possession alternates at the start of each quarter.
            self.possession = if quarter % 2 == 1 { Side::Home } else { Side::Away };
            self.court.reset_formation();
            self.inbound();

            for _ in 0..ROUNDS_PER_QUARTER {
                self.run_round();
            }
            self.close_quarter();
        }

        self.close_match();
        self.into_summary()
    }

    pub fn court_state(&self) -> CourtState {
        self.court.snapshot()
    }

    pub fn scores(&self) -> (u16, u16) {
        (self.home_score, self.away_score)
    }

    /// One possession round for the side currently holding the ball.
    fn run_round(&mut self) {
        self.round += 1;
        let attacking = self.possession;
        let carrier = self.select_carrier(attacking);
        self.court.give_ball(carrier);

        // Carrier pushes toward the basket, their nearest defender shadows.
        self.advance_carrier(carrier, attacking);
        let shadow = self.court.nearest_opponent(carrier);
        let carrier_at = self.court.coord(carrier);
        self.court.move_player_toward(shadow, carrier_at);

        debug!(
            "round {} q{}: {} brings it up at {:?}",
            self.round,
            self.quarter,
            self.players[carrier as usize].name,
            self.court.coord(carrier)
        );

        let defender = self.court.nearest_opponent(carrier);
        if self.court.within(carrier, defender, STEAL_WINDOW)
            && roll_success(&mut self.rng, STEAL_WINDOW_CHANCE)
        {
            let contest = resolve_dribble_contest(
                &mut self.rng,
                &actor(&self.players, carrier),
                &actor(&self.players, defender),
            );
            self.push_event(
                EventType::DribbleContest,
                format!("{} pressures {}", contest.defender, contest.dribbler),
                Some(EventDetails {
                    attacker: Some(contest.dribbler.clone()),
                    defender: Some(contest.defender.clone()),
                    roll: Some(contest.roll as u32),
                    threshold: Some(contest.threshold),
                    success_percent: Some(contest.success_percent),
                    ..Default::default()
                }),
            );

            if contest.success {
                self.maybe_reach_in_foul(defender);
            } else {
                self.players[defender as usize].stats.record_steal();
                self.push_event(
                    EventType::Steal,
                    format!("{} strips {}", contest.defender, contest.dribbler),
                    Some(EventDetails {
                        player: Some(contest.defender.clone()),
                        team: Some(self.team_name(attacking.other()).to_string()),
                        ..Default::default()
                    }),
                );
                self.push_event(
                    EventType::Turnover,
                    format!("{} turn it over", self.team_name(attacking)),
                    None,
                );
                self.run_fast_break(defender);
                return;
            }
        }

        // Shot selection by distance bucket; from deep, a reluctant shooter
        // looks for a pass first.
        let range = self.court.shot_range(carrier, attacking);
        let tendency = self.players[carrier as usize].position.three_point_tendency();
        let mut shooter = carrier;
        let mut assist_from = None;

        if range == ShotRange::Three && !roll_success(&mut self.rng, tendency * 100.0) {
            match self.try_pass(carrier, attacking) {
                PassOutcome::Completed(receiver) => {
                    shooter = receiver;
                    // No assist credit when the carrier had nobody to hit
                    // and kept the ball.
                    if receiver != carrier {
                        assist_from = Some(carrier);
                    }
                }
                PassOutcome::Lost => return,
            }
        }

        self.attempt_shot(shooter, attacking, assist_from, false);
    }

    /// Drive the carrier toward the attacked basket: one movement call per
    /// step of a skill-scaled budget, `1 + ceil(skill_level / 2)`, each
    /// covering the carrier's position speed. A skill-5 guard eats twice the
    /// ground of a skill-1 one.
    fn advance_carrier(&mut self, carrier: u8, attacking: Side) {
        let basket = self.court.basket_for(attacking);
        let moves = 1 + (self.players[carrier as usize].skill_level as i32 + 1) / 2;
        let mut at = self.court.coord(carrier);
        for _ in 0..moves {
            let next = self.court.move_player_toward(carrier, basket);
            if next == at {
                break;
            }
            at = next;
        }
    }

    /// Pick who brings the ball up. The current possessor keeps it when they
    /// belong to the attacking side; otherwise a weighted pick, point guards
    /// heaviest.
    fn select_carrier(&mut self, attacking: Side) -> u8 {
        if let Some(holder) = self.court.ball_possession() {
            if Court::track_side(holder) == attacking && self.players[holder as usize].active {
                return holder;
            }
        }
        let weights: Vec<(u8, u32)> = Court::side_tracks(attacking)
            .filter(|&t| self.players[t as usize].active)
            .map(|t| (t, self.players[t as usize].position.carrier_weight()))
            .collect();
        weighted_choice(&mut self.rng, &weights)
            .copied()
            .unwrap_or(Court::side_tracks(attacking).start)
    }

    fn try_pass(&mut self, carrier: u8, attacking: Side) -> PassOutcome {
        let options = self.court.passing_options(carrier);
        let Some(&receiver) = options.first() else {
            // Nobody in range; the carrier takes the shot themselves.
            return PassOutcome::Completed(carrier);
        };
        let lane_defender = self.court.nearest_opponent(receiver);
        let result = resolve_pass_attempt(
            &mut self.rng,
            &actor(&self.players, carrier),
            &actor(&self.players, receiver),
            &actor(&self.players, lane_defender),
        );

        if result.stolen {
            self.players[lane_defender as usize].stats.record_steal();
            self.push_event(
                EventType::Steal,
                format!("{} picks off the pass from {}", result.stealer.as_deref().unwrap_or(""), result.passer),
                Some(EventDetails {
                    player: result.stealer.clone(),
                    team: Some(self.team_name(attacking.other()).to_string()),
                    success_percent: Some(result.success_percent),
                    ..Default::default()
                }),
            );
            self.turnover(attacking);
            return PassOutcome::Lost;
        }
        if !result.completed {
            self.push_event(
                EventType::Turnover,
                format!("{} throws it away", result.passer),
                Some(EventDetails {
                    player: Some(result.passer.clone()),
                    success_percent: Some(result.success_percent),
                    ..Default::default()
                }),
            );
            self.turnover(attacking);
            return PassOutcome::Lost;
        }
        self.court.give_ball(receiver);
        PassOutcome::Completed(receiver)
    }

    /// Resolve a shot by `shooter` against their nearest defender, including
    /// attempt bookkeeping, block and rebound chains, and scoring events.
    fn attempt_shot(&mut self, shooter: u8, attacking: Side, assist_from: Option<u8>, fast_break: bool) {
        let defender = self.court.nearest_opponent(shooter);
        let position = self.players[shooter as usize].position;

        let want_three = if fast_break {
            roll_success(&mut self.rng, position.fast_break_three_tendency() * 100.0)
        } else {
            match self.court.shot_range(shooter, attacking) {
                ShotRange::Three => true,
                ShotRange::Mid => roll_success(&mut self.rng, position.three_point_tendency() * 100.0),
                ShotRange::Close => false,
            }
        };

        let mut shooter_attrs = self.players[shooter as usize].attrs;
        if fast_break {
            shooter_attrs.shooting = shooter_attrs.shooting.saturating_add(FAST_BREAK_BONUS).min(99);
            shooter_attrs.shooting_3pt =
                shooter_attrs.shooting_3pt.saturating_add(FAST_BREAK_BONUS).min(99);
        }
        let shooter_ref = ActorRef {
            name: &self.players[shooter as usize].name,
            position,
            attrs: &shooter_attrs,
        };

        let mut is_three = want_three;
        let mut result: ShotResult;
        if want_three {
            result = resolve_three_point_attempt(
                &mut self.rng,
                &shooter_ref,
                &actor(&self.players, defender),
            );
            if !result.can_perform {
                // Big men do not pull up from deep; they drive instead.
                is_three = false;
                result = resolve_two_point_attempt(
                    &mut self.rng,
                    &shooter_ref,
                    &actor(&self.players, defender),
                );
            }
        } else {
            result = resolve_two_point_attempt(
                &mut self.rng,
                &shooter_ref,
                &actor(&self.players, defender),
            );
        }

        if is_three {
            self.players[shooter as usize].stats.record_three_point_attempt(result.made);
        } else {
            self.players[shooter as usize].stats.record_two_point_attempt(result.made);
        }

        if result.blocked {
            self.players[defender as usize].stats.record_block();
            self.push_event(
                EventType::Block,
                format!("{} swats the shot from {}", result.blocker.as_deref().unwrap_or(""), result.shooter),
                Some(EventDetails {
                    player: result.blocker.clone(),
                    defender: result.blocker.clone(),
                    attacker: Some(result.shooter.clone()),
                    ..Default::default()
                }),
            );
            if fast_break {
                return;
            }
            self.rebound_chain(shooter, attacking);
            return;
        }

        if result.made {
            self.add_points(attacking, result.points);
            if let Some(passer) = assist_from {
                self.credit_assist(passer);
            }
            let (event_type, verb) = match (is_three, fast_break) {
                (true, true) => (EventType::Score3PtFastBreak, "buries a transition three"),
                (true, false) => (EventType::Score3Pt, "hits a three"),
                (false, true) => (EventType::Score2PtFastBreak, "finishes the break"),
                (false, false) => (EventType::Score2Pt, "scores inside"),
            };
            let description = format!("{} {}", result.shooter, verb);
            self.push_event(
                event_type,
                description,
                Some(EventDetails {
                    player: Some(result.shooter.clone()),
                    team: Some(self.team_name(attacking).to_string()),
                    points: Some(result.points),
                    home_score: Some(self.home_score),
                    away_score: Some(self.away_score),
                    success_percent: Some(result.success_percent),
                    ..Default::default()
                }),
            );
            if !fast_break {
                self.turnover(attacking);
            }
            return;
        }

        let event_type = if is_three { EventType::Miss3Pt } else { EventType::Miss2Pt };
        self.push_event(
            event_type,
            format!("{} misses", result.shooter),
            Some(EventDetails {
                player: Some(result.shooter.clone()),
                success_percent: Some(result.success_percent),
                ..Default::default()
            }),
        );
        if !fast_break {
            self.rebound_chain(shooter, attacking);
        }
    }

    /// Board battle after a miss: the shooter crashes against their nearest
    /// defender. Defense wins ties and flips possession; an offensive board
    /// keeps the round's side alive with the ball in the shooter's hands.
    fn rebound_chain(&mut self, shooter: u8, attacking: Side) {
        let boxer = self.court.nearest_opponent(shooter);
        let result = resolve_rebound_contest(
            &mut self.rng,
            &actor(&self.players, shooter),
            &actor(&self.players, boxer),
        );

        let details = EventDetails {
            player: Some(result.winner_name.clone()),
            offense_total: Some(result.offense_total),
            defense_total: Some(result.defense_total),
            ..Default::default()
        };
        match result.winner {
            ReboundWinner::Defense => {
                self.players[boxer as usize].stats.record_rebound();
                self.push_event(
                    EventType::ReboundDefense,
                    format!("{} secures the defensive board", result.winner_name),
                    Some(details),
                );
                self.turnover(attacking);
            }
            ReboundWinner::Offense => {
                self.players[shooter as usize].stats.record_rebound();
                self.push_event(
                    EventType::ReboundOffense,
                    format!("{} tips it back to the offense", result.winner_name),
                    Some(details),
                );
                self.court.give_ball(shooter);
            }
        }
    }

    /// A stolen dribble triggers a transition attack going the other way:
    /// the thief sprints out and shoots with a big bonus, no rebound either
    /// way, and possession returns to the side that was robbed.
    fn run_fast_break(&mut self, thief: u8) {
        let robbed = self.possession;
        self.possession = robbed.other();
        self.court.give_ball(thief);

        self.push_event(
            EventType::FastBreakStart,
            format!("{} takes off on the break", self.players[thief as usize].name),
            Some(EventDetails {
                player: Some(self.players[thief as usize].name.clone()),
                team: Some(self.team_name(self.possession).to_string()),
                ..Default::default()
            }),
        );

        let basket = self.court.basket_for(self.possession);
        self.court.move_player_toward_with_speed(thief, basket, FAST_BREAK_SPEED);
        self.attempt_shot(thief, self.possession, None, true);

        self.possession = robbed;
        self.court.reset_formation();
        self.inbound();
    }

    fn credit_assist(&mut self, passer: u8) {
        // Only positions with an assist dice entry generate assists, and a
        // roll of 1 goes uncredited.
        let roll = roll_for_action(
            &mut self.rng,
            ActionKind::Assist,
            self.players[passer as usize].position,
        );
        if roll.can_perform && roll.total >= 2 {
            self.players[passer as usize].stats.record_assist();
        }
    }

    fn maybe_reach_in_foul(&mut self, defender: u8) {
        if !roll_success(&mut self.rng, REACH_IN_FOUL_CHANCE) {
            return;
        }
        let fouled_out = self.players[defender as usize].stats.record_foul();
        if fouled_out {
            self.players[defender as usize].active = false;
            self.court.set_active(defender, false);
            warn!("{} fouled out", self.players[defender as usize].name);
        }
    }

    /// Hand possession to the other side and set up the half-court inbound.
    fn turnover(&mut self, from: Side) {
        self.possession = from.other();
        self.court.reset_formation();
        self.inbound();
    }

    /// Give the ball to the possessing side's point guard (or first active
    /// player when the point guard has fouled out).
    fn inbound(&mut self) {
        let side = self.possession;
        let track = Court::side_tracks(side)
            .find(|&t| self.players[t as usize].position == Position::PG && self.players[t as usize].active)
            .or_else(|| Court::side_tracks(side).find(|&t| self.players[t as usize].active))
            .unwrap_or(Court::side_tracks(side).start);
        self.court.give_ball(track);
    }

    fn close_quarter(&mut self) {
        let (home, away) = (self.home_score, self.away_score);
        info!("end of q{}: {}-{}", self.quarter, home, away);
        self.push_event(
            EventType::QuarterEnd,
            format!("end of quarter {}: {}-{}", self.quarter, home, away),
            Some(EventDetails {
                quarter: Some(self.quarter),
                home_score: Some(home),
                away_score: Some(away),
                ..Default::default()
            }),
        );

        let diff = home.abs_diff(away);
        if diff <= CLOSE_GAME_DIFF {
            self.push_event(
                EventType::CloseGame,
                format!("tight game, within {} after {} quarters", diff, self.quarter),
                Some(EventDetails { diff: Some(diff), ..Default::default() }),
            );
        } else if diff >= BLOWOUT_DIFF {
            let leader = if home > away { Side::Home } else { Side::Away };
            self.push_event(
                EventType::Blowout,
                format!("{} are running away with it, up {}", self.team_name(leader), diff),
                Some(EventDetails {
                    team: Some(self.team_name(leader).to_string()),
                    diff: Some(diff),
                    ..Default::default()
                }),
            );
        }
    }

    fn close_match(&mut self) {
        let (home, away) = (self.home_score, self.away_score);
        if home == away {
            info!("final: {}-{} tie", home, away);
            self.push_event(
                EventType::MatchTie,
                format!("it ends all square at {}-{}", home, away),
                Some(EventDetails {
                    home_score: Some(home),
                    away_score: Some(away),
                    ..Default::default()
                }),
            );
            return;
        }
        let winner = if home > away { Side::Home } else { Side::Away };
        let (winner_score, loser_score) = if home > away { (home, away) } else { (away, home) };
        info!("final: {} win {}-{}", self.team_name(winner), winner_score, loser_score);
        self.push_event(
            EventType::MatchEnd,
            format!(
                "{} beat {} {}-{}",
                self.team_name(winner),
                self.team_name(winner.other()),
                winner_score,
                loser_score
            ),
            Some(EventDetails {
                winner_team: Some(self.team_name(winner).to_string()),
                loser_team: Some(self.team_name(winner.other()).to_string()),
                winner_score: Some(winner_score),
                loser_score: Some(loser_score),
                home_score: Some(home),
                away_score: Some(away),
                ..Default::default()
            }),
        );
    }

    fn into_summary(self) -> MatchSummary {
        let lines = |range: std::ops::Range<u8>, players: &[MatchPlayer]| -> Vec<PlayerStatLine> {
            range
                .map(|t| {
                    let p = &players[t as usize];
                    PlayerStatLine {
                        name: p.name.clone(),
                        position: p.position,
                        stats: p.stats.clone(),
                    }
                })
                .collect()
        };
        let home_players = lines(Court::side_tracks(Side::Home), &self.players);
        let away_players = lines(Court::side_tracks(Side::Away), &self.players);
        let home_totals = TeamTotals::from_lines(&home_players);
        let away_totals = TeamTotals::from_lines(&away_players);
        let winner = if self.home_score > self.away_score {
            self.home_name.clone()
        } else if self.away_score > self.home_score {
            self.away_name.clone()
        } else {
            TIE.to_string()
        };
        MatchSummary {
            home_team: self.home_name,
            away_team: self.away_name,
            home_score: self.home_score,
            away_score: self.away_score,
            final_score: MatchSummary::score_string(self.home_score, self.away_score),
            winner,
            total_rounds: self.round,
            played_at: chrono::Utc::now(),
            events: self.events,
            home_players,
            away_players,
            home_totals,
            away_totals,
        }
    }

    fn team_name(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_name,
            Side::Away => &self.away_name,
        }
    }

    fn add_points(&mut self, side: Side, points: u8) {
        match side {
            Side::Home => self.home_score += points as u16,
            Side::Away => self.away_score += points as u16,
        }
    }

    fn push_event(&mut self, event_type: EventType, description: String, details: Option<EventDetails>) {
        self.seq += 1;
        self.events.push(MatchEvent {
            seq: self.seq,
            round: self.round,
            quarter: self.quarter,
            possession: self.possession,
            event_type,
            description,
            details,
        });
    }
}

enum PassOutcome {
    /// The ball reached this track (possibly the carrier keeping it).
    Completed(u8),
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;

    fn roster(prefix: &str, skill: u8) -> Vec<Player> {
        Position::ALL
            .iter()
            .map(|&pos| Player::new(&format!("{} {}", prefix, pos.code()), pos, skill))
            .collect()
    }

    fn plan(seed: u64) -> MatchPlan {
        MatchPlan {
            home_team: Team::new("Harbor City", roster("H", 3)),
            away_team: Team::new("Valley Ridge", roster("A", 3)),
            seed,
        }
    }

    #[test]
    fn test_rejects_invalid_lineup() {
        let mut bad = plan(1);
        bad.home_team.players[0].position = Position::C; // two centers, no PG
        assert!(MatchEngine::new(bad).is_err());
    }

    #[test]
    fn test_full_match_round_and_quarter_accounting() {
        let summary = MatchEngine::new(plan(42)).unwrap().simulate();
        assert_eq!(summary.total_rounds, TOTAL_ROUNDS);

        let quarter_ends: Vec<_> = summary
            .events
            .iter()
            .filter(|e| e.event_type == EventType::QuarterEnd)
            .collect();
        assert_eq!(quarter_ends.len(), QUARTERS as usize);

        // Every round number 1-100 shows up in the log at least once.
        let rounds: std::collections::HashSet<u32> =
            summary.events.iter().map(|e| e.round).filter(|&r| r > 0).collect();
        assert_eq!(rounds.len(), TOTAL_ROUNDS as usize);

        assert_eq!(summary.events.first().unwrap().event_type, EventType::MatchStart);
        let last = summary.events.last().unwrap().event_type;
        assert!(last == EventType::MatchEnd || last == EventType::MatchTie);
    }

    #[test]
    fn test_scoreboard_matches_score_events() {
        let summary = MatchEngine::new(plan(7)).unwrap().simulate();
        let mut home = 0u16;
        let mut away = 0u16;
        for event in summary.events.iter().filter(|e| e.is_score()) {
            let details = event.details.as_ref().unwrap();
            let points = details.points.unwrap() as u16;
            let team = details.team.as_deref().unwrap();
            if team == summary.home_team {
                home += points;
            } else {
                away += points;
            }
        }
        assert_eq!(home, summary.home_score);
        assert_eq!(away, summary.away_score);
        assert_eq!(summary.final_score, format!("{}-{}", home, away));
    }

    #[test]
    fn test_box_score_points_match_scoreboard() {
        let summary = MatchEngine::new(plan(99)).unwrap().simulate();
        assert_eq!(summary.home_totals.points, summary.home_score);
        assert_eq!(summary.away_totals.points, summary.away_score);
    }

    #[test]
    fn test_winner_field_consistent_with_scores() {
        for seed in [3, 11, 58, 901] {
            let summary = MatchEngine::new(plan(seed)).unwrap().simulate();
            if summary.home_score > summary.away_score {
                assert_eq!(summary.winner, summary.home_team);
            } else if summary.away_score > summary.home_score {
                assert_eq!(summary.winner, summary.away_team);
            } else {
                assert_eq!(summary.winner, TIE);
                assert!(summary.is_tie());
            }
        }
    }

    #[test]
    fn test_same_seed_same_match() {
        let a = MatchEngine::new(plan(1234)).unwrap().simulate();
        let b = MatchEngine::new(plan(1234)).unwrap().simulate();
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.events, b.events);
        assert_eq!(a.home_players, b.home_players);
        assert_eq!(a.away_players, b.away_players);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = MatchEngine::new(plan(1)).unwrap().simulate();
        let b = MatchEngine::new(plan(2)).unwrap().simulate();
        // Event-for-event identical logs from different seeds would mean the
        // seed is being ignored.
        assert_ne!(a.events, b.events);
    }

    #[test]
    fn test_big_men_never_attempt_threes() {
        let summary = MatchEngine::new(plan(5)).unwrap().simulate();
        for line in summary.home_players.iter().chain(&summary.away_players) {
            if line.position.is_big() {
                assert_eq!(
                    line.stats.three_pt.attempted, 0,
                    "{} should have no three-point attempts",
                    line.name
                );
            }
        }
    }

    #[test]
    fn test_stronger_team_usually_wins() {
        let mut wins = 0;
        for seed in 0..20u64 {
            let plan = MatchPlan {
                home_team: Team::new("Stacked", roster("S", 5)),
                away_team: Team::new("Outmatched", roster("O", 1)),
                seed,
            };
            let summary = MatchEngine::new(plan).unwrap().simulate();
            if summary.winner == "Stacked" {
                wins += 1;
            }
        }
        assert!(wins >= 16, "skill-5 side won only {}/20", wins);
    }

    #[test]
    fn test_carrier_advance_scales_with_skill() {
        let quick_plan = MatchPlan {
            home_team: Team::new("Quick", roster("Q", 5)),
            away_team: Team::new("Opp", roster("O", 3)),
            seed: 1,
        };
        let plodding_plan = MatchPlan {
            home_team: Team::new("Plodding", roster("P", 1)),
            away_team: Team::new("Opp", roster("O", 3)),
            seed: 1,
        };
        let mut quick = MatchEngine::new(quick_plan).unwrap();
        let mut plodding = MatchEngine::new(plodding_plan).unwrap();

        // Same point guard, same formation spot; only skill differs, and the
        // advance is RNG-free, so the gap is purely the step budget.
        quick.advance_carrier(0, Side::Home);
        plodding.advance_carrier(0, Side::Home);

        let quick_dist = quick.court.distance_to_basket(0, Side::Home);
        let plodding_dist = plodding.court.distance_to_basket(0, Side::Home);
        assert!(
            quick_dist < plodding_dist,
            "skill 5 carrier should outrun skill 1: {} vs {}",
            quick_dist,
            plodding_dist
        );
        assert_eq!(quick.court.shot_range(0, Side::Home), super::ShotRange::Close);
        assert_eq!(plodding.court.shot_range(0, Side::Home), super::ShotRange::Three);
    }

    #[test]
    fn test_fouled_out_player_drops_out_of_court_queries() {
        use crate::models::FOUL_LIMIT;

        let mut engine = MatchEngine::new(plan(3)).unwrap();
        engine.players[5].stats.fouls = FOUL_LIMIT - 1;
        for _ in 0..500 {
            engine.maybe_reach_in_foul(5);
            if !engine.players[5].active {
                break;
            }
        }
        assert!(!engine.players[5].active, "one more foul should send them off");
        assert!(!engine.court.is_active(5));
        // Teammates no longer see them as a passing option, opponents never
        // mark them as the nearest defender.
        assert!(!engine.court.passing_options(6).contains(&5));
        for home in 0..5u8 {
            assert_ne!(engine.court.nearest_opponent(home), 5);
        }
    }

    #[test]
    fn test_isolated_carrier_keeps_ball_and_earns_no_assist() {
        let mut engine = MatchEngine::new(plan(17)).unwrap();
        // Strand the home point guard out of passing range of everyone.
        engine.court.place_player(0, (40, 25));
        assert!(engine.court.passing_options(0).is_empty());

        let outcome = engine.try_pass(0, Side::Home);
        assert!(matches!(outcome, PassOutcome::Completed(0)));
        // No pass happened, so nothing was logged and nobody is in line for
        // an assist on the shot that follows.
        assert!(engine.events.is_empty());
    }

    #[test]
    fn test_court_snapshot_exposes_ten_players() {
        let engine = MatchEngine::new(plan(8)).unwrap();
        let state = engine.court_state();
        assert_eq!(state.players.len(), 10);
        assert!(state.ball_possession.is_some());
        assert_eq!(engine.scores(), (0, 0));
    }
}
