pub mod court;
pub mod dice;
pub mod match_sim;
pub mod probability;
pub mod resolver;
pub mod weighted;

pub use court::{Court, CourtState, ShotRange, COURT_HEIGHT, COURT_WIDTH, PASSING_RANGE, STEAL_WINDOW};
pub use dice::{dice_for_action, roll_for_action, ActionKind, DiceExpr, DiceRoll, DieTerm};
pub use match_sim::{MatchEngine, MatchPlan, QUARTERS, ROUNDS_PER_QUARTER, TOTAL_ROUNDS};
pub use probability::{dribble_threshold, success_percentage, threshold_success_percentage};
pub use resolver::{
    resolve_block_attempt, resolve_dribble_contest, resolve_pass_attempt, resolve_rebound_contest,
    resolve_steal_attempt, resolve_three_point_attempt, resolve_two_point_attempt, ActorRef,
    BlockResult, DribbleResult, PassResult, ReboundResult, ReboundWinner, ShotResult, StealResult,
};
pub use weighted::weighted_choice;
