//! Command-line front end for the match engine.
//!
//! Runs one simulation and prints either a play-by-play with box scores or
//! the raw summary JSON. Rosters come from a JSON file or from built-in
//! demo fives.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hoops_core::models::{MatchSummary, Player, PlayerStatLine, Position, Team, TeamTotals};
use hoops_core::{simulate_match, MatchRequest, SCHEMA_VERSION};

#[derive(Parser)]
#[command(name = "hoops_cli")]
#[command(about = "Simulate deterministic basketball matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match
    Simulate {
        /// RNG seed; the same seed and rosters always replay the same match
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Home roster JSON file (defaults to a built-in demo five)
        #[arg(long)]
        home: Option<PathBuf>,

        /// Away roster JSON file (defaults to a built-in demo five)
        #[arg(long)]
        away: Option<PathBuf>,

        /// Home team name when using the demo roster
        #[arg(long, default_value = "Harbor City Pelicans")]
        home_name: String,

        /// Away team name when using the demo roster
        #[arg(long, default_value = "Valley Ridge Miners")]
        away_name: String,

        /// Print the full summary as JSON instead of play-by-play text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a roster JSON template to stdout
    RosterTemplate,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, home, away, home_name, away_name, json } => {
            let home_team = load_team(home.as_deref(), &home_name)?;
            let away_team = load_team(away.as_deref(), &away_name)?;
            let request = MatchRequest {
                schema_version: SCHEMA_VERSION,
                seed,
                home_team,
                away_team,
            };
            let summary = simulate_match(request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_play_by_play(&summary);
            }
        }
        Commands::RosterTemplate => {
            let team = demo_team("Team Name");
            println!("{}", serde_json::to_string_pretty(&team)?);
        }
    }
    Ok(())
}

fn load_team(path: Option<&std::path::Path>, fallback_name: &str) -> Result<Team> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading roster file {}", path.display()))?;
            let team: Team = serde_json::from_str(&raw)
                .with_context(|| format!("parsing roster file {}", path.display()))?;
            Ok(team)
        }
        None => {
            log::debug!("no roster file given, using demo five for {}", fallback_name);
            Ok(demo_team(fallback_name))
        }
    }
}

fn demo_team(name: &str) -> Team {
    let surnames = ["Vance", "Okafor", "Reyes", "Lindqvist", "Barker"];
    let players = Position::ALL
        .iter()
        .zip(surnames)
        .map(|(&position, surname)| Player::new(surname, position, 3))
        .collect();
    Team::new(name, players)
}

fn print_play_by_play(summary: &MatchSummary) {
    println!("=== {} vs {} ===", summary.home_team, summary.away_team);
    for event in &summary.events {
        if event.round == 0 {
            println!("{}", event.description);
        } else {
            println!("[Q{} R{:>3}] {}", event.quarter, event.round, event.description);
        }
    }
    println!();
    println!(
        "FINAL: {} {} - {} {}{}",
        summary.home_team,
        summary.home_score,
        summary.away_score,
        summary.away_team,
        if summary.is_tie() { " (tie)" } else { "" }
    );
    println!();
    print_box_score(&summary.home_team, &summary.home_players, &summary.home_totals);
    println!();
    print_box_score(&summary.away_team, &summary.away_players, &summary.away_totals);
}

fn print_box_score(team: &str, lines: &[PlayerStatLine], totals: &TeamTotals) {
    println!("{}", team);
    println!(
        "{:<16} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>7} {:>7}",
        "PLAYER", "POS", "PTS", "REB", "AST", "STL", "BLK", "2PT", "3PT"
    );
    for line in lines {
        println!(
            "{:<16} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>3}/{:<3} {:>3}/{:<3}",
            line.name,
            line.position.code(),
            line.stats.points,
            line.stats.rebounds,
            line.stats.assists,
            line.stats.steals,
            line.stats.blocks,
            line.stats.two_pt.made,
            line.stats.two_pt.attempted,
            line.stats.three_pt.made,
            line.stats.three_pt.attempted,
        );
    }
    println!(
        "{:<16} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4}  FG {:.1}%",
        "TOTAL",
        "",
        totals.points,
        totals.rebounds,
        totals.assists,
        totals.steals,
        totals.blocks,
        totals.field_goal_percentage(),
    );
}
