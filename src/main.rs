//! Reversi-MC: play Reversi against a flat Monte Carlo engine.
//!
//! ## Usage
//!
//! - `reversi-mc play` - Play against the computer
//! - `reversi-mc simulate --games 10` - Heuristic engine vs random engine

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

use reversi_mc::board::Color;
use reversi_mc::constants::{N, PLAYOUTS_PER_CANDIDATE, TIME_BUDGET_SECS};
use reversi_mc::engine::{Agent, Engine};
use reversi_mc::game::{GameState, Move, check_move};
use reversi_mc::metrics::fmt_average;
use reversi_mc::playout::Policy;
use reversi_mc::search::SearchConfig;
use reversi_mc::session::{Session, Turn};

/// Reversi-MC: a flat Monte Carlo Reversi engine
#[derive(Parser)]
#[command(name = "reversi-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play {
        /// Your color
        #[arg(long, value_enum, default_value_t = Side::Dark)]
        color: Side,
        /// Let the computer move first
        #[arg(long)]
        second: bool,
        /// Playout policy of the computer
        #[arg(long, value_enum, default_value_t = Playout::Heuristic)]
        policy: Playout,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Let a heuristic engine (Dark, moves first) play a random engine (Light)
    Simulate {
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Light,
    Dark,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Light => Color::Light,
            Side::Dark => Color::Dark,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Playout {
    Random,
    Heuristic,
}

impl From<Playout> for Policy {
    fn from(playout: Playout) -> Self {
        match playout {
            Playout::Random => Policy::Random,
            Playout::Heuristic => Policy::Heuristic,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Playouts per candidate move
    #[arg(long, default_value_t = PLAYOUTS_PER_CANDIDATE)]
    playouts: usize,
    /// Seconds per move; 0 means unlimited
    #[arg(long, default_value_t = TIME_BUDGET_SECS)]
    budget: u64,
    /// Evaluate candidate moves in parallel
    #[arg(long)]
    parallel: bool,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self, policy: Policy) -> SearchConfig {
        SearchConfig {
            playouts_per_candidate: self.playouts,
            time_budget: (self.budget > 0).then(|| Duration::from_secs(self.budget)),
            policy,
            parallel: self.parallel,
        }
    }

    fn engine(&self, policy: Policy, stream: u64) -> Engine {
        let config = self.config(policy);
        match self.seed {
            Some(seed) => Engine::with_seed(config, seed.wrapping_add(stream)),
            None => Engine::new(config),
        }
    }
}

/// One trimmed line from stdin, or `None` once input is closed.
fn read_line() -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Board with the legal moves of the side to move shown by cell number.
fn board_with_hints(state: &GameState) -> String {
    let legal = state.legal_moves();
    let mut out = String::new();
    for (pos, cell) in state.board.cells().iter().enumerate() {
        let text = match cell {
            Some(Color::Dark) => "X".to_string(),
            Some(Color::Light) => "O".to_string(),
            None if legal.contains(&pos) => pos.to_string(),
            None => ".".to_string(),
        };
        out.push_str(&format!("{text:>2} "));
        if (pos + 1) % N == 0 {
            out.push('\n');
        }
    }
    out
}

/// Reads cell indices from stdin.
struct Human;

impl Agent for Human {
    fn choose_move(&mut self, state: &GameState) -> anyhow::Result<Option<Move>> {
        let legal = state.legal_moves();
        let mut stdout = io::stdout();

        loop {
            write!(stdout, "Your move {legal:?}: ")?;
            stdout.flush()?;

            let Some(line) = read_line()? else {
                anyhow::bail!("input closed");
            };
            let pos = match line.parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    println!("Please enter a cell number.");
                    continue;
                }
            };
            match check_move(pos) {
                Ok(pos) if state.is_legal(pos) => return Ok(Some(pos)),
                Ok(pos) => println!("{pos} is not a legal move."),
                Err(e) => println!("{e}"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Some(Commands::Play {
            color,
            second,
            policy,
            search,
        }) => play(color.into(), second, policy.into(), &search),
        Some(Commands::Simulate { games, search }) => simulate(games, &search),
        None => simulate(1, &SearchArgs {
            playouts: PLAYOUTS_PER_CANDIDATE,
            budget: TIME_BUDGET_SECS,
            parallel: false,
            seed: None,
        }),
    }
}

fn play(human: Color, second: bool, policy: Policy, args: &SearchArgs) -> anyhow::Result<()> {
    let first = if second { human.opponent() } else { human };
    let computer: Box<dyn Agent> = Box::new(args.engine(policy, 0));
    let (light, dark): (Box<dyn Agent>, Box<dyn Agent>) = match human {
        Color::Light => (Box::new(Human), computer),
        Color::Dark => (computer, Box::new(Human)),
    };
    let mut session = Session::new(first, light, dark);

    loop {
        let state = session.state();
        if state.to_move == human {
            println!("\n{}", board_with_hints(state));
        } else {
            println!("\n{state}");
        }
        match session.play_turn()? {
            Turn::Moved { color, pos } if color != human => println!("Computer plays {pos}"),
            Turn::Moved { .. } => {}
            Turn::Passed(color) => println!("{color} has no move and passes."),
            Turn::Finished(outcome) => {
                println!("{outcome}.");
                let metrics = session.agent(human.opponent()).metrics();
                if let Some(m) = metrics {
                    println!("Average playouts per second: {}", fmt_average(m.average_rollouts_per_second()));
                    println!("Average search time (s): {}", fmt_average(m.average_search_seconds()));
                }

                print!("Enter 'p' to play again, anything else to quit: ");
                io::stdout().flush()?;
                match read_line()? {
                    Some(answer) if answer.eq_ignore_ascii_case("p") => session.reset(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn simulate(games: u32, args: &SearchArgs) -> anyhow::Result<()> {
    let light = args.engine(Policy::Random, 1);
    let dark = args.engine(Policy::Heuristic, 2);
    let mut session = Session::new(Color::Dark, Box::new(light), Box::new(dark));

    for game in 1..=games {
        let outcome = session.play_game()?;
        println!("Game {game}: {outcome}.");
        println!("{}", session.state());
        session.reset();
    }

    let tally = session.tally();
    println!("Light (random) wins: {}", tally.light_wins);
    println!("Dark (heuristic) wins: {}", tally.dark_wins);
    println!("Ties: {}", tally.ties);
    for color in [Color::Light, Color::Dark] {
        if let Some(m) = session.agent(color).metrics() {
            println!(
                "{color}: {} playouts/s on average, {} s per move",
                fmt_average(m.average_rollouts_per_second()),
                fmt_average(m.average_search_seconds())
            );
        }
    }
    Ok(())
}
