//! Othello-Search: play Othello against minimax and MCTS engines.
//!
//! ## Usage
//!
//! - `othello-search` - Minimax (Dark) vs MCTS (Light) demo game
//! - `othello-search play --dark human --light mcts` - Play a game
//! - `othello-search arena --games 20` - Engine-vs-engine tally

use std::io;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use othello_search::board::Color;
use othello_search::constants::{DEFAULT_DEPTH, DEFAULT_ITERATIONS};
use othello_search::game::{
    HumanPlayer, Match, MctsPlayer, MinimaxPlayer, Player, RandomPlayer, Tally,
};

/// Othello-Search: Othello with minimax and Monte Carlo Tree Search engines
#[derive(Parser)]
#[command(name = "othello-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game, rendering the board after every turn
    Play {
        /// Who plays Dark (X, moves first)
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        dark: PlayerKind,
        /// Who plays Light (O)
        #[arg(long, value_enum, default_value_t = PlayerKind::Mcts)]
        light: PlayerKind,
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Play several engine games quietly and report the results
    Arena {
        #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
        dark: PlayerKind,
        #[arg(long, value_enum, default_value_t = PlayerKind::Mcts)]
        light: PlayerKind,
        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: usize,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Minimax (Dark) vs MCTS (Light)
    Demo {
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Human,
    Minimax,
    Mcts,
    Random,
}

#[derive(Args, Clone, Debug)]
struct EngineArgs {
    /// Minimax search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// MCTS simulations per move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Seed for the MCTS and random players
    #[arg(long)]
    seed: Option<u64>,
    /// Print search statistics to stderr
    #[arg(long)]
    verbose: bool,
}

impl Default for EngineArgs {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            verbose: false,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
struct DisplayArgs {
    /// Pause between turns, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Only print the final result
    #[arg(long)]
    quiet: bool,
    /// Disable colored pieces
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            dark,
            light,
            engine,
            display,
        }) => run_game(dark, light, &engine, &display),
        Some(Commands::Arena {
            dark,
            light,
            games,
            engine,
        }) => run_arena(dark, light, games, &engine),
        Some(Commands::Demo { engine, display }) => {
            run_game(PlayerKind::Minimax, PlayerKind::Mcts, &engine, &display)
        }
        None => run_game(
            PlayerKind::Minimax,
            PlayerKind::Mcts,
            &EngineArgs::default(),
            &DisplayArgs::default(),
        ),
    }
}

fn make_player(kind: PlayerKind, engine: &EngineArgs, seed: Option<u64>) -> Box<dyn Player> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::new(io::stdin().lock(), io::stdout())),
        PlayerKind::Minimax => {
            Box::new(MinimaxPlayer::new(engine.depth).verbose(engine.verbose))
        }
        PlayerKind::Mcts => {
            let player = match seed {
                Some(s) => MctsPlayer::with_seed(engine.iterations, s),
                None => MctsPlayer::new(engine.iterations),
            };
            Box::new(player.verbose(engine.verbose))
        }
        PlayerKind::Random => Box::new(match seed {
            Some(s) => RandomPlayer::with_seed(s),
            None => RandomPlayer::default(),
        }),
    }
}

fn run_game(
    dark: PlayerKind,
    light: PlayerKind,
    engine: &EngineArgs,
    display: &DisplayArgs,
) -> Result<()> {
    // Each human player holds the stdin lock for the whole game.
    if dark == PlayerKind::Human && light == PlayerKind::Human {
        bail!("at most one side can be human");
    }
    let dark_player = make_player(dark, engine, engine.seed);
    let light_player = make_player(light, engine, engine.seed.map(|s| s.wrapping_add(1)));
    println!("{} (X) vs {} (O)", dark_player.name(), light_player.name());

    let mut game = Match::new(dark_player, light_player, io::stdout())
        .render(!display.quiet, !display.no_color)
        .delay(Duration::from_millis(display.delay_ms));
    let record = game.play()?;

    if display.quiet {
        println!(
            "{} after {} placements (X: {}, O: {})",
            record.outcome,
            record.placements(),
            record.final_state.count(Color::Dark),
            record.final_state.count(Color::Light)
        );
    }
    Ok(())
}

fn run_arena(dark: PlayerKind, light: PlayerKind, games: usize, engine: &EngineArgs) -> Result<()> {
    if dark == PlayerKind::Human || light == PlayerKind::Human {
        bail!("arena games are engine-only; pick minimax, mcts or random");
    }

    let mut tally = Tally::default();
    for i in 0..games {
        let seed = engine.seed.map(|s| s.wrapping_add(2 * i as u64));
        let mut game = Match::new(
            make_player(dark, engine, seed),
            make_player(light, engine, seed.map(|s| s.wrapping_add(1))),
            io::sink(),
        );
        let record = game.play()?;
        tally.record(record.outcome);
        eprintln!("game {}: {}", i + 1, record.outcome);
    }

    println!("{tally}");
    Ok(())
}
