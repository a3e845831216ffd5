//! Game driver: players, the turn loop, and board rendering.
//!
//! The driver owns the authoritative `GameState`. Each turn it either asks
//! the player on move for a move and applies it, or, when that side has no
//! legal moves but the game is not over, passes the turn on its behalf.
//!
//! ## Example
//!
//! ```
//! use othello_search::game::{Match, MinimaxPlayer, RandomPlayer};
//!
//! let mut game = Match::new(
//!     Box::new(MinimaxPlayer::new(2)),
//!     Box::new(RandomPlayer::with_seed(1)),
//!     std::io::sink(),
//! );
//! let record = game.play().unwrap();
//! assert!(record.final_state.is_terminal());
//! ```

use std::fmt;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use fastrand::Rng;

use crate::board::Color;
use crate::constants::{DARK_SYMBOL, LIGHT_SYMBOL, N};
use crate::mcts::{Mcts, dump_children};
use crate::minimax::{Minimax, best_move_with_score};
use crate::playout::choose_random_move;
use crate::position::{GameState, Move, Outcome};

/// Something that picks moves for one side.
///
/// `choose_move` is only called when the side to move has a legal move.
pub trait Player {
    fn name(&self) -> String;
    fn choose_move(&mut self, pos: &GameState) -> Result<Move>;
}

/// Reads `row,col` moves from a text stream, re-prompting until a legal
/// move is entered.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> String {
        "Human".to_string()
    }

    fn choose_move(&mut self, pos: &GameState) -> Result<Move> {
        let legal = pos.legal_moves();
        loop {
            write!(
                self.output,
                "Your move ({}), enter row,col (e.g. 2,3): ",
                pos.to_move().symbol()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).context("reading move")? == 0 {
                bail!("input closed before a move was entered");
            }

            match line.parse::<Move>() {
                Ok(mv) if legal.contains(&mv) => return Ok(mv),
                Ok(_) => writeln!(self.output, "Invalid move.")?,
                Err(e) => writeln!(self.output, "Invalid input: {e}")?,
            }
        }
    }
}

/// Fixed-depth minimax player.
pub struct MinimaxPlayer {
    engine: Minimax,
    verbose: bool,
}

impl MinimaxPlayer {
    pub fn new(depth: usize) -> Self {
        Self {
            engine: Minimax::new(depth),
            verbose: false,
        }
    }

    /// Report the chosen score on stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> String {
        format!("Minimax(depth={})", self.engine.depth)
    }

    fn choose_move(&mut self, pos: &GameState) -> Result<Move> {
        let (mv, score) =
            best_move_with_score(pos, self.engine.depth).context("minimax found no move")?;
        if self.verbose {
            eprintln!("minimax: {mv} score={score}");
        }
        Ok(mv)
    }
}

/// Fixed-budget MCTS player.
pub struct MctsPlayer {
    engine: Mcts,
    verbose: bool,
}

impl MctsPlayer {
    pub fn new(iterations: usize) -> Self {
        Self {
            engine: Mcts::new(iterations),
            verbose: false,
        }
    }

    pub fn with_seed(iterations: usize, seed: u64) -> Self {
        Self {
            engine: Mcts::with_seed(iterations, seed),
            verbose: false,
        }
    }

    /// Dump root statistics to stderr after each search.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Player for MctsPlayer {
    fn name(&self) -> String {
        format!("MCTS(iterations={})", self.engine.iterations)
    }

    fn choose_move(&mut self, pos: &GameState) -> Result<Move> {
        let tree = self.engine.search_tree(pos);
        if self.verbose {
            dump_children(&tree);
        }
        tree.best_move().context("MCTS found no move")
    }
}

/// Plays uniformly random legal moves.
pub struct RandomPlayer {
    rng: Rng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self { rng: Rng::new() }
    }
}

impl RandomPlayer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        "Random".to_string()
    }

    fn choose_move(&mut self, pos: &GameState) -> Result<Move> {
        choose_random_move(pos, &mut self.rng).context("no legal move to choose from")
    }
}

/// One entry in a game record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Move(Color, Move),
    Pass(Color),
}

/// Result of a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub turns: Vec<Turn>,
    pub final_state: GameState,
}

impl GameRecord {
    /// Number of pieces placed (passes excluded).
    pub fn placements(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::Move(..)))
            .count()
    }
}

/// A single game between two players, Dark moving first.
pub struct Match<'a, W> {
    dark: Box<dyn Player + 'a>,
    light: Box<dyn Player + 'a>,
    out: W,
    render: bool,
    color: bool,
    delay: Duration,
}

impl<'a, W: Write> Match<'a, W> {
    /// A quiet game: nothing is written to `out` unless rendering is on.
    pub fn new(dark: Box<dyn Player + 'a>, light: Box<dyn Player + 'a>, out: W) -> Self {
        Self {
            dark,
            light,
            out,
            render: false,
            color: false,
            delay: Duration::ZERO,
        }
    }

    /// Print the board and each move to `out`.
    pub fn render(mut self, render: bool, color: bool) -> Self {
        self.render = render;
        self.color = color;
        self
    }

    /// Pause between turns.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Play from the start position until neither side can move.
    pub fn play(&mut self) -> Result<GameRecord> {
        self.play_from(GameState::new())
    }

    pub fn play_from(&mut self, mut pos: GameState) -> Result<GameRecord> {
        let mut turns = Vec::new();

        while !pos.is_terminal() {
            let side = pos.to_move();
            if self.render {
                writeln!(self.out, "{}", render_board(&pos, self.color))?;
                writeln!(self.out, "{side} to move")?;
            }

            if pos.legal_moves().is_empty() {
                if self.render {
                    writeln!(self.out, "{side} has no legal moves. Passing.")?;
                }
                pos.pass_turn();
                turns.push(Turn::Pass(side));
            } else {
                let player = match side {
                    Color::Dark => self.dark.as_mut(),
                    Color::Light => self.light.as_mut(),
                };
                let name = player.name();
                let mv = player
                    .choose_move(&pos)
                    .with_context(|| format!("{name} failed to choose a move"))?;
                pos.apply_move(mv)
                    .with_context(|| format!("{name} chose {mv}"))?;
                if self.render {
                    writeln!(self.out, "{name} ({}) plays {mv}", side.symbol())?;
                }
                turns.push(Turn::Move(side, mv));
            }

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        let outcome = pos.outcome();
        if self.render {
            writeln!(self.out, "{}", render_board(&pos, self.color))?;
            writeln!(self.out, "Final result: {outcome}")?;
        }

        Ok(GameRecord {
            outcome,
            turns,
            final_state: pos,
        })
    }
}

/// Win/draw counts over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub dark: usize,
    pub light: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DarkWins => self.dark += 1,
            Outcome::LightWins => self.light += 1,
            Outcome::Draw | Outcome::Undetermined => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.dark + self.light + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games={} dark={} light={} draws={}",
            self.games(),
            self.dark,
            self.light,
            self.draws
        )
    }
}

/// Board with a piece-count header and numbered rows and columns.
pub fn render_board(pos: &GameState, color: bool) -> String {
    let paint = |c: Color| -> String {
        let s = c.symbol().to_string();
        match (color, c) {
            (false, _) => s,
            (true, Color::Dark) => s.red().to_string(),
            (true, Color::Light) => s.yellow().to_string(),
        }
    };

    let dark = format!("{DARK_SYMBOL}: {}", pos.count(Color::Dark));
    let light = format!("{LIGHT_SYMBOL}: {}", pos.count(Color::Light));
    let (dark, light) = if color {
        (dark.red().to_string(), light.yellow().to_string())
    } else {
        (dark, light)
    };
    let mut s = format!("\n{dark}  {light}\n\n");

    for row in 0..N {
        let cells: Vec<String> = (0..N)
            .map(|col| pos.board().get(row, col).map_or(" ".to_string(), &paint))
            .collect();
        s.push_str(&format!("{row} |{}|\n", cells.join("|")));
    }
    let cols: Vec<String> = (0..N).map(|c| c.to_string()).collect();
    s.push_str(&format!("   {}", cols.join(" ")));
    s
}
