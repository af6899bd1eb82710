use std::io::Read as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossword_core::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// One mask per word, shared by all of its letters
    PerWord,
    /// Fresh masks for every cell
    PerCell,
}

impl From<Strategy> for MaskStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::PerWord => MaskStrategy::PerWord,
            Strategy::PerCell => MaskStrategy::PerCell,
        }
    }
}

/// Annotate a crossword with scattered letter hints.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Puzzle JSON file, `-` reads stdin, the built-in puzzle is used when omitted
    puzzle: Option<PathBuf>,

    /// Input is a free-text generator reply wrapping the puzzle JSON
    #[arg(long)]
    reply: bool,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How hint masks are shared between the letters of a word
    #[arg(long, value_enum, default_value_t = Strategy::PerWord)]
    strategy: Strategy,

    /// Words shorter than this get no hints
    #[arg(long, default_value_t = HintConfig::MIN_WORD_LEN)]
    min_word_len: u8,

    /// Also print the full solution
    #[arg(short, long)]
    answers: bool,

    /// Print the annotated puzzle as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct AnnotatedPuzzle<'a> {
    seed: u64,
    grid: Vec<Vec<HintedCell>>,
    across: &'a [Clue],
    down: &'a [Clue],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let puzzle = load_puzzle(&args)?.with_measured_lengths();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {seed}");

    let config = HintConfig::new(args.min_word_len, args.strategy.into());
    let annotated = annotate_puzzle(&puzzle, &config, RngSource(SmallRng::seed_from_u64(seed)));
    log::info!(
        "{} of {} letters given as hints",
        annotated.hint_count(),
        puzzle.grid.playable_count()
    );

    if args.json {
        let out = AnnotatedPuzzle {
            seed,
            grid: annotated.to_rows(),
            across: &puzzle.across,
            down: &puzzle.down,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render(&puzzle, &annotated, args.answers));
    }
    Ok(())
}

fn load_puzzle(args: &Args) -> anyhow::Result<Puzzle> {
    let Some(path) = &args.puzzle else {
        log::debug!("using built-in puzzle");
        return Ok(Puzzle::default_puzzle());
    };

    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading puzzle from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading puzzle from {}", path.display()))?
    };

    let puzzle = if args.reply {
        Puzzle::from_generated_text(&text)
    } else {
        Puzzle::from_json(&text)
    };
    puzzle.with_context(|| format!("parsing puzzle from {}", path.display()))
}

fn render(puzzle: &Puzzle, annotated: &AnnotatedGrid, answers: bool) -> String {
    let mut out = String::new();
    let (rows, cols) = annotated.size();

    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            let ch = match puzzle.grid.letter_at(coords) {
                None => '#',
                Some(letter) if annotated.is_partial_hint(coords) => letter,
                Some(_) => '.',
            };
            out.push(ch);
        }
        if answers {
            out.push_str("   ");
            for col in 0..cols {
                out.push(puzzle.grid.letter_at((row, col)).unwrap_or('#'));
            }
        }
        out.push('\n');
    }

    for direction in Direction::ALL {
        out.push_str(&format!("\n{}\n", title(direction)));
        for clue in puzzle.clues(direction) {
            out.push_str(&format!(
                "{:>3}. {} ({})\n",
                clue.number, clue.text, clue.length
            ));
        }
    }
    out
}

fn title(direction: Direction) -> &'static str {
    match direction {
        Direction::Across => "Across",
        Direction::Down => "Down",
    }
}
