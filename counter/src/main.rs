//! Count symmetric crossword grids from the command line.
//!
//! ```bash
//! # the 15x15 count, on every core
//! cargo run --release -p counter
//!
//! # check the counter against exhaustive search on a small board
//! cargo run --release -p counter -- --size 7 --mode both -v
//! ```

use std::num::NonZero;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};

use crossgrid::{CensusBuilder, Symmetry, Verbosity};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// Row-by-row counting
    Dp,
    /// Exhaustive search, only practical up to size 9 or so
    Verify,
    /// Both, failing if they disagree
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "counter")]
#[command(about = "Count connected, half-turn symmetric crossword grids")]
struct Args {
    /// Side length of the board (odd, 3 to 15)
    #[arg(long, default_value_t = NonZero::new(15).unwrap())]
    size: NonZero<usize>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Which rows may appear: "rotational" or "full" (also left-right symmetric)
    #[arg(long, default_value_t = Symmetry::Rotational)]
    symmetry: Symmetry,

    #[arg(long, value_enum, default_value_t = Mode::Dp)]
    mode: Mode,

    /// Also count grids whose outer columns are entirely black
    #[arg(long)]
    allow_edgeless: bool,

    /// Carry each board through the counter and print the counted ones with -vv
    #[arg(long)]
    trace_boards: bool,

    /// Progress on stderr; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let verbosity = match args.verbose {
        0 => Verbosity::Quiet,
        1 => Verbosity::Rounds,
        _ => Verbosity::Boards,
    };

    let mut builder = CensusBuilder::with_size(args.size);
    builder
        .symmetry(args.symmetry)
        .require_edge(!args.allow_edgeless)
        .verbosity(verbosity)
        .trace_boards(args.trace_boards);
    if let Some(threads) = args.threads {
        builder.threads(threads);
    }

    let census = match builder.build() {
        Ok(census) => census,
        Err(reasons) => {
            for reason in reasons {
                eprintln!("error: {}", reason);
            }
            return ExitCode::FAILURE;
        }
    };

    let total = if args.mode != Mode::Verify {
        match census.count() {
            Ok(total) => {
                println!("total {}", total);
                Some(total)
            }
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    if args.mode == Mode::Dp {
        return ExitCode::SUCCESS;
    }

    let tally = match census.verify() {
        Ok(tally) => tally,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    println!("connected {}", tally.connected);
    println!("total {}", tally.accepted);

    match total {
        Some(total) if !tally.agrees_with(&total) => {
            eprintln!("error: counted {} but search found {}", total, tally.accepted);
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}
