//! arrocco: pick a move for one position and print it.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use arrocco::{GameClock, Position, Search, SearchParams, TimeManager, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Deepest iteration to start
    #[arg(short, long, default_value_t = 64)]
    depth: u8,

    /// Fixed budget for this move in milliseconds (0 = no deadline)
    #[arg(short, long)]
    movetime: Option<u64>,

    /// Remaining game time in milliseconds; the budget is derived from it
    #[arg(short, long)]
    remaining: Option<u64>,

    /// Increment per move in milliseconds
    #[arg(short, long, default_value_t = 0)]
    increment: u64,

    /// Moves left until the next time control
    #[arg(long)]
    moves_to_go: Option<u32>,

    /// Log each completed depth
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let position = Position::from_fen(&args.fen)
        .with_context(|| format!("invalid position '{}'", args.fen))?;
    println!("{}", position.board());
    println!("{:?} to move, fen {}", position.side_to_move(), position.to_fen());

    if let Some(outcome) = position.outcome() {
        println!("position is terminal: {:?}", outcome);
    }

    let mut params = SearchParams::new().max_depth(args.depth);
    if let Some(ms) = args.movetime {
        params = params.time_limit(ms);
    }
    let mut search = Search::new(params);

    let result = match (args.movetime, args.remaining) {
        (None, Some(remaining)) => {
            let mut clock = GameClock::new(Duration::from_millis(remaining))
                .with_increment(Duration::from_millis(args.increment));
            if let Some(moves) = args.moves_to_go {
                clock = clock.with_moves_to_go(moves);
            }
            search.search_with_clock(&position, &clock, &TimeManager::new())
        }
        _ => search.search(&position),
    };

    let Some(result) = result else {
        bail!("no legal moves for {:?}", position.side_to_move());
    };

    let stats = search.stats();
    println!(
        "bestmove {} score {} depth {} nodes {} time {} ms",
        result.best_move,
        result.score,
        result.depth,
        stats.nodes,
        stats.search_time.as_millis()
    );
    Ok(())
}
