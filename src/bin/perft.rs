use anyhow::{anyhow, bail, Result};
use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};

use arrocco::position::{divide, perft};
use arrocco::{Position, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the count against shakmaty
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);
    let position = Position::from_fen(&args.fen)?;

    let start = std::time::Instant::now();
    let nodes = if args.divide {
        let split = divide(&position, args.depth);
        for (mv, count) in &split {
            println!("{}: {}", mv, count);
        }
        split.iter().map(|(_, count)| count).sum()
    } else {
        perft(&position, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let fen: Fen = args.fen.parse().map_err(|e| anyhow!("shakmaty fen: {e}"))?;
        let reference: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| anyhow!("shakmaty position: {e}"))?;
        let expected = perft_shakmaty(&reference, args.depth);
        println!("Shakmaty perft({}) = {} nodes", args.depth, expected);
        if expected != nodes {
            bail!("perft mismatch: {} vs shakmaty {}", nodes, expected);
        }
    }
    Ok(())
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
