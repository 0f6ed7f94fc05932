use anyhow::{Context, Result};
use clap::Parser;
use fenprobe::{Board, FenOptions, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to start from
    #[arg(short, long, default_value = START_FEN)]
    fen: String,

    /// Always write the en passant square, even when no pawn can capture onto it
    #[arg(long)]
    force_ep: bool,

    /// Print the board diagram before the resulting FEN
    #[arg(short, long)]
    board: bool,

    /// Moves in coordinate notation (e2e4, e7e8q), played in order
    #[arg(required = true)]
    moves: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let mut board = Board::from_fen(&args.fen)
        .with_context(|| format!("failed to parse FEN '{}'", args.fen))?;

    for text in &args.moves {
        let mv = board
            .apply_move(text)
            .with_context(|| format!("cannot play '{text}' in '{}'", board.fen()))?;
        log::info!("{mv} -> {}", board.fen());
    }

    let options = FenOptions {
        force_enpassant_square: args.force_ep,
    };

    if args.board {
        println!("{board}");
    }
    println!("{}", board.fen_with(options));

    Ok(())
}
