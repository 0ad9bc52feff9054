use clap::Parser;
use tracing_subscriber::EnvFilter;

use minesweeper::{game_loop, new_game, HumanAgent, Outcome};

/// Play minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 9)]
    width: usize,

    /// Number of cells in each row
    #[arg(long, default_value_t = 9)]
    height: usize,

    /// Number of mines to place
    #[arg(long, default_value_t = 10)]
    mines: usize,

    /// Seed for a reproducible mine layout
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut game = new_game(args.width, args.height, args.mines, args.seed)?;
    let mut agent = HumanAgent::stdin();
    let outcome = game_loop(&mut game, &mut agent);

    println!("{}", game.board());
    match outcome {
        Outcome::Won => println!("you win!"),
        Outcome::Lost => println!("you lose"),
        Outcome::InProgress => println!("game abandoned"),
    }
    Ok(())
}
