use clap::Parser;
use sigmar_solver::engine::Board;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for the board generator; the same seed always yields the same board
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    let board = Board::new_random_with_seed(args.seed);
    // Plain 11x11 rows, directly consumable by solve_board. Randomly placed
    // marbles are not guaranteed to form a solvable board.
    println!("{}", board);
}
