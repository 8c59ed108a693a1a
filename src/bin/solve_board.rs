use clap::Parser;
use sigmar_solver::engine::Board;
use sigmar_solver::solver::{solve_with_observer, SearchStats};
use sigmar_solver::utils::{board_from_str_array, validate_starting_board};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (11 rows of 11 tile characters)
    board_file: PathBuf,

    /// Accept boards that do not have the standard starting marble counts
    #[clap(short, long)]
    unchecked: bool,
}

fn read_board_file(path: &PathBuf, unchecked: bool) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let board = board_from_str_array(&lines).map_err(|e| format!("Invalid board: {}", e))?;
    if !unchecked {
        validate_starting_board(&board)
            .map_err(|e| format!("Not a valid starting board: {} (use --unchecked to solve anyway)", e))?;
    }
    Ok(board)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let board = match read_board_file(&args.board_file, args.unchecked) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}: {}", args.board_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("Board loaded from {}:\n{}\n", args.board_file.display(), board);
    println!("Searching for a solution...\n");

    let mut stats = SearchStats::default();
    match solve_with_observer(&board, &mut stats) {
        Some(solution) => {
            println!("Solution found ({} moves):", solution.len());
            for (i, mov) in solution.moves.iter().enumerate() {
                if mov.first == mov.second {
                    println!("  Move {}: ({}, {})", i + 1, mov.first.0, mov.first.1);
                } else {
                    println!(
                        "  Move {}: ({}, {}) + ({}, {})",
                        i + 1,
                        mov.first.0,
                        mov.first.1,
                        mov.second.0,
                        mov.second.1
                    );
                }
            }
            print_stats(&stats);
            ExitCode::SUCCESS
        }
        None => {
            println!("No solution exists for this board.");
            print_stats(&stats);
            ExitCode::FAILURE
        }
    }
}

fn print_stats(stats: &SearchStats) {
    println!(
        "\nSearch: {} moves tried, {} dead ends pruned, {} backtracks, max depth {}",
        stats.moves_tried, stats.dead_ends, stats.backtracks, stats.max_depth
    );
}
