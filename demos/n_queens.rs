//! Counts (and optionally prints) the solutions of the N queens puzzle.
//!
//! Files and ranks are mandatory columns; diagonals are secondary columns,
//! since a diagonal may hold one queen or none. The single-square corner
//! diagonals are left out.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example n_queens -- --size 8
//! cargo run --example n_queens -- --size 6 --print
//! ```

use std::process;

use clap::Parser;
use xcover::{Error, Matrix};

/// The largest board this demo accepts; bigger boards take a long time.
const MAX_SIZE: usize = 13;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size.
    #[arg(short = 'n', long, value_name = "N", default_value_t = 8)]
    size: usize,

    /// Print every solution as a board.
    #[arg(long)]
    print: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Square {
    file: usize,
    rank: usize,
}

fn build(n: usize) -> Result<Matrix<Square>, Error> {
    // Columns: files 1..=n, ranks n+1..=2n, then the two diagonal
    // families. A board has 2n - 1 diagonals in each direction, numbered
    // 0..=corner; diagonals 0 and corner are single corner squares and can
    // never hold two queens, so they get no column.
    let corner = 2 * (n - 1);
    let diagonals = 2 * n - 1 - if n == 1 { 0 } else { 2 };
    let mut matrix = Matrix::with_mandatory(2 * n + 2 * diagonals, 2 * n)?;
    for file in 0..n {
        for rank in 0..n {
            let mut indices = vec![file + 1, rank + 1 + n];
            // Diagonals running down to the right keep file + rank fixed;
            // columns 2n+1..=2n+corner-1.
            let se = file + rank;
            if se != 0 && se != corner {
                indices.push(se + 2 * n);
            }
            // Diagonals running up to the right keep file - rank fixed,
            // shifted by n - 1; columns 2n+corner..=2n+2*corner-2.
            let ne = n - 1 + file - rank;
            if ne != 0 && ne != corner {
                indices.push(ne + 2 * n + corner - 1);
            }
            matrix.add_data(Square { file, rank }, indices)?;
        }
    }
    Ok(matrix)
}

fn print_board(n: usize, solution: &[Square]) {
    let mut board = vec![vec!['_'; n]; n];
    for square in solution {
        board[square.rank][square.file] = 'Q';
    }
    for (rank, line) in board.iter().enumerate().rev() {
        let line: String = line.iter().flat_map(|&c| [' ', c]).collect();
        println!("{:>3} |{line}", rank + 1);
    }
    let files: String = (0..n)
        .flat_map(|file| [' ', char::from(b'a' + file as u8)])
        .collect();
    println!("     {files}");
    println!();
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    if args.size < 1 || args.size > MAX_SIZE {
        eprintln!("board size must be between 1 and {MAX_SIZE}");
        process::exit(2);
    }

    let mut matrix = build(args.size)?;
    if args.print {
        for solution in matrix.solve() {
            print_board(args.size, &solution);
        }
    }
    println!("{} solutions", matrix.count_solutions());
    Ok(())
}
