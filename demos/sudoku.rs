//! Solves a Sudoku given as an 81-character string, row by row, with `0`
//! or `.` for blank cells.
//!
//! Every candidate (cell, digit) is a row covering four mandatory columns:
//! the cell itself, the digit in its row, the digit in its column, and the
//! digit in its box.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example sudoku -- 800000000003600000070090200050007000000045700000100030001000068008500010090000400
//! ```

use std::process;

use clap::Parser;
use xcover::{Error, Matrix};

const DEFAULT_PUZZLE: &str =
    "800000000003600000070090200050007000000045700000100030001000068008500010090000400";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The puzzle, 81 digits read row by row (0 or '.' for blanks).
    #[arg(value_name = "PUZZLE", default_value = DEFAULT_PUZZLE)]
    puzzle: String,

    /// Report every solution instead of only the first.
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Candidate {
    pos: usize,
    digit: usize,
}

fn parse(puzzle: &str) -> Option<Vec<usize>> {
    let givens: Vec<usize> = puzzle
        .chars()
        .map(|c| match c {
            '.' => Some(0),
            c => c.to_digit(10).map(|d| d as usize),
        })
        .collect::<Option<_>>()?;
    (givens.len() == 81).then_some(givens)
}

fn build(givens: &[usize]) -> Result<Matrix<Candidate>, Error> {
    let mut matrix = Matrix::new(81 * 4)?;
    for (pos, &given) in givens.iter().enumerate() {
        let (row, col) = (pos / 9, pos % 9);
        let boxed = row / 3 * 3 + col / 3;
        let digits = if given == 0 { 1..=9 } else { given..=given };
        for digit in digits {
            matrix.add_data(
                Candidate { pos, digit },
                [
                    pos + 1,
                    81 + row * 9 + digit,
                    81 * 2 + col * 9 + digit,
                    81 * 3 + boxed * 9 + digit,
                ],
            )?;
        }
    }
    Ok(matrix)
}

fn print_grid(solution: &[Candidate]) {
    let mut grid = [0; 81];
    for candidate in solution {
        grid[candidate.pos] = candidate.digit;
    }
    for (row, line) in grid.chunks(9).enumerate() {
        if row > 0 && row % 3 == 0 {
            println!("------+-------+------");
        }
        let cells: Vec<String> = line
            .chunks(3)
            .map(|group| {
                group
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        println!("{}", cells.join(" | "));
    }
    println!();
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    let Some(givens) = parse(&args.puzzle) else {
        eprintln!("the puzzle must be 81 characters of digits or '.'");
        process::exit(2);
    };

    let mut matrix = build(&givens)?;
    if args.all {
        let solutions = matrix.solve();
        for solution in &solutions {
            print_grid(solution);
        }
        println!("{} solutions", solutions.len());
    } else {
        match matrix.first_solution() {
            Some(solution) => print_grid(&solution),
            None => println!("no solution"),
        }
    }
    Ok(())
}
