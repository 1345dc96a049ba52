//! Solves the exact cover example from
//! <https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X#Example> and prints
//! the matrix it was built from.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example wikipedia
//! ```

use xcover::{Error, Matrix};

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut matrix = Matrix::new(7)?;
    matrix.add_data("A", [1, 4, 7])?;
    matrix.add_data("B", [1, 4])?;
    matrix.add_data("C", [4, 5, 7])?;
    matrix.add_data("D", [3, 5, 6])?;
    matrix.add_data("E", [2, 3, 6, 7])?;
    matrix.add_data("F", [2, 7])?;

    println!("tag | 1 2 3 4 5 6 7");
    println!("----+--------------");
    for (tag, row) in matrix.constraints_matrix() {
        let cells: Vec<String> = row.iter().map(u8::to_string).collect();
        println!("{tag:>3} | {}", cells.join(" "));
    }
    println!();

    for mut solution in matrix.solve() {
        solution.sort_unstable();
        println!("solution: {}", solution.join(", "));
    }
    Ok(())
}
