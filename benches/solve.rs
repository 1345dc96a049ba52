//! Benchmarks for the exact cover search.
//!
//! # Benchmarks
//!
//! - **`wikipedia`**: the seven-column example from Wikipedia's Algorithm X
//!   article; mostly measures per-call overhead.
//! - **`n_queens`**: all solutions of the N queens puzzle for several board
//!   sizes, exercising secondary columns.
//! - **`sudoku`**: the first solution of a hard Sudoku.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solve
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use xcover::Matrix;

fn wikipedia() -> Matrix<&'static str> {
    let mut matrix = Matrix::new(7).unwrap();
    matrix.add_data("A", [1, 4, 7]).unwrap();
    matrix.add_data("B", [1, 4]).unwrap();
    matrix.add_data("C", [4, 5, 7]).unwrap();
    matrix.add_data("D", [3, 5, 6]).unwrap();
    matrix.add_data("E", [2, 3, 6, 7]).unwrap();
    matrix.add_data("F", [2, 7]).unwrap();
    matrix
}

fn n_queens(n: usize) -> Matrix<(usize, usize)> {
    // Columns: files 1..=n, ranks n+1..=2n, then the two diagonal
    // families. A board has 2n - 1 diagonals in each direction, numbered
    // 0..=corner; diagonals 0 and corner are single corner squares and can
    // never hold two queens, so they get no column.
    let corner = 2 * (n - 1);
    let diagonals = 2 * n - 1 - if n == 1 { 0 } else { 2 };
    let mut matrix = Matrix::with_mandatory(2 * n + 2 * diagonals, 2 * n).unwrap();
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
            matrix.add_data((file, rank), indices).unwrap();
        }
    }
    matrix
}

fn sudoku(puzzle: &str) -> Matrix<(usize, usize)> {
    let mut matrix = Matrix::new(81 * 4).unwrap();
    for (pos, ch) in puzzle.chars().enumerate() {
        let (row, col) = (pos / 9, pos % 9);
        let boxed = row / 3 * 3 + col / 3;
        let given = ch.to_digit(10).unwrap() as usize;
        let digits = if given == 0 { 1..=9 } else { given..=given };
        for digit in digits {
            matrix
                .add_data(
                    (pos, digit),
                    [
                        pos + 1,
                        81 + row * 9 + digit,
                        81 * 2 + col * 9 + digit,
                        81 * 3 + boxed * 9 + digit,
                    ],
                )
                .unwrap();
        }
    }
    matrix
}

fn bench_wikipedia(c: &mut Criterion) {
    let mut matrix = wikipedia();
    c.bench_function("wikipedia", |b| b.iter(|| hint::black_box(matrix.solve())));
}

fn bench_n_queens(c: &mut Criterion) {
    for n in [6, 8, 10] {
        let mut matrix = n_queens(n);
        c.bench_with_input(BenchmarkId::new("n_queens", n), &n, |b, _| {
            b.iter(|| hint::black_box(matrix.count_solutions()));
        });
    }
}

fn bench_sudoku(c: &mut Criterion) {
    let mut matrix = sudoku(
        "800000000003600000070090200050007000000045700000100030001000068008500010090000400",
    );
    c.bench_function("sudoku", |b| b.iter(|| hint::black_box(matrix.first_solution())));
}

criterion_group!(benches, bench_wikipedia, bench_n_queens, bench_sudoku);
criterion_main!(benches);
