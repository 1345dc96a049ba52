#![doc = include_str!("../README.md")]
//!
//!
//! To solve an exact cover problem with this implementation, create a
//! [`Matrix`] with [`Matrix::new()`] (or [`Matrix::with_mandatory()`] when
//! some columns are secondary), add one tagged row per candidate with
//! [`Matrix::add_data()`], and call [`Matrix::solve()`].
//!
//! An example, based on Wikipedia's [Algorithm
//! X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) article:
//!
//! ```
//! let mut matrix = xcover::Matrix::new(7)?;
//!
//! matrix.add_data("A", [1, 4, 7])?;
//! matrix.add_data("B", [1, 4])?;
//! matrix.add_data("C", [4, 5, 7])?;
//! matrix.add_data("D", [3, 5, 6])?;
//! matrix.add_data("E", [2, 3, 6, 7])?;
//! matrix.add_data("F", [2, 7])?;
//!
//! let mut solutions = matrix.solve();
//! assert_eq!(1, solutions.len());
//! solutions[0].sort();
//! assert_eq!(vec!["B", "D", "F"], solutions[0]);
//! # Ok::<(), xcover::Error>(())
//! ```
//!
//! Secondary columns are covered at most once. In the N queens puzzle,
//! every file and rank needs exactly one queen, while a diagonal may
//! hold one queen or none; the diagonals are therefore placed after the
//! files and ranks and left out of the mandatory count:
//!
//! ```
//! // 2x2 files and ranks, plus the one diagonal and one anti-diagonal
//! // that contain more than a single square.
//! let mut matrix = xcover::Matrix::with_mandatory(6, 4)?;
//! matrix.add_data("a1", [1, 3, 6])?;
//! matrix.add_data("a2", [1, 4, 5])?;
//! matrix.add_data("b1", [2, 3, 5])?;
//! matrix.add_data("b2", [2, 4, 6])?;
//! assert!(matrix.solve().is_empty());
//! # Ok::<(), xcover::Error>(())
//! ```
//!
//! The search can be stopped early through [`Matrix::solve_with()`], whose
//! visitor returns [`std::ops::ControlFlow`]; the matrix is restored
//! either way.

mod error;
mod matrix;
mod search;

pub use error::{ConfigError, Error, RowError};
pub use matrix::{MAX_COLUMNS, Matrix};
