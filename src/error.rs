//! Error types reported while building a [`Matrix`](crate::Matrix).
//!
//! Every error is a precondition violation detected before the matrix is
//! touched, so a failed call leaves the matrix exactly as it was.

/// Errors reported when constructing a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The matrix must have at least one column.
    #[display("the number of columns must be at least 1")]
    NoColumns,
    /// The requested column count exceeds [`MAX_COLUMNS`](crate::MAX_COLUMNS).
    #[display("the number of columns must be at most {max}, but got {columns}")]
    TooManyColumns {
        /// The requested column count.
        columns: usize,
        /// The largest supported column count.
        max: usize,
    },
}

/// Errors reported when adding a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RowError {
    /// A row with the same tag is already registered.
    #[display("the specified tag already exists")]
    DuplicateTag,
    /// The row does not touch any column.
    #[display("the row data must contain at least one element")]
    EmptyRow,
    /// A column index falls outside `min..=max`.
    #[display("the index must be between {min} and {max}, but got {index}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The smallest valid index (always 1).
        min: usize,
        /// The largest valid index (the column count).
        max: usize,
    },
    /// A dense row does not have one entry per column.
    #[display("the size of row data is mismatch: expected {expected}, but got {actual}")]
    LengthMismatch {
        /// The column count.
        expected: usize,
        /// The length of the supplied row.
        actual: usize,
    },
}

/// Any error reported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Error {
    /// A construction error.
    #[display("invalid matrix configuration: {_0}")]
    Config(ConfigError),
    /// A row insertion error.
    #[display("invalid row: {_0}")]
    Row(RowError),
}
