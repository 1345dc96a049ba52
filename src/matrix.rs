//! The sparse constraint matrix: a toroidal network of circularly
//! doubly-linked nodes, plus the registry mapping row tags to rows.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::error::{ConfigError, RowError};

/// The largest number of columns a [`Matrix`] can be built with.
///
/// Every column costs a header node up front, so the bound keeps a
/// freshly built matrix within a few hundred megabytes.
pub const MAX_COLUMNS: usize = 1 << 22;

/// Arena index of the root node, which heads the list of live columns.
pub(crate) const ROOT: usize = 0;

/// A node in the network. The root node lives at index zero, the
/// column header for column `c` at index `c`, and cells after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    /// The column header this node belongs to (itself for headers).
    column: usize,
    /// The dense id of the row owning a cell (unused for headers).
    row: usize,
    up: usize,
    down: usize,
    left: usize,
    right: usize,
}

impl Node {
    /// A node linked to itself in every direction.
    fn isolated(index: usize, column: usize, row: usize) -> Node {
        Node {
            column,
            row,
            up: index,
            down: index,
            left: index,
            right: index,
        }
    }
}

/// Per-column bookkeeping, indexed like the header nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Column {
    /// Number of cells currently linked into the column.
    count: usize,
    /// Whether the column must be covered exactly once.
    mandatory: bool,
}

/// The node arena and column headers.
///
/// Links are indices into `nodes` rather than references, so that a node
/// can be rewired from any direction without fighting the borrow checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Links {
    nodes: Vec<Node>,
    columns: Vec<Column>,
    /// Cell slots released by row deletion, reused by later insertions.
    free: Vec<usize>,
}

impl Links {
    fn new(column_count: usize, mandatory_count: usize) -> Links {
        let mut nodes = Vec::with_capacity(column_count + 1);
        let mut columns = Vec::with_capacity(column_count + 1);

        // The root never carries a cell; its count makes it lose every
        // minimum comparison, and it is never mandatory.
        nodes.push(Node::isolated(ROOT, ROOT, 0));
        columns.push(Column {
            count: usize::MAX,
            mandatory: false,
        });

        let mut links = Links {
            nodes,
            columns,
            free: Vec::new(),
        };
        for column in 1..=column_count {
            links.nodes.push(Node::isolated(column, column, 0));
            links.columns.push(Column {
                count: 0,
                mandatory: column <= mandatory_count,
            });
            let left = links.left(ROOT);
            links.set_left(column, left);
            links.set_right(column, ROOT);
            links.relink_into_row(column);
        }
        links
    }

    pub(crate) fn column_count(&self) -> usize {
        self.columns.len() - 1
    }

    // Accessors.

    pub(crate) fn column(&self, node: usize) -> usize {
        self.nodes[node].column
    }

    pub(crate) fn row(&self, node: usize) -> usize {
        self.nodes[node].row
    }

    pub(crate) fn count(&self, column: usize) -> usize {
        self.columns[column].count
    }

    pub(crate) fn is_mandatory(&self, column: usize) -> bool {
        self.columns[column].mandatory
    }

    pub(crate) fn up(&self, node: usize) -> usize {
        self.nodes[node].up
    }

    fn set_up(&mut self, node: usize, val: usize) {
        self.nodes[node].up = val;
    }

    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    fn set_down(&mut self, node: usize, val: usize) {
        self.nodes[node].down = val;
    }

    pub(crate) fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    fn set_left(&mut self, node: usize, val: usize) {
        self.nodes[node].left = val;
    }

    pub(crate) fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    fn set_right(&mut self, node: usize, val: usize) {
        self.nodes[node].right = val;
    }

    // Link/unlink primitives. Unlinking leaves the node's own links
    // intact, which is what lets the matching relink put it back.

    fn unlink_from_row(&mut self, node: usize) {
        let left = self.left(node);
        let right = self.right(node);
        self.set_right(left, right);
        self.set_left(right, left);
    }

    fn relink_into_row(&mut self, node: usize) {
        let left = self.left(node);
        let right = self.right(node);
        self.set_left(right, node);
        self.set_right(left, node);
    }

    fn unlink_from_column(&mut self, node: usize) {
        let up = self.up(node);
        let down = self.down(node);
        self.set_down(up, down);
        self.set_up(down, up);
        let column = self.column(node);
        self.columns[column].count -= 1;
    }

    fn relink_into_column(&mut self, node: usize) {
        let up = self.up(node);
        let down = self.down(node);
        self.set_up(down, node);
        self.set_down(up, node);
        let column = self.column(node);
        self.columns[column].count += 1;
    }

    /// Allocates a cell for `row` and appends it to the bottom of `column`.
    fn insert_cell(&mut self, column: usize, row: usize) -> usize {
        let cell = match self.free.pop() {
            Some(cell) => cell,
            None => {
                self.nodes.push(Node::isolated(self.nodes.len(), column, row));
                self.nodes.len() - 1
            }
        };
        self.nodes[cell] = Node {
            up: self.up(column),
            down: column,
            ..Node::isolated(cell, column, row)
        };
        self.relink_into_column(cell);
        cell
    }

    /// Links `cell` into the row circle of `head`, just left of `head`
    /// (i.e. at the end of the row).
    fn append_to_row(&mut self, head: usize, cell: usize) {
        let left = self.left(head);
        self.set_left(cell, left);
        self.set_right(cell, head);
        self.relink_into_row(cell);
    }

    /// Stamps `row` on every cell in the row circle containing `cell`.
    fn renumber_row(&mut self, cell: usize, row: usize) {
        let mut node = cell;
        loop {
            self.nodes[node].row = row;
            node = self.right(node);
            if node == cell {
                break;
            }
        }
    }

    /// Permanently detaches a cell from its column and recycles its slot.
    fn release_cell(&mut self, cell: usize) {
        self.unlink_from_column(cell);
        self.nodes[cell] = Node::isolated(cell, cell, 0);
        self.free.push(cell);
    }

    /// Hides `column` from the column list, and removes every row that
    /// touches it from all of the other columns that row touches.
    ///
    /// The rows stay linked into `column` itself, which is how
    /// [`Links::uncover`] finds them again.
    pub(crate) fn cover(&mut self, column: usize) {
        self.unlink_from_row(column);
        let mut covered = self.down(column);
        while covered != column {
            let mut conflicting = self.right(covered);
            while conflicting != covered {
                self.unlink_from_column(conflicting);
                conflicting = self.right(conflicting);
            }
            covered = self.down(covered);
        }
    }

    /// Undoes [`Links::cover`].
    pub(crate) fn uncover(&mut self, column: usize) {
        // Exact reverse of cover: every relink relies on the links of the
        // nodes restored before it.
        let mut covered = self.up(column);
        while covered != column {
            let mut conflicting = self.left(covered);
            while conflicting != covered {
                self.relink_into_column(conflicting);
                conflicting = self.left(conflicting);
            }
            covered = self.up(covered);
        }
        self.relink_into_row(column);
    }

    /// Expands the row circle containing `cell` into a 0/1 vector.
    fn dense_row(&self, cell: usize) -> Vec<u8> {
        let mut dense = vec![0; self.column_count()];
        let mut node = cell;
        loop {
            dense[self.column(node) - 1] = 1;
            node = self.right(node);
            if node == cell {
                break;
            }
        }
        dense
    }

    /// Asserts every structural invariant of a matrix at rest.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (index, node) in self.nodes.iter().enumerate() {
            assert_eq!(index, self.nodes[node.left].right, "left.right of {index}");
            assert_eq!(index, self.nodes[node.right].left, "right.left of {index}");
            assert_eq!(index, self.nodes[node.up].down, "up.down of {index}");
            assert_eq!(index, self.nodes[node.down].up, "down.up of {index}");
        }

        let mut previous = ROOT;
        let mut seen_secondary = false;
        let mut column = self.right(ROOT);
        while column != ROOT {
            assert!(column > previous, "column {column} out of creation order");
            if self.is_mandatory(column) {
                assert!(!seen_secondary, "mandatory column {column} after a secondary one");
            } else {
                seen_secondary = true;
            }

            let mut count = 0;
            let mut cell = self.down(column);
            while cell != column {
                assert_eq!(column, self.column(cell), "cell {cell} in foreign column");
                count += 1;
                cell = self.down(cell);
            }
            assert_eq!(count, self.count(column), "count of column {column}");

            previous = column;
            column = self.right(column);
        }
    }
}

/// A live row: its tag and one of its cells. The row table is kept
/// dense, so a row's id is its position in the table.
#[derive(Debug, Clone)]
pub(crate) struct RowSlot<T> {
    pub(crate) tag: T,
    head: usize,
}

/// A generalized exact cover problem: a fixed set of columns
/// (constraints) and a mutable collection of tagged rows.
///
/// Columns are numbered from 1. The first `mandatory_count` columns are
/// *mandatory*: a solution covers each of them exactly once. The
/// remaining columns are *secondary*: a solution covers each of them at
/// most once.
///
/// `T` is the row tag type; any cloneable, hashable value will do.
#[derive(Debug, Clone)]
pub struct Matrix<T = String> {
    pub(crate) links: Links,
    pub(crate) rows: Vec<RowSlot<T>>,
    registry: HashMap<T, usize>,
    mandatory_count: usize,
}

impl<T> Matrix<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates a matrix with `column_count` columns, all of them mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoColumns`] if `column_count` is zero, and
    /// [`ConfigError::TooManyColumns`] if it exceeds [`MAX_COLUMNS`].
    pub fn new(column_count: usize) -> Result<Matrix<T>, ConfigError> {
        Matrix::with_mandatory(column_count, column_count)
    }

    /// Creates a matrix with `column_count` columns, of which the first
    /// `mandatory_count` are mandatory and the rest are secondary.
    ///
    /// `mandatory_count` is clamped to `column_count`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoColumns`] if `column_count` is zero, and
    /// [`ConfigError::TooManyColumns`] if it exceeds [`MAX_COLUMNS`].
    pub fn with_mandatory(
        column_count: usize,
        mandatory_count: usize,
    ) -> Result<Matrix<T>, ConfigError> {
        if column_count < 1 {
            return Err(ConfigError::NoColumns);
        }
        if column_count > MAX_COLUMNS {
            return Err(ConfigError::TooManyColumns {
                columns: column_count,
                max: MAX_COLUMNS,
            });
        }
        let mandatory_count = mandatory_count.min(column_count);
        log::debug!(
            "new matrix: {column_count} columns ({mandatory_count} mandatory)"
        );
        Ok(Matrix {
            links: Links::new(column_count, mandatory_count),
            rows: Vec::new(),
            registry: HashMap::new(),
            mandatory_count,
        })
    }

    /// The number of columns.
    pub fn column_count(&self) -> usize {
        self.links.column_count()
    }

    /// The number of mandatory columns.
    pub fn mandatory_count(&self) -> usize {
        self.mandatory_count
    }

    /// The number of registered rows.
    pub fn row_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if a row with this tag is registered.
    pub fn contains_tag<Q>(&self, tag: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry.contains_key(tag)
    }

    /// Adds a row covering the given 1-based column indices.
    ///
    /// Duplicate indices are ignored; order does not matter.
    ///
    /// # Errors
    ///
    /// * [`RowError::DuplicateTag`] if `tag` is already registered.
    /// * [`RowError::EmptyRow`] if `indices` is empty.
    /// * [`RowError::IndexOutOfRange`] if an index is 0 or greater than
    ///   the column count.
    ///
    /// The matrix is unchanged when an error is returned.
    pub fn add_data<I>(&mut self, tag: T, indices: I) -> Result<(), RowError>
    where
        I: IntoIterator<Item = usize>,
    {
        if self.registry.contains_key(&tag) {
            return Err(RowError::DuplicateTag);
        }
        let mut columns: Vec<usize> = indices.into_iter().collect();
        columns.sort_unstable();
        columns.dedup();
        let (Some(&first), Some(&last)) = (columns.first(), columns.last()) else {
            return Err(RowError::EmptyRow);
        };
        let max = self.column_count();
        if first < 1 {
            return Err(RowError::IndexOutOfRange { index: first, min: 1, max });
        }
        if last > max {
            return Err(RowError::IndexOutOfRange { index: last, min: 1, max });
        }

        let row = self.rows.len();
        let head = self.links.insert_cell(first, row);
        for &column in &columns[1..] {
            let cell = self.links.insert_cell(column, row);
            self.links.append_to_row(head, cell);
        }
        log::trace!("row {row}: linked into {} columns", columns.len());

        self.rows.push(RowSlot {
            tag: tag.clone(),
            head,
        });
        self.registry.insert(tag, row);
        Ok(())
    }

    /// Adds a row given as one value per column; every entry that is not
    /// zero (the type's default value) marks a covered column.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::LengthMismatch`] if `row` does not have exactly
    /// one entry per column, and otherwise fails like
    /// [`Matrix::add_data`].
    pub fn add_row_data<V>(&mut self, tag: T, row: &[V]) -> Result<(), RowError>
    where
        V: Default + PartialEq,
    {
        let expected = self.column_count();
        if row.len() != expected {
            return Err(RowError::LengthMismatch {
                expected,
                actual: row.len(),
            });
        }
        let zero = V::default();
        let indices = row
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != zero)
            .map(|(index, _)| index + 1);
        self.add_data(tag, indices)
    }

    /// Permanently removes the row registered under `tag`, if any.
    ///
    /// The last row in the table moves into the freed position, so
    /// [`Matrix::constraints_matrix`] order changes after a deletion.
    pub fn del_data<Q>(&mut self, tag: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(row) = self.registry.remove(tag) else {
            return;
        };
        let head = self.rows.swap_remove(row).head;
        if let Some(moved) = self.rows.get(row) {
            self.links.renumber_row(moved.head, row);
            if let Some(entry) = self.registry.get_mut::<T>(&moved.tag) {
                *entry = row;
            }
        }

        // Collect the circle first; releasing a cell resets its links.
        let mut cells = vec![head];
        let mut cell = self.links.right(head);
        while cell != head {
            cells.push(cell);
            cell = self.links.right(cell);
        }
        log::trace!("row {row}: released {} cells", cells.len());
        for cell in cells {
            self.links.release_cell(cell);
        }
    }

    /// Returns every registered row as its tag and a 0/1 vector with one
    /// entry per column.
    ///
    /// Rows come in insertion order until the first deletion; see
    /// [`Matrix::del_data`].
    pub fn constraints_matrix(&self) -> Vec<(T, Vec<u8>)> {
        self.rows
            .iter()
            .map(|slot| (slot.tag.clone(), self.links.dense_row(slot.head)))
            .collect()
    }
}
