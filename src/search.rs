//! The recursive backtracking search (Knuth's Algorithm X).

use std::{
    convert::Infallible,
    hash::Hash,
    ops::{ControlFlow, Deref, DerefMut},
};

use crate::matrix::{Links, Matrix, ROOT, RowSlot};

/// A column covered for the lifetime of the guard.
///
/// Dropping the guard uncovers the column, so the matrix is restored on
/// every way out of a search step, early returns included.
struct CoveredColumn<'a> {
    links: &'a mut Links,
    column: usize,
}

impl<'a> CoveredColumn<'a> {
    fn new(links: &'a mut Links, column: usize) -> CoveredColumn<'a> {
        links.cover(column);
        CoveredColumn { links, column }
    }
}

impl Drop for CoveredColumn<'_> {
    fn drop(&mut self) {
        self.links.uncover(self.column);
    }
}

impl Deref for CoveredColumn<'_> {
    type Target = Links;

    fn deref(&self) -> &Links {
        &*self.links
    }
}

impl DerefMut for CoveredColumn<'_> {
    fn deref_mut(&mut self) -> &mut Links {
        &mut *self.links
    }
}

/// A row tentatively added to the solution: every column it touches,
/// other than the one it was selected from, is covered until the guard
/// is dropped.
struct SelectedRow<'a> {
    links: &'a mut Links,
    cell: usize,
}

impl<'a> SelectedRow<'a> {
    fn new(links: &'a mut Links, cell: usize) -> SelectedRow<'a> {
        let mut node = links.right(cell);
        while node != cell {
            let column = links.column(node);
            links.cover(column);
            node = links.right(node);
        }
        SelectedRow { links, cell }
    }
}

impl Drop for SelectedRow<'_> {
    fn drop(&mut self) {
        // Right to left: the reverse of the covering order.
        let mut node = self.links.left(self.cell);
        while node != self.cell {
            let column = self.links.column(node);
            self.links.uncover(column);
            node = self.links.left(node);
        }
    }
}

impl Deref for SelectedRow<'_> {
    type Target = Links;

    fn deref(&self) -> &Links {
        &*self.links
    }
}

impl DerefMut for SelectedRow<'_> {
    fn deref_mut(&mut self) -> &mut Links {
        &mut *self.links
    }
}

#[derive(Debug, Default)]
struct SearchStats {
    solutions: usize,
    branches: usize,
    dead_ends: usize,
}

/// Everything a search step needs besides the links themselves.
struct Context<'r, T, F> {
    rows: &'r [RowSlot<T>],
    selection: Vec<T>,
    visit: F,
    stats: SearchStats,
}

/// Finds the live mandatory column with the fewest cells, leftmost first
/// on ties. Returns `None` once no mandatory column is left, which means
/// the current selection is a solution.
fn find_min_mandatory_column(links: &Links) -> Option<usize> {
    // Mandatory columns always precede secondary ones in the column
    // list, so the scan can stop at the first secondary column (or at
    // the root, which is never mandatory).
    let mut column = links.right(ROOT);
    if !links.is_mandatory(column) {
        return None;
    }
    let mut min_column = column;
    loop {
        column = links.right(column);
        if !links.is_mandatory(column) {
            break;
        }
        if links.count(column) < links.count(min_column) {
            min_column = column;
        }
    }
    Some(min_column)
}

fn search<T, B, F>(links: &mut Links, cx: &mut Context<'_, T, F>) -> ControlFlow<B>
where
    T: Clone,
    F: FnMut(&[T]) -> ControlFlow<B>,
{
    let Some(column) = find_min_mandatory_column(links) else {
        cx.stats.solutions += 1;
        return (cx.visit)(cx.selection.as_slice());
    };

    if links.count(column) == 0 {
        cx.stats.dead_ends += 1;
        return ControlFlow::Continue(());
    }

    let mut covered = CoveredColumn::new(links, column);
    let mut cell = covered.down(column);
    while cell != column {
        cx.stats.branches += 1;
        cx.selection.push(cx.rows[covered.row(cell)].tag.clone());
        let flow = {
            let mut selected = SelectedRow::new(&mut covered, cell);
            search(&mut selected, cx)
        };
        cx.selection.pop();
        if flow.is_break() {
            return flow;
        }
        cell = covered.down(cell);
    }
    ControlFlow::Continue(())
}

impl<T> Matrix<T>
where
    T: Clone + Eq + Hash,
{
    /// Finds every solution of the problem.
    ///
    /// Each solution lists the tags of the selected rows in the order the
    /// search selected them, which is not necessarily insertion order.
    /// Solutions come out in depth-first order, which is deterministic for
    /// a given sequence of row insertions and deletions.
    ///
    /// The matrix is temporarily rearranged while searching, and is back
    /// in its original state when this returns.
    pub fn solve(&mut self) -> Vec<Vec<T>> {
        let mut solutions = Vec::new();
        let _ = self.solve_with(|solution| {
            solutions.push(solution.to_vec());
            ControlFlow::<Infallible>::Continue(())
        });
        solutions
    }

    /// Runs the search, handing each solution to `visit` as it is found.
    ///
    /// If `visit` returns [`ControlFlow::Break`], the search stops, the
    /// matrix is restored, and the break value is returned. Otherwise the
    /// search runs to completion and returns [`ControlFlow::Continue`].
    pub fn solve_with<B, F>(&mut self, visit: F) -> ControlFlow<B>
    where
        F: FnMut(&[T]) -> ControlFlow<B>,
    {
        let Matrix { links, rows, .. } = self;
        let mut cx = Context {
            rows: rows.as_slice(),
            selection: Vec::new(),
            visit,
            stats: SearchStats::default(),
        };
        let flow = search(links, &mut cx);
        log::debug!(
            "search {}: {} solutions, {} branches, {} dead ends",
            if flow.is_break() { "stopped" } else { "finished" },
            cx.stats.solutions,
            cx.stats.branches,
            cx.stats.dead_ends
        );
        flow
    }

    /// Returns the first solution found, if any.
    pub fn first_solution(&mut self) -> Option<Vec<T>> {
        match self.solve_with(|solution| ControlFlow::Break(solution.to_vec())) {
            ControlFlow::Break(solution) => Some(solution),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Counts the solutions without collecting them.
    pub fn count_solutions(&mut self) -> usize {
        let mut count = 0;
        let _ = self.solve_with(|_| {
            count += 1;
            ControlFlow::<Infallible>::Continue(())
        });
        count
    }
}
