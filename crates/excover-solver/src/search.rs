//! Knuth's Algorithm X over a dancing links structure.
//!
//! 1. If no column is left, the committed rows are a solution.
//! 2. Otherwise choose the column with the fewest candidate rows and cover it.
//! 3. For each row of that column, commit the row, cover every other column
//!    the row touches, and recurse.
//! 4. If the recursion fails, undo the row in reverse order and try the next.
//! 5. If every row fails, uncover the column and report failure.

use excover_core::{DancingLinks, Direction, NodeId, Walker};

use crate::SolutionStack;

/// Result of a search.
///
/// On [`Solved`](Self::Solved) the structure is intentionally left covered
/// and the stack holds the solution; on [`Exhausted`](Self::Exhausted) the
/// structure is back in its built state and the stack is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Outcome {
    /// Every column is covered by the committed rows.
    Solved,
    /// No selection of the remaining rows covers every column.
    Exhausted,
}

/// Counters collected during a search.
///
/// # Examples
///
/// ```
/// use excover_solver::solve_matrix_with_stats;
///
/// let matrix = "10\n01".parse()?;
/// let (solution, stats) = solve_matrix_with_stats(&matrix)?;
/// assert!(solution.is_some());
/// assert_eq!(stats.rows_tried(), 2);
/// assert_eq!(stats.max_depth(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    calls: usize,
    rows_tried: usize,
    covers: usize,
    max_depth: usize,
}

impl SearchStats {
    /// Returns the number of search tree nodes visited.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Returns the number of rows committed, including those later undone.
    #[must_use]
    pub fn rows_tried(&self) -> usize {
        self.rows_tried
    }

    /// Returns the number of column covers performed.
    #[must_use]
    pub fn covers(&self) -> usize {
        self.covers
    }

    /// Returns the largest number of rows committed at once.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// A depth-first Algorithm X search that stops at the first solution.
///
/// The search owns the structure and the stack while it runs; take them back
/// with [`into_parts`](Self::into_parts) to extract the solution and tear the
/// structure down.
///
/// # Examples
///
/// ```
/// use excover_core::{DancingLinks, Matrix};
/// use excover_solver::{Outcome, Search};
///
/// let matrix: Matrix = "
///     110
///     001
///     100
/// "
/// .parse()?;
/// let mut search = Search::new(DancingLinks::build(&matrix)?);
/// assert_eq!(search.run(), Outcome::Solved);
///
/// let (links, stack, _stats) = search.into_parts();
/// let mut rows = stack.rows(&links);
/// rows.sort_unstable();
/// assert_eq!(rows, vec![0, 1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Search {
    links: DancingLinks,
    stack: SolutionStack,
    stats: SearchStats,
}

impl Search {
    /// Prepares a search over `links`, which must be fully uncovered.
    #[must_use]
    pub fn new(links: DancingLinks) -> Self {
        let stack = SolutionStack::with_capacity(links.width());
        Self {
            links,
            stack,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to the first solution or to exhaustion.
    ///
    /// Running again after [`Outcome::Solved`] returns `Solved` at once,
    /// since every column is still covered.
    pub fn run(&mut self) -> Outcome {
        let outcome = self.explore(0);
        log::debug!(
            "search {outcome:?}: {} calls, {} rows tried, {} covers, max depth {}",
            self.stats.calls,
            self.stats.rows_tried,
            self.stats.covers,
            self.stats.max_depth
        );
        outcome
    }

    fn explore(&mut self, depth: usize) -> Outcome {
        self.stats.calls += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(column) = self.links.min_column() else {
            return Outcome::Solved;
        };
        log::trace!(
            "depth {depth}: column {column} with {} candidate rows",
            self.links.column_len(column)
        );

        self.links.cover(column);
        self.stats.covers += 1;

        let mut rows = Walker::new(column);
        while let Some(node) = rows.next(&self.links, Direction::Down) {
            let mut row = RowCover::enter(self, node);
            if row.search.explore(depth + 1).is_solved() {
                row.keep();
                return Outcome::Solved;
            }
        }

        self.links.uncover(column);
        Outcome::Exhausted
    }

    /// Returns the structure in its current state.
    #[must_use]
    pub fn links(&self) -> &DancingLinks {
        &self.links
    }

    /// Returns the committed rows.
    #[must_use]
    pub fn stack(&self) -> &SolutionStack {
        &self.stack
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Hands back the structure, the stack and the counters.
    #[must_use]
    pub fn into_parts(self) -> (DancingLinks, SolutionStack, SearchStats) {
        (self.links, self.stack, self.stats)
    }
}

/// A committed row: pushed on the stack with every row-mate's column covered.
///
/// Dropping the guard uncovers the row-mates in reverse order and pops the
/// stack. [`keep`](Self::keep) leaves both in place.
struct RowCover<'s> {
    search: &'s mut Search,
    node: NodeId,
    kept: bool,
}

impl<'s> RowCover<'s> {
    fn enter(search: &'s mut Search, node: NodeId) -> Self {
        search.stack.push(node);
        search.stats.rows_tried += 1;
        search.stats.covers += cover_row_mates(&mut search.links, node);
        Self {
            search,
            node,
            kept: false,
        }
    }

    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for RowCover<'_> {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        uncover_row_mates(&mut self.search.links, self.node);
        let popped = self.search.stack.pop();
        debug_assert_eq!(popped, Some(self.node));
    }
}

/// Covers the column of every other node of `node`'s row, walking rightwards.
///
/// Returns the number of columns covered.
pub(crate) fn cover_row_mates(links: &mut DancingLinks, node: NodeId) -> usize {
    let mut covered = 0;
    let mut mates = Walker::new(node);
    while let Some(mate) = mates.next(links, Direction::Right) {
        links.cover(mate);
        covered += 1;
    }
    covered
}

/// Reverses [`cover_row_mates`], walking leftwards.
pub(crate) fn uncover_row_mates(links: &mut DancingLinks, node: NodeId) {
    let mut mates = Walker::new(node);
    while let Some(mate) = mates.next(links, Direction::Left) {
        links.uncover(mate);
    }
}
