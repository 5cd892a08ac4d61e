use std::fmt::{self, Display};

use excover_core::{DancingLinks, Matrix, MatrixError};

use crate::{Search, SearchStats, SolverError, teardown};

/// Rows of an exact cover, in the order the search committed them.
///
/// # Examples
///
/// ```
/// use excover_solver::solve_rows;
///
/// let solution = solve_rows(2, &[[true, true], [true, false]])?.unwrap();
/// assert_eq!(solution.rows(), &[0]);
/// assert_eq!(solution.to_string(), "0");
/// # Ok::<(), excover_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    rows: Vec<usize>,
}

impl Solution {
    /// Creates a solution from row indices.
    #[must_use]
    pub fn new(rows: Vec<usize>) -> Self {
        Self { rows }
    }

    /// Returns the selected rows in commit order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Returns the number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row is selected.
    ///
    /// This only happens for matrices without columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the solution and returns the selected rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }
}

impl From<Solution> for Vec<usize> {
    fn from(solution: Solution) -> Self {
        solution.rows
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            Display::fmt(row, f)?;
        }
        Ok(())
    }
}

/// Formats row indices as a single human-readable line.
///
/// # Examples
///
/// ```
/// use excover_solver::format_solution;
///
/// assert_eq!(format_solution(&[0, 3, 4]), "Solution: 0 3 4");
/// assert_eq!(format_solution(&[]), "Solution:");
/// ```
#[must_use]
pub fn format_solution(rows: &[usize]) -> String {
    let mut line = String::from("Solution:");
    for row in rows {
        line.push(' ');
        line.push_str(&row.to_string());
    }
    line
}

/// Solves the exact cover problem for a `height` x `width` matrix given as rows.
///
/// Returns `Ok(None)` if no exact cover exists. A matrix without columns is
/// trivially covered by the empty selection, so it returns an empty
/// [`Solution`] whatever its height.
///
/// # Errors
///
/// Returns [`SolverError::Matrix`] if there are not exactly `height` rows of
/// `width` cells each, and [`SolverError::Build`] if the link structure cannot
/// be allocated.
///
/// # Examples
///
/// ```
/// use excover_solver::solve;
///
/// let rows = [
///     [false, false, true, false, true, true, false],
///     [true, false, false, true, false, false, true],
///     [false, true, true, false, false, true, false],
///     [true, false, false, true, false, false, false],
///     [false, true, false, false, false, false, true],
///     [false, false, false, true, true, false, true],
/// ];
/// let solution = solve(6, 7, &rows)?.unwrap();
/// let mut selected = solution.into_rows();
/// selected.sort_unstable();
/// assert_eq!(selected, vec![0, 3, 4]);
///
/// assert!(solve(1, 1, &[[false]])?.is_none());
/// assert!(solve(2, 1, &[[true]]).is_err());
/// # Ok::<(), excover_solver::SolverError>(())
/// ```
pub fn solve<R>(height: usize, width: usize, rows: &[R]) -> Result<Option<Solution>, SolverError>
where
    R: AsRef<[bool]>,
{
    if rows.len() != height {
        return Err(MatrixError::RowCountMismatch {
            expected: height,
            actual: rows.len(),
        }
        .into());
    }
    solve_rows(width, rows)
}

/// Solves the exact cover problem for rows that must all be `width` cells long.
///
/// # Errors
///
/// Returns [`SolverError::Matrix`] for a ragged row and
/// [`SolverError::Build`] if the link structure cannot be allocated.
pub fn solve_rows<R>(width: usize, rows: &[R]) -> Result<Option<Solution>, SolverError>
where
    R: AsRef<[bool]>,
{
    let matrix = Matrix::from_rows(width, rows)?;
    solve_matrix(&matrix)
}

/// Solves the exact cover problem for `matrix`.
///
/// # Errors
///
/// Returns [`SolverError::Build`] if the link structure cannot be allocated.
///
/// # Examples
///
/// ```
/// use excover_core::Matrix;
/// use excover_solver::solve_matrix;
///
/// let matrix: Matrix = "
///     1100
///     0011
///     0110
///     1001
/// "
/// .parse()?;
/// let solution = solve_matrix(&matrix)?.unwrap();
/// assert!(matrix.is_exact_cover(solution.rows()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn solve_matrix(matrix: &Matrix) -> Result<Option<Solution>, SolverError> {
    let (solution, _stats) = solve_matrix_with_stats(matrix)?;
    Ok(solution)
}

/// Solves the exact cover problem for `matrix` and reports search counters.
///
/// The link structure is built, searched, reconciled and released before this
/// returns; the solution is an independent copy of the committed rows.
///
/// # Errors
///
/// Returns [`SolverError::Build`] if the link structure cannot be allocated,
/// and [`SolverError::Link`] if teardown finds the structure inconsistent.
pub fn solve_matrix_with_stats(
    matrix: &Matrix,
) -> Result<(Option<Solution>, SearchStats), SolverError> {
    let links = DancingLinks::build(matrix)?;
    let mut search = Search::new(links);
    let outcome = search.run();

    let (links, stack, stats) = search.into_parts();
    let solution = outcome
        .is_solved()
        .then(|| Solution::new(stack.rows(&links)));
    teardown(links, stack)?;

    debug_assert!(
        solution
            .as_ref()
            .is_none_or(|solution| matrix.is_exact_cover(solution.rows())),
        "search returned an invalid cover"
    );
    Ok((solution, stats))
}
