//! Rectangular boolean matrices, the input of the exact cover problem.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{CoverViolation, MatrixError};

/// A rectangular, row-major boolean matrix.
///
/// Every row has exactly [`width`](Self::width) cells; constructors reject
/// anything else, so a `Matrix` is always a valid exact cover instance.
///
/// # Examples
///
/// ```
/// use excover_core::Matrix;
///
/// let matrix: Matrix = "
///     101
///     010
/// "
/// .parse()?;
///
/// assert_eq!(matrix.height(), 2);
/// assert_eq!(matrix.width(), 3);
/// assert!(matrix.get(0, 2));
/// assert!(matrix.is_exact_cover(&[0, 1]));
/// # Ok::<(), excover_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Matrix {
    /// Creates a matrix from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::CellCountMismatch`] if `cells` does not hold
    /// exactly `height * width` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use excover_core::Matrix;
    ///
    /// let matrix = Matrix::new(2, 2, vec![true, false, false, true])?;
    /// assert!(matrix.get(1, 1));
    ///
    /// assert!(Matrix::new(2, 2, vec![true]).is_err());
    /// # Ok::<(), excover_core::MatrixError>(())
    /// ```
    pub fn new(height: usize, width: usize, cells: Vec<bool>) -> Result<Self, MatrixError> {
        if height.checked_mul(width) != Some(cells.len()) {
            return Err(MatrixError::CellCountMismatch {
                height,
                width,
                actual: cells.len(),
            });
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Creates a matrix with `width` columns and no rows.
    #[must_use]
    pub fn empty(width: usize) -> Self {
        Self {
            height: 0,
            width,
            cells: Vec::new(),
        }
    }

    /// Creates a matrix from rows that must all be `width` cells long.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::RaggedRow`] for the first row whose length is
    /// not `width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use excover_core::{Matrix, MatrixError};
    ///
    /// let matrix = Matrix::from_rows(2, [[true, false], [false, true]])?;
    /// assert_eq!(matrix.height(), 2);
    ///
    /// let err = Matrix::from_rows(2, [vec![true, false], vec![true]]).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     MatrixError::RaggedRow {
    ///         row: 1,
    ///         expected: 2,
    ///         actual: 1
    ///     }
    /// );
    /// # Ok::<(), MatrixError>(())
    /// ```
    pub fn from_rows<I, R>(width: usize, rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[bool]>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            let cells_in_row = cells_in_row.as_ref();
            if cells_in_row.len() != width {
                return Err(MatrixError::RaggedRow {
                    row,
                    expected: width,
                    actual: cells_in_row.len(),
                });
            }
            cells.extend_from_slice(cells_in_row);
            height += 1;
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Returns the number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> bool {
        assert!(
            column < self.width,
            "column {column} out of range for width {}",
            self.width
        );
        self.row(row)[column]
    }

    /// Returns the cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[bool] {
        assert!(
            row < self.height,
            "row {row} out of range for height {}",
            self.height
        );
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        (0..self.height).map(|row| self.row(row))
    }

    /// Returns the number of set cells in `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    #[must_use]
    pub fn column_population(&self, column: usize) -> usize {
        assert!(
            column < self.width,
            "column {column} out of range for width {}",
            self.width
        );
        self.rows().filter(|cells| cells[column]).count()
    }

    /// Returns the total number of set cells.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Checks that `rows` select every column exactly once.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoverViolation`] found: rows are checked in the
    /// given order, then columns left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use excover_core::{CoverViolation, Matrix};
    ///
    /// let matrix: Matrix = "110\n011\n001".parse()?;
    /// assert_eq!(matrix.verify_cover(&[0, 2]), Ok(()));
    /// assert_eq!(
    ///     matrix.verify_cover(&[0, 1]),
    ///     Err(CoverViolation::Overlap {
    ///         column: 1,
    ///         first: 0,
    ///         second: 1
    ///     })
    /// );
    /// assert_eq!(
    ///     matrix.verify_cover(&[2]),
    ///     Err(CoverViolation::Uncovered { column: 0 })
    /// );
    /// # Ok::<(), excover_core::MatrixError>(())
    /// ```
    pub fn verify_cover(&self, rows: &[usize]) -> Result<(), CoverViolation> {
        let mut owner: Vec<Option<usize>> = vec![None; self.width];
        for &row in rows {
            if row >= self.height {
                return Err(CoverViolation::RowOutOfRange {
                    row,
                    height: self.height,
                });
            }
            for (column, _) in self.row(row).iter().enumerate().filter(|(_, set)| **set) {
                if let Some(first) = owner[column] {
                    return Err(CoverViolation::Overlap {
                        column,
                        first,
                        second: row,
                    });
                }
                owner[column] = Some(row);
            }
        }
        match owner.iter().position(Option::is_none) {
            Some(column) => Err(CoverViolation::Uncovered { column }),
            None => Ok(()),
        }
    }

    /// Returns `true` if `rows` form an exact cover of this matrix.
    #[must_use]
    pub fn is_exact_cover(&self, rows: &[usize]) -> bool {
        self.verify_cover(rows).is_ok()
    }
}

impl FromStr for Matrix {
    type Err = MatrixError;

    /// Parses one row per non-blank line.
    ///
    /// `1` and `#` are set cells; `0`, `.` and `_` are clear cells. Whitespace
    /// inside a line is ignored. The first row fixes the width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.lines().filter(|line| !line.trim().is_empty()) {
            let row = rows.len();
            let cells = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .enumerate()
                .map(|(column, ch)| match ch {
                    '1' | '#' => Ok(true),
                    '0' | '.' | '_' => Ok(false),
                    _ => Err(MatrixError::InvalidCell { row, column, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        let width = rows.first().map_or(0, Vec::len);
        Self::from_rows(width, rows)
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}
