use std::collections::TryReserveError;

/// Errors raised while validating an input matrix.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatrixError {
    /// The number of cells does not match `height * width`.
    #[display("expected {height}x{width} cells, got {actual}")]
    CellCountMismatch {
        /// Declared height.
        height: usize,
        /// Declared width.
        width: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// The number of rows does not match the declared height.
    #[display("expected {expected} rows, got {actual}")]
    RowCountMismatch {
        /// Declared height.
        expected: usize,
        /// Number of rows supplied.
        actual: usize,
    },
    /// A row does not have the same width as the others.
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the matrix.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// A character in the textual form is neither a set nor a clear cell.
    #[display("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell {
        /// Zero-based row of the character.
        row: usize,
        /// Zero-based column of the character.
        column: usize,
        /// The offending character.
        ch: char,
    },
}

/// Ways a set of rows can fail to be an exact cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CoverViolation {
    /// A row index is outside the matrix.
    #[display("row {row} is out of range for a matrix of height {height}")]
    RowOutOfRange {
        /// The offending row index.
        row: usize,
        /// Height of the matrix.
        height: usize,
    },
    /// A column has no selected row with a set cell.
    #[display("column {column} is not covered")]
    Uncovered {
        /// The uncovered column.
        column: usize,
    },
    /// A column is covered by more than one selected row.
    #[display("column {column} is covered by both row {first} and row {second}")]
    Overlap {
        /// The doubly covered column.
        column: usize,
        /// The row that covered it first.
        first: usize,
        /// The row that covered it again.
        second: usize,
    },
}

/// Errors raised while building a [`DancingLinks`](crate::DancingLinks) structure.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BuildError {
    /// The node arena could not be allocated.
    #[display("failed to allocate node arena: {_0}")]
    Allocation(#[from] TryReserveError),
    /// The node count does not fit in `usize`.
    #[display("too many nodes for a {width}-column matrix with {ones} set cells")]
    TooManyNodes {
        /// Width of the matrix.
        width: usize,
        /// Number of set cells.
        ones: usize,
    },
}

/// Inconsistencies detected in the links of a structure.
///
/// These indicate unbalanced cover/uncover calls rather than bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LinkError {
    /// A neighbor does not point back at the node that links to it.
    #[display("link {direction:?} of node {node} is not mirrored by its neighbor")]
    BrokenRing {
        /// Arena index of the node.
        node: usize,
        /// Direction of the broken link.
        direction: crate::Direction,
    },
    /// A header's count differs from the length of its column ring.
    #[display("column {column} records {recorded} nodes but links {counted}")]
    CountMismatch {
        /// The column.
        column: usize,
        /// Value stored in the header.
        recorded: usize,
        /// Nodes found by walking the ring.
        counted: usize,
    },
    /// An element node is linked under the wrong header.
    #[display("node {node} is linked into column {column} but belongs elsewhere")]
    WrongColumn {
        /// Arena index of the node.
        node: usize,
        /// Column whose ring contains the node.
        column: usize,
    },
    /// The release walk did not reach every node exactly once.
    #[display("released {released} nodes out of {allocated}")]
    ReleaseMismatch {
        /// Nodes reached by the release walk.
        released: usize,
        /// Nodes in the arena.
        allocated: usize,
    },
}
