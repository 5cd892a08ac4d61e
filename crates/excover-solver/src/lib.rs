//! Exact cover solving with Knuth's Algorithm X.
//!
//! Given a boolean matrix, the solver finds a set of rows such that every
//! column contains exactly one `true` among them. It runs a depth-first search
//! over the [`DancingLinks`](excover_core::DancingLinks) structure from
//! `excover-core`, always branching on the column with the fewest candidate
//! rows.
//!
//! # Overview
//!
//! - [`solve`], [`solve_rows`], [`solve_matrix`] and
//!   [`solve_matrix_with_stats`]: one-shot entry points that build the
//!   structure, search it and release it before returning a [`Solution`].
//! - [`Search`]: the recursive search, returning an [`Outcome`] and collecting
//!   [`SearchStats`].
//! - [`SolutionStack`]: the rows committed so far.
//! - [`teardown`]: undoes the covers a successful search leaves behind and
//!   releases every node.
//!
//! # Examples
//!
//! ```
//! use excover_solver::{format_solution, solve_matrix};
//!
//! let matrix = "
//!     0010110
//!     1001001
//!     0110010
//!     1001000
//!     0100001
//!     0001101
//! "
//! .parse()?;
//!
//! let solution = solve_matrix(&matrix)?.expect("instance has a cover");
//! let mut rows = solution.into_rows();
//! rows.sort_unstable();
//! assert_eq!(format_solution(&rows), "Solution: 0 3 4");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::*, search::*, solver::*, stack::*, teardown::*};

mod error;
mod search;
mod solver;
mod stack;
mod teardown;
#[cfg(test)]
mod testing;
