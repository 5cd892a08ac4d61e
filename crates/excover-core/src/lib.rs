//! Core data structures for exact cover solving.
//!
//! This crate provides the input model and the mutable link structure that
//! Knuth's Algorithm X runs on. The search itself lives in `excover-solver`.
//!
//! # Overview
//!
//! - [`matrix`]: [`Matrix`], a validated rectangular boolean matrix, with
//!   parsing, formatting and solution verification.
//! - [`node`]: [`NodeId`], [`NodeKind`] and [`Direction`], the vocabulary of
//!   the link structure.
//! - [`links`]: [`DancingLinks`], the toroidal structure of header and element
//!   nodes, with the reversible [`cover`](DancingLinks::cover) and
//!   [`uncover`](DancingLinks::uncover) operations, the minimum column
//!   heuristic, and the final [`release`](DancingLinks::release) walk.
//!
//! # Examples
//!
//! ```
//! use excover_core::{DancingLinks, Matrix};
//!
//! let matrix: Matrix = "
//!     1001
//!     0110
//!     1000
//! "
//! .parse()?;
//! let mut links = DancingLinks::build(&matrix)?;
//!
//! // Columns 1, 2 and 3 have a single candidate row; the first one wins.
//! let column = links.min_column().unwrap();
//! assert_eq!(column, links.header(1));
//!
//! links.cover(column);
//! assert_eq!(links.active_columns().count(), 3);
//! links.uncover(column);
//!
//! let released = links.release()?;
//! assert_eq!(released.nodes, 1 + 4 + 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::*, links::*, matrix::*, node::*};

mod error;
pub mod links;
pub mod matrix;
pub mod node;
