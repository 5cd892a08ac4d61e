//! Nodes of the dancing links structure.
//!
//! Nodes live in an arena owned by [`DancingLinks`] and refer to each other
//! through [`NodeId`] indices instead of references, so the cyclic rings can be
//! spliced and restored without any aliasing concerns.
//!
//! [`DancingLinks`]: crate::DancingLinks

use std::fmt::{self, Display};

/// Stable index of a node inside a [`DancingLinks`](crate::DancingLinks) arena.
///
/// Identifiers are only meaningful for the structure that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node. It is always the first node of the arena.
    pub const ROOT: Self = Self(0);

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this node.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum NodeKind {
    /// Anchor of the header ring. Belongs to no column.
    Root,
    /// Column header.
    Header {
        /// Zero-based matrix column.
        column: usize,
    },
    /// A set cell of the input matrix.
    Element {
        /// Zero-based matrix row the cell belongs to.
        row: usize,
    },
}

/// Direction of a ring link.
///
/// `Left`/`Right` walk the header ring and row rings, `Up`/`Down` walk
/// column rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous node of a horizontal ring.
    Left,
    /// Next node of a horizontal ring.
    Right,
    /// Previous node of a vertical ring.
    Up,
    /// Next node of a vertical ring.
    Down,
}

impl Direction {
    /// Returns the opposite direction on the same axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use excover_core::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Down.opposite(), Direction::Up);
    /// ```
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// A single node with its four ring links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// Left, Right, Up, Down
    links: [NodeId; 4],
    /// Column header; the root points at itself.
    pub(crate) head: NodeId,
    pub(crate) kind: NodeKind,
    /// Active elements in the column. Headers only.
    pub(crate) count: usize,
}

impl Node {
    /// Creates a node linked to itself in every direction.
    pub(crate) fn new(id: NodeId, head: NodeId, kind: NodeKind) -> Self {
        Self {
            links: [id; 4],
            head,
            kind,
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn get(&self, dir: Direction) -> NodeId {
        self.links[dir.slot()]
    }

    #[inline]
    pub(crate) fn set(&mut self, dir: Direction, id: NodeId) -> &mut Self {
        self.links[dir.slot()] = id;
        self
    }
}
