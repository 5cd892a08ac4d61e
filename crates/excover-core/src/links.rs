//! The toroidal dancing links structure.
//!
//! # Layout
//!
//! ```text
//! [ Root ] [ Header 0 ] [ Header 1 ] ... [ Header w-1 ]
//! [ elements of row 0, left to right ]
//! [ elements of row 1, left to right ]
//! ...
//! ```
//!
//! Every node is linked in two circular doubly linked lists: Left/Right and
//! Up/Down. The root and headers form the header ring; each header anchors the
//! column ring of its elements; the elements of a matrix row form a row ring
//! with no header.
//!
//! Covering a column splices nodes out of rings but never touches the links
//! stored in the removed nodes themselves, which is what lets
//! [`uncover`](DancingLinks::uncover) put them back exactly.

use std::iter::FusedIterator;

use crate::{
    BuildError, LinkError, Matrix,
    node::{Direction, Node, NodeId, NodeKind},
};

use Direction::{Down, Left, Right, Up};

/// Dancing links representation of an exact cover instance.
///
/// Built once from a [`Matrix`], mutated in place by
/// [`cover`](Self::cover) and [`uncover`](Self::uncover), and finally
/// consumed by [`release`](Self::release).
///
/// # Examples
///
/// ```
/// use excover_core::{DancingLinks, Matrix};
///
/// let matrix: Matrix = "
///     110
///     001
///     011
/// "
/// .parse()?;
/// let mut links = DancingLinks::build(&matrix)?;
///
/// let column = links.min_column().unwrap();
/// assert_eq!(links.column_len(column), 1);
///
/// let before = links.clone();
/// links.cover(column);
/// assert_ne!(links, before);
/// links.uncover(column);
/// assert_eq!(links, before);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DancingLinks {
    nodes: Vec<Node>,
    height: usize,
    width: usize,
}

impl DancingLinks {
    /// Builds the structure for `matrix`.
    ///
    /// Headers are linked in column order. Element nodes are created in
    /// row-major order, so every column ring lists its rows top to bottom and
    /// every row ring lists its cells left to right.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the node arena cannot be allocated.
    pub fn build(matrix: &Matrix) -> Result<Self, BuildError> {
        let width = matrix.width();
        let ones = matrix.ones();
        let total = width
            .checked_add(ones)
            .and_then(|n| n.checked_add(1))
            .ok_or(BuildError::TooManyNodes { width, ones })?;

        let mut nodes = Vec::new();
        nodes.try_reserve_exact(total)?;

        let mut links = Self {
            nodes,
            height: matrix.height(),
            width,
        };
        links.push_node(NodeId::ROOT, NodeKind::Root);
        for column in 0..width {
            links.append_header(column);
        }
        for (row, cells) in matrix.rows().enumerate() {
            let mut first = None;
            for (column, _) in cells.iter().enumerate().filter(|(_, set)| **set) {
                let id = links.append_to_column(row, column);
                match first {
                    None => first = Some(id),
                    Some(first) => links.insert_before(first, id, Right),
                }
            }
        }
        debug_assert_eq!(links.nodes.len(), total);

        log::debug!(
            "built dancing links for {}x{} matrix: {} nodes",
            links.height,
            links.width,
            links.nodes.len()
        );
        Ok(links)
    }

    fn push_node(&mut self, head: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(id, head, kind));
        id
    }

    fn append_header(&mut self, column: usize) {
        let id = NodeId::new(self.nodes.len());
        self.push_node(id, NodeKind::Header { column });
        self.insert_before(NodeId::ROOT, id, Right);
    }

    /// Creates an element node at the bottom of `column`'s ring.
    fn append_to_column(&mut self, row: usize, column: usize) -> NodeId {
        let head = self.header(column);
        let id = self.push_node(head, NodeKind::Element { row });
        self.insert_before(head, id, Down);
        self.nodes[head.index()].count += 1;
        id
    }

    /// Links the self-linked node `id` just before `anchor` in the ring of
    /// direction `dir`.
    fn insert_before(&mut self, anchor: NodeId, id: NodeId, dir: Direction) {
        let back = dir.opposite();
        let last = self.link(anchor, back);
        self.node_mut(id).set(back, last).set(dir, anchor);
        self.node_mut(last).set(dir, id);
        self.node_mut(anchor).set(back, id);
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Returns the number of matrix rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of matrix columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of nodes in the arena, root and headers included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds nothing but the root.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns the header node of `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    #[inline]
    #[must_use]
    pub fn header(&self, column: usize) -> NodeId {
        assert!(
            column < self.width,
            "column {column} out of range for width {}",
            self.width
        );
        NodeId::new(column + 1)
    }

    /// Returns the neighbor of `id` in direction `dir`.
    #[inline]
    #[must_use]
    pub fn link(&self, id: NodeId, dir: Direction) -> NodeId {
        self.node(id).get(dir)
    }

    /// Returns what `id` stands for.
    #[inline]
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Returns the column header of `id`, or `None` for the root.
    #[inline]
    #[must_use]
    pub fn head(&self, id: NodeId) -> Option<NodeId> {
        (id != NodeId::ROOT).then(|| self.node(id).head)
    }

    /// Returns the matrix row of an element node.
    #[inline]
    #[must_use]
    pub fn row_of(&self, id: NodeId) -> Option<usize> {
        match self.node(id).kind {
            NodeKind::Element { row } => Some(row),
            NodeKind::Root | NodeKind::Header { .. } => None,
        }
    }

    /// Returns the number of active elements in the column of `id`.
    ///
    /// `id` may be a header or any element of the column.
    #[inline]
    #[must_use]
    pub fn column_len(&self, id: NodeId) -> usize {
        self.node(self.column_of(id)).count
    }

    #[inline]
    fn column_of(&self, id: NodeId) -> NodeId {
        debug_assert_ne!(id, NodeId::ROOT, "the root has no column");
        self.node(id).head
    }

    /// Returns `true` if every column is covered.
    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.link(NodeId::ROOT, Right) == NodeId::ROOT
    }

    /// Returns an iterator over the headers of uncovered columns, in ring order.
    pub fn active_columns(&self) -> Ring<'_> {
        Ring::new(self, NodeId::ROOT, Right)
    }

    /// Returns an iterator over the active elements of the column of `id`,
    /// top to bottom, starting after the header.
    pub fn column_nodes(&self, id: NodeId) -> Ring<'_> {
        Ring::new(self, self.column_of(id), Down)
    }

    /// Returns an iterator over the other elements of `id`'s row,
    /// walking rightwards.
    pub fn row_mates(&self, id: NodeId) -> Ring<'_> {
        Ring::new(self, id, Right)
    }

    /// Selects the uncovered column with the fewest active elements.
    ///
    /// Ties go to the column found first in ring order. Returns `None` when
    /// every column is covered.
    #[must_use]
    pub fn min_column(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, usize)> = None;
        for header in self.active_columns() {
            let count = self.node(header).count;
            if best.is_none_or(|(_, min)| count < min) {
                best = Some((header, count));
                if count == 0 {
                    break;
                }
            }
        }
        best.map(|(header, _)| header)
    }

    /// Removes `id` from its ring in direction `dir`.
    ///
    /// ```text
    /// x.left.right ← x.right
    /// x.right.left ← x.left
    /// ```
    #[inline]
    fn remove(&mut self, id: NodeId, dir: Direction) {
        let next = self.link(id, dir);
        let prev = self.link(id, dir.opposite());
        self.node_mut(prev).set(dir, next);
        self.node_mut(next).set(dir.opposite(), prev);
    }

    /// Puts `id` back into its ring, reversing [`remove`](Self::remove).
    ///
    /// ```text
    /// x.left.right ← x
    /// x.right.left ← x
    /// ```
    #[inline]
    fn restore(&mut self, id: NodeId, dir: Direction) {
        let next = self.link(id, dir);
        let prev = self.link(id, dir.opposite());
        self.node_mut(prev).set(dir, id);
        self.node_mut(next).set(dir.opposite(), id);
    }

    /// Covers the column of `id`.
    ///
    /// The column header leaves the header ring, and every other element of
    /// every row with a cell in this column leaves its column ring. Row rings
    /// are left intact so [`uncover`](Self::uncover) can find the nodes again.
    ///
    /// `id` may be the header or any element of the column.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is the root.
    pub fn cover(&mut self, id: NodeId) {
        let head = self.column_of(id);
        self.remove(head, Right);

        let mut rows = Walker::new(head);
        while let Some(row) = rows.next(self, Down) {
            let mut cells = Walker::new(row);
            while let Some(cell) = cells.next(self, Right) {
                self.remove(cell, Down);
                let column = self.node(cell).head;
                self.node_mut(column).count -= 1;
            }
        }
    }

    /// Uncovers the column of `id`, undoing the matching [`cover`](Self::cover).
    ///
    /// Steps are taken in the exact reverse order of `cover`: rows bottom to
    /// top, cells right to left, header last. Calls must mirror the cover
    /// calls in last-in, first-out order.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is the root.
    pub fn uncover(&mut self, id: NodeId) {
        let head = self.column_of(id);

        let mut rows = Walker::new(head);
        while let Some(row) = rows.next(self, Up) {
            let mut cells = Walker::new(row);
            while let Some(cell) = cells.next(self, Left) {
                let column = self.node(cell).head;
                self.node_mut(column).count += 1;
                self.restore(cell, Down);
            }
        }

        self.restore(head, Right);
    }

    /// Checks ring symmetry and header counts of everything still linked.
    ///
    /// # Errors
    ///
    /// Returns the first [`LinkError`] found.
    pub fn check_consistency(&self) -> Result<(), LinkError> {
        self.check_ring(NodeId::ROOT, Right)?;
        for header in self.active_columns() {
            self.check_ring(header, Down)?;
            let NodeKind::Header { column } = self.kind(header) else {
                return Err(LinkError::BrokenRing {
                    node: header.index(),
                    direction: Right,
                });
            };
            let mut counted = 0;
            for id in self.column_nodes(header) {
                if self.node(id).head != header || !self.kind(id).is_element() {
                    return Err(LinkError::WrongColumn {
                        node: id.index(),
                        column,
                    });
                }
                self.check_ring(id, Right)?;
                counted += 1;
            }
            let recorded = self.node(header).count;
            if counted != recorded {
                return Err(LinkError::CountMismatch {
                    column,
                    recorded,
                    counted,
                });
            }
        }
        Ok(())
    }

    fn check_ring(&self, start: NodeId, dir: Direction) -> Result<(), LinkError> {
        let mut id = start;
        // a ring can never be longer than the arena
        for _ in 0..=self.nodes.len() {
            let next = self.link(id, dir);
            if self.link(next, dir.opposite()) != id {
                return Err(LinkError::BrokenRing {
                    node: id.index(),
                    direction: dir,
                });
            }
            id = next;
            if id == start {
                return Ok(());
            }
        }
        Err(LinkError::BrokenRing {
            node: start.index(),
            direction: dir,
        })
    }

    /// Consumes the structure, walking the header ring and every column ring
    /// and releasing each node it reaches.
    ///
    /// The walk must see every node exactly once, so every cover must have
    /// been undone first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::ReleaseMismatch`] if the walk misses nodes, which
    /// happens when the structure is still partially covered.
    pub fn release(mut self) -> Result<Released, LinkError> {
        let allocated = self.nodes.len();
        let mut released = 0;

        while self.link(NodeId::ROOT, Right) != NodeId::ROOT {
            let header = self.link(NodeId::ROOT, Right);
            while self.link(header, Down) != header {
                let id = self.link(header, Down);
                let next = self.link(id, Down);
                self.node_mut(header).set(Down, next);
                released += 1;
                if released > allocated {
                    break;
                }
            }
            let next = self.link(header, Right);
            self.node_mut(NodeId::ROOT).set(Right, next);
            released += 1;
            if released > allocated {
                break;
            }
        }
        released += 1;

        if released != allocated {
            return Err(LinkError::ReleaseMismatch {
                released,
                allocated,
            });
        }
        log::debug!("released {released} nodes");
        Ok(Released { nodes: released })
    }
}

/// Summary of a completed [`DancingLinks::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Released {
    /// Nodes reached by the release walk, root included.
    pub nodes: usize,
}

/// Cursor over a ring that does not borrow the structure between steps.
///
/// Unlike [`Ring`], a walker can be advanced while the structure is mutated
/// in between steps, which is how cover and the search loop over rings they
/// are editing.
///
/// # Examples
///
/// ```
/// use excover_core::{DancingLinks, Direction, Matrix, Walker};
///
/// let matrix: Matrix = "11\n01".parse()?;
/// let links = DancingLinks::build(&matrix)?;
/// let header = links.header(1);
///
/// let mut rows = Walker::new(header);
/// let mut seen = 0;
/// while let Some(_node) = rows.next(&links, Direction::Down) {
///     seen += 1;
/// }
/// assert_eq!(seen, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Walker {
    current: NodeId,
    start: NodeId,
}

impl Walker {
    /// Creates a walker positioned on `start`.
    #[must_use]
    pub fn new(start: NodeId) -> Self {
        Self {
            current: start,
            start,
        }
    }

    /// Moves one step in `dir` and returns the new node, or `None` once the
    /// walk is back at its start.
    pub fn next(&mut self, links: &DancingLinks, dir: Direction) -> Option<NodeId> {
        let next = links.link(self.current, dir);
        self.current = next;
        (next != self.start).then_some(next)
    }
}

/// Borrowing iterator over one ring, excluding its starting node.
#[derive(Debug, Clone)]
pub struct Ring<'a> {
    links: &'a DancingLinks,
    walker: Walker,
    dir: Direction,
    done: bool,
}

impl<'a> Ring<'a> {
    fn new(links: &'a DancingLinks, start: NodeId, dir: Direction) -> Self {
        Self {
            links,
            walker: Walker::new(start),
            dir,
            done: false,
        }
    }
}

impl Iterator for Ring<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.walker.next(self.links, self.dir);
        self.done = next.is_none();
        next
    }
}

impl FusedIterator for Ring<'_> {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn knuth_matrix() -> Matrix {
        "
        0010110
        1001001
        0110010
        1001000
        0100001
        0001101
        "
        .parse()
        .unwrap()
    }

    fn counts(links: &DancingLinks) -> Vec<usize> {
        (0..links.width())
            .map(|c| links.column_len(links.header(c)))
            .collect()
    }

    fn rows_in_column(links: &DancingLinks, column: usize) -> Vec<usize> {
        links
            .column_nodes(links.header(column))
            .filter_map(|id| links.row_of(id))
            .collect()
    }

    #[test]
    fn test_build_counts_match_population() {
        let matrix = knuth_matrix();
        let links = DancingLinks::build(&matrix).unwrap();
        assert_eq!(links.len(), 1 + 7 + matrix.ones());
        assert_eq!(counts(&links), vec![2, 2, 2, 3, 2, 2, 3]);
        links.check_consistency().unwrap();
    }

    #[test]
    fn test_build_header_ring_in_column_order() {
        let links = DancingLinks::build(&knuth_matrix()).unwrap();
        let columns: Vec<_> = links
            .active_columns()
            .map(|h| links.kind(h))
            .collect();
        let expected: Vec<_> = (0..7).map(|column| NodeKind::Header { column }).collect();
        assert_eq!(columns, expected);
    }

    #[test]
    fn test_build_rings_in_insertion_order() {
        let links = DancingLinks::build(&knuth_matrix()).unwrap();
        assert_eq!(rows_in_column(&links, 3), vec![1, 3, 5]);
        assert_eq!(rows_in_column(&links, 6), vec![1, 4, 5]);

        // row 0 is 0010110: cells in columns 2, 4, 5
        let first = links.column_nodes(links.header(2)).next().unwrap();
        assert_eq!(links.row_of(first), Some(0));
        let mates: Vec<_> = links
            .row_mates(first)
            .map(|id| links.head(id).unwrap())
            .collect();
        assert_eq!(mates, vec![links.header(4), links.header(5)]);
    }

    #[test]
    fn test_build_single_cell_row_is_self_linked() {
        let matrix: Matrix = "10\n01".parse().unwrap();
        let links = DancingLinks::build(&matrix).unwrap();
        let id = links.column_nodes(links.header(1)).next().unwrap();
        assert_eq!(links.link(id, Left), id);
        assert_eq!(links.link(id, Right), id);
        assert_eq!(links.row_mates(id).count(), 0);
    }

    #[test]
    fn test_build_zero_width() {
        let matrix = Matrix::new(3, 0, Vec::new()).unwrap();
        let links = DancingLinks::build(&matrix).unwrap();
        assert!(links.is_empty());
        assert!(links.is_solved());
        assert_eq!(links.min_column(), None);
    }

    #[test]
    fn test_build_does_not_depend_on_previous_builds() {
        let matrix = knuth_matrix();
        let first = DancingLinks::build(&matrix).unwrap();
        let second = DancingLinks::build(&matrix).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_has_no_head() {
        let links = DancingLinks::build(&knuth_matrix()).unwrap();
        assert_eq!(links.head(NodeId::ROOT), None);
        assert_eq!(links.kind(NodeId::ROOT), NodeKind::Root);
        let header = links.header(3);
        assert_eq!(links.head(header), Some(header));
        assert_eq!(links.row_of(header), None);
    }

    #[test]
    fn test_min_column_prefers_first_on_tie() {
        let links = DancingLinks::build(&knuth_matrix()).unwrap();
        assert_eq!(links.min_column(), Some(links.header(0)));
    }

    #[test]
    fn test_min_column_stops_on_empty_column() {
        let matrix: Matrix = "101\n101".parse().unwrap();
        let links = DancingLinks::build(&matrix).unwrap();
        let min = links.min_column().unwrap();
        assert_eq!(min, links.header(1));
        assert_eq!(links.column_len(min), 0);
    }

    #[test]
    fn test_cover_removes_conflicting_rows() {
        let mut links = DancingLinks::build(&knuth_matrix()).unwrap();
        // column 0 holds rows 1 and 3
        links.cover(links.header(0));

        let active: Vec<_> = links.active_columns().collect();
        assert!(!active.contains(&links.header(0)));
        assert_eq!(active.len(), 6);
        assert_eq!(rows_in_column(&links, 3), vec![5]);
        assert_eq!(rows_in_column(&links, 6), vec![4, 5]);
        assert_eq!(counts(&links)[3], 1);
        assert_eq!(counts(&links)[6], 2);
        // covered column keeps its own rows
        assert_eq!(links.column_len(links.header(0)), 2);
        links.check_consistency().unwrap();
    }

    #[test]
    fn test_cover_through_element_node() {
        let mut by_header = DancingLinks::build(&knuth_matrix()).unwrap();
        let mut by_element = by_header.clone();
        let element = by_element.column_nodes(by_element.header(3)).nth(1).unwrap();

        by_header.cover(by_header.header(3));
        by_element.cover(element);
        assert_eq!(by_header, by_element);
    }

    #[test]
    fn test_cover_all_columns_solves() {
        let matrix: Matrix = "10\n01".parse().unwrap();
        let mut links = DancingLinks::build(&matrix).unwrap();
        assert!(!links.is_solved());
        links.cover(links.header(0));
        links.cover(links.header(1));
        assert!(links.is_solved());
        assert_eq!(links.min_column(), None);
    }

    #[test]
    fn test_cover_uncover_is_identity() {
        let original = DancingLinks::build(&knuth_matrix()).unwrap();
        for column in 0..7 {
            let mut links = original.clone();
            links.cover(links.header(column));
            links.uncover(links.header(column));
            assert_eq!(links, original, "column {column}");
        }
    }

    #[test]
    fn test_nested_cover_uncover_is_identity() {
        let original = DancingLinks::build(&knuth_matrix()).unwrap();
        let mut links = original.clone();
        let order = [3, 0, 5];
        for column in order {
            links.cover(links.header(column));
            links.check_consistency().unwrap();
        }
        for column in order.into_iter().rev() {
            links.uncover(links.header(column));
        }
        assert_eq!(links, original);
    }

    #[test]
    fn test_release_counts_every_node() {
        let links = DancingLinks::build(&knuth_matrix()).unwrap();
        let len = links.len();
        assert_eq!(links.release(), Ok(Released { nodes: len }));
    }

    #[test]
    fn test_release_rejects_covered_structure() {
        let mut links = DancingLinks::build(&knuth_matrix()).unwrap();
        let len = links.len();
        links.cover(links.header(0));
        let err = links.release().unwrap_err();
        assert!(matches!(
            err,
            LinkError::ReleaseMismatch { allocated, released } if allocated == len && released < len
        ));
    }

    #[test]
    fn test_consistency_detects_bad_count() {
        let mut links = DancingLinks::build(&knuth_matrix()).unwrap();
        let header = links.header(2);
        links.node_mut(header).count += 1;
        assert_eq!(
            links.check_consistency(),
            Err(LinkError::CountMismatch {
                column: 2,
                recorded: 3,
                counted: 2
            })
        );
    }

    #[test]
    fn test_consistency_detects_broken_link() {
        let mut links = DancingLinks::build(&knuth_matrix()).unwrap();
        let header = links.header(2);
        links.node_mut(header).set(Left, NodeId::ROOT);
        assert!(matches!(
            links.check_consistency(),
            Err(LinkError::BrokenRing { .. })
        ));
    }

    fn matrix_strategy() -> impl Strategy<Value = Matrix> {
        (1usize..7, 0usize..7).prop_flat_map(|(width, height)| {
            prop::collection::vec(any::<bool>(), width * height)
                .prop_map(move |cells| Matrix::new(height, width, cells).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_cover_uncover_restores_everything(
            matrix in matrix_strategy(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
        ) {
            let original = DancingLinks::build(&matrix).unwrap();
            let mut links = original.clone();
            let mut covered = Vec::new();
            for pick in picks {
                let active: Vec<_> = links.active_columns().collect();
                if active.is_empty() {
                    break;
                }
                let header = *pick.get(&active);
                links.cover(header);
                prop_assert!(links.check_consistency().is_ok());
                covered.push(header);
            }
            for header in covered.into_iter().rev() {
                links.uncover(header);
            }
            prop_assert_eq!(links, original);
        }

        #[test]
        fn prop_header_counts_equal_population(matrix in matrix_strategy()) {
            let links = DancingLinks::build(&matrix).unwrap();
            for column in 0..matrix.width() {
                prop_assert_eq!(
                    links.column_len(links.header(column)),
                    matrix.column_population(column)
                );
            }
            prop_assert!(links.check_consistency().is_ok());
        }
    }
}
