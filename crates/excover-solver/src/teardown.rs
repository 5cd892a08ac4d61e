//! Returning a searched structure to its built state and releasing it.

use excover_core::{DancingLinks, LinkError, Released};

use crate::{SolutionStack, search::uncover_row_mates};

/// Reconciles and releases a structure after a search.
///
/// A successful search leaves its rows covered, and covered nodes are only
/// reachable through links that cover spliced out. Teardown therefore runs in
/// two phases:
///
/// 1. Reconcile: pop every committed node, uncovering its row-mates right to
///    left and then its own column, which mirrors the search's cover order.
/// 2. Release: walk the header ring and every column ring, releasing each
///    node exactly once (see [`DancingLinks::release`]).
///
/// The stack is consumed together with the structure.
///
/// # Errors
///
/// Returns [`LinkError`] if the reconciled structure is inconsistent or the
/// release walk does not reach every node, meaning covers and stack entries
/// did not match.
///
/// # Examples
///
/// ```
/// use excover_core::{DancingLinks, Matrix};
/// use excover_solver::{Search, teardown};
///
/// let matrix: Matrix = "11\n10\n01".parse()?;
/// let mut search = Search::new(DancingLinks::build(&matrix)?);
/// assert!(search.run().is_solved());
///
/// let (links, stack, _) = search.into_parts();
/// let nodes = links.len();
/// let released = teardown(links, stack)?;
/// assert_eq!(released.nodes, nodes);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn teardown(
    mut links: DancingLinks,
    mut stack: SolutionStack,
) -> Result<Released, LinkError> {
    let committed = stack.len();
    while let Some(node) = stack.pop() {
        uncover_row_mates(&mut links, node);
        links.uncover(node);
    }
    links.check_consistency()?;

    let released = links.release()?;
    log::debug!(
        "teardown: reconciled {committed} rows, released {} nodes",
        released.nodes
    );
    Ok(released)
}
