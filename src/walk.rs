//! The pivot-walk state machine shared by vertex stitching and hole
//! filling: both operations need to circle a vertex's one-ring of facets,
//! crossing matched edges and flipping a direction bit whenever an edge's
//! orientation-mismatch flag is set.

use crate::error::{Result, TopologyError};
use crate::neighbor::NeighborRecord;

/// One step of the walk. `vnot` is the "vertex not on the crossed edge"
/// value (possibly carrying the `+3` orientation flag) inherited from the
/// previous step; `direction` is the carried orientation bit. Returns the
/// local vertex index being visited this step (`pivot`), the local edge to
/// cross next, and the direction bit to carry into the following step.
pub fn step(vnot: u8, direction: bool) -> (u8, u8, bool) {
    if vnot <= 2 {
        if !direction {
            let pivot = (vnot + 1) % 3;
            (pivot, vnot, false)
        } else {
            let pivot = (vnot + 2) % 3;
            (pivot, pivot, true)
        }
    } else {
        let v = vnot % 3;
        if !direction {
            let pivot = (v + 2) % 3;
            (pivot, pivot, true)
        } else {
            let pivot = (v + 1) % 3;
            (pivot, v, false)
        }
    }
}

/// Walks the one-ring starting at `start_facet`'s vertex identified by
/// `start_vnot`, invoking `visit(facet, pivot_vertex)` at each step before
/// crossing to the next facet. Stops cleanly when an unmatched edge
/// (`neighbor == -1`) is reached; returns [`TopologyError::MobiusOneRing`]
/// if the walk instead closes back on `start_facet` without ever finding
/// one.
pub fn walk_one_ring(
    neighbors: &[NeighborRecord],
    start_facet: u32,
    start_vnot: u8,
    mut visit: impl FnMut(u32, u8),
) -> Result<()> {
    let mut direction = false;
    let mut vnot = start_vnot;
    let mut facet = start_facet;

    loop {
        let (pivot, next_edge, new_direction) = step(vnot, direction);
        visit(facet, pivot);
        direction = new_direction;

        let next_facet = neighbors[facet as usize].neighbor[next_edge as usize];
        let next_vnot = neighbors[facet as usize].which_vertex_not[next_edge as usize];

        if next_facet < 0 {
            return Ok(());
        }
        if next_facet as u32 == start_facet {
            return Err(TopologyError::MobiusOneRing {
                start_facet,
            });
        }
        facet = next_facet as u32;
        vnot = next_vnot;
    }
}
