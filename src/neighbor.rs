//! Neighbor adjacency records and the running connectivity statistics
//! maintained alongside every mutation of the mesh.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::mesh::TopologyMesh;

/// Adjacency for one facet: which facet (if any) sits across each of its
/// three edges, and which local vertex of that neighbor is not on the
/// shared edge.
///
/// `which_vertex_not[e] % 3` gives the neighbor's off-edge vertex;
/// `which_vertex_not[e] >= 3` flags that the two facets traverse the
/// shared edge in the same direction (an orientation mismatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    pub neighbor: [i32; 3],
    pub which_vertex_not: [u8; 3],
}

impl NeighborRecord {
    pub fn unmatched() -> Self {
        Self {
            neighbor: [-1, -1, -1],
            which_vertex_not: [0, 0, 0],
        }
    }

    pub fn unmatched_count(&self) -> usize {
        self.neighbor.iter().filter(|&&n| n == -1).count()
    }
}

impl Default for NeighborRecord {
    fn default() -> Self {
        Self::unmatched()
    }
}

/// Running counters over the whole mesh. Connectivity buckets are
/// cumulative and order-dependent, matching the reference algorithm's
/// bookkeeping exactly rather than a live recount; use
/// [`TopologyMesh::connectivity_histogram`] when a trustworthy "facets with
/// exactly k live edges right now" answer is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub connected_edges: u64,
    pub connected_facets_1_edge: u64,
    pub connected_facets_2_edge: u64,
    pub connected_facets_3_edge: u64,
    pub degenerate_facets: u64,
    pub facets_removed: u64,
    pub facets_added: u64,
    pub edges_fixed: u64,
    pub backwards_edges: u64,
    pub collisions: u64,
}

impl Stats {
    pub(crate) fn bump_connectivity_bucket(&mut self, unmatched: usize) {
        match unmatched {
            2 => self.connected_facets_1_edge += 1,
            1 => self.connected_facets_2_edge += 1,
            0 => self.connected_facets_3_edge += 1,
            _ => {}
        }
    }

    pub(crate) fn drop_connectivity_bucket(&mut self, unmatched: usize) {
        match unmatched {
            2 => self.connected_facets_1_edge -= 1,
            1 => self.connected_facets_2_edge -= 1,
            0 => self.connected_facets_3_edge -= 1,
            _ => {}
        }
    }
}

/// Writes mutual adjacency between `facet_a`'s edge (encoded in
/// `which_edge_a`, `0..6`) and `facet_b`'s edge, then updates the
/// connectivity buckets for both facets based on their post-write
/// unmatched-edge counts.
pub(crate) fn record_neighbors(
    neighbors: &mut [NeighborRecord],
    stats: &mut Stats,
    facet_a: u32,
    which_edge_a: u8,
    facet_b: u32,
    which_edge_b: u8,
) {
    let edge_a = (which_edge_a % 3) as usize;
    let edge_b = (which_edge_b % 3) as usize;

    let vnot_for_a = (which_edge_b + 2) % 3;
    let vnot_for_b = (which_edge_a + 2) % 3;

    let same_orientation = (which_edge_a < 3) == (which_edge_b < 3);
    let flag = if same_orientation { 3 } else { 0 };

    neighbors[facet_a as usize].neighbor[edge_a] = facet_b as i32;
    neighbors[facet_a as usize].which_vertex_not[edge_a] = vnot_for_a + flag;

    neighbors[facet_b as usize].neighbor[edge_b] = facet_a as i32;
    neighbors[facet_b as usize].which_vertex_not[edge_b] = vnot_for_b + flag;

    stats.connected_edges += 2;
    let u_a = neighbors[facet_a as usize].unmatched_count();
    stats.bump_connectivity_bucket(u_a);
    let u_b = neighbors[facet_b as usize].unmatched_count();
    stats.bump_connectivity_bucket(u_b);
}

impl TopologyMesh {
    /// Reported-not-fatal diagnostic pass: for every matched edge, checks
    /// that the neighbor's recorded orientation is consistent with the
    /// actual vertex coordinates on both sides, emitting a
    /// [`tracing::warn!`] for each mismatch rather than failing the whole
    /// operation. Always returns `Ok` unless a neighbor/vertex index is
    /// out of range.
    pub fn verify_neighbors(&mut self) -> Result<()> {
        self.stats.backwards_edges = 0;
        let facet_count = self.facets.len();
        for f in 0..facet_count {
            for e in 0..3usize {
                let g = self.neighbors[f].neighbor[e];
                if g < 0 {
                    continue;
                }
                let vnot = self.neighbors[f].which_vertex_not[e];
                let a1 = self.facets[f].vertex[e];
                let a2 = self.facets[f].vertex[(e + 1) % 3];

                let (b1, b2) = if vnot < 3 {
                    (
                        self.facets[g as usize].vertex[((vnot + 2) % 3) as usize],
                        self.facets[g as usize].vertex[((vnot + 1) % 3) as usize],
                    )
                } else {
                    self.stats.backwards_edges += 1;
                    (
                        self.facets[g as usize].vertex[((vnot + 1) % 3) as usize],
                        self.facets[g as usize].vertex[((vnot + 2) % 3) as usize],
                    )
                };

                if a1 != b1 || a2 != b2 {
                    warn!(
                        facet = f,
                        edge = e,
                        neighbor = g,
                        "neighbor orientation mismatch on shared edge"
                    );
                }
            }
        }
        Ok(())
    }
}
