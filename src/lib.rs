//! # meshtopo
//!
//! Rebuilds and repairs the adjacency graph of a triangulated surface mesh:
//! given an unordered array of independent triangles, it reconstructs which
//! triangle shares which edge with which, detects and fixes the defects
//! that arise from floating-point drift, duplicate/degenerate triangles,
//! and honest holes, and maintains mesh-wide statistics along the way.
//!
//! ## Quick Start
//!
//! ```
//! use meshtopo::mesh::{RawTriangle, TopologyMesh};
//! use meshtopo::repair::{RepairOptions, RepairPipeline};
//!
//! # fn main() {
//! let triangles = [
//!     RawTriangle { normal: [0.0, 0.0, 1.0], vertices: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] },
//!     RawTriangle { normal: [0.0, 0.0, 1.0], vertices: [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] },
//! ];
//! let mut mesh = TopologyMesh::from_raw_triangles(&triangles);
//!
//! let pipeline = RepairPipeline::new(RepairOptions::default());
//! let stats = pipeline.run(&mut mesh).expect("repair should not hit a fatal topology error");
//! assert_eq!(stats.connected_edges, 2);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`edge`]: canonical edge-key construction, shared by both matching passes.
//! - [`hash_table`]: the fixed-size chained hash table edges are matched through.
//! - [`neighbor`]: adjacency records, running statistics, and the non-fatal
//!   `verify_neighbors` diagnostic pass.
//! - [`walk`]: the pivot-walk state machine shared by vertex stitching and hole filling.
//! - [`mesh`]: the mesh value type itself ([`mesh::TopologyMesh`]) and its vertex/facet types.
//! - [`degenerate`]: swap-remove, degenerate-facet splicing, and the unconnected sweep.
//! - [`matcher`]: the exact and nearby matching passes.
//! - [`holes`]: fan-walk hole closure.
//! - [`repair`]: the documented default pipeline wiring the stages together.
//! - [`error`]: the crate's typed error, [`error::TopologyError`].
//!
//! ## Design Principles
//!
//! - **No panics on mesh data**: malformed or hostile triangle soups produce
//!   [`error::TopologyError`], never a panic. Internal consistency violations
//!   (a back-pointer that doesn't point where the invariant says it must) are
//!   also surfaced as errors rather than corrupting the mesh silently.
//! - **Pass-scoped hash table**: the edge table is a scratch resource for a
//!   single pass; it never outlives the function that constructed it.
//! - **Cumulative stats, recomputed histograms**: the running counters
//!   reproduce the source algorithm's cumulative bookkeeping exactly (useful
//!   for parity testing); [`mesh::TopologyMesh::connectivity_histogram`] is the
//!   place to go for a trustworthy live count.

pub mod degenerate;
pub mod edge;
pub mod error;
pub mod hash_table;
pub mod holes;
pub mod matcher;
pub mod mesh;
pub mod neighbor;
pub mod repair;
pub mod walk;

pub use error::{Result, TopologyError};
pub use mesh::{BoundingBox, Facet, RawTriangle, TopologyMesh, Vertex};
pub use neighbor::{NeighborRecord, Stats};
pub use repair::{RepairOptions, RepairPipeline};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holes::IdentityNormals;

    fn tri(v: [[f32; 3]; 3]) -> RawTriangle {
        RawTriangle {
            normal: [0.0, 0.0, 1.0],
            vertices: v,
        }
    }

    #[test]
    fn end_to_end_pipeline_on_a_tetrahedron() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
            tri([[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]),
        ]);

        let pipeline = RepairPipeline::new(RepairOptions::default());
        let stats = pipeline.run(&mut mesh).unwrap();

        assert_eq!(mesh.facet_count(), 4);
        assert_eq!(stats.connected_edges, 12);
        let (one, two, three) = mesh.connectivity_histogram();
        assert_eq!((one, two, three), (0, 0, 4));
    }

    #[test]
    fn hole_fill_is_idempotent() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]]),
        ]);
        mesh.check_facets_exact().unwrap();
        mesh.fill_holes(&IdentityNormals).unwrap();
        let after_first = mesh.facet_count();
        mesh.fill_holes(&IdentityNormals).unwrap();
        assert_eq!(mesh.facet_count(), after_first);
    }

    #[test]
    fn degenerate_facet_on_an_otherwise_clean_mesh_is_removed() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[2.0, 2.0, 2.0], [2.0, 2.0, 2.0], [3.0, 2.0, 2.0]]),
        ]);
        mesh.check_facets_exact().unwrap();
        assert_eq!(mesh.stats.degenerate_facets, 1);
        assert_eq!(mesh.facet_count(), 2);
    }
}
