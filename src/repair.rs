//! The documented default pipeline: exact match, optional nearby match,
//! verify, remove unconnected/degenerate facets, optional hole fill.
//! Each stage remains independently callable on [`TopologyMesh`] for
//! callers who need a different order.

use tracing::info_span;

use crate::error::Result;
use crate::holes::{IdentityNormals, NormalFixer};
use crate::mesh::TopologyMesh;
use crate::neighbor::Stats;

/// Tunables for [`RepairPipeline`]. Mirrors the shape of a loader-supplied
/// options struct: plain data, no global or file-backed configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairOptions {
    /// Grid cell size for the tolerance-based nearby match pass.
    pub nearby_tolerance: f32,
    /// Whether to run the hole-filling stage after cleanup.
    pub fill_holes: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            nearby_tolerance: 1e-4,
            fill_holes: false,
        }
    }
}

/// Runs the documented stage order over a mesh: exact → nearby → verify →
/// remove unconnected → (optional) fill holes.
pub struct RepairPipeline {
    pub options: RepairOptions,
}

impl RepairPipeline {
    pub fn new(options: RepairOptions) -> Self {
        Self { options }
    }

    /// Runs every stage in order and returns the mesh's statistics as they
    /// stand once the pipeline completes. Uses [`IdentityNormals`] for any
    /// facet synthesized by hole filling; callers who need real normal
    /// recomputation should call the stages individually with their own
    /// [`NormalFixer`].
    pub fn run(&self, mesh: &mut TopologyMesh) -> Result<Stats> {
        self.run_with_normals(mesh, &IdentityNormals)
    }

    pub fn run_with_normals(
        &self,
        mesh: &mut TopologyMesh,
        normals: &impl NormalFixer,
    ) -> Result<Stats> {
        {
            let _span = info_span!("check_facets_exact").entered();
            mesh.check_facets_exact()?;
        }
        {
            let _span = info_span!("check_facets_nearby", tolerance = self.options.nearby_tolerance).entered();
            mesh.check_facets_nearby(self.options.nearby_tolerance)?;
        }
        {
            let _span = info_span!("verify_neighbors").entered();
            mesh.verify_neighbors()?;
        }
        {
            let _span = info_span!("remove_unconnected_facets").entered();
            mesh.remove_unconnected_facets()?;
        }
        if self.options.fill_holes {
            let _span = info_span!("fill_holes").entered();
            mesh.fill_holes(normals)?;
        }
        Ok(mesh.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::RawTriangle;

    fn tri(v: [[f32; 3]; 3]) -> RawTriangle {
        RawTriangle {
            normal: [0.0, 0.0, 1.0],
            vertices: v,
        }
    }

    #[test]
    fn pipeline_connects_a_clean_pair_of_triangles() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
        ]);
        let pipeline = RepairPipeline::new(RepairOptions::default());
        let stats = pipeline.run(&mut mesh).unwrap();
        assert_eq!(stats.connected_edges, 2);
    }

    #[test]
    fn pipeline_fills_holes_when_requested() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]]),
        ]);
        let options = RepairOptions {
            fill_holes: true,
            ..RepairOptions::default()
        };
        let pipeline = RepairPipeline::new(options);
        let before = mesh.facet_count();
        pipeline.run(&mut mesh).unwrap();
        assert!(mesh.facet_count() > before);
    }
}
