//! The mesh itself: vertices embedded directly in each facet (no shared
//! vertex array), the parallel neighbor-adjacency array, and the bounding
//! box/statistics carried alongside.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::neighbor::{NeighborRecord, Stats};

/// A single point in 3D space. Equality is bitwise, matching the exact
/// pass's matching rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<glam::Vec3> for Vertex {
    fn from(v: glam::Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vertex> for glam::Vec3 {
    fn from(v: Vertex) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// A triangular facet: a nominal normal plus its three vertices, stored
/// inline rather than as indices into a shared vertex array. This mirrors
/// the source format's per-facet layout and is what lets the edge
/// canonicalizer key directly off raw vertex bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub normal: Vertex,
    pub vertex: [Vertex; 3],
}

/// The minimal shape a loader (STL, 3MF, or any other format) hands to
/// this crate: a decoded facet with no shared-vertex bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTriangle {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// The mesh under repair: facets, their parallel neighbor records, running
/// statistics, and the geometric bounds an external loader would already
/// have computed.
#[derive(Debug, Clone)]
pub struct TopologyMesh {
    pub(crate) facets: Vec<Facet>,
    pub(crate) neighbors: Vec<NeighborRecord>,
    pub stats: Stats,
    pub bounding_box: Option<BoundingBox>,
    pub(crate) shortest_edge: f32,
}

impl TopologyMesh {
    /// Builds a mesh from facets already decoded by an external loader.
    /// Computes the bounding box over all vertices and seeds
    /// `shortest_edge` at `f32::INFINITY` so the first exact pass can only
    /// lower it.
    pub fn from_raw_triangles(raw: &[RawTriangle]) -> Self {
        let facets: Vec<Facet> = raw
            .iter()
            .map(|t| Facet {
                normal: Vertex {
                    x: t.normal[0],
                    y: t.normal[1],
                    z: t.normal[2],
                },
                vertex: [
                    Vertex {
                        x: t.vertices[0][0],
                        y: t.vertices[0][1],
                        z: t.vertices[0][2],
                    },
                    Vertex {
                        x: t.vertices[1][0],
                        y: t.vertices[1][1],
                        z: t.vertices[1][2],
                    },
                    Vertex {
                        x: t.vertices[2][0],
                        y: t.vertices[2][1],
                        z: t.vertices[2][2],
                    },
                ],
            })
            .collect();

        let bounding_box = compute_bounding_box(&facets);
        let neighbors = vec![NeighborRecord::unmatched(); facets.len()];

        Self {
            facets,
            neighbors,
            stats: Stats::default(),
            bounding_box,
            shortest_edge: f32::INFINITY,
        }
    }

    /// Convenience constructor for the common case of indexed vertex/
    /// triangle arrays, validating every index before denormalizing into
    /// the facet-owns-its-vertices representation the topology engine
    /// operates on.
    pub fn from_indexed(vertices: &[[f32; 3]], triangles: &[[u32; 3]]) -> Result<Self> {
        let mut raw = Vec::with_capacity(triangles.len());
        for (i, tri) in triangles.iter().enumerate() {
            let mut verts = [[0.0f32; 3]; 3];
            for (k, &idx) in tri.iter().enumerate() {
                let v = vertices
                    .get(idx as usize)
                    .ok_or(TopologyError::VertexIndexOutOfRange {
                        facet: i as u32,
                        local_vertex: k as u8,
                        index: idx,
                        vertex_count: vertices.len() as u32,
                    })?;
                verts[k] = *v;
            }
            raw.push(RawTriangle {
                normal: [0.0, 0.0, 0.0],
                vertices: verts,
            });
        }
        Ok(Self::from_raw_triangles(&raw))
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn neighbors(&self) -> &[NeighborRecord] {
        &self.neighbors
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Shortest edge length seen by the most recent [`Self::check_facets_exact`]
    /// pass. `f32::INFINITY` if no pass has run yet.
    pub fn shortest_edge(&self) -> f32 {
        self.shortest_edge
    }

    /// Recomputes, directly from the neighbor array, how many facets
    /// currently have exactly 1, 2, or 3 matched edges. Unlike
    /// `stats.connected_facets_*_edge` (cumulative and order-dependent),
    /// this is always accurate for the mesh's current state.
    pub fn connectivity_histogram(&self) -> (u64, u64, u64) {
        let mut histogram = (0u64, 0u64, 0u64);
        for record in &self.neighbors {
            match record.unmatched_count() {
                2 => histogram.0 += 1,
                1 => histogram.1 += 1,
                0 => histogram.2 += 1,
                _ => {}
            }
        }
        histogram
    }

    pub(crate) fn push_facet(&mut self, facet: Facet) -> u32 {
        self.facets.push(facet);
        self.neighbors.push(NeighborRecord::unmatched());
        self.stats.facets_added += 1;
        (self.facets.len() - 1) as u32
    }
}

fn compute_bounding_box(facets: &[Facet]) -> Option<BoundingBox> {
    if facets.is_empty() {
        return None;
    }

    let initial = (
        f32::INFINITY,
        f32::INFINITY,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NEG_INFINITY,
        f32::NEG_INFINITY,
    );

    #[cfg(feature = "parallel")]
    let (min_x, min_y, min_z, max_x, max_y, max_z) = {
        use rayon::prelude::*;
        facets
            .par_iter()
            .fold(
                || initial,
                |acc, f| fold_facet_bounds(acc, f),
            )
            .reduce(|| initial, reduce_bounds)
    };

    #[cfg(not(feature = "parallel"))]
    let (min_x, min_y, min_z, max_x, max_y, max_z) = facets
        .iter()
        .fold(initial, |acc, f| fold_facet_bounds(acc, f));

    Some(BoundingBox {
        min: [min_x, min_y, min_z],
        max: [max_x, max_y, max_z],
    })
}

type Bounds6 = (f32, f32, f32, f32, f32, f32);

fn fold_facet_bounds(acc: Bounds6, facet: &Facet) -> Bounds6 {
    facet.vertex.iter().fold(acc, |acc, v| {
        (
            acc.0.min(v.x),
            acc.1.min(v.y),
            acc.2.min(v.z),
            acc.3.max(v.x),
            acc.4.max(v.y),
            acc.5.max(v.z),
        )
    })
}

fn reduce_bounds(a: Bounds6, b: Bounds6) -> Bounds6 {
    (
        a.0.min(b.0),
        a.1.min(b.1),
        a.2.min(b.2),
        a.3.max(b.3),
        a.4.max(b.4),
        a.5.max(b.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(v: [[f32; 3]; 3]) -> RawTriangle {
        RawTriangle {
            normal: [0.0, 0.0, 1.0],
            vertices: v,
        }
    }

    #[test]
    fn bounding_box_covers_all_vertices() {
        let mesh = TopologyMesh::from_raw_triangles(&[tri([
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 3.0, 0.0],
        ])]);
        let bb = mesh.bounding_box.unwrap();
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [2.0, 3.0, 0.0]);
    }

    #[test]
    fn from_indexed_rejects_out_of_range_vertex() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let triangles = [[0u32, 1, 5]];
        let err = TopologyMesh::from_indexed(&vertices, &triangles).unwrap_err();
        assert!(matches!(err, TopologyError::VertexIndexOutOfRange { .. }));
    }
}
