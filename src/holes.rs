//! Closes remaining holes by fanning a new triangle across each boundary
//! edge still unmatched once exact and nearby stitching have run.

use crate::edge::{MatchMode, build_edge};
use crate::error::{Result, TopologyError};
use crate::hash_table::EdgeTable;
use crate::mesh::{Facet, TopologyMesh, Vertex};
use crate::neighbor::record_neighbors;
use crate::walk::step;

/// Supplies the normal for a facet synthesized while filling a hole.
/// [`IdentityNormals`] leaves it zeroed, matching loaders that recompute
/// normals from winding order after repair rather than trusting a stored
/// value.
pub trait NormalFixer {
    fn normal_for(&self, vertices: [Vertex; 3]) -> Vertex;
}

pub struct IdentityNormals;

impl NormalFixer for IdentityNormals {
    fn normal_for(&self, _vertices: [Vertex; 3]) -> Vertex {
        Vertex::default()
    }
}

impl TopologyMesh {
    /// Fills every remaining hole by, for each still-unmatched edge,
    /// walking around the boundary until another unmatched edge closes
    /// the loop and emitting one new facet per step of that walk. New
    /// facets are matched back into the edge table as they're created so
    /// later fans can terminate against them. Fails with
    /// [`TopologyError::MobiusOneRing`] if a boundary walk closes back on
    /// its own starting facet without ever crossing an unmatched edge.
    pub fn fill_holes(&mut self, normals: &impl NormalFixer) -> Result<()> {
        let mut table = EdgeTable::new();
        let mut dummy_shortest = f32::INFINITY;

        let initial_facet_count = self.facets.len();
        for i in 0..initial_facet_count {
            let v = self.facets[i].vertex;
            for j in 0u8..3 {
                if self.neighbors[i].neighbor[j as usize] != -1 {
                    continue;
                }
                let a = v[j as usize];
                let b = v[(j as usize + 1) % 3];
                if let Some(built) = build_edge(a, b, j, MatchMode::Exact, &mut dummy_shortest) {
                    if let Some((other_facet, other_edge)) =
                        table.insert(built.key, i as i32, built.which_edge)
                    {
                        record_neighbors(
                            &mut self.neighbors,
                            &mut self.stats,
                            i as u32,
                            built.which_edge,
                            other_facet as u32,
                            other_edge,
                        );
                    }
                }
            }
        }

        for i in 0..initial_facet_count {
            for j in 0u8..3 {
                if self.neighbors[i].neighbor[j as usize] != -1 {
                    continue;
                }
                self.fill_one_boundary(i as u32, j, &mut table, &mut dummy_shortest, normals)?;
            }
        }

        self.stats.collisions += table.collisions;
        Ok(())
    }

    fn fill_one_boundary(
        &mut self,
        start_facet: u32,
        start_edge: u8,
        table: &mut EdgeTable,
        dummy_shortest: &mut f32,
        normals: &impl NormalFixer,
    ) -> Result<()> {
        let first_facet = start_facet;
        let v0 = self.facets[start_facet as usize].vertex[start_edge as usize];
        let v1 = self.facets[start_facet as usize].vertex[(start_edge as usize + 1) % 3];

        let mut direction = false;
        let mut vnot = (start_edge + 2) % 3;
        let mut facet = start_facet;

        loop {
            let (_pivot, next_edge, new_direction) = step(vnot, direction);
            direction = new_direction;
            let next_facet = self.neighbors[facet as usize].neighbor[next_edge as usize];

            if next_facet < 0 {
                let v2 = self.facets[facet as usize].vertex[(vnot % 3) as usize];
                let normal = normals.normal_for([v0, v1, v2]);
                let new_facet = Facet {
                    normal,
                    vertex: [v0, v1, v2],
                };
                let new_index = self.push_facet(new_facet);

                for k in 0u8..3 {
                    let a = self.facets[new_index as usize].vertex[k as usize];
                    let b = self.facets[new_index as usize].vertex[(k as usize + 1) % 3];
                    if let Some(built) =
                        build_edge(a, b, k, MatchMode::Exact, dummy_shortest)
                    {
                        if let Some((other_facet, other_edge)) =
                            table.insert(built.key, new_index as i32, built.which_edge)
                        {
                            record_neighbors(
                                &mut self.neighbors,
                                &mut self.stats,
                                new_index,
                                built.which_edge,
                                other_facet as u32,
                                other_edge,
                            );
                        }
                    }
                }
                return Ok(());
            }

            let next_vnot = self.neighbors[facet as usize].which_vertex_not[next_edge as usize];
            facet = next_facet as u32;
            vnot = next_vnot;

            if facet == first_facet {
                return Err(TopologyError::MobiusOneRing {
                    start_facet: first_facet,
                });
            }
        }
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
    fn fills_a_single_triangular_hole() {
        // Three facets forming an open fan around a center point, missing
        // the facet that would close the loop.
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]]),
        ]);
        mesh.check_facets_exact().unwrap();
        let before = mesh.facet_count();
        mesh.fill_holes(&IdentityNormals).unwrap();
        assert!(mesh.facet_count() > before);
    }

    #[test]
    fn fill_holes_rejects_a_boundary_walk_that_closes_on_itself() {
        use crate::error::TopologyError;

        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[5.0, 5.0, 5.0], [6.0, 5.0, 5.0], [5.0, 6.0, 5.0]]),
        ]);
        mesh.neighbors[0].neighbor = [1, -1, -1];
        mesh.neighbors[0].which_vertex_not = [0, 0, 0];
        mesh.neighbors[1].neighbor = [0, -1, -1];
        mesh.neighbors[1].which_vertex_not = [0, 0, 0];

        let err = mesh.fill_holes(&IdentityNormals).unwrap_err();
        assert_eq!(err, TopologyError::MobiusOneRing { start_facet: 0 });
    }
}
