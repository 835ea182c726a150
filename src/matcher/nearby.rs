//! Tolerance-based stitching: facets left with unmatched edges after the
//! exact pass are matched again using quantized vertex coordinates, and
//! the tiny coordinate gaps that match found are closed by walking each
//! affected vertex's one-ring and overwriting every facet's copy of it.

use crate::edge::{MatchMode, build_edge};
use crate::error::Result;
use crate::hash_table::EdgeTable;
use crate::mesh::{TopologyMesh, Vertex};
use crate::neighbor::record_neighbors;
use crate::walk::walk_one_ring;

struct Edge {
    facet: u32,
    which_edge: u8,
}

impl TopologyMesh {
    /// Re-matches every edge still unconnected after [`Self::check_facets_exact`]
    /// using coordinates quantized to `tolerance`-sized grid cells, then
    /// snaps the matched vertices together. A no-op if every facet is
    /// already fully connected.
    pub fn check_facets_nearby(&mut self, tolerance: f32) -> Result<()> {
        let facet_count = self.facets.len() as u64;
        if self.stats.connected_facets_1_edge == facet_count
            && self.stats.connected_facets_2_edge == facet_count
            && self.stats.connected_facets_3_edge == facet_count
        {
            return Ok(());
        }

        let min = match self.bounding_box {
            Some(bb) => Vertex {
                x: bb.min[0],
                y: bb.min[1],
                z: bb.min[2],
            },
            None => return Ok(()),
        };

        let mut table = EdgeTable::new();
        let mut dummy_shortest = f32::INFINITY;

        for i in 0..self.facets.len() {
            let v = self.facets[i].vertex;
            for j in 0u8..3 {
                if self.neighbors[i].neighbor[j as usize] != -1 {
                    continue;
                }
                let a = v[j as usize];
                let b = v[(j as usize + 1) % 3];
                let mode = MatchMode::Nearby { tolerance, min };
                if let Some(built) = build_edge(a, b, j, mode, &mut dummy_shortest) {
                    if let Some((other_facet, other_edge)) =
                        table.insert(built.key, i as i32, built.which_edge)
                    {
                        let edge_a = Edge {
                            facet: i as u32,
                            which_edge: built.which_edge,
                        };
                        let edge_b = Edge {
                            facet: other_facet as u32,
                            which_edge: other_edge,
                        };
                        record_neighbors(
                            &mut self.neighbors,
                            &mut self.stats,
                            edge_a.facet,
                            edge_a.which_edge,
                            edge_b.facet,
                            edge_b.which_edge,
                        );
                        self.stitch_matched_edge(&edge_a, &edge_b)?;
                        self.stats.edges_fixed += 2;
                    }
                }
            }
        }

        table.assert_balanced();
        self.stats.collisions += table.collisions;
        Ok(())
    }

    /// Picks, for each of the matched edge's two vertex pairs, which
    /// facet's copy should move to the other's position (preferring a
    /// facet whose corresponding vertex has no other connected edges),
    /// then walks that vertex's one-ring overwriting every copy. Fails
    /// with [`crate::error::TopologyError::MobiusOneRing`] if either
    /// one-ring closes back on its start facet without ever crossing an
    /// unmatched edge.
    fn stitch_matched_edge(&mut self, edge_a: &Edge, edge_b: &Edge) -> Result<()> {
        let (v1a, v2a) = edge_pair(edge_a.which_edge);
        let (v1b, v2b) = edge_pair(edge_b.which_edge);

        if let Some((facet, vertex, new_vertex)) =
            self.pick_vertex_to_change(edge_a.facet, v1a, edge_b.facet, v1b)
        {
            let mut vnot = if facet == edge_a.facet {
                (edge_a.which_edge + 2) % 3
            } else {
                (edge_b.which_edge + 2) % 3
            };
            if (vnot + 2) % 3 == vertex {
                vnot += 3;
            }
            self.change_vertices(facet, vnot, new_vertex)?;
        }

        if let Some((facet, vertex, new_vertex)) =
            self.pick_vertex_to_change(edge_a.facet, v2a, edge_b.facet, v2b)
        {
            let mut vnot = if facet == edge_a.facet {
                (edge_a.which_edge + 2) % 3
            } else {
                (edge_b.which_edge + 2) % 3
            };
            if (vnot + 2) % 3 == vertex {
                vnot += 3;
            }
            self.change_vertices(facet, vnot, new_vertex)?;
        }

        Ok(())
    }

    fn pick_vertex_to_change(
        &self,
        facet_a: u32,
        va: u8,
        facet_b: u32,
        vb: u8,
    ) -> Option<(u32, u8, Vertex)> {
        let pa = self.facets[facet_a as usize].vertex[va as usize];
        let pb = self.facets[facet_b as usize].vertex[vb as usize];
        if pa == pb {
            return None;
        }

        let a_free = self.neighbors[facet_a as usize].neighbor[va as usize] == -1
            && self.neighbors[facet_a as usize].neighbor[((va + 2) % 3) as usize] == -1;

        if a_free {
            Some((facet_a, va, pb))
        } else {
            Some((facet_b, vb, pa))
        }
    }

    /// Overwrites the vertex identified by `vnot` (the off-edge vertex of
    /// the edge just crossed, possibly carrying the orientation flag) with
    /// `new_vertex` on every facet sharing it, by walking the one-ring.
    /// Collects the visit list before writing so the walk's read-only
    /// borrow of `self.neighbors` is released before any facet is mutated.
    fn change_vertices(&mut self, facet_num: u32, vnot: u8, new_vertex: Vertex) -> Result<()> {
        let mut visits = Vec::new();
        walk_one_ring(&self.neighbors, facet_num, vnot, |facet, pivot| {
            visits.push((facet, pivot));
        })?;

        for (facet, pivot) in visits {
            self.facets[facet as usize].vertex[pivot as usize] = new_vertex;
        }
        Ok(())
    }
}

fn edge_pair(which_edge: u8) -> (u8, u8) {
    if which_edge < 3 {
        (which_edge, (which_edge + 1) % 3)
    } else {
        let v2 = which_edge % 3;
        let v1 = (which_edge + 1) % 3;
        (v1, v2)
    }
}
