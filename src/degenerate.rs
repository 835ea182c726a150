//! Degenerate-facet detection, swap-remove with back-pointer rewriting,
//! and the unconnected-facet sweep.

use crate::error::{Result, TopologyError};
use crate::mesh::TopologyMesh;

impl TopologyMesh {
    /// Swap-removes facet `facet_number`, moving the last facet into its
    /// slot and rewriting the back-pointers of whatever that moved facet
    /// was connected to. Returns [`TopologyError::BrokenBackPointer`] if a
    /// neighbor's back-pointer didn't already point where this invariant
    /// requires — the Rust equivalent of the reference implementation's
    /// fatal consistency check.
    pub fn remove_facet(&mut self, facet_number: u32) -> Result<()> {
        let idx = facet_number as usize;
        self.stats.facets_removed += 1;

        let unmatched = self.neighbors[idx].unmatched_count();
        match unmatched {
            2 => self.stats.connected_facets_1_edge -= 1,
            1 => {
                self.stats.connected_facets_2_edge -= 1;
                self.stats.connected_facets_1_edge -= 1;
            }
            0 => {
                self.stats.connected_facets_3_edge -= 1;
                self.stats.connected_facets_2_edge -= 1;
                self.stats.connected_facets_1_edge -= 1;
            }
            _ => {}
        }

        let last = self.facets.len() - 1;
        self.facets[idx] = self.facets[last];
        self.neighbors[idx] = self.neighbors[last];
        self.facets.pop();
        self.neighbors.pop();
        let new_count = self.facets.len() as u32;

        let moved = self.neighbors[idx];
        for edge in 0..3usize {
            let neighbor = moved.neighbor[edge];
            if neighbor < 0 {
                continue;
            }
            let vnot = moved.which_vertex_not[edge];
            let back_slot = ((vnot + 1) % 3) as usize;
            let found = self.neighbors[neighbor as usize].neighbor[back_slot];
            if found != new_count as i32 {
                return Err(TopologyError::BrokenBackPointer {
                    facet: neighbor as u32,
                    expected: new_count,
                    found,
                });
            }
            self.neighbors[neighbor as usize].neighbor[back_slot] = facet_number as i32;
        }
        Ok(())
    }

    /// Removes a facet with two bit-equal vertices, splicing its two
    /// surviving neighbors directly together so the hole it leaves behind
    /// closes up rather than opening a gap.
    pub fn remove_degenerate(&mut self, facet: u32) -> Result<()> {
        let idx = facet as usize;
        let v = self.facets[idx].vertex;

        if v[0] == v[1] && v[1] == v[2] {
            return self.remove_facet(facet);
        }

        let (edge1, edge2, edge3) = if v[0] == v[1] {
            (1usize, 2usize, 0usize)
        } else if v[1] == v[2] {
            (0usize, 2usize, 1usize)
        } else if v[2] == v[0] {
            (0usize, 1usize, 2usize)
        } else {
            return Ok(());
        };

        let neighbor1 = self.neighbors[idx].neighbor[edge1];
        let neighbor2 = self.neighbors[idx].neighbor[edge2];
        let neighbor3 = self.neighbors[idx].neighbor[edge3];
        let vnot1 = self.neighbors[idx].which_vertex_not[edge1];
        let vnot2 = self.neighbors[idx].which_vertex_not[edge2];
        let vnot3 = self.neighbors[idx].which_vertex_not[edge3];

        if neighbor1 == -1 && neighbor2 != -1 {
            self.update_connects_remove_1(neighbor2 as u32);
        }
        if neighbor2 == -1 && neighbor1 != -1 {
            self.update_connects_remove_1(neighbor1 as u32);
        }

        match (neighbor1, neighbor2) {
            (n1, n2) if n1 >= 0 && n2 >= 0 => {
                let slot1 = ((vnot1 + 1) % 3) as usize;
                let slot2 = ((vnot2 + 1) % 3) as usize;
                self.neighbors[n1 as usize].neighbor[slot1] = n2;
                self.neighbors[n1 as usize].which_vertex_not[slot1] = vnot2;
                self.neighbors[n2 as usize].neighbor[slot2] = n1;
                self.neighbors[n2 as usize].which_vertex_not[slot2] = vnot1;
            }
            (n1, -1) if n1 >= 0 => {
                let slot1 = ((vnot1 + 1) % 3) as usize;
                self.neighbors[n1 as usize].neighbor[slot1] = -1;
            }
            (-1, n2) if n2 >= 0 => {
                let slot2 = ((vnot2 + 1) % 3) as usize;
                self.neighbors[n2 as usize].neighbor[slot2] = -1;
            }
            _ => {}
        }

        // `remove_facet` may relocate the last facet into `facet`'s slot;
        // if neighbor3 is that relocated facet, its index changes to
        // `facet`. Recompute rather than reuse the pre-removal value.
        let last_before_pop = self.facets.len() - 1;
        self.remove_facet(facet)?;

        if neighbor3 != -1 {
            let neighbor3_now = if neighbor3 as usize == last_before_pop {
                facet
            } else {
                neighbor3 as u32
            };
            self.update_connects_remove_1(neighbor3_now);
            let slot3 = ((vnot3 + 1) % 3) as usize;
            self.neighbors[neighbor3_now as usize].neighbor[slot3] = -1;
        }

        Ok(())
    }

    fn update_connects_remove_1(&mut self, facet: u32) {
        let unmatched = self.neighbors[facet as usize].unmatched_count();
        self.stats.drop_connectivity_bucket(unmatched);
    }

    /// Removes any degenerate facets `check_facets_nearby`'s vertex
    /// stitching may have produced, then removes any facet left with no
    /// matched edges at all.
    pub fn remove_unconnected_facets(&mut self) -> Result<()> {
        let mut i = 0usize;
        while i < self.facets.len() {
            let v = self.facets[i].vertex;
            if v[0] == v[1] || v[1] == v[2] || v[0] == v[2] {
                self.remove_degenerate(i as u32)?;
                continue;
            }
            i += 1;
        }

        if self.stats.connected_facets_1_edge < self.facets.len() as u64 {
            let mut i = 0usize;
            while i < self.facets.len() {
                if self.neighbors[i].neighbor == [-1, -1, -1] {
                    self.remove_facet(i as u32)?;
                    continue;
                }
                i += 1;
            }
        }
        Ok(())
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
    fn remove_degenerate_with_no_neighbors_just_removes() {
        let mut mesh = TopologyMesh::from_raw_triangles(&[
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]),
        ]);
        mesh.remove_degenerate(1).unwrap();
        assert_eq!(mesh.facet_count(), 1);
    }
}
