use crate::edge::{MatchMode, build_edge};
use crate::error::Result;
use crate::hash_table::EdgeTable;
use crate::mesh::TopologyMesh;
use crate::neighbor::{NeighborRecord, record_neighbors};

impl TopologyMesh {
    /// Builds the neighbor graph from scratch: an edge matches only when
    /// all three coordinates of both endpoints are bit-equal. Degenerate
    /// facets (two bit-equal vertices) are detected and removed inline, as
    /// the reference algorithm does, rather than deferred to a later pass.
    pub fn check_facets_exact(&mut self) -> Result<()> {
        self.stats.connected_edges = 0;
        self.stats.connected_facets_1_edge = 0;
        self.stats.connected_facets_2_edge = 0;
        self.stats.connected_facets_3_edge = 0;
        self.stats.collisions = 0;

        for record in self.neighbors.iter_mut() {
            *record = NeighborRecord::unmatched();
        }

        let mut table = EdgeTable::new();

        let mut i = 0usize;
        while i < self.facets.len() {
            let v = self.facets[i].vertex;
            if v[0] == v[1] || v[1] == v[2] || v[0] == v[2] {
                self.stats.degenerate_facets += 1;
                self.remove_facet(i as u32)?;
                continue;
            }

            for j in 0u8..3 {
                let a = v[j as usize];
                let b = v[(j as usize + 1) % 3];
                if let Some(built) =
                    build_edge(a, b, j, MatchMode::Exact, &mut self.shortest_edge)
                {
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
            i += 1;
        }

        table.assert_balanced();
        self.stats.collisions += table.collisions;
        Ok(())
    }
}
