use meshtopo::mesh::{RawTriangle, TopologyMesh};
use meshtopo::repair::{RepairOptions, RepairPipeline};

fn tri(v: [[f32; 3]; 3]) -> RawTriangle {
    RawTriangle {
        normal: [0.0, 0.0, 1.0],
        vertices: v,
    }
}

fn main() {
    println!("--- Geometry Repair Example ---");

    // A broken mesh: two triangles that should share an edge but were
    // decoded with a 10-micron gap, plus a degenerate triangle.
    let mut mesh = TopologyMesh::from_raw_triangles(&[
        tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
        tri([
            [1.00001, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.00001, 0.0],
        ]),
        tri([[2.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]]),
    ]);

    println!("Original facet count: {}", mesh.facet_count());

    println!("\nRepairing...");
    let options = RepairOptions {
        nearby_tolerance: 1e-4,
        fill_holes: false,
    };
    let pipeline = RepairPipeline::new(options);
    let stats = pipeline.run(&mut mesh).expect("repair hit a fatal topology error");

    println!("Repair Report:");
    println!("  Connected edges:    {}", stats.connected_edges);
    println!("  Edges fixed:        {}", stats.edges_fixed);
    println!("  Degenerate facets:  {}", stats.degenerate_facets);
    println!("  Facets removed:     {}", stats.facets_removed);

    println!("\nFinal facet count: {}", mesh.facet_count());

    if mesh.facet_count() == 2 {
        println!("\nSUCCESS: mesh repaired correctly.");
    } else {
        println!("\nFAILURE: unexpected repair result.");
    }
}
