#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use meshtopo::mesh::{RawTriangle, TopologyMesh};
use meshtopo::repair::{RepairOptions, RepairPipeline};

#[derive(Arbitrary, Debug)]
struct TriangleSoup {
    triangles: Vec<[[f32; 3]; 3]>,
    nearby_tolerance: f32,
    fill_holes: bool,
}

fuzz_target!(|input: TriangleSoup| {
    if input.triangles.len() > 2048 {
        return;
    }
    if !input.nearby_tolerance.is_finite() || input.nearby_tolerance <= 0.0 {
        return;
    }
    for tri in &input.triangles {
        for v in tri {
            for c in v {
                if !c.is_finite() {
                    return;
                }
            }
        }
    }

    let raw: Vec<RawTriangle> = input
        .triangles
        .iter()
        .map(|vertices| RawTriangle {
            normal: [0.0, 0.0, 0.0],
            vertices: *vertices,
        })
        .collect();

    let mut mesh = TopologyMesh::from_raw_triangles(&raw);
    let pipeline = RepairPipeline::new(RepairOptions {
        nearby_tolerance: input.nearby_tolerance,
        fill_holes: input.fill_holes,
    });

    // Only contract under fuzzing: never panic, and if the pipeline
    // reports success, every neighbor index must be in range.
    if pipeline.run(&mut mesh).is_ok() {
        for record in mesh.neighbors() {
            for &n in &record.neighbor {
                assert!(n == -1 || (n as usize) < mesh.facet_count());
            }
        }
    }
});
