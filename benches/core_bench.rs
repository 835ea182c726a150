use criterion::{Criterion, criterion_group, criterion_main};
use meshtopo::mesh::{RawTriangle, TopologyMesh};

fn fan_mesh(n: usize) -> Vec<RawTriangle> {
    let mut triangles = Vec::with_capacity(n);
    for i in 0..n {
        let a0 = (i as f32) * std::f32::consts::TAU / (n as f32 + 1.0);
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / (n as f32 + 1.0);
        triangles.push(RawTriangle {
            normal: [0.0, 0.0, 1.0],
            vertices: [
                [0.0, 0.0, 0.0],
                [10.0 * a0.cos(), 10.0 * a0.sin(), 0.0],
                [10.0 * a1.cos(), 10.0 * a1.sin(), 0.0],
            ],
        });
    }
    triangles
}

fn bench_core(c: &mut Criterion) {
    for &n in &[100usize, 1_000, 10_000] {
        let triangles = fan_mesh(n);

        c.bench_function(&format!("check_facets_exact/{n}"), |b| {
            b.iter(|| {
                let mut mesh = TopologyMesh::from_raw_triangles(&triangles);
                mesh.check_facets_exact().unwrap();
            })
        });

        c.bench_function(&format!("check_facets_exact_then_nearby/{n}"), |b| {
            b.iter(|| {
                let mut mesh = TopologyMesh::from_raw_triangles(&triangles);
                mesh.check_facets_exact().unwrap();
                mesh.check_facets_nearby(1e-4).unwrap();
            })
        });
    }
}

criterion_group!(benches, bench_core);
criterion_main!(benches);
