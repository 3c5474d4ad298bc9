//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{StlEncoding, decode_stl, encode_ascii, encode_binary, save_parts};
use mesh_types::{IndexedMesh, Mesh, Point3};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Closed torus, the shape of a looped neon tube.
///
/// `rings × sides × 2` triangles.
fn create_torus(major: f64, minor: f64, rings: usize, sides: usize) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    let tau = std::f64::consts::TAU;

    #[allow(clippy::cast_precision_loss)]
    let loops: Vec<Vec<u32>> = (0..rings)
        .map(|i| {
            let u = tau * i as f64 / rings as f64;
            let (su, cu) = u.sin_cos();
            mesh.add_ring((0..sides).map(|j| {
                let v = tau * j as f64 / sides as f64;
                let r = minor.mul_add(v.cos(), major);
                Point3::new(r * cu, r * su, minor * v.sin())
            }))
        })
        .collect();

    for i in 0..rings {
        mesh.connect_rings(&loops[i], &loops[(i + 1) % rings]);
    }
    mesh
}

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_stl(c: &mut Criterion) {
    let mut group = c.benchmark_group("STL");

    let torus = Mesh::from_indexed("torus", &create_torus(40.0, 6.0, 96, 24)); // 4608 triangles
    let binary = encode_binary(&torus).expect("failed to encode STL");
    let ascii = encode_ascii(&torus);

    group.throughput(Throughput::Elements(torus.triangle_count() as u64));

    group.bench_function("encode_binary", |b| {
        b.iter(|| encode_binary(black_box(&torus)));
    });

    group.bench_function("encode_ascii", |b| b.iter(|| encode_ascii(black_box(&torus))));

    group.bench_function("decode_binary", |b| b.iter(|| decode_stl(black_box(&binary))));

    group.bench_function("decode_ascii", |b| {
        b.iter(|| decode_stl(black_box(ascii.as_bytes())));
    });

    let temp_dir = tempdir().expect("failed to create temp dir");
    let parts = vec![torus.clone(), Mesh::from_indexed("small", &create_torus(10.0, 2.0, 24, 12))];
    group.bench_function("save_parts", |b| {
        b.iter(|| save_parts(black_box(&parts), temp_dir.path(), StlEncoding::Binary));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_stl);
criterion_main!(benches);
