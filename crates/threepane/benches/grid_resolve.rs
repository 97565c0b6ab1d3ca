//! Benchmarks for grid span resolution.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use threepane::grid::{CellAddr, CellConfig, GridLayout};

/// An 8x8 grid fully tiled with 1x1 cells, every other one a filler.
fn dense_grid() -> GridLayout {
    let mut grid = GridLayout::new(8, 8);
    for row in 0..8 {
        for col in 0..8 {
            let filler = (row + col) % 2 == 0;
            let config = CellConfig::new(format!("cell-{row}-{col}"))
                .expand(1, 1, 1, 1)
                .fill_detached_space(filler)
                .priority((row * 8 + col) as i32 % 5);
            grid.insert_cell(CellAddr::new(row, col), config).unwrap();
        }
    }
    grid
}

fn bench_resolve(c: &mut Criterion) {
    let attached = dense_grid();
    c.bench_function("resolve 8x8 all attached", |b| {
        b.iter(|| black_box(attached.resolve()))
    });

    let mut sparse = dense_grid();
    for col in 0..8 {
        sparse.detach(CellAddr::new(3, col));
        sparse.detach(CellAddr::new(5, col));
    }
    c.bench_function("resolve 8x8 two rows detached", |b| {
        b.iter(|| black_box(sparse.resolve()))
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let grid = dense_grid();
    let json = grid.to_json().unwrap();
    c.bench_function("designer json import 8x8", |b| {
        b.iter(|| GridLayout::from_json(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_round_trip);
criterion_main!(benches);
