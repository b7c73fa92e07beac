//! Benchmarks for the shape packing solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shapefit::parser;
use shapefit::shape::Shape;
use shapefit::solver;

/// A tetromino catalog with a mix of solvable and infeasible puzzles.
const INPUT: &str = "\
0:
####

1:
##
##

2:
#.
#.
##

3:
.##
##.

4:
###
.#.

8x4: 2 2 1 1 2
6x6: 3 2 2 1 1
5x5: 1 1 1 1 2
4x4: 0 0 2 2 0
";

fn bench_variations(c: &mut Criterion) {
    let pattern = ["###", "#..", "#.."];
    c.bench_function("shape_variations", |b| {
        b.iter(|| Shape::parse(0, black_box(&pattern)))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_input", |b| b.iter(|| parser::parse(black_box(INPUT))));
}

fn bench_solve_puzzles(c: &mut Criterion) {
    let (catalog, puzzles) = parser::parse(INPUT).unwrap();

    c.bench_function("solve_puzzles", |b| {
        b.iter(|| {
            puzzles
                .iter()
                .filter(|puzzle| {
                    let mut board = puzzle.board(&catalog);
                    solver::solve(black_box(&mut board), &catalog)
                })
                .count()
        })
    });
}

criterion_group!(benches, bench_variations, bench_parse, bench_solve_puzzles);
criterion_main!(benches);
