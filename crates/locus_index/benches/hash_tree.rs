use locus_core::prelude::*;
use locus_index::prelude::*;
use utilities::data_sets::{random_flat_quads3, random_rects2};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

const REGION_EDGE: f32 = 8000.0;

fn region() -> Extent2f {
    Extent2f::from_min_and_max(PointN([-REGION_EDGE / 2.0; 2]), PointN([REGION_EDGE / 2.0; 2]))
}

fn quadtree_with_rects(num_rects: usize) -> HashQuadTree<u32> {
    let mut tree = HashQuadTree::new(HashTreeConfig::quadtree_default());
    for (id, rect) in random_rects2(1, num_rects, region(), 200).iter().enumerate() {
        tree.add_element(id as u32, rect, ());
    }

    tree
}

fn quadtree_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for num_rects in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_rects),
            num_rects,
            |b, &num_rects| {
                b.iter_with_setup(
                    || random_rects2(1, num_rects, region(), 200),
                    |rects| {
                        let mut tree = HashQuadTree::new(HashTreeConfig::quadtree_default());
                        for (id, rect) in rects.iter().enumerate() {
                            tree.add_element(id as u32, rect, ());
                        }
                        black_box(tree)
                    },
                );
            },
        );
    }
    group.finish();
}

fn quadtree_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_move");
    for num_rects in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_rects),
            num_rects,
            |b, &num_rects| {
                b.iter_with_setup(
                    || {
                        let moved = random_rects2(2, num_rects, region(), 200);

                        (quadtree_with_rects(num_rects), moved)
                    },
                    |(mut tree, moved)| {
                        for (id, rect) in moved.iter().enumerate() {
                            tree.add_element(id as u32, rect, ());
                        }
                        black_box(tree)
                    },
                );
            },
        );
    }
    group.finish();
}

fn quadtree_point_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_point_query");
    for num_rects in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_rects),
            num_rects,
            |b, &num_rects| {
                let mut tree = quadtree_with_rects(num_rects);
                let mut rng = StdRng::seed_from_u64(3);
                b.iter(|| {
                    let half = REGION_EDGE / 2.0;
                    let point = PointN([rng.gen_range(-half..half), rng.gen_range(-half..half)]);
                    tree.find_elements(
                        &mut PointBoundTest::new(point),
                        &mut |element: &u32, _: &()| {
                            black_box(element);
                        },
                    );
                });
            },
        );
    }
    group.finish();
}

fn octree_raycast(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_raycast");
    for num_rects in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_rects),
            num_rects,
            |b, &num_rects| {
                let mut tree = HashOctree::new(HashTreeConfig::octree_default());
                for (id, quad) in random_flat_quads3(4, num_rects, region(), 200, 0.0)
                    .into_iter()
                    .enumerate()
                {
                    tree.add_rect(id as u32, quad);
                }
                let mut rng = StdRng::seed_from_u64(5);
                b.iter(|| {
                    let half = REGION_EDGE / 2.0;
                    let origin = PointN([rng.gen_range(-half..half), rng.gen_range(-half..half), 100.0]);
                    let ray = Ray3::new(origin, PointN([0.0, 0.0, -1.0]));
                    tree.raycast(&ray, |element, t| {
                        black_box((element, t));
                    });
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    quadtree_insert,
    quadtree_move,
    quadtree_point_query,
    octree_raycast
);
criterion_main!(benches);
