use locus_core::prelude::*;

use rand::prelude::*;

/// `count` axis-aligned rectangles with integer coordinates, given as `[min, max]`, each with its minimum in `region` and edge
/// lengths in `[1, max_edge)`.
pub fn random_rects2(seed: u64, count: usize, region: Extent2f, max_edge: i32) -> Vec<[Point2f; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let min = region.minimum;
    let max = region.max();

    (0..count)
        .map(|_| {
            let rect_min = PointN([
                rng.gen_range(min.x() as i32..max.x() as i32) as f32,
                rng.gen_range(min.y() as i32..max.y() as i32) as f32,
            ]);
            let shape = PointN([
                rng.gen_range(1..max_edge) as f32,
                rng.gen_range(1..max_edge) as f32,
            ]);

            [rect_min, rect_min + shape]
        })
        .collect()
}

/// Like `random_rects2`, but each rectangle lies flat in the plane `z = depth` and is given as its four corners in winding order.
pub fn random_flat_quads3(
    seed: u64,
    count: usize,
    region: Extent2f,
    max_edge: i32,
    depth: f32,
) -> Vec<[Point3f; 4]> {
    random_rects2(seed, count, region, max_edge)
        .into_iter()
        .map(|[min, max]| {
            [
                PointN([min.x(), min.y(), depth]),
                PointN([max.x(), min.y(), depth]),
                PointN([max.x(), max.y(), depth]),
                PointN([min.x(), max.y(), depth]),
            ]
        })
        .collect()
}
