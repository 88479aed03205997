//! Pruning predicates for `HashTree::find_elements` and precise tests on the candidates it yields.
//!
//! A traversal only descends into a child cell when its `BoundTest` accepts the cell, so the bound test decides how much of
//! the tree is visited. Elements are reported for every visited node, which means the candidates are a superset of the true
//! hits. Callers that need exact answers confirm each candidate, e.g. with `ray_intersects_quad`.

use locus_core::prelude::*;

/// The four world-space corners of a rectangle in 3D, in winding order.
pub type QuadCorners = [Point3f; 4];

/// Decides whether traversal should descend into a cell.
pub trait BoundTest<N> {
    /// `center` and `half_extent` describe the child cell in world space.
    fn test_bound(&mut self, center: PointN<N>, half_extent: PointN<N>) -> bool;
}

impl<N, F> BoundTest<N> for F
where
    F: FnMut(PointN<N>, PointN<N>) -> bool,
{
    #[inline]
    fn test_bound(&mut self, center: PointN<N>, half_extent: PointN<N>) -> bool {
        (self)(center, half_extent)
    }
}

/// Receives every live element of every visited node.
pub trait ElementVisitor<K, P> {
    fn visit_element(&mut self, element: &K, payload: &P);
}

impl<K, P, F> ElementVisitor<K, P> for F
where
    F: FnMut(&K, &P),
{
    #[inline]
    fn visit_element(&mut self, element: &K, payload: &P) {
        (self)(element, payload)
    }
}

/// Accepts every cell. Visits the whole tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl<N> BoundTest<N> for AcceptAll {
    #[inline]
    fn test_bound(&mut self, _center: PointN<N>, _half_extent: PointN<N>) -> bool {
        true
    }
}

/// Accepts cells that share at least one point with `extent`.
#[derive(Clone, Copy, Debug)]
pub struct ExtentBoundTest<N> {
    pub extent: ExtentN<N>,
}

impl<N> ExtentBoundTest<N> {
    pub fn new(extent: ExtentN<N>) -> Self {
        Self { extent }
    }
}

impl<N> BoundTest<N> for ExtentBoundTest<N>
where
    PointN<N>: TreePoint,
{
    #[inline]
    fn test_bound(&mut self, center: PointN<N>, half_extent: PointN<N>) -> bool {
        self.extent
            .intersects(&ExtentN::from_center_and_half_extent(center, half_extent))
    }
}

/// Accepts cells that contain `point`.
#[derive(Clone, Copy, Debug)]
pub struct PointBoundTest<N> {
    pub point: PointN<N>,
}

impl<N> PointBoundTest<N> {
    pub fn new(point: PointN<N>) -> Self {
        Self { point }
    }
}

impl<N> BoundTest<N> for PointBoundTest<N>
where
    PointN<N>: TreePoint,
{
    #[inline]
    fn test_bound(&mut self, center: PointN<N>, half_extent: PointN<N>) -> bool {
        (self.point - center).abs() <= half_extent
    }
}

/// Accepts cells that are hit by a ray, using the slab method.
#[derive(Clone, Copy, Debug)]
pub struct RayBoundTest {
    origin: Point3f,
    inverse_direction: Point3f,
}

impl RayBoundTest {
    pub fn new(ray: &Ray3) -> Self {
        Self {
            origin: ray.origin,
            inverse_direction: ray.inverse_direction(),
        }
    }

    /// Returns `true` iff the ray enters the box `[min, max]` at a non-negative parameter or starts inside of it. Boxes that
    /// only touch the ray on a face are hit.
    #[inline]
    pub fn hits_box(&self, min: Point3f, max: Point3f) -> bool {
        let mut t_enter = 0.0f32;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            let origin = self.origin.0[axis];
            let inverse_direction = self.inverse_direction.0[axis];
            let (lo, hi) = (min.0[axis], max.0[axis]);

            // Parallel to this slab. `0 * inf` would be NaN for an origin on one of its faces.
            if inverse_direction.is_infinite() {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }

            let t1 = (lo - origin) * inverse_direction;
            let t2 = (hi - origin) * inverse_direction;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        t_enter <= t_exit
    }
}

impl BoundTest<[f32; 3]> for RayBoundTest {
    #[inline]
    fn test_bound(&mut self, center: Point3f, half_extent: Point3f) -> bool {
        self.hits_box(center - half_extent, center + half_extent)
    }
}

const MIN_DETERMINANT: f32 = 1e-6;

/// Returns the ray parameter where `ray` hits the rectangle `corners`, treated as the triangles `(0, 1, 2)` and `(0, 2, 3)`.
/// Both faces of the rectangle can be hit.
pub fn ray_intersects_quad(ray: &Ray3, corners: &QuadCorners) -> Option<f32> {
    let [c0, c1, c2, c3] = *corners;

    ray_intersects_triangle(ray, c0, c1, c2).or_else(|| ray_intersects_triangle(ray, c0, c2, c3))
}

/// Möller–Trumbore ray-triangle intersection.
pub fn ray_intersects_triangle(ray: &Ray3, a: Point3f, b: Point3f, c: Point3f) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;

    let p = ray.direction.cross(&edge2);
    let det = edge1.dot(&p);
    // Ray is parallel to the triangle's plane.
    if det.abs() < MIN_DETERMINANT {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - a;
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(&q) * inv_det;
    if t < 0.0 {
        return None;
    }

    Some(t)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
