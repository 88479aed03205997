pub mod point2;
pub mod point3;
pub mod point_traits;

pub use point2::*;
pub use point3::*;
pub use point_traits::*;

/// An N-dimensional point, where `N` is `[f32; 2]` or `[f32; 3]`. Points of either dimension are constructed as:
///
/// ```
/// use locus_core::PointN;
///
/// let p2 = PointN([1.0, 2.0]); // 2D
/// let p3 = PointN([1.0, 2.0, 3.0]); // 3D
/// ```
///
/// Points support basic linear algebraic operations such as addition, subtraction, scalar multiplication, and scalar
/// division.
///
/// ```
/// use locus_core::{Point2f, PointN};
///
/// let p1: Point2f = PointN([1.0, 2.0]);
/// let p2: Point2f = PointN([3.0, 4.0]);
///
/// assert_eq!(p1 + p2, PointN([4.0, 6.0]));
/// assert_eq!(p1 - p2, PointN([-2.0, -2.0]));
///
/// assert_eq!(p1 * 2.0, PointN([2.0, 4.0]));
/// assert_eq!(p1 / 2.0, PointN([0.5, 1.0]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all of
/// the components of point A are greater than point B. This is useful for checking if a point is inside of the box between
/// two other points:
///
/// ```
/// use locus_core::{Point3f, PointN};
///
/// let min: Point3f = PointN([0.0, 0.0, 0.0]);
/// let max: Point3f = PointN([3.0, 3.0, 3.0]);
///
/// let p: Point3f = PointN([0.0, 1.0, 2.0]);
/// assert!(min <= p && p <= max);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PointN<N>(pub N);
