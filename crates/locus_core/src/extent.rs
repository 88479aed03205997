use crate::{point::point_traits::*, PointN};

use num::Zero;

pub type Extent2f = ExtentN<[f32; 2]>;
pub type Extent3f = ExtentN<[f32; 3]>;

/// An N-dimensional extent. This is mathematically the Cartesian product of a closed interval `[a, b]` in each dimension. You
/// can also just think of it as an axis-aligned box with some shape and a minimum point. World-space bounds of indexed elements
/// and the cells of a hashed tree are both represented this way.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

// A few of these traits could be derived. But it seems that derive will not help the compiler infer trait bounds as well.

impl<N> Clone for ExtentN<N>
where
    PointN<N>: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            minimum: self.minimum.clone(),
            shape: self.shape.clone(),
        }
    }
}
impl<N> Copy for ExtentN<N> where PointN<N>: Copy {}

impl<N> PartialEq for ExtentN<N>
where
    PointN<N>: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.minimum.eq(&other.minimum) && self.shape.eq(&other.shape)
    }
}

impl<N> ExtentN<N> {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: PointN<N>, shape: PointN<N>) -> Self {
        Self { minimum, shape }
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: Point<Scalar = f32> + LatticeOrder,
{
    /// An alternative representation of an extent as the minimum point and maximum point.
    #[inline]
    pub fn from_min_and_max(minimum: PointN<N>, max: PointN<N>) -> Self {
        // We want to avoid negative shape components.
        let shape = (max - minimum).join(&PointN::zero());

        Self { minimum, shape }
    }

    /// The extent of a cell given as a center point and the distance from the center to each face.
    #[inline]
    pub fn from_center_and_half_extent(center: PointN<N>, half_extent: PointN<N>) -> Self {
        Self::from_min_and_shape(center - half_extent, half_extent * 2.0)
    }

    /// The greatest point in the extent.
    #[inline]
    pub fn max(&self) -> PointN<N> {
        self.minimum + self.shape
    }

    #[inline]
    pub fn center(&self) -> PointN<N> {
        self.minimum + self.shape * 0.5
    }

    /// The distance from the center to each face.
    #[inline]
    pub fn half_extent(&self) -> PointN<N> {
        self.shape * 0.5
    }

    /// Returns `true` iff `self` and `other` share at least one point. Touching boundaries count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.minimum <= other.max() && other.minimum <= self.max()
    }
}

/// Returns the smallest extent containing all of the given points, or `None` if there are no points.
#[inline]
pub fn bounding_extent<N, I>(mut points: I) -> Option<ExtentN<N>>
where
    I: Iterator<Item = PointN<N>>,
    PointN<N>: Point<Scalar = f32> + LatticeOrder,
{
    let first_point = points.next()?;

    let mut min_point = first_point;
    let mut max_point = first_point;
    for p in points {
        min_point = min_point.meet(&p);
        max_point = max_point.join(&p);
    }

    Some(ExtentN::from_min_and_max(min_point, max_point))
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn bounding_extent_of_rotated_rectangle() {
        let corners: Vec<crate::Point2f> = vec![
            PointN([0.0, 2.0]),
            PointN([2.0, 4.0]),
            PointN([4.0, 2.0]),
            PointN([2.0, 0.0]),
        ];

        let extent = bounding_extent(corners.into_iter()).unwrap();

        assert_eq!(extent, Extent2f::from_min_and_max(PointN([0.0; 2]), PointN([4.0; 2])));
        assert_eq!(extent.center(), PointN([2.0; 2]));
        assert_eq!(extent.half_extent(), PointN([2.0; 2]));
    }

    #[test]
    fn bounding_extent_of_nothing_is_none() {
        assert!(bounding_extent(Vec::<crate::Point3f>::new().into_iter()).is_none());
    }

    #[test]
    fn touching_extents_intersect() {
        let e1 = Extent3f::from_min_and_max(PointN([0.0; 3]), PointN([1.0; 3]));
        let e2 = Extent3f::from_min_and_max(PointN([1.0; 3]), PointN([2.0; 3]));
        let e3 = Extent3f::from_min_and_max(PointN([1.5; 3]), PointN([2.0; 3]));

        assert!(e1.intersects(&e2));
        assert!(!e1.intersects(&e3));
        assert!(e2.intersects(&e3));
    }

    #[test]
    fn inverted_corners_have_empty_shape() {
        let e = Extent2f::from_min_and_max(PointN([1.0; 2]), PointN([0.0; 2]));

        assert_eq!(e.shape, PointN([0.0; 2]));
        assert_eq!(e.max(), e.minimum);
    }
}
