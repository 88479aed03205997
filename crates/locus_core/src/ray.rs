use crate::{point::point_traits::*, Point3f};

/// A half-line in 3D world space. The `direction` does not need to be normalized, but ray parameters are measured in units of
/// its length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Ray3 {
    pub origin: Point3f,
    pub direction: Point3f,
}

impl Ray3 {
    #[inline]
    pub fn new(origin: Point3f, direction: Point3f) -> Self {
        Self { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }

    /// Component-wise reciprocal of the direction. Zero components become infinities of matching sign.
    #[inline]
    pub fn inverse_direction(&self) -> Point3f {
        self.direction.recip()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PointN;

    #[test]
    fn points_along_ray() {
        let ray = Ray3::new(PointN([1.0, 0.0, 0.0]), PointN([0.0, 2.0, 0.0]));

        assert_eq!(ray.at(0.0), PointN([1.0, 0.0, 0.0]));
        assert_eq!(ray.at(1.5), PointN([1.0, 3.0, 0.0]));
        assert_eq!(ray.inverse_direction().y(), 0.5);
        assert_eq!(ray.inverse_direction().x(), f32::INFINITY);
        assert!(!ray.inverse_direction().all_components(f32::is_finite));
        assert_eq!(ray.direction.abs().max_component(), 2.0);
    }
}
