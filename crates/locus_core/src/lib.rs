//! The core data types for addressing the cells of hashed 2D and 3D trees:
//! - `PointN`: an N-dimensional point, most importantly `Point2f` and `Point3f`
//! - `ExtentN`: an N-dimensional axis-aligned box, most importantly `Extent2f` and `Extent3f`
//! - `Morton2` and `Morton3`: Z-order codes of grid cells
//! - `TreePoint`: the per-dimension geometry of quadtree and octree children
//! - `Ray3`: a half-line for ray casts

pub mod extent;
pub mod morton;
pub mod orthant;
pub mod point;
pub mod ray;

pub use extent::{bounding_extent, Extent2f, Extent3f, ExtentN};
pub use morton::{Morton2, Morton3};
pub use orthant::TreePoint;
pub use point::{
    Abs, DotProduct, LatticeOrder, MapComponents, MinMaxComponent, Point, Point2f, Point3f, PointN,
};
pub use ray::Ray3;

pub use num;

pub mod prelude {
    pub use super::{
        bounding_extent, Abs, DotProduct, Extent2f, Extent3f, ExtentN, LatticeOrder, MapComponents,
        MinMaxComponent, Morton2, Morton3, Point, Point2f, Point3f, PointN, Ray3, TreePoint,
    };
}
