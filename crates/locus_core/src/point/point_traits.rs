use super::PointN;

use core::ops::{Add, Div, Mul, Sub};
use num::Zero;
use std::cmp::Ordering;

/// The operations every world-space point type supports.
pub trait Point:
    'static
    + Abs
    + Add<Output = Self>
    + Copy
    + Div<<Self as Point>::Scalar, Output = Self>
    + DotProduct<Scalar = <Self as Point>::Scalar>
    + MapComponents<Scalar = <Self as Point>::Scalar>
    + Mul<<Self as Point>::Scalar, Output = Self>
    + Mul<Self, Output = Self>
    + PartialEq
    + PartialOrd
    + Sub<Output = Self>
    + Zero
{
    type Scalar: Copy;

    /// A point with every component equal to `value`.
    fn fill(value: <Self as Point>::Scalar) -> Self;
}

pub trait Abs {
    fn abs(&self) -> Self;
}

pub trait MapComponents {
    type Scalar;

    /// Returns the point after applying `f` component-wise.
    fn map_components_unary(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;

    /// Returns the point after applying `f` component-wise to both `self` and `other` in parallel.
    fn map_components_binary(
        &self,
        other: &Self,
        f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self;

    /// Returns `true` iff `f` holds for every component.
    fn all_components(&self, f: impl Fn(Self::Scalar) -> bool) -> bool;

    /// Returns `true` iff `f` holds for every pair of matching components of `self` and `other`.
    fn all_component_pairs(&self, other: &Self, f: impl Fn(Self::Scalar, Self::Scalar) -> bool) -> bool;
}

pub trait MinMaxComponent {
    type Scalar;

    fn min_component(&self) -> Self::Scalar;
    fn max_component(&self) -> Self::Scalar;
}

pub trait DotProduct {
    type Scalar: Copy;

    /// The vector dot product.
    fn dot(&self, other: &Self) -> Self::Scalar;
}

pub trait LatticeOrder {
    /// Component-wise maximum.
    fn join(&self, other: &Self) -> Self;

    /// Component-wise minimum.
    fn meet(&self, other: &Self) -> Self;
}

// Points only come with `f32` components, so every array length gets the same impls.
macro_rules! impl_float_point {
    ($dim:literal) => {
        impl MapComponents for PointN<[f32; $dim]> {
            type Scalar = f32;

            #[inline]
            fn map_components_unary(&self, f: impl Fn(f32) -> f32) -> Self {
                let mut out = self.0;
                for c in out.iter_mut() {
                    *c = f(*c);
                }

                PointN(out)
            }

            #[inline]
            fn map_components_binary(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
                let mut out = self.0;
                for (c, o) in out.iter_mut().zip(other.0.iter()) {
                    *c = f(*c, *o);
                }

                PointN(out)
            }

            #[inline]
            fn all_components(&self, f: impl Fn(f32) -> bool) -> bool {
                self.0.iter().all(|&c| f(c))
            }

            #[inline]
            fn all_component_pairs(&self, other: &Self, f: impl Fn(f32, f32) -> bool) -> bool {
                self.0.iter().zip(other.0.iter()).all(|(&a, &b)| f(a, b))
            }
        }

        impl Point for PointN<[f32; $dim]> {
            type Scalar = f32;

            #[inline]
            fn fill(value: f32) -> Self {
                PointN([value; $dim])
            }
        }

        impl Add for PointN<[f32; $dim]> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                self.map_components_binary(&rhs, |c1, c2| c1 + c2)
            }
        }

        impl Sub for PointN<[f32; $dim]> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self.map_components_binary(&rhs, |c1, c2| c1 - c2)
            }
        }

        impl Mul<f32> for PointN<[f32; $dim]> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                self.map_components_unary(|c| rhs * c)
            }
        }

        impl Mul<Self> for PointN<[f32; $dim]> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.map_components_binary(&rhs, |c1, c2| c1 * c2)
            }
        }

        impl Div<f32> for PointN<[f32; $dim]> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                self.map_components_unary(|c| c / rhs)
            }
        }

        impl Zero for PointN<[f32; $dim]> {
            #[inline]
            fn zero() -> Self {
                PointN([0.0; $dim])
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.all_components(|c| c == 0.0)
            }
        }

        impl LatticeOrder for PointN<[f32; $dim]> {
            #[inline]
            fn join(&self, other: &Self) -> Self {
                self.map_components_binary(other, f32::max)
            }

            #[inline]
            fn meet(&self, other: &Self) -> Self {
                self.map_components_binary(other, f32::min)
            }
        }

        impl Abs for PointN<[f32; $dim]> {
            #[inline]
            fn abs(&self) -> Self {
                self.map_components_unary(f32::abs)
            }
        }

        impl MinMaxComponent for PointN<[f32; $dim]> {
            type Scalar = f32;

            #[inline]
            fn min_component(&self) -> f32 {
                self.0.iter().copied().fold(f32::INFINITY, f32::min)
            }

            #[inline]
            fn max_component(&self) -> f32 {
                self.0.iter().copied().fold(f32::NEG_INFINITY, f32::max)
            }
        }

        impl DotProduct for PointN<[f32; $dim]> {
            type Scalar = f32;

            #[inline]
            fn dot(&self, other: &Self) -> f32 {
                self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
            }
        }

        // A point is less than another only if every component is less.
        impl PartialOrd for PointN<[f32; $dim]> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                if self < other {
                    Some(Ordering::Less)
                } else if self > other {
                    Some(Ordering::Greater)
                } else if self == other {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }

            #[inline]
            fn lt(&self, other: &Self) -> bool {
                self.all_component_pairs(other, |a, b| a < b)
            }

            #[inline]
            fn gt(&self, other: &Self) -> bool {
                self.all_component_pairs(other, |a, b| a > b)
            }

            #[inline]
            fn le(&self, other: &Self) -> bool {
                self.all_component_pairs(other, |a, b| a <= b)
            }

            #[inline]
            fn ge(&self, other: &Self) -> bool {
                self.all_component_pairs(other, |a, b| a >= b)
            }
        }

        impl PointN<[f32; $dim]> {
            /// Component-wise `1 / c`. Zero components become infinities with the sign of the zero.
            #[inline]
            pub fn recip(&self) -> Self {
                self.map_components_unary(f32::recip)
            }
        }
    };
}

impl_float_point!(2);
impl_float_point!(3);
