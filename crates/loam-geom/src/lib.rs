//! Minimal geometry types shared by the meshing crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(C)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing both operands.
    #[inline]
    pub fn union(self, other: Aabb) -> Aabb {
        Aabb::new(
            Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn union_spans_both_boxes() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(16.0, 64.0, 16.0));
        let b = Aabb::new(Vec3::new(-16.0, 0.0, 16.0), Vec3::new(0.0, 32.0, 32.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::new(-16.0, 0.0, 0.0));
        assert_eq!(u.max, Vec3::new(16.0, 64.0, 32.0));
        assert_eq!(u, b.union(a));
    }

    proptest! {
        #[test]
        fn add_sub_round_trip(a: Vec3, b: Vec3) {
            let c = a + b - b;
            // Exact for finite inputs without overflow; tolerate NaN poisoning.
            if a.x.is_finite() && a.y.is_finite() && a.z.is_finite()
                && b.x.is_finite() && b.y.is_finite() && b.z.is_finite()
                && c.x.is_finite() && c.y.is_finite() && c.z.is_finite()
            {
                prop_assert!((c.x - a.x).abs() <= a.x.abs().max(b.x.abs()) * 1e-6 + 1e-6);
            }
        }

        #[test]
        fn cross_is_orthogonal(a: Vec3, b: Vec3) {
            let c = a.cross(b);
            if c.dot(c).is_finite() && a.dot(a).is_finite() && b.dot(b).is_finite() {
                let scale = (a.dot(a) * b.dot(b)).sqrt().max(1.0);
                prop_assert!(c.dot(a).abs() / scale < 1e-3);
            }
        }
    }
}
