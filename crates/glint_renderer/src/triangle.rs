//! Triangle primitive for ray tracing.
//!
//! Intersection solves the barycentric linear system with Cramer's rule.

use crate::hittable::{HitRecord, Hittable};
use crate::Ray;
use glint_math::{Aabb, Interval, Vec3};

/// A triangle primitive.
///
/// Vertices are in counter-clockwise order when seen from the side the
/// normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three counter-clockwise vertices.
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        let normal = (v2 - v1).cross(v3 - v2).normalize();
        Self { v1, v2, v3, normal }
    }

    /// Create a triangle whose normal faces `facing`.
    ///
    /// The winding is flipped when the counter-clockwise normal of the given
    /// order points away from `facing`.
    pub fn facing(v1: Vec3, v2: Vec3, v3: Vec3, facing: Vec3) -> Self {
        let triangle = Self::new(v1, v2, v3);
        if triangle.normal.dot(facing) < 0.0 {
            Self::new(v1, v3, v2)
        } else {
            triangle
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }

    pub fn unit_normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let (v1, v2, v3) = (self.v1, self.v2, self.v3);
        let (o, d) = (ray.origin(), ray.direction());

        let a = v1.x - v2.x;
        let b = v1.y - v2.y;
        let c = v1.z - v2.z;
        let d_ = v1.x - v3.x;
        let e = v1.y - v3.y;
        let f = v1.z - v3.z;
        let g = d.x;
        let h = d.y;
        let i = d.z;
        let j = v1.x - o.x;
        let k = v1.y - o.y;
        let l = v1.z - o.z;

        let ei_minus_hf = e * i - h * f;
        let gf_minus_di = g * f - d_ * i;
        let dh_minus_eg = d_ * h - e * g;
        let ak_minus_jb = a * k - j * b;
        let jc_minus_al = j * c - a * l;
        let bl_minus_kc = b * l - k * c;

        let m = a * ei_minus_hf + b * gf_minus_di + c * dh_minus_eg;

        // Ray is parallel to the triangle's plane
        if m == 0.0 {
            return None;
        }

        let t = -(f * ak_minus_jb + e * jc_minus_al + d_ * bl_minus_kc) / m;
        if !ray_t.contains(t) {
            return None;
        }

        let gamma = (i * ak_minus_jb + h * jc_minus_al + g * bl_minus_kc) / m;
        if !(0.0..=1.0).contains(&gamma) {
            return None;
        }

        let beta = (j * ei_minus_hf + k * gf_minus_di + l * dh_minus_eg) / m;
        if !(0.0..=1.0 - gamma).contains(&beta) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal))
    }

    fn bounding_box(&self) -> Aabb {
        let min = self.v1.min(self.v2).min(self.v3);
        let max = self.v1.max(self.v2).max(self.v3);
        Aabb::from_points(min, max)
    }
}
