//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::Ray;
use glint_math::{Aabb, Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not strictly positive.
    pub fn new(center: Vec3, radius: f32) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn record<'a>(&self, ray: &Ray, t: f32) -> HitRecord<'a> {
        let point = ray.at(t);
        HitRecord::new(ray, t, (point - self.center) / self.radius)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let d = ray.direction();
        let oc = ray.origin() - self.center;
        let a = d.dot(d);
        let h = d.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Ray grazes the sphere
        if discriminant == 0.0 {
            let t = -h / a;
            return ray_t.contains(t).then(|| self.record(ray, t));
        }

        // Nearest root in range first, then the far one
        let sqrtd = discriminant.sqrt();
        let near = (-h - sqrtd) / a;
        let far = (-h + sqrtd) / a;
        if ray_t.contains(near) {
            Some(self.record(ray, near))
        } else if ray_t.contains(far) {
            Some(self.record(ray, far))
        } else {
            None
        }
    }

    fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}
