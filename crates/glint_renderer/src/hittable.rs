//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Ray, Shader, Surface};
use glint_math::{Aabb, Interval, Vec3};
use std::fmt;

/// Record of a ray-object intersection.
///
/// A query that misses returns `None` instead of a record, so every field
/// here is meaningful.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Ray parameter of the intersection
    pub t: f32,
    /// Point of intersection, `ray.at(t)`
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Index of the struck child, set by the outermost group queried
    pub index: Option<usize>,
    /// Shading rule of the struck surface, or of the nearest enclosing
    /// group that has one
    pub shader: Option<&'a dyn Shader>,
}

impl<'a> HitRecord<'a> {
    /// Record a hit at parameter `t` with the given unit normal.
    pub fn new(ray: &Ray, t: f32, normal: Vec3) -> Self {
        Self {
            t,
            point: ray.at(t),
            normal,
            index: None,
            shader: None,
        }
    }
}

impl fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitRecord")
            .field("t", &self.t)
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("index", &self.index)
            .field("has_shader", &self.shader.is_some())
            .finish()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with parameter inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// An ordered collection of surfaces queried as one.
///
/// Hit testing is a linear scan. The bounding box only ever grows.
pub struct Group {
    surfaces: Vec<Surface>,
    bbox: Aabb,
}

impl Group {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a surface to the group.
    pub fn add(&mut self, surface: impl Into<Surface>) {
        let surface = surface.into();
        self.bbox = Aabb::surrounding(&self.bbox, &surface.bounding_box());
        self.surfaces.push(surface);
    }

    /// Builder form of [`Group::add`].
    pub fn with(mut self, surface: impl Into<Surface>) -> Self {
        self.add(surface);
        self
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Get the number of child surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Group {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(mut rec) = surface.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                rec.index = Some(index);
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sphere, StaticColorShader, Triangle, Color};

    fn spheres_along_x() -> Group {
        // Deliberately out of distance order
        Group::new()
            .with(Sphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0))
            .with(Sphere::new(Vec3::new(4.0, 0.0, 0.0), 1.0))
            .with(Sphere::new(Vec3::new(7.0, 0.0, 0.0), 1.0))
    }

    #[test]
    fn test_group_reports_nearest_child() {
        let group = spheres_along_x();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = group.hit(&ray, Interval::new(0.0, f32::MAX)).unwrap();
        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.index, Some(1));
    }

    #[test]
    fn test_group_hit_is_minimum_over_children() {
        let group = spheres_along_x();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.1), Vec3::new(1.0, 0.0, 0.0));
        let interval = Interval::new(0.0, f32::MAX);

        let expected = group
            .surfaces()
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.hit(&ray, interval).map(|rec| (i, rec.t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();

        let rec = group.hit(&ray, interval).unwrap();
        assert_eq!(rec.index, Some(expected.0));
        assert_eq!(rec.t, expected.1);
    }

    #[test]
    fn test_group_respects_interval() {
        let group = spheres_along_x();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        // Skip past the first two spheres entirely
        let rec = group.hit(&ray, Interval::new(8.5, 100.0)).unwrap();
        assert_eq!(rec.index, Some(0));
        assert!((rec.t - 9.0).abs() < 1e-5);

        assert!(group.hit(&ray, Interval::new(0.0, 2.0)).is_none());
    }

    #[test]
    fn test_group_miss() {
        let group = spheres_along_x();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_X);
        assert!(group.hit(&ray, Interval::new(0.0, f32::MAX)).is_none());

        let empty = Group::new();
        assert!(empty.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_group_bounding_box_grows() {
        let mut group = Group::new();
        group.add(Sphere::new(Vec3::new(1.0, 1.0, 1.0), 1.0));
        let first = group.bounding_box();
        assert_eq!(first.min(), Vec3::ZERO);
        assert_eq!(first.max(), Vec3::splat(2.0));

        group.add(Triangle::new(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(1.0, 0.5, 0.5),
            Vec3::new(0.5, 1.0, 0.5),
        ));
        // A surface inside the current box leaves it unchanged
        assert_eq!(group.bounding_box(), first);

        group.add(Sphere::new(Vec3::new(-5.0, 0.0, 0.0), 1.0));
        let grown = group.bounding_box();
        assert_eq!(grown.min(), Vec3::new(-6.0, -1.0, -1.0));
        assert_eq!(grown.max(), Vec3::splat(2.0));
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_nested_group_index_is_outermost() {
        let inner = Group::new()
            .with(Sphere::new(Vec3::new(20.0, 0.0, 0.0), 1.0))
            .with(Sphere::new(Vec3::new(3.0, 0.0, 0.0), 1.0));
        let outer = Group::new()
            .with(Sphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0))
            .with(inner);

        let rec = outer
            .hit(&Ray::new(Vec3::ZERO, Vec3::X), Interval::new(0.0, f32::MAX))
            .unwrap();
        assert_eq!(rec.index, Some(1));
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_child_shader_wins_over_group_shader() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let group = Group::new()
            .with(Surface::new(Sphere::new(Vec3::new(4.0, 0.0, 0.0), 1.0)).with_shader(StaticColorShader::new(red)))
            .with(Sphere::new(Vec3::new(0.0, 4.0, 0.0), 1.0));
        let root = Surface::new(group).with_shader(StaticColorShader::new(blue));
        let interval = Interval::new(0.0, f32::MAX);

        let shaded = root.hit(&Ray::new(Vec3::ZERO, Vec3::X), interval).unwrap();
        assert!(shaded.shader.is_some());
        assert_eq!(shaded.index, Some(0));

        let fallback = root.hit(&Ray::new(Vec3::ZERO, Vec3::Y), interval).unwrap();
        assert_eq!(fallback.index, Some(1));
        assert!(fallback.shader.is_some());

        let bare = Group::new().with(Sphere::new(Vec3::new(4.0, 0.0, 0.0), 1.0));
        let rec = bare.hit(&Ray::new(Vec3::ZERO, Vec3::X), interval).unwrap();
        assert!(rec.shader.is_none());
    }
}
