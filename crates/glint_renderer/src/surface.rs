//! Surfaces: geometry plus an optional shading rule.

use crate::hittable::{Group, HitRecord, Hittable};
use crate::{Ray, Shader, Sphere, Triangle};
use glint_math::{Aabb, Interval};

/// The closed set of geometry kinds a surface can have.
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
    Group(Group),
}

impl Hittable for Geometry {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit(ray, ray_t),
            Geometry::Triangle(triangle) => triangle.hit(ray, ray_t),
            Geometry::Group(group) => group.hit(ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Geometry::Sphere(sphere) => sphere.bounding_box(),
            Geometry::Triangle(triangle) => triangle.bounding_box(),
            Geometry::Group(group) => group.bounding_box(),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

impl From<Group> for Geometry {
    fn from(group: Group) -> Self {
        Geometry::Group(group)
    }
}

/// A piece of geometry and the rule that colors it.
///
/// A surface without a shader inherits the shader of the nearest enclosing
/// group; with no shader anywhere on the path it renders black.
pub struct Surface {
    geometry: Geometry,
    shader: Option<Box<dyn Shader>>,
}

impl Surface {
    /// Create an unshaded surface.
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            shader: None,
        }
    }

    /// Attach a shading rule.
    pub fn with_shader(mut self, shader: impl Shader + 'static) -> Self {
        self.set_shader(shader);
        self
    }

    pub fn set_shader(&mut self, shader: impl Shader + 'static) {
        self.shader = Some(Box::new(shader));
    }

    /// Attach an already boxed shading rule, or remove it with `None`.
    pub fn set_boxed_shader(&mut self, shader: Option<Box<dyn Shader>>) {
        self.shader = shader;
    }

    pub fn shader(&self) -> Option<&dyn Shader> {
        self.shader.as_deref()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl Default for Surface {
    /// An empty group: nothing to hit.
    fn default() -> Self {
        Self::new(Group::new())
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Self::new(sphere)
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Self::new(triangle)
    }
}

impl From<Group> for Surface {
    fn from(group: Group) -> Self {
        Self::new(group)
    }
}

impl Hittable for Surface {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut rec = self.geometry.hit(ray, ray_t)?;
        if rec.shader.is_none() {
            rec.shader = self.shader();
        }
        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.geometry.bounding_box()
    }
}
