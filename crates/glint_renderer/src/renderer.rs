//! Color resolution for a single ray.
//!
//! [`ShadingContext::trace`] is the entry point the render loop and the
//! mirror shader both use: intersect the world, then hand the hit to the
//! shader bound to whatever was struck.

use crate::{Color, HitRecord, Hittable, Light, Ray, Surface};
use glint_math::{Interval, Vec3};
use serde::Deserialize;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Offset applied to secondary rays to avoid re-hitting their origin surface
    pub shadow_bias: f32,
    /// Upper bound on ray parameters; also the distance to a directional light
    pub max_distance: f32,
    /// Maximum mirror recursion depth
    pub max_bounces: u32,
    /// Render rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_bias: 1e-4,
            max_distance: f32::MAX,
            max_bounces: 5,
            parallel: true,
        }
    }
}

/// Color computed for a ray, together with the hit that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Shading<'a> {
    pub color: Color,
    pub hit: HitRecord<'a>,
}

/// Everything a shader may consult: the lights, the world it can cast
/// secondary rays into, and the render settings.
///
/// Read-only, so one context can be shared by every render thread.
#[derive(Clone, Copy)]
pub struct ShadingContext<'a> {
    pub lights: &'a [Light],
    pub world: &'a Surface,
    pub settings: RenderSettings,
}

impl<'a> ShadingContext<'a> {
    pub fn new(world: &'a Surface, lights: &'a [Light], settings: RenderSettings) -> Self {
        Self {
            lights,
            world,
            settings,
        }
    }

    /// Parameter range for camera and reflection rays.
    pub fn primary_interval(&self) -> Interval {
        Interval::new(0.0, self.settings.max_distance)
    }

    /// Compute the color seen along `ray`, or `None` if it hits nothing.
    ///
    /// The struck surface's shader is used, falling back to the enclosing
    /// group's. A hit with no shader anywhere is black.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Option<Shading<'a>> {
        let hit = self.world.hit(ray, self.primary_interval())?;
        let color = match hit.shader {
            Some(shader) => shader.shade(self, ray, &hit, depth),
            None => Color::BLACK,
        };
        Some(Shading { color, hit })
    }

    /// Returns true if anything in the world lies between `point` and `light`.
    pub fn is_shadowed(&self, point: Vec3, light: &Light) -> bool {
        let bias = self.settings.shadow_bias;
        let to_light = light.direction_to_light(point);
        let shadow_ray = Ray::new(point + bias * to_light, to_light);
        let t_max = light.time_to_light(&shadow_ray, self.settings.max_distance);

        self.world
            .hit(&shadow_ray, Interval::new(bias, t_max))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, Sphere, StaticColorShader};

    #[test]
    fn test_trace_miss() {
        let world = Surface::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0));
        let ctx = ShadingContext::new(&world, &[], RenderSettings::default());

        assert!(ctx.trace(&Ray::new(Vec3::ZERO, Vec3::Z), 0).is_none());
    }

    #[test]
    fn test_trace_unshaded_hit_is_black() {
        let world = Surface::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0));
        let ctx = ShadingContext::new(&world, &[], RenderSettings::default());

        let shading = ctx.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0).unwrap();
        assert_eq!(shading.color, Color::BLACK);
        assert!((shading.hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_trace_uses_child_then_group_shader() {
        let red = Color::new(255, 0, 0);
        let green = Color::new(0, 255, 0);
        let group = Group::new()
            .with(Surface::new(Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0)).with_shader(StaticColorShader::new(red)))
            .with(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0));
        let world = Surface::new(group).with_shader(StaticColorShader::new(green));
        let ctx = ShadingContext::new(&world, &[], RenderSettings::default());

        let own = ctx.trace(&Ray::new(Vec3::ZERO, Vec3::X), 0).unwrap();
        assert_eq!(own.color, red);
        assert_eq!(own.hit.index, Some(0));

        let inherited = ctx.trace(&Ray::new(Vec3::ZERO, Vec3::Y), 0).unwrap();
        assert_eq!(inherited.color, green);
        assert_eq!(inherited.hit.index, Some(1));
    }

    #[test]
    fn test_is_shadowed() {
        let blocker = Group::new().with(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0));
        let world = Surface::new(blocker);
        let ctx = ShadingContext::new(&world, &[], RenderSettings::default());

        let overhead_sun = Light::directional(Vec3::NEG_Z, 1.0);
        assert!(ctx.is_shadowed(Vec3::ZERO, &overhead_sun));
        assert!(!ctx.is_shadowed(Vec3::new(3.0, 0.0, 0.0), &overhead_sun));

        // Blocker lies beyond the light
        let near_bulb = Light::point(Vec3::new(0.0, 0.0, 2.0), 1.0);
        assert!(!ctx.is_shadowed(Vec3::ZERO, &near_bulb));

        let far_bulb = Light::point(Vec3::new(0.0, 0.0, 10.0), 1.0);
        assert!(ctx.is_shadowed(Vec3::ZERO, &far_bulb));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: RenderSettings = serde_json::from_str(r#"{ "max_bounces": 2 }"#).unwrap();

        assert_eq!(settings.max_bounces, 2);
        assert_eq!(settings.shadow_bias, RenderSettings::default().shadow_bias);
        assert!(settings.parallel);
    }
}
