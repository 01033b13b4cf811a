//! Shading rules: how a hit turns into a color.

use crate::renderer::{Shading, ShadingContext};
use crate::{Color, HitRecord, Hittable, Ray};
use glint_math::Vec3;

/// Trait for rules that color a surface.
pub trait Shader: Send + Sync {
    /// Color of an existing hit seen along `ray`.
    ///
    /// `depth` counts mirror bounces taken so far; camera rays start at 0.
    fn shade(&self, ctx: &ShadingContext<'_>, ray: &Ray, hit: &HitRecord<'_>, depth: u32) -> Color;

    /// Intersect `ray` with the context's world and shade the result with
    /// this rule. Returns `None` when the ray hits nothing.
    fn compute_color<'w>(
        &self,
        ctx: &ShadingContext<'w>,
        ray: &Ray,
        depth: u32,
    ) -> Option<Shading<'w>> {
        let hit = ctx.world.hit(ray, ctx.primary_interval())?;
        let color = self.shade(ctx, ray, &hit, depth);
        Some(Shading { color, hit })
    }
}

/// Diffuse factor: sum of `intensity * max(0, n . to_light)`.
fn lambert_term(intensity: f32, normal: Vec3, incident: Vec3) -> f32 {
    intensity * normal.dot(-incident).max(0.0)
}

/// Blinn-Phong factor for one light, with `view` pointing back at the eye.
fn blinn_phong_term(intensity: f32, normal: Vec3, view: Vec3, incident: Vec3, exponent: f32) -> f32 {
    let half = (view - incident).normalize();
    // A degenerate half vector is NaN; max maps it to zero
    intensity * normal.dot(half).max(0.0).powf(exponent)
}

/// A fixed color, independent of lighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticColorShader {
    pub surface_color: Color,
}

impl StaticColorShader {
    pub fn new(surface_color: Color) -> Self {
        Self { surface_color }
    }
}

impl Shader for StaticColorShader {
    fn shade(&self, _ctx: &ShadingContext<'_>, _ray: &Ray, _hit: &HitRecord<'_>, _depth: u32) -> Color {
        self.surface_color
    }
}

/// Lambertian (diffuse) shading without shadows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LambertShader {
    pub surface_color: Color,
}

impl LambertShader {
    pub fn new(surface_color: Color) -> Self {
        Self { surface_color }
    }
}

impl Shader for LambertShader {
    fn shade(&self, ctx: &ShadingContext<'_>, _ray: &Ray, hit: &HitRecord<'_>, _depth: u32) -> Color {
        let factor: f32 = ctx
            .lights
            .iter()
            .map(|light| lambert_term(light.intensity(), hit.normal, light.incident_direction(hit.point)))
            .sum();

        self.surface_color.scale(factor)
    }
}

/// Blinn-Phong specular highlights without shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinnPhongShader {
    pub phong_exponent: f32,
    pub specular_color: Color,
}

impl BlinnPhongShader {
    pub fn new(phong_exponent: f32, specular_color: Color) -> Self {
        Self {
            phong_exponent,
            specular_color,
        }
    }
}

impl Default for BlinnPhongShader {
    fn default() -> Self {
        Self::new(1.0, Color::WHITE)
    }
}

impl Shader for BlinnPhongShader {
    fn shade(&self, ctx: &ShadingContext<'_>, ray: &Ray, hit: &HitRecord<'_>, _depth: u32) -> Color {
        let view = -ray.direction().normalize();
        let factor: f32 = ctx
            .lights
            .iter()
            .map(|light| {
                let incident = light.incident_direction(hit.point);
                blinn_phong_term(light.intensity(), hit.normal, view, incident, self.phong_exponent)
            })
            .sum();

        self.specular_color.scale(factor)
    }
}

/// Ambient + Lambert + Blinn-Phong, with shadow rays.
///
/// A light whose shadow ray is blocked adds neither a diffuse nor a
/// specular term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardShader {
    pub ambient_intensity: f32,
    pub ambient_color: Color,
    pub phong_exponent: f32,
    pub surface_color: Color,
    pub specular_color: Color,
}

impl StandardShader {
    pub fn new(surface_color: Color, specular_color: Color, ambient_color: Color) -> Self {
        Self {
            surface_color,
            specular_color,
            ambient_color,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, intensity: f32, color: Color) -> Self {
        self.ambient_intensity = intensity;
        self.ambient_color = color;
        self
    }

    pub fn with_phong_exponent(mut self, phong_exponent: f32) -> Self {
        self.phong_exponent = phong_exponent;
        self
    }
}

impl Default for StandardShader {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.0,
            ambient_color: Color::WHITE,
            phong_exponent: 1.0,
            surface_color: Color::WHITE,
            specular_color: Color::WHITE,
        }
    }
}

impl Shader for StandardShader {
    fn shade(&self, ctx: &ShadingContext<'_>, ray: &Ray, hit: &HitRecord<'_>, _depth: u32) -> Color {
        let view = -ray.direction().normalize();
        let mut diffuse = 0.0;
        let mut specular = 0.0;

        for light in ctx.lights {
            if ctx.is_shadowed(hit.point, light) {
                continue;
            }
            let incident = light.incident_direction(hit.point);
            diffuse += lambert_term(light.intensity(), hit.normal, incident);
            specular += blinn_phong_term(light.intensity(), hit.normal, view, incident, self.phong_exponent);
        }

        Color::from_vec3(
            self.ambient_color.to_vec3() * self.ambient_intensity
                + self.surface_color.to_vec3() * diffuse
                + self.specular_color.to_vec3() * specular,
        )
    }
}

/// Perfect mirror blended with a flat specular color.
///
/// The reflected ray is resolved with the same entry point as camera rays.
/// Recursion stops at `RenderSettings::max_bounces`, and both that limit and
/// a reflected ray that escapes the scene yield `background`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorShader {
    pub background: Color,
    pub specular_color: Color,
    specular_weight: f32,
}

impl MirrorShader {
    pub fn new(background: Color, specular_color: Color, specular_weight: f32) -> Self {
        let mut shader = Self {
            background,
            specular_color,
            specular_weight: 0.0,
        };
        shader.set_specular_weight(specular_weight);
        shader
    }

    pub fn specular_weight(&self) -> f32 {
        self.specular_weight
    }

    /// Set the weight of the flat specular color, clamped to `[0, 1]`.
    pub fn set_specular_weight(&mut self, specular_weight: f32) {
        self.specular_weight = if specular_weight.is_nan() {
            0.0
        } else {
            specular_weight.clamp(0.0, 1.0)
        };
    }

    fn reflected_color(&self, ctx: &ShadingContext<'_>, ray: &Ray, hit: &HitRecord<'_>, depth: u32) -> Color {
        if depth >= ctx.settings.max_bounces {
            log::trace!("mirror recursion stopped at depth {depth}");
            return self.background;
        }

        let d = ray.direction().normalize();
        let r = d - 2.0 * d.dot(hit.normal) * hit.normal;
        let reflection = Ray::new(hit.point + ctx.settings.shadow_bias * r, r);

        ctx.trace(&reflection, depth + 1)
            .map_or(self.background, |shading| shading.color)
    }
}

impl Default for MirrorShader {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE, 0.0)
    }
}

impl Shader for MirrorShader {
    fn shade(&self, ctx: &ShadingContext<'_>, ray: &Ray, hit: &HitRecord<'_>, depth: u32) -> Color {
        if self.specular_weight >= 1.0 {
            return self.specular_color;
        }

        let w = self.specular_weight;
        let reflected = self.reflected_color(ctx, ray, hit, depth);
        Color::from_vec3(w * self.specular_color.to_vec3() + (1.0 - w) * reflected.to_vec3())
    }
}
