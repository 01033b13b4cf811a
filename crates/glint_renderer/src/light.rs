//! Light sources.

use crate::{Color, Ray};
use glint_math::Vec3;
use serde::Deserialize;

/// A light infinitely far away, shining along one direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels (not necessarily normalized)
    pub direction: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Reserved; shading does not use it yet
    #[serde(default = "default_tint")]
    pub tint: Color,
}

/// A light radiating from a single point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Reserved; shading does not use it yet
    #[serde(default = "default_tint")]
    pub tint: Color,
}

fn default_intensity() -> f32 {
    1.0
}

fn default_tint() -> Color {
    Color::WHITE
}

/// The closed set of light kinds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
}

impl Light {
    /// A directional light shining along `direction`.
    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Light::Directional(DirectionalLight {
            direction,
            intensity,
            tint: Color::WHITE,
        })
    }

    /// A point light at `position`.
    pub fn point(position: Vec3, intensity: f32) -> Self {
        Light::Point(PointLight {
            position,
            intensity,
            tint: Color::WHITE,
        })
    }

    /// Replace the (currently unused) tint.
    pub fn with_tint(mut self, color: Color) -> Self {
        match &mut self {
            Light::Directional(light) => light.tint = color,
            Light::Point(light) => light.tint = color,
        }
        self
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Directional(light) => light.intensity,
            Light::Point(light) => light.intensity,
        }
    }

    pub fn tint(&self) -> Color {
        match self {
            Light::Directional(light) => light.tint,
            Light::Point(light) => light.tint,
        }
    }

    /// Unit direction the light travels to reach `surface_point`.
    pub fn incident_direction(&self, surface_point: Vec3) -> Vec3 {
        match self {
            Light::Directional(light) => light.direction.normalize(),
            Light::Point(light) => (surface_point - light.position).normalize(),
        }
    }

    /// Unit direction from `surface_point` toward the light.
    pub fn direction_to_light(&self, surface_point: Vec3) -> Vec3 {
        -self.incident_direction(surface_point)
    }

    /// Ray parameter at which `ray` reaches the light.
    ///
    /// Directional lights are at infinity, so this is `max_distance`. For a
    /// point light the distance is divided by the ray's direction length so
    /// the result is in the ray's own parameterization.
    pub fn time_to_light(&self, ray: &Ray, max_distance: f32) -> f32 {
        match self {
            Light::Directional(_) => max_distance,
            Light::Point(light) => {
                (light.position - ray.origin()).length() / ray.direction().length()
            }
        }
    }
}
