//! Glint Renderer - CPU Ray Casting
//!
//! A Whitted-style ray caster: primary rays from an orthographic or
//! perspective camera, local shading from directional and point lights,
//! hard shadows and bounded mirror reflection. Output goes to an in-memory
//! pixel buffer that can be written as BMP.

mod hittable;
mod surface;
mod sphere;
mod triangle;
mod color;
mod light;
mod renderer;
mod shader;
mod camera;
mod buffer;
pub mod bmp;
mod scene;

pub use hittable::{HitRecord, Hittable, Group};
pub use surface::{Geometry, Surface};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use color::Color;
pub use light::{Light, DirectionalLight, PointLight};
pub use renderer::{RenderSettings, Shading, ShadingContext};
pub use shader::{Shader, StaticColorShader, LambertShader, BlinnPhongShader, StandardShader, MirrorShader};
pub use camera::{Camera, Projection, WORLD_UP};
pub use buffer::PixelBuffer;
pub use bmp::{ExportError, ExportResult};
pub use scene::Scene;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Vec3, Aabb, Interval, Ray};
