//! JSON scene descriptions.
//!
//! A scene file mirrors the renderer's object model: one camera, a list of
//! lights and a tree of surfaces, each optionally carrying a shader. Values
//! the renderer would reject with a panic are checked here first and
//! reported as [`SceneFileError::Invalid`].

use glint_math::Vec3;
use glint_renderer::{
    BlinnPhongShader, Camera, Color, Group, LambertShader, Light, MirrorShader, RenderSettings,
    Scene, Shader, Sphere, StandardShader, StaticColorShader, Surface, Triangle, WORLD_UP,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

type Result<T> = std::result::Result<T, SceneFileError>;

/// Largest mirror recursion depth a scene file may request.
///
/// Mirror bounces recurse on the render thread's stack.
pub const MAX_BOUNCES_LIMIT: u32 = 64;

fn invalid<T>(message: impl Into<String>) -> Result<T> {
    Err(SceneFileError::Invalid(message.into()))
}

fn default_resolution() -> [u32; 2] {
    [256, 256]
}

fn default_focal_length() -> f32 {
    1.0
}

fn default_one() -> f32 {
    1.0
}

fn default_white() -> Color {
    Color::WHITE
}

/// Image-plane rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDesc {
    Orthographic {
        viewpoint: Vec3,
        direction: Vec3,
        #[serde(default)]
        bounds: Option<Bounds>,
    },
    Perspective {
        viewpoint: Vec3,
        direction: Vec3,
        #[serde(default = "default_focal_length")]
        focal_length: f32,
        #[serde(default)]
        bounds: Option<Bounds>,
    },
}

impl CameraDesc {
    fn build(&self, [width, height]: [u32; 2]) -> Result<Camera> {
        if width == 0 || height == 0 {
            return invalid(format!("resolution must be positive, got {width}x{height}"));
        }

        let (viewpoint, direction, bounds) = match *self {
            CameraDesc::Orthographic { viewpoint, direction, bounds } => (viewpoint, direction, bounds),
            CameraDesc::Perspective { viewpoint, direction, bounds, .. } => (viewpoint, direction, bounds),
        };

        let w = -direction.normalize_or_zero();
        if w == Vec3::ZERO || WORLD_UP.cross(w).length_squared() <= 1e-12 {
            return invalid(format!("camera direction {direction} is zero or parallel to world up"));
        }

        let mut camera = match *self {
            CameraDesc::Orthographic { .. } => Camera::orthographic(viewpoint, direction, width, height),
            CameraDesc::Perspective { focal_length, .. } => {
                if focal_length.is_nan() || focal_length <= 0.0 {
                    return invalid(format!("focal length must be positive, got {focal_length}"));
                }
                Camera::perspective(viewpoint, direction, width, height, focal_length)
            }
        };

        if let Some(b) = bounds {
            if !(b.left < 0.0 && b.right > 0.0 && b.bottom < 0.0 && b.top > 0.0) {
                return invalid(format!("camera bounds {b:?} must straddle zero"));
            }
            camera.set_bounds(b.left, b.right, b.top, b.bottom);
        }

        Ok(camera)
    }
}

/// Shading rule attached to a surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShaderDesc {
    Static {
        color: Color,
    },
    Lambert {
        color: Color,
    },
    BlinnPhong {
        #[serde(default = "default_one")]
        phong_exponent: f32,
        #[serde(default = "default_white")]
        specular_color: Color,
    },
    Standard {
        #[serde(default = "default_white")]
        surface_color: Color,
        #[serde(default = "default_white")]
        specular_color: Color,
        #[serde(default = "default_white")]
        ambient_color: Color,
        #[serde(default)]
        ambient_intensity: f32,
        #[serde(default = "default_one")]
        phong_exponent: f32,
    },
    Mirror {
        #[serde(default)]
        background: Color,
        #[serde(default = "default_white")]
        specular_color: Color,
        #[serde(default)]
        specular_weight: f32,
    },
}

impl ShaderDesc {
    pub fn build(&self) -> Box<dyn Shader> {
        match *self {
            ShaderDesc::Static { color } => Box::new(StaticColorShader::new(color)),
            ShaderDesc::Lambert { color } => Box::new(LambertShader::new(color)),
            ShaderDesc::BlinnPhong { phong_exponent, specular_color } => {
                Box::new(BlinnPhongShader::new(phong_exponent, specular_color))
            }
            ShaderDesc::Standard {
                surface_color,
                specular_color,
                ambient_color,
                ambient_intensity,
                phong_exponent,
            } => Box::new(
                StandardShader::new(surface_color, specular_color, ambient_color)
                    .with_ambient(ambient_intensity, ambient_color)
                    .with_phong_exponent(phong_exponent),
            ),
            ShaderDesc::Mirror { background, specular_color, specular_weight } => {
                Box::new(MirrorShader::new(background, specular_color, specular_weight))
            }
        }
    }
}

/// A node in the surface tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        shader: Option<ShaderDesc>,
    },
    Triangle {
        vertices: [Vec3; 3],
        /// Reorder the vertices so the normal points this way
        #[serde(default)]
        facing: Option<Vec3>,
        #[serde(default)]
        shader: Option<ShaderDesc>,
    },
    Group {
        #[serde(default)]
        surfaces: Vec<SurfaceDesc>,
        #[serde(default)]
        shader: Option<ShaderDesc>,
    },
}

impl SurfaceDesc {
    pub fn build(&self) -> Result<Surface> {
        let (mut surface, shader) = match self {
            SurfaceDesc::Sphere { center, radius, shader } => {
                if radius.is_nan() || *radius <= 0.0 {
                    return invalid(format!("sphere radius must be positive, got {radius}"));
                }
                (Surface::new(Sphere::new(*center, *radius)), shader)
            }
            SurfaceDesc::Triangle { vertices: [v1, v2, v3], facing, shader } => {
                let triangle = match facing {
                    Some(facing) => Triangle::facing(*v1, *v2, *v3, *facing),
                    None => Triangle::new(*v1, *v2, *v3),
                };
                if !triangle.unit_normal().is_finite() {
                    return invalid(format!("triangle {v1}, {v2}, {v3} is degenerate"));
                }
                (Surface::new(triangle), shader)
            }
            SurfaceDesc::Group { surfaces, shader } => {
                let mut group = Group::new();
                for child in surfaces {
                    group.add(child.build()?);
                }
                (Surface::new(group), shader)
            }
        };

        surface.set_boxed_shader(shader.as_ref().map(ShaderDesc::build));
        Ok(surface)
    }
}

/// Complete scene description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneFile {
    pub camera: CameraDesc,
    #[serde(default = "default_resolution")]
    pub resolution: [u32; 2],
    #[serde(default)]
    pub background: Color,
    #[serde(default)]
    pub settings: RenderSettings,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading scene from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The built-in demo: a mirror sphere and two shaded spheres over a floor.
    pub fn demo() -> Result<Self> {
        Self::from_json(include_str!("../../../scenes/demo.json"))
    }

    /// Build a renderable scene.
    pub fn build(&self) -> Result<Scene> {
        if self.settings.max_bounces > MAX_BOUNCES_LIMIT {
            return invalid(format!(
                "max_bounces {} exceeds the limit of {MAX_BOUNCES_LIMIT}",
                self.settings.max_bounces
            ));
        }

        let camera = self.camera.build(self.resolution)?;

        let mut world = Group::new();
        for desc in &self.surfaces {
            world.add(desc.build()?);
        }

        let mut scene = Scene::new(camera);
        scene.set_surface(world);
        scene.set_background(self.background);
        scene.set_settings(self.settings);

        for light in &self.lights {
            if let Light::Directional(directional) = light {
                if directional.direction == Vec3::ZERO {
                    return invalid("directional light has a zero direction");
                }
            }
            scene.add_light(*light);
        }

        log::debug!(
            "Built scene: {} top-level surfaces, {} lights",
            self.surfaces.len(),
            self.lights.len()
        );
        Ok(scene)
    }
}
