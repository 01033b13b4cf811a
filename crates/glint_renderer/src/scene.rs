//! Scene: camera, world, lights and the image they render into.

use crate::bmp::{self, ExportResult};
use crate::renderer::{Shading, ShadingContext};
use crate::{Camera, Color, Light, PixelBuffer, RenderSettings, Surface};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// A renderable scene.
///
/// The pixel buffer always matches the camera resolution; replacing the
/// camera reallocates it.
pub struct Scene {
    camera: Camera,
    surface: Surface,
    lights: Vec<Light>,
    background: Color,
    settings: RenderSettings,
    pixels: PixelBuffer,
}

impl Scene {
    /// Empty scene with a black background.
    pub fn new(camera: Camera) -> Self {
        Self {
            pixels: PixelBuffer::new(camera.resolution_x(), camera.resolution_y()),
            camera,
            surface: Surface::default(),
            lights: Vec::new(),
            background: Color::BLACK,
            settings: RenderSettings::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera and reallocate the pixel buffer for its resolution.
    pub fn set_camera(&mut self, camera: Camera) {
        log::debug!(
            "Camera set, allocating {}x{} pixel buffer",
            camera.resolution_x(),
            camera.resolution_y()
        );
        self.pixels = PixelBuffer::new(camera.resolution_x(), camera.resolution_y());
        self.camera = camera;
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn set_surface(&mut self, surface: impl Into<Surface>) {
        self.surface = surface.into();
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Remove the light at `index`, if there is one.
    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Color written for pixels whose primary ray hits nothing.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Shading context over this scene's world and lights.
    pub fn context(&self) -> ShadingContext<'_> {
        ShadingContext::new(&self.surface, &self.lights, self.settings)
    }

    /// Trace the primary ray through pixel (i, j) without touching the buffer.
    pub fn shade_pixel(&self, i: u32, j: u32) -> Option<Shading<'_>> {
        let ray = self.camera.ray_for_pixel(i, j);
        self.context().trace(&ray, 0)
    }

    /// Render every pixel into the buffer.
    ///
    /// Each pixel depends only on immutable scene state, so rendering twice
    /// produces the same image.
    pub fn render(&mut self) {
        let start = Instant::now();
        let width = self.camera.resolution_x();
        let height = self.camera.resolution_y();
        debug_assert_eq!((self.pixels.width(), self.pixels.height()), (width, height));

        log::info!(
            "Rendering {}x{} ({} lights, {})",
            width,
            height,
            self.lights.len(),
            if self.settings.parallel { "parallel" } else { "sequential" }
        );

        let ctx = ShadingContext::new(&self.surface, &self.lights, self.settings);
        let camera = &self.camera;
        let background = self.background;

        let render_row = |(j, row): (usize, &mut [Color])| {
            for (i, pixel) in row.iter_mut().enumerate() {
                let ray = camera.ray_for_pixel(i as u32, j as u32);
                *pixel = ctx
                    .trace(&ray, 0)
                    .map_or(background, |shading| shading.color);
            }
        };

        if self.settings.parallel {
            self.pixels.par_rows_mut().enumerate().for_each(render_row);
        } else {
            self.pixels.rows_mut().enumerate().for_each(render_row);
        }

        log::info!("Render complete in {:.2?}", start.elapsed());
    }

    /// The rendered image (black until [`Scene::render`] runs).
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Write the current pixels as a 24-bit BMP.
    pub fn export_bmp(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        bmp::save_bmp(path, &self.pixels)
    }

    /// Write the luminance of the current pixels as a grayscale BMP.
    pub fn export_grayscale_bmp(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let bytes = bmp::encode_grayscale(
            self.pixels.width(),
            self.pixels.height(),
            &self.pixels.to_grayscale(),
        )?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, LambertShader, Sphere, StaticColorShader};
    use glint_math::Vec3;

    fn lit_sphere_scene() -> Scene {
        let camera = Camera::orthographic(Vec3::ZERO, Vec3::X, 5, 5);
        let mut scene = Scene::new(camera);
        scene.set_surface(
            Surface::new(Sphere::new(Vec3::new(8.0, 0.0, 0.0), 2.0))
                .with_shader(LambertShader::new(Color::WHITE)),
        );
        scene.add_light(Light::directional(Vec3::X, 1.0));
        scene
    }

    #[test]
    fn test_lambert_sphere_center_pixel() {
        let mut scene = lit_sphere_scene();

        let shading = scene.shade_pixel(2, 2).expect("center ray should hit");
        assert!((shading.hit.normal - Vec3::NEG_X).length() < 1e-5);
        assert!((shading.hit.t - 6.0).abs() < 1e-5);

        scene.render();
        assert_eq!(scene.pixels().get(2, 2), Color::WHITE);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut scene = lit_sphere_scene();
        scene.render();
        let first = scene.pixels().clone();
        scene.render();
        assert_eq!(&first, scene.pixels());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut scene = lit_sphere_scene();
        scene.set_camera(Camera::perspective(Vec3::ZERO, Vec3::X, 16, 12, 2.0));
        scene.render();
        let parallel = scene.pixels().clone();

        scene.set_settings(RenderSettings {
            parallel: false,
            ..RenderSettings::default()
        });
        scene.render();
        assert_eq!(&parallel, scene.pixels());
    }

    #[test]
    fn test_background_on_miss() {
        let mut scene = Scene::new(Camera::orthographic(Vec3::ZERO, Vec3::X, 4, 4));
        scene.set_background(Color::new(10, 20, 30));
        scene.set_surface(Group::new());
        scene.render();

        assert!(scene.pixels().pixels().iter().all(|&c| c == Color::new(10, 20, 30)));
    }

    #[test]
    fn test_surface_without_shader_is_black() {
        let mut scene = lit_sphere_scene();
        scene.set_background(Color::WHITE);
        scene.set_surface(Sphere::new(Vec3::new(8.0, 0.0, 0.0), 2.0));
        scene.render();
        assert_eq!(scene.pixels().get(2, 2), Color::BLACK);
    }

    #[test]
    fn test_set_camera_reallocates() {
        let mut scene = lit_sphere_scene();
        scene.render();
        scene.set_camera(Camera::orthographic(Vec3::ZERO, Vec3::X, 7, 3));

        assert_eq!(scene.pixels().width(), 7);
        assert_eq!(scene.pixels().height(), 3);
        assert!(scene.pixels().pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_light_management() {
        let mut scene = lit_sphere_scene();
        scene.add_light(Light::point(Vec3::ZERO, 0.5));
        assert_eq!(scene.lights().len(), 2);

        assert!(scene.remove_light(5).is_none());
        let removed = scene.remove_light(0).unwrap();
        assert_eq!(removed.intensity(), 1.0);
        assert_eq!(scene.lights().len(), 1);

        scene.clear_lights();
        assert!(scene.lights().is_empty());
    }

    #[test]
    fn test_static_shader_group_fills_frame() {
        let mut scene = Scene::new(Camera::orthographic(Vec3::ZERO, Vec3::X, 3, 3));
        let group = Group::new().with(Sphere::new(Vec3::new(5.0, 0.0, 0.0), 3.0));
        scene.set_surface(Surface::new(group).with_shader(StaticColorShader::new(Color::new(0, 200, 0))));
        scene.render();

        assert!(scene.pixels().pixels().iter().all(|&c| c == Color::new(0, 200, 0)));
    }

    #[test]
    fn test_export_bmp() {
        let mut scene = lit_sphere_scene();
        scene.render();

        let path = std::env::temp_dir().join(format!("glint_scene_{}.bmp", std::process::id()));
        scene.export_bmp(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(bytes, bmp::encode_rgb(scene.pixels()).unwrap());
    }
}
