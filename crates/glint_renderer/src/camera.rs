//! Camera models: map a pixel index to a world-space ray.

use crate::Ray;
use glint_math::Vec3;

/// The world's up direction, used to derive a camera basis.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// How rays leave the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel rays along the view direction, one origin per pixel.
    Orthographic,
    /// Rays from the viewpoint through the image plane `focal_length` ahead.
    Perspective { focal_length: f32 },
}

/// Camera for generating rays into the scene.
///
/// The basis `(u, v, w)` is orthonormal with `u` right, `v` up and `w`
/// pointing against the view direction. The image plane spans
/// `[left, right] x [bottom, top]`, straddling zero on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    resolution_x: u32,
    resolution_y: u32,
    viewpoint: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    projection: Projection,
}

impl Camera {
    /// Orthographic camera at `viewpoint` looking along `viewing_direction`.
    ///
    /// # Panics
    ///
    /// Panics on a zero resolution or a direction parallel to [`WORLD_UP`].
    pub fn orthographic(viewpoint: Vec3, viewing_direction: Vec3, resolution_x: u32, resolution_y: u32) -> Self {
        let mut camera = Self {
            viewpoint,
            ..Default::default()
        };
        camera.set_resolution(resolution_x, resolution_y);
        camera.set_orientation(viewing_direction);
        camera
    }

    /// Perspective camera with the image plane `focal_length` in front of
    /// the viewpoint.
    pub fn perspective(
        viewpoint: Vec3,
        viewing_direction: Vec3,
        resolution_x: u32,
        resolution_y: u32,
        focal_length: f32,
    ) -> Self {
        let mut camera = Self::orthographic(viewpoint, viewing_direction, resolution_x, resolution_y);
        camera.projection = Projection::Perspective { focal_length };
        camera
    }

    /// Set an explicit basis.
    pub fn with_basis(mut self, u: Vec3, v: Vec3, w: Vec3) -> Self {
        self.set_basis(u, v, w);
        self
    }

    /// Set the image-plane rectangle.
    pub fn with_bounds(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.set_bounds(left, right, top, bottom);
        self
    }

    pub fn resolution_x(&self) -> u32 {
        self.resolution_x
    }

    pub fn resolution_y(&self) -> u32 {
        self.resolution_y
    }

    pub fn viewpoint(&self) -> Vec3 {
        self.viewpoint
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_viewpoint(&mut self, viewpoint: Vec3) {
        self.viewpoint = viewpoint;
    }

    pub fn set_resolution(&mut self, resolution_x: u32, resolution_y: u32) {
        assert!(
            resolution_x > 0 && resolution_y > 0,
            "camera resolution must be positive, got {resolution_x}x{resolution_y}"
        );
        self.resolution_x = resolution_x;
        self.resolution_y = resolution_y;
    }

    pub fn set_basis(&mut self, u: Vec3, v: Vec3, w: Vec3) {
        self.u = u;
        self.v = v;
        self.w = w;
    }

    /// Point the camera along `viewing_direction`, keeping `v` as close to
    /// [`WORLD_UP`] as possible.
    ///
    /// # Panics
    ///
    /// Panics if the direction is zero or parallel to [`WORLD_UP`].
    pub fn set_orientation(&mut self, viewing_direction: Vec3) {
        let w = -viewing_direction.normalize_or_zero();
        let right = WORLD_UP.cross(w);
        assert!(
            w != Vec3::ZERO && right.length_squared() > 1e-12,
            "viewing direction {viewing_direction} is degenerate or parallel to world up"
        );

        self.u = right.normalize();
        self.v = w.cross(self.u);
        self.w = w;
    }

    /// Set the image-plane rectangle.
    ///
    /// # Panics
    ///
    /// Panics unless `left < 0 < right` and `bottom < 0 < top`.
    pub fn set_bounds(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        assert!(left < 0.0 && right > 0.0, "horizontal bounds must straddle zero");
        assert!(bottom < 0.0 && top > 0.0, "vertical bounds must straddle zero");
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
    }

    pub fn set_focal_length(&mut self, focal_length: f32) {
        self.projection = Projection::Perspective { focal_length };
    }

    /// Image-plane coordinates of the center of pixel `(i, j)`.
    fn plane_coordinates(&self, i: u32, j: u32) -> (f32, f32) {
        let u = self.left + (self.right - self.left) * (i as f32 + 0.5) / self.resolution_x as f32;
        let v = self.bottom + (self.top - self.bottom) * (j as f32 + 0.5) / self.resolution_y as f32;
        (u, v)
    }

    /// Generate the viewing ray through pixel `(i, j)`; `(0, 0)` is the
    /// bottom-left pixel.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the resolution.
    pub fn ray_for_pixel(&self, i: u32, j: u32) -> Ray {
        assert!(
            i < self.resolution_x && j < self.resolution_y,
            "pixel ({i}, {j}) outside {}x{} image",
            self.resolution_x,
            self.resolution_y
        );

        let (pu, pv) = self.plane_coordinates(i, j);
        match self.projection {
            Projection::Orthographic => {
                Ray::new(self.viewpoint + pu * self.u + pv * self.v, -self.w)
            }
            Projection::Perspective { focal_length } => {
                Ray::new(self.viewpoint, -focal_length * self.w + pu * self.u + pv * self.v)
            }
        }
    }
}

impl Default for Camera {
    /// 64x64 orthographic camera at the origin looking along +Y.
    fn default() -> Self {
        Self {
            resolution_x: 64,
            resolution_y: 64,
            viewpoint: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Z,
            w: Vec3::NEG_Y,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            projection: Projection::Orthographic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_orientation_basis() {
        let camera = Camera::orthographic(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 4, 4);
        let (u, v, w) = camera.basis();

        assert!((w - Vec3::NEG_X).length() < EPS);
        assert!((u - Vec3::NEG_Y).length() < EPS);
        assert!((v - Vec3::Z).length() < EPS);
        assert!(u.dot(v).abs() < EPS && v.dot(w).abs() < EPS && u.dot(w).abs() < EPS);
    }

    #[test]
    fn test_default_matches_derived_orientation() {
        let derived = Camera::orthographic(Vec3::ZERO, Vec3::Y, 64, 64);
        assert_eq!(derived.basis(), Camera::default().basis());
    }

    #[test]
    fn test_orthographic_rays() {
        let camera = Camera::orthographic(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, 2, 2);

        // Pixel (0, 0) is bottom-left
        let ray = camera.ray_for_pixel(0, 0);
        assert!((ray.origin - Vec3::new(-0.5, 0.0, 0.5)).length() < EPS);
        assert_eq!(ray.direction, Vec3::Y);

        let ray = camera.ray_for_pixel(1, 1);
        assert!((ray.origin - Vec3::new(0.5, 0.0, 1.5)).length() < EPS);
        assert_eq!(ray.direction, Vec3::Y);
    }

    #[test]
    fn test_perspective_rays() {
        let camera = Camera::perspective(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 3, 3, 2.0);

        let center = camera.ray_for_pixel(1, 1);
        assert_eq!(center.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!((center.direction - Vec3::new(0.0, 2.0, 0.0)).length() < EPS);

        let corner = camera.ray_for_pixel(0, 2);
        let expected = Vec3::new(-2.0 / 3.0, 2.0, 2.0 / 3.0);
        assert!((corner.direction - expected).length() < EPS);
    }

    #[test]
    fn test_bounds_shift_image_plane() {
        let camera = Camera::orthographic(Vec3::ZERO, Vec3::Y, 1, 1).with_bounds(-1.0, 3.0, 1.0, -3.0);

        let ray = camera.ray_for_pixel(0, 0);
        assert!((ray.origin - Vec3::new(1.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_range() {
        Camera::default().ray_for_pixel(64, 0);
    }

    #[test]
    #[should_panic]
    fn test_orientation_parallel_to_up() {
        Camera::orthographic(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), 8, 8);
    }

    #[test]
    #[should_panic]
    fn test_bounds_must_straddle_zero() {
        Camera::default().with_bounds(0.5, 1.0, 1.0, -1.0);
    }
}
