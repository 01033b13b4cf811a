// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, -2.0, -3.0);

        assert_eq!(a + b, Vec3::ZERO);
        assert_eq!(a - b, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(a.dot(b), -14.0);
        assert_eq!(a.cross(2.0 * a), Vec3::ZERO);
        assert!((a.length() - 3.74165).abs() < 0.001);
    }
}
