//! Orthographic view into the volume.
//!
//! Image plane pixel `(u, v)` maps to ray origin `translation + rotation * (u, v, 0)`,
//! all rays share direction `rotation * (0, 0, 1)`.

use nalgebra::{vector, Matrix3, Point3, Vector2, Vector3};

use crate::common::{BoundBox, Ray};

mod orbit_camera;

pub use orbit_camera::OrbitCamera;

/// Largest allowed pitch, in degrees.
/// Looking straight up or down leaves the horizontal axis undefined.
pub const PITCH_LIMIT: f32 = 89.0;

/// Discrete view change, usually coming from user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Rotate around volume center, degrees
    Rotate { yaw: f32, pitch: f32 },
    /// Move image plane within its own plane, pixels
    Translate { x: f32, y: f32 },
}

/// Mapping from image plane to volume space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub rotation: Matrix3<f32>,
    pub translation: Vector3<f32>,
}

impl ViewTransform {
    pub fn new(rotation: Matrix3<f32>, translation: Vector3<f32>) -> ViewTransform {
        ViewTransform {
            rotation,
            translation,
        }
    }

    /// Plane at `z = 0`, looking along `+z`
    pub fn identity() -> ViewTransform {
        ViewTransform::new(Matrix3::identity(), Vector3::zeros())
    }

    /// View looking at the center of `bound_box`.
    ///
    /// `yaw` and `pitch` in degrees, `pitch` is clipped to [`PITCH_LIMIT`].
    /// Yaw of 90 and pitch of 0 looks along `+z`.
    /// Image plane is centered on the box center shifted by `pan` (pixels)
    /// and placed outside the box, so that every ray starts in front of the volume.
    pub fn orbit(
        bound_box: &BoundBox,
        resolution: (usize, usize),
        yaw: f32,
        pitch: f32,
        pan: Vector2<f32>,
    ) -> ViewTransform {
        let rotation = look_rotation(yaw, pitch);
        let direction = rotation.column(2).into_owned();

        let distance = bound_box.dims().magnitude() / 2.0 + 1.0;
        let half_plane = vector![
            (resolution.0 as f32 - 1.0) / 2.0,
            (resolution.1 as f32 - 1.0) / 2.0,
            0.0
        ];
        let pan = vector![pan.x, pan.y, 0.0];

        let translation = bound_box.center().coords - distance * direction
            + rotation * pan
            - rotation * half_plane;

        ViewTransform::new(rotation, translation)
    }

    /// Direction shared by all rays
    pub fn direction(&self) -> Vector3<f32> {
        self.rotation * vector![0.0, 0.0, 1.0]
    }

    pub fn ray_origin(&self, u: f32, v: f32) -> Point3<f32> {
        (self.translation + self.rotation * vector![u, v, 0.0]).into()
    }

    /// Ray of pixel in column `u` and row `v`
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new(self.ray_origin(u, v), self.direction())
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform::identity()
    }
}

/// Rotation with columns right, up, forward
fn look_rotation(yaw: f32, pitch: f32) -> Matrix3<f32> {
    let yaw = yaw.to_radians();
    let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT).to_radians();

    let forward = vector![
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos()
    ]
    .normalize();
    let world_up = vector![0.0, 1.0, 0.0];
    let right = world_up.cross(&forward).normalize();
    let up = forward.cross(&right);

    Matrix3::from_columns(&[right, up, forward])
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::point;

    use super::*;

    fn volume_box() -> BoundBox {
        BoundBox::new(point![0.0, 0.0, 0.0], point![63.0, 31.0, 15.0])
    }

    #[test]
    fn identity_rays() {
        let view = ViewTransform::identity();
        let ray = view.get_ray(3.0, 7.0);

        assert_eq!(ray.origin, point![3.0, 7.0, 0.0]);
        assert_eq!(ray.direction, vector![0.0, 0.0, 1.0]);
    }

    #[test]
    fn front_view_is_axis_aligned() {
        let view = ViewTransform::orbit(&volume_box(), (64, 32), 90.0, 0.0, Vector2::zeros());

        assert_relative_eq!(view.rotation, Matrix3::identity(), epsilon = 1e-6);

        // plane covers the front face pixel for voxel
        let origin = view.ray_origin(0.0, 0.0);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-4);
        assert!(origin.z < 0.0);
    }

    #[test]
    fn center_pixel_looks_at_center() {
        let bbox = volume_box();
        let resolution = (41, 23);
        let center_pixel = (20.0, 11.0);

        for (yaw, pitch) in [(0.0, 0.0), (37.0, 12.0), (-120.0, -60.0), (200.0, 88.0)] {
            let view = ViewTransform::orbit(&bbox, resolution, yaw, pitch, Vector2::zeros());
            let ray = view.get_ray(center_pixel.0, center_pixel.1);

            // distance of box center from the ray line
            let to_center = bbox.center() - ray.origin;
            let along = to_center.dot(&ray.direction);
            assert!(along > 0.0);
            assert_relative_eq!((to_center - along * ray.direction).magnitude(), 0.0, epsilon = 1e-3);

            // starts outside
            assert!(!bbox.contains(&ray.origin));
        }
    }

    #[test]
    fn rotation_is_proper() {
        let view = ViewTransform::orbit(&volume_box(), (8, 8), 33.0, -47.0, Vector2::zeros());
        let r = view.rotation;

        assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-5);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clipped() {
        let bbox = volume_box();
        let clipped = ViewTransform::orbit(&bbox, (8, 8), 10.0, 90.0, Vector2::zeros());
        let limit = ViewTransform::orbit(&bbox, (8, 8), 10.0, PITCH_LIMIT, Vector2::zeros());

        assert_eq!(clipped, limit);
        assert!(clipped.rotation.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn pan_shifts_plane() {
        let bbox = volume_box();
        let still = ViewTransform::orbit(&bbox, (8, 8), 60.0, 20.0, Vector2::zeros());
        let panned = ViewTransform::orbit(&bbox, (8, 8), 60.0, 20.0, vector![2.0, -3.0]);

        let shift = panned.ray_origin(0.0, 0.0) - still.ray_origin(0.0, 0.0);
        assert_relative_eq!(shift, still.rotation * vector![2.0, -3.0, 0.0], epsilon = 1e-4);
        assert_eq!(still.direction(), panned.direction());
    }
}
