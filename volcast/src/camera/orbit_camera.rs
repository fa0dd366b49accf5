use nalgebra::{vector, Vector2};

use crate::common::BoundBox;

use super::{ViewCommand, ViewTransform, PITCH_LIMIT};

/// Camera orbiting around the volume center.
///
/// Holds yaw, pitch (degrees) and pan offset of the image plane.
/// Every command produces a new [`ViewTransform`], which should trigger one re-cast.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    bound_box: BoundBox,
    resolution: (usize, usize),
    yaw: f32,
    pitch: f32,
    pan: Vector2<f32>,
}

impl OrbitCamera {
    /// Camera looking along `+z` at the front face of `bound_box`
    pub fn new(bound_box: BoundBox, resolution: (usize, usize)) -> OrbitCamera {
        OrbitCamera {
            bound_box,
            resolution,
            yaw: 90.0,
            pitch: 0.0,
            pan: vector![0.0, 0.0],
        }
    }

    pub fn get_resolution(&self) -> (usize, usize) {
        self.resolution
    }

    /// Yaw and pitch, in degrees
    pub fn get_angles(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw.rem_euclid(360.0);
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.set_angles(self.yaw + yaw, self.pitch + pitch);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.pan += vector![x, y];
    }

    /// Apply command, return the new view
    pub fn apply(&mut self, command: ViewCommand) -> ViewTransform {
        match command {
            ViewCommand::Rotate { yaw, pitch } => self.rotate(yaw, pitch),
            ViewCommand::Translate { x, y } => self.translate(x, y),
        }
        log::debug!(
            "View yaw {} pitch {} pan {:?}",
            self.yaw,
            self.pitch,
            self.pan.as_slice()
        );
        self.view_transform()
    }

    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::orbit(
            &self.bound_box,
            self.resolution,
            self.yaw,
            self.pitch,
            self.pan,
        )
    }
}
