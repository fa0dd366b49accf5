//! # Default values
//!
//! Used as initial values of command line options.

// Render resolution
pub const RENDER_WIDTH: &str = "512";
pub const RENDER_HEIGHT: &str = "512";

pub const RAY_STEP: &str = "0.5";
pub const TRANSFER_FUNCTION: &str = "bone";

// Frames
pub const FRAMES: &str = "1";
/// Yaw change between two frames, in degrees
pub const YAW_STEP: &str = "15";
pub const START_YAW: &str = "90";
pub const START_PITCH: &str = "0";

pub const OUTPUT_PREFIX: &str = "frame";

/// Written image background, black
pub const IMAGE_BACKGROUND: [u8; 3] = [0, 0, 0];
