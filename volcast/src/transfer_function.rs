//! Transfer function presets.
//!
//! CT presets expect raw 16-bit samples before rescaling, HU value is `v - 1024`.
//! Every preset covers the whole `u16` domain with contiguous segments.

use std::{fmt, str::FromStr};

use crate::{
    color::{self, RGBA},
    error::VolcastError,
};

/// Color of one intensity segment
#[derive(Debug, Clone, Copy, PartialEq)]
enum SegmentColor {
    Transparent,
    /// Normalized RGBA
    Constant([f32; 4]),
    /// 8-bit `start` color, shifted by `start + ratio * range` across the segment
    Linear {
        start: [f32; 3],
        range: [f32; 3],
        alpha: f32,
    },
}

/// Intensities `low..high` map to `color`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    low: u32,
    high: u32,
    color: SegmentColor,
}

const DOMAIN_END: u32 = u16::MAX as u32 + 1;

const fn transparent(low: u32, high: u32) -> Segment {
    Segment {
        low,
        high,
        color: SegmentColor::Transparent,
    }
}

const fn constant(low: u32, high: u32, rgba: [f32; 4]) -> Segment {
    Segment {
        low,
        high,
        color: SegmentColor::Constant(rgba),
    }
}

const fn linear(low: u32, high: u32, start: [f32; 3], range: [f32; 3], alpha: f32) -> Segment {
    Segment {
        low,
        high,
        color: SegmentColor::Linear {
            start,
            range,
            alpha,
        },
    }
}

const BONE_GRAY: [f32; 3] = [180.0, 180.0, 180.0];
const BONE_RANGE: [f32; 3] = [60.0, 60.0, 60.0];

const BONE: &[Segment] = &[
    transparent(0, 1155),
    linear(1155, 2200, BONE_GRAY, BONE_RANGE, 0.1),
    transparent(2200, DOMAIN_END), // invalid values
];

const MUSCLE_AND_BONE: &[Segment] = &[
    transparent(0, 1040),
    linear(1040, 1155, [255.0, 188.0, 155.0], [0.0, 50.0, 50.0], 0.05),
    linear(1155, 2200, BONE_GRAY, BONE_RANGE, 0.07),
    transparent(2200, DOMAIN_END),
];

// high alpha to block anatomy inside
const SKIN: &[Segment] = &[
    transparent(0, 880),
    linear(880, 925, [255.0, 198.0, 165.0], [0.0, 15.0, 15.0], 0.8),
    transparent(925, DOMAIN_END),
];

const LUNG: &[Segment] = &[
    transparent(0, 300),
    linear(300, 550, [230.0, 150.0, 150.0], [20.0, 40.0, 40.0], 0.03),
    transparent(550, 1155),
    linear(1155, 2200, BONE_GRAY, BONE_RANGE, 0.02),
    transparent(2200, DOMAIN_END),
];

// 8-bit phantom data
const SHEPP_LOGAN: &[Segment] = &[
    constant(0, 51, [1.0, 1.0, 1.0, 0.05]),
    constant(51, 77, [0.9, 0.1, 0.1, 0.1]),
    constant(77, 255, [0.1, 0.9, 0.9, 0.1]),
    constant(255, 256, [0.3, 0.3, 0.3, 0.5]),
    transparent(256, DOMAIN_END),
];

/// Classification presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferFunction {
    /// Bone only
    Bone,
    /// Mainly muscle, some bone
    MuscleAndBone,
    /// Skin surface
    Skin,
    /// Lung parenchyma with faint bone for context
    Lung,
    /// Synthetic 8-bit Shepp-Logan phantom
    SheppLogan,
}

impl TransferFunction {
    pub const ALL: [TransferFunction; 5] = [
        TransferFunction::Bone,
        TransferFunction::MuscleAndBone,
        TransferFunction::Skin,
        TransferFunction::Lung,
        TransferFunction::SheppLogan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransferFunction::Bone => "bone",
            TransferFunction::MuscleAndBone => "muscle",
            TransferFunction::Skin => "skin",
            TransferFunction::Lung => "lung",
            TransferFunction::SheppLogan => "shepp-logan",
        }
    }

    fn segments(self) -> &'static [Segment] {
        match self {
            TransferFunction::Bone => BONE,
            TransferFunction::MuscleAndBone => MUSCLE_AND_BONE,
            TransferFunction::Skin => SKIN,
            TransferFunction::Lung => LUNG,
            TransferFunction::SheppLogan => SHEPP_LOGAN,
        }
    }

    /// Map raw intensity to normalized RGBA
    pub fn classify(self, intensity: u16) -> RGBA {
        let v = intensity as u32;
        self.segments()
            .iter()
            .find(|seg| seg.low <= v && v < seg.high)
            .map(|seg| segment_color(seg, v))
            .unwrap_or_else(color::zero)
    }
}

fn segment_color(seg: &Segment, v: u32) -> RGBA {
    match seg.color {
        SegmentColor::Transparent => color::zero(),
        SegmentColor::Constant([r, g, b, a]) => color::new(r, g, b, a),
        SegmentColor::Linear {
            start,
            range,
            alpha,
        } => {
            let ratio = (v - seg.low) as f32 / (seg.high - seg.low) as f32;
            // channels are whole 8-bit values
            let ch = |i: usize| (start[i] + ratio * range[i]).trunc();
            color::clip(color::from_rgb8(ch(0), ch(1), ch(2), alpha))
        }
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransferFunction {
    type Err = VolcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bone" => Ok(TransferFunction::Bone),
            "muscle" | "muscle-bone" => Ok(TransferFunction::MuscleAndBone),
            "skin" => Ok(TransferFunction::Skin),
            "lung" => Ok(TransferFunction::Lung),
            "shepp-logan" | "shepp" => Ok(TransferFunction::SheppLogan),
            _ => Err(VolcastError::UnknownTransferFunction(s.to_owned())),
        }
    }
}
