//! Header of volume files written by `vol_gen`
//!
//! Little-endian, total length 14B
//! 1. resolution -- 3x 32bit ints (x,y,z)
//! 2. bytes per sample -- 8bit, 1 or 2
//! 3. 1 byte reserved
//! 4. data -- x*y*z samples, z-major, then y, x growing fastest

use nalgebra::vector;
use nom::{
    bytes::complete::take,
    number::complete::{le_u32, le_u8},
    sequence::tuple,
    IResult,
};

use crate::error::{Result, VolcastError};

use super::vol_builder::{SampleWidth, VolumeMetadata};

pub const HEADER_LEN: usize = 3 * 4 + 2;

pub fn header_parser(slice: &[u8]) -> Result<VolumeMetadata> {
    let (_rest, ((x, y, z), width)) = header_inner(slice).map_err(|_| VolcastError::Header)?;

    Ok(VolumeMetadata {
        size: vector![x as usize, y as usize, z as usize],
        sample_width: SampleWidth::from_bytes(width)?,
        data_offset: HEADER_LEN,
    })
}

fn header_inner(s: &[u8]) -> IResult<&[u8], ((u32, u32, u32), u8)> {
    let mut header = tuple((tuple((le_u32, le_u32, le_u32)), le_u8, take(1_u8)));

    let (s, (size, width, _reserved)) = header(s)?;

    Ok((s, (size, width)))
}
