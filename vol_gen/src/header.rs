use byteorder::{ByteOrder, LittleEndian};
use volcast::volumetric::parse::HEADER_LEN;

use crate::config::Config;

/// Header read by `volcast::volumetric::from_file`
/// little-endian, total length 14B
/// 1. resolution -- 3x 32bit ints (x,y,z)
/// 2. bytes per sample -- 8bit, 1 or 2
/// 3. 1 byte reserved
/// 4. data -- x*y*z samples, z-major, x fastest
pub fn generate_header(cfg: &Config) -> Vec<u8> {
    let mut vec = vec![0; HEADER_LEN];
    let slice = &mut vec[..];

    LittleEndian::write_u32(&mut slice[0..4], cfg.dims.x);
    LittleEndian::write_u32(&mut slice[4..8], cfg.dims.y);
    LittleEndian::write_u32(&mut slice[8..12], cfg.dims.z);
    slice[12] = cfg.sample_width.bytes() as u8;
    // 1 byte reserved

    vec
}
