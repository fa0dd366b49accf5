use std::{fs::File, path::Path};

use byteorder::{ByteOrder, LittleEndian};
use memmap::{Mmap, MmapOptions};
use nalgebra::Vector3;

use crate::error::{Result, VolcastError};

use super::{voxel_count, Volume};

/// Raw bytes of a volume file
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    /// Memory map file at `path`
    pub fn from_file<P>(path: P) -> Result<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolcastError::NotAFile(path.display().to_string()));
        }

        let file = File::open(path)?;

        // Zero length files cannot be mapped
        if file.metadata()?.len() == 0 {
            return Ok(DataSource::Vec(Vec::new()));
        }

        // Safety: file is only read, volume files are not expected to change while loading
        let mmap = unsafe { MmapOptions::new().map(&file) }?;
        Ok(DataSource::Mmap(mmap))
    }
}

/// Width of one stored sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    U8,
    /// Little-endian
    U16,
}

impl SampleWidth {
    pub fn from_bytes(bytes: u8) -> Result<SampleWidth> {
        match bytes {
            1 => Ok(SampleWidth::U8),
            2 => Ok(SampleWidth::U16),
            _ => Err(VolcastError::UnsupportedSampleWidth(bytes)),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            SampleWidth::U8 => 1,
            SampleWidth::U16 => 2,
        }
    }
}

/// Everything needed to decode samples from a [`DataSource`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeMetadata {
    pub size: Vector3<usize>,
    pub sample_width: SampleWidth,
    /// Offset of the first sample, in bytes
    pub data_offset: usize,
}

impl VolumeMetadata {
    pub fn voxel_count(&self) -> Result<usize> {
        voxel_count(self.size)
    }

    /// Bytes of sample data the volume needs, header excluded
    pub fn data_len(&self) -> Result<usize> {
        self.voxel_count()?
            .checked_mul(self.sample_width.bytes())
            .ok_or_else(|| VolcastError::InvalidConfig("volume data too large".into()))
    }
}

/// Decode samples described by `metadata` into a [`Volume`].
///
/// All `width * height * depth` samples must be present, a partially filled volume is an error.
pub fn build_volume(metadata: VolumeMetadata, data: &DataSource) -> Result<Volume> {
    let slice = data.get_slice();
    let samples = slice.get(metadata.data_offset..).unwrap_or(&[]);

    let expected = metadata.data_len()?;
    if samples.len() < expected {
        return Err(VolcastError::ShortRead {
            expected: metadata.data_offset.saturating_add(expected),
            actual: slice.len(),
        });
    }
    if samples.len() > expected {
        log::warn!(
            "Volume data has {} trailing bytes, ignoring them",
            samples.len() - expected
        );
    }

    let samples = &samples[..expected];
    let decoded: Vec<u16> = match metadata.sample_width {
        SampleWidth::U8 => samples.iter().map(|&v| v.into()).collect(),
        SampleWidth::U16 => {
            let mut buf = vec![0; samples.len() / 2];
            LittleEndian::read_u16_into(samples, &mut buf);
            buf
        }
    };

    let volume = Volume::from_samples(metadata.size, decoded)?;
    let (low, high) = volume.value_range();
    log::info!(
        "New volume, size {:?} samples {:?} range {low} to {high}",
        metadata.size.as_slice(),
        metadata.sample_width
    );

    Ok(volume)
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn meta(width: SampleWidth, data_offset: usize) -> VolumeMetadata {
        VolumeMetadata {
            size: vector![2, 2, 1],
            sample_width: width,
            data_offset,
        }
    }

    #[test]
    fn decode_u8() {
        let ds = DataSource::from_vec(vec![0, 1, 128, 255]);
        let volume = build_volume(meta(SampleWidth::U8, 0), &ds).unwrap();

        assert_eq!(volume.samples(), &[0, 1, 128, 255]);
    }

    #[test]
    fn decode_u16_little_endian() {
        // two header bytes to skip
        let ds = DataSource::from_vec(vec![9, 9, 0x01, 0x00, 0x00, 0x01, 0xff, 0xff, 0x34, 0x12]);
        let volume = build_volume(meta(SampleWidth::U16, 2), &ds).unwrap();

        assert_eq!(volume.samples(), &[1, 256, 65535, 0x1234]);
    }

    #[test]
    fn short_read_is_error() {
        let ds = DataSource::from_vec(vec![0, 1, 0, 2, 0, 3, 0]);
        let res = build_volume(meta(SampleWidth::U16, 0), &ds);

        assert!(matches!(
            res,
            Err(VolcastError::ShortRead {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn offset_past_end() {
        let ds = DataSource::from_vec(vec![1, 2]);
        let res = build_volume(meta(SampleWidth::U8, 10), &ds);

        assert!(matches!(res, Err(VolcastError::ShortRead { .. })));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let ds = DataSource::from_vec(vec![4, 3, 2, 1, 0, 0]);
        let volume = build_volume(meta(SampleWidth::U8, 0), &ds).unwrap();

        assert_eq!(volume.samples(), &[4, 3, 2, 1]);
    }

    #[test]
    fn oversized_dimensions() {
        let ds = DataSource::from_vec(vec![]);
        let metadata = VolumeMetadata {
            size: vector![1 << 22, 1 << 21, 1 << 21],
            sample_width: SampleWidth::U8,
            data_offset: 14,
        };

        assert!(matches!(
            build_volume(metadata, &ds),
            Err(VolcastError::InvalidConfig(_))
        ));

        // fits as voxels, not as 16-bit bytes
        let metadata = VolumeMetadata {
            size: vector![1 << 21, 1 << 21, 1 << 21],
            sample_width: SampleWidth::U16,
            data_offset: 0,
        };
        assert!(metadata.voxel_count().is_ok());
        assert!(metadata.data_len().is_err());
    }

    #[test]
    fn sample_width_bytes() {
        assert_eq!(SampleWidth::from_bytes(1).unwrap(), SampleWidth::U8);
        assert_eq!(SampleWidth::from_bytes(2).unwrap(), SampleWidth::U16);
        assert!(matches!(
            SampleWidth::from_bytes(4),
            Err(VolcastError::UnsupportedSampleWidth(4))
        ));
    }
}
