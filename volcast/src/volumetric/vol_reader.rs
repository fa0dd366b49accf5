use std::path::Path;

use nalgebra::Vector3;

use crate::error::Result;

use super::{
    parse::header_parser,
    vol_builder::{build_volume, DataSource, SampleWidth, VolumeMetadata},
    Volume,
};

/// Load volume file with header, see [`super::parse`]
pub fn from_file<P>(path: P) -> Result<Volume>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::info!("Loading volume {}", path.display());

    let ds = DataSource::from_file(path)?;
    let metadata = header_parser(ds.get_slice())?;
    build_volume(metadata, &ds)
}

/// Load headerless volume file.
/// Dimensions and sample width come from configuration.
pub fn from_raw_file<P>(path: P, size: Vector3<usize>, sample_width: SampleWidth) -> Result<Volume>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::info!("Loading raw volume {}", path.display());

    let ds = DataSource::from_file(path)?;
    let metadata = VolumeMetadata {
        size,
        sample_width,
        data_offset: 0,
    };
    build_volume(metadata, &ds)
}

#[cfg(test)]
mod test {

    use std::{fs, path::PathBuf};

    use nalgebra::vector;

    use super::*;
    use crate::error::VolcastError;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("volcast-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn raw_u8_file() {
        let path = temp_path("raw_u8.raw");
        fs::write(&path, [10_u8, 20, 30, 40, 50, 60, 70, 80]).unwrap();

        let volume = from_raw_file(&path, vector![2, 2, 2], SampleWidth::U8).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(volume.get_data(1, 0, 0), Some(20));
        assert_eq!(volume.get_data(0, 1, 0), Some(30));
        assert_eq!(volume.get_data(0, 0, 1), Some(50));
    }

    #[test]
    fn header_file() {
        let path = temp_path("header.vol");
        let mut bytes = vec![];
        for dim in [1_u32, 2, 1] {
            bytes.extend_from_slice(&dim.to_le_bytes());
        }
        bytes.extend_from_slice(&[2, 0]);
        bytes.extend_from_slice(&[0xe8, 0x03, 0x10, 0x27]); // 1000, 10000
        fs::write(&path, &bytes).unwrap();

        let volume = from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(volume.get_size(), vector![1, 2, 1]);
        assert_eq!(volume.samples(), &[1000, 10000]);
    }

    #[test]
    fn short_file_is_fatal() {
        let path = temp_path("short.raw");
        fs::write(&path, [1_u8, 2, 3]).unwrap();

        let res = from_raw_file(&path, vector![2, 2, 2], SampleWidth::U8);
        fs::remove_file(&path).unwrap();

        assert!(matches!(res, Err(VolcastError::ShortRead { .. })));
    }

    #[test]
    fn header_dimensions_overflow() {
        let path = temp_path("huge.vol");
        let mut bytes = vec![];
        for dim in [1_u32 << 22, 1 << 21, 1 << 21] {
            bytes.extend_from_slice(&dim.to_le_bytes());
        }
        bytes.extend_from_slice(&[1, 0]);
        fs::write(&path, &bytes).unwrap();

        let res = from_file(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(res, Err(VolcastError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file() {
        let res = from_file(temp_path("does-not-exist.vol"));
        assert!(matches!(res, Err(VolcastError::NotAFile(_))));
    }
}
