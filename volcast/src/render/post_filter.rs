use rayon::prelude::*;

use crate::color::{self, RGBA};

use super::ImagePlane;

/// Median filter over the image plane, for noise reduction.
///
/// Neighbourhood of `kernel * kernel` pixels is ordered by luminance,
/// center pixel takes the value of the middle candidate, opacity included.
/// Pixels closer than `kernel / 2` to any edge are left as they are.
/// Even kernel sizes are rejected with a warning.
pub fn median_filter(plane: &mut ImagePlane, kernel: usize) {
    if kernel % 2 == 0 {
        log::warn!("Median filter kernel {kernel} is not odd, skipping filter");
        return;
    }

    let radius = kernel / 2;
    let (width, height) = plane.get_resolution();
    if radius == 0 || width <= 2 * radius || height <= 2 * radius {
        return;
    }

    // neighbours are read from the unfiltered copy
    let source = plane.pixels().to_vec();
    let median_rank = (kernel * kernel - 1) / 2;

    // storage rows, image border is the same on both sides
    plane
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .filter(|(row, _)| *row >= radius && *row < height - radius)
        .for_each(|(row, out)| {
            let mut window = Vec::with_capacity(kernel * kernel);
            for col in radius..width - radius {
                window.clear();
                for r in row - radius..=row + radius {
                    let line = &source[r * width..(r + 1) * width];
                    window.extend_from_slice(&line[col - radius..=col + radius]);
                }
                window.sort_by(|a, b| color::luminance(a).total_cmp(&color::luminance(b)));
                out[col] = window[median_rank];
            }
        });
}
