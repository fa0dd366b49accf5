use crate::color::{self, RGBA};

/// Output of one cast, `width * height` RGBA pixels.
///
/// Row 0 is the bottom row. Storage starts with the top row,
/// pixel `(col, row)` lives at `(height - 1 - row) * width + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlane {
    width: usize,
    height: usize,
    data: Vec<RGBA>,
}

impl ImagePlane {
    /// Transparent plane of `resolution` (width, height)
    pub fn new(resolution: (usize, usize)) -> ImagePlane {
        ImagePlane::filled(resolution, color::zero())
    }

    pub fn filled(resolution: (usize, usize), fill: RGBA) -> ImagePlane {
        let (width, height) = resolution;
        ImagePlane {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    pub fn get_resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, col: usize, row: usize) -> usize {
        (self.height - 1 - row) * self.width + col
    }

    pub fn get(&self, col: usize, row: usize) -> Option<RGBA> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.data[self.index(col, row)])
    }

    /// Panics if out of bounds
    pub fn set(&mut self, col: usize, row: usize, color: RGBA) {
        assert!(col < self.width && row < self.height);
        let index = self.index(col, row);
        self.data[index] = color;
    }

    /// Pixels in storage order
    pub fn pixels(&self) -> &[RGBA] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [RGBA] {
        &mut self.data
    }

    /// Four floats per pixel, storage order. Ready for texture upload.
    pub fn to_flat_rgba(&self) -> Vec<f32> {
        self.data.iter().flat_map(|c| c.iter().copied()).collect()
    }

    /// Three bytes per pixel, top row first.
    /// Pixels are composited over `background`.
    pub fn to_rgb8(&self, background: [u8; 3]) -> Vec<u8> {
        let bg = background.map(|v| v as f32 / 255.0);
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for pixel in &self.data {
            // color is premultiplied by opacity during compositing
            for (ch, bg_ch) in pixel.iter().take(3).zip(bg) {
                let v = (ch + (1.0 - pixel.w) * bg_ch).clamp(0.0, 1.0);
                out.push((v * 255.0).round() as u8);
            }
        }
        out
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn row_zero_is_bottom() {
        let mut plane = ImagePlane::new((3, 2));
        let red = color::new(1.0, 0.0, 0.0, 1.0);

        plane.set(2, 0, red);

        assert_eq!(plane.get(2, 0), Some(red));
        // bottom row is stored last
        assert_eq!(plane.pixels()[5], red);
        assert_eq!(plane.get(3, 0), None);
        assert_eq!(plane.get(0, 2), None);
    }

    #[test]
    fn flat_rgba_layout() {
        let mut plane = ImagePlane::new((2, 1));
        plane.set(1, 0, color::new(0.1, 0.2, 0.3, 0.4));

        assert_eq!(
            plane.to_flat_rgba(),
            vec![0.0, 0.0, 0.0, 0.0, 0.1, 0.2, 0.3, 0.4]
        );
    }

    #[test]
    fn rgb8_over_background() {
        let mut plane = ImagePlane::new((2, 1));
        plane.set(0, 0, color::new(0.5, 0.0, 0.0, 0.5));
        plane.set(1, 0, color::new(1.0, 1.0, 1.0, 1.0));

        let bytes = plane.to_rgb8([0, 0, 255]);

        assert_eq!(bytes, vec![128, 0, 128, 255, 255, 255]);
    }
}
