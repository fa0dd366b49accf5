//! Front-to-back compositing

use nalgebra::vector;

use crate::color::RGBA;

/// Accumulated opacity treated as fully opaque
pub const SATURATION: f32 = 1.0 - f32::EPSILON;

/// "Over" operator, `sample` lies behind everything in `accum`.
///
/// Resulting color is premultiplied by opacity.
pub fn composite(accum: RGBA, sample: RGBA) -> RGBA {
    let weight = (1.0 - accum.w) * sample.w;
    vector![
        accum.x + weight * sample.x,
        accum.y + weight * sample.y,
        accum.z + weight * sample.z,
        accum.w + weight
    ]
}

/// No sample further along the ray can change the result
pub fn is_saturated(accum: &RGBA) -> bool {
    accum.w >= SATURATION
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;

    use super::*;
    use crate::color;

    #[test]
    fn first_sample_is_premultiplied() {
        let accum = composite(color::zero(), color::new(1.0, 0.5, 0.0, 0.5));
        assert_relative_eq!(accum, color::new(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn alpha_is_monotonic() {
        let mut accum = color::zero();
        let mut last = 0.0;
        for i in 0..200 {
            let alpha = (i % 7) as f32 / 6.0 * 0.3;
            accum = composite(accum, color::mono(0.8, alpha));

            assert!(accum.w >= last);
            assert!(accum.w <= 1.0);
            last = accum.w;
        }
    }

    #[test]
    fn order_matters() {
        let a = color::new(1.0, 0.0, 0.0, 0.5);
        let b = color::new(0.0, 1.0, 0.0, 0.5);

        let ab = composite(composite(color::zero(), a), b);
        let ba = composite(composite(color::zero(), b), a);

        assert_ne!(ab, ba);
        assert_relative_eq!(ab, color::new(0.5, 0.25, 0.0, 0.75));
        assert_relative_eq!(ab.w, ba.w);
    }

    #[test]
    fn opaque_sample_saturates() {
        let accum = composite(color::mono(0.1, 0.3), color::mono(1.0, 1.0));
        assert!(is_saturated(&accum));

        // nothing changes afterwards
        let after = composite(accum, color::new(0.0, 1.0, 0.0, 1.0));
        assert_relative_eq!(after, accum, epsilon = 1e-6);
    }
}
