// Stable per-mask colors.
// Visual: mask i and mask i+1 come out in unrelated-looking hues, and the same mask
// keeps its color across redraws and across sessions.

use crate::types::Rgba;

/// Alpha used for a mask's color value (the stroke then applies its own alpha).
pub const MASK_COLOR_ALPHA: f32 = 0.95;

/// 32-bit avalanche mix: flipping one input bit flips about half the output bits.
/// The golden-ratio offset keeps 0 from mapping to 0.
#[inline]
pub fn mix32(x: u32) -> u32 {
    let mut x = x.wrapping_add(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x.rotate_right(13);
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

/// Color for the mask at `index` in the supplied list.
/// Red, green and blue are the low bytes of the mix of `index`, `index >> 8`
/// and `index >> 16`, so one seed drives all three channels.
pub fn color_for(index: usize) -> (u8, u8, u8) {
    let i = index as u32;
    let r = (mix32(i) & 0xFF) as u8;
    let g = (mix32(i >> 8) & 0xFF) as u8;
    let b = (mix32(i >> 16) & 0xFF) as u8;
    (r, g, b)
}

/// `color_for` as an RGBA value with the fixed mask alpha.
pub fn mask_rgba(index: usize) -> Rgba {
    let (r, g, b) = color_for(index);
    Rgba::new(r, g, b, MASK_COLOR_ALPHA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_index_same_color() {
        for i in 0..500 {
            assert_eq!(color_for(i), color_for(i));
        }
    }

    #[test]
    fn known_values_do_not_drift() {
        assert_eq!(mix32(0), 0xB95A_049E);
        assert_eq!(mix32(1), 0x3878_57B3);
        assert_eq!(color_for(0), (158, 158, 158));
        assert_eq!(color_for(1), (179, 158, 158));
        assert_eq!(color_for(256), (71, 179, 158));
    }

    #[test]
    fn adjacent_indices_differ() {
        for i in 0..64 {
            assert_ne!(color_for(i), color_for(i + 1), "index {i}");
        }
    }

    #[test]
    fn one_bit_flip_changes_about_half_the_bits() {
        let mut total = 0u32;
        let mut samples = 0u32;
        for x in 0u32..256 {
            for bit in 0..32 {
                total += (mix32(x) ^ mix32(x ^ (1 << bit))).count_ones();
                samples += 1;
            }
        }
        let avg = total as f64 / samples as f64;
        assert!((15.0..=17.0).contains(&avg), "average flipped bits {avg}");
    }

    #[test]
    fn rgba_carries_fixed_alpha() {
        let c = mask_rgba(7);
        assert_eq!((c.r, c.g, c.b), color_for(7));
        assert_eq!(c.a, MASK_COLOR_ALPHA);
    }
}
