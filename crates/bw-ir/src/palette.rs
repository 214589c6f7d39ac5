//! Byte-to-colour mapping: 18 hues × 14 intensity levels.
//!
//! `18 * 14 = 252`, so byte values 252..=255 alias onto the bottom of hue 0's
//! intensity ramp. Existing renders depend on this, keep it.

/// A linear RGB colour with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Quantize to 8 bits per channel.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| libm::roundf(c.clamp(0.0, 1.0) * 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

pub const HUE_COUNT: usize = 18;
pub const INTENSITY_LEVELS: u8 = 14;

/// Base hues, brightest intensity.
pub const PALETTE: [Rgb; HUE_COUNT] = [
    Rgb::new(1.0, 0.0, 0.0),    // red
    Rgb::new(0.0, 1.0, 0.0),    // lime
    Rgb::new(0.0, 0.0, 1.0),    // blue
    Rgb::new(1.0, 0.0, 1.0),    // magenta
    Rgb::new(0.0, 1.0, 1.0),    // cyan
    Rgb::new(1.0, 1.0, 0.0),    // yellow
    Rgb::new(1.0, 0.75, 0.8),   // pink
    Rgb::new(0.5, 1.0, 0.0),    // chartreuse
    Rgb::new(0.0, 0.75, 1.0),   // cerulean
    Rgb::new(0.76, 0.7, 0.0),   // mustard
    Rgb::new(0.9, 0.3, 0.0),    // infrared
    Rgb::new(0.58, 0.0, 0.83),  // violet
    Rgb::new(0.29, 0.0, 0.51),  // indigo
    Rgb::new(0.0, 0.42, 0.5),   // thalo
    Rgb::new(0.0, 1.0, 0.5),    // mint
    Rgb::new(0.42, 0.56, 0.14), // camo
    Rgb::new(1.0, 0.65, 0.0),   // orange
    Rgb::new(0.4, 0.0, 1.0),    // ultraviolet
];

/// Hue index and intensity level (1..=14) for a byte.
pub fn hue_and_level(value: u8) -> (usize, u8) {
    let hue = (value / INTENSITY_LEVELS) as usize % HUE_COUNT;
    let level = value % INTENSITY_LEVELS + 1;
    (hue, level)
}

/// Colour for a byte value.
pub fn byte_to_rgb(value: u8) -> Rgb {
    let (hue, level) = hue_and_level(value);
    PALETTE[hue].scaled(level as f32 / INTENSITY_LEVELS as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_dimmest_red() {
        assert_eq!(hue_and_level(0), (0, 1));
        assert_eq!(byte_to_rgb(0), Rgb::new(1.0 / 14.0, 0.0, 0.0));
    }

    #[test]
    fn thirteen_is_full_red() {
        assert_eq!(byte_to_rgb(13), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn fourteen_starts_next_hue() {
        assert_eq!(hue_and_level(14), (1, 1));
    }

    #[test]
    fn high_bytes_alias_onto_hue_zero() {
        assert_eq!(hue_and_level(252), hue_and_level(0));
        assert_eq!(byte_to_rgb(252), byte_to_rgb(0));
        assert_eq!(byte_to_rgb(255), byte_to_rgb(3));
        assert_eq!(hue_and_level(251), (17, 14));
    }

    #[test]
    fn mapping_is_deterministic() {
        for v in 0..=255u8 {
            assert_eq!(byte_to_rgb(v), byte_to_rgb(v));
            let (hue, level) = hue_and_level(v);
            assert!(hue < HUE_COUNT);
            assert!((1..=INTENSITY_LEVELS).contains(&level));
        }
    }

    #[test]
    fn rgb8_quantization() {
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_rgb8(), [255, 0, 128]);
        assert_eq!(Rgb::new(2.0, -1.0, 0.0).to_rgb8(), [255, 0, 0]);
    }
}
