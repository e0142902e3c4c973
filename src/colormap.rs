//! False-color mapping.
//!
//! This module provides the jet lookup table and the rule that decides
//! whether an image is drawn on a fixed byte scale or its own data range.

use ndarray::ArrayView2;

use crate::data::nan_range;

/// Number of entries in a lookup table.
pub const LUT_SIZE: usize = 256;

/// Anchor points `(x, y_below, y_above)` of one channel of a segmented colormap.
type Segments = &'static [(f64, f64, f64)];

const JET_RED: Segments = &[
    (0.0, 0.0, 0.0),
    (0.35, 0.0, 0.0),
    (0.66, 1.0, 1.0),
    (0.89, 1.0, 1.0),
    (1.0, 0.5, 0.5),
];
const JET_GREEN: Segments = &[
    (0.0, 0.0, 0.0),
    (0.125, 0.0, 0.0),
    (0.375, 1.0, 1.0),
    (0.64, 1.0, 1.0),
    (0.91, 0.0, 0.0),
    (1.0, 0.0, 0.0),
];
const JET_BLUE: Segments = &[
    (0.0, 0.5, 0.5),
    (0.11, 1.0, 1.0),
    (0.34, 1.0, 1.0),
    (0.65, 0.0, 0.0),
    (1.0, 0.0, 0.0),
];

/// A 256-entry RGB lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    lut: [[u8; 3]; LUT_SIZE],
}

impl Colormap {
    /// The classic blue-cyan-yellow-red "jet" map.
    pub fn jet() -> Self {
        let mut lut = [[0u8; 3]; LUT_SIZE];
        for (i, entry) in lut.iter_mut().enumerate() {
            let x = i as f64 / (LUT_SIZE - 1) as f64;
            *entry = [
                to_byte(interpolate(JET_RED, x)),
                to_byte(interpolate(JET_GREEN, x)),
                to_byte(interpolate(JET_BLUE, x)),
            ];
        }
        Self { lut }
    }

    /// Color of a normalized value. Values outside `[0, 1]` clip to the ends.
    pub fn color(&self, t: f64) -> [u8; 3] {
        let index = if t <= 0.0 {
            0
        } else {
            ((t * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1)
        };
        self.lut[index]
    }
}

fn interpolate(segments: Segments, x: f64) -> f64 {
    for pair in segments.windows(2) {
        let (x0, _, y0) = pair[0];
        let (x1, y1, _) = pair[1];
        if x <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return y0 + (x - x0) / span * (y1 - y0);
        }
    }
    segments.last().map_or(0.0, |&(_, _, y)| y)
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Value range mapped onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    /// The image's own finite min/max.
    Auto { min: f64, max: f64 },
    /// Byte-scaled imagery: always `[0, 255]`.
    Fixed { min: f64, max: f64 },
}

impl ColorScale {
    pub const BYTE: ColorScale = ColorScale::Fixed {
        min: 0.0,
        max: 255.0,
    };

    /// Pick the scale for a displayed plane.
    ///
    /// A maximum in `[10, 256]` is taken to mean the data is already byte
    /// scaled. Anything smaller or larger is stretched over its own range.
    /// A NaN maximum lands on the byte scale.
    pub fn choose(plane: &ArrayView2<'_, f64>) -> Self {
        let max = plane.iter().copied().fold(f64::NEG_INFINITY, |acc, v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.max(v)
            }
        });

        if max.is_nan() || (10.0..=256.0).contains(&max) {
            Self::BYTE
        } else {
            let (min, max) = nan_range(plane.iter().copied()).unwrap_or((0.0, 0.0));
            ColorScale::Auto { min, max }
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            ColorScale::Auto { min, max } | ColorScale::Fixed { min, max } => (min, max),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ColorScale::Auto { .. })
    }

    /// Map a value to `[0, 1]` (unclamped). `None` for NaN, which is not drawn.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let (min, max) = self.bounds();
        let span = max - min;
        if span <= 0.0 || !span.is_finite() {
            return Some(0.0);
        }
        Some((value - min) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_jet_endpoints() {
        let jet = Colormap::jet();
        assert_eq!(jet.color(0.0), [0, 0, 128]);
        assert_eq!(jet.color(1.0), [128, 0, 0]);
    }

    #[test]
    fn test_jet_middle_is_green() {
        let [r, g, b] = Colormap::jet().color(0.5);
        assert_eq!(g, 255);
        assert!(r.abs_diff(b) <= 5, "r={r} b={b}");
    }

    #[test]
    fn test_color_clips_out_of_range() {
        let jet = Colormap::jet();
        assert_eq!(jet.color(-3.0), jet.color(0.0));
        assert_eq!(jet.color(7.0), jet.color(1.0));
    }

    #[test]
    fn test_large_max_selects_auto() {
        let plane = array![[0.0, 1.0], [2.0, 300.0]];
        let scale = ColorScale::choose(&plane.view());
        assert_eq!(scale, ColorScale::Auto { min: 0.0, max: 300.0 });
    }

    #[test]
    fn test_small_max_selects_auto() {
        let plane = array![[0.1, 0.9]];
        assert!(ColorScale::choose(&plane.view()).is_auto());
    }

    #[test]
    fn test_byte_range_selects_fixed() {
        for max in [10.0, 128.0, 255.0, 256.0] {
            let plane = array![[3.0, max]];
            assert_eq!(ColorScale::choose(&plane.view()), ColorScale::BYTE, "max={max}");
        }
    }

    #[test]
    fn test_nan_max_selects_fixed() {
        let plane = array![[f64::NAN, 1000.0]];
        assert_eq!(ColorScale::choose(&plane.view()), ColorScale::BYTE);
    }

    #[test]
    fn test_normalize() {
        let scale = ColorScale::Auto { min: 0.0, max: 300.0 };
        assert_eq!(scale.normalize(150.0), Some(0.5));
        assert_eq!(scale.normalize(f64::NAN), None);

        let flat = ColorScale::Auto { min: 4.0, max: 4.0 };
        assert_eq!(flat.normalize(4.0), Some(0.0));
    }
}
