//! Per-image title text.
//!
//! Numbers are printed the way the equivalent NumPy scalars print, so titles
//! read the same as the ones users are used to from notebook sessions.

use std::fmt::{Display, LowerExp};

use crate::data::{ArrayImage, DtypeKind};
use crate::options::DisplayOptions;

/// Font size in points when more than this many images are shown.
const CROWDED_THRESHOLD: usize = 5;
const CROWDED_FONT_SIZE: f32 = 9.0;
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A multi-line title and the font size it should be drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Size in points.
    pub font_size: f32,
    pub text: String,
}

impl Title {
    /// Append a name on its own line (or as the whole title when empty).
    pub fn push_name(&mut self, name: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(name);
    }

    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.split('\n').count()
        }
    }
}

/// Build the title of the `index`-th of `count` images.
pub fn build_title(
    index: usize,
    image: &ArrayImage,
    count: usize,
    options: &DisplayOptions,
) -> Title {
    let font_size = if count > CROWDED_THRESHOLD {
        CROWDED_FONT_SIZE
    } else {
        DEFAULT_FONT_SIZE
    };

    let mut text = String::new();
    if options.enable_index {
        // i128 holds any usize index plus any i64 offset exactly.
        let shown = index as i128 + i128::from(options.index_offset);
        text.push_str(&format!("idx: {shown}"));
    }

    if options.show_limits || options.show_stats {
        let stats = image.stats();
        let kind = image.kind();

        if options.show_limits {
            text.push_str(&format!(
                "\nmin: {}, max: {}",
                format_rounded(stats.min, kind),
                format_rounded(stats.max, kind)
            ));
        }
        if options.show_stats {
            text.push_str(&format!(
                "\navg: {}, med: {}, \n shape: {}",
                format_fixed3(stats.mean),
                format_fixed3(stats.median),
                format_shape(image.shape())
            ));
        }
    }

    Title { font_size, text }
}

/// `round(value, 3)` printed like a NumPy scalar of the given kind.
pub fn format_rounded(value: f64, kind: DtypeKind) -> String {
    match kind {
        DtypeKind::Integer if value.is_finite() => format!("{value:.0}"),
        DtypeKind::Integer | DtypeKind::Float64 => {
            float_repr((value * 1000.0).round_ties_even() / 1000.0)
        }
        DtypeKind::Float32 => float_repr((value as f32 * 1000.0).round_ties_even() / 1000.0),
    }
}

/// Shortest round-trip repr with Python's spelling of specials and exponents.
fn float_repr<T>(value: T) -> String
where
    T: Display + LowerExp + Into<f64> + Copy,
{
    let x: f64 = value.into();
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return infinity(x);
    }

    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let scientific = format!("{value:e}");
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exponent.abs());
        }
        return scientific;
    }

    let plain = format!("{value}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// `format(value, ".3f")`.
fn format_fixed3(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        infinity(value)
    } else {
        format!("{value:.3}")
    }
}

fn infinity(value: f64) -> String {
    let text = if value > 0.0 { "inf" } else { "-inf" };
    text.to_string()
}

/// Python tuple spelling of a shape: `(2, 2)`, `(5,)`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({single},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn float_image(values: Array2<f64>) -> ArrayImage {
        ArrayImage::from_plane(values, DtypeKind::Float64)
    }

    #[test]
    fn test_all_flags_off_is_empty() {
        let image = float_image(array![[1.0, 2.0], [3.0, 4.0]]);
        let title = build_title(0, &image, 1, &DisplayOptions::default());
        assert_eq!(title.text, "");
        assert_eq!(title.line_count(), 0);
    }

    #[test]
    fn test_index_with_offset() {
        let image = float_image(array![[0.0]]);
        let options = DisplayOptions::default().with_index(3);
        assert_eq!(build_title(2, &image, 4, &options).text, "idx: 5");
    }

    #[test]
    fn test_negative_offset() {
        let image = float_image(array![[0.0]]);
        let options = DisplayOptions::default().with_index(-1);
        assert_eq!(build_title(0, &image, 1, &options).text, "idx: -1");
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let image = float_image(array![[1.0]]);
        let options = DisplayOptions::default().with_index(i64::MAX);
        assert_eq!(build_title(1, &image, 2, &options).text, "idx: 9223372036854775808");

        let options = DisplayOptions::default().with_index(i64::MIN);
        assert_eq!(build_title(0, &image, 1, &options).text, "idx: -9223372036854775808");
    }

    #[test]
    fn test_font_size_hint() {
        let image = float_image(array![[0.0]]);
        let options = DisplayOptions::default();
        assert_eq!(build_title(0, &image, 5, &options).font_size, 12.0);
        assert_eq!(build_title(0, &image, 6, &options).font_size, 9.0);
    }

    #[test]
    fn test_limits_float() {
        let image = float_image(array![[0.12345, 1.0], [2.0, 300.0]]);
        let options = DisplayOptions::default().with_limits();
        assert_eq!(
            build_title(0, &image, 1, &options).text,
            "\nmin: 0.123, max: 300.0"
        );
    }

    #[test]
    fn test_limits_integer() {
        let image = ArrayImage::from_plane(array![[0.0, 1.0], [2.0, 300.0]], DtypeKind::Integer);
        let options = DisplayOptions::default().with_index(0).with_limits();
        assert_eq!(
            build_title(0, &image, 1, &options).text,
            "idx: 0\nmin: 0, max: 300"
        );
    }

    #[test]
    fn test_stats_line() {
        let image = float_image(array![[0.0, 1.0], [2.0, 300.0]]);
        let options = DisplayOptions::default().with_stats();
        assert_eq!(
            build_title(0, &image, 1, &options).text,
            "\navg: 75.750, med: 1.500, \n shape: (2, 2)"
        );
    }

    #[test]
    fn test_stats_shape_keeps_channels() {
        let image = ArrayImage::from_stack(ndarray::Array3::zeros((4, 4, 3)), DtypeKind::Integer);
        let options = DisplayOptions::default().with_stats();
        assert!(build_title(0, &image, 1, &options).text.ends_with("shape: (4, 4, 3)"));
    }

    #[test]
    fn test_push_name() {
        let mut empty = Title {
            font_size: 12.0,
            text: String::new(),
        };
        empty.push_name("a.npy");
        assert_eq!(empty.text, "a.npy");

        let mut indexed = Title {
            font_size: 12.0,
            text: "idx: 0".to_string(),
        };
        indexed.push_name("a.npy");
        assert_eq!(indexed.text, "idx: 0\na.npy");
        assert_eq!(indexed.line_count(), 2);
    }

    #[test]
    fn test_format_rounded_specials() {
        assert_eq!(format_rounded(f64::NAN, DtypeKind::Float64), "nan");
        assert_eq!(format_rounded(f64::NEG_INFINITY, DtypeKind::Float64), "-inf");
        assert_eq!(format_rounded(-0.0001, DtypeKind::Float64), "-0.0");
        assert_eq!(format_rounded(1e17, DtypeKind::Float64), "1e+17");
        assert_eq!(format_rounded(0.1 + 0.2, DtypeKind::Float64), "0.3");
    }

    #[test]
    fn test_format_rounded_float32_uses_f32_repr() {
        // 0.1f32 widened to f64 is 0.10000000149011612; printed as f32 it is 0.1
        assert_eq!(format_rounded(f64::from(0.1f32), DtypeKind::Float32), "0.1");
    }

    #[test]
    fn test_format_fixed3_specials() {
        assert_eq!(format_fixed3(f64::NAN), "nan");
        assert_eq!(format_fixed3(f64::INFINITY), "inf");
        assert_eq!(format_fixed3(1.0005), "1.000");
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[2, 2]), "(2, 2)");
        assert_eq!(format_shape(&[5]), "(5,)");
    }
}
