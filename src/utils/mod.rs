//! Shared helpers: logging and human-readable formatting.

pub mod log;

/// Format a pixel quantity for report output, rounded to 2 decimals.
///
/// `40.0` renders as `"40px"`, `26.666…` as `"26.67px"`.
pub fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{rounded}px")
    }
}

/// Distance of `value` from the nearest lower multiple of `base`.
pub fn distance_from_multiple(value: f64, base: f64) -> f64 {
    (value % base).abs()
}
