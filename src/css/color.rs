//! sRGB color math for the contrast check.
//!
//! Implements WCAG relative luminance and contrast ratio over `#rgb`
//! and `#rrggbb` literals. Anything else (named colors, `oklch()`,
//! `rgba()`) returns `None` and the caller reports the pair as
//! unverifiable.

/// Parse a `#rgb` or `#rrggbb` literal into channel bytes.
pub fn hex_to_rgb(value: &str) -> Option<[u8; 3]> {
    let clean = value.trim().trim_start_matches('#');
    match clean.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, ch) in clean.chars().enumerate() {
                let nibble = ch.to_digit(16)? as u8;
                rgb[i] = nibble << 4 | nibble;
            }
            Some(rgb)
        }
        6 => {
            let r = u8::from_str_radix(&clean[0..2], 16).ok()?;
            let g = u8::from_str_radix(&clean[2..4], 16).ok()?;
            let b = u8::from_str_radix(&clean[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}

/// WCAG relative luminance of a hex color.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    let rgb = hex_to_rgb(hex)?;
    let [r, g, b] = rgb.map(|channel| {
        let ratio = channel as f64 / 255.0;
        if ratio <= 0.03928 {
            ratio / 12.92
        } else {
            ((ratio + 0.055) / 1.055).powf(2.4)
        }
    });
    Some(0.2126 * r + 0.7152 * g + 0.0722 * b)
}

/// WCAG contrast ratio between two hex colors, in `1.0..=21.0`.
pub fn contrast_ratio(foreground: &str, background: &str) -> Option<f64> {
    let fg = relative_luminance(foreground)?;
    let bg = relative_luminance(background)?;
    let lighter = fg.max(bg);
    let darker = fg.min(bg);
    Some((lighter + 0.05) / (darker + 0.05))
}
