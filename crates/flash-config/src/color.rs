//! Color normalization for style values.

/// Normalize a color value to `#RRGGBB`.
///
/// Named colors resolve through `colornames`; hex values are uppercased,
/// with 3-digit shorthand expanded digit-by-digit and shorter values padded
/// by repeating the last hex digit. Anything unrecognized passes through
/// unchanged.
pub fn normalize_color(input: &str) -> String {
    let value = input.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return input.to_string();
        }
        let hex = hex.to_ascii_uppercase();
        let expanded = if hex.len() == 3 {
            hex.chars().flat_map(|c| [c, c]).collect()
        } else {
            let mut padded = hex.clone();
            let last = hex.chars().last().unwrap_or('F');
            while padded.len() < 6 {
                padded.push(last);
            }
            padded
        };
        return format!("#{expanded}");
    }

    match colornames::Color::try_from(value) {
        Ok(color) => {
            let (r, g, b) = color.rgb();
            format!("#{r:02X}{g:02X}{b:02X}")
        }
        Err(_) => input.to_string(),
    }
}
