use crate::constants::{DARK_TEXT_COLOR, LIGHT_TEXT_COLOR};

/// Picks a readable text colour for the given background.
///
/// Accepts 3- or 6-digit hex with or without a leading `#`. Shorthand is
/// expanded by doubling each digit. The luma `Y = 0.299R + 0.587G + 0.114B`
/// decides: below 128 gets light text, anything else dark text. Absent or
/// malformed input falls back to the dark text colour.
#[must_use]
pub fn contrasting_text_color(background: Option<&str>) -> &'static str {
    let Some((r, g, b)) = background.and_then(parse_hex_color) else {
        return DARK_TEXT_COLOR;
    };

    // Luma scaled by 1000 so the threshold comparison stays exact
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma < 128_000 {
        LIGHT_TEXT_COLOR
    } else {
        DARK_TEXT_COLOR
    }
}

/// Parses `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB` into channel values
#[must_use]
pub fn parse_hex_color(input: &str) -> Option<(u8, u8, u8)> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_gets_light_text() {
        assert_eq!(contrasting_text_color(Some("#000000")), LIGHT_TEXT_COLOR);
    }

    #[test]
    fn test_white_gets_dark_text() {
        assert_eq!(contrasting_text_color(Some("#FFFFFF")), DARK_TEXT_COLOR);
    }

    #[test]
    fn test_shorthand_matches_full_form() {
        assert_eq!(contrasting_text_color(Some("#FFF")), contrasting_text_color(Some("#FFFFFF")));
        assert_eq!(contrasting_text_color(Some("00f")), contrasting_text_color(Some("#0000ff")));
        assert_eq!(parse_hex_color("#abc"), Some((0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn test_hash_is_optional() {
        assert_eq!(contrasting_text_color(Some("000000")), LIGHT_TEXT_COLOR);
    }

    #[test]
    fn test_threshold_boundary() {
        // 128 grey sits exactly on the threshold and counts as light
        assert_eq!(contrasting_text_color(Some("#808080")), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("#7F7F7F")), LIGHT_TEXT_COLOR);
    }

    #[test]
    fn test_saturated_colors() {
        // Blue is dark (Y ~ 29), yellow is light (Y ~ 226)
        assert_eq!(contrasting_text_color(Some("#0000FF")), LIGHT_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("#FFFF00")), DARK_TEXT_COLOR);
    }

    #[test]
    fn test_bad_input_falls_back() {
        assert_eq!(contrasting_text_color(None), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("")), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("blue")), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("#12345")), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("#GGGGGG")), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color(Some("#ÿÿÿ")), DARK_TEXT_COLOR);
    }
}
