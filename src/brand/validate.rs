//! Hex color predicate for editors checking input before submission.

/// True for `#RGB` or `#RRGGBB` with hex digits of either case.
///
/// The applicator never calls this; it writes whatever string a theme holds.
pub fn validate_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Wire names of populated color fields that fail [`validate_hex_color`].
pub fn invalid_colors(theme: &super::ThemeConfig) -> Vec<&'static str> {
    theme
        .colors()
        .into_iter()
        .filter(|(_, value)| !validate_hex_color(value))
        .map(|(key, _)| key)
        .collect()
}
