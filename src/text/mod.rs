//! Text utilities for the linking core
//!
//! - [`normalize`]: canonical comparable form of a span or label
//! - [`similarity`]: edit-distance ratio on a 0-100 scale
//! - [`is_decimal_digit`]: the digit test behind the matcher's skip rule
//!
//! Plus a small helper for previewing long inputs in log lines.

pub mod normalize;
pub mod similarity;

pub use normalize::normalize;
pub use similarity::ratio;

/// First code point of each run of ten non-ASCII decimal digits (Unicode Nd)
const DECIMAL_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0,
    0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0,
    0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0,
    0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0,
    0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Mathematical alphanumeric digits, five styles of 0-9
const MATH_DIGITS: std::ops::RangeInclusive<u32> = 0x1D7CE..=0x1D7FF;

/// Whether `c` is a decimal digit in any script
///
/// Narrower than [`char::is_numeric`]: fractions (`½`), Roman numerals
/// (`Ⅻ`), superscripts and subscripts (`²`, `₂`) are not decimal digits.
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    if !c.is_numeric() {
        return false;
    }
    let code = u32::from(c);
    MATH_DIGITS.contains(&code) || DECIMAL_ZEROS.iter().any(|&zero| (zero..zero + 10).contains(&code))
}

/// Truncate a string at a character boundary, adding an ellipsis if truncated.
///
/// Used when logging request bodies and document contents so that a single
/// log line stays readable. Counts UTF-8 characters, never bytes, so it can't
/// split a multi-byte character.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
