//! Canonical comparison form for labels and candidate spans
//!
//! Both sides of every comparison go through [`normalize`]: ontology labels
//! when the index is built, and candidate spans when the matcher is asked
//! about them. The function is pure and total.
//!
//! # Rules
//!
//! 1. Lowercase every character
//! 2. Drop every character that is not alphanumeric, `_`, whitespace or `-`
//! 3. Collapse whitespace runs to a single space and trim both ends
//!
//! # Example
//!
//! ```
//! use contextifyer_core::text::normalize;
//!
//! assert_eq!(normalize("  Thermal   Capacity. "), "thermal capacity");
//! assert_eq!(normalize("Cross-Laminated Timber's"), "cross-laminated timbers");
//! ```

/// Normalize a span of text into its comparable form
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let kept: String = lowered.chars().filter(|&c| is_kept(c)).collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}
