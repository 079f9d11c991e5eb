//! Normalized edit-distance similarity
//!
//! The score is the InDel ratio: the edit distance that only allows
//! insertions and deletions (a substitution costs 2), normalized by the
//! combined length of both strings and scaled to 0-100.
//!
//! ```text
//! ratio(a, b) = 100 * (1 - indel(a, b) / (|a| + |b|))
//! indel(a, b) = |a| + |b| - 2 * lcs(a, b)
//! ```
//!
//! Lengths count Unicode scalar values. Two empty strings score 100.

/// Similarity of two strings on a 0-100 scale, 100 meaning identical
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    let distance = total - 2 * lcs_len(&a, &b);
    100.0 * (1.0 - distance as f64 / total as f64)
}

/// Insertion/deletion edit distance between two strings
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Length of the longest common subsequence, single-row dynamic programming
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Iterate over the longer string so the row is the shorter one
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut row = vec![0usize; inner.len() + 1];

    for &oc in outer {
        let mut diagonal = 0;
        for (j, &ic) in inner.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if oc == ic {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[inner.len()]
}
