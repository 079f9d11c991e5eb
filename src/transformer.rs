//! Greedy longest-span text rewriter
//!
//! Splits the input on whitespace and walks the words left to right. At
//! each position it tries the widest window first (`max_ngram` words) and
//! narrows down to a single word; the first window the matcher accepts is
//! emitted as `[span](identifier)` and the cursor jumps past it. When no
//! window matches, the word is emitted unchanged and the cursor moves by one.
//!
//! Preferring the widest window keeps compound terms whole: with labels
//! "Thermal Capacity" and "Capacity", the text "Thermal Capacity" links the
//! full phrase. The flip side is that a shorter term nested inside a wider
//! window is never revisited once the wider window has been consumed.
//!
//! Output words are joined by single spaces; original line breaks and runs
//! of spaces are not preserved.

use crate::matcher::Matcher;
use crate::types::{LabelMatch, LinkedSpan, MatchResult, Transformation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default widest window, in words
pub const DEFAULT_MAX_NGRAM: usize = 5;

/// Transformer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Widest window tried at each position; values below 1 act as 1
    pub max_ngram: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            max_ngram: DEFAULT_MAX_NGRAM,
        }
    }
}

/// Render a matched span as a reference link
pub fn link_markup(span: &str, identifier: &str) -> String {
    format!("[{}]({})", span, identifier)
}

/// Rewrites text by linking matched spans
#[derive(Debug, Clone)]
pub struct Transformer {
    matcher: Matcher,
    max_ngram: usize,
}

impl Transformer {
    /// Create a transformer driving `matcher`
    pub fn new(matcher: Matcher, config: TransformerConfig) -> Self {
        Self {
            matcher,
            max_ngram: config.max_ngram.max(1),
        }
    }

    /// The matcher consulted for every window
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rewrite `text`, linking every matched span
    pub fn transform(&self, text: &str) -> String {
        self.transform_detailed(text).text
    }

    /// Rewrite `text` and report the links that were made
    pub fn transform_detailed(&self, text: &str) -> Transformation {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut tokens: Vec<String> = Vec::with_capacity(words.len());
        let mut links = Vec::new();

        let mut i = 0;
        while i < words.len() {
            match self.longest_match_at(&words, i) {
                Some((n, span, matched)) => {
                    debug!("Matched {}-gram '{}' -> {}", n, span, matched.identifier);
                    tokens.push(link_markup(&span, &matched.identifier));
                    links.push(LinkedSpan {
                        text: span,
                        word_offset: i,
                        word_count: n,
                        matched,
                    });
                    i += n;
                }
                None => {
                    tokens.push(words[i].to_string());
                    i += 1;
                }
            }
        }

        Transformation {
            text: tokens.join(" "),
            links,
        }
    }

    /// Widest window starting at `start` that the matcher accepts
    fn longest_match_at(
        &self,
        words: &[&str],
        start: usize,
    ) -> Option<(usize, String, LabelMatch)> {
        let widest = self.max_ngram.min(words.len() - start);
        (1..=widest).rev().find_map(|n| {
            let span = words[start..start + n].join(" ");
            match self.matcher.find(&span) {
                MatchResult::Matched(matched) => Some((n, span, matched)),
                MatchResult::NoMatch => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{DuplicatePolicy, ReferenceIndex};
    use crate::matcher::MatcherConfig;
    use crate::types::LabelPair;
    use std::sync::Arc;

    fn transformer(labels: &[(&str, &str)], max_ngram: usize) -> Transformer {
        let index = ReferenceIndex::build(
            labels.iter().map(|&(l, i)| LabelPair::new(l, i)),
            DuplicatePolicy::LastWins,
        )
        .unwrap();
        let matcher = Matcher::new(Arc::new(index), MatcherConfig::default());
        Transformer::new(matcher, TransformerConfig { max_ngram })
    }

    #[test]
    fn test_basic_link() {
        let t = transformer(&[("computer", "http://example.org/Computer")], 5);
        let output = t.transform("I love Computer science.");
        assert!(output.contains("[Computer](http://example.org/Computer)"));
        assert_eq!(output, "I love [Computer](http://example.org/Computer) science.");
    }

    #[test]
    fn test_end_to_end_example() {
        let t = transformer(
            &[
                ("brick", "ID_A"),
                ("straw", "ID_B"),
                ("thermal capacity", "ID_C"),
            ],
            5,
        );
        assert_eq!(
            t.transform("This wall uses Brick and straw for Thermal Capacity"),
            "This wall uses [Brick](ID_A) and [straw](ID_B) for [Thermal Capacity](ID_C)"
        );
    }

    #[test]
    fn test_prefers_longest_span() {
        let t = transformer(
            &[("capacity", "urn:cap"), ("thermal capacity", "urn:thermal")],
            5,
        );
        assert_eq!(
            t.transform("high Thermal Capacity walls"),
            "high [Thermal Capacity](urn:thermal) walls"
        );
    }

    #[test]
    fn test_window_limits_span_length() {
        let t = transformer(&[("thermal capacity", "urn:c")], 1);
        assert_eq!(t.transform("Thermal Capacity"), "Thermal Capacity");
    }

    #[test]
    fn test_zero_window_acts_as_one() {
        let t = transformer(&[("brick", "urn:a")], 0);
        assert_eq!(t.transform("a brick wall"), "a [brick](urn:a) wall");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let t = transformer(&[("brick", "urn:a")], 5);
        assert_eq!(t.transform("  one\n\ntwo\tBrick  "), "one two [Brick](urn:a)");
    }

    #[test]
    fn test_empty_input() {
        let t = transformer(&[("brick", "urn:a")], 5);
        assert_eq!(t.transform(""), "");
        assert_eq!(t.transform("   \n "), "");
    }

    #[test]
    fn test_link_keeps_original_punctuation() {
        let t = transformer(&[("brick", "urn:a")], 5);
        assert_eq!(t.transform("Brick, straw"), "[Brick,](urn:a) straw");
    }

    #[test]
    fn test_detailed_report() {
        let t = transformer(&[("brick", "ID_A"), ("thermal capacity", "ID_C")], 5);
        let report = t.transform_detailed("Brick has Thermal Capacity");

        assert_eq!(report.text, "[Brick](ID_A) has [Thermal Capacity](ID_C)");
        assert_eq!(report.links.len(), 2);
        assert_eq!(report.links[0].text, "Brick");
        assert_eq!(report.links[0].word_offset, 0);
        assert_eq!(report.links[0].word_count, 1);
        assert_eq!(report.links[1].text, "Thermal Capacity");
        assert_eq!(report.links[1].word_offset, 2);
        assert_eq!(report.links[1].word_count, 2);
        assert!(report.links[1].matched.exact);
    }

    #[test]
    fn test_no_labels_passes_text_through() {
        let t = transformer(&[], 5);
        assert_eq!(t.transform("nothing to see here"), "nothing to see here");
    }

    #[test]
    fn test_link_markup() {
        assert_eq!(link_markup("Brick", "urn:a"), "[Brick](urn:a)");
    }
}
