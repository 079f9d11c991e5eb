//! Candidate-span matcher
//!
//! Decides, for one candidate span, whether it names a label in the
//! reference index. The decision runs in a fixed order and stops at the
//! first step that settles it:
//!
//! 1. **Normalize** the span; an empty result is no match.
//! 2. **Skip** spans containing a digit, spans of one character or less, and
//!    spans made only of stopwords.
//! 3. **Exact** lookup in the index; a hit always wins, score 100.
//! 4. **Multi-word guard**: spans of several words are only matched exactly
//!    unless `allow_multiword_fuzzy` is set.
//! 5. **Threshold** from the span length: short spans need a perfect score,
//!    medium spans a near-perfect one, long spans the configured base. Tiers
//!    only ever raise the bar.
//! 6. **Fuzzy** scan of every candidate label in index order; the first
//!    label with the maximal score wins if it clears the threshold.
//!
//! An empty index simply never matches.

use crate::index::ReferenceIndex;
use crate::text::{is_decimal_digit, normalize, ratio};
use crate::types::{LabelMatch, MatchResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, trace};

/// Default base acceptance score, the cutoff the service has always used
pub const DEFAULT_BASE_SCORE: u8 = 92;

/// English function words that never get linked on their own
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "of", "a", "an", "is", "in", "and", "for", "to", "with", "as", "on", "at", "by", "or",
];

static DEFAULT_STOPWORD_SET: Lazy<BTreeSet<String>> =
    Lazy::new(|| DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect());

/// Length-dependent minimum scores
///
/// A normalized span shorter than `short_below` characters needs at least
/// `short_min`; shorter than `medium_below` needs `medium_min`; anything
/// longer uses the matcher's base score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthTiers {
    pub short_below: usize,
    pub short_min: u8,
    pub medium_below: usize,
    pub medium_min: u8,
}

impl Default for LengthTiers {
    fn default() -> Self {
        Self {
            short_below: 5,
            short_min: 100,
            medium_below: 8,
            medium_min: 97,
        }
    }
}

impl LengthTiers {
    /// Minimum score the tiers impose for a span of `len` characters
    pub fn minimum_for(&self, len: usize) -> u8 {
        if len < self.short_below {
            self.short_min
        } else if len < self.medium_below {
            self.medium_min
        } else {
            0
        }
    }
}

/// Matcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Base acceptance score, 0-100
    pub base_score: u8,

    /// Words that are never matched on their own (compared normalized)
    pub stopwords: BTreeSet<String>,

    /// Allow fuzzy matching of spans with more than one word
    pub allow_multiword_fuzzy: bool,

    /// Log every decision at info level instead of trace
    pub log_matches: bool,

    /// Length-dependent minimum scores
    pub tiers: LengthTiers,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            base_score: DEFAULT_BASE_SCORE,
            stopwords: DEFAULT_STOPWORD_SET.clone(),
            allow_multiword_fuzzy: false,
            log_matches: false,
            tiers: LengthTiers::default(),
        }
    }
}

impl MatcherConfig {
    /// Replace the stopword set; entries are normalized on the way in
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    /// Score a span of `len` normalized characters must reach
    pub fn effective_threshold(&self, len: usize) -> u8 {
        self.base_score.max(self.tiers.minimum_for(len))
    }
}

/// Matches candidate spans against one immutable index snapshot
#[derive(Debug, Clone)]
pub struct Matcher {
    index: Arc<ReferenceIndex>,
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher over an index snapshot
    pub fn new(index: Arc<ReferenceIndex>, config: MatcherConfig) -> Self {
        Self { index, config }
    }

    /// The index this matcher consults
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// The configuration in use
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Decide whether `raw_text` names a label
    pub fn find(&self, raw_text: &str) -> MatchResult {
        let result = self.decide(raw_text);
        self.log_decision(raw_text, &result);
        result
    }

    fn decide(&self, raw_text: &str) -> MatchResult {
        let normalized = normalize(raw_text);
        if normalized.is_empty() || self.should_skip(&normalized) {
            return MatchResult::NoMatch;
        }

        if let Some(identifier) = self.index.contains_exact(&normalized) {
            return MatchResult::Matched(LabelMatch {
                identifier: identifier.to_string(),
                label: normalized,
                score: 100.0,
                exact: true,
            });
        }

        if normalized.contains(' ') && !self.config.allow_multiword_fuzzy {
            return MatchResult::NoMatch;
        }

        let threshold = f64::from(self.config.effective_threshold(normalized.chars().count()));

        match self.best_candidate(&normalized) {
            Some((label, score)) if score >= threshold => {
                let identifier = self.index.contains_exact(label).unwrap_or_default();
                MatchResult::Matched(LabelMatch {
                    identifier: identifier.to_string(),
                    label: label.to_string(),
                    score,
                    exact: false,
                })
            }
            _ => MatchResult::NoMatch,
        }
    }

    /// Skip heuristics applied before the index is consulted
    fn should_skip(&self, normalized: &str) -> bool {
        if normalized.chars().any(is_decimal_digit) {
            return true;
        }
        if normalized.chars().count() <= 1 {
            return true;
        }
        normalized
            .split(' ')
            .all(|part| self.config.stopwords.contains(part))
    }

    /// First candidate with the maximal score, in index order
    fn best_candidate(&self, normalized: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for label in self.index.candidate_labels() {
            let score = ratio(normalized, label);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((label.as_str(), score)),
            }
        }
        best
    }

    fn log_decision(&self, raw_text: &str, result: &MatchResult) {
        match (result, self.config.log_matches) {
            (MatchResult::Matched(m), true) => info!(
                "[MATCH] '{}' -> '{}' ({:.1}%) -> {}",
                raw_text, m.label, m.score, m.identifier
            ),
            (MatchResult::NoMatch, true) => info!("[NO MATCH] '{}'", raw_text),
            (MatchResult::Matched(m), false) => trace!(
                "Matched '{}' -> '{}' ({:.1}%, exact: {})",
                raw_text,
                m.label,
                m.score,
                m.exact
            ),
            (MatchResult::NoMatch, false) => trace!("No match for '{}'", raw_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DuplicatePolicy;
    use crate::types::LabelPair;

    fn matcher_with(labels: &[(&str, &str)], config: MatcherConfig) -> Matcher {
        let index = ReferenceIndex::build(
            labels.iter().map(|&(l, i)| LabelPair::new(l, i)),
            DuplicatePolicy::LastWins,
        )
        .unwrap();
        Matcher::new(Arc::new(index), config)
    }

    fn matcher(labels: &[(&str, &str)]) -> Matcher {
        matcher_with(labels, MatcherConfig::default())
    }

    #[test]
    fn test_exact_match() {
        let m = matcher(&[("computer", "http://example.org/Computer")]);
        let result = m.find("Computer");
        let found = result.as_match().expect("should match");
        assert_eq!(found.identifier, "http://example.org/Computer");
        assert_eq!(found.label, "computer");
        assert_eq!(found.score, 100.0);
        assert!(found.exact);
    }

    #[test]
    fn test_no_match() {
        let m = matcher(&[("computer", "http://example.org/Computer")]);
        assert_eq!(m.find("Banana"), MatchResult::NoMatch);
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let m = matcher(&[("Thermal Capacity", "urn:c")]);
        assert!(m.find("thermal capacity,").is_match());
        assert!(m.find("THERMAL   CAPACITY").is_match());
    }

    #[test]
    fn test_empty_after_normalization() {
        let m = matcher(&[("brick", "urn:a")]);
        assert_eq!(m.find(""), MatchResult::NoMatch);
        assert_eq!(m.find("?!"), MatchResult::NoMatch);
    }

    #[test]
    fn test_digit_rejection() {
        let m = matcher(&[("module2", "urn:m"), ("module", "urn:n")]);
        assert_eq!(m.find("module2"), MatchResult::NoMatch);
        assert_eq!(m.find("3d printing"), MatchResult::NoMatch);
        assert_eq!(m.find("module٢"), MatchResult::NoMatch);
    }

    #[test]
    fn test_subscripts_are_not_digits() {
        let m = matcher(&[("CO₂", "urn:co2"), ("m²", "urn:m2")]);
        assert_eq!(m.find("CO₂").as_match().map(|f| f.identifier.as_str()), Some("urn:co2"));
        assert!(m.find("m²").is_match());
    }

    #[test]
    fn test_single_character_rejected() {
        let m = matcher(&[("x", "urn:x")]);
        assert_eq!(m.find("X"), MatchResult::NoMatch);
    }

    #[test]
    fn test_stopword_short_circuit_beats_exact_label() {
        let m = matcher(&[("the", "urn:the"), ("of the", "urn:ofthe")]);
        assert_eq!(m.find("The"), MatchResult::NoMatch);
        assert_eq!(m.find("of the"), MatchResult::NoMatch);
    }

    #[test]
    fn test_stopword_inside_phrase_does_not_skip() {
        let m = matcher(&[("coefficient of performance", "urn:cop")]);
        assert!(m.find("Coefficient of Performance").is_match());
    }

    #[test]
    fn test_custom_stopwords() {
        let config = MatcherConfig::default().with_stopwords(["Brick"]);
        let m = matcher_with(&[("brick", "urn:a"), ("the", "urn:the")], config);
        assert_eq!(m.find("brick"), MatchResult::NoMatch);
        assert!(m.find("the").is_match());
    }

    #[test]
    fn test_short_candidate_needs_perfect_score() {
        // "wall" vs "ball" scores 75; even a zero base score can't lower the tier
        let config = MatcherConfig {
            base_score: 0,
            ..Default::default()
        };
        let m = matcher_with(&[("ball", "urn:ball")], config);
        assert_eq!(m.find("wall"), MatchResult::NoMatch);
    }

    #[test]
    fn test_medium_candidate_needs_97() {
        let config = MatcherConfig {
            base_score: 50,
            ..Default::default()
        };
        // "strawy" vs "straw": 1 - 1/11 = 90.9
        let m = matcher_with(&[("straw", "urn:b")], config);
        assert_eq!(m.find("strawy"), MatchResult::NoMatch);
    }

    #[test]
    fn test_long_candidate_uses_base_score() {
        // "insulations" vs "insulation": 1 - 1/21 = 95.2
        let m = matcher(&[("insulation", "urn:ins")]);
        let result = m.find("insulations");
        let found = result.as_match().expect("should fuzzy match");
        assert!(!found.exact);
        assert_eq!(found.label, "insulation");
        assert!((found.score - 100.0 * 20.0 / 21.0).abs() < 1e-9);

        let strict = matcher_with(
            &[("insulation", "urn:ins")],
            MatcherConfig {
                base_score: 96,
                ..Default::default()
            },
        );
        assert_eq!(strict.find("insulations"), MatchResult::NoMatch);
    }

    #[test]
    fn test_long_substitution_within_base() {
        // One substitution over thirteen letters: 92.3
        let m = matcher(&[("decarbonising", "urn:d")]);
        assert!(m.find("decarbonizing").is_match());
    }

    #[test]
    fn test_multiword_fuzzy_guard() {
        let labels = [("thermal capacity", "urn:c")];
        let m = matcher(&labels);
        assert_eq!(m.find("Thermall Capacity"), MatchResult::NoMatch);

        let relaxed = matcher_with(
            &labels,
            MatcherConfig {
                allow_multiword_fuzzy: true,
                ..Default::default()
            },
        );
        let result = relaxed.find("Thermall Capacity");
        let found = result.as_match().expect("should fuzzy match with flag");
        assert_eq!(found.identifier, "urn:c");
        assert!(!found.exact);
    }

    #[test]
    fn test_tie_resolves_to_first_in_index_order() {
        // Both labels are one insertion away from "concretes"
        let config = MatcherConfig {
            base_score: 90,
            ..Default::default()
        };
        let m = matcher_with(&[("concrete", "urn:first"), ("oncretes", "urn:second")], config);
        let result = m.find("concretes");
        assert_eq!(result.as_match().map(|f| f.identifier.as_str()), Some("urn:first"));
    }

    #[test]
    fn test_empty_index_never_matches() {
        let m = Matcher::new(Arc::new(ReferenceIndex::empty()), MatcherConfig::default());
        assert_eq!(m.find("anything"), MatchResult::NoMatch);
        assert_eq!(m.find("thermal capacity"), MatchResult::NoMatch);
    }

    #[test]
    fn test_effective_threshold_tiers() {
        let config = MatcherConfig::default();
        assert_eq!(config.effective_threshold(4), 100);
        assert_eq!(config.effective_threshold(5), 97);
        assert_eq!(config.effective_threshold(7), 97);
        assert_eq!(config.effective_threshold(8), 92);

        let strict = MatcherConfig {
            base_score: 99,
            ..Default::default()
        };
        assert_eq!(strict.effective_threshold(6), 99);
    }
}
