//! Core data types for the Contextifyer service
//!
//! This module defines the plain data structures shared between label
//! acquisition, the reference index, the matcher and the transformer.
//! None of them carry behaviour beyond small accessors.

use serde::{Deserialize, Serialize};

/// A raw `(display label, identifier)` pair as delivered by a label source
///
/// The label is kept exactly as the ontology spells it; normalization
/// happens when the pair is inserted into a [`crate::index::ReferenceIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    /// Human-readable label (e.g. a `skos:prefLabel` literal)
    pub label: String,

    /// Opaque canonical identifier, usually an IRI
    pub identifier: String,
}

impl LabelPair {
    /// Create a new label pair
    pub fn new(label: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            identifier: identifier.into(),
        }
    }
}

impl<L: Into<String>, I: Into<String>> From<(L, I)> for LabelPair {
    fn from((label, identifier): (L, I)) -> Self {
        Self::new(label, identifier)
    }
}

/// A successful match of a candidate span against the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMatch {
    /// Identifier the matched label resolves to
    pub identifier: String,

    /// The normalized label that was matched
    pub label: String,

    /// Similarity score on a 0-100 scale (100 for exact matches)
    pub score: f64,

    /// Whether the normalized candidate equalled the label verbatim
    pub exact: bool,
}

/// Outcome of a single matcher decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum MatchResult {
    /// Candidate was skipped or nothing cleared the threshold
    NoMatch,

    /// Candidate resolved to a label
    Matched(LabelMatch),
}

impl MatchResult {
    /// Check if this result is a match
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    /// Borrow the match, if any
    pub fn as_match(&self) -> Option<&LabelMatch> {
        match self {
            MatchResult::Matched(m) => Some(m),
            MatchResult::NoMatch => None,
        }
    }

    /// Take the match, if any
    pub fn into_match(self) -> Option<LabelMatch> {
        match self {
            MatchResult::Matched(m) => Some(m),
            MatchResult::NoMatch => None,
        }
    }
}

/// A span of input text that the transformer rewrote into a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedSpan {
    /// Span as it appeared in the input (words joined by single spaces)
    pub text: String,

    /// Index of the first word of the span
    pub word_offset: usize,

    /// Number of words in the span
    pub word_count: usize,

    /// The match that produced the link
    #[serde(flatten)]
    pub matched: LabelMatch,
}

/// Rewritten text together with the links that were made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// Rewritten text
    pub text: String,

    /// Links in left-to-right order
    pub links: Vec<LinkedSpan>,
}
