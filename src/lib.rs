//! Contextifyer - Ontology term linking for markdown text
//!
//! Rewrites prose so that phrases naming ontology concepts become links to
//! the concepts' identifiers:
//! - Labels are fetched from a SPARQL endpoint (or a local JSON file)
//! - Phrases are matched exactly or fuzzily with length-aware thresholds
//! - Matches are replaced longest-first, left to right, as `[phrase](iri)`
//!
//! # Architecture
//!
//! - **Text**: Normalization and the similarity ratio
//! - **Index**: Label map built from label pairs, swapped atomically on reload
//! - **Matcher**: Single-phrase lookup (skip rules, exact, fuzzy)
//! - **Transformer**: Greedy n-gram scan that rewrites a document
//! - **Ontology**: Label sources (SPARQL, JSON file)
//! - **API**: HTTP service around a shared [`Contextifier`]
//!
//! # Example
//!
//! ```ignore
//! use contextifyer_core::{Contextifier, DuplicatePolicy, LabelPair, MatcherConfig, TransformerConfig};
//!
//! let contextifier = Contextifier::from_pairs(
//!     vec![LabelPair::new("Computer Science", "http://example.org/CS")],
//!     DuplicatePolicy::LastWins,
//!     MatcherConfig::default(),
//!     TransformerConfig::default(),
//! )?;
//!
//! assert_eq!(
//!     contextifier.transform("I love Computer science."),
//!     "I love [Computer science.](http://example.org/CS)"
//! );
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod contextifier;
pub mod error;
pub mod index;
pub mod matcher;
pub mod ontology;
pub mod text;
pub mod transformer;
pub mod types;

// Re-export commonly used types
pub use config::Settings;
pub use contextifier::Contextifier;
pub use error::{ContextifyerError, Result};
pub use index::{DuplicatePolicy, IndexHandle, ReferenceIndex};
pub use matcher::{Matcher, MatcherConfig};
pub use ontology::{FileLabelSource, LabelSource, SparqlLabelSource};
pub use transformer::{Transformer, TransformerConfig};
pub use types::{LabelMatch, LabelPair, LinkedSpan, MatchResult, Transformation};
