//! Reference index of normalized labels
//!
//! The index maps each normalized label to exactly one identifier and keeps
//! the labels in a stable order, which is the candidate pool the matcher
//! scans for fuzzy matches. Once built, an index is never mutated.
//!
//! Reloading goes through [`IndexHandle`]: a fresh index is built off to
//! the side and swapped in atomically, so a caller holding a snapshot keeps
//! working against the old index while new callers see the new one.
//!
//! # Example
//!
//! ```
//! use contextifyer_core::index::{DuplicatePolicy, ReferenceIndex};
//! use contextifyer_core::LabelPair;
//!
//! let index = ReferenceIndex::build(
//!     vec![LabelPair::new("Thermal Capacity", "http://example.org/ThermalCapacity")],
//!     DuplicatePolicy::LastWins,
//! )?;
//! assert_eq!(index.contains_exact("thermal capacity"), Some("http://example.org/ThermalCapacity"));
//! # Ok::<(), contextifyer_core::ContextifyerError>(())
//! ```

use crate::error::{ContextifyerError, Result};
use crate::text::normalize;
use crate::types::LabelPair;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to do when two raw labels normalize to the same text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later pair replaces the earlier mapping; the label keeps its
    /// first-seen position in the candidate pool
    #[default]
    LastWins,

    /// The earlier mapping is kept and later duplicates are ignored
    FirstWins,

    /// Construction fails on the first collision with a different identifier
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::LastWins => write!(f, "last_wins"),
            DuplicatePolicy::FirstWins => write!(f, "first_wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = ContextifyerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_wins" | "last" => Ok(DuplicatePolicy::LastWins),
            "first_wins" | "first" => Ok(DuplicatePolicy::FirstWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(ContextifyerError::ValidationError(format!(
                "Unknown duplicate policy '{}' (expected last_wins, first_wins or reject)",
                other
            ))),
        }
    }
}

/// Immutable mapping from normalized label to identifier
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    /// Normalized label -> identifier
    entries: HashMap<String, String>,

    /// Normalized labels in first-seen order
    labels: Vec<String>,

    /// When this index was built
    built_at: DateTime<Utc>,
}

impl ReferenceIndex {
    /// Build an index from raw label pairs
    ///
    /// Labels that normalize to the empty string can never be matched and
    /// are dropped. Collisions are resolved by `policy`; only
    /// [`DuplicatePolicy::Reject`] can make this fail.
    pub fn build<I>(pairs: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = LabelPair>,
    {
        let mut entries: HashMap<String, String> = HashMap::new();
        let mut labels = Vec::new();
        let mut collisions = 0usize;
        let mut dropped = 0usize;

        for pair in pairs {
            let key = normalize(&pair.label);
            if key.is_empty() {
                dropped += 1;
                continue;
            }

            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    labels.push(slot.key().clone());
                    slot.insert(pair.identifier);
                }
                Entry::Occupied(mut slot) => {
                    if slot.get() == &pair.identifier {
                        continue;
                    }
                    collisions += 1;
                    match policy {
                        DuplicatePolicy::LastWins => {
                            warn!(
                                "Label '{}' remapped from {} to {}",
                                slot.key(),
                                slot.get(),
                                pair.identifier
                            );
                            slot.insert(pair.identifier);
                        }
                        DuplicatePolicy::FirstWins => {
                            warn!(
                                "Label '{}' already mapped to {}, ignoring {}",
                                slot.key(),
                                slot.get(),
                                pair.identifier
                            );
                        }
                        DuplicatePolicy::Reject => {
                            return Err(ContextifyerError::DuplicateLabel {
                                label: slot.key().clone(),
                                existing: slot.get().clone(),
                                rejected: pair.identifier,
                            });
                        }
                    }
                }
            }
        }

        if dropped > 0 {
            debug!("Dropped {} labels that normalize to nothing", dropped);
        }
        info!(
            "Built reference index: {} labels, {} collisions ({})",
            labels.len(),
            collisions,
            policy
        );

        Ok(Self {
            entries,
            labels,
            built_at: Utc::now(),
        })
    }

    /// An index with no labels; every lookup misses
    pub fn empty() -> Self {
        Self {
            built_at: Utc::now(),
            ..Default::default()
        }
    }

    /// Identifier for an already-normalized label, if present
    pub fn contains_exact(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    /// Normalized labels in stable (first-seen) order
    pub fn candidate_labels(&self) -> &[String] {
        &self.labels
    }

    /// `(label, identifier)` pairs in candidate order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.labels.iter().map(move |label| {
            let identifier = self
                .entries
                .get(label)
                .map(String::as_str)
                .unwrap_or_default();
            (label.as_str(), identifier)
        })
    }

    /// Number of distinct normalized labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the index holds no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// When this index was built
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// Shared, atomically replaceable reference to the live index
///
/// Readers take a snapshot with [`IndexHandle::load`] and use it for the
/// whole of one operation. [`IndexHandle::replace`] publishes a fully built
/// index in one pointer swap.
#[derive(Debug)]
pub struct IndexHandle {
    current: ArcSwap<ReferenceIndex>,
}

impl IndexHandle {
    /// Create a handle around an initial index
    pub fn new(index: ReferenceIndex) -> Self {
        Self {
            current: ArcSwap::from_pointee(index),
        }
    }

    /// Snapshot of the current index
    pub fn load(&self) -> Arc<ReferenceIndex> {
        self.current.load_full()
    }

    /// Publish a new index, returning the one it replaced
    pub fn replace(&self, index: ReferenceIndex) -> Arc<ReferenceIndex> {
        self.install(Arc::new(index))
    }

    fn install(&self, index: Arc<ReferenceIndex>) -> Arc<ReferenceIndex> {
        let installed = index.len();
        let previous = self.current.swap(index);
        info!(
            "Swapped reference index: {} -> {} labels",
            previous.len(),
            installed
        );
        previous
    }

    /// Build a new index from `pairs` and publish it
    ///
    /// On error the live index is left untouched.
    pub fn rebuild<I>(&self, pairs: I, policy: DuplicatePolicy) -> Result<Arc<ReferenceIndex>>
    where
        I: IntoIterator<Item = LabelPair>,
    {
        let index = Arc::new(ReferenceIndex::build(pairs, policy)?);
        self.install(index.clone());
        Ok(index)
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new(ReferenceIndex::empty())
    }
}
