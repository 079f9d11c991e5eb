//! Service facade tying the live index to matcher and transformer settings
//!
//! A [`Contextifier`] is what the HTTP service, the batch runner and the CLI
//! share. Each call takes one snapshot of the live index and runs entirely
//! against it, so a concurrent reload never shows a call two different
//! indexes.

use crate::error::Result;
use crate::index::{DuplicatePolicy, IndexHandle, ReferenceIndex};
use crate::matcher::{Matcher, MatcherConfig};
use crate::ontology::LabelSource;
use crate::transformer::{Transformer, TransformerConfig};
use crate::types::{LabelPair, MatchResult, Transformation};
use std::sync::Arc;
use tracing::{info, warn};

/// Text-linking service over a reloadable reference index
#[derive(Debug)]
pub struct Contextifier {
    index: IndexHandle,
    matcher_config: MatcherConfig,
    transformer_config: TransformerConfig,
    duplicate_policy: DuplicatePolicy,
}

impl Contextifier {
    /// Create a service around an already-built index
    pub fn new(
        index: ReferenceIndex,
        matcher_config: MatcherConfig,
        transformer_config: TransformerConfig,
    ) -> Self {
        Self {
            index: IndexHandle::new(index),
            matcher_config,
            transformer_config,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Build the index from raw pairs and create a service around it
    pub fn from_pairs<I>(
        pairs: I,
        duplicate_policy: DuplicatePolicy,
        matcher_config: MatcherConfig,
        transformer_config: TransformerConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = LabelPair>,
    {
        let index = ReferenceIndex::build(pairs, duplicate_policy)?;
        Ok(Self::new(index, matcher_config, transformer_config)
            .with_duplicate_policy(duplicate_policy))
    }

    /// Set the policy used for later reloads
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Snapshot of the live index
    pub fn snapshot(&self) -> Arc<ReferenceIndex> {
        self.index.load()
    }

    /// Number of labels in the live index
    pub fn label_count(&self) -> usize {
        self.index.load().len()
    }

    /// Matcher configuration in use
    pub fn matcher_config(&self) -> &MatcherConfig {
        &self.matcher_config
    }

    /// Transformer configuration in use
    pub fn transformer_config(&self) -> &TransformerConfig {
        &self.transformer_config
    }

    /// Matcher bound to the current index snapshot
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.index.load(), self.matcher_config.clone())
    }

    /// Transformer bound to the current index snapshot
    pub fn transformer(&self) -> Transformer {
        Transformer::new(self.matcher(), self.transformer_config.clone())
    }

    /// Single matcher decision for `text`
    pub fn match_text(&self, text: &str) -> MatchResult {
        self.matcher().find(text)
    }

    /// Rewrite `text`, linking matched spans
    pub fn transform(&self, text: &str) -> String {
        self.transformer().transform(text)
    }

    /// Rewrite `text` and report the links made
    pub fn transform_detailed(&self, text: &str) -> Transformation {
        self.transformer().transform_detailed(text)
    }

    /// Replace the live index with one built from `pairs`
    ///
    /// Returns the new label count. If the build fails the live index is
    /// kept.
    pub fn reload<I>(&self, pairs: I) -> Result<usize>
    where
        I: IntoIterator<Item = LabelPair>,
    {
        let index = self.index.rebuild(pairs, self.duplicate_policy)?;
        Ok(index.len())
    }

    /// Fetch labels from `source` and swap them in
    pub async fn reload_from(&self, source: &dyn LabelSource) -> Result<usize> {
        info!("Reloading labels from {}", source.describe());
        let pairs = match source.fetch_labels().await {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("Label reload failed, keeping current index: {}", e);
                return Err(e);
            }
        };
        self.reload(pairs)
    }
}
