//! JSON file label source
//!
//! Accepts either shape:
//!
//! ```json
//! [{"label": "Brick", "identifier": "http://example.org/Brick"}]
//! ```
//!
//! ```json
//! {"Brick": "http://example.org/Brick"}
//! ```
//!
//! Array order is kept. Object entries come out sorted by label.

use super::LabelSource;
use crate::error::{ContextifyerError, Result};
use crate::types::LabelPair;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelFile {
    Pairs(Vec<LabelPair>),
    Map(serde_json::Map<String, serde_json::Value>),
}

/// Label source reading a local JSON file
#[derive(Debug, Clone)]
pub struct FileLabelSource {
    path: PathBuf,
}

impl FileLabelSource {
    /// Create a source for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse label pairs from JSON text
    pub fn parse(json: &str) -> Result<Vec<LabelPair>> {
        match serde_json::from_str::<LabelFile>(json)? {
            LabelFile::Pairs(pairs) => Ok(pairs),
            LabelFile::Map(map) => map
                .into_iter()
                .map(|(label, value)| match value {
                    serde_json::Value::String(identifier) => Ok(LabelPair::new(label, identifier)),
                    other => Err(ContextifyerError::Ontology(format!(
                        "Label '{}' maps to {} instead of an identifier string",
                        label, other
                    ))),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LabelSource for FileLabelSource {
    async fn fetch_labels(&self) -> Result<Vec<LabelPair>> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ContextifyerError::Ontology(format!("Cannot read label file {}: {}", self.path.display(), e))
        })?;
        let pairs = Self::parse(&json).map_err(|e| {
            ContextifyerError::Ontology(format!("Invalid label file {}: {}", self.path.display(), e))
        })?;
        info!("{} labels loaded from {}", pairs.len(), self.path.display());
        Ok(pairs)
    }

    fn describe(&self) -> String {
        format!("label file {}", self.path.display())
    }
}
