//! Label acquisition
//!
//! The linking core only needs an ordered list of `(label, identifier)`
//! pairs. This module provides the sources that produce it:
//!
//! - [`SparqlLabelSource`]: a SPARQL 1.1 endpoint (e.g. GraphDB), one query
//!   per named graph
//! - [`FileLabelSource`]: a local JSON file, for offline runs and tests
//!
//! [`source_from_settings`] picks one based on configuration.

pub mod file;
pub mod sparql;

pub use file::FileLabelSource;
pub use sparql::SparqlLabelSource;

use crate::config::OntologySettings;
use crate::error::{ContextifyerError, Result};
use crate::types::LabelPair;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can produce label/identifier pairs
#[async_trait]
pub trait LabelSource: Send + Sync {
    /// Fetch every label pair, in a stable order
    async fn fetch_labels(&self) -> Result<Vec<LabelPair>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Choose a label source from configuration
///
/// A configured labels file takes precedence over the SPARQL endpoint.
/// Fails if neither is configured.
pub fn source_from_settings(settings: &OntologySettings) -> Result<Arc<dyn LabelSource>> {
    if let Some(path) = &settings.labels_file {
        return Ok(Arc::new(FileLabelSource::new(path.clone())));
    }

    if settings.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty()) {
        return Ok(Arc::new(SparqlLabelSource::from_settings(settings)?));
    }

    Err(ContextifyerError::Config(config::ConfigError::Message(
        "No label source configured. Set ONTOLOGY_SPARQL_ENDPOINT or pass --labels-file".to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_labels_file_takes_precedence() {
        let settings = OntologySettings {
            endpoint: Some("http://localhost:7200/repositories/demo".to_string()),
            labels_file: Some(PathBuf::from("labels.json")),
            ..Default::default()
        };
        let source = source_from_settings(&settings).unwrap();
        assert!(source.describe().contains("labels.json"));
    }

    #[test]
    fn test_endpoint_source() {
        let settings = OntologySettings {
            endpoint: Some("http://localhost:7200/repositories/demo".to_string()),
            ..Default::default()
        };
        let source = source_from_settings(&settings).unwrap();
        assert!(source.describe().contains("localhost:7200"));
    }

    #[test]
    fn test_no_source_configured() {
        let result = source_from_settings(&OntologySettings::default());
        assert!(matches!(result, Err(ContextifyerError::Config(_))));

        let blank = OntologySettings {
            endpoint: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(source_from_settings(&blank).is_err());
    }
}
