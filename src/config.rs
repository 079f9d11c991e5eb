//! Layered configuration for Contextifyer
//!
//! Settings are assembled with the `config` crate from, lowest priority
//! first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config <path>`, else `<config dir>/contextifyer/config.toml`)
//! 3. `CONTEXTIFYER__SECTION__KEY` environment variables
//! 4. The ontology service's own variable names: `ONTOLOGY_SPARQL_ENDPOINT`,
//!    `GRAPHDB_USERNAME`, `GRAPHDB_PASSWORD`, `NAMED_GRAPHS`
//!
//! A `.env` file in the working directory is loaded before any of this, so
//! those variables can live there.
//!
//! # Example
//!
//! ```toml
//! [ontology]
//! endpoint = "http://localhost:7200/repositories/materials"
//! named_graphs = "http://example.org/graph/materials, http://example.org/graph/physics"
//! language = "en"
//!
//! [index]
//! duplicate_policy = "first_wins"
//!
//! [matcher]
//! base_score = 94
//! allow_multiword_fuzzy = false
//!
//! [transformer]
//! max_ngram = 4
//! ```

use crate::error::{ContextifyerError, Result};
use crate::index::DuplicatePolicy;
use crate::matcher::MatcherConfig;
use crate::transformer::TransformerConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// SKOS preferred label, the predicate labels are read from by default
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

/// Environment variables understood without the `CONTEXTIFYER__` prefix
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("ONTOLOGY_SPARQL_ENDPOINT", "ontology.endpoint"),
    ("GRAPHDB_USERNAME", "ontology.username"),
    ("GRAPHDB_PASSWORD", "ontology.password"),
    ("NAMED_GRAPHS", "ontology.named_graphs"),
];

/// Get the default config file path using the platform config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contextifyer")
        .join("config.toml")
}

/// Where labels come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologySettings {
    /// SPARQL query endpoint
    pub endpoint: Option<String>,

    /// Basic-auth user for the endpoint
    pub username: Option<String>,

    /// Basic-auth password for the endpoint
    pub password: Option<String>,

    /// Comma-separated named graph IRIs; empty means the default graph
    pub named_graphs: String,

    /// Predicate whose literals are the labels
    pub label_predicate: String,

    /// Keep only literals with this language tag (untagged literals always pass)
    pub language: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Read labels from this JSON file instead of the endpoint
    pub labels_file: Option<PathBuf>,
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            password: None,
            named_graphs: String::new(),
            label_predicate: SKOS_PREF_LABEL.to_string(),
            language: None,
            timeout_secs: 30,
            labels_file: None,
        }
    }
}

impl OntologySettings {
    /// Named graph IRIs, trimmed, empties dropped
    pub fn graph_iris(&self) -> Vec<String> {
        self.named_graphs
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Reference index construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// How labels that normalize identically are resolved
    pub duplicate_policy: DuplicatePolicy,
}

/// HTTP service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Batch file processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// File extension processed when walking a directory
    pub extension: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ontology: OntologySettings,
    pub index: IndexSettings,
    pub matcher: MatcherConfig,
    pub transformer: TransformerConfig,
    pub server: ServerSettings,
    pub batch: BatchSettings,
}

impl Settings {
    /// Load settings from every layer
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                debug!("Using config file {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = default_config_path();
                builder =
                    builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CONTEXTIFYER")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("matcher.stopwords")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV_KEYS {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validated()
    }

    /// Parse settings from a TOML string over the defaults (no env layers)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    /// Check ranges and canonicalize values
    pub fn validated(mut self) -> Result<Self> {
        if self.matcher.base_score > 100 {
            return Err(ContextifyerError::ValidationError(format!(
                "matcher.base_score must be between 0 and 100, got {}",
                self.matcher.base_score
            )));
        }
        let tiers = &self.matcher.tiers;
        if tiers.short_min > 100 || tiers.medium_min > 100 {
            return Err(ContextifyerError::ValidationError(
                "matcher.tiers minimum scores must be between 0 and 100".to_string(),
            ));
        }
        if tiers.short_below > tiers.medium_below {
            return Err(ContextifyerError::ValidationError(format!(
                "matcher.tiers.short_below ({}) must not exceed medium_below ({})",
                tiers.short_below, tiers.medium_below
            )));
        }
        if self.transformer.max_ngram == 0 {
            self.transformer.max_ngram = 1;
        }
        self.server_addr()?;

        let stopwords = std::mem::take(&mut self.matcher.stopwords);
        self.matcher = self.matcher.with_stopwords(stopwords);
        self.batch.extension = self.batch.extension.trim_start_matches('.').to_string();

        Ok(self)
    }

    /// Parsed listen address
    pub fn server_addr(&self) -> Result<SocketAddr> {
        self.server.addr.parse().map_err(|e| {
            ContextifyerError::ValidationError(format!(
                "Invalid server address '{}': {}",
                self.server.addr, e
            ))
        })
    }

    /// Render as TOML with the password masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.ontology.password.is_some() {
            shown.ontology.password = Some("********".to_string());
        }
        toml::to_string_pretty(&shown)
            .map_err(|e| ContextifyerError::Other(format!("Failed to render settings: {}", e)))
    }
}
