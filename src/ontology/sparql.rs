//! SPARQL endpoint label source
//!
//! Selects `(?subject, ?label)` for the configured label predicate from each
//! named graph, using the SPARQL 1.1 protocol over HTTP with JSON results.
//! Results are ordered by subject then label inside the query so that the
//! resulting index order, and with it fuzzy tie-breaking, is reproducible.

use super::LabelSource;
use crate::config::OntologySettings;
use crate::error::{ContextifyerError, Result};
use crate::types::LabelPair;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Label source backed by a SPARQL endpoint
pub struct SparqlLabelSource {
    client: Client,
    endpoint: String,
    credentials: Option<(String, SecretString)>,
    graphs: Vec<String>,
    predicate: String,
    language: Option<String>,
}

impl std::fmt::Debug for SparqlLabelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparqlLabelSource")
            .field("endpoint", &self.endpoint)
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .field("graphs", &self.graphs)
            .field("predicate", &self.predicate)
            .field("language", &self.language)
            .finish()
    }
}

/// SPARQL 1.1 JSON results document (only the parts we read)
#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl SparqlLabelSource {
    /// Create a source from ontology settings
    ///
    /// Validates the endpoint, every graph IRI and the predicate up front so
    /// that a bad configuration fails at startup rather than on first fetch.
    pub fn from_settings(settings: &OntologySettings) -> Result<Self> {
        let endpoint = settings
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                ContextifyerError::Config(config::ConfigError::Message(
                    "No SPARQL endpoint provided via ONTOLOGY_SPARQL_ENDPOINT".to_string(),
                ))
            })?;
        Url::parse(&endpoint).map_err(|e| {
            ContextifyerError::ValidationError(format!("Invalid SPARQL endpoint '{}': {}", endpoint, e))
        })?;

        let graphs = settings.graph_iris();
        for graph in &graphs {
            check_iri(graph)?;
        }
        check_iri(&settings.label_predicate)?;

        if let Some(lang) = &settings.language {
            if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(ContextifyerError::ValidationError(format!(
                    "Invalid language tag '{}'",
                    lang
                )));
            }
        }

        let credentials = match (&settings.username, &settings.password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user.clone(), SecretString::from(password.clone())))
            }
            _ => None,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            graphs,
            predicate: settings.label_predicate.clone(),
            language: settings.language.clone(),
        })
    }

    /// Query text for one graph (or the default graph when `None`)
    pub fn build_query(&self, graph: Option<&str>) -> String {
        let pattern = format!("?subject <{}> ?label .", self.predicate);
        let scoped = match graph {
            Some(iri) => format!("GRAPH <{}> {{ {} }}", iri, pattern),
            None => pattern,
        };
        let language_filter = match &self.language {
            Some(lang) => format!(
                "\n  FILTER(lang(?label) = \"\" || langMatches(lang(?label), \"{}\"))",
                lang
            ),
            None => String::new(),
        };

        format!(
            "SELECT ?subject ?label WHERE {{\n  {}\n  FILTER(isLiteral(?label)){}\n}}\nORDER BY ?subject ?label",
            scoped, language_filter
        )
    }

    async fn query_graph(&self, graph: Option<&str>) -> Result<Vec<LabelPair>> {
        let query = self.build_query(graph);
        debug!("SPARQL query against {}:\n{}", self.endpoint, query);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query.as_str())]);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password.expose_secret()));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContextifyerError::Ontology(format!(
                "SPARQL endpoint returned {}: {}",
                status,
                crate::text::preview(body.trim(), 200)
            )));
        }

        let body = response.text().await?;
        parse_results(&body)
    }
}

#[async_trait]
impl LabelSource for SparqlLabelSource {
    async fn fetch_labels(&self) -> Result<Vec<LabelPair>> {
        let mut pairs = Vec::new();

        if self.graphs.is_empty() {
            pairs.extend(self.query_graph(None).await?);
        } else {
            for graph in &self.graphs {
                let found = self.query_graph(Some(graph)).await?;
                debug!("{} labels in graph {}", found.len(), graph);
                pairs.extend(found);
            }
        }

        info!(
            "{} labels loaded from {} graph(s) at {}",
            pairs.len(),
            self.graphs.len().max(1),
            self.endpoint
        );
        Ok(pairs)
    }

    fn describe(&self) -> String {
        format!("SPARQL endpoint {}", self.endpoint)
    }
}

/// Turn a SPARQL JSON results document into label pairs
///
/// Rows missing either variable, rows whose label is not a literal and rows
/// whose subject is a blank node are skipped.
pub(crate) fn parse_results(body: &str) -> Result<Vec<LabelPair>> {
    let results: SparqlResults = serde_json::from_str(body).map_err(|e| {
        ContextifyerError::Ontology(format!("Malformed SPARQL results document: {}", e))
    })?;

    let mut skipped = 0usize;
    let pairs: Vec<LabelPair> = results
        .results
        .bindings
        .into_iter()
        .filter_map(|mut row| {
            let subject = row.remove("subject");
            let label = row.remove("label");
            match (subject, label) {
                (Some(s), Some(l)) if s.kind == "uri" && is_literal(&l.kind) => {
                    Some(LabelPair::new(l.value, s.value))
                }
                _ => {
                    skipped += 1;
                    None
                }
            }
        })
        .collect();

    if skipped > 0 {
        warn!("Skipped {} SPARQL rows without a usable subject/label", skipped);
    }
    Ok(pairs)
}

fn is_literal(kind: &str) -> bool {
    // "typed-literal" is what SPARQL 1.0-era endpoints still emit
    kind == "literal" || kind == "typed-literal"
}

/// An IRI we are willing to splice into `<...>` in a query
fn check_iri(iri: &str) -> Result<()> {
    let forbidden = |c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\');
    if iri.chars().any(forbidden) {
        return Err(ContextifyerError::ValidationError(format!(
            "IRI contains characters not allowed in a SPARQL IRI reference: '{}'",
            iri
        )));
    }
    Url::parse(iri)
        .map(|_| ())
        .map_err(|e| ContextifyerError::ValidationError(format!("Invalid IRI '{}': {}", iri, e)))
}
