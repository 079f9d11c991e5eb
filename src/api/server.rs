//! HTTP API server

use crate::contextifier::Contextifier;
use crate::error::{ContextifyerError, Result};
use crate::ontology::LabelSource;
use crate::text::preview;
use crate::types::LinkedSpan;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8000).into(),
        }
    }
}

/// API server state
#[derive(Clone)]
struct AppState {
    /// Linking service
    contextifier: Arc<Contextifier>,
    /// Where reloads fetch labels from
    source: Option<Arc<dyn LabelSource>>,
    /// Instance ID
    instance_id: String,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

/// Body of `POST /contextify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextifyRequest {
    pub markdown: String,
}

/// Response of `POST /contextify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextifyResponse {
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkedSpan>>,
}

#[derive(Debug, Default, Deserialize)]
struct ContextifyParams {
    #[serde(default)]
    details: bool,
}

impl ApiServer {
    /// Create new API server
    ///
    /// Without a `source`, `POST /labels/reload` answers 503.
    pub fn new(
        config: ApiServerConfig,
        contextifier: Arc<Contextifier>,
        source: Option<Arc<dyn LabelSource>>,
    ) -> Self {
        let instance_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
        Self {
            config,
            state: AppState {
                contextifier,
                source,
                instance_id,
            },
        }
    }

    /// Get instance ID
    pub fn instance_id(&self) -> &str {
        &self.state.instance_id
    }

    /// Build router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/contextify", post(contextify_handler))
            .route("/labels", get(list_labels_handler))
            .route("/labels/reload", post(reload_handler))
            .route("/health", get(health_handler))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!(
            "API server [{}] listening on http://{} ({} labels)",
            self.state.instance_id,
            self.config.addr,
            self.state.contextifier.label_count()
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Received shutdown signal, stopping API server gracefully...");
            })
            .await?;

        info!("API server shut down complete");
        Ok(())
    }
}

/// Contextify handler
///
/// Transformation is CPU-bound, so it runs on the blocking pool to keep
/// large documents from stalling other requests. Malformed bodies and query
/// strings are reported through the crate error so they get a JSON body.
async fn contextify_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ContextifyParams>, QueryRejection>,
    req: std::result::Result<Json<ContextifyRequest>, JsonRejection>,
) -> Result<Json<ContextifyResponse>> {
    let Query(params) = params.map_err(|e| ContextifyerError::ValidationError(e.body_text()))?;
    let Json(req) = req.map_err(|e| ContextifyerError::ValidationError(e.body_text()))?;
    debug!("Contextify request: {}", preview(&req.markdown, 80));

    let contextifier = state.contextifier.clone();
    let result = tokio::task::spawn_blocking(move || contextifier.transform_detailed(&req.markdown))
        .await
        .map_err(|e| ContextifyerError::Other(format!("Transform task failed: {}", e)))?;

    debug!("Contextify produced {} links", result.links.len());
    Ok(Json(ContextifyResponse {
        markdown: result.text,
        links: params.details.then_some(result.links),
    }))
}

/// One entry of `GET /labels`
#[derive(Debug, Serialize, Deserialize)]
struct LabelEntry {
    label: String,
    identifier: String,
}

async fn list_labels_handler(State(state): State<AppState>) -> Json<Vec<LabelEntry>> {
    let index = state.contextifier.snapshot();
    Json(
        index
            .iter()
            .map(|(label, identifier)| LabelEntry {
                label: label.to_string(),
                identifier: identifier.to_string(),
            })
            .collect(),
    )
}

/// Reload response
#[derive(Debug, Serialize, Deserialize)]
struct ReloadResponse {
    labels: usize,
    loaded_at: DateTime<Utc>,
}

async fn reload_handler(State(state): State<AppState>) -> Result<Json<ReloadResponse>> {
    let source = state.source.as_ref().ok_or_else(|| {
        ContextifyerError::Config(config::ConfigError::Message(
            "No label source configured for reload".to_string(),
        ))
    })?;

    let labels = state.contextifier.reload_from(source.as_ref()).await?;
    Ok(Json(ReloadResponse {
        labels,
        loaded_at: state.contextifier.snapshot().built_at(),
    }))
}

/// Health check handler
#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    instance_id: String,
    labels: usize,
    loaded_at: DateTime<Utc>,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let index = state.contextifier.snapshot();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instance_id: state.instance_id.clone(),
        labels: index.len(),
        loaded_at: index.built_at(),
    })
}
