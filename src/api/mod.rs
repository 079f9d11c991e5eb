//! HTTP API for the contextify service
//!
//! Provides:
//! - `POST /contextify` to link ontology terms in a markdown payload
//! - `GET /labels` and `POST /labels/reload` for the live label index
//! - `GET /health` for liveness checks

pub mod errors;
pub mod server;

pub use server::{ApiServer, ApiServerConfig, ContextifyRequest, ContextifyResponse};
