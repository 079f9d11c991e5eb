//! CLI command handlers
//!
//! Each subcommand of the contextifyer binary is implemented in its own
//! module and exposes a `handle` function.

pub mod batch;
pub mod config;
pub mod helpers;
pub mod labels;
pub mod match_cmd;
pub mod serve;
pub mod transform;
