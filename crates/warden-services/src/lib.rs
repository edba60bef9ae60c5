//! # warden-services
//!
//! HTTP transport for the warden pipeline.
//!
//! - **[`api`]** -- axum router: `POST /orchestrate` and `GET /health`
//! - **[`server`]** -- bind, serve, and shut down on Ctrl+C / SIGTERM

pub mod api;
pub mod server;
