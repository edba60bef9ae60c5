//! # warden-types
//!
//! Core type definitions for the warden request-mediation pipeline.
//!
//! This crate is the foundation of the dependency graph -- every other
//! warden crate depends on it. It contains:
//!
//! - **[`task`]** -- [`TaskCategory`], the closed set of request categories
//! - **[`policy`]** -- [`PolicyDecision`] and [`PolicyVerdict`]
//! - **[`audit`]** -- [`AuditRecord`] (one audit-trail line) and
//!   [`OrchestrationResult`] (the outward response)
//! - **[`config`]** -- Configuration schema and file discovery
//! - **[`secret`]** -- [`SecretString`] for API keys
//! - **[`error`]** -- [`WardenError`]

pub mod audit;
pub mod config;
pub mod error;
pub mod policy;
pub mod secret;
pub mod task;

pub use audit::{AuditRecord, ExecutionResult, OrchestrationResult};
pub use config::Config;
pub use error::{Result, WardenError};
pub use policy::{PolicyDecision, PolicyVerdict};
pub use secret::SecretString;
pub use task::TaskCategory;
