//! 4-stage request-mediation pipeline.
//!
//! Stages: Classifier -> Policy -> Dispatcher -> Audit, sequenced by the
//! Orchestrator.

pub mod traits;
pub mod classifier;
pub mod policy;
pub mod dispatcher;
pub mod audit;
pub mod orchestrator;
