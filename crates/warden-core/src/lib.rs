//! # warden-core
//!
//! The warden decision pipeline.
//!
//! A request flows through four stages in a fixed order:
//! classification, policy evaluation, (conditional) dispatch to the
//! execution backend, and audit recording. The [`pipeline::orchestrator`]
//! sequences them; [`bootstrap`] wires a live orchestrator from a
//! [`Config`](warden_types::Config).

pub mod bootstrap;
pub mod pipeline;
