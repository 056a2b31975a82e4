//! Relay Worker
//!
//! Orchestrates one invocation per notification: parse, fetch, optionally
//! validate, publish, then notify the submitter and record the outcome.

pub mod components;
pub mod pipeline;

pub use components::PipelineComponents;
pub use pipeline::{InvocationError, Pipeline};
