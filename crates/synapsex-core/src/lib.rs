//! # SynapseX Core
//!
//! Shared logic for SynapseX: document models, lexical relevance scoring,
//! the document store abstraction, caller-owned search state, and session
//! analytics.
//!
//! This crate contains no tokio, filesystem I/O, or configuration loading.
//! Those live in the `synapsex` application crate.

pub mod analytics;
pub mod models;
pub mod search;
pub mod state;
pub mod store;
