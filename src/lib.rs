//! # SynapseX
//!
//! Document search over an in-memory corpus, with lexical relevance scoring,
//! highlighted excerpts, and per-query metrics.
//!
//! The scoring, store, search state and analytics live in
//! [`synapsex_core`]. This crate adds configuration, logging, corpus
//! loading, and the `synx` command-line frontends.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────┐
//! │ Corpus       │──▶│ InMemory     │──▶│ Lexical scorer │
//! │ demo/JSON/FS │   │ DocumentStore│   │ (core)         │
//! └──────────────┘   └──────────────┘   └───────┬────────┘
//!                                               │
//!                          ┌────────────────────┤
//!                          ▼                    ▼
//!                    ┌──────────┐         ┌──────────┐
//!                    │ synx     │         │ synx     │
//!                    │ search   │         │ shell    │
//!                    └──────────┘         └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! synx search "TimescaleDB performance"
//! synx search "vector similarity" --json
//! synx docs
//! synx shell
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`corpus`] | Demo, JSON-file and directory corpus loading; file uploads |
//! | [`search`] | `synx search`: timeout boundary and result rendering |
//! | [`documents`] | `synx docs` and `synx get` |
//! | [`stats`] | `synx stats`: per-type breakdown and query analytics |
//! | [`shell`] | `synx shell`: interactive session |

pub mod config;
pub mod corpus;
pub mod documents;
pub mod logging;
pub mod search;
pub mod shell;
pub mod stats;

pub use synapsex_core::models;
