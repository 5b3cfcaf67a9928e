//! Observability: structured logging via `tracing`.
//!
//! ```rust,no_run
//! # use socialhub_server::{config::Environment, observability};
//! // In main(), before any logging:
//! observability::init_tracing(Environment::Development)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod tracing;

pub use self::tracing::{default_filter, init_tracing};
