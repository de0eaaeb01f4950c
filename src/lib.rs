//! # Mock Inference Server
//!
//! A stand-in for the language-model backend behind an "investigation"
//! feature, used by end-to-end browser tests. It answers every `POST` with a
//! canned payload shaped like the real backend's `{"response": "..."}`
//! envelope.
//!
//! ## Simulated agents
//!
//! - **Planner** (plan-execute-reflect): returns a shrinking list of plan steps
//!   as `<step-N>` tags accumulate in the prompt, then the final
//!   investigation result
//! - **Executor** (ReAct): alternates per session between a tool call and a
//!   final answer
//! - **Summary**: plain-text summary once the planner runs out of steps
//!
//! ## Architecture
//!
//! ```text
//! HTTP POST → Classifier → Synthesizer ─┬─→ canned payload (after delay)
//!                               ↑       │
//!                        SessionTracker ┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mock_inference_server::{AppState, Config};
//! use mock_inference_server::server::{bind, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let listener = bind(config.server.socket_addr()).await?;
//!     let state = Arc::new(AppState::new(config));
//!     serve(listener, state).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management for the server.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Inference backend envelope, payload types and the investigation fixture.
pub mod inference;
/// Canned text returned by the simulated agents.
pub mod responses;
/// HTTP server implementation and request handling.
pub mod server;
/// Request classification, session tracking and response synthesis.
pub mod simulation;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use server::{AppState, SharedState};
