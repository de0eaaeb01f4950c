//! HTTP surface of the mock inference backend.
//!
//! This module provides:
//! - Shared application state (session tracker and synthesizer)
//! - Request handlers for inference, CORS preflight and health
//! - Router construction and the serve loop

mod handlers;
mod http;

pub use handlers::*;
pub use http::*;

use std::sync::Arc;

use crate::config::Config;
use crate::simulation::{SessionTracker, Synthesizer};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Executor session counters, shared with the synthesizer.
    pub sessions: Arc<SessionTracker>,
    /// Canned response selection.
    pub synthesizer: Synthesizer,
}

impl AppState {
    /// Create new application state with simulated latency enabled
    pub fn new(config: Config) -> Self {
        let sessions = Arc::new(SessionTracker::new());
        let synthesizer = Synthesizer::new(Arc::clone(&sessions));
        Self {
            config,
            sessions,
            synthesizer,
        }
    }

    /// Create application state whose responses are sent without artificial delay
    pub fn without_delay(config: Config) -> Self {
        let sessions = Arc::new(SessionTracker::new());
        let synthesizer = Synthesizer::without_delay(Arc::clone(&sessions));
        Self {
            config,
            sessions,
            synthesizer,
        }
    }
}

/// Shared application state handle
pub type SharedState = Arc<AppState>;
