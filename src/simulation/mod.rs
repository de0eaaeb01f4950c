//! Simulated planner and executor agents.
//!
//! - `classifier` decides which agent a prompt is addressed to
//! - `session` tracks executor iterations per conversation
//! - `synthesizer` picks the canned payload and latency

mod classifier;
mod session;
mod synthesizer;

pub use classifier::*;
pub use session::*;
pub use synthesizer::*;
