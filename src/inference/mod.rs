//! Wire types of the inference backend being simulated.
//!
//! Callers of the real backend receive `{"response": "<string>"}` and parse the
//! nested string according to the agent they are driving. The types here model
//! both the envelope and the payloads that get encoded into it.

mod types;

pub use types::*;
