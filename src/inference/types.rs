use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SimulationError, SimulationResult};
use crate::responses::INVESTIGATION_NAME;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

/// Top-level envelope returned for every successful request.
///
/// `response` holds JSON text for planner, executor and fallback payloads but
/// plain prose for the max-step summary. Callers of the real backend depend on
/// that difference, so it is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub response: String,
}

/// Body returned with HTTP 400 when a payload cannot be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Plan emitted by the simulated plan-execute-reflect agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerOutput {
    pub steps: Vec<String>,
    pub result: String,
}

/// Tool invocation emitted by the simulated ReAct executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorAction {
    pub thought: String,
    pub action: String,
    pub action_input: String,
}

/// Terminal answer emitted by the simulated ReAct executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAnswer {
    pub thought: String,
    pub final_answer: String,
}

/// A single observation backing the investigation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub description: String,
    /// 0-100
    pub importance: u8,
    pub evidence: String,
}

/// A candidate explanation ranked by likelihood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0-100
    pub likelihood: u8,
    pub supporting_finding_ids: Vec<String>,
}

/// Final result of a completed investigation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationResult {
    pub findings: Vec<Finding>,
    pub hypotheses: Vec<Hypothesis>,
    pub topologies: Vec<Value>,
    pub investigation_name: String,
}

impl InferenceResponse {
    /// Wrap already-formatted text without further encoding.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Encode `payload` as JSON and wrap the resulting string.
    pub fn encoded<T: Serialize>(payload_kind: &'static str, payload: &T) -> SimulationResult<Self> {
        serde_json::to_string(payload)
            .map(Self::text)
            .map_err(|e| SimulationError::encode(payload_kind, e))
    }
}

impl ErrorResponse {
    /// The generic error body sent on synthesis failure.
    pub fn invalid_request() -> Self {
        Self {
            error: "Invalid request".to_string(),
        }
    }
}

impl PlannerOutput {
    /// A plan with remaining steps and no result yet.
    pub fn steps<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
            result: String::new(),
        }
    }

    /// A finished plan carrying the encoded investigation result.
    pub fn completed(result: impl Into<String>) -> Self {
        Self {
            steps: Vec::new(),
            result: result.into(),
        }
    }
}

impl Finding {
    fn new(id: &str, description: &str, importance: u8, evidence: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            importance,
            evidence: evidence.to_string(),
        }
    }
}

impl Hypothesis {
    fn new(id: &str, title: &str, description: &str, likelihood: u8, supporting: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            likelihood,
            supporting_finding_ids: supporting.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InvestigationResult {
    /// The fixed investigation outcome the planner reports once every step is done.
    pub fn fixture() -> Self {
        Self {
            findings: vec![
                Finding::new(
                    "F1",
                    "HTTP 5xx error rate increased from 0.8% to 14.2% at 10:05 UTC",
                    95,
                    "Access logs show 4,812 responses with status >= 500 between 10:05 and 10:35 UTC, against a baseline of roughly 270 per 30 minutes.",
                ),
                Finding::new(
                    "F2",
                    "Errors are concentrated in the checkout service",
                    85,
                    "91% of the 5xx responses were served by checkout-service on the /api/checkout/submit endpoint.",
                ),
                Finding::new(
                    "F3",
                    "Payment gateway latency spiked at the same time",
                    70,
                    "p99 latency of calls from checkout-service to payment-gateway rose from 320ms to 9.8s, exceeding the 5s client timeout.",
                ),
            ],
            hypotheses: vec![
                Hypothesis::new(
                    "H1",
                    "Payment gateway degradation",
                    "Slow responses from the payment gateway cause checkout requests to time out and return 5xx errors.",
                    80,
                    &["F1", "F2", "F3"],
                ),
                Hypothesis::new(
                    "H2",
                    "Faulty checkout service deployment",
                    "A checkout-service release shortly before the spike introduced a regression in request handling.",
                    20,
                    &["F1", "F2"],
                ),
            ],
            topologies: Vec::new(),
            investigation_name: INVESTIGATION_NAME.to_string(),
        }
    }
}
