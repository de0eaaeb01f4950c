//! Canned response selection.
//!
//! Picks the payload and artificial latency for a classified request. The only
//! state consulted is the executor session counter; planner responses depend
//! on nothing but the number of completed steps in the body.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::classifier::{ClassifiedRequest, RequestKind};
use super::session::{ExecutorTurn, SessionTracker};
use crate::error::{SimulationError, SimulationResult};
use crate::inference::{
    ExecutorAction, FinalAnswer, InferenceResponse, InvestigationResult, PlannerOutput,
};
use crate::responses::{
    EXECUTOR_FINAL_ANSWER, EXECUTOR_FINAL_THOUGHT, EXECUTOR_TOOL_INPUT, EXECUTOR_TOOL_NAME,
    EXECUTOR_TOOL_THOUGHT, FALLBACK_FINAL_ANSWER, FALLBACK_THOUGHT, FINAL_PLAN_STEPS,
    FOLLOW_UP_PLAN_STEPS, INITIAL_PLAN_STEPS, INVESTIGATION_SUMMARY,
};

/// Latency of executor turns.
pub const EXECUTOR_DELAY: Duration = Duration::from_millis(300);
/// Latency of the max-step summary.
pub const SUMMARY_DELAY: Duration = Duration::from_millis(400);
/// Latency of the opening plan.
pub const INITIAL_PLAN_DELAY: Duration = Duration::from_millis(500);
/// Latency of intermediate replans.
pub const REPLAN_DELAY: Duration = Duration::from_millis(400);
/// Latency of the completed plan carrying the investigation result.
pub const RESULT_DELAY: Duration = Duration::from_millis(600);
/// Latency of unrecognized requests.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(300);

/// A response ready to send once `delay` has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    pub payload: InferenceResponse,
    pub delay: Duration,
    pub path: RequestKind,
    /// Executor iteration that produced the payload.
    pub iteration: Option<u32>,
}

/// Turns classified requests into canned inference responses.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    sessions: Arc<SessionTracker>,
    delays_enabled: bool,
}

impl Synthesizer {
    /// Create a synthesizer that simulates backend latency.
    pub fn new(sessions: Arc<SessionTracker>) -> Self {
        Self {
            sessions,
            delays_enabled: true,
        }
    }

    /// Create a synthesizer that reports zero delay for every response.
    pub fn without_delay(sessions: Arc<SessionTracker>) -> Self {
        Self {
            sessions,
            delays_enabled: false,
        }
    }

    /// Session tracker backing the executor simulation.
    pub fn sessions(&self) -> &Arc<SessionTracker> {
        &self.sessions
    }

    /// Choose the payload and delay for `request`.
    pub async fn synthesize(&self, request: &ClassifiedRequest) -> SimulationResult<Synthesized> {
        info!(
            executor_marker = request.flags.executor,
            planner_marker = request.flags.planner,
            summary_marker = request.flags.summary,
            completed_steps = request.completed_steps,
            session_id = %request.session_id,
            path = %request.kind,
            "Classified inference request"
        );

        let (payload, delay, iteration) = match request.kind {
            RequestKind::Executor => {
                let turn = self.sessions.advance(&request.session_id).await;
                info!(
                    session_id = %request.session_id,
                    iteration = turn.iteration(),
                    "Executor turn"
                );
                (executor_payload(turn)?, EXECUTOR_DELAY, Some(turn.iteration()))
            }
            RequestKind::Summary => (
                InferenceResponse::text(INVESTIGATION_SUMMARY),
                SUMMARY_DELAY,
                None,
            ),
            RequestKind::Planner => {
                let (payload, delay) = planner_payload(request.completed_steps)?;
                (payload, delay, None)
            }
            RequestKind::Fallback => (fallback_payload()?, FALLBACK_DELAY, None),
        };

        Ok(Synthesized {
            payload,
            delay: if self.delays_enabled {
                delay
            } else {
                Duration::ZERO
            },
            path: request.kind,
            iteration,
        })
    }
}

fn executor_payload(turn: ExecutorTurn) -> SimulationResult<InferenceResponse> {
    match turn {
        ExecutorTurn::UseTool { .. } => InferenceResponse::encoded(
            "executor tool-use",
            &ExecutorAction {
                thought: EXECUTOR_TOOL_THOUGHT.to_string(),
                action: EXECUTOR_TOOL_NAME.to_string(),
                action_input: EXECUTOR_TOOL_INPUT.to_string(),
            },
        ),
        ExecutorTurn::Answer { .. } => InferenceResponse::encoded(
            "executor final-answer",
            &FinalAnswer {
                thought: EXECUTOR_FINAL_THOUGHT.to_string(),
                final_answer: EXECUTOR_FINAL_ANSWER.to_string(),
            },
        ),
    }
}

fn planner_payload(completed_steps: usize) -> SimulationResult<(InferenceResponse, Duration)> {
    let (plan, delay) = match completed_steps {
        0 => (PlannerOutput::steps(INITIAL_PLAN_STEPS), INITIAL_PLAN_DELAY),
        1 => (PlannerOutput::steps(FOLLOW_UP_PLAN_STEPS), REPLAN_DELAY),
        2 => (PlannerOutput::steps(FINAL_PLAN_STEPS), REPLAN_DELAY),
        _ => {
            let result = serde_json::to_string(&InvestigationResult::fixture())
                .map_err(|e| SimulationError::encode("investigation result", e))?;
            (PlannerOutput::completed(result), RESULT_DELAY)
        }
    };

    Ok((InferenceResponse::encoded("planner", &plan)?, delay))
}

fn fallback_payload() -> SimulationResult<InferenceResponse> {
    InferenceResponse::encoded(
        "fallback",
        &FinalAnswer {
            thought: FALLBACK_THOUGHT.to_string(),
            final_answer: FALLBACK_FINAL_ANSWER.to_string(),
        },
    )
}
