//! Request classification by prompt markers.
//!
//! The simulated backend receives free-form prompts, so the agent being driven
//! is recognized by phrases its prompt template always contains rather than by
//! any schema.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Session key used when the body carries no `memory_id` or `session_id`.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Phrases found in ReAct executor prompts (tool responses, scratchpad, action keys).
pub const EXECUTOR_MARKERS: &[&str] = &[
    "TOOL RESPONSE:",
    "Observation:",
    "scratchpad",
    "\"action\"",
    "action_input",
];

/// Phrases found in plan-execute-reflect planner prompts.
pub const PLANNER_MARKERS: &[&str] = &[
    "AVAILABLE TOOLS",
    "step-by-step plan",
    "\"steps\"",
    "\"result\"",
];

/// Phrases found in the prompt sent once the planner runs out of steps.
pub const SUMMARY_MARKERS: &[&str] = &["MAX_STEP_SUMMARY", "maximum number of steps"];

static STEP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<step-\d+>").unwrap());

// Tolerates JSON that was itself embedded in a string (`\"memory_id\":\"s1\"`).
static SESSION_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:memory_id|session_id)\\?"\s*:\s*\\?"([^"\\]+)"#).unwrap());

/// Which simulated agent a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// ReAct executor turn: tool use, then a final answer.
    Executor,
    /// Plan-execute-reflect planner turn.
    Planner,
    /// Max-step summary request.
    Summary,
    /// Nothing recognizable.
    Fallback,
}

impl RequestKind {
    /// Stable lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Executor => "executor",
            RequestKind::Planner => "planner",
            RequestKind::Summary => "summary",
            RequestKind::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent marker detections for a request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerFlags {
    pub executor: bool,
    pub planner: bool,
    pub summary: bool,
}

impl MarkerFlags {
    /// Check `body` against every marker list.
    pub fn detect(body: &str) -> Self {
        Self {
            executor: contains_any(body, EXECUTOR_MARKERS),
            planner: contains_any(body, PLANNER_MARKERS),
            summary: contains_any(body, SUMMARY_MARKERS),
        }
    }

    /// Executor markers present and nothing suggesting a planner prompt.
    pub fn is_unambiguous_executor(&self) -> bool {
        self.executor && !self.planner
    }
}

type Rule = (fn(&MarkerFlags, usize) -> bool, RequestKind);

/// Classification rules, evaluated in order; the first match wins.
///
/// Planner prompts mention actions in passing, so an executor match only
/// counts when no planner marker is present. The max-step summary prompt
/// reuses the planner template (`"steps"`, `"result"`), so a summary marker
/// wins over planner markers as well as over a zero step count.
const RULES: &[Rule] = &[
    (is_executor, RequestKind::Executor),
    (is_summary, RequestKind::Summary),
    (is_planner, RequestKind::Planner),
];

fn is_executor(flags: &MarkerFlags, _completed_steps: usize) -> bool {
    flags.is_unambiguous_executor()
}

fn is_summary(flags: &MarkerFlags, _completed_steps: usize) -> bool {
    flags.summary
}

// A body with no completed steps is the opening planner call even when the
// prompt template carries none of the planner markers.
fn is_planner(flags: &MarkerFlags, completed_steps: usize) -> bool {
    flags.planner || completed_steps == 0
}

/// Resolve marker flags and step progress into a single request kind.
pub fn classify(flags: &MarkerFlags, completed_steps: usize) -> RequestKind {
    RULES
        .iter()
        .find(|(matches, _)| matches(flags, completed_steps))
        .map(|(_, kind)| *kind)
        .unwrap_or(RequestKind::Fallback)
}

/// Count opening `<step-N>` tags, one per completed plan step.
pub fn count_completed_steps(body: &str) -> usize {
    STEP_TAG.find_iter(body).count()
}

/// Pull the conversation key out of the body, or [`DEFAULT_SESSION_ID`].
pub fn extract_session_id(body: &str) -> String {
    SESSION_KEY
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string())
}

/// Everything derived from one request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRequest {
    pub kind: RequestKind,
    pub flags: MarkerFlags,
    pub completed_steps: usize,
    pub session_id: String,
}

impl ClassifiedRequest {
    /// Classify a raw request body. Never fails.
    pub fn from_body(body: &str) -> Self {
        let flags = MarkerFlags::detect(body);
        let completed_steps = count_completed_steps(body);
        Self {
            kind: classify(&flags, completed_steps),
            flags,
            completed_steps,
            session_id: extract_session_id(body),
        }
    }
}

fn contains_any(body: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| body.contains(marker))
}
