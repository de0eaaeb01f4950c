//! Canned text returned by the simulated agents
//!
//! Every string the server ever sends back lives here so the tests driving the
//! investigation UI can match on stable content.

/// Thought emitted with the executor's tool-use turn.
pub const EXECUTOR_TOOL_THOUGHT: &str =
    "I need to look at the HTTP error logs to find out when the 5xx responses started and which services are affected.";

/// Tool the executor asks to run on its first turn.
pub const EXECUTOR_TOOL_NAME: &str = "PPLTool";

/// Query passed to [`EXECUTOR_TOOL_NAME`].
pub const EXECUTOR_TOOL_INPUT: &str = "source=logs-* | where status >= 500 | stats count() by span(@timestamp, 5m), service";

/// Thought emitted once the executor has seen the tool response.
pub const EXECUTOR_FINAL_THOUGHT: &str = "Now I know the final answer";

/// Final answer emitted on the executor's second turn.
pub const EXECUTOR_FINAL_ANSWER: &str = "The HTTP 5xx error rate rose from under 1% to 14% starting at 10:05 UTC. \
The increase is concentrated in the checkout service, which began timing out against the payment gateway. \
Error volume tracks the latency spike on the payment gateway dependency, indicating the gateway is the most likely root cause.";

/// Final answer returned for requests no simulated agent recognizes.
pub const FALLBACK_FINAL_ANSWER: &str =
    "The request was analyzed and no further action is required.";

/// Thought paired with [`FALLBACK_FINAL_ANSWER`].
pub const FALLBACK_THOUGHT: &str = "I can answer this directly";

/// Plain-text summary returned when the planner exhausts its step budget.
pub const INVESTIGATION_SUMMARY: &str = "## Investigation Summary\n\n\
The investigation reached the maximum number of steps. Elevated HTTP 5xx errors were observed \
in the checkout service starting at 10:05 UTC, correlated with increased latency on the payment \
gateway. The most likely cause is degraded payment gateway performance; a recent deployment of \
the checkout service is a less likely contributor.";

/// Initial plan produced when no step has completed yet.
pub const INITIAL_PLAN_STEPS: [&str; 3] = [
    "Query the HTTP access logs to measure the 5xx error rate over the investigation window",
    "Break down the errors by service and endpoint to find where they are concentrated",
    "Correlate the error spike with latency and deployment events on upstream dependencies",
];

/// Remaining plan after the first step has completed.
pub const FOLLOW_UP_PLAN_STEPS: [&str; 2] = [
    "Break down the errors by service and endpoint to find where they are concentrated",
    "Correlate the error spike with latency and deployment events on upstream dependencies",
];

/// Remaining plan after the second step has completed.
pub const FINAL_PLAN_STEPS: [&str; 1] =
    ["Correlate the error spike with latency and deployment events on upstream dependencies"];

/// Name carried by the investigation result fixture.
pub const INVESTIGATION_NAME: &str = "HTTP Error Rate Investigation";
