use stackstart_core::{ApiError, StackId};

/// Message sent with `stack_failed` when there is no API error to report.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to start or verify stack";

/// Result of bringing one stack up, short of an API error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackReadiness {
    Running,
    /// The stack has no endpoint id, so it cannot be addressed.
    MissingEndpoint,
    /// The poll deadline passed without a running observation.
    TimedOut,
}

impl StackReadiness {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

#[derive(Clone, Debug)]
pub enum FailureReason {
    MissingEndpoint,
    TimedOut,
    Api(ApiError),
}

impl FailureReason {
    /// Text for the `stack_failed` payload.
    pub fn message(&self) -> String {
        match self {
            Self::MissingEndpoint | Self::TimedOut => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Api(e) => format!("{GENERIC_FAILURE_MESSAGE}: {e}"),
        }
    }
}

/// How a whole run ended.
#[derive(Clone, Debug)]
pub enum RunOutcome {
    Completed { stacks: Vec<StackId> },
    /// Stopped at `stack_id`; later stacks were not attempted.
    Failed {
        stack_id: StackId,
        reason: FailureReason,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
