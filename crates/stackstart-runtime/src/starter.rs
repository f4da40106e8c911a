use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, error, info, info_span, warn};

use stackstart_core::{ApiError, Event, Notifier, StackApi, StackId};
use stackstart_settings::Settings;

use crate::outcome::{FailureReason, RunOutcome, StackReadiness};

/// Drives the stack sequence against a [`StackApi`].
pub struct StackStarter {
    api: Arc<dyn StackApi>,
    notifier: Option<Arc<dyn Notifier>>,
    stack_sequence: Vec<StackId>,
    poll_timeout: Duration,
    poll_interval: Duration,
}

impl StackStarter {
    pub fn new(
        settings: &Settings,
        api: Arc<dyn StackApi>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            api,
            notifier,
            stack_sequence: settings.stack_sequence.clone(),
            poll_timeout: settings.poll_timeout(),
            poll_interval: settings.poll_interval(),
        }
    }

    /// Send an event if a notifier is configured. Failures are logged and
    /// dropped; they never change the run.
    async fn emit(&self, event: Event) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if let Err(e) = notifier.notify(&event).await {
            warn!(event = %event.kind, error = %e, "failed to send webhook");
        }
    }

    /// Bring one stack up: stop it if running, start it, wait for it.
    ///
    /// API errors are not handled here; they end the run at [`Self::run`].
    pub async fn ensure_stack_running(
        &self,
        stack_id: StackId,
    ) -> Result<StackReadiness, ApiError> {
        let stack = self.api.fetch_stack(stack_id).await?;
        let Some(endpoint_id) = stack.endpoint_id else {
            error!(stack_id, "stack is missing EndpointId; cannot start");
            return Ok(StackReadiness::MissingEndpoint);
        };

        if stack.is_running() {
            info!(
                stack_id,
                endpoint_id,
                name = %stack.display_name(),
                "stack already running; stopping before restart"
            );
            self.api.stop_stack(stack_id, endpoint_id).await?;
        }

        info!(stack_id, endpoint_id, "starting stack");
        self.emit(Event::stack_starting(stack_id)).await;
        self.api.start_stack(stack_id, endpoint_id).await?;

        let running = self
            .api
            .wait_until_running(stack_id, self.poll_timeout, self.poll_interval)
            .await?;
        if running {
            info!(stack_id, "stack is running");
            Ok(StackReadiness::Running)
        } else {
            error!(
                stack_id,
                timeout_secs = self.poll_timeout.as_secs(),
                "timed out waiting for stack to become healthy"
            );
            Ok(StackReadiness::TimedOut)
        }
    }

    /// Process every stack in order, stopping at the first failure.
    pub async fn run(&self) -> RunOutcome {
        for &stack_id in &self.stack_sequence {
            info!(stack_id, "processing stack");
            let result = self
                .ensure_stack_running(stack_id)
                .instrument(info_span!("stack", stack_id))
                .await;

            let reason = match result {
                Ok(StackReadiness::Running) => continue,
                Ok(StackReadiness::MissingEndpoint) => FailureReason::MissingEndpoint,
                Ok(StackReadiness::TimedOut) => FailureReason::TimedOut,
                Err(e) => {
                    error!(stack_id, error = %e, kind = e.error_kind(), "stack API call failed");
                    FailureReason::Api(e)
                }
            };

            self.emit(Event::stack_failed(stack_id, reason.message()))
                .await;
            return RunOutcome::Failed { stack_id, reason };
        }

        self.emit(Event::sequence_complete(&self.stack_sequence))
            .await;
        info!(stacks = ?self.stack_sequence, "all stacks started successfully");
        RunOutcome::Completed {
            stacks: self.stack_sequence.clone(),
        }
    }
}
