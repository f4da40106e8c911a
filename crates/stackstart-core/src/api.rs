//! The orchestration API seam.
//!
//! `StackApi` covers exactly the operations the starter needs. The
//! production implementation lives in `stackstart-portainer`; tests plug in
//! scripted doubles.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::ApiError;
use crate::stack::{Stack, StackId};

#[async_trait]
pub trait StackApi: Send + Sync {
    /// Fetch the current state of a stack.
    async fn fetch_stack(&self, id: StackId) -> Result<Stack, ApiError>;

    /// Ask the API to start a stack on the given endpoint.
    async fn start_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError>;

    /// Ask the API to stop a stack on the given endpoint.
    async fn stop_stack(&self, id: StackId, endpoint_id: i64) -> Result<(), ApiError>;

    /// Poll until the stack reports running or `timeout` elapses.
    ///
    /// The first poll always happens, so a zero timeout performs one fetch
    /// and never sleeps. Returns `Ok(true)` on the first running
    /// observation and `Ok(false)` once the deadline passes. Fetch errors
    /// end the wait immediately.
    async fn wait_until_running(
        &self,
        id: StackId,
        timeout: Duration,
        interval: Duration,
    ) -> Result<bool, ApiError> {
        // A timeout too large to represent means no deadline.
        let deadline = Instant::now().checked_add(timeout);
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);
        let mut polls: u32 = 0;
        loop {
            polls = polls.saturating_add(1);
            let stack = self.fetch_stack(id).await?;
            if stack.is_running() {
                debug!(stack_id = id, polls, "stack reported running");
                return Ok(true);
            }
            debug!(stack_id = id, polls, status = ?stack.status, "stack not running yet");

            if expired() {
                break;
            }
            tokio::time::sleep(interval).await;
            if expired() {
                break;
            }
        }
        debug!(stack_id = id, polls, "gave up waiting for stack");
        Ok(false)
    }
}
