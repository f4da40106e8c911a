use async_trait::async_trait;

use crate::errors::WebhookError;
use crate::events::Event;

/// Delivers run events to an external listener.
///
/// Delivery is best-effort: callers log a returned error and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &Event) -> Result<(), WebhookError>;
}
