//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Trait for delivering a text message to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver a message
    async fn notify(&self, message: &str) -> crate::Result<()>;
}

/// Deliver `message`, logging instead of propagating any failure.
///
/// Returns whether the delivery succeeded, for callers that want to log it.
pub async fn send_message(notifier: &dyn Notifier, message: &str) -> bool {
    match notifier.notify(message).await {
        Ok(()) => {
            tracing::debug!("Message delivered via '{}'", notifier.type_name());
            true
        }
        Err(e) => {
            tracing::error!(
                "Failed to deliver message via '{}': {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}
