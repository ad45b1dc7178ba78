//! Engine: the poll, translate and notify loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::homework::parse_status;
use crate::notifier::{send_message, Notifier};
use crate::practicum::PracticumClient;
use crate::response::{check_response, current_date};
use crate::state::{PollState, FAILURE_WARN_THRESHOLD};
use crate::BotError;

/// Prefix of the chat message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

pub fn failure_message(error: &BotError) -> String {
    format!("{}: {}", FAILURE_PREFIX, error)
}

/// Polls the review API and relays status changes to the notifier
#[derive(Debug)]
pub struct Engine {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    state: PollState,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
        from_date: i64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            retry_period,
            state: PollState::new(from_date),
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token is triggered
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one cycle. Errors are reported to the chat, never returned.
    pub async fn run_cycle(&mut self) {
        match self.poll().await {
            Ok(message) => {
                self.state.record_success();
                if let Some(message) = message {
                    self.deliver(message).await;
                }
            }
            Err(e) => {
                tracing::error!("Polling cycle failed at {}: {}", e.origin(), e);
                let failures = self.state.record_failure();
                if failures == FAILURE_WARN_THRESHOLD {
                    tracing::warn!("{} consecutive polling cycles have failed", failures);
                }
                self.deliver(failure_message(&e)).await;
            }
        }
    }

    // Only the newest record is inspected; older ones in the same batch are
    // never reported.
    async fn poll(&mut self) -> crate::Result<Option<String>> {
        tracing::debug!("Polling with from_date={}", self.state.watermark);

        let response = self.client.get_api_answer(self.state.watermark).await?;
        let homeworks = check_response(&response)?;
        let message = homeworks.first().map(parse_status).transpose()?;

        self.state.advance_watermark(current_date(&response));
        Ok(message)
    }

    async fn deliver(&mut self, message: String) {
        if self.state.is_duplicate(&message) {
            tracing::debug!("Skipping repeated message: {}", message);
            return;
        }
        send_message(self.notifier.as_ref(), &message).await;
        self.state.remember(message);
    }
}
