//! Homework bot - review status relay
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and forwards them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod homework;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod state;
pub mod telegram;

pub use config::{check_tokens, load_config, Config};
pub use error::{BotError, ErrorKind, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Assembles a [`HomeworkBot`] from configuration, with optional overrides
/// for the HTTP client, notifier and starting watermark.
pub struct HomeworkBotBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    from_date: Option<i64>,
    cancel: Option<CancellationToken>,
}

impl HomeworkBotBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            notifier: None,
            from_date: None,
            cancel: None,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_from_date(mut self, from_date: i64) -> Self {
        self.from_date = Some(from_date);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Check credentials and wire up the components.
    ///
    /// Fails with [`BotError::Config`] before anything touches the network
    /// when a credential is missing.
    pub fn build(self) -> Result<HomeworkBot> {
        let Self {
            config,
            http,
            notifier,
            from_date,
            cancel,
        } = self;

        if !check_tokens(&config.credentials) {
            return Err(BotError::Config(format!(
                "Missing required environment variables: {}",
                config.credentials.missing().join(", ")
            )));
        }

        let http: Arc<dyn HttpClient> = match http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(
                config.practicum.request_timeout,
            )?),
        };

        let credentials = &config.credentials;
        let client = PracticumClient::new(
            &config.practicum,
            &credentials.practicum_token,
            Arc::clone(&http),
        );
        let notifier = notifier.unwrap_or_else(|| {
            Arc::new(TelegramNotifier::new(
                &config.telegram,
                &credentials.telegram_token,
                &credentials.telegram_chat_id,
                Arc::clone(&http),
            )) as Arc<dyn Notifier>
        });

        let from_date = from_date.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let cancel = cancel.unwrap_or_else(CancellationToken::new);

        tracing::debug!(
            "Polling every {:?} starting from {}",
            config.retry_period,
            from_date
        );

        let engine = Engine::new(
            client,
            notifier,
            config.retry_period,
            from_date,
            cancel.clone(),
        );

        Ok(HomeworkBot { engine, cancel })
    }
}

/// A fully wired bot, ready to poll
#[derive(Debug)]
pub struct HomeworkBot {
    engine: Engine,
    cancel: CancellationToken,
}

impl HomeworkBot {
    /// Token that stops the polling loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run one polling cycle without sleeping
    pub async fn run_once(&mut self) {
        self.engine.run_cycle().await;
    }

    /// Poll until Ctrl-C or until the cancellation token is triggered
    pub async fn start(mut self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        });

        tracing::info!("Homework bot started");
        self.engine.run().await;
        tracing::info!("Homework bot stopped");

        Ok(())
    }
}
