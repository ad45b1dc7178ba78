//! BDD test world for the homework bot

use std::sync::Arc;

use cucumber::World;
use homework_bot::config::Credentials;
use homework_bot::{BotError, HomeworkBot};
use serde_json::Value;

use crate::steps::polling_steps::{FakeReviewApi, RecordingNotifier};

#[derive(Debug, Default, World)]
pub struct HomeworkWorld {
    // Translation testing
    pub record: Option<Value>,
    pub translation: Option<homework_bot::Result<String>>,

    // Validation testing
    pub response: Option<Value>,
    pub validation: Option<homework_bot::Result<usize>>,

    // Polling and startup testing
    pub credentials: Option<Credentials>,
    pub api: Option<Arc<FakeReviewApi>>,
    pub notifier: Option<Arc<RecordingNotifier>>,
    pub from_date: Option<i64>,
    pub bot: Option<HomeworkBot>,
    pub build_error: Option<BotError>,
}
