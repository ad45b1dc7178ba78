//! BDD step definitions for the polling loop

use std::sync::{Arc, Mutex};

use cucumber::{given, then, when};

use homework_bot::config::{Config, Credentials};
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::{BotError, HomeworkBotBuilder};

use crate::world::HomeworkWorld;

// --- Test doubles ---

/// Review API stand-in that always gives the same answer and records
/// the `from_date` of every request
#[derive(Debug)]
pub struct FakeReviewApi {
    status: u16,
    body: String,
    pub from_dates: Mutex<Vec<String>>,
}

impl FakeReviewApi {
    pub fn answering(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            from_dates: Mutex::new(Vec::new()),
        }
    }

    pub fn from_dates(&self) -> Vec<String> {
        self.from_dates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeReviewApi {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let from_date = query
            .iter()
            .find(|(key, _)| *key == "from_date")
            .map(|(_, value)| value.to_string())
            .unwrap_or_default();
        self.from_dates.lock().unwrap().push(from_date);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Err(BotError::Transport(
            "scenarios deliver through RecordingNotifier".to_string(),
        ))
    }
}

/// Notifier that records every delivery attempt
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    unreachable: bool,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> homework_bot::Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.unreachable {
            Err(BotError::Delivery("chat unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn valid_credentials() -> Credentials {
    Credentials {
        practicum_token: "practicum-token".to_string(),
        telegram_token: "telegram-token".to_string(),
        telegram_chat_id: "42".to_string(),
    }
}

/// Build the bot from the world's doubles, recording a startup failure
pub fn build_bot(world: &mut HomeworkWorld) {
    let config = Config {
        credentials: world.credentials.clone().unwrap_or_else(valid_credentials),
        ..Config::default()
    };
    let api = Arc::clone(world.api.get_or_insert_with(|| {
        Arc::new(FakeReviewApi::answering(200, r#"{"homeworks":[]}"#))
    }));
    let notifier = Arc::clone(
        world
            .notifier
            .get_or_insert_with(|| Arc::new(RecordingNotifier::default())),
    );

    let mut builder = HomeworkBotBuilder::new(config)
        .with_http_client(api)
        .with_notifier(notifier);
    if let Some(from_date) = world.from_date {
        builder = builder.with_from_date(from_date);
    }

    match builder.build() {
        Ok(bot) => world.bot = Some(bot),
        Err(e) => world.build_error = Some(e),
    }
}

// --- Steps ---

#[given(expr = "the API answers {string}")]
fn api_answers(world: &mut HomeworkWorld, body: String) {
    world.api = Some(Arc::new(FakeReviewApi::answering(200, &body)));
}

#[given(expr = "the API responds with status {int}")]
fn api_status(world: &mut HomeworkWorld, status: u16) {
    world.api = Some(Arc::new(FakeReviewApi::answering(status, "")));
}

#[given("the chat is unreachable")]
fn chat_unreachable(world: &mut HomeworkWorld) {
    world.notifier = Some(Arc::new(RecordingNotifier {
        unreachable: true,
        ..Default::default()
    }));
}

#[given(expr = "the bot starts polling from {int}")]
fn starts_from(world: &mut HomeworkWorld, from_date: i64) {
    world.from_date = Some(from_date);
}

#[when(expr = "{int} polling cycle(s) run(s)")]
async fn cycles_run(world: &mut HomeworkWorld, cycles: u32) {
    if world.bot.is_none() {
        build_bot(world);
    }
    let bot = world.bot.as_mut().expect("bot failed to start");
    for _ in 0..cycles {
        bot.run_once().await;
    }
}

#[then(expr = "{int} message(s) should have been delivered")]
fn messages_delivered(world: &mut HomeworkWorld, count: usize) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    assert_eq!(notifier.messages().len(), count, "{:?}", notifier.messages());
}

#[then(expr = "the last message should be {string}")]
fn last_message_is(world: &mut HomeworkWorld, expected: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    assert_eq!(notifier.messages().last(), Some(&expected));
}

#[then(expr = "the last message should contain {string}")]
fn last_message_contains(world: &mut HomeworkWorld, fragment: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    let messages = notifier.messages();
    let last = messages.last().expect("no message delivered");
    assert!(last.contains(&fragment), "{last}");
}

#[then(expr = "the watermark should be {int}")]
fn watermark_is(world: &mut HomeworkWorld, expected: i64) {
    let bot = world.bot.as_ref().expect("bot not started");
    assert_eq!(bot.engine().state().watermark, expected);
}

#[then(expr = "the requests should have used from_date {string}")]
fn requested_from_dates(world: &mut HomeworkWorld, expected: String) {
    let api = world.api.as_ref().expect("api not set");
    let expected: Vec<String> = expected.split(',').map(|s| s.trim().to_string()).collect();
    assert_eq!(api.from_dates(), expected);
}
