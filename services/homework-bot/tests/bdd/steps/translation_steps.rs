//! BDD step definitions for status translation

use cucumber::{given, then, when};
use serde_json::json;

use homework_bot::homework::parse_status;

use crate::world::HomeworkWorld;

#[given(expr = "a homework record named {string} with status {string}")]
fn record_with_status(world: &mut HomeworkWorld, name: String, status: String) {
    world.record = Some(json!({ "homework_name": name, "status": status }));
}

#[given(expr = "a homework record named {string} with numeric status {int}")]
fn record_with_numeric_status(world: &mut HomeworkWorld, name: String, status: i64) {
    world.record = Some(json!({ "homework_name": name, "status": status }));
}

#[given(expr = "a homework record without a name and with status {string}")]
fn record_without_name(world: &mut HomeworkWorld, status: String) {
    world.record = Some(json!({ "status": status }));
}

#[given(expr = "a homework record named {string} without a status")]
fn record_without_status(world: &mut HomeworkWorld, name: String) {
    world.record = Some(json!({ "homework_name": name }));
}

#[when("the record is translated")]
fn translate(world: &mut HomeworkWorld) {
    let record = world.record.as_ref().expect("record not set");
    world.translation = Some(parse_status(record));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut HomeworkWorld, expected: String) {
    let result = world.translation.as_ref().expect("no translation result");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "translation should fail with {string}")]
fn translation_fails(world: &mut HomeworkWorld, kind: String) {
    let result = world.translation.as_ref().expect("no translation result");
    let err = result.as_ref().unwrap_err();
    assert_eq!(err.kind().map(|k| k.to_string()), Some(kind), "{err}");
}
