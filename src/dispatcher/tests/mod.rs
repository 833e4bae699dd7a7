use super::test_helpers::{
    FailingSink, TestDispatcher, create_test_dispatcher, create_test_dispatcher_with,
    truncated_body_base_url, unreachable_base_url,
};
use super::*;
use crate::config::{DurationPolicy, FileCollisionAction};
use crate::control::{BUSY_LABEL, ControlPhase, IDLE_LABEL};
use crate::error::{Error, ErrorKind, ValidationError};
use crate::surface::Notice;
use crate::types::{Format, PgnId};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


/// Assert the control is back to idle with its original label
fn assert_idle(dispatcher: &RequestDispatcher) {
    let state = dispatcher.control().state();
    assert_eq!(state.phase, ControlPhase::Idle);
    assert_eq!(state.label, IDLE_LABEL);
    assert!(state.enabled, "control must be re-enabled");
}
