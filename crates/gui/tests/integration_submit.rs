//! Integration tests for order submission against a mock HTTP endpoint.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use nox_configurator_lib::fixtures::{filled_form, sample_edits};
use nox_configurator_lib::state::settings::AppSettings;
use nox_configurator_lib::state::{AppState, FormState, SubmissionState};
use nox_configurator_lib::state::form::Field;
use nox_configurator_lib::submit::{Notification, OrderClient, SubmissionDispatcher, SubmitError};
use nox_configurator_lib::validation::ValidationError;

fn jane_doe_body() -> serde_json::Value {
    json!({
        "contactInfo": {
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555-0100"
        },
        "order": {
            "length": 10.0,
            "width": 5.0,
            "height": 2.0,
            "quantity": 1,
            "material": "cast5000",
            "roughCutting": false,
            "eyeBoltHoles": true,
            "mountingHoles": false,
            "additionalComments": ""
        }
    })
}

fn client(url: String) -> OrderClient {
    OrderClient::new(url, Duration::from_secs(5)).unwrap()
}

/// Poll until the in-flight request reports back
fn wait_for_outcome(state: &mut SubmissionState) {
    for _ in 0..400 {
        if state.poll() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("submission did not complete");
}

// ── OrderClient ──────────────────────────────────────────────

#[tokio::test]
async fn test_posts_filled_form_as_json() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/orders")
                .header("content-type", "application/json")
                .json_body(jane_doe_body());
            then.status(200).json_body(json!({ "id": "ord_1" }));
        })
        .await;

    let payload = filled_form().submission().unwrap();
    let result = client(server.url("/orders")).submit(&payload).await;

    assert!(result.is_ok(), "{result:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_any_2xx_is_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/orders");
            then.status(201);
        })
        .await;

    let payload = filled_form().submission().unwrap();
    assert!(client(server.url("/orders")).submit(&payload).await.is_ok());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/orders");
            then.status(500).body("boom");
        })
        .await;

    let payload = filled_form().submission().unwrap();
    let result = client(server.url("/orders")).submit(&payload).await;

    match &result {
        Err(SubmitError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(
        Notification::from_result(&result),
        Notification::Rejected { status: 500 }
    );
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    let payload = filled_form().submission().unwrap();
    let result = client("http://127.0.0.1:1/orders".to_string())
        .submit(&payload)
        .await;

    assert!(matches!(result, Err(SubmitError::Transport(_))), "{result:?}");
    assert!(matches!(
        Notification::from_result(&result),
        Notification::Failed { .. }
    ));
}

// ── Dispatcher and submit button state ──────────────────────

#[test]
fn test_dispatch_success_round_trip() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/orders").json_body(jane_doe_body());
        then.status(200);
    });

    let dispatcher = SubmissionDispatcher::new(client(server.url("/orders")), runtime.handle().clone());
    let mut state = SubmissionState::new(dispatcher);
    let form = filled_form();

    assert!(state.submit(&form));
    assert!(state.is_in_flight());
    // A second click while the first request is pending does nothing
    assert!(!state.submit(&form));

    wait_for_outcome(&mut state);
    assert_eq!(state.notification, Some(Notification::Submitted));
    assert!(!state.is_in_flight());
    assert_eq!(state.attempts(), 1);
    mock.assert_hits(1);

    // Submitting does not clear or change the form
    assert_eq!(form, filled_form());

    state.dismiss();
    assert!(state.notification.is_none());
}

#[test]
fn test_dispatch_failure_then_retry() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(POST).path("/orders");
        then.status(503);
    });

    let dispatcher = SubmissionDispatcher::new(client(server.url("/orders")), runtime.handle().clone());
    let mut state = SubmissionState::new(dispatcher);
    let form = filled_form();

    assert!(state.submit(&form));
    wait_for_outcome(&mut state);
    assert_eq!(state.notification, Some(Notification::Rejected { status: 503 }));

    failing.delete();
    server.mock(|when, then| {
        when.method(POST).path("/orders");
        then.status(200);
    });

    assert!(state.submit(&form));
    wait_for_outcome(&mut state);
    assert_eq!(state.notification, Some(Notification::Submitted));
    assert_eq!(state.attempts(), 2);
}

#[test]
fn test_dispatch_to_unreachable_endpoint_fails() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dispatcher = SubmissionDispatcher::new(
        client("http://127.0.0.1:1/orders".to_string()),
        runtime.handle().clone(),
    );
    let mut state = SubmissionState::new(dispatcher);

    assert!(state.submit(&filled_form()));
    assert!(state.is_in_flight());

    wait_for_outcome(&mut state);
    assert!(
        matches!(state.notification, Some(Notification::Failed { .. })),
        "{:?}",
        state.notification
    );
    assert!(!state.is_in_flight());

    // The button is usable again after a failure
    assert!(state.submit(&filled_form()));
    wait_for_outcome(&mut state);
    assert_eq!(state.attempts(), 2);
}

#[test]
fn test_invalid_form_sends_nothing() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/orders");
        then.status(200);
    });

    let dispatcher = SubmissionDispatcher::new(client(server.url("/orders")), runtime.handle().clone());
    let mut state = SubmissionState::new(dispatcher);

    // Empty contact fields
    assert!(!state.submit(&FormState::default()));
    assert_eq!(
        state.notification,
        Some(Notification::Invalid {
            error: ValidationError::Required { field: Field::Name }
        })
    );

    // Zero quantity
    let mut form = filled_form();
    form.apply(nox_configurator_lib::state::FormEvent::input("quantity", "0"))
        .unwrap();
    assert!(!state.submit(&form));

    assert!(!state.is_in_flight());
    assert_eq!(state.attempts(), 0);
    mock.assert_hits(0);
}

#[test]
fn test_app_state_edits_then_submit() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/orders").json_body(jane_doe_body());
        then.status(200);
    });

    let dispatcher = SubmissionDispatcher::new(client(server.url("/orders")), runtime.handle().clone());
    let mut app = AppState::new(AppSettings::default(), SubmissionState::new(dispatcher));

    let mut edits = sample_edits();
    edits.push(nox_configurator_lib::state::FormEvent::input("bogus", "x"));
    assert_eq!(app.apply_edits(edits), 4);

    assert!(app.submit());
    wait_for_outcome(&mut app.submission);
    assert_eq!(app.submission.notification, Some(Notification::Submitted));
    mock.assert();
}
