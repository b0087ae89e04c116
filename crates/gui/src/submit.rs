//! Order submission: one POST per click, outcome delivered back to the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use reqwest::StatusCode;
use shared::OrderSubmission;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("order endpoint answered with status {0}")]
    Status(StatusCode),

    #[error("order request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the external order endpoint
#[derive(Clone)]
pub struct OrderClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OrderClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the order as JSON. Any 2xx is success; the body is ignored.
    pub async fn submit(&self, submission: &OrderSubmission) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status))
        }
    }
}

/// What the user gets told after a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Submitted,
    Rejected { status: u16 },
    Failed { reason: String },
    /// The form did not validate; the UI renders `error` in its own language
    Invalid { error: ValidationError },
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Submitted)
    }

    pub fn from_result(result: &Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Notification::Submitted,
            Err(SubmitError::Status(status)) => Notification::Rejected {
                status: status.as_u16(),
            },
            Err(SubmitError::Transport(e)) => Notification::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Spawns submissions on a tokio runtime and hands results back through a channel
pub struct SubmissionDispatcher {
    client: OrderClient,
    runtime: tokio::runtime::Handle,
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
    in_flight: usize,
    attempts: u64,
}

impl SubmissionDispatcher {
    pub fn new(client: OrderClient, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            runtime,
            tx,
            rx,
            in_flight: 0,
            attempts: 0,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    /// Total requests issued so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Fire one request. Returns immediately; poll for the outcome.
    pub fn dispatch(&mut self, submission: OrderSubmission) {
        self.in_flight += 1;
        self.attempts += 1;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tracing::info!("Submitting order to {}", client.endpoint());

        self.runtime.spawn(async move {
            let result = client.submit(&submission).await;
            match &result {
                Ok(()) => tracing::info!("Order submitted"),
                Err(e) => tracing::error!("Order submission failed: {e}"),
            }
            // The receiver only goes away with the window; nothing to report then.
            let _ = tx.send(Notification::from_result(&result));
        });
    }

    /// Non-blocking: next finished submission, if any
    pub fn poll(&mut self) -> Option<Notification> {
        match self.rx.try_recv() {
            Ok(n) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(n)
            }
            Err(_) => None,
        }
    }
}
