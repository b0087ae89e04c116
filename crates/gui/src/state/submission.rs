//! Submit button state: validation gate, in-flight tracking, last notification.

use crate::submit::{Notification, SubmissionDispatcher};

use super::form::FormState;

pub struct SubmissionState {
    dispatcher: SubmissionDispatcher,
    /// Last outcome shown to the user, until dismissed
    pub notification: Option<Notification>,
}

impl SubmissionState {
    pub fn new(dispatcher: SubmissionDispatcher) -> Self {
        Self {
            dispatcher,
            notification: None,
        }
    }

    /// Validate the form and fire one request. Returns `true` if a request was
    /// issued. The form itself is never modified.
    pub fn submit(&mut self, form: &FormState) -> bool {
        if self.dispatcher.is_in_flight() {
            tracing::debug!("Submit ignored, a request is already in flight");
            return false;
        }
        match form.submission() {
            Ok(payload) => {
                tracing::debug!(order = ?payload.order, "Order payload ready");
                self.notification = None;
                self.dispatcher.dispatch(payload);
                true
            }
            Err(e) => {
                tracing::warn!("Order not submitted: {e}");
                self.notification = Some(Notification::Invalid { error: e });
                false
            }
        }
    }

    /// Pick up a finished request, if any. Returns `true` when the
    /// notification changed.
    pub fn poll(&mut self) -> bool {
        match self.dispatcher.poll() {
            Some(n) => {
                self.notification = Some(n);
                true
            }
            None => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.dispatcher.is_in_flight()
    }

    pub fn attempts(&self) -> u64 {
        self.dispatcher.attempts()
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }
}
