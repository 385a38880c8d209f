//! Scripted backend for tests and `--mock-backend` demo runs.
//!
//! Outcomes are served from a queue; when the queue runs dry every call
//! succeeds with a placeholder acknowledgment. Submitted records are kept so
//! tests can assert on call counts and payloads.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::error::SubmissionError;
use crate::backend::gateway::SubmitBackend;
use crate::backend::protocol::{Ack, BackendReply};
use crate::checkin::record::CheckinRecord;

#[derive(Default)]
pub struct MockBackend {
    outcomes: Mutex<VecDeque<Result<Ack, SubmissionError>>>,
    calls: Mutex<Vec<CheckinRecord>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful outcome with the given guid.
    pub fn push_success(&self, guid: &str) {
        self.outcomes.lock().push_back(Ok(Ack {
            payload: BackendReply {
                guid: Some(guid.to_string()),
                action: Some("created".to_string()),
                extra: serde_json::Map::new(),
            },
        }));
    }

    /// Queue a backend failure with the given diagnostic detail.
    pub fn push_failure(&self, detail: &str) {
        self.outcomes.lock().push_back(Err(SubmissionError::BackendFailed {
            detail: detail.to_string(),
        }));
    }

    /// Queue a malformed-response outcome.
    pub fn push_malformed(&self, detail: &str) {
        self.outcomes
            .lock()
            .push_back(Err(SubmissionError::MalformedResponse {
                detail: detail.to_string(),
            }));
    }

    /// How many submissions have been attempted.
    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// The most recently submitted record, if any.
    pub fn last_record(&self) -> Option<CheckinRecord> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl SubmitBackend for MockBackend {
    async fn submit(&self, record: &CheckinRecord) -> Result<Ack, SubmissionError> {
        self.calls.lock().push(record.clone());
        match self.outcomes.lock().pop_front() {
            Some(outcome) => outcome,
            None => Ok(Ack {
                payload: BackendReply {
                    guid: Some("mock".to_string()),
                    action: Some("created".to_string()),
                    extra: serde_json::Map::new(),
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcomes_are_served_in_order() {
        let backend = MockBackend::new();
        backend.push_failure("duplicate code");
        backend.push_success("abc-123");

        let record = CheckinRecord::default();
        assert!(backend.submit(&record).await.is_err());
        let ack = backend.submit(&record).await.unwrap();
        assert_eq!(ack.payload.guid.as_deref(), Some("abc-123"));
        // Queue is dry: defaults to success.
        assert!(backend.submit(&record).await.is_ok());
        assert_eq!(backend.calls(), 3);
    }
}
