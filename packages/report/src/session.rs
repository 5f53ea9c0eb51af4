//! Submitting the report form against the ingestion endpoint.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use disaster_map_report_models::{DraftField, DraftValidationError};
use disaster_map_source::IncidentWriter;
use tokio::task::JoinHandle;

use crate::{ReportForm, SUCCESS_AUTO_HIDE, SubmitRejected};

/// Result of [`ReportSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the report.
    Submitted,
    /// The endpoint rejected the report or could not be reached.
    Failed,
    /// A submission was already in flight; nothing was sent.
    Busy,
    /// The draft is incomplete; nothing was sent.
    Invalid(DraftValidationError),
}

fn lock(form: &Mutex<ReportForm>) -> MutexGuard<'_, ReportForm> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases the in-flight flag when a submission ends, including when the
/// submitting future is dropped before the response arrives.
struct InFlight<'a> {
    form: &'a Mutex<ReportForm>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.form).release();
    }
}

/// A mounted report form.
///
/// Dropping the session cancels a pending success auto-hide.
pub struct ReportSession {
    writer: Arc<dyn IncidentWriter>,
    form: Arc<Mutex<ReportForm>>,
    auto_hide: Mutex<Option<JoinHandle<()>>>,
}

impl ReportSession {
    #[must_use]
    pub fn new(writer: Arc<dyn IncidentWriter>) -> Self {
        Self::with_form(writer, ReportForm::new())
    }

    /// A session starting from an existing form state.
    #[must_use]
    pub fn with_form(writer: Arc<dyn IncidentWriter>, form: ReportForm) -> Self {
        Self {
            writer,
            form: Arc::new(Mutex::new(form)),
            auto_hide: Mutex::new(None),
        }
    }

    /// A copy of the current form state.
    #[must_use]
    pub fn snapshot(&self) -> ReportForm {
        lock(&self.form).clone()
    }

    pub fn set_field(&self, field: DraftField, value: impl Into<String>) {
        lock(&self.form).set_field(field, value);
    }

    /// Posts the current draft.
    ///
    /// At most one submission runs at a time; a call made while another is
    /// in flight returns [`SubmitOutcome::Busy`] without sending. On
    /// success the draft is cleared and the success alert is hidden after
    /// the auto-hide delay. On failure the draft is kept and the error
    /// alert stays until the next attempt.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = match lock(&self.form).begin_submit() {
            Ok(draft) => draft,
            Err(SubmitRejected::InFlight) => {
                log::debug!("Ignoring submit while another submission is in flight");
                return SubmitOutcome::Busy;
            }
            Err(SubmitRejected::Invalid(e)) => {
                log::warn!("Not submitting incomplete report: {e}");
                return SubmitOutcome::Invalid(e);
            }
        };
        let _in_flight = InFlight { form: &self.form };
        self.cancel_auto_hide();

        let result = self.writer.submit(&draft).await;
        let succeeded = match &result {
            Ok(()) => {
                log::info!("Reported incident {}", draft.incident_id);
                true
            }
            Err(e) => {
                log::error!("Error submitting incident {}: {e}", draft.incident_id);
                false
            }
        };

        let attempt = {
            let mut form = lock(&self.form);
            form.finish_submit(succeeded);
            form.attempt()
        };

        if succeeded {
            self.schedule_auto_hide(attempt);
            SubmitOutcome::Submitted
        } else {
            SubmitOutcome::Failed
        }
    }

    fn schedule_auto_hide(&self, attempt: u64) {
        let form = self.form.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_AUTO_HIDE).await;
            if lock(&form).hide_success(attempt) {
                log::debug!("Success alert hidden");
            }
        });

        let previous = self
            .auto_hide
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_auto_hide(&self) {
        if let Some(handle) = self
            .auto_hide
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for ReportSession {
    fn drop(&mut self) {
        self.cancel_auto_hide();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use disaster_map_report_models::IncidentDraft;
    use disaster_map_source::SourceError;
    use tokio::sync::Notify;

    use super::*;
    use crate::SubmitStatus;

    /// Writer answering every submission with a fixed HTTP status.
    struct StatusWriter {
        status: u16,
        calls: AtomicUsize,
        sent: Mutex<Vec<IncidentDraft>>,
        gate: Option<Arc<Notify>>,
    }

    impl StatusWriter {
        fn new(status: u16) -> Arc<Self> {
            Arc::new(Self {
                status,
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
                gate: None,
            })
        }

        fn gated(status: u16, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                status,
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
                gate: Some(gate),
            })
        }
    }

    #[async_trait]
    impl IncidentWriter for StatusWriter {
        async fn submit(&self, draft: &IncidentDraft) -> Result<(), SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(draft.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if (200..300).contains(&self.status) {
                Ok(())
            } else {
                Err(SourceError::Status {
                    status: self.status,
                    url: "http://ingest.test/incidents".to_string(),
                })
            }
        }
    }

    fn fill(session: &ReportSession) {
        for (field, value) in [
            (DraftField::IncidentId, "INC-2025-001"),
            (DraftField::DisasterType, "Flood"),
            (DraftField::Severity, "3"),
            (DraftField::State, "Assam"),
            (DraftField::District, "Kamrup"),
            (DraftField::Timestamp, "2025-07-01T10:30"),
            (DraftField::Description, "River breached embankment"),
        ] {
            session.set_field(field, value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn created_response_clears_draft_and_hides_alert_after_three_seconds() {
        let writer = StatusWriter::new(201);
        let session = ReportSession::new(writer.clone());
        fill(&session);

        assert_eq!(session.submit().await, SubmitOutcome::Submitted);
        let form = session.snapshot();
        assert_eq!(form.status(), SubmitStatus::Success);
        assert!(form.draft().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(writer.sent.lock().unwrap()[0].state, "Assam");

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(session.snapshot().status(), SubmitStatus::Success);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(session.snapshot().status(), SubmitStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_keeps_draft_and_error_alert() {
        let writer = StatusWriter::new(500);
        let session = ReportSession::new(writer.clone());
        fill(&session);
        let before = session.snapshot().draft().clone();

        assert_eq!(session.submit().await, SubmitOutcome::Failed);
        let form = session.snapshot();
        assert_eq!(form.status(), SubmitStatus::Error);
        assert_eq!(form.draft(), &before);
        assert!(!form.is_submitting());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.snapshot().status(), SubmitStatus::Error);
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let writer = StatusWriter::gated(201, gate.clone());
        let session = ReportSession::new(writer.clone());
        fill(&session);

        let first = session.submit();
        let second = async {
            tokio::task::yield_now().await;
            let outcome = session.submit().await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, SubmitOutcome::Submitted);
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropped_submission_releases_guard() {
        let gate = Arc::new(Notify::new());
        let writer = StatusWriter::gated(201, gate);
        let session = ReportSession::new(writer);
        fill(&session);

        {
            let pending = session.submit();
            tokio::pin!(pending);
            assert!(
                tokio::time::timeout(Duration::from_millis(10), &mut pending)
                    .await
                    .is_err()
            );
            assert!(session.snapshot().is_submitting());
        }

        let form = session.snapshot();
        assert!(!form.is_submitting());
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[tokio::test]
    async fn incomplete_draft_is_not_posted() {
        let writer = StatusWriter::new(201);
        let session = ReportSession::new(writer.clone());

        let outcome = session.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_hide_is_cancelled_when_session_is_dropped() {
        let writer = StatusWriter::new(201);
        let session = ReportSession::new(writer);
        fill(&session);
        session.submit().await;

        let form = session.form.clone();
        drop(session);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(lock(&form).status(), SubmitStatus::Success);
    }
}
