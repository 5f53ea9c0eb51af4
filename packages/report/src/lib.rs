#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The incident report form.
//!
//! [`ReportForm`] is the plain form state: the draft, the in-flight flag
//! and the last submit status. [`ReportSession`] drives it against an
//! [`disaster_map_source::IncidentWriter`], allowing one submission at a
//! time and hiding the success alert after [`SUCCESS_AUTO_HIDE`].

pub mod session;

use std::time::Duration;

use disaster_map_report_models::{DraftField, DraftValidationError, IncidentDraft};

pub use session::{ReportSession, SubmitOutcome};

/// How long the success alert stays visible.
pub const SUCCESS_AUTO_HIDE: Duration = Duration::from_secs(3);

pub const SUCCESS_MESSAGE: &str = "Incident reported successfully!";
pub const ERROR_MESSAGE: &str = "Failed to report incident. Please try again.";

/// Outcome of the most recent submission, as shown below the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    /// No alert.
    #[default]
    Idle,
    /// Accepted by the ingestion endpoint. Hidden again after a delay.
    Success,
    /// Rejected or unreachable. Shown until the next attempt.
    Error,
}

impl SubmitStatus {
    /// The alert text, `None` when no alert is shown.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Success => Some(SUCCESS_MESSAGE),
            Self::Error => Some(ERROR_MESSAGE),
        }
    }
}

/// Why [`ReportForm::begin_submit`] refused to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Another submission is still in flight.
    InFlight,
    /// The draft is incomplete.
    Invalid(DraftValidationError),
}

/// Report form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    draft: IncidentDraft,
    submitting: bool,
    status: SubmitStatus,
    /// Incremented by every finished submission.
    attempt: u64,
}

impl ReportForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with `draft`.
    #[must_use]
    pub fn with_draft(draft: IncidentDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &IncidentDraft {
        &self.draft
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub const fn status(&self) -> SubmitStatus {
        self.status
    }

    #[must_use]
    pub const fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Label of the submit control.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Submit Report"
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Marks a submission as in flight and returns the draft to send.
    ///
    /// Clears the previous alert.
    ///
    /// # Errors
    ///
    /// * [`SubmitRejected::InFlight`] if a submission is already running
    /// * [`SubmitRejected::Invalid`] if a field is missing or holds a value
    ///   outside its option list
    pub fn begin_submit(&mut self) -> Result<IncidentDraft, SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        self.draft.validate().map_err(SubmitRejected::Invalid)?;

        self.submitting = true;
        self.status = SubmitStatus::Idle;
        Ok(self.draft.clone())
    }

    /// Records the result of the in-flight submission. On success the draft
    /// is cleared; on failure it is kept for another try.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.attempt += 1;
        if succeeded {
            self.status = SubmitStatus::Success;
            self.draft.clear();
        } else {
            self.status = SubmitStatus::Error;
        }
    }

    /// Releases the in-flight flag.
    pub fn release(&mut self) {
        self.submitting = false;
    }

    /// Hides the success alert of `attempt`. Returns whether it did;
    /// a later submission's alert is left alone.
    pub fn hide_success(&mut self, attempt: u64) -> bool {
        if self.status == SubmitStatus::Success && self.attempt == attempt {
            self.status = SubmitStatus::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use disaster_map_report_models::DraftIssue;

    use super::*;

    fn filled() -> ReportForm {
        let mut form = ReportForm::new();
        for (field, value) in [
            (DraftField::IncidentId, "INC-7"),
            (DraftField::DisasterType, "Cyclone"),
            (DraftField::Severity, "4"),
            (DraftField::State, "Odisha"),
            (DraftField::District, "Puri"),
            (DraftField::Timestamp, "2025-10-02T06:15"),
            (DraftField::Description, "Landfall near the coast"),
        ] {
            form.set_field(field, value);
        }
        form
    }

    #[test]
    fn begin_submit_guards_against_second_submission() {
        let mut form = filled();
        assert!(form.begin_submit().is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), "Submitting...");
        assert_eq!(form.begin_submit(), Err(SubmitRejected::InFlight));

        form.release();
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn incomplete_draft_is_not_sent() {
        let mut form = filled();
        form.set_field(DraftField::District, "");
        let Err(SubmitRejected::Invalid(err)) = form.begin_submit() else {
            panic!("expected validation failure");
        };
        assert_eq!(err.issues, [DraftIssue::Missing(DraftField::District)]);
        assert!(!form.is_submitting());
    }

    #[test]
    fn success_clears_draft_and_failure_keeps_it() {
        let mut form = filled();
        let sent = form.begin_submit().unwrap();
        form.finish_submit(false);
        form.release();
        assert_eq!(form.status(), SubmitStatus::Error);
        assert_eq!(form.draft(), &sent);

        form.begin_submit().unwrap();
        assert_eq!(form.status(), SubmitStatus::Idle);
        form.finish_submit(true);
        form.release();
        assert_eq!(form.status(), SubmitStatus::Success);
        assert!(form.draft().is_empty());
    }

    #[test]
    fn hide_success_ignores_stale_attempts() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.finish_submit(true);
        form.release();
        let first = form.attempt();

        form.set_field(DraftField::IncidentId, "INC-8");
        form.finish_submit(false);
        assert!(!form.hide_success(first));
        assert_eq!(form.status(), SubmitStatus::Error);
    }

    #[test]
    fn status_messages() {
        assert_eq!(SubmitStatus::Idle.message(), None);
        assert_eq!(SubmitStatus::Success.message(), Some(SUCCESS_MESSAGE));
        assert_eq!(SubmitStatus::Error.message(), Some(ERROR_MESSAGE));
    }
}
