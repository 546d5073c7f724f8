//! Quote request workflow state
//!
//! Tracks what the customer has done so far: entered fields, requested an
//! estimate, approved the price, opened scheduling, booked a time, had their
//! photo checked. Requesting a new estimate invalidates everything that came
//! after the previous one.

use crate::error::{QuoteError, Result};
use crate::photo::{PhotoReport, PhotoVerdict};
use crate::pricing::{Estimate, Estimator};
use crate::quote::submission::{PhotoCheckSummary, SubmissionDecision, SubmissionPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Raw form field values as typed by the customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteFields {
    pub photo_url: String,
    pub width: String,
    pub depth: String,
    pub fabric: String,
    pub phone: String,
    pub email: String,
    /// Hidden honeypot; real visitors never fill it in
    pub website: String,
}

/// Appointment booked through the scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub event_uri: String,
    pub invitee_uri: String,
}

/// Quote form state machine
#[derive(Debug, Clone, Default)]
pub struct QuoteForm {
    fields: QuoteFields,
    estimate: Option<Estimate>,
    price_approved: bool,
    scheduling_intent: bool,
    booking: Option<Booking>,
    photo_report: Option<PhotoReport>,
}

impl QuoteForm {
    pub fn new(fields: QuoteFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &QuoteFields {
        &self.fields
    }

    /// Edit fields in place. Edits do not invalidate a shown estimate.
    pub fn fields_mut(&mut self) -> &mut QuoteFields {
        &mut self.fields
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    pub fn price_approved(&self) -> bool {
        self.price_approved
    }

    pub fn scheduling_intent(&self) -> bool {
        self.scheduling_intent
    }

    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    pub fn photo_report(&self) -> Option<&PhotoReport> {
        self.photo_report.as_ref()
    }

    /// Compute a fresh estimate from the current fields.
    ///
    /// Clears price approval, scheduling intent and any recorded booking.
    pub fn request_estimate(&mut self, estimator: &Estimator) -> Result<&Estimate> {
        let estimate = estimator.estimate_from_text(
            &self.fields.width,
            &self.fields.depth,
            &self.fields.fabric,
        )?;

        self.price_approved = false;
        self.scheduling_intent = false;
        self.booking = None;

        debug!(total = estimate.total, "estimate shown, approval reset");
        let estimate = self.estimate.insert(estimate);
        Ok(&*estimate)
    }

    /// Approve or withdraw approval of the estimated price
    pub fn set_price_approval(&mut self, approved: bool) -> Result<()> {
        if approved && self.estimate.is_none() {
            return Err(QuoteError::blocked("request an estimate before approving the price"));
        }
        self.price_approved = approved;
        Ok(())
    }

    /// Deposit and scheduling actions are offered only while the price is approved
    pub fn actions_available(&self) -> bool {
        self.price_approved
    }

    /// Customer opened the scheduler
    pub fn open_scheduler(&mut self) -> Result<()> {
        if !self.actions_available() {
            return Err(QuoteError::blocked("approve the estimated price to book a time"));
        }
        self.scheduling_intent = true;
        Ok(())
    }

    /// Scheduler reported a completed booking
    pub fn record_booking(&mut self, event_uri: impl Into<String>, invitee_uri: impl Into<String>) {
        let booking = Booking {
            event_uri: event_uri.into(),
            invitee_uri: invitee_uri.into(),
        };
        info!(event_uri = %booking.event_uri, "booking recorded");
        self.booking = Some(booking);
    }

    /// Attach the quality report for the photo at `photo_url`
    pub fn attach_photo_report(&mut self, report: PhotoReport) {
        self.photo_report = Some(report);
    }

    /// Honeypot filled in
    pub fn is_spam(&self) -> bool {
        !self.fields.website.trim().is_empty()
    }

    /// Build the relay payload if the form may be submitted.
    ///
    /// Spam is dropped silently. Otherwise the form needs an estimate, an
    /// approved price, a photo URL, a way to reach the customer, and a photo
    /// report that does not reject the photo.
    pub fn prepare_submission(
        &self,
        captcha_token: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionDecision> {
        if self.is_spam() {
            warn!("honeypot field filled, dropping submission");
            return Ok(SubmissionDecision::Dropped);
        }

        self.check_ready().inspect_err(|e| {
            debug!(error = %e, "submission blocked");
        })?;

        let photo_check = self.photo_report.as_ref().map(PhotoCheckSummary::from);

        Ok(SubmissionDecision::Ready(Box::new(SubmissionPayload {
            photo_url: self.fields.photo_url.clone(),
            width: self.fields.width.clone(),
            depth: self.fields.depth.clone(),
            fabric: self.fields.fabric.clone(),
            phone: self.fields.phone.clone(),
            email: self.fields.email.clone(),
            estimate_text: self
                .estimate
                .as_ref()
                .map(Estimate::summary)
                .unwrap_or_default(),
            price_approved: self.price_approved,
            scheduling_intent: self.scheduling_intent,
            booking_completed: self.booking.is_some(),
            calendly_event_uri: self
                .booking
                .as_ref()
                .map(|b| b.event_uri.clone())
                .unwrap_or_default(),
            calendly_invitee_uri: self
                .booking
                .as_ref()
                .map(|b| b.invitee_uri.clone())
                .unwrap_or_default(),
            submitted_at,
            recaptcha_token: captcha_token.filter(|t| !t.is_empty()),
            photo_check,
        })))
    }

    fn check_ready(&self) -> Result<()> {
        if self.estimate.is_none() {
            return Err(QuoteError::blocked("request an estimate first"));
        }
        if !self.price_approved {
            return Err(QuoteError::blocked("please approve the estimated price"));
        }
        if self.fields.photo_url.trim().is_empty() {
            return Err(QuoteError::blocked("add a link to a photo of the furniture"));
        }
        if self.fields.phone.trim().is_empty() && self.fields.email.trim().is_empty() {
            return Err(QuoteError::blocked("leave a phone number or email address"));
        }

        let report = self
            .photo_report
            .as_ref()
            .ok_or_else(|| QuoteError::blocked("the photo has not been checked yet"))?;
        if report.verdict == PhotoVerdict::Rejected {
            return Err(QuoteError::PhotoRejected {
                issues: report.issues.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::{PhotoIssue, PhotoMetrics};
    use chrono::TimeZone;

    fn filled_fields() -> QuoteFields {
        QuoteFields {
            photo_url: "https://photos.example.com/armchair.jpg".into(),
            width: "30".into(),
            depth: "28".into(),
            fabric: "premium".into(),
            phone: "555-0100".into(),
            email: "customer@example.com".into(),
            website: String::new(),
        }
    }

    fn accepted_report() -> PhotoReport {
        PhotoReport {
            width: 1200,
            height: 900,
            metrics: Some(PhotoMetrics {
                analyzed_width: 256,
                analyzed_height: 192,
                brightness: 120.0,
                sharpness: 40.0,
            }),
            issues: Vec::new(),
            verdict: PhotoVerdict::Accepted,
        }
    }

    fn ready_form() -> QuoteForm {
        let mut form = QuoteForm::new(filled_fields());
        form.request_estimate(&Estimator::default()).unwrap();
        form.set_price_approval(true).unwrap();
        form.attach_photo_report(accepted_report());
        form
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn test_new_estimate_resets_approval_and_booking() {
        let mut form = ready_form();
        form.open_scheduler().unwrap();
        form.record_booking("https://cal.example/e/1", "https://cal.example/i/1");

        form.request_estimate(&Estimator::default()).unwrap();

        assert!(!form.price_approved());
        assert!(!form.scheduling_intent());
        assert!(form.booking().is_none());
        assert!(!form.actions_available());
    }

    #[test]
    fn test_approval_requires_estimate() {
        let mut form = QuoteForm::new(filled_fields());
        assert!(matches!(
            form.set_price_approval(true),
            Err(QuoteError::SubmissionBlocked { .. })
        ));
        // Withdrawing is always allowed
        assert!(form.set_price_approval(false).is_ok());
    }

    #[test]
    fn test_scheduler_requires_approval() {
        let mut form = QuoteForm::new(filled_fields());
        form.request_estimate(&Estimator::default()).unwrap();
        assert!(form.open_scheduler().is_err());

        form.set_price_approval(true).unwrap();
        form.open_scheduler().unwrap();
        assert!(form.scheduling_intent());
    }

    #[test]
    fn test_withdrawn_approval_hides_actions() {
        let mut form = ready_form();
        assert!(form.actions_available());
        form.set_price_approval(false).unwrap();
        assert!(!form.actions_available());
    }

    #[test]
    fn test_honeypot_drops_submission() {
        let mut form = ready_form();
        form.fields_mut().website = "http://spam.example".into();
        assert!(form.is_spam());
        assert_eq!(
            form.prepare_submission(None, now()).unwrap(),
            SubmissionDecision::Dropped
        );
    }

    #[test]
    fn test_whitespace_honeypot_is_not_spam() {
        let mut form = ready_form();
        form.fields_mut().website = "   ".into();
        assert!(!form.is_spam());
    }

    #[test]
    fn test_unapproved_price_blocks() {
        let mut form = ready_form();
        form.set_price_approval(false).unwrap();
        let err = form.prepare_submission(None, now()).unwrap_err();
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_missing_contact_blocks() {
        let mut form = ready_form();
        form.fields_mut().phone.clear();
        form.fields_mut().email = "  ".into();
        assert!(matches!(
            form.prepare_submission(None, now()),
            Err(QuoteError::SubmissionBlocked { .. })
        ));
    }

    #[test]
    fn test_unchecked_photo_blocks() {
        let mut form = QuoteForm::new(filled_fields());
        form.request_estimate(&Estimator::default()).unwrap();
        form.set_price_approval(true).unwrap();
        let err = form.prepare_submission(None, now()).unwrap_err();
        assert!(err.to_string().contains("photo"));
    }

    #[test]
    fn test_rejected_photo_blocks_with_issues() {
        let mut form = ready_form();
        let issue = PhotoIssue::TooDark {
            brightness: 20.0,
            minimum: 50.0,
        };
        form.attach_photo_report(PhotoReport {
            issues: vec![issue.clone()],
            verdict: PhotoVerdict::Rejected,
            ..accepted_report()
        });

        match form.prepare_submission(None, now()) {
            Err(QuoteError::PhotoRejected { issues }) => assert_eq!(issues, vec![issue]),
            other => panic!("Expected PhotoRejected, got: {:?}", other),
        }
    }

    #[test]
    fn test_unverifiable_photo_still_submits() {
        let mut form = ready_form();
        form.attach_photo_report(PhotoReport {
            metrics: None,
            verdict: PhotoVerdict::Unchecked,
            ..accepted_report()
        });
        assert!(matches!(
            form.prepare_submission(None, now()).unwrap(),
            SubmissionDecision::Ready(_)
        ));
    }

    #[test]
    fn test_ready_payload_contents() {
        let mut form = ready_form();
        form.open_scheduler().unwrap();
        form.record_booking("https://cal.example/e/42", "https://cal.example/i/7");

        let payload = match form.prepare_submission(Some("tok".into()), now()).unwrap() {
            SubmissionDecision::Ready(payload) => payload,
            SubmissionDecision::Dropped => panic!("unexpected drop"),
        };

        assert_eq!(payload.width, "30");
        assert!(payload.price_approved);
        assert!(payload.scheduling_intent);
        assert!(payload.booking_completed);
        assert_eq!(payload.calendly_event_uri, "https://cal.example/e/42");
        assert_eq!(payload.recaptcha_token.as_deref(), Some("tok"));
        assert!(payload.estimate_text.starts_with("Baseline estimate: $"));
        assert_eq!(
            payload.photo_check.as_ref().map(|c| c.verdict),
            Some(PhotoVerdict::Accepted)
        );
    }

    #[test]
    fn test_empty_captcha_token_omitted() {
        let form = ready_form();
        match form.prepare_submission(Some(String::new()), now()).unwrap() {
            SubmissionDecision::Ready(payload) => assert!(payload.recaptcha_token.is_none()),
            SubmissionDecision::Dropped => panic!("unexpected drop"),
        }
    }
}
