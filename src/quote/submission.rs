//! JSON payload posted to the form relay

use crate::photo::{PhotoReport, PhotoVerdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happens to a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionDecision {
    /// Honeypot tripped; discard without telling the sender
    Dropped,
    /// Payload ready to post
    Ready(Box<SubmissionPayload>),
}

/// Compact form of the photo report sent along with the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCheckSummary {
    pub verdict: PhotoVerdict,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpness: Option<f32>,
}

impl From<&PhotoReport> for PhotoCheckSummary {
    fn from(report: &PhotoReport) -> Self {
        Self {
            verdict: report.verdict,
            width: report.width,
            height: report.height,
            brightness: report.metrics.map(|m| m.brightness),
            sharpness: report.metrics.map(|m| m.sharpness),
        }
    }
}

/// Body of the relay POST.
///
/// Measurements are passed through as typed; the relay forwards them to a
/// person, not a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub photo_url: String,
    pub width: String,
    pub depth: String,
    pub fabric: String,
    pub phone: String,
    pub email: String,
    pub estimate_text: String,
    pub price_approved: bool,
    pub scheduling_intent: bool,
    pub booking_completed: bool,
    pub calendly_event_uri: String,
    pub calendly_invitee_uri: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(rename = "g-recaptcha-response", skip_serializing_if = "Option::is_none", default)]
    pub recaptcha_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_check: Option<PhotoCheckSummary>,
}

impl SubmissionPayload {
    /// Serialize for the request body
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
