//! Quote request workflow
//!
//! This module tracks the form's state from estimate to submission, builds
//! the relay payload, and interprets the relay's reply.

pub mod form;
pub mod submission;
pub mod relay;

pub use form::{Booking, QuoteFields, QuoteForm};
pub use submission::{PhotoCheckSummary, SubmissionDecision, SubmissionPayload};
pub use relay::{interpret_reply, RelayOutcome};
