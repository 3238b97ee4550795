//! Contact form module.
//!
//! This module contains everything behind the contact page form:
//! - Field rules and their pt-BR error messages
//! - Submission state and the feedback shown to the visitor
//! - The record handed to the transport and the analytics derived from it

mod feedback;
mod field;
mod form;
pub mod messages;
mod validation;

pub use feedback::{Feedback, FeedbackKind};
pub use field::{Field, SubmissionRecord};
pub use form::{ContactForm, FieldEvent, SubmitOutcome, SubmitPhase, SubmitStart};
pub use validation::{ValidationError, Validator};
