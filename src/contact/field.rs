//! Contact form fields and the record built from them at submit time.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Specifying the validated form fields.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Element id of the input in the contact page markup.
    ///
    pub fn element_id(self) -> &'static str {
        match self {
            Field::Name => "nome",
            Field::Email => "email",
            Field::Subject => "assunto",
            Field::Message => "mensagem",
        }
    }

    /// Element id of the slot that displays this field's error.
    ///
    pub fn error_slot_id(self) -> &'static str {
        match self {
            Field::Name => "nomeError",
            Field::Email => "emailError",
            Field::Subject => "assuntoError",
            Field::Message => "mensagemError",
        }
    }
}

/// Snapshot of the form taken when a submission starts.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub newsletter: bool,
    pub timestamp: DateTime<Utc>,
}
