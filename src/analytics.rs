//! Analytics records emitted after a successful contact submission.
//!
//! Records are written as JSON on the `analytics` log target so any
//! collector attached to the logger can pick them up.

use crate::contact::SubmissionRecord;
use log::*;
use serde::Serialize;

pub const FORM_SUBMISSION_EVENT: &str = "form_submission";
pub const CONTACT_FORM_NAME: &str = "contact_form";

/// Structured record describing a delivered contact message.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyticsRecord {
    pub event: String,
    pub form_name: String,
    pub user_data: UserData,
}

/// Non-identifying details about the submitter.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub has_newsletter_opt_in: bool,
    pub subject_category: String,
}

impl AnalyticsRecord {
    pub fn form_submission(record: &SubmissionRecord) -> Self {
        AnalyticsRecord {
            event: FORM_SUBMISSION_EVENT.to_string(),
            form_name: CONTACT_FORM_NAME.to_string(),
            user_data: UserData {
                has_newsletter_opt_in: record.newsletter,
                subject_category: record.subject.clone(),
            },
        }
    }

    /// Write the record to the `analytics` log target.
    ///
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => info!(target: "analytics", "{}", json),
            Err(e) => warn!("Failed to serialize analytics record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn form_submission_carries_opt_in_and_subject_only() {
        let record = SubmissionRecord {
            name: "Carla".to_string(),
            email: "carla@exemplo.com".to_string(),
            subject: "destinos".to_string(),
            message: "Quero conhecer destinos no Nordeste.".to_string(),
            newsletter: true,
            timestamp: Utc::now(),
        };
        let analytics = AnalyticsRecord::form_submission(&record);
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["event"], "form_submission");
        assert_eq!(json["form_name"], "contact_form");
        assert_eq!(json["user_data"]["has_newsletter_opt_in"], true);
        assert_eq!(json["user_data"]["subject_category"], "destinos");
        assert!(!json.to_string().contains("carla@exemplo.com"));
    }
}
