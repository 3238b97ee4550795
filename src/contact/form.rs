use super::feedback::Feedback;
use super::field::{Field, SubmissionRecord};
use super::messages;
use super::validation::{text_length, ValidationError, Validator};
use crate::analytics::AnalyticsRecord;
use crate::config::ContactConfig;
use crate::error::AppResult;
use crate::events::network::TransportError;
use crate::page::ContactPage;
use chrono::Utc;
use log::*;
use std::collections::HashMap;

/// Specifying the field events that trigger validation.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FieldEvent {
    Input(Field),
    Blur(Field),
    Change(Field),
}

/// Specifying the submission phases.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

/// Result of asking the form to start a submission.
///
#[derive(Debug, PartialEq, Clone)]
pub enum SubmitStart {
    Started(SubmissionRecord),
    Invalid,
    Busy,
    Inactive,
}

/// How a submission ended.
///
#[derive(Debug, PartialEq, Clone)]
pub enum SubmitOutcome {
    Delivered(AnalyticsRecord),
    Failed,
    NotStarted,
}

/// Oversees validation, submission state and feedback for the contact form.
///
pub struct ContactForm<P: ContactPage> {
    page: P,
    config: ContactConfig,
    validator: Validator,
    phase: SubmitPhase,
    errors: HashMap<Field, ValidationError>,
    last_feedback: Option<Feedback>,
    active: bool,
}

impl<P: ContactPage> ContactForm<P> {
    pub fn new(page: P, config: ContactConfig) -> AppResult<Self> {
        let validator = Validator::new(&config)?;
        Ok(ContactForm {
            page,
            config,
            validator,
            phase: SubmitPhase::Idle,
            errors: HashMap::new(),
            last_feedback: None,
            active: false,
        })
    }

    /// Put the submit control in its idle state and start accepting events.
    ///
    pub fn init(&mut self) -> &mut Self {
        self.page.set_submit_busy(false);
        self.active = true;
        info!("Contact form initialized");
        self
    }

    /// Stop accepting events. A submission still in flight resolves without
    /// touching the page.
    ///
    pub fn teardown(&mut self) {
        if self.phase == SubmitPhase::Submitting {
            warn!("Tearing down contact form with a submission in flight");
        }
        self.active = false;
        info!("Contact form torn down");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn field_error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    /// Re-validate the field behind a real-time input event.
    ///
    pub fn handle(&mut self, event: FieldEvent) {
        if !self.active {
            return;
        }
        match event {
            FieldEvent::Input(field) => {
                self.validate_field(field);
                if field == Field::Message {
                    self.log_message_progress();
                }
            }
            FieldEvent::Blur(field) | FieldEvent::Change(field) => {
                self.validate_field(field);
            }
        }
    }

    /// Validate one field against its current value, updating its error
    /// slot. Returns whether the field is valid.
    ///
    pub fn validate_field(&mut self, field: Field) -> bool {
        let value = self.page.field_value(field);
        match self.validator.check(field, &value) {
            Ok(()) => {
                self.errors.remove(&field);
                self.page.set_field_error(field, None);
                true
            }
            Err(error) => {
                let message = messages::field_error(field, &error);
                self.page.set_field_error(field, Some(&message));
                self.errors.insert(field, error);
                false
            }
        }
    }

    /// Validate every field. All validators run so every error slot is
    /// current, even after the first failure.
    ///
    pub fn validate_form(&mut self) -> bool {
        let results: Vec<(Field, bool)> = Field::ALL
            .into_iter()
            .map(|field| (field, self.validate_field(field)))
            .collect();
        let valid = results.iter().all(|(_, ok)| *ok);
        debug!("Form validation: {:?}, valid: {}", results, valid);
        valid
    }

    /// Validate and, if everything passes, enter the submitting phase and
    /// return the record to deliver.
    ///
    pub fn begin_submission(&mut self) -> SubmitStart {
        if !self.active {
            return SubmitStart::Inactive;
        }
        if self.phase == SubmitPhase::Submitting {
            warn!("Ignoring submit while a submission is in flight");
            return SubmitStart::Busy;
        }
        if !self.validate_form() {
            info!("Contact form has validation errors");
            self.show_feedback(Feedback::error(messages::FIX_ERRORS));
            return SubmitStart::Invalid;
        }

        self.phase = SubmitPhase::Submitting;
        self.page.set_submit_busy(true);
        let record = self.collect();
        info!("Submitting contact form...");
        SubmitStart::Started(record)
    }

    /// Apply the transport result, then return the form to idle whatever
    /// the outcome. After teardown only the submit control is restored.
    ///
    pub fn finish_submission(
        &mut self,
        record: &SubmissionRecord,
        result: Result<(), TransportError>,
    ) -> SubmitOutcome {
        if !self.active {
            debug!("Discarding submission result after teardown");
            self.end_submission();
            return SubmitOutcome::NotStarted;
        }

        let outcome = match result {
            Ok(()) => {
                info!("Contact form delivered");
                self.show_feedback(Feedback::success(messages::submission_success(
                    &record.name,
                    &record.email,
                )));
                self.page.reset_form();
                self.clear_errors();
                self.page.scroll_to_top();
                let analytics = AnalyticsRecord::form_submission(record);
                analytics.emit();
                SubmitOutcome::Delivered(analytics)
            }
            Err(e) => {
                error!("Failed to deliver contact form: {}", e);
                self.show_feedback(Feedback::error(messages::submission_failure(
                    &self.config.fallback_phone,
                )));
                SubmitOutcome::Failed
            }
        };

        self.end_submission();
        outcome
    }

    fn end_submission(&mut self) {
        self.phase = SubmitPhase::Idle;
        self.page.set_submit_busy(false);
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        self.page
            .show_feedback(&feedback, self.config.feedback_dismiss());
        self.last_feedback = Some(feedback);
    }

    fn clear_errors(&mut self) {
        self.errors.clear();
        for field in Field::ALL {
            self.page.set_field_error(field, None);
        }
    }

    fn collect(&self) -> SubmissionRecord {
        let record = SubmissionRecord {
            name: self.page.field_value(Field::Name).trim().to_string(),
            email: self.page.field_value(Field::Email).trim().to_string(),
            subject: self.page.field_value(Field::Subject),
            message: self.page.field_value(Field::Message).trim().to_string(),
            newsletter: self.page.newsletter_checked(),
            timestamp: Utc::now(),
        };
        debug!(
            "Collected submission from {} (subject: {}, newsletter: {})",
            record.email, record.subject, record.newsletter
        );
        record
    }

    fn log_message_progress(&self) {
        let length = text_length(&self.page.field_value(Field::Message));
        let minimum = self.validator.message_min_len();
        if length < minimum {
            trace!("{} characters left to reach the message minimum", minimum - length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::FeedbackKind;
    use crate::page::MemoryForm;
    use std::time::Duration;

    const MESSAGE: &str = "Gostaria de um roteiro para Fernando de Noronha.";

    fn form() -> ContactForm<MemoryForm> {
        let mut form = ContactForm::new(MemoryForm::new(), ContactConfig::default()).unwrap();
        form.init();
        form
    }

    fn fill(form: &mut ContactForm<MemoryForm>, name: &str, email: &str, subject: &str, message: &str) {
        form.page_mut()
            .set_value(Field::Name, name)
            .set_value(Field::Email, email)
            .set_value(Field::Subject, subject)
            .set_value(Field::Message, message);
    }

    #[test]
    fn input_event_writes_and_clears_error_slot() {
        let mut form = form();
        form.page_mut().set_value(Field::Email, "ana@");
        form.handle(FieldEvent::Input(Field::Email));
        assert_eq!(
            form.page().error_text(Field::Email),
            Some("Por favor, insira um e-mail válido")
        );
        assert_eq!(form.field_error(Field::Email), Some(&ValidationError::InvalidFormat));

        form.page_mut().set_value(Field::Email, "ana@exemplo.com");
        form.handle(FieldEvent::Blur(Field::Email));
        assert_eq!(form.page().error_text(Field::Email), None);
        assert_eq!(form.field_error(Field::Email), None);
    }

    #[test]
    fn validation_does_not_touch_values() {
        let mut form = form();
        form.page_mut().set_value(Field::Name, "  Jo  ");
        form.handle(FieldEvent::Change(Field::Name));
        assert_eq!(form.page().value(Field::Name), "  Jo  ");
    }

    #[test]
    fn validate_form_updates_every_slot() {
        let mut form = form();
        assert!(!form.validate_form());
        for field in Field::ALL {
            assert!(form.page().error_text(field).is_some(), "{:?} has no error", field);
        }
    }

    #[test]
    fn validate_form_is_conjunction_of_fields() {
        let valid = ["Ana", "ana@exemplo.com", "general", MESSAGE];
        let invalid = ["", "ana", "", "curta"];
        for mask in 0..16u8 {
            let mut form = form();
            let pick = |i: usize| if mask & (1 << i) != 0 { valid[i] } else { invalid[i] };
            fill(&mut form, pick(0), pick(1), pick(2), pick(3));
            assert_eq!(form.validate_form(), mask == 0b1111, "mask {:04b}", mask);
        }
    }

    #[test]
    fn short_message_is_the_only_error() {
        let mut form = form();
        fill(&mut form, "Jo", "jo@x.com", "general", &"m".repeat(19));
        assert!(!form.validate_form());
        assert_eq!(
            form.field_error(Field::Message),
            Some(&ValidationError::TooShort { min: 20 })
        );
        assert_eq!(form.field_error(Field::Name), None);
        assert_eq!(form.field_error(Field::Email), None);
        assert_eq!(form.field_error(Field::Subject), None);
    }

    #[test]
    fn empty_name_reports_required() {
        let mut form = form();
        fill(&mut form, "", "jo@x.com", "general", MESSAGE);
        assert!(!form.validate_form());
        assert_eq!(form.field_error(Field::Name), Some(&ValidationError::Required));
        assert_eq!(form.page().error_text(Field::Name), Some("Nome é obrigatório"));
    }

    #[test]
    fn invalid_submit_shows_fix_errors_feedback() {
        let mut form = form();
        assert_eq!(form.begin_submission(), SubmitStart::Invalid);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert!(!form.page().is_busy());
        let feedback = form.page().visible_feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.text, messages::FIX_ERRORS);
    }

    #[test]
    fn valid_submit_enters_submitting_with_trimmed_record() {
        let mut form = form();
        fill(&mut form, "  Ana Luísa ", " ana@exemplo.com ", "general", MESSAGE);
        form.page_mut().set_newsletter(true);

        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("expected submission to start, got {:?}", other),
        };
        assert_eq!(record.name, "Ana Luísa");
        assert_eq!(record.email, "ana@exemplo.com");
        assert_eq!(record.subject, "general");
        assert!(record.newsletter);
        assert_eq!(form.phase(), SubmitPhase::Submitting);
        assert!(form.page().is_busy());

        assert_eq!(form.begin_submission(), SubmitStart::Busy);
    }

    #[test]
    fn success_clears_form_and_emits_analytics() {
        let mut form = form();
        fill(&mut form, "Ana", "ana@exemplo.com", "pacotes", MESSAGE);
        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("unexpected {:?}", other),
        };

        let outcome = form.finish_submission(&record, Ok(()));
        match outcome {
            SubmitOutcome::Delivered(analytics) => {
                assert_eq!(analytics.user_data.subject_category, "pacotes");
                assert!(!analytics.user_data.has_newsletter_opt_in);
            }
            other => panic!("unexpected {:?}", other),
        }
        for field in Field::ALL {
            assert_eq!(form.page().value(field), "");
            assert_eq!(form.page().error_text(field), None);
        }
        let feedback = form.page().visible_feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Success);
        assert!(feedback.text.contains("Ana"));
        assert!(feedback.text.contains("ana@exemplo.com"));
        assert_eq!(form.page().scrolls_to_top(), 1);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert!(!form.page().is_busy());
    }

    #[test]
    fn failure_keeps_values_and_reenables_submit() {
        let mut form = form();
        fill(&mut form, "Ana", "ana@exemplo.com", "pacotes", MESSAGE);
        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("unexpected {:?}", other),
        };

        let outcome = form.finish_submission(&record, Err(TransportError::Unavailable));
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.page().value(Field::Name), "Ana");
        assert_eq!(form.page().value(Field::Message), MESSAGE);
        let feedback = form.page().visible_feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert!(feedback.text.contains("(11) 9999-9999"));
        assert_eq!(form.page().resets(), 0);
        assert!(!form.page().is_busy());
        assert_eq!(form.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn feedback_auto_dismisses() {
        let mut form = form();
        form.begin_submission();
        form.page_mut().advance(Duration::from_millis(9_999));
        assert!(form.page().visible_feedback().is_some());
        form.page_mut().advance(Duration::from_millis(1));
        assert!(form.page().visible_feedback().is_none());
        assert!(form.last_feedback().is_some());
    }

    #[test]
    fn latest_feedback_owns_the_dismissal_timer() {
        let mut form = form();
        form.begin_submission();
        form.page_mut().advance(Duration::from_secs(6));

        fill(&mut form, "Ana", "ana@exemplo.com", "pacotes", MESSAGE);
        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("unexpected {:?}", other),
        };
        form.finish_submission(&record, Err(TransportError::Unavailable));

        form.page_mut().advance(Duration::from_secs(5));
        let feedback = form.page().visible_feedback().unwrap();
        assert!(feedback.text.contains("(11) 9999-9999"));

        form.page_mut().advance(Duration::from_secs(5));
        assert!(form.page().visible_feedback().is_none());
    }

    #[test]
    fn inactive_form_ignores_events() {
        let mut form = ContactForm::new(MemoryForm::new(), ContactConfig::default()).unwrap();
        form.handle(FieldEvent::Input(Field::Name));
        assert_eq!(form.page().error_text(Field::Name), None);
        assert_eq!(form.begin_submission(), SubmitStart::Inactive);
    }

    #[test]
    fn result_after_teardown_leaves_page_alone() {
        let mut form = form();
        fill(&mut form, "Ana", "ana@exemplo.com", "pacotes", MESSAGE);
        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("unexpected {:?}", other),
        };
        form.teardown();
        assert_eq!(form.finish_submission(&record, Ok(())), SubmitOutcome::NotStarted);
        assert_eq!(form.page().value(Field::Name), "Ana");
        assert_eq!(form.page().resets(), 0);
        assert!(form.page().visible_feedback().is_none());
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert!(!form.page().is_busy());
    }

    #[test]
    fn failure_after_teardown_reenables_submit() {
        let mut form = form();
        fill(&mut form, "Ana", "ana@exemplo.com", "pacotes", MESSAGE);
        let record = match form.begin_submission() {
            SubmitStart::Started(record) => record,
            other => panic!("unexpected {:?}", other),
        };
        assert!(form.page().is_busy());
        form.teardown();
        let outcome = form.finish_submission(&record, Err(TransportError::Unavailable));
        assert_eq!(outcome, SubmitOutcome::NotStarted);
        assert!(!form.page().is_busy());
        assert!(form.page().visible_feedback().is_none());
    }
}
