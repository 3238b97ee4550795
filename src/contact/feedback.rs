/// Specifying the kind of a feedback message.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FeedbackKind {
    Success,
    Error,
}

impl FeedbackKind {
    /// Modifier class applied next to `form-message` on the message slot.
    ///
    pub fn css_class(self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        }
    }
}

/// A page-level notification shown above the form.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Error,
            text: text.into(),
        }
    }
}
