use crate::validator::FieldKind;

/// Suffix marking a localized (English) variant of a field.
pub const LOCALIZED_SUFFIX: &str = "_en";

/// One entry of a question catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Field key; also the placeholder name in templates.
    pub key: &'static str,
    /// Prompt text shown to the user.
    pub prompt: &'static str,
    /// Selects the validator for the answer.
    pub kind: FieldKind,
}

impl Question {
    pub const fn new(key: &'static str, prompt: &'static str, kind: FieldKind) -> Self {
        Self { key, prompt, kind }
    }

    /// Whether this question asks for a localized-language variant.
    pub fn is_localized(&self) -> bool {
        self.key.ends_with(LOCALIZED_SUFFIX)
    }

    /// Whether the question is asked for a session with the given
    /// localized-fields flag.
    pub fn applies(&self, localized: bool) -> bool {
        localized || !self.is_localized()
    }
}
