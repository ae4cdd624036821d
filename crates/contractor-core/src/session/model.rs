//! Form session state.

use crate::answers::Answers;
use crate::contract::ContractType;

/// Name used for files and records when the form has no contract name.
pub const FALLBACK_CONTRACT_NAME: &str = "contract";

/// Where a form session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Waiting for the user to pick a contract type.
    #[default]
    AwaitingType,
    /// Waiting for the answer to the question at `index`.
    AwaitingAnswer {
        contract_type: ContractType,
        /// Index into the catalog; never decreases.
        index: usize,
        answers: Answers,
        /// Whether localized-language fields are asked, resolved once at
        /// type selection.
        localized: bool,
    },
    /// All questions answered; documents not yet delivered.
    Complete(CompletedForm),
}

/// A fully answered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedForm {
    pub contract_type: ContractType,
    pub answers: Answers,
}

impl CompletedForm {
    pub fn new(contract_type: ContractType, answers: Answers) -> Self {
        Self {
            contract_type,
            answers,
        }
    }

    /// The `contract_name` answer, or a generic fallback.
    pub fn contract_name(&self) -> &str {
        self.answers
            .get("contract_name")
            .unwrap_or(FALLBACK_CONTRACT_NAME)
    }
}
