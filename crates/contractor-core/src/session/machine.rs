//! Form session transitions.
//!
//! ```text
//! AwaitingType ──select──▶ AwaitingAnswer(i) ──answer──▶ AwaitingAnswer(j > i)
//!      ▲                        │   ▲ rejected              │
//!      │                        └───┘                       ▼
//!      └──────────── cancel / clear ◀──────────────── Complete
//! ```

use super::model::{CompletedForm, FormState};
use crate::answers::Answers;
use crate::catalog;
use crate::contract::ContractType;
use crate::error::{ContractorError, Result};

/// Outcome of feeding one event into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Next question to ask.
    Prompt(String),
    /// The answer failed validation; the same question is asked again.
    Rejected { prompt: String, reason: String },
    /// Every question is answered.
    Complete(CompletedForm),
}

/// Contract type menu shown on `begin`.
pub fn type_menu() -> String {
    let mut menu = String::from("🏢 Выберите тип договора, который хотите создать:\n");
    for contract_type in ContractType::ALL {
        menu.push_str(&format!(
            "\n• {} ({})",
            contract_type.display_name(),
            contract_type.tag()
        ));
    }
    menu
}

fn reprompt(prompt: &str, reason: &str) -> String {
    format!("{}\n❌ {}", prompt, reason)
}

/// Per-conversation form state.
///
/// Owned by exactly one conversation; every method takes `&mut self`, so a
/// session advances one event at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSession {
    state: FormState,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn contract_type(&self) -> Option<ContractType> {
        match &self.state {
            FormState::AwaitingType => None,
            FormState::AwaitingAnswer { contract_type, .. } => Some(*contract_type),
            FormState::Complete(form) => Some(form.contract_type),
        }
    }

    /// Answers recorded so far (empty while awaiting a type).
    pub fn answers(&self) -> Option<&Answers> {
        match &self.state {
            FormState::AwaitingType => None,
            FormState::AwaitingAnswer { answers, .. } => Some(answers),
            FormState::Complete(form) => Some(&form.answers),
        }
    }

    /// The completed form, if every question has been answered.
    pub fn completed(&self) -> Option<&CompletedForm> {
        match &self.state {
            FormState::Complete(form) => Some(form),
            _ => None,
        }
    }

    /// Starts over: drops any progress and returns the type menu.
    pub fn begin(&mut self) -> String {
        self.state = FormState::AwaitingType;
        type_menu()
    }

    /// Picks the contract type and asks the first applicable question.
    ///
    /// `localized` tells whether the primary template carries localized
    /// placeholders; it is fixed for the rest of the session.
    pub fn select_contract_type(
        &mut self,
        contract_type: ContractType,
        localized: bool,
    ) -> Result<Step> {
        if !matches!(self.state, FormState::AwaitingType) {
            return Err(ContractorError::state(
                "Тип договора уже выбран. Используйте /cancel, чтобы начать заново",
            ));
        }

        let Some(first) = catalog::next_index(contract_type, 0, localized) else {
            let form = CompletedForm::new(contract_type, Answers::new());
            self.state = FormState::Complete(form.clone());
            return Ok(Step::Complete(form));
        };

        self.state = FormState::AwaitingAnswer {
            contract_type,
            index: first,
            answers: Answers::new(),
            localized,
        };
        Ok(Step::Prompt(Self::prompt_at(contract_type, first)?))
    }

    /// Validates and records the answer to the current question.
    pub fn answer(&mut self, raw: &str) -> Result<Step> {
        match std::mem::take(&mut self.state) {
            FormState::AwaitingAnswer {
                contract_type,
                index,
                mut answers,
                localized,
            } => {
                let Some(question) = catalog::question(contract_type, index) else {
                    self.state = FormState::AwaitingAnswer {
                        contract_type,
                        index,
                        answers,
                        localized,
                    };
                    return Err(ContractorError::internal(format!(
                        "question {} out of range for {}",
                        index, contract_type
                    )));
                };

                let value = match question.kind.validate(raw) {
                    Ok(value) => value,
                    Err(rejection) => {
                        self.state = FormState::AwaitingAnswer {
                            contract_type,
                            index,
                            answers,
                            localized,
                        };
                        return Ok(Step::Rejected {
                            prompt: reprompt(question.prompt, &rejection.reason),
                            reason: rejection.reason,
                        });
                    }
                };

                answers.insert(question.key, value);

                match catalog::next_index(contract_type, index + 1, localized) {
                    Some(next) => {
                        self.state = FormState::AwaitingAnswer {
                            contract_type,
                            index: next,
                            answers,
                            localized,
                        };
                        Ok(Step::Prompt(Self::prompt_at(contract_type, next)?))
                    }
                    None => {
                        let form = CompletedForm::new(contract_type, answers);
                        self.state = FormState::Complete(form.clone());
                        Ok(Step::Complete(form))
                    }
                }
            }
            other => {
                let err = match &other {
                    FormState::Complete(_) => ContractorError::state(
                        "Все поля уже заполнены, документы формируются",
                    ),
                    _ => ContractorError::state(
                        "Сначала выберите тип договора. Используйте /start",
                    ),
                };
                self.state = other;
                Err(err)
            }
        }
    }

    /// Drops all progress; always accepted.
    pub fn cancel(&mut self) {
        self.state = FormState::AwaitingType;
    }

    /// Resets after documents have been delivered.
    pub fn clear(&mut self) {
        self.state = FormState::AwaitingType;
    }

    fn prompt_at(contract_type: ContractType, index: usize) -> Result<String> {
        catalog::question(contract_type, index)
            .map(|q| q.prompt.to_string())
            .ok_or_else(|| ContractorError::internal("question index out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_keeps_progress() {
        let answers: Answers = [("contract_name", "ДП-1")].into_iter().collect();
        let stuck = FormState::AwaitingAnswer {
            contract_type: ContractType::Delivery,
            index: 99,
            answers: answers.clone(),
            localized: false,
        };
        let mut session = FormSession {
            state: stuck.clone(),
        };

        let err = session.answer("anything").unwrap_err();
        assert!(matches!(err, ContractorError::Internal(_)));
        assert_eq!(session.state(), &stuck);
        assert_eq!(session.answers(), Some(&answers));
    }

    const DELIVERY_ANSWERS: [&str; 9] = [
        "ДП-2025-001",
        "22.06.2025",
        "ООО Поставщик",
        "ООО Покупатель",
        "10 ноутбуков",
        "500000 руб.",
        "14 дней",
        "пеня 0.1%",
        "ИНН 1111111111, КПП 111111111",
    ];

    fn answer_all(session: &mut FormSession, answers: &[&str]) -> Step {
        let mut last = None;
        for answer in answers {
            last = Some(session.answer(answer).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn test_begin_shows_every_contract_type() {
        let mut session = FormSession::new();
        let menu = session.begin();
        for contract_type in ContractType::ALL {
            assert!(menu.contains(contract_type.tag()));
        }
    }

    #[test]
    fn test_delivery_flow_completes_with_catalog_keys_in_order() {
        let mut session = FormSession::new();
        session.begin();
        let first = session
            .select_contract_type(ContractType::Delivery, false)
            .unwrap();
        assert!(matches!(first, Step::Prompt(ref p) if p.contains("название договора")));

        let Step::Complete(form) = answer_all(&mut session, &DELIVERY_ANSWERS) else {
            panic!("delivery form should complete after nine answers");
        };

        let expected: Vec<&str> = catalog::questions(ContractType::Delivery)
            .iter()
            .filter(|q| q.applies(false))
            .map(|q| q.key)
            .collect();
        assert_eq!(form.answers.keys().collect::<Vec<_>>(), expected);
        assert_eq!(form.contract_name(), "ДП-2025-001");
        assert_eq!(session.completed(), Some(&form));
    }

    #[test]
    fn test_localized_fields_are_asked_when_enabled() {
        let mut session = FormSession::new();
        session
            .select_contract_type(ContractType::Delivery, true)
            .unwrap();
        session.answer("ДП-1").unwrap();
        let step = session.answer("SC-1").unwrap();
        assert!(matches!(step, Step::Prompt(ref p) if p.contains("ДД.ММ.ГГГГ")));
        assert_eq!(session.answers().unwrap().get("contract_name_en"), Some("SC-1"));
    }

    #[test]
    fn test_rejected_answer_keeps_state_and_appends_reason() {
        let mut session = FormSession::new();
        session
            .select_contract_type(ContractType::Agent, false)
            .unwrap();
        session.answer("АС-1").unwrap();
        let before = session.clone();

        let step = session.answer("31.13.2025").unwrap();
        let Step::Rejected { prompt, reason } = step else {
            panic!("invalid date must be rejected");
        };
        assert!(prompt.starts_with("📅 Введите дату договора"));
        assert!(prompt.ends_with(&reason));
        assert_eq!(session, before);

        let step = session.answer("31.12.2025").unwrap();
        assert!(matches!(step, Step::Prompt(_)));
        assert_eq!(session.answers().unwrap().get("contract_date"), Some("31.12.2025"));
    }

    #[test]
    fn test_cancel_then_begin_starts_empty() {
        let mut session = FormSession::new();
        session.begin();
        session
            .select_contract_type(ContractType::Delivery, false)
            .unwrap();
        session.answer("ДП-7").unwrap();
        session.answer("01.01.2025").unwrap();
        assert_eq!(session.answers().unwrap().len(), 2);

        session.cancel();
        assert_eq!(session.state(), &FormState::AwaitingType);

        session.begin();
        session
            .select_contract_type(ContractType::Delivery, false)
            .unwrap();
        assert!(session.answers().unwrap().is_empty());
    }

    #[test]
    fn test_answer_before_type_is_a_state_error() {
        let mut session = FormSession::new();
        let err = session.answer("hello").unwrap_err();
        assert!(matches!(err, ContractorError::State(_)));
        assert_eq!(session.state(), &FormState::AwaitingType);
    }

    #[test]
    fn test_type_cannot_be_changed_mid_form() {
        let mut session = FormSession::new();
        session
            .select_contract_type(ContractType::Agent, false)
            .unwrap();
        assert!(session
            .select_contract_type(ContractType::Delivery, false)
            .is_err());
        assert_eq!(session.contract_type(), Some(ContractType::Agent));
    }

    #[test]
    fn test_answer_after_completion_keeps_completed_form() {
        let mut session = FormSession::new();
        session
            .select_contract_type(ContractType::Delivery, false)
            .unwrap();
        answer_all(&mut session, &DELIVERY_ANSWERS);

        assert!(session.answer("extra").is_err());
        assert!(session.completed().is_some());

        session.clear();
        assert_eq!(session.state(), &FormState::AwaitingType);
    }
}
