//! Form use case implementation.
//!
//! `FormUseCase` turns transport events (start, type choice, free text,
//! cancel) into replies. It owns the per-user sessions and coordinates the
//! template store, the document assembler and the record repository.

use crate::session::SessionCache;
use chrono::{Local, NaiveDateTime};
use contractor_core::catalog;
use contractor_core::contract::{ContractType, DocumentRole};
use contractor_core::document::{DocumentAssembler, OutputArea, StoredDocument};
use contractor_core::error::{ContractorError, Result};
use contractor_core::record::ContractRecordRepository;
use contractor_core::session::{CompletedForm, FormSession, Step};
use contractor_core::template::{PlaceholderStyle, TemplateStore};
use std::fmt::Write as _;
use std::sync::Arc;

/// How many records "my contracts" shows.
pub const MY_CONTRACTS_LIMIT: usize = 10;

pub const HELP_TEXT: &str = "\
🤖 Помощь по использованию

📋 Основные команды:
/start - Начать создание договора
/type <agent|subagent|delivery> - Выбрать тип договора
/cancel - Отменить текущий процесс
/my - Показать мои договоры
/help - Показать эту справку

📝 Типы договоров:
• Агентское соглашение (+ поручение и акт отчета)
• Субагентское соглашение (+ поручение и акт отчета)
• Договор поставки

💡 Советы:
• Вводите даты в формате ДД.ММ.ГГГГ
• Заполняйте все поля подробно
• Используйте /cancel для отмены в любой момент";

const CANCELLED_TEXT: &str = "❌ Процесс заполнения отменен. Начните заново с /start";

/// What the transport should show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to display: a question, a re-prompt, a menu or an info message.
    Prompt(String),
    /// Generated documents, primary first.
    Documents(Vec<StoredDocument>),
    /// The event failed; the text is safe to show.
    Error(String),
}

/// Use case for conversational contract filling.
///
/// # Error policy
///
/// - Validation failure: the same question is asked again
/// - Missing primary template or record store failure: `Reply::Error`, the
///   session stays complete so any further text retries generation
/// - Unknown contract type: `Reply::Error`, the session is reset
pub struct FormUseCase {
    sessions: Arc<SessionCache>,
    templates: Arc<dyn TemplateStore>,
    records: Arc<dyn ContractRecordRepository>,
    assembler: DocumentAssembler,
}

impl FormUseCase {
    /// Creates a new `FormUseCase`.
    ///
    /// # Arguments
    ///
    /// * `templates` - Template store used for rendering and localization detection
    /// * `output` - Where generated documents are written
    /// * `records` - Repository for completed answer sets
    /// * `style` - Placeholder spelling used by the templates
    /// * `extension` - Extension of generated files
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        output: Arc<dyn OutputArea>,
        records: Arc<dyn ContractRecordRepository>,
        style: PlaceholderStyle,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionCache::new()),
            assembler: DocumentAssembler::new(templates.clone(), output, style, extension),
            templates,
            records,
        }
    }

    pub fn sessions(&self) -> &SessionCache {
        &self.sessions
    }

    /// Drops any progress and shows the contract type menu.
    pub async fn begin(&self, user_id: i64) -> Reply {
        let session = self.sessions.get_or_create(user_id).await;
        let menu = session.lock().await.begin();
        tracing::debug!(user_id, "Form started");
        Reply::Prompt(menu)
    }

    /// Picks the contract type by tag and asks the first question.
    pub async fn select_type(&self, user_id: i64, tag: &str) -> Reply {
        let session = self.sessions.get_or_create(user_id).await;
        let mut session = session.lock().await;

        let contract_type: ContractType = match tag.parse() {
            Ok(contract_type) => contract_type,
            Err(e) => {
                session.cancel();
                tracing::warn!(user_id, tag, "Unknown contract type");
                return Reply::Error(e.to_string());
            }
        };

        let localized = match self.detect_localized(contract_type).await {
            Ok(localized) => localized,
            Err(e) => {
                tracing::error!(user_id, "Failed to read template: {}", e);
                return Reply::Error(e.to_string());
            }
        };

        let step = match session.select_contract_type(contract_type, localized) {
            Ok(step) => step,
            Err(e) => return Reply::Error(e.to_string()),
        };
        tracing::info!(
            user_id,
            contract_type = %contract_type,
            localized,
            "Contract type selected"
        );

        match step {
            Step::Complete(form) => self.generate(user_id, &mut session, form).await,
            Step::Prompt(prompt) | Step::Rejected { prompt, .. } => Reply::Prompt(prompt),
        }
    }

    /// Feeds free text into the session.
    ///
    /// In a completed session the text only triggers another generation
    /// attempt.
    pub async fn answer(&self, user_id: i64, text: &str) -> Reply {
        let session = self.sessions.get_or_create(user_id).await;
        let mut session = session.lock().await;

        if let Some(form) = session.completed().cloned() {
            tracing::info!(user_id, "Retrying document generation");
            return self.generate(user_id, &mut session, form).await;
        }

        match session.answer(text) {
            Ok(Step::Complete(form)) => {
                tracing::info!(user_id, contract_type = %form.contract_type, "Form completed");
                self.generate(user_id, &mut session, form).await
            }
            Ok(Step::Rejected { prompt, reason }) => {
                tracing::warn!(user_id, reason = %reason, "Answer rejected");
                Reply::Prompt(prompt)
            }
            Ok(Step::Prompt(prompt)) => Reply::Prompt(prompt),
            Err(e) => Reply::Error(e.to_string()),
        }
    }

    /// Drops all progress; always accepted.
    pub async fn cancel(&self, user_id: i64) -> Reply {
        if let Some(session) = self.sessions.get(user_id).await {
            session.lock().await.cancel();
        }
        tracing::debug!(user_id, "Form cancelled");
        Reply::Prompt(CANCELLED_TEXT.to_string())
    }

    /// Lists the user's newest records.
    pub async fn my_contracts(&self, user_id: i64) -> Reply {
        let summaries = match self.records.list_for_user(user_id).await {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::error!(user_id, "Failed to list records: {}", e);
                return Reply::Error(e.to_string());
            }
        };

        if summaries.is_empty() {
            return Reply::Prompt("📋 У вас пока нет созданных договоров.".to_string());
        }

        let mut text = String::from("📋 Ваши договоры:\n");
        for summary in summaries.iter().take(MY_CONTRACTS_LIMIT) {
            let _ = write!(
                text,
                "\n• {} ({})\n  Создан: {}\n",
                summary.contract_name,
                summary.contract_type.tag(),
                summary
                    .created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            );
        }
        Reply::Prompt(text)
    }

    pub fn help(&self) -> Reply {
        Reply::Prompt(HELP_TEXT.to_string())
    }

    async fn detect_localized(&self, contract_type: ContractType) -> Result<bool> {
        let primary_id = contract_type.template_id(DocumentRole::Primary);
        Ok(self
            .templates
            .load(&primary_id)
            .await?
            .map(|text| catalog::has_localized_placeholders(&text, self.assembler.style()))
            .unwrap_or(false))
    }

    async fn generate(
        &self,
        user_id: i64,
        session: &mut FormSession,
        form: CompletedForm,
    ) -> Reply {
        match self.generate_at(user_id, &form, Local::now().naive_local()).await {
            Ok(documents) => {
                session.clear();
                Reply::Documents(documents)
            }
            Err(e) => Reply::Error(e.to_string()),
        }
    }

    /// Writes the documents, then saves the record. A failed save discards
    /// the documents already written.
    async fn generate_at(
        &self,
        user_id: i64,
        form: &CompletedForm,
        timestamp: NaiveDateTime,
    ) -> Result<Vec<StoredDocument>> {
        let documents = self.assembler.assemble(form, timestamp).await.map_err(|e| {
            tracing::error!(user_id, "Document generation failed: {}", e);
            e
        })?;

        if let Err(e) = self
            .records
            .save(user_id, form.contract_type, form.contract_name(), &form.answers)
            .await
        {
            tracing::error!(user_id, "Failed to save contract record: {}", e);
            self.assembler.discard(&documents).await;
            return Err(ContractorError::data_access(format!(
                "Не удалось сохранить договор: {}",
                e
            )));
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contractor_core::answers::Answers;
    use contractor_core::record::{ContractRecord, ContractSummary};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    // Mock TemplateStore for testing
    struct MockTemplateStore {
        templates: HashMap<String, String>,
    }

    #[async_trait]
    impl TemplateStore for MockTemplateStore {
        async fn load(&self, template_id: &str) -> Result<Option<String>> {
            Ok(self.templates.get(template_id).cloned())
        }

        async fn list(&self) -> Result<Vec<String>> {
            Ok(self.templates.keys().cloned().collect())
        }
    }

    // Mock OutputArea for testing
    #[derive(Default)]
    struct MockOutputArea {
        files: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl OutputArea for MockOutputArea {
        async fn write(&self, file_name: &str, content: &str) -> Result<String> {
            let location = format!("out/{}", file_name);
            self.files
                .lock()
                .unwrap()
                .insert(location.clone(), content.to_string());
            Ok(location)
        }

        async fn discard(&self, location: &str) -> Result<()> {
            self.files.lock().unwrap().remove(location);
            Ok(())
        }

        async fn clear(&self) -> Result<usize> {
            let mut files = self.files.lock().unwrap();
            let count = files.len();
            files.clear();
            Ok(count)
        }
    }

    // Mock ContractRecordRepository that can be switched to fail
    #[derive(Default)]
    struct MockRecordRepository {
        saved: Mutex<Vec<(i64, ContractType, String)>>,
        failing: AtomicBool,
    }

    #[async_trait]
    impl ContractRecordRepository for MockRecordRepository {
        async fn save(
            &self,
            user_id: i64,
            contract_type: ContractType,
            contract_name: &str,
            _answers: &Answers,
        ) -> Result<u64> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ContractorError::data_access("database is locked"));
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push((user_id, contract_type, contract_name.to_string()));
            Ok(saved.len() as u64)
        }

        async fn list_for_user(&self, _user_id: i64) -> Result<Vec<ContractSummary>> {
            Ok(Vec::new())
        }

        async fn get(&self, _record_id: u64, _user_id: i64) -> Result<Option<Answers>> {
            Ok(None)
        }

        async fn list_all(&self) -> Result<Vec<ContractRecord>> {
            Ok(Vec::new())
        }
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

    fn setup(
        templates: &[(&str, &str)],
    ) -> (FormUseCase, Arc<MockOutputArea>, Arc<MockRecordRepository>) {
        let store = Arc::new(MockTemplateStore {
            templates: templates
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect(),
        });
        let output = Arc::new(MockOutputArea::default());
        let records = Arc::new(MockRecordRepository::default());
        let usecase = FormUseCase::new(
            store,
            output.clone(),
            records.clone(),
            PlaceholderStyle::DoubleBraceUpper,
            "txt",
        );
        (usecase, output, records)
    }

    async fn fill_delivery(usecase: &FormUseCase, user_id: i64) -> Reply {
        usecase.begin(user_id).await;
        usecase.select_type(user_id, "delivery").await;
        let mut last = Reply::Error(String::new());
        for answer in DELIVERY_ANSWERS {
            last = usecase.answer(user_id, answer).await;
        }
        last
    }

    #[tokio::test]
    async fn test_store_failure_discards_documents_and_allows_retry() {
        let (usecase, output, records) =
            setup(&[("delivery_template", "Договор {{CONTRACT_NAME}}")]);
        records.failing.store(true, Ordering::SeqCst);

        let reply = fill_delivery(&usecase, 1).await;
        assert!(matches!(reply, Reply::Error(ref text) if text.contains("database is locked")));
        assert!(output.files.lock().unwrap().is_empty());

        records.failing.store(false, Ordering::SeqCst);
        let Reply::Documents(documents) = usecase.answer(1, "ещё раз").await else {
            panic!("retry should generate documents");
        };
        assert_eq!(documents.len(), 1);
        assert_eq!(records.saved.lock().unwrap().len(), 1);

        // Session is reset after delivery.
        assert!(matches!(usecase.answer(1, "x").await, Reply::Error(_)));
    }

    #[tokio::test]
    async fn test_unknown_type_resets_session() {
        let (usecase, _output, _records) = setup(&[]);
        usecase.select_type(5, "agent").await;

        let reply = usecase.select_type(5, "lease").await;
        assert!(matches!(reply, Reply::Error(ref text) if text.contains("lease")));

        let session = usecase.sessions().get(5).await.unwrap();
        assert_eq!(session.lock().await.contract_type(), None);
    }

    #[tokio::test]
    async fn test_localized_questions_follow_primary_template() {
        let (usecase, _output, _records) = setup(&[(
            "delivery_template",
            "{{CONTRACT_NAME}} / {{CONTRACT_NAME_EN}}",
        )]);

        usecase.select_type(3, "delivery").await;
        let reply = usecase.answer(3, "ДП-1").await;
        assert!(matches!(reply, Reply::Prompt(ref p) if p.contains("англ")));
    }

    #[tokio::test]
    async fn test_help_and_empty_contract_list() {
        let (usecase, _output, _records) = setup(&[]);
        assert!(matches!(usecase.help(), Reply::Prompt(ref t) if t.contains("/cancel")));
        assert!(matches!(
            usecase.my_contracts(1).await,
            Reply::Prompt(ref t) if t.contains("нет созданных")
        ));
    }
}
