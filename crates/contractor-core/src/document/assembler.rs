//! Renders the document set for a completed form.

use super::model::{RenderedDocument, StoredDocument};
use super::output::OutputArea;
use crate::contract::{ContractType, DocumentRole};
use crate::error::{ContractorError, Result};
use crate::session::CompletedForm;
use crate::template::{PlaceholderStyle, TemplateStore, render_text};
use chrono::NaiveDateTime;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Makes a user-provided name safe for use inside a file name.
///
/// Whitespace becomes `_`; path separators and characters rejected by common
/// file systems are dropped.
pub fn sanitize_file_component(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "contract".to_string()
    } else {
        sanitized
    }
}

/// `{type}_{name}_{ts}.{ext}` for the primary document,
/// `{type}_{role}_{name}_{ts}.{ext}` for satellites.
pub fn document_file_name(
    contract_type: ContractType,
    role: DocumentRole,
    contract_name: &str,
    timestamp: NaiveDateTime,
    extension: &str,
) -> String {
    let name = sanitize_file_component(contract_name);
    let ts = timestamp.format(TIMESTAMP_FORMAT);
    match role.suffix() {
        None => format!("{}_{}_{}.{}", contract_type.tag(), name, ts, extension),
        Some(suffix) => format!(
            "{}_{}_{}_{}.{}",
            contract_type.tag(),
            suffix,
            name,
            ts,
            extension
        ),
    }
}

/// Renders the primary document and any satellites of a completed form.
pub struct DocumentAssembler {
    templates: Arc<dyn TemplateStore>,
    output: Arc<dyn OutputArea>,
    style: PlaceholderStyle,
    extension: String,
}

impl DocumentAssembler {
    /// Creates an assembler.
    ///
    /// # Arguments
    ///
    /// * `templates` - Where templates are read from
    /// * `output` - Where rendered documents are written
    /// * `style` - Placeholder spelling used by the templates
    /// * `extension` - Extension of generated files (without the dot)
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        output: Arc<dyn OutputArea>,
        style: PlaceholderStyle,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            templates,
            output,
            style,
            extension: extension.into(),
        }
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Renders every applicable template in memory.
    ///
    /// The primary template is mandatory. Satellites are rendered in
    /// declaration order when their template exists and skipped otherwise.
    pub async fn render(
        &self,
        form: &CompletedForm,
        timestamp: NaiveDateTime,
    ) -> Result<Vec<RenderedDocument>> {
        let contract_type = form.contract_type;
        let primary_id = contract_type.template_id(DocumentRole::Primary);
        let primary = self
            .templates
            .load(&primary_id)
            .await?
            .ok_or_else(|| ContractorError::template_not_found(&primary_id))?;

        let mut documents = vec![self.render_one(
            form,
            DocumentRole::Primary,
            primary_id,
            &primary,
            timestamp,
        )?];

        for role in contract_type.satellites() {
            let template_id = contract_type.template_id(*role);
            match self.templates.load(&template_id).await? {
                Some(text) => {
                    documents.push(self.render_one(form, *role, template_id, &text, timestamp)?);
                }
                None => {
                    tracing::warn!(
                        template_id = %template_id,
                        "Satellite template missing, skipping"
                    );
                }
            }
        }

        Ok(documents)
    }

    /// Renders and writes the document set, primary first.
    ///
    /// If a write fails, documents written earlier in the same call are
    /// discarded before the error is returned.
    pub async fn assemble(
        &self,
        form: &CompletedForm,
        timestamp: NaiveDateTime,
    ) -> Result<Vec<StoredDocument>> {
        let rendered = self.render(form, timestamp).await?;
        let mut stored = Vec::with_capacity(rendered.len());

        for document in rendered {
            match self.output.write(&document.file_name, &document.content).await {
                Ok(location) => stored.push(StoredDocument {
                    role: document.role,
                    location,
                }),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        tracing::info!(
            contract_type = %form.contract_type,
            count = stored.len(),
            "Documents generated"
        );
        Ok(stored)
    }

    /// Removes written documents, logging failures instead of returning them.
    pub async fn discard(&self, documents: &[StoredDocument]) {
        for document in documents {
            if let Err(e) = self.output.discard(&document.location).await {
                tracing::warn!(location = %document.location, "Failed to discard document: {}", e);
            }
        }
    }

    fn render_one(
        &self,
        form: &CompletedForm,
        role: DocumentRole,
        template_id: String,
        text: &str,
        timestamp: NaiveDateTime,
    ) -> Result<RenderedDocument> {
        Ok(RenderedDocument {
            role,
            file_name: document_file_name(
                form.contract_type,
                role,
                form.contract_name(),
                timestamp,
                &self.extension,
            ),
            template_id,
            content: render_text(text, &form.answers, self.style)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answers;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock TemplateStore for testing
    struct MockTemplateStore {
        templates: HashMap<String, String>,
    }

    impl MockTemplateStore {
        fn with(templates: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                templates: templates
                    .iter()
                    .map(|(id, text)| (id.to_string(), text.to_string()))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl TemplateStore for MockTemplateStore {
        async fn load(&self, template_id: &str) -> Result<Option<String>> {
            Ok(self.templates.get(template_id).cloned())
        }

        async fn list(&self) -> Result<Vec<String>> {
            let mut names: Vec<String> = self.templates.keys().cloned().collect();
            names.sort();
            Ok(names)
        }
    }

    // Mock OutputArea for testing
    #[derive(Default)]
    struct MockOutputArea {
        files: Mutex<HashMap<String, String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl OutputArea for MockOutputArea {
        async fn write(&self, file_name: &str, content: &str) -> Result<String> {
            if self.fail_on.as_deref() == Some(file_name) {
                return Err(ContractorError::io("disk full"));
            }
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

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 22)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn agent_form() -> CompletedForm {
        let answers: Answers = [
            ("contract_name", "АС 2025/001"),
            ("agent_name", "ООО Агент"),
            ("assignment_details", "Поиск клиентов"),
        ]
        .into_iter()
        .collect();
        CompletedForm::new(ContractType::Agent, answers)
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            document_file_name(
                ContractType::Agent,
                DocumentRole::Primary,
                "АС 2025/001",
                timestamp(),
                "txt"
            ),
            "agent_АС_2025001_20250622_103000.txt"
        );
        assert_eq!(
            document_file_name(
                ContractType::Agent,
                DocumentRole::Report,
                "x",
                timestamp(),
                "txt"
            ),
            "agent_report_x_20250622_103000.txt"
        );
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize_file_component("  "), "contract");
        assert_eq!(sanitize_file_component("../.."), "contract");
    }

    #[tokio::test]
    async fn test_agent_renders_primary_then_satellites() {
        let templates = MockTemplateStore::with(&[
            ("agent_template", "Договор {{CONTRACT_NAME}} с {{AGENT_NAME}}"),
            ("agent_assignment_template", "Поручение: {{ASSIGNMENT_DETAILS}}"),
            ("agent_report_template", "Отчет по {{CONTRACT_NAME}}"),
        ]);
        let output = Arc::new(MockOutputArea::default());
        let assembler = DocumentAssembler::new(
            templates,
            output.clone(),
            PlaceholderStyle::DoubleBraceUpper,
            "txt",
        );

        let stored = assembler.assemble(&agent_form(), timestamp()).await.unwrap();

        let roles: Vec<_> = stored.iter().map(|d| d.role).collect();
        assert_eq!(
            roles,
            vec![DocumentRole::Primary, DocumentRole::Assignment, DocumentRole::Report]
        );
        let files = output.files.lock().unwrap();
        assert_eq!(
            files[&stored[0].location],
            "Договор АС 2025/001 с ООО Агент"
        );
        assert_eq!(files[&stored[1].location], "Поручение: Поиск клиентов");
    }

    #[tokio::test]
    async fn test_missing_satellite_is_skipped() {
        let templates = MockTemplateStore::with(&[
            ("agent_template", "{{AGENT_NAME}}"),
            ("agent_report_template", "{{AGENT_NAME}}"),
        ]);
        let assembler = DocumentAssembler::new(
            templates,
            Arc::new(MockOutputArea::default()),
            PlaceholderStyle::DoubleBraceUpper,
            "txt",
        );

        let rendered = assembler.render(&agent_form(), timestamp()).await.unwrap();
        let roles: Vec<_> = rendered.iter().map(|d| d.role).collect();
        assert_eq!(roles, vec![DocumentRole::Primary, DocumentRole::Report]);
    }

    #[tokio::test]
    async fn test_missing_primary_aborts() {
        let templates = MockTemplateStore::with(&[("agent_report_template", "x")]);
        let output = Arc::new(MockOutputArea::default());
        let assembler = DocumentAssembler::new(
            templates,
            output.clone(),
            PlaceholderStyle::DoubleBraceUpper,
            "txt",
        );

        let err = assembler
            .assemble(&agent_form(), timestamp())
            .await
            .unwrap_err();
        assert!(err.is_template_not_found());
        assert!(output.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_discards_earlier_documents() {
        let templates = MockTemplateStore::with(&[
            ("agent_template", "a"),
            ("agent_assignment_template", "b"),
        ]);
        let output = Arc::new(MockOutputArea {
            fail_on: Some("agent_assignment_АС_2025001_20250622_103000.txt".to_string()),
            ..Default::default()
        });
        let assembler = DocumentAssembler::new(
            templates,
            output.clone(),
            PlaceholderStyle::DoubleBraceUpper,
            "txt",
        );

        assert!(assembler.assemble(&agent_form(), timestamp()).await.is_err());
        assert!(output.files.lock().unwrap().is_empty());
    }
}
