//! Wiring of use cases from configuration.

use crate::admin_service::AdminService;
use crate::form_usecase::FormUseCase;
use contractor_core::config::ContractorConfig;
use contractor_core::document::OutputArea;
use contractor_core::record::ContractRecordRepository;
use contractor_core::template::TemplateStore;
use contractor_infrastructure::{FsOutputArea, FsTemplateStore, TomlContractRecordRepository};
use std::sync::Arc;

/// Use cases sharing one set of filesystem collaborators.
pub struct ContractorServices {
    pub forms: FormUseCase,
    pub admin: AdminService,
}

impl ContractorServices {
    /// Builds the services from a resolved configuration.
    pub fn from_config(config: &ContractorConfig) -> Self {
        let templates: Arc<dyn TemplateStore> = Arc::new(FsTemplateStore::new(
            config.templates_dir.clone(),
            config.template_extension.clone(),
        ));
        let output: Arc<dyn OutputArea> = Arc::new(FsOutputArea::new(config.output_dir.clone()));
        let records: Arc<dyn ContractRecordRepository> = Arc::new(
            TomlContractRecordRepository::new(
                config.records_file.clone(),
                config.record_write_policy,
            ),
        );

        Self {
            forms: FormUseCase::new(
                templates.clone(),
                output.clone(),
                records.clone(),
                config.placeholder_style,
                config.template_extension.clone(),
            ),
            admin: AdminService::new(config.clone(), records, templates, output),
        }
    }
}
