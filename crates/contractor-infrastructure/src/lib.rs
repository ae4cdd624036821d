pub mod config_service;
pub mod dto;
pub mod fs_output_area;
pub mod fs_template_store;
pub mod paths;
pub mod storage;
pub mod toml_record_repository;

pub use crate::config_service::ConfigService;
pub use crate::fs_output_area::FsOutputArea;
pub use crate::fs_template_store::FsTemplateStore;
pub use crate::paths::ContractorPaths;
pub use crate::toml_record_repository::TomlContractRecordRepository;
