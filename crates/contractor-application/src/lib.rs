//! Application layer for Contractor.
//!
//! Use cases that drive form sessions, document generation and record
//! persistence on behalf of a transport (REPL, chat bot, ...).

pub mod admin_service;
pub mod factory;
pub mod form_usecase;
pub mod session;

pub use admin_service::{AdminService, ContractStats};
pub use factory::ContractorServices;
pub use form_usecase::{FormUseCase, HELP_TEXT, Reply};
pub use session::SessionCache;
