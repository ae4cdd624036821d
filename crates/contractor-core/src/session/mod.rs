//! Form session domain module.
//!
//! This module contains the per-conversation form state machine and the
//! values it emits.
//!
//! # Module Structure
//!
//! - `model`: Form state and completed form (`FormState`, `CompletedForm`)
//! - `machine`: Transitions (`FormSession`, `Step`)

mod machine;
mod model;

pub use machine::{FormSession, Step, type_menu};
pub use model::{CompletedForm, FormState};
