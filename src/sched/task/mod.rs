//! Registro de thread lógica (estado, contabilidade, ciclo de vida)

pub mod accounting;
pub mod entity;
pub mod lifecycle;
pub mod state;

pub use crate::sys::Tid;
pub use accounting::Accounting;
pub use entity::{Entry, LogicalThread};
pub use state::ThreadState;
