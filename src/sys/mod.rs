//! Definições do sistema: erros e tipos compartilhados.

pub mod error;
pub mod types;

pub use error::{Result, SchedError};
pub use types::{Priority, Tid};
