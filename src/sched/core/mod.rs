//! Núcleo do scheduler
//!
//! - `runqueue`: anel de threads prontas e a política de seleção
//! - `scheduler`: spawn / yield / exit e o handle [`Scheduler`]
//! - `switch`: ponte com o backend de contexto
//! - `entry`: trampolim de início das threads lógicas
//! - `debug`: dump do estado

pub mod debug;
pub mod runqueue;
pub mod scheduler;

mod entry;
mod switch;

pub use runqueue::ReadyRegistry;
pub use scheduler::{SchedState, Scheduler};
