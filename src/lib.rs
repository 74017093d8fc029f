//! uthread: escalonador cooperativo de threads de usuário.
//!
//! Ponto central de exportação dos módulos da biblioteca.
//!
//! ```text
//! api     → facade global (system_init / create / yield_now / exit)
//! sched   → anel de prontas, spawn / yield / exit, registro de thread
//! arch    → troca de contexto (x86_64 asm ou threads do SO)
//! sync    → spinlock que guarda o estado do scheduler
//! sys     → erros e tipos fundamentais
//! log     → macros de log com custo zero quando desligadas
//! ```

// --- Infraestrutura ---
pub mod log; // Macros uerror!/uwarn!/uinfo!/udebug!/utrace!
pub mod sys; // Erros e tipos (Tid, Priority)

// --- Baixo nível ---
pub mod arch; // Contexto de execução e pilhas
pub mod sync; // Guard de exclusão mútua

// --- Scheduler ---
pub mod api;
pub mod sched;

pub use crate::sched::{Accounting, SchedConfig, Scheduler};
pub use crate::sys::{Priority, Result, SchedError, Tid};
