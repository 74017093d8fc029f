//! # Scheduler de Threads Lógicas
//!
//! Multiplexa várias threads lógicas (user-level threads) sobre a thread
//! real que inicializou o scheduler. Modelo many-to-one, cooperativo e por
//! prioridade: o menor valor numérico roda primeiro; empates vão para quem
//! está pronto há mais tempo.
//!
//! ## Estrutura
//! - `config`: tamanho de pilha e constantes
//! - `task`: o registro de uma thread lógica e seu ciclo de vida
//! - `core`: anel de prontas, spawn / yield / exit, troca de contexto

pub mod config;
pub mod core;
pub mod task;

pub use self::config::SchedConfig;
pub use self::core::{ReadyRegistry, Scheduler};
pub use self::task::{Accounting, LogicalThread, ThreadState};
