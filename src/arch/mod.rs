//! # Execution Context Primitive
//!
//! A **única** ponte entre o scheduler (lógica agnóstica) e a troca de
//! contexto real. Todo código `unsafe` dependente de plataforma fica aqui.
//!
//! ## Contrato consumido pelo scheduler
//!
//! - [`Context::entry`]: marca o contexto já em execução (a thread real que
//!   inicializou o scheduler). Não possui pilha própria.
//! - [`Context::new`]: aloca uma pilha e prepara um contexto que, na primeira
//!   vez que receber o controle, executa `entry(arg)`.
//! - [`transfer`]: salva o estado atual em `out` e restaura `inc`. Só
//!   "retorna" quando algum `transfer(_, out)` posterior retomar o chamador.
//! - [`jump`]: restaura `inc` sem salvar nada (caminho do exit).
//!
//! ## Seleção de backend
//!
//! ```text
//! x86_64 + Linux (padrão)        → x86_64::context  (global_asm!)
//! qualquer outro alvo            → hosted           (threads do SO, park/wake)
//! feature "os_threads"           → hosted
//! ```
//!
//! Os dois backends expõem exatamente a mesma API.

/// Função de entrada de um contexto novo. Nunca retorna: a thread lógica
/// termina trocando de contexto (exit) ou encerrando o processo.
pub type EntryFn = fn(usize) -> !;

#[cfg(all(target_arch = "x86_64", target_os = "linux", not(feature = "os_threads")))]
pub mod x86_64;

#[cfg(all(target_arch = "x86_64", target_os = "linux", not(feature = "os_threads")))]
pub use self::x86_64::context::{is_retirement, jump, transfer, Context};

#[cfg(not(all(target_arch = "x86_64", target_os = "linux", not(feature = "os_threads"))))]
pub mod hosted;

#[cfg(not(all(target_arch = "x86_64", target_os = "linux", not(feature = "os_threads"))))]
pub use self::hosted::{is_retirement, jump, transfer, Context};

/// Nome do backend compilado (diagnóstico)
pub const BACKEND: &str = if cfg!(all(
    target_arch = "x86_64",
    target_os = "linux",
    not(feature = "os_threads")
)) {
    "x86_64-asm"
} else {
    "hosted-os-threads"
};
