//! # Diagnóstico
//!
//! Macros de log por nível (`uerror!`, `uwarn!`, `uinfo!`, `udebug!`,
//! `utrace!`) selecionadas em tempo de compilação pelas features do Cargo,
//! e o console (stderr) onde elas escrevem.

pub mod logging;
pub mod console;
