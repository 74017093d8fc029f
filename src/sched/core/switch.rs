//! Lógica de Troca de Contexto
//!
//! Última etapa de yield/exit, depois que o estado já foi atualizado e o
//! lock liberado. Só aqui o scheduler chama o backend de `arch`.

use crate::arch::{self, Context};
use crate::sys::Tid;

/// Salva a thread atual em `out` e retoma `inc`.
///
/// Retorna quando a thread atual for escalonada de novo.
///
/// # Safety
/// - `out` e `inc` apontam para contextos vivos, em Box, de registros
///   guardados no estado do scheduler
/// - O lock do scheduler NÃO pode estar adquirido
pub(super) unsafe fn switch_to(from: Tid, to: Tid, out: *mut Context, inc: *const Context) {
    crate::utrace!("(Sched) Saindo de TID=", from.as_u64());
    crate::utrace!("(Sched) Mudando para TID=", to.as_u64());
    arch::transfer(out, inc);
}

/// Retoma `inc` abandonando a pilha atual (exit). Não retorna.
///
/// # Safety
/// Mesmas regras de [`switch_to`] para `inc`. O registro de `from` já deve
/// estar no slot de zumbi.
pub(super) unsafe fn jump_to(from: Tid, to: Tid, inc: *const Context) -> ! {
    crate::utrace!("(Sched) exit de TID=", from.as_u64());
    crate::utrace!("(Sched) Saltando para TID=", to.as_u64());
    arch::jump(inc)
}
