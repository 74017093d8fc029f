//! Entry point de novas threads lógicas
//!
//! Todo contexto criado por spawn começa aqui (é o `EntryFn` passado ao
//! backend). O argumento é o endereço da instância do scheduler.
//!
//! 1. Assume o slot ativo nesta thread real e libera o zumbi deixado por
//!    quem saiu para cá.
//! 2. Retira a função de entrada do registro ativo e a executa.
//! 3. Se a função retornar (ou entrar em pânico), faz o exit implícito.

use super::scheduler::Inner;
use crate::arch;
use std::panic::{self, AssertUnwindSafe};

pub(crate) fn thread_start(arg: usize) -> ! {
    // SAFETY: `arg` vem de `Arc::as_ptr` em `Scheduler::spawn`. A thread só
    // recebe o controle de yield/exit chamados através de um handle vivo,
    // que mantém a instância alocada.
    let inner = unsafe { &*(arg as *const Inner) };

    inner.resume();

    match inner.take_entry() {
        Some((tid, entry)) => {
            crate::utrace!("(Sched) Iniciando TID=", tid.as_u64());

            match panic::catch_unwind(AssertUnwindSafe(entry)) {
                Ok(()) => {
                    crate::utrace!("(Sched) Entrada retornou; exit implícito TID=", tid.as_u64());
                }
                Err(payload) => {
                    if arch::is_retirement(&*payload) {
                        panic::resume_unwind(payload);
                    }
                    crate::uerror!("(Sched) Pânico em thread lógica TID=", tid.as_u64());
                }
            }
        }
        None => {
            crate::uerror!("(Sched) Thread iniciada sem função de entrada");
        }
    }

    inner.exit()
}
