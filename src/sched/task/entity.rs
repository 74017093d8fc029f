//! Logical Thread Control Block

use super::accounting::Accounting;
use super::state::ThreadState;
use crate::arch::Context;
use crate::sched::config::ENTRY_PRIORITY;
use crate::sys::{Priority, Tid};
use core::fmt;

/// Função de entrada de uma thread lógica (sem argumentos)
pub type Entry = Box<dyn FnOnce() + Send + 'static>;

/// Thread lógica (user-level thread)
pub struct LogicalThread {
    /// ID único na instância
    pub tid: Tid,
    /// Prioridade (menor = roda antes)
    pub priority: Priority,
    /// Estado atual
    pub state: ThreadState,
    /// Código a executar; consumido na primeira vez que a thread roda
    pub entry: Option<Entry>,
    /// Contexto salvo (dono da pilha)
    pub context: Context,
    /// Estatísticas
    pub accounting: Accounting,
}

impl LogicalThread {
    /// Nova thread pronta, ainda não iniciada
    pub fn new(tid: Tid, priority: Priority, entry: Entry, context: Context) -> Self {
        Self {
            tid,
            priority,
            state: ThreadState::Ready,
            entry: Some(entry),
            context,
            accounting: Accounting::new(),
        }
    }

    /// Registro do contexto que inicializou o scheduler. Já está ativo.
    pub fn entry_record() -> Self {
        Self {
            tid: Tid::ENTRY,
            priority: ENTRY_PRIORITY,
            state: ThreadState::Active,
            entry: None,
            context: Context::entry(),
            accounting: Accounting::new(),
        }
    }

    /// Marca como pronta
    pub fn set_ready(&mut self) {
        self.state = ThreadState::Ready;
    }

    /// Marca como ativa e contabiliza o despacho
    pub fn set_active(&mut self) {
        self.state = ThreadState::Active;
        self.accounting.account_dispatch();
    }

    /// Marca como zumbi
    pub fn set_zombie(&mut self) {
        self.state = ThreadState::Zombie;
    }
}

impl fmt::Debug for LogicalThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalThread")
            .field("tid", &self.tid)
            .field("priority", &self.priority)
            .field("state", &self.state)
            .field("started", &self.entry.is_none())
            .field("accounting", &self.accounting)
            .finish()
    }
}
