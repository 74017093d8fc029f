//! # Orquestrador de Agendamento
//!
//! Decide quem ocupa a (única) thread real e coordena a passagem do registro
//! ativo entre o anel de prontas, o slot ativo e o slot de zumbi.
//!
//! ## Mecanismo de execução
//! Puramente cooperativo: o controle só muda de mãos dentro de
//! [`Scheduler::yield_now`] e [`Scheduler::exit`]. Não há timer nem
//! preempção; uma thread que nunca cede trava todas as outras.
//!
//! ## Sincronização
//! Todo o estado vive atrás de um único [`Spinlock`]. O guard é SEMPRE
//! liberado antes da troca de contexto: quem retoma precisa conseguir
//! adquiri-lo de novo.
//!
//! ## Chamador
//! `yield_now` e `exit` só valem na thread real que executa o registro
//! ativo. O estado guarda o `ThreadId` dela, atualizado a cada retomada;
//! chamadas vindas de outra thread real são recusadas com
//! [`SchedError::NotActive`] sem tocar no estado.
//!
//! ## Ownership
//! Um `Box<LogicalThread>` tem exatamente um dono por vez:
//!
//! ```text
//!   spawn ──► ready ──(seleção)──► active ──(yield)──► ready
//!                                    │
//!                                    └──(exit)──► zombie ──(reap)──► liberado
//! ```

use super::entry;
use super::runqueue::ReadyRegistry;
use super::switch;
use crate::arch::Context;
use crate::sched::config::SchedConfig;
use crate::sched::task::{lifecycle, Accounting, LogicalThread};
use crate::sync::{Spinlock, SpinlockGuard};
use crate::sys::{Priority, Result, SchedError, Tid};
use core::ptr::{addr_of, addr_of_mut};
use core::sync::atomic::{AtomicU64, Ordering};
use std::io::Write;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// Estado protegido pelo lock
#[derive(Debug)]
pub struct SchedState {
    /// Threads prontas
    pub ready: ReadyRegistry,
    /// Thread em execução (fora do anel)
    pub active: Option<Box<LogicalThread>>,
    /// Última thread que saiu, esperando quem retomar liberar a pilha
    pub zombie: Option<Box<LogicalThread>>,
    /// Thread real que executa o registro ativo
    running_on: ThreadId,
}

impl SchedState {
    fn new(entry: Box<LogicalThread>) -> Self {
        Self {
            ready: ReadyRegistry::new(),
            active: Some(entry),
            zombie: None,
            running_on: thread::current().id(),
        }
    }

    /// Recusa chamadas de uma thread real que não executa o registro ativo
    fn check_caller(&self) -> Result<()> {
        if self.running_on == thread::current().id() {
            Ok(())
        } else {
            Err(SchedError::NotActive)
        }
    }

    /// Procura um registro em qualquer um dos três lugares
    pub fn find(&self, tid: Tid) -> Option<&LogicalThread> {
        self.active
            .as_deref()
            .filter(|t| t.tid == tid)
            .or_else(|| self.ready.iter().find(|t| t.tid == tid))
            .or_else(|| self.zombie.as_deref().filter(|t| t.tid == tid))
    }

    /// Libera prontas e zumbi. O registro ativo é liberado só se não for
    /// dono da pilha em uso; caso contrário é vazado de propósito.
    fn teardown(&mut self) -> usize {
        let mut released = self.ready.teardown();
        if lifecycle::reap(&mut self.zombie) {
            released += 1;
        }
        if let Some(active) = self.active.take() {
            if active.context.owns_stack() {
                crate::utrace!("(Sched) Pilha da thread ativa vazada TID=", active.tid.as_u64());
                core::mem::forget(active);
            } else {
                released += 1;
            }
        }
        released
    }
}

/// Instância compartilhada. Threads lógicas recebem um ponteiro cru para ela
/// (ver [`entry::thread_start`]).
pub(crate) struct Inner {
    state: Spinlock<SchedState>,
    config: SchedConfig,
    next_tid: AtomicU64,
}

impl Inner {
    /// Thread ativa; sua ausência significa estado corrompido.
    fn take_active(&self, state: &mut SpinlockGuard<'_, SchedState>) -> Box<LogicalThread> {
        match state.active.take() {
            Some(active) => active,
            None => {
                crate::uerror!("(Sched) Nenhuma thread ativa registrada!");
                panic!("uthread: slot ativo vazio durante troca de contexto");
            }
        }
    }

    pub(crate) fn yield_now(&self, priority: Priority) -> Result<()> {
        let mut state = self.state.lock();

        if let Err(e) = state.check_caller() {
            crate::uwarn!("(Sched) yield recusado: chamador não é a thread ativa");
            return Err(e);
        }

        if state.ready.is_empty() {
            crate::utrace!("(Sched) yield sem threads prontas");
            return Err(SchedError::NoReadyThreads);
        }

        let mut current = self.take_active(&mut state);
        current.priority = priority;

        let mut next = match state.ready.select_and_remove_highest_priority() {
            Some(next) => next,
            None => unreachable!("anel não vazio sem seleção"),
        };

        let from = current.tid;
        let to = next.tid;
        let out: *mut Context = addr_of_mut!(current.context);
        let inc: *const Context = addr_of!(next.context);

        crate::utrace!("(Sched) yield, prioridade nova=", priority);
        current.accounting.account_yield();
        state.ready.insert(current);
        next.set_active();
        state.active = Some(next);
        drop(state);

        // SAFETY: os dois contextos estão em Box (endereço estável) guardados
        // no estado; nada roda entre o drop do guard e a troca.
        unsafe { switch::switch_to(from, to, out, inc) };

        // Retomado: alguém fez yield ou exit para cá
        self.resume();
        Ok(())
    }

    pub(crate) fn exit(&self) -> ! {
        let mut state = self.state.lock();

        if let Err(e) = state.check_caller() {
            drop(state);
            crate::uerror!("(Sched) exit recusado: chamador não é a thread ativa");
            panic!("uthread: {e}");
        }

        let Some(mut next) = state.ready.select_and_remove_highest_priority() else {
            self.terminate(state)
        };

        let current = self.take_active(&mut state);
        let from = current.tid;
        lifecycle::bury(&mut state.zombie, current);

        let to = next.tid;
        let inc: *const Context = addr_of!(next.context);
        next.set_active();
        state.active = Some(next);
        drop(state);

        // SAFETY: `next` está no slot ativo e só sai de lá quando a própria
        // thread retomada fizer yield/exit.
        unsafe { switch::jump_to(from, to, inc) }
    }

    /// Última thread lógica saiu: encerra o processo inteiro
    fn terminate(&self, mut state: SpinlockGuard<'_, SchedState>) -> ! {
        let tid = state.active.as_ref().map_or(0, |t| t.tid.as_u64());
        let released = state.teardown();
        drop(state);

        crate::utrace!("(Sched) Registros liberados no encerramento=", released);
        crate::uinfo!("(Sched) Última thread lógica saiu. TID=", tid);
        crate::uinfo!("(Sched) Encerrando processo com status 0");

        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        std::process::exit(0)
    }

    /// Chamado por quem acabou de ganhar a CPU: assume o slot ativo nesta
    /// thread real e libera o zumbi deixado por quem saiu para cá.
    pub(crate) fn resume(&self) {
        let mut zombie = {
            let mut state = self.state.lock();
            state.running_on = thread::current().id();
            state.zombie.take()
        };
        // Liberar fora do lock: o Drop do contexto pode acordar threads do SO
        lifecycle::reap(&mut zombie);
    }

    /// Retira a função de entrada da thread ativa (primeira execução)
    pub(crate) fn take_entry(&self) -> Option<(Tid, crate::sched::task::Entry)> {
        let mut state = self.state.lock();
        let active = state.active.as_mut()?;
        let entry = active.entry.take()?;
        Some((active.tid, entry))
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Some(active) = state.active.as_ref().filter(|t| !t.tid.is_entry()) {
            crate::uwarn!(
                "(Sched) Scheduler destruído dentro de uma thread lógica TID=",
                active.tid.as_u64()
            );
        }
        let released = state.teardown();
        crate::utrace!("(Sched) Scheduler destruído; registros liberados=", released);
    }
}

/// Handle do scheduler. Clonar é barato; a instância é destruída junto com
/// o último handle.
///
/// Qualquer handle pode criar threads e consultar o estado, de qualquer
/// thread real. Já [`yield_now`](Self::yield_now) e [`exit`](Self::exit)
/// precisam vir da thread lógica em execução.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

impl Scheduler {
    /// Inicializa com a configuração padrão.
    ///
    /// A execução atual vira a thread lógica de entrada (`Tid::ENTRY`).
    pub fn new() -> Self {
        Self::build(SchedConfig::default())
    }

    /// Inicializa com configuração explícita
    pub fn with_config(config: SchedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub(crate) fn build(config: SchedConfig) -> Self {
        let entry = Box::new(LogicalThread::entry_record());
        crate::utrace!("(Sched) Inicializando. stack_size=", config.stack_size);

        Self {
            inner: Arc::new(Inner {
                state: Spinlock::new(SchedState::new(entry)),
                config,
                next_tid: AtomicU64::new(1),
            }),
        }
    }

    /// Cria uma thread lógica pronta. Não troca de contexto.
    pub fn spawn<F>(&self, f: F, priority: Priority) -> Result<Tid>
    where
        F: FnOnce() + Send + 'static,
    {
        let arg = Arc::as_ptr(&self.inner) as usize;
        let context = Context::new(self.inner.config.stack_size, entry::thread_start, arg)?;

        let tid = Tid::new(self.inner.next_tid.fetch_add(1, Ordering::Relaxed));
        let thread = Box::new(LogicalThread::new(tid, priority, Box::new(f), context));

        self.inner.state.lock().ready.insert(thread);
        crate::utrace!("(Sched) spawn TID=", tid.as_u64());
        Ok(tid)
    }

    /// Cede a CPU para a thread pronta de maior prioridade.
    ///
    /// `priority` passa a valer para o chamador antes dele voltar ao anel.
    /// Sem threads prontas devolve [`SchedError::NoReadyThreads`] e nada muda
    /// (nem a prioridade). Chamado fora da thread lógica em execução devolve
    /// [`SchedError::NotActive`].
    pub fn yield_now(&self, priority: Priority) -> Result<()> {
        self.inner.yield_now(priority)
    }

    /// Termina a thread lógica atual. Nunca retorna.
    ///
    /// Se era a última, encerra o processo com status 0.
    ///
    /// # Panics
    /// Se chamado fora da thread lógica em execução (o estado fica intacto).
    pub fn exit(&self) -> ! {
        self.inner.exit()
    }

    /// TID da thread em execução
    pub fn current(&self) -> Option<Tid> {
        self.inner.state.lock().active.as_ref().map(|t| t.tid)
    }

    /// Prioridade da thread em execução
    pub fn current_priority(&self) -> Option<Priority> {
        self.inner.state.lock().active.as_ref().map(|t| t.priority)
    }

    /// Número de threads prontas
    pub fn ready_len(&self) -> usize {
        self.inner.state.lock().ready.len()
    }

    /// Estatísticas de uma thread ainda conhecida pelo scheduler
    pub fn stats(&self, tid: Tid) -> Option<Accounting> {
        self.inner.state.lock().find(tid).map(|t| t.accounting)
    }

    pub fn config(&self) -> SchedConfig {
        self.inner.config
    }

    /// Despeja o estado inteiro no log (nível DEBUG)
    pub fn dump(&self) {
        super::debug::dump(&self.inner.state);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("backend", &crate::arch::BACKEND)
            .field("config", &self.inner.config)
            .field("ready", &self.ready_len())
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::config::MIN_STACK_SIZE;

    #[test]
    fn test_new_registers_entry_context() {
        let sched = Scheduler::new();
        assert_eq!(sched.current(), Some(Tid::ENTRY));
        assert_eq!(sched.current_priority(), Some(0));
        assert_eq!(sched.ready_len(), 0);
    }

    #[test]
    fn test_with_config_rejects_tiny_stack() {
        let config = SchedConfig::new().with_stack_size(1024);
        assert_eq!(
            Scheduler::with_config(config).unwrap_err(),
            SchedError::InvalidStackSize {
                size: 1024,
                min: MIN_STACK_SIZE
            }
        );
    }

    #[test]
    fn test_spawn_enqueues_without_running() {
        let sched = Scheduler::new();
        let a = sched.spawn(|| {}, 2).unwrap();
        let b = sched.spawn(|| {}, 1).unwrap();

        assert_eq!(a, Tid::new(1));
        assert_eq!(b, Tid::new(2));
        assert_eq!(sched.ready_len(), 2);
        assert_eq!(sched.current(), Some(Tid::ENTRY));
        assert_eq!(sched.stats(a), Some(Accounting::default()));
        sched.dump();
    }

    #[test]
    fn test_yield_alone_keeps_priority() {
        let sched = Scheduler::new();
        assert_eq!(sched.yield_now(42), Err(SchedError::NoReadyThreads));
        assert_eq!(sched.current_priority(), Some(0));
        assert_eq!(sched.ready_len(), 0);
        assert_eq!(sched.stats(Tid::ENTRY).map(|a| a.yields), Some(0));
    }

    #[test]
    fn test_failed_spawn_consumes_no_tid() {
        let config = SchedConfig::new().with_stack_size(isize::MAX as usize);
        let sched = Scheduler::with_config(config).unwrap();

        let err = sched.spawn(|| {}, 1).unwrap_err();
        assert!(err.is_resource_exhaustion());
        assert_eq!(sched.inner.next_tid.load(Ordering::Relaxed), 1);
        assert_eq!(sched.ready_len(), 0);
    }

    #[test]
    fn test_caller_check_follows_running_thread() {
        let sched = Scheduler::new();
        assert_eq!(sched.inner.state.lock().check_caller(), Ok(()));

        let s = sched.clone();
        let foreign = std::thread::spawn(move || {
            let state = s.inner.state.lock();
            state.check_caller()
        });
        assert_eq!(foreign.join().unwrap(), Err(SchedError::NotActive));
    }
}
