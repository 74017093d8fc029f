//! # Facade global
//!
//! Interface estilo biblioteca C sobre uma instância única por processo.
//! `system_init` cria o scheduler e registra quem chamou como a thread de
//! entrada; as outras funções delegam para ele.
//!
//! A instância nunca é destruída: o processo termina quando a última thread
//! lógica chama [`exit`].

use crate::sched::{SchedConfig, Scheduler};
use crate::sys::{Priority, Result, SchedError, Tid};
use spin::Once;

static SCHEDULER: Once<Scheduler> = Once::new();

/// Inicializa o scheduler global. Chamar de novo devolve
/// [`SchedError::AlreadyInitialized`].
pub fn system_init() -> Result<()> {
    system_init_with(SchedConfig::default())
}

/// Igual a [`system_init`], com configuração explícita
pub fn system_init_with(config: SchedConfig) -> Result<()> {
    config.validate()?;

    let mut created = false;
    SCHEDULER.call_once(|| {
        created = true;
        Scheduler::build(config)
    });

    if created {
        crate::uinfo!("(Api) Scheduler global inicializado");
        Ok(())
    } else {
        crate::uwarn!("(Api) system_init chamado mais de uma vez");
        Err(SchedError::AlreadyInitialized)
    }
}

/// Instância global, se já inicializada
pub fn scheduler() -> Result<&'static Scheduler> {
    SCHEDULER.get().ok_or(SchedError::NotInitialized)
}

/// Cria uma thread lógica com a prioridade dada
pub fn create<F>(f: F, priority: Priority) -> Result<Tid>
where
    F: FnOnce() + Send + 'static,
{
    scheduler()?.spawn(f, priority)
}

/// Cede a CPU; `priority` passa a valer para o chamador
pub fn yield_now(priority: Priority) -> Result<()> {
    scheduler()?.yield_now(priority)
}

/// Termina a thread lógica atual.
///
/// Antes da inicialização o chamador é trivialmente a última thread: o
/// processo termina com status 0.
pub fn exit() -> ! {
    match SCHEDULER.get() {
        Some(sched) => sched.exit(),
        None => {
            crate::uwarn!("(Api) exit antes de system_init; encerrando processo");
            std::process::exit(0)
        }
    }
}

/// TID da thread lógica em execução
pub fn current() -> Option<Tid> {
    SCHEDULER.get().and_then(Scheduler::current)
}
