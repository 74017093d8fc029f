//! Backend hospedado: contextos emulados com threads do SO
//!
//! Usado onde não há troca de contexto em assembly (ou com a feature
//! `os_threads`). Cada thread lógica ganha uma thread real estacionada num
//! "bastão" (mutex + condvar); só a dona do bastão ativo executa, então o
//! contrato de suspensão é o mesmo do backend nativo: a thread lógica para
//! dentro de `transfer` e continua exatamente dali quando alguém a retoma.
//!
//! # Aposentadoria
//!
//! `jump` (exit) precisa encerrar a thread do SO atual a partir de qualquer
//! profundidade de chamada. Isso é feito desenrolando a pilha com um payload
//! [`Retired`] que o corpo da thread captura. O contexto de entrada (thread
//! real que não foi criada aqui) não pode ser encerrado: ele fica
//! estacionado para sempre e o processo termina pelo último exit.

use crate::arch::EntryFn;
use crate::sched::config::STACK_ALIGN;
use crate::sys::{Result, SchedError};
use core::any::Any;
use std::alloc::Layout;
use std::cell::Cell;
use std::panic;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// Estado do bastão
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    /// Esperando a vez
    Idle,
    /// Pode executar
    Run,
    /// Contexto destruído: a thread deve se aposentar sem executar nada
    Cancel,
}

#[derive(Debug)]
struct Baton {
    signal: Mutex<Signal>,
    cv: Condvar,
}

impl Baton {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            signal: Mutex::new(Signal::Idle),
            cv: Condvar::new(),
        })
    }

    fn post(&self, signal: Signal) {
        let mut guard = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = signal;
        self.cv.notify_one();
    }

    /// Bloqueia até receber Run ou Cancel. Run é consumido (volta a Idle).
    fn wait(&self) -> Signal {
        let mut guard = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        while *guard == Signal::Idle {
            guard = self.cv.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
        let signal = *guard;
        if signal == Signal::Run {
            *guard = Signal::Idle;
        }
        signal
    }
}

/// Payload usado para desenrolar a thread do SO de um contexto aposentado
struct Retired;

thread_local! {
    /// Verdadeiro nas threads do SO criadas por este backend
    static WORKER: Cell<bool> = const { Cell::new(false) };
}

/// Contexto emulado.
///
/// A "pilha" é a da thread do SO, criada com o tamanho configurado.
#[derive(Debug)]
pub struct Context {
    baton: Arc<Baton>,
    thread: Option<JoinHandle<()>>,
}

impl Context {
    /// Contexto da thread real em execução
    pub fn entry() -> Self {
        Self {
            baton: Baton::new(),
            thread: None,
        }
    }

    /// Cria a thread do SO já estacionada; ela só executa `entry(arg)` quando
    /// receber o primeiro Run.
    pub fn new(stack_size: usize, entry: EntryFn, arg: usize) -> Result<Self> {
        // Mesmo limite do backend nativo: tamanho que nem forma um Layout
        if Layout::from_size_align(stack_size, STACK_ALIGN).is_err() {
            return Err(SchedError::StackAllocation { size: stack_size });
        }

        let baton = Baton::new();
        let gate = Arc::clone(&baton);

        let thread = thread::Builder::new()
            .name("uthread-worker".into())
            .stack_size(stack_size)
            .spawn(move || {
                WORKER.with(|w| w.set(true));
                if gate.wait() != Signal::Run {
                    return;
                }
                drop(gate);

                let outcome = panic::catch_unwind(move || -> () { entry(arg) });
                if let Err(payload) = outcome {
                    if !payload.is::<Retired>() {
                        panic::resume_unwind(payload);
                    }
                }
            })
            .map_err(|e| SchedError::ContextCreation(e.to_string()))?;

        crate::utrace!("(Hosted) Thread do SO criada, stack=", stack_size);
        Ok(Self {
            baton,
            thread: Some(thread),
        })
    }

    /// Se liberar este contexto libera uma pilha (a da thread do SO)
    pub fn owns_stack(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // Acorda a thread se ainda estiver estacionada; o JoinHandle é
        // descartado (detach).
        if self.thread.is_some() {
            self.baton.post(Signal::Cancel);
        }
    }
}

/// Passa o bastão para `inc` e estaciona até alguém devolver para `out`.
///
/// # Safety
///
/// `out` e `inc` devem ser válidos no momento da chamada. Nenhum lock pode
/// estar adquirido pelo chamador.
pub unsafe fn transfer(out: *mut Context, inc: *const Context) {
    // Clonar antes de postar: depois do post a outra thread já executa.
    let own = Arc::clone(&(*out).baton);
    (*inc).baton.post(Signal::Run);
    if own.wait() != Signal::Run {
        retire_current();
    }
}

/// Passa o bastão para `inc` e aposenta a thread do SO atual.
///
/// # Safety
///
/// `inc` deve ser válido no momento da chamada.
pub unsafe fn jump(inc: *const Context) -> ! {
    (*inc).baton.post(Signal::Run);
    retire_current()
}

/// Identifica o payload de aposentadoria (deve ser repropagado, não tratado)
pub fn is_retirement(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Retired>()
}

fn retire_current() -> ! {
    if WORKER.with(Cell::get) {
        panic::resume_unwind(Box::new(Retired));
    }
    // Contexto de entrada: não há como encerrar a thread real do chamador.
    loop {
        thread::park();
    }
}
