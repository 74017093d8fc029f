//! Ferramentas de Debug para o Scheduler

use super::scheduler::SchedState;
use crate::log::logging::DEBUG_ENABLED;
use crate::sync::Spinlock;

/// Imprime o estado de todas as threads conhecidas pela instância
pub fn dump(state: &Spinlock<SchedState>) {
    if !DEBUG_ENABLED {
        return;
    }

    let Some(state) = state.try_lock() else {
        crate::udebug!("  - ESTADO: [Locked]");
        return;
    };

    crate::udebug!("--- [DEBUG] SCHEDULER: LISTA COMPLETA ---");

    // 1. Ativa
    match state.active.as_ref() {
        Some(t) => {
            crate::udebug!("  - Active TID:", t.tid.as_u64());
            crate::udebug!("    Priority:", t.priority);
            crate::udebug!("    Dispatches:", t.accounting.dispatches);
            crate::udebug!("    Yields:", t.accounting.yields);
        }
        None => crate::udebug!("  - Active: None"),
    }

    // 2. Prontas (mais antiga primeiro)
    crate::udebug!("  - READY count:", state.ready.len());
    for t in state.ready.iter() {
        crate::udebug!("    -> TID:", t.tid.as_u64());
        crate::udebug!("       Priority:", t.priority);
    }
    if let Some(next) = state.ready.peek_highest_priority() {
        crate::udebug!("  - Próxima a executar TID:", next.tid.as_u64());
    }

    // 3. Zumbi
    if let Some(z) = state.zombie.as_ref() {
        crate::udebug!("  - ZOMBIE TID:", z.tid.as_u64());
    }

    crate::udebug!("--- [DEBUG] FIM DA LISTA ---");
}
