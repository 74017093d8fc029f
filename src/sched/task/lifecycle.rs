//! Cleanup de threads que terminaram
//!
//! A thread que sai não pode liberar a própria pilha (ainda está rodando
//! nela). O registro vai para o slot de zumbi e quem for retomado em seguida
//! libera a memória.

use super::entity::LogicalThread;

/// Coloca `thread` no slot de zumbi, liberando o zumbi anterior se houver
pub fn bury(slot: &mut Option<Box<LogicalThread>>, mut thread: Box<LogicalThread>) {
    reap(slot);
    thread.set_zombie();
    crate::utrace!("(Lifecycle) Zumbi TID=", thread.tid.as_u64());
    *slot = Some(thread);
}

/// Libera o zumbi pendente (contexto, pilha e registro)
pub fn reap(slot: &mut Option<Box<LogicalThread>>) -> bool {
    match slot.take() {
        Some(zombie) => {
            crate::utrace!("(Lifecycle) Liberando zumbi TID=", zombie.tid.as_u64());
            drop(zombie);
            true
        }
        None => false,
    }
}
