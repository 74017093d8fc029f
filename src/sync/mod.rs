//! # Synchronization Primitives
//!
//! Apenas o guard do estado do scheduler. Primitivas de sincronização entre
//! threads lógicas (mutex, semáforo, condvar) estão fora do escopo: threads
//! cooperativas só trocam de contexto em yield/exit.

/// Spinlock (busy-wait, não dorme)
pub mod spinlock;

pub use spinlock::{Spinlock, SpinlockGuard};
