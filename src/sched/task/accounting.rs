//! Contabilidade por thread lógica
//!
//! Sem relógio nem quantum (não há preempção): apenas contadores de eventos
//! do escalonamento.

/// Estatísticas de uma thread lógica
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accounting {
    /// Quantas vezes foi selecionada para executar
    pub dispatches: u64,
    /// Yields bem-sucedidos (trocas de contexto voluntárias)
    pub yields: u64,
}

impl Accounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra que a thread ganhou a CPU
    pub fn account_dispatch(&mut self) {
        self.dispatches += 1;
    }

    /// Registra um yield que efetivamente trocou de contexto
    pub fn account_yield(&mut self) {
        self.yields += 1;
    }
}
