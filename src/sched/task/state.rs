//! Estados de thread lógica

/// Estado de uma thread lógica
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// No anel de prontas, elegível para seleção
    Ready,
    /// Executando (fora do anel)
    Active,
    /// Terminou; memória liberada pela próxima thread que retomar
    Zombie,
}
