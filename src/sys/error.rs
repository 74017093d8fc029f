//! # Códigos de Erro do Scheduler
//!
//! Erros recuperáveis são devolvidos ao chamador como `Err(SchedError)`.
//! Nada é refeito internamente: quem chamou decide se tenta de novo.
//!
//! O único caminho fatal (término do processo quando a última thread lógica
//! sai) não é um erro e não passa por aqui.

use thiserror::Error;

/// Erros das operações do scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    // === Recursos (Spawn) ===
    /// Falha ao alocar a pilha da nova thread
    #[error("failed to allocate a {size}-byte thread stack")]
    StackAllocation { size: usize },

    /// O backend de contexto não conseguiu materializar o contexto
    #[error("failed to create execution context: {0}")]
    ContextCreation(String),

    // === Configuração ===
    /// Tamanho de pilha abaixo do mínimo suportado
    #[error("stack size {size} is below the minimum of {min} bytes")]
    InvalidStackSize { size: usize, min: usize },

    // === Yield ===
    /// Nenhuma outra thread pronta: o chamador continua executando
    #[error("no ready thread to yield to")]
    NoReadyThreads,

    /// Yield/exit chamado de uma thread real que não executa a thread ativa
    #[error("caller is not the running logical thread")]
    NotActive,

    // === Ciclo de vida do facade global ===
    /// `system_init()` ainda não foi chamado
    #[error("scheduler not initialized")]
    NotInitialized,

    /// `system_init()` chamado mais de uma vez
    #[error("scheduler already initialized")]
    AlreadyInitialized,
}

impl SchedError {
    /// Código no estilo C (0 = sucesso, -1 = falha).
    ///
    /// Todo erro mapeia para -1.
    #[inline]
    pub const fn code(&self) -> i32 {
        -1
    }

    /// Falha por falta de recurso (o chamador pode tentar de novo depois)
    pub const fn is_resource_exhaustion(&self) -> bool {
        matches!(self, Self::StackAllocation { .. } | Self::ContextCreation(_))
    }
}

/// Resultado das operações do scheduler
pub type Result<T> = core::result::Result<T, SchedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_follow_c_convention() {
        assert_eq!(SchedError::NoReadyThreads.code(), -1);
        assert_eq!(SchedError::NotActive.code(), -1);
        assert_eq!(SchedError::StackAllocation { size: 16 }.code(), -1);
    }

    #[test]
    fn test_resource_exhaustion_classification() {
        assert!(SchedError::StackAllocation { size: 4096 }.is_resource_exhaustion());
        assert!(SchedError::ContextCreation("spawn".into()).is_resource_exhaustion());
        assert!(!SchedError::NoReadyThreads.is_resource_exhaustion());
        assert!(!SchedError::NotInitialized.is_resource_exhaustion());
        assert!(!SchedError::NotActive.is_resource_exhaustion());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SchedError::InvalidStackSize { size: 10, min: 16384 }.to_string(),
            "stack size 10 is below the minimum of 16384 bytes"
        );
        assert_eq!(
            SchedError::NoReadyThreads.to_string(),
            "no ready thread to yield to"
        );
    }
}
