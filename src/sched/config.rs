//! Constantes de configuração do Scheduler

use crate::sys::{Result, SchedError};

/// Tamanho padrão da pilha de uma thread lógica (em bytes)
pub const DEFAULT_STACK_SIZE: usize = 65536; // 64KB

/// Menor pilha aceita (em bytes)
pub const MIN_STACK_SIZE: usize = 16384; // 16KB

/// Alinhamento exigido pela ABI para o topo da pilha
pub const STACK_ALIGN: usize = 16;

/// Prioridade do contexto de entrada (quem inicializou o scheduler)
pub const ENTRY_PRIORITY: i32 = 0;

/// Configuração de uma instância do scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    /// Bytes de pilha alocados por spawn
    pub stack_size: usize,
}

impl SchedConfig {
    pub const fn new() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    /// Define o tamanho da pilha, arredondado para cima até `STACK_ALIGN`
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = align_up(bytes, STACK_ALIGN);
        self
    }

    /// Rejeita pilhas abaixo do mínimo
    pub fn validate(&self) -> Result<()> {
        if self.stack_size < MIN_STACK_SIZE {
            return Err(SchedError::InvalidStackSize {
                size: self.stack_size,
                min: MIN_STACK_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self::new()
    }
}

const fn align_up(value: usize, align: usize) -> usize {
    match value.checked_add(align - 1) {
        Some(v) => v & !(align - 1),
        None => value & !(align - 1),
    }
}
