//! Tipos fundamentais do scheduler

use core::fmt;

/// Thread ID (identificador de thread lógica)
///
/// `Tid::ENTRY` é o contexto que inicializou o scheduler; threads criadas
/// por spawn recebem IDs crescentes a partir de 1, únicos por instância.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Tid(u64);

impl Tid {
    /// Contexto de entrada (quem chamou a inicialização)
    pub const ENTRY: Tid = Tid(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn is_entry(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ult-{}", self.0)
    }
}

/// Prioridade: valor MENOR roda ANTES. Sem restrição de faixa.
pub type Priority = i32;
