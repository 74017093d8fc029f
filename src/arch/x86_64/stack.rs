//! Pilha dedicada de uma thread lógica
//!
//! Memória crua do alocador global, alinhada a 16 bytes. Falha de alocação
//! é reportada como erro em vez de abortar o processo, para que o spawn
//! possa devolver falha ao chamador.

use crate::sched::config::STACK_ALIGN;
use crate::sys::{Result, SchedError};
use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Região de pilha. Liberada no Drop.
#[derive(Debug)]
pub struct Stack {
    base: NonNull<u8>,
    layout: Layout,
}

// SAFETY: a região é exclusiva desta Stack; nada mais guarda o ponteiro.
unsafe impl Send for Stack {}

impl Stack {
    /// Aloca `size` bytes de pilha
    pub fn allocate(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SchedError::StackAllocation { size });
        }
        let layout = Layout::from_size_align(size, STACK_ALIGN)
            .map_err(|_| SchedError::StackAllocation { size })?;

        // SAFETY: layout tem tamanho não-nulo
        let ptr = unsafe { alloc::alloc(layout) };
        let base = NonNull::new(ptr).ok_or(SchedError::StackAllocation { size })?;

        crate::utrace!("(Stack) Alocada pilha de bytes=", size);
        Ok(Self { base, layout })
    }

    /// Tamanho em bytes
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Endereço mais baixo da região
    pub fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// Topo da pilha (cresce para baixo), alinhado a 16 bytes
    pub fn top(&self) -> *mut u8 {
        let end = self.base.as_ptr() as usize + self.layout.size();
        (end & !(STACK_ALIGN - 1)) as *mut u8
    }
}

impl Drop for Stack {
    fn drop(&mut self) {
        // SAFETY: alocado em `allocate` com este mesmo layout
        unsafe { alloc::dealloc(self.base.as_ptr(), self.layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_bounds_and_alignment() {
        let stack = Stack::allocate(16 * 1024 + 8).unwrap();
        assert_eq!(stack.size(), 16 * 1024 + 8);
        assert_eq!(stack.top() as usize % STACK_ALIGN, 0);
        assert!(stack.top() as usize > stack.base() as usize);
        assert!(stack.top() as usize <= stack.base() as usize + stack.size());
    }

    #[test]
    fn test_zero_sized_stack_is_rejected() {
        assert_eq!(
            Stack::allocate(0).unwrap_err(),
            SchedError::StackAllocation { size: 0 }
        );
    }

    #[test]
    fn test_impossible_stack_reports_failure() {
        let size = isize::MAX as usize;
        assert!(matches!(
            Stack::allocate(size),
            Err(SchedError::StackAllocation { .. })
        ));
    }
}
