//! Context switch (x86_64 System V)
//!
//! Salva/restaura apenas o que a ABI manda preservar entre chamadas: os
//! registradores callee-saved, o stack pointer, MXCSR e a control word do
//! x87. Todo o resto já foi salvo pelo compilador antes do `call`.
//!
//! # Pilha de um contexto novo
//!
//! ```text
//! topo (alinhado a 16) ──►┌──────────────────────────┐
//!                         │ &uthread_ctx_bootstrap   │ ◄── rsp salvo
//!                         ├──────────────────────────┤
//!                         │           ...            │
//! ```
//!
//! O primeiro `ret` da troca consome o endereço do bootstrap e deixa
//! `rsp == topo`, alinhado para o `call` seguinte. O bootstrap move `r12`
//! (argumento) e `r13` (função de entrada) para rdi/rsi e chama
//! [`context_start`].

use super::stack::Stack;
use crate::arch::EntryFn;
use crate::sys::Result;
use core::any::Any;

/// Registradores salvos.
///
/// Offsets usados pelo assembly:
/// 0x00:rsp 0x08:r15 0x10:r14 0x18:r13 0x20:r12 0x28:rbx 0x30:rbp
/// 0x38:mxcsr 0x3c:x87cw
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct Registers {
    rsp: u64,
    r15: u64,
    r14: u64,
    r13: u64,
    r12: u64,
    rbx: u64,
    rbp: u64,
    mxcsr: u32,
    x87cw: u32,
}

/// Valor de reset do MXCSR (todas as exceções mascaradas, round-to-nearest)
const MXCSR_DEFAULT: u32 = 0x1F80;
/// Valor de reset da control word do x87
const X87CW_DEFAULT: u32 = 0x037F;

/// Contexto de execução retomável.
///
/// O contexto é dono da sua pilha: ela é liberada junto com ele.
#[derive(Debug)]
pub struct Context {
    regs: Registers,
    stack: Option<Stack>,
}

impl Context {
    /// Contexto da thread real em execução (preenchido no primeiro save)
    pub fn entry() -> Self {
        Self {
            regs: Registers::default(),
            stack: None,
        }
    }

    /// Aloca uma pilha e prepara o contexto para executar `entry(arg)`
    pub fn new(stack_size: usize, entry: EntryFn, arg: usize) -> Result<Self> {
        let stack = Stack::allocate(stack_size)?;
        let top = stack.top() as *mut u64;

        // SAFETY: top está dentro da região (alinhado para baixo) e a pilha
        // tem pelo menos um slot.
        let rsp = unsafe {
            let slot = top.sub(1);
            slot.write(uthread_ctx_bootstrap as *const () as usize as u64);
            slot
        };

        let regs = Registers {
            rsp: rsp as u64,
            r12: arg as u64,
            r13: entry as *const () as usize as u64,
            mxcsr: MXCSR_DEFAULT,
            x87cw: X87CW_DEFAULT,
            ..Registers::default()
        };

        Ok(Self {
            regs,
            stack: Some(stack),
        })
    }

    /// Se liberar este contexto libera uma pilha
    pub fn owns_stack(&self) -> bool {
        self.stack.is_some()
    }
}

/// Salva o contexto atual em `out` e restaura `inc`.
///
/// # Safety
///
/// - `out` e `inc` devem ser válidos e distintos
/// - `inc` deve ter sido criado por [`Context::new`] ou salvo por uma troca
///   anterior, e sua pilha precisa continuar viva
/// - Nenhum lock pode estar adquirido pelo chamador
pub unsafe fn transfer(out: *mut Context, inc: *const Context) {
    uthread_ctx_switch(
        core::ptr::addr_of_mut!((*out).regs),
        core::ptr::addr_of!((*inc).regs),
    );
}

/// Restaura `inc` sem salvar o contexto atual. Nunca retorna.
///
/// # Safety
///
/// Mesmas regras de [`transfer`] para `inc`. A pilha atual é abandonada.
pub unsafe fn jump(inc: *const Context) -> ! {
    uthread_ctx_restore(core::ptr::addr_of!((*inc).regs))
}

/// Este backend nunca desenrola a pilha para aposentar uma thread.
pub fn is_retirement(_payload: &(dyn Any + Send)) -> bool {
    false
}

/// Primeira função Rust executada na pilha nova.
extern "C" fn context_start(arg: usize, entry: usize) -> ! {
    // SAFETY: r13 foi preenchido com um EntryFn em `Context::new`
    let entry: EntryFn = unsafe { core::mem::transmute::<usize, EntryFn>(entry) };
    entry(arg)
}

core::arch::global_asm!(
    // uthread_ctx_switch(out: *mut Registers, inc: *const Registers)
    // RDI = out, RSI = inc
    ".global uthread_ctx_switch",
    ".p2align 4",
    "uthread_ctx_switch:",
    "    mov [rdi + 0x00], rsp",
    "    mov [rdi + 0x08], r15",
    "    mov [rdi + 0x10], r14",
    "    mov [rdi + 0x18], r13",
    "    mov [rdi + 0x20], r12",
    "    mov [rdi + 0x28], rbx",
    "    mov [rdi + 0x30], rbp",
    "    stmxcsr dword ptr [rdi + 0x38]",
    "    fnstcw word ptr [rdi + 0x3c]",
    // --- Switch Point ---
    "    mov rsp, [rsi + 0x00]",
    "    mov r15, [rsi + 0x08]",
    "    mov r14, [rsi + 0x10]",
    "    mov r13, [rsi + 0x18]",
    "    mov r12, [rsi + 0x20]",
    "    mov rbx, [rsi + 0x28]",
    "    mov rbp, [rsi + 0x30]",
    "    ldmxcsr dword ptr [rsi + 0x38]",
    "    fldcw word ptr [rsi + 0x3c]",
    "    ret",
    "",
    // uthread_ctx_restore(inc: *const Registers) -> !
    // RDI = inc
    ".global uthread_ctx_restore",
    ".p2align 4",
    "uthread_ctx_restore:",
    "    mov rsp, [rdi + 0x00]",
    "    mov r15, [rdi + 0x08]",
    "    mov r14, [rdi + 0x10]",
    "    mov r13, [rdi + 0x18]",
    "    mov r12, [rdi + 0x20]",
    "    mov rbx, [rdi + 0x28]",
    "    mov rbp, [rdi + 0x30]",
    "    ldmxcsr dword ptr [rdi + 0x38]",
    "    fldcw word ptr [rdi + 0x3c]",
    "    ret",
    "",
    // Alvo do primeiro `ret` de um contexto novo
    ".global uthread_ctx_bootstrap",
    ".p2align 4",
    "uthread_ctx_bootstrap:",
    "    mov rdi, r12",
    "    mov rsi, r13",
    "    call {start}",
    "    ud2",
    start = sym context_start,
);

extern "C" {
    fn uthread_ctx_switch(out: *mut Registers, inc: *const Registers);
    fn uthread_ctx_restore(inc: *const Registers) -> !;
    fn uthread_ctx_bootstrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr::{addr_of, addr_of_mut};

    struct Pair {
        main: Context,
        child: Context,
        hits: usize,
    }

    fn child_entry(arg: usize) -> ! {
        let pair = arg as *mut Pair;
        loop {
            // SAFETY: o teste mantém `Pair` vivo enquanto troca para cá
            unsafe {
                (*pair).hits += 1;
                transfer(addr_of_mut!((*pair).child), addr_of!((*pair).main));
            }
        }
    }

    #[test]
    fn test_fresh_context_does_not_run_until_entered() {
        let ctx = Context::new(64 * 1024, child_entry, 0).unwrap();
        assert!(ctx.owns_stack());
        assert!(!Context::entry().owns_stack());
    }

    #[test]
    fn test_fresh_context_returns_into_bootstrap() {
        let ctx = Context::new(64 * 1024, child_entry, 5).unwrap();
        assert_eq!(ctx.regs.r12, 5);
        assert_eq!(ctx.regs.r13, child_entry as *const () as usize as u64);

        // SAFETY: rsp aponta para o slot de retorno escrito em `new`
        let ret = unsafe { *(ctx.regs.rsp as *const u64) };
        assert_eq!(ret, uthread_ctx_bootstrap as *const () as usize as u64);
    }

    #[test]
    fn test_transfer_round_trip_preserves_locals() {
        let mut pair = Box::new(Pair {
            main: Context::entry(),
            child: Context::entry(),
            hits: 0,
        });
        let p: *mut Pair = &mut *pair;
        // SAFETY: `p` aponta para o Box acima, que vive até o fim do teste
        unsafe {
            (*p).child = Context::new(64 * 1024, child_entry, p as usize).unwrap();

            let local = [7u64, 11, 13];
            transfer(addr_of_mut!((*p).main), addr_of!((*p).child));
            assert_eq!((*p).hits, 1);
            transfer(addr_of_mut!((*p).main), addr_of!((*p).child));
            assert_eq!((*p).hits, 2);
            assert_eq!(local, [7, 11, 13]);
        }
    }
}
