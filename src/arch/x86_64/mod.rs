//! Implementação x86_64 (System V ABI)

pub mod context;
pub mod stack;

pub use context::Context;
pub use stack::Stack;
