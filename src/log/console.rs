//! Console de diagnóstico (stderr)
//!
//! Sink único usado pelas macros de log. Cada chamada escreve uma linha
//! inteira com o lock de stderr adquirido, para que linhas de threads do SO
//! distintas (backend hospedado) não se misturem.

use std::io::{IsTerminal, Write};

/// Emite uma linha `prefixo + mensagem [+ valor]`.
///
/// Erros de escrita são ignorados: log nunca deve derrubar o scheduler.
pub fn emit(prefix: &str, msg: &str, val: Option<i64>) {
    let stderr = std::io::stderr();
    let colored = stderr.is_terminal();
    let mut out = stderr.lock();

    let _ = if colored {
        out.write_all(prefix.as_bytes())
    } else {
        out.write_all(strip_ansi(prefix).as_bytes())
    };
    let _ = out.write_all(msg.as_bytes());
    if let Some(v) = val {
        let _ = write!(out, "{}", v);
    }
    let _ = out.write_all(b"\n");
}

/// Remove as sequências `ESC[...m` de um prefixo.
fn strip_ansi(prefix: &str) -> String {
    let mut plain = String::with_capacity(prefix.len());
    let mut chars = prefix.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Consome até o 'm' que fecha a sequência
            for n in chars.by_ref() {
                if n == 'm' {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}
