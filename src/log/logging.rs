// =============================================================================
// UTHREAD LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do escalonador com custo ZERO quando desligado.
//
// ARQUITETURA:
// - Usa features do Cargo para filtrar níveis em tempo de compilação
// - Níveis desligados só citam os argumentos dentro de um `if false`: nada
//   é avaliado e variáveis usadas apenas no log não geram aviso
// - SEM alocação - apenas strings literais + um valor inteiro opcional
// - Escreve APENAS em stderr (stdout fica livre para o programa)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Invariantes quebradas, pânico em thread lógica
// - WARN:  Uso incorreto mas recuperável
// - INFO:  Inicialização e término do processo
// - DEBUG: Dump do estado do scheduler
// - TRACE: Cada spawn, yield, exit e troca de contexto
//
// FEATURES:
// - no_logs:   Remove 100% dos logs
// - log_error: ERROR, WARN
// - log_info:  ERROR, WARN, INFO (padrão)
// - log_debug: + DEBUG
// - log_trace: Todos os níveis
//
// COMO USAR:
//   uinfo!("(Sched) Inicializado");        // Apenas string
//   utrace!("(Sched) spawn TID=", tid);    // String + valor decimal
//
// =============================================================================

// =============================================================================
// PREFIXOS
// =============================================================================
//
// Cores ANSI só são usadas quando stderr é um terminal (ver console::emit).
//

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! uerror {
    ($msg:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_ERROR, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_ERROR, $msg, Some($val as i64));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! uerror {
    ($msg:expr) => {{
        if false {
            let _ = &$msg;
        }
    }};
    ($msg:expr, $val:expr) => {{
        if false {
            let _ = (&$msg, &$val);
        }
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! uwarn {
    ($msg:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_WARN, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_WARN, $msg, Some($val as i64));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! uwarn {
    ($msg:expr) => {{
        if false {
            let _ = &$msg;
        }
    }};
    ($msg:expr, $val:expr) => {{
        if false {
            let _ = (&$msg, &$val);
        }
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! uinfo {
    ($msg:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_INFO, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_INFO, $msg, Some($val as i64));
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! uinfo {
    ($msg:expr) => {{
        if false {
            let _ = &$msg;
        }
    }};
    ($msg:expr, $val:expr) => {{
        if false {
            let _ = (&$msg, &$val);
        }
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! udebug {
    ($msg:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_DEBUG, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_DEBUG, $msg, Some($val as i64));
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! udebug {
    ($msg:expr) => {{
        if false {
            let _ = &$msg;
        }
    }};
    ($msg:expr, $val:expr) => {{
        if false {
            let _ = (&$msg, &$val);
        }
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! utrace {
    ($msg:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_TRACE, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::log::console::emit($crate::log::logging::P_TRACE, $msg, Some($val as i64));
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! utrace {
    ($msg:expr) => {{
        if false {
            let _ = &$msg;
        }
    }};
    ($msg:expr, $val:expr) => {{
        if false {
            let _ = (&$msg, &$val);
        }
    }};
}

/// Verdadeiro se o nível DEBUG está compilado.
///
/// Permite pular trabalho caro (ex: percorrer o anel inteiro) quando o dump
/// não seria emitido de qualquer forma.
pub const DEBUG_ENABLED: bool = cfg!(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
));
