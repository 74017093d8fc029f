//! Cenários de demonstração
//!
//! Cada função roda na thread de entrada já registrada pelo `system_init`
//! e termina chamando `api::exit()`: o processo acaba quando a última
//! thread lógica sai.

use anyhow::Context as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use uthread::api;

/// Threads criadas até agora na árvore
static SPAWNED: AtomicUsize = AtomicUsize::new(0);
/// Próximo id impresso
static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn branch(limit: usize) {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

    println!("This is ult {id}");
    if SPAWNED.load(Ordering::Relaxed) < limit {
        for _ in 0..2 {
            if let Err(e) = api::create(move || branch(limit), 2) {
                eprintln!("create failed ({}): {e}", e.code());
                if e.is_resource_exhaustion() {
                    break;
                }
            }
            SPAWNED.fetch_add(1, Ordering::Relaxed);
        }
    }
    println!("This is ult {id} again");
    let _ = api::yield_now(1);
    println!("This is ult {id} one more time");
    api::exit()
}

pub fn tree(limit: usize) -> anyhow::Result<()> {
    api::create(move || branch(limit), 2).context("failed to create the root thread")?;
    api::exit()
}

pub fn scenario_a() -> anyhow::Result<()> {
    let f = api::create(|| println!("f runs"), 2).context("spawn f")?;
    println!("spawned f as {f} priority=2");
    let g = api::create(|| println!("g runs"), 1).context("spawn g")?;
    println!("spawned g as {g} priority=1");
    println!("main exits");
    api::exit()
}

pub fn scenario_b() -> anyhow::Result<()> {
    api::create(|| println!("f runs"), 5).context("spawn f")?;
    api::create(|| println!("g runs"), 5).context("spawn g")?;
    println!("main yields priority=5");
    api::yield_now(5).context("yield with two ready threads")?;
    println!("main resumed");
    api::exit()
}

pub fn scenario_c() -> anyhow::Result<()> {
    match api::yield_now(3) {
        Ok(()) => println!("yield succeeded"),
        Err(e) => println!("yield failed: {e}"),
    }
    let priority = api::scheduler()?.current_priority().unwrap_or_default();
    println!("main keeps running priority={priority}");
    api::exit()
}

pub fn scenario_d() -> anyhow::Result<()> {
    for (name, priority) in [("a", 3), ("b", 1), ("c", 2)] {
        api::create(
            move || {
                println!("{name} exits");
                api::exit()
            },
            priority,
        )
        .with_context(|| format!("spawn {name}"))?;
    }
    println!("main exits");
    api::exit()
}
