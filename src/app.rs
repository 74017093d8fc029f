use clap::{Parser, Subcommand};
use uthread::sched::config::DEFAULT_STACK_SIZE;

/// uthread-demo - cooperative priority scheduler walkthroughs
#[derive(Debug, Parser)]
#[command(name = "uthread-demo", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Stack size, in bytes, for every spawned logical thread.
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_STACK_SIZE)]
    pub stack_size: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Spawn a tree of threads that print, fan out, yield and exit.
    Tree {
        /// Stop spawning children once this many threads were created.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Spawn f(2) and g(1), then exit the initial thread: g runs first.
    ScenarioA,

    /// Spawn f(5) and g(5), then yield(5) from the initial thread: f runs first.
    ScenarioB,

    /// Yield with no other thread ready: the call fails and the caller keeps running.
    ScenarioC,

    /// Three threads that only exit; the last exit terminates the process.
    ScenarioD,
}
