mod app;
mod demos;

use anyhow::Context as _;
use clap::Parser;
use uthread::{api, SchedConfig};

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SchedConfig::new().with_stack_size(cli.global.stack_size);
    api::system_init_with(config).context("failed to initialize the scheduler")?;

    match cli.command {
        Command::Tree { limit } => demos::tree(limit),
        Command::ScenarioA => demos::scenario_a(),
        Command::ScenarioB => demos::scenario_b(),
        Command::ScenarioC => demos::scenario_c(),
        Command::ScenarioD => demos::scenario_d(),
    }
}
