use clap::{Parser, Subcommand};

use self::{demo::DemoArg, simulate::SimulateArg, tune::TuneArg};

mod demo;
mod simulate;
mod tune;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run headless AI games and report statistics
    Simulate(#[clap(flatten)] SimulateArg),
    /// Watch the AI play a single game in the terminal
    Demo(#[clap(flatten)] DemoArg),
    /// Tune evaluation weights with a genetic algorithm
    Tune(#[clap(flatten)] TuneArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Demo(arg) => demo::run(&arg)?,
        Mode::Tune(arg) => tune::run(&arg)?,
    }
    Ok(())
}
