use anyhow::Result;
use clap::{value_parser, ArgAction, Parser};
use dashboard_core::tracer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Turn debugging information on
    #[arg(short, long, global = true, env = "DASHBOARD_DEBUG", action = ArgAction::Count)]
    #[arg(value_parser = value_parser!(u8).range(..=3))]
    debug: u8,

    #[command(subcommand)]
    command: crate::commands::Command,
}

impl Args {
    pub(crate) fn run(self) -> Result<()> {
        tracer::init_once_with_level_int(self.debug);

        self.command.run()
    }
}
