mod args;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    self::args::Args::parse().run()
}
