mod check;
mod crd;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Check dashboard manifests for panels and time ranges which would be dropped or rejected
    Check(self::check::Args),
    /// Print the custom resource definitions as a YAML stream
    Crd(self::crd::Args),
}

impl Command {
    pub(crate) fn run(self) -> Result<()> {
        match self {
            Self::Check(command) => command.run(),
            Self::Crd(command) => command.run(),
        }
    }
}
