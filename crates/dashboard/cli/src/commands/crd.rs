use anyhow::{anyhow, Result};
use clap::Parser;
use dashboard_api::registry::Registry;
use tracing::info;

#[derive(Parser)]
pub(crate) struct Args {}

impl Args {
    pub(crate) fn run(self) -> Result<()> {
        let mut registry = Registry::default();
        ::dashboard_api::register(&mut registry)?;

        for crd in registry.crds() {
            let manifest = ::serde_yaml::to_string(crd)
                .map_err(|error| anyhow!("failed to encode a CRD: {error}"))?;
            print!("---\n{manifest}");
        }

        info!("printed {} kinds", registry.kinds().len());
        Ok(())
    }
}
