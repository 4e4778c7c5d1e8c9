//! `canopy plan` - compute addresses and the packed batch

use super::common;

/// Plan the deployment and print the result.
pub async fn run(manifest: &str, chain: &str, rpc_url: &str) -> anyhow::Result<()> {
    let planned = common::build(manifest, chain, rpc_url).await?;
    common::print_plan(&planned.plan);
    Ok(())
}
