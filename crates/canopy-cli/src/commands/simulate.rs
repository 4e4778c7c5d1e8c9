//! `canopy simulate` - plan, then dry-run the batch against the executor

use super::common;

/// Plan the deployment and dry-run the packed batch with `eth_call`.
pub async fn run(manifest: &str, chain: &str, rpc_url: &str) -> anyhow::Result<()> {
    let planned = common::build(manifest, chain, rpc_url).await?;
    common::print_plan(&planned.plan);

    tracing::info!("dry-running batch against the multisend executor");
    planned
        .client
        .eth_call(planned.contracts.multisend_call_only, &planned.plan.batch)
        .await?;

    println!();
    println!("simulation succeeded");
    Ok(())
}
