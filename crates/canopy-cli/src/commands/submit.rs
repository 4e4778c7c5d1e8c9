//! `canopy submit` - plan, dry-run, then submit the batch

use alloy_primitives::Address;
use anyhow::Context;

use super::common;

/// Plan, dry-run, and submit the batch via a node-held sender account.
pub async fn run(
    manifest: &str,
    chain: &str,
    rpc_url: &str,
    sender: Option<&str>,
) -> anyhow::Result<()> {
    let sender: Address = sender
        .context("no sender configured; use `canopy simulate` for a read-only run")?
        .parse()
        .context("sender is not a valid address")?;

    let planned = common::build(manifest, chain, rpc_url).await?;
    common::print_plan(&planned.plan);

    // Dry-run first; a batch that reverts in simulation must not be
    // submitted.
    tracing::info!("dry-running batch before submission");
    planned
        .client
        .eth_call(planned.contracts.multisend_call_only, &planned.plan.batch)
        .await?;

    tracing::info!(%sender, "submitting batch");
    let tx_hash = planned
        .client
        .send_transaction(
            sender,
            planned.contracts.multisend_call_only,
            &planned.plan.batch,
        )
        .await?;

    println!();
    println!("submitted: {tx_hash}");
    Ok(())
}
