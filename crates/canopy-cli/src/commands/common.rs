//! Shared pipeline behind the plan, simulate, and submit commands

use anyhow::Context;

use alloy_primitives::hex;
use canopy_client::RpcClient;
use canopy_core::{Chain, ContractAddresses, Manifest};
use canopy_plan::salt::OsSaltSource;
use canopy_plan::Plan;

/// Everything a command needs after the planning pipeline has run
pub struct PlannedRun {
    /// Address book of the target chain
    pub contracts: ContractAddresses,
    /// Client bound to the node the run talks to
    pub client: RpcClient,
    /// The finished plan
    pub plan: Plan,
}

/// Load the manifest, perform the factory read, and plan the deployment.
pub async fn build(manifest_path: &str, chain: &str, rpc_url: &str) -> anyhow::Result<PlannedRun> {
    let text = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("reading manifest {manifest_path}"))?;
    let manifest = Manifest::from_toml_str(&text)?;

    let chain: Chain = chain.parse()?;
    let contracts = ContractAddresses::for_chain(chain);
    let client = RpcClient::new(rpc_url);

    tracing::info!(%chain, "fetching account factory creation code");
    let proxy_creation_code = client
        .proxy_creation_code(contracts.account_proxy_factory)
        .await?;

    let plan = canopy_plan::plan(
        &contracts,
        &manifest,
        &proxy_creation_code,
        &mut OsSaltSource,
    )?;

    Ok(PlannedRun {
        contracts,
        client,
        plan,
    })
}

/// Print the predicted address table and the packed batch.
pub fn print_plan(plan: &Plan) {
    println!("predicted addresses:");
    for unit in &plan.units {
        println!("  {:<24} {}  allocation {}", unit.name, unit.address, unit.allocation);
    }
    println!("  {:<24} {}", "token", plan.token_address);
    println!();
    println!("batch ({} calls, {} bytes):", plan.calls.len(), plan.batch.len());
    println!("0x{}", hex::encode(&plan.batch));
}
