//! Assembly pass
//!
//! Second tree walk, strict pre-order: a unit's calls are emitted before any
//! of its children's, because children parameterize their freeze modules with
//! the parent's address and approval threshold. Each unit contributes exactly
//! two top-level calls — its account deployment and one wrapped
//! exec-transaction that runs the unit's whole configuration batch atomically
//! from the account's own perspective.

use alloy_primitives::Address;

use canopy_codec::account::{
    enable_module_call, exec_batch_call, remove_owner_call, set_guard_call,
};
use canopy_codec::factories::{deploy_account_call, deploy_module_call};
use canopy_codec::modules::{
    freeze_guard_initializer, freeze_voting_initializer, org_module_initializer,
};
use canopy_codec::multisend::multi_send_calldata;
use canopy_codec::registry::{declare_sub_unit_call, record_name_call};
use canopy_core::error::{CanopyError, Result};
use canopy_core::{Call, ContractAddresses, DerivedUnit, FreezeConfig};

use crate::predict::predict_clone_address;

/// Read-only inputs of the assembly pass
#[derive(Debug, Clone, Copy)]
pub struct AssembleContext<'a> {
    /// Fixed singleton deployments on the target chain
    pub contracts: &'a ContractAddresses,
    /// Global freeze governance parameters
    pub freeze: &'a FreezeConfig,
}

/// Flatten a derived tree into its ordered top-level call sequence.
pub fn assemble_tree(ctx: &AssembleContext<'_>, root: &DerivedUnit) -> Result<Vec<Call>> {
    assemble_node(ctx, root, None, None)
}

fn assemble_node(
    ctx: &AssembleContext<'_>,
    node: &DerivedUnit,
    parent: Option<Address>,
    parent_threshold: Option<u64>,
) -> Result<Vec<Call>> {
    let mut calls = unit_calls(ctx, node, parent, parent_threshold)?;

    for child in &node.children {
        calls.extend(assemble_node(
            ctx,
            child,
            Some(node.derived.predicted_address),
            Some(node.threshold),
        )?);
    }

    Ok(calls)
}

/// The two calls a single unit contributes to the top-level sequence.
fn unit_calls(
    ctx: &AssembleContext<'_>,
    node: &DerivedUnit,
    parent: Option<Address>,
    parent_threshold: Option<u64>,
) -> Result<Vec<Call>> {
    let deploy = deploy_account_call(
        ctx.contracts.account_proxy_factory,
        ctx.contracts.account_singleton,
        &node.derived.initialization_data,
        node.derived.salt_nonce,
    );

    let batch = configuration_batch(ctx, node, parent, parent_threshold)?;
    let exec = exec_batch_call(
        node.derived.predicted_address,
        ctx.contracts.multisend_call_only,
        multi_send_calldata(&batch),
    );

    tracing::debug!(
        unit = %node.name,
        address = %node.derived.predicted_address,
        batch_len = batch.len(),
        "assembled unit calls"
    );

    Ok(vec![deploy, exec])
}

/// The unit's inner configuration batch, executed via delegate-call from the
/// unit's own account.
fn configuration_batch(
    ctx: &AssembleContext<'_>,
    node: &DerivedUnit,
    parent: Option<Address>,
    parent_threshold: Option<u64>,
) -> Result<Vec<Call>> {
    let contracts = ctx.contracts;
    let unit = node.derived.predicted_address;
    let salt_nonce = node.derived.salt_nonce;
    let mut calls = Vec::new();

    if let Some(parent) = parent {
        // Non-root units carry the full governance stack. Its parameters need
        // the parent's approval threshold; a missing threshold cannot be
        // defaulted without deploying a module that freezes on the wrong
        // quorum.
        let parent_threshold = parent_threshold.ok_or_else(|| {
            CanopyError::configuration(format!(
                "parent threshold not set for unit \"{}\"",
                node.name
            ))
        })?;

        let org_initializer = org_module_initializer(parent, unit);
        calls.push(deploy_module_call(
            contracts.module_proxy_factory,
            contracts.org_module_master_copy,
            &org_initializer,
            salt_nonce,
        ));
        let org_module = predict_clone_address(
            contracts.org_module_master_copy,
            contracts.module_proxy_factory,
            &org_initializer,
            salt_nonce,
        );
        calls.push(enable_module_call(unit, org_module));

        let voting_initializer = freeze_voting_initializer(parent, parent_threshold, ctx.freeze);
        calls.push(deploy_module_call(
            contracts.module_proxy_factory,
            contracts.freeze_voting_master_copy,
            &voting_initializer,
            salt_nonce,
        ));
        let freeze_voting = predict_clone_address(
            contracts.freeze_voting_master_copy,
            contracts.module_proxy_factory,
            &voting_initializer,
            salt_nonce,
        );

        let guard_initializer = freeze_guard_initializer(unit, parent, freeze_voting, ctx.freeze);
        calls.push(deploy_module_call(
            contracts.module_proxy_factory,
            contracts.freeze_guard_master_copy,
            &guard_initializer,
            salt_nonce,
        ));
        let freeze_guard = predict_clone_address(
            contracts.freeze_guard_master_copy,
            contracts.module_proxy_factory,
            &guard_initializer,
            salt_nonce,
        );
        calls.push(set_guard_call(unit, freeze_guard));
    }

    calls.push(record_name_call(contracts.registry, &node.name));

    for child in &node.children {
        calls.push(declare_sub_unit_call(
            contracts.registry,
            child.derived.predicted_address,
        ));
    }

    // Hand the unit over to its declared owners: drop the bootstrap co-owner
    // and restore the declared threshold. The predecessor in the account's
    // owner list is the last declared owner, because setup appended the
    // bootstrap co-owner after all of them.
    let prev_owner = *node.owners.last().ok_or_else(|| {
        CanopyError::configuration(format!("unit \"{}\" has no owners", node.name))
    })?;
    calls.push(remove_owner_call(
        unit,
        prev_owner,
        contracts.multisend_call_only,
        node.threshold,
    ));

    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{derive_tree, DeriveContext};
    use crate::salt::SequentialSaltSource;
    use alloy_primitives::{address, U256};
    use canopy_core::{Chain, OrgUnit};

    fn freeze() -> FreezeConfig {
        FreezeConfig {
            freeze_proposal_period: 604800,
            freeze_period: 604800,
            timelock_period: 86400,
            execution_period: 86400,
        }
    }

    fn unit(name: &str, children: Vec<OrgUnit>) -> OrgUnit {
        OrgUnit {
            name: name.into(),
            owners: vec![address!("1111111111111111111111111111111111111111")],
            threshold: 1,
            allocation: U256::ZERO,
            children,
        }
    }

    fn derived(root: &OrgUnit) -> (ContractAddresses, DerivedUnit) {
        let contracts = ContractAddresses::for_chain(Chain::Sepolia);
        let ctx = DeriveContext {
            contracts: &contracts,
            proxy_creation_code: &[0x60, 0x80],
        };
        let tree = derive_tree(root, &ctx, &mut SequentialSaltSource::new(1));
        (contracts, tree)
    }

    #[test]
    fn test_two_top_level_calls_per_unit() {
        let root = unit(
            "root",
            vec![
                unit("a", vec![unit("a1", Vec::new())]),
                unit("b", Vec::new()),
            ],
        );
        let (contracts, tree) = derived(&root);
        let freeze = freeze();
        let ctx = AssembleContext {
            contracts: &contracts,
            freeze: &freeze,
        };
        let calls = assemble_tree(&ctx, &tree).unwrap();
        assert_eq!(calls.len(), 2 * 4);
    }

    #[test]
    fn test_parent_calls_precede_child_calls() {
        let root = unit("root", vec![unit("child", Vec::new())]);
        let (contracts, tree) = derived(&root);
        let freeze = freeze();
        let ctx = AssembleContext {
            contracts: &contracts,
            freeze: &freeze,
        };
        let calls = assemble_tree(&ctx, &tree).unwrap();

        // Both deploy calls target the account factory; the root's comes
        // first and carries the root's salt nonce in its calldata.
        assert_eq!(calls[0].to, contracts.account_proxy_factory);
        assert_eq!(calls[1].to, tree.derived.predicted_address);
        assert_eq!(calls[2].to, contracts.account_proxy_factory);
        assert_eq!(calls[3].to, tree.children[0].derived.predicted_address);
    }

    #[test]
    fn test_missing_parent_threshold_is_fatal() {
        let root = unit("solo", Vec::new());
        let (contracts, tree) = derived(&root);
        let freeze = freeze();
        let ctx = AssembleContext {
            contracts: &contracts,
            freeze: &freeze,
        };
        let err = assemble_node(
            &ctx,
            &tree,
            Some(address!("00000000000000000000000000000000000000aa")),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CanopyError::Configuration { .. }));
        assert!(err.to_string().contains("solo"));
    }

    #[test]
    fn test_root_skips_module_stack() {
        let root = unit("root", vec![unit("child", Vec::new())]);
        let (contracts, tree) = derived(&root);
        let freeze = freeze();
        let ctx = AssembleContext {
            contracts: &contracts,
            freeze: &freeze,
        };

        let root_batch = configuration_batch(&ctx, &tree, None, None).unwrap();
        // name + one child declaration + bootstrap removal
        assert_eq!(root_batch.len(), 3);
        assert_eq!(root_batch[0].to, contracts.registry);
        assert_eq!(root_batch[1].to, contracts.registry);
        assert_eq!(root_batch[2].to, tree.derived.predicted_address);

        let child_batch = configuration_batch(
            &ctx,
            &tree.children[0],
            Some(tree.derived.predicted_address),
            Some(tree.threshold),
        )
        .unwrap();
        // module stack (5) + name + no children + bootstrap removal
        assert_eq!(child_batch.len(), 7);
        assert_eq!(child_batch[0].to, contracts.module_proxy_factory);
        assert_eq!(child_batch[2].to, contracts.module_proxy_factory);
        assert_eq!(child_batch[3].to, contracts.module_proxy_factory);
    }
}
