//! Compatibility grouping.
//!
//! Partitions jobs into pools allowed to share a sheet. Grouping runs in
//! two tiers: a primary partition by product type, then — for jobs left
//! over after the primary pass — wider cross-compatibility pools that let
//! small leftovers combine across the compatibility matrix instead of
//! stranding as singleton groups that never reach cost-effective
//! utilization. Zero transfers are never pooled with anything.
//!
//! The tier boundary changed between iterations of the shop's process, so
//! it is a [`GroupingPolicy`] rather than a hardcoded law.

use serde::{Deserialize, Serialize};

use crate::models::{ColorVariant, Job, ProductType};

/// Which grouping strategy a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Primary pools by product type, then cross-compatibility pools over
    /// leftovers. The most complete strategy and the default.
    #[default]
    TwoTier,
    /// Single-colour jobs sub-grouped by exact color in the primary pass;
    /// no cross pass. Strict pairwise compatibility.
    Strict,
    /// Single-pass variant: the white/silver bridges are formed
    /// immediately (full colour ∪ white, metal ∪ silver); no cross pass.
    Merged,
}

impl GroupingPolicy {
    /// Whether the policy runs the cross-compatibility pass.
    pub fn has_cross_pass(self) -> bool {
        self == GroupingPolicy::TwoTier
    }
}

/// Primary pool identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    FullColour,
    SingleColour,
    /// Single colour keyed by exact color (Strict and Merged policies).
    SingleColourOf(Option<ColorVariant>),
    Metal,
    /// Full colour ∪ single-colour white (Merged policy).
    FullColourWhite,
    /// Metal ∪ single-colour silver (Merged policy).
    MetalSilver,
    /// A Zero transfer, isolated per job.
    Zero(String),
}

/// Cross-compatibility pool identity (second tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossPool {
    /// Full colour ∪ single-colour white.
    FullColourWhite,
    /// Metal ∪ single-colour silver.
    MetalSilver,
    /// Remaining single colours, pooled. Widens the candidate pool only;
    /// callers needing strict same-color purity filter by color first.
    OtherSingleColour,
}

fn group_key(job: &Job, policy: GroupingPolicy) -> GroupKey {
    match (policy, job.product_type) {
        (_, ProductType::Zero) => GroupKey::Zero(job.id.clone()),

        (GroupingPolicy::TwoTier, ProductType::FullColour) => GroupKey::FullColour,
        (GroupingPolicy::TwoTier, ProductType::SingleColour) => GroupKey::SingleColour,
        (GroupingPolicy::TwoTier, ProductType::Metal) => GroupKey::Metal,

        (GroupingPolicy::Strict, ProductType::FullColour) => GroupKey::FullColour,
        (GroupingPolicy::Strict, ProductType::SingleColour) => {
            GroupKey::SingleColourOf(job.color)
        }
        (GroupingPolicy::Strict, ProductType::Metal) => GroupKey::Metal,

        (GroupingPolicy::Merged, ProductType::FullColour) => GroupKey::FullColourWhite,
        (GroupingPolicy::Merged, ProductType::SingleColour) => match job.color {
            Some(ColorVariant::White) => GroupKey::FullColourWhite,
            Some(ColorVariant::Silver) => GroupKey::MetalSilver,
            other => GroupKey::SingleColourOf(other),
        },
        (GroupingPolicy::Merged, ProductType::Metal) => GroupKey::MetalSilver,
    }
}

/// Partitions job indices into primary pools, in first-seen order.
///
/// Input order is preserved within each pool, so downstream stable sorts
/// resolve ties by the externally supplied order.
pub fn primary_pools(jobs: &[Job], indices: &[usize], policy: GroupingPolicy) -> Vec<(GroupKey, Vec<usize>)> {
    let mut pools: Vec<(GroupKey, Vec<usize>)> = Vec::new();
    for &idx in indices {
        let key = group_key(&jobs[idx], policy);
        match pools.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(idx),
            None => pools.push((key, vec![idx])),
        }
    }
    pools
}

/// Builds the cross-compatibility pools over leftover job indices.
///
/// Pools, in fixed order: full colour ∪ white single colour, metal ∪
/// silver single colour, then all remaining single colours together.
/// Zero transfers never enter a cross pool. Empty pools are omitted.
pub fn cross_pools(jobs: &[Job], leftovers: &[usize]) -> Vec<(CrossPool, Vec<usize>)> {
    let mut fc_white = Vec::new();
    let mut metal_silver = Vec::new();
    let mut other_sc = Vec::new();

    for &idx in leftovers {
        let job = &jobs[idx];
        match job.product_type {
            ProductType::FullColour => fc_white.push(idx),
            ProductType::Metal => metal_silver.push(idx),
            ProductType::SingleColour => match job.color {
                Some(ColorVariant::White) => fc_white.push(idx),
                Some(ColorVariant::Silver) => metal_silver.push(idx),
                _ => other_sc.push(idx),
            },
            ProductType::Zero => {}
        }
    }

    let mut pools = Vec::new();
    if !fc_white.is_empty() {
        pools.push((CrossPool::FullColourWhite, fc_white));
    }
    if !metal_silver.is_empty() {
        pools.push((CrossPool::MetalSilver, metal_silver));
    }
    if !other_sc.is_empty() {
        pools.push((CrossPool::OtherSingleColour, other_sc));
    }
    pools
}
