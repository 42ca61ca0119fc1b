//! Ganging economics: waste cost, cost-effectiveness, gang priority.
//!
//! A job is worth ganging when the material wasted by running it alone
//! exceeds the cost of setting up a dedicated screen for it. Deadline
//! proximity turns into a numeric gang priority that both orders draw
//! preference and, at 100 points, overrides the cost logic entirely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::sheet_capacity;
use crate::models::Job;

const MS_PER_DAY: i64 = 86_400_000;

/// Priority emitted by the ≤ 1-day deadline bucket. By construction this
/// is also the always-commit threshold: a critical deadline and a forced
/// gang are synonymous.
pub const CRITICAL_PRIORITY: i32 = 100;

/// Cost configuration for one job-owning group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Cost of setting up screens for a dedicated print run.
    pub screen_setup_cost: f64,
    /// Base cost per sheet.
    pub per_sheet_cost: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            screen_setup_cost: 50.0,
            per_sheet_cost: 2.0,
        }
    }
}

/// Per-group cost configurations with a default fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBook {
    /// Overrides keyed by cost group.
    pub by_group: HashMap<String, CostConfig>,
    /// Configuration used when a job has no group or no override exists.
    pub default: CostConfig,
}

impl CostBook {
    /// Creates a cost book with only the default configuration.
    pub fn new(default: CostConfig) -> Self {
        Self {
            by_group: HashMap::new(),
            default,
        }
    }

    /// Adds a per-group override.
    pub fn with_group(mut self, group: impl Into<String>, config: CostConfig) -> Self {
        self.by_group.insert(group.into(), config);
        self
    }

    /// Resolves the configuration for a job.
    pub fn for_job(&self, job: &Job) -> &CostConfig {
        job.cost_group
            .as_deref()
            .and_then(|g| self.by_group.get(g))
            .unwrap_or(&self.default)
    }
}

/// Estimated material waste cost of running a job's quantity alone.
///
/// `sheets = ceil(qty / capacity)`; the waste fraction is the unfilled
/// share of those sheets. The sheet-native size has capacity 0 and is
/// reported as zero waste — it always fills its sheet exactly.
pub fn waste_cost(job: &Job, config: &CostConfig) -> f64 {
    let capacity = sheet_capacity(job.size);
    if capacity == 0 || job.quantity == 0 {
        return 0.0;
    }
    let sheets = job.quantity.div_ceil(capacity);
    let total_capacity = sheets * capacity;
    let waste_fraction = f64::from(total_capacity - job.quantity) / f64::from(total_capacity);
    f64::from(sheets) * config.per_sheet_cost * waste_fraction
}

/// Whether ganging this job is individually cost-effective:
/// its standalone waste cost is below the screen setup cost.
pub fn is_cost_effective(job: &Job, config: &CostConfig) -> bool {
    waste_cost(job, config) < config.screen_setup_cost
}

/// Gang priority from deadline proximity plus a cost-effectiveness bonus.
///
/// Days until deadline are floored (`div_euclid`), so a deadline in the
/// past lands in the critical bucket. Buckets: ≤ 1 day → 100, ≤ 3 days →
/// 50, ≤ 7 days → 25, else 0; +10 when individually cost-effective.
pub fn gang_priority(job: &Job, config: &CostConfig, now_ms: i64) -> i32 {
    let mut priority = 0;

    if let Some(deadline) = job.deadline {
        let days_until = (deadline - now_ms).div_euclid(MS_PER_DAY);
        if days_until <= 1 {
            priority += CRITICAL_PRIORITY;
        } else if days_until <= 3 {
            priority += 50;
        } else if days_until <= 7 {
            priority += 25;
        }
    }

    if is_cost_effective(job, config) {
        priority += 10;
    }

    priority
}
