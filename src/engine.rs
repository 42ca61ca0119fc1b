//! Ganging engine: orchestration, gang/skip decision, allocation
//! tracking, and finalization.
//!
//! A run is a single synchronous pass over one batch of jobs. All
//! intermediate accounting lives in an explicit run context threaded
//! through the pass; external job state is only ever touched through the
//! commit list in the returned [`RunReport`], so an abandoned run leaves
//! no partial side effects.

use serde::{Deserialize, Serialize};

use crate::cost::{self, CostBook, CRITICAL_PRIORITY};
use crate::grouping::{self, GroupingPolicy};
use crate::models::{
    build_slot_queue, Job, OutputSlot, RunReport, RunSummary, SlotAssignment, SlotCommit,
};
use crate::selection::{select_combination, Draw};
use crate::templates::{build_catalog, LayoutTemplate};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compatibility grouping strategy.
    pub policy: GroupingPolicy,
    /// Consolidation cap: sheets a slot absorbs before the queue advances.
    pub max_sheets_per_slot: u32,
    /// Lanes at or above this occupancy are excluded from the slot queue.
    pub overload_threshold: u32,
    /// Per-group cost configurations.
    pub costs: CostBook,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: GroupingPolicy::default(),
            max_sheets_per_slot: 3,
            overload_threshold: 20,
            costs: CostBook::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the grouping policy.
    pub fn with_policy(mut self, policy: GroupingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the consolidation cap.
    pub fn with_max_sheets_per_slot(mut self, sheets: u32) -> Self {
        self.max_sheets_per_slot = sheets.max(1);
        self
    }

    /// Sets the lane overload threshold.
    pub fn with_overload_threshold(mut self, threshold: u32) -> Self {
        self.overload_threshold = threshold;
        self
    }

    /// Sets the cost book.
    pub fn with_costs(mut self, costs: CostBook) -> Self {
        self.costs = costs;
        self
    }
}

/// Outcome of the gang/skip decision for one candidate combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GangDecision {
    /// Commit the whole combination now.
    Commit,
    /// Commit only the deadline-critical draws; defer the rest.
    CommitUrgent(Vec<Draw>),
    /// Leave everything unallocated for a better opportunity.
    Defer,
}

/// Decides whether a candidate combination should be committed.
///
/// Cost rule: commit when at least half of the constituent jobs are
/// individually cost-effective to gang. Jobs at or past the critical
/// priority threshold override the cost rule — if the combination as a
/// whole is deferred, the urgent subset is still committed.
pub fn gang_decision(
    combination: &[Draw],
    priorities: &[i32],
    cost_effective: &[bool],
) -> GangDecision {
    if combination.is_empty() {
        return GangDecision::Defer;
    }

    let effective = combination
        .iter()
        .filter(|d| cost_effective[d.job])
        .count();
    if effective * 2 >= combination.len() {
        return GangDecision::Commit;
    }

    let urgent: Vec<Draw> = combination
        .iter()
        .copied()
        .filter(|d| priorities[d.job] >= CRITICAL_PRIORITY)
        .collect();
    if !urgent.is_empty() {
        return GangDecision::CommitUrgent(urgent);
    }

    GangDecision::Defer
}

/// One consumed slot's plan: which draws landed there, sheet by sheet.
#[derive(Debug, Clone)]
struct PlanEntry {
    /// Index into the run's slot queue.
    slot: usize,
    /// Sheets committed into this slot so far.
    sheets: u32,
    /// `(job index, quantity)` per draw, in commit order.
    items: Vec<(usize, u32)>,
}

/// Run-local allocation state, threaded explicitly through the pass.
///
/// Invariant: `allocated[job] ≤ jobs[job].remaining_quantity()` at all
/// times — the selector only ever draws from the difference.
#[derive(Debug)]
struct RunContext {
    priorities: Vec<i32>,
    cost_effective: Vec<bool>,
    allocated: Vec<u32>,
    queue: Vec<OutputSlot>,
    plan: Vec<PlanEntry>,
    /// Next unused queue index.
    cursor: usize,
    max_sheets_per_slot: u32,
}

impl RunContext {
    /// Whether another sheet can be committed: the current slot is under
    /// its consolidation cap, or another slot remains in the queue.
    fn has_slot_capacity(&self) -> bool {
        match self.plan.last() {
            Some(entry) if entry.sheets < self.max_sheets_per_slot => true,
            _ => self.cursor < self.queue.len(),
        }
    }

    /// Records one committed sheet's draws against the current slot,
    /// advancing the queue when the consolidation cap is reached.
    fn commit(&mut self, draws: &[Draw]) {
        let need_new_slot = match self.plan.last() {
            Some(entry) => entry.sheets >= self.max_sheets_per_slot,
            None => true,
        };
        if need_new_slot {
            let slot = self.cursor;
            self.cursor += 1;
            self.plan.push(PlanEntry {
                slot,
                sheets: 0,
                items: Vec::new(),
            });
        }
        if let Some(entry) = self.plan.last_mut() {
            entry.sheets += 1;
            for draw in draws {
                entry.items.push((draw.job, draw.quantity));
                self.allocated[draw.job] += draw.quantity;
            }
        }
    }
}

/// The ganging optimization engine.
///
/// Builds its template catalog once at construction and runs batches of
/// jobs against ordered slot queues. Deterministic: the same inputs and
/// clock value always produce the same report.
///
/// # Example
/// ```
/// use transfer_ganging::engine::GangingEngine;
/// use transfer_ganging::models::{Job, OutputSlot, ProductType, TransferSize};
///
/// let jobs = vec![
///     Job::new("J1", ProductType::FullColour, TransferSize::A6).with_quantity(8),
/// ];
/// let slots = vec![OutputSlot::new("LAY-A1")];
///
/// let report = GangingEngine::new().run(&jobs, &slots, 0);
/// assert_eq!(report.summary.total_allocated, 8);
/// assert_eq!(report.commit_for("J1").unwrap().slot_id, "LAY-A1");
/// ```
#[derive(Debug, Clone)]
pub struct GangingEngine {
    templates: Vec<LayoutTemplate>,
    config: EngineConfig,
}

impl GangingEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            templates: build_catalog(),
            config,
        }
    }

    /// Runs one ganging pass.
    ///
    /// `now_ms` is the clock value deadlines are measured against, in the
    /// same epoch as [`Job::deadline`](crate::models::Job). Jobs already
    /// resting in a lay slot are invisible to the pass.
    pub fn run(&self, jobs: &[Job], slots: &[OutputSlot], now_ms: i64) -> RunReport {
        let queue = build_slot_queue(slots, self.config.overload_threshold);

        let mut ctx = RunContext {
            priorities: jobs
                .iter()
                .map(|j| cost::gang_priority(j, self.config.costs.for_job(j), now_ms))
                .collect(),
            cost_effective: jobs
                .iter()
                .map(|j| cost::is_cost_effective(j, self.config.costs.for_job(j)))
                .collect(),
            allocated: vec![0; jobs.len()],
            queue,
            plan: Vec::new(),
            cursor: 0,
            max_sheets_per_slot: self.config.max_sheets_per_slot,
        };

        let eligible: Vec<usize> = (0..jobs.len())
            .filter(|&i| jobs[i].remaining_quantity() > 0)
            .collect();

        for (_, mut pool) in grouping::primary_pools(jobs, &eligible, self.config.policy) {
            sort_by_priority(&mut pool, &ctx.priorities);
            self.process_pool(jobs, &pool, &mut ctx);
        }

        if self.config.policy.has_cross_pass() {
            let leftovers: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|&i| jobs[i].remaining_quantity() > ctx.allocated[i])
                .collect();
            for (_, mut pool) in grouping::cross_pools(jobs, &leftovers) {
                sort_by_priority(&mut pool, &ctx.priorities);
                self.process_pool(jobs, &pool, &mut ctx);
            }
        }

        finalize(jobs, ctx)
    }

    /// Repeatedly selects, decides, and commits combinations for one pool
    /// until the pool is drained, slots run out, or a selection is
    /// deferred for a better opportunity.
    fn process_pool(&self, jobs: &[Job], pool: &[usize], ctx: &mut RunContext) {
        loop {
            if !ctx.has_slot_capacity() {
                break;
            }
            let combination = select_combination(
                jobs,
                pool,
                &ctx.priorities,
                &ctx.allocated,
                &self.templates,
            );
            if combination.is_empty() {
                break;
            }
            match gang_decision(&combination, &ctx.priorities, &ctx.cost_effective) {
                GangDecision::Commit => ctx.commit(&combination),
                GangDecision::CommitUrgent(urgent) => ctx.commit(&urgent),
                GangDecision::Defer => break,
            }
        }
    }
}

impl Default for GangingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_priority(pool: &mut [usize], priorities: &[i32]) {
    // Stable, so the externally supplied order resolves ties.
    pool.sort_by(|&a, &b| priorities[b].cmp(&priorities[a]));
}

/// Sweeps the slot plan and emits final commits.
///
/// A job commits once its accumulated allocation reaches its remaining
/// quantity, to the first slot that recorded quantity for it. Jobs with
/// allocations but no plan entry (a state the tracker never produces, but
/// guarded against) fall back to the next unused slot in queue order.
fn finalize(jobs: &[Job], ctx: RunContext) -> RunReport {
    let mut first_slot: Vec<Option<usize>> = vec![None; jobs.len()];
    let mut seen_order: Vec<usize> = Vec::new();

    let assignments: Vec<SlotAssignment> = ctx
        .plan
        .iter()
        .map(|entry| SlotAssignment {
            slot_id: ctx.queue[entry.slot].id.clone(),
            sheets: entry.sheets,
            items: entry
                .items
                .iter()
                .map(|&(job, qty)| (jobs[job].id.clone(), qty))
                .collect(),
        })
        .collect();

    for entry in &ctx.plan {
        for &(job, _) in &entry.items {
            if first_slot[job].is_none() {
                first_slot[job] = Some(entry.slot);
                seen_order.push(job);
            }
        }
    }

    let fully_allocated = |job: usize| {
        let remaining = jobs[job].remaining_quantity();
        remaining > 0 && ctx.allocated[job] >= remaining && !jobs[job].is_laid()
    };

    let mut commits: Vec<SlotCommit> = Vec::new();
    for &job in &seen_order {
        if fully_allocated(job) {
            if let Some(slot) = first_slot[job] {
                commits.push(SlotCommit {
                    job_id: jobs[job].id.clone(),
                    slot_id: ctx.queue[slot].id.clone(),
                });
            }
        }
    }

    // Defensive sweep: allocated but absent from the plan.
    let mut next_unused = ctx.cursor;
    for job in 0..jobs.len() {
        if ctx.allocated[job] > 0 && first_slot[job].is_none() && fully_allocated(job) {
            if let Some(slot) = ctx.queue.get(next_unused) {
                commits.push(SlotCommit {
                    job_id: jobs[job].id.clone(),
                    slot_id: slot.id.clone(),
                });
                next_unused += 1;
            }
        }
    }

    let total_allocated: u32 = ctx.allocated.iter().sum();
    let unallocated: u32 = jobs
        .iter()
        .enumerate()
        .map(|(i, j)| j.remaining_quantity().saturating_sub(ctx.allocated[i]))
        .sum();
    let jobs_committed = commits.len();

    RunReport {
        commits,
        assignments,
        summary: RunSummary {
            total_allocated,
            jobs_committed,
            unallocated,
        },
    }
}
