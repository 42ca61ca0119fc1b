//! Combination selector.
//!
//! For a compatibility-filtered pool of jobs, picks the best combination
//! of job-quantity draws to fill at most one sheet, given each job's
//! availability for this run. Walks the template catalog in weight order
//! and falls back to single-size grid fills when no template matches.

use crate::geometry::sheet_capacity;
use crate::models::{Job, TransferSize};
use crate::templates::LayoutTemplate;

/// One job-quantity draw within a combination.
///
/// `job` is an index into the run's job slice, following the engine's
/// index-based referencing (a combination never owns job data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// Index of the drawn job.
    pub job: usize,
    /// Units drawn from that job for this sheet.
    pub quantity: u32,
}

/// A scored candidate combination for one sheet.
#[derive(Debug, Clone)]
struct Scored {
    draws: Vec<Draw>,
    score: f64,
}

/// Per-size availability inventory: job indices in descending priority
/// order (stable by pool order), sizes in first-seen pool order.
struct Inventory {
    sizes: Vec<(TransferSize, Vec<usize>)>,
}

impl Inventory {
    fn jobs_of(&self, size: TransferSize) -> Option<&[usize]> {
        self.sizes
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, jobs)| jobs.as_slice())
    }
}

/// Selects the best feasible combination for one sheet.
///
/// `priorities` and `allocated` are parallel to `jobs`; a job's available
/// quantity is its remaining quantity minus what this run has already
/// allocated to it. Returns an empty vector when nothing can be placed —
/// an expected outcome, not an error.
///
/// A sheet-native job short-circuits everything: it is never combined and
/// always consumes a whole sheet per unit, so the highest-priority native
/// job is returned alone with quantity 1.
pub fn select_combination(
    jobs: &[Job],
    pool: &[usize],
    priorities: &[i32],
    allocated: &[u32],
    templates: &[LayoutTemplate],
) -> Vec<Draw> {
    let available = |idx: usize| jobs[idx].remaining_quantity().saturating_sub(allocated[idx]);

    // Native size first: one unit, one sheet, nothing else on it.
    let mut best_native: Option<usize> = None;
    for &idx in pool {
        if jobs[idx].size.is_native() && available(idx) > 0 {
            match best_native {
                Some(current) if priorities[idx] <= priorities[current] => {}
                _ => best_native = Some(idx),
            }
        }
    }
    if let Some(idx) = best_native {
        return vec![Draw { job: idx, quantity: 1 }];
    }

    let inventory = build_inventory(jobs, pool, priorities, &available);
    if inventory.sizes.is_empty() {
        return Vec::new();
    }

    let mut best: Option<Scored> = None;

    for template in templates {
        if let Some(candidate) = try_template(template, &inventory, priorities, &available) {
            if best.as_ref().map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
    }

    if best.is_none() {
        best = best_single_size(&inventory, priorities, &available);
    }

    best.map(|s| s.draws).unwrap_or_default()
}

fn build_inventory(
    jobs: &[Job],
    pool: &[usize],
    priorities: &[i32],
    available: &impl Fn(usize) -> u32,
) -> Inventory {
    let mut sizes: Vec<(TransferSize, Vec<usize>)> = Vec::new();
    for &idx in pool {
        let size = jobs[idx].size;
        if size.is_native() || available(idx) == 0 {
            continue;
        }
        match sizes.iter_mut().find(|(s, _)| *s == size) {
            Some((_, members)) => members.push(idx),
            None => sizes.push((size, vec![idx])),
        }
    }
    // Descending priority, stable so supplied order breaks ties.
    for (_, members) in sizes.iter_mut() {
        members.sort_by(|&a, &b| priorities[b].cmp(&priorities[a]));
    }
    Inventory { sizes }
}

/// Tries to fill a template from the inventory.
///
/// Feasible only if every required size can be fully covered; draws come
/// from jobs in descending priority order, each contributing up to its
/// available quantity before the next is tapped.
fn try_template(
    template: &LayoutTemplate,
    inventory: &Inventory,
    priorities: &[i32],
    available: &impl Fn(usize) -> u32,
) -> Option<Scored> {
    let mut draws: Vec<Draw> = Vec::new();
    let mut total_priority: i64 = 0;
    let mut total_items: u32 = 0;

    for &(size, needed) in &template.layout {
        let members = inventory.jobs_of(size)?;
        let on_hand: u32 = members.iter().map(|&idx| available(idx)).sum();
        if on_hand < needed {
            return None;
        }

        let mut drawn = 0;
        for &idx in members {
            if drawn >= needed {
                break;
            }
            let take = available(idx).min(needed - drawn);
            if take > 0 {
                draws.push(Draw { job: idx, quantity: take });
                total_priority += i64::from(priorities[idx]) * i64::from(take);
                total_items += take;
                drawn += take;
            }
        }
    }

    if draws.is_empty() {
        return None;
    }

    let avg_priority = total_priority as f64 / f64::from(total_items);
    let score = template.utilization * 1000.0
        + template.weight * 20.0
        + avg_priority * 10.0
        + f64::from(total_items) * 2.0;

    Some(Scored { draws, score })
}

/// Single-size fallback: fill one size's true grid capacity by priority.
fn best_single_size(
    inventory: &Inventory,
    priorities: &[i32],
    available: &impl Fn(usize) -> u32,
) -> Option<Scored> {
    let mut best: Option<Scored> = None;

    for (size, members) in &inventory.sizes {
        let capacity = sheet_capacity(*size);
        if capacity == 0 {
            continue;
        }

        let mut draws: Vec<Draw> = Vec::new();
        let mut drawn = 0;
        let mut total_priority: i64 = 0;

        for &idx in members {
            if drawn >= capacity {
                break;
            }
            let take = available(idx).min(capacity - drawn);
            if take > 0 {
                draws.push(Draw { job: idx, quantity: take });
                total_priority += i64::from(priorities[idx]) * i64::from(take);
                drawn += take;
            }
        }

        if draws.is_empty() {
            continue;
        }

        let fill = f64::from(drawn) / f64::from(capacity);
        let avg_priority = total_priority as f64 / f64::from(drawn);
        let score = fill * 800.0 + avg_priority * 10.0 + f64::from(drawn);

        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Scored { draws, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;
    use crate::templates::build_catalog;

    fn job(id: &str, size: TransferSize, quantity: u32) -> Job {
        Job::new(id, ProductType::FullColour, size).with_quantity(quantity)
    }

    fn select(jobs: &[Job], priorities: &[i32]) -> Vec<Draw> {
        let pool: Vec<usize> = (0..jobs.len()).collect();
        let allocated = vec![0; jobs.len()];
        select_combination(jobs, &pool, priorities, &allocated, &build_catalog())
    }

    #[test]
    fn test_empty_pool() {
        assert!(select(&[], &[]).is_empty());
    }

    #[test]
    fn test_native_size_singleton() {
        let jobs = vec![
            job("a3_low", TransferSize::A3, 5),
            job("a3_high", TransferSize::A3, 5),
            job("a6", TransferSize::A6, 10),
        ];
        let combo = select(&jobs, &[10, 50, 100]);
        // Highest-priority A3 wins, quantity 1, nothing else combined.
        assert_eq!(combo, vec![Draw { job: 1, quantity: 1 }]);
    }

    #[test]
    fn test_template_match_two_a4() {
        let jobs = vec![job("a", TransferSize::A4, 1), job("b", TransferSize::A4, 1)];
        let combo = select(&jobs, &[0, 0]);
        assert_eq!(combo.len(), 2);
        let total: u32 = combo.iter().map(|d| d.quantity).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_mixed_template_preferred_over_single_size() {
        // Enough stock for 2×A5 + 2×A6 + 4×100x70 (premium tier).
        let jobs = vec![
            job("a5", TransferSize::A5, 2),
            job("a6", TransferSize::A6, 2),
            job("small", TransferSize::S100x70, 4),
        ];
        let combo = select(&jobs, &[0, 0, 0]);
        let total: u32 = combo.iter().map(|d| d.quantity).sum();
        assert_eq!(total, 8);
        assert!(combo.iter().any(|d| d.job == 2 && d.quantity == 4));
    }

    #[test]
    fn test_single_size_fallback_caps_at_capacity() {
        // No template covers A6 alone; fallback fills the 8-slot grid.
        let jobs: Vec<Job> = (0..20)
            .map(|i| job(&format!("j{i}"), TransferSize::A6, 1))
            .collect();
        let combo = select(&jobs, &vec![0; 20]);
        assert_eq!(combo.len(), 8);
        assert!(combo.iter().all(|d| d.quantity == 1));
    }

    #[test]
    fn test_draws_follow_priority_order() {
        let jobs = vec![
            job("low", TransferSize::A6, 8),
            job("high", TransferSize::A6, 3),
        ];
        let combo = select(&jobs, &[0, 100]);
        // High-priority job drained first, remainder from the other.
        assert_eq!(combo[0], Draw { job: 1, quantity: 3 });
        assert_eq!(combo[1], Draw { job: 0, quantity: 5 });
    }

    #[test]
    fn test_availability_respects_prior_allocations() {
        let jobs = vec![job("a", TransferSize::A6, 8)];
        let pool = vec![0];
        let combo =
            select_combination(&jobs, &pool, &[0], &[6], &build_catalog());
        assert_eq!(combo, vec![Draw { job: 0, quantity: 2 }]);
    }

    #[test]
    fn test_exhausted_pool_yields_nothing() {
        let jobs = vec![job("a", TransferSize::A6, 4)];
        let combo = select_combination(&jobs, &[0], &[0], &[4], &build_catalog());
        assert!(combo.is_empty());
    }

    #[test]
    fn test_laid_job_invisible() {
        let laid = job("a", TransferSize::A6, 4).with_current_slot("LAY-A1");
        let combo = select(&[laid], &[0]);
        assert!(combo.is_empty());
    }
}
