//! The crafting system.
//!
//! One pass per tick over a queue: completions for every active job
//! whose timer has elapsed, then at most one start for the FIFO head if
//! a slot is free. Completions emitted this tick do not free their slot
//! until the dispatcher applies them, so a full queue starts nothing in
//! the same pass -- the backlog drains one job per tick.

use guildhall_types::Timestamp;

use guildhall_entities::{CraftJob, CraftingQueue};

use crate::actions::Action;

/// Propose the crafting transitions due on `queue` at `now`.
///
/// Active job ids with no matching entry in `jobs` are logged and
/// skipped; nothing else in the pass is affected.
pub fn process_crafting_queue(
    queue: &CraftingQueue,
    jobs: &[&CraftJob],
    now: Timestamp,
) -> Vec<Action> {
    let mut actions = Vec::new();

    for id in queue.active() {
        let Some(job) = jobs.iter().find(|job| job.id() == id) else {
            tracing::warn!(
                org = %queue.org(),
                job = %id,
                "active crafting job is missing from the job set"
            );
            continue;
        };
        if job.is_ready(now) {
            actions.push(Action::CompleteCrafting {
                queue: queue.org().clone(),
                job: id.clone(),
            });
        }
    }

    if queue.has_free_slot() {
        if let Some(next) = queue.next_queued() {
            actions.push(Action::StartCrafting {
                queue: queue.org().clone(),
                job: next.clone(),
            });
        }
    }

    actions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guildhall_types::{CraftJobId, OrgId, Resource, ResourceBundle, TickDuration};

    fn org() -> OrgId {
        OrgId::parse("org-1").unwrap()
    }

    fn job(id: &str) -> CraftJob {
        CraftJob::new(
            CraftJobId::parse(id).unwrap(),
            org(),
            ResourceBundle::of(Resource::Materials, 1),
            TickDuration::from_minutes(10),
            Timestamp::UNIX_EPOCH,
        )
    }

    fn started(id: &str, at: Timestamp) -> CraftJob {
        let mut j = job(id);
        j.start(at).unwrap();
        j
    }

    #[test]
    fn ready_jobs_complete() {
        let mut queue = CraftingQueue::new(org(), 2).unwrap();
        queue.enqueue(CraftJobId::parse("j-1").unwrap());
        queue.enqueue(CraftJobId::parse("j-2").unwrap());
        let _ = queue.promote_next().unwrap();
        let _ = queue.promote_next().unwrap();

        let done = started("j-1", Timestamp::UNIX_EPOCH);
        let pending = started("j-2", Timestamp::from_millis(500_000));
        let now = done.complete_at().unwrap();

        let actions = process_crafting_queue(&queue, &[&done, &pending], now);
        assert_eq!(
            actions,
            vec![Action::CompleteCrafting {
                queue: org(),
                job: CraftJobId::parse("j-1").unwrap(),
            }],
        );
    }

    #[test]
    fn one_start_per_tick_even_with_multiple_free_slots() {
        let mut queue = CraftingQueue::new(org(), 3).unwrap();
        queue.enqueue(CraftJobId::parse("j-1").unwrap());
        queue.enqueue(CraftJobId::parse("j-2").unwrap());

        let actions = process_crafting_queue(&queue, &[], Timestamp::UNIX_EPOCH);
        assert_eq!(
            actions,
            vec![Action::StartCrafting {
                queue: org(),
                job: CraftJobId::parse("j-1").unwrap(),
            }],
        );
    }

    #[test]
    fn completion_does_not_free_a_slot_this_tick() {
        let mut queue = CraftingQueue::new(org(), 1).unwrap();
        queue.enqueue(CraftJobId::parse("j-1").unwrap());
        let _ = queue.promote_next().unwrap();
        queue.enqueue(CraftJobId::parse("j-2").unwrap());

        let active = started("j-1", Timestamp::UNIX_EPOCH);
        let now = active.complete_at().unwrap();

        // The active job completes, but the queued one must wait for the
        // next pass, after the dispatcher has released the slot.
        let actions = process_crafting_queue(&queue, &[&active], now);
        assert_eq!(
            actions,
            vec![Action::CompleteCrafting {
                queue: org(),
                job: CraftJobId::parse("j-1").unwrap(),
            }],
        );
    }

    #[test]
    fn idle_queue_emits_nothing() {
        let queue = CraftingQueue::new(org(), 1).unwrap();
        let actions = process_crafting_queue(&queue, &[], Timestamp::UNIX_EPOCH);
        assert!(actions.is_empty());
    }

    #[test]
    fn missing_job_entry_is_skipped() {
        let mut queue = CraftingQueue::new(org(), 1).unwrap();
        queue.enqueue(CraftJobId::parse("j-ghost").unwrap());
        let _ = queue.promote_next().unwrap();

        let actions = process_crafting_queue(&queue, &[], Timestamp::from_millis(1));
        assert!(actions.is_empty());
    }
}
