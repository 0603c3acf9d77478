//! The task resolution system.
//!
//! Resolution is a pure batch computation: ready tasks in, a report of
//! outcomes, rewards, and adventurer changes out. Nothing is mutated --
//! the command dispatcher applies the report (marks tasks completed,
//! credits wallets, applies XP and injuries).
//!
//! # Determinism
//!
//! The same inputs always produce the same report. There is no clock
//! (`now` is an argument) and no RNG: the injury roll on a failed task
//! is an FNV-1a hash of the adventurer id, which is part of the
//! documented contract rather than an implementation detail.

use serde::{Deserialize, Serialize};

use guildhall_types::{
    AdventurerId, ResourceBundle, Stat, StatMap, TaskId, TaskOutcome, Timestamp,
};

use guildhall_entities::{
    AdventurerInstance, FacilityEffect, FacilityInstance, TaskArchetype, TaskInstance,
};

use crate::config::SimulationConfig;
use crate::error::SystemError;

// ---------------------------------------------------------------------------
// Inputs and report
// ---------------------------------------------------------------------------

/// Borrowed inputs for one resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionInputs<'a> {
    /// Candidate tasks; only those ready at `now` are resolved.
    pub tasks: &'a [&'a TaskInstance],
    /// The adventurer pool assigned ids are looked up in.
    pub adventurers: &'a [&'a AdventurerInstance],
    /// The archetype catalog.
    pub catalog: &'a [TaskArchetype],
    /// Facilities whose active effects contribute to scores.
    pub facilities: &'a [&'a FacilityInstance],
}

/// The per-adventurer consequences of one resolved task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentChange {
    /// The adventurer affected.
    pub adventurer: AdventurerId,
    /// XP to award.
    pub xp_gain: u64,
    /// Whether the adventurer was injured.
    pub injured: bool,
}

/// The resolved outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// The resolved task.
    pub task: TaskId,
    /// The outcome category.
    pub outcome: TaskOutcome,
    /// The reward bundle after the party-level multiplier.
    pub rewards: ResourceBundle,
    /// Per-adventurer consequences.
    pub agent_changes: Vec<AgentChange>,
}

/// Everything one resolution pass produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// One result per resolved task, in input order.
    pub results: Vec<TaskResult>,
    /// Soft inconsistencies encountered (dangling archetype references).
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Scoring primitives
// ---------------------------------------------------------------------------

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the id bytes. Stable across platforms and releases; the
/// injury roll below is a documented contract.
fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic injury roll: `hash(id) % 100 < chance_pct`.
pub(crate) fn injury_roll(adventurer: &AdventurerId, chance_pct: u64) -> bool {
    let roll = fnv1a64(adventurer.as_str().as_bytes())
        .checked_rem(100)
        .unwrap_or(0);
    roll < chance_pct
}

/// An adventurer's contribution to a task score: the primary stat at
/// full weight plus the secondary at half weight (floor).
pub(crate) fn adventurer_fit(stats: &StatMap, primary: Stat, secondary: Stat) -> i64 {
    stats
        .get(primary)
        .saturating_add(stats.get(secondary).checked_div(2).unwrap_or(0))
}

/// Sum of active facility stat bonuses touching either scoring stat.
fn facility_bonus(facilities: &[&FacilityInstance], primary: Stat, secondary: Stat) -> i64 {
    facilities
        .iter()
        .filter(|facility| facility.is_active())
        .flat_map(|facility| facility.active_effects().iter())
        .filter_map(|effect| match effect {
            FacilityEffect::StatBonus { stat, amount }
                if *stat == primary || *stat == secondary =>
            {
                Some(*amount)
            }
            _ => None,
        })
        .fold(0_i64, i64::saturating_add)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve every task in `inputs` that is ready at `now`.
///
/// Tasks whose archetype is missing from the catalog are skipped with a
/// collected warning instead of failing the whole batch.
///
/// # Errors
///
/// Returns [`SystemError::Type`] only if a reward multiplication
/// overflows `u64`.
pub fn resolve_tasks(
    inputs: &ResolutionInputs<'_>,
    config: &SimulationConfig,
    now: Timestamp,
) -> Result<ResolutionReport, SystemError> {
    let mut report = ResolutionReport::default();

    for task in inputs.tasks {
        if !task.is_ready_for_resolution(now) {
            continue;
        }

        let Some(archetype) = inputs
            .catalog
            .iter()
            .find(|archetype| archetype.id() == task.archetype())
        else {
            tracing::warn!(
                task = %task.id(),
                archetype = %task.archetype(),
                "task references an archetype missing from the catalog"
            );
            report.warnings.push(format!(
                "task {} references missing archetype {}",
                task.id(),
                task.archetype(),
            ));
            continue;
        };

        let primary = archetype.primary_stat();
        let secondary = archetype.secondary_stat();

        let party: Vec<_> = task
            .assigned()
            .iter()
            .filter_map(|id| {
                inputs
                    .adventurers
                    .iter()
                    .find(|adventurer| adventurer.id() == id)
            })
            .collect();

        let score = party
            .iter()
            .map(|adventurer| adventurer_fit(adventurer.effective_stats(), primary, secondary))
            .fold(0_i64, i64::saturating_add)
            .saturating_add(facility_bonus(inputs.facilities, primary, secondary));

        let outcome = if score >= config.great_success_threshold {
            TaskOutcome::GreatSuccess
        } else if score >= config.success_threshold {
            TaskOutcome::Success
        } else {
            TaskOutcome::Failure
        };

        let xp_gain = match outcome {
            TaskOutcome::GreatSuccess => config.xp_great_success,
            TaskOutcome::Success => config.xp_success,
            TaskOutcome::Failure => config.xp_failure,
        };

        let agent_changes = task
            .assigned()
            .iter()
            .map(|id| AgentChange {
                adventurer: id.clone(),
                xp_gain,
                injured: outcome == TaskOutcome::Failure
                    && injury_roll(id, config.injury_chance_pct),
            })
            .collect();

        // Floor mean over the assigned ids, not just the found ones: an
        // id missing from the pool counts as level 1, so dangling
        // assignments dilute the bonus instead of inflating it.
        let avg_level = if task.assigned().is_empty() {
            1
        } else {
            let sum = task.assigned().iter().fold(0_u64, |acc, id| {
                let level = party
                    .iter()
                    .find(|adventurer| adventurer.id() == id)
                    .map_or(1, |adventurer| u64::from(adventurer.level()));
                acc.saturating_add(level)
            });
            let count = u64::try_from(task.assigned().len()).unwrap_or(u64::MAX);
            sum.checked_div(count).unwrap_or(1).max(1)
        };
        let bonus = config
            .level_bonus_pct
            .saturating_mul(avg_level.saturating_sub(1));
        let rewards = archetype.base_reward().scale_pct(100_u64.saturating_add(bonus))?;

        report.results.push(TaskResult {
            task: task.id().clone(),
            outcome,
            rewards,
            agent_changes,
        });
    }

    Ok(report)
}
