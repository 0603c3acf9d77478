//! The mission automation system (doctrine engine).
//!
//! Each pass scores every viable (offer, adventurer) pair under the
//! doctrine's focus and risk posture and proposes at most one
//! [`Action::StartMission`]. Proposals apply nothing; the command
//! dispatcher charges the entry cost, takes the offer, and assigns the
//! adventurer.
//!
//! Ties resolve to the first-encountered pair, so a replay over the same
//! offer and roster ordering proposes the same mission.

use guildhall_types::{AdventurerStatus, DoctrineFocus, Resource, RiskTolerance, Timestamp};

use guildhall_entities::{AdventurerInstance, MissionDoctrine, TaskArchetype, TaskOffer};

use crate::actions::Action;
use crate::config::SimulationConfig;
use crate::resolution::adventurer_fit;

const MILLIS_PER_HOUR: u64 = 3_600_000;

fn to_score(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// What the doctrine's focus values this archetype's reward at.
fn focus_component(
    doctrine: &MissionDoctrine,
    archetype: &TaskArchetype,
    config: &SimulationConfig,
) -> i64 {
    let reward = archetype.base_reward();
    match doctrine.focus() {
        DoctrineFocus::Gold => {
            to_score(reward.amount(Resource::Gold)).saturating_mul(config.focus_weight)
        }
        DoctrineFocus::Materials => {
            to_score(reward.amount(Resource::Materials)).saturating_mul(config.focus_weight)
        }
        // Longer missions award the same XP less often; value short ones
        // by hours of duration as the proxy.
        DoctrineFocus::Xp => {
            let hours = archetype
                .duration()
                .as_millis()
                .checked_div(MILLIS_PER_HOUR)
                .unwrap_or(0);
            to_score(hours).saturating_mul(config.focus_weight)
        }
        DoctrineFocus::Balanced => to_score(reward.total()),
    }
}

/// Risk adjustment for one (archetype, adventurer) pair.
fn risk_adjustment(
    doctrine: &MissionDoctrine,
    archetype: &TaskArchetype,
    fit: i64,
    config: &SimulationConfig,
) -> i64 {
    match doctrine.risk_tolerance() {
        // Penalize pairs whose fit falls short of the success threshold.
        RiskTolerance::Low => {
            if fit < config.success_threshold {
                config.success_threshold.saturating_sub(fit).saturating_neg()
            } else {
                0
            }
        }
        RiskTolerance::Medium => 0,
        // Chase big rewards even when the fit is shaky.
        RiskTolerance::High => to_score(archetype.base_reward().total())
            .checked_div(10)
            .unwrap_or(0),
    }
}

/// Propose at most one mission for the doctrine at `now`.
///
/// Empty when the doctrine is suspended, no offer survives its filters,
/// or no idle adventurer passes its level bounds.
pub fn propose_missions(
    doctrine: &MissionDoctrine,
    offers: &[&TaskOffer],
    adventurers: &[&AdventurerInstance],
    catalog: &[TaskArchetype],
    config: &SimulationConfig,
    now: Timestamp,
) -> Vec<Action> {
    if !doctrine.is_active() {
        return Vec::new();
    }

    let viable_offers: Vec<_> = offers
        .iter()
        .copied()
        .filter(|offer| offer.is_available(now))
        .filter_map(|offer| {
            catalog
                .iter()
                .find(|archetype| archetype.id() == offer.archetype())
                .map(|archetype| (offer, archetype))
        })
        .filter(|(_, archetype)| doctrine.allows_category(archetype.category()))
        .collect();

    let candidates: Vec<_> = adventurers
        .iter()
        .copied()
        .filter(|adventurer| {
            adventurer.status() == AdventurerStatus::Idle
                && doctrine.allows_level(adventurer.level())
        })
        .collect();

    let mut best: Option<(i64, &TaskOffer, &AdventurerInstance)> = None;
    for &(offer, archetype) in &viable_offers {
        let base = focus_component(doctrine, archetype, config);
        for &adventurer in &candidates {
            let fit = adventurer_fit(
                adventurer.effective_stats(),
                archetype.primary_stat(),
                archetype.secondary_stat(),
            );
            let score = base
                .saturating_add(fit)
                .saturating_add(risk_adjustment(doctrine, archetype, fit, config));
            // Strictly greater: the first pair keeps ties.
            if best.is_none_or(|(best_score, _, _)| score > best_score) {
                best = Some((score, offer, adventurer));
            }
        }
    }

    match best {
        Some((score, offer, adventurer)) => {
            tracing::debug!(
                doctrine = %doctrine.id(),
                offer = %offer.id(),
                adventurer = %adventurer.id(),
                score,
                "doctrine proposes a mission"
            );
            vec![Action::StartMission {
                doctrine: doctrine.id().clone(),
                offer: offer.id().clone(),
                adventurer: adventurer.id().clone(),
            }]
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guildhall_types::{
        AdventurerId, AgentTemplateId, DoctrineId, OfferId, OrgId, ResourceBundle, Stat, StatMap,
        TaskArchetypeId, TaskCategory, TaskId, TickDuration,
    };
    use guildhall_entities::TaskArchetypeSpec;
    use std::collections::BTreeMap;

    fn doctrine(
        focus: DoctrineFocus,
        risk: RiskTolerance,
        category: Option<TaskCategory>,
    ) -> MissionDoctrine {
        MissionDoctrine::new(
            DoctrineId::parse("d-1").unwrap(),
            OrgId::parse("org-1").unwrap(),
            focus,
            risk,
            category,
            None,
            None,
        )
        .unwrap()
    }

    fn archetype(id: &str, category: TaskCategory, gold: u64) -> TaskArchetype {
        TaskArchetype::new(TaskArchetypeSpec {
            id: TaskArchetypeId::parse(id).unwrap(),
            name: "Patrol".to_owned(),
            category,
            duration: TickDuration::from_hours(2),
            min_adventurers: 1,
            max_adventurers: 2,
            primary_stat: Stat::Strength,
            secondary_stat: Stat::Willpower,
            entry_cost: ResourceBundle::new(),
            base_reward: ResourceBundle::of(Resource::Gold, gold),
            required_track_thresholds: BTreeMap::new(),
        })
        .unwrap()
    }

    fn offer(id: &str, archetype: &str) -> TaskOffer {
        TaskOffer::new(
            OfferId::parse(id).unwrap(),
            OrgId::parse("org-1").unwrap(),
            TaskArchetypeId::parse(archetype).unwrap(),
            Timestamp::UNIX_EPOCH,
            Some(Timestamp::from_millis(100_000)),
        )
    }

    fn idle(id: &str, level: u32, strength: i64) -> AdventurerInstance {
        AdventurerInstance::new(
            AdventurerId::parse(id).unwrap(),
            OrgId::parse("org-1").unwrap(),
            "Rook".to_owned(),
            level,
            StatMap::of(Stat::Strength, strength),
            Some(AgentTemplateId::parse("tpl-1").unwrap()),
        )
        .unwrap()
    }

    fn now() -> Timestamp {
        Timestamp::from_millis(1_000)
    }

    #[test]
    fn suspended_doctrine_proposes_nothing() {
        let mut d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        d.suspend();
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let o = offer("o-1", "a-1");
        let adv = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&o],
            &[&adv],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn no_idle_adventurer_means_no_proposal() {
        let d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let o = offer("o-1", "a-1");
        let mut busy = idle("adv-1", 1, 60);
        busy.assign_to(TaskId::parse("t-1").unwrap()).unwrap();

        let actions = propose_missions(
            &d,
            &[&o],
            &[&busy],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn category_filter_excludes_offers() {
        let d = doctrine(
            DoctrineFocus::Gold,
            RiskTolerance::Medium,
            Some(TaskCategory::Research),
        );
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let o = offer("o-1", "a-1");
        let adv = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&o],
            &[&adv],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn level_bounds_exclude_adventurers() {
        let d = MissionDoctrine::new(
            DoctrineId::parse("d-1").unwrap(),
            OrgId::parse("org-1").unwrap(),
            DoctrineFocus::Gold,
            RiskTolerance::Medium,
            None,
            Some(5),
            None,
        )
        .unwrap();
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let o = offer("o-1", "a-1");
        let rookie = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&o],
            &[&rookie],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn gold_focus_prefers_richer_offer() {
        let d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        let catalog = vec![
            archetype("a-poor", TaskCategory::Combat, 10),
            archetype("a-rich", TaskCategory::Combat, 90),
        ];
        let poor = offer("o-poor", "a-poor");
        let rich = offer("o-rich", "a-rich");
        let adv = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&poor, &rich],
            &[&adv],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert_eq!(
            actions,
            vec![Action::StartMission {
                doctrine: DoctrineId::parse("d-1").unwrap(),
                offer: OfferId::parse("o-rich").unwrap(),
                adventurer: AdventurerId::parse("adv-1").unwrap(),
            }],
        );
    }

    #[test]
    fn low_risk_penalizes_shortfall() {
        let d = doctrine(DoctrineFocus::Balanced, RiskTolerance::Low, None);
        // Equal rewards, so only the fit and the shortfall penalty differ.
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let o = offer("o-1", "a-1");
        let shaky = idle("adv-shaky", 1, 20);
        let solid = idle("adv-solid", 1, 55);

        let actions = propose_missions(
            &d,
            &[&o],
            &[&shaky, &solid],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert_eq!(
            actions,
            vec![Action::StartMission {
                doctrine: DoctrineId::parse("d-1").unwrap(),
                offer: OfferId::parse("o-1").unwrap(),
                adventurer: AdventurerId::parse("adv-solid").unwrap(),
            }],
        );
    }

    #[test]
    fn ties_go_to_first_pair() {
        let d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let first = offer("o-first", "a-1");
        let second = offer("o-second", "a-1");
        let adv = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&first, &second],
            &[&adv],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert_eq!(
            actions,
            vec![Action::StartMission {
                doctrine: DoctrineId::parse("d-1").unwrap(),
                offer: OfferId::parse("o-first").unwrap(),
                adventurer: AdventurerId::parse("adv-1").unwrap(),
            }],
        );
    }

    #[test]
    fn expired_and_taken_offers_are_skipped() {
        let d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        let catalog = vec![archetype("a-1", TaskCategory::Combat, 50)];
        let expired = TaskOffer::new(
            OfferId::parse("o-expired").unwrap(),
            OrgId::parse("org-1").unwrap(),
            TaskArchetypeId::parse("a-1").unwrap(),
            Timestamp::UNIX_EPOCH,
            Some(Timestamp::from_millis(500)),
        );
        let mut taken = offer("o-taken", "a-1");
        taken.mark_taken(Timestamp::from_millis(100)).unwrap();
        let adv = idle("adv-1", 1, 60);

        let actions = propose_missions(
            &d,
            &[&expired, &taken],
            &[&adv],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn at_most_one_proposal_per_pass() {
        let d = doctrine(DoctrineFocus::Gold, RiskTolerance::Medium, None);
        let catalog = vec![
            archetype("a-1", TaskCategory::Combat, 50),
            archetype("a-2", TaskCategory::Combat, 60),
        ];
        let o1 = offer("o-1", "a-1");
        let o2 = offer("o-2", "a-2");
        let a1 = idle("adv-1", 1, 60);
        let a2 = idle("adv-2", 1, 70);

        let actions = propose_missions(
            &d,
            &[&o1, &o2],
            &[&a1, &a2],
            &catalog,
            &SimulationConfig::default(),
            now(),
        );
        assert_eq!(actions.len(), 1);
    }
}
