//! The offer system: generating and expiring task offers.
//!
//! Offers surface unlocked archetypes to the player. Generation is pure
//! with respect to time -- `now` is an argument -- and never fabricates
//! content: if no archetype is eligible, no offers appear, whatever the
//! configured minimum says.

use std::collections::BTreeSet;

use guildhall_types::{OfferId, Timestamp};

use guildhall_entities::{Organization, TaskArchetype, TaskOffer, UnlockRule};

use crate::config::SimulationConfig;

/// Generate a batch of offers for an organization at `now`.
///
/// An archetype is eligible when some rule unlocking it has its track
/// threshold met AND every entry of the archetype's own
/// `required_track_thresholds` is satisfied. The batch takes the first
/// `min(max(min_offers, eligible), max_offers)` eligible archetypes in
/// catalog order; each offer expires `offer_expiry` after `now`.
pub fn generate_offers(
    org: &Organization,
    rules: &[UnlockRule],
    catalog: &[TaskArchetype],
    config: &SimulationConfig,
    now: Timestamp,
) -> Vec<TaskOffer> {
    let unlocked: BTreeSet<_> = rules
        .iter()
        .filter(|rule| org.track_reached(rule.track_key(), rule.threshold()))
        .flat_map(|rule| rule.effects().task_archetypes.iter())
        .collect();

    let eligible: Vec<_> = catalog
        .iter()
        .filter(|archetype| unlocked.contains(archetype.id()))
        .filter(|archetype| {
            archetype
                .required_track_thresholds()
                .iter()
                .all(|(key, threshold)| org.track_reached(key, *threshold))
        })
        .collect();

    let count = eligible.len().max(config.min_offers).min(config.max_offers);
    let offers: Vec<_> = eligible
        .into_iter()
        .take(count)
        .map(|archetype| {
            TaskOffer::new(
                OfferId::generate(),
                org.id().clone(),
                archetype.id().clone(),
                now,
                Some(now.saturating_add(config.offer_expiry)),
            )
        })
        .collect();

    tracing::debug!(
        org = %org.id(),
        generated = offers.len(),
        "generated task offers"
    );
    offers
}

/// Collect the ids of offers whose expiry has lapsed at `now`, for the
/// caller to remove. Taken offers are not exempt: the dispatcher
/// normally removes an offer when it is accepted, and listing lapsed
/// ones here means a missed removal cannot linger past its expiry.
/// Pure; mutates nothing.
pub fn expire_offers(offers: &[&TaskOffer], now: Timestamp) -> Vec<OfferId> {
    offers
        .iter()
        .filter(|offer| offer.is_expired(now))
        .map(|offer| offer.id().clone())
        .collect()
}

/// Periodic refresh entry point: identical to [`generate_offers`]. The
/// scheduler calls this after expiring the previous batch.
pub fn refresh_offers(
    org: &Organization,
    rules: &[UnlockRule],
    catalog: &[TaskArchetype],
    config: &SimulationConfig,
    now: Timestamp,
) -> Vec<TaskOffer> {
    generate_offers(org, rules, catalog, config, now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guildhall_types::{
        OrgId, Resource, ResourceBundle, Stat, TaskArchetypeId, TaskCategory, TickDuration,
        UnlockRuleId,
    };
    use guildhall_entities::{TaskArchetypeSpec, UnlockEffects};
    use std::collections::BTreeMap;

    fn org_with_track(key: &str, value: u64) -> Organization {
        let mut org = Organization::new(
            OrgId::parse("org-1").unwrap(),
            "Order of the Ledger".to_owned(),
            ResourceBundle::new(),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap();
        let _ = org.ensure_track(key).increment(value).unwrap();
        org
    }

    fn archetype(id: &str, gates: &[(&str, u64)]) -> TaskArchetype {
        TaskArchetype::new(TaskArchetypeSpec {
            id: TaskArchetypeId::parse(id).unwrap(),
            name: "Patrol".to_owned(),
            category: TaskCategory::Combat,
            duration: TickDuration::from_hours(2),
            min_adventurers: 1,
            max_adventurers: 2,
            primary_stat: Stat::Strength,
            secondary_stat: Stat::Willpower,
            entry_cost: ResourceBundle::new(),
            base_reward: ResourceBundle::of(Resource::Gold, 40),
            required_track_thresholds: gates
                .iter()
                .map(|(key, threshold)| ((*key).to_owned(), *threshold))
                .collect(),
        })
        .unwrap()
    }

    fn rule(id: &str, track: &str, threshold: u64, archetypes: &[&str]) -> UnlockRule {
        UnlockRule::new(
            UnlockRuleId::parse(id).unwrap(),
            track.to_owned(),
            threshold,
            UnlockEffects {
                task_archetypes: archetypes
                    .iter()
                    .map(|a| TaskArchetypeId::parse(a).unwrap())
                    .collect(),
                facility_templates: vec![],
                agent_templates: vec![],
            },
        )
    }

    #[test]
    fn no_eligible_archetypes_yields_no_offers() {
        let org = org_with_track("renown", 0);
        let rules = vec![rule("r-1", "renown", 10, &["arch-1"])];
        let catalog = vec![archetype("arch-1", &[])];

        let offers = generate_offers(
            &org,
            &rules,
            &catalog,
            &SimulationConfig::default(),
            Timestamp::UNIX_EPOCH,
        );
        assert!(offers.is_empty());
    }

    #[test]
    fn archetype_gates_are_checked_independently() {
        // Rule threshold met, but the archetype's own gate is not.
        let org = org_with_track("renown", 10);
        let rules = vec![rule("r-1", "renown", 10, &["arch-1"])];
        let catalog = vec![archetype("arch-1", &[("research", 5)])];

        let offers = generate_offers(
            &org,
            &rules,
            &catalog,
            &SimulationConfig::default(),
            Timestamp::UNIX_EPOCH,
        );
        assert!(offers.is_empty());
    }

    #[test]
    fn batch_respects_catalog_order_and_max() {
        let org = org_with_track("renown", 10);
        let ids = ["a-1", "a-2", "a-3", "a-4", "a-5", "a-6", "a-7"];
        let rules = vec![rule("r-1", "renown", 1, &ids)];
        let catalog: Vec<_> = ids.iter().map(|id| archetype(id, &[])).collect();

        let offers = generate_offers(
            &org,
            &rules,
            &catalog,
            &SimulationConfig::default(),
            Timestamp::UNIX_EPOCH,
        );
        // Capped at max_offers, first ones in catalog order.
        assert_eq!(offers.len(), 5);
        assert_eq!(offers.first().unwrap().archetype().as_str(), "a-1");
        assert_eq!(offers.get(4).unwrap().archetype().as_str(), "a-5");
    }

    #[test]
    fn fewer_eligible_than_minimum_yields_only_eligible() {
        let org = org_with_track("renown", 10);
        let rules = vec![rule("r-1", "renown", 1, &["a-1", "a-2"])];
        let catalog = vec![archetype("a-1", &[]), archetype("a-2", &[])];

        let offers = generate_offers(
            &org,
            &rules,
            &catalog,
            &SimulationConfig::default(),
            Timestamp::UNIX_EPOCH,
        );
        assert_eq!(offers.len(), 2);
    }

    #[test]
    fn offers_carry_expiry() {
        let org = org_with_track("renown", 10);
        let rules = vec![rule("r-1", "renown", 1, &["a-1"])];
        let catalog = vec![archetype("a-1", &[])];
        let now = Timestamp::from_millis(5_000);

        let offers = generate_offers(&org, &rules, &catalog, &SimulationConfig::default(), now);
        assert_eq!(offers.len(), 1);
        let offer = offers.first().unwrap();
        assert_eq!(offer.created_at(), now);
        assert_eq!(
            offer.expires_at(),
            Some(now.saturating_add(TickDuration::from_hours(1))),
        );
    }

    #[test]
    fn expire_offers_culls_lapsed_even_when_taken() {
        let org = OrgId::parse("org-1").unwrap();
        let archetype = TaskArchetypeId::parse("a-1").unwrap();
        let expiry = Some(Timestamp::from_millis(1_000));
        let lapsed = TaskOffer::new(
            OfferId::parse("o-1").unwrap(),
            org.clone(),
            archetype.clone(),
            Timestamp::UNIX_EPOCH,
            expiry,
        );
        let open = TaskOffer::new(
            OfferId::parse("o-2").unwrap(),
            org.clone(),
            archetype.clone(),
            Timestamp::UNIX_EPOCH,
            Some(Timestamp::from_millis(10_000)),
        );
        let mut taken = TaskOffer::new(
            OfferId::parse("o-3").unwrap(),
            org,
            archetype,
            Timestamp::UNIX_EPOCH,
            expiry,
        );
        taken.mark_taken(Timestamp::from_millis(500)).unwrap();

        // A taken offer the dispatcher failed to remove still expires.
        let expired = expire_offers(&[&lapsed, &open, &taken], Timestamp::from_millis(2_000));
        assert_eq!(
            expired,
            vec![
                OfferId::parse("o-1").unwrap(),
                OfferId::parse("o-3").unwrap(),
            ],
        );
    }
}
