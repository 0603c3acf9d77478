//! Unlock rules: track thresholds that gate catalog content.
//!
//! A rule binds a track key and threshold to the catalog entries it
//! releases. Rules are pure catalog data; detecting which rules an
//! organization has satisfied is the progression system's job.

use serde::{Deserialize, Serialize};

use guildhall_types::{AgentTemplateId, FacilityTemplateId, TaskArchetypeId, UnlockRuleId};

/// The catalog entries released when an unlock rule's threshold is met.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnlockEffects {
    /// Newly unlocked task archetypes.
    pub task_archetypes: Vec<TaskArchetypeId>,
    /// Newly unlocked facility templates.
    pub facility_templates: Vec<FacilityTemplateId>,
    /// Newly unlocked agent templates.
    pub agent_templates: Vec<AgentTemplateId>,
}

/// An immutable catalog rule gating content behind a track threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    /// Unique catalog identifier.
    id: UnlockRuleId,
    /// The track this rule watches.
    track_key: String,
    /// The value the track must reach (inclusive).
    threshold: u64,
    /// What the rule releases.
    effects: UnlockEffects,
}

impl UnlockRule {
    /// Construct a rule. Thresholds are non-negative by type; a zero
    /// threshold means the content is available from the start.
    pub const fn new(
        id: UnlockRuleId,
        track_key: String,
        threshold: u64,
        effects: UnlockEffects,
    ) -> Self {
        Self {
            id,
            track_key,
            threshold,
            effects,
        }
    }

    /// Return the rule id.
    pub const fn id(&self) -> &UnlockRuleId {
        &self.id
    }

    /// Return the watched track key.
    pub fn track_key(&self) -> &str {
        &self.track_key
    }

    /// Return the threshold.
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Return the released content.
    pub const fn effects(&self) -> &UnlockEffects {
        &self.effects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Helper: rule releasing one archetype at `threshold` on `track`.
    pub(crate) fn rule(id: &str, track: &str, threshold: u64, archetype: &str) -> UnlockRule {
        UnlockRule::new(
            UnlockRuleId::parse(id).unwrap(),
            track.to_owned(),
            threshold,
            UnlockEffects {
                task_archetypes: vec![TaskArchetypeId::parse(archetype).unwrap()],
                facility_templates: vec![],
                agent_templates: vec![],
            },
        )
    }

    #[test]
    fn rule_carries_its_payload() {
        let r = rule("rule-1", "research", 10, "arch-1");
        assert_eq!(r.track_key(), "research");
        assert_eq!(r.threshold(), 10);
        assert_eq!(r.effects().task_archetypes.len(), 1);
        assert!(r.effects().facility_templates.is_empty());
    }
}
