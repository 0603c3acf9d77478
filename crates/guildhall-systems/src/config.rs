//! Simulation tunables.
//!
//! Every numeric knob the systems consult lives in [`SimulationConfig`].
//! Collaborators deserialize it from their config files; tests override
//! individual fields on a `Default` instance. Defaults are the documented
//! contract values, so a default config reproduces the reference
//! behavior exactly.

use serde::{Deserialize, Serialize};

use guildhall_types::TickDuration;

/// Tunable parameters consumed by the domain systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Resolution score at or above which a task succeeds.
    pub success_threshold: i64,
    /// Resolution score at or above which a task greatly succeeds.
    pub great_success_threshold: i64,
    /// XP awarded per assigned adventurer on failure.
    pub xp_failure: u64,
    /// XP awarded per assigned adventurer on success.
    pub xp_success: u64,
    /// XP awarded per assigned adventurer on great success.
    pub xp_great_success: u64,
    /// Percent chance of injury per adventurer on a failed task. Applied
    /// deterministically via a hash of the adventurer id, not an RNG.
    pub injury_chance_pct: u64,
    /// Reward multiplier slope: percent added per average party level
    /// above 1.
    pub level_bonus_pct: u64,
    /// Minimum number of offers to generate when any archetype is
    /// eligible.
    pub min_offers: usize,
    /// Maximum number of offers to generate in one pass.
    pub max_offers: usize,
    /// How long a generated offer stays open.
    pub offer_expiry: TickDuration,
    /// Multiplier a doctrine applies to the resource its focus targets.
    pub focus_weight: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_threshold: 50,
            great_success_threshold: 100,
            xp_failure: 10,
            xp_success: 30,
            xp_great_success: 50,
            injury_chance_pct: 25,
            level_bonus_pct: 10,
            min_offers: 3,
            max_offers: 5,
            offer_expiry: TickDuration::from_hours(1),
            focus_weight: 3,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.success_threshold, 50);
        assert_eq!(config.great_success_threshold, 100);
        assert_eq!(config.xp_failure, 10);
        assert_eq!(config.xp_success, 30);
        assert_eq!(config.xp_great_success, 50);
        assert_eq!(config.injury_chance_pct, 25);
        assert_eq!(config.min_offers, 3);
        assert_eq!(config.max_offers, 5);
        assert_eq!(config.offer_expiry, TickDuration::from_hours(1));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"injury_chance_pct": 0}"#).unwrap();
        assert_eq!(config.injury_chance_pct, 0);
        assert_eq!(config.success_threshold, 50);
    }
}
