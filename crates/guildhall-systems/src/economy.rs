//! The economy system: validated wallet debits and credits.
//!
//! The organization's wallet is only ever replaced through these entry
//! points. [`apply_cost`] is all-or-nothing: the subtraction either
//! produces a complete new bundle or fails with the wallet untouched,
//! so a multi-resource cost can never be partially charged.

use guildhall_types::ResourceBundle;

use guildhall_entities::Organization;

use crate::error::SystemError;

/// True iff the organization's wallet covers every resource in `cost`.
pub fn can_afford(org: &Organization, cost: &ResourceBundle) -> bool {
    org.wallet().has_all(cost)
}

/// Debit `cost` from the organization's wallet.
///
/// # Errors
///
/// Returns [`SystemError::CannotAfford`] if any resource would go
/// negative; the wallet is left untouched.
pub fn apply_cost(org: &mut Organization, cost: &ResourceBundle) -> Result<(), SystemError> {
    let remaining =
        org.wallet()
            .subtract(cost)
            .map_err(|source| SystemError::CannotAfford {
                org: org.id().clone(),
                source,
            })?;
    org.replace_wallet(remaining);
    Ok(())
}

/// Credit `reward` into the organization's wallet.
///
/// # Errors
///
/// Returns [`SystemError::Type`] only if an amount would overflow `u64`.
pub fn apply_reward(org: &mut Organization, reward: &ResourceBundle) -> Result<(), SystemError> {
    let updated = org.wallet().add(reward)?;
    org.replace_wallet(updated);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guildhall_types::{OrgId, Resource, Timestamp};

    /// Helper: organization holding 100 gold and 10 supplies.
    fn org() -> Organization {
        Organization::new(
            OrgId::parse("org-1").unwrap(),
            "Order of the Ledger".to_owned(),
            ResourceBundle::from_amounts(
                [(Resource::Gold, 100), (Resource::Supplies, 10)].into(),
            ),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap()
    }

    #[test]
    fn affordable_cost_is_charged() {
        let mut org = org();
        let cost = ResourceBundle::of(Resource::Gold, 40);
        assert!(can_afford(&org, &cost));

        apply_cost(&mut org, &cost).unwrap();
        assert_eq!(org.wallet().amount(Resource::Gold), 60);
        assert_eq!(org.wallet().amount(Resource::Supplies), 10);
    }

    #[test]
    fn unaffordable_cost_leaves_wallet_untouched() {
        let mut org = org();
        let cost = ResourceBundle::from_amounts(
            [(Resource::Gold, 50), (Resource::Crystals, 1)].into(),
        );
        assert!(!can_afford(&org, &cost));

        let result = apply_cost(&mut org, &cost);
        assert!(matches!(result, Err(SystemError::CannotAfford { .. })));
        // No partial charge: gold is still intact.
        assert_eq!(org.wallet().amount(Resource::Gold), 100);
    }

    #[test]
    fn reward_accumulates() {
        let mut org = org();
        apply_reward(&mut org, &ResourceBundle::of(Resource::Gold, 25)).unwrap();
        apply_reward(&mut org, &ResourceBundle::of(Resource::Renown, 3)).unwrap();
        assert_eq!(org.wallet().amount(Resource::Gold), 125);
        assert_eq!(org.wallet().amount(Resource::Renown), 3);
    }

    #[test]
    fn reward_overflow_fails() {
        let mut org = org();
        let result = apply_reward(&mut org, &ResourceBundle::of(Resource::Gold, u64::MAX));
        assert!(result.is_err());
    }
}
