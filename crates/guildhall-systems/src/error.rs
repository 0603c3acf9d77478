//! Error types for system operations.
//!
//! Systems mostly wrap entity and value-object errors; the one error
//! minted here is [`SystemError::CannotAfford`], the economy's refusal
//! to debit a wallet below zero.

use guildhall_types::{OrgId, TypeError};

use guildhall_entities::EntityError;

/// Errors that can occur while running a domain system.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A cost application would overdraw the organization's wallet. The
    /// wallet is left untouched.
    #[error("organization {org} cannot afford the cost")]
    CannotAfford {
        /// The organization whose wallet was checked.
        org: OrgId,
        /// The underlying insufficient-resource detail.
        #[source]
        source: TypeError,
    },

    /// An entity operation failed.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// A value-object operation failed.
    #[error(transparent)]
    Type(#[from] TypeError),
}
