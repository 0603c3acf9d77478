//! Error types for value-object operations.
//!
//! Every fallible operation on the value objects returns a typed error
//! rather than panicking or silently clamping. Entity and system crates
//! wrap these via `#[from]` conversions.

use crate::resources::Resource;

/// Errors that can occur while constructing or combining value objects.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// An identifier string was empty or whitespace-only after trimming.
    #[error("empty identifier for kind {kind}")]
    EmptyIdentifier {
        /// Label of the identifier kind that rejected the value.
        kind: &'static str,
    },

    /// A bundle subtraction would drive a resource amount negative.
    #[error("insufficient resources: wanted {requested} of {resource:?} but only have {available}")]
    InsufficientResources {
        /// The resource type being subtracted.
        resource: Resource,
        /// The amount the caller attempted to remove.
        requested: u64,
        /// The amount actually present in the bundle.
        available: u64,
    },

    /// An arithmetic operation on amounts or stats overflowed.
    #[error("amount overflow: {context}")]
    AmountOverflow {
        /// Description of what was being computed.
        context: &'static str,
    },
}
