//! The authorization gate.
//!
//! Intercepts protected operations and checks the required capability
//! against the request's derived set. A denial carries one fixed,
//! human-readable reason; callers must not execute any mutation after a
//! denial.

use tracing::debug;

use pantry_core::error::{CapabilityError, Result};

use crate::model::{Capability, Role};
use crate::set::CapabilitySet;

/// The uniform reason attached to every denial.
pub const DENIAL_REASON: &str = "You do not have permission to perform this action";

/// Checks required capabilities against a derived set.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Require a capability, denying with the fixed reason if absent.
    ///
    /// `role:admin` acts as an unconditional bypass for recipe-scoped
    /// capabilities; everyone else must hold the exact capability.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the set permits the operation.
    /// * `Err` - A permission denial with the fixed reason.
    pub fn require(capabilities: &CapabilitySet, required: &Capability) -> Result<()> {
        if matches!(required, Capability::EditRecipe(_))
            && capabilities.contains(&Capability::Role(Role::Admin))
        {
            return Ok(());
        }

        if capabilities.contains(required) {
            return Ok(());
        }

        debug!(required = %required, "capability check failed");
        Err(CapabilityError::PermissionDenied(DENIAL_REASON.to_string()).into())
    }
}
