//! # Pantry Capability
//!
//! `pantry_capability` is the permission core of the Pantry service.
//! On every request it computes, for the current principal, the complete
//! set of capabilities they hold, and enforces the required capability at
//! each protected operation.
//!
//! Key concepts:
//!
//! 1. **Principal**: the authenticated actor behind a request, or an
//!    explicit anonymous sentinel.
//!
//! 2. **Capability**: an atomic granted permission — a role that applies
//!    globally, or the right to edit one identified recipe.
//!
//! 3. **Derivation**: the capability set is rebuilt from persisted ground
//!    truth (role flags and recipe ownership) on every request; it is
//!    never stored and never reused across requests.
//!
//! 4. **Fail closed**: anything ambiguous — a malformed id, a damaged
//!    record, an unreachable repository — results in fewer capabilities,
//!    never more.

pub mod context;
pub mod derive;
pub mod gate;
pub mod model;
pub mod principal;
pub mod set;

pub use context::RequestContext;
pub use derive::CapabilityDeriver;
pub use gate::{AuthorizationGate, DENIAL_REASON};
pub use model::{Capability, Role};
pub use principal::{AuthenticatedUser, Principal};
pub use set::CapabilitySet;
