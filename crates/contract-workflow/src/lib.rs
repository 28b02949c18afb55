//! Contract Approval Lifecycle
//!
//! Status transition policy for contracts:
//!
//! ```text
//! Created ──► Approved ──► Sent ──► Signed ──► Locked
//!    │           │          │         │
//!    └───────────┴──────────┴─────────┴──────► Revoked
//! ```
//!
//! - `advance` moves one step along the ordered sequence
//! - `revoke` is a side exit available from any non-terminal status
//! - `Locked` and `Revoked` are terminal and absorb both actions
//!
//! Everything here is a pure state-to-state mapping. Callers persist the new
//! status and timestamp.

mod error;
mod policy;
mod progress;
mod transition;

pub use contract_types::{ContractStatus, StatusAction, StatusTransition};
pub use error::TransitionError;
pub use policy::{advance_status, apply_action, available_actions, can_revoke, revoke_status};
pub use progress::{StatusProgress, Step, StepState};
pub use transition::transition;
