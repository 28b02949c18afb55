//! Status Transition Policy
//!
//! Note: `Revoked` is NOT in the ordered progression - it is a side exit.

use contract_types::{ContractStatus, StatusAction};

use super::TransitionError;

/// Next status in the ordered sequence, or `None` from a terminal status
pub fn advance_status(current: ContractStatus) -> Option<ContractStatus> {
    use ContractStatus::*;
    match current {
        Created => Some(Approved),
        Approved => Some(Sent),
        Sent => Some(Signed),
        Signed => Some(Locked),
        // Terminal states absorb
        Locked | Revoked => None,
    }
}

/// Revocation is allowed from every non-terminal status
pub fn can_revoke(current: ContractStatus) -> bool {
    use ContractStatus::*;
    match current {
        Created | Approved | Sent | Signed => true,
        Locked | Revoked => false,
    }
}

/// Revoke a contract.
///
/// Not position-dependent: any non-terminal status goes straight to `Revoked`.
pub fn revoke_status(current: ContractStatus) -> Result<ContractStatus, TransitionError> {
    if can_revoke(current) {
        Ok(ContractStatus::Revoked)
    } else {
        Err(TransitionError::InvalidTransition {
            from: current,
            action: StatusAction::Revoke,
        })
    }
}

/// Target status for an action, or an invalid-transition error
pub fn apply_action(
    current: ContractStatus,
    action: StatusAction,
) -> Result<ContractStatus, TransitionError> {
    match action {
        StatusAction::Advance => {
            advance_status(current).ok_or(TransitionError::InvalidTransition {
                from: current,
                action,
            })
        }
        StatusAction::Revoke => revoke_status(current),
    }
}

/// Actions currently permitted, advance first
pub fn available_actions(current: ContractStatus) -> Vec<StatusAction> {
    let mut actions = Vec::with_capacity(2);
    if advance_status(current).is_some() {
        actions.push(StatusAction::Advance);
    }
    if can_revoke(current) {
        actions.push(StatusAction::Revoke);
    }
    actions
}
