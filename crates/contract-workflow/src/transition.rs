//! Transition records

use chrono::{DateTime, Utc};
use contract_types::{ContractStatus, StatusAction, StatusTransition};

use super::{policy::apply_action, TransitionError};

/// Validate an action and build the record describing it.
///
/// Nothing is mutated; the caller applies the record to its contract
/// (see `Contract::record_transition`) and persists it.
pub fn transition(
    current: ContractStatus,
    action: StatusAction,
    by: Option<String>,
    reason: Option<String>,
    at: DateTime<Utc>,
) -> Result<StatusTransition, TransitionError> {
    let to = apply_action(current, action)?;
    Ok(StatusTransition {
        from: current,
        to,
        action,
        transitioned_at: at,
        transitioned_by: by,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_record() {
        let now = Utc::now();
        let record = transition(
            ContractStatus::Sent,
            StatusAction::Revoke,
            Some("legal@example.com".to_string()),
            Some("Counterparty withdrew".to_string()),
            now,
        )
        .unwrap();

        assert_eq!(record.from, ContractStatus::Sent);
        assert_eq!(record.to, ContractStatus::Revoked);
        assert_eq!(record.transitioned_at, now);
        assert_eq!(record.reason.as_deref(), Some("Counterparty withdrew"));
    }

    #[test]
    fn test_rejected_transition_builds_nothing() {
        let result = transition(
            ContractStatus::Revoked,
            StatusAction::Advance,
            None,
            None,
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(TransitionError::InvalidTransition {
                from: ContractStatus::Revoked,
                action: StatusAction::Advance,
            })
        ));
    }
}
