use contract_types::{ContractStatus, StatusAction};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Invalid transition: cannot {action} a contract in status {from}")]
    InvalidTransition {
        from: ContractStatus,
        action: StatusAction,
    },
}
