//! Stepper progress
//!
//! Where a contract sits along `Created → Locked`, one step per status.

use contract_types::ContractStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// At or before the current status
    Completed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub status: ContractStatus,
    /// 1-based position
    pub number: usize,
    pub state: StepState,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusProgress {
    /// A revoked contract cannot proceed; all steps are pending
    pub revoked: bool,
    pub steps: Vec<Step>,
}

impl StatusProgress {
    pub fn for_status(status: ContractStatus) -> Self {
        let current_index = status.step_index();
        let steps = ContractStatus::SEQUENCE
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let completed = current_index.is_some_and(|current| index <= current);
                Step {
                    status: *step,
                    number: index + 1,
                    state: if completed {
                        StepState::Completed
                    } else {
                        StepState::Pending
                    },
                    current: current_index == Some(index),
                }
            })
            .collect();

        Self {
            revoked: status == ContractStatus::Revoked,
            steps,
        }
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.current)
    }

    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.state == StepState::Completed)
            .count()
    }

    /// Share of completed steps, 0-100
    pub fn percent_complete(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        (self.completed_count() * 100 / self.steps.len()) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_for_sent() {
        let progress = StatusProgress::for_status(ContractStatus::Sent);
        assert!(!progress.revoked);
        assert_eq!(progress.completed_count(), 3);
        assert_eq!(progress.percent_complete(), 60);

        let current = progress.current_step().unwrap();
        assert_eq!(current.status, ContractStatus::Sent);
        assert_eq!(current.number, 3);
        assert_eq!(progress.steps[3].state, StepState::Pending);
    }

    #[test]
    fn test_progress_locked_is_complete() {
        let progress = StatusProgress::for_status(ContractStatus::Locked);
        assert_eq!(progress.percent_complete(), 100);
        assert_eq!(progress.current_step().map(|s| s.number), Some(5));
    }

    #[test]
    fn test_progress_revoked() {
        let progress = StatusProgress::for_status(ContractStatus::Revoked);
        assert!(progress.revoked);
        assert_eq!(progress.completed_count(), 0);
        assert_eq!(progress.percent_complete(), 0);
        assert!(progress.current_step().is_none());
    }

    #[test]
    fn test_progress_serializes_states() {
        let progress = StatusProgress::for_status(ContractStatus::Created);
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["steps"][0]["state"], "completed");
        assert_eq!(json["steps"][0]["status"], "Created");
        assert_eq!(json["steps"][1]["state"], "pending");
    }
}
