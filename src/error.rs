//! Error handling for the contract studio
//!
//! Pure components report their own error types; this module collects them
//! for the service layer.

use contract_workflow::TransitionError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Main error type for repository and service operations
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please fill in required fields: {}", labels.join(", "))]
    MissingRequiredFields { labels: Vec<String> },

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StudioError {
    pub fn blueprint_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Blueprint",
            id: id.into(),
        }
    }

    pub fn contract_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Contract",
            id: id.into(),
        }
    }

    /// A rejected user action rather than an infrastructure failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Validation(_)
                | Self::MissingRequiredFields { .. }
                | Self::Transition(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
