//! Contract Studio
//!
//! Build contract blueprints, create contracts from them and move each
//! contract through its approval lifecycle.
//!
//! The pure pieces live in their own crates:
//! - `contract-types`: blueprint, field and contract records
//! - `contract-templates`: `{{placeholder}}` resolution
//! - `contract-workflow`: status transition policy
//!
//! This crate adds persistence ([`store`], [`repository`]), the user-facing
//! [`service`], the [`builder`] draft and ambient setup ([`config`],
//! [`logging`]).

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;

pub use builder::{BlueprintDraft, FieldPatch};
pub use config::{ConfigError, StoreBackend, StudioConfig};
pub use error::{Result, StudioError};
pub use repository::{ContractRepository, ContractUpdate, NewBlueprint, NewContract};
pub use service::{ContractService, FieldSummary, RenderedDocument};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub use contract_templates as templates;
pub use contract_types as types;
pub use contract_workflow as workflow;
