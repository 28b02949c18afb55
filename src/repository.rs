//! Blueprint and Contract Repository
//!
//! Both collections are stored as JSON arrays under fixed keys of a
//! [`KeyValueStore`]. A missing key reads as an empty collection.

use chrono::Utc;
use contract_types::{Blueprint, Contract, ContractStatus, FieldDefinition, ValueMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Result, StudioError};
use crate::seed;
use crate::store::KeyValueStore;

pub const BLUEPRINTS_KEY: &str = "contract_platform_blueprints";
pub const CONTRACTS_KEY: &str = "contract_platform_contracts";

/// Blueprint fields supplied by the caller; id and timestamp are assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlueprint {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_template: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Contract fields supplied by the caller; id, status and timestamps are assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContract {
    pub blueprint_id: String,
    pub blueprint_name: String,
    pub name: String,
    #[serde(default)]
    pub values: ValueMap,
}

/// Partial update merged into a stored contract
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractUpdate {
    pub name: Option<String>,
    pub values: Option<ValueMap>,
    pub status: Option<ContractStatus>,
}

/// Repository over an opaque key-value store
#[derive(Clone)]
pub struct ContractRepository {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles within this process
    write_lock: Arc<Mutex<()>>,
}

impl ContractRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // ── Blueprints ──

    pub async fn list_blueprints(&self) -> Result<Vec<Blueprint>> {
        self.load(BLUEPRINTS_KEY).await
    }

    pub async fn get_blueprint(&self, id: &str) -> Result<Option<Blueprint>> {
        let blueprints = self.list_blueprints().await?;
        Ok(blueprints.into_iter().find(|b| b.id == id))
    }

    pub async fn save_blueprint(&self, new: NewBlueprint) -> Result<Blueprint> {
        let _guard = self.write_lock.lock().await;
        let mut blueprints: Vec<Blueprint> = self.load(BLUEPRINTS_KEY).await?;

        let blueprint = Blueprint {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            content_template: new.content_template,
            fields: new.fields,
            created_at: Utc::now(),
        };
        blueprints.push(blueprint.clone());
        self.save_all(BLUEPRINTS_KEY, &blueprints).await?;

        tracing::debug!(blueprint_id = %blueprint.id, name = %blueprint.name, "blueprint saved");
        Ok(blueprint)
    }

    // ── Contracts ──

    pub async fn list_contracts(&self) -> Result<Vec<Contract>> {
        self.load(CONTRACTS_KEY).await
    }

    pub async fn get_contract(&self, id: &str) -> Result<Option<Contract>> {
        let contracts = self.list_contracts().await?;
        Ok(contracts.into_iter().find(|c| c.id == id))
    }

    /// Store a new contract in the `Created` status
    pub async fn create_contract(&self, new: NewContract) -> Result<Contract> {
        let _guard = self.write_lock.lock().await;
        let mut contracts: Vec<Contract> = self.load(CONTRACTS_KEY).await?;

        let now = Utc::now();
        let contract = Contract {
            id: Uuid::new_v4().to_string(),
            blueprint_id: new.blueprint_id,
            blueprint_name: new.blueprint_name,
            name: new.name,
            status: ContractStatus::Created,
            values: new.values,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        };
        contracts.push(contract.clone());
        self.save_all(CONTRACTS_KEY, &contracts).await?;

        tracing::debug!(contract_id = %contract.id, "contract created");
        Ok(contract)
    }

    /// Merge `update` into a stored contract and stamp `updated_at`
    pub async fn update_contract(&self, id: &str, update: ContractUpdate) -> Result<Contract> {
        let _guard = self.write_lock.lock().await;
        let mut contracts: Vec<Contract> = self.load(CONTRACTS_KEY).await?;

        let contract = contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StudioError::contract_not_found(id))?;

        if let Some(name) = update.name {
            contract.name = name;
        }
        if let Some(values) = update.values {
            contract.values = values;
        }
        if let Some(status) = update.status {
            contract.status = status;
        }
        contract.updated_at = Utc::now();
        let updated = contract.clone();

        self.save_all(CONTRACTS_KEY, &contracts).await?;
        Ok(updated)
    }

    /// Overwrite the status without consulting the transition policy.
    ///
    /// Use `ContractService::advance` / `revoke` for user actions.
    pub async fn update_contract_status(&self, id: &str, status: ContractStatus) -> Result<Contract> {
        self.update_contract(
            id,
            ContractUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    /// Replace a stored contract with `contract` as-is (matched by id)
    pub async fn save_contract(&self, contract: &Contract) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut contracts: Vec<Contract> = self.load(CONTRACTS_KEY).await?;

        let slot = contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or_else(|| StudioError::contract_not_found(&contract.id))?;
        *slot = contract.clone();

        self.save_all(CONTRACTS_KEY, &contracts).await
    }

    // ── Bulk ──

    /// Overwrite both collections
    pub async fn replace_all(&self, blueprints: &[Blueprint], contracts: &[Contract]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.save_all(BLUEPRINTS_KEY, blueprints).await?;
        self.save_all(CONTRACTS_KEY, contracts).await
    }

    /// Replace stored data with the demo blueprints and contracts
    pub async fn seed_demo(&self) -> Result<(usize, usize)> {
        let data = seed::demo_data();
        self.replace_all(&data.blueprints, &data.contracts).await?;
        tracing::info!(
            blueprints = data.blueprints.len(),
            contracts = data.contracts.len(),
            "seeded demo data"
        );
        Ok((data.blueprints.len(), data.contracts.len()))
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.store.set(key, &json).await?;
        Ok(())
    }
}
