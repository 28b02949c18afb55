//! Contract Service
//!
//! User-facing operations over the repository: validated contract creation,
//! lifecycle actions and document rendering.

use chrono::Utc;
use contract_templates::{field_rows, TemplateResolver};
use contract_types::{Blueprint, Contract, StatusAction, ValueMap};
use contract_workflow::{transition, StatusProgress};
use serde::Serialize;

use crate::builder::BlueprintDraft;
use crate::error::{Result, StudioError};
use crate::repository::{ContractRepository, NewContract};

/// A contract with its blueprint and resolved document body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub contract: Contract,
    pub blueprint: Blueprint,
    /// `None` when the blueprint has no content template
    pub body: Option<String>,
    /// Placeholder tokens that matched no captured value
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

/// Label and display value for one blueprint field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub field_id: String,
    pub label: String,
    pub value: String,
}

#[derive(Clone)]
pub struct ContractService {
    repo: ContractRepository,
}

impl ContractService {
    pub fn new(repo: ContractRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &ContractRepository {
        &self.repo
    }

    pub async fn blueprint(&self, id: &str) -> Result<Blueprint> {
        self.repo
            .get_blueprint(id)
            .await?
            .ok_or_else(|| StudioError::blueprint_not_found(id))
    }

    pub async fn contract(&self, id: &str) -> Result<Contract> {
        self.repo
            .get_contract(id)
            .await?
            .ok_or_else(|| StudioError::contract_not_found(id))
    }

    /// Validate and save a builder draft
    pub async fn save_draft(&self, draft: BlueprintDraft) -> Result<Blueprint> {
        let new = draft.finish()?;
        let blueprint = self.repo.save_blueprint(new).await?;
        tracing::info!(
            blueprint_id = %blueprint.id,
            fields = blueprint.fields.len(),
            "blueprint created"
        );
        Ok(blueprint)
    }

    /// Create a contract from a blueprint.
    ///
    /// Rejects a blank name and any required field without a filled value.
    pub async fn create_contract(
        &self,
        blueprint_id: &str,
        name: &str,
        values: ValueMap,
    ) -> Result<Contract> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudioError::Validation(
                "Contract name is required".to_string(),
            ));
        }

        let blueprint = self.blueprint(blueprint_id).await?;

        let missing = blueprint.missing_required(&values);
        if !missing.is_empty() {
            return Err(StudioError::MissingRequiredFields {
                labels: missing.iter().map(|f| f.label.clone()).collect(),
            });
        }

        let contract = self
            .repo
            .create_contract(NewContract {
                blueprint_id: blueprint.id.clone(),
                blueprint_name: blueprint.name.clone(),
                name: name.to_string(),
                values,
            })
            .await?;

        tracing::info!(
            contract_id = %contract.id,
            blueprint_id = %blueprint.id,
            "contract created"
        );
        Ok(contract)
    }

    /// Move a contract one step along the approval sequence
    pub async fn advance(&self, contract_id: &str, by: Option<&str>) -> Result<Contract> {
        self.apply(contract_id, StatusAction::Advance, by, None).await
    }

    /// Revoke a contract that has not reached a terminal status
    pub async fn revoke(
        &self,
        contract_id: &str,
        by: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Contract> {
        self.apply(contract_id, StatusAction::Revoke, by, reason).await
    }

    async fn apply(
        &self,
        contract_id: &str,
        action: StatusAction,
        by: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Contract> {
        let mut contract = self.contract(contract_id).await?;

        let record = transition(
            contract.status,
            action,
            by.map(str::to_string),
            reason.map(str::to_string),
            Utc::now(),
        )
        .inspect_err(|e| {
            tracing::warn!(contract_id, error = %e, "transition rejected");
        })?;

        let (from, to) = (record.from, record.to);
        contract.record_transition(record);
        self.repo.save_contract(&contract).await?;

        tracing::info!(contract_id, %from, %to, %action, "contract status changed");
        Ok(contract)
    }

    /// Resolve the blueprint's content template against the contract values
    pub async fn render(&self, contract_id: &str) -> Result<RenderedDocument> {
        let contract = self.contract(contract_id).await?;
        let blueprint = self.blueprint(&contract.blueprint_id).await?;

        let (body, unresolved) = match blueprint.content_template.as_deref() {
            Some(template) => {
                let resolution = TemplateResolver::new(&contract.values)
                    .with_fields(&blueprint.fields)
                    .resolve(template);
                tracing::debug!(
                    contract_id,
                    complete = resolution.is_complete(),
                    "document rendered"
                );
                (Some(resolution.rendered), resolution.unresolved)
            }
            None => (None, Vec::new()),
        };

        Ok(RenderedDocument {
            contract,
            blueprint,
            body,
            unresolved,
        })
    }

    /// Field data table for a contract, in blueprint field order
    pub async fn field_rows(&self, contract_id: &str) -> Result<Vec<FieldSummary>> {
        let contract = self.contract(contract_id).await?;
        let blueprint = self.blueprint(&contract.blueprint_id).await?;

        Ok(field_rows(&blueprint, &contract.values)
            .into_iter()
            .map(|row| FieldSummary {
                field_id: row.field_id.to_string(),
                label: row.label.to_string(),
                value: row.value.to_string(),
            })
            .collect())
    }

    pub async fn progress(&self, contract_id: &str) -> Result<StatusProgress> {
        let contract = self.contract(contract_id).await?;
        Ok(StatusProgress::for_status(contract.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::NewBlueprint;
    use crate::store::MemoryStore;
    use contract_types::{ContractStatus, FieldDefinition, FieldType, FieldValue};
    use contract_workflow::TransitionError;
    use std::sync::Arc;

    async fn service_with_blueprint() -> (ContractService, Blueprint) {
        let service = ContractService::new(ContractRepository::new(Arc::new(MemoryStore::new())));
        let blueprint = service
            .repository()
            .save_blueprint(NewBlueprint {
                name: "Offer".to_string(),
                description: None,
                content_template: Some("Dear {{Candidate}}, remote: {{remote}}".to_string()),
                fields: vec![
                    FieldDefinition::new("cand", FieldType::Text, "Candidate", true, 20.0, 20.0),
                    FieldDefinition::new("remote", FieldType::Checkbox, "Remote", false, 20.0, 80.0),
                    FieldDefinition::new("sig", FieldType::Signature, "Signature", true, 20.0, 140.0),
                ],
            })
            .await
            .unwrap();
        (service, blueprint)
    }

    fn values(pairs: &[(&str, FieldValue)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (service, blueprint) = service_with_blueprint().await;
        let err = service
            .create_contract(&blueprint.id, "   ", ValueMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_lists_missing_required_labels() {
        let (service, blueprint) = service_with_blueprint().await;
        let err = service
            .create_contract(
                &blueprint.id,
                "Offer for Ann",
                values(&[("cand", FieldValue::text("Ann")), ("sig", FieldValue::text(""))]),
            )
            .await
            .unwrap_err();

        match err {
            StudioError::MissingRequiredFields { labels } => {
                assert_eq!(labels, vec!["Signature".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(service.repository().list_contracts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unticked_required_checkbox() {
        let (service, _) = service_with_blueprint().await;
        let blueprint = service
            .repository()
            .save_blueprint(NewBlueprint {
                name: "Waiver".to_string(),
                description: None,
                content_template: None,
                fields: vec![FieldDefinition::new(
                    "agree",
                    FieldType::Checkbox,
                    "I Agree",
                    true,
                    20.0,
                    20.0,
                )],
            })
            .await
            .unwrap();

        let err = service
            .create_contract(
                &blueprint.id,
                "Waiver for Ann",
                values(&[("agree", FieldValue::Flag(false))]),
            )
            .await
            .unwrap_err();
        match err {
            StudioError::MissingRequiredFields { labels } => {
                assert_eq!(labels, vec!["I Agree".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let contract = service
            .create_contract(
                &blueprint.id,
                "Waiver for Ann",
                values(&[("agree", FieldValue::Flag(true))]),
            )
            .await
            .unwrap();
        assert_eq!(contract.status, ContractStatus::Created);
    }

    #[tokio::test]
    async fn test_create_unknown_blueprint() {
        let (service, _) = service_with_blueprint().await;
        let err = service
            .create_contract("missing", "Offer", ValueMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::NotFound { kind: "Blueprint", .. }));
    }

    #[tokio::test]
    async fn test_lifecycle_records_history() {
        let (service, blueprint) = service_with_blueprint().await;
        let contract = service
            .create_contract(
                &blueprint.id,
                "  Offer for Ann ",
                values(&[("cand", FieldValue::text("Ann")), ("sig", FieldValue::text("Ann"))]),
            )
            .await
            .unwrap();
        assert_eq!(contract.name, "Offer for Ann");
        assert_eq!(contract.blueprint_name, "Offer");

        let approved = service.advance(&contract.id, Some("hr")).await.unwrap();
        assert_eq!(approved.status, ContractStatus::Approved);

        let revoked = service
            .revoke(&contract.id, Some("legal"), Some("Position closed"))
            .await
            .unwrap();
        assert_eq!(revoked.status, ContractStatus::Revoked);

        let stored = service.contract(&contract.id).await.unwrap();
        assert_eq!(stored.history.len(), 2);
        assert_eq!(stored.history[1].reason.as_deref(), Some("Position closed"));
        assert_eq!(stored.updated_at, stored.history[1].transitioned_at);
    }

    #[tokio::test]
    async fn test_invalid_transition_persists_nothing() {
        let (service, blueprint) = service_with_blueprint().await;
        let contract = service
            .create_contract(
                &blueprint.id,
                "Offer",
                values(&[("cand", FieldValue::text("Ann")), ("sig", FieldValue::text("Ann"))]),
            )
            .await
            .unwrap();
        service.revoke(&contract.id, None, None).await.unwrap();

        let err = service.advance(&contract.id, None).await.unwrap_err();
        assert!(matches!(
            err,
            StudioError::Transition(TransitionError::InvalidTransition {
                from: ContractStatus::Revoked,
                action: StatusAction::Advance,
            })
        ));

        let stored = service.contract(&contract.id).await.unwrap();
        assert_eq!(stored.status, ContractStatus::Revoked);
        assert_eq!(stored.history.len(), 1);
    }

    #[tokio::test]
    async fn test_render_and_field_rows() {
        let (service, blueprint) = service_with_blueprint().await;
        let contract = service
            .create_contract(
                &blueprint.id,
                "Offer",
                values(&[
                    ("cand", FieldValue::text("Ann")),
                    ("remote", FieldValue::Flag(true)),
                    ("sig", FieldValue::text("Ann")),
                ]),
            )
            .await
            .unwrap();

        let doc = service.render(&contract.id).await.unwrap();
        assert_eq!(doc.body.as_deref(), Some("Dear Ann, remote: [x] Yes"));
        assert!(doc.unresolved.is_empty());

        let rows = service.field_rows(&contract.id).await.unwrap();
        let pairs: Vec<_> = rows.iter().map(|r| (r.label.as_str(), r.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("Candidate", "Ann"), ("Remote", "Yes"), ("Signature", "Ann")]
        );

        let progress = service.progress(&contract.id).await.unwrap();
        assert_eq!(progress.percent_complete(), 20);
    }
}
