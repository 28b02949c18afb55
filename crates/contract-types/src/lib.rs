//! Contract Types - Foundation Data Structures
//!
//! Pure data structures shared by every crate in the workspace:
//! - Field definitions and the blueprints that own them
//! - Field values (a closed `text | flag | absent` type)
//! - Contracts and their lifecycle status
//! - Status transition records
//!
//! ## Rules
//!
//! 1. **NO BUSINESS LOGIC** - resolution and transition policy live in
//!    `contract-templates` and `contract-workflow`
//! 2. **NO WORKSPACE DEPENDENCIES**
//! 3. **SERIALIZABLE** - JSON field names are camelCase so records written by
//!    the browser client load unchanged

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FIELDS
// ============================================================================

/// Kind of input slot a field represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Date,
    Checkbox,
    Signature,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Signature => "signature",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "date" => Ok(Self::Date),
            "checkbox" => Ok(Self::Checkbox),
            "signature" => Ok(Self::Signature),
            _ => Err(UnknownVariantError::FieldType(s.to_string())),
        }
    }
}

/// A single positioned input slot within a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Opaque identifier, unique within the owning blueprint
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label; templates may reference a field by label
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Layout coordinates on the builder canvas
    pub x: f64,
    pub y: f64,
}

impl FieldDefinition {
    pub fn new(
        id: impl Into<String>,
        field_type: FieldType,
        label: impl Into<String>,
        required: bool,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required,
            x,
            y,
        }
    }
}

// ============================================================================
// FIELD VALUES
// ============================================================================

/// Value captured for a field on a contract.
///
/// JSON form is a bare string, boolean or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Flag(bool),
    /// Text, date or typed signature
    Text(String),
    /// No value captured
    #[default]
    Absent,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Absent or empty text. Flags are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            Self::Flag(_) => false,
        }
    }

    /// Truthiness as the contract form sees it: non-empty text or a set flag
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Field id → captured value
pub type ValueMap = BTreeMap<String, FieldValue>;

// ============================================================================
// BLUEPRINTS
// ============================================================================

/// Reusable document template: field definitions plus an optional body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Text body with `{{fieldId}}` or `{{Field Label}}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_template: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    pub created_at: DateTime<Utc>,
}

impl Blueprint {
    /// Look up a field by id
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Fields sorted top-to-bottom by their `y` coordinate.
    ///
    /// The sort is stable, so fields on the same row keep their
    /// definition order.
    pub fn fields_in_layout_order(&self) -> Vec<&FieldDefinition> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.y.total_cmp(&b.y));
        fields
    }

    /// Required fields whose value is not filled in
    pub fn missing_required<'a>(&'a self, values: &ValueMap) -> Vec<&'a FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| !values.get(&f.id).is_some_and(FieldValue::is_filled))
            .collect()
    }
}

// ============================================================================
// CONTRACT STATUS
// ============================================================================

/// Approval lifecycle status.
///
/// `Created < Approved < Sent < Signed < Locked` is the ordered progression.
/// `Revoked` sits outside the ordering. `Locked` and `Revoked` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
    Revoked,
}

impl ContractStatus {
    /// The ordered advance sequence
    pub const SEQUENCE: [ContractStatus; 5] = [
        Self::Created,
        Self::Approved,
        Self::Sent,
        Self::Signed,
        Self::Locked,
    ];

    pub const ALL: [ContractStatus; 6] = [
        Self::Created,
        Self::Approved,
        Self::Sent,
        Self::Signed,
        Self::Locked,
        Self::Revoked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Approved => "Approved",
            Self::Sent => "Sent",
            Self::Signed => "Signed",
            Self::Locked => "Locked",
            Self::Revoked => "Revoked",
        }
    }

    /// Position in the ordered sequence. `Revoked` has none.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Self::Created => Some(0),
            Self::Approved => Some(1),
            Self::Sent => Some(2),
            Self::Signed => Some(3),
            Self::Locked => Some(4),
            Self::Revoked => None,
        }
    }

    /// No transition is permitted out of a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Locked | Self::Revoked)
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariantError::ContractStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownVariantError {
    #[error("Unknown contract status: {0}")]
    ContractStatus(String),

    #[error("Unknown field type: {0}")]
    FieldType(String),
}

// ============================================================================
// STATUS TRANSITIONS
// ============================================================================

/// Action a user can request on a contract's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    /// Move to the next status in the ordered sequence
    Advance,
    /// Side exit to `Revoked`
    Revoke,
}

impl StatusAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Revoke => "revoke",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of an applied status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub from: ContractStatus,
    pub to: ContractStatus,
    pub action: StatusAction,
    pub transitioned_at: DateTime<Utc>,
    /// Who requested the change (user id or "system")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitioned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// CONTRACTS
// ============================================================================

/// An instance of a blueprint with concrete values and a lifecycle status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    /// Weak reference; the blueprint may no longer exist
    pub blueprint_id: String,
    /// Snapshot of the blueprint name at creation time
    pub blueprint_name: String,
    pub name: String,
    pub status: ContractStatus,
    #[serde(default)]
    pub values: ValueMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<StatusTransition>,
}

impl Contract {
    /// Create a contract in the `Created` status
    pub fn new(
        id: impl Into<String>,
        blueprint: &Blueprint,
        name: impl Into<String>,
        values: ValueMap,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            blueprint_id: blueprint.id.clone(),
            blueprint_name: blueprint.name.clone(),
            name: name.into(),
            status: ContractStatus::Created,
            values,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// Apply a transition record: rewrites `status` and `updated_at`
    pub fn record_transition(&mut self, transition: StatusTransition) {
        self.status = transition.to;
        self.updated_at = transition.transitioned_at;
        self.history.push(transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint() -> Blueprint {
        Blueprint {
            id: "bp-1".to_string(),
            name: "Test BP".to_string(),
            description: None,
            content_template: Some("Hello {{f1}}".to_string()),
            fields: vec![
                FieldDefinition::new("f1", FieldType::Text, "Full Name", true, 20.0, 100.0),
                FieldDefinition::new("f2", FieldType::Checkbox, "Remote", false, 20.0, 20.0),
                FieldDefinition::new("f3", FieldType::Signature, "Sign", true, 300.0, 100.0),
            ],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_from_str_round_trips_names() {
        for status in ContractStatus::ALL {
            assert_eq!(status.as_str().parse::<ContractStatus>(), Ok(status));
        }
        assert_eq!(
            "locked".parse::<ContractStatus>(),
            Err(UnknownVariantError::ContractStatus("locked".to_string()))
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ContractStatus::Locked.is_terminal());
        assert!(ContractStatus::Revoked.is_terminal());
        assert!(!ContractStatus::Signed.is_terminal());
        assert_eq!(ContractStatus::Revoked.step_index(), None);
        assert_eq!(ContractStatus::Locked.step_index(), Some(4));
    }

    #[test]
    fn test_field_value_json_forms() {
        let values: ValueMap =
            serde_json::from_str(r#"{"a": "Ann", "b": true, "c": null}"#).unwrap();
        assert_eq!(values["a"], FieldValue::text("Ann"));
        assert_eq!(values["b"], FieldValue::Flag(true));
        assert_eq!(values["c"], FieldValue::Absent);

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"a":"Ann","b":true,"c":null}"#);
    }

    #[test]
    fn test_field_value_blank_vs_filled() {
        assert!(FieldValue::Absent.is_blank());
        assert!(FieldValue::text("").is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
        assert!(!FieldValue::Flag(false).is_filled());
        assert!(FieldValue::Flag(true).is_filled());
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Absent);
    }

    #[test]
    fn test_blueprint_layout_order_is_stable_by_y() {
        let bp = blueprint();
        let ids: Vec<_> = bp.fields_in_layout_order().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f2", "f1", "f3"]);
    }

    #[test]
    fn test_missing_required_fields() {
        let bp = blueprint();
        let mut values = ValueMap::new();
        values.insert("f1".to_string(), FieldValue::text("Ann"));
        values.insert("f3".to_string(), FieldValue::text(""));

        let missing: Vec<_> = bp.missing_required(&values).iter().map(|f| f.label.as_str()).collect();
        assert_eq!(missing, vec!["Sign"]);
    }

    #[test]
    fn test_required_checkbox_must_be_ticked() {
        let mut bp = blueprint();
        bp.fields[1].required = true;
        let mut values = ValueMap::new();
        values.insert("f1".to_string(), FieldValue::text("Ann"));
        values.insert("f2".to_string(), FieldValue::Flag(false));
        values.insert("f3".to_string(), FieldValue::text("Ann"));

        let missing: Vec<_> = bp.missing_required(&values).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(missing, vec!["f2"]);

        values.insert("f2".to_string(), FieldValue::Flag(true));
        assert!(bp.missing_required(&values).is_empty());
    }

    #[test]
    fn test_contract_serde_uses_camel_case() {
        let bp = blueprint();
        let contract = Contract::new("c-1", &bp, "Test Contract", ValueMap::new(), Utc::now());
        let json = serde_json::to_value(&contract).unwrap();

        assert_eq!(json["blueprintId"], "bp-1");
        assert_eq!(json["blueprintName"], "Test BP");
        assert_eq!(json["status"], "Created");
        assert!(json.get("history").is_none());

        let back: Contract = serde_json::from_value(json).unwrap();
        assert_eq!(back, contract);
    }

    #[test]
    fn test_record_transition_updates_status_and_timestamp() {
        let bp = blueprint();
        let created = Utc::now();
        let mut contract = Contract::new("c-1", &bp, "Test", ValueMap::new(), created);
        let later = created + chrono::Duration::seconds(5);

        contract.record_transition(StatusTransition {
            from: ContractStatus::Created,
            to: ContractStatus::Approved,
            action: StatusAction::Advance,
            transitioned_at: later,
            transitioned_by: Some("system".to_string()),
            reason: None,
        });

        assert_eq!(contract.status, ContractStatus::Approved);
        assert_eq!(contract.updated_at, later);
        assert_eq!(contract.created_at, created);
        assert_eq!(contract.history.len(), 1);
    }
}
