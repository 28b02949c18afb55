//! Blueprint Builder
//!
//! Editing state for a blueprint before it is saved. Fields are positioned
//! on a canvas; the content template references them by `{{label}}` or
//! `{{id}}`.

use contract_types::{FieldDefinition, FieldType};
use uuid::Uuid;

use crate::error::{Result, StudioError};
use crate::repository::NewBlueprint;

/// Horizontal position for auto-placed fields
const AUTO_X: f64 = 20.0;
/// Vertical spacing between auto-placed fields
const AUTO_ROW_HEIGHT: f64 = 60.0;
const AUTO_TOP: f64 = 20.0;

/// Changes to apply to one field; `None` leaves the property unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlueprintDraft {
    pub name: String,
    pub description: Option<String>,
    pub content_template: String,
    fields: Vec<FieldDefinition>,
}

impl BlueprintDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Append a field below the existing ones. Returns the new field id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let y = self.fields.len() as f64 * AUTO_ROW_HEIGHT + AUTO_TOP;
        self.add_field_at(field_type, AUTO_X, y)
    }

    /// Append a field at an explicit canvas position. Returns the new field id.
    pub fn add_field_at(&mut self, field_type: FieldType, x: f64, y: f64) -> String {
        let id = Uuid::new_v4().to_string();
        self.fields.push(FieldDefinition::new(
            id.clone(),
            field_type,
            format!("New {field_type} field"),
            false,
            x,
            y,
        ));
        id
    }

    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> Result<&FieldDefinition> {
        let field = self.field_mut(id)?;
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        Ok(field)
    }

    pub fn move_field(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let field = self.field_mut(id)?;
        field.x = x;
        field.y = y;
        Ok(())
    }

    /// Remove a field. Template tokens that referenced it are left in place
    /// and render blank.
    pub fn remove_field(&mut self, id: &str) -> Result<FieldDefinition> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| field_not_found(id))?;
        Ok(self.fields.remove(index))
    }

    pub fn set_content_template(&mut self, template: impl Into<String>) {
        self.content_template = template.into();
    }

    /// Append a `{{label}}` token for a field to the content template
    pub fn insert_token(&mut self, id: &str) -> Result<()> {
        let label = self
            .field(id)
            .map(|f| f.label.clone())
            .ok_or_else(|| field_not_found(id))?;
        self.content_template.push_str(&format!("{{{{{label}}}}}"));
        Ok(())
    }

    /// Validate the draft and produce the record to save
    pub fn finish(self) -> Result<NewBlueprint> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StudioError::Validation(
                "Please enter a blueprint name".to_string(),
            ));
        }
        if self.fields.is_empty() {
            return Err(StudioError::Validation(
                "Please add at least one field".to_string(),
            ));
        }

        Ok(NewBlueprint {
            name: name.to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            content_template: Some(self.content_template).filter(|t| !t.is_empty()),
            fields: self.fields,
        })
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FieldDefinition> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| field_not_found(id))
    }
}

fn field_not_found(id: &str) -> StudioError {
    StudioError::NotFound {
        kind: "Field",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_layout() {
        let mut draft = BlueprintDraft::new("Lease");
        draft.add_field(FieldType::Text);
        draft.add_field(FieldType::Date);
        let third = draft.add_field(FieldType::Checkbox);

        let field = draft.field(&third).unwrap();
        assert_eq!(field.label, "New checkbox field");
        assert!(!field.required);
        assert_eq!((field.x, field.y), (20.0, 140.0));
    }

    #[test]
    fn test_add_at_position() {
        let mut draft = BlueprintDraft::new("Lease");
        let id = draft.add_field_at(FieldType::Signature, 310.5, 42.0);
        assert_eq!(draft.field(&id).map(|f| (f.x, f.y)), Some((310.5, 42.0)));
    }

    #[test]
    fn test_update_move_and_remove() {
        let mut draft = BlueprintDraft::new("Lease");
        let id = draft.add_field(FieldType::Text);

        draft
            .update_field(
                &id,
                FieldPatch {
                    label: Some("Tenant".to_string()),
                    required: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        draft.move_field(&id, 300.0, 20.0).unwrap();

        let field = draft.field(&id).unwrap();
        assert_eq!(field.label, "Tenant");
        assert!(field.required);
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.x, 300.0);

        let removed = draft.remove_field(&id).unwrap();
        assert_eq!(removed.label, "Tenant");
        assert!(draft.fields().is_empty());
        assert!(draft.remove_field(&id).is_err());
    }

    #[test]
    fn test_insert_token_uses_label() {
        let mut draft = BlueprintDraft::new("Lease");
        let id = draft.add_field(FieldType::Text);
        draft.set_content_template("Tenant: ");
        draft.insert_token(&id).unwrap();
        assert_eq!(draft.content_template, "Tenant: {{New text field}}");
    }

    #[test]
    fn test_finish_validation() {
        let err = BlueprintDraft::new("  ").finish().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please enter a blueprint name");

        let err = BlueprintDraft::new("Lease").finish().unwrap_err();
        assert!(err.to_string().contains("at least one field"));

        let mut draft = BlueprintDraft::new(" Lease ");
        draft.add_field(FieldType::Text);
        let new = draft.finish().unwrap();
        assert_eq!(new.name, "Lease");
        assert_eq!(new.fields.len(), 1);
        assert_eq!(new.content_template, None);
    }
}
