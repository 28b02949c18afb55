//! Field data view
//!
//! Short per-field values for the contract detail table, as opposed to the
//! rendered document body.

use contract_types::{Blueprint, FieldType, FieldValue, ValueMap};
use serde::Serialize;

/// Shown for a non-checkbox field with no value
pub const EMPTY_DISPLAY: &str = "-";

/// Display value for one field.
///
/// Checkbox fields show `Yes` when filled and `No` otherwise. Other fields
/// show their text, or [`EMPTY_DISPLAY`] when nothing was captured.
pub fn display_value(field_type: FieldType, value: Option<&FieldValue>) -> &str {
    let filled = value.is_some_and(FieldValue::is_filled);
    match (field_type, value) {
        (FieldType::Checkbox, _) if filled => "Yes",
        (FieldType::Checkbox, _) => "No",
        (_, Some(FieldValue::Text(s))) if !s.is_empty() => s.as_str(),
        (_, Some(FieldValue::Flag(true))) => "Yes",
        _ => EMPTY_DISPLAY,
    }
}

/// One row of the field data table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow<'a> {
    pub field_id: &'a str,
    pub label: &'a str,
    pub value: &'a str,
}

/// Rows for every blueprint field, in definition order
pub fn field_rows<'a>(blueprint: &'a Blueprint, values: &'a ValueMap) -> Vec<FieldRow<'a>> {
    blueprint
        .fields
        .iter()
        .map(|field| FieldRow {
            field_id: &field.id,
            label: &field.label,
            value: display_value(field.field_type, values.get(&field.id)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contract_types::FieldDefinition;

    #[test]
    fn test_checkbox_display() {
        assert_eq!(display_value(FieldType::Checkbox, Some(&true.into())), "Yes");
        assert_eq!(display_value(FieldType::Checkbox, Some(&false.into())), "No");
        assert_eq!(display_value(FieldType::Checkbox, None), "No");
    }

    #[test]
    fn test_text_display() {
        let ann = FieldValue::text("Ann");
        assert_eq!(display_value(FieldType::Text, Some(&ann)), "Ann");
        assert_eq!(display_value(FieldType::Date, Some(&FieldValue::text(""))), "-");
        assert_eq!(display_value(FieldType::Signature, None), "-");
    }

    #[test]
    fn test_field_rows_follow_definition_order() {
        let blueprint = Blueprint {
            id: "bp".to_string(),
            name: "BP".to_string(),
            description: None,
            content_template: None,
            fields: vec![
                FieldDefinition::new("b", FieldType::Checkbox, "Remote", false, 0.0, 50.0),
                FieldDefinition::new("a", FieldType::Text, "Name", true, 0.0, 10.0),
            ],
            created_at: Utc::now(),
        };
        let mut values = ValueMap::new();
        values.insert("a".to_string(), FieldValue::text("Ann"));

        let rows = field_rows(&blueprint, &values);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].label, rows[0].value), ("Remote", "No"));
        assert_eq!((rows[1].label, rows[1].value), ("Name", "Ann"));
    }
}
