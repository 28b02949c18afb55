//! Field lookup for placeholder tokens

use contract_types::FieldDefinition;

/// Find the field a placeholder token refers to.
///
/// The first field in definition order whose `label` or `id` equals the
/// token. Duplicate labels resolve to the earliest field.
pub fn find_field<'f>(fields: &'f [FieldDefinition], token: &str) -> Option<&'f FieldDefinition> {
    fields.iter().find(|f| f.label == token || f.id == token)
}
