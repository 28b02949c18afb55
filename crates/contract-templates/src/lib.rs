//! Contract Document Templates
//!
//! A blueprint's `contentTemplate` is plain text with `{{token}}` placeholders.
//! Rendering a contract substitutes each token with the value captured for the
//! matching field.
//!
//! Key concepts:
//! - Tokens resolve by value key, then by the first field with that label or id
//! - Checkbox values render as `[x] Yes` / `[ ] No`
//! - Missing values render as a blank signature-style line, never an error
//! - Output is plain text; no markup escaping is applied
//!
//! # Example
//!
//! ```text
//! This Agreement is entered into by {{Disclosing Party}} and {{f-receiving}}.
//! Remote Position: {{remote}}
//! ```
//!
//! renders as
//!
//! ```text
//! This Agreement is entered into by My Company Inc. and ____________________.
//! Remote Position: [x] Yes
//! ```

mod display;
mod lookup;
mod resolver;

pub use display::{display_value, field_rows, FieldRow, EMPTY_DISPLAY};
pub use lookup::find_field;
pub use resolver::{
    format_value, placeholders, resolve_template, Resolution, TemplateResolver, BLANK_PLACEHOLDER,
    CHECKED, UNCHECKED,
};
