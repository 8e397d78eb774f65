use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::EntityKind;

/// Key used for errors that belong to the request body as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{}", fields.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Invalid(String),

    #[error("{} uuid is required", .0.id_label())]
    MissingId(EntityKind),

    #[error("'{}' is not a valid {} uuid", .raw, .kind.id_label())]
    MalformedId { kind: EntityKind, raw: String },

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("{kind} not found for field '{field}'")]
    Reference {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind} is still referenced by {count} product(s)")]
    InUse { kind: EntityKind, count: usize },

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    /// Every catalog failure is reported as 400, not-found and store errors
    /// included. API consumers depend on this mapping.
    pub fn http_status(&self) -> u16 {
        400
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field is required.");
        errors.add("price", "A valid number is required.");
        errors.add("price", "Ensure this value is greater than or equal to 0.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("price").unwrap().len(), 2);
        assert_eq!(errors.to_string(), "name, price");
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn field_errors_serialize_as_map() {
        let errors = FieldErrors::single("name", "This field may not be blank.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": ["This field may not be blank."] })
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            CatalogError::NotFound(EntityKind::Subcategory).to_string(),
            "Sub category not found"
        );
        assert_eq!(
            CatalogError::MissingId(EntityKind::Product).to_string(),
            "product uuid is required"
        );
        assert_eq!(
            CatalogError::Reference {
                kind: EntityKind::Category,
                field: "category"
            }
            .to_string(),
            "Category not found for field 'category'"
        );
        assert_eq!(
            CatalogError::InUse {
                kind: EntityKind::Unit,
                count: 3
            }
            .to_string(),
            "Unit is still referenced by 3 product(s)"
        );
    }

    #[test]
    fn http_status_is_always_bad_request() {
        assert_eq!(CatalogError::NotFound(EntityKind::Banner).http_status(), 400);
        assert_eq!(
            CatalogError::Internal(anyhow::anyhow!("connection reset")).http_status(),
            400
        );
        assert_eq!(
            CatalogError::Validation(FieldErrors::new()).http_status(),
            400
        );
    }
}
