//! Validate documents against the schema for their type.
//!
//! Validation is advisory. It never blocks editing or export, and it never
//! fails: an unknown type is reported as a single error in the result.
//!
//! ```
//! use serde_json::json;
//!
//! let result = datapack::validate("noise", &json!({ "firstOctave": -7 }));
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].message, "Missing required field: amplitudes");
//! assert_eq!(result.errors[0].path, "");
//! ```
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{schema, DocumentType};

mod compile;
pub mod field;
mod message;

pub use field::*;
pub(crate) use message::as_integer;

use compile::CompiledSchema;

static COMPILED: Lazy<BTreeMap<DocumentType, CompiledSchema>> = Lazy::new(|| {
    DocumentType::LISTED
        .iter()
        .filter_map(|&ty| {
            let schema = schema::get_schema(ty)?;
            Some((ty, CompiledSchema::compile(schema)?))
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON pointer to the offending value. The document root is `""`.
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate `data` against the schema of the type named `type_name`.
pub fn validate(type_name: &str, data: &Value) -> ValidationResult {
    match type_name.parse::<DocumentType>() {
        Ok(ty) => validate_document(ty, data),
        Err(unknown) => ValidationResult::from_errors(vec![ValidationError {
            path: String::new(),
            message: unknown.to_string(),
        }]),
    }
}

pub fn validate_document(ty: DocumentType, data: &Value) -> ValidationResult {
    let compiled = match COMPILED.get(&ty) {
        Some(compiled) => compiled,
        // Pack metadata has no schema.
        None => return ValidationResult::from_errors(vec![]),
    };

    let errors = compiled
        .check(data)
        .into_iter()
        .map(|(path, violation)| ValidationError {
            path,
            message: violation.to_string(),
        })
        .collect();

    ValidationResult::from_errors(errors)
}
