//! Validation of untrusted recipe creation payloads.
//!
//! Checks stop at the first failing field and report it, so clients get a
//! single `{message, field}` pair back.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::Result;
use crate::schema::NewRecipe;

/// The first violation found in a creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the offending field, `None` when the body itself is wrong.
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    fn on_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    fn on_body(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Parse a raw request body and validate it.
///
/// An empty body is treated as `{}` so it fails on the first required field
/// rather than as malformed JSON.
pub fn parse_create_body(body: &[u8]) -> Result<NewRecipe> {
    let raw: Value = if body.trim_ascii().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(body)?
    };
    Ok(validate_create_input(&raw)?)
}

/// Validate a decoded JSON payload against the creation schema.
///
/// `fill` and `info` must be non-empty strings. The optional fields may be
/// absent, `null` or a string; empty strings are stored as `None`. Unknown
/// keys are ignored.
pub fn validate_create_input(raw: &Value) -> std::result::Result<NewRecipe, ValidationError> {
    let Value::Object(obj) = raw else {
        return Err(ValidationError::on_body(format!(
            "Expected object, received {}",
            type_name(raw)
        )));
    };

    let fill = required(obj, "fill", "Fill details are required")?;
    let info = required(obj, "info", "Information is required")?;

    Ok(NewRecipe {
        fill,
        info,
        ram: optional(obj, "ram")?,
        cpu: optional(obj, "cpu")?,
        disk: optional(obj, "disk")?,
        price: optional(obj, "price")?,
        discord_id: optional(obj, "discordId")?,
        discord_name: optional(obj, "discordName")?,
    })
}

fn required(
    obj: &Map<String, Value>,
    field: &str,
    empty_message: &str,
) -> std::result::Result<String, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::on_field(field, "Required")),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ValidationError::on_field(field, empty_message))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(field, other)),
    }
}

fn optional(
    obj: &Map<String, Value>,
    field: &str,
) -> std::result::Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(field, other)),
    }
}

fn wrong_type(field: &str, value: &Value) -> ValidationError {
    ValidationError::on_field(
        field,
        format!("Expected string, received {}", type_name(value)),
    )
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn field_of(raw: &Value) -> Option<String> {
        validate_create_input(raw).unwrap_err().field
    }

    #[test]
    fn accepts_minimal_payload() {
        let input = validate_create_input(&json!({"fill": "Basic Plan", "info": "2GB RAM"})).unwrap();
        assert_eq!(input, NewRecipe::new("Basic Plan", "2GB RAM"));
    }

    #[test]
    fn accepts_full_payload() {
        let input = validate_create_input(&json!({
            "fill": "Premium",
            "info": "notes",
            "ram": "16",
            "cpu": "8",
            "disk": "500",
            "price": "$49.99/mo",
            "discordId": "123456789",
            "discordName": "client"
        }))
        .unwrap();
        assert_eq!(input.ram.as_deref(), Some("16"));
        assert_eq!(input.cpu.as_deref(), Some("8"));
        assert_eq!(input.disk.as_deref(), Some("500"));
        assert_eq!(input.price.as_deref(), Some("$49.99/mo"));
        assert_eq!(input.discord_id.as_deref(), Some("123456789"));
        assert_eq!(input.discord_name.as_deref(), Some("client"));
    }

    #[test]
    fn empty_optionals_become_none() {
        let input = validate_create_input(&json!({
            "fill": "a",
            "info": "b",
            "ram": "",
            "price": null
        }))
        .unwrap();
        assert_eq!(input.ram, None);
        assert_eq!(input.price, None);
    }

    #[test]
    fn empty_fill_is_rejected() {
        let err = validate_create_input(&json!({"fill": "", "info": "x"})).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("fill"));
        assert_eq!(err.message, "Fill details are required");
    }

    #[test]
    fn empty_info_is_rejected() {
        let err = validate_create_input(&json!({"fill": "x", "info": ""})).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("info"));
        assert_eq!(err.message, "Information is required");
    }

    #[test]
    fn whitespace_only_required_fields_are_kept() {
        let input = validate_create_input(&json!({"fill": "   ", "info": " "})).unwrap();
        assert_eq!(input, NewRecipe::new("   ", " "));
    }

    #[test]
    fn missing_required_field() {
        let err = validate_create_input(&json!({"info": "x"})).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("fill"));
        assert_eq!(err.message, "Required");
    }

    #[test]
    fn reports_first_violation_only() {
        // Both required fields are missing and ram has the wrong type.
        assert_eq!(field_of(&json!({"ram": 4})).as_deref(), Some("fill"));
        assert_eq!(
            field_of(&json!({"fill": "x", "ram": 4, "cpu": 2})).as_deref(),
            Some("info")
        );
        assert_eq!(
            field_of(&json!({"fill": "x", "info": "y", "cpu": 2, "ram": 4})).as_deref(),
            Some("ram")
        );
    }

    #[test]
    fn wrong_type_message() {
        let err = validate_create_input(&json!({"fill": "x", "info": "y", "discordId": 42})).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("discordId"));
        assert_eq!(err.message, "Expected string, received number");
    }

    #[test]
    fn non_object_body() {
        let err = validate_create_input(&json!(["fill"])).unwrap_err();
        assert_eq!(err.field, None);
        assert_eq!(err.message, "Expected object, received array");
    }

    #[test]
    fn server_owned_fields_are_ignored() {
        let input = validate_create_input(&json!({
            "fill": "x",
            "info": "y",
            "id": 99,
            "publicId": "ALON-HACKED",
            "createdAt": "1999-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(input, NewRecipe::new("x", "y"));
    }

    #[test]
    fn parse_body_distinguishes_json_errors() {
        assert!(matches!(parse_create_body(b"{not json"), Err(Error::Json(_))));
        assert!(matches!(
            parse_create_body(br#"{"fill": ""}"#),
            Err(Error::Validation(_))
        ));
        let ok = parse_create_body(br#"{"fill": "a", "info": "b"}"#).unwrap();
        assert_eq!(ok.fill, "a");
    }

    #[test]
    fn empty_body_fails_on_fill() {
        let Err(Error::Validation(err)) = parse_create_body(b"  ") else {
            panic!("expected validation error");
        };
        assert_eq!(err.field.as_deref(), Some("fill"));
    }
}
