//! Validators for single fields, usable without a surrounding document. Form
//! widgets call these as the user types.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::as_integer;
use crate::id;
use crate::schema::shared::{RESOURCE_LOCATION_PATTERN, TAG_REFERENCE_PATTERN};
use crate::types::{AnchorError, IntProvider, VerticalAnchor};

static RESOURCE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(RESOURCE_LOCATION_PATTERN).expect("resource location pattern"));
static TAG_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TAG_REFERENCE_PATTERN).expect("tag reference pattern"));

pub const MAX_COLOR: i64 = 0xFF_FF_FF;

/// Outcome of a single-value check. A warning never makes the value invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FieldResult {
    fn ok() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(msg.into()),
            warning: None,
        }
    }
}

/// Outcome of a check on a small object where several fields can be wrong at
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldResults {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<Vec<String>> for FieldResults {
    fn from(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOptions<'a> {
    /// Whether a `#tag` reference is acceptable in this field.
    pub allow_tag: bool,
    /// Known ids for this field. An id missing from the list only warns, since
    /// it may be defined by this pack or another one.
    pub registry: Option<&'a [&'a str]>,
}

/// Check a resource location typed into a field. Ids without a namespace are
/// read as `minecraft:` ids, as the game does.
pub fn validate_resource_location(value: &str, options: FieldOptions<'_>) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return FieldResult::error("Resource location is required");
    }

    let is_tag = value.starts_with('#');
    if is_tag && !options.allow_tag {
        return FieldResult::error("Tag references are not allowed here");
    }

    let qualified = if is_tag {
        format!("#{}", id::to_display(value, "minecraft"))
    } else {
        id::to_display(value, "minecraft")
    };

    let well_formed = if is_tag {
        TAG_REFERENCE.is_match(&qualified)
    } else {
        RESOURCE_LOCATION.is_match(&qualified)
    };
    if !well_formed {
        return FieldResult::error(if is_tag {
            format!("Invalid tag reference: \"{}\"", value)
        } else {
            format!("Invalid resource location: \"{}\"", value)
        });
    }

    let mut result = FieldResult::ok();
    if let (Some(registry), false) = (options.registry, is_tag) {
        let known = registry
            .iter()
            .any(|entry| id::to_display(entry, "minecraft") == qualified);
        if !known {
            result.warning = Some(format!("Unknown entry: {}", qualified));
        }
    }
    result
}

/// A block state is `{"Name": id, "Properties": {string: string}}`.
pub fn validate_block_state(value: &Value) -> FieldResults {
    let map = match value.as_object() {
        Some(map) => map,
        None => return vec!["Block state must be an object".to_owned()].into(),
    };

    let mut errors = vec![];
    match map.get("Name") {
        None => errors.push("Missing required field: Name".to_owned()),
        Some(Value::String(name)) => {
            if let Some(e) = validate_resource_location(name, FieldOptions::default()).error {
                errors.push(format!("Name: {}", e));
            }
        }
        Some(_) => errors.push("Name: Expected string".to_owned()),
    }

    match map.get("Properties") {
        None => {}
        Some(Value::Object(properties)) => {
            for (key, value) in properties {
                if !value.is_string() {
                    errors.push(format!("Properties/{}: Expected string", key));
                }
            }
        }
        Some(_) => errors.push("Properties: Expected object".to_owned()),
    }

    for key in map.keys() {
        if key != "Name" && key != "Properties" {
            errors.push(format!("Unexpected property: {}", key));
        }
    }

    errors.into()
}

/// A vertical anchor has exactly one of `absolute`, `above_bottom` or
/// `below_top`.
pub fn validate_vertical_anchor(value: &Value) -> FieldResult {
    match VerticalAnchor::from_value(value) {
        Ok(_) => FieldResult::ok(),
        Err(AnchorError::NotAnObject) => FieldResult::error("Vertical anchor must be an object"),
        Err(AnchorError::NoKey) => FieldResult::error(
            "Vertical anchor needs one of absolute, above_bottom, below_top",
        ),
        Err(AnchorError::ManyKeys(keys)) => FieldResult::error(format!(
            "Vertical anchor must have exactly one key, found: {}",
            keys.join(", ")
        )),
        Err(AnchorError::NotInteger(key)) => {
            FieldResult::error(format!("Vertical anchor {} must be an integer", key))
        }
        Err(AnchorError::Unexpected(key)) => {
            FieldResult::error(format!("Unexpected property: {}", key))
        }
    }
}

/// A mob spawner entry: `type`, and non-negative `weight`, `minCount`,
/// `maxCount` with `minCount <= maxCount`.
pub fn validate_spawner(value: &Value) -> FieldResults {
    let map = match value.as_object() {
        Some(map) => map,
        None => return vec!["Spawner must be an object".to_owned()].into(),
    };

    let mut errors = vec![];
    match map.get("type") {
        None => errors.push("Missing required field: type".to_owned()),
        Some(Value::String(ty)) => {
            if let Some(e) = validate_resource_location(ty, FieldOptions::default()).error {
                errors.push(format!("type: {}", e));
            }
        }
        Some(_) => errors.push("type: Expected string".to_owned()),
    }

    let mut count = |field: &str| -> Option<i64> {
        match map.get(field) {
            None => {
                errors.push(format!("Missing required field: {}", field));
                None
            }
            Some(v) => match as_integer(v) {
                Some(n) if n >= 0 => Some(n),
                Some(_) => {
                    errors.push(format!("{} must not be negative", field));
                    None
                }
                None => {
                    errors.push(format!("{}: Expected integer", field));
                    None
                }
            },
        }
    };

    let _weight = count("weight");
    let min = count("minCount");
    let max = count("maxCount");

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.push(format!(
                "minCount ({}) must not be greater than maxCount ({})",
                min, max
            ));
        }
    }

    errors.into()
}

/// An int provider: a literal, or a distribution whose bounds are in order.
pub fn validate_int_provider(value: &Value) -> FieldResult {
    match IntProvider::deserialize(&whole_numbers(value)) {
        Ok(provider) => match provider.range() {
            Some(_) => FieldResult::ok(),
            None => FieldResult::error("Int provider minimum is greater than its maximum"),
        },
        Err(_) => FieldResult::error("Not a valid int provider"),
    }
}

// Whole floats as integers, so `5.0` reads into an `i32` field.
fn whole_numbers(value: &Value) -> Value {
    match value {
        Value::Number(_) => match as_integer(value) {
            Some(n) => n.into(),
            None => value.clone(),
        },
        Value::Array(items) => items.iter().map(whole_numbers).collect(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), whole_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// A packed RGB color: an integer in `0..=0xFFFFFF`.
pub fn validate_color(value: &Value) -> FieldResult {
    match as_integer(value) {
        Some(n) if (0..=MAX_COLOR).contains(&n) => FieldResult::ok(),
        Some(n) => FieldResult::error(format!(
            "Color {} is outside the range 0 to {}",
            n, MAX_COLOR
        )),
        None => FieldResult::error("Color must be an integer"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resource_location_format() {
        let opts = FieldOptions::default();
        assert!(validate_resource_location("minecraft:plains", opts).valid);
        assert!(validate_resource_location("plains", opts).valid);
        assert!(validate_resource_location("custom:caves/deep_dark", opts).valid);

        let r = validate_resource_location("Minecraft:Plains", opts);
        assert!(!r.valid);
        assert_eq!(r.error.unwrap(), "Invalid resource location: \"Minecraft:Plains\"");

        assert!(!validate_resource_location("", opts).valid);
        assert!(!validate_resource_location("minecraft:", opts).valid);
    }

    #[test]
    fn tags_gated_by_option() {
        let r = validate_resource_location("#minecraft:is_forest", FieldOptions::default());
        assert_eq!(r.error.as_deref(), Some("Tag references are not allowed here"));

        let opts = FieldOptions {
            allow_tag: true,
            registry: None,
        };
        assert!(validate_resource_location("#minecraft:is_forest", opts).valid);
        assert!(!validate_resource_location("#Bad", opts).valid);
    }

    #[test]
    fn registry_miss_only_warns() {
        let registry = ["minecraft:plains", "minecraft:desert"];
        let opts = FieldOptions {
            allow_tag: false,
            registry: Some(&registry),
        };

        let r = validate_resource_location("plains", opts);
        assert!(r.valid);
        assert!(r.warning.is_none());

        let r = validate_resource_location("custom:moon", opts);
        assert!(r.valid);
        assert_eq!(r.warning.as_deref(), Some("Unknown entry: custom:moon"));
    }

    #[test]
    fn block_state() {
        assert!(validate_block_state(&json!({ "Name": "minecraft:stone" })).valid);
        assert!(
            validate_block_state(&json!({
                "Name": "minecraft:oak_log",
                "Properties": { "axis": "y" }
            }))
            .valid
        );

        let r = validate_block_state(&json!({ "Properties": { "axis": 1 } }));
        assert_eq!(
            r.errors,
            vec!["Missing required field: Name", "Properties/axis: Expected string"]
        );
        assert!(!validate_block_state(&json!("minecraft:stone")).valid);
    }

    #[test]
    fn vertical_anchor_exclusive() {
        assert!(validate_vertical_anchor(&json!({ "absolute": 5 })).valid);

        let r = validate_vertical_anchor(&json!({ "absolute": 5, "above_bottom": 2 }));
        assert!(!r.valid);
        assert!(r.error.unwrap().contains("exactly one key"));

        let r = validate_vertical_anchor(&json!({}));
        assert!(!r.valid);
        assert!(!validate_vertical_anchor(&json!({ "below_top": 1.5 })).valid);
    }

    #[test]
    fn spawner_counts() {
        let good = json!({ "type": "minecraft:zombie", "weight": 100, "minCount": 1, "maxCount": 4 });
        assert!(validate_spawner(&good).valid);

        let r = validate_spawner(&json!({
            "type": "minecraft:zombie", "weight": -1, "minCount": 5, "maxCount": 4
        }));
        assert_eq!(
            r.errors,
            vec![
                "weight must not be negative",
                "minCount (5) must not be greater than maxCount (4)"
            ]
        );

        let r = validate_spawner(&json!({ "type": "minecraft:zombie" }));
        assert_eq!(r.errors.len(), 3);
    }

    #[test]
    fn whole_floats_count_as_integers() {
        let spawner = json!({ "type": "minecraft:zombie", "weight": 1.0, "minCount": 1, "maxCount": 4.0 });
        assert!(validate_spawner(&spawner).valid);

        let r = validate_spawner(&json!({
            "type": "minecraft:zombie", "weight": 1.5, "minCount": 1, "maxCount": 4
        }));
        assert_eq!(r.errors, vec!["weight: Expected integer"]);

        assert!(validate_color(&json!(5.0)).valid);
        assert!(!validate_color(&json!(5.5)).valid);
        assert!(validate_int_provider(&json!(3.0)).valid);
        assert!(validate_vertical_anchor(&json!({ "absolute": 8.0 })).valid);
    }

    #[test]
    fn int_provider_bounds() {
        assert!(validate_int_provider(&json!(3)).valid);
        assert!(validate_int_provider(&json!({
            "type": "minecraft:uniform", "min_inclusive": 0, "max_inclusive": 3
        }))
        .valid);

        let r = validate_int_provider(&json!({
            "type": "minecraft:uniform", "min_inclusive": 4, "max_inclusive": 3
        }));
        assert!(!r.valid);
        assert!(!validate_int_provider(&json!({ "type": "minecraft:unknown" })).valid);
    }

    #[test]
    fn color_range() {
        assert!(validate_color(&json!(0)).valid);
        assert!(validate_color(&json!(16777215)).valid);
        assert!(!validate_color(&json!(16777216)).valid);
        assert!(!validate_color(&json!(-1)).valid);
        assert!(!validate_color(&json!("#ffffff")).valid);
    }
}
