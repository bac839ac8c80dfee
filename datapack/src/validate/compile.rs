//! Schemas compiled once with `jsonschema`, and the mapping from its errors
//! onto [`Violation`]s.
//!
//! When a value fails every branch of an `anyOf`/`oneOf` and only one branch
//! accepts its JSON kind, the errors of that branch are reported instead of
//! a bare "no match". Each refinement validates the value once against a
//! branch compiled on first use, so a deep recursive document costs one pass
//! per level.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use log::error;
use serde_json::{Map, Value};

use super::message::{Kind, Violation};

/// A violation found at a JSON pointer.
pub(crate) type Found = (String, Violation);

// Refinements nest one level per union, and `$ref` chains are followed at
// most this far.
const MAX_DEPTH: usize = 128;

pub(crate) struct CompiledSchema {
    schema: Value,
    validator: Validator,
    /// Union branches compiled on demand, keyed by JSON pointer into `schema`.
    branches: Mutex<HashMap<String, Arc<Validator>>>,
}

impl CompiledSchema {
    /// Compile a standalone schema. `$ref`s resolve against the schema itself.
    /// `None`, with the reason logged, if the schema is not valid.
    pub(crate) fn compile(schema: &Value) -> Option<CompiledSchema> {
        match jsonschema::validator_for(schema) {
            Ok(validator) => Some(CompiledSchema {
                schema: schema.clone(),
                validator,
                branches: Mutex::default(),
            }),
            Err(e) => {
                let id = schema.get("$id").and_then(Value::as_str).unwrap_or("schema");
                error!("{} does not compile: {}", id, e);
                None
            }
        }
    }

    pub(crate) fn check(&self, value: &Value) -> Vec<Found> {
        let mut found = vec![];
        self.collect(&self.validator, (&self.schema, ""), value, "", 0, &mut found);
        found
    }

    // `base` is the schema node `validator` was compiled from and its pointer
    // in `self.schema`. Paths are reported with `prefix` in front.
    fn collect(
        &self,
        validator: &Validator,
        base: (&Value, &str),
        value: &Value,
        prefix: &str,
        depth: usize,
        found: &mut Vec<Found>,
    ) {
        for error in validator.iter_errors(value) {
            let at = error.instance_path.to_string();
            let path = format!("{}{}", prefix, at);
            let schema_path = error.schema_path.to_string();
            let keyword = self.locate(base, &schema_path);

            match &error.kind {
                ValidationErrorKind::AnyOf { .. } | ValidationErrorKind::OneOfNotValid { .. } => {
                    let instance = value.pointer(&at).unwrap_or(value);
                    let before = found.len();

                    if depth < MAX_DEPTH {
                        let branch = keyword
                            .as_ref()
                            .and_then(|(node, pointer)| self.plausible_branch(node, pointer, instance));
                        if let Some((branch, pointer)) = branch {
                            if let Some(sub) = self.branch_validator(branch, &pointer) {
                                self.collect(&sub, (branch, pointer.as_str()), instance, &path, depth + 1, found);
                            }
                        }
                    }

                    if found.len() == before {
                        found.push((path, Violation::NoMatch));
                    }
                }
                _ => {
                    let keyword = keyword.map(|(node, _)| node);
                    found.extend(violations(&error, keyword).into_iter().map(|v| (path.clone(), v)));
                }
            }
        }
    }

    /// Follow a keyword location from `base` to the schema node it names,
    /// jumping through `$ref`s. Returns the node and its pointer.
    fn locate<'s>(&'s self, base: (&'s Value, &str), schema_path: &str) -> Option<(&'s Value, String)> {
        let (mut node, pointer) = base;
        let mut pointer = pointer.to_owned();

        for segment in schema_path.split('/').skip(1) {
            let segment = segment.replace("~1", "/").replace("~0", "~");
            if segment == "$ref" {
                let (target, target_pointer) = self.resolve_ref(node)?;
                node = target;
                pointer = target_pointer;
                continue;
            }

            if child(node, &segment).is_none() {
                let (target, target_pointer) = self.resolve_ref(node)?;
                node = target;
                pointer = target_pointer;
            }
            node = child(node, &segment)?;
            pointer = format!("{}/{}", pointer, escape(&segment));
        }

        Some((node, pointer))
    }

    /// The target of a local `$ref` (`#/...`) and its pointer.
    fn resolve_ref(&self, node: &Value) -> Option<(&Value, String)> {
        let reference = node.get("$ref")?.as_str()?;
        let pointer = reference.strip_prefix('#')?;
        Some((self.schema.pointer(pointer)?, pointer.to_owned()))
    }

    fn follow_refs<'s>(&'s self, mut node: &'s Value, mut pointer: String) -> (&'s Value, String) {
        for _ in 0..MAX_DEPTH {
            match self.resolve_ref(node) {
                Some((target, target_pointer)) => {
                    node = target;
                    pointer = target_pointer;
                }
                None => break,
            }
        }
        (node, pointer)
    }

    /// The single branch of a union that accepts the kind of `instance`.
    fn plausible_branch<'s>(
        &'s self,
        union: &'s Value,
        pointer: &str,
        instance: &Value,
    ) -> Option<(&'s Value, String)> {
        let (branches, pointer) = match union {
            Value::Array(branches) => (branches, pointer.to_owned()),
            Value::Object(map) => ["anyOf", "oneOf"].iter().find_map(|keyword| {
                let branches = map.get(*keyword)?.as_array()?;
                Some((branches, format!("{}/{}", pointer, keyword)))
            })?,
            _ => return None,
        };

        let mut plausible = branches
            .iter()
            .enumerate()
            .filter(|(_, branch)| self.accepts_kind(branch, instance, 0));
        let (index, branch) = plausible.next()?;
        if plausible.next().is_some() {
            return None;
        }

        Some(self.follow_refs(branch, format!("{}/{}", pointer, index)))
    }

    // Whether the `type`s a schema allows, through `$ref`, `allOf` and unions,
    // admit the value's kind. Only kinds are compared.
    fn accepts_kind(&self, schema: &Value, instance: &Value, depth: usize) -> bool {
        if depth > MAX_DEPTH {
            return true;
        }

        let (schema, _) = self.follow_refs(schema, String::new());
        let map = match schema {
            Value::Object(map) => map,
            Value::Bool(allowed) => return *allowed,
            _ => return true,
        };

        let own = match map.get("type") {
            Some(Value::String(name)) => kind_accepts(name, instance),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .any(|name| kind_accepts(name, instance)),
            _ => true,
        };
        let all = map.get("allOf").and_then(Value::as_array).map_or(true, |schemas| {
            schemas.iter().all(|s| self.accepts_kind(s, instance, depth + 1))
        });
        let union = ["anyOf", "oneOf"].iter().all(|keyword| {
            map.get(*keyword).and_then(Value::as_array).map_or(true, |schemas| {
                schemas.iter().any(|s| self.accepts_kind(s, instance, depth + 1))
            })
        });

        own && all && union
    }

    /// A branch as a standalone schema: its own keywords plus the dialect and
    /// definitions of the whole document.
    fn branch_validator(&self, branch: &Value, pointer: &str) -> Option<Arc<Validator>> {
        let mut cache = self.branches.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(validator) = cache.get(pointer) {
            return Some(Arc::clone(validator));
        }

        let mut standalone = match branch {
            Value::Object(fields) => fields.clone(),
            _ => return None,
        };
        for keyword in ["$schema", "definitions"] {
            if let Some(value) = self.schema.get(keyword) {
                standalone.insert(keyword.to_owned(), value.clone());
            }
        }

        match jsonschema::validator_for(&Value::Object(standalone)) {
            Ok(validator) => {
                let validator = Arc::new(validator);
                cache.insert(pointer.to_owned(), Arc::clone(&validator));
                Some(validator)
            }
            Err(e) => {
                error!("branch {} does not compile: {}", pointer, e);
                None
            }
        }
    }
}

/// Turn one error into violations. `keyword` is the value of the failing
/// keyword in the schema, when it could be found.
fn violations(error: &ValidationError<'_>, keyword: Option<&Value>) -> Vec<Violation> {
    let instance: &Value = &error.instance;

    let violation = match (&error.kind, keyword) {
        (ValidationErrorKind::Required { property }, _) => Violation::Required(match property {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        }),
        (ValidationErrorKind::AdditionalProperties { unexpected }, _) => {
            return unexpected.iter().cloned().map(Violation::Additional).collect()
        }
        (ValidationErrorKind::OneOfMultipleValid { .. }, _) => Violation::ManyMatch,
        (ValidationErrorKind::Type { .. }, Some(types)) => Violation::Type {
            expected: kinds(types),
            found: Kind::of(instance),
        },
        (ValidationErrorKind::Enum { .. }, Some(Value::Array(allowed))) => Violation::Enum {
            found: instance.clone(),
            allowed: allowed.clone(),
        },
        (ValidationErrorKind::Constant { .. }, Some(expected)) => Violation::Const(expected.clone()),
        (ValidationErrorKind::Minimum { .. }, Some(limit)) => match (instance.as_f64(), limit.as_f64()) {
            (Some(found), Some(limit)) => Violation::Minimum { found, limit },
            _ => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::Maximum { .. }, Some(limit)) => match (instance.as_f64(), limit.as_f64()) {
            (Some(found), Some(limit)) => Violation::Maximum { found, limit },
            _ => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::MinItems { .. }, Some(limit)) => match count(limit) {
            Some(limit) => Violation::MinItems(limit),
            None => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::MaxItems { .. }, Some(limit)) => match count(limit) {
            Some(limit) => Violation::MaxItems(limit),
            None => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::MinProperties { .. }, Some(limit)) => match count(limit) {
            Some(limit) => Violation::MinProperties {
                limit,
                found: instance.as_object().map_or(0, Map::len),
            },
            None => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::MaxProperties { .. }, Some(limit)) => match count(limit) {
            Some(limit) => Violation::MaxProperties {
                limit,
                found: instance.as_object().map_or(0, Map::len),
            },
            None => Violation::Other(error.to_string()),
        },
        (ValidationErrorKind::Pattern { .. }, Some(Value::String(pattern))) => Violation::Pattern {
            found: instance.as_str().unwrap_or_default().to_owned(),
            pattern: pattern.clone(),
        },
        (ValidationErrorKind::AnyOf { .. } | ValidationErrorKind::OneOfNotValid { .. }, _) => {
            Violation::NoMatch
        }
        _ => Violation::Other(error.to_string()),
    };

    vec![violation]
}

fn kinds(types: &Value) -> Vec<Kind> {
    match types {
        Value::String(name) => Kind::from_name(name).into_iter().collect(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .filter_map(Kind::from_name)
            .collect(),
        _ => vec![],
    }
}

fn kind_accepts(name: &str, instance: &Value) -> bool {
    Kind::from_name(name).map_or(true, |kind| kind.accepts(instance))
}

fn child<'v>(node: &'v Value, segment: &str) -> Option<&'v Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn count(limit: &Value) -> Option<usize> {
    limit.as_u64().map(|n| n as usize)
}
