//! The schema registry: one JSON Schema per [`DocumentType`].
//!
//! Schemas are plain [`serde_json::Value`]s written in a draft-07 subset, so
//! they can be handed to any other JSON Schema tool as they are. Sub-schemas
//! shared between types (resource locations, block states, the int, float and
//! height providers, vertical anchors, ...) are written once in [`shared`] and
//! every per-type schema carries a copy of them under `definitions`.
//!
//! ```
//! use datapack::{schema, DocumentType};
//!
//! let biome = schema::get_schema(DocumentType::Biome).unwrap();
//! assert_eq!(biome["required"][0], "temperature");
//! assert!(schema::get_schema(DocumentType::PackMeta).is_none());
//! ```
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::DocumentType;

mod noise;
pub mod shared;
mod structure;
mod worldgen;

pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";

static SCHEMAS: Lazy<BTreeMap<DocumentType, Value>> = Lazy::new(|| {
    DocumentType::LISTED
        .iter()
        .filter_map(|&ty| build(ty).map(|schema| (ty, document(ty, schema))))
        .collect()
});

/// The schema for a document type. Pack metadata is not validated and has
/// none.
pub fn get_schema(ty: DocumentType) -> Option<&'static Value> {
    SCHEMAS.get(&ty)
}

/// Look a schema up by type name, eg `"template_pool"`.
pub fn schema_for_name(name: &str) -> Option<&'static Value> {
    name.parse().ok().and_then(get_schema)
}

fn build(ty: DocumentType) -> Option<Value> {
    use DocumentType::*;
    Some(match ty {
        Biome => worldgen::biome(),
        ConfiguredFeature => worldgen::configured_feature(),
        PlacedFeature => worldgen::placed_feature(),
        ConfiguredCarver => worldgen::configured_carver(),
        Structure => structure::structure(),
        StructureSet => structure::structure_set(),
        TemplatePool => structure::template_pool(),
        ProcessorList => structure::processor_list(),
        NoiseSettings => noise::noise_settings(),
        DensityFunction => noise::density_function(),
        Noise => noise::noise(),
        Dimension => noise::dimension(),
        WorldPreset => noise::world_preset(),
        FlatLevelGeneratorPreset => noise::flat_level_generator_preset(),
        Tag => noise::tag(),
        PackMeta => return None,
    })
}

// Makes a per-type schema standalone: dialect, id and the shared definitions.
fn document(ty: DocumentType, schema: Value) -> Value {
    let mut out = serde_json::Map::new();
    out.insert("$schema".into(), SCHEMA_DIALECT.into());
    out.insert("$id".into(), format!("datapack:{}", ty).into());

    if let Value::Object(fields) = schema {
        out.extend(fields);
    }

    out.insert("definitions".into(), Value::Object(shared::definitions()));
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_type_has_a_schema() {
        for ty in DocumentType::LISTED {
            let schema = get_schema(ty).unwrap_or_else(|| panic!("no schema for {}", ty));
            assert_eq!(schema["$schema"], SCHEMA_DIALECT);
            assert!(schema["definitions"]["resource_location"].is_object());
        }
    }

    #[test]
    fn lookup_by_name() {
        assert!(schema_for_name("structure_set").is_some());
        assert!(schema_for_name("pack_meta").is_none());
        assert!(schema_for_name("not_a_type").is_none());
    }

    #[test]
    fn shared_refs_resolve() {
        fn walk(value: &Value, defs: &serde_json::Map<String, Value>) {
            match value {
                Value::Object(map) => {
                    if let Some(Value::String(r)) = map.get("$ref") {
                        let name = r.trim_start_matches("#/definitions/");
                        assert!(defs.contains_key(name), "dangling $ref {}", r);
                    }
                    map.values().for_each(|v| walk(v, defs));
                }
                Value::Array(items) => items.iter().for_each(|v| walk(v, defs)),
                _ => {}
            }
        }

        for ty in DocumentType::LISTED {
            let schema = get_schema(ty).unwrap();
            let defs = schema["definitions"].as_object().unwrap();
            walk(schema, defs);
        }
    }

    #[test]
    fn biome_decoration_steps() {
        let biome = get_schema(DocumentType::Biome).unwrap();
        assert_eq!(biome["properties"]["features"]["maxItems"], 11);
    }
}
