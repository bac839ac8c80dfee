//! Structures, how they are spread over the world, and the jigsaw pieces
//! they are assembled from.
use serde_json::{json, Value};

use super::shared::{array_of, id_or_inline, reference, DECORATION_STEPS, HEIGHTMAPS, SPAWN_CATEGORIES};

pub fn structure() -> Value {
    let mut overrides = serde_json::Map::new();
    for category in SPAWN_CATEGORIES {
        overrides.insert(
            category.to_owned(),
            json!({
                "type": "object",
                "required": ["bounding_box", "spawns"],
                "properties": {
                    "bounding_box": { "enum": ["piece", "full"] },
                    "spawns": array_of(reference("spawner"))
                }
            }),
        );
    }

    json!({
        "title": "Structure",
        "type": "object",
        "required": ["type", "biomes", "step", "spawn_overrides"],
        "properties": {
            "type": reference("resource_location"),
            "biomes": reference("holder_set"),
            "step": { "enum": DECORATION_STEPS },
            "terrain_adaptation": {
                "enum": ["none", "beard_thin", "beard_box", "bury", "encapsulate"]
            },
            "spawn_overrides": {
                "type": "object",
                "properties": overrides,
                "additionalProperties": false
            },
            "start_pool": reference("resource_location"),
            "size": { "type": "integer", "minimum": 0, "maximum": 20 },
            "start_height": reference("height_provider"),
            "start_jigsaw_name": reference("resource_location"),
            "project_start_to_heightmap": { "enum": HEIGHTMAPS },
            "max_distance_from_center": { "type": "integer", "minimum": 1, "maximum": 128 },
            "use_expansion_hack": { "type": "boolean" }
        }
    })
}

pub fn structure_set() -> Value {
    json!({
        "title": "Structure set",
        "type": "object",
        "required": ["structures", "placement"],
        "properties": {
            "structures": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["structure", "weight"],
                    "properties": {
                        "structure": reference("resource_location"),
                        "weight": { "type": "integer", "minimum": 1 }
                    },
                    "additionalProperties": false
                }
            },
            "placement": {
                "type": "object",
                "required": ["type", "salt"],
                "properties": {
                    "type": {
                        "enum": ["minecraft:random_spread", "minecraft:concentric_rings"]
                    },
                    "salt": { "type": "integer", "minimum": 0 },
                    "frequency": { "type": "number", "minimum": 0, "maximum": 1 },
                    "frequency_reduction_method": {
                        "enum": ["default", "legacy_type_1", "legacy_type_2", "legacy_type_3"]
                    },
                    "locate_offset": {
                        "type": "array",
                        "minItems": 3,
                        "maxItems": 3,
                        "items": { "type": "integer", "minimum": -16, "maximum": 16 }
                    },
                    "exclusion_zone": {
                        "type": "object",
                        "required": ["other_set", "chunk_count"],
                        "properties": {
                            "other_set": reference("resource_location"),
                            "chunk_count": { "type": "integer", "minimum": 1, "maximum": 16 }
                        }
                    },
                    "spacing": { "type": "integer", "minimum": 0, "maximum": 4096 },
                    "separation": { "type": "integer", "minimum": 0, "maximum": 4096 },
                    "spread_type": { "enum": ["linear", "triangular"] },
                    "distance": { "type": "integer", "minimum": 0, "maximum": 1023 },
                    "spread": { "type": "integer", "minimum": 0, "maximum": 1023 },
                    "count": { "type": "integer", "minimum": 1, "maximum": 4095 },
                    "preferred_biomes": reference("holder_set")
                }
            }
        },
        "additionalProperties": false
    })
}

fn pool_element() -> Value {
    json!({
        "type": "object",
        "required": ["element_type"],
        "properties": {
            "element_type": {
                "enum": [
                    "minecraft:single_pool_element",
                    "minecraft:legacy_single_pool_element",
                    "minecraft:list_pool_element",
                    "minecraft:feature_pool_element",
                    "minecraft:empty_pool_element"
                ]
            },
            "location": reference("resource_location"),
            "processors": id_or_inline(json!({ "type": "object" })),
            "projection": { "enum": ["rigid", "terrain_matching"] },
            "feature": reference("resource_location"),
            "elements": { "type": "array" }
        }
    })
}

pub fn template_pool() -> Value {
    json!({
        "title": "Template pool",
        "type": "object",
        "required": ["fallback", "elements"],
        "properties": {
            "fallback": reference("resource_location"),
            "elements": array_of(json!({
                "type": "object",
                "required": ["element", "weight"],
                "properties": {
                    "element": pool_element(),
                    "weight": { "type": "integer", "minimum": 1, "maximum": 150 }
                },
                "additionalProperties": false
            }))
        },
        "additionalProperties": false
    })
}

pub fn processor_list() -> Value {
    json!({
        "title": "Processor list",
        "type": "object",
        "required": ["processors"],
        "properties": {
            "processors": array_of(json!({
                "type": "object",
                "required": ["processor_type"],
                "properties": {
                    "processor_type": reference("resource_location"),
                    "rules": { "type": "array" },
                    "integrity": { "type": "number", "minimum": 0, "maximum": 1 },
                    "rottable_blocks": reference("holder_set"),
                    "heightmap": { "enum": HEIGHTMAPS },
                    "offset": { "type": "integer" }
                }
            }))
        },
        "additionalProperties": false
    })
}
