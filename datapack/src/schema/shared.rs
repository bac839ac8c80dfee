//! Sub-schemas embedded by more than one document type. Each is defined here
//! once and referenced as `#/definitions/<name>`.
use serde_json::{json, Map, Value};

pub const RESOURCE_LOCATION_PATTERN: &str = "^[a-z0-9_.-]+:[a-z0-9_./=-]+$";
pub const TAG_REFERENCE_PATTERN: &str = "^#[a-z0-9_.-]+:[a-z0-9_./=-]+$";
pub const RESOURCE_OR_TAG_PATTERN: &str = "^#?[a-z0-9_.-]+:[a-z0-9_./=-]+$";

pub const DECORATION_STEPS: [&str; 11] = [
    "raw_generation",
    "lakes",
    "local_modifications",
    "underground_structures",
    "surface_structures",
    "strongholds",
    "underground_ores",
    "underground_decoration",
    "fluid_springs",
    "vegetal_decoration",
    "top_layer_modification",
];

pub const SPAWN_CATEGORIES: [&str; 8] = [
    "monster",
    "creature",
    "ambient",
    "axolotls",
    "underground_water_creature",
    "water_creature",
    "water_ambient",
    "misc",
];

pub const HEIGHTMAPS: [&str; 6] = [
    "WORLD_SURFACE_WG",
    "WORLD_SURFACE",
    "OCEAN_FLOOR_WG",
    "OCEAN_FLOOR",
    "MOTION_BLOCKING",
    "MOTION_BLOCKING_NO_LEAVES",
];

/// Shorthand for `{"$ref": "#/definitions/<name>"}`.
pub fn reference(name: &str) -> Value {
    json!({ "$ref": format!("#/definitions/{}", name) })
}

/// `{"type": "array", "items": <items>}`.
pub fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

/// A field holding either a reference by id or the document written inline.
pub fn id_or_inline(inline: Value) -> Value {
    json!({ "anyOf": [reference("resource_location"), inline] })
}

pub fn definitions() -> Map<String, Value> {
    let mut defs = Map::new();

    defs.insert(
        "resource_location".into(),
        json!({ "type": "string", "pattern": RESOURCE_LOCATION_PATTERN }),
    );
    defs.insert(
        "tag_reference".into(),
        json!({ "type": "string", "pattern": TAG_REFERENCE_PATTERN }),
    );
    defs.insert(
        "resource_or_tag".into(),
        json!({ "type": "string", "pattern": RESOURCE_OR_TAG_PATTERN }),
    );
    // A single id, a `#tag`, or an inline list of ids.
    defs.insert(
        "holder_set".into(),
        json!({
            "anyOf": [
                reference("resource_or_tag"),
                array_of(reference("resource_location")),
            ]
        }),
    );
    defs.insert(
        "color".into(),
        json!({ "type": "integer", "minimum": 0, "maximum": 16777215 }),
    );
    defs.insert(
        "block_state".into(),
        json!({
            "type": "object",
            "required": ["Name"],
            "properties": {
                "Name": reference("resource_location"),
                "Properties": {
                    "type": "object",
                    "additionalProperties": { "type": "string" }
                }
            },
            "additionalProperties": false
        }),
    );
    defs.insert(
        "vertical_anchor".into(),
        json!({
            "type": "object",
            "properties": {
                "absolute": { "type": "integer" },
                "above_bottom": { "type": "integer" },
                "below_top": { "type": "integer" }
            },
            "additionalProperties": false,
            "minProperties": 1,
            "maxProperties": 1
        }),
    );
    defs.insert("int_provider".into(), int_provider());
    defs.insert("float_provider".into(), float_provider());
    defs.insert("height_provider".into(), height_provider());
    defs.insert(
        "spawner".into(),
        json!({
            "type": "object",
            "required": ["type", "weight", "minCount", "maxCount"],
            "properties": {
                "type": reference("resource_location"),
                "weight": { "type": "integer", "minimum": 0 },
                "minCount": { "type": "integer", "minimum": 0 },
                "maxCount": { "type": "integer", "minimum": 0 }
            }
        }),
    );
    defs.insert(
        "density_function".into(),
        json!({
            "anyOf": [
                { "type": "number" },
                reference("resource_location"),
                {
                    "type": "object",
                    "required": ["type"],
                    "properties": {
                        "type": reference("resource_location"),
                        "argument": reference("density_function"),
                        "argument1": reference("density_function"),
                        "argument2": reference("density_function"),
                        "input": reference("density_function"),
                        "noise": { "anyOf": [reference("resource_location"), reference("noise_parameters")] },
                        "xz_scale": { "type": "number" },
                        "y_scale": { "type": "number" },
                        "min": { "type": "number" },
                        "max": { "type": "number" }
                    }
                }
            ]
        }),
    );
    defs.insert(
        "noise_parameters".into(),
        json!({
            "type": "object",
            "required": ["firstOctave", "amplitudes"],
            "properties": {
                "firstOctave": { "type": "integer" },
                "amplitudes": {
                    "type": "array",
                    "items": { "type": "number" },
                    "minItems": 1
                }
            },
            "additionalProperties": false
        }),
    );
    defs.insert("dimension".into(), dimension());

    defs
}

fn int_provider() -> Value {
    json!({
        "oneOf": [
            { "type": "integer" },
            {
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {
                        "enum": [
                            "minecraft:constant",
                            "minecraft:uniform",
                            "minecraft:biased_to_bottom",
                            "minecraft:clamped",
                            "minecraft:clamped_normal",
                            "minecraft:weighted_list"
                        ]
                    },
                    "value": { "type": "integer" },
                    "min_inclusive": { "type": "integer" },
                    "max_inclusive": { "type": "integer" },
                    "source": reference("int_provider"),
                    "mean": { "type": "number" },
                    "deviation": { "type": "number" },
                    "distribution": array_of(json!({
                        "type": "object",
                        "required": ["data", "weight"],
                        "properties": {
                            "data": reference("int_provider"),
                            "weight": { "type": "integer", "minimum": 0 }
                        }
                    }))
                }
            }
        ]
    })
}

fn float_provider() -> Value {
    json!({
        "oneOf": [
            { "type": "number" },
            {
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {
                        "enum": [
                            "minecraft:constant",
                            "minecraft:uniform",
                            "minecraft:clamped_normal",
                            "minecraft:trapezoid"
                        ]
                    },
                    "value": { "type": "number" },
                    "min_inclusive": { "type": "number" },
                    "max_exclusive": { "type": "number" },
                    "mean": { "type": "number" },
                    "deviation": { "type": "number" },
                    "min": { "type": "number" },
                    "max": { "type": "number" },
                    "plateau": { "type": "number" }
                }
            }
        ]
    })
}

fn height_provider() -> Value {
    json!({
        "oneOf": [
            reference("vertical_anchor"),
            {
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {
                        "enum": [
                            "minecraft:constant",
                            "minecraft:uniform",
                            "minecraft:biased_to_bottom",
                            "minecraft:very_biased_to_bottom",
                            "minecraft:trapezoid",
                            "minecraft:weighted_list"
                        ]
                    },
                    "value": reference("vertical_anchor"),
                    "min_inclusive": reference("vertical_anchor"),
                    "max_inclusive": reference("vertical_anchor"),
                    "inner": { "type": "integer", "minimum": 1 },
                    "plateau": { "type": "integer" },
                    "distribution": { "type": "array" }
                }
            }
        ]
    })
}

fn dimension() -> Value {
    json!({
        "type": "object",
        "required": ["type", "generator"],
        "properties": {
            "type": id_or_inline(json!({ "type": "object" })),
            "generator": {
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {
                        "enum": ["minecraft:noise", "minecraft:flat", "minecraft:debug"]
                    },
                    "settings": id_or_inline(json!({ "type": "object" })),
                    "biome_source": {
                        "type": "object",
                        "required": ["type"],
                        "properties": {
                            "type": reference("resource_location"),
                            "biome": reference("resource_location"),
                            "preset": reference("resource_location"),
                            "biomes": { "type": "array" }
                        }
                    }
                }
            }
        }
    })
}
