//! Terrain shaping: noise settings, density functions, noise parameters, and
//! the dimension and preset documents that tie them together. Tags live here
//! too since they are the last flat list type.
use serde_json::{json, Value};

use super::shared::{array_of, reference};

const NOISE_ROUTER_FIELDS: [&str; 15] = [
    "barrier",
    "fluid_level_floodedness",
    "fluid_level_spread",
    "lava",
    "temperature",
    "vegetation",
    "continents",
    "erosion",
    "depth",
    "ridges",
    "initial_density_without_jaggedness",
    "final_density",
    "vein_toggle",
    "vein_ridged",
    "vein_gap",
];

pub fn noise_settings() -> Value {
    let mut router = serde_json::Map::new();
    for field in NOISE_ROUTER_FIELDS {
        router.insert(field.to_owned(), reference("density_function"));
    }

    json!({
        "title": "Noise settings",
        "type": "object",
        "required": [
            "sea_level",
            "disable_mob_generation",
            "aquifers_enabled",
            "ore_veins_enabled",
            "legacy_random_source",
            "default_block",
            "default_fluid",
            "noise",
            "noise_router",
            "spawn_target",
            "surface_rule"
        ],
        "properties": {
            "sea_level": { "type": "integer" },
            "disable_mob_generation": { "type": "boolean" },
            "aquifers_enabled": { "type": "boolean" },
            "ore_veins_enabled": { "type": "boolean" },
            "legacy_random_source": { "type": "boolean" },
            "default_block": reference("block_state"),
            "default_fluid": reference("block_state"),
            "noise": {
                "type": "object",
                "required": ["min_y", "height", "size_horizontal", "size_vertical"],
                "properties": {
                    "min_y": { "type": "integer", "minimum": -2032, "maximum": 2031 },
                    "height": { "type": "integer", "minimum": 0, "maximum": 4064 },
                    "size_horizontal": { "type": "integer", "minimum": 1, "maximum": 4 },
                    "size_vertical": { "type": "integer", "minimum": 1, "maximum": 4 }
                },
                "additionalProperties": false
            },
            "noise_router": {
                "type": "object",
                "required": NOISE_ROUTER_FIELDS,
                "properties": router,
                "additionalProperties": false
            },
            "spawn_target": array_of(json!({ "type": "object" })),
            "surface_rule": {
                "type": "object",
                "required": ["type"],
                "properties": { "type": reference("resource_location") }
            }
        },
        "additionalProperties": false
    })
}

pub fn density_function() -> Value {
    json!({
        "title": "Density function",
        "allOf": [reference("density_function")]
    })
}

pub fn noise() -> Value {
    json!({
        "title": "Noise",
        "allOf": [reference("noise_parameters")]
    })
}

pub fn dimension() -> Value {
    json!({
        "title": "Dimension",
        "allOf": [reference("dimension")]
    })
}

pub fn world_preset() -> Value {
    json!({
        "title": "World preset",
        "type": "object",
        "required": ["dimensions"],
        "properties": {
            "dimensions": {
                "type": "object",
                "minProperties": 1,
                "additionalProperties": reference("dimension")
            }
        },
        "additionalProperties": false
    })
}

pub fn flat_level_generator_preset() -> Value {
    json!({
        "title": "Flat level generator preset",
        "type": "object",
        "required": ["display", "settings"],
        "properties": {
            "display": reference("resource_location"),
            "settings": {
                "type": "object",
                "required": ["layers", "biome"],
                "properties": {
                    "layers": array_of(json!({
                        "type": "object",
                        "required": ["block", "height"],
                        "properties": {
                            "block": reference("resource_location"),
                            "height": { "type": "integer", "minimum": 0, "maximum": 4064 }
                        },
                        "additionalProperties": false
                    })),
                    "biome": reference("resource_location"),
                    "lakes": { "type": "boolean" },
                    "features": { "type": "boolean" },
                    "structure_overrides": reference("holder_set")
                }
            }
        },
        "additionalProperties": false
    })
}

pub fn tag() -> Value {
    json!({
        "title": "Tag",
        "type": "object",
        "required": ["values"],
        "properties": {
            "replace": { "type": "boolean" },
            "values": array_of(json!({
                "anyOf": [
                    reference("resource_or_tag"),
                    {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": reference("resource_or_tag"),
                            "required": { "type": "boolean" }
                        },
                        "additionalProperties": false
                    }
                ]
            }))
        },
        "additionalProperties": false
    })
}
