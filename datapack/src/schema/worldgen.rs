//! Biomes and what decorates them: features and carvers.
use serde_json::{json, Value};

use super::shared::{array_of, id_or_inline, reference, DECORATION_STEPS, HEIGHTMAPS, SPAWN_CATEGORIES};

pub fn biome() -> Value {
    let mut spawners = serde_json::Map::new();
    for category in SPAWN_CATEGORIES {
        spawners.insert(category.to_owned(), array_of(reference("spawner")));
    }

    json!({
        "title": "Biome",
        "type": "object",
        "required": [
            "temperature",
            "downfall",
            "has_precipitation",
            "effects",
            "spawners",
            "spawn_costs",
            "carvers",
            "features"
        ],
        "properties": {
            "temperature": { "type": "number" },
            "downfall": { "type": "number" },
            "has_precipitation": { "type": "boolean" },
            "temperature_modifier": { "enum": ["none", "frozen"] },
            "creature_spawn_probability": { "type": "number", "minimum": 0, "maximum": 0.9999999 },
            "effects": {
                "type": "object",
                "required": ["fog_color", "water_color", "water_fog_color", "sky_color"],
                "properties": {
                    "fog_color": reference("color"),
                    "water_color": reference("color"),
                    "water_fog_color": reference("color"),
                    "sky_color": reference("color"),
                    "foliage_color": reference("color"),
                    "grass_color": reference("color"),
                    "grass_color_modifier": { "enum": ["none", "dark_forest", "swamp"] },
                    "particle": {
                        "type": "object",
                        "required": ["options", "probability"],
                        "properties": {
                            "options": {
                                "type": "object",
                                "required": ["type"],
                                "properties": { "type": reference("resource_location") }
                            },
                            "probability": { "type": "number", "minimum": 0, "maximum": 1 }
                        }
                    },
                    "ambient_sound": id_or_inline(json!({ "type": "object" })),
                    "mood_sound": {
                        "type": "object",
                        "required": ["sound", "tick_delay", "block_search_extent", "offset"],
                        "properties": {
                            "sound": id_or_inline(json!({ "type": "object" })),
                            "tick_delay": { "type": "integer", "minimum": 0 },
                            "block_search_extent": { "type": "integer", "minimum": 0 },
                            "offset": { "type": "number" }
                        }
                    },
                    "additions_sound": {
                        "type": "object",
                        "required": ["sound", "tick_chance"],
                        "properties": {
                            "sound": id_or_inline(json!({ "type": "object" })),
                            "tick_chance": { "type": "number", "minimum": 0, "maximum": 1 }
                        }
                    },
                    "music": { "type": ["object", "array"] },
                    "music_volume": { "type": "number", "minimum": 0, "maximum": 1 }
                }
            },
            "spawners": {
                "type": "object",
                "properties": spawners,
                "additionalProperties": false
            },
            "spawn_costs": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "required": ["energy_budget", "charge"],
                    "properties": {
                        "energy_budget": { "type": "number" },
                        "charge": { "type": "number" }
                    }
                }
            },
            "carvers": {
                "anyOf": [
                    reference("holder_set"),
                    {
                        "type": "object",
                        "properties": {
                            "air": reference("holder_set"),
                            "liquid": reference("holder_set")
                        },
                        "additionalProperties": false
                    }
                ]
            },
            "features": {
                "type": "array",
                "maxItems": DECORATION_STEPS.len(),
                "items": reference("holder_set")
            }
        },
        "additionalProperties": false
    })
}

pub fn configured_feature() -> Value {
    json!({
        "title": "Configured feature",
        "type": "object",
        "required": ["type", "config"],
        "properties": {
            "type": reference("resource_location"),
            "config": { "type": "object" }
        },
        "additionalProperties": false
    })
}

fn placement_modifier() -> Value {
    json!({
        "type": "object",
        "required": ["type"],
        "properties": {
            "type": reference("resource_location"),
            "count": reference("int_provider"),
            "height": reference("height_provider"),
            "heightmap": { "enum": HEIGHTMAPS },
            "chance": { "type": "integer", "minimum": 1 },
            "step": { "enum": ["air", "liquid"] },
            "noise_level": { "type": "number" },
            "below_noise": { "type": "integer" },
            "above_noise": { "type": "integer" },
            "noise_to_count_ratio": { "type": "integer" },
            "noise_factor": { "type": "number" },
            "noise_offset": { "type": "number" },
            "xz_spread": reference("int_provider"),
            "y_spread": reference("int_provider"),
            "predicate": { "type": "object" },
            "direction_of_search": { "enum": ["up", "down"] },
            "max_steps": { "type": "integer", "minimum": 1, "maximum": 32 },
            "target_condition": { "type": "object" },
            "allowed_search_condition": { "type": "object" }
        }
    })
}

pub fn placed_feature() -> Value {
    json!({
        "title": "Placed feature",
        "type": "object",
        "required": ["feature", "placement"],
        "properties": {
            "feature": id_or_inline(configured_feature()),
            "placement": array_of(placement_modifier())
        },
        "additionalProperties": false
    })
}

pub fn configured_carver() -> Value {
    json!({
        "title": "Configured carver",
        "type": "object",
        "required": ["type", "config"],
        "properties": {
            "type": {
                "enum": ["minecraft:cave", "minecraft:nether_cave", "minecraft:canyon"]
            },
            "config": {
                "type": "object",
                "required": ["probability", "y", "yScale", "lava_level", "replaceable"],
                "properties": {
                    "probability": { "type": "number", "minimum": 0, "maximum": 1 },
                    "y": reference("height_provider"),
                    "yScale": reference("float_provider"),
                    "lava_level": reference("vertical_anchor"),
                    "replaceable": reference("holder_set"),
                    "debug_settings": {
                        "type": "object",
                        "properties": {
                            "debug_mode": { "type": "boolean" },
                            "air_state": reference("block_state"),
                            "water_state": reference("block_state"),
                            "lava_state": reference("block_state"),
                            "barrier_state": reference("block_state")
                        }
                    },
                    "horizontal_radius_multiplier": reference("float_provider"),
                    "vertical_radius_multiplier": reference("float_provider"),
                    "floor_level": reference("float_provider"),
                    "vertical_rotation": reference("float_provider"),
                    "shape": {
                        "type": "object",
                        "required": [
                            "distance_factor",
                            "thickness",
                            "width_smoothness",
                            "horizontal_radius_factor",
                            "vertical_radius_default_factor",
                            "vertical_radius_center_factor"
                        ],
                        "properties": {
                            "distance_factor": reference("float_provider"),
                            "thickness": reference("float_provider"),
                            "width_smoothness": { "type": "integer", "minimum": 0 },
                            "horizontal_radius_factor": reference("float_provider"),
                            "vertical_radius_default_factor": { "type": "number" },
                            "vertical_radius_center_factor": { "type": "number" }
                        }
                    }
                }
            }
        },
        "additionalProperties": false
    })
}
