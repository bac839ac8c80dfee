//! Starting documents for freshly added entries. Each one passes its type's
//! schema so a new entry starts out valid.
use serde_json::{json, Value};

use crate::DocumentType;

pub const PACK_FORMAT: u32 = 48;

/// Written as `pack.mcmeta` when the collection carries no pack metadata.
pub fn pack_meta() -> Value {
    json!({
        "pack": {
            "pack_format": PACK_FORMAT,
            "description": "Custom worldgen datapack"
        }
    })
}

pub fn default_data(ty: DocumentType) -> Value {
    use DocumentType::*;
    match ty {
        Biome => json!({
            "temperature": 0.8,
            "downfall": 0.4,
            "has_precipitation": true,
            "effects": {
                "fog_color": 12638463,
                "water_color": 4159204,
                "water_fog_color": 329011,
                "sky_color": 7907327
            },
            "spawners": {},
            "spawn_costs": {},
            "carvers": [],
            "features": [[], [], [], [], [], [], [], [], [], [], []]
        }),
        ConfiguredFeature => json!({
            "type": "minecraft:no_op",
            "config": {}
        }),
        PlacedFeature => json!({
            "feature": "minecraft:no_op",
            "placement": []
        }),
        ConfiguredCarver => json!({
            "type": "minecraft:cave",
            "config": {
                "probability": 0.15,
                "y": {
                    "type": "minecraft:uniform",
                    "min_inclusive": { "above_bottom": 8 },
                    "max_inclusive": { "absolute": 180 }
                },
                "yScale": 0.5,
                "lava_level": { "above_bottom": 8 },
                "replaceable": "#minecraft:overworld_carver_replaceables",
                "horizontal_radius_multiplier": 1.0,
                "vertical_radius_multiplier": 1.0,
                "floor_level": -0.7
            }
        }),
        Structure => json!({
            "type": "minecraft:jigsaw",
            "biomes": "#minecraft:is_overworld",
            "step": "surface_structures",
            "spawn_overrides": {},
            "terrain_adaptation": "beard_thin",
            "start_pool": "minecraft:empty",
            "size": 1,
            "start_height": { "absolute": 0 },
            "project_start_to_heightmap": "WORLD_SURFACE_WG",
            "max_distance_from_center": 80,
            "use_expansion_hack": false
        }),
        StructureSet => json!({
            "structures": [
                { "structure": "minecraft:village_plains", "weight": 1 }
            ],
            "placement": {
                "type": "minecraft:random_spread",
                "salt": 0,
                "spacing": 32,
                "separation": 8
            }
        }),
        TemplatePool => json!({
            "fallback": "minecraft:empty",
            "elements": []
        }),
        ProcessorList => json!({
            "processors": []
        }),
        NoiseSettings => noise_settings(),
        DensityFunction => json!({
            "type": "minecraft:constant",
            "argument": 0.0
        }),
        Noise => json!({
            "firstOctave": -7,
            "amplitudes": [1.0, 1.0]
        }),
        Dimension => json!({
            "type": "minecraft:overworld",
            "generator": {
                "type": "minecraft:noise",
                "settings": "minecraft:overworld",
                "biome_source": {
                    "type": "minecraft:fixed",
                    "biome": "minecraft:plains"
                }
            }
        }),
        WorldPreset => json!({
            "dimensions": {
                "minecraft:overworld": {
                    "type": "minecraft:overworld",
                    "generator": {
                        "type": "minecraft:noise",
                        "settings": "minecraft:overworld",
                        "biome_source": {
                            "type": "minecraft:multi_noise",
                            "preset": "minecraft:overworld"
                        }
                    }
                }
            }
        }),
        FlatLevelGeneratorPreset => json!({
            "display": "minecraft:grass_block",
            "settings": {
                "layers": [
                    { "block": "minecraft:bedrock", "height": 1 },
                    { "block": "minecraft:dirt", "height": 2 },
                    { "block": "minecraft:grass_block", "height": 1 }
                ],
                "biome": "minecraft:plains",
                "lakes": false,
                "features": false
            }
        }),
        Tag => json!({
            "replace": false,
            "values": []
        }),
        PackMeta => pack_meta(),
    }
}

fn noise_settings() -> Value {
    let router = [
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
    ]
    .iter()
    .map(|&field| (field.to_owned(), json!(0.0)))
    .collect::<serde_json::Map<_, _>>();

    json!({
        "sea_level": 63,
        "disable_mob_generation": false,
        "aquifers_enabled": true,
        "ore_veins_enabled": true,
        "legacy_random_source": false,
        "default_block": { "Name": "minecraft:stone" },
        "default_fluid": {
            "Name": "minecraft:water",
            "Properties": { "level": "0" }
        },
        "noise": {
            "min_y": -64,
            "height": 384,
            "size_horizontal": 1,
            "size_vertical": 2
        },
        "noise_router": router,
        "spawn_target": [],
        "surface_rule": {
            "type": "minecraft:sequence",
            "sequence": []
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_document;

    #[test]
    fn defaults_pass_their_schema() {
        for ty in DocumentType::LISTED {
            let result = validate_document(ty, &default_data(ty));
            assert!(result.valid, "{} default invalid: {:?}", ty, result.errors);
        }
    }
}
