use serde_json::{json, Value};

mod project;

/// The biome used throughout the archive tests.
fn plains() -> Value {
    json!({
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
    })
}

#[test]
fn exhaustive_type_check() {
    use crate::DocumentType;

    for ty in DocumentType::LISTED.iter().chain(&[DocumentType::PackMeta]) {
        assert_eq!(ty.as_str().parse::<DocumentType>(), Ok(*ty));
        assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.as_str()));
    }

    assert_eq!(
        DocumentType::ConfiguredCarver.folder().as_deref(),
        Some("worldgen/configured_carver")
    );
    assert_eq!(DocumentType::Tag.folder().as_deref(), Some("tags"));
    assert_eq!(DocumentType::PackMeta.folder(), None);
    assert_eq!(DocumentType::Noise.default_id(), "new_noise");
    assert!(DocumentType::WORLDGEN.iter().all(|ty| ty.is_worldgen()));

    let err = "Biome".parse::<DocumentType>().unwrap_err();
    assert_eq!(err.to_string(), "Unknown document type: Biome");
}
