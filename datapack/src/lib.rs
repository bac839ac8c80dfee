//! datapack handles the declarative side of *Minecraft: Java Edition*
//! worldgen datapacks: biomes, features, carvers, structures, noise settings,
//! density functions, dimensions, presets and tags.
//!
//! It does not generate any world content. It keeps a collection of JSON
//! documents keyed by resource identifier, checks them against a JSON Schema
//! per document type, and moves the whole collection in and out of the zip
//! layout the game loads:
//!
//! ```text
//! pack.mcmeta
//! data/<namespace>/worldgen/<type>/<path>.json
//! data/<namespace>/tags/<path>.json
//! ```
//!
//! * For the identifier codec (`namespace:path`, `#` tags) see [`id`].
//! * For the per-type schemas see [`schema`].
//! * For whole-document and single-field validation see [`validate`].
//! * For the editable collection see [`Store`] and [`Project`].
//! * For zip import and export see [`archive`].
//!
//! # Quick example
//!
//! Exporting a single biome and reading it back:
//!
//! ```no_run
//! use datapack::{DocumentType, Project};
//!
//! fn main() -> datapack::Result<()> {
//!     let mut project = Project::new("custom");
//!     let index = project.add_entry(DocumentType::Biome)?;
//!     project.set_id(DocumentType::Biome, index, "plains".to_owned())?;
//!
//!     let outcome = project.export_archive()?;
//!     println!("{}", outcome.status());
//!
//!     let mut other = Project::new("minecraft");
//!     let summary = other.import_archive(&outcome.bytes)?;
//!     println!("{}", summary.status());
//!     assert_eq!(other.entries(DocumentType::Biome)[0].id, "custom:plains");
//!     Ok(())
//! }
//! ```

use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod archive;
pub mod defaults;
pub mod error;
pub mod id;
pub mod schema;
pub mod types;
pub mod validate;

mod project;
mod store;

pub use error::{Error, Result};
pub use project::*;
pub use store::*;
pub use validate::{validate, validate_document, ValidationError, ValidationResult};

#[cfg(test)]
mod test;

/// The kind of a document in a datapack. Each kind has exactly one schema,
/// except [`DocumentType::PackMeta`] which is never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Biome,
    ConfiguredFeature,
    PlacedFeature,
    ConfiguredCarver,
    Structure,
    StructureSet,
    TemplatePool,
    ProcessorList,
    NoiseSettings,
    DensityFunction,
    Noise,
    Dimension,
    WorldPreset,
    FlatLevelGeneratorPreset,
    /// A list of identifiers stored under `data/<ns>/tags/`.
    Tag,
    /// The `pack.mcmeta` singleton.
    PackMeta,
}

impl DocumentType {
    /// Every type stored under `data/<ns>/worldgen/<type>/`, in export order.
    pub const WORLDGEN: [DocumentType; 14] = [
        DocumentType::Biome,
        DocumentType::ConfiguredFeature,
        DocumentType::PlacedFeature,
        DocumentType::ConfiguredCarver,
        DocumentType::Structure,
        DocumentType::StructureSet,
        DocumentType::TemplatePool,
        DocumentType::ProcessorList,
        DocumentType::NoiseSettings,
        DocumentType::DensityFunction,
        DocumentType::Noise,
        DocumentType::Dimension,
        DocumentType::WorldPreset,
        DocumentType::FlatLevelGeneratorPreset,
    ];

    /// Every type that is kept as a list of entries in a [`Store`].
    pub const LISTED: [DocumentType; 15] = [
        DocumentType::Biome,
        DocumentType::ConfiguredFeature,
        DocumentType::PlacedFeature,
        DocumentType::ConfiguredCarver,
        DocumentType::Structure,
        DocumentType::StructureSet,
        DocumentType::TemplatePool,
        DocumentType::ProcessorList,
        DocumentType::NoiseSettings,
        DocumentType::DensityFunction,
        DocumentType::Noise,
        DocumentType::Dimension,
        DocumentType::WorldPreset,
        DocumentType::FlatLevelGeneratorPreset,
        DocumentType::Tag,
    ];

    pub fn as_str(self) -> &'static str {
        use DocumentType::*;
        match self {
            Biome => "biome",
            ConfiguredFeature => "configured_feature",
            PlacedFeature => "placed_feature",
            ConfiguredCarver => "configured_carver",
            Structure => "structure",
            StructureSet => "structure_set",
            TemplatePool => "template_pool",
            ProcessorList => "processor_list",
            NoiseSettings => "noise_settings",
            DensityFunction => "density_function",
            Noise => "noise",
            Dimension => "dimension",
            WorldPreset => "world_preset",
            FlatLevelGeneratorPreset => "flat_level_generator_preset",
            Tag => "tag",
            PackMeta => "pack_meta",
        }
    }

    pub fn is_worldgen(self) -> bool {
        !matches!(self, DocumentType::Tag | DocumentType::PackMeta)
    }

    /// The directory holding documents of this type inside a namespace, eg
    /// `worldgen/biome`. Pack metadata has no directory.
    pub fn folder(self) -> Option<String> {
        match self {
            DocumentType::Tag => Some("tags".to_owned()),
            DocumentType::PackMeta => None,
            ty => Some(format!("worldgen/{}", ty.as_str())),
        }
    }

    /// Id template handed to [`Store::add`] for a fresh entry.
    pub fn default_id(self) -> String {
        format!("new_{}", self.as_str())
    }

    /// A minimal document of this type that passes its schema.
    pub fn default_data(self) -> serde_json::Value {
        defaults::default_data(self)
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`DocumentType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl Display for UnknownType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown document type: {}", self.0)
    }
}

impl std::error::Error for UnknownType {}

impl TryFrom<&str> for DocumentType {
    type Error = UnknownType;

    fn try_from(value: &str) -> std::result::Result<Self, UnknownType> {
        use DocumentType::*;
        Ok(match value {
            "biome" => Biome,
            "configured_feature" => ConfiguredFeature,
            "placed_feature" => PlacedFeature,
            "configured_carver" => ConfiguredCarver,
            "structure" => Structure,
            "structure_set" => StructureSet,
            "template_pool" => TemplatePool,
            "processor_list" => ProcessorList,
            "noise_settings" => NoiseSettings,
            "density_function" => DensityFunction,
            "noise" => Noise,
            "dimension" => Dimension,
            "world_preset" => WorldPreset,
            "flat_level_generator_preset" => FlatLevelGeneratorPreset,
            "tag" => Tag,
            "pack_meta" => PackMeta,
            other => return Err(UnknownType(other.to_owned())),
        })
    }
}

impl FromStr for DocumentType {
    type Err = UnknownType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DocumentType::try_from(s)
    }
}
