use serde_json::json;

use super::builder::ArchiveBuilder;
use super::plains;
use crate::{defaults, DocumentType, Error, Project};

const BIOME: DocumentType = DocumentType::Biome;

#[test]
fn export_and_reimport_through_projects() {
    let mut project = Project::new("custom");
    let index = project.add_entry(BIOME).unwrap();
    project.set_id(BIOME, index, "plains".to_owned()).unwrap();
    project.set_data(BIOME, index, plains()).unwrap();

    let outcome = project.export_archive().unwrap();
    assert_eq!(outcome.status(), "Downloaded");

    let mut other = Project::new("minecraft");
    let summary = other.import_archive(&outcome.bytes).unwrap();
    assert_eq!(summary.status(), "Imported 1 files");
    assert_eq!(summary.namespace, "custom");
    assert_eq!(other.namespace(), "custom");
    assert_eq!(other.entries(BIOME)[0].id, "custom:plains");
    assert_eq!(other.entries(BIOME)[0].data, plains());
    assert_eq!(other.selection(BIOME), Some(0));
    assert_eq!(other.pack_meta(), Some(&defaults::pack_meta()));
}

#[test]
fn failed_import_leaves_project_untouched() {
    let mut project = Project::new("custom");
    project.add_entry(BIOME).unwrap();
    project.add_entry(DocumentType::Tag).unwrap();
    let before = project.clone();

    assert!(matches!(
        project.import_archive(b"PK not really"),
        Err(Error::Archive(_))
    ));
    assert_eq!(project, before);
}

#[test]
fn import_replaces_every_type() {
    let mut project = Project::new("custom");
    project.add_entry(DocumentType::Noise).unwrap();
    project.add_entry(BIOME).unwrap();

    let bytes = ArchiveBuilder::new()
        .json("data/ns/worldgen/biome/good.json", &plains())
        .text("data/ns/worldgen/biome/bad.json", "[")
        .text("pack.mcmeta", "nope")
        .build();
    let summary = project.import_archive(&bytes).unwrap();

    assert_eq!(summary.files, 1);
    assert_eq!(summary.errors.len(), 2);
    assert_eq!(summary.status(), "Imported 1 files with 2 errors");
    assert!(project.entries(DocumentType::Noise).is_empty());
    assert_eq!(project.selection(DocumentType::Noise), None);
    assert_eq!(project.entries(BIOME).len(), 1);
    assert_eq!(project.pack_meta(), None);
    assert_eq!(project.namespace(), "ns");
}

#[test]
fn empty_archive_keeps_namespace() {
    let mut project = Project::new("custom");
    let summary = project
        .import_archive(&ArchiveBuilder::new().build())
        .unwrap();
    assert_eq!(summary.status(), "Imported 0 files");
    assert_eq!(project.namespace(), "custom");
}

#[test]
fn ids_are_stored_without_active_namespace() {
    let mut project = Project::new("custom");
    let index = project.add_entry(BIOME).unwrap();
    assert_eq!(project.entries(BIOME)[index].id, "new_biome");
    assert_eq!(project.to_display_id("new_biome"), "custom:new_biome");

    project.set_id(BIOME, index, "minecraft:plains".to_owned()).unwrap();
    assert_eq!(project.entries(BIOME)[index].id, "minecraft:plains");

    project.set_namespace("other");
    assert_eq!(project.to_display_id("new_biome"), "other:new_biome");
    assert_eq!(project.from_display_id("desert"), "desert");
}

#[test]
fn new_entries_start_valid() {
    let mut project = Project::new("custom");
    for ty in DocumentType::LISTED {
        let index = project.add_entry(ty).unwrap();
        let result = project.validate(ty, index).unwrap();
        assert!(result.valid, "{}: {:?}", ty, result.errors);
    }
    assert!(project.validate(BIOME, 10).is_none());
    assert!(project.add_entry(DocumentType::PackMeta).is_err());
}

#[test]
fn broken_biome_reports_missing_effects() {
    let mut project = Project::new("custom");
    let index = project.add_entry(BIOME).unwrap();
    let mut data = plains();
    data.as_object_mut().unwrap().remove("effects");
    project.set_data(BIOME, index, data).unwrap();

    let result = project.validate(BIOME, index).unwrap();
    assert!(!result.valid);
    assert!(result
        .errors
        .iter()
        .any(|e| e.message == "Missing required field: effects"));

    // Invalid documents still export.
    let outcome = project.export_archive().unwrap();
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.files, 2);
}

#[test]
fn duplicate_ids_are_reported_and_skipped_on_export() {
    let mut project = Project::new("custom");
    project.add_entry(BIOME).unwrap();
    let second = project.add_entry(BIOME).unwrap();
    project
        .set_id(BIOME, second, "custom:new_biome".to_owned())
        .unwrap();

    assert_eq!(project.duplicate_ids(BIOME), ["custom:new_biome"]);
    let outcome = project.export_archive().unwrap();
    assert_eq!(
        outcome.warnings,
        ["biome: duplicate id \"custom:new_biome\""]
    );
}

#[test]
fn selection_follows_edits() {
    let mut project = Project::new("custom");
    project.add_entry(BIOME).unwrap();
    project.add_entry(BIOME).unwrap();
    assert_eq!(project.selected_entry(BIOME).unwrap().id, "new_biome_2");

    project.set_selection(BIOME, Some(0)).unwrap();
    project.remove_entry(BIOME, 0).unwrap();
    assert_eq!(project.selected_entry(BIOME).unwrap().id, "new_biome_2");
    project.set_pack_meta(Some(json!({ "pack": {} })));
    assert_eq!(project.pack_meta(), Some(&json!({ "pack": {} })));
}
