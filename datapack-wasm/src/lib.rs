//! Browser bindings for an editor front end. Documents cross the boundary as
//! JSON strings; archives as byte arrays.
use std::fmt::Display;

use datapack::{DocumentType, Project};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn document_type(name: &str) -> Result<DocumentType, JsValue> {
    name.parse().map_err(js_error)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

#[wasm_bindgen]
pub struct Editor {
    project: Project,
    last_status: String,
    last_warnings: Vec<String>,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new(namespace: &str) -> Self {
        Self {
            project: Project::new(namespace),
            last_status: String::new(),
            last_warnings: vec![],
        }
    }

    pub fn namespace(&self) -> String {
        self.project.namespace().to_owned()
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.project.set_namespace(namespace);
    }

    /// Names of every type with an entry list, in display order.
    pub fn types(&self) -> String {
        let names: Vec<&str> = DocumentType::LISTED.iter().map(|ty| ty.as_str()).collect();
        json!(names).to_string()
    }

    pub fn entries(&self, ty: &str) -> Result<String, JsValue> {
        to_json(self.project.entries(document_type(ty)?))
    }

    pub fn selection(&self, ty: &str) -> Result<Option<usize>, JsValue> {
        Ok(self.project.selection(document_type(ty)?))
    }

    pub fn set_selection(&mut self, ty: &str, index: Option<usize>) -> Result<(), JsValue> {
        self.project
            .set_selection(document_type(ty)?, index)
            .map_err(js_error)
    }

    pub fn add_entry(&mut self, ty: &str) -> Result<usize, JsValue> {
        self.project.add_entry(document_type(ty)?).map_err(js_error)
    }

    pub fn remove_entry(&mut self, ty: &str, index: usize) -> Result<(), JsValue> {
        self.project
            .remove_entry(document_type(ty)?, index)
            .map(|_| ())
            .map_err(js_error)
    }

    pub fn set_data(&mut self, ty: &str, index: usize, data: &str) -> Result<(), JsValue> {
        let data: Value = serde_json::from_str(data).map_err(js_error)?;
        self.project
            .set_data(document_type(ty)?, index, data)
            .map_err(js_error)
    }

    pub fn set_id(&mut self, ty: &str, index: usize, id: String) -> Result<(), JsValue> {
        self.project
            .set_id(document_type(ty)?, index, id)
            .map_err(js_error)
    }

    pub fn display_id(&self, id: &str) -> String {
        self.project.to_display_id(id)
    }

    pub fn duplicate_ids(&self, ty: &str) -> Result<String, JsValue> {
        to_json(&self.project.duplicate_ids(document_type(ty)?))
    }

    /// Validation result of one entry as JSON, or `null` if there is no entry
    /// at `index`.
    pub fn validate(&self, ty: &str, index: usize) -> Result<String, JsValue> {
        to_json(&self.project.validate(document_type(ty)?, index))
    }

    pub fn pack_meta(&self) -> Result<String, JsValue> {
        to_json(&self.project.pack_meta())
    }

    pub fn set_pack_meta(&mut self, pack_meta: &str) -> Result<(), JsValue> {
        let meta: Value = serde_json::from_str(pack_meta).map_err(js_error)?;
        self.project
            .set_pack_meta(if meta.is_null() { None } else { Some(meta) });
        Ok(())
    }

    /// Replace everything with the contents of a datapack zip. Returns the
    /// per-file errors as a JSON array; the summary is in `status`.
    pub fn import_archive(&mut self, bytes: &[u8]) -> Result<String, JsValue> {
        let summary = self.project.import_archive(bytes).map_err(js_error)?;
        self.last_status = summary.status();
        self.last_warnings = vec![];
        to_json(&summary.errors)
    }

    pub fn export_archive(&mut self) -> Result<Vec<u8>, JsValue> {
        let outcome = self.project.export_archive().map_err(js_error)?;
        self.last_status = outcome.status();
        self.last_warnings = outcome.warnings;
        Ok(outcome.bytes)
    }

    /// Summary line of the last import or export.
    pub fn status(&self) -> String {
        self.last_status.clone()
    }

    pub fn warnings(&self) -> String {
        json!(self.last_warnings).to_string()
    }
}

/// Validate a free-standing document, eg one pasted into a raw JSON editor.
#[wasm_bindgen]
pub fn validate(ty: &str, data: &str) -> Result<String, JsValue> {
    let data: Value = serde_json::from_str(data).map_err(js_error)?;
    to_json(&datapack::validate(ty, &data))
}

#[wasm_bindgen]
pub fn schema(ty: &str) -> Option<String> {
    datapack::schema::schema_for_name(ty).map(Value::to_string)
}

pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn force_init() {
    set_panic_hook();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_and_round_trip() {
        let mut editor = Editor::new("custom");
        let index = editor.add_entry("biome").unwrap();
        editor.set_id("biome", index, "plains".into()).unwrap();
        let result: Value = serde_json::from_str(&editor.validate("biome", index).unwrap()).unwrap();
        assert_eq!(result["valid"], true);

        let bytes = editor.export_archive().unwrap();
        assert_eq!(editor.status(), "Downloaded");

        let mut other = Editor::new("minecraft");
        assert_eq!(other.import_archive(&bytes).unwrap(), "[]");
        assert_eq!(other.status(), "Imported 1 files");
        assert_eq!(other.namespace(), "custom");
        let entries: Value = serde_json::from_str(&other.entries("biome").unwrap()).unwrap();
        assert_eq!(entries[0]["id"], "custom:plains");
    }

    #[test]
    fn free_standing_validation() {
        let result: Value =
            serde_json::from_str(&validate("noise", r#"{"firstOctave": -7}"#).unwrap()).unwrap();
        assert_eq!(result["errors"][0]["message"], "Missing required field: amplitudes");
        assert!(schema("biome").is_some());
        assert!(schema("pack_meta").is_none());
    }
}
