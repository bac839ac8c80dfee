use log::info;
use serde_json::Value;

use crate::archive::{self, ExportOutcome};
use crate::{id, validate_document, DocumentType, Entry, Result, Store, ValidationResult};

/// Everything an editor holds: the entries of every type, the pack metadata
/// and the active namespace that ids without a namespace fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    store: Store,
    pack_meta: Option<Value>,
    namespace: String,
}

/// What an import brought in, for reporting back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: usize,
    pub errors: Vec<String>,
    /// The active namespace after the import.
    pub namespace: String,
}

impl ImportSummary {
    pub fn status(&self) -> String {
        match self.errors.len() {
            0 => format!("Imported {} files", self.files),
            n => format!("Imported {} files with {} errors", self.files, n),
        }
    }
}

impl Project {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            store: Store::new(),
            pack_meta: None,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Change the active namespace. Stored ids are left as they are, so ids
    /// without a namespace move along with it.
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn entries(&self, ty: DocumentType) -> &[Entry] {
        self.store.entries(ty)
    }

    pub fn selection(&self, ty: DocumentType) -> Option<usize> {
        self.store.selection(ty)
    }

    pub fn selected_entry(&self, ty: DocumentType) -> Option<&Entry> {
        self.selection(ty).and_then(|i| self.entries(ty).get(i))
    }

    /// Add a fresh entry with the type's default id and data, and select it.
    pub fn add_entry(&mut self, ty: DocumentType) -> Result<usize> {
        self.store
            .add(ty, &ty.default_id(), || ty.default_data(), &self.namespace)
    }

    pub fn remove_entry(&mut self, ty: DocumentType, index: usize) -> Result<Entry> {
        self.store.remove(ty, index)
    }

    pub fn set_data(&mut self, ty: DocumentType, index: usize, data: Value) -> Result<()> {
        self.store.update_data(ty, index, data)
    }

    /// Set an id as typed into an editor. It is stored in storage form.
    pub fn set_id(&mut self, ty: DocumentType, index: usize, display_id: String) -> Result<()> {
        let id = id::to_storage(&display_id, &self.namespace);
        self.store.update_id(ty, index, id)
    }

    pub fn set_selection(&mut self, ty: DocumentType, index: Option<usize>) -> Result<()> {
        self.store.set_selection(ty, index)
    }

    /// Validate one entry against its schema. `None` if there is no entry at
    /// `index`.
    pub fn validate(&self, ty: DocumentType, index: usize) -> Option<ValidationResult> {
        self.entries(ty)
            .get(index)
            .map(|entry| validate_document(ty, &entry.data))
    }

    /// Ids shared by more than one entry of a type, in display form.
    pub fn duplicate_ids(&self, ty: DocumentType) -> Vec<String> {
        self.store
            .duplicate_ids(ty, &self.namespace)
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    pub fn to_display_id(&self, value: &str) -> String {
        id::to_display(value, &self.namespace)
    }

    pub fn from_display_id(&self, value: &str) -> String {
        id::to_storage(value, &self.namespace)
    }

    pub fn pack_meta(&self) -> Option<&Value> {
        self.pack_meta.as_ref()
    }

    pub fn set_pack_meta(&mut self, pack_meta: Option<Value>) {
        self.pack_meta = pack_meta;
    }

    /// Replace the whole project with the contents of a datapack zip. On
    /// `Err` nothing has changed. The active namespace becomes the one most
    /// documents in the archive use.
    pub fn import_archive(&mut self, bytes: &[u8]) -> Result<ImportSummary> {
        let imported = archive::import_archive(bytes)?;

        let namespace = imported
            .main_namespace()
            .unwrap_or(&self.namespace)
            .to_owned();
        let mut errors = imported.errors;

        let mut store = Store::new();
        for (ty, entries) in imported.entries_by_type {
            store.replace_all(ty, entries)?;
        }
        store.replace_all(DocumentType::Tag, imported.tag_entries)?;

        let pack_meta = match imported.pack_meta {
            Some(meta) => {
                if let Some(error) = meta.error {
                    errors.push(error);
                }
                meta.data
            }
            None => None,
        };

        self.store = store;
        self.pack_meta = pack_meta;
        self.namespace = namespace;

        info!("active namespace is now {}", self.namespace);
        Ok(ImportSummary {
            files: imported.files,
            errors,
            namespace: self.namespace.clone(),
        })
    }

    pub fn export_archive(&self) -> Result<ExportOutcome> {
        archive::export_archive(&self.store, self.pack_meta.as_ref(), &self.namespace)
    }
}
