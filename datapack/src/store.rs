use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{id, DocumentType, Error, Result};

/// A single document in the collection. `id` is in storage form: the
/// namespace may be left out and then means the active namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub data: Value,
}

impl Entry {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// The entries of one document type, and which of them is selected.
///
/// The selection is `None` exactly when there are no entries, unless it was
/// explicitly cleared; when it is `Some` it is always a valid index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    entries: Vec<Entry>,
    selected: Option<usize>,
}

impl Collection {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_index(&self, ty: DocumentType, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                ty,
                index,
                len: self.entries.len(),
            })
        }
    }
}

/// Every listed document type mapped to its [`Collection`]. All mutation goes
/// through the methods here so the selection can never point past the end of
/// a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    collections: BTreeMap<DocumentType, Collection>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            collections: DocumentType::LISTED
                .iter()
                .map(|&ty| (ty, Collection::default()))
                .collect(),
        }
    }

    pub fn collection(&self, ty: DocumentType) -> Option<&Collection> {
        self.collections.get(&ty)
    }

    fn collection_mut(&mut self, ty: DocumentType) -> Result<&mut Collection> {
        self.collections.get_mut(&ty).ok_or(Error::NotListed(ty))
    }

    /// Entries of a type in order. Empty for pack metadata.
    pub fn entries(&self, ty: DocumentType) -> &[Entry] {
        self.collection(ty).map(Collection::entries).unwrap_or(&[])
    }

    pub fn selection(&self, ty: DocumentType) -> Option<usize> {
        self.collection(ty).and_then(Collection::selected)
    }

    pub fn len(&self, ty: DocumentType) -> usize {
        self.entries(ty).len()
    }

    pub fn total_entries(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    /// Collections in export order: worldgen types first, then tags.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentType, &Collection)> {
        DocumentType::LISTED
            .iter()
            .filter_map(move |&ty| self.collections.get(&ty).map(|c| (ty, c)))
    }

    /// Append a new entry with an id derived from `default_id` that no other
    /// entry of the type shares, and select it. Returns the new index.
    pub fn add<F>(
        &mut self,
        ty: DocumentType,
        default_id: &str,
        default_data: F,
        default_namespace: &str,
    ) -> Result<usize>
    where
        F: FnOnce() -> Value,
    {
        let collection = self.collection_mut(ty)?;
        let existing: Vec<&str> = collection.entries.iter().map(|e| e.id.as_str()).collect();
        let id = id::make_unique(default_id, &existing, default_namespace);

        collection.entries.push(Entry::new(id, default_data()));
        let index = collection.entries.len() - 1;
        collection.selected = Some(index);
        Ok(index)
    }

    /// Remove the entry at `index`. The selection moves to the entry that took
    /// its place, or to the new last entry.
    pub fn remove(&mut self, ty: DocumentType, index: usize) -> Result<Entry> {
        let collection = self.collection_mut(ty)?;
        collection.check_index(ty, index)?;

        let removed = collection.entries.remove(index);
        collection.selected = match collection.entries.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        Ok(removed)
    }

    pub fn update_data(&mut self, ty: DocumentType, index: usize, data: Value) -> Result<()> {
        let collection = self.collection_mut(ty)?;
        collection.check_index(ty, index)?;
        collection.entries[index].data = data;
        Ok(())
    }

    /// Replace the id of one entry. Duplicates are allowed here; see
    /// [`Store::duplicate_ids`].
    pub fn update_id(&mut self, ty: DocumentType, index: usize, id: String) -> Result<()> {
        let collection = self.collection_mut(ty)?;
        collection.check_index(ty, index)?;
        collection.entries[index].id = id;
        Ok(())
    }

    pub fn set_selection(&mut self, ty: DocumentType, index: Option<usize>) -> Result<()> {
        let collection = self.collection_mut(ty)?;
        if let Some(index) = index {
            collection.check_index(ty, index)?;
        }
        collection.selected = index;
        Ok(())
    }

    /// Swap in a whole new list, selecting the first entry if there is one.
    pub fn replace_all(&mut self, ty: DocumentType, entries: Vec<Entry>) -> Result<()> {
        let collection = self.collection_mut(ty)?;
        collection.selected = if entries.is_empty() { None } else { Some(0) };
        collection.entries = entries;
        Ok(())
    }

    /// Storage keys shared by more than one entry of a type, with the indices
    /// of the entries sharing each.
    pub fn duplicate_ids(&self, ty: DocumentType, default_namespace: &str) -> Vec<(String, Vec<usize>)> {
        let mut seen: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in self.entries(ty).iter().enumerate() {
            seen.entry(id::storage_key(&entry.id, default_namespace))
                .or_default()
                .push(i);
        }

        let mut dupes: Vec<_> = seen.into_iter().filter(|(_, at)| at.len() > 1).collect();
        dupes.sort();
        dupes
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const BIOME: DocumentType = DocumentType::Biome;

    fn store_with(n: usize) -> Store {
        let mut store = Store::new();
        for _ in 0..n {
            store.add(BIOME, "new_biome", || json!({}), "custom").unwrap();
        }
        store
    }

    fn assert_selection_valid(store: &Store) {
        match store.selection(BIOME) {
            None => assert!(store.entries(BIOME).is_empty()),
            Some(i) => assert!(i < store.len(BIOME)),
        }
    }

    #[test]
    fn add_uniquifies_and_selects() {
        let store = store_with(3);
        let ids: Vec<_> = store.entries(BIOME).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["new_biome", "new_biome_2", "new_biome_3"]);
        assert_eq!(store.selection(BIOME), Some(2));
    }

    #[test]
    fn remove_selects_successor() {
        let mut store = store_with(3);
        let removed = store.remove(BIOME, 1).unwrap();
        assert_eq!(removed.id, "new_biome_2");
        assert_eq!(store.selection(BIOME), Some(1));
        assert_eq!(store.entries(BIOME)[1].id, "new_biome_3");
    }

    #[test]
    fn remove_last_selects_new_last() {
        let mut store = store_with(3);
        store.remove(BIOME, 2).unwrap();
        assert_eq!(store.selection(BIOME), Some(1));
    }

    #[test]
    fn remove_only_clears_selection() {
        let mut store = store_with(1);
        store.remove(BIOME, 0).unwrap();
        assert_eq!(store.selection(BIOME), None);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut store = store_with(1);
        assert!(matches!(
            store.remove(BIOME, 1),
            Err(Error::IndexOutOfRange { index: 1, len: 1, .. })
        ));
        assert!(store.update_data(BIOME, 5, json!(null)).is_err());
        assert!(store.update_id(BIOME, 5, "x".into()).is_err());
        assert!(store.set_selection(BIOME, Some(1)).is_err());
        assert_eq!(store.len(BIOME), 1);
    }

    #[test]
    fn pack_meta_is_not_listed() {
        let mut store = Store::new();
        assert!(matches!(
            store.add(DocumentType::PackMeta, "x", || json!({}), "ns"),
            Err(Error::NotListed(DocumentType::PackMeta))
        ));
        assert!(store.entries(DocumentType::PackMeta).is_empty());
    }

    #[test]
    fn updates_touch_one_field() {
        let mut store = store_with(2);
        store.update_data(BIOME, 0, json!({ "temperature": 2.0 })).unwrap();
        store.update_id(BIOME, 1, "desert".into()).unwrap();

        assert_eq!(store.entries(BIOME)[0].id, "new_biome");
        assert_eq!(store.entries(BIOME)[0].data, json!({ "temperature": 2.0 }));
        assert_eq!(store.entries(BIOME)[1].id, "desert");
        assert_eq!(store.entries(BIOME)[1].data, json!({}));
    }

    #[test]
    fn replace_all_resets_selection() {
        let mut store = store_with(3);
        store.replace_all(BIOME, vec![Entry::new("a", json!({}))]).unwrap();
        assert_eq!(store.selection(BIOME), Some(0));
        store.replace_all(BIOME, vec![]).unwrap();
        assert_eq!(store.selection(BIOME), None);
    }

    #[test]
    fn selection_holds_over_mixed_operations() {
        let mut store = Store::new();
        // A fixed pseudo-random walk of adds and removes.
        let mut seed = 7u32;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let len = store.len(BIOME);
            if len == 0 || seed % 3 != 0 {
                store.add(BIOME, "b", || json!({}), "ns").unwrap();
            } else {
                store.remove(BIOME, (seed as usize / 3) % len).unwrap();
            }
            assert_selection_valid(&store);
        }
    }

    #[test]
    fn duplicates_after_manual_edit() {
        let mut store = store_with(2);
        store.update_id(BIOME, 1, "custom:new_biome".into()).unwrap();
        assert_eq!(
            store.duplicate_ids(BIOME, "custom"),
            vec![("custom:new_biome".to_owned(), vec![0, 1])]
        );
    }
}
