use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Read};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use zip::ZipArchive;

use super::path::{classify, Classified};
use crate::{DocumentType, Entry, Result};

/// `pack.mcmeta` as found in an archive. A broken file is reported here
/// rather than failing the import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackMetaResult {
    pub data: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    /// Every worldgen type, each sorted by id. Types with no files map to an
    /// empty list.
    pub entries_by_type: BTreeMap<DocumentType, Vec<Entry>>,
    pub tag_entries: Vec<Entry>,
    pub pack_meta: Option<PackMetaResult>,
    /// One line per entry that could not be read or parsed, sorted.
    pub errors: Vec<String>,
    /// Namespaces of imported documents, most used first.
    pub namespaces: Vec<String>,
    /// Number of documents imported, tags included.
    pub files: usize,
}

impl ImportResult {
    /// The namespace most documents in the archive use.
    pub fn main_namespace(&self) -> Option<&str> {
        self.namespaces.first().map(String::as_str)
    }
}

struct RawEntry {
    name: String,
    classified: Classified,
    text: String,
}

/// Read a datapack zip. Only an unreadable archive is an error; a broken
/// entry is recorded in [`ImportResult::errors`] and left out.
pub fn import_archive(bytes: &[u8]) -> Result<ImportResult> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut errors = vec![];
    let mut raw = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = match archive.by_index(i) {
            Ok(file) => file,
            Err(e) => {
                errors.push(format!("entry {}: {}", i, e));
                continue;
            }
        };

        if file.is_dir() {
            continue;
        }

        let name = file.name().to_owned();
        let classified = match classify(&name) {
            Some(Classified::UnknownWorldgen { folder }) => {
                debug!("skipping {}: unknown worldgen type {}", name, folder);
                continue;
            }
            Some(classified) => classified,
            None => {
                debug!("skipping {}", name);
                continue;
            }
        };

        let mut text = String::new();
        if let Err(e) = file.read_to_string(&mut text) {
            errors.push(format!("{}: {}", name, e));
            continue;
        }

        raw.push(RawEntry {
            name,
            classified,
            text,
        });
    }

    let parsed: Vec<_> = raw
        .into_par_iter()
        .map(|entry| {
            let json = serde_json::from_str::<Value>(entry.text.trim_start_matches('\u{feff}'));
            (entry.name, entry.classified, json)
        })
        .collect();

    let mut entries_by_type: BTreeMap<DocumentType, Vec<Entry>> = DocumentType::WORLDGEN
        .iter()
        .map(|&ty| (ty, vec![]))
        .collect();
    let mut tag_entries = vec![];
    let mut pack_meta = None;
    let mut namespace_counts: HashMap<String, usize> = HashMap::new();

    for (name, classified, json) in parsed {
        if classified == Classified::PackMeta {
            pack_meta = Some(match json {
                Ok(data) => PackMetaResult {
                    data: Some(data),
                    error: None,
                },
                Err(e) => {
                    warn!("{}: {}", name, e);
                    PackMetaResult {
                        data: None,
                        error: Some(format!("{}: {}", name, e)),
                    }
                }
            });
            continue;
        }

        let data = match json {
            Ok(data) => data,
            Err(e) => {
                warn!("{}: {}", name, e);
                errors.push(format!("{}: {}", name, e));
                continue;
            }
        };

        if let Some(namespace) = classified.namespace() {
            *namespace_counts.entry(namespace.to_owned()).or_default() += 1;
        }

        match classified {
            Classified::Worldgen {
                ty,
                namespace,
                path,
            } => {
                let id = format!("{}:{}", namespace, path);
                entries_by_type.entry(ty).or_default().push(Entry::new(id, data));
            }
            Classified::Tag { namespace, path } => {
                let id = format!("{}:{}", namespace, path);
                tag_entries.push(Entry::new(id, data));
            }
            Classified::PackMeta | Classified::UnknownWorldgen { .. } => {}
        }
    }

    for entries in entries_by_type.values_mut() {
        entries.sort_by(|a, b| a.id.cmp(&b.id));
    }
    tag_entries.sort_by(|a, b| a.id.cmp(&b.id));
    errors.sort();

    let mut namespaces: Vec<(String, usize)> = namespace_counts.into_iter().collect();
    namespaces.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
    let namespaces: Vec<String> = namespaces.into_iter().map(|(ns, _)| ns).collect();

    let files = entries_by_type.values().map(Vec::len).sum::<usize>() + tag_entries.len();
    info!(
        "imported {} files in {} namespaces with {} errors",
        files,
        namespaces.len(),
        errors.len()
    );

    Ok(ImportResult {
        entries_by_type,
        tag_entries,
        pack_meta,
        errors,
        namespaces,
        files,
    })
}
