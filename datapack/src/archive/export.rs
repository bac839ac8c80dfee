use std::collections::HashSet;
use std::io::{Cursor, Write};

use log::{debug, info, warn};
use serde_json::Value;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::path::{entry_path, PACK_META};
use crate::id::{self, ResourceLocation};
use crate::{defaults, DocumentType, Entry, Result, Store};

/// A finished archive and everything skipped while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub bytes: Vec<u8>,
    pub warnings: Vec<String>,
    /// Documents written, `pack.mcmeta` included.
    pub files: usize,
}

impl ExportOutcome {
    pub fn status(&self) -> String {
        match self.warnings.len() {
            0 => "Downloaded".to_owned(),
            n => format!("Downloaded with {} warnings", n),
        }
    }
}

/// Build a datapack zip from every entry in `store`. Entries without a usable
/// id are skipped with a warning; documents are written whether or not they
/// pass validation.
pub fn export_archive(
    store: &Store,
    pack_meta: Option<&Value>,
    default_namespace: &str,
) -> Result<ExportOutcome> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut warnings = vec![];
    let mut written = HashSet::new();

    let meta = match pack_meta {
        Some(meta) => meta.clone(),
        None => defaults::pack_meta(),
    };
    write_json(&mut zip, options, PACK_META, &meta)?;

    for (ty, collection) in store.iter() {
        for entry in collection.entries() {
            let path = match archive_path(ty, entry, default_namespace) {
                Ok(path) => path,
                Err(warning) => {
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            if !written.insert(path.clone()) {
                let warning = format!("{}: duplicate id \"{}\"", ty, entry.id);
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }

            debug!("writing {}", path);
            write_json(&mut zip, options, &path, &entry.data)?;
        }
    }

    let bytes = zip.finish()?.into_inner();
    let files = written.len() + 1;
    info!(
        "exported {} files ({} bytes) with {} warnings",
        files,
        bytes.len(),
        warnings.len()
    );

    Ok(ExportOutcome {
        bytes,
        warnings,
        files,
    })
}

fn archive_path(
    ty: DocumentType,
    entry: &Entry,
    default_namespace: &str,
) -> std::result::Result<String, String> {
    if entry.id.trim().is_empty() {
        return Err(format!("{}: entry missing id", ty));
    }

    let parts = id::split(&entry.id, default_namespace);
    let namespace = if parts.namespace.is_empty() {
        default_namespace
    } else {
        &parts.namespace
    };

    match ResourceLocation::new(namespace, &parts.path) {
        Ok(location) => Ok(entry_path(ty, location.namespace(), location.path())),
        Err(_) => Err(format!("{}: invalid id \"{}\"", ty, entry.id)),
    }
}

fn write_json(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    name: &str,
    value: &Value,
) -> Result<()> {
    zip.start_file(name, options)?;
    zip.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
    Ok(())
}
