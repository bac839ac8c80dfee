//! Mapping between archive paths and `(type, namespace, path)`.
//!
//! Only three shapes of path carry documents:
//!
//! ```text
//! pack.mcmeta
//! data/<namespace>/worldgen/<type>/<path>.json
//! data/<namespace>/tags/<path>.json
//! ```
//!
//! Anything else in an archive is ignored on import and never written on
//! export.
use crate::DocumentType;

pub const PACK_META: &str = "pack.mcmeta";

/// What an archive path holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    PackMeta,
    Tag { namespace: String, path: String },
    Worldgen {
        ty: DocumentType,
        namespace: String,
        path: String,
    },
    /// A worldgen folder this crate does not know. Skipped without complaint
    /// so packs for newer game versions still import.
    UnknownWorldgen { folder: String },
}

impl Classified {
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Classified::Tag { namespace, .. } | Classified::Worldgen { namespace, .. } => {
                Some(namespace.as_str())
            }
            _ => None,
        }
    }
}

/// Work out what an archive path holds, or `None` if it holds nothing this
/// crate reads. Directory entries never classify.
pub fn classify(name: &str) -> Option<Classified> {
    if name == PACK_META {
        return Some(Classified::PackMeta);
    }

    let rest = name.strip_prefix("data/")?;
    let (namespace, rest) = rest.split_once('/')?;
    if namespace.is_empty() {
        return None;
    }

    // Tags first: `tags/worldgen/biome/x.json` is a tag, not a worldgen file.
    if let Some(path) = rest.strip_prefix("tags/") {
        return document_path(path).map(|path| Classified::Tag {
            namespace: namespace.to_owned(),
            path,
        });
    }

    let rest = rest.strip_prefix("worldgen/")?;
    let (folder, path) = rest.split_once('/')?;
    let path = document_path(path)?;

    Some(match folder.parse::<DocumentType>() {
        Ok(ty) if ty.is_worldgen() => Classified::Worldgen {
            ty,
            namespace: namespace.to_owned(),
            path,
        },
        _ => Classified::UnknownWorldgen {
            folder: folder.to_owned(),
        },
    })
}

// `<path>.json` with a non-empty path and no empty segments.
fn document_path(file: &str) -> Option<String> {
    let path = file.strip_suffix(".json")?;
    if path.is_empty() || path.split('/').any(str::is_empty) {
        return None;
    }
    Some(path.to_owned())
}

/// The archive path of a document. Pack metadata ignores the namespace and
/// path.
pub fn entry_path(ty: DocumentType, namespace: &str, path: &str) -> String {
    match ty.folder() {
        Some(folder) => format!("data/{}/{}/{}.json", namespace, folder, path),
        None => PACK_META.to_owned(),
    }
}
