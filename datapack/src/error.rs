//! Contains the Error and Result type used across the crate.
//!
//! Only failures that stop a whole operation are errors. Problems scoped to a
//! single archive entry or a single document are collected into lists on the
//! successful result instead.
use crate::DocumentType;

#[derive(Debug)]
pub enum Error {
    /// The bytes given to the importer are not a readable zip archive, or the
    /// zip writer failed while exporting.
    Archive(zip::result::ZipError),
    IO(std::io::Error),
    Json(serde_json::Error),
    /// A store operation was given an index past the end of the list.
    IndexOutOfRange {
        ty: DocumentType,
        index: usize,
        len: usize,
    },
    /// Pack metadata is a singleton and has no entry list.
    NotListed(DocumentType),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Error {
        Error::Archive(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IO(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Archive(e) => write!(f, "invalid archive: {}", e),
            Error::IO(e) => write!(f, "io error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::IndexOutOfRange { ty, index, len } => write!(
                f,
                "index {} out of range for {} (length {})",
                index, ty, len
            ),
            Error::NotListed(ty) => write!(f, "{} does not hold a list of entries", ty),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Archive(e) => Some(e),
            Error::IO(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}
