//! Moving a whole collection in and out of the zip layout the game loads.
//!
//! Import and export are the only bulk operations. Both work on bytes in
//! memory; where those bytes come from is up to the caller.
mod export;
mod import;
pub mod path;

pub use export::*;
pub use import::*;
