//! Resource identifiers: `namespace:path`, optionally prefixed with `#` to
//! reference a tag instead of a single document.
//!
//! Entries in a [`Store`][crate::Store] keep their id in *storage form*, where
//! the namespace may be left out and defaults to the active namespace. Editors
//! show the *display form*, which always carries a namespace. The functions
//! here convert between the two and always take the active namespace as an
//! argument.
//!
//! ```
//! use datapack::id;
//!
//! assert_eq!(id::to_display("plains", "custom"), "custom:plains");
//! assert_eq!(id::to_storage("plains", "custom"), "plains");
//! assert_eq!(id::to_storage("minecraft:plains", "custom"), "minecraft:plains");
//! ```
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An identifier broken into its parts. `has_namespace` records whether the
/// namespace was written out or filled in from the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParts {
    pub namespace: String,
    pub path: String,
    pub has_namespace: bool,
}

/// Split an identifier at the first `:`. A leading `#` is dropped; callers
/// that care about tag references check for it themselves.
pub fn split(value: &str, fallback_namespace: &str) -> IdParts {
    let value = value.strip_prefix('#').unwrap_or(value);

    match value.split_once(':') {
        Some((namespace, path)) => IdParts {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
            has_namespace: true,
        },
        None => IdParts {
            namespace: fallback_namespace.to_owned(),
            path: value.to_owned(),
            has_namespace: false,
        },
    }
}

/// Render an id with its namespace always present.
pub fn to_display(value: &str, active_namespace: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let parts = split(value, active_namespace);
    if parts.path.is_empty() {
        return String::new();
    }

    let namespace = if parts.namespace.is_empty() {
        active_namespace
    } else {
        &parts.namespace
    };
    format!("{}:{}", namespace, parts.path)
}

/// Turn an id typed by the user into storage form. An explicit namespace is
/// kept verbatim even when it equals the active one, so references into
/// other namespaces survive a change of active namespace.
pub fn to_storage(value: &str, active_namespace: &str) -> String {
    let parts = split(value, active_namespace);
    if parts.has_namespace {
        format!("{}:{}", parts.namespace, parts.path)
    } else {
        parts.path
    }
}

/// The key two entries collide on: the fully qualified `namespace:path`.
pub fn storage_key(value: &str, default_namespace: &str) -> String {
    let parts = split(value, default_namespace);
    let namespace = if parts.namespace.is_empty() {
        default_namespace
    } else {
        &parts.namespace
    };
    format!("{}:{}", namespace, parts.path)
}

/// Return `proposed` if no existing id has the same storage key, otherwise the
/// first of `proposed_2`, `proposed_3`, ... that is free.
pub fn make_unique<S: AsRef<str>>(proposed: &str, existing: &[S], default_namespace: &str) -> String {
    let taken: std::collections::HashSet<String> = existing
        .iter()
        .map(|id| storage_key(id.as_ref(), default_namespace))
        .collect();

    if !taken.contains(&storage_key(proposed, default_namespace)) {
        return proposed.to_owned();
    }

    // At most existing.len() keys can be taken, so one of these is free.
    (2..existing.len() + 3)
        .map(|n| format!("{}_{}", proposed, n))
        .find(|candidate| !taken.contains(&storage_key(candidate, default_namespace)))
        .unwrap_or_else(|| format!("{}_{}", proposed, existing.len() + 2))
}

pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-'))
}

pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'/'))
}

/// A fully qualified, well formed `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    pub fn new(namespace: &str, path: &str) -> Result<Self, InvalidId> {
        if !is_valid_namespace(namespace) || !is_valid_path(path) {
            return Err(InvalidId(format!("{}:{}", namespace, path)));
        }
        Ok(Self {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
        })
    }

    /// Parse an id, filling in `default_namespace` when none is written.
    pub fn parse_with_default(value: &str, default_namespace: &str) -> Result<Self, InvalidId> {
        if value.starts_with('#') {
            return Err(InvalidId(value.to_owned()));
        }
        let parts = split(value, default_namespace);
        Self::new(&parts.namespace, &parts.path).map_err(|_| InvalidId(value.to_owned()))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for ResourceLocation {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, "minecraft")
    }
}

impl TryFrom<String> for ResourceLocation {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceLocation> for String {
    fn from(loc: ResourceLocation) -> Self {
        loc.to_string()
    }
}

impl Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// A reference from one document to another: either a single document or,
/// with a `#` prefix, every document in a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Direct(ResourceLocation),
    Tag(ResourceLocation),
}

impl Reference {
    pub fn location(&self) -> &ResourceLocation {
        match self {
            Reference::Direct(loc) | Reference::Tag(loc) => loc,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Reference::Tag(_))
    }
}

impl FromStr for Reference {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('#') {
            Some(rest) => rest
                .parse()
                .map(Reference::Tag)
                .map_err(|_| InvalidId(s.to_owned())),
            None => s.parse().map(Reference::Direct),
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Direct(loc) => write!(f, "{}", loc),
            Reference::Tag(loc) => write!(f, "#{}", loc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidId(pub String);

impl Display for InvalidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid resource identifier: {:?}", self.0)
    }
}

impl std::error::Error for InvalidId {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_without_namespace_uses_fallback() {
        let parts = split("plains", "custom");
        assert_eq!(
            parts,
            IdParts {
                namespace: "custom".into(),
                path: "plains".into(),
                has_namespace: false
            }
        );
    }

    #[test]
    fn split_at_first_colon_only() {
        let parts = split("a:b:c", "custom");
        assert_eq!(parts.namespace, "a");
        assert_eq!(parts.path, "b:c");
        assert!(parts.has_namespace);
    }

    #[test]
    fn split_strips_tag_marker() {
        let parts = split("#minecraft:is_forest", "custom");
        assert_eq!(parts.namespace, "minecraft");
        assert_eq!(parts.path, "is_forest");
    }

    #[test]
    fn display_form() {
        assert_eq!(to_display("", "custom"), "");
        assert_eq!(to_display("plains", "custom"), "custom:plains");
        assert_eq!(to_display("minecraft:plains", "custom"), "minecraft:plains");
        assert_eq!(to_display(":plains", "custom"), "custom:plains");
        assert_eq!(to_display("minecraft:", "custom"), "");
    }

    #[test]
    fn storage_form_keeps_explicit_namespace() {
        assert_eq!(to_storage("custom:plains", "custom"), "custom:plains");
        assert_eq!(to_storage("other:plains", "custom"), "other:plains");
        assert_eq!(to_storage("plains", "custom"), "plains");
    }

    #[test]
    fn display_then_storage_is_stable() {
        let shown = to_display("plains", "custom");
        let stored = to_storage(&shown, "custom");
        assert_eq!(storage_key(&stored, "custom"), storage_key("plains", "custom"));
    }

    #[test]
    fn unique_when_free() {
        let existing = ["a", "b"];
        assert_eq!(make_unique("c", &existing, "custom"), "c");
    }

    #[test]
    fn unique_appends_suffix() {
        let existing = ["new_biome", "new_biome_2"];
        assert_eq!(make_unique("new_biome", &existing, "custom"), "new_biome_3");
    }

    #[test]
    fn unique_compares_storage_keys() {
        let existing = ["custom:new_biome"];
        assert_eq!(make_unique("new_biome", &existing, "custom"), "new_biome_2");

        let existing = ["other:new_biome"];
        assert_eq!(make_unique("new_biome", &existing, "custom"), "new_biome");
    }

    #[test]
    fn unique_never_collides() {
        let mut existing: Vec<String> = vec![];
        for _ in 0..20 {
            let id = make_unique("x", &existing, "ns");
            let key = storage_key(&id, "ns");
            assert!(existing.iter().all(|e| storage_key(e, "ns") != key));
            existing.push(id);
        }
    }

    #[test]
    fn resource_location_parse() {
        let loc: ResourceLocation = "minecraft:worldgen/plains".parse().unwrap();
        assert_eq!(loc.namespace(), "minecraft");
        assert_eq!(loc.path(), "worldgen/plains");

        assert!("Minecraft:plains".parse::<ResourceLocation>().is_err());
        assert!("minecraft:".parse::<ResourceLocation>().is_err());
        assert!("#minecraft:plains".parse::<ResourceLocation>().is_err());
        assert_eq!(
            "plains".parse::<ResourceLocation>().unwrap().to_string(),
            "minecraft:plains"
        );
    }

    #[test]
    fn reference_parse() {
        let r: Reference = "#minecraft:is_ocean".parse().unwrap();
        assert!(r.is_tag());
        assert_eq!(r.to_string(), "#minecraft:is_ocean");

        let r: Reference = "custom:plains".parse().unwrap();
        assert!(!r.is_tag());
        assert_eq!(r.location().namespace(), "custom");
    }
}
