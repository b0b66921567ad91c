//! Typed model of the registry document, as extracted by the XML reader.
//! This is the seam between the parsing collaborator and the resolution
//! core: nothing downstream touches the XML library.

use serde::{Deserialize, Serialize};

use crate::EnumKind;

/// The whole registry, reduced to the sections the generator consumes.
/// Missing sections show up as empty collections, not errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDoc {
    /// Extension tag vocabulary (`tags/tag[@name]`), in document order.
    pub tags: Vec<String>,
    /// Core enum-group declarations (`enums` sections).
    pub enum_groups: Vec<EnumGroupDecl>,
    /// Versioned core feature groups, always ingested.
    pub features: Vec<FeatureDecl>,
    /// Optional extension groups, ingested per dependency resolution.
    pub extensions: Vec<ExtensionDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumGroupDecl {
    pub name: String,
    pub kind: EnumKind,
    pub values: Vec<ValueDecl>,
}

/// One raw `<enum>` value declaration. At most one of `value`, `bitpos`,
/// `alias`, `offset` is meaningful; precedence is decided by the value
/// synthesizer, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueDecl {
    pub name: String,
    pub value: Option<String>,
    pub bitpos: Option<String>,
    pub alias: Option<String>,
    pub offset: Option<String>,
    /// `dir="-"` on the source node.
    pub negative: bool,
    pub comment: Option<String>,
}

/// A value addition inside a `require` block, targeting the enum named by
/// `extends`. Entries without `extends` (API constants) are carried but
/// ignored by ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendDecl {
    pub extends: Option<String>,
    pub decl: ValueDecl,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequireBlock {
    pub values: Vec<ExtendDecl>,
    /// `require/type[@name]` references; these drive enum inclusion.
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDecl {
    pub name: String,
    pub requires: Vec<RequireBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionDecl {
    pub name: String,
    /// Extension number assigned in the spec, used for offset-encoded
    /// values. Kept as raw text; parsed (and validated) at synthesis time.
    pub number: Option<String>,
    /// Names of extensions this one requires (comma-separated in source).
    pub depends: Vec<String>,
    pub requires: Vec<RequireBlock>,
}

// EnumKind itself lives in lib.rs; its serde representation belongs to the
// document model.
impl Serialize for EnumKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            EnumKind::Enum => "enum",
            EnumKind::Bitmask32 => "bitmask32",
            EnumKind::Bitmask64 => "bitmask64",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for EnumKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "enum" => Ok(EnumKind::Enum),
            "bitmask32" => Ok(EnumKind::Bitmask32),
            "bitmask64" => Ok(EnumKind::Bitmask64),
            other => Err(serde::de::Error::custom(format!(
                "unknown enum kind `{other}`"
            ))),
        }
    }
}
