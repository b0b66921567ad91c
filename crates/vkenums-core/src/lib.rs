use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;

pub mod document;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

#[derive(Debug, Error)]
pub enum VkEnumsError {
    /// A numeric attribute (offset, extension number, bit position) did not
    /// parse. The historical tool silently produced garbage here; we fail
    /// and name the offending enum and raw text instead.
    #[error("malformed numeric value in `{enum_name}`: `{raw}`")]
    MalformedValue { enum_name: String, raw: String },
    #[error("registry XML: {0}")]
    Xml(String),
}

/// Numeric shape of a value group. Bitmask groups become integer-backed
/// `enum class` declarations with bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumKind {
    #[default]
    Enum,
    Bitmask32,
    Bitmask64,
}

impl EnumKind {
    pub fn is_bitmask(self) -> bool {
        !matches!(self, EnumKind::Enum)
    }
}

/// A single transformed enumerant.
///
/// When `is_bit_position` is set, `value` holds a bit index and the emitter
/// renders it as `1 << index`, never as a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
    pub comment: Option<String>,
    pub is_bit_position: bool,
}

/// Accumulated definition of one output enum.
///
/// `original_name` keeps the untransformed registry name: value-name
/// transformation needs it to detect the structural prefix shared between
/// the enum and its values.
#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub name: String,
    pub original_name: String,
    pub kind: EnumKind,
    pub is_included: bool,
    values: Vec<EnumValue>,
    // Alias values are emitted strictly after the primary values so that an
    // alias never references a name that has not been defined yet.
    alias_values: Vec<EnumValue>,
    seen_value_names: HashSet<String>,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>, original_name: impl Into<String>, kind: EnumKind) -> Self {
        Self {
            name: name.into(),
            original_name: original_name.into(),
            kind,
            is_included: false,
            values: Vec::new(),
            alias_values: Vec::new(),
            seen_value_names: HashSet::new(),
        }
    }

    /// Add a primary value. The registry document duplicates some value
    /// declarations across groups; the first occurrence of a raw name wins.
    pub fn push_value(&mut self, raw_name: &str, value: EnumValue) {
        if self.seen_value_names.insert(raw_name.to_string()) {
            self.values.push(value);
        }
    }

    /// Add an alias value, deduplicated against the same raw-name set.
    pub fn push_alias(&mut self, raw_name: &str, value: EnumValue) {
        if self.seen_value_names.insert(raw_name.to_string()) {
            self.alias_values.push(value);
        }
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn alias_values(&self) -> &[EnumValue] {
        &self.alias_values
    }
}

/// Mapping from original enum name to its accumulated definition.
///
/// Insertion-ordered so that emission follows source declaration order and
/// output is reproducible across runs.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    defs: IndexMap<String, EnumDefinition>,
}

impl EnumRegistry {
    /// Look up a definition by original name, creating it if an extension or
    /// feature references an enum before its base declaration was seen.
    /// Creation-on-reference is intentional: the registry document does not
    /// guarantee declaration order across sections.
    pub fn get_or_create_with(
        &mut self,
        original_name: &str,
        create: impl FnOnce() -> EnumDefinition,
    ) -> &mut EnumDefinition {
        self.defs
            .entry(original_name.to_string())
            .or_insert_with(create)
    }

    pub fn get_mut(&mut self, original_name: &str) -> Option<&mut EnumDefinition> {
        self.defs.get_mut(original_name)
    }

    pub fn get(&self, original_name: &str) -> Option<&EnumDefinition> {
        self.defs.get(original_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumDefinition> {
        self.defs.values()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// The single immutable options structure for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Wrap the emitted declarations in a namespace.
    pub namespace: Option<String>,
    /// Include-list mode: only these extensions (plus their transitive
    /// `requires` closure) are ingested. Takes precedence over `exclude`.
    pub include_extensions: Vec<String>,
    /// Exclude-list mode: all extensions except these and everything that
    /// transitively requires them.
    pub exclude_extensions: Vec<String>,
    /// Replacement for the fixed `Vk` type-name prefix.
    pub name_prefix_replacement: String,
    /// Strip a trailing extension tag from type names.
    pub name_remove_postfix: bool,
    /// Prefix inserted in front of every transformed value name.
    pub value_prefix_replacement: String,
    /// Prepended when a transformed value name would start with a digit.
    pub number_prefix: String,
    /// Erase the repeated `TYPENAME_` portion from value names.
    pub remove_structure_names: bool,
    /// Delete underscores from value names (after the inserted prefix).
    pub remove_underscores: bool,
    /// Lowercase value names (after the inserted prefix).
    pub to_lower: bool,
    /// Capitalize the first letter after the prefix and every letter
    /// following an underscore or digit.
    pub capitalize_start: bool,
    /// Strip trailing extension tags from values of tag-suffixed enums.
    pub value_remove_postfix: bool,
    /// Same, but for values owned by untagged (core) enums.
    pub value_remove_postfix_core_types: bool,
    /// Extension tag vocabulary, in priority order (first match wins).
    /// Normally loaded from the registry's `tags` section.
    pub tag_names: Vec<String>,
}
