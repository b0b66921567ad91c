//! High-level orchestration of one generation run:
//! dependency resolution, base/feature/extension ingestion, and extraction
//! of the ordered declaration records handed to an emitter.

use tracing::{debug, warn};
use vkenums_core::document::RegistryDoc;
use vkenums_core::{EnumKind, EnumRegistry, EnumValue, GenOptions, Result};
use vkenums_domain::{EnumDecl, ValueRecord, SCHEMA_VERSION};

pub mod ingest;
pub mod resolve;
pub mod synth;

/// Run the whole pipeline over an already-parsed registry document.
///
/// The returned records are in source declaration order, with alias values
/// after primary values within each record, so output is reproducible for a
/// given input.
pub fn generate(doc: &RegistryDoc, options: &GenOptions) -> Result<Vec<EnumDecl>> {
    let mut options = options.clone();
    if options.tag_names.is_empty() {
        options.tag_names = doc.tags.clone();
    }
    if options.tag_names.is_empty() && wants_tags(&options) {
        warn!("no extension tags found, tag-dependent transforms will be no-ops");
    }

    let resolved = resolve::resolve_extensions(
        &doc.extensions,
        &options.include_extensions,
        &options.exclude_extensions,
    );

    let mut registry = EnumRegistry::default();
    ingest::ingest_base(&mut registry, &doc.enum_groups, &options)?;
    ingest::ingest_features(&mut registry, &doc.features, &options)?;
    ingest::ingest_extensions(&mut registry, &doc.extensions, &resolved, &options)?;
    debug!("enum registry holds {} definitions", registry.len());

    Ok(to_declarations(&registry))
}

fn wants_tags(options: &GenOptions) -> bool {
    options.name_remove_postfix
        || options.value_remove_postfix
        || options.value_remove_postfix_core_types
        || options.remove_structure_names
}

fn to_declarations(registry: &EnumRegistry) -> Vec<EnumDecl> {
    registry
        .iter()
        .filter(|def| def.is_included)
        .map(|def| EnumDecl {
            schema_version: SCHEMA_VERSION,
            name: def.name.clone(),
            width: match def.kind {
                EnumKind::Bitmask64 => 64,
                EnumKind::Enum | EnumKind::Bitmask32 => 32,
            },
            bitmask: def.kind.is_bitmask(),
            values: def.values().iter().map(to_record).collect(),
            aliases: def.alias_values().iter().map(to_record).collect(),
        })
        .collect()
}

fn to_record(value: &EnumValue) -> ValueRecord {
    ValueRecord {
        name: value.name.clone(),
        value: value.value.clone(),
        comment: value.comment.clone(),
        bit_position: value.is_bit_position,
    }
}
