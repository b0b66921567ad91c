//! The two ingestion passes that populate the enum registry from the
//! document model.

use std::collections::HashSet;

use tracing::debug;
use vkenums_core::document::{EnumGroupDecl, ExtensionDecl, FeatureDecl, RequireBlock};
use vkenums_core::{EnumDefinition, EnumKind, EnumRegistry, GenOptions, Result};
use vkenums_transform::transform_type_name;

use crate::synth::{synthesize, Destination};

/// Base pass: one registry entry per core enum-group declaration.
///
/// Entries start out not included; inclusion is driven entirely by later
/// feature/extension type references, which models the registry's split
/// between "all known groups" and "groups the selected set actually uses".
pub fn ingest_base(
    registry: &mut EnumRegistry,
    groups: &[EnumGroupDecl],
    options: &GenOptions,
) -> Result<()> {
    for group in groups {
        let name = transform_type_name(options, &group.name);
        let def = registry.get_or_create_with(&group.name, || {
            EnumDefinition::new(name, &group.name, group.kind)
        });
        // A placeholder created by an earlier reference carries a default
        // kind; the base declaration is authoritative.
        def.kind = group.kind;
        for decl in &group.values {
            let (value, dest) = synthesize(options, decl, &group.name, None)?;
            match dest {
                Destination::Primary => def.push_value(&decl.name, value),
                Destination::Alias => def.push_alias(&decl.name, value),
            }
        }
    }
    Ok(())
}

/// Feature pass: features are mandatory core-version functionality and are
/// always ingested.
pub fn ingest_features(
    registry: &mut EnumRegistry,
    features: &[FeatureDecl],
    options: &GenOptions,
) -> Result<()> {
    for feature in features {
        debug!("ingesting feature {}", feature.name);
        ingest_require_blocks(registry, &feature.requires, None, options)?;
    }
    Ok(())
}

/// Extension pass: only extensions that survived dependency resolution are
/// ingested; their spec-assigned number provides the offset-encoding
/// context.
pub fn ingest_extensions(
    registry: &mut EnumRegistry,
    extensions: &[ExtensionDecl],
    resolved: &HashSet<String>,
    options: &GenOptions,
) -> Result<()> {
    for extension in extensions {
        if !resolved.contains(&extension.name) {
            continue;
        }
        debug!("ingesting extension {}", extension.name);
        ingest_require_blocks(
            registry,
            &extension.requires,
            extension.number.as_deref(),
            options,
        )?;
    }
    Ok(())
}

fn ingest_require_blocks(
    registry: &mut EnumRegistry,
    blocks: &[RequireBlock],
    extension_number: Option<&str>,
    options: &GenOptions,
) -> Result<()> {
    for block in blocks {
        for extend in &block.values {
            // Entries without an extends target are constants, not
            // enumerants.
            let Some(target) = extend.extends.as_deref() else {
                continue;
            };
            let (value, dest) = synthesize(options, &extend.decl, target, extension_number)?;
            // The target may not have been declared yet; the document does
            // not order sections, so create it on demand.
            let def = registry.get_or_create_with(target, || {
                EnumDefinition::new(transform_type_name(options, target), target, EnumKind::Enum)
            });
            match dest {
                Destination::Primary => def.push_value(&extend.decl.name, value),
                Destination::Alias => def.push_alias(&extend.decl.name, value),
            }
        }
        for type_name in &block.types {
            match registry.get_mut(type_name) {
                Some(def) => def.is_included = true,
                // Non-enum types (structs, handles) land here too; only
                // known enum groups are flipped.
                None => debug!("required type {type_name} is not an enum group"),
            }
        }
    }
    Ok(())
}
