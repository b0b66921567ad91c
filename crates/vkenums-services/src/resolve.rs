//! Decides which extensions take part in a generation run.
//!
//! Each extension declares the extensions it requires; resolution is a
//! transitive closure over that relation. Names that do not exist in the
//! registry are tolerated as no-ops in both modes.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use vkenums_core::document::ExtensionDecl;

/// Compute the final set of extension names to ingest.
///
/// Include-list mode (non-empty `include`) wins over exclude-list mode: the
/// result is the seeds plus everything reachable through `requires` edges.
/// Otherwise every extension is taken, minus each excluded name and every
/// extension whose `requires` closure contains it.
pub fn resolve_extensions(
    extensions: &[ExtensionDecl],
    include: &[String],
    exclude: &[String],
) -> HashSet<String> {
    let resolved = if !include.is_empty() {
        let requires: HashMap<&str, &[String]> = extensions
            .iter()
            .map(|e| (e.name.as_str(), e.depends.as_slice()))
            .collect();
        let mut resolved = HashSet::new();
        for seed in include {
            include_closure(&requires, seed, &mut resolved);
        }
        resolved
    } else {
        let mut resolved: HashSet<String> =
            extensions.iter().map(|e| e.name.clone()).collect();
        for name in exclude {
            if !resolved.contains(name) {
                debug!("excluded extension {name} not found in registry");
            }
            exclude_dependents(extensions, name, &mut resolved);
        }
        resolved
    };
    debug!("resolved {} of {} extensions", resolved.len(), extensions.len());
    resolved
}

/// Depth-first walk over `requires` edges. A name already in the set is
/// treated as satisfied, which keeps cyclic graphs terminating.
fn include_closure(
    requires: &HashMap<&str, &[String]>,
    name: &str,
    resolved: &mut HashSet<String>,
) {
    if !resolved.insert(name.to_string()) {
        return;
    }
    if let Some(deps) = requires.get(name) {
        for dep in *deps {
            include_closure(requires, dep, resolved);
        }
    }
}

/// Remove `name` and, by reverse-edge propagation, every extension that
/// directly or indirectly requires it.
fn exclude_dependents(
    extensions: &[ExtensionDecl],
    name: &str,
    resolved: &mut HashSet<String>,
) {
    let mut pending = vec![name.to_string()];
    while let Some(excluded) = pending.pop() {
        resolved.remove(&excluded);
        for ext in extensions {
            if resolved.contains(&ext.name) && ext.depends.iter().any(|d| *d == excluded) {
                pending.push(ext.name.clone());
            }
        }
    }
}
