//! Extracts the sections the generator needs from a registry XML document.
//!
//! The output is the typed [`RegistryDoc`] model; no roxmltree type leaks
//! past this crate. Malformed XML is an error, but a missing top-level
//! section is only a diagnostic: the matching collection stays empty and
//! generation continues with incomplete output.

use roxmltree::{Document, Node};
use tracing::warn;
use vkenums_core::document::{
    EnumGroupDecl, ExtendDecl, ExtensionDecl, FeatureDecl, RegistryDoc, RequireBlock, ValueDecl,
};
use vkenums_core::{EnumKind, Result, VkEnumsError};

fn elements<'a, 'd: 'a>(
    node: Node<'a, 'd>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'd>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

pub fn parse_registry(xml: &str) -> Result<RegistryDoc> {
    let doc = Document::parse(xml).map_err(|e| VkEnumsError::Xml(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "registry" {
        warn!("no registry root node found, output will be empty");
        return Ok(RegistryDoc::default());
    }

    let out = RegistryDoc {
        tags: parse_tags(root),
        enum_groups: parse_enum_groups(root),
        features: parse_features(root),
        extensions: parse_extensions(root),
    };

    if out.enum_groups.is_empty() {
        warn!("no enums sections found, is the registry valid?");
    }
    if out.features.is_empty() {
        warn!("no feature sections found, is the registry valid?");
    }
    if out.extensions.is_empty() {
        warn!("no extensions section found, is the registry valid?");
    }
    Ok(out)
}

fn parse_tags(registry: Node) -> Vec<String> {
    let mut tags = Vec::new();
    for tags_node in elements(registry, "tags") {
        for tag in elements(tags_node, "tag") {
            if let Some(name) = tag.attribute("name") {
                tags.push(name.to_string());
            }
        }
    }
    tags
}

fn parse_enum_groups(registry: Node) -> Vec<EnumGroupDecl> {
    let mut groups = Vec::new();
    for node in elements(registry, "enums") {
        let Some(name) = node.attribute("name") else {
            continue;
        };
        // The API Constants group holds free-standing constants, not an
        // enumerated type.
        if name == "API Constants" {
            continue;
        }
        let kind = if node.attribute("type") == Some("bitmask") {
            if node.attribute("bitwidth") == Some("64") {
                EnumKind::Bitmask64
            } else {
                EnumKind::Bitmask32
            }
        } else {
            EnumKind::Enum
        };
        let values = elements(node, "enum").filter_map(parse_value).collect();
        groups.push(EnumGroupDecl {
            name: name.to_string(),
            kind,
            values,
        });
    }
    groups
}

fn parse_value(node: Node) -> Option<ValueDecl> {
    let name = node.attribute("name")?;
    Some(ValueDecl {
        name: name.to_string(),
        value: node.attribute("value").map(str::to_string),
        bitpos: node.attribute("bitpos").map(str::to_string),
        alias: node.attribute("alias").map(str::to_string),
        offset: node.attribute("offset").map(str::to_string),
        negative: node.attribute("dir").is_some_and(|d| d.starts_with('-')),
        comment: node.attribute("comment").map(str::to_string),
    })
}

fn parse_require_blocks(parent: Node) -> Vec<RequireBlock> {
    let mut blocks = Vec::new();
    for require in elements(parent, "require") {
        let mut block = RequireBlock::default();
        for child in require.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "enum" => {
                    if let Some(decl) = parse_value(child) {
                        block.values.push(ExtendDecl {
                            extends: child.attribute("extends").map(str::to_string),
                            decl,
                        });
                    }
                }
                "type" => {
                    if let Some(name) = child.attribute("name") {
                        block.types.push(name.to_string());
                    }
                }
                _ => {}
            }
        }
        blocks.push(block);
    }
    blocks
}

fn parse_features(registry: Node) -> Vec<FeatureDecl> {
    elements(registry, "feature")
        .map(|node| FeatureDecl {
            name: node.attribute("name").unwrap_or_default().to_string(),
            requires: parse_require_blocks(node),
        })
        .collect()
}

fn parse_extensions(registry: Node) -> Vec<ExtensionDecl> {
    let mut out = Vec::new();
    for section in elements(registry, "extensions") {
        for node in elements(section, "extension") {
            let Some(name) = node.attribute("name") else {
                continue;
            };
            let depends = node
                .attribute("requires")
                .map(|list| {
                    list.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            out.push(ExtensionDecl {
                name: name.to_string(),
                number: node.attribute("number").map(str::to_string),
                depends,
                requires: parse_require_blocks(node),
            });
        }
    }
    out
}
