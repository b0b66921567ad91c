//! Turns a raw value declaration into one [`EnumValue`] plus its destination
//! list, computing the canonical value expression.

use vkenums_core::document::ValueDecl;
use vkenums_core::{EnumValue, GenOptions, VkEnumsError};
use vkenums_transform::transform_value_name;

/// Which list of the owning definition the value belongs to. Aliases go
/// last so their targets are already declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Primary,
    Alias,
}

/// Base of the extension-local enumerant numbering scheme.
const EXTENSION_VALUE_BASE: i64 = 1_000_000_000;
/// Value block size reserved per extension number.
const EXTENSION_BLOCK_SIZE: i64 = 1_000;

fn parse_number(raw: &str, enum_name: &str) -> Result<i64, VkEnumsError> {
    raw.trim()
        .parse()
        .map_err(|_| VkEnumsError::MalformedValue {
            enum_name: enum_name.to_string(),
            raw: raw.to_string(),
        })
}

/// Synthesize one enum value. Resolution order mirrors the registry
/// schema's precedence: offset -> alias -> bit position -> literal.
pub fn synthesize(
    options: &GenOptions,
    decl: &ValueDecl,
    owning_original_name: &str,
    extension_number: Option<&str>,
) -> Result<(EnumValue, Destination), VkEnumsError> {
    let name = transform_value_name(options, &decl.name, owning_original_name, false);

    let mut destination = Destination::Primary;
    let mut is_bit_position = false;
    let mut value = if let (Some(offset), Some(number)) =
        (decl.offset.as_deref(), extension_number)
    {
        let offset = parse_number(offset, owning_original_name)?;
        let number = parse_number(number, owning_original_name)?;
        (EXTENSION_VALUE_BASE + (number - 1) * EXTENSION_BLOCK_SIZE + offset).to_string()
    } else if let Some(alias) = decl.alias.as_deref() {
        destination = Destination::Alias;
        // The expression text is the transformed target name.
        transform_value_name(options, alias, owning_original_name, false)
    } else if let Some(bitpos) = decl.bitpos.as_deref() {
        // Validate early; the emitter renders the raw index text.
        parse_number(bitpos, owning_original_name)?;
        is_bit_position = true;
        bitpos.to_string()
    } else {
        decl.value.clone().unwrap_or_default()
    };

    if decl.negative && !value.starts_with('-') {
        value.insert(0, '-');
    }

    Ok((
        EnumValue {
            name,
            value,
            comment: decl.comment.clone(),
            is_bit_position,
        },
        destination,
    ))
}
