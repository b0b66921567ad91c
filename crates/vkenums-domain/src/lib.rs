use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One emitted enumerant. `bit_position == true` means `value` is a bit
/// index and the rendered expression is `1 << value`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValueRecord {
    pub name: String,
    pub value: String,
    pub comment: Option<String>,
    pub bit_position: bool,
}

/// Ordered declaration record for one included enum. `aliases` come after
/// `values` so alias expressions never reference undeclared names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnumDecl {
    pub schema_version: u32,
    pub name: String,
    /// Underlying integer width: 32 or 64 bit.
    pub width: u8,
    pub bitmask: bool,
    pub values: Vec<ValueRecord>,
    pub aliases: Vec<ValueRecord>,
}
