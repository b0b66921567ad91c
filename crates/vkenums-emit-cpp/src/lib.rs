//! Serializes declaration records into a C++ header of `enum class`
//! declarations, with bitwise operators for bitmask kinds.

use std::io::Write;

use vkenums_core::Result;
use vkenums_domain::{EnumDecl, ValueRecord};

/// Indentation-aware line writer. Threaded through the emitter explicitly
/// so there is no global formatting state.
struct Formatter<W> {
    out: W,
    indent: usize,
}

impl<W: Write> Formatter<W> {
    fn new(out: W) -> Self {
        Self { out, indent: 0 }
    }

    fn line(&mut self, text: &str) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.out, "\t")?;
        }
        writeln!(self.out, "{text}")
    }

    fn open(&mut self) {
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent -= 1;
    }
}

fn underlying_type(decl: &EnumDecl) -> &'static str {
    if decl.width == 64 {
        "uint64_t"
    } else {
        "uint32_t"
    }
}

/// Render one value into `(comment, "Name = expr")`, or `None` when the
/// entry must be suppressed (an alias whose rendered name equals its
/// target would be a redefinition).
fn render_value(value: &ValueRecord) -> Option<(Option<&str>, String)> {
    if value.name == value.value {
        return None;
    }
    let expression = if value.bit_position {
        format!("1ULL << {}", value.value)
    } else if value.value.contains('-') {
        // Negative literals get explicit unsignedness; the enum's
        // underlying type is unsigned.
        format!("{}U", value.value)
    } else {
        value.value.clone()
    };
    Some((value.comment.as_deref(), format!("{} = {expression}", value.name)))
}

fn write_enum<W: Write>(f: &mut Formatter<W>, decl: &EnumDecl) -> std::io::Result<()> {
    f.line(&format!(
        "enum class {} : {} {{",
        decl.name,
        underlying_type(decl)
    ))?;
    f.open();

    let mut entries: Vec<(Option<&str>, String)> =
        decl.values.iter().filter_map(render_value).collect();
    entries.extend(decl.aliases.iter().filter_map(render_value));
    if entries.is_empty() {
        // Empty enums are ill-formed in C++; keep a placeholder until the
        // enum gains values. Checked after alias rendering so an enum whose
        // only surviving entries are aliases does not also get one.
        entries.push((
            Some("Placeholder for an enum with no included values"),
            "Empty".to_string(),
        ));
    }

    let last = entries.len() - 1;
    for (i, (comment, text)) in entries.iter().enumerate() {
        if let Some(comment) = comment {
            f.line(&format!("//{comment}"))?;
        }
        let separator = if i == last { "" } else { "," };
        f.line(&format!("{text}{separator}"))?;
    }

    f.close();
    f.line("};")?;
    Ok(())
}

fn write_binary_operator<W: Write>(
    f: &mut Formatter<W>,
    decl: &EnumDecl,
    operator: &str,
) -> std::io::Result<()> {
    let name = &decl.name;
    let int = underlying_type(decl);
    f.line(&format!(
        "inline {name} operator{operator}({name} one, {name} other) {{"
    ))?;
    f.open();
    f.line(&format!(
        "return static_cast<{name}>(static_cast<{int}>(one) {operator} static_cast<{int}>(other));"
    ))?;
    f.close();
    f.line("}")?;
    Ok(())
}

fn write_not_operator<W: Write>(f: &mut Formatter<W>, decl: &EnumDecl) -> std::io::Result<()> {
    let name = &decl.name;
    let int = underlying_type(decl);
    f.line(&format!("inline {name} operator~({name} obj) {{"))?;
    f.open();
    f.line(&format!(
        "return static_cast<{name}>(~static_cast<{int}>(obj));"
    ))?;
    f.close();
    f.line("}")?;
    Ok(())
}

/// Write a complete header for `decls`, optionally wrapped in a namespace.
pub fn write_header(
    out: impl Write,
    decls: &[EnumDecl],
    namespace: Option<&str>,
) -> Result<()> {
    let mut f = Formatter::new(out);
    f.line("#ifndef VKENUMS_HPP")?;
    f.line("#define VKENUMS_HPP")?;
    f.line("#include <cstdint>")?;
    f.line("#ifdef _MSC_VER")?;
    // Negative enumerants are rendered as e.g. -1U.
    f.line("#pragma warning( disable : 4146 )")?;
    f.line("#endif")?;

    if let Some(namespace) = namespace {
        f.line(&format!("namespace {namespace} {{"))?;
        f.open();
    }

    for decl in decls {
        write_enum(&mut f, decl)?;
        if decl.bitmask {
            f.line("")?;
            for operator in ["|", "&", "^"] {
                write_binary_operator(&mut f, decl, operator)?;
            }
            write_not_operator(&mut f, decl)?;
        }
    }

    if namespace.is_some() {
        f.close();
        f.line("}")?;
    }
    f.line("#endif")?;
    Ok(())
}

/// Render to a string; convenience wrapper used by tests and the CLI's
/// stdout path.
pub fn render_header(decls: &[EnumDecl], namespace: Option<&str>) -> Result<String> {
    let mut buffer = Vec::new();
    write_header(&mut buffer, decls, namespace)?;
    Ok(String::from_utf8(buffer)?)
}
