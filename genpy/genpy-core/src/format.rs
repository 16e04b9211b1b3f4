use std::fmt::{Error, Write as _};

use crate::msg_spec::MsgSpec;

/// Render a spec as readable text: the full name, then constants, then fields.
///
/// ```text
/// pkg/Type
///     constants:
///         int32 X = 1
///     fields:
///         int32 x
/// ```
pub fn format_msg_spec(spec: &MsgSpec) -> Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}", spec.full_name())?;

    if !spec.constants().is_empty() {
        writeln!(out, "    constants:")?;
        for c in spec.constants() {
            writeln!(out, "        {} {} = {}", c.ty, c.name, c.val_text)?;
        }
    }

    writeln!(out, "    fields:")?;
    for (ty, name) in spec.fields() {
        writeln!(out, "        {ty} {name}")?;
    }

    Ok(out)
}
