use std::{
    collections::HashSet,
    fmt::{Error, Write as _},
};

use genpy_core::{Constant, MsgGenerationError, MsgSpec};
use genpy_generator::{PyGenerator, python::render};
use rayon::prelude::*;

use crate::error::GenerateError;

/// Per-field artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedField {
    /// Python-safe field name.
    pub name: String,
    pub type_ref: String,
    /// `None` when the field type does not resolve.
    pub default_value: Option<String>,
    pub constructor: Option<String>,
}

/// Everything an external emitter needs to assemble one Python message module.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMessage {
    pub full_name: String,
    pub imports: Vec<String>,
    /// Python-safe constants.
    pub constants: Vec<Constant>,
    pub fields: Vec<GeneratedField>,
    pub serializer: Vec<String>,
    pub deserializer: Vec<String>,
    pub flattened: MsgSpec,
}

/// Compute every artifact of the registered message `full_name`.
pub fn generate_message(
    generator: &PyGenerator<'_>,
    full_name: &str,
) -> Result<GeneratedMessage, GenerateError> {
    build(generator, full_name).map_err(|source| GenerateError::Message {
        full_name: full_name.to_string(),
        source,
    })
}

/// Generate every registered message in parallel, sorted by name.
///
/// The registry is only read, so messages are independent of each other.
pub fn generate_all(
    generator: &PyGenerator<'_>,
) -> Vec<(String, Result<GeneratedMessage, GenerateError>)> {
    generator
        .context()
        .names()
        .par_iter()
        .map(|name| (name.to_string(), generate_message(generator, name)))
        .collect()
}

fn build(
    generator: &PyGenerator<'_>,
    full_name: &str,
) -> Result<GeneratedMessage, MsgGenerationError> {
    let spec = generator.get_registered_ex(full_name)?;
    let package = spec.package();
    let safe = generator.make_python_safe(spec)?;

    let mut seen = HashSet::new();
    let mut imports = Vec::new();
    for type_ref in spec.types() {
        for statement in generator.compute_import(package, type_ref)? {
            if seen.insert(statement.clone()) {
                imports.push(statement);
            }
        }
    }

    let fields = safe
        .fields()
        .map(|(type_ref, name)| -> Result<GeneratedField, MsgGenerationError> {
            Ok(GeneratedField {
                name: name.to_string(),
                type_ref: type_ref.to_string(),
                default_value: generator.default_value(type_ref, package)?,
                constructor: generator.compute_constructor(package, type_ref)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedMessage {
        full_name: full_name.to_string(),
        imports,
        constants: safe.constants().to_vec(),
        fields,
        serializer: render(&generator.message_serializer(spec, true)?),
        deserializer: render(&generator.message_serializer(spec, false)?),
        flattened: generator.flatten(spec)?,
    })
}

/// Render a generated message as a readable report.
pub fn format_generated(message: &GeneratedMessage) -> Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}", message.full_name)?;

    if !message.imports.is_empty() {
        writeln!(out, "    imports:")?;
        for statement in &message.imports {
            writeln!(out, "        {statement}")?;
        }
    }

    if !message.constants.is_empty() {
        writeln!(out, "    constants:")?;
        for c in &message.constants {
            writeln!(out, "        {} {} = {}", c.ty, c.name, c.val_text)?;
        }
    }

    writeln!(out, "    fields:")?;
    for field in &message.fields {
        let default = field.default_value.as_deref().unwrap_or("<unresolved>");
        writeln!(out, "        {} {} = {default}", field.type_ref, field.name)?;
    }

    writeln!(out, "    flattened:")?;
    for (ty, name) in message.flattened.fields() {
        writeln!(out, "        {ty} {name}")?;
    }

    for (label, lines) in [
        ("serialize", &message.serializer),
        ("deserialize", &message.deserializer),
    ] {
        writeln!(out, "    {label}:")?;
        for line in lines {
            writeln!(out, "        {line}")?;
        }
    }

    Ok(out)
}
