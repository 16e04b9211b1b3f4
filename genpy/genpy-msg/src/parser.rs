//! `.msg` text to [`MsgSpec`].
//!
//! Tokenizing is left to `re_ros_msg`; this module only maps its field and
//! constant types back onto the generator's type strings (`T`, `pkg/T`,
//! `T[]`, `T[n]`) and rejects the ROS 2 extensions that have no encoding here.

use genpy_core::{Constant, MsgSpec, SEP};
use re_ros_msg::{
    MessageSchema,
    message_spec::{ArraySize, BuiltInType, ComplexType, Field, Type},
};

use crate::error::MsgLoadError;

/// Parse `.msg` text into a specification named `full_name`.
///
/// `full_name` may be given as `pkg/Type` or `pkg/msg/Type`; the stored name is
/// always `pkg/Type`.
pub fn parse_msg(full_name: &str, text: &str) -> Result<MsgSpec, MsgLoadError> {
    let full_name = normalize_name(full_name)?;

    let schema = MessageSchema::parse(&full_name, text).map_err(|e| MsgLoadError::Parse {
        full_name: full_name.clone(),
        detail: e.to_string(),
    })?;
    let spec = schema.spec;

    let unsupported = |detail: String| MsgLoadError::Unsupported {
        full_name: full_name.clone(),
        detail,
    };

    let mut types = Vec::with_capacity(spec.fields.len());
    let mut names = Vec::with_capacity(spec.fields.len());
    for Field { name, ty, .. } in spec.fields {
        types.push(type_string(&ty).map_err(|d| unsupported(format!("field '{name}': {d}")))?);
        names.push(name);
    }

    let mut constants = Vec::with_capacity(spec.constants.len());
    for constant in spec.constants {
        let ty = match &constant.ty {
            Type::BuiltIn(builtin) => builtin_name(builtin)
                .map_err(|d| unsupported(format!("constant '{}': {d}", constant.name)))?,
            _ => {
                return Err(unsupported(format!(
                    "constant '{}' must be of a primitive type",
                    constant.name
                )));
            }
        };
        let literal = constant_literal(text, &ty, &constant.name)
            .unwrap_or_else(|| format!("{:?}", constant.value));
        constants.push(Constant::parse(&ty, &constant.name, &literal)?);
    }

    Ok(MsgSpec::new(types, names, constants, text, full_name)?)
}

/// `pkg/msg/Type` and `pkg/Type` both become `pkg/Type`.
fn normalize_name(name: &str) -> Result<String, MsgLoadError> {
    let parts: Vec<&str> = name.split(SEP).collect();
    let invalid = || MsgLoadError::InvalidName {
        name: name.to_string(),
    };

    let (pkg, ty) = match parts.as_slice() {
        [pkg, ty] => (*pkg, *ty),
        [pkg, "msg", ty] => (*pkg, *ty),
        _ => return Err(invalid()),
    };
    if pkg.is_empty() || ty.is_empty() {
        return Err(invalid());
    }
    Ok(format!("{pkg}{SEP}{ty}"))
}

fn type_string(ty: &Type) -> Result<String, String> {
    match ty {
        Type::BuiltIn(builtin) => builtin_name(builtin),
        Type::Complex(complex) => Ok(complex_name(complex)),
        Type::Array { ty: elem, size } => {
            let base = match elem.as_ref() {
                Type::Array { .. } => return Err("nested arrays are not supported".to_string()),
                other => type_string(other)?,
            };
            match size {
                ArraySize::Fixed(n) => Ok(format!("{base}[{n}]")),
                ArraySize::Unbounded => Ok(format!("{base}[]")),
                ArraySize::Bounded(n) => Err(format!("bounded sequence '{base}[<={n}]'")),
            }
        }
    }
}

fn builtin_name(ty: &BuiltInType) -> Result<String, String> {
    let name = match ty {
        BuiltInType::Bool => "bool",
        BuiltInType::Byte => "byte",
        BuiltInType::Char => "char",
        BuiltInType::Int8 => "int8",
        BuiltInType::UInt8 => "uint8",
        BuiltInType::Int16 => "int16",
        BuiltInType::UInt16 => "uint16",
        BuiltInType::Int32 => "int32",
        BuiltInType::UInt32 => "uint32",
        BuiltInType::Int64 => "int64",
        BuiltInType::UInt64 => "uint64",
        BuiltInType::Float32 => "float32",
        BuiltInType::Float64 => "float64",
        BuiltInType::String(None) => "string",
        BuiltInType::String(Some(n)) => return Err(format!("bounded string 'string<={n}'")),
        BuiltInType::WString(_) => return Err("wide strings are not supported".to_string()),
    };
    Ok(name.to_string())
}

/// Message references keep their spelling; the ROS 2 time types map to the
/// `time`/`duration` builtins.
fn complex_name(ty: &ComplexType) -> String {
    match ty {
        ComplexType::Absolute { package, name } => match (package.as_str(), name.as_str()) {
            ("builtin_interfaces", "Time") => "time".to_string(),
            ("builtin_interfaces", "Duration") => "duration".to_string(),
            _ => format!("{package}{SEP}{name}"),
        },
        ComplexType::Relative { name } => name.clone(),
    }
}

/// The value of `TYPE NAME=VALUE` exactly as written in `text`.
///
/// String constants keep everything after `=` (including `#`); other types
/// drop a trailing comment.
fn constant_literal(text: &str, ty: &str, name: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let (decl, value) = line.split_once('=')?;
        let mut words = decl.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(_), Some(n), None) if n == name => {}
            _ => return None,
        }
        let value = if ty == "string" {
            value
        } else {
            value.split_once('#').map_or(value, |(v, _)| v)
        };
        Some(value.trim().to_string())
    })
}
