//! Message specifications and their constants.

use std::collections::HashSet;

use crate::{
    builtin::BuiltinType,
    error::MsgGenerationError,
    type_ref::{SEP, TypeRef},
};

/// Resolved value of a constant declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    String(String),
}

/// A `TYPE NAME=VALUE` declaration attached to a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub ty: String,
    pub name: String,
    pub val: ConstantValue,
    /// The literal exactly as written in the IDL source.
    pub val_text: String,
}

impl Constant {
    pub fn new(
        ty: impl Into<String>,
        name: impl Into<String>,
        val: ConstantValue,
        val_text: impl Into<String>,
    ) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            val,
            val_text: val_text.into(),
        }
    }

    /// Build a constant from its literal text, converting the value according to `ty`.
    pub fn parse(ty: &str, name: &str, val_text: &str) -> Result<Self, MsgGenerationError> {
        let invalid = |detail: String| MsgGenerationError::InvalidConstant {
            name: name.to_string(),
            ty: ty.to_string(),
            detail,
        };

        let builtin = BuiltinType::from_name(ty)
            .ok_or_else(|| invalid("constants must be of a primitive type".to_string()))?;
        let literal = val_text.trim();

        let val = match builtin {
            BuiltinType::String => ConstantValue::String(val_text.to_string()),
            BuiltinType::Float32 | BuiltinType::Float64 => ConstantValue::Float(
                literal
                    .parse::<f64>()
                    .map_err(|e| invalid(format!("'{literal}' is not a float: {e}")))?,
            ),
            BuiltinType::Bool => ConstantValue::Bool(parse_bool(literal).ok_or_else(|| {
                invalid(format!("'{literal}' is not a boolean literal"))
            })?),
            BuiltinType::Time | BuiltinType::Duration => {
                return Err(invalid("constants must be of a primitive type".to_string()));
            }
            integer => {
                let value = literal
                    .parse::<i128>()
                    .map_err(|e| invalid(format!("'{literal}' is not an integer: {e}")))?;
                let (lo, hi) = integer
                    .integer_range()
                    .ok_or_else(|| invalid("not an integer type".to_string()))?;
                if value < lo || value > hi {
                    return Err(invalid(format!("{value} is out of range [{lo}, {hi}]")));
                }
                if lo < 0 {
                    ConstantValue::Int(value as i64)
                } else {
                    ConstantValue::UInt(value as u64)
                }
            }
        };

        Ok(Self::new(ty, name, val, val_text))
    }

    /// Same constant under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

fn parse_bool(literal: &str) -> Option<bool> {
    match literal.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        other => other.parse::<i64>().ok().map(|v| v != 0),
    }
}

/// Immutable specification of one message type.
///
/// `types` and `names` are index-aligned. Transformations (sanitizing,
/// flattening) build new specs instead of mutating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct MsgSpec {
    types: Vec<String>,
    names: Vec<String>,
    constants: Vec<Constant>,
    text: String,
    full_name: String,
}

impl MsgSpec {
    pub fn new<T, N>(
        types: T,
        names: N,
        constants: Vec<Constant>,
        text: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Result<Self, MsgGenerationError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let spec = Self {
            types: types.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
            constants,
            text: text.into(),
            full_name: full_name.into(),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Spec built by this crate from trusted parts.
    pub(crate) fn from_parts(
        types: Vec<String>,
        names: Vec<String>,
        text: &str,
        full_name: &str,
    ) -> Self {
        Self {
            types,
            names,
            constants: Vec::new(),
            text: text.to_string(),
            full_name: full_name.to_string(),
        }
    }

    fn validate(&self) -> Result<(), MsgGenerationError> {
        let invalid = |detail: String| MsgGenerationError::InvalidSpec {
            full_name: self.full_name.clone(),
            detail,
        };

        if self.types.len() != self.names.len() {
            return Err(invalid(format!(
                "{} field types but {} field names",
                self.types.len(),
                self.names.len()
            )));
        }

        match self.full_name.split_once(SEP) {
            Some((pkg, name)) if !pkg.is_empty() && !name.is_empty() && !name.contains(SEP) => {}
            _ => return Err(invalid("full name must have the form 'package/Type'".to_string())),
        }

        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!("duplicate field name '{name}'")));
            }
        }
        for ty in &self.types {
            TypeRef::parse(ty)?;
        }
        Ok(())
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Package part of the fully-qualified name.
    pub fn package(&self) -> &str {
        self.full_name
            .split_once(SEP)
            .map_or(self.full_name.as_str(), |(pkg, _)| pkg)
    }

    /// Type name without its package.
    pub fn short_name(&self) -> &str {
        self.full_name
            .split_once(SEP)
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    /// `(type, name)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types
            .iter()
            .map(String::as_str)
            .zip(self.names.iter().map(String::as_str))
    }
}
