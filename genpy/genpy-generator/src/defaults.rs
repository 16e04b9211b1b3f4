//! Zero-initialized values and constructor expressions per field type.
//!
//! Unresolvable message types are not an error here: they yield `Ok(None)`
//! so callers can fall back to leaving the field uninitialized.

use genpy_core::{ArrayLen, BuiltinType, MsgContext, MsgGenerationError, SEP, TypeRef};

use crate::{
    resolver::{Resolution, resolve},
    special::SpecialTypeTable,
};

/// Longest fixed array whose default is spelled out element by element.
pub const MAX_LITERAL_ITEMS: usize = 1 << 16;

/// Expression creating a zero value of a non-primitive type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constructor {
    /// Constructor taken verbatim from the special-type table.
    Special(String),
    /// Default constructor of a registered message class.
    Message { package: String, name: String },
}

/// Zero value of a field, independent of the target syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Zero,
    FloatZero,
    False,
    EmptyString,
    EmptyList,
    /// Byte string of `n` zero bytes.
    ZeroBytes(usize),
    List(Vec<DefaultValue>),
    Constructor(Constructor),
}

/// Default value of `type_ref` as declared in a message of `package`.
pub fn compute_default_value(
    ctx: &MsgContext,
    specials: &SpecialTypeTable,
    type_ref: &str,
    package: &str,
) -> Result<Option<DefaultValue>, MsgGenerationError> {
    let parsed = TypeRef::parse(type_ref)?;
    let builtin = parsed.builtin();

    match (builtin, parsed.len) {
        (Some(b), ArrayLen::Variable) if b.is_byte_blob() => Ok(Some(DefaultValue::EmptyString)),
        (Some(b), ArrayLen::Fixed(n)) if b.is_byte_blob() => Ok(Some(DefaultValue::ZeroBytes(n))),
        (Some(BuiltinType::String), ArrayLen::Fixed(_)) => Err(MsgGenerationError::Unsupported {
            type_ref: type_ref.to_string(),
            reason: "fixed-length string arrays have no defined default".to_string(),
        }),
        (_, ArrayLen::Variable) => {
            let element = element_default(ctx, specials, &parsed.base, package)?;
            Ok(element.map(|_| DefaultValue::EmptyList))
        }
        (_, ArrayLen::Fixed(n)) => {
            let Some(element) = element_default(ctx, specials, &parsed.base, package)? else {
                return Ok(None);
            };
            if n > MAX_LITERAL_ITEMS {
                return Err(MsgGenerationError::Unsupported {
                    type_ref: type_ref.to_string(),
                    reason: format!("default literal limited to {MAX_LITERAL_ITEMS} elements"),
                });
            }
            Ok(Some(DefaultValue::List(vec![element; n])))
        }
        (_, ArrayLen::Scalar) => element_default(ctx, specials, &parsed.base, package),
    }
}

/// Constructor for a scalar special or message type; `None` for arrays,
/// primitives and unresolvable names.
pub fn compute_constructor(
    ctx: &MsgContext,
    specials: &SpecialTypeTable,
    package: &str,
    type_ref: &str,
) -> Result<Option<Constructor>, MsgGenerationError> {
    let parsed = TypeRef::parse(type_ref)?;
    if parsed.is_array() {
        return Ok(None);
    }
    if let Some(special) = specials.get(&parsed.base) {
        return Ok(Some(Constructor::Special(special.constructor.clone())));
    }
    Ok(match resolve(ctx, package, &parsed.base)? {
        Resolution::Found(full_name) => message_constructor(&full_name),
        _ => None,
    })
}

fn element_default(
    ctx: &MsgContext,
    specials: &SpecialTypeTable,
    base: &str,
    package: &str,
) -> Result<Option<DefaultValue>, MsgGenerationError> {
    let scalar = match BuiltinType::from_name(base) {
        Some(BuiltinType::Bool) => Some(DefaultValue::False),
        Some(BuiltinType::String) => Some(DefaultValue::EmptyString),
        Some(b) if b.is_float() => Some(DefaultValue::FloatZero),
        Some(b) if b.is_integer() => Some(DefaultValue::Zero),
        _ => None,
    };
    if scalar.is_some() {
        return Ok(scalar);
    }
    Ok(compute_constructor(ctx, specials, package, base)?.map(DefaultValue::Constructor))
}

/// Constructor of the registered message `pkg/Name`.
pub(crate) fn message_constructor(full_name: &str) -> Option<Constructor> {
    full_name
        .split_once(SEP)
        .map(|(package, name)| Constructor::Message {
            package: package.to_string(),
            name: name.to_string(),
        })
}
