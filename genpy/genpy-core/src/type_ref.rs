//! Field-type grammar: `name`, `pkg/name`, `name[]`, `name[n]`.

use std::fmt;

use crate::{builtin::BuiltinType, error::MsgGenerationError};

/// Separator between the package and the type name of a fully-qualified name.
pub const SEP: char = '/';

/// Fully-qualified name of the message the `Header` special type stands for.
pub const HEADER_FULL_NAME: &str = "std_msgs/Header";

/// Array arity of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    Scalar,
    /// `T[]`
    Variable,
    /// `T[n]`
    Fixed(usize),
}

/// A parsed field type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Element type as written, without any array suffix (`int32`, `Point`, `geometry_msgs/Point`).
    pub base: String,
    pub len: ArrayLen,
}

impl TypeRef {
    /// Split a type string into its base type and array arity.
    ///
    /// Fixed lengths above `u32::MAX` are rejected.
    pub fn parse(type_ref: &str) -> Result<Self, MsgGenerationError> {
        let illegal = || MsgGenerationError::IllegalType {
            type_ref: type_ref.to_string(),
        };

        let (base, len) = match type_ref.strip_suffix(']') {
            Some(head) => {
                let (base, inner) = head.split_once('[').ok_or_else(illegal)?;
                let len = if inner.is_empty() {
                    ArrayLen::Variable
                } else {
                    // lengths share the range of the uint32 length prefix
                    let n = inner.parse::<u32>().map_err(|_| illegal())?;
                    ArrayLen::Fixed(usize::try_from(n).map_err(|_| illegal())?)
                };
                (base, len)
            }
            None => (type_ref, ArrayLen::Scalar),
        };

        if base.is_empty() || base.contains(['[', ']']) || base.contains(char::is_whitespace) {
            return Err(illegal());
        }

        Ok(Self {
            base: base.to_string(),
            len,
        })
    }

    pub fn is_array(&self) -> bool {
        self.len != ArrayLen::Scalar
    }

    /// The builtin element type, if the base is a builtin keyword.
    pub fn builtin(&self) -> Option<BuiltinType> {
        BuiltinType::from_name(&self.base)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len {
            ArrayLen::Scalar => write!(f, "{}", self.base),
            ArrayLen::Variable => write!(f, "{}[]", self.base),
            ArrayLen::Fixed(n) => write!(f, "{}[{n}]", self.base),
        }
    }
}

/// Strip any array suffix from a type string (`Point[3]` -> `Point`).
pub fn bare_msg_type(type_ref: &str) -> &str {
    match type_ref.find('[') {
        Some(idx) => &type_ref[..idx],
        None => type_ref,
    }
}

/// `Header` has several spellings that all denote the same special type.
pub fn is_header_type(type_ref: &str) -> bool {
    matches!(type_ref, "Header" | "std_msgs/Header" | "roslib/Header")
}
