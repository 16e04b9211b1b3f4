use genpy_core::{ArrayLen, BuiltinType, MsgGenerationError, TypeRef};

/// Wire layout class of a field, derived from its type syntax.
///
/// Message names are taken as written; callers qualify them beforehand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape {
    /// Fixed-width primitive, including `bool`.
    Scalar(BuiltinType),
    String,
    /// `time` or `duration`: two 32-bit words.
    Temporal(BuiltinType),
    /// `uint8`/`byte` arrays, carried as byte strings.
    ByteArray(ArrayLen),
    NumericArray(BuiltinType, ArrayLen),
    /// `string[]`.
    StringArray,
    TemporalArray(BuiltinType, ArrayLen),
    Nested(String),
    NestedArray(String, ArrayLen),
}

impl FieldShape {
    pub fn classify(type_ref: &str) -> Result<Self, MsgGenerationError> {
        let parsed = TypeRef::parse(type_ref)?;
        let len = parsed.len;

        let Some(builtin) = parsed.builtin() else {
            return Ok(if parsed.is_array() {
                Self::NestedArray(parsed.base, len)
            } else {
                Self::Nested(parsed.base)
            });
        };

        Ok(match (builtin, len) {
            (BuiltinType::String, ArrayLen::Scalar) => Self::String,
            (BuiltinType::String, ArrayLen::Variable) => Self::StringArray,
            (BuiltinType::String, ArrayLen::Fixed(_)) => {
                return Err(MsgGenerationError::Unsupported {
                    type_ref: type_ref.to_string(),
                    reason: "fixed-length string arrays are not supported".to_string(),
                });
            }
            (b, ArrayLen::Scalar) if b.is_temporal() => Self::Temporal(b),
            (b, ArrayLen::Scalar) => Self::Scalar(b),
            (b, len) if b.is_temporal() => Self::TemporalArray(b, len),
            (b, len) if b.is_byte_blob() => Self::ByteArray(len),
            (b, len) => Self::NumericArray(b, len),
        })
    }
}
