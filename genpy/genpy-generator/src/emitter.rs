//! Serializer and deserializer emission as [`WireOp`] sequences.

use genpy_core::{ArrayLen, BuiltinType, MsgContext, MsgGenerationError, MsgSpec, TypeRef};

use crate::{
    config::GeneratorConfig,
    defaults::{Constructor, compute_constructor, message_constructor},
    flatten::flatten_for_wire,
    resolver::{get_registered_ex, resolve_strict},
    shape::FieldShape,
    special::backing_message,
    wire::{Count, Payload, StructFormat, Unpack, WireOp},
};

const LENGTH_VAR: &str = "length";

/// Length handling for strings and arrays.
///
/// Serializing measures the value; only arrays write the prefix here, strings
/// fold it into the payload write. Deserializing always reads the prefix.
pub fn len_serializer_generator(var: &str, is_string: bool, serialize: bool) -> Vec<WireOp> {
    if !serialize {
        return vec![WireOp::ReadFixed {
            format: StructFormat::single('I'),
            into: Unpack::Fields(vec![LENGTH_VAR.to_string()]),
        }];
    }

    let mut ops = vec![WireOp::MeasureLength {
        var: var.to_string(),
    }];
    if !is_string {
        ops.push(WireOp::WriteFixed {
            format: StructFormat::single('I'),
            args: vec![LENGTH_VAR.to_string()],
        });
    }
    ops
}

/// Operations for a `string`, `uint8[]`/`byte[]` or `uint8[n]`/`byte[n]` field.
///
/// Byte arrays accept either a byte string or a list of integers at runtime,
/// so their serializer branches on the container kind.
pub fn string_serializer_generator(
    field_name: &str,
    type_ref: &str,
    var: &str,
    serialize: bool,
) -> Result<Vec<WireOp>, MsgGenerationError> {
    let parsed = TypeRef::parse(type_ref)?;
    let is_byte_blob = match (parsed.builtin(), parsed.len) {
        (Some(BuiltinType::String), ArrayLen::Scalar) => false,
        (Some(b), ArrayLen::Variable | ArrayLen::Fixed(_)) if b.is_byte_blob() => true,
        _ => {
            return Err(MsgGenerationError::Unsupported {
                type_ref: type_ref.to_string(),
                reason: format!("field '{field_name}' is neither a string nor a byte array"),
            });
        }
    };
    let fixed = match parsed.len {
        ArrayLen::Fixed(n) => Some(n),
        _ => None,
    };

    let mut ops = match fixed {
        Some(_) => Vec::new(),
        None => len_serializer_generator(var, true, serialize),
    };

    if !serialize {
        ops.push(match fixed {
            Some(len) => WireOp::ReadBytes {
                var: var.to_string(),
                len,
            },
            None => WireOp::ReadLengthPrefixed {
                var: var.to_string(),
            },
        });
        return Ok(ops);
    }

    if !is_byte_blob {
        ops.push(WireOp::WriteLengthPrefixed {
            var: var.to_string(),
            payload: Payload::Utf8,
        });
        return Ok(ops);
    }

    let (sequence, otherwise) = match fixed {
        Some(n) => (
            WireOp::WriteFixed {
                format: fixed_format('B', n, type_ref)?,
                args: vec![format!("*{var}")],
            },
            WireOp::WriteFixed {
                format: StructFormat::bytes(n),
                args: vec![var.to_string()],
            },
        ),
        None => (
            WireOp::WriteLengthPrefixed {
                var: var.to_string(),
                payload: Payload::ByteList,
            },
            WireOp::WriteLengthPrefixed {
                var: var.to_string(),
                payload: Payload::Bytes,
            },
        ),
    };
    ops.push(WireOp::Comment(
        "- if encoded as a list instead, serialize as bytes instead of string".to_string(),
    ));
    ops.push(WireOp::BranchOnContainerKind {
        var: var.to_string(),
        sequence: vec![sequence],
        otherwise: vec![otherwise],
    });
    Ok(ops)
}

/// Consecutive fixed-width values packed by a single struct call.
#[derive(Default)]
struct FixedGroup {
    format: StructFormat,
    vars: Vec<String>,
    after_read: Vec<WireOp>,
}

impl FixedGroup {
    fn flush_into(&mut self, ops: &mut Vec<WireOp>, serialize: bool) {
        if self.format.is_empty() {
            return;
        }
        let group = std::mem::take(self);
        if serialize {
            ops.push(WireOp::WriteFixed {
                format: group.format,
                args: group.vars,
            });
        } else {
            ops.push(WireOp::ReadFixed {
                format: group.format,
                into: Unpack::Fields(group.vars),
            });
            ops.extend(group.after_read);
        }
    }
}

/// Emits wire operations for fields whose types may reference the registry.
pub(crate) struct WireEmitter<'a> {
    ctx: &'a MsgContext,
    config: &'a GeneratorConfig,
    /// Messages currently being expanded, to reject recursive layouts.
    stack: Vec<String>,
}

impl<'a> WireEmitter<'a> {
    pub(crate) fn new(ctx: &'a MsgContext, config: &'a GeneratorConfig) -> Self {
        Self {
            ctx,
            config,
            stack: Vec::new(),
        }
    }

    /// Operations for a whole message, fields addressed as `self.<name>`.
    pub(crate) fn message(
        mut self,
        spec: &MsgSpec,
        serialize: bool,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        self.stack.push(spec.full_name().to_string());

        let mut ops = Vec::new();
        if !serialize {
            for (ty, name) in spec.fields() {
                let var = format!("self.{}", self.config.reserved_words().remap(name));
                ops.extend(self.construct(spec.package(), ty, &var)?);
            }
        }
        let fields = self.leaf_fields(spec, "self")?;
        ops.extend(self.emit_fields(&fields, serialize, 1)?);
        Ok(ops)
    }

    /// Operations for one field of type `type_ref` declared in `package`, stored in `var`.
    pub(crate) fn field(
        mut self,
        package: &str,
        type_ref: &str,
        var: &str,
        serialize: bool,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        let mut ops = Vec::new();
        if !serialize {
            ops.extend(self.construct(package, type_ref, var)?);
        }

        let qualified = self.qualify(package, type_ref)?;
        let fields = match FieldShape::classify(&qualified)? {
            FieldShape::Nested(full_name) => {
                let spec = get_registered_ex(self.ctx, &full_name)?;
                self.leaf_fields(spec, var)?
            }
            _ => vec![(qualified, var.to_string())],
        };
        ops.extend(self.emit_fields(&fields, serialize, 1)?);
        Ok(ops)
    }

    fn construct(
        &self,
        package: &str,
        type_ref: &str,
        var: &str,
    ) -> Result<Option<WireOp>, MsgGenerationError> {
        let constructor =
            compute_constructor(self.ctx, self.config.special_types(), package, type_ref)?;
        Ok(constructor.map(|constructor| WireOp::Construct {
            var: var.to_string(),
            constructor,
        }))
    }

    /// Rewrite a type reference with its message part fully qualified.
    fn qualify(&self, package: &str, type_ref: &str) -> Result<String, MsgGenerationError> {
        let parsed = TypeRef::parse(type_ref)?;
        let base = match backing_message(&parsed.base) {
            Some(header) => header.to_string(),
            None => resolve_strict(self.ctx, package, &parsed.base)?,
        };
        Ok(TypeRef {
            base,
            len: parsed.len,
        }
        .to_string())
    }

    /// Flattened `(type, variable)` pairs of `spec`, rooted at `prefix`.
    fn leaf_fields(
        &self,
        spec: &MsgSpec,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, MsgGenerationError> {
        let reserved = self.config.reserved_words();
        let flat = flatten_for_wire(self.ctx, spec)?;
        Ok(flat
            .fields()
            .map(|(ty, name)| (ty.to_string(), format!("{prefix}.{}", reserved.remap_path(name))))
            .collect())
    }

    fn emit_fields(
        &mut self,
        fields: &[(String, String)],
        serialize: bool,
        depth: usize,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        let mut ops = Vec::new();
        let mut group = FixedGroup::default();

        for (ty, var) in fields {
            match FieldShape::classify(ty)? {
                FieldShape::Scalar(b) => {
                    let code = struct_code(b, ty)?;
                    group.format.push(code).ok_or_else(|| size_overflow(ty))?;
                    group.vars.push(var.clone());
                    if b == BuiltinType::Bool {
                        group.after_read.push(WireOp::CoerceBool {
                            var: var.clone(),
                            elementwise: false,
                        });
                    }
                }
                FieldShape::Temporal(b) => {
                    group
                        .format
                        .push_n(temporal_code(b), 2)
                        .ok_or_else(|| size_overflow(ty))?;
                    group.vars.push(format!("{var}.secs"));
                    group.vars.push(format!("{var}.nsecs"));
                    group.after_read.extend(self.normalize(b, var));
                }
                shape => {
                    group.flush_into(&mut ops, serialize);
                    ops.extend(self.emit_compound(shape, ty, var, serialize, depth)?);
                }
            }
        }
        group.flush_into(&mut ops, serialize);
        Ok(ops)
    }

    fn emit_compound(
        &mut self,
        shape: FieldShape,
        ty: &str,
        var: &str,
        serialize: bool,
        depth: usize,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        let item = format!("val{depth}");

        match shape {
            FieldShape::Scalar(_) | FieldShape::Temporal(_) => {
                self.emit_fields(&[(ty.to_string(), var.to_string())], serialize, depth)
            }
            FieldShape::String | FieldShape::ByteArray(_) => {
                string_serializer_generator(var, ty, var, serialize)
            }
            FieldShape::NumericArray(b, len) => {
                let code = struct_code(b, ty)?;
                let mut ops = match (len, serialize) {
                    (ArrayLen::Fixed(n), true) => vec![WireOp::WriteFixed {
                        format: fixed_format(code, n, ty)?,
                        args: vec![format!("*{var}")],
                    }],
                    (ArrayLen::Fixed(n), false) => vec![WireOp::ReadFixed {
                        format: fixed_format(code, n, ty)?,
                        into: Unpack::Whole(var.to_string()),
                    }],
                    (_, true) => {
                        let mut ops = len_serializer_generator(var, false, true);
                        ops.push(WireOp::WritePacked {
                            var: var.to_string(),
                            code,
                        });
                        ops
                    }
                    (_, false) => {
                        let mut ops = len_serializer_generator(var, false, false);
                        ops.push(WireOp::ReadPacked {
                            var: var.to_string(),
                            code,
                        });
                        ops
                    }
                };
                if b == BuiltinType::Bool && !serialize {
                    ops.push(WireOp::CoerceBool {
                        var: var.to_string(),
                        elementwise: true,
                    });
                }
                Ok(ops)
            }
            FieldShape::StringArray => {
                let body = string_serializer_generator(&item, "string", &item, serialize)?;
                Ok(array_ops(var, &item, ArrayLen::Variable, serialize, None, body))
            }
            FieldShape::TemporalArray(b, len) => {
                let special = self.config.special_types().get(b.as_str()).ok_or_else(|| {
                    MsgGenerationError::Unsupported {
                        type_ref: ty.to_string(),
                        reason: format!("no special type registered for '{b}'"),
                    }
                })?;
                let format = fixed_format(temporal_code(b), 2, ty)?;
                let words = vec![format!("{item}.secs"), format!("{item}.nsecs")];
                let body = if serialize {
                    vec![WireOp::WriteFixed {
                        format,
                        args: words,
                    }]
                } else {
                    let mut body = vec![WireOp::ReadFixed {
                        format,
                        into: Unpack::Fields(words),
                    }];
                    body.extend(self.normalize(b, &item));
                    body
                };
                let constructor = Constructor::Special(special.constructor.clone());
                Ok(array_ops(var, &item, len, serialize, Some(constructor), body))
            }
            FieldShape::NestedArray(full_name, len) => {
                let constructor = message_constructor(&full_name).ok_or_else(|| {
                    MsgGenerationError::IllegalType {
                        type_ref: ty.to_string(),
                    }
                })?;
                let body = self.nested_body(&full_name, &item, serialize, depth)?;
                Ok(array_ops(var, &item, len, serialize, Some(constructor), body))
            }
            FieldShape::Nested(full_name) => self.nested_body(&full_name, var, serialize, depth),
        }
    }

    /// Operations for the flattened fields of `full_name` rooted at `var`.
    fn nested_body(
        &mut self,
        full_name: &str,
        var: &str,
        serialize: bool,
        depth: usize,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        if self.stack.iter().any(|name| name == full_name) {
            return Err(MsgGenerationError::Unsupported {
                type_ref: full_name.to_string(),
                reason: format!("recursive nesting of '{full_name}'"),
            });
        }
        let spec = get_registered_ex(self.ctx, full_name)?;
        let fields = self.leaf_fields(spec, var)?;

        self.stack.push(full_name.to_string());
        let body = self.emit_fields(&fields, serialize, depth + 1);
        self.stack.pop();
        body
    }

    fn normalize(&self, b: BuiltinType, var: &str) -> Option<WireOp> {
        self.config
            .special_types()
            .get(b.as_str())
            .and_then(|special| special.get_post_deserialize(var))
            .map(|expr| WireOp::Normalize { expr })
    }
}

/// Length handling and per-item loop around `body`.
fn array_ops(
    var: &str,
    item: &str,
    len: ArrayLen,
    serialize: bool,
    constructor: Option<Constructor>,
    body: Vec<WireOp>,
) -> Vec<WireOp> {
    let fixed = match len {
        ArrayLen::Fixed(n) => Some(n),
        _ => None,
    };

    let mut ops = match fixed {
        Some(n) if serialize => vec![WireOp::CheckLength {
            var: var.to_string(),
            len: n,
        }],
        Some(_) => Vec::new(),
        None => len_serializer_generator(var, false, serialize),
    };

    if serialize {
        ops.push(WireOp::ForEach {
            var: var.to_string(),
            item: item.to_string(),
            body,
        });
    } else {
        ops.push(WireOp::Collect {
            var: var.to_string(),
            item: item.to_string(),
            count: fixed.map_or(Count::Length, Count::Fixed),
            constructor,
            body,
        });
    }
    ops
}

fn struct_code(b: BuiltinType, ty: &str) -> Result<char, MsgGenerationError> {
    b.struct_code().ok_or_else(|| MsgGenerationError::Unsupported {
        type_ref: ty.to_string(),
        reason: format!("'{b}' has no fixed-width encoding"),
    })
}

fn fixed_format(code: char, count: usize, ty: &str) -> Result<StructFormat, MsgGenerationError> {
    StructFormat::repeated(code, count).ok_or_else(|| size_overflow(ty))
}

fn size_overflow(ty: &str) -> MsgGenerationError {
    MsgGenerationError::Unsupported {
        type_ref: ty.to_string(),
        reason: "encoded size overflows".to_string(),
    }
}

/// `time` is two unsigned words, `duration` two signed ones.
fn temporal_code(b: BuiltinType) -> char {
    if b == BuiltinType::Duration { 'i' } else { 'I' }
}
