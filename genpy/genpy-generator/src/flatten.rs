//! Expansion of nested message fields into dotted leaf paths.

use genpy_core::{ArrayLen, MsgContext, MsgGenerationError, MsgSpec, SEP, TypeRef};
use tracing::trace;

use crate::{
    resolver::{get_registered_ex, resolve, resolve_strict},
    special::backing_message,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlattenMode {
    /// Expand registered messages, spreading array arity onto the leaves;
    /// leave everything else as written.
    Structural,
    /// Expand scalar messages and `Header`, qualify nested array types, and
    /// require every message type to resolve.
    Wire,
}

/// Replace every nested message field by the flattened fields of that
/// message, named `outer.inner`.
///
/// An array of messages spreads its arity onto each leaf (`Point[] pts`
/// becomes `float64[] pts.x`, `float64[] pts.y`). When the element layout
/// itself contains arrays the field is kept whole, since nested arity has no
/// type syntax. Field types that do not resolve to a registered message pass
/// through unchanged. Constants, text and the full name are kept from `spec`.
pub fn flatten(ctx: &MsgContext, spec: &MsgSpec) -> Result<MsgSpec, MsgGenerationError> {
    Flattener::new(ctx, FlattenMode::Structural).run(spec)
}

/// Flattening used to lay out the wire encoding.
///
/// Arrays of messages stay whole here; the emitter loops over their elements.
pub(crate) fn flatten_for_wire(
    ctx: &MsgContext,
    spec: &MsgSpec,
) -> Result<MsgSpec, MsgGenerationError> {
    Flattener::new(ctx, FlattenMode::Wire).run(spec)
}

/// `(type, dotted name)` pairs.
type Leaves = Vec<(String, String)>;

struct Flattener<'a> {
    ctx: &'a MsgContext,
    mode: FlattenMode,
    stack: Vec<String>,
}

impl<'a> Flattener<'a> {
    fn new(ctx: &'a MsgContext, mode: FlattenMode) -> Self {
        Self {
            ctx,
            mode,
            stack: Vec::new(),
        }
    }

    fn run(mut self, spec: &MsgSpec) -> Result<MsgSpec, MsgGenerationError> {
        self.stack.push(spec.full_name().to_string());
        let leaves = self.expand(spec, "")?;

        let mut types = Vec::with_capacity(leaves.len());
        let mut names = Vec::with_capacity(leaves.len());
        for (ty, name) in leaves {
            trace!(field = %name, %ty, "flattened field");
            types.push(ty);
            names.push(name);
        }
        MsgSpec::new(
            types,
            names,
            spec.constants().to_vec(),
            spec.text(),
            spec.full_name(),
        )
    }

    fn expand(&mut self, spec: &MsgSpec, prefix: &str) -> Result<Leaves, MsgGenerationError> {
        let mut out = Vec::new();
        for (ty, name) in spec.fields() {
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };

            match self.classify(spec.package(), ty)? {
                Step::Leaf(leaf_type) => out.push((leaf_type, path)),
                Step::Nested { full_name, len } => {
                    let inner = self.descend(ty, full_name, &path)?;
                    match len {
                        ArrayLen::Scalar => out.extend(inner),
                        len => out.extend(spread(ty, &path, inner, len)?),
                    }
                }
            }
        }
        Ok(out)
    }

    fn descend(
        &mut self,
        ty: &str,
        full_name: String,
        path: &str,
    ) -> Result<Leaves, MsgGenerationError> {
        if self.stack.contains(&full_name) {
            return Err(MsgGenerationError::Unsupported {
                type_ref: ty.to_string(),
                reason: format!("recursive nesting of '{full_name}'"),
            });
        }
        let nested = get_registered_ex(self.ctx, &full_name)?;
        self.stack.push(full_name);
        let inner = self.expand(nested, path);
        self.stack.pop();
        inner
    }

    fn classify(&self, package: &str, ty: &str) -> Result<Step, MsgGenerationError> {
        let type_ref = TypeRef::parse(ty)?;

        match self.mode {
            FlattenMode::Structural => {
                Ok(match resolve(self.ctx, package, &type_ref.base)?.found() {
                    Some(full_name) => Step::Nested {
                        full_name: full_name.to_string(),
                        len: type_ref.len,
                    },
                    None => Step::Leaf(ty.to_string()),
                })
            }
            FlattenMode::Wire => {
                let resolved = match backing_message(&type_ref.base) {
                    Some(header) => header.to_string(),
                    None => resolve_strict(self.ctx, package, &type_ref.base)?,
                };
                let is_message = resolved.contains(SEP);
                if is_message && !type_ref.is_array() {
                    return Ok(Step::Nested {
                        full_name: resolved,
                        len: ArrayLen::Scalar,
                    });
                }
                let qualified = if is_message {
                    TypeRef {
                        base: resolved,
                        len: type_ref.len,
                    }
                } else {
                    type_ref
                };
                Ok(Step::Leaf(qualified.to_string()))
            }
        }
    }
}

enum Step {
    Leaf(String),
    Nested { full_name: String, len: ArrayLen },
}

/// Give every leaf of an array element the array's arity, or keep the
/// array field whole when a leaf is already an array.
fn spread(
    ty: &str,
    path: &str,
    leaves: Leaves,
    len: ArrayLen,
) -> Result<Leaves, MsgGenerationError> {
    let mut out = Vec::with_capacity(leaves.len());
    for (leaf_type, name) in leaves {
        let parsed = TypeRef::parse(&leaf_type)?;
        if parsed.is_array() {
            return Ok(vec![(ty.to_string(), path.to_string())]);
        }
        let lifted = TypeRef {
            base: parsed.base,
            len,
        };
        out.push((lifted.to_string(), name));
    }
    Ok(out)
}
