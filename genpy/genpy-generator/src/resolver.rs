//! Name resolution of field types against a [`MsgContext`].
//!
//! # Lookup strategy
//!
//! 1. **Builtin**: primitive keywords, `time`, `duration` and every spelling of
//!    `Header` never touch the registry.
//! 2. **Qualified** (`pkg/Type`): found iff registered under exactly that name.
//! 3. **Short** (`Type`): found iff registered as `current_package/Type`.
//!    Otherwise the registry is scanned for the same short name in other
//!    packages; any hit makes the reference ambiguous, since the generator
//!    must not pick a package on the caller's behalf.

use genpy_core::{
    BuiltinType, MsgContext, MsgGenerationError, MsgSpec, SEP, bare_msg_type, is_header_type,
};
use tracing::debug;

/// Outcome of resolving a type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A builtin or special type; resolves to itself.
    Builtin(String),
    /// A registered message, by fully-qualified name.
    Found(String),
    /// A short name registered only in other packages.
    Ambiguous(Vec<String>),
    NotFound,
}

impl Resolution {
    /// The fully-qualified name, for [`Resolution::Found`].
    pub fn found(&self) -> Option<&str> {
        match self {
            Self::Found(name) => Some(name),
            _ => None,
        }
    }
}

/// Split a type reference into `(package, name)`, defaulting the package to `package`.
///
/// ```text
/// ("std_msgs", "String")          -> ("std_msgs", "String")
/// ("foo", "std_msgs/String")      -> ("std_msgs", "String")
/// ("std_msgs", "a/b/String")      -> IllegalType
/// ```
pub fn compute_pkg_type(
    package: &str,
    type_ref: &str,
) -> Result<(String, String), MsgGenerationError> {
    let illegal = || MsgGenerationError::IllegalType {
        type_ref: type_ref.to_string(),
    };

    let mut parts = type_ref.split(SEP);
    let (pkg, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => (package, name),
        (Some(pkg), Some(name), None) => (pkg, name),
        _ => return Err(illegal()),
    };
    if pkg.is_empty() || name.is_empty() {
        return Err(illegal());
    }
    Ok((pkg.to_string(), name.to_string()))
}

/// Resolve `type_ref` (array suffix ignored) as seen from `package`.
pub fn resolve(
    ctx: &MsgContext,
    package: &str,
    type_ref: &str,
) -> Result<Resolution, MsgGenerationError> {
    let base = bare_msg_type(type_ref);
    if BuiltinType::from_name(base).is_some() || is_header_type(base) {
        return Ok(Resolution::Builtin(base.to_string()));
    }

    let (pkg, name) = compute_pkg_type(package, base)?;
    let full_name = format!("{pkg}{SEP}{name}");
    if ctx.is_registered(&full_name) {
        return Ok(Resolution::Found(full_name));
    }

    if base.contains(SEP) {
        debug!(type_ref, "qualified type is not registered");
        return Ok(Resolution::NotFound);
    }

    let candidates: Vec<String> = ctx
        .find_by_short_name(&name)
        .into_iter()
        .map(str::to_string)
        .collect();
    if candidates.is_empty() {
        debug!(type_ref, package, "short type name is not registered anywhere");
        Ok(Resolution::NotFound)
    } else {
        debug!(type_ref, package, ?candidates, "short type name is ambiguous");
        Ok(Resolution::Ambiguous(candidates))
    }
}

/// Like [`resolve`], but unresolvable references are errors.
///
/// Returns the builtin name or the fully-qualified message name.
pub fn resolve_strict(
    ctx: &MsgContext,
    package: &str,
    type_ref: &str,
) -> Result<String, MsgGenerationError> {
    match resolve(ctx, package, type_ref)? {
        Resolution::Builtin(name) | Resolution::Found(name) => Ok(name),
        Resolution::Ambiguous(candidates) => Err(MsgGenerationError::Ambiguous {
            name: bare_msg_type(type_ref).to_string(),
            namespace: package.to_string(),
            candidates,
        }),
        Resolution::NotFound => Err(MsgGenerationError::Unregistered {
            name: bare_msg_type(type_ref).to_string(),
        }),
    }
}

/// Registry lookup that fails instead of returning `None`.
pub fn get_registered_ex<'a>(
    ctx: &'a MsgContext,
    full_name: &str,
) -> Result<&'a MsgSpec, MsgGenerationError> {
    ctx.get_registered(full_name)
        .ok_or_else(|| MsgGenerationError::Unregistered {
            name: full_name.to_string(),
        })
}
