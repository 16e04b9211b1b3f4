//! Transitive import computation over the field-type graph.

use std::{collections::HashSet, fmt};

use genpy_core::{MsgContext, MsgGenerationError, bare_msg_type};
use tracing::trace;

use crate::{
    resolver::{Resolution, get_registered_ex, resolve, resolve_strict},
    special::SpecialTypeTable,
};

/// One required import of a generated module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Import {
    /// The generated `msg` module of a package.
    Package(String),
    /// A fixed statement contributed by a special type.
    Special(String),
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package(pkg) => write!(f, "import {pkg}.msg"),
            Self::Special(statement) => f.write_str(statement),
        }
    }
}

/// Imports needed to use `type_ref` from `package`, nearest dependency first.
///
/// A top-level type that does not resolve to a registered message yields no
/// imports. Once inside a registered message every field type must resolve.
pub fn compute_dependencies(
    ctx: &MsgContext,
    specials: &SpecialTypeTable,
    package: &str,
    type_ref: &str,
) -> Result<Vec<Import>, MsgGenerationError> {
    let base = bare_msg_type(type_ref);
    if let Some(special) = specials.get(base) {
        return Ok(vec![Import::Special(special.import_str.clone())]);
    }

    let full_name = match resolve(ctx, package, base)? {
        Resolution::Found(full_name) => full_name,
        _ => return Ok(Vec::new()),
    };

    let mut walk = ImportWalk {
        ctx,
        specials,
        visited: HashSet::new(),
        out: Vec::new(),
    };
    walk.visit(&full_name)?;
    Ok(walk.out)
}

/// Rendered import statements for `type_ref`, each statement at most once.
pub fn compute_import(
    ctx: &MsgContext,
    specials: &SpecialTypeTable,
    package: &str,
    type_ref: &str,
) -> Result<Vec<String>, MsgGenerationError> {
    let mut seen = HashSet::new();
    Ok(compute_dependencies(ctx, specials, package, type_ref)?
        .into_iter()
        .map(|import| import.to_string())
        .filter(|statement| seen.insert(statement.clone()))
        .collect())
}

struct ImportWalk<'a> {
    ctx: &'a MsgContext,
    specials: &'a SpecialTypeTable,
    visited: HashSet<String>,
    out: Vec<Import>,
}

impl ImportWalk<'_> {
    fn push(&mut self, import: Import) {
        if !self.out.contains(&import) {
            self.out.push(import);
        }
    }

    fn visit(&mut self, full_name: &str) -> Result<(), MsgGenerationError> {
        if !self.visited.insert(full_name.to_string()) {
            return Ok(());
        }
        trace!(full_name, "collecting imports");

        let spec = get_registered_ex(self.ctx, full_name)?;
        self.push(Import::Package(spec.package().to_string()));

        for ty in spec.types() {
            let base = bare_msg_type(ty);
            if let Some(special) = self.specials.get(base) {
                self.push(Import::Special(special.import_str.clone()));
                continue;
            }
            let resolved = resolve_strict(self.ctx, spec.package(), base)?;
            if self.ctx.is_registered(&resolved) {
                self.visit(&resolved)?;
            }
        }
        Ok(())
    }
}
