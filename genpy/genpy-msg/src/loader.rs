use std::{
    fs,
    path::{Path, PathBuf},
};

use genpy_core::{MsgContext, SEP};
use tracing::debug;

use crate::{error::MsgLoadError, parser::parse_msg};

const MSG_EXTENSION: &str = "msg";

/// Parse one `.msg` file as `package/<file stem>` and register it.
///
/// Returns the registered full name.
pub fn load_msg_file(
    ctx: &mut MsgContext,
    package: &str,
    path: impl AsRef<Path>,
) -> Result<String, MsgLoadError> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| MsgLoadError::InvalidName {
            name: path.display().to_string(),
        })?;
    let full_name = format!("{package}{SEP}{stem}");

    let text = fs::read_to_string(path).map_err(|source| MsgLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let spec = parse_msg(&full_name, &text)?;

    debug!(%full_name, path = %path.display(), fields = spec.names().len(), "loaded message");
    ctx.register(full_name.clone(), spec);
    Ok(full_name)
}

/// Load every `*.msg` file directly inside `dir` as messages of `package`.
///
/// Files are processed in name order. Returns the registered full names.
pub fn load_package_dir(
    ctx: &mut MsgContext,
    package: &str,
    dir: impl AsRef<Path>,
) -> Result<Vec<String>, MsgLoadError> {
    let dir = dir.as_ref();
    let io_err = |source| MsgLoadError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == MSG_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();

    debug!(package, dir = %dir.display(), count = files.len(), "loading package");
    files
        .iter()
        .map(|path| load_msg_file(ctx, package, path))
        .collect()
}
