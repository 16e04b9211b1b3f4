use genpy_core::{MsgGenerationError, MsgSpec};

use crate::reserved::ReservedWords;

/// Copy of `spec` with reserved field and constant names suffixed by the marker.
///
/// Types, constant values and the source text are carried over untouched.
pub fn make_python_safe(
    spec: &MsgSpec,
    reserved: &ReservedWords,
) -> Result<MsgSpec, MsgGenerationError> {
    let names: Vec<String> = spec.names().iter().map(|n| reserved.remap(n)).collect();
    let constants = spec
        .constants()
        .iter()
        .map(|c| c.renamed(reserved.remap(&c.name)))
        .collect();

    MsgSpec::new(
        spec.types().to_vec(),
        names,
        constants,
        spec.text(),
        spec.full_name(),
    )
}
