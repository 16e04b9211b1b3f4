use genpy_core::{MsgContext, MsgGenerationError, MsgSpec};

use crate::{
    config::GeneratorConfig,
    defaults::{Constructor, DefaultValue, compute_constructor, compute_default_value},
    emitter::WireEmitter,
    flatten::flatten,
    imports::{Import, compute_dependencies, compute_import},
    python::{render_constructor, render_default},
    resolver::{Resolution, get_registered_ex, resolve},
    sanitize::make_python_safe,
    special::SpecialType,
    wire::WireOp,
};

/// Python code generator over a populated, read-only registry.
///
/// Every operation is a pure function of the registry and the configuration,
/// so one generator can be shared across threads.
#[derive(Debug, Clone)]
pub struct PyGenerator<'a> {
    ctx: &'a MsgContext,
    config: GeneratorConfig,
}

impl<'a> PyGenerator<'a> {
    /// Generator with the standard special types and Python reserved words.
    pub fn new(ctx: &'a MsgContext) -> Self {
        Self::with_config(ctx, GeneratorConfig::default())
    }

    pub fn with_config(ctx: &'a MsgContext, config: GeneratorConfig) -> Self {
        Self { ctx, config }
    }

    pub fn context(&self) -> &'a MsgContext {
        self.ctx
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // special types

    pub fn is_special(&self, type_ref: &str) -> bool {
        self.config.special_types().contains(type_ref)
    }

    pub fn get_special(&self, type_ref: &str) -> Option<&SpecialType> {
        self.config.special_types().get(type_ref)
    }

    /// Post-deserialize expression for `var` of type `type_ref`, if any.
    pub fn compute_post_deserialize(&self, type_ref: &str, var: &str) -> Option<String> {
        self.get_special(type_ref)
            .and_then(|special| special.get_post_deserialize(var))
    }

    // resolution

    pub fn resolve(&self, package: &str, type_ref: &str) -> Result<Resolution, MsgGenerationError> {
        resolve(self.ctx, package, type_ref)
    }

    pub fn get_registered_ex(&self, full_name: &str) -> Result<&'a MsgSpec, MsgGenerationError> {
        get_registered_ex(self.ctx, full_name)
    }

    pub fn compute_dependencies(
        &self,
        package: &str,
        type_ref: &str,
    ) -> Result<Vec<Import>, MsgGenerationError> {
        compute_dependencies(self.ctx, self.config.special_types(), package, type_ref)
    }

    pub fn compute_import(
        &self,
        package: &str,
        type_ref: &str,
    ) -> Result<Vec<String>, MsgGenerationError> {
        compute_import(self.ctx, self.config.special_types(), package, type_ref)
    }

    // spec transformations

    pub fn flatten(&self, spec: &MsgSpec) -> Result<MsgSpec, MsgGenerationError> {
        flatten(self.ctx, spec)
    }

    pub fn make_python_safe(&self, spec: &MsgSpec) -> Result<MsgSpec, MsgGenerationError> {
        make_python_safe(spec, self.config.reserved_words())
    }

    // values

    pub fn default_value_of(
        &self,
        type_ref: &str,
        package: &str,
    ) -> Result<Option<DefaultValue>, MsgGenerationError> {
        compute_default_value(self.ctx, self.config.special_types(), type_ref, package)
    }

    /// Python literal for the zero value of `type_ref`, or `None` when the type does not resolve.
    pub fn default_value(
        &self,
        type_ref: &str,
        package: &str,
    ) -> Result<Option<String>, MsgGenerationError> {
        Ok(self
            .default_value_of(type_ref, package)?
            .as_ref()
            .map(render_default))
    }

    pub fn constructor_of(
        &self,
        package: &str,
        type_ref: &str,
    ) -> Result<Option<Constructor>, MsgGenerationError> {
        compute_constructor(self.ctx, self.config.special_types(), package, type_ref)
    }

    pub fn compute_constructor(
        &self,
        package: &str,
        type_ref: &str,
    ) -> Result<Option<String>, MsgGenerationError> {
        Ok(self
            .constructor_of(package, type_ref)?
            .as_ref()
            .map(render_constructor))
    }

    // wire emission

    /// Serializer (`serialize`) or deserializer for one field stored in `var`.
    pub fn field_serializer(
        &self,
        package: &str,
        type_ref: &str,
        var: &str,
        serialize: bool,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        WireEmitter::new(self.ctx, &self.config).field(package, type_ref, var, serialize)
    }

    /// Serializer or deserializer for a whole message.
    pub fn message_serializer(
        &self,
        spec: &MsgSpec,
        serialize: bool,
    ) -> Result<Vec<WireOp>, MsgGenerationError> {
        WireEmitter::new(self.ctx, &self.config).message(spec, serialize)
    }
}
