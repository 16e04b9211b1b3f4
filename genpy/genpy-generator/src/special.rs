//! Non-primitive builtins with generator-known imports and constructors.

use genpy_core::{HEADER_FULL_NAME, is_header_type};

/// Placeholder in [`SpecialType::post_deserialize`] templates for the target variable.
pub const VAR_PLACEHOLDER: &str = "{var}";

/// A builtin type that is not a primitive scalar: `time`, `duration`, `Header`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialType {
    pub name: String,
    /// Import statement the generated module needs to use the type.
    pub import_str: String,
    /// Expression constructing a zero value.
    pub constructor: String,
    /// Expression template run on a freshly deserialized value, with `{var}` as placeholder.
    pub post_deserialize: Option<String>,
}

impl SpecialType {
    pub fn new(
        name: impl Into<String>,
        import_str: impl Into<String>,
        constructor: impl Into<String>,
        post_deserialize: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            import_str: import_str.into(),
            constructor: constructor.into(),
            post_deserialize: post_deserialize.map(str::to_string),
        }
    }

    /// The post-deserialize expression for `var`, if this type has one.
    pub fn get_post_deserialize(&self, var: &str) -> Option<String> {
        self.post_deserialize
            .as_ref()
            .map(|template| template.replace(VAR_PLACEHOLDER, var))
    }
}

/// Lookup table of special types, injected through [`crate::GeneratorConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTypeTable {
    entries: Vec<SpecialType>,
}

impl SpecialTypeTable {
    pub fn new(entries: Vec<SpecialType>) -> Self {
        Self { entries }
    }

    /// `time`, `duration` and `Header` as understood by the genpy runtime.
    pub fn standard() -> Self {
        Self::new(vec![
            SpecialType::new("time", "import genpy", "genpy.Time()", Some("{var}.canon()")),
            SpecialType::new(
                "duration",
                "import genpy",
                "genpy.Duration()",
                Some("{var}.canon()"),
            ),
            SpecialType::new(
                "Header",
                "import std_msgs.msg",
                "std_msgs.msg._Header.Header()",
                None,
            ),
        ])
    }

    /// Look up a special type; every spelling of `Header` maps to the `Header` entry.
    pub fn get(&self, type_ref: &str) -> Option<&SpecialType> {
        let key = if is_header_type(type_ref) {
            "Header"
        } else {
            type_ref
        };
        self.entries.iter().find(|entry| entry.name == key)
    }

    pub fn contains(&self, type_ref: &str) -> bool {
        self.get(type_ref).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialType> {
        self.entries.iter()
    }
}

impl Default for SpecialTypeTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Registry name a special type expands to on the wire, if it is message-backed.
pub(crate) fn backing_message(type_ref: &str) -> Option<&'static str> {
    is_header_type(type_ref).then_some(HEADER_FULL_NAME)
}
