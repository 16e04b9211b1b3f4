use std::collections::HashMap;

use crate::{
    msg_spec::MsgSpec,
    type_ref::{HEADER_FULL_NAME, SEP},
};

/// Registry of message specifications keyed by fully-qualified name.
///
/// Populated once, then only read while generating.
#[derive(Debug, Clone, Default)]
pub struct MsgContext {
    registered: HashMap<String, MsgSpec>,
}

impl MsgContext {
    /// An empty registry.
    pub fn create_default() -> Self {
        Self::default()
    }

    /// Register `spec` under `full_name`, replacing any previous entry.
    pub fn register(&mut self, full_name: impl Into<String>, spec: MsgSpec) {
        self.registered.insert(full_name.into(), spec);
    }

    pub fn get_registered(&self, full_name: &str) -> Option<&MsgSpec> {
        self.registered.get(full_name)
    }

    pub fn is_registered(&self, full_name: &str) -> bool {
        self.registered.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registered.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MsgSpec)> {
        self.registered.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fully-qualified names whose type part equals `short_name`, sorted.
    pub fn find_by_short_name(&self, short_name: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .registered
            .keys()
            .filter(|name| {
                name.split_once(SEP)
                    .is_some_and(|(_, short)| short == short_name)
            })
            .map(String::as_str)
            .collect();
        found.sort_unstable();
        found
    }

    /// Register `std_msgs/Header` unless a definition is already present.
    pub fn ensure_builtin_specs(&mut self) {
        if self.is_registered(HEADER_FULL_NAME) {
            return;
        }
        let header = MsgSpec::from_parts(
            vec!["uint32".into(), "time".into(), "string".into()],
            vec!["seq".into(), "stamp".into(), "frame_id".into()],
            "uint32 seq\ntime stamp\nstring frame_id\n",
            HEADER_FULL_NAME,
        );
        self.register(HEADER_FULL_NAME, header);
    }
}
