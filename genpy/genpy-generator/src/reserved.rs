use std::collections::BTreeSet;

/// Appended to identifiers that collide with a reserved word.
pub const RESERVED_MARKER: char = '_';

const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "exec", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "print",
    "raise", "return", "self", "try", "while", "with", "yield",
];

/// Identifiers generated code must not use as field or constant names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWords {
    words: BTreeSet<String>,
}

impl ReservedWords {
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Python 2 and 3 keywords plus `self`.
    pub fn python() -> Self {
        Self::new(PYTHON_RESERVED.iter().copied())
    }

    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.words.insert(word.into());
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// `name` with the marker appended when it is reserved, otherwise unchanged.
    pub fn remap(&self, name: &str) -> String {
        if self.contains(name) {
            format!("{name}{RESERVED_MARKER}")
        } else {
            name.to_string()
        }
    }

    /// Remap each segment of a dotted field path.
    pub fn remap_path(&self, path: &str) -> String {
        path.split('.')
            .map(|segment| self.remap(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::python()
    }
}
