use crate::{reserved::ReservedWords, special::SpecialTypeTable};

/// Immutable tables the generator consults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    special_types: SpecialTypeTable,
    reserved_words: ReservedWords,
}

/// Builder for configuring [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    special_types: Option<SpecialTypeTable>,
    reserved_words: Option<ReservedWords>,
    extra_reserved: Vec<String>,
}

impl GeneratorConfig {
    /// Create a builder for [`GeneratorConfig`].
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    pub fn special_types(&self) -> &SpecialTypeTable {
        &self.special_types
    }

    pub fn reserved_words(&self) -> &ReservedWords {
        &self.reserved_words
    }
}

impl GeneratorConfigBuilder {
    /// Replace the special-type table (default: [`SpecialTypeTable::standard`]).
    pub fn special_types(mut self, table: SpecialTypeTable) -> Self {
        self.special_types = Some(table);
        self
    }

    /// Replace the reserved-word set (default: [`ReservedWords::python`]).
    pub fn reserved_words(mut self, words: ReservedWords) -> Self {
        self.reserved_words = Some(words);
        self
    }

    /// Reserve one more identifier on top of the configured set.
    pub fn extra_reserved_word(mut self, word: impl Into<String>) -> Self {
        self.extra_reserved.push(word.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeneratorConfig {
        let reserved_words = self
            .extra_reserved
            .into_iter()
            .fold(self.reserved_words.unwrap_or_default(), ReservedWords::with_word);
        GeneratorConfig {
            special_types: self.special_types.unwrap_or_default(),
            reserved_words,
        }
    }
}
