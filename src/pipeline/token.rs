//! Morphological token

use std::fmt;

/// One analyzed word with a lemma and two independently sourced tag sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologicalToken {
    /// Surface form as it appeared in the lower-cased text
    pub original_word: String,

    /// Lemma from the primary analyzer
    pub normalized_form: String,

    /// Grammatical tags from the primary analyzer
    pub tags_primary: String,

    /// Tags from the secondary tagger, if it recognized the word
    pub tags_secondary: Option<String>,
}

impl MorphologicalToken {
    pub fn new(
        original_word: impl Into<String>,
        normalized_form: impl Into<String>,
        tags_primary: impl Into<String>,
        tags_secondary: Option<String>,
    ) -> Self {
        Self {
            original_word: original_word.into(),
            normalized_form: normalized_form.into(),
            tags_primary: tags_primary.into(),
            tags_secondary,
        }
    }

    /// Serialized form `lemma<primary>(secondary)`; a missing secondary set renders as `()`
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MorphologicalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{}>({})",
            self.normalized_form,
            self.tags_primary,
            self.tags_secondary.as_deref().unwrap_or_default()
        )
    }
}
