use std::collections::HashSet;

/// Words the grammar never accepts as a type name.
///
/// Storage and function specifiers (`static`, `inline`, `explicit`, ...) are left out on
/// purpose: they parse as a leading "type" and are re-emitted unchanged.
pub const DEFAULT_RESERVED: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "const_cast",
    "continue",
    "default",
    "delete",
    "do",
    "dynamic_cast",
    "else",
    "enum",
    "false",
    "for",
    "friend",
    "goto",
    "if",
    "namespace",
    "new",
    "nullptr",
    "operator",
    "private",
    "protected",
    "public",
    "reinterpret_cast",
    "return",
    "sizeof",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "throw",
    "true",
    "try",
    "typedef",
    "typename",
    "union",
    "using",
    "virtual",
    "while",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWords {
    words: HashSet<String>,
}

impl ReservedWords {
    /// The built-in list extended with `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reserved = Self::default();
        reserved.words.extend(extra.into_iter().map(Into::into));
        reserved
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self {
            words: DEFAULT_RESERVED.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_words_extend_the_builtin_list() {
        let builtin = ReservedWords::default();
        let extended = ReservedWords::with_extra(["signals", "slots", "while"]);
        assert_eq!(extended.len(), builtin.len() + 2);
        assert!(extended.contains("slots"));
        assert!(!extended.is_empty());
    }

    #[test]
    fn specifiers_and_builtin_types_are_not_reserved() {
        let reserved = ReservedWords::default();
        for word in ["static", "inline", "explicit", "int", "void", "std"] {
            assert!(!reserved.contains(word), "{word}");
        }
    }
}
