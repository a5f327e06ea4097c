//! Obfuscator settings.
//!
//! Settings come from an optional YAML or JSON file; command-line flags override them.
//!
//! ```yaml
//! indent: 2
//! seed: 42
//! reserved_words: [signals, slots]
//! ```

use std::fs;
use std::path::Path;

use miette::SourceSpan;
use serde::Deserialize;

use crate::errors::{unspanned, ObfuscatorError, SourceContext};
use crate::syntax::ReservedWords;

pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Spaces per nesting level in emitted code.
    pub indent: usize,
    /// Fixed seed for the member shuffle. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Words added to the built-in list of names that can never be types.
    pub reserved_words: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            seed: None,
            reserved_words: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`: YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn from_file(path: &Path) -> Result<Self, ObfuscatorError> {
        let content =
            fs::read_to_string(path).map_err(|e| ObfuscatorError::read_settings(path, e))?;
        let source = SourceContext::from_file(path.display().to_string(), content);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&source),
            _ => Self::from_json(&source),
        }
    }

    pub fn from_yaml(source: &SourceContext) -> Result<Self, ObfuscatorError> {
        serde_yaml::from_str(&source.content).map_err(|e| {
            let span = match e.location() {
                Some(location) => SourceSpan::from(location.index()..location.index()),
                None => unspanned(),
            };
            ObfuscatorError::invalid_settings(source, span, e)
        })
    }

    pub fn from_json(source: &SourceContext) -> Result<Self, ObfuscatorError> {
        serde_json::from_str(&source.content).map_err(|e| {
            let offset = line_column_offset(&source.content, e.line(), e.column());
            ObfuscatorError::invalid_settings(source, SourceSpan::from(offset..offset), e)
        })
    }

    pub fn reserved(&self) -> ReservedWords {
        ReservedWords::with_extra(self.reserved_words.iter().cloned())
    }
}

/// Byte offset of a 1-based line/column position, clamped to the text.
fn line_column_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let source = SourceContext::from_file("s.yaml", "seed: 7\n");
        let settings = Settings::from_yaml(&source).unwrap();
        assert_eq!(settings.indent, DEFAULT_INDENT);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.reserved_words.is_empty());
    }

    #[test]
    fn json_settings_extend_reserved_words() {
        let source = SourceContext::from_file(
            "s.json",
            r#"{ "indent": 2, "reserved_words": ["slots"] }"#,
        );
        let settings = Settings::from_json(&source).unwrap();
        assert_eq!(settings.indent, 2);
        let reserved = settings.reserved();
        assert!(reserved.contains("slots"));
        assert!(reserved.contains("while"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let source = SourceContext::from_file("s.yaml", "indent: 2\ncolour: blue\n");
        let error = Settings::from_yaml(&source).unwrap_err();
        assert_eq!(error.kind.code_suffix(), "invalid_settings");
        assert!(error.source_info.is_some());
    }

    #[test]
    fn line_column_offsets_are_clamped() {
        let text = "ab\ncd\n";
        assert_eq!(line_column_offset(text, 1, 1), 0);
        assert_eq!(line_column_offset(text, 2, 2), 4);
        assert_eq!(line_column_offset(text, 9, 9), text.len());
        assert_eq!(line_column_offset(text, 0, 0), 0);
    }
}
