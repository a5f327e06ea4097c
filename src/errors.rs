//! Obfuscator Error Handling
//!
//! Grammar mismatches never reach this module: they are the [`NotFit`] outcome that
//! drives backtracking inside the parser. Everything here is a boundary failure (files
//! and settings) that stops the run before any output is written.
//!
//! [`NotFit`]: crate::syntax::matcher::NotFit

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Named text an error can point into.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("cannot read input file '{path}'")]
    ReadInput { path: String },
    #[error("cannot write output file '{path}'")]
    WriteOutput { path: String },
    #[error("cannot read settings file '{path}'")]
    ReadSettings { path: String },
    #[error("invalid settings in '{path}': {reason}")]
    InvalidSettings { path: String, reason: String },
}

impl ErrorKind {
    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::ReadInput { .. } => "read_input",
            Self::WriteOutput { .. } => "write_output",
            Self::ReadSettings { .. } => "read_settings",
            Self::InvalidSettings { .. } => "invalid_settings",
        }
    }

    const fn phase(&self) -> &'static str {
        match self {
            Self::ReadInput { .. } | Self::WriteOutput { .. } => "io",
            Self::ReadSettings { .. } | Self::InvalidSettings { .. } => "config",
        }
    }
}

/// Where the error points, when it points anywhere.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single fatal error type.
#[derive(Debug)]
pub struct ObfuscatorError {
    pub kind: ErrorKind,
    pub source_info: Option<SourceInfo>,
    pub diagnostic_info: DiagnosticInfo,
    cause: Option<Cause>,
}

impl ObfuscatorError {
    pub fn new(kind: ErrorKind) -> Self {
        let error_code = format!("obfuscator::{}::{}", kind.phase(), kind.code_suffix());
        Self {
            kind,
            source_info: None,
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
            cause: None,
        }
    }

    pub fn read_input(path: &Path, cause: std::io::Error) -> Self {
        Self::new(ErrorKind::ReadInput {
            path: path.display().to_string(),
        })
        .with_help("check that the input file exists and is readable UTF-8 text")
        .with_cause(cause)
    }

    pub fn write_output(path: &Path, cause: std::io::Error) -> Self {
        Self::new(ErrorKind::WriteOutput {
            path: path.display().to_string(),
        })
        .with_help("check that the output directory exists and is writable")
        .with_cause(cause)
    }

    pub fn read_settings(path: &Path, cause: std::io::Error) -> Self {
        Self::new(ErrorKind::ReadSettings {
            path: path.display().to_string(),
        })
        .with_cause(cause)
    }

    /// A settings file that was read but could not be deserialized.
    pub fn invalid_settings(
        source: &SourceContext,
        span: SourceSpan,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(ErrorKind::InvalidSettings {
            path: source.name.clone(),
            reason: cause.to_string(),
        })
        .with_source(source, span)
        .with_help("known keys are `indent`, `seed` and `reserved_words`")
        .with_cause(cause)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    pub fn with_source(mut self, source: &SourceContext, span: SourceSpan) -> Self {
        self.source_info = Some(SourceInfo {
            source: source.to_named_source(),
            primary_span: span,
        });
        self
    }

    fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    fn primary_label(&self) -> &'static str {
        match &self.kind {
            ErrorKind::ReadInput { .. }
            | ErrorKind::WriteOutput { .. }
            | ErrorKind::ReadSettings { .. } => "here",
            ErrorKind::InvalidSettings { .. } => "invalid setting",
        }
    }
}

impl fmt::Display for ObfuscatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ObfuscatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl Diagnostic for ObfuscatorError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let info = self.source_info.as_ref()?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label().to_string()),
            info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_info
            .as_ref()
            .map(|info| &*info.source as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Creates a placeholder span for errors not tied to a specific source location.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Prints an ObfuscatorError with full miette diagnostics
pub fn print_error(error: ObfuscatorError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
