//! Error types for varnom
//!
//! Two error kinds are used throughout the crate:
//!
//! - [`ParsingError`]: the input string is lexically or grammatically invalid
//!   (bad prefix, missing punctuation, unmatched parentheses, unrecognized
//!   operator token, ...).
//! - [`InputValidationError`]: a well-formed but structurally invalid
//!   combination of already-parsed fields (non-positive position, invalid arm
//!   letter, insertion without a range, ...). Raised during position
//!   construction or variant assembly, never during raw tokenizing.
//!
//! Both kinds carry a structured payload rather than just a message: the
//! offending input, a tag naming which logical field caused the failure, and
//! (for parsing errors) an optional snapshot of whatever was successfully
//! decoded before the failure plus a nested sub-parser error.

use std::fmt;
use thiserror::Error;

/// Tag naming the logical notation field that caused a failure
///
/// These tags let callers react to a failure programmatically without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolatedAttr {
    Prefix,
    Punctuation,
    Type,
    Break1,
    Break2,
    Reference1,
    Reference2,
    UntemplatedSeq,
    Truncation,
    Alphabet,
}

impl ViolatedAttr {
    /// The tag as it appears in error payloads (camelCase, matching the
    /// field names of the variant record)
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolatedAttr::Prefix => "prefix",
            ViolatedAttr::Punctuation => "punctuation",
            ViolatedAttr::Type => "type",
            ViolatedAttr::Break1 => "break1",
            ViolatedAttr::Break2 => "break2",
            ViolatedAttr::Reference1 => "reference1",
            ViolatedAttr::Reference2 => "reference2",
            ViolatedAttr::UntemplatedSeq => "untemplatedSeq",
            ViolatedAttr::Truncation => "truncation",
            ViolatedAttr::Alphabet => "alphabet",
        }
    }
}

impl fmt::Display for ViolatedAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The input string is lexically or grammatically invalid
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParsingError {
    /// Human readable description of the failure
    pub message: String,
    /// The offending input, when available
    pub input: Option<String>,
    /// Which logical field caused the failure
    pub violated_attr: Option<ViolatedAttr>,
    /// Snapshot of whatever was successfully decoded before the failure
    pub parsed: Option<serde_json::Value>,
    /// Underlying sub-parser error for composed failures
    #[source]
    pub cause: Option<Box<NotationError>>,
}

impl ParsingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: None,
            violated_attr: None,
            parsed: None,
            cause: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_violated_attr(mut self, attr: ViolatedAttr) -> Self {
        self.violated_attr = Some(attr);
        self
    }

    pub fn with_parsed(mut self, parsed: serde_json::Value) -> Self {
        self.parsed = Some(parsed);
        self
    }

    pub fn with_cause(mut self, cause: NotationError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// A semantically well-formed but structurally invalid combination of
/// already-parsed fields
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InputValidationError {
    /// Human readable description of the failure
    pub message: String,
    /// The offending input, when available
    pub input: Option<String>,
    /// Which logical field caused the failure
    pub violated_attr: Option<ViolatedAttr>,
}

impl InputValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: None,
            violated_attr: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_violated_attr(mut self, attr: ViolatedAttr) -> Self {
        self.violated_attr = Some(attr);
        self
    }
}

/// Umbrella error type for varnom operations
///
/// Callers distinguish the two kinds to decide whether the problem is "bad
/// syntax" vs "syntactically fine but semantically impossible"; both are
/// fatal to the current parse call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    InputValidation(#[from] InputValidationError),
}

impl NotationError {
    /// The violated attribute tag, regardless of kind
    pub fn violated_attr(&self) -> Option<ViolatedAttr> {
        match self {
            NotationError::Parsing(e) => e.violated_attr,
            NotationError::InputValidation(e) => e.violated_attr,
        }
    }

    pub fn is_parsing(&self) -> bool {
        matches!(self, NotationError::Parsing(_))
    }

    pub fn is_input_validation(&self) -> bool {
        matches!(self, NotationError::InputValidation(_))
    }
}
