//! Error types for GraphiQL Explorer.

use std::fmt;

/// The main error type for GraphiQL Explorer core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// Every sender of an edit channel has been dropped.
    EditChannelClosed,
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditChannelClosed => write!(f, "The edit channel has been closed"),
        }
    }
}

impl std::error::Error for ExplorerError {}

/// Query-string parameter errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A `%` is not followed by two hex digits.
    MalformedEscape {
        /// The raw component.
        component: String,
    },
    /// A percent-decoded component is not valid UTF-8.
    InvalidUtf8 {
        /// The raw, still-encoded component.
        component: String,
    },
    /// The `variables` parameter is not valid JSON.
    InvalidVariables {
        /// The JSON parser's message.
        message: String,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEscape { component } => {
                write!(f, "Component '{component}' contains a malformed escape")
            }
            Self::InvalidUtf8 { component } => {
                write!(f, "Component '{component}' does not decode to UTF-8")
            }
            Self::InvalidVariables { message } => {
                write!(f, "Variables are not valid JSON: {message}")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// A specialized Result type for GraphiQL Explorer core operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
