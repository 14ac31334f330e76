use thiserror::Error;

/// All error types for pawk
///
/// Every parse-time variant carries the fragment of program text that could
/// not be compiled, so the caller can point at it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {message} in `{fragment}`")]
    Syntax { message: String, fragment: String },

    #[error("action must be enclosed in braces: `{fragment}`")]
    MissingBraces { fragment: String },

    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid line number: `{fragment}`")]
    InvalidLineNumber { fragment: String },

    #[error("invalid field: `{fragment}`")]
    InvalidField { fragment: String },

    #[error("unsupported statement: `{fragment}`")]
    UnsupportedStatement { fragment: String },

    #[error("unsupported command: `{fragment}`")]
    UnsupportedCommand { fragment: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn syntax(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            fragment: fragment.into(),
        }
    }

    pub fn missing_braces(fragment: impl Into<String>) -> Self {
        Self::MissingBraces {
            fragment: fragment.into(),
        }
    }

    pub fn invalid_regex(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn invalid_line_number(fragment: impl Into<String>) -> Self {
        Self::InvalidLineNumber {
            fragment: fragment.into(),
        }
    }

    pub fn invalid_field(fragment: impl Into<String>) -> Self {
        Self::InvalidField {
            fragment: fragment.into(),
        }
    }

    pub fn unsupported_statement(fragment: impl Into<String>) -> Self {
        Self::UnsupportedStatement {
            fragment: fragment.into(),
        }
    }

    pub fn unsupported_command(fragment: impl Into<String>) -> Self {
        Self::UnsupportedCommand {
            fragment: fragment.into(),
        }
    }

    /// True for errors raised while compiling program text, as opposed to
    /// failures while reading input or writing output.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Result type alias for pawk operations
pub type Result<T> = std::result::Result<T, Error>;
