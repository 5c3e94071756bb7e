// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    /// Locale data for `code` could not be read or parsed.
    Locale { code: String, message: String },
    /// No translation for the key path in the active tree, the fallback tree,
    /// or the caller-provided fallback text.
    MissingTranslation(String),
}

impl Error {
    /// Wraps any displayable failure as a locale load error for `code`.
    pub fn locale(code: impl Into<String>, err: impl fmt::Display) -> Self {
        Error::Locale {
            code: code.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Locale { code, message } => {
                write!(f, "Locale Error ({}): {}", code, message)
            }
            Error::MissingTranslation(path) => {
                write!(f, "Can't find translation for {}", path)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
