//! Error types for the screenset domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; [`AssemblyError`] is the
//! terminal error an assembly call reports to its caller.

use std::fmt;
use thiserror::Error;

/// The terminal error of a single markup assembly call.
///
/// Only fatal failures reach this type. Overlay failures (theme,
/// localization, platform) are absorbed by the engine and never surface here.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Failed to parse {document} document: {source}")]
    Parse {
        document: DocumentKind,
        source: ParseError,
    },

    #[error("Markup asset not available: {name}")]
    MissingBaseAsset { name: String },

    #[error("Remote fetch failed: {0}")]
    RemoteFetch(#[from] RemoteError),

    #[error("Markup validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl AssemblyError {
    /// The coarse kind of this error, for callers that branch on it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::MissingBaseAsset { .. } => ErrorKind::MissingBaseAsset,
            Self::RemoteFetch(_) => ErrorKind::RemoteFetch,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// Discriminant of [`AssemblyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    MissingBaseAsset,
    RemoteFetch,
    Validation,
}

/// Which logical document was being read when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Markup,
    Theme,
    Localization,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markup => "markup",
            Self::Theme => "theme",
            Self::Localization => "localization",
        };
        f.write_str(name)
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed JSON at line {line}, column {column}: {reason}")]
    Syntax {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Syntax {
            line: e.line(),
            column: e.column(),
            reason: e.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to read asset {name}: {reason}")]
    Io { name: String, reason: String },
}

/// Failure of a remote business API call.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authorization failed (code {code}): {message}")]
    Authorization { code: i64, message: String },

    #[error("Server error (code {code}): {message}")]
    Server { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Remote source not configured: {0}")]
    NotConfigured(String),
}

impl RemoteError {
    pub fn kind(&self) -> RemoteErrorKind {
        match self {
            Self::Network(_) => RemoteErrorKind::Network,
            Self::Authorization { .. } => RemoteErrorKind::Authorization,
            Self::Server { .. } => RemoteErrorKind::Server,
            Self::InvalidResponse(_) => RemoteErrorKind::InvalidResponse,
            Self::NotConfigured(_) => RemoteErrorKind::NotConfigured,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    Network,
    Authorization,
    Server,
    InvalidResponse,
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("markup has no routing section")]
    MissingRouting,

    #[error("routing section must be an object")]
    RoutingNotObject,

    #[error("initial route must be provided")]
    MissingInitialRoute,

    #[error("initial route must be a non-empty string")]
    EmptyInitialRoute,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Malformed locale data: {0}")]
    MalformedLocale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_correctly() {
        let err = AssemblyError::RemoteFetch(RemoteError::Server {
            code: 500001,
            message: "General Server Error".into(),
        });
        assert!(err.to_string().contains("500001"));
        assert!(err.to_string().contains("General Server Error"));
        assert_eq!(err.kind(), ErrorKind::RemoteFetch);
    }

    #[test]
    fn parse_error_names_the_document() {
        let err = AssemblyError::Parse {
            document: DocumentKind::Markup,
            source: ParseError::NotAnObject { found: "array" },
        };
        assert!(err.to_string().contains("markup"));
        assert!(err.to_string().contains("array"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn validation_error_converts() {
        let err: AssemblyError = ValidationError::MissingInitialRoute.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("initial route"));
    }

    #[test]
    fn remote_error_kinds() {
        assert_eq!(
            RemoteError::Network("refused".into()).kind(),
            RemoteErrorKind::Network
        );
        assert_eq!(
            RemoteError::Authorization {
                code: 403005,
                message: "Unauthorized user".into()
            }
            .kind(),
            RemoteErrorKind::Authorization
        );
    }
}
