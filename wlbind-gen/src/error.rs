//! Error types for schema loading and code generation.
//!
//! Every error aborts generation of the current artifact. Nothing is ever
//! emitted partially: the emitters build the whole artifact in memory and
//! only return it once every interface has been rendered.

use thiserror::Error;

/// Result type alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Error raised while building the schema model or emitting bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A required node or attribute is missing or unusable.
    #[error("Malformed schema at {location}: {message}")]
    MalformedSchema {
        /// Path to the offending node, e.g. `wl_shm.create_pool.fd`.
        location: String,
        /// What is wrong with it.
        message: String,
    },

    /// An argument uses a type the mapper does not handle.
    #[error("Unsupported argument kind '{kind}' for argument '{argument}' of {interface}.{message}")]
    UnsupportedArgumentKind {
        /// The offending type tag as written in the schema.
        kind: String,
        /// Enclosing interface.
        interface: String,
        /// Enclosing request or event.
        message: String,
        /// Argument name.
        argument: String,
    },

    /// A native symbol or generated member name cannot be derived.
    #[error("Naming convention violation for '{symbol}' in {interface}: {reason}")]
    NamingConventionViolation {
        /// Enclosing interface.
        interface: String,
        /// The symbol or member that cannot be derived.
        symbol: String,
        /// Why it cannot be derived.
        reason: String,
    },
}

impl GenError {
    /// Create a malformed schema error.
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSchema {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported argument kind error.
    pub fn unsupported_kind(
        kind: impl Into<String>,
        interface: impl Into<String>,
        message: impl Into<String>,
        argument: impl Into<String>,
    ) -> Self {
        Self::UnsupportedArgumentKind {
            kind: kind.into(),
            interface: interface.into(),
            message: message.into(),
            argument: argument.into(),
        }
    }

    /// Create a naming convention violation.
    pub fn naming(
        interface: impl Into<String>,
        symbol: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::NamingConventionViolation {
            interface: interface.into(),
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error category.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedSchema { .. } => "malformed-schema",
            Self::UnsupportedArgumentKind { .. } => "unsupported-argument-kind",
            Self::NamingConventionViolation { .. } => "naming-convention-violation",
        }
    }
}
