//! Error types for pgnamed

use thiserror::Error;

/// Result type alias for pgnamed operations
pub type QbResult<T> = Result<T, QbError>;

/// Problems reported by [`NamedQb::validate`](crate::NamedQb::validate).
///
/// Building and rendering never fail; these only come from the opt-in checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// A `:name` placeholder is present in the SQL but no parameter is bound to it
    #[error("Unbound placeholder: :{0}")]
    UnboundPlaceholder(String),

    /// A parameter is bound but no `:name` placeholder references it
    #[error("Unused parameter: {0}")]
    UnusedParam(String),

    /// A parameter name that can never match a placeholder token
    #[error("Invalid parameter name: '{0}'")]
    InvalidParamName(String),

    /// A required clause (SELECT or FROM) is empty
    #[error("Empty {0} clause")]
    EmptyClause(&'static str),
}

impl QbError {
    /// Create an unbound placeholder error
    pub fn unbound(name: impl Into<String>) -> Self {
        Self::UnboundPlaceholder(name.into())
    }

    /// Create an unused parameter error
    pub fn unused(name: impl Into<String>) -> Self {
        Self::UnusedParam(name.into())
    }

    /// Check if this is an unbound placeholder error
    pub fn is_unbound_placeholder(&self) -> bool {
        matches!(self, Self::UnboundPlaceholder(_))
    }

    /// Check if this is an unused parameter error
    pub fn is_unused_param(&self) -> bool {
        matches!(self, Self::UnusedParam(_))
    }

    /// The parameter or placeholder name this error refers to, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::UnboundPlaceholder(name)
            | Self::UnusedParam(name)
            | Self::InvalidParamName(name) => Some(name),
            Self::EmptyClause(_) => None,
        }
    }
}
