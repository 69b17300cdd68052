//! Error types for hookscope

use thiserror::Error;

/// Result type alias for hookscope operations
pub type HookScopeResult<T> = Result<T, HookScopeError>;

/// Errors raised by the fallible parts of the API.
///
/// Registration never fails. Meta access fails when typed access to a
/// dynamic [`MetaMap`](crate::MetaMap) does not decode, or when the meta is
/// already borrowed by an enclosing [`update_meta`](crate::HooksContext::update_meta).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookScopeError {
    /// A meta field exists but does not decode into the requested type
    #[error("Meta decode error: {field}: {message}")]
    MetaDecode { field: String, message: String },

    /// A value could not be stored as a meta field
    #[error("Meta encode error: {field}: {message}")]
    MetaEncode { field: String, message: String },

    /// A meta seed that is not a map of named fields
    #[error("Invalid meta: {0}")]
    InvalidMeta(String),

    /// The current frame's meta is already borrowed
    #[error("Meta busy: {context}: meta is already borrowed")]
    MetaBusy { context: String },
}

impl HookScopeError {
    /// Create a new meta decode error
    pub fn meta_decode(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetaDecode {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new meta encode error
    pub fn meta_encode(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetaEncode {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid meta error
    pub fn invalid_meta(message: impl Into<String>) -> Self {
        Self::InvalidMeta(message.into())
    }

    /// Create a new meta busy error
    pub fn meta_busy(context: impl Into<String>) -> Self {
        Self::MetaBusy {
            context: context.into(),
        }
    }

    /// Name of the meta field involved, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MetaDecode { field, .. } | Self::MetaEncode { field, .. } => Some(field),
            Self::InvalidMeta(_) | Self::MetaBusy { .. } => None,
        }
    }
}
