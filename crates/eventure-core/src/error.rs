use thiserror::Error;

/// Failure categories exposed to callers. Transports map these, not the
/// individual variants, onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Auth,
    NotFound,
    Internal,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Cannot send friend request to yourself")]
    SelfRequest,

    #[error("Friend request already sent")]
    DuplicatePending,

    /// Unknown email and wrong password both end up here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No such request, not addressed to the caller, or no longer pending.
    #[error("Friend request not found")]
    RequestNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } => ErrorKind::Validation,
            Self::DuplicateEmail
            | Self::DuplicateUsername
            | Self::SelfRequest
            | Self::DuplicatePending => ErrorKind::Conflict,
            Self::InvalidCredentials => ErrorKind::Auth,
            Self::RequestNotFound | Self::UserNotFound => ErrorKind::NotFound,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject blank input before any state is touched.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(())
}
