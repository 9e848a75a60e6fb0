//! Share Engine Error Types

use smol_str::SmolStr;
use uuid::Uuid;

/// Errors raised by the share engine.
///
/// Missing profiles and bypasses are not errors; they are recorded on the
/// [`TransitionOutcome`](crate::transition::TransitionOutcome) instead.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Unknown world: {0}")]
    UnknownWorld(SmolStr),

    #[error("Unknown group: {0}")]
    UnknownGroup(SmolStr),

    #[error("Unknown share: {0}")]
    UnknownShare(String),

    #[error("Group name must not be empty")]
    EmptyGroupName,

    #[error("Duplicate group: {0}")]
    DuplicateGroup(SmolStr),

    #[error("Category already registered: {0}")]
    DuplicateCategory(SmolStr),

    #[error("Invalid category name: {0:?}")]
    InvalidCategoryName(String),

    #[error("Request is for player {expected}, but live player is {actual}")]
    PlayerMismatch { expected: Uuid, actual: Uuid },

    #[error("Failed to read groups file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid groups file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShareError {
    /// Whether this error comes from bad configuration (unknown names,
    /// invalid groups) rather than from the request itself.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownWorld(_)
                | Self::UnknownGroup(_)
                | Self::UnknownShare(_)
                | Self::EmptyGroupName
                | Self::DuplicateGroup(_)
                | Self::DuplicateCategory(_)
                | Self::InvalidCategoryName(_)
                | Self::Io(_)
                | Self::Json(_)
        )
    }
}
