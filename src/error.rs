//! Error types.
//!
//! Rendering never fails: unknown tags and malformed persisted payloads fall
//! back to defaults. Errors only surface at the persistence boundary and when
//! producing bitmaps.

use crate::store::UserId;

pub type AvatarResult<T> = Result<T, AvatarError>;

/// Failures reported by an [`AvatarStore`](crate::store::AvatarStore).
///
/// Both variants are recoverable: the editor keeps its working copy so the
/// user can retry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("avatar store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    #[error("invalid avatar configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("persistence error: {0}")]
    Store(#[from] StoreError),

    #[error("rasterization error: {0}")]
    Raster(String),
}

impl AvatarError {
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Returns true if the host may retry the operation that produced this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        let err = AvatarError::from(StoreError::NotFound(UserId(7)));
        assert_eq!(err.to_string(), "persistence error: user 7 not found");

        assert!(
            AvatarError::raster("x")
                .to_string()
                .contains("rasterization error:")
        );

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(
            AvatarError::from(parse)
                .to_string()
                .starts_with("invalid avatar configuration:")
        );
    }

    #[test]
    fn store_failures_are_recoverable() {
        assert!(AvatarError::from(StoreError::unavailable("offline")).is_recoverable());
        assert!(AvatarError::from(StoreError::NotFound(UserId(3))).is_recoverable());
        assert!(!AvatarError::raster("bad svg").is_recoverable());

        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert!(!AvatarError::from(parse).is_recoverable());
    }
}
