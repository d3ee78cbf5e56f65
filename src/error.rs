//! Failure taxonomy for the window-level navigation surface.

use thiserror::Error;

/// Errors surfaced by navigation operations.
///
/// Interrupted transitions are deliberately not represented here: a
/// transition cancelled by teardown still settles its promise with a
/// defined result instead of failing the caller.
#[derive(Debug, Error)]
pub enum NavError {
    /// The operation needs a dedicated navigation container; the
    /// window-level surface only manages a single root plus its modal
    /// stack, and faking deeper support would desynchronize the logical
    /// stack from what is displayed.
    #[error(
        "{operation} is not supported on the window-level navigation surface, use a dedicated navigation container"
    )]
    Unsupported { operation: &'static str },

    /// The platform has been torn down; no further navigation is possible.
    #[error("navigation platform has been disposed")]
    Disposed,
}

impl NavError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        NavError::Unsupported { operation }
    }
}
