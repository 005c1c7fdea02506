//! Crate-wide error taxonomy.
//!
//! Every failure in this crate is a synchronous, non-retryable validation
//! error: there is no I/O anywhere in the core, so once inputs have been
//! accepted the remaining arithmetic cannot fail. Each public operation
//! validates its inputs up front and returns before touching any canvas, so
//! a failed call never leaves a partially decorated image behind.

use crate::raster::RasterError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A hex color string was not 3 or 6 hex digits (leading `#` optional).
    #[error("invalid color format {0:?}: expected 3 or 6 hex digits")]
    InvalidColorFormat(String),

    /// A source or target dimension was zero, or a layout was degenerate.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A position string was not one of the nine compass anchors.
    #[error("unsupported position {0:?}: expected one of t, tr, r, br, b, bl, l, tl, c")]
    UnsupportedPosition(String),

    /// An alignment string was not `left`, `center` or `right`.
    #[error("unsupported alignment {0:?}: expected left, center or right")]
    UnsupportedAlignment(String),

    /// The raster engine rejected an operation.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
