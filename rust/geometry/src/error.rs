// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or re-mapping geometry
///
/// Construction functions fail with one of these; query predicates such as
/// [`crate::vector::point_in_polygon`] return `false` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Empty, non-finite or otherwise malformed input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Wrong point count, degenerate geometry or missing face/UV data
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Error::PreconditionViolation(msg.into())
    }
}
