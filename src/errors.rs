// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error taxonomy for the renderer.  Everything here is either a
//! configuration problem caught before any worker spawns, or the one
//! expected runtime outcome that isn't success: cancellation.

use failure::Fail;

/// Errors a render request can produce.  The configuration variants
/// are all raised while resolving names and building contexts, never
/// from inside the per-pixel loops, which are infallible.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The requested escape algorithm name has no table entry.
    #[fail(display = "unknown escape algorithm: {:?}", name)]
    UnknownEscapeAlgorithm {
        /// The name that failed to resolve.
        name: String,
    },

    /// The requested color strategy name has no table entry.
    #[fail(display = "unknown color strategy: {:?}", name)]
    UnknownColorStrategy {
        /// The name that failed to resolve.
        name: String,
    },

    /// The member color literal was not of the form `#rrggbb`.
    #[fail(display = "bad member color literal: {:?}", literal)]
    BadMemberColor {
        /// The literal that failed to parse.
        literal: String,
    },

    /// The plane window's minimum corner does not lie strictly left
    /// of and below its maximum corner.
    #[fail(display = "plane minimum must lie left of and below plane maximum")]
    DegeneratePlane,

    /// One or both image dimensions were zero.
    #[fail(display = "image dimensions must be positive")]
    EmptyImage,

    /// The render was aborted through the cancellation signal.  The
    /// output buffer is partially written and must be discarded.
    #[fail(display = "render cancelled")]
    Cancelled,
}
