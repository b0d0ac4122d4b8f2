#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal render engine
//!
//! An escape-time fractal colors each pixel of an image by iterating
//! a recurrence from the complex-plane point under that pixel, and
//! asking how many steps the orbit took to leave a disc of a given
//! radius.  Points whose orbits never leave within the iteration cap
//! are members of the set and get a dedicated color; everything else
//! is colored from the iteration count and final iterate by a
//! pluggable strategy.
//!
//! The crate is organized as a small pipeline.  A [`PlaneMapper`]
//! relates pixels to points.  [`make_contexts`] partitions an output
//! buffer into disjoint horizontal bands, resolving the requested
//! escape algorithm and color strategy by name as it goes.  [`render()`]
//! then drains the bands through a fixed-size worker pool, honoring a
//! cancellation signal the caller holds the other end of.  Because
//! every band is a separately borrowed slice of the one buffer, the
//! workers share it without a single lock around the pixels.

pub mod colors;
pub mod context;
pub mod errors;
pub mod escapes;
pub mod planes;
pub mod render;

pub use crate::colors::{Color, ColorFn};
pub use crate::context::{make_contexts, Parameters, RenderContext};
pub use crate::errors::Error;
pub use crate::escapes::EscapeFn;
pub use crate::planes::{Pixel, PlaneMapper};
pub use crate::render::render;
