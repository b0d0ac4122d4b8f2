// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters, the render context (the unit of parallel
//! work), and the partitioner that splits one output image into
//! disjoint contexts.
//!
//! A context owns a full-width horizontal band of the output buffer.
//! Bands are carved with `split_at_mut`, so the property that no two
//! contexts can touch the same pixel is enforced by the borrow
//! checker rather than by locks.

use itertools::iproduct;
use num::Complex;

use crate::colors::{self, Color, ColorFn};
use crate::errors::Error;
use crate::escapes::{self, EscapeFn};
use crate::planes::{Pixel, PlaneMapper};

/// Everything a render request needs.  Built once per render, never
/// mutated, shared by reference across all contexts.
#[derive(Clone, Debug)]
pub struct Parameters {
    /// The left-lower corner of the complex window.
    pub plane_min: Complex<f64>,
    /// The right-upper corner of the complex window.
    pub plane_max: Complex<f64>,
    /// Width of the render target, possibly supersampled.
    pub image_width: usize,
    /// Height of the render target, possibly supersampled.
    pub image_height: usize,
    /// Final width after the caller's downscale.  Unused by the
    /// engine itself.
    pub output_width: u32,
    /// Final height after the caller's downscale.  Unused by the
    /// engine itself.
    pub output_height: u32,
    /// The iteration cap.
    pub max_iterations: usize,
    /// Modulus at which a point counts as escaped.
    pub escape_radius: f64,
    /// The integer exponent of the recurrence; values at or below
    /// zero are treated as 2.
    pub power: i32,
    /// Name of the escape algorithm, resolved by the partitioner.
    pub escape_algorithm: String,
    /// Name of the color strategy, resolved by the partitioner.
    pub color_strategy: String,
    /// `#rrggbb` literal for points that never escape.
    pub member_color: String,
}

/// One partition's worth of work: a band of the output buffer plus
/// everything needed to fill it.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The image row this band starts at.
    pub y_offset: usize,
    /// The band's pixels, row-major, `rows * image_width` long.
    pub band: &'a mut [Color],
    /// Pixel-to-plane mapping for the whole image.
    pub plane: PlaneMapper,
    /// The resolved escape algorithm.
    pub escape: EscapeFn,
    /// The resolved color strategy.
    pub color: ColorFn,
    /// The parsed member color.
    pub member_color: Color,
    /// The request this context belongs to.
    pub params: &'a Parameters,
}

impl<'a> RenderContext<'a> {
    /// The number of full rows in this band.  Empty bands come out of
    /// degenerate partitions and render as no-ops.
    pub fn rows(&self) -> usize {
        self.band.len() / self.params.image_width
    }

    /// Run the escape/color loop over every pixel in the band, in
    /// row-major order.  This is the whole of a worker's job.
    pub fn render_band(&mut self) {
        let width = self.params.image_width;
        let max_i = self.params.max_iterations;

        for (y, x) in iproduct!(0..self.rows(), 0..width) {
            let z0 = self.plane.pixel_to_point(&Pixel(x, self.y_offset + y));
            let (i, zn) = (self.escape)(z0, max_i, self.params.power, self.params.escape_radius);
            self.band[y * width + x] = (self.color)(
                zn,
                i,
                max_i,
                self.params.power,
                self.params.escape_radius,
                self.member_color,
            );
        }
    }
}

/// Split an output buffer into exactly `threads` disjoint contexts
/// that cover it: even division by horizontal bands, with the last
/// band absorbing the remainder rows.  Resolves the algorithm and
/// strategy names and the member color up front, so a bad request
/// fails here and never reaches a worker.
pub fn make_contexts<'a>(
    buffer: &'a mut [Color],
    threads: usize,
    params: &'a Parameters,
) -> Result<Vec<RenderContext<'a>>, Error> {
    let escape = escapes::from_name(&params.escape_algorithm)?;
    let color = colors::from_name(&params.color_strategy)?;
    let member_color = colors::member_from_hex(&params.member_color)?;
    let plane = PlaneMapper::new(
        params.image_width,
        params.image_height,
        params.plane_min,
        params.plane_max,
    )?;

    assert_eq!(buffer.len(), plane.len());

    let threads = threads.max(1);
    let base = params.image_height / threads;

    let mut contexts = Vec::with_capacity(threads);
    let mut rest = buffer;
    for k in 0..threads {
        let rows = if k + 1 == threads {
            params.image_height - base * k
        } else {
            base
        };

        let tmp = std::mem::replace(&mut rest, &mut []);
        let (band, tail) = tmp.split_at_mut(rows * params.image_width);
        rest = tail;

        contexts.push(RenderContext {
            y_offset: base * k,
            band,
            plane,
            escape,
            color,
            member_color,
            params,
        });
    }

    Ok(contexts)
}
