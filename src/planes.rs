// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between the integral pixel plane of the output image, with its
//! origin at 0,0, and a window on the complex plane bounded by an
//! arbitrary pair of corners.

use num::Complex;

use crate::errors::Error;

/// The x, y of a point on the integral pixel plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a width × height image onto the rectangle of the
/// complex plane bounded by `min` (left-lower) and `max`
/// (right-upper), sampling each pixel at its center.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    min: Complex<f64>,
    // The complex-plane span of a single pixel in each axis.
    step: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the pixel dimensions of the image and the
    /// two corners of the complex window.  Fails if the window is
    /// degenerate or the image is empty.
    pub fn new(
        width: usize,
        height: usize,
        min: Complex<f64>,
        max: Complex<f64>,
    ) -> Result<PlaneMapper, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }

        if max.re <= min.re || max.im <= min.im {
            return Err(Error::DegeneratePlane);
        }

        let step = (
            (max.re - min.re) / (width as f64),
            (max.im - min.im) / (height as f64),
        );

        Ok(PlaneMapper {
            width,
            height,
            min,
            step,
        })
    }

    /// The total number of pixels in the image.  Used to size the
    /// output buffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the image holds no pixels.  Unreachable through the
    /// constructor; present for slice-like completeness.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral plane, return the complex number
    /// at the center of that pixel's cell.  Pixel (0, 0) maps next to
    /// `min`; pixel (width-1, height-1) maps next to `max`.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.min.re + ((pixel.0 as f64) + 0.5) * self.step.0,
            self.min.im + ((pixel.1 as f64) + 0.5) * self.step.1,
        )
    }
}
