// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape algorithm table.  Each entry is a pure function that
//! iterates a recurrence from a starting point on the complex plane
//! and reports how many steps the orbit took to leave the disc of the
//! escape radius, along with the final iterate.  Points whose orbits
//! never leave within the iteration cap report the cap itself; those
//! are the members of the set.
//!
//! All variants share one loop skeleton: raise the iterate to the
//! integer `power` by repeated multiplication (a general complex
//! `pow` is far slower and less deterministic), recombine with the
//! starting point in the variant's own way, then short-circuit on
//! period-1 fixed points before testing for escape or the cap.

use num::Complex;
use std::f64::consts::PI;

use crate::errors::Error;

/// The shared signature of every escape algorithm: starting point,
/// iteration cap, exponent, escape radius, producing the iteration
/// count and the final iterate.
pub type EscapeFn = fn(Complex<f64>, usize, i32, f64) -> (usize, Complex<f64>);

/// The angle, about the origin, by which the `experimental` variant
/// rotates the power term before recombining.  Chosen by eye.
const EXPERIMENTAL_ROTATION: f64 = 0.25 * PI;

/// Resolve an algorithm name into a table entry.  Unknown names fail
/// here, at configuration time, so the render loops never dispatch by
/// string.
pub fn from_name(name: &str) -> Result<EscapeFn, Error> {
    match name {
        "mandelbrot" => Ok(mandelbrot),
        "ebrot" => Ok(ebrot),
        "experimental" => Ok(experimental),
        _ => Err(Error::UnknownEscapeAlgorithm {
            name: name.to_string(),
        }),
    }
}

/// Raise z to an integer power by repeated multiplication.  Exponents
/// of 1 and below 1 have already been normalized away by the callers.
#[inline]
fn int_pow(z: Complex<f64>, power: i32) -> Complex<f64> {
    let t = z;
    let mut z = z;
    for _ in 0..power - 1 {
        z = z * t;
    }
    z
}

/// Exponents at or below zero fall back to the classical square.
#[inline]
fn normalize_power(power: i32) -> i32 {
    if power <= 0 {
        2
    } else {
        power
    }
}

/// The classical recurrence: z ← z^power + z0.
pub fn mandelbrot(
    z0: Complex<f64>,
    max_iterations: usize,
    power: i32,
    escape_radius: f64,
) -> (usize, Complex<f64>) {
    let p = normalize_power(power);
    let mut z = z0;
    let mut zn = Complex::new(0.0, 0.0);
    let mut i = 0;

    loop {
        z = int_pow(z, p) + z0;

        // A period-1 orbit will never escape; report membership now
        // rather than spinning out the rest of the cap.
        if zn == z {
            return (max_iterations, z);
        }
        zn = z;

        if z.norm() >= escape_radius || i == max_iterations {
            return (i, z);
        }

        i += 1;
    }
}

/// The exponential map: z ← e^(z^power + z0).
pub fn ebrot(
    z0: Complex<f64>,
    max_iterations: usize,
    power: i32,
    escape_radius: f64,
) -> (usize, Complex<f64>) {
    let p = normalize_power(power);
    let mut z = z0;
    let mut zn = Complex::new(0.0, 0.0);
    let mut i = 0;

    loop {
        z = (int_pow(z, p) + z0).exp();

        if zn == z {
            return (max_iterations, z);
        }
        zn = z;

        if z.norm() >= escape_radius || i == max_iterations {
            return (i, z);
        }

        i += 1;
    }
}

/// As `mandelbrot`, but the power term is rotated a fixed angle about
/// the origin before the starting point is added back in.
pub fn experimental(
    z0: Complex<f64>,
    max_iterations: usize,
    power: i32,
    escape_radius: f64,
) -> (usize, Complex<f64>) {
    let p = normalize_power(power);
    let mut z = z0;
    let mut zn = Complex::new(0.0, 0.0);
    let mut i = 0;

    loop {
        let (r, theta) = int_pow(z, p).to_polar();
        z = Complex::from_polar(&r, &(theta + EXPERIMENTAL_ROTATION)) + z0;

        if zn == z {
            return (max_iterations, z);
        }
        zn = z;

        if z.norm() >= escape_radius || i == max_iterations {
            return (i, z);
        }

        i += 1;
    }
}
