// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The color strategy table.  Each entry is a pure function from the
//! outcome of an escape loop to a 16-bit-per-channel RGBA color.
//! Every strategy obeys one universal rule: a point that reached the
//! iteration cap is a member of the set and is painted the member
//! color, no matter what the rest of the palette would say.
//!
//! Strategies must stay allocation-free and safe to call from any
//! number of worker threads at once; they read nothing but their
//! arguments.

use num::Complex;
use std::f64::consts::PI;

use crate::errors::Error;

/// A 16-bit-per-channel, non-premultiplied RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u16,
    /// Green.
    pub g: u16,
    /// Blue.
    pub b: u16,
    /// Alpha.
    pub a: u16,
}

/// The accent used by the striped palettes.
pub const ACCENT: Color = Color { r: 0, g: 0xa000, b: 0xc000, a: 0xffff };
/// Opaque white.
pub const WHITE: Color = Color { r: 0xffff, g: 0xffff, b: 0xffff, a: 0xffff };
/// Opaque black.
pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 0xffff };
/// Opaque red.
pub const RED: Color = Color { r: 0xffff, g: 0, b: 0, a: 0xffff };
/// Opaque yellow.
pub const YELLOW: Color = Color { r: 0xffff, g: 0xffff, b: 0, a: 0xffff };
/// Opaque green.
pub const GREEN: Color = Color { r: 0, g: 0xffff, b: 0, a: 0xffff };
/// Opaque cyan.
pub const CYAN: Color = Color { r: 0, g: 0xffff, b: 0xffff, a: 0xffff };
/// Opaque blue.
pub const BLUE: Color = Color { r: 0, g: 0, b: 0xffff, a: 0xffff };
/// Opaque magenta.
pub const MAGENTA: Color = Color { r: 0xffff, g: 0, b: 0xffff, a: 0xffff };

/// The shared signature of every color strategy: final iterate,
/// iteration count, iteration cap, exponent, escape radius, member
/// color, producing the pixel color.
pub type ColorFn = fn(Complex<f64>, usize, usize, i32, f64, Color) -> Color;

/// The angle divisor for the smooth palette.  It kind of looks like
/// the bands ramp but doesn't quite match; the 4.75 is an empirical
/// guess with no stated derivation, carried over as-is.
const SMOOTH_ANGLE_DIVISOR: f64 = 4.75;

/// Resolve a strategy name into a table entry.  Unknown names fail
/// here, at configuration time, so the render loops never dispatch by
/// string.
pub fn from_name(name: &str) -> Result<ColorFn, Error> {
    match name {
        "smooth" => Ok(smooth),
        "bands" => Ok(bands),
        "mono" => Ok(mono),
        "stripe" => Ok(stripe),
        "parti" => Ok(parti),
        "superparti" => Ok(superparti),
        "check" => Ok(check),
        "softspectrum" => Ok(softspectrum),
        "fire" => Ok(fire),
        "ice" => Ok(ice),
        "unicornrainbow" => Ok(unicornrainbow),
        "e1" => Ok(experiment1),
        _ => Err(Error::UnknownColorStrategy {
            name: name.to_string(),
        }),
    }
}

/// Parse a `#rrggbb` literal into an opaque Color, widening each
/// 8-bit channel to 16 bits.
pub fn member_from_hex(literal: &str) -> Result<Color, Error> {
    let bad = || Error::BadMemberColor {
        literal: literal.to_string(),
    };

    let digits = literal.strip_prefix('#').ok_or_else(bad)?;
    if digits.len() != 6 {
        return Err(bad());
    }
    let mc = u32::from_str_radix(digits, 16).map_err(|_| bad())?;

    Ok(Color {
        r: (((mc >> 16) & 0xff) * 0x101) as u16,
        g: (((mc >> 8) & 0xff) * 0x101) as u16,
        b: ((mc & 0xff) * 0x101) as u16,
        a: 0xffff,
    })
}

/// Map [-1.0, 1.0] onto the u16 range.
#[inline]
fn centered_u16(n: f64) -> u16 {
    (n * 32767.0 + 32767.0 + 0.5) as u16
}

/// Map [0.0, 1.0] onto the u16 range.
#[inline]
fn full_u16(n: f64) -> u16 {
    (n * 65535.0 + 0.5) as u16
}

/// The smoothed ("fractional") iteration count, j = i + 1 - nu, with
/// nu derived from log(log|z|) / log(power).  Degenerate iterates
/// (zero modulus, power 1 and below) produce non-finite intermediates;
/// those collapse to the plain count so every input yields a finite
/// value.
#[inline]
fn fractional_count(z: Complex<f64>, i: usize, power: i32) -> f64 {
    let p = f64::from(power);
    let log_zn = (z.re * z.re + z.im * z.im).ln() / 2.0;
    let nu = (log_zn / p.ln()).ln() / p.ln();
    if nu.is_finite() {
        (i as f64) + 1.0 - nu
    } else {
        (i as f64) + 1.0
    }
}

/// Convert an HCL color (hue in [0, 1], chroma, luminance) plus alpha
/// to RGBA.  This follows the Lab-space HCL with a D65 white point
/// that the original palettes were tuned against, clamping the result
/// into gamut.
fn hcla(h: f64, c: f64, l: f64, a: f64) -> Color {
    let hr = (h * 360.0).to_radians();
    let (lab_l, lab_a, lab_b) = (l, c * hr.cos(), c * hr.sin());

    // Lab to XYZ.
    let finv = |t: f64| {
        let delta = 6.0 / 29.0;
        if t > delta {
            t * t * t
        } else {
            3.0 * delta * delta * (t - 4.0 / 29.0)
        }
    };
    let fy = (lab_l + 0.16) / 1.16;
    let fx = fy + lab_a / 5.0;
    let fz = fy - lab_b / 2.0;
    let (x, y, z) = (0.95047 * finv(fx), finv(fy), 1.08883 * finv(fz));

    // XYZ to linear sRGB.
    let lr = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let lg = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let lb = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    // Gamma, then clamp into gamut.
    let srgb = |v: f64| {
        let v = if v <= 0.003_130_8 {
            12.92 * v
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        };
        num::clamp(v, 0.0, 1.0)
    };

    Color {
        r: full_u16(srgb(lr)),
        g: full_u16(srgb(lg)),
        b: full_u16(srgb(lb)),
        a: full_u16(num::clamp(a, 0.0, 1.0)),
    }
}

/// Alternate white and black by iteration-count parity.
pub fn mono(_z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    if i & 1 == 0 {
        WHITE
    } else {
        BLACK
    }
}

/// As `mono`, but every ninth band is painted with the accent.
pub fn stripe(_z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    if i % 9 == 1 {
        return ACCENT;
    }

    if i & 1 == 0 {
        WHITE
    } else {
        BLACK
    }
}

/// A continuous sine ramp over the normalized iteration count.
pub fn bands(_z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let t = ((max_i as f64) / PI) * ((i as f64) / (max_i as f64));

    Color {
        r: centered_u16((PI + t).sin()),
        g: centered_u16((PI + 0.25 * PI + t).sin()),
        b: centered_u16((PI + t).cos()),
        a: 0xffff,
    }
}

/// The `bands` ramp driven by the fractional iteration count, which
/// removes the banding artifacts.
pub fn smooth(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let j = fractional_count(z, i, power);
    let t = (PI / (SMOOTH_ANGLE_DIVISOR * f64::from(power))) * j;

    Color {
        r: centered_u16((PI + t).sin()),
        g: centered_u16((PI + 0.25 * PI + t).sin()),
        b: centered_u16((PI + t).cos()),
        a: 0xffff,
    }
}

/// Binary color by the sign of the final iterate's phase angle.
pub fn check(z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    if z.arg() >= 0.0 {
        WHITE
    } else {
        BLACK
    }
}

/// Discrete color bands by phase-angle quadrant.
pub fn parti(z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let p = z.arg();
    if p > PI / 2.0 {
        WHITE
    } else if p >= 0.0 {
        BLUE
    } else if p > -PI / 2.0 {
        RED
    } else {
        BLACK
    }
}

/// Discrete color bands by phase-angle octant.
pub fn superparti(z: Complex<f64>, i: usize, max_i: usize, _power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let p = z.arg();
    if p > 3.0 * PI / 4.0 {
        WHITE
    } else if p > PI / 2.0 {
        RED
    } else if p > PI / 4.0 {
        YELLOW
    } else if p >= 0.0 {
        GREEN
    } else if p > -PI / 4.0 {
        CYAN
    } else if p > -PI / 2.0 {
        BLUE
    } else if p > -3.0 * PI / 4.0 {
        MAGENTA
    } else {
        BLACK
    }
}

/// A muted full-spectrum ramp in HCL space over the fractional count.
pub fn softspectrum(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let j = fractional_count(z, i, power);
    let h = 0.5 + 0.5 * (0.125 * PI * j).sin();
    let c = 0.5 + 0.333 * (0.0625 * PI * j).sin();
    let l = 0.5 + 0.333 * (0.03125 * PI * j).sin();

    hcla(h, c, l, 1.0)
}

/// A single-hue HCL ramp over the fractional count; the base of the
/// `fire` and `ice` palettes.
fn smooth_mono(z: Complex<f64>, i: usize, max_i: usize, power: i32, member: Color, hue: f64) -> Color {
    if i == max_i {
        return member;
    }

    let j = fractional_count(z, i, power);
    let c = 0.5 + 0.5 * (0.0625 * PI * j).sin();
    let l = 0.5 + 0.5 * (0.03125 * PI * j).sin();

    hcla(hue, c, l, 1.0)
}

/// `smooth_mono` at an ember hue.
pub fn fire(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    smooth_mono(z, i, max_i, power, member, 0.15)
}

/// `smooth_mono` at a glacial hue.
pub fn ice(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    smooth_mono(z, i, max_i, power, member, 0.6)
}

/// A saturated rainbow with a pulsing luminance.
pub fn unicornrainbow(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    let j = fractional_count(z, i, power);
    let h = 0.5 + 0.5 * (0.125 * PI * j).sin();
    let l = 0.8 + 0.2 * (0.5 * PI * j).sin().powi(8);

    hcla(h, 1.0, l, 1.0)
}

/// A rainbow ramp interrupted by black every third band.
pub fn experiment1(z: Complex<f64>, i: usize, max_i: usize, power: i32, _radius: f64, member: Color) -> Color {
    if i == max_i {
        return member;
    }

    if i % 3 == 1 {
        return BLACK;
    }

    let j = fractional_count(z, i, power);
    let h = 0.5 + 0.5 * (0.125 * PI * j).sin();

    hcla(h, 1.0, 0.6, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_I: usize = 1000;
    const RADIUS: f64 = 4.0;
    const MEMBER: Color = Color { r: 0x1212, g: 0x3434, b: 0x5656, a: 0xffff };

    fn all_strategies() -> Vec<(&'static str, ColorFn)> {
        [
            "smooth",
            "bands",
            "mono",
            "stripe",
            "parti",
            "superparti",
            "check",
            "softspectrum",
            "fire",
            "ice",
            "unicornrainbow",
            "e1",
        ]
        .iter()
        .map(|name| (*name, from_name(name).unwrap()))
        .collect()
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            from_name("plaid").unwrap_err(),
            Error::UnknownColorStrategy {
                name: "plaid".to_string()
            }
        );
    }

    #[test]
    fn members_always_get_the_member_color() {
        // Regardless of strategy or final iterate.
        let iterates = [
            Complex::new(0.0, 0.0),
            Complex::new(1.0e9, -1.0e9),
            Complex::new(-0.5, 0.25),
        ];
        for (name, strategy) in all_strategies() {
            for z in iterates.iter() {
                assert_eq!(
                    strategy(*z, MAX_I, MAX_I, 2, RADIUS, MEMBER),
                    MEMBER,
                    "strategy {} ignored the member color",
                    name
                );
            }
        }
    }

    #[test]
    fn every_strategy_is_finite_on_degenerate_iterates() {
        // A zero iterate drives the smoothing logarithms non-finite;
        // the result must still be a real color.
        let z = Complex::new(0.0, 0.0);
        for (name, strategy) in all_strategies() {
            let k = strategy(z, 3, MAX_I, 2, RADIUS, MEMBER);
            assert_eq!(k.a, 0xffff, "strategy {} lost its alpha", name);
        }
    }

    #[test]
    fn mono_alternates_by_parity() {
        let z = Complex::new(1.0, 1.0);
        assert_eq!(mono(z, 0, MAX_I, 2, RADIUS, MEMBER), WHITE);
        assert_eq!(mono(z, 1, MAX_I, 2, RADIUS, MEMBER), BLACK);
        assert_eq!(mono(z, 2, MAX_I, 2, RADIUS, MEMBER), WHITE);
    }

    #[test]
    fn stripe_accents_every_ninth_band() {
        let z = Complex::new(1.0, 1.0);
        assert_eq!(stripe(z, 1, MAX_I, 2, RADIUS, MEMBER), ACCENT);
        assert_eq!(stripe(z, 10, MAX_I, 2, RADIUS, MEMBER), ACCENT);
        assert_eq!(stripe(z, 19, MAX_I, 2, RADIUS, MEMBER), ACCENT);
        // Between accents it falls back to parity.
        assert_eq!(stripe(z, 0, MAX_I, 2, RADIUS, MEMBER), WHITE);
        assert_eq!(stripe(z, 9, MAX_I, 2, RADIUS, MEMBER), BLACK);
    }

    #[test]
    fn check_splits_on_phase_sign() {
        assert_eq!(
            check(Complex::new(1.0, 1.0), 5, MAX_I, 2, RADIUS, MEMBER),
            WHITE
        );
        assert_eq!(
            check(Complex::new(1.0, -1.0), 5, MAX_I, 2, RADIUS, MEMBER),
            BLACK
        );
    }

    #[test]
    fn parti_covers_all_quadrants() {
        let cases = [
            (Complex::new(-1.0, 1.0), WHITE),
            (Complex::new(1.0, 1.0), BLUE),
            (Complex::new(1.0, -1.0), RED),
            (Complex::new(-1.0, -1.0), BLACK),
        ];
        for (z, want) in cases.iter() {
            assert_eq!(parti(*z, 5, MAX_I, 2, RADIUS, MEMBER), *want);
        }
    }

    #[test]
    fn superparti_covers_all_octants() {
        let octant = |deg: f64| Complex::from_polar(&1.0, &deg.to_radians());
        let cases = [
            (157.5, WHITE),
            (112.5, RED),
            (67.5, YELLOW),
            (22.5, GREEN),
            (-22.5, CYAN),
            (-67.5, BLUE),
            (-112.5, MAGENTA),
            (-157.5, BLACK),
        ];
        for (deg, want) in cases.iter() {
            assert_eq!(superparti(octant(*deg), 5, MAX_I, 2, RADIUS, MEMBER), *want);
        }
    }

    #[test]
    fn member_from_hex_widens_channels() {
        assert_eq!(member_from_hex("#000000").unwrap(), BLACK);
        assert_eq!(member_from_hex("#ffffff").unwrap(), WHITE);
        assert_eq!(
            member_from_hex("#ff8000").unwrap(),
            Color { r: 0xffff, g: 0x8080, b: 0x0000, a: 0xffff }
        );
    }

    #[test]
    fn member_from_hex_rejects_garbage() {
        for literal in ["000000", "#00", "#ggg000", "#0000000", ""].iter() {
            assert_eq!(
                member_from_hex(literal).unwrap_err(),
                Error::BadMemberColor {
                    literal: literal.to_string()
                }
            );
        }
    }

    #[test]
    fn hcla_is_clamped_into_gamut() {
        // Deliberately out-of-gamut chroma still yields a color.
        let k = hcla(0.99, 5.0, 1.2, 2.0);
        assert_eq!(k.a, 0xffff);

        // Zero luminance is black-ish regardless of hue.
        let k = hcla(0.3, 0.0, 0.0, 1.0);
        assert!(k.r < 0x0200 && k.g < 0x0200 && k.b < 0x0200);
    }
}
