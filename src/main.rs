// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The command-line front end.  It plays the caller role the engine
//! expects: it validates the request, allocates the (possibly
//! supersampled) buffer, and after the render it downscales to the
//! output size and encodes a PNG.

use clap::{App, Arg, ArgMatches};
use crossbeam::channel::unbounded;
use image::png::PNGEncoder;
use image::ColorType;
use num::Complex;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use frakt::{colors, make_contexts, render, Parameters};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SUPERSAMPLE: &str = "supersample";
const PLANEMIN: &str = "min";
const PLANEMAX: &str = "max";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const POWER: &str = "power";
const ALGORITHM: &str = "algorithm";
const COLOR: &str = "color";
const MEMBER: &str = "member";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("frakt")
        .version("0.2.0")
        .about("Escape-time fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x800")
                .validator(|s| validate_pair::<u32>(&s, 'x', "Could not parse output image size"))
                .help("Size of the output image"),
        )
        .arg(
            Arg::with_name(SUPERSAMPLE)
                .long(SUPERSAMPLE)
                .short("S")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        8,
                        "Could not parse supersampling factor",
                        "Supersampling factor must be between 1 and 8",
                    )
                })
                .help("Render at this multiple of the output size, then downscale"),
        )
        .arg(
            Arg::with_name(PLANEMIN)
                .long(PLANEMIN)
                .short("l")
                .takes_value(true)
                .default_value("-2.6,-2.1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left-lower corner"))
                .help("Left-lower corner of the complex window"),
        )
        .arg(
            Arg::with_name(PLANEMAX)
                .long(PLANEMAX)
                .short("r")
                .takes_value(true)
                .default_value("1.6,2.1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right-upper corner"))
                .help("Right-upper corner of the complex window"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration cap",
                        "Iteration cap must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .short("e")
                .takes_value(true)
                .default_value("4.0")
                .validator(|s| match f64::from_str(&s) {
                    Ok(r) if r > 0.0 => Ok(()),
                    _ => Err("Escape radius must be a positive number".to_string()),
                })
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(POWER)
                .long(POWER)
                .short("p")
                .takes_value(true)
                .default_value("2")
                .validator(|s| match i32::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse power".to_string()),
                })
                .help("Integer exponent of the recurrence"),
        )
        .arg(
            Arg::with_name(ALGORITHM)
                .long(ALGORITHM)
                .short("a")
                .takes_value(true)
                .default_value("mandelbrot")
                .help("Escape algorithm name"),
        )
        .arg(
            Arg::with_name(COLOR)
                .long(COLOR)
                .short("c")
                .takes_value(true)
                .default_value("smooth")
                .help("Color strategy name"),
        )
        .arg(
            Arg::with_name(MEMBER)
                .long(MEMBER)
                .short("m")
                .takes_value(true)
                .default_value("#000000")
                .help("Color for points that never escape, as #rrggbb"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", max_threads),
                    )
                })
                .help("Worker threads; 0 means one per CPU"),
        )
        .get_matches()
}

fn write_png(outfile: &str, pixels: &[u8], width: u32, height: u32) -> Result<(), std::io::Error> {
    let output = File::create(Path::new(outfile))?;
    PNGEncoder::new(output).encode(pixels, width, height, ColorType::RGBA(8))?;
    Ok(())
}

/// Narrow the engine's 16-bit channels to the 8 bits PNG output uses
/// here.
fn to_rgba8(buffer: &[colors::Color]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(buffer.len() * 4);
    for k in buffer {
        raw.push((k.r >> 8) as u8);
        raw.push((k.g >> 8) as u8);
        raw.push((k.b >> 8) as u8);
        raw.push((k.a >> 8) as u8);
    }
    raw
}

fn main() {
    let matches = args();

    let (output_width, output_height): (u32, u32) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let supersample =
        usize::from_str(matches.value_of(SUPERSAMPLE).unwrap()).expect("Error parsing supersample");
    let plane_min =
        parse_complex(matches.value_of(PLANEMIN).unwrap()).expect("Error parsing left-lower corner");
    let plane_max = parse_complex(matches.value_of(PLANEMAX).unwrap())
        .expect("Error parsing right-upper corner");

    let mut threads = usize::from_str(matches.value_of(THREADS).unwrap()).expect("bad threads");
    if threads == 0 {
        threads = num_cpus::get();
    }

    let params = Parameters {
        plane_min,
        plane_max,
        image_width: (output_width as usize) * supersample,
        image_height: (output_height as usize) * supersample,
        output_width,
        output_height,
        max_iterations: usize::from_str(matches.value_of(ITERATIONS).unwrap())
            .expect("bad iterations"),
        escape_radius: f64::from_str(matches.value_of(RADIUS).unwrap()).expect("bad radius"),
        power: i32::from_str(matches.value_of(POWER).unwrap()).expect("bad power"),
        escape_algorithm: matches.value_of(ALGORITHM).unwrap().to_string(),
        color_strategy: matches.value_of(COLOR).unwrap().to_string(),
        member_color: matches.value_of(MEMBER).unwrap().to_string(),
    };

    let mut buffer = vec![colors::BLACK; params.image_width * params.image_height];

    // The CLI has no way to interrupt a render; hold the sender so
    // the signal never fires.
    let (_cancel, cancel_rx) = unbounded();

    let result = make_contexts(&mut buffer, threads, &params)
        .and_then(|contexts| render(threads, contexts, &cancel_rx));
    if let Err(e) = result {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }

    let raw = to_rgba8(&buffer);
    let raw = if supersample > 1 {
        let img = image::RgbaImage::from_raw(
            params.image_width as u32,
            params.image_height as u32,
            raw,
        )
        .expect("buffer size mismatch");
        image::imageops::resize(&img, output_width, output_height, image::FilterType::Lanczos3)
            .into_raw()
    } else {
        raw
    };

    if let Err(e) = write_png(matches.value_of(OUTPUT).unwrap(), &raw, output_width, output_height) {
        eprintln!("Could not write {}: {}", matches.value_of(OUTPUT).unwrap(), e);
        std::process::exit(1);
    }
}
