// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end tests of the command-line front end.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[test]
fn renders_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("render.png");

    Command::cargo_bin("frakt")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x32", "-i", "50"])
        .assert()
        .success();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], PNG_MAGIC);
}

#[test]
fn supersampled_renders_downscale_to_the_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("render.png");

    Command::cargo_bin("frakt")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x16",
            "-S",
            "2",
            "-i",
            "50",
            "-c",
            "bands",
        ])
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba();
    assert_eq!(img.dimensions(), (16, 16));
}

#[test]
fn rejects_an_unknown_color_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("render.png");

    Command::cargo_bin("frakt")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "16x16", "-c", "plaid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color strategy"));

    assert!(!out.exists());
}

#[test]
fn rejects_a_bad_member_color() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("render.png");

    Command::cargo_bin("frakt")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "16x16", "-m", "123456"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad member color"));
}
