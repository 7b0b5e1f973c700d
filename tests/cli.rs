use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

fn png2jpg(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_png2jpg"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut pipe = child.stdin.take().unwrap();
    // the process may exit before reading, so a broken pipe is fine here
    let _ = pipe.write_all(stdin);
    drop(pipe);
    child.wait_with_output().unwrap()
}

fn write_png(path: &Path, width: u32, height: u32) {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([90, 120, 150])))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    fs::write(path, out.into_inner()).unwrap();
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn input_mode_converts_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_png(&input, 7, 5);

    let out = png2jpg(&["input", arg(&input), arg(&output), "0", "2"], b"");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout.trim_end(),
        format!(
            "Converted: {} -> {} (4x3, quality=1, downsample_factor=2)",
            input.display(),
            output.display()
        )
    );
    assert!(output.exists());
}

#[test]
fn short_aliases_select_modes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_png(&input, 3, 3);
    let png = fs::read(&input).unwrap();

    let out = png2jpg(&["i", "-", arg(&output)], &png);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Converted: stdin -> "));

    fs::remove_file(&output).unwrap();
    let out = png2jpg(&["p", arg(&output), "-5"], &png);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("quality=1,"));
    assert!(output.exists());
}

#[test]
fn unknown_mode_fails_loudly() {
    let out = png2jpg(&["x", "out.jpg"], b"");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unrecognized subcommand 'x'"), "{stderr}");
    assert!(stderr.contains("Usage:"), "{stderr}");
}

#[test]
fn missing_arguments() {
    assert_eq!(png2jpg(&["input", "in.png"], b"").status.code(), Some(1));
    assert_eq!(png2jpg(&["pipe"], b"").status.code(), Some(1));
    assert_eq!(png2jpg(&[], b"").status.code(), Some(1));
}

#[test]
fn help_is_not_an_error() {
    assert_eq!(png2jpg(&["--help"], b"").status.code(), Some(0));
}

#[test]
fn empty_stdin_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.jpg");
    let out = png2jpg(&["pipe", arg(&output)], b"");
    assert_eq!(out.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn missing_input_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.png");
    let output = dir.path().join("out.jpg");
    let out = png2jpg(&["input", arg(&input), arg(&output)], b"");
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Input file not found"));
    assert!(!output.exists());
}

#[test]
fn empty_input_file_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.png");
    let output = dir.path().join("out.jpg");
    fs::write(&input, b"").unwrap();
    let out = png2jpg(&["input", arg(&input), arg(&output)], b"");
    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn garbage_exits_five() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.jpg");
    let out = png2jpg(&["pipe", arg(&output)], b"not an image");
    assert_eq!(out.status.code(), Some(5));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_exits_six() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_png(&input, 2, 2);
    let output = dir.path().join("missing-dir").join("out.jpg");
    let out = png2jpg(&["input", arg(&input), arg(&output)], b"");
    assert_eq!(out.status.code(), Some(6));
}

#[test]
fn factor_three_exits_seven() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_png(&input, 4, 4);
    let out = png2jpg(&["input", arg(&input), arg(&output), "85", "3"], b"");
    assert_eq!(out.status.code(), Some(7));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid downsample factor: 3"));
    assert!(!output.exists());
}

#[test]
fn raw_mode_streams_jpeg() {
    let mut frame = vec![0u8; 16];
    frame.extend(std::iter::repeat([255u8, 0, 0, 255]).take(8 * 8).flatten());
    let out = png2jpg(&["raw", "8", "8", "70", "4"], &frame);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(&out.stdout[..2], &[0xFF, 0xD8]);
    assert!(String::from_utf8_lossy(&out.stderr).contains("(2x2, quality=70, downsample_factor=4)"));

    let decoded = image::load_from_memory_with_format(&out.stdout, ImageFormat::Jpeg)
        .unwrap()
        .to_rgb8();
    assert_eq!(decoded.dimensions(), (2, 2));
}

#[test]
fn oversized_raw_frame_exits_seven() {
    let out = png2jpg(&["raw", "2147483648", "2147483648"], &[0u8; 64]);
    assert_eq!(out.status.code(), Some(7));
    assert!(String::from_utf8_lossy(&out.stderr)
        .contains("Invalid raw frame size: 2147483648x2147483648"));
    assert!(out.stdout.is_empty());
}
