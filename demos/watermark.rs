// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Example: hide a text in an image file and read it back.
//!
//! Run with `RUST_LOG=debug` to see the core's decisions.

use std::io::Write;

use hidemark_core::{capacity, embed_with_progress, extract_with_progress, PixelBuffer};

fn load(path: &str) -> PixelBuffer {
    let img = image::open(path).expect("Could not read image").to_rgba8();
    let (width, height) = img.dimensions();
    PixelBuffer::from_rgba(width, height, img.into_raw())
        .expect("Decoded image has inconsistent size")
}

fn print_progress(fraction: f64) {
    eprint!("\r{:5.1}%", fraction * 100.0);
    let _ = std::io::stderr().flush();
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: watermark <input> <text> [output.png]");
        eprintln!("       watermark --decode <marked.png>");
        eprintln!("       watermark --capacity <input>");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--decode" => {
            let buffer = load(&args[2]);
            match extract_with_progress(&buffer, &mut print_progress) {
                Some(text) => println!("\nWatermark: {text}"),
                None => println!("\nNo watermark found"),
            }
        }
        "--capacity" => {
            let buffer = load(&args[2]);
            println!("Capacity: {} bytes", capacity(&buffer));
        }
        input => {
            let buffer = load(input);
            let text = &args[2];
            let marked = match embed_with_progress(&buffer, text, &mut print_progress) {
                Ok(marked) => marked,
                Err(e) => {
                    eprintln!("Embed failed: {e}");
                    std::process::exit(1);
                }
            };
            eprintln!();

            let out_path = args.get(3).cloned().unwrap_or_else(|| {
                let stem = input.rsplit_once('.').map_or(input, |(stem, _)| stem);
                format!("{stem}_marked.png")
            });
            let (width, height) = (marked.width(), marked.height());
            let img = image::RgbaImage::from_raw(width, height, marked.into_samples())
                .expect("Marked buffer has inconsistent size");
            img.save_with_format(&out_path, image::ImageFormat::Png)
                .expect("Could not write output");
            println!("Marked image written to: {out_path}");
        }
    }
}
