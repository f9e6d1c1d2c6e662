/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
mod support;

use crate::support::{read_nv_frame, save_raw_image, synthesize_nv_frame};
use clap::Parser;
use image::{ImageBuffer, Rgba};
use nv21rgb::{YuvNVOrder, YuvSourceChannels, YuvToRgbConverter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Converts a raw NV21/NV12 frame into an RGBA PNG or a raw RGBA/BGRA dump.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Raw frame to convert; a synthetic test pattern is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Destination, `.png` is encoded, anything else is written as raw pixels
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Source chroma is stored as U, V
    #[arg(long)]
    nv12: bool,

    /// Produce BGRA instead of RGBA, raw outputs only
    #[arg(long)]
    bgra: bool,

    /// Convert the frame this many times and report average time
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let order = if cli.nv12 {
        YuvNVOrder::UV
    } else {
        YuvNVOrder::VU
    };
    let layout = if cli.bgra {
        YuvSourceChannels::Bgra
    } else {
        YuvSourceChannels::Rgba
    };

    let is_png = cli
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png && layout == YuvSourceChannels::Bgra {
        return Err("PNG output requires RGBA, use a raw output path with --bgra".into());
    }

    let frame = match &cli.input {
        Some(path) => {
            info!(path = %path.display(), width = cli.width, height = cli.height, "reading frame");
            read_nv_frame(path, cli.width, cli.height)?
        }
        None => {
            info!(width = cli.width, height = cli.height, "synthesizing test pattern");
            synthesize_nv_frame(cli.width, cli.height, order)?
        }
    };

    let mut converter = YuvToRgbConverter::new(order, layout);
    let repeat = cli.repeat.max(1);
    let start_time = Instant::now();
    for _ in 0..repeat {
        converter.convert(&frame, cli.width, cli.height)?;
    }
    let elapsed = start_time.elapsed();
    info!(
        repeat,
        average = ?(elapsed / repeat),
        "converted {}x{} frame",
        cli.width,
        cli.height
    );

    if is_png {
        let width = converter.width();
        let height = converter.height();
        let image = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width, height, converter.into_inner())
            .ok_or("converted buffer does not match frame geometry")?;
        image.save(&cli.output)?;
    } else {
        save_raw_image(&cli.output, converter.frame())?;
    }
    info!(path = %cli.output.display(), "saved");

    Ok(())
}
