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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nv21rgb::{
    nv_buffer_size, yuv_nv12_to_bgra, yuv_nv12_to_rgba, yuv_nv21_to_bgra, yuv_nv21_to_rgba,
    YuvErrorKind, YuvToRgbConverter,
};

#[derive(Arbitrary, Debug)]
struct FrameInput {
    width: u8,
    height: u8,
    source_slack: i8,
    target_slack: i8,
    fill: Vec<u8>,
}

fuzz_target!(|input: FrameInput| {
    fuzz_nv_to_rgba(input);
});

fn fuzz_nv_to_rgba(input: FrameInput) {
    let width = input.width as u32;
    let height = input.height as u32;

    let (source_size, target_size) = if width == 0 || height == 0 {
        (input.fill.len(), 0usize)
    } else {
        (
            nv_buffer_size(width, height).unwrap(),
            width as usize * height as usize * 4,
        )
    };

    let source_size = source_size.saturating_add_signed(input.source_slack as isize);
    let target_size = target_size.saturating_add_signed(input.target_slack as isize);

    let mut source = vec![128u8; source_size];
    for (dst, src) in source.iter_mut().zip(input.fill.iter().cycle()) {
        *dst = *src;
    }
    let mut target = vec![0u8; target_size];

    let result = yuv_nv21_to_rgba(&source, width, height, &mut target);
    if width == 0 || height == 0 {
        assert_eq!(result.unwrap_err().kind(), YuvErrorKind::InvalidDimensions);
        return;
    }
    let valid = input.source_slack >= 0 && input.target_slack >= 0;
    match result {
        Ok(()) => {
            assert!(valid);
            let required = width as usize * height as usize * 4;
            assert!(target[..required].chunks_exact(4).all(|px| px[3] == 255));
        }
        Err(err) => {
            assert!(!valid);
            assert_eq!(err.kind(), YuvErrorKind::InvalidBuffer);
        }
    }

    if valid {
        yuv_nv21_to_bgra(&source, width, height, &mut target).unwrap();
        yuv_nv12_to_rgba(&source, width, height, &mut target).unwrap();
        yuv_nv12_to_bgra(&source, width, height, &mut target).unwrap();
        let mut converter = YuvToRgbConverter::default();
        converter.convert(&source, width, height).unwrap();
    }
}
