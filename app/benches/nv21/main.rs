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
use criterion::{criterion_group, criterion_main, Criterion};
use nv21rgb::{
    nv_buffer_size, yuv_nv12_to_rgba, yuv_nv21_to_bgra, yuv_nv21_to_rgba, YuvToRgbConverter,
};

fn camera_frame(width: u32, height: u32) -> Vec<u8> {
    let size = nv_buffer_size(width, height).unwrap();
    (0..size).map(|x| (x * 31 % 251) as u8).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (1920u32, 1080u32);
    let frame = camera_frame(width, height);
    let target_size = width as usize * height as usize * 4;

    c.bench_function("nv21rgb NV21 -> RGBA 1080p", |b| {
        let mut rgba = vec![0u8; target_size];
        b.iter(|| {
            yuv_nv21_to_rgba(&frame, width, height, &mut rgba).unwrap();
        })
    });

    c.bench_function("nv21rgb NV21 -> BGRA 1080p", |b| {
        let mut bgra = vec![0u8; target_size];
        b.iter(|| {
            yuv_nv21_to_bgra(&frame, width, height, &mut bgra).unwrap();
        })
    });

    c.bench_function("nv21rgb NV12 -> RGBA 1080p", |b| {
        let mut rgba = vec![0u8; target_size];
        b.iter(|| {
            yuv_nv12_to_rgba(&frame, width, height, &mut rgba).unwrap();
        })
    });

    c.bench_function("nv21rgb converter NV21 -> RGBA 1080p", |b| {
        let mut converter = YuvToRgbConverter::default();
        b.iter(|| {
            converter.convert(&frame, width, height).unwrap();
        })
    });

    let odd_frame = camera_frame(1279, 719);
    c.bench_function("nv21rgb NV21 -> RGBA 1279x719", |b| {
        let mut rgba = vec![0u8; 1279 * 719 * 4];
        b.iter(|| {
            yuv_nv21_to_rgba(&odd_frame, 1279, 719, &mut rgba).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
