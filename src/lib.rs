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
//! Conversion of bi-planar YUV 4:2:0 camera frames (NV21, NV12) into
//! 8-bit RGBA or BGRA using the BT.601 limited range integer transform.
//!
//! ```
//! use nv21rgb::{yuv_nv21_to_rgba, nv_buffer_size};
//!
//! let (width, height) = (4u32, 2u32);
//! let mut nv21 = vec![128u8; nv_buffer_size(width, height).unwrap()];
//! nv21[..8].copy_from_slice(&[16, 16, 16, 16, 235, 235, 235, 235]);
//! let mut rgba = vec![0u8; width as usize * height as usize * 4];
//! yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
//! assert_eq!(&rgba[..4], &[0, 0, 0, 255]);
//! assert_eq!(&rgba[28..], &[255, 255, 255, 255]);
//! ```
//!
//! SSE 4.1 is detected at runtime on x86 when the `sse` feature is enabled,
//! NEON is used on aarch64. Vectorized and scalar paths produce identical
//! output. The `rayon` feature converts pairs of rows in parallel.
#![deny(deprecated)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod converter;
mod images;
mod internals;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
mod numerics;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod yuv_error;
mod yuv_nv_to_rgba;
mod yuv_support;

pub use converter::YuvToRgbConverter;
pub use images::YuvBiPlanarImage;
pub use yuv_error::{
    nv_buffer_size, rgba_buffer_size, BufferKind, ImageSize, MismatchedSize, YuvError,
    YuvErrorKind,
};
pub use yuv_nv_to_rgba::{
    yuv_bi_planar_to_rgbx, yuv_nv12_to_bgra, yuv_nv12_to_rgba, yuv_nv21_to_bgra,
    yuv_nv21_to_rgba,
};
pub use yuv_support::{
    CbCrInverseTransform, YuvChromaRange, YuvNVOrder, YuvSourceChannels,
    BT601_INVERSE_TRANSFORM, BT601_LIMITED_RANGE,
};
