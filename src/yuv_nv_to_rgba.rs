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

#[allow(unused_imports)]
use crate::internals::*;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
use crate::neon::neon_yuv_nv_to_rgba_row;
use crate::numerics::qrshr;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::sse_yuv_nv_to_rgba;
use crate::yuv_error::check_rgba_destination;
use crate::yuv_support::*;
use crate::{YuvBiPlanarImage, YuvError};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn yuv_nv_to_rgbx<const UV_ORDER: u8, const DESTINATION_CHANNELS: u8>(
    image: &YuvBiPlanarImage,
    rgba: &mut [u8],
) -> Result<(), YuvError> {
    let order: YuvNVOrder = UV_ORDER.into();
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();

    image.check_constraints()?;
    check_rgba_destination(rgba, image.width, image.height)?;

    const PRECISION: i32 = BT601_PRECISION;

    let chroma_range = BT601_LIMITED_RANGE;
    let inverse_transform = BT601_INVERSE_TRANSFORM;
    let channels = dst_chans.get_channels_count();

    let cr_coef = inverse_transform.cr_coef;
    let cb_coef = inverse_transform.cb_coef;
    let y_coef = inverse_transform.y_coef;
    let g_coef_1 = inverse_transform.g_coeff_1;
    let g_coef_2 = inverse_transform.g_coeff_2;

    let bias_y = chroma_range.bias_y as i32;
    let bias_uv = chroma_range.bias_uv as i32;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_sse = std::arch::is_x86_feature_detected!("sse4.1");

    let width = image.width as usize;
    let height = image.height as usize;

    let process_wide_row = |_rgba: &mut [u8], _y_plane: &[u8], _uv_plane: &[u8]| {
        let mut _offset = ProcessedOffset { cx: 0, ux: 0 };
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        {
            if use_sse {
                let processed = sse_yuv_nv_to_rgba::<PRECISION, UV_ORDER, DESTINATION_CHANNELS>(
                    &chroma_range,
                    &inverse_transform,
                    _y_plane,
                    _uv_plane,
                    _rgba,
                    _offset.cx,
                    _offset.ux,
                    width,
                );
                _offset = processed;
            }
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            unsafe {
                let processed = neon_yuv_nv_to_rgba_row::<PRECISION, UV_ORDER, DESTINATION_CHANNELS>(
                    &chroma_range,
                    &inverse_transform,
                    _y_plane,
                    _uv_plane,
                    _rgba,
                    _offset.cx,
                    _offset.ux,
                    width,
                );
                _offset = processed;
            }
        }

        _offset
    };

    let convert_pixel = |dst: &mut [u8], y_value: u8, cb_value: i32, cr_value: i32| {
        let y_value: i32 = (y_value as i32 - bias_y) * y_coef;

        let r = qrshr::<PRECISION, 8>(y_value + cr_coef * cr_value);
        let b = qrshr::<PRECISION, 8>(y_value + cb_coef * cb_value);
        let g = qrshr::<PRECISION, 8>(y_value - g_coef_1 * cr_value - g_coef_2 * cb_value);

        dst[dst_chans.get_r_channel_offset()] = r as u8;
        dst[dst_chans.get_g_channel_offset()] = g as u8;
        dst[dst_chans.get_b_channel_offset()] = b as u8;
        dst[dst_chans.get_a_channel_offset()] = 255;
    };

    // One luma row against its chroma row, rows are exactly `width` pixels wide.
    let process_halved_chroma_row = |y_src: &[u8], uv_src: &[u8], rgba: &mut [u8]| {
        let processed = process_wide_row(rgba, y_src, uv_src);

        for ((rgba, y_src), uv_src) in rgba
            .chunks_exact_mut(channels * 2)
            .zip(y_src.chunks_exact(2))
            .zip(uv_src.chunks_exact(2))
            .skip(processed.cx / 2)
        {
            let cb_value = (uv_src[order.get_u_position()] as i32) - bias_uv;
            let cr_value = (uv_src[order.get_v_position()] as i32) - bias_uv;

            let (rgba0, rgba1) = rgba.split_at_mut(channels);
            convert_pixel(rgba0, y_src[0], cb_value, cr_value);
            convert_pixel(rgba1, y_src[1], cb_value, cr_value);
        }

        if width & 1 != 0 {
            // the last chroma pair serves the trailing column alone
            let rgba = rgba.chunks_exact_mut(channels * 2).into_remainder();
            let y_src = y_src.chunks_exact(2).remainder();
            let uv_src = &uv_src[width - 1..width + 1];

            let cb_value = (uv_src[order.get_u_position()] as i32) - bias_uv;
            let cr_value = (uv_src[order.get_v_position()] as i32) - bias_uv;

            convert_pixel(&mut rgba[0..channels], y_src[0], cb_value, cr_value);
        }
    };

    let y_stride = width;
    let uv_stride = image.uv_stride();
    let rgba_stride = width * channels;

    let y_plane = &image.y_plane[..y_stride * height];
    let uv_plane = &image.uv_plane[..uv_stride * height.div_ceil(2)];
    let rgba = &mut rgba[..rgba_stride * height];

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_plane
            .par_chunks_exact(y_stride * 2)
            .zip(uv_plane.par_chunks_exact(uv_stride))
            .zip(rgba.par_chunks_exact_mut(rgba_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_plane
            .chunks_exact(y_stride * 2)
            .zip(uv_plane.chunks_exact(uv_stride))
            .zip(rgba.chunks_exact_mut(rgba_stride * 2));
    }
    iter.for_each(|((y_src, uv_src), rgba)| {
        let (y_src0, y_src1) = y_src.split_at(y_stride);
        let (rgba0, rgba1) = rgba.split_at_mut(rgba_stride);
        process_halved_chroma_row(y_src0, uv_src, rgba0);
        process_halved_chroma_row(y_src1, uv_src, rgba1);
    });

    if height & 1 != 0 {
        let y_src = y_plane.chunks_exact(y_stride * 2).remainder();
        let uv_src = &uv_plane[uv_stride * (height / 2)..];
        let rgba = rgba.chunks_exact_mut(rgba_stride * 2).into_remainder();
        process_halved_chroma_row(y_src, uv_src, rgba);
    }

    Ok(())
}

/// Convert a Bi-Planar 4:2:0 image to a 4 channels image,
/// with chroma order and pixel layout selected at runtime.
///
/// # Arguments
///
/// * `image` - Source Bi-Planar image.
/// * `dst` - A mutable slice of at least `width * height * 4` bytes.
/// * `order` - Chroma order of the source, [YuvNVOrder::VU] for NV21.
/// * `layout` - Destination pixel layout.
///
/// # Errors
///
/// Returns [YuvError::InvalidDimensions] for zero sized images and
/// [YuvError::InvalidBuffer] when a plane or `dst` is too small.
/// Nothing is written on error.
pub fn yuv_bi_planar_to_rgbx(
    image: &YuvBiPlanarImage,
    dst: &mut [u8],
    order: YuvNVOrder,
    layout: YuvSourceChannels,
) -> Result<(), YuvError> {
    match (order, layout) {
        (YuvNVOrder::UV, YuvSourceChannels::Rgba) => yuv_nv_to_rgbx::<
            { YuvNVOrder::UV as u8 },
            { YuvSourceChannels::Rgba as u8 },
        >(image, dst),
        (YuvNVOrder::UV, YuvSourceChannels::Bgra) => yuv_nv_to_rgbx::<
            { YuvNVOrder::UV as u8 },
            { YuvSourceChannels::Bgra as u8 },
        >(image, dst),
        (YuvNVOrder::VU, YuvSourceChannels::Rgba) => yuv_nv_to_rgbx::<
            { YuvNVOrder::VU as u8 },
            { YuvSourceChannels::Rgba as u8 },
        >(image, dst),
        (YuvNVOrder::VU, YuvSourceChannels::Bgra) => yuv_nv_to_rgbx::<
            { YuvNVOrder::VU as u8 },
            { YuvSourceChannels::Bgra as u8 },
        >(image, dst),
    }
}

/// Convert YUV NV21 format to RGBA format.
///
/// This function takes a contiguous NV21 frame, a full resolution luma plane
/// followed by an interleaved `V, U` chroma plane, and converts it to RGBA
/// with 8-bit per channel precision using BT.601 limited range coefficients.
/// Alpha is always 255.
///
/// # Arguments
///
/// * `nv21` - Source frame, at least `width * height + 2 * ceil(width / 2) * ceil(height / 2)` bytes.
/// * `width` - Image width in pixels, odd widths are accepted.
/// * `height` - Image height in pixels, odd heights are accepted.
/// * `rgba` - A mutable slice of at least `width * height * 4` bytes, rows are tightly packed.
///
/// # Errors
///
/// Returns [YuvError::InvalidDimensions] if width or height is zero and
/// [YuvError::InvalidBuffer] if either buffer is too small.
pub fn yuv_nv21_to_rgba(
    nv21: &[u8],
    width: u32,
    height: u32,
    rgba: &mut [u8],
) -> Result<(), YuvError> {
    let image = YuvBiPlanarImage::from_nv(nv21, width, height)?;
    yuv_nv_to_rgbx::<{ YuvNVOrder::VU as u8 }, { YuvSourceChannels::Rgba as u8 }>(&image, rgba)
}

/// Convert YUV NV21 format to BGRA format.
///
/// Same as [yuv_nv21_to_rgba] with blue and red channels swapped.
pub fn yuv_nv21_to_bgra(
    nv21: &[u8],
    width: u32,
    height: u32,
    bgra: &mut [u8],
) -> Result<(), YuvError> {
    let image = YuvBiPlanarImage::from_nv(nv21, width, height)?;
    yuv_nv_to_rgbx::<{ YuvNVOrder::VU as u8 }, { YuvSourceChannels::Bgra as u8 }>(&image, bgra)
}

/// Convert YUV NV12 format to RGBA format.
///
/// NV12 has the same geometry as NV21 with chroma stored as `U, V`.
///
/// # Errors
///
/// See [yuv_nv21_to_rgba].
pub fn yuv_nv12_to_rgba(
    nv12: &[u8],
    width: u32,
    height: u32,
    rgba: &mut [u8],
) -> Result<(), YuvError> {
    let image = YuvBiPlanarImage::from_nv(nv12, width, height)?;
    yuv_nv_to_rgbx::<{ YuvNVOrder::UV as u8 }, { YuvSourceChannels::Rgba as u8 }>(&image, rgba)
}

/// Convert YUV NV12 format to BGRA format.
pub fn yuv_nv12_to_bgra(
    nv12: &[u8],
    width: u32,
    height: u32,
    bgra: &mut [u8],
) -> Result<(), YuvError> {
    let image = YuvBiPlanarImage::from_nv(nv12, width, height)?;
    yuv_nv_to_rgbx::<{ YuvNVOrder::UV as u8 }, { YuvSourceChannels::Bgra as u8 }>(&image, bgra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nv_buffer_size, YuvErrorKind};
    use rand::Rng;

    fn clamp8(v: i32) -> u8 {
        v.clamp(0, 255) as u8
    }

    /// Direct per pixel evaluation of the BT.601 integer formulas.
    fn reference_nv21_to_rgba(nv21: &[u8], width: usize, height: usize) -> Vec<u8> {
        let chroma_stride = width.div_ceil(2) * 2;
        let base = width * height;
        let mut dst = vec![0u8; width * height * 4];
        for y in 0..height {
            for x in 0..width {
                let luma = nv21[y * width + x] as i32;
                let uv_offset = base + (y / 2) * chroma_stride + 2 * (x / 2);
                let v = nv21[uv_offset] as i32;
                let u = nv21[uv_offset + 1] as i32;
                let c = luma - 16;
                let d = u - 128;
                let e = v - 128;
                let px = &mut dst[(y * width + x) * 4..(y * width + x) * 4 + 4];
                px[0] = clamp8((298 * c + 409 * e + 128) >> 8);
                px[1] = clamp8((298 * c - 100 * d - 208 * e + 128) >> 8);
                px[2] = clamp8((298 * c + 516 * d + 128) >> 8);
                px[3] = 255;
            }
        }
        dst
    }

    fn random_frame(width: u32, height: u32) -> Vec<u8> {
        let mut frame = vec![0u8; nv_buffer_size(width, height).unwrap()];
        rand::rng().fill(&mut frame[..]);
        frame
    }

    #[test]
    fn test_nv21_black_and_white_rows() {
        let nv21 = [16, 16, 16, 16, 235, 235, 235, 235, 128, 128, 128, 128];
        let mut rgba = [0u8; 4 * 2 * 4];
        yuv_nv21_to_rgba(&nv21, 4, 2, &mut rgba).unwrap();
        for px in rgba[..16].chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
        for px in rgba[16..].chunks_exact(4) {
            assert_eq!(px, &[255, 255, 255, 255]);
        }
    }

    #[test]
    fn test_nv21_uniform_white() {
        let (width, height) = (64u32, 32u32);
        let luma = (width * height) as usize;
        let mut nv21 = vec![128u8; nv_buffer_size(width, height).unwrap()];
        nv21[..luma].fill(235);
        let mut rgba = vec![0u8; luma * 4];
        yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
        for px in rgba.chunks_exact(4) {
            assert!(px[0] >= 254 && px[1] >= 254 && px[2] >= 254, "{:?}", px);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_nv21_uniform_black() {
        let (width, height) = (48u32, 6u32);
        let luma = (width * height) as usize;
        let mut nv21 = vec![128u8; nv_buffer_size(width, height).unwrap()];
        nv21[..luma].fill(16);
        let mut rgba = vec![1u8; luma * 4];
        yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
        for px in rgba.chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_nv21_matches_reference() {
        let widths = [1u32, 2, 3, 7, 15, 16, 17, 31, 32, 33, 47, 64, 70];
        let heights = [1u32, 2, 3, 4, 5];
        for &width in widths.iter() {
            for &height in heights.iter() {
                let nv21 = random_frame(width, height);
                let mut rgba = vec![0u8; width as usize * height as usize * 4];
                yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
                let reference = reference_nv21_to_rgba(&nv21, width as usize, height as usize);
                assert_eq!(rgba, reference, "Mismatch at {}x{}", width, height);
            }
        }
    }

    #[test]
    fn test_extreme_chroma_saturates() {
        // every combination of extreme luma and chroma values in one frame
        let width = 32u32;
        let height = 2u32;
        let mut nv21 = vec![0u8; nv_buffer_size(width, height).unwrap()];
        let extremes = [0u8, 16, 128, 235, 255];
        for (i, v) in nv21.iter_mut().enumerate() {
            *v = extremes[i % extremes.len()];
        }
        let mut rgba = vec![0u8; 32 * 2 * 4];
        yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
        assert_eq!(rgba, reference_nv21_to_rgba(&nv21, 32, 2));
    }

    #[test]
    fn test_deterministic() {
        let nv21 = random_frame(101, 37);
        let mut first = vec![0u8; 101 * 37 * 4];
        let mut second = vec![0u8; 101 * 37 * 4];
        yuv_nv21_to_rgba(&nv21, 101, 37, &mut first).unwrap();
        yuv_nv21_to_rgba(&nv21, 101, 37, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nv12_is_nv21_with_swapped_chroma() {
        let (width, height) = (35u32, 9u32);
        let nv21 = random_frame(width, height);
        let mut nv12 = nv21.clone();
        let luma = (width * height) as usize;
        for pair in nv12[luma..].chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
        let mut from_nv21 = vec![0u8; luma * 4];
        let mut from_nv12 = vec![0u8; luma * 4];
        yuv_nv21_to_rgba(&nv21, width, height, &mut from_nv21).unwrap();
        yuv_nv12_to_rgba(&nv12, width, height, &mut from_nv12).unwrap();
        assert_eq!(from_nv21, from_nv12);

        let mut bgra = vec![0u8; luma * 4];
        yuv_nv12_to_bgra(&nv12, width, height, &mut bgra).unwrap();
        for (rgba, bgra) in from_nv21.chunks_exact(4).zip(bgra.chunks_exact(4)) {
            assert_eq!(rgba, &[bgra[2], bgra[1], bgra[0], bgra[3]]);
        }
    }

    #[test]
    fn test_bgra_is_rgba_with_swapped_channels() {
        let (width, height) = (40u32, 4u32);
        let nv21 = random_frame(width, height);
        let mut rgba = vec![0u8; 40 * 4 * 4];
        let mut bgra = vec![0u8; 40 * 4 * 4];
        yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
        yuv_nv21_to_bgra(&nv21, width, height, &mut bgra).unwrap();
        for (rgba, bgra) in rgba.chunks_exact(4).zip(bgra.chunks_exact(4)) {
            assert_eq!(rgba, &[bgra[2], bgra[1], bgra[0], bgra[3]]);
        }
    }

    #[test]
    fn test_runtime_dispatch_matches_typed_entry() {
        let (width, height) = (19u32, 3u32);
        let nv21 = random_frame(width, height);
        let image = YuvBiPlanarImage::from_nv(&nv21, width, height).unwrap();
        let mut dynamic = vec![0u8; 19 * 3 * 4];
        let mut typed = vec![0u8; 19 * 3 * 4];
        yuv_bi_planar_to_rgbx(&image, &mut dynamic, YuvNVOrder::VU, YuvSourceChannels::Bgra)
            .unwrap();
        yuv_nv21_to_bgra(&nv21, width, height, &mut typed).unwrap();
        assert_eq!(dynamic, typed);
    }

    #[test]
    fn test_extra_destination_bytes_untouched() {
        let (width, height) = (18u32, 3u32);
        let nv21 = random_frame(width, height);
        let required = 18 * 3 * 4;
        let mut rgba = vec![0xABu8; required + 9];
        yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
        assert!(rgba[required..].iter().all(|&x| x == 0xAB));
        assert!(rgba[..required].chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_short_buffers_rejected() {
        let nv21 = vec![128u8; 12];
        let mut rgba = vec![0u8; 32];
        let err = yuv_nv21_to_rgba(&nv21[..11], 4, 2, &mut rgba).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidBuffer);
        let err = yuv_nv21_to_rgba(&nv21, 4, 2, &mut rgba[..31]).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidBuffer);
        assert!(yuv_nv21_to_rgba(&nv21, 4, 2, &mut rgba).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let nv21 = vec![128u8; 12];
        let mut rgba = vec![0u8; 32];
        let err = yuv_nv21_to_rgba(&nv21, 0, 2, &mut rgba).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidDimensions);
        let err = yuv_nv21_to_rgba(&nv21, 4, 0, &mut rgba).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidDimensions);
        let err = yuv_nv12_to_bgra(&[], 0, 0, &mut []).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_random_sizes_against_reference() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let width = rng.random_range(1..200u32);
            let height = rng.random_range(1..12u32);
            let nv21 = random_frame(width, height);
            let mut rgba = vec![0u8; width as usize * height as usize * 4];
            yuv_nv21_to_rgba(&nv21, width, height, &mut rgba).unwrap();
            assert_eq!(
                rgba,
                reference_nv21_to_rgba(&nv21, width as usize, height as usize),
                "Mismatch at {}x{}",
                width,
                height
            );
        }
    }
}
