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

use crate::internals::ProcessedOffset;
use crate::sse::sse_support::{sse_pack_weights, sse_store_rgba};
use crate::yuv_support::{CbCrInverseTransform, YuvChromaRange, YuvNVOrder, YuvSourceChannels};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Converts 16 pixels per step, the caller finishes the row.
///
/// Arithmetic is done in 32 bits with the same rounding and saturation as
/// the scalar path, so results are bit-exact.
pub(crate) fn sse_yuv_nv_to_rgba<
    const PRECISION: i32,
    const UV_ORDER: u8,
    const DESTINATION_CHANNELS: u8,
>(
    range: &YuvChromaRange,
    transform: &CbCrInverseTransform<i32>,
    y_plane: &[u8],
    uv_plane: &[u8],
    rgba: &mut [u8],
    start_cx: usize,
    start_ux: usize,
    width: usize,
) -> ProcessedOffset {
    unsafe {
        sse_yuv_nv_to_rgba_impl::<PRECISION, UV_ORDER, DESTINATION_CHANNELS>(
            range, transform, y_plane, uv_plane, rgba, start_cx, start_ux, width,
        )
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_nv_pixels8<const PRECISION: i32>(
    y_values: __m128i,
    uv_values: __m128i,
    v_luma_coeff: __m128i,
    v_r_coeff: __m128i,
    v_g_coeff: __m128i,
    v_b_coeff: __m128i,
) -> (__m128i, __m128i, __m128i) {
    let ones = _mm_set1_epi16(1);

    // (y - bias) * y_coef + rounding
    let y_lo = _mm_madd_epi16(_mm_unpacklo_epi16(y_values, ones), v_luma_coeff);
    let y_hi = _mm_madd_epi16(_mm_unpackhi_epi16(y_values, ones), v_luma_coeff);

    // one lane per chroma pair
    let r_c = _mm_madd_epi16(uv_values, v_r_coeff);
    let g_c = _mm_madd_epi16(uv_values, v_g_coeff);
    let b_c = _mm_madd_epi16(uv_values, v_b_coeff);

    let r_lo = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_lo, _mm_unpacklo_epi32(r_c, r_c)));
    let r_hi = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_hi, _mm_unpackhi_epi32(r_c, r_c)));
    let g_lo = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_lo, _mm_unpacklo_epi32(g_c, g_c)));
    let g_hi = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_hi, _mm_unpackhi_epi32(g_c, g_c)));
    let b_lo = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_lo, _mm_unpacklo_epi32(b_c, b_c)));
    let b_hi = _mm_srai_epi32::<PRECISION>(_mm_add_epi32(y_hi, _mm_unpackhi_epi32(b_c, b_c)));

    (
        _mm_packs_epi32(r_lo, r_hi),
        _mm_packs_epi32(g_lo, g_hi),
        _mm_packs_epi32(b_lo, b_hi),
    )
}

#[target_feature(enable = "sse4.1")]
unsafe fn sse_yuv_nv_to_rgba_impl<
    const PRECISION: i32,
    const UV_ORDER: u8,
    const DESTINATION_CHANNELS: u8,
>(
    range: &YuvChromaRange,
    transform: &CbCrInverseTransform<i32>,
    y_plane: &[u8],
    uv_plane: &[u8],
    rgba: &mut [u8],
    start_cx: usize,
    start_ux: usize,
    width: usize,
) -> ProcessedOffset {
    let order: YuvNVOrder = UV_ORDER.into();
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = destination_channels.get_channels_count();

    let mut cx = start_cx;
    let mut uv_x = start_ux;

    let y_ptr = y_plane.as_ptr();
    let uv_ptr = uv_plane.as_ptr();
    let rgba_ptr = rgba.as_mut_ptr();

    let zeros = _mm_setzero_si128();
    let y_corr = _mm_set1_epi16(range.bias_y as i16);
    let uv_corr = _mm_set1_epi16(range.bias_uv as i16);
    let v_alpha = _mm_set1_epi8(255u8 as i8);

    let rounding: i16 = 1 << (PRECISION - 1);
    let v_luma_coeff = _mm_set1_epi32(sse_pack_weights(transform.y_coef as i16, rounding));

    // chroma pairs are multiplied in storage order
    let chroma_weights = |v_weight: i32, u_weight: i32| -> i32 {
        match order {
            YuvNVOrder::UV => sse_pack_weights(u_weight as i16, v_weight as i16),
            YuvNVOrder::VU => sse_pack_weights(v_weight as i16, u_weight as i16),
        }
    };

    let v_r_coeff = _mm_set1_epi32(chroma_weights(transform.cr_coef, 0));
    let v_g_coeff = _mm_set1_epi32(chroma_weights(
        -transform.g_coeff_1,
        -transform.g_coeff_2,
    ));
    let v_b_coeff = _mm_set1_epi32(chroma_weights(0, transform.cb_coef));

    while cx + 16 <= width {
        let y_values = _mm_loadu_si128(y_ptr.add(cx) as *const __m128i);
        let uv_values = _mm_loadu_si128(uv_ptr.add(uv_x) as *const __m128i);

        let y_lo = _mm_sub_epi16(_mm_cvtepu8_epi16(y_values), y_corr);
        let y_hi = _mm_sub_epi16(_mm_unpackhi_epi8(y_values, zeros), y_corr);
        let uv_lo = _mm_sub_epi16(_mm_cvtepu8_epi16(uv_values), uv_corr);
        let uv_hi = _mm_sub_epi16(_mm_unpackhi_epi8(uv_values, zeros), uv_corr);

        let (r_lo, g_lo, b_lo) = sse_nv_pixels8::<PRECISION>(
            y_lo,
            uv_lo,
            v_luma_coeff,
            v_r_coeff,
            v_g_coeff,
            v_b_coeff,
        );
        let (r_hi, g_hi, b_hi) = sse_nv_pixels8::<PRECISION>(
            y_hi,
            uv_hi,
            v_luma_coeff,
            v_r_coeff,
            v_g_coeff,
            v_b_coeff,
        );

        let r_values = _mm_packus_epi16(r_lo, r_hi);
        let g_values = _mm_packus_epi16(g_lo, g_hi);
        let b_values = _mm_packus_epi16(b_lo, b_hi);

        let dst_ptr = rgba_ptr.add(cx * channels);

        match destination_channels {
            YuvSourceChannels::Rgba => {
                sse_store_rgba(dst_ptr, r_values, g_values, b_values, v_alpha);
            }
            YuvSourceChannels::Bgra => {
                sse_store_rgba(dst_ptr, b_values, g_values, r_values, v_alpha);
            }
        }

        cx += 16;
        uv_x += 16;
    }

    ProcessedOffset { cx, ux: uv_x }
}
