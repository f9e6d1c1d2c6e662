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
use crate::yuv_support::{CbCrInverseTransform, YuvChromaRange, YuvNVOrder, YuvSourceChannels};
use std::arch::aarch64::*;

#[inline(always)]
unsafe fn neon_nv_pixels8<const PRECISION: i32>(
    y_values: uint8x8_t,
    u_values: uint8x8_t,
    v_values: uint8x8_t,
    y_corr: int16x8_t,
    uv_corr: int16x8_t,
    v_rounding: int32x4_t,
    transform: &CbCrInverseTransform<i32>,
) -> (uint8x8_t, uint8x8_t, uint8x8_t) {
    let y_coef = transform.y_coef as i16;
    let cr_coef = transform.cr_coef as i16;
    let cb_coef = transform.cb_coef as i16;
    let g_coef_1 = transform.g_coeff_1 as i16;
    let g_coef_2 = transform.g_coeff_2 as i16;

    let y_values = vsubq_s16(vreinterpretq_s16_u16(vmovl_u8(y_values)), y_corr);
    let u_values = vsubq_s16(vreinterpretq_s16_u16(vmovl_u8(u_values)), uv_corr);
    let v_values = vsubq_s16(vreinterpretq_s16_u16(vmovl_u8(v_values)), uv_corr);

    let y_low = vmlal_n_s16(v_rounding, vget_low_s16(y_values), y_coef);
    let y_high = vmlal_n_s16(v_rounding, vget_high_s16(y_values), y_coef);

    let r_low = vmlal_n_s16(y_low, vget_low_s16(v_values), cr_coef);
    let r_high = vmlal_n_s16(y_high, vget_high_s16(v_values), cr_coef);

    let b_low = vmlal_n_s16(y_low, vget_low_s16(u_values), cb_coef);
    let b_high = vmlal_n_s16(y_high, vget_high_s16(u_values), cb_coef);

    let g_low = vmlsl_n_s16(
        vmlsl_n_s16(y_low, vget_low_s16(v_values), g_coef_1),
        vget_low_s16(u_values),
        g_coef_2,
    );
    let g_high = vmlsl_n_s16(
        vmlsl_n_s16(y_high, vget_high_s16(v_values), g_coef_1),
        vget_high_s16(u_values),
        g_coef_2,
    );

    // shift saturates negatives to zero, narrowing saturates to 255
    let r = vqmovn_u16(vcombine_u16(
        vqshrun_n_s32::<PRECISION>(r_low),
        vqshrun_n_s32::<PRECISION>(r_high),
    ));
    let g = vqmovn_u16(vcombine_u16(
        vqshrun_n_s32::<PRECISION>(g_low),
        vqshrun_n_s32::<PRECISION>(g_high),
    ));
    let b = vqmovn_u16(vcombine_u16(
        vqshrun_n_s32::<PRECISION>(b_low),
        vqshrun_n_s32::<PRECISION>(b_high),
    ));
    (r, g, b)
}

/// Converts 16 pixels per step with 32-bit accumulators, bit-exact with the
/// scalar path. The caller finishes the row.
pub(crate) unsafe fn neon_yuv_nv_to_rgba_row<
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

    let y_ptr = y_plane.as_ptr();
    let uv_ptr = uv_plane.as_ptr();
    let rgba_ptr = rgba.as_mut_ptr();

    let y_corr = vdupq_n_s16(range.bias_y as i16);
    let uv_corr = vdupq_n_s16(range.bias_uv as i16);
    let v_rounding = vdupq_n_s32(1 << (PRECISION - 1));
    let v_alpha = vdupq_n_u8(255u8);

    let mut cx = start_cx;
    let mut ux = start_ux;

    while cx + 16 <= width {
        let y_values = vld1q_u8(y_ptr.add(cx));

        let mut uv_values = vld2_u8(uv_ptr.add(ux));
        if order == YuvNVOrder::VU {
            uv_values = uint8x8x2_t(uv_values.1, uv_values.0);
        }

        let u_high_u8 = vzip2_u8(uv_values.0, uv_values.0);
        let v_high_u8 = vzip2_u8(uv_values.1, uv_values.1);
        let u_low_u8 = vzip1_u8(uv_values.0, uv_values.0);
        let v_low_u8 = vzip1_u8(uv_values.1, uv_values.1);

        let (r_low, g_low, b_low) = neon_nv_pixels8::<PRECISION>(
            vget_low_u8(y_values),
            u_low_u8,
            v_low_u8,
            y_corr,
            uv_corr,
            v_rounding,
            transform,
        );
        let (r_high, g_high, b_high) = neon_nv_pixels8::<PRECISION>(
            vget_high_u8(y_values),
            u_high_u8,
            v_high_u8,
            y_corr,
            uv_corr,
            v_rounding,
            transform,
        );

        let r_values = vcombine_u8(r_low, r_high);
        let g_values = vcombine_u8(g_low, g_high);
        let b_values = vcombine_u8(b_low, b_high);

        let dst_ptr = rgba_ptr.add(cx * channels);

        match destination_channels {
            YuvSourceChannels::Rgba => {
                vst4q_u8(dst_ptr, uint8x16x4_t(r_values, g_values, b_values, v_alpha));
            }
            YuvSourceChannels::Bgra => {
                vst4q_u8(dst_ptr, uint8x16x4_t(b_values, g_values, r_values, v_alpha));
            }
        }

        cx += 16;
        ux += 16;
    }

    ProcessedOffset { cx, ux }
}
