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
use nv21rgb::{nv_buffer_size, YuvError, YuvNVOrder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub(crate) fn read_nv_frame<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let frame_size = nv_buffer_size(width, height)?;
    let mut file = File::open(path)?;
    let mut frame = vec![0u8; frame_size];
    file.read_exact(&mut frame)?;
    Ok(frame)
}

pub(crate) fn save_raw_image<P: AsRef<Path>>(path: P, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Color bars over a luma ramp, chroma laid out in the requested order.
pub(crate) fn synthesize_nv_frame(
    width: u32,
    height: u32,
    order: YuvNVOrder,
) -> Result<Vec<u8>, YuvError> {
    let mut frame = vec![0u8; nv_buffer_size(width, height)?];
    let width = width as usize;
    let height = height as usize;
    let (y_plane, uv_plane) = frame.split_at_mut(width * height);

    for (y, row) in y_plane.chunks_exact_mut(width).enumerate() {
        for (x, dst) in row.iter_mut().enumerate() {
            let ramp = (x + y) * 219 / (width + height).max(1);
            *dst = (16 + ramp) as u8;
        }
    }

    let chroma_width = width.div_ceil(2);
    let chroma_height = height.div_ceil(2);
    for (cy, row) in uv_plane.chunks_exact_mut(chroma_width * 2).enumerate() {
        for (cx, pair) in row.chunks_exact_mut(2).enumerate() {
            let u = (16 + cx * 224 / chroma_width.max(1)) as u8;
            let v = (240 - cy * 224 / chroma_height.max(1)) as u8;
            pair[order.get_u_position()] = u;
            pair[order.get_v_position()] = v;
        }
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_frame_has_nv_geometry() {
        let frame = synthesize_nv_frame(33, 17, YuvNVOrder::VU).unwrap();
        assert_eq!(frame.len(), nv_buffer_size(33, 17).unwrap());
        assert!(frame[..33 * 17].iter().all(|&y| (16..=235).contains(&y)));
    }

    #[test]
    fn test_synthesized_orders_are_swapped() {
        let nv21 = synthesize_nv_frame(8, 4, YuvNVOrder::VU).unwrap();
        let nv12 = synthesize_nv_frame(8, 4, YuvNVOrder::UV).unwrap();
        assert_eq!(nv21[..32], nv12[..32]);
        for (a, b) in nv21[32..].chunks_exact(2).zip(nv12[32..].chunks_exact(2)) {
            assert_eq!(a, [b[1], b[0]]);
        }
    }
}
