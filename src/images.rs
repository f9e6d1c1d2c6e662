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
use crate::yuv_error::{check_dimensions, check_nv_source, nv_chroma_stride, BufferKind};
use crate::{MismatchedSize, YuvError};

#[derive(Debug, Copy, Clone)]
/// Non-mutable representation of a Bi-Planar 4:2:0 YUV image (NV12 or NV21)
pub struct YuvBiPlanarImage<'a> {
    /// Luma plane, `width` bytes per row.
    pub y_plane: &'a [u8],
    /// Interleaved chroma plane, `2 * ceil(width / 2)` bytes per row,
    /// `ceil(height / 2)` rows.
    pub uv_plane: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> YuvBiPlanarImage<'a> {
    /// Splits a contiguous NV12/NV21 frame into its planes.
    ///
    /// Bytes past the end of the chroma plane are ignored.
    pub fn from_nv(data: &'a [u8], width: u32, height: u32) -> Result<Self, YuvError> {
        check_nv_source(data, width, height)?;
        let luma_size = width as usize * height as usize;
        let chroma_size = nv_chroma_stride(width) * (height as usize).div_ceil(2);
        let (y_plane, uv_plane) = data.split_at(luma_size);
        Ok(YuvBiPlanarImage {
            y_plane,
            uv_plane: &uv_plane[..chroma_size],
            width,
            height,
        })
    }

    /// Bytes per chroma row.
    #[inline]
    pub fn uv_stride(&self) -> usize {
        nv_chroma_stride(self.width)
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_dimensions(self.width, self.height)?;
        let luma_size = self.width as usize * self.height as usize;
        if self.y_plane.len() < luma_size {
            return Err(YuvError::InvalidBuffer(
                BufferKind::Source,
                MismatchedSize {
                    expected: luma_size,
                    received: self.y_plane.len(),
                },
            ));
        }
        let chroma_size = self.uv_stride() * (self.height as usize).div_ceil(2);
        if self.uv_plane.len() < chroma_size {
            return Err(YuvError::InvalidBuffer(
                BufferKind::Source,
                MismatchedSize {
                    expected: chroma_size,
                    received: self.uv_plane.len(),
                },
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::YuvErrorKind;

    #[test]
    fn test_split_nv_frame() {
        let data: Vec<u8> = (0..12u8).collect();
        let image = YuvBiPlanarImage::from_nv(&data, 4, 2).unwrap();
        assert_eq!(image.y_plane, &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(image.uv_plane, &[8, 9, 10, 11]);
        assert_eq!(image.uv_stride(), 4);
        assert!(image.check_constraints().is_ok());
    }

    #[test]
    fn test_split_odd_frame_ignores_trailing_bytes() {
        let data = vec![7u8; 64];
        let image = YuvBiPlanarImage::from_nv(&data, 3, 3).unwrap();
        assert_eq!(image.y_plane.len(), 9);
        assert_eq!(image.uv_stride(), 4);
        assert_eq!(image.uv_plane.len(), 8);
    }

    #[test]
    fn test_manual_planes_validated() {
        let y_plane = [0u8; 8];
        let uv_plane = [0u8; 3];
        let image = YuvBiPlanarImage {
            y_plane: &y_plane,
            uv_plane: &uv_plane,
            width: 4,
            height: 2,
        };
        assert_eq!(
            image.check_constraints().unwrap_err().kind(),
            YuvErrorKind::InvalidBuffer
        );
        let image = YuvBiPlanarImage {
            width: 0,
            ..image
        };
        assert_eq!(
            image.check_constraints().unwrap_err().kind(),
            YuvErrorKind::InvalidDimensions
        );
    }
}
