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
use crate::yuv_error::{check_dimensions, rgba_buffer_size};
use crate::{yuv_bi_planar_to_rgbx, YuvBiPlanarImage, YuvError, YuvNVOrder, YuvSourceChannels};
use tracing::{debug, trace};

/// Converts a stream of NV12/NV21 frames into a reusable 4 channels buffer.
///
/// The target is reallocated only when frame dimensions change, so a camera
/// delivering frames of constant size converts without allocations.
///
/// # Examples
///
/// ```
/// use nv21rgb::YuvToRgbConverter;
///
/// let mut converter = YuvToRgbConverter::default();
/// let nv21 = [16, 16, 16, 16, 235, 235, 235, 235, 128, 128, 128, 128];
/// let rgba = converter.convert(&nv21, 4, 2).unwrap();
/// assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
/// assert_eq!(&rgba[16..20], &[255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct YuvToRgbConverter {
    order: YuvNVOrder,
    layout: YuvSourceChannels,
    width: u32,
    height: u32,
    target: Vec<u8>,
}

impl Default for YuvToRgbConverter {
    /// NV21 to RGBA.
    fn default() -> Self {
        YuvToRgbConverter::new(YuvNVOrder::VU, YuvSourceChannels::Rgba)
    }
}

impl YuvToRgbConverter {
    pub fn new(order: YuvNVOrder, layout: YuvSourceChannels) -> Self {
        YuvToRgbConverter {
            order,
            layout,
            width: 0,
            height: 0,
            target: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn order(&self) -> YuvNVOrder {
        self.order
    }

    #[inline]
    pub fn layout(&self) -> YuvSourceChannels {
        self.layout
    }

    /// Last converted frame, empty before the first [reset](Self::reset).
    #[inline]
    pub fn frame(&self) -> &[u8] {
        &self.target
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.target
    }

    /// Prepares the target for frames of the given size.
    ///
    /// Storage is kept when dimensions are unchanged.
    pub fn reset(&mut self, width: u32, height: u32) -> Result<(), YuvError> {
        check_dimensions(width, height)?;
        if self.width == width && self.height == height {
            return Ok(());
        }
        let required = rgba_buffer_size(width, height)?;
        debug!(
            width,
            height,
            previous_width = self.width,
            previous_height = self.height,
            "reallocating conversion target"
        );
        self.target.clear();
        self.target.resize(required, 0);
        self.target.shrink_to(required);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Converts one frame and returns the converted pixels.
    ///
    /// # Errors
    ///
    /// Same as [crate::yuv_nv21_to_rgba]. On error the previous frame
    /// contents must be treated as undefined.
    pub fn convert(&mut self, frame: &[u8], width: u32, height: u32) -> Result<&[u8], YuvError> {
        let image = YuvBiPlanarImage::from_nv(frame, width, height)?;
        self.reset(width, height)?;
        trace!(width, height, order = ?self.order, layout = ?self.layout, "converting frame");
        yuv_bi_planar_to_rgbx(&image, &mut self.target, self.order, self.layout)?;
        Ok(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nv_buffer_size, yuv_nv12_to_bgra, yuv_nv21_to_rgba, YuvErrorKind};

    fn gray_frame(width: u32, height: u32, luma: u8) -> Vec<u8> {
        let mut frame = vec![128u8; nv_buffer_size(width, height).unwrap()];
        frame[..(width * height) as usize].fill(luma);
        frame
    }

    #[test]
    fn test_converter_matches_free_function() {
        let frame: Vec<u8> = (0..nv_buffer_size(21, 5).unwrap())
            .map(|x| (x * 7 % 251) as u8)
            .collect();
        let mut expected = vec![0u8; 21 * 5 * 4];
        yuv_nv21_to_rgba(&frame, 21, 5, &mut expected).unwrap();
        let mut converter = YuvToRgbConverter::default();
        assert_eq!(converter.convert(&frame, 21, 5).unwrap(), &expected[..]);
        assert_eq!(converter.width(), 21);
        assert_eq!(converter.height(), 5);
        assert_eq!(converter.into_inner(), expected);
    }

    #[test]
    fn test_converter_nv12_bgra() {
        let frame: Vec<u8> = (0..nv_buffer_size(16, 4).unwrap())
            .map(|x| (x * 13 % 256) as u8)
            .collect();
        let mut expected = vec![0u8; 16 * 4 * 4];
        yuv_nv12_to_bgra(&frame, 16, 4, &mut expected).unwrap();
        let mut converter = YuvToRgbConverter::new(YuvNVOrder::UV, YuvSourceChannels::Bgra);
        assert_eq!(converter.convert(&frame, 16, 4).unwrap(), &expected[..]);
    }

    #[test]
    fn test_converter_reuses_storage() {
        let mut converter = YuvToRgbConverter::default();
        let frame = gray_frame(64, 48, 235);
        converter.convert(&frame, 64, 48).unwrap();
        let ptr = converter.frame().as_ptr();
        let frame = gray_frame(64, 48, 16);
        let rgba = converter.convert(&frame, 64, 48).unwrap();
        assert_eq!(rgba.as_ptr(), ptr);
        assert!(rgba.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_converter_follows_dimension_changes() {
        let mut converter = YuvToRgbConverter::default();
        converter.convert(&gray_frame(8, 8, 235), 8, 8).unwrap();
        assert_eq!(converter.frame().len(), 8 * 8 * 4);
        converter.convert(&gray_frame(3, 5, 235), 3, 5).unwrap();
        assert_eq!(converter.frame().len(), 3 * 5 * 4);
        assert!(converter
            .frame()
            .chunks_exact(4)
            .all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_converter_rejects_invalid_input() {
        let mut converter = YuvToRgbConverter::default();
        let err = converter.reset(0, 10).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidDimensions);
        let err = converter.convert(&[0u8; 11], 4, 2).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidBuffer);
        // failed calls leave the previous geometry in place
        assert_eq!(converter.width(), 0);
        assert!(converter.frame().is_empty());
    }
}
