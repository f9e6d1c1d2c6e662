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
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Which of the caller supplied buffers failed validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    /// The NV12/NV21 frame.
    Source,
    /// The RGBA/BGRA target.
    Destination,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YuvErrorKind {
    InvalidDimensions,
    InvalidBuffer,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum YuvError {
    /// Width or height is zero, or the frame does not fit in the address space.
    InvalidDimensions(ImageSize),
    /// A buffer is shorter than the frame geometry requires.
    InvalidBuffer(BufferKind, MismatchedSize),
}

impl YuvError {
    pub const fn kind(&self) -> YuvErrorKind {
        match self {
            YuvError::InvalidDimensions(_) => YuvErrorKind::InvalidDimensions,
            YuvError::InvalidBuffer(_, _) => YuvErrorKind::InvalidBuffer,
        }
    }
}

impl Display for BufferKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferKind::Source => f.write_str("Source"),
            BufferKind::Destination => f.write_str("Destination"),
        }
    }
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::InvalidDimensions(size) => f.write_fmt(format_args!(
                "Invalid image dimensions {}x{}, both must be positive and addressable",
                size.width, size.height
            )),
            YuvError::InvalidBuffer(kind, size) => f.write_fmt(format_args!(
                "{} buffer must have size at least {} but it is {}",
                kind, size.expected, size.received
            )),
        }
    }
}

impl Error for YuvError {}

#[inline]
fn invalid_dimensions(width: u32, height: u32) -> YuvError {
    YuvError::InvalidDimensions(ImageSize { width, height })
}

#[inline]
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(invalid_dimensions(width, height));
    }
    rgba_buffer_size(width, height).map(|_| ())
}

/// Minimum length of a bi-planar 4:2:0 frame:
/// `width * height + 2 * ceil(width / 2) * ceil(height / 2)`.
pub fn nv_buffer_size(width: u32, height: u32) -> Result<usize, YuvError> {
    let luma = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| invalid_dimensions(width, height))?;
    let chroma = nv_chroma_stride(width)
        .checked_mul((height as usize).div_ceil(2))
        .ok_or_else(|| invalid_dimensions(width, height))?;
    luma.checked_add(chroma)
        .ok_or_else(|| invalid_dimensions(width, height))
}

/// Minimum length of a 4 channels target: `width * height * 4`.
pub fn rgba_buffer_size(width: u32, height: u32) -> Result<usize, YuvError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|x| x.checked_mul(4))
        .ok_or_else(|| invalid_dimensions(width, height))
}

/// Bytes per row of the interleaved chroma plane.
#[inline]
pub(crate) const fn nv_chroma_stride(width: u32) -> usize {
    (width as usize).div_ceil(2) * 2
}

#[inline]
pub(crate) fn check_nv_source(data: &[u8], width: u32, height: u32) -> Result<(), YuvError> {
    check_dimensions(width, height)?;
    let expected = nv_buffer_size(width, height)?;
    if data.len() < expected {
        return Err(YuvError::InvalidBuffer(
            BufferKind::Source,
            MismatchedSize {
                expected,
                received: data.len(),
            },
        ));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgba_destination(arr: &[u8], width: u32, height: u32) -> Result<(), YuvError> {
    check_dimensions(width, height)?;
    let expected = rgba_buffer_size(width, height)?;
    if arr.len() < expected {
        return Err(YuvError::InvalidBuffer(
            BufferKind::Destination,
            MismatchedSize {
                expected,
                received: arr.len(),
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nv_buffer_size_even_and_odd() {
        assert_eq!(nv_buffer_size(4, 2).unwrap(), 12);
        assert_eq!(nv_buffer_size(640, 480).unwrap(), 640 * 480 * 3 / 2);
        // 3x3 luma, 2x2 chroma pairs
        assert_eq!(nv_buffer_size(3, 3).unwrap(), 9 + 8);
        assert_eq!(nv_buffer_size(1, 1).unwrap(), 3);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            check_dimensions(0, 10).unwrap_err().kind(),
            YuvErrorKind::InvalidDimensions
        );
        assert_eq!(
            check_dimensions(10, 0).unwrap_err(),
            YuvError::InvalidDimensions(ImageSize {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_source_one_byte_short() {
        let data = vec![0u8; 11];
        let err = check_nv_source(&data, 4, 2).unwrap_err();
        assert_eq!(
            err,
            YuvError::InvalidBuffer(
                BufferKind::Source,
                MismatchedSize {
                    expected: 12,
                    received: 11
                }
            )
        );
        assert!(check_nv_source(&[0u8; 12], 4, 2).is_ok());
        assert!(check_nv_source(&[0u8; 20], 4, 2).is_ok());
    }

    #[test]
    fn test_destination_one_byte_short() {
        let data = vec![0u8; 31];
        let err = check_rgba_destination(&data, 4, 2).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidBuffer);
        assert!(err.to_string().contains("Destination"));
        assert!(check_rgba_destination(&[0u8; 32], 4, 2).is_ok());
    }

    #[test]
    fn test_overflowing_dimensions() {
        assert_eq!(
            rgba_buffer_size(u32::MAX, u32::MAX).unwrap_err().kind(),
            YuvErrorKind::InvalidDimensions
        );
    }
}
