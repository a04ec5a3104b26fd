//! Collaborator traits
//!
//! Minutiae detection (binarization, direction maps, contour tracing and
//! false-minutiae removal) lives outside this crate. The scoring pipeline only
//! needs the result, so detection is expressed as a trait the caller supplies.

use crate::errors::{NfiqError, NfiqResult};
use crate::minutiae::Minutiae;
use crate::quality_map::QualityMap;

/// Borrowed raw grayscale image
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    /// Raw pixel bytes, row-major
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per pixel
    pub depth: u32,
    /// Scan resolution in pixels per inch
    pub ppi: u32,
}

impl<'a> ImageRef<'a> {
    /// Wrap a pixel buffer, checking it matches the declared geometry
    pub fn new(pixels: &'a [u8], width: u32, height: u32, depth: u32, ppi: u32) -> NfiqResult<Self> {
        if width == 0 || height == 0 {
            return Err(NfiqError::InvalidInput { reason: "image has zero width or height" });
        }
        if depth == 0 || depth % 8 != 0 {
            return Err(NfiqError::InvalidInput { reason: "image depth must be a whole number of bytes" });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(depth as usize / 8))
            .ok_or(NfiqError::InvalidInput { reason: "image dimensions overflow" })?;
        if pixels.len() != expected {
            return Err(NfiqError::DimensionMismatch {
                what: "image pixels",
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { pixels, width, height, depth, ppi })
    }
}

/// Opaque tuning values handed through to the detector unchanged
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorParams {
    /// Block size, in pixels, of the quality map grid (0 = detector default)
    pub block_size: u32,
    /// Whether the detector should remove likely false minutiae
    pub remove_false_minutiae: bool,
}

/// Everything the detector hands back for one image
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Minutiae in detector order
    pub minutiae: Minutiae,
    /// Block quality map
    pub quality_map: QualityMap,
    /// Width of the binarized image
    pub binarized_width: u32,
    /// Height of the binarized image
    pub binarized_height: u32,
}

/// External minutiae detector.
///
/// Calls are synchronous. A failing detector returns its own negative status
/// code, which the pipeline propagates verbatim as
/// [`NfiqError::Detection`]. Non-negative failure codes would read as
/// success or degenerate-image statuses, so the pipeline replaces them with
/// [`DETECTOR_FAILURE_CODE`](crate::errors::DETECTOR_FAILURE_CODE).
pub trait MinutiaeDetector {
    /// Detect minutiae and build the quality map for `image`
    fn detect(&self, image: &ImageRef<'_>, params: &DetectorParams) -> Result<Detection, i32>;
}

impl<D: MinutiaeDetector + ?Sized> MinutiaeDetector for &D {
    fn detect(&self, image: &ImageRef<'_>, params: &DetectorParams) -> Result<Detection, i32> {
        (**self).detect(image, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_geometry_checked() {
        let pixels = [0u8; 12];
        assert!(ImageRef::new(&pixels, 4, 3, 8, 500).is_ok());
        assert!(ImageRef::new(&pixels, 4, 4, 8, 500).is_err());
        assert!(ImageRef::new(&pixels, 0, 3, 8, 500).is_err());
        assert!(ImageRef::new(&pixels, 2, 3, 16, 500).is_ok());
        assert!(ImageRef::new(&pixels, 4, 3, 7, 500).is_err());
    }
}
