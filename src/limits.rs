/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Both checks run before any
/// sample decompression is attempted.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    /// Maximum pixel count (width * height) of the requested output.
    ///
    /// A cropped request is measured by its crop, not the full image.
    pub max_pixels: Option<u64>,
    /// Overall memory budget. Bounds the accepted input length at
    /// `max_memory_bytes / bytes_per_pixel` of the output encoding.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Largest accepted input length for an output encoding.
    pub(crate) fn max_input_len(&self, bytes_per_pixel: usize) -> Option<u64> {
        self.max_memory_bytes.map(|m| m / bytes_per_pixel as u64)
    }

    /// Check requested output dimensions against the pixel ceiling.
    pub(crate) fn check_pixels(&self, width: u32, height: u32) -> Result<(), crate::Jp2kError> {
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::Jp2kError::PixelBudget {
                    pixels,
                    max_pixels: max_px,
                });
            }
        }
        Ok(())
    }
}
