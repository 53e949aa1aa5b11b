use alloc::string::String;
use enough::StopReason;

/// Errors from the JPEG 2000 decode-to-bitmap pipeline.
///
/// Variants are mutually exclusive: each failed operation reports exactly
/// one, and none of them is retryable: every cause is either bad caller
/// input or resource exhaustion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Jp2kError {
    #[error("invalid input size: {0}")]
    InputSize(String),

    #[error("decoder setup failed: {0}")]
    DecoderSetup(String),

    #[error("container header could not be parsed")]
    Header,

    #[error("region ({x0},{y0})-({x1},{y1}) out of image bounds or degenerate")]
    RegionOutOfBounds { x0: u32, y0: u32, x1: u32, y1: u32 },

    #[error("decoded size {pixels} pixels exceeds limit {max_pixels}")]
    PixelBudget { pixels: u64, max_pixels: u64 },

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("output allocation failed: {0}")]
    Memory(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for Jp2kError {
    fn from(r: StopReason) -> Self {
        Jp2kError::Cancelled(r)
    }
}
