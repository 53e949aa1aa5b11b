//! BMP serialization of decoded component planes.

mod encode;

use alloc::vec::Vec;
use enough::Stop;

use crate::channels::ResolvedChannels;
use crate::error::Jp2kError;

/// Output pixel encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 32-bit true color: B,G,R,A bytes per pixel, no row padding.
    Argb8888,
    /// 16-bit packed 5-6-5 true color with BI_BITFIELDS channel masks.
    Rgb565,
}

impl ColorFormat {
    /// Output bytes per pixel. Also the divisor that derives the
    /// input-size ceiling from the memory budget.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::Argb8888 => 4,
            ColorFormat::Rgb565 => 2,
        }
    }
}

/// Serialize resolved channel planes to a BMP byte stream.
///
/// `width`/`height` must describe the geometry the channels were
/// resolved from; planes that do not cover it are rejected.
pub fn encode_bmp(
    width: u32,
    height: u32,
    channels: &ResolvedChannels<'_>,
    format: ColorFormat,
    stop: impl Stop,
) -> Result<Vec<u8>, Jp2kError> {
    encode(width, height, channels, format, &stop)
}

pub(crate) fn encode(
    width: u32,
    height: u32,
    channels: &ResolvedChannels<'_>,
    format: ColorFormat,
    stop: &dyn Stop,
) -> Result<Vec<u8>, Jp2kError> {
    let expected = u64::from(width) * u64::from(height);
    let covers = |p: &[i32]| p.len() as u64 >= expected;
    if !covers(channels.red)
        || !covers(channels.green)
        || !covers(channels.blue)
        || channels.alpha.is_some_and(|a| !covers(a))
    {
        return Err(Jp2kError::Decode(alloc::string::String::from(
            "component plane shorter than output geometry",
        )));
    }

    match format {
        ColorFormat::Argb8888 => encode::encode_argb8888(width, height, channels, stop),
        ColorFormat::Rgb565 => encode::encode_rgb565(width, height, channels, stop),
    }
}
