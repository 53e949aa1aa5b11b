//! Decode request orchestration.
//!
//! Drives an engine codec through its lifecycle (create, configure,
//! bind source, read header, restrict area, decode) with every failure
//! point mapped to one [`Jp2kError`] variant. Codec, source, and image
//! are all owned by the call frame, so every exit path releases them.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::{self, ColorFormat};
use crate::channels::resolve_channels;
use crate::engine::{DecodeEngine, DecoderParams, EngineCodec};
use crate::error::Jp2kError;
use crate::format::{CodecFormat, MIN_INPUT_LEN};
use crate::image::DecodedImage;
use crate::limits::Limits;
use crate::region::CropSpec;
use crate::source::BufferReader;

/// A single decode request over untrusted compressed bytes.
///
/// Configure with the builder methods, then finish with [`to_bmp`] or
/// [`image_size`]. Limits are enforced before decompression is
/// attempted; a cropped request is budgeted by its crop, not by the
/// full image.
///
/// [`to_bmp`]: DecodeRequest::to_bmp
/// [`image_size`]: DecodeRequest::image_size
pub struct DecodeRequest<'a, E: DecodeEngine> {
    engine: &'a E,
    data: &'a [u8],
    limits: Limits,
    crop: Option<CropSpec>,
    params: DecoderParams,
}

impl<'a, E: DecodeEngine> DecodeRequest<'a, E> {
    pub fn new(engine: &'a E, data: &'a [u8]) -> Self {
        Self {
            engine,
            data,
            limits: Limits::default(),
            crop: None,
            params: DecoderParams::default(),
        }
    }

    /// Apply resource limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Restrict decoding to a sub-rectangle of the image.
    pub fn with_crop(mut self, crop: CropSpec) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Override engine decoder parameters.
    pub fn with_params(mut self, params: DecoderParams) -> Self {
        self.params = params;
        self
    }

    /// Decode and serialize to a BMP byte stream in `format`.
    pub fn to_bmp(self, format: ColorFormat, stop: impl Stop) -> Result<Vec<u8>, Jp2kError> {
        let image = self.run(format.bytes_per_pixel(), &stop)?;
        let channels = resolve_channels(&image)?;
        bmp::encode(image.width(), image.height(), &channels, format, &stop)
    }

    /// Parse the header only and report image width and height.
    ///
    /// Performs no decode; crop and pixel-budget settings are not
    /// consulted, and with no output encoding in play the memory-derived
    /// input ceiling does not apply either.
    pub fn image_size(self, stop: impl Stop) -> Result<(u32, u32), Jp2kError> {
        if self.data.len() < MIN_INPUT_LEN {
            return Err(input_too_short(self.data.len()));
        }
        stop.check()?;
        let mut codec = self.open_codec()?;
        let mut source = BufferReader::new(self.data);
        let image = codec.read_header(&mut source).ok_or(Jp2kError::Header)?;
        Ok((image.width(), image.height()))
    }

    /// Sniff the container kind and produce a configured codec.
    fn open_codec(&self) -> Result<E::Codec, Jp2kError> {
        let format = CodecFormat::sniff(self.data);
        let mut codec = self.engine.create(format).ok_or_else(|| {
            Jp2kError::DecoderSetup(format!("engine cannot create a {format:?} decompressor"))
        })?;
        if !codec.configure(&self.params) {
            return Err(Jp2kError::DecoderSetup(String::from(
                "decoder rejected parameters",
            )));
        }
        Ok(codec)
    }

    fn run(self, bytes_per_pixel: usize, stop: &dyn Stop) -> Result<DecodedImage, Jp2kError> {
        if self.data.len() < MIN_INPUT_LEN {
            return Err(input_too_short(self.data.len()));
        }
        if let Some(max_len) = self.limits.max_input_len(bytes_per_pixel) {
            if self.data.len() as u64 > max_len {
                return Err(Jp2kError::InputSize(format!(
                    "input {} bytes exceeds ceiling {max_len}",
                    self.data.len()
                )));
            }
        }
        stop.check()?;

        let mut codec = self.open_codec()?;
        let mut source = BufferReader::new(self.data);
        let mut image = codec.read_header(&mut source).ok_or(Jp2kError::Header)?;

        let region = match self.crop {
            Some(crop) => crop.resolve(&image)?,
            None => None,
        };
        if let Some(region) = region {
            // Engine rejection of a validated region reports the same as
            // validation failure.
            if !codec.set_decode_area(region) {
                return Err(Jp2kError::RegionOutOfBounds {
                    x0: region.x0,
                    y0: region.y0,
                    x1: region.x1,
                    y1: region.y1,
                });
            }
        }

        // The budget applies to the requested output: a small crop of a
        // huge image passes even when the full frame would not.
        let (out_w, out_h) = match region {
            Some(r) => (r.width(), r.height()),
            None => (image.width(), image.height()),
        };
        self.limits.check_pixels(out_w, out_h)?;

        stop.check()?;
        if !codec.decode(&mut source, &mut image) {
            return Err(Jp2kError::Decode(String::from("engine decode failed")));
        }
        Ok(image)
    }
}

fn input_too_short(len: usize) -> Jp2kError {
    Jp2kError::InputSize(format!("input {len} bytes, need at least {MIN_INPUT_LEN}"))
}
