//! Capability interface of the external decompression engine.
//!
//! The pipeline is generic over [`DecodeEngine`] so the orchestration
//! logic can be exercised with a substitute engine in tests, and so a
//! real binding (e.g. over an OpenJPEG-style C library) stays a thin
//! adapter.

use crate::format::CodecFormat;
use crate::image::DecodedImage;
use crate::region::Region;
use crate::source::BufferReader;

/// Decoder configuration applied before any stream work.
///
/// `reduce` discards that many highest resolution levels; `layers`
/// bounds how many quality layers are decoded (0 = all).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderParams {
    pub reduce: u32,
    pub layers: u32,
}

/// Factory capability of the engine.
pub trait DecodeEngine {
    /// Per-request codec instance. Dropping it must release every
    /// resource the engine holds for the request; the pipeline relies on
    /// that on all exit paths.
    type Codec: EngineCodec;

    /// Create a decompressor for the sniffed container kind, or `None`
    /// if the engine cannot provide one.
    fn create(&self, format: CodecFormat) -> Option<Self::Codec>;
}

/// One decode lifecycle: configure, read header, optionally restrict the
/// decode area, decode.
pub trait EngineCodec {
    /// Apply decoder parameters. `false` aborts the request before any
    /// stream work begins.
    fn configure(&mut self, params: &DecoderParams) -> bool;

    /// Parse the container header from `source`, yielding image geometry
    /// and component count (planes still empty). `None` = unparseable.
    fn read_header(&mut self, source: &mut BufferReader<'_>) -> Option<DecodedImage>;

    /// Restrict decoding to `region`, given in absolute image
    /// coordinates already validated against the header geometry.
    fn set_decode_area(&mut self, region: Region) -> bool;

    /// Decompress sample planes into `image`. After a successful area
    /// restriction this fills planes covering the restricted area only
    /// and updates the geometry to match. On `false` the caller
    /// discards the partially-populated image.
    fn decode(&mut self, source: &mut BufferReader<'_>, image: &mut DecodedImage) -> bool;
}
