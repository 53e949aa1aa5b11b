//! # zenjp2k
//!
//! JPEG 2000 decode orchestration: validates untrusted compressed input
//! against resource limits, drives an external decompression engine
//! through its lifecycle, and serializes the decoded component planes
//! into a self-contained BMP byte stream (32-bit BGRA or 16-bit packed
//! 5-6-5).
//!
//! The decompression itself is a plugged-in capability ([`DecodeEngine`]);
//! this crate owns everything around it: input gating, container
//! sniffing, crop resolution, pixel budgets, channel mapping, and
//! bit-exact BMP output.
//!
//! ## Pipeline
//!
//! ```text
//! bytes → size gate → sniff → create/configure codec → read header
//!       → resolve crop → pixel budget → decode → map channels → BMP
//! ```
//!
//! Every resource the engine holds is scoped to one request and released
//! on every exit path, success or failure. Errors are plain return
//! values ([`Jp2kError`]); there is no shared error state.
//!
//! ## Usage
//!
//! ```
//! use zenjp2k::{ColorFormat, CropSpec, DecodeEngine, DecodeRequest, Jp2kError, Limits, Unstoppable};
//!
//! /// Top-left quarter of the image as a 32-bit BMP.
//! fn thumbnail<E: DecodeEngine>(engine: &E, data: &[u8]) -> Result<Vec<u8>, Jp2kError> {
//!     DecodeRequest::new(engine, data)
//!         .with_limits(Limits {
//!             max_pixels: Some(16_000_000),
//!             max_memory_bytes: Some(512 * 1024 * 1024),
//!         })
//!         .with_crop(CropSpec::Ratios { left: 0.0, top: 0.0, right: 0.5, bottom: 0.5 })
//!         .to_bmp(ColorFormat::Argb8888, Unstoppable)
//! }
//! ```
//!
//! ## Non-Goals
//!
//! - JPEG 2000 bitstream decompression (entropy coding, wavelets); that
//!   is the engine's job
//! - Encoding compressed JPEG 2000 data (decode-only)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod channels;
mod decode;
mod engine;
mod error;
mod format;
mod image;
mod limits;
mod region;
mod source;

// Re-exports
pub use bmp::{ColorFormat, encode_bmp};
pub use channels::{ResolvedChannels, resolve_channels};
pub use decode::DecodeRequest;
pub use engine::{DecodeEngine, DecoderParams, EngineCodec};
pub use enough::{Stop, Unstoppable};
pub use error::Jp2kError;
pub use format::{CodecFormat, MIN_INPUT_LEN};
pub use image::{Component, DecodedImage};
pub use limits::Limits;
pub use region::{CropSpec, Region};
pub use source::BufferReader;
