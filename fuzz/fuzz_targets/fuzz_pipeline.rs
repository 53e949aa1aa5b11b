#![no_main]
use libfuzzer_sys::fuzz_target;
use zenjp2k::*;

/// Engine stand-in that fabricates a small image from the input prefix,
/// so the whole pipeline (sniffing, crop resolution, budgets, channel
/// mapping, BMP serialization) runs over arbitrary bytes.
struct FabricatingEngine;

struct FabricatingCodec;

impl DecodeEngine for FabricatingEngine {
    type Codec = FabricatingCodec;

    fn create(&self, _format: CodecFormat) -> Option<FabricatingCodec> {
        Some(FabricatingCodec)
    }
}

impl EngineCodec for FabricatingCodec {
    fn configure(&mut self, _params: &DecoderParams) -> bool {
        true
    }

    fn read_header(&mut self, source: &mut BufferReader<'_>) -> Option<DecodedImage> {
        let mut prefix = [0u8; 12];
        if source.read(&mut prefix)? < 12 {
            return None;
        }
        let width = u32::from(prefix[4] % 32) + 1;
        let height = u32::from(prefix[5] % 32) + 1;
        let comps = (0..usize::from(prefix[6] % 6))
            .map(|i| Component {
                alpha: prefix[7] & (1 << i) != 0,
                data: Vec::new(),
            })
            .collect();
        Some(DecodedImage {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
            comps,
        })
    }

    fn set_decode_area(&mut self, _region: Region) -> bool {
        true
    }

    fn decode(&mut self, source: &mut BufferReader<'_>, image: &mut DecodedImage) -> bool {
        let count = image.pixel_count() as usize;
        for comp in image.comps.iter_mut() {
            comp.data = (0..count as i32).collect();
        }
        source.skip(source.len());
        true
    }
}

fuzz_target!(|data: &[u8]| {
    let engine = FabricatingEngine;
    let limits = Limits {
        max_pixels: Some(4096),
        max_memory_bytes: Some(1 << 20),
    };

    // Full-frame and ratio-cropped requests must never panic.
    let _ = DecodeRequest::new(&engine, data)
        .with_limits(limits.clone())
        .to_bmp(ColorFormat::Argb8888, enough::Unstoppable);

    if let Some(&b) = data.first() {
        let _ = DecodeRequest::new(&engine, data)
            .with_limits(limits)
            .with_crop(CropSpec::Ratios {
                left: 0.0,
                top: 0.0,
                right: f64::from(b) / 255.0,
                bottom: 1.0,
            })
            .to_bmp(ColorFormat::Rgb565, enough::Unstoppable);
    }

    let _ = DecodeRequest::new(&engine, data).image_size(enough::Unstoppable);
});
