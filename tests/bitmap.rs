//! Unit tests: BMP byte layout, region resolution, channel mapping,
//! container sniffing, and the buffer reader.

use zenjp2k::*;

fn geometry(width: u32, height: u32) -> DecodedImage {
    DecodedImage {
        x0: 0,
        y0: 0,
        x1: width,
        y1: height,
        comps: vec![],
    }
}

/// Image with one plane per (samples, alpha flag) pair.
fn image_with_planes(width: u32, height: u32, planes: &[(Vec<i32>, bool)]) -> DecodedImage {
    DecodedImage {
        x0: 0,
        y0: 0,
        x1: width,
        y1: height,
        comps: planes
            .iter()
            .map(|(data, alpha)| Component {
                alpha: *alpha,
                data: data.clone(),
            })
            .collect(),
    }
}

// ── Region resolution ────────────────────────────────────────────────

#[test]
fn ratio_crop_resolves_by_floor() {
    let image = geometry(100, 200);
    let region = CropSpec::Ratios {
        left: 0.0,
        top: 0.0,
        right: 0.5,
        bottom: 0.5,
    }
    .resolve(&image)
    .unwrap();
    assert_eq!(
        region,
        Some(Region {
            x0: 0,
            y0: 0,
            x1: 50,
            y1: 100
        })
    );
}

#[test]
fn ratio_crop_clamps_upper_bounds_to_the_edge() {
    let image = geometry(100, 200);
    let region = CropSpec::Ratios {
        left: 0.0,
        top: 0.0,
        right: 1.1,
        bottom: 1.1,
    }
    .resolve(&image)
    .unwrap();
    assert_eq!(
        region,
        Some(Region {
            x0: 0,
            y0: 0,
            x1: 100,
            y1: 200
        })
    );
}

#[test]
fn degenerate_ratio_crop_is_out_of_bounds() {
    let image = geometry(100, 200);
    let err = CropSpec::Ratios {
        left: 0.5,
        top: 0.5,
        right: 0.5,
        bottom: 0.5,
    }
    .resolve(&image)
    .unwrap_err();
    assert!(matches!(err, Jp2kError::RegionOutOfBounds { .. }));
}

#[test]
fn absolute_crop_is_not_clamped() {
    let image = geometry(100, 200);
    for (right, bottom) in [(101, 200), (100, 201)] {
        let err = CropSpec::Pixels {
            left: 0,
            top: 0,
            right,
            bottom,
        }
        .resolve(&image)
        .unwrap_err();
        assert!(matches!(err, Jp2kError::RegionOutOfBounds { .. }));
    }
}

#[test]
fn inverted_or_empty_crop_is_out_of_bounds() {
    let image = geometry(100, 200);
    for (left, right) in [(50, 50), (60, 50)] {
        let err = CropSpec::Pixels {
            left,
            top: 0,
            right,
            bottom: 10,
        }
        .resolve(&image)
        .unwrap_err();
        assert!(matches!(err, Jp2kError::RegionOutOfBounds { .. }));
    }
}

#[test]
fn zero_upper_bounds_mean_full_frame() {
    let image = geometry(100, 200);
    for spec in [
        CropSpec::Pixels {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        },
        CropSpec::Ratios {
            left: 0.0,
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
        },
        // Nonzero lower bounds cannot rescue zero upper bounds: still
        // indistinguishable from "no region requested".
        CropSpec::Pixels {
            left: 7,
            top: 7,
            right: 0,
            bottom: 0,
        },
    ] {
        assert_eq!(spec.resolve(&image).unwrap(), None, "{spec:?}");
    }
}

#[test]
fn crop_respects_nonzero_image_origin() {
    let image = DecodedImage {
        x0: 10,
        y0: 10,
        x1: 110,
        y1: 210,
        comps: vec![],
    };
    let region = CropSpec::Pixels {
        left: 10,
        top: 10,
        right: 60,
        bottom: 110,
    }
    .resolve(&image)
    .unwrap();
    assert_eq!(
        region,
        Some(Region {
            x0: 10,
            y0: 10,
            x1: 60,
            y1: 110
        })
    );

    let err = CropSpec::Pixels {
        left: 5,
        top: 10,
        right: 60,
        bottom: 110,
    }
    .resolve(&image)
    .unwrap_err();
    assert!(matches!(err, Jp2kError::RegionOutOfBounds { .. }));
}

// ── Container sniffing ───────────────────────────────────────────────

#[test]
fn sniff_recognizes_the_signature_box() {
    assert_eq!(
        CodecFormat::sniff(&[0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50]),
        CodecFormat::Jp2
    );
    assert_eq!(
        CodecFormat::sniff(&[0x00, 0x00, 0x00, 0x0D, 0x6A, 0x50]),
        CodecFormat::J2k
    );
    // Raw codestream SOC marker
    assert_eq!(CodecFormat::sniff(&[0xFF, 0x4F, 0xFF, 0x51]), CodecFormat::J2k);
}

// ── BufferReader ─────────────────────────────────────────────────────

#[test]
fn reader_reads_sequentially_then_signals_end() {
    let mut reader = BufferReader::new(&[1, 2, 3, 4, 5]);
    assert_eq!(reader.len(), 5);

    let mut buf = [0u8; 2];
    assert_eq!(reader.read(&mut buf), Some(2));
    assert_eq!(buf, [1, 2]);
    assert_eq!(reader.position(), 2);

    // Short read at the end of the range
    let mut buf = [0u8; 4];
    assert_eq!(reader.read(&mut buf), Some(3));
    assert_eq!(&buf[..3], &[3, 4, 5]);
    assert_eq!(reader.position(), 5);

    assert_eq!(reader.read(&mut buf), None);
}

#[test]
fn reader_on_empty_range_signals_end_immediately() {
    let mut reader = BufferReader::new(&[]);
    assert!(reader.is_empty());
    assert_eq!(reader.read(&mut [0u8; 1]), None);
}

#[test]
fn reader_skip_clamps_at_end() {
    let mut reader = BufferReader::new(&[1, 2, 3]);
    assert_eq!(reader.skip(2), 2);
    assert_eq!(reader.skip(5), 1);
    assert_eq!(reader.position(), 3);
    assert_eq!(reader.skip(1), 0);
}

// ── Channel mapping ──────────────────────────────────────────────────

#[test]
fn one_plane_is_gray_without_alpha() {
    let image = image_with_planes(2, 1, &[(vec![1, 2], false)]);
    let channels = resolve_channels(&image).unwrap();
    assert_eq!(channels.red, &[1, 2]);
    assert_eq!(channels.green, &[1, 2]);
    assert_eq!(channels.blue, &[1, 2]);
    assert!(channels.alpha.is_none());
}

#[test]
fn second_plane_is_alpha_only_when_flagged() {
    let flagged = image_with_planes(2, 1, &[(vec![1, 2], false), (vec![9, 9], true)]);
    let channels = resolve_channels(&flagged).unwrap();
    assert_eq!(channels.red, &[1, 2]);
    assert_eq!(channels.alpha, Some(&[9, 9][..]));

    let unflagged = image_with_planes(2, 1, &[(vec![1, 2], false), (vec![9, 9], false)]);
    let channels = resolve_channels(&unflagged).unwrap();
    assert!(channels.alpha.is_none());
}

#[test]
fn three_planes_map_to_rgb_without_alpha() {
    let image = image_with_planes(
        1,
        1,
        &[(vec![1], false), (vec![2], false), (vec![3], false)],
    );
    let channels = resolve_channels(&image).unwrap();
    assert_eq!((channels.red, channels.green, channels.blue), (&[1][..], &[2][..], &[3][..]));
    assert!(channels.alpha.is_none());
}

#[test]
fn flagged_plane_wins_over_positional_fallback() {
    // Plane 4 carries the flag, so it beats the plane-3 convention.
    let image = image_with_planes(
        1,
        1,
        &[
            (vec![1], false),
            (vec![2], false),
            (vec![3], false),
            (vec![4], false),
            (vec![5], true),
        ],
    );
    let channels = resolve_channels(&image).unwrap();
    assert_eq!(channels.alpha, Some(&[5][..]));
}

#[test]
fn unflagged_fourth_plane_is_alpha_by_convention() {
    let image = image_with_planes(
        1,
        1,
        &[
            (vec![1], false),
            (vec![2], false),
            (vec![3], false),
            (vec![4], false),
        ],
    );
    let channels = resolve_channels(&image).unwrap();
    assert_eq!(channels.alpha, Some(&[4][..]));
}

#[test]
fn short_plane_is_a_decode_error() {
    let image = image_with_planes(2, 2, &[(vec![1, 2, 3], false)]);
    let err = resolve_channels(&image).unwrap_err();
    assert!(matches!(err, Jp2kError::Decode(_)));
}

// ── BMP byte layout ──────────────────────────────────────────────────

#[test]
fn argb8888_headers_and_pixels_are_bit_exact() {
    // 2x2 with distinct corners: red/green/blue/white, alpha per pixel.
    let image = image_with_planes(
        2,
        2,
        &[
            (vec![255, 0, 0, 255], false),
            (vec![0, 255, 0, 255], false),
            (vec![0, 0, 255, 255], false),
            (vec![128, 255, 255, 255], false),
        ],
    );
    let channels = resolve_channels(&image).unwrap();
    let bmp = encode_bmp(2, 2, &channels, ColorFormat::Argb8888, Unstoppable).unwrap();

    assert_eq!(bmp.len(), 54 + 16);
    assert_eq!(&bmp[0..2], b"BM");
    assert_eq!(u32::from_le_bytes(bmp[2..6].try_into().unwrap()), 70);
    assert_eq!(u32::from_le_bytes(bmp[6..10].try_into().unwrap()), 0);
    assert_eq!(u32::from_le_bytes(bmp[10..14].try_into().unwrap()), 54);
    assert_eq!(u32::from_le_bytes(bmp[14..18].try_into().unwrap()), 40);
    assert_eq!(u32::from_le_bytes(bmp[18..22].try_into().unwrap()), 2);
    // Top-down rows: the height field is negative
    assert_eq!(i32::from_le_bytes(bmp[22..26].try_into().unwrap()), -2);
    assert_eq!(u16::from_le_bytes(bmp[26..28].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(bmp[28..30].try_into().unwrap()), 32);
    assert_eq!(u32::from_le_bytes(bmp[30..34].try_into().unwrap()), 0);

    // B,G,R,A per pixel, row-major from the top
    assert_eq!(
        &bmp[54..],
        &[
            0, 0, 255, 128, // red, alpha 128
            0, 255, 0, 255, // green
            255, 0, 0, 255, // blue
            255, 255, 255, 255, // white
        ]
    );
}

#[test]
fn rgb565_headers_masks_and_pixels_are_bit_exact() {
    let image = image_with_planes(
        2,
        2,
        &[
            (vec![255, 0, 0, 255], false),
            (vec![0, 255, 0, 255], false),
            (vec![0, 0, 255, 255], false),
        ],
    );
    let channels = resolve_channels(&image).unwrap();
    let bmp = encode_bmp(2, 2, &channels, ColorFormat::Rgb565, Unstoppable).unwrap();

    // 14 + 40 + 12 header bytes, then two 4-byte rows
    assert_eq!(bmp.len(), 66 + 8);
    assert_eq!(u32::from_le_bytes(bmp[2..6].try_into().unwrap()), 74);
    assert_eq!(u32::from_le_bytes(bmp[10..14].try_into().unwrap()), 66);
    assert_eq!(u16::from_le_bytes(bmp[28..30].try_into().unwrap()), 16);
    // BI_BITFIELDS with 5-6-5 masks
    assert_eq!(u32::from_le_bytes(bmp[30..34].try_into().unwrap()), 3);
    assert_eq!(u32::from_le_bytes(bmp[54..58].try_into().unwrap()), 0xF800);
    assert_eq!(u32::from_le_bytes(bmp[58..62].try_into().unwrap()), 0x07E0);
    assert_eq!(u32::from_le_bytes(bmp[62..66].try_into().unwrap()), 0x001F);

    let words: Vec<u16> = bmp[66..]
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(words, [0xF800, 0x07E0, 0x001F, 0xFFFF]);
}

#[test]
fn rgb565_rows_pad_to_four_bytes() {
    // 3-pixel rows are 6 bytes of samples plus 2 bytes of padding.
    let image = image_with_planes(3, 2, &[(vec![255; 6], false)]);
    let channels = resolve_channels(&image).unwrap();
    let bmp = encode_bmp(3, 2, &channels, ColorFormat::Rgb565, Unstoppable).unwrap();

    assert_eq!(bmp.len(), 66 + 2 * 8);
    assert_eq!(u32::from_le_bytes(bmp[2..6].try_into().unwrap()), 82);
    for row in 0..2 {
        let start = 66 + row * 8;
        assert_eq!(&bmp[start + 6..start + 8], &[0, 0], "row {row} padding");
    }
}

#[test]
fn argb8888_has_no_row_padding() {
    let image = image_with_planes(3, 1, &[(vec![1, 2, 3], false)]);
    let channels = resolve_channels(&image).unwrap();
    let bmp = encode_bmp(3, 1, &channels, ColorFormat::Argb8888, Unstoppable).unwrap();
    assert_eq!(bmp.len(), 54 + 12);
}

#[test]
fn encode_rejects_planes_shorter_than_geometry() {
    let image = image_with_planes(2, 1, &[(vec![1, 2], false)]);
    let channels = resolve_channels(&image).unwrap();
    let err = encode_bmp(3, 3, &channels, ColorFormat::Argb8888, Unstoppable).unwrap_err();
    assert!(matches!(err, Jp2kError::Decode(_)));
}

#[test]
fn samples_use_low_eight_bits_only() {
    // Samples are stored widened; 0x1FF must land as 0xFF, not saturate.
    let image = image_with_planes(2, 1, &[(vec![0x1FF, 0x100], false)]);
    let channels = resolve_channels(&image).unwrap();
    let bmp = encode_bmp(2, 1, &channels, ColorFormat::Argb8888, Unstoppable).unwrap();
    assert_eq!(&bmp[54..], &[255, 255, 255, 255, 0, 0, 0, 255]);
}

// ── Typed pixel views ────────────────────────────────────────────────

#[cfg(feature = "rgb")]
#[test]
fn rgba8_view_interleaves_with_opaque_fallback() {
    let image = image_with_planes(2, 1, &[(vec![10, 250], false)]);
    let pixels = image.to_rgba8().unwrap();
    assert_eq!(
        pixels,
        [
            rgb::RGBA8 {
                r: 10,
                g: 10,
                b: 10,
                a: 255
            },
            rgb::RGBA8 {
                r: 250,
                g: 250,
                b: 250,
                a: 255
            },
        ]
    );
}
