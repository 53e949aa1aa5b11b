//! BMP encoders: 32-bit BGRA and 16-bit packed 5-6-5.
//!
//! Both outputs are top-down (negative height in the info header) and
//! built as one contiguous buffer: file header, info header, optional
//! channel masks, then pixel rows.

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use crate::channels::ResolvedChannels;
use crate::error::Jp2kError;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
/// Three DWORD channel masks follow the info header under BI_BITFIELDS.
const MASK_LEN: usize = 12;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

const RED_MASK_565: u32 = 0xF800;
const GREEN_MASK_565: u32 = 0x07E0;
const BLUE_MASK_565: u32 = 0x001F;

pub(crate) fn encode_argb8888(
    width: u32,
    height: u32,
    channels: &ResolvedChannels<'_>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, Jp2kError> {
    let w = width as usize;
    let h = height as usize;
    let header_len = FILE_HEADER_LEN + INFO_HEADER_LEN;
    // 32-bit rows are width*4 bytes and always a multiple of 4.
    let row_stride = w
        .checked_mul(4)
        .ok_or_else(|| output_too_large(width, height))?;
    let file_size = row_stride
        .checked_mul(h)
        .and_then(|p| p.checked_add(header_len))
        .ok_or_else(|| output_too_large(width, height))?;

    let mut out = alloc_exact(file_size)?;
    write_headers(&mut out, file_size, width, height, 32, BI_RGB, header_len);

    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        let base = row * w;
        match channels.alpha {
            Some(a) => {
                for col in 0..w {
                    let idx = base + col;
                    out.extend_from_slice(&[
                        channels.blue[idx] as u8,
                        channels.green[idx] as u8,
                        channels.red[idx] as u8,
                        a[idx] as u8,
                    ]);
                }
            }
            None => {
                for col in 0..w {
                    let idx = base + col;
                    out.extend_from_slice(&[
                        channels.blue[idx] as u8,
                        channels.green[idx] as u8,
                        channels.red[idx] as u8,
                        0xFF,
                    ]);
                }
            }
        }
    }

    Ok(out)
}

pub(crate) fn encode_rgb565(
    width: u32,
    height: u32,
    channels: &ResolvedChannels<'_>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, Jp2kError> {
    let w = width as usize;
    let h = height as usize;
    let header_len = FILE_HEADER_LEN + INFO_HEADER_LEN + MASK_LEN;
    let row_bytes = w
        .checked_mul(2)
        .ok_or_else(|| output_too_large(width, height))?;
    // Rows pad up to a 4-byte boundary.
    let row_stride = row_bytes
        .div_ceil(4)
        .checked_mul(4)
        .ok_or_else(|| output_too_large(width, height))?;
    let file_size = row_stride
        .checked_mul(h)
        .and_then(|p| p.checked_add(header_len))
        .ok_or_else(|| output_too_large(width, height))?;

    let mut out = alloc_exact(file_size)?;
    write_headers(&mut out, file_size, width, height, 16, BI_BITFIELDS, header_len);
    out.extend_from_slice(&RED_MASK_565.to_le_bytes());
    out.extend_from_slice(&GREEN_MASK_565.to_le_bytes());
    out.extend_from_slice(&BLUE_MASK_565.to_le_bytes());

    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        let base = row * w;
        for col in 0..w {
            let idx = base + col;
            let r = ((channels.red[idx] as u16) >> 3) & 0x1F;
            let g = ((channels.green[idx] as u16) >> 2) & 0x3F;
            let b = ((channels.blue[idx] as u16) >> 3) & 0x1F;
            out.extend_from_slice(&((r << 11) | (g << 5) | b).to_le_bytes());
        }
        out.extend(core::iter::repeat_n(0u8, row_stride - row_bytes));
    }

    Ok(out)
}

fn write_headers(
    out: &mut Vec<u8>,
    file_size: usize,
    width: u32,
    height: u32,
    bpp: u16,
    compression: u32,
    data_offset: usize,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes); negative height marks rows top-down
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).wrapping_neg().to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // image size, 0 permitted
    out.extend_from_slice(&0i32.to_le_bytes()); // x pixels per meter
    out.extend_from_slice(&0i32.to_le_bytes()); // y pixels per meter
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

fn alloc_exact(file_size: usize) -> Result<Vec<u8>, Jp2kError> {
    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|_| Jp2kError::Memory(format!("cannot allocate {file_size} byte output")))?;
    Ok(out)
}

fn output_too_large(width: u32, height: u32) -> Jp2kError {
    Jp2kError::Memory(format!("output size overflows for {width}x{height}"))
}
