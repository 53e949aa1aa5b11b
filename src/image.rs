use alloc::vec::Vec;

/// One channel's full-resolution sample plane as produced by the engine.
#[derive(Clone, Debug, Default)]
pub struct Component {
    /// Whether the engine marked this plane as the alpha channel.
    pub alpha: bool,
    /// Dense row-major samples, `width * height` entries. Samples are
    /// stored widened; only the low 8 bits are meaningful for output.
    pub data: Vec<i32>,
}

/// A decoded image: geometry plus ordered component planes.
///
/// Geometry is origin plus exclusive bound (`width = x1 - x0`,
/// `height = y1 - y0`). Plane order is significant: it drives the
/// default channel assignment in [`resolve_channels`].
///
/// [`resolve_channels`]: crate::resolve_channels
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub comps: Vec<Component>,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Total output pixels, computed wide so huge geometry cannot wrap.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Interleave the resolved channels as RGBA8 pixels.
    ///
    /// Alpha is 255 everywhere when no alpha plane resolves.
    #[cfg(feature = "rgb")]
    pub fn to_rgba8(&self) -> Result<Vec<rgb::RGBA8>, crate::Jp2kError> {
        let channels = crate::resolve_channels(self)?;
        // resolve_channels validated every plane against the geometry,
        // so the count fits in usize here.
        let count = self.pixel_count() as usize;
        let mut out = Vec::new();
        out.try_reserve_exact(count).map_err(|_| {
            crate::Jp2kError::Memory(alloc::format!("cannot allocate {count} RGBA pixels"))
        })?;
        for i in 0..count {
            out.push(rgb::RGBA8 {
                r: channels.red[i] as u8,
                g: channels.green[i] as u8,
                b: channels.blue[i] as u8,
                a: channels.alpha.map_or(255, |a| a[i] as u8),
            });
        }
        Ok(out)
    }

    /// Decoded pixels as an [`imgref::ImgVec`] of RGBA8.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<rgb::RGBA8>, crate::Jp2kError> {
        let pixels = self.to_rgba8()?;
        Ok(imgref::ImgVec::new(
            pixels,
            self.width() as usize,
            self.height() as usize,
        ))
    }
}
