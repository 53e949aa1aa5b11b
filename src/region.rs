use crate::error::Jp2kError;
use crate::image::DecodedImage;

/// Requested crop: absolute pixel coordinates or fractional ratios.
///
/// A request whose resolved right and bottom bounds are both zero is
/// equivalent to no crop at all: a bound of 0 is indistinguishable from
/// no region being requested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CropSpec {
    /// Absolute pixel coordinates, used exactly as given.
    Pixels {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    },
    /// Fractional coordinates in `[0, 1]` of the image dimensions.
    /// Right/bottom past the edge clamp to the edge instead of failing.
    Ratios {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
}

/// A validated sub-rectangle in absolute image coordinates.
///
/// Invariant: `x0 < x1`, `y0 < y1`, and the rectangle lies inside the
/// image it was resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

impl CropSpec {
    /// Resolve against the image geometry. `Ok(None)` means full frame.
    ///
    /// Ratio coordinates are `floor(ratio * dimension)`; only the upper
    /// bounds are clamped to the image edge. Bounds checks run only for
    /// a partial request; a resolved rectangle with zero right and
    /// bottom is classified as "no crop" before any validation.
    pub fn resolve(&self, image: &DecodedImage) -> Result<Option<Region>, Jp2kError> {
        let (x0, y0, x1, y1) = match *self {
            CropSpec::Pixels {
                left,
                top,
                right,
                bottom,
            } => (left, top, right, bottom),
            CropSpec::Ratios {
                left,
                top,
                right,
                bottom,
            } => {
                let w = f64::from(image.width());
                let h = f64::from(image.height());
                // The saturating float-to-int cast is floor() for the
                // values in range; negative or NaN ratios land on 0.
                let x0 = (left * w) as u32;
                let y0 = (top * h) as u32;
                let x1 = ((right * w) as u32).min(image.x1);
                let y1 = ((bottom * h) as u32).min(image.y1);
                (x0, y0, x1, y1)
            }
        };

        if x1 == 0 && y1 == 0 {
            return Ok(None);
        }

        if x0 < image.x0
            || y0 < image.y0
            || x1 > image.x1
            || y1 > image.y1
            || x0 >= x1
            || y0 >= y1
        {
            return Err(Jp2kError::RegionOutOfBounds { x0, y0, x1, y1 });
        }

        Ok(Some(Region { x0, y0, x1, y1 }))
    }
}
