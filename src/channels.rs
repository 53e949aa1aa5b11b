use alloc::string::String;

use crate::error::Jp2kError;
use crate::image::DecodedImage;

/// Component planes mapped to display channels.
///
/// For gray sources all three color channels alias the same plane.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedChannels<'a> {
    pub red: &'a [i32],
    pub green: &'a [i32],
    pub blue: &'a [i32],
    pub alpha: Option<&'a [i32]>,
}

/// Map an image's planes to red/green/blue/alpha.
///
/// The assignment is a heuristic over plane order and alpha flags:
/// - 1 component: gray; all three color channels read plane 0.
/// - 2 components: gray, and plane 1 counts as alpha only when the
///   engine flagged it. An unflagged second plane is never alpha.
/// - 3+ components: planes 0/1/2 are red/green/blue; alpha is the first
///   flagged plane (ascending index), falling back to plane 3 when none
///   is flagged and a fourth plane exists. Planes past index 3 are
///   otherwise ignored.
///
/// Downstream output depends on this mapping exactly, fallback included.
pub fn resolve_channels(image: &DecodedImage) -> Result<ResolvedChannels<'_>, Jp2kError> {
    let comps = &image.comps;

    let channels = match comps.len() {
        0 => {
            return Err(Jp2kError::Decode(String::from(
                "image has no component planes",
            )));
        }
        1 => ResolvedChannels {
            red: &comps[0].data,
            green: &comps[0].data,
            blue: &comps[0].data,
            alpha: None,
        },
        2 => ResolvedChannels {
            red: &comps[0].data,
            green: &comps[0].data,
            blue: &comps[0].data,
            alpha: comps[1].alpha.then(|| comps[1].data.as_slice()),
        },
        _ => {
            let alpha = comps
                .iter()
                .find(|c| c.alpha)
                .map(|c| c.data.as_slice())
                .or_else(|| comps.get(3).map(|c| c.data.as_slice()));
            ResolvedChannels {
                red: &comps[0].data,
                green: &comps[1].data,
                blue: &comps[2].data,
                alpha,
            }
        }
    };

    // Every plane handed out must cover the full geometry.
    let expected = image.pixel_count();
    let covers = |p: &[i32]| p.len() as u64 >= expected;
    if !covers(channels.red)
        || !covers(channels.green)
        || !covers(channels.blue)
        || channels.alpha.is_some_and(|a| !covers(a))
    {
        return Err(Jp2kError::Decode(String::from(
            "component plane shorter than image geometry",
        )));
    }

    Ok(channels)
}
