/// Minimum accepted input length: the length of a JP2 signature box.
/// Nothing shorter can hold a parseable codestream either.
pub const MIN_INPUT_LEN: usize = 12;

/// First four bytes of a boxed JP2 file (the signature box length field).
const JP2_SIGNATURE_PREFIX: [u8; 4] = [0x00, 0x00, 0x00, 0x0C];

/// The two recognized JPEG 2000 container kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecFormat {
    /// Boxed file format (JP2 container).
    Jp2,
    /// Raw codestream (J2K).
    J2k,
}

impl CodecFormat {
    /// Detect the container kind from the input prefix.
    ///
    /// Total: anything that does not start with the JP2 signature box is
    /// treated as a raw codestream. Callers supply at least 4 bytes; the
    /// minimum-input gate runs before any sniffing.
    pub fn sniff(data: &[u8]) -> CodecFormat {
        if data.starts_with(&JP2_SIGNATURE_PREFIX) {
            CodecFormat::Jp2
        } else {
            CodecFormat::J2k
        }
    }
}
