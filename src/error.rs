use crate::segment_mode::QrSegmentMode;

/// Errors that can occur while building a [`QrCode`](crate::QrCode) or a
/// [`QrSegment`](crate::QrSegment).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// A mode-specific segment constructor (`make_numeric`, `make_alphanumeric`,
    /// the kanji constructor) was given a character outside what that mode can encode.
    #[error("character {character:?} is not encodable in {mode:?} mode")]
    InvalidCharacter {
        character: char,
        mode: QrSegmentMode,
    },

    /// A caller-supplied argument was out of its allowed range (version range,
    /// mask value, ECI assignment value, bit width, ...).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// No version in the requested range could hold the data at the requested
    /// error correction level. `used_bits` is `None` when a single segment's
    /// character count already overflows its mode's count field at the
    /// largest version tried, independent of capacity.
    #[error("data too long to fit: {used_bits:?} bits needed, {capacity_bits} bits available at the largest version tried")]
    DataTooLong {
        used_bits: Option<usize>,
        capacity_bits: usize,
    },
}
