use crate::bit_buffer::BitBuffer;
use crate::error::QrError;
use crate::segment_mode::QrSegmentMode;
use crate::version::Version;

/// The set of all legal characters in alphanumeric mode, where each
/// character's position is its encoded value.
pub static ALPHANUMERIC_CHARSET: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// A character string (or ECI designator) to be encoded in a QR Code,
/// already reduced to a mode and a bit-encoded payload.
#[derive(Clone)]
pub struct QrSegment {
    mode: QrSegmentMode,
    numchars: usize,
    data: Vec<bool>,
}

impl QrSegment {
    /// Returns a segment representing the given binary data encoded in byte mode.
    pub fn make_bytes(data: &[u8]) -> QrSegment {
        let mut bb = BitBuffer(Vec::with_capacity(data.len() * 8));
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        QrSegment::new(QrSegmentMode::Byte, data.len(), bb.0)
    }

    /// Returns a segment representing the given string of decimal digits
    /// encoded in numeric mode. Fails if any character is not `'0'..='9'`.
    pub fn make_numeric(text: &[char]) -> Result<QrSegment, QrError> {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 3 + (text.len() + 2) / 3));
        let mut accumdata: u32 = 0;
        let mut accumcount: u32 = 0;
        for &c in text {
            if !('0'..='9').contains(&c) {
                return Err(QrError::InvalidCharacter {
                    character: c,
                    mode: QrSegmentMode::Numeric,
                });
            }
            accumdata = accumdata * 10 + (c as u32 - '0' as u32);
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, (accumcount as u8) * 3 + 1);
        }
        Ok(QrSegment::new(QrSegmentMode::Numeric, text.len(), bb.0))
    }

    /// Returns a segment representing the given text string encoded in
    /// alphanumeric mode. See [`ALPHANUMERIC_CHARSET`] for the allowed characters.
    pub fn make_alphanumeric(text: &[char]) -> Result<QrSegment, QrError> {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 5 + (text.len() + 1) / 2));
        let mut accumdata: u32 = 0;
        let mut accumcount: u32 = 0;
        for &c in text {
            let i = ALPHANUMERIC_CHARSET.iter().position(|&x| x == c).ok_or(
                QrError::InvalidCharacter {
                    character: c,
                    mode: QrSegmentMode::Alphanumeric,
                },
            )?;
            accumdata = accumdata * 45 + (i as u32);
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, 6);
        }
        Ok(QrSegment::new(QrSegmentMode::Alphanumeric, text.len(), bb.0))
    }

    /// Returns zero or more segments representing the given Unicode text,
    /// picking the single cheapest fixed mode (numeric, alphanumeric, or
    /// byte) for the whole string. For mixed-mode optimization, see
    /// [`crate::segment_optimize::make_segments_optimally`].
    pub fn make_segments(text: &[char]) -> Vec<QrSegment> {
        if text.is_empty() {
            vec![]
        } else if is_numeric(text) {
            vec![QrSegment::make_numeric(text).expect("validated numeric")]
        } else if is_alphanumeric(text) {
            vec![QrSegment::make_alphanumeric(text).expect("validated alphanumeric")]
        } else {
            let s: String = text.iter().collect();
            vec![QrSegment::make_bytes(s.as_bytes())]
        }
    }

    /// Returns a segment representing an Extended Channel Interpretation
    /// (ECI) designator with the given assignment value.
    pub fn make_eci(assignval: u32) -> Result<QrSegment, QrError> {
        let mut bb = BitBuffer(Vec::with_capacity(24));
        if assignval < (1 << 7) {
            bb.append_bits(assignval, 8);
        } else if assignval < (1 << 14) {
            bb.append_bits(2, 2);
            bb.append_bits(assignval, 14);
        } else if assignval < 1_000_000 {
            bb.append_bits(6, 3);
            bb.append_bits(assignval, 21);
        } else {
            return Err(QrError::InvalidArgument {
                reason: "ECI assignment value out of range [0, 1000000)",
            });
        }
        Ok(QrSegment::new(QrSegmentMode::Eci, 0, bb.0))
    }

    /// Creates a new QR Code segment with the given already mode-encoded bits.
    pub fn new(mode: QrSegmentMode, numchars: usize, data: Vec<bool>) -> QrSegment {
        QrSegment {
            mode,
            numchars,
            data,
        }
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Returns the total number of bits (mode indicator + count field + data)
    /// this sequence of segments would occupy at the given version, or `None`
    /// if a segment's character count overflows its count field, or the total
    /// overflows `usize`.
    pub(crate) fn get_total_bits(segs: &[QrSegment], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let ccbits = seg.mode.num_char_count_bits(version).ok()?;
            if seg.numchars >= 1 << ccbits {
                return None;
            }
            result = result.checked_add(4 + (ccbits as usize) + seg.data.len())?;
        }
        Some(result)
    }
}

/// Tests whether the given string can be encoded as a segment in
/// alphanumeric mode.
pub fn is_alphanumeric(text: &[char]) -> bool {
    text.iter().all(|c| ALPHANUMERIC_CHARSET.contains(c))
}

/// Tests whether the given string can be encoded as a segment in numeric mode.
pub fn is_numeric(text: &[char]) -> bool {
    text.iter().all(|&c| ('0'..='9').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rejects_non_digits() {
        let text: Vec<char> = "12a3".chars().collect();
        assert!(matches!(
            QrSegment::make_numeric(&text),
            Err(QrError::InvalidCharacter { character: 'a', .. })
        ));
    }

    #[test]
    fn alphanumeric_rejects_lowercase() {
        let text: Vec<char> = "hello".chars().collect();
        assert!(QrSegment::make_alphanumeric(&text).is_err());
    }

    #[test]
    fn eci_rejects_out_of_range() {
        assert!(QrSegment::make_eci(1_000_000).is_err());
        assert!(QrSegment::make_eci(999_999).is_ok());
    }

    #[test]
    fn make_segments_picks_numeric_for_digits() {
        let text: Vec<char> = "0123456789".chars().collect();
        let segs = QrSegment::make_segments(&text);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), QrSegmentMode::Numeric);
    }
}
