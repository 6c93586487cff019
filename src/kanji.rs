//! Kanji-mode segment encoding, gated behind the `kanji` feature.
//!
//! Rather than embedding the QR standard's large Unicode-to-kanji-codeword
//! lookup table as a generated source constant, Shift-JIS transcoding is
//! delegated to [`encoding_rs`], and only the small range-subtraction and
//! byte-packing arithmetic from the standard is implemented here.

use crate::bit_buffer::BitBuffer;
use crate::error::QrError;
use crate::segment::QrSegment;
use crate::segment_mode::QrSegmentMode;

/// Returns the 13-bit QR kanji mode codeword for the given character, or
/// `None` if the character is outside the kanji-mode-encodable subset
/// (JIS X 0208 via Shift-JIS, covering common CJK ideographs, hiragana,
/// katakana, full-width Latin, Greek, Cyrillic, and East Asian punctuation).
pub fn unicode_to_qr_kanji(c: char) -> Option<u16> {
    let mut buf = [0u8; 4];
    let s = c.encode_utf8(&mut buf);
    let (encoded, _enc, had_errors) = encoding_rs::SHIFT_JIS.encode(s);
    if had_errors || encoded.len() != 2 {
        return None;
    }
    let sjis = (u16::from(encoded[0]) << 8) | u16::from(encoded[1]);
    let subtracted = if (0x8140..=0x9FFC).contains(&sjis) {
        sjis - 0x8140
    } else if (0xE040..=0xEBBF).contains(&sjis) {
        sjis - 0xC140
    } else {
        return None;
    };
    let packed = (subtracted >> 8) * 0xC0 + (subtracted & 0xFF);
    if packed > 0x1FFF {
        None
    } else {
        Some(packed)
    }
}

/// Tests whether the given character is encodable in kanji mode.
pub fn is_kanji(c: char) -> bool {
    unicode_to_qr_kanji(c).is_some()
}

/// Tests whether every character in the given string is encodable in kanji mode.
pub fn is_encodable_as_kanji(code_points: &[char]) -> bool {
    code_points.iter().all(|&c| is_kanji(c))
}

/// Returns a segment representing the given text encoded in kanji mode.
/// Fails if any character is not kanji-mode-encodable.
pub fn make_kanji(code_points: &[char]) -> Result<QrSegment, QrError> {
    let mut bb = BitBuffer::new();
    for &c in code_points {
        let val = unicode_to_qr_kanji(c).ok_or(QrError::InvalidCharacter {
            character: c,
            mode: QrSegmentMode::Kanji,
        })?;
        bb.append_bits(u32::from(val), 13);
    }
    Ok(QrSegment::new(QrSegmentMode::Kanji, code_points.len(), bb.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_not_kanji() {
        assert!(!is_kanji('A'));
        assert!(!is_kanji('0'));
    }

    #[test]
    fn common_kanji_round_trips_through_shift_jis() {
        // U+4E00 ("one") is a JIS X 0208 Level-1 kanji; Shift-JIS 0x88EA.
        let c = '\u{4E00}';
        assert!(is_kanji(c));
        let val = unicode_to_qr_kanji(c).unwrap();
        assert!(val <= 0x1FFF);
    }

    #[test]
    fn make_kanji_rejects_unencodable_character() {
        let text = vec!['A'];
        assert!(matches!(
            make_kanji(&text),
            Err(QrError::InvalidCharacter { .. })
        ));
    }
}
