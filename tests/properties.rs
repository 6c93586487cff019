//! Black-box property tests over the public API, covering the
//! universally-quantified invariants that don't need internal access.

use proptest::prelude::*;
use qrcodegen::{Mask, QrCode, QrCodeEcc, QrSegment, Version};

fn arb_ecc() -> impl Strategy<Value = QrCodeEcc> {
    prop_oneof![
        Just(QrCodeEcc::Low),
        Just(QrCodeEcc::Medium),
        Just(QrCodeEcc::Quartile),
        Just(QrCodeEcc::High),
    ]
}

proptest! {
    // size(V) = 4V + 17 for every legal version, independent of payload.
    #[test]
    fn size_matches_version_formula(ver in 1u8..=40) {
        let version = Version::new(ver).unwrap();
        let qr = QrCode::encode_segments_advanced(
            &[],
            QrCodeEcc::Low,
            version,
            version,
            None,
            false,
        )
        .unwrap();
        prop_assert_eq!(qr.size(), 4 * i32::from(ver) + 17);
        prop_assert_eq!(qr.version(), version);
    }

    // A forced mask is always reported back verbatim.
    #[test]
    fn forced_mask_round_trips(text in "[A-Za-z0-9 ]{0,80}", mask_val in 0u8..=7, ecl in arb_ecc()) {
        let chrs: Vec<char> = text.chars().collect();
        let segs = QrSegment::make_segments(&chrs);
        let qr = QrCode::encode_segments_advanced(
            &segs,
            ecl,
            Version::MIN,
            Version::MAX,
            Some(Mask::new(mask_val).unwrap()),
            false,
        )
        .unwrap();
        prop_assert_eq!(qr.mask().value(), mask_val);
    }

    // The bit-packed buffer export agrees with per-module reads everywhere.
    #[test]
    fn packed_buffer_matches_get_module(text in ".{0,120}") {
        let qr = QrCode::encode_text(&text, QrCodeEcc::Medium).unwrap();
        let buf = qr.to_packed_buffer();
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                let index = (y * qr.size() + x) as usize;
                let bit = (buf[index >> 3] >> (7 - (index & 7))) & 1 != 0;
                prop_assert_eq!(bit, qr.get_module(x, y));
            }
        }
    }

    // Reading outside the grid always yields light, regardless of payload.
    #[test]
    fn out_of_bounds_is_always_light(text in ".{0,40}", dx in -50i32..0, dy in -50i32..0) {
        let qr = QrCode::encode_text(&text, QrCodeEcc::Low).unwrap();
        prop_assert!(!qr.get_module(dx, dy));
        prop_assert!(!qr.get_module(qr.size() - dx, qr.size() - dy));
    }

    // Boosting the ECC level never lowers it relative to the request.
    #[test]
    fn boosted_ecc_is_never_weaker(text in "[A-Za-z0-9 ]{0,200}", ecl in arb_ecc()) {
        let chrs: Vec<char> = text.chars().collect();
        let segs = QrSegment::make_segments(&chrs);
        let boosted = QrCode::encode_segments_advanced(
            &segs, ecl, Version::MIN, Version::MAX, None, true,
        );
        if let Ok(qr) = boosted {
            prop_assert!(ecc_rank(qr.error_correction_level()) >= ecc_rank(ecl));
        }
    }
}

fn ecc_rank(ecl: QrCodeEcc) -> u8 {
    match ecl {
        QrCodeEcc::Low => 0,
        QrCodeEcc::Medium => 1,
        QrCodeEcc::Quartile => 2,
        QrCodeEcc::High => 3,
    }
}
