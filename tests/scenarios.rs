//! Scenario tests driven by `test-case`, covering the concrete encode
//! scenarios and boundary behaviors from the design documentation.

use qrcodegen::{Mask, QrCode, QrCodeEcc, QrSegment, Version};
use test_case::test_case;

#[test_case("HELLO WORLD", QrCodeEcc::Quartile, 1; "ascii text picks smallest fitting version")]
#[test_case("", QrCodeEcc::Low, 1; "empty text still produces version 1")]
#[test_case("314159265358979323846264338327950288419716939937510", QrCodeEcc::Medium, 3; "long digit run stays numeric and fits by version 3")]
fn encode_text_picks_expected_version(text: &str, ecl: QrCodeEcc, max_expected_version: u8) {
    let qr = QrCode::encode_text(text, ecl).unwrap();
    assert!(qr.version().value() <= max_expected_version);
    assert_eq!(qr.size(), 4 * i32::from(qr.version().value()) + 17);
}

#[test_case(&[0xE3, 0x81, 0x82], QrCodeEcc::High, 4; "three-byte utf8 sequence in byte mode")]
fn encode_binary_with_forced_mask_reports_mask_and_version_range(
    data: &[u8],
    ecl: QrCodeEcc,
    mask_val: u8,
) {
    let segs = vec![QrSegment::make_bytes(data)];
    let qr = QrCode::encode_segments_advanced(
        &segs,
        ecl,
        Version::new(2).unwrap(),
        Version::new(7).unwrap(),
        Some(Mask::new(mask_val).unwrap()),
        true,
    )
    .unwrap();
    assert_eq!(qr.version().value(), 2);
    assert_eq!(qr.mask().value(), mask_val);
}

#[test_case(QrCodeEcc::Low; "low")]
#[test_case(QrCodeEcc::Medium; "medium")]
#[test_case(QrCodeEcc::Quartile; "quartile")]
#[test_case(QrCodeEcc::High; "high")]
fn every_ecc_level_fits_hello_world_at_version_1_or_above(ecl: QrCodeEcc) {
    let qr = QrCode::encode_text("HELLO WORLD", ecl).unwrap();
    assert!(qr.version().value() >= 1);
}

#[test]
fn largest_numeric_payload_fits_v40_low_one_digit_more_fails() {
    // Version 40 Low has 23648 data codewords = 189184 bits; numeric mode packs
    // 3 digits into 10 bits, so the largest whole-group count is found by binary
    // search rather than hardcoding the exact digit count here.
    let mut lo = 1usize;
    let mut hi = 8000usize;
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let digits = "9".repeat(mid);
        let fits = QrCode::encode_text(&digits, QrCodeEcc::Low).is_ok();
        if fits {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    assert!(QrCode::encode_text(&"9".repeat(lo), QrCodeEcc::Low).is_ok());
    assert!(QrCode::encode_text(&"9".repeat(lo + 1), QrCodeEcc::Low).is_err());
}

#[test]
fn get_module_out_of_bounds_is_light_at_every_edge() {
    let qr = QrCode::encode_text("boundary check", QrCodeEcc::Low).unwrap();
    let n = qr.size();
    assert!(!qr.get_module(-1, 0));
    assert!(!qr.get_module(0, -1));
    assert!(!qr.get_module(n, 0));
    assert!(!qr.get_module(0, n));
    assert!(!qr.get_module(-1, -1));
    assert!(!qr.get_module(n, n));
}

#[test]
fn min_version_greater_than_max_version_is_invalid_argument() {
    let err = QrCode::encode_segments_advanced(
        &[],
        QrCodeEcc::Low,
        Version::new(10).unwrap(),
        Version::new(5).unwrap(),
        None,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, qrcodegen::QrError::InvalidArgument { .. }));
}
