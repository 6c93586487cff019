/*
 * QR Code generator demo (Rust)
 *
 * Run this command-line program with no arguments. The program computes a bunch of
 * demonstration QR Codes and prints each one to the console.
 *
 * Copyright (c) Project Nayuki. (MIT License)
 * https://www.nayuki.io/page/qr-code-generator-library
 */

use qrcodegen::Mask;
use qrcodegen::QrCode;
use qrcodegen::QrCodeEcc;
use qrcodegen::QrSegment;
use qrcodegen::Version;

fn main() {
    do_basic_demo();
    do_variety_demo();
    do_segment_demo();
    do_mask_demo();
}

/*---- Demo suite ----*/

// Creates a single QR Code, then prints it to the console.
fn do_basic_demo() {
    let text: &'static str = "Hello, world!";
    let errcorlvl: QrCodeEcc = QrCodeEcc::Low;
    let qr: QrCode = QrCode::encode_text(text, errcorlvl).unwrap();
    print_qr(&qr);
}

// Creates a variety of QR Codes that exercise different features of the library.
fn do_variety_demo() {
    // Numeric mode encoding (3.33 bits per digit)
    let qr = QrCode::encode_text(
        "314159265358979323846264338327950288419716939937510",
        QrCodeEcc::Medium,
    )
    .unwrap();
    print_qr(&qr);

    // Alphanumeric mode encoding (5.5 bits per character)
    let qr = QrCode::encode_text(
        "DOLLAR-AMOUNT:$39.87 PERCENTAGE:100.00% OPERATIONS:+-*/",
        QrCodeEcc::High,
    )
    .unwrap();
    print_qr(&qr);

    // Unicode text as UTF-8
    let qr = QrCode::encode_text("こんにちwa、世界！ αβγδ", QrCodeEcc::Quartile).unwrap();
    print_qr(&qr);

    // Moderately large QR Code using longer text (from Lewis Carroll's Alice in Wonderland)
    let qr = QrCode::encode_text(
        concat!(
            "Alice was beginning to get very tired of sitting by her sister on the bank, ",
            "and of having nothing to do: once or twice she had peeped into the book her sister was reading, ",
            "but it had no pictures or conversations in it, 'and what is the use of a book,' thought Alice ",
            "'without pictures or conversations?' So she was considering in her own mind (as well as she could, ",
            "for the hot day made her feel very sleepy and stupid), whether the pleasure of making a ",
            "daisy-chain would be worth the trouble of getting up and picking the daisies, when suddenly ",
            "a White Rabbit with pink eyes ran close by her."
        ),
        QrCodeEcc::High,
    )
    .unwrap();
    print_qr(&qr);
}

// Creates QR Codes with manually specified segments for better compactness.
fn do_segment_demo() {
    // Illustration "silver"
    let silver0 = "THE SQUARE ROOT OF 2 IS 1.";
    let silver1 = "41421356237309504880168872420969807856967187537694807317667973799";
    let qr = QrCode::encode_text(&[silver0, silver1].concat(), QrCodeEcc::Low).unwrap();
    print_qr(&qr);

    let segs = vec![
        QrSegment::make_alphanumeric(&to_chars(silver0)).unwrap(),
        QrSegment::make_numeric(&to_chars(silver1)).unwrap(),
    ];
    let qr = QrCode::encode_segments(&segs, QrCodeEcc::Low).unwrap();
    print_qr(&qr);

    // Illustration "golden"
    let golden0 = "Golden ratio φ = 1.";
    let golden1 = "6180339887498948482045868343656381177203091798057628621354486227052604628189024497072072041893911374";
    let golden2 = "......";
    let qr = QrCode::encode_text(&[golden0, golden1, golden2].concat(), QrCodeEcc::Low).unwrap();
    print_qr(&qr);

    let segs = vec![
        QrSegment::make_bytes(golden0.as_bytes()),
        QrSegment::make_numeric(&to_chars(golden1)).unwrap(),
        QrSegment::make_alphanumeric(&to_chars(golden2)).unwrap(),
    ];
    let qr = QrCode::encode_segments(&segs, QrCodeEcc::Low).unwrap();
    print_qr(&qr);

    // Illustration "Madoka": kanji, kana, Greek, Cyrillic, full-width Latin characters
    let madoka = "「魔法少女まどか☆マギカ」って、　ИАИ　ｄｅｓｕ　κα？";
    let qr = QrCode::encode_text(madoka, QrCodeEcc::Low).unwrap();
    print_qr(&qr);
}

// Creates QR Codes with the same size and contents but different mask patterns.
fn do_mask_demo() {
    // Project Nayuki URL
    let segs = QrSegment::make_segments(&to_chars("https://www.nayuki.io/"));
    let qr = QrCode::encode_segments_advanced(
        &segs,
        QrCodeEcc::High,
        Version::MIN,
        Version::MAX,
        None,
        true,
    )
    .unwrap(); // Automatic mask
    print_qr(&qr);
    let qr = QrCode::encode_segments_advanced(
        &segs,
        QrCodeEcc::High,
        Version::MIN,
        Version::MAX,
        Some(Mask::new(3).unwrap()),
        true,
    )
    .unwrap(); // Force mask 3
    print_qr(&qr);

    // Chinese text as UTF-8
    let segs = QrSegment::make_segments(&to_chars(
        "維基百科（Wikipedia，聆聽i/ˌwɪkᵻˈpiːdi.ə/）是一個自由內容、公開編輯且多語言的網路百科全書協作計畫",
    ));
    for mask in [0u8, 1, 5, 7] {
        let qr = QrCode::encode_segments_advanced(
            &segs,
            QrCodeEcc::Medium,
            Version::MIN,
            Version::MAX,
            Some(Mask::new(mask).unwrap()),
            true,
        )
        .unwrap();
        print_qr(&qr);
    }
}

/*---- Utilities ----*/

// Prints the given QrCode object to the console.
fn print_qr(qr: &QrCode) {
    let border: i32 = 4;
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c: char = if qr.get_module(x, y) { '█' } else { ' ' };
            print!("{0}{0}", c);
        }
        println!();
    }
    println!();
}

// Converts the given borrowed string slice to a new character vector.
fn to_chars(text: &str) -> Vec<char> {
    text.chars().collect()
}
