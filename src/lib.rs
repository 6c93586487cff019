/*
 * QR Code generator library (Rust)
 *
 * Copyright (c) Project Nayuki. (MIT License)
 * https://www.nayuki.io/page/qr-code-generator-library
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of
 * this software and associated documentation files (the "Software"), to deal in
 * the Software without restriction, including without limitation the rights to
 * use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
 * the Software, and to permit persons to whom the Software is furnished to do so,
 * subject to the following conditions:
 * - The above copyright notice and this permission notice shall be included in
 *   all copies or substantial portions of the Software.
 * - The Software is provided "as is", without warranty of any kind, express or
 *   implied, including but not limited to the warranties of merchantability,
 *   fitness for a particular purpose and noninfringement. In no event shall the
 *   authors or copyright holders be liable for any claim, damages or other
 *   liability, whether in an action of contract, tort or otherwise, arising from,
 *   out of or in connection with the Software or the use or other dealings in the
 *   Software.
 */

//! Encodes text or binary payloads into QR Code Model 2 symbols (versions 1
//! to 40, all four error correction levels).
//!
//! The typical entry point is [`QrCode::encode_text`] or
//! [`QrCode::encode_binary`]; [`QrCode::encode_segments`] and
//! [`segment_optimize::make_segments_optimally`] give finer control over
//! mode selection for callers who want to hand-tune segment boundaries.
//! Decoding, rendering to pixel formats, and Micro QR / Model 1 symbols are
//! out of scope for this crate.

mod bit_buffer;
mod code_ecc;
mod error;
mod finder_penalty;
#[cfg(feature = "kanji")]
mod kanji;
mod mask;
mod qr_code;
mod reed_solomon;
mod segment;
pub mod segment_optimize;
mod segment_mode;
mod tables;
mod version;

pub use bit_buffer::BitBuffer;
pub use code_ecc::QrCodeEcc;
pub use error::QrError;
#[cfg(feature = "kanji")]
pub use kanji::{is_encodable_as_kanji, is_kanji, make_kanji, unicode_to_qr_kanji};
pub use mask::Mask;
pub use qr_code::QrCode;
pub use segment::{is_alphanumeric, is_numeric, QrSegment, ALPHANUMERIC_CHARSET};
pub use segment_mode::QrSegmentMode;
pub use version::Version;
