//! The matrix builder, codeword painter, mask engine, ECC assembler, version
//! selector, and public encoding facade, all centered on the [`QrCode`] type.

use crate::bit_buffer::BitBuffer;
use crate::code_ecc::QrCodeEcc;
use crate::error::QrError;
use crate::finder_penalty::FinderPenalty;
use crate::mask::Mask;
use crate::reed_solomon::ReedSolomonGenerator;
use crate::segment::QrSegment;
use crate::tables::{
    ecc_codewords_per_block, get_alignment_pattern_positions, get_num_data_codewords,
    get_num_raw_data_modules, num_error_correction_blocks,
};
use crate::version::Version;

// Used by get_penalty_score() when evaluating which mask is best.
const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// An immutable square grid of dark/light modules for a QR Code symbol,
/// plus the static functions to build one from textual or binary data.
///
/// Covers the QR Code Model 2 specification: all versions 1 to 40, all 4
/// error correction levels, and the numeric/alphanumeric/byte/kanji/ECI
/// segment modes.
#[derive(Clone, Debug)]
pub struct QrCode {
    version: Version,
    size: i32,
    errorcorrectionlevel: QrCodeEcc,
    mask: Mask,
    modules: Vec<bool>,
    isfunction: Vec<bool>,
}

impl QrCode {
    /*---- Public static factory functions ----*/

    /// Encodes the given Unicode text at the given error correction level,
    /// automatically choosing the smallest fitting version and the best
    /// single-mode-per-run segmentation. The ECC level may be boosted above
    /// `ecl` if that is free (doesn't need a larger version).
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<QrCode, QrError> {
        let chrs: Vec<char> = text.chars().collect();
        let segs = QrSegment::make_segments(&chrs);
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes the given bytes as a single byte-mode segment at the given
    /// error correction level.
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc) -> Result<QrCode, QrError> {
        let segs = vec![QrSegment::make_bytes(data)];
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes the given pre-built segments at the given error correction
    /// level or higher, automatically choosing the smallest fitting version.
    pub fn encode_segments(segs: &[QrSegment], ecl: QrCodeEcc) -> Result<QrCode, QrError> {
        QrCode::encode_segments_advanced(segs, ecl, Version::MIN, Version::MAX, None, true)
    }

    /// Encodes the given pre-built segments with full control over the
    /// version range, forced mask, and ECC-boosting behavior.
    pub fn encode_segments_advanced(
        segs: &[QrSegment],
        mut ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
        boostecl: bool,
    ) -> Result<QrCode, QrError> {
        if minversion > maxversion {
            return Err(QrError::InvalidArgument {
                reason: "min_version must not exceed max_version",
            });
        }

        // Find the minimal version number that fits the data.
        let mut version = minversion;
        let mut last_capacity_bits = 0usize;
        let mut last_used_bits: Option<usize> = None;
        let datausedbits: usize = loop {
            let datacapacitybits: usize = get_num_data_codewords(version, ecl) * 8;
            let used = QrSegment::get_total_bits(segs, version);
            last_capacity_bits = datacapacitybits;
            last_used_bits = used;
            if let Some(n) = used {
                if n <= datacapacitybits {
                    break n;
                }
            }
            if version.value() >= maxversion.value() {
                return Err(QrError::DataTooLong {
                    used_bits: last_used_bits,
                    capacity_bits: last_capacity_bits,
                });
            }
            version = Version::new(version.value() + 1).expect("version stays within range");
        };

        // Boost the ECC level for free if it still fits at this version.
        for newecl in &[QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
            if boostecl && datausedbits <= get_num_data_codewords(version, *newecl) * 8 {
                ecl = *newecl;
            }
        }

        // Concatenate all segments into one bit stream.
        let datacapacitybits: usize = get_num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::new();
        for seg in segs {
            bb.append_bits(seg.mode().mode_bits(), 4);
            bb.append_bits(
                seg.num_chars() as u32,
                seg.mode().num_char_count_bits(version)?,
            );
            bb.0.extend_from_slice(seg.data());
        }
        debug_assert_eq!(bb.len(), datausedbits);

        // Terminator, then pad to a byte boundary.
        let numzerobits = std::cmp::min(4, datacapacitybits - bb.len());
        bb.append_bits(0, numzerobits as u8);
        let numzerobits = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, numzerobits as u8);

        // Pad with alternating bytes until capacity is reached.
        let mut padbyte: u32 = 0xEC;
        while bb.len() < datacapacitybits {
            bb.append_bits(padbyte, 8);
            padbyte ^= 0xEC ^ 0x11;
        }
        assert_eq!(bb.len() % 8, 0, "padded bit length must be byte-aligned");

        let bytes = bb.to_packed_bytes();
        Ok(QrCode::encode_codewords(version, ecl, &bytes, mask))
    }

    /*---- Low-level constructor ----*/

    /// Builds a QR Code symbol directly from data codewords that have
    /// already been assembled (segments concatenated, terminated, and
    /// padded to capacity). This is a cumbersome low-level entry point;
    /// most callers should use [`QrCode::encode_segments`] instead.
    pub fn encode_codewords(
        ver: Version,
        ecl: QrCodeEcc,
        datacodewords: &[u8],
        mask: Option<Mask>,
    ) -> QrCode {
        let size: usize = (ver.value() as usize) * 4 + 17;
        let mut result = QrCode {
            version: ver,
            size: size as i32,
            mask: Mask::new(0).expect("0 is a valid mask"),
            errorcorrectionlevel: ecl,
            modules: vec![false; size * size],
            isfunction: vec![false; size * size],
        };

        result.draw_function_patterns();
        let allcodewords = result.add_ecc_and_interleave(datacodewords);
        result.draw_codewords(&allcodewords);
        result.handle_constructor_masking(mask);
        result
    }

    /*---- Accessors ----*/

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.errorcorrectionlevel
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at (x, y): true = dark, false = light.
    /// Out-of-bounds coordinates return light (false).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.size && 0 <= y && y < self.size && self.module(x, y)
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    /// Returns the bit-packed `(x, y)` bitmap: bit `y*size+x` lives at byte
    /// `index >> 3`, bit `index & 7` (MSB of the first byte is module (0,0)
    /// shifted into bit 7). The returned buffer has `ceil(size*size/8)` bytes.
    pub fn to_packed_buffer(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.packed_buffer_len()];
        self.write_packed_into(&mut buf).expect("buffer sized correctly");
        buf
    }

    /// Writes the bit-packed bitmap (see [`QrCode::to_packed_buffer`]) into a
    /// caller-supplied buffer, avoiding an extra allocation.
    pub fn write_packed_into(&self, buf: &mut [u8]) -> Result<(), QrError> {
        let needed = self.packed_buffer_len();
        if buf.len() < needed {
            return Err(QrError::InvalidArgument {
                reason: "packed buffer is smaller than ceil(size*size/8) bytes",
            });
        }
        buf[..needed].fill(0);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.module(x, y) {
                    let index = (y * self.size + x) as usize;
                    buf[index >> 3] |= 1 << (7 - (index & 7));
                }
            }
        }
        Ok(())
    }

    fn packed_buffer_len(&self) -> usize {
        ((self.size as usize) * (self.size as usize) + 7) / 8
    }

    /*---- Drawing function modules ----*/

    fn draw_function_patterns(&mut self) {
        let size = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        // Three finder patterns (all corners except bottom right).
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        let alignpatpos = get_alignment_pattern_positions(self.version);
        let numalign = alignpatpos.len();
        for i in 0..numalign {
            for j in 0..numalign {
                // Skip the three finder corners; every other combination is a real alignment pattern.
                if (i == 0 && j == 0) || (i == 0 && j == numalign - 1) || (i == numalign - 1 && j == 0) {
                    continue;
                }
                self.draw_alignment_pattern(alignpatpos[i], alignpatpos[j]);
            }
        }

        self.draw_format_bits(Mask::new(0).expect("0 is a valid mask")); // overwritten later
        self.draw_version();
    }

    fn draw_format_bits(&mut self, mask: Mask) {
        let size = self.size;
        let mut data: u32 = self.errorcorrectionlevel.format_bits() << 3 | u32::from(mask.value());
        let mut rem: u32 = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * 0x537);
        }
        data = data << 10 | rem;
        data ^= 0x5412;
        assert_eq!(data >> 15, 0, "format bits must fit in 15 bits");

        for i in 0..6 {
            self.set_function_module(8, i, (data >> i) & 1 != 0);
        }
        self.set_function_module(8, 7, (data >> 6) & 1 != 0);
        self.set_function_module(8, 8, (data >> 7) & 1 != 0);
        self.set_function_module(7, 8, (data >> 8) & 1 != 0);
        for i in 9..15 {
            self.set_function_module(14 - i, 8, (data >> i) & 1 != 0);
        }

        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, (data >> i) & 1 != 0);
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, (data >> i) & 1 != 0);
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let mut rem: u32 = u32::from(self.version.value());
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
        }
        let data: u32 = u32::from(self.version.value()) << 12 | rem;
        assert!(data >> 18 == 0, "version bits must fit in 18 bits");

        for i in 0..18 {
            let bit = (data >> i) & 1 != 0;
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for i in -4..5 {
            for j in -4..5 {
                let xx = x + j;
                let yy = y + i;
                if 0 <= xx && xx < self.size && 0 <= yy && yy < self.size {
                    let dist = i.abs().max(j.abs()); // Chebyshev distance
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for i in -2..3 {
            for j in -2..3 {
                self.set_function_module(x + j, y + i, i.abs().max(j.abs()) != 1);
            }
        }
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        *self.module_mut(x, y) = isdark;
        self.isfunction[(y * self.size + x) as usize] = true;
    }

    /*---- Codewords and masking ----*/

    /// Splits `data` into blocks, appends each block's Reed-Solomon ECC, and
    /// interleaves the resulting bytes across blocks.
    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        assert_eq!(
            data.len(),
            get_num_data_codewords(self.version, self.errorcorrectionlevel),
            "wrong data codeword count for this version/ECC level"
        );

        let numblocks = num_error_correction_blocks(self.version, self.errorcorrectionlevel);
        let blockecclen = ecc_codewords_per_block(self.version, self.errorcorrectionlevel);
        let rawcodewords = get_num_raw_data_modules(self.version) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        let mut blocks = Vec::<Vec<u8>>::with_capacity(numblocks);
        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut k = 0;
        for i in 0..numblocks {
            let mut dat = Vec::<u8>::with_capacity(shortblocklen + 1);
            dat.extend_from_slice(
                &data[k..k + shortblocklen - blockecclen + usize::from(i >= numshortblocks)],
            );
            k += dat.len();
            let ecc = rs.get_remainder(&dat);
            if i < numshortblocks {
                dat.push(0);
            }
            dat.extend_from_slice(&ecc);
            blocks.push(dat);
        }

        let mut result = Vec::<u8>::with_capacity(rawcodewords);
        for i in 0..shortblocklen + 1 {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        result
    }

    /// Paints the interleaved codeword stream onto the data modules in the
    /// standard right-to-left, serpentine column-pair scan, skipping the
    /// timing column and any module already marked functional.
    fn draw_codewords(&mut self, data: &[u8]) {
        assert_eq!(
            data.len(),
            get_num_raw_data_modules(self.version) / 8,
            "wrong raw codeword count for this version"
        );

        let mut i: usize = 0;
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { self.size - 1 - vert } else { vert };
                    if !self.isfunction[(y * self.size + x) as usize] && i < data.len() * 8 {
                        *self.module_mut(x, y) = (data[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                        i += 1;
                    }
                    // Any remainder bits (0..7) are left as the light value the grid was initialized with.
                }
            }
            right -= 2;
        }
        assert_eq!(i, data.len() * 8, "did not consume the exact codeword bit count");
    }

    /// XORs the data modules with the given mask. Calling this twice with
    /// the same mask is a no-op, so a mask can be applied, scored, and undone.
    fn apply_mask(&mut self, mask: Mask) {
        let mask = mask.value();
        for y in 0..self.size {
            for x in 0..self.size {
                let invert = match mask {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => x * y % 2 + x * y % 3 == 0,
                    6 => (x * y % 2 + x * y % 3) % 2 == 0,
                    7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
                    _ => unreachable!("mask value is checked to be in [0, 7] by Mask::new"),
                };
                *self.module_mut(x, y) ^= invert & !self.isfunction[(y * self.size + x) as usize];
            }
        }
    }

    /// Must be called with the symbol in an unmasked state. Applies either
    /// the given fixed mask, or whichever of the 8 masks has the lowest
    /// penalty score, and records the choice in `self.mask`.
    fn handle_constructor_masking(&mut self, mut mask: Option<Mask>) {
        if mask.is_none() {
            let mut minpenalty = i32::MAX;
            for i in 0u8..8 {
                let newmask = Mask::new(i).expect("0..8 is a valid mask value");
                self.draw_format_bits(newmask);
                self.apply_mask(newmask);
                let penalty = self.get_penalty_score();
                if penalty < minpenalty {
                    mask = Some(newmask);
                    minpenalty = penalty;
                }
                self.apply_mask(newmask); // undo, since XOR is its own inverse
            }
        }
        let msk = mask.expect("either forced above or chosen by the loop");
        self.draw_format_bits(msk);
        self.apply_mask(msk);
        self.mask = msk;
    }

    /// Computes the 4-term penalty score of the current (masked) grid.
    fn get_penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size = self.size;

        // N1 runs and N3 finder-like patterns, scanned per row.
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.module(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        // Same, scanned per column.
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.module(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // N2: 2x2 blocks of the same color.
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.module(x, y);
                if color == self.module(x + 1, y)
                    && color == self.module(x, y + 1)
                    && color == self.module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // N4: balance of dark and light modules.
        let dark: i32 = self.modules.iter().map(|&b| i32::from(b)).sum();
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!((0..=9).contains(&k));
        result += k * PENALTY_N4;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_text_hello_world_picks_version_1() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Quartile).unwrap();
        assert_eq!(qr.version().value(), 1);
        assert_eq!(qr.size(), 21);
    }

    #[test]
    fn empty_text_still_produces_version_1() {
        let qr = QrCode::encode_text("", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version().value(), 1);
    }

    #[test]
    fn out_of_bounds_module_is_light() {
        let qr = QrCode::encode_text("x", QrCodeEcc::Low).unwrap();
        assert!(!qr.get_module(-1, -1));
        assert!(!qr.get_module(qr.size(), qr.size()));
    }

    #[test]
    fn forced_mask_is_reported_back() {
        let qr = QrCode::encode_segments_advanced(
            &QrSegment::make_segments(&"https://example.com/".chars().collect::<Vec<_>>()),
            QrCodeEcc::High,
            Version::MIN,
            Version::MAX,
            Some(Mask::new(3).unwrap()),
            true,
        )
        .unwrap();
        assert_eq!(qr.mask().value(), 3);
    }

    #[test]
    fn numeric_payload_too_long_for_version_1_low_fails() {
        let digits = "9".repeat(10_000);
        let err = QrCode::encode_text(&digits, QrCodeEcc::High).unwrap_err();
        assert!(matches!(err, QrError::DataTooLong { .. }));
    }

    #[test]
    fn packed_buffer_matches_get_module() {
        let qr = QrCode::encode_text("packed buffer round trip", QrCodeEcc::Medium).unwrap();
        let buf = qr.to_packed_buffer();
        for y in 0..qr.size() {
            for x in 0..qr.size() {
                let index = (y * qr.size() + x) as usize;
                let bit = (buf[index >> 3] >> (7 - (index & 7))) & 1 != 0;
                assert_eq!(bit, qr.get_module(x, y));
            }
        }
    }

    #[test]
    fn write_packed_into_rejects_undersized_buffer() {
        let qr = QrCode::encode_text("undersized", QrCodeEcc::Low).unwrap();
        let mut buf = vec![0u8; 1];
        assert!(matches!(
            qr.write_packed_into(&mut buf),
            Err(QrError::InvalidArgument { .. })
        ));
    }
}
