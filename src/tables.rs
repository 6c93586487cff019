//! Capacity and parameter tables: per-(version, ECC) block counts and ECC
//! lengths, and the derived raw/data module counts.

use crate::code_ecc::QrCodeEcc;
use crate::version::Version;

// Version: index 0 is padding and holds an illegal placeholder value.
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [-1,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Low
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // Medium
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Quartile
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // High
];

static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // Low
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // Medium
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Quartile
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // High
];

/// Returns an entry from the given table based on the given values.
pub(crate) fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
    table[ecl.ordinal()][ver.value() as usize] as usize
}

pub(crate) fn ecc_codewords_per_block(ver: Version, ecl: QrCodeEcc) -> usize {
    table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
}

pub(crate) fn num_error_correction_blocks(ver: Version, ecl: QrCodeEcc) -> usize {
    table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

/// Returns the number of data bits that can be stored in a QR Code of the
/// given version, after all function modules are excluded. Includes
/// remainder bits, so it might not be a multiple of 8. Range [208, 29648].
pub(crate) fn get_num_raw_data_modules(ver: Version) -> usize {
    let ver = ver.value() as usize;
    let mut result: usize = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign: usize = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 18 * 2; // version information
        }
    }
    result
}

/// Returns the number of 8-bit data (non-ECC) codewords for a given version
/// and error correction level, with remainder bits discarded.
pub(crate) fn get_num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    get_num_raw_data_modules(ver) / 8
        - ecc_codewords_per_block(ver, ecl) * num_error_correction_blocks(ver, ecl)
}

/// Returns the ascending list of alignment pattern center positions (on both
/// axes) for the given version. Empty for version 1.
pub(crate) fn get_alignment_pattern_positions(ver: Version) -> Vec<i32> {
    let ver = ver.value();
    if ver == 1 {
        return vec![];
    }
    let numalign: i32 = i32::from(ver) / 7 + 2;
    let step: i32 = if ver != 32 {
        // ceil((size - 13) / (2*numAlign - 2)) * 2
        (i32::from(ver) * 4 + numalign * 2 + 1) / (2 * numalign - 2) * 2
    } else {
        26
    };
    let mut result = vec![6i32];
    let mut pos: i32 = i32::from(ver) * 4 + 10;
    for _ in 0..numalign - 1 {
        result.insert(1, pos);
        pos -= step;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_positions_match_known_versions() {
        assert_eq!(
            get_alignment_pattern_positions(Version::new(32).unwrap()),
            vec![6, 34, 60, 86, 112, 138]
        );
        assert_eq!(
            get_alignment_pattern_positions(Version::new(40).unwrap()),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
        assert_eq!(
            get_alignment_pattern_positions(Version::new(1).unwrap()),
            Vec::<i32>::new()
        );
    }

    #[test]
    fn raw_data_modules_match_known_versions() {
        assert_eq!(get_num_raw_data_modules(Version::new(22).unwrap()), 10068);
        assert_eq!(get_num_raw_data_modules(Version::new(32).unwrap()), 19723);
        assert_eq!(get_num_raw_data_modules(Version::new(40).unwrap()), 29648);
    }
}
