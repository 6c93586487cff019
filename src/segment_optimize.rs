//! Dynamic-programming segment-mode optimizer: splits a Unicode code point
//! sequence into the minimum-bit sequence of mode segments for a given
//! version, switching between numeric/alphanumeric/byte/(kanji) as cheaper.

use crate::code_ecc::QrCodeEcc;
use crate::error::QrError;
use crate::segment::{is_alphanumeric, is_numeric, QrSegment, ALPHANUMERIC_CHARSET};
use crate::segment_mode::QrSegmentMode;
use crate::tables::get_num_data_codewords;
use crate::version::Version;

#[cfg(feature = "kanji")]
const MODE_TYPES: [QrSegmentMode; 4] = [
    QrSegmentMode::Byte,
    QrSegmentMode::Alphanumeric,
    QrSegmentMode::Numeric,
    QrSegmentMode::Kanji,
];
#[cfg(not(feature = "kanji"))]
const MODE_TYPES: [QrSegmentMode; 3] = [
    QrSegmentMode::Byte,
    QrSegmentMode::Alphanumeric,
    QrSegmentMode::Numeric,
];
const NUM_MODES: usize = MODE_TYPES.len();

/// Returns the minimum-bit sequence of segments representing `code_points`,
/// at the smallest version in `[min_version, max_version]` that fits at the
/// given ECC level. Fails with [`QrError::DataTooLong`] if none fits.
pub fn make_segments_optimally(
    code_points: &[char],
    ecc: QrCodeEcc,
    min_version: Version,
    max_version: Version,
) -> Result<Vec<QrSegment>, QrError> {
    if min_version > max_version {
        return Err(QrError::InvalidArgument {
            reason: "min_version must not exceed max_version",
        });
    }

    let mut segs = Vec::new();
    let mut last_capacity_bits = 0usize;
    let mut last_used_bits: Option<usize> = None;

    for ver in min_version.value()..=max_version.value() {
        let version = Version::new(ver).expect("loop bound is in range");
        if ver == min_version.value() || ver == 10 || ver == 27 {
            segs = make_segments_optimally_at_version(code_points, version)?;
        }

        let data_capacity_bits = get_num_data_codewords(version, ecc) * 8;
        let data_used_bits = QrSegment::get_total_bits(&segs, version);
        last_capacity_bits = data_capacity_bits;
        last_used_bits = data_used_bits;

        if let Some(used) = data_used_bits {
            if used <= data_capacity_bits {
                return Ok(segs);
            }
        }
    }

    Err(QrError::DataTooLong {
        used_bits: last_used_bits,
        capacity_bits: last_capacity_bits,
    })
}

fn make_segments_optimally_at_version(
    code_points: &[char],
    version: Version,
) -> Result<Vec<QrSegment>, QrError> {
    let char_modes = compute_character_modes(code_points, version)?;
    split_into_segments(code_points, &char_modes)
}

/// Returns the optimal mode for each code point, computed by dynamic
/// programming in 1/6-bit cost units (so mode-switch rounding stays exact).
fn compute_character_modes(
    code_points: &[char],
    version: Version,
) -> Result<Vec<QrSegmentMode>, QrError> {
    let mut head_costs = [0usize; NUM_MODES];
    for i in 0..NUM_MODES {
        head_costs[i] = (4 + MODE_TYPES[i].num_char_count_bits(version)? as usize) * 6;
    }

    // char_modes[i][j]: cheapest mode to encode the code point at i such that
    // the segment ending there is in MODE_TYPES[j].
    let mut char_modes = vec![[None::<QrSegmentMode>; NUM_MODES]; code_points.len()];
    let mut prev_costs = head_costs;

    for (i, &c) in code_points.iter().enumerate() {
        let mut cur_costs = [0usize; NUM_MODES];

        // Byte mode can always extend.
        cur_costs[0] = prev_costs[0] + c.len_utf8() * 8 * 6;
        char_modes[i][0] = Some(MODE_TYPES[0]);

        if ALPHANUMERIC_CHARSET.contains(&c) {
            cur_costs[1] = prev_costs[1] + 33; // 5.5 bits/char
            char_modes[i][1] = Some(MODE_TYPES[1]);
        }
        if ('0'..='9').contains(&c) {
            cur_costs[2] = prev_costs[2] + 20; // 3.33 bits/digit
            char_modes[i][2] = Some(MODE_TYPES[2]);
        }
        #[cfg(feature = "kanji")]
        if crate::kanji::is_kanji(c) {
            cur_costs[3] = prev_costs[3] + 78; // 13 bits/char
            char_modes[i][3] = Some(MODE_TYPES[3]);
        }

        // Consider starting a new segment (mode switch) ending in each mode.
        for j in 0..NUM_MODES {
            for k in 0..NUM_MODES {
                let new_cost = (cur_costs[k] + 5) / 6 * 6 + head_costs[j];
                if char_modes[i][k].is_some() && (char_modes[i][j].is_none() || new_cost < cur_costs[j]) {
                    cur_costs[j] = new_cost;
                    char_modes[i][j] = Some(MODE_TYPES[k]);
                }
            }
        }

        prev_costs = cur_costs;
    }

    if code_points.is_empty() {
        return Ok(Vec::new());
    }

    let mut cur_mode = None::<QrSegmentMode>;
    let mut min_cost = 0;
    for i in 0..NUM_MODES {
        if cur_mode.is_none() || prev_costs[i] < min_cost {
            min_cost = prev_costs[i];
            cur_mode = Some(MODE_TYPES[i]);
        }
    }
    let mut cur_mode = cur_mode.expect("non-empty input has at least one candidate mode");

    let mut result = vec![QrSegmentMode::Byte; char_modes.len()];
    for i in (0..char_modes.len()).rev() {
        for j in 0..NUM_MODES {
            if MODE_TYPES[j] == cur_mode {
                cur_mode = char_modes[i][j].expect("reachable mode has a predecessor");
                result[i] = cur_mode;
                break;
            }
        }
    }
    Ok(result)
}

/// Coalesces runs of code points sharing a mode into segments.
fn split_into_segments(
    code_points: &[char],
    char_modes: &[QrSegmentMode],
) -> Result<Vec<QrSegment>, QrError> {
    let mut result = Vec::new();
    if code_points.is_empty() {
        return Ok(result);
    }

    let mut cur_mode = char_modes[0];
    let mut start = 0;
    let mut i = 0;
    loop {
        i += 1;
        if i < code_points.len() && char_modes[i] == cur_mode {
            continue;
        }

        let s = &code_points[start..i];
        match cur_mode {
            QrSegmentMode::Byte => {
                let text: String = s.iter().collect();
                result.push(QrSegment::make_bytes(text.as_bytes()));
            }
            QrSegmentMode::Numeric => {
                debug_assert!(is_numeric(s));
                result.push(QrSegment::make_numeric(s)?);
            }
            QrSegmentMode::Alphanumeric => {
                debug_assert!(is_alphanumeric(s));
                result.push(QrSegment::make_alphanumeric(s)?);
            }
            #[cfg(feature = "kanji")]
            QrSegmentMode::Kanji => {
                result.push(crate::kanji::make_kanji(s)?);
            }
            #[cfg(not(feature = "kanji"))]
            QrSegmentMode::Kanji => unreachable!("kanji feature disabled"),
            QrSegmentMode::Eci => unreachable!("ECI is never chosen by the optimizer"),
        }

        if i >= code_points.len() {
            return Ok(result);
        }
        cur_mode = char_modes[i];
        start = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_segments() {
        let segs =
            make_segments_optimally(&[], QrCodeEcc::Low, Version::new(1).unwrap(), Version::new(40).unwrap())
                .unwrap();
        assert!(segs.is_empty());
    }

    #[test]
    fn pure_digits_prefer_numeric_mode() {
        let text: Vec<char> = "0123456789".chars().collect();
        let segs = make_segments_optimally(
            &text,
            QrCodeEcc::Low,
            Version::new(1).unwrap(),
            Version::new(40).unwrap(),
        )
        .unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), QrSegmentMode::Numeric);
    }

    #[test]
    fn min_version_greater_than_max_is_invalid_argument() {
        let err = make_segments_optimally(
            &['a'],
            QrCodeEcc::Low,
            Version::new(10).unwrap(),
            Version::new(5).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, QrError::InvalidArgument { .. }));
    }
}
