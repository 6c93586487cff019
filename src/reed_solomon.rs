//! GF(2^8) arithmetic and the Reed-Solomon error correction engine.

/// Returns the product of the two given field elements modulo GF(2^8/0x11D).
/// The arguments and result are unsigned 8-bit integers.
pub fn multiply(x: u8, y: u8) -> u8 {
    // Russian peasant multiplication, reducing modulo the primitive polynomial 0x11D as we go.
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

/// Computes the Reed-Solomon error correction codewords for a sequence of data
/// codewords at a given degree. Each data block in a QR Code shares the same
/// divisor polynomial, so it is computed once and reused.
pub struct ReedSolomonGenerator {
    /// Coefficients of the divisor polynomial, stored from highest to lowest
    /// power, excluding the leading term which is always 1.
    coefficients: Vec<u8>,
}

impl ReedSolomonGenerator {
    /// Creates a Reed-Solomon ECC generator for the given degree.
    pub fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "degree out of range");
        // Start with the monomial x^0.
        let mut coefs = vec![0u8; degree - 1];
        coefs.push(1);

        // Compute (x - r^0)(x - r^1)...(x - r^{degree-1}), drop the leading term,
        // keeping the rest in descending-power order. r = 0x02 is a generator of GF(2^8/0x11D).
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                coefs[j] = multiply(coefs[j], root);
                if j + 1 < coefs.len() {
                    coefs[j] ^= coefs[j + 1];
                }
            }
            root = multiply(root, 0x02);
        }
        ReedSolomonGenerator { coefficients: coefs }
    }

    /// Computes and returns the Reed-Solomon remainder for the given data codewords.
    pub fn get_remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.coefficients.len()];
        for &b in data {
            let factor: u8 = b ^ result.remove(0);
            result.push(0);
            for (x, y) in result.iter_mut().zip(self.coefficients.iter()) {
                *x ^= multiply(*y, factor);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_known_products() {
        assert_eq!(multiply(0xB2, 0xDD), 0xE6);
        assert_eq!(multiply(0xFF, 0xFF), 0xE2);
        assert_eq!(multiply(0x00, 0x99), 0x00);
        assert_eq!(multiply(0x01, 0x7A), 0x7A);
    }

    #[test]
    fn remainder_matches_reference_vector() {
        let rs = ReedSolomonGenerator::new(5);
        let data = [0x03, 0x3A, 0x60, 0x12, 0xC7];
        assert_eq!(rs.get_remainder(&data), vec![0xCB, 0x36, 0x16, 0xFA, 0x9D]);
    }

    #[test]
    fn remainder_is_divisible_by_divisor() {
        // Appending the remainder to the data must make the combined polynomial
        // evaluate to zero at every root alpha^i used to build the divisor.
        let degree = 10;
        let rs = ReedSolomonGenerator::new(degree);
        let data = [0x11u8, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        let remainder = rs.get_remainder(&data);
        let mut codeword: Vec<u8> = data.to_vec();
        codeword.extend_from_slice(&remainder);
        // The remainder of the full codeword w.r.t. its own divisor must be all zero.
        assert_eq!(rs.get_remainder(&codeword), vec![0u8; degree]);
    }

    proptest::proptest! {
        #[test]
        fn multiply_is_commutative(x: u8, y: u8) {
            proptest::prop_assert_eq!(multiply(x, y), multiply(y, x));
        }

        #[test]
        fn multiply_is_associative(x: u8, y: u8, z: u8) {
            proptest::prop_assert_eq!(multiply(multiply(x, y), z), multiply(x, multiply(y, z)));
        }

        #[test]
        fn multiply_distributes_over_xor(x: u8, y: u8, z: u8) {
            proptest::prop_assert_eq!(multiply(x, y ^ z), multiply(x, y) ^ multiply(x, z));
        }

        #[test]
        fn remainder_makes_codeword_divisible(
            degree in 1usize..=30,
            data in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..40),
        ) {
            let rs = ReedSolomonGenerator::new(degree);
            let remainder = rs.get_remainder(&data);
            let mut codeword = data;
            codeword.extend_from_slice(&remainder);
            proptest::prop_assert_eq!(rs.get_remainder(&codeword), vec![0u8; degree]);
        }
    }
}
