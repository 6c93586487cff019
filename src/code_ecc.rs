/// The error correction level used in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QrCodeEcc {
    Low,
    Medium,
    Quartile,
    High,
}

impl QrCodeEcc {
    /// Returns an unsigned 2-bit integer (in the range 0 to 3), used as a table index.
    pub(crate) fn ordinal(&self) -> usize {
        match *self {
            QrCodeEcc::Low => 0,
            QrCodeEcc::Medium => 1,
            QrCodeEcc::Quartile => 2,
            QrCodeEcc::High => 3,
        }
    }

    /// Returns an unsigned 2-bit integer (in the range 0 to 3), for the format information field.
    pub(crate) fn format_bits(&self) -> u32 {
        match *self {
            QrCodeEcc::Low => 1,
            QrCodeEcc::Medium => 0,
            QrCodeEcc::Quartile => 3,
            QrCodeEcc::High => 2,
        }
    }
}
