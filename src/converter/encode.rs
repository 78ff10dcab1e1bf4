//! Turns a hex token into a 32-bit word and splits that word into its
//! little-endian bytes.
use std::fmt;
use super::error::ConvertError;

/// Number of hex digits in a 32-bit word.
pub const WORD_DIGITS: usize = 8;

/// The four bytes of a word, least significant first.
pub type ByteSequence = [u8; 4];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Word(pub u32);

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Word {
    /// Normalizes a token to exactly eight digits and parses it.
    ///
    /// Tokens longer than eight digits keep only their last eight, so the
    /// low 32 bits survive. Shorter tokens are zero-padded on the left.
    pub fn from_token(token: &str) -> Result<Word, ConvertError> {
        let token = token.trim();
        if !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidHex(token.to_owned()));
        }

        // All ASCII from here, so byte offsets are char offsets.
        let low = &token[token.len().saturating_sub(WORD_DIGITS)..];
        let padded = format!("{:0>width$}", low, width = WORD_DIGITS);

        u32::from_str_radix(&padded, 16)
            .map(Word)
            .map_err(|_| ConvertError::InvalidHex(token.to_owned()))
    }

    pub fn to_le_bytes(self) -> ByteSequence {
        self.0.to_le_bytes()
    }

    /// Renders each byte as two lowercase hex digits, in output order.
    pub fn to_hex_bytes(self) -> [String; 4] {
        let [b0, b1, b2, b3] = self.to_le_bytes();
        [hex_byte(b0), hex_byte(b1), hex_byte(b2), hex_byte(b3)]
    }
}

#[inline]
fn hex_byte(b: u8) -> String {
    format!("{:02x}", b)
}
