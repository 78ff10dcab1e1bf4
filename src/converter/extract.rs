//! Finds the instruction word on a line of a listing.
//!
//! A `0x`/`0X` prefixed run of hex digits always wins, since that is how
//! listings spell the encoded instruction. Failing that, the first bare
//! run of 1-8 hex digits that stands on its own (not glued to other word
//! characters) is used, so `deadbeef` is found but the `add` in `addi`
//! is not.
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_PREFIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"0[xX]([0-9a-fA-F]+)").unwrap()
});

static HEX_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9a-fA-F]{1,8})\b").unwrap()
});

/// Returns the first hex token on the line, without any `0x` prefix,
/// or None if the line carries no hex digits we can use.
pub fn first_hex_token(line: &str) -> Option<&str> {
    HEX_PREFIXED.captures(line)
        .or_else(|| HEX_BARE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
