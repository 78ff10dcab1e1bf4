//! The Converter module takes an instruction listing and
//! produces a flat file of little-endian bytes, one per line.
//!
//! Each line is reduced to a single hex token (the extract
//! submodule), widened or narrowed to a 32-bit word and split
//! into bytes (encode), and the file submodule ties the two
//! together over whole files.

pub mod encode;
pub mod error;
pub mod extract;
pub mod file;

pub use self::encode::{ByteSequence, Word};
pub use self::error::ConvertError;
pub use self::file::{Converter, Summary};
