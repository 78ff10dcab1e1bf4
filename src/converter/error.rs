use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unable to open input file `{}`: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("unable to open output file `{}`: {source}", .path.display())]
    OpenOutput { path: PathBuf, source: io::Error },

    #[error("error reading line {line}: {source}")]
    Read { line: usize, source: io::Error },

    #[error("unable to write to output: {0}")]
    Write(#[from] io::Error),

    // Only reachable when the encoder is handed something the extractor
    // would never produce.
    #[error("`{0}` is not a hexadecimal word")]
    InvalidHex(String),
}
