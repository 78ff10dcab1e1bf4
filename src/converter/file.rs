//! Drives extraction and encoding over a whole listing.
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::encode::Word;
use super::error::ConvertError;
use super::extract::first_hex_token;

/// Totals for a finished run.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Summary {
    pub words: usize,
    pub byte_lines: usize,
}

impl Summary {
    /// The one-line report printed after a successful run.
    pub fn report(&self, output: &Path) -> String {
        format!(
            "Converted {} word(s) -> {} byte lines written to '{}'",
            self.words, self.byte_lines, output.display()
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} word(s), {} byte line(s)", self.words, self.byte_lines)
    }
}

#[derive(Default)]
pub struct Converter;

impl Converter {
    pub fn new() -> Self {
        Converter
    }

    /// Opens both files and converts `input` into `output`.
    /// The output file is created (or truncated) even if nothing converts.
    pub fn convert_file<P, Q>(&self, input: P, output: Q) -> Result<Summary, ConvertError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (input, output) = (input.as_ref(), output.as_ref());

        let ifile = File::open(input).map_err(|source| ConvertError::OpenInput {
            path: input.to_path_buf(),
            source,
        })?;
        let ofile = File::create(output).map_err(|source| ConvertError::OpenOutput {
            path: output.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(ofile);
        let summary = self.run(BufReader::new(ifile), &mut writer)?;
        writer.flush()?;

        info!("{} -> {}: {}", input.display(), output.display(), summary);
        Ok(summary)
    }

    /// Converts every line of `reader`, writing one byte per line to `writer`.
    ///
    /// Lines may end in `\n`, `\r\n` or a bare `\r`. Lines that are blank,
    /// comments, or carry no usable hex token are skipped. Only I/O
    /// failures end the run early.
    pub fn run<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<Summary, ConvertError> {
        let mut summary = Summary::default();
        let mut buf: Vec<u8> = Vec::with_capacity(128);
        let mut line_num: usize = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {},
                Err(source) => return Err(ConvertError::Read { line: line_num + 1, source }),
            }

            // A chunk holds one `\n`-terminated line, or several lines
            // separated by bare carriage returns.
            let mut chunk = buf.as_slice();
            if chunk.ends_with(b"\n") {
                chunk = &chunk[..chunk.len() - 1];
            }
            if chunk.ends_with(b"\r") {
                chunk = &chunk[..chunk.len() - 1];
            }

            for raw in chunk.split(|&b| b == b'\r') {
                line_num += 1;
                self.convert_line(raw, line_num, &mut writer, &mut summary)?;
            }
        }

        Ok(summary)
    }

    fn convert_line<W: Write>(
        &self,
        raw: &[u8],
        line_num: usize,
        writer: &mut W,
        summary: &mut Summary,
    ) -> Result<(), ConvertError> {
        // Listings are expected to be UTF-8, but a stray byte should not
        // cost the whole file.
        let raw = String::from_utf8_lossy(raw);
        let line = raw.trim();

        if line.is_empty() {
            return Ok(());
        }
        if line.starts_with("//") || line.starts_with('#') {
            debug!("line {}: comment, skipped", line_num);
            return Ok(());
        }

        let token = match first_hex_token(line) {
            Some(token) => token,
            None => {
                debug!("line {}: no hex word in `{}`, skipped", line_num, line);
                return Ok(());
            }
        };

        let word = match Word::from_token(token) {
            Ok(word) => word,
            Err(e) => {
                warn!("line {}: {}, skipped", line_num, e);
                return Ok(());
            }
        };

        for byte in word.to_hex_bytes().iter() {
            writeln!(writer, "{}", byte)?;
            summary.byte_lines += 1;
        }
        summary.words += 1;
        debug!("line {}: `{}` => {}", line_num, token, word);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn convert_str(input: &str) -> (Summary, String) {
        let mut out: Vec<u8> = Vec::new();
        let summary = Converter::new().run(input.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_prefixed_line() {
        let (summary, out) = convert_str("0x00100093    addi x1, x0, 1  // comment\n");
        assert_eq!(out, "93\n00\n10\n00\n");
        assert_eq!(summary.words, 1);
        assert_eq!(summary.byte_lines, 4);
    }

    #[test]
    fn test_bare_word() {
        let (_, out) = convert_str("deadbeef");
        assert_eq!(out, "ef\nbe\nad\nde\n");
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let asm_input = "
        // startup
        0x00100093    addi x1, x0, 1
        # data follows

        0x00208133    add x2, x1, x2
        ";
        let (summary, out) = convert_str(asm_input);
        assert_eq!(summary.words, 2);
        assert_eq!(summary.byte_lines, 8);
        assert_eq!(out, "93\n00\n10\n00\n33\n81\n20\n00\n");
    }

    #[test]
    fn test_comment_only_lines_produce_nothing() {
        let (summary, out) = convert_str("// 0x00100093\n   # 0xdeadbeef\n\n   \n");
        assert_eq!(summary, Summary::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_tokenless_lines_are_skipped() {
        let (summary, out) = convert_str("nop\nlabel_here:\n0x13\n");
        assert_eq!(summary.words, 1);
        assert_eq!(out, "13\n00\n00\n00\n");
    }

    #[test]
    fn test_words_keep_input_order() {
        let (summary, out) = convert_str("0x1\r\n0x2\r\n0x1230100093\r\n");
        assert_eq!(out, "01\n00\n00\n00\n02\n00\n00\n00\n93\n00\n10\n30\n");
        assert_eq!(summary.words, 3);
        assert_eq!(summary.byte_lines, 12);
    }

    #[test]
    fn test_bare_carriage_return_line_endings() {
        let (summary, out) = convert_str("0x13\r0x00100093\r");
        assert_eq!(summary.words, 2);
        assert_eq!(out, "13\n00\n00\n00\n93\n00\n10\n00\n");
    }

    #[test]
    fn test_mixed_line_endings() {
        let (summary, out) = convert_str("# header\r0x1\r\n\r\r0x2\n// skip\r0x3");
        assert_eq!(summary.words, 3);
        assert_eq!(summary.byte_lines, 12);
        assert_eq!(out, "01\n00\n00\n00\n02\n00\n00\n00\n03\n00\n00\n00\n");
    }

    #[test]
    fn test_invalid_utf8_does_not_abort() {
        let input: &[u8] = b"0x00000013 \xff\xfe nop\n\xc3\x28\n0xdeadbeef\n";
        let mut out: Vec<u8> = Vec::new();
        let summary = Converter::new().run(input, &mut out).unwrap();
        assert_eq!(summary.words, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "13\n00\n00\n00\nef\nbe\nad\nde\n");
    }

    #[test]
    fn test_report() {
        let summary = Summary { words: 2, byte_lines: 8 };
        assert_eq!(
            summary.report(Path::new("out.hex")),
            "Converted 2 word(s) -> 8 byte lines written to 'out.hex'"
        );
    }

    #[test]
    fn test_convert_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("prog.txt");
        let output = dir.path().join("prog.hex");
        fs::write(&input, "// test program\n0x00100093 addi x1, x0, 1\n\n# done\n0x00208133 add x2, x1, x2\n").unwrap();

        let summary = Converter::new().convert_file(&input, &output).unwrap();
        assert_eq!(summary.words, 2);
        assert_eq!(summary.byte_lines, 8);
        assert_eq!(fs::read_to_string(&output).unwrap(), "93\n00\n10\n00\n33\n81\n20\n00\n");
    }

    #[test]
    fn test_convert_file_truncates_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let output = dir.path().join("stale.hex");
        fs::write(&input, "// nothing here\n").unwrap();
        fs::write(&output, "aa\nbb\n").unwrap();

        let summary = Converter::new().convert_file(&input, &output).unwrap();
        assert_eq!(summary.words, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("does-not-exist.txt");
        let output = dir.path().join("out.hex");

        match Converter::new().convert_file(&input, &output) {
            Err(ConvertError::OpenInput { path, .. }) => assert_eq!(path, input),
            other => panic!("expected OpenInput, got {:?}", other),
        }
        // Nothing is created when the input cannot be opened.
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("prog.txt");
        fs::write(&input, "0x13\n").unwrap();
        let output: PathBuf = dir.path().join("no-such-dir").join("out.hex");

        match Converter::new().convert_file(&input, &output) {
            Err(ConvertError::OpenOutput { path, .. }) => assert_eq!(path, output),
            other => panic!("expected OpenOutput, got {:?}", other),
        }
    }
}
