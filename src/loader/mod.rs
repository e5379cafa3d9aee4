use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Data line that ends the data segment. It is stored too, since it may hold
/// the terminator of the last string.
pub const DATA_SENTINEL: &str = "00000000";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("line {line}: expected 8 hex digits, got {text:?}")]
    BadLine { line: usize, text: String },
}

fn parse_word(line: usize, text: &str) -> Result<u32, LoadError> {
    let bad = || LoadError::BadLine {
        line,
        text: text.to_owned(),
    };
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    u32::from_str_radix(text, 16).map_err(|_| bad())
}

/// One instruction word per line, in program order. Blank lines are skipped.
pub fn parse_program(src: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        words.push(parse_word(i + 1, text)?);
    }
    Ok(words)
}

/// Each line holds four bytes written most significant first; they are stored
/// one per cell, lowest byte first. Stops after the sentinel line.
pub fn parse_data(src: &str) -> Result<Vec<u32>, LoadError> {
    let mut cells = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let word = parse_word(i + 1, text)?;
        cells.extend(word.to_le_bytes().iter().map(|&b| b as u32));
        if text == DATA_SENTINEL {
            break;
        }
    }
    Ok(cells)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    parse_program(&read(path.as_ref())?)
}

pub fn load_data(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    parse_data(&read(path.as_ref())?)
}
