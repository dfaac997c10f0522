//! Text/binary classification of candidate files.
//!
//! Extensions are checked first (deny-list, then allow-list) so that well-known
//! formats are never opened. Everything else is decided from the first
//! [`SAMPLE_SIZE`] bytes of the file.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// How many bytes of a file the content heuristic looks at.
pub const SAMPLE_SIZE: usize = 4096;

/// Minimum share of printable bytes for a sample to count as text.
const PRINTABLE_THRESHOLD: f64 = 0.85;

const BINARY_EXTENSIONS: &[&str] = &[
    // executables and libraries
    "exe", "dll", "so", "dylib",
    // archives
    "zip", "rar", "tar", "gz", "7z", "bz2",
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "ico",
    // audio and video
    "mp3", "mp4", "avi", "mkv", "mov", "wav",
    // object files
    "o", "obj", "lib", "a",
    // databases
    "db", "sqlite", "mdb",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // disk images
    "iso", "img", "dmg",
    // fonts
    "ttf", "otf", "woff", "woff2",
    // packaged archives
    "jar", "war", "ear",
    // raw data
    "bin", "dat",
];

const TEXT_EXTENSIONS: &[&str] = &[
    "yaml", "toml", "json", "sh", "mk", "c", "cpp", "h", "vala", "py", "go", "rs", "ts",
];

/// The outcome of classifying a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Binary,
    /// Classification failed; callers treat this as "not binary".
    Unknown,
}

/// Classifies `path` as text or binary.
pub fn detect_file_type(path: &Path) -> io::Result<FileType> {
    if has_binary_extension(path) {
        return Ok(FileType::Binary);
    }
    if has_text_extension(path) {
        return Ok(FileType::Text);
    }
    detect_by_content(path)
}

/// Classifies a file by reading up to [`SAMPLE_SIZE`] bytes from its start.
pub fn detect_by_content(path: &Path) -> io::Result<FileType> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64).read_to_end(&mut sample)?;
    Ok(classify_sample(&sample))
}

/// Applies the content heuristic to a sample taken from the start of a file.
pub fn classify_sample(sample: &[u8]) -> FileType {
    if sample.is_empty() {
        return FileType::Text;
    }
    if sample.contains(&0) {
        return FileType::Binary;
    }

    // A full-size sample may end in the middle of a multi-byte sequence, but
    // one that is not valid UTF-8 is still treated as binary.
    if sample.len() < SAMPLE_SIZE || std::str::from_utf8(sample).is_ok() {
        if printable_ratio(sample) > PRINTABLE_THRESHOLD {
            FileType::Text
        } else {
            FileType::Binary
        }
    } else {
        FileType::Binary
    }
}

/// The share of printable ASCII bytes (plus tab, LF and CR) in `data`.
///
/// An empty slice has a ratio of 1.0.
pub fn printable_ratio(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 1.0;
    }
    let printable = data
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r'))
        .count();
    printable as f64 / data.len() as f64
}

fn has_binary_extension(path: &Path) -> bool {
    extension_in(path, BINARY_EXTENSIONS)
}

fn has_text_extension(path: &Path) -> bool {
    extension_in(path, TEXT_EXTENSIONS)
}

fn extension_in(path: &Path, list: &[&str]) -> bool {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|ext| list.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
