use crate::errors::Result;
use regex::bytes::{NoExpand, Regex};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// The line terminator written after every rewritten line that had one.
pub const NEWLINE: &[u8] = if cfg!(windows) {
    b"\r\n".as_slice()
} else {
    b"\n".as_slice()
};

/// Suffix of the temporary sibling a file is rewritten into.
pub const TEMP_SUFFIX: &str = ".restr";

/// Random characters in a temporary file name.
const TEMP_RANDOM_LEN: usize = 6;

/// Longest file name most filesystems accept (`NAME_MAX`).
const MAX_FILE_NAME_LEN: usize = 255;

/// Literal search-and-replace for a single file.
///
/// Both the search and the replacement are plain byte strings: the search is
/// escaped before it is compiled and the replacement is never expanded, so
/// there is no pattern syntax. Matches never overlap and are taken left to
/// right. Files are processed one line at a time, so a match that spans a
/// line break is never found.
#[derive(Debug, Clone)]
pub struct Replacer {
    pattern: Regex,
    search_len: usize,
    replacement: Vec<u8>,
}

/// Options for processing a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// If `true`, matches are counted but the file is left untouched.
    pub dry_run: bool,
}

/// The result of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    /// Occurrences found (dry run) or replaced.
    pub matches: u64,
    /// `true` if the file was rewritten.
    pub modified: bool,
}

impl Replacer {
    /// Creates a new `Replacer`. The search string must not be empty.
    pub fn new(search: &str, replacement: &str) -> Result<Self> {
        if search.is_empty() {
            return Err("the search string must not be empty".into());
        }
        Ok(Self {
            pattern: Regex::new(&regex::escape(search))?,
            search_len: search.len(),
            replacement: replacement.as_bytes().to_vec(),
        })
    }

    /// Processes a single file.
    ///
    /// The file is first scanned for matches. Nothing else happens when there
    /// are none or when `dry_run` is set; otherwise the file is rewritten with
    /// [`Replacer::replace_in_file`].
    pub fn process_file(&self, path: &Path, options: ProcessOptions) -> Result<ProcessResult> {
        let found = self.count_matches(path)?;
        if found == 0 {
            return Ok(ProcessResult {
                matches: 0,
                modified: false,
            });
        }
        debug!("found {:4} matches: {}", found, path.display());

        if options.dry_run {
            return Ok(ProcessResult {
                matches: found,
                modified: false,
            });
        }

        let replaced = self.replace_in_file(path)?;
        Ok(ProcessResult {
            matches: replaced,
            modified: true,
        })
    }

    /// Counts the occurrences of the search string, line by line.
    pub fn count_matches(&self, path: &Path) -> Result<u64> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut line = Vec::new();
        let mut total = 0u64;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let (content, _) = split_terminator(&line);
            total += self.count_in(content) as u64;
        }

        Ok(total)
    }

    /// Rewrites `path` with every occurrence replaced and returns the number
    /// of replacements.
    ///
    /// The new content goes to a temporary file next to the original, named
    /// after it, which is then renamed over the original. Line terminators are
    /// normalized to [`NEWLINE`]; a last line without a terminator keeps
    /// having none. The original keeps its permissions. If anything fails
    /// before the rename, the temporary file is removed and the original is
    /// left as it was.
    pub fn replace_in_file(&self, path: &Path) -> Result<u64> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut reader = BufReader::new(File::open(path)?);
        let temp_file = tempfile::Builder::new()
            .prefix(&temp_prefix(file_name))
            .rand_bytes(TEMP_RANDOM_LEN)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(parent)?;
        let mut writer = BufWriter::new(temp_file);

        let mut line = Vec::new();
        let mut total = 0u64;
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let (content, terminated) = split_terminator(&line);

            total += self.replaced_count(content) as u64;
            writer.write_all(&self.replace_in(content))?;
            if terminated {
                writer.write_all(NEWLINE)?;
            }
        }

        let temp_file = writer.into_inner().map_err(|e| e.into_error())?;
        drop(reader);

        let perms = fs::metadata(path)?.permissions();
        fs::set_permissions(temp_file.path(), perms)?;

        temp_file.persist(path)?;
        Ok(total)
    }

    /// Counts non-overlapping occurrences in one line.
    pub fn count_in(&self, line: &[u8]) -> usize {
        self.pattern.find_iter(line).count()
    }

    /// Replaces every non-overlapping occurrence in one line, left to right.
    pub fn replace_in(&self, line: &[u8]) -> Vec<u8> {
        self.pattern
            .replace_all(line, NoExpand(&self.replacement))
            .into_owned()
    }

    /// Number of replacements in `line`, measured as the length removed when
    /// all occurrences are deleted divided by the length of the search string.
    fn replaced_count(&self, line: &[u8]) -> usize {
        let without = self.pattern.replace_all(line, NoExpand(b""));
        (line.len() - without.len()) / self.search_len
    }
}

/// Returns `true` for names of the temporary siblings written by
/// [`Replacer::replace_in_file`].
pub fn is_temp_file_name(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.first() == Some(&b'.') && bytes.ends_with(TEMP_SUFFIX.as_bytes())
}

/// `.<file name>.`, cut on a character boundary so that the full temporary
/// name still fits in [`MAX_FILE_NAME_LEN`].
fn temp_prefix(file_name: &OsStr) -> String {
    let budget = MAX_FILE_NAME_LEN - TEMP_RANDOM_LEN - TEMP_SUFFIX.len() - 2;
    let name = file_name.to_string_lossy();
    let mut end = name.len().min(budget);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    format!(".{}.", &name[..end])
}

/// Splits a line read with `read_until(b'\n')` into its content and whether
/// it ended with a terminator (`\n` or `\r\n`).
fn split_terminator(line: &[u8]) -> (&[u8], bool) {
    match line.strip_suffix(b"\n") {
        Some(content) => (content.strip_suffix(b"\r").unwrap_or(content), true),
        None => (line, false),
    }
}
