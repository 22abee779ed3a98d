#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{constants::SOURCE_EXTENSION, error::InterpretError};

/// A source line with comments and trailing whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the source file
    pub number: usize,
    /// the line exactly as written
    pub raw:    String,
    /// the line after comment removal
    pub text:   String,
}

impl SourceLine {
    /// Number of leading spaces on the cleaned line.
    pub fn indent(&self) -> usize {
        self.text.chars().take_while(|c| *c == ' ').count()
    }

    /// Returns true if nothing but whitespace is left after cleaning.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The cleaned lines of an Algo program. Whole-line comments are dropped but
/// line numbers still refer to the text as written.
#[derive(Debug, Clone, Default)]
pub struct Source {
    /// cleaned lines, in order
    lines: Vec<SourceLine>,
}

impl Source {
    /// Cleans `code` line by line.
    pub fn parse(code: &str) -> Self {
        let lines = code
            .lines()
            .enumerate()
            .filter(|(_, raw)| !raw.trim_start().starts_with("//"))
            .map(|(i, raw)| SourceLine {
                number: i + 1,
                raw:    raw.to_string(),
                text:   strip_comment(raw).trim_end().to_string(),
            })
            .collect();

        Self { lines }
    }

    /// Reads and cleans the file at `path`.
    pub fn read(path: &Path) -> Result<Self, InterpretError> {
        let code = std::fs::read_to_string(path).map_err(|source| InterpretError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", code.len(), path.display());
        Ok(Self::parse(&code))
    }

    /// The cleaned lines.
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Returns true if every line is blank.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(SourceLine::is_blank)
    }
}

/// Removes a trailing `//` comment, ignoring `//` inside string literals.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
        i += 1;
    }
    line
}

/// Checks that `path` names an existing `.algo` file.
pub fn locate(path: impl AsRef<Path>) -> Result<PathBuf, InterpretError> {
    let path = path.as_ref();
    let has_extension = path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(SOURCE_EXTENSION);

    if !has_extension {
        return Err(InterpretError::InvalidExtension(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(InterpretError::NotFound(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}
