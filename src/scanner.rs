#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::io::BufRead;

/// Reads whitespace-separated tokens and whole lines from a buffered reader.
pub struct InputScanner<R> {
    /// the underlying reader
    reader:  R,
    /// unread remainder of the current line
    pending: String,
}

impl<R: BufRead> InputScanner<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: String::new(),
        }
    }

    /// Reads the next physical line into `pending`. Returns false at end of
    /// input.
    fn fill(&mut self) -> std::io::Result<bool> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        self.pending = line;
        Ok(true)
    }

    /// Returns the next whitespace-delimited token, reading more lines as
    /// needed. `None` means the input is exhausted.
    pub fn next_token(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let rest = self.pending.trim_start();
            if !rest.is_empty() {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let token = rest[..end].to_string();
                self.pending = rest[end..].to_string();
                return Ok(Some(token));
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    /// Returns the rest of the current line if anything but whitespace is
    /// left on it, otherwise the next line. `None` means the input is
    /// exhausted.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if self.pending.trim().is_empty() && !self.fill()? {
            return Ok(None);
        }
        let line = std::mem::take(&mut self.pending);
        Ok(Some(line.trim_start().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn tokens_span_lines() {
        let mut scanner = InputScanner::new(Cursor::new("1 2\n\n  3\n"));
        assert_eq!(scanner.next_token().unwrap().as_deref(), Some("1"));
        assert_eq!(scanner.next_token().unwrap().as_deref(), Some("2"));
        assert_eq!(scanner.next_token().unwrap().as_deref(), Some("3"));
        assert_eq!(scanner.next_token().unwrap(), None);
    }

    #[test]
    fn line_after_token_takes_remainder_or_next_line() {
        let mut scanner = InputScanner::new(Cursor::new("42 tail text\n7\nwhole line\n"));
        assert_eq!(scanner.next_token().unwrap().as_deref(), Some("42"));
        assert_eq!(scanner.next_line().unwrap().as_deref(), Some("tail text"));
        assert_eq!(scanner.next_token().unwrap().as_deref(), Some("7"));
        assert_eq!(scanner.next_line().unwrap().as_deref(), Some("whole line"));
        assert_eq!(scanner.next_line().unwrap(), None);
    }
}
