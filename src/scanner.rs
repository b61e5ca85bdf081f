use crate::error::Result;
use log::warn;
use std::io::BufRead;

/// One input line without its terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

impl Line {
    /// Blank lines close INPUT/OUTPUT/INSTANCE blocks.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Reads a bdnet stream line by line, with one line of push-back.
pub struct LineScanner<R> {
    reader: R,
    number: usize,
    max_len: usize,
    pushed_back: Option<Line>,
    buf: Vec<u8>,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, max_len: usize) -> Self {
        LineScanner {
            reader,
            number: 0,
            max_len,
            pushed_back: None,
            buf: Vec::new(),
        }
    }

    /// Returns `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.pushed_back.take() {
            return Ok(Some(line));
        }

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        while let Some(b'\n') | Some(b'\r') = self.buf.last() {
            self.buf.pop();
        }
        let mut text = String::from_utf8_lossy(&self.buf).into_owned();

        if text.len() > self.max_len {
            let mut end = self.max_len;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            warn!(
                "line {}: truncated from {} to {} bytes",
                self.number,
                text.len(),
                end
            );
            text.truncate(end);
        }

        Ok(Some(Line {
            number: self.number,
            text,
        }))
    }

    /// Hands `line` back; the next call to `next_line` returns it.
    pub fn push_back(&mut self, line: Line) {
        debug_assert!(self.pushed_back.is_none());
        self.pushed_back = Some(line);
    }

    /// Number of the last line read from the stream.
    pub fn line_number(&self) -> usize {
        self.number
    }
}
