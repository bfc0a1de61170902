//! Console Channels
//!
//! Input and output handles a machine performs `read`/`print` through.
//! The machine never touches process streams directly; the host decides
//! what a console is wired to.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{SvmError, SvmResult};

/// Line-oriented input plus text output
pub trait Console {
    /// Read one line without its trailing newline.
    /// Fails with `EndOfInput` once the input is exhausted.
    fn read_line(&mut self) -> SvmResult<String>;

    /// Write text and flush it
    fn write_str(&mut self, text: &str) -> SvmResult<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self) -> SvmResult<String> {
        (**self).read_line()
    }

    fn write_str(&mut self, text: &str) -> SvmResult<()> {
        (**self).write_str(text)
    }
}

/// Console over any buffered reader and writer
#[derive(Debug)]
pub struct StdConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StdConsole { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self) -> SvmResult<String> {
        // Output must be visible before we block on input
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(SvmError::EndOfInput);
        }
        Ok(strip_newline(line))
    }

    fn write_str(&mut self, text: &str) -> SvmResult<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Scripted input and captured output
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<String>,
    output: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose input yields `lines` in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferConsole {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Console for BufferConsole {
    fn read_line(&mut self) -> SvmResult<String> {
        self.input.pop_front().ok_or(SvmError::EndOfInput)
    }

    fn write_str(&mut self, text: &str) -> SvmResult<()> {
        self.output.push_str(text);
        Ok(())
    }
}

/// Closed input, discarded output
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConsole;

impl Console for NullConsole {
    fn read_line(&mut self) -> SvmResult<String> {
        Err(SvmError::EndOfInput)
    }

    fn write_str(&mut self, _text: &str) -> SvmResult<()> {
        Ok(())
    }
}

/// Drop a trailing `\n` or `\r\n`
pub fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn std_console_reads_lines_until_eof() {
        let input = Cursor::new("first\r\nsecond\nlast");
        let mut console = StdConsole::new(input, Vec::new());
        assert_eq!(console.read_line(), Ok("first".to_string()));
        assert_eq!(console.read_line(), Ok("second".to_string()));
        assert_eq!(console.read_line(), Ok("last".to_string()));
        assert_eq!(console.read_line(), Err(SvmError::EndOfInput));
    }

    #[test]
    fn std_console_writes_through() {
        let mut console = StdConsole::new(Cursor::new(""), Vec::new());
        console.write_str("a").expect("write failed");
        console.write_str("b\n").expect("write failed");
        let (_, out) = console.into_inner();
        assert_eq!(out, b"ab\n");
    }

    #[test]
    fn buffer_console_scripts_input() {
        let mut console = BufferConsole::with_input(["7"]);
        assert_eq!(console.read_line(), Ok("7".to_string()));
        assert_eq!(console.read_line(), Err(SvmError::EndOfInput));
        console.write_str("x").expect("write failed");
        assert_eq!(console.take_output(), "x");
        assert_eq!(console.output(), "");
    }
}
