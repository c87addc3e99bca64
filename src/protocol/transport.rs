use std::{
    borrow::Cow,
    io::{self, BufRead, Write},
};

use log::warn;
use thiserror::Error;

use super::Response;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport IO Error: {0}")]
    Io(#[from] io::Error),
}

/// Newline-delimited text transport over a reader/writer pair.
///
/// Every response is flushed as soon as it is written; the peer waits for each
/// answer before sending the next query.
pub struct LineTransport<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next line without its terminator. Returns `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, so a corrupt
    /// line still reaches the backend and is answered on its own.
    pub fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = match String::from_utf8_lossy(&buf) {
            Cow::Borrowed(line) => line.to_string(),
            Cow::Owned(line) => {
                warn!("replaced invalid UTF-8 in '{line}'");
                line
            }
        };
        Ok(Some(line))
    }

    pub fn write_response(&mut self, resp: &Response) -> Result<(), TransportError> {
        writeln!(self.writer, "{resp}")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
