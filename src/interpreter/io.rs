use std::io::{self, Read};

/// The input device consumed by `^`.
///
/// `read_char` blocks until one character is available. `Ok(None)` means the
/// device is exhausted; the evaluator turns both that and any error into `-1`.
pub trait CharSource {
    /// Reads one character.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Discards or flushes any buffered input. Called by `ß`.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: CharSource + ?Sized> CharSource for &mut T {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Decodes UTF-8 characters one at a time from any byte reader.
///
/// Wrap `io::stdin()` for the command line, or a byte slice in tests.
///
/// # Example
/// ```
/// use falsey::interpreter::io::{CharSource, ReaderSource};
///
/// let mut source = ReaderSource::new("hé".as_bytes());
/// assert_eq!(source.read_char().unwrap(), Some('h'));
/// assert_eq!(source.read_char().unwrap(), Some('é'));
/// assert_eq!(source.read_char().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps `reader`, decoding its bytes as UTF-8 one character at a time.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = match first {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut buf = [first, 0, 0, 0];
        self.reader.read_exact(&mut buf[1..width])?;
        std::str::from_utf8(&buf[..width]).ok()
                                          .and_then(|s| s.chars().next())
                                          .map(Some)
                                          .ok_or_else(invalid_utf8)
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8")
}

/// An input device with nothing to read; every `^` yields `-1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl CharSource for NoInput {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_sequence_is_an_error() {
        let mut source = ReaderSource::new(&[0xE2u8, 0x82][..]);
        assert!(source.read_char().is_err());
    }

    #[test]
    fn stray_continuation_byte_is_an_error() {
        let mut source = ReaderSource::new(&[0x80u8, b'a'][..]);
        assert!(source.read_char().is_err());
        assert_eq!(source.read_char().unwrap(), Some('a'));
    }

    #[test]
    fn no_input_is_always_exhausted() {
        let mut source = NoInput;
        assert_eq!(source.read_char().unwrap(), None);
        assert!(source.flush().is_ok());
    }
}
